use serde_json::Value;

use crate::errors::LoadError;

/// Apply document migrations from `from_version` to `to_version`.
///
/// Migrations rewrite the raw JSON one version at a time so that record
/// types only ever decode the current layout.
pub fn migrate(document: Value, from_version: u32, to_version: u32) -> Result<Value, LoadError> {
    let mut document = document;
    for version in from_version..to_version {
        document = migrate_step(document, version)?;
    }
    Ok(document)
}

/// Version 1 is the first published layout, so no step exists yet.
fn migrate_step(_document: Value, version: u32) -> Result<Value, LoadError> {
    Err(LoadError::MigrationFailed {
        from: version,
        to: version + 1,
        reason: format!("no migration path from v{} to v{}", version, version + 1),
    })
}
