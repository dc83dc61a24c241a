use scene_assembler::DefinitionStore;
use serde::Serialize;

use crate::errors::SaveError;
use crate::metadata::DocumentMetadata;

pub const FORMAT_ID: &str = "detector-definitions";

/// Current document version.
pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Serialize)]
struct DefinitionDocument<'a> {
    format: &'static str,
    version: u32,
    project: &'a DocumentMetadata,
    definitions: &'a DefinitionStore,
}

/// Serialize definitions to a pretty-printed JSON document.
pub fn save_definitions(
    definitions: &DefinitionStore,
    metadata: &DocumentMetadata,
) -> Result<String, SaveError> {
    let document = DefinitionDocument {
        format: FORMAT_ID,
        version: FORMAT_VERSION,
        project: metadata,
        definitions,
    };
    serde_json::to_string_pretty(&document).map_err(|e| SaveError::Serialize(e.to_string()))
}
