use detector_types::DefinitionError;
use scene_assembler::StoreError;

/// Errors while reading a definition document.
#[derive(Debug, Clone, thiserror::Error)]
pub enum LoadError {
    #[error("failed to parse document: {0}")]
    ParseError(String),

    #[error("unknown document format: {0}")]
    UnknownFormat(String),

    #[error("document version {file_version} is newer than supported version {supported_version}")]
    FutureVersion {
        file_version: u32,
        supported_version: u32,
    },

    #[error("migration failed from version {from} to {to}: {reason}")]
    MigrationFailed { from: u32, to: u32, reason: String },

    #[error("invalid definition: {0}")]
    InvalidDefinition(#[from] StoreError),

    #[error("invalid document unit: {0}")]
    InvalidUnit(#[from] DefinitionError),
}

/// Errors while writing a definition document.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SaveError {
    #[error("failed to serialize document: {0}")]
    Serialize(String),
}
