use detector_types::units::length_unit;
use scene_assembler::{AssemblyConfig, DefinitionStore, DetectorBuilder};
use serde::Deserialize;
use serde_json::Value;

use crate::errors::LoadError;
use crate::metadata::DocumentMetadata;
use crate::save::{FORMAT_ID, FORMAT_VERSION};

#[derive(Debug, Deserialize)]
struct DocumentHeader {
    format: String,
    version: u32,
}

#[derive(Debug, Deserialize)]
struct DocumentBody {
    project: DocumentMetadata,
    /// Unit of every length in `definitions`; millimetres when absent.
    #[serde(default)]
    length_unit: Option<String>,
    #[serde(default)]
    definitions: DefinitionStore,
}

/// Deserialize a definition document.
///
/// Validates the format identifier and version, migrating older documents
/// before the records are decoded. Lengths are converted to millimetres when
/// the document names another `length_unit`.
pub fn load_definitions(json: &str) -> Result<(DefinitionStore, DocumentMetadata), LoadError> {
    let value: Value = serde_json::from_str(json).map_err(|e| LoadError::ParseError(e.to_string()))?;
    let header = DocumentHeader::deserialize(&value).map_err(|e| LoadError::ParseError(e.to_string()))?;

    if header.format != FORMAT_ID {
        return Err(LoadError::UnknownFormat(header.format));
    }
    if header.version > FORMAT_VERSION {
        return Err(LoadError::FutureVersion {
            file_version: header.version,
            supported_version: FORMAT_VERSION,
        });
    }

    let value = if header.version < FORMAT_VERSION {
        crate::migrate::migrate(value, header.version, FORMAT_VERSION)?
    } else {
        value
    };

    let mut body =
        DocumentBody::deserialize(value).map_err(|e| LoadError::ParseError(e.to_string()))?;
    if let Some(unit) = &body.length_unit {
        let factor = length_unit(unit)?;
        if factor != 1.0 {
            body.definitions.scale_lengths(factor);
        }
    }
    Ok((body.definitions, body.project))
}

/// Load a document straight into a builder, re-checking every record.
pub fn load_builder(
    json: &str,
    config: AssemblyConfig,
) -> Result<(DetectorBuilder, DocumentMetadata), LoadError> {
    let (definitions, metadata) = load_definitions(json)?;
    let builder = DetectorBuilder::from_definitions(definitions, config)?;
    Ok((builder, metadata))
}
