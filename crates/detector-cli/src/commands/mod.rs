pub mod build;
pub mod materials;
pub mod validate;

use std::path::Path;

use anyhow::{Context, Result};
use definition_format::{load_builder, DocumentMetadata};
use scene_assembler::{AssemblyConfig, DetectorBuilder};

/// Read the optional assembly configuration, falling back to defaults.
pub fn load_config(path: Option<&Path>) -> Result<AssemblyConfig> {
    let Some(path) = path else {
        return Ok(AssemblyConfig::default());
    };
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    AssemblyConfig::from_json(&content).with_context(|| format!("parsing config {}", path.display()))
}

/// Read a definition document into a checked builder.
pub fn load_document(
    path: &Path,
    config: AssemblyConfig,
) -> Result<(DetectorBuilder, DocumentMetadata)> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading document {}", path.display()))?;
    load_builder(&content, config).with_context(|| format!("loading document {}", path.display()))
}
