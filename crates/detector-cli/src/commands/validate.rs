//! Validate command

use std::path::Path;

use anyhow::{Context, Result};
use geometry_kernel::MemoryKernel;

pub fn run(document: &Path, config: Option<&Path>) -> Result<()> {
    let config = super::load_config(config)?;
    let (mut builder, metadata) = super::load_document(document, config)?;
    let mut kernel = MemoryKernel::new();
    let report = builder
        .rebuild(&mut kernel)
        .with_context(|| format!("assembling {}", metadata.name))?;

    println!(
        "Document is valid: {} ({} placements, {} grids)",
        document.display(),
        report.placements.len(),
        report.grids.len()
    );
    for warning in &report.warnings {
        println!("  warning: {warning}");
    }
    Ok(())
}
