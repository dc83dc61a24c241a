//! Build command

use std::path::Path;

use anyhow::{Context, Result};
use geometry_kernel::MemoryKernel;
use tracing::info;

use crate::report;

pub fn run(document: &Path, config: Option<&Path>, max_depth: usize) -> Result<()> {
    let config = super::load_config(config)?;
    let (mut builder, metadata) = super::load_document(document, config)?;
    info!(project = %metadata.name, "loaded document");

    let mut kernel = MemoryKernel::new();
    let report = builder
        .rebuild(&mut kernel)
        .with_context(|| format!("assembling {}", metadata.name))?;

    println!("Project: {}", metadata.name);
    if let Some(description) = &metadata.description {
        println!("  {description}");
    }
    println!(
        "World: {} x {} x {} mm",
        report.world_size[0], report.world_size[1], report.world_size[2]
    );
    println!();
    report::print_tree(&kernel, report.world_volume, max_depth);
    println!();
    report::print_summary(&kernel, report);
    Ok(())
}
