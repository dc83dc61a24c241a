//! Placement tree and summary printing.

use geometry_kernel::{KernelIntrospect, Placement, SolidShape, VolumeHandle};
use scene_assembler::{AssemblyReport, Phase};

/// Print the placement tree below `root`.
///
/// Consecutive copies of the same volume under one mother are folded into a
/// single line, and each volume's contents are expanded once per group.
pub fn print_tree(kernel: &dyn KernelIntrospect, root: VolumeHandle, max_depth: usize) {
    println!("{}", describe_volume(kernel, root));
    print_daughters(kernel, root, 1, max_depth);
}

fn print_daughters(
    kernel: &dyn KernelIntrospect,
    mother: VolumeHandle,
    depth: usize,
    max_depth: usize,
) {
    let indent = "  ".repeat(depth);
    if depth > max_depth {
        println!("{indent}...");
        return;
    }

    let daughters: Vec<&Placement> = kernel
        .daughters(mother)
        .into_iter()
        .filter_map(|h| kernel.placement(h))
        .collect();

    for group in daughters.chunk_by(|a, b| a.name == b.name && a.volume == b.volume) {
        let first = group[0];
        let t = first.transform.translation;
        if group.len() == 1 {
            println!(
                "{indent}{} #{} at ({:.3}, {:.3}, {:.3}) {}",
                first.name,
                first.copy_number,
                t[0],
                t[1],
                t[2],
                describe_volume(kernel, first.volume)
            );
        } else {
            println!(
                "{indent}{} x{} (copies {}..{}) first at ({:.3}, {:.3}, {:.3}) {}",
                first.name,
                group.len(),
                first.copy_number,
                group[group.len() - 1].copy_number,
                t[0],
                t[1],
                t[2],
                describe_volume(kernel, first.volume)
            );
        }

        print_daughters(kernel, first.volume, depth + 1, max_depth);
    }
}

fn describe_volume(kernel: &dyn KernelIntrospect, handle: VolumeHandle) -> String {
    let Some(volume) = kernel.volume(handle) else {
        return "[missing volume]".to_string();
    };
    let kind = match kernel.solid(volume.solid).map(|s| &s.shape) {
        Some(SolidShape::Box { .. }) => "box",
        Some(SolidShape::Tube { .. }) => "tube",
        Some(SolidShape::Boolean { .. }) => "boolean",
        None => "?",
    };
    let material = kernel
        .material_info(volume.material)
        .map(|m| m.name.as_str())
        .unwrap_or("?");

    let mut line = format!("[{} {kind}, {material}", volume.name);
    if let Some(step) = volume.max_step {
        line.push_str(&format!(", step {step} mm"));
    }
    if let Some(sd) = &volume.sensitive_detector {
        line.push_str(&format!(", sensitive {sd}"));
    }
    line.push(']');
    line
}

pub fn print_summary(kernel: &dyn KernelIntrospect, report: &AssemblyReport) {
    println!("Placements: {}", report.placements.len());
    for phase in [
        Phase::World,
        Phase::Simple,
        Phase::Replica,
        Phase::Boolean,
        Phase::Grid,
    ] {
        let count = report.placements_in(phase).count();
        if count > 0 {
            println!("  {phase:?}: {count}");
        }
    }
    for grid in &report.grids {
        let size = grid.layout.container_size;
        let mother = kernel
            .placement(grid.container_placement)
            .and_then(|p| p.mother)
            .and_then(|m| kernel.volume(m))
            .map(|v| v.name.as_str())
            .unwrap_or("?");
        println!(
            "Grid {}: {} pillars in {:.3} x {:.3} x {:.3} mm container under {mother}",
            grid.name,
            grid.layout.slots.len(),
            size[0],
            size[1],
            size[2]
        );
    }
    if !report.warnings.is_empty() {
        println!("Warnings:");
        for warning in &report.warnings {
            println!("  {warning}");
        }
    }
}
