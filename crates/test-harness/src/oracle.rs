//! Verification oracles: pure functions returning pass/fail verdicts.
//!
//! Each oracle returns an `OracleVerdict` with diagnostic detail, not panics,
//! so a test can collect every failure in one pass.

use std::collections::BTreeSet;

use detector_types::GridDefinition;
use geometry_kernel::{KernelIntrospect, SolidShape, VolumeHandle};
use pillar_grid::{compute_layout, GridOutput};

/// The result of a single oracle check.
#[derive(Debug, Clone)]
pub struct OracleVerdict {
    pub oracle_name: String,
    pub passed: bool,
    pub detail: String,
    pub value: Option<f64>,
}

impl OracleVerdict {
    fn pass(name: &str, detail: String) -> Self {
        Self {
            oracle_name: name.to_string(),
            passed: true,
            detail,
            value: None,
        }
    }

    fn pass_val(name: &str, detail: String, value: f64) -> Self {
        Self {
            oracle_name: name.to_string(),
            passed: true,
            detail,
            value: Some(value),
        }
    }

    fn fail(name: &str, detail: String) -> Self {
        Self {
            oracle_name: name.to_string(),
            passed: false,
            detail,
            value: None,
        }
    }

    fn fail_val(name: &str, detail: String, value: f64) -> Self {
        Self {
            oracle_name: name.to_string(),
            passed: false,
            detail,
            value: Some(value),
        }
    }
}

// ── Graph Oracles ───────────────────────────────────────────────────────────

/// Exactly one placement has no mother.
pub fn check_single_root(kernel: &dyn KernelIntrospect) -> OracleVerdict {
    let roots: Vec<String> = kernel
        .placements()
        .into_iter()
        .filter_map(|h| kernel.placement(h))
        .filter(|p| p.mother.is_none())
        .map(|p| p.name.clone())
        .collect();
    if roots.len() == 1 {
        OracleVerdict::pass("single_root", format!("root is {}", roots[0]))
    } else {
        OracleVerdict::fail_val(
            "single_root",
            format!("expected one root placement, found {roots:?}"),
            roots.len() as f64,
        )
    }
}

/// Every mother volume is itself placed earlier in the graph.
pub fn check_mothers_placed(kernel: &dyn KernelIntrospect) -> OracleVerdict {
    let mut placed: Vec<VolumeHandle> = Vec::new();
    for h in kernel.placements() {
        let Some(p) = kernel.placement(h) else {
            continue;
        };
        if let Some(mother) = p.mother {
            if !placed.contains(&mother) {
                let mother_name = kernel
                    .volume(mother)
                    .map(|v| v.name.clone())
                    .unwrap_or_default();
                return OracleVerdict::fail(
                    "mothers_placed",
                    format!("{} placed in unplaced mother {}", p.name, mother_name),
                );
            }
        }
        placed.push(p.volume);
    }
    OracleVerdict::pass_val(
        "mothers_placed",
        format!("{} placements, all mothers placed first", placed.len()),
        placed.len() as f64,
    )
}

/// Number of placements carrying `name`.
pub fn check_placement_count(
    kernel: &dyn KernelIntrospect,
    name: &str,
    expected: usize,
) -> OracleVerdict {
    let count = kernel
        .placements()
        .into_iter()
        .filter_map(|h| kernel.placement(h))
        .filter(|p| p.name == name)
        .count();
    if count == expected {
        OracleVerdict::pass_val(
            "placement_count",
            format!("{name} placed {count} times"),
            count as f64,
        )
    } else {
        OracleVerdict::fail_val(
            "placement_count",
            format!("{name}: expected {expected} placements, got {count}"),
            count as f64,
        )
    }
}

/// Placements carrying `name` never share a copy number.
pub fn check_unique_copy_numbers(kernel: &dyn KernelIntrospect, name: &str) -> OracleVerdict {
    let mut copies: Vec<u32> = kernel
        .placements()
        .into_iter()
        .filter_map(|h| kernel.placement(h))
        .filter(|p| p.name == name)
        .map(|p| p.copy_number)
        .collect();
    copies.sort_unstable();
    let total = copies.len();
    copies.dedup();
    if copies.len() == total {
        OracleVerdict::pass_val(
            "unique_copy_numbers",
            format!("{name}: {total} distinct copy numbers"),
            total as f64,
        )
    } else {
        OracleVerdict::fail_val(
            "unique_copy_numbers",
            format!("{name}: {} repeated copy numbers", total - copies.len()),
            (total - copies.len()) as f64,
        )
    }
}

/// Unrotated box daughters of box mothers lie inside their mother.
pub fn check_box_containment(kernel: &dyn KernelIntrospect, tolerance: f64) -> OracleVerdict {
    let half_extents = |v: VolumeHandle| -> Option<[f64; 3]> {
        let solid = kernel.solid(kernel.volume(v)?.solid)?;
        match solid.shape {
            SolidShape::Box { half_extents } => Some(half_extents),
            _ => None,
        }
    };

    let mut checked = 0usize;
    for h in kernel.placements() {
        let Some(p) = kernel.placement(h) else {
            continue;
        };
        let Some(mother) = p.mother else {
            continue;
        };
        if !p.transform.rotation.is_identity(1e-12) {
            continue;
        }
        let (Some(inner), Some(outer)) = (half_extents(p.volume), half_extents(mother)) else {
            continue;
        };
        checked += 1;
        for axis in 0..3 {
            let reach = p.transform.translation[axis].abs() + inner[axis];
            if reach > outer[axis] + tolerance {
                return OracleVerdict::fail_val(
                    "box_containment",
                    format!(
                        "{} copy {} protrudes along axis {axis}: {reach} > {}",
                        p.name, p.copy_number, outer[axis]
                    ),
                    reach - outer[axis],
                );
            }
        }
    }
    OracleVerdict::pass_val(
        "box_containment",
        format!("{checked} box placements inside their mothers"),
        checked as f64,
    )
}

// ── Grid Oracles ────────────────────────────────────────────────────────────

/// Pillar placements of a built grid agree with the computed layout.
pub fn check_grid_layout(
    kernel: &dyn KernelIntrospect,
    def: &GridDefinition,
    output: &GridOutput,
    tolerance: f64,
) -> OracleVerdict {
    let layout = match compute_layout(def) {
        Ok(layout) => layout,
        Err(e) => return OracleVerdict::fail("grid_layout", format!("invalid grid: {e}")),
    };
    if layout.slots.len() != output.pillar_placements.len() {
        return OracleVerdict::fail(
            "grid_layout",
            format!(
                "expected {} pillars, built {}",
                layout.slots.len(),
                output.pillar_placements.len()
            ),
        );
    }

    let mut worst = 0.0f64;
    for (slot, h) in layout.slots.iter().zip(&output.pillar_placements) {
        let Some(p) = kernel.placement(*h) else {
            return OracleVerdict::fail("grid_layout", format!("pillar {} missing", slot.index));
        };
        if p.copy_number != slot.index || p.mother != Some(output.container_volume) {
            return OracleVerdict::fail(
                "grid_layout",
                format!("pillar {} has copy {} or wrong mother", slot.index, p.copy_number),
            );
        }
        for axis in 0..3 {
            worst = worst.max((p.transform.translation[axis] - slot.center[axis]).abs());
        }
    }

    if worst <= tolerance {
        OracleVerdict::pass_val(
            "grid_layout",
            format!("{} pillars at expected centres", layout.slots.len()),
            worst,
        )
    } else {
        OracleVerdict::fail_val(
            "grid_layout",
            format!("pillar centre off by {worst}"),
            worst,
        )
    }
}

/// Run every graph oracle and return them all.
pub fn run_graph_oracles(kernel: &dyn KernelIntrospect) -> Vec<OracleVerdict> {
    let mut verdicts = vec![
        check_single_root(kernel),
        check_mothers_placed(kernel),
        check_box_containment(kernel, 1e-9),
    ];
    let names: BTreeSet<String> = kernel
        .placements()
        .into_iter()
        .filter_map(|h| kernel.placement(h))
        .map(|p| p.name.clone())
        .collect();
    verdicts.extend(names.iter().map(|n| check_unique_copy_numbers(kernel, n)));
    verdicts
}
