//! Assertion helpers with diagnostic output.
//!
//! Failures carry expected vs actual values and a context tag.

use geometry_kernel::{KernelIntrospect, SolidShape};

use crate::helpers::{distance, HarnessError};
use crate::oracle::OracleVerdict;

/// Assert the number of placements carrying `name`.
pub fn assert_placement_count(
    kernel: &dyn KernelIntrospect,
    name: &str,
    expected: usize,
    ctx: &str,
) -> Result<(), HarnessError> {
    let actual = kernel
        .placements()
        .into_iter()
        .filter_map(|h| kernel.placement(h))
        .filter(|p| p.name == name)
        .count();
    if actual == expected {
        Ok(())
    } else {
        Err(HarnessError::AssertionFailed {
            detail: format!("[{ctx}] {name}: expected {expected} placements, got {actual}"),
        })
    }
}

/// Assert the translations of every copy of `name`, ordered by copy number.
pub fn assert_copy_positions(
    kernel: &dyn KernelIntrospect,
    name: &str,
    expected: &[[f64; 3]],
    tol: f64,
    ctx: &str,
) -> Result<(), HarnessError> {
    let mut copies: Vec<(u32, [f64; 3])> = kernel
        .placements()
        .into_iter()
        .filter_map(|h| kernel.placement(h))
        .filter(|p| p.name == name)
        .map(|p| (p.copy_number, p.transform.translation))
        .collect();
    copies.sort_by_key(|(copy, _)| *copy);

    if copies.len() != expected.len() {
        return Err(HarnessError::AssertionFailed {
            detail: format!(
                "[{ctx}] {name}: expected {} copies, got {}",
                expected.len(),
                copies.len()
            ),
        });
    }
    for ((copy, actual), want) in copies.iter().zip(expected) {
        let off = distance(*actual, *want);
        if off > tol {
            return Err(HarnessError::AssertionFailed {
                detail: format!(
                    "[{ctx}] {name} copy {copy}: expected {want:?}, got {actual:?} (off by {off:.3e})"
                ),
            });
        }
    }
    Ok(())
}

/// Assert the material bound to the first volume named `name`.
pub fn assert_volume_material(
    kernel: &dyn KernelIntrospect,
    name: &str,
    material: &str,
    ctx: &str,
) -> Result<(), HarnessError> {
    let handle = kernel
        .find_volume(name)
        .ok_or_else(|| HarnessError::VolumeNotFound {
            name: name.to_string(),
        })?;
    let actual = kernel
        .volume(handle)
        .and_then(|v| kernel.material_info(v.material))
        .map(|m| m.name.as_str())
        .unwrap_or("<none>");
    if actual == material {
        Ok(())
    } else {
        Err(HarnessError::AssertionFailed {
            detail: format!("[{ctx}] {name}: expected material {material}, got {actual}"),
        })
    }
}

/// Assert the kind of solid behind the first volume named `name`.
pub fn assert_solid_kind(
    kernel: &dyn KernelIntrospect,
    name: &str,
    kind: &str,
    ctx: &str,
) -> Result<(), HarnessError> {
    let handle = kernel
        .find_volume(name)
        .ok_or_else(|| HarnessError::VolumeNotFound {
            name: name.to_string(),
        })?;
    let actual = kernel
        .volume(handle)
        .and_then(|v| kernel.solid(v.solid))
        .map(|s| match s.shape {
            SolidShape::Box { .. } => "box",
            SolidShape::Tube { .. } => "tube",
            SolidShape::Boolean { .. } => "boolean",
        })
        .unwrap_or("<none>");
    if actual == kind {
        Ok(())
    } else {
        Err(HarnessError::AssertionFailed {
            detail: format!("[{ctx}] {name}: expected {kind} solid, got {actual}"),
        })
    }
}

/// Turn the first failing verdict into an error.
pub fn assert_all_pass(verdicts: &[OracleVerdict]) -> Result<(), HarnessError> {
    match verdicts.iter().find(|v| !v.passed) {
        Some(v) => Err(HarnessError::OracleFailure {
            oracle: v.oracle_name.clone(),
            detail: v.detail.clone(),
        }),
        None => Ok(()),
    }
}
