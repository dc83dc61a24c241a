use detector_types::{BooleanOp, PrimitiveDefinition};
use geometry_kernel::{Kernel, SolidHandle};
use tracing::info;

use crate::resolve::{local_transform, make_solid};
use crate::types::AssemblyError;

/// A boolean component and the operation it applies to its root.
pub type Component<'a> = (&'a PrimitiveDefinition, BooleanOp);

/// Check the boolean groups and return, for each component, the index of its root.
///
/// The count check runs first and compares the raw numbers: more roots than
/// components is rejected even when every root has a component.
pub fn match_components(
    roots: &[&PrimitiveDefinition],
    components: &[Component<'_>],
) -> Result<Vec<usize>, AssemblyError> {
    if roots.len() > components.len() {
        return Err(AssemblyError::BooleanRootsExceedComponents {
            roots: roots.len(),
            components: components.len(),
        });
    }
    for (i, root) in roots.iter().enumerate() {
        if roots[..i].iter().any(|r| r.name == root.name) {
            return Err(AssemblyError::DuplicateBooleanRoot {
                root: root.name.clone(),
            });
        }
    }
    components
        .iter()
        .map(|(c, _)| {
            roots
                .iter()
                .position(|r| r.name == c.mother)
                .ok_or_else(|| AssemblyError::BooleanRootNotFound {
                    component: c.name.clone(),
                    root: c.mother.clone(),
                })
        })
        .collect()
}

/// Fold every component into its root's solid, in component order.
///
/// `seeds` holds the initial solid of each root; the returned vector holds the
/// final accumulated solid of each root at the same index.
pub fn fold_components<K: Kernel + ?Sized>(
    kernel: &mut K,
    seeds: Vec<SolidHandle>,
    roots: &[&PrimitiveDefinition],
    components: &[Component<'_>],
    owners: &[usize],
) -> Result<Vec<SolidHandle>, AssemblyError> {
    components
        .iter()
        .zip(owners)
        .try_fold(seeds, |mut acc, (&(component, op), &owner)| -> Result<_, AssemblyError> {
            let operand = make_solid(&mut *kernel, component)?;
            let transform = local_transform(component);
            let current = acc[owner];
            info!(
                component = %component.name,
                root = %roots[owner].name,
                "{} component",
                op.verb()
            );
            acc[owner] = match op {
                BooleanOp::Union => {
                    kernel.boolean_union(&component.name, current, operand, &transform)?
                }
                BooleanOp::Subtract => {
                    kernel.boolean_subtract(&component.name, current, operand, &transform)?
                }
                BooleanOp::Intersect => {
                    kernel.boolean_intersect(&component.name, current, operand, &transform)?
                }
            };
            Ok(acc)
        })
}
