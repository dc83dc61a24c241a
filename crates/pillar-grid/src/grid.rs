use detector_types::GridDefinition;
use geometry_kernel::{PlacementRequest, Rotation, Transform, VolumeHandle};
use tracing::{info, instrument};

use crate::kernel_ext::KernelBundle;
use crate::layout::compute_layout;
use crate::names::GridNames;
use crate::style::GridStyle;
use crate::types::{GridError, GridMaterials, GridOutput, PillarRole};

fn half(size: [f64; 3]) -> [f64; 3] {
    [size[0] / 2.0, size[1] / 2.0, size[2] / 2.0]
}

/// Build one pillar grid under `parent`.
///
/// The definition is fully validated and all materials resolved before the
/// kernel is touched, so a rejected grid leaves no partial entities behind.
#[instrument(skip_all, fields(grid = %def.name))]
pub fn build_pillar_grid(
    kb: &mut dyn KernelBundle,
    parent: VolumeHandle,
    def: &GridDefinition,
    materials: &GridMaterials,
    style: &GridStyle,
) -> Result<GridOutput, GridError> {
    let layout = compute_layout(def)?;
    let container_material = kb.material(&materials.container)?;
    let a_material = kb.material(&materials.pillar_a)?;
    let b_material = kb.material(&materials.pillar_b)?;
    let names = GridNames::new(&def.name);

    info!(
        container = ?layout.container_size,
        pillar_count = def.pillar_count,
        position = ?def.position,
        "building pillar grid"
    );

    let container_solid = kb.make_box(&names.container_solid, half(layout.container_size))?;
    let container_volume =
        kb.make_volume(&names.container_volume, container_solid, container_material)?;
    kb.set_vis_attributes(container_volume, style.container)?;
    let container_placement = kb.place(PlacementRequest {
        name: names.container_placement.clone(),
        volume: container_volume,
        mother: Some(parent),
        transform: Transform::new(Rotation::from_degrees(def.rotation), def.position),
        copy_number: 0,
    })?;

    let a_solid = kb.make_box(&names.a_solid, half(def.pillar_a))?;
    let pillar_a_volume = kb.make_volume(&names.a_volume, a_solid, a_material)?;
    kb.set_vis_attributes(pillar_a_volume, style.pillar_a)?;

    let pillar_b_volume = if layout.count(PillarRole::B) > 0 {
        let b_solid = kb.make_box(&names.b_solid, half(def.pillar_b))?;
        let volume = kb.make_volume(&names.b_volume, b_solid, b_material)?;
        kb.set_vis_attributes(volume, style.pillar_b)?;
        Some(volume)
    } else {
        None
    };

    let mut pillar_placements = Vec::with_capacity(layout.slots.len());
    for slot in &layout.slots {
        let (name, volume) = match (slot.role, pillar_b_volume) {
            (PillarRole::B, Some(b)) => (&names.b_placement, b),
            _ => (&names.a_placement, pillar_a_volume),
        };
        let handle = kb.place(PlacementRequest {
            name: name.clone(),
            volume,
            mother: Some(container_volume),
            transform: Transform::translation(slot.center),
            copy_number: slot.index,
        })?;
        pillar_placements.push(handle);
    }

    Ok(GridOutput {
        name: def.name.clone(),
        layout,
        container_volume,
        container_placement,
        pillar_a_volume,
        pillar_b_volume,
        pillar_placements,
    })
}
