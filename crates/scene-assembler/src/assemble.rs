use std::collections::{HashMap, HashSet};

use detector_types::{ColorKey, PrimitiveDefinition};
use geometry_kernel::{KernelIntrospect, PlacementRequest, Transform, VisAttributes, VolumeHandle};
use pillar_grid::{build_pillar_grid, GridStyle, KernelBundle};
use tracing::{debug, info, instrument, warn};

use crate::boolean::{fold_components, match_components, Component};
use crate::config::AssemblyConfig;
use crate::replica::replica_transforms;
use crate::resolve::{local_transform, make_solid, resolve_material, resolve_mother, resolve_volume};
use crate::store::DefinitionStore;
use crate::types::{AssemblyError, AssemblyReport, Phase, PlacementRecord};

type PreparedVolume<'a> = (&'a PrimitiveDefinition, VolumeHandle);

/// Turn the recorded definitions into a placement graph inside `kb`.
///
/// Phases run in a fixed order: world, simple placements, replicas, boolean
/// composites, sensitive regions, colours, step limits, grids. The first
/// fatal condition aborts the assembly; colour problems are only reported as
/// warnings.
#[instrument(skip_all, fields(primitives = store.primitives.len(), grids = store.grids.len()))]
pub fn assemble(
    store: &DefinitionStore,
    kb: &mut dyn KernelBundle,
    config: &AssemblyConfig,
) -> Result<AssemblyReport, AssemblyError> {
    for def in &store.primitives {
        resolve_material(&*kb, def)?;
    }
    check_grid_materials(store, &*kb, config)?;

    let mut report = create_world(store, kb, config)?;
    let simple = prepare_simple_volumes(store, kb)?;
    check_mother_chains(&simple, kb.as_introspect(), report.world_volume)?;
    place_simple_volumes(store, &simple, kb, &mut report)?;
    expand_replicas(store, &simple, kb, &mut report)?;
    compose_booleans(store, kb, &mut report)?;
    wire_sensitive_regions(store, kb, config)?;
    apply_colors(store, kb, &mut report)?;
    apply_step_limits(store, kb, config, report.world_volume)?;
    place_grids(store, kb, config, &mut report)?;

    info!(
        placements = report.placements.len(),
        warnings = report.warnings.len(),
        "assembly complete"
    );
    Ok(report)
}

/// Grid materials come from the configuration; they are only needed when a
/// grid is actually placed.
fn check_grid_materials(
    store: &DefinitionStore,
    kb: &dyn KernelBundle,
    config: &AssemblyConfig,
) -> Result<(), AssemblyError> {
    let Some(grid) = store.grids.iter().find(|g| g.placed) else {
        return Ok(());
    };
    let materials = &config.grid_materials;
    for material in [&materials.container, &materials.pillar_a, &materials.pillar_b] {
        kb.material(material)
            .map_err(|_| AssemblyError::MaterialNotFound {
                volume: grid.name.clone(),
                material: material.clone(),
            })?;
    }
    Ok(())
}

fn half(size: [f64; 3]) -> [f64; 3] {
    [size[0] / 2.0, size[1] / 2.0, size[2] / 2.0]
}

fn place(
    kb: &mut dyn KernelBundle,
    report: &mut AssemblyReport,
    phase: Phase,
    request: PlacementRequest,
) -> Result<(), AssemblyError> {
    let mother = request
        .mother
        .and_then(|m| kb.volume(m))
        .map(|v| v.name.clone());
    let name = request.name.clone();
    let copy_number = request.copy_number;
    let transform = request.transform;
    let handle = kb.place(request)?;
    report.placements.push(PlacementRecord {
        phase,
        name,
        copy_number,
        mother,
        transform,
        handle,
    });
    Ok(())
}

fn create_world(
    store: &DefinitionStore,
    kb: &mut dyn KernelBundle,
    config: &AssemblyConfig,
) -> Result<AssemblyReport, AssemblyError> {
    let size = match store.world_size {
        Some(size) if size.iter().all(|c| *c > 0.0) => size,
        _ => config.default_world_size,
    };
    let material = kb
        .material(&config.world_material)
        .map_err(|_| AssemblyError::MaterialNotFound {
            volume: config.world_name.clone(),
            material: config.world_material.clone(),
        })?;
    info!(size = ?size, material = %config.world_material, "creating world");

    let solid = kb.make_box(&config.world_name, half(size))?;
    let world = kb.make_volume(&config.world_name, solid, material)?;
    let mut report = AssemblyReport {
        world_volume: world,
        world_size: size,
        placements: Vec::new(),
        grids: Vec::new(),
        warnings: Vec::new(),
    };
    place(
        kb,
        &mut report,
        Phase::World,
        PlacementRequest {
            name: config.world_name.clone(),
            volume: world,
            mother: None,
            transform: Transform::identity(),
            copy_number: 0,
        },
    )?;
    Ok(report)
}

/// Solids and volumes for every simple primitive, replica targets included,
/// so mothers resolve regardless of declaration order.
fn prepare_simple_volumes<'a>(
    store: &'a DefinitionStore,
    kb: &mut dyn KernelBundle,
) -> Result<Vec<PreparedVolume<'a>>, AssemblyError> {
    store
        .simple_volumes()
        .map(|def| -> Result<PreparedVolume<'a>, AssemblyError> {
            let material = resolve_material(&*kb, def)?;
            let solid = make_solid(&mut *kb, def)?;
            let volume = kb.make_volume(&def.name, solid, material)?;
            Ok((def, volume))
        })
        .collect()
}

/// Every simple volume's mother chain has to end at the world. Mothers are
/// followed by handle, so a duplicated name resolves to its first volume just
/// as the placement phase does.
fn check_mother_chains(
    simple: &[PreparedVolume<'_>],
    kernel: &dyn KernelIntrospect,
    world: VolumeHandle,
) -> Result<(), AssemblyError> {
    let by_volume: HashMap<VolumeHandle, &PrimitiveDefinition> =
        simple.iter().map(|(def, volume)| (*volume, *def)).collect();

    for (def, volume) in simple {
        let mut seen = HashSet::from([*volume]);
        let mut current = *def;
        loop {
            let mother = resolve_mother(kernel, current)?;
            if mother == world {
                break;
            }
            if !seen.insert(mother) {
                return Err(AssemblyError::MotherCycle {
                    volume: def.name.clone(),
                    mother: current.mother.clone(),
                });
            }
            match by_volume.get(&mother) {
                Some(next) => current = *next,
                None => break,
            }
        }
    }
    Ok(())
}

fn place_simple_volumes(
    store: &DefinitionStore,
    simple: &[PreparedVolume<'_>],
    kb: &mut dyn KernelBundle,
    report: &mut AssemblyReport,
) -> Result<(), AssemblyError> {
    for (def, volume) in simple {
        let mother = resolve_mother(kb.as_introspect(), def)?;
        if store.is_replica_target(&def.name) {
            debug!(name = %def.name, "deferring replica target");
            continue;
        }
        info!(
            name = %def.name,
            kind = def.shape.kind(),
            material = %def.material,
            position = ?def.position,
            rotation = ?def.rotation,
            mother = %def.mother,
            "placing volume"
        );
        place(
            kb,
            report,
            Phase::Simple,
            PlacementRequest {
                name: def.name.clone(),
                volume: *volume,
                mother: Some(mother),
                transform: local_transform(def),
                copy_number: 0,
            },
        )?;
    }
    Ok(())
}

fn expand_replicas(
    store: &DefinitionStore,
    simple: &[PreparedVolume<'_>],
    kb: &mut dyn KernelBundle,
    report: &mut AssemblyReport,
) -> Result<(), AssemblyError> {
    for replica in &store.replicas {
        let Some((def, volume)) = simple.iter().find(|(d, _)| d.name == replica.target) else {
            let target = replica.target.clone();
            return Err(match store.find_primitive(&replica.target) {
                Some(_) => AssemblyError::ReplicaTargetIsBoolean { target },
                None => AssemblyError::ReplicaTargetNotFound { target },
            });
        };
        let mother = resolve_mother(kb.as_introspect(), def)?;
        info!(
            name = %def.name,
            count = replica.count,
            mode = %replica.mode,
            shift = ?replica.shift,
            mother = %def.mother,
            "expanding replica group"
        );
        let transforms =
            replica_transforms(&local_transform(def), replica.mode, replica.shift, replica.count);
        for (j, transform) in transforms.into_iter().enumerate() {
            place(
                kb,
                report,
                Phase::Replica,
                PlacementRequest {
                    name: def.name.clone(),
                    volume: *volume,
                    mother: Some(mother),
                    transform,
                    copy_number: j as u32,
                },
            )?;
        }
    }
    Ok(())
}

fn compose_booleans(
    store: &DefinitionStore,
    kb: &mut dyn KernelBundle,
    report: &mut AssemblyReport,
) -> Result<(), AssemblyError> {
    let roots: Vec<&PrimitiveDefinition> = store.boolean_roots().collect();
    let components: Vec<Component<'_>> = store.boolean_components().collect();
    let owners = match_components(&roots, &components)?;

    let seeds = roots
        .iter()
        .map(|root| make_solid(&mut *kb, root))
        .collect::<Result<Vec<_>, _>>()?;
    let solids = fold_components(&mut *kb, seeds, &roots, &components, &owners)?;

    for (root, solid) in roots.iter().zip(solids) {
        let material = resolve_material(&*kb, root)?;
        let volume = kb.make_volume(&root.name, solid, material)?;
        let mother = resolve_mother(kb.as_introspect(), root)?;
        info!(
            name = %root.name,
            material = %root.material,
            position = ?root.position,
            mother = %root.mother,
            "placing boolean volume"
        );
        place(
            kb,
            report,
            Phase::Boolean,
            PlacementRequest {
                name: root.name.clone(),
                volume,
                mother: Some(mother),
                transform: local_transform(root),
                copy_number: 0,
            },
        )?;
    }
    Ok(())
}

fn wire_sensitive_regions(
    store: &DefinitionStore,
    kb: &mut dyn KernelBundle,
    config: &AssemblyConfig,
) -> Result<(), AssemblyError> {
    for region in &store.sensitive_regions {
        let volume = resolve_volume(kb.as_introspect(), &region.volume, || {
            AssemblyError::SensitiveRegionNotFound {
                volume: region.volume.clone(),
            }
        })?;
        kb.attach_sensitive_detector(volume, &config.sensitive_detector)?;
        info!(volume = %region.volume, detector = %config.sensitive_detector, "sensitive region");
    }
    Ok(())
}

fn apply_colors(
    store: &DefinitionStore,
    kb: &mut dyn KernelBundle,
    report: &mut AssemblyReport,
) -> Result<(), AssemblyError> {
    kb.set_vis_attributes(report.world_volume, VisAttributes::invisible())?;

    for assignment in &store.colors {
        let Some(volume) = kb.find_volume(&assignment.volume) else {
            warn!(volume = %assignment.volume, "colour target not found; skipping");
            report
                .warnings
                .push(format!("colour target {} not found", assignment.volume));
            continue;
        };
        let Some(key) = ColorKey::from_key(&assignment.color) else {
            warn!(volume = %assignment.volume, color = %assignment.color, "unknown colour key; skipping");
            report.warnings.push(format!(
                "unknown colour {:?} for {}",
                assignment.color, assignment.volume
            ));
            continue;
        };
        let vis = match key.colour() {
            Some(colour) => VisAttributes::coloured(colour),
            None => VisAttributes::invisible(),
        };
        kb.set_vis_attributes(volume, vis)?;
        debug!(volume = %assignment.volume, color = %assignment.color, "applied colour");
    }
    Ok(())
}

fn apply_step_limits(
    store: &DefinitionStore,
    kb: &mut dyn KernelBundle,
    config: &AssemblyConfig,
    world: VolumeHandle,
) -> Result<(), AssemblyError> {
    let world_step = store
        .max_step
        .filter(|s| *s > 0.0)
        .unwrap_or(config.default_max_step);
    kb.set_step_limit(world, world_step)?;
    info!(max_step = world_step, "world step limit");

    for limit in &store.step_limits {
        let volume = resolve_volume(kb.as_introspect(), &limit.volume, || {
            AssemblyError::StepLimitTargetNotFound {
                volume: limit.volume.clone(),
            }
        })?;
        kb.set_step_limit(volume, limit.max_step)?;
        info!(volume = %limit.volume, max_step = limit.max_step, "step limit");
    }
    Ok(())
}

fn place_grids(
    store: &DefinitionStore,
    kb: &mut dyn KernelBundle,
    config: &AssemblyConfig,
    report: &mut AssemblyReport,
) -> Result<(), AssemblyError> {
    let style = GridStyle::from_override(store.grid_colors.as_ref());

    for grid in store.grids.iter().filter(|g| g.placed) {
        let mother = resolve_volume(kb.as_introspect(), &grid.mother, || {
            AssemblyError::GridMotherNotFound {
                grid: grid.name.clone(),
                mother: grid.mother.clone(),
            }
        })?;
        let output = build_pillar_grid(kb, mother, grid, &config.grid_materials, &style)?;

        let handles = std::iter::once(output.container_placement)
            .chain(output.pillar_placements.iter().copied());
        for handle in handles {
            if let Some(p) = kb.placement(handle) {
                report.placements.push(PlacementRecord {
                    phase: Phase::Grid,
                    name: p.name.clone(),
                    copy_number: p.copy_number,
                    mother: p.mother.and_then(|m| kb.volume(m)).map(|v| v.name.clone()),
                    transform: p.transform,
                    handle,
                });
            }
        }
        report.grids.push(output);
    }
    Ok(())
}
