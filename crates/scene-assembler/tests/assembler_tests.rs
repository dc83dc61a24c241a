use std::f64::consts::FRAC_PI_2;

use detector_types::*;
use geometry_kernel::*;
use nalgebra::{Rotation3, Vector3};
use proptest::prelude::*;
use scene_assembler::*;

fn alone_box(name: &str, size: f64, mother: &str) -> PrimitiveDefinition {
    box_definition(name, "G4_Si", [size; 3], mother, PlacementMode::Alone)
}

fn grid(name: &str, mother: &str) -> GridDefinition {
    GridDefinition {
        name: name.into(),
        pillar_count: 2,
        pillar_a: [2.0, 10.0, 10.0],
        pillar_b: [1.0, 5.0, 5.0],
        position: [0.0; 3],
        rotation: [0.0; 3],
        mother: mother.into(),
        placed: true,
    }
}

/// `Rz(z) * Ry(y) * Rx(x)`, built directly in nalgebra.
fn zyx(x: f64, y: f64, z: f64) -> Rotation3<f64> {
    Rotation3::from_axis_angle(&Vector3::z_axis(), z)
        * Rotation3::from_axis_angle(&Vector3::y_axis(), y)
        * Rotation3::from_axis_angle(&Vector3::x_axis(), x)
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

// ── World and simple placement ────────────────────────────

#[test]
fn single_box_under_default_world() {
    let mut kernel = MemoryKernel::new();
    let mut builder = DetectorBuilder::new();
    builder.set_box_definition(alone_box("box1", 10.0, "World")).unwrap();
    let report = builder.rebuild(&mut kernel).unwrap();

    assert_eq!(report.world_size, [500.0, 500.0, 500.0]);
    let world = kernel.volume(report.world_volume).unwrap();
    match kernel.solid(world.solid).unwrap().shape {
        SolidShape::Box { half_extents } => assert_eq!(half_extents, [250.0; 3]),
        ref other => panic!("unexpected world solid {other:?}"),
    }

    let placed = kernel.placements_named("box1");
    assert_eq!(placed.len(), 1);
    assert_eq!(placed[0].mother, Some(report.world_volume));
    let lv = kernel.volume(placed[0].volume).unwrap();
    match kernel.solid(lv.solid).unwrap().shape {
        SolidShape::Box { half_extents } => assert_eq!(half_extents, [5.0; 3]),
        ref other => panic!("unexpected solid {other:?}"),
    }
}

#[test]
fn explicit_world_size_is_used() {
    let mut kernel = MemoryKernel::new();
    let mut builder = DetectorBuilder::new();
    builder.set_world_size([100.0, 200.0, 300.0]).unwrap();
    let report = builder.rebuild(&mut kernel).unwrap();
    assert_eq!(report.world_size, [100.0, 200.0, 300.0]);
}

#[test]
fn zero_world_component_falls_back_to_default() {
    let mut kernel = MemoryKernel::new();
    let mut builder = DetectorBuilder::new();
    builder.set_world_size([100.0, 0.0, 300.0]).unwrap();
    let report = builder.rebuild(&mut kernel).unwrap();
    assert_eq!(report.world_size, [500.0; 3]);
}

#[test]
fn tube_uses_half_length() {
    let mut kernel = MemoryKernel::new();
    let mut builder = DetectorBuilder::new();
    builder
        .set_tube_definition(tube_definition(
            "pipe",
            "G4_Cu",
            5.0,
            6.0,
            40.0,
            "World",
            PlacementMode::Alone,
        ))
        .unwrap();
    builder.rebuild(&mut kernel).unwrap();
    let volume = kernel.find_volume("pipe").unwrap();
    let solid = kernel.volume(volume).unwrap().solid;
    match kernel.solid(solid).unwrap().shape {
        SolidShape::Tube {
            inner_radius,
            outer_radius,
            half_length,
            ..
        } => {
            assert_eq!((inner_radius, outer_radius, half_length), (5.0, 6.0, 20.0));
        }
        ref other => panic!("unexpected solid {other:?}"),
    }
}

#[test]
fn nested_mother_declared_later_resolves() {
    let mut kernel = MemoryKernel::new();
    let mut builder = DetectorBuilder::new();
    builder.set_box_definition(alone_box("inner", 2.0, "outer")).unwrap();
    builder.set_box_definition(alone_box("outer", 20.0, "World")).unwrap();
    let report = builder.rebuild(&mut kernel).unwrap();
    let inner = report.placements_named("inner").next().unwrap();
    assert_eq!(inner.mother.as_deref(), Some("outer"));
}

#[test]
fn missing_mother_is_fatal() {
    let mut kernel = MemoryKernel::new();
    let mut builder = DetectorBuilder::new();
    builder.set_box_definition(alone_box("box1", 1.0, "Nowhere")).unwrap();
    let err = builder.rebuild(&mut kernel).unwrap_err();
    assert_eq!(
        err,
        AssemblyError::MotherNotFound {
            volume: "box1".into(),
            mother: "Nowhere".into()
        }
    );
    assert!(builder.report().is_none());
}

#[test]
fn volume_cannot_be_its_own_mother() {
    let mut kernel = MemoryKernel::new();
    let mut builder = DetectorBuilder::new();
    builder.set_box_definition(alone_box("loop", 1.0, "loop")).unwrap();
    let err = builder.rebuild(&mut kernel).unwrap_err();
    assert_eq!(
        err,
        AssemblyError::MotherCycle {
            volume: "loop".into(),
            mother: "loop".into()
        }
    );
    assert!(kernel.placements_named("loop").is_empty());
}

#[test]
fn mutual_mothers_never_reach_the_world() {
    let mut kernel = MemoryKernel::new();
    let mut builder = DetectorBuilder::new();
    builder.set_box_definition(alone_box("outer", 20.0, "World")).unwrap();
    builder.set_box_definition(alone_box("a", 2.0, "b")).unwrap();
    builder.set_box_definition(alone_box("b", 2.0, "a")).unwrap();
    let err = builder.rebuild(&mut kernel).unwrap_err();
    assert!(matches!(err, AssemblyError::MotherCycle { ref volume, .. } if volume == "a"));
    assert!(kernel.placements_named("outer").is_empty());
    assert!(builder.report().is_none());
}

#[test]
fn chain_through_a_cycle_is_rejected() {
    let mut kernel = MemoryKernel::new();
    let mut builder = DetectorBuilder::new();
    builder.set_box_definition(alone_box("leaf", 1.0, "a")).unwrap();
    builder.set_box_definition(alone_box("a", 2.0, "b")).unwrap();
    builder.set_box_definition(alone_box("b", 2.0, "a")).unwrap();
    let err = builder.rebuild(&mut kernel).unwrap_err();
    assert!(matches!(err, AssemblyError::MotherCycle { ref volume, .. } if volume == "leaf"));
}

#[test]
fn missing_material_is_fatal_before_world() {
    let mut kernel = MemoryKernel::new();
    let mut builder = DetectorBuilder::new();
    builder
        .set_box_definition(box_definition(
            "b",
            "Unobtainium",
            [1.0; 3],
            "World",
            PlacementMode::Alone,
        ))
        .unwrap();
    let err = builder.rebuild(&mut kernel).unwrap_err();
    assert!(matches!(err, AssemblyError::MaterialNotFound { .. }));
    assert_eq!(kernel.placement_count(), 0);
}

#[test]
fn missing_grid_material_is_fatal_before_world() {
    let mut config = AssemblyConfig::default();
    config.grid_materials.pillar_b = "Unobtainium".into();
    let mut kernel = MemoryKernel::new();
    let mut builder = DetectorBuilder::with_config(config);
    builder.set_box_definition(alone_box("box1", 1.0, "World")).unwrap();
    builder.set_grid_definition(grid("G", "World"));
    let err = builder.rebuild(&mut kernel).unwrap_err();
    assert_eq!(
        err,
        AssemblyError::MaterialNotFound {
            volume: "G".into(),
            material: "Unobtainium".into()
        }
    );
    assert_eq!(kernel.placement_count(), 0);
}

#[test]
fn unused_grid_materials_are_not_checked() {
    let mut config = AssemblyConfig::default();
    config.grid_materials.container = "Unobtainium".into();
    let mut kernel = MemoryKernel::new();
    let mut builder = DetectorBuilder::with_config(config);
    builder.set_box_definition(alone_box("box1", 1.0, "World")).unwrap();
    assert!(builder.rebuild(&mut kernel).is_ok());
}

#[test]
fn shape_must_match_setter() {
    let mut builder = DetectorBuilder::new();
    let err = builder
        .set_tube_definition(alone_box("b", 1.0, "World"))
        .unwrap_err();
    assert!(matches!(err, StoreError::ShapeMismatch { .. }));
}

#[test]
fn volume_ceiling_counts_the_world() {
    let mut builder = DetectorBuilder::new();
    for i in 0..49 {
        builder
            .set_box_definition(alone_box(&format!("v{i}"), 1.0, "World"))
            .unwrap();
    }
    let err = builder
        .set_box_definition(alone_box("v49", 1.0, "World"))
        .unwrap_err();
    assert!(matches!(err, StoreError::VolumeLimitExceeded { limit: 50, .. }));
    let err = builder
        .set_box_definition(box_definition(
            "root",
            "G4_Si",
            [1.0; 3],
            "World",
            PlacementMode::BooleanRoot,
        ))
        .unwrap_err();
    assert!(matches!(err, StoreError::VolumeLimitExceeded { ref name, .. } if name == "root"));
}

#[test]
fn boolean_primitives_take_no_volume_slot() {
    let mut builder = DetectorBuilder::new();
    for i in 0..5 {
        builder
            .set_tube_definition(tube_definition(
                format!("cut{i}"),
                "G4_Si",
                0.0,
                1.0,
                2.0,
                "root",
                PlacementMode::BooleanComponent(BooleanOp::Subtract),
            ))
            .unwrap();
    }
    for i in 0..49 {
        builder
            .set_box_definition(alone_box(&format!("v{i}"), 1.0, "World"))
            .unwrap();
    }
    assert_eq!(builder.definitions().primitives.len(), 54);
}

// ── Replicas ──────────────────────────────────────────────

#[test]
fn linear_replica_places_target_only_through_copies() {
    let mut kernel = MemoryKernel::new();
    let mut builder = DetectorBuilder::new();
    builder.set_box_definition(alone_box("strip", 1.0, "World")).unwrap();
    builder
        .set_replica_definition(ReplicaDefinition {
            target: "strip".into(),
            count: 3,
            mode: ReplicaMode::Linear,
            shift: [0.0, 0.0, 3.0],
        })
        .unwrap();
    let report = builder.rebuild(&mut kernel).unwrap();

    let copies: Vec<&PlacementRecord> = report.placements_named("strip").collect();
    assert_eq!(copies.len(), 3);
    assert!(copies.iter().all(|p| p.phase == Phase::Replica));
    for (j, p) in copies.iter().enumerate() {
        assert_eq!(p.copy_number, j as u32);
        assert_eq!(p.transform.translation, [0.0, 0.0, 3.0 * j as f64]);
    }
    assert_eq!(report.placements_in(Phase::Simple).count(), 0);
}

#[test]
fn rotational_replica_accumulates_quarter_turns() {
    let mut kernel = MemoryKernel::new();
    let mut builder = DetectorBuilder::new();
    builder
        .set_box_definition(alone_box("paddle", 1.0, "World").at([10.0, 0.0, 0.0]))
        .unwrap();
    builder
        .set_replica_definition(ReplicaDefinition {
            target: "paddle".into(),
            count: 4,
            mode: ReplicaMode::Rotational,
            shift: [0.0, 0.0, FRAC_PI_2],
        })
        .unwrap();
    let report = builder.rebuild(&mut kernel).unwrap();

    let copies: Vec<&PlacementRecord> = report.placements_named("paddle").collect();
    assert_eq!(copies.len(), 4);
    for (j, p) in copies.iter().enumerate() {
        let expected = Rotation::identity().rotate_z(j as f64 * FRAC_PI_2);
        assert!(p.transform.rotation.deviation(&expected) < 1e-9, "copy {j}");
        assert_eq!(p.transform.translation, [10.0, 0.0, 0.0]);
    }
}

#[test]
fn rotational_replica_starts_from_original_rotation() {
    let mut kernel = MemoryKernel::new();
    let mut builder = DetectorBuilder::new();
    builder
        .set_box_definition(alone_box("tilted", 1.0, "World").rotated([90.0, 0.0, 0.0]))
        .unwrap();
    builder
        .set_replica_definition(ReplicaDefinition {
            target: "tilted".into(),
            count: 2,
            mode: ReplicaMode::Rotational,
            shift: [0.0, FRAC_PI_2, 0.0],
        })
        .unwrap();
    let report = builder.rebuild(&mut kernel).unwrap();
    let second = report.placements_named("tilted").nth(1).unwrap();
    let expected = Rotation::identity().rotate_x(FRAC_PI_2).rotate_y(FRAC_PI_2);
    assert!(second.transform.rotation.deviation(&expected) < 1e-9);
}

#[test]
fn replica_of_unknown_volume_is_fatal() {
    let mut kernel = MemoryKernel::new();
    let mut builder = DetectorBuilder::new();
    builder
        .set_replica_definition(ReplicaDefinition {
            target: "ghost".into(),
            count: 2,
            mode: ReplicaMode::Linear,
            shift: [1.0, 0.0, 0.0],
        })
        .unwrap();
    assert_eq!(
        builder.rebuild(&mut kernel).unwrap_err(),
        AssemblyError::ReplicaTargetNotFound {
            target: "ghost".into()
        }
    );
}

#[test]
fn replica_of_boolean_primitive_is_fatal() {
    let mut kernel = MemoryKernel::new();
    let mut builder = DetectorBuilder::new();
    builder
        .set_box_definition(box_definition(
            "root",
            "G4_Si",
            [4.0; 3],
            "World",
            PlacementMode::BooleanRoot,
        ))
        .unwrap();
    builder
        .set_replica_definition(ReplicaDefinition {
            target: "root".into(),
            count: 2,
            mode: ReplicaMode::Linear,
            shift: [1.0, 0.0, 0.0],
        })
        .unwrap();
    assert!(matches!(
        builder.rebuild(&mut kernel).unwrap_err(),
        AssemblyError::ReplicaTargetIsBoolean { .. }
    ));
}

#[test]
fn zero_copy_replica_is_rejected() {
    let mut builder = DetectorBuilder::new();
    let err = builder
        .set_replica_definition(ReplicaDefinition {
            target: "x".into(),
            count: 0,
            mode: ReplicaMode::Linear,
            shift: [0.0; 3],
        })
        .unwrap_err();
    assert!(matches!(err, StoreError::InvalidReplicaCount { .. }));
}

// ── Boolean composition ───────────────────────────────────

#[test]
fn root_with_subtracted_component_places_once() {
    let mut kernel = MemoryKernel::new();
    let mut builder = DetectorBuilder::new();
    builder
        .set_box_definition(box_definition(
            "frame",
            "G4_Al",
            [10.0; 3],
            "World",
            PlacementMode::BooleanRoot,
        ))
        .unwrap();
    builder
        .set_box_definition(
            box_definition(
                "window",
                "G4_Al",
                [4.0; 3],
                "frame",
                PlacementMode::BooleanComponent(BooleanOp::Subtract),
            )
            .at([1.0, 0.0, 0.0]),
        )
        .unwrap();
    let report = builder.rebuild(&mut kernel).unwrap();

    let placed: Vec<&PlacementRecord> = report.placements_in(Phase::Boolean).collect();
    assert_eq!(placed.len(), 1);
    assert_eq!(placed[0].name, "frame");
    assert!(kernel.placements_named("window").is_empty());

    let frame = kernel.find_volume("frame").unwrap();
    let solid = kernel.solid(kernel.volume(frame).unwrap().solid).unwrap();
    match &solid.shape {
        SolidShape::Boolean {
            op,
            right_transform,
            ..
        } => {
            assert_eq!(*op, BooleanOp::Subtract);
            assert_eq!(right_transform.translation, [1.0, 0.0, 0.0]);
        }
        other => panic!("expected boolean solid, got {other:?}"),
    }
}

#[test]
fn components_fold_in_declaration_order() {
    let mut kernel = MemoryKernel::new();
    let mut builder = DetectorBuilder::new();
    builder
        .set_box_definition(box_definition(
            "body",
            "G4_Al",
            [10.0; 3],
            "World",
            PlacementMode::BooleanRoot,
        ))
        .unwrap();
    builder
        .set_box_definition(box_definition(
            "lug",
            "G4_Al",
            [2.0; 3],
            "body",
            PlacementMode::BooleanComponent(BooleanOp::Union),
        ))
        .unwrap();
    builder
        .set_box_definition(box_definition(
            "bore",
            "G4_Al",
            [1.0; 3],
            "body",
            PlacementMode::BooleanComponent(BooleanOp::Intersect),
        ))
        .unwrap();
    builder.rebuild(&mut kernel).unwrap();

    let body = kernel.find_volume("body").unwrap();
    let outer = kernel.solid(kernel.volume(body).unwrap().solid).unwrap();
    assert_eq!(outer.name, "bore");
    let SolidShape::Boolean { op, left, .. } = &outer.shape else {
        panic!("expected boolean");
    };
    assert_eq!(*op, BooleanOp::Intersect);
    let inner = kernel.solid(*left).unwrap();
    assert_eq!(inner.name, "lug");
    assert!(matches!(
        inner.shape,
        SolidShape::Boolean {
            op: BooleanOp::Union,
            ..
        }
    ));
}

#[test]
fn more_roots_than_components_is_fatal() {
    let mut kernel = MemoryKernel::new();
    let mut builder = DetectorBuilder::new();
    for name in ["r1", "r2"] {
        builder
            .set_box_definition(box_definition(
                name,
                "G4_Al",
                [10.0; 3],
                "World",
                PlacementMode::BooleanRoot,
            ))
            .unwrap();
    }
    builder
        .set_box_definition(box_definition(
            "c1",
            "G4_Al",
            [1.0; 3],
            "r1",
            PlacementMode::BooleanComponent(BooleanOp::Union),
        ))
        .unwrap();
    assert_eq!(
        builder.rebuild(&mut kernel).unwrap_err(),
        AssemblyError::BooleanRootsExceedComponents {
            roots: 2,
            components: 1
        }
    );
    assert!(kernel.find_volume("r1").is_none());
}

// ── Sensitive regions, colours, step limits ───────────────

#[test]
fn sensitive_region_gets_detector() {
    let mut kernel = MemoryKernel::new();
    let mut builder = DetectorBuilder::new();
    builder.set_box_definition(alone_box("tracker", 5.0, "World")).unwrap();
    builder.set_sensitive_region("tracker");
    builder.rebuild(&mut kernel).unwrap();
    let v = kernel.find_volume("tracker").unwrap();
    assert_eq!(
        kernel.volume(v).unwrap().sensitive_detector.as_deref(),
        Some("muonium/TrackerDetectorSD")
    );
}

#[test]
fn missing_sensitive_region_is_fatal() {
    let mut kernel = MemoryKernel::new();
    let mut builder = DetectorBuilder::new();
    builder.set_sensitive_region("ghost");
    assert!(matches!(
        builder.rebuild(&mut kernel).unwrap_err(),
        AssemblyError::SensitiveRegionNotFound { .. }
    ));
}

#[test]
fn colour_problems_are_warnings() {
    let mut kernel = MemoryKernel::new();
    let mut builder = DetectorBuilder::new();
    builder.set_box_definition(alone_box("a", 1.0, "World")).unwrap();
    builder.set_box_definition(alone_box("b", 1.0, "World")).unwrap();
    builder.set_color_definition("a", "magenta");
    builder.set_color_definition("b", "teal");
    builder.set_color_definition("ghost", "red");
    let report = builder.rebuild(&mut kernel).unwrap();

    assert_eq!(report.warnings.len(), 2);
    let world = kernel.volume(report.world_volume).unwrap();
    assert!(!world.vis.unwrap().visible);
    let a = kernel.volume(kernel.find_volume("a").unwrap()).unwrap();
    assert_eq!(Some(a.vis.unwrap().colour), ColorKey::Magenta.colour());
    let b = kernel.volume(kernel.find_volume("b").unwrap()).unwrap();
    assert!(b.vis.is_none());
}

#[test]
fn world_step_limit_defaults_and_overrides() {
    let mut kernel = MemoryKernel::new();
    let mut builder = DetectorBuilder::new();
    let report = builder.rebuild(&mut kernel).unwrap();
    let world = report.world_volume;
    assert_eq!(kernel.volume(world).unwrap().max_step, Some(2.0));

    kernel.clear_geometry();
    builder.set_max_step(-1.0);
    let world = builder.rebuild(&mut kernel).unwrap().world_volume;
    assert_eq!(kernel.volume(world).unwrap().max_step, Some(2.0));

    kernel.clear_geometry();
    builder.set_max_step(0.5);
    let world = builder.rebuild(&mut kernel).unwrap().world_volume;
    assert_eq!(kernel.volume(world).unwrap().max_step, Some(0.5));
}

#[test]
fn per_volume_step_limit() {
    let mut kernel = MemoryKernel::new();
    let mut builder = DetectorBuilder::new();
    builder.set_box_definition(alone_box("foil", 1.0, "World")).unwrap();
    builder.set_step_limit("foil", 0.01).unwrap();
    builder.rebuild(&mut kernel).unwrap();
    let foil = kernel.find_volume("foil").unwrap();
    assert_eq!(kernel.volume(foil).unwrap().max_step, Some(0.01));
}

#[test]
fn step_limit_on_missing_volume_is_fatal() {
    let mut kernel = MemoryKernel::new();
    let mut builder = DetectorBuilder::new();
    builder.set_step_limit("ghost", 1.0).unwrap();
    assert!(matches!(
        builder.rebuild(&mut kernel).unwrap_err(),
        AssemblyError::StepLimitTargetNotFound { .. }
    ));
    assert!(builder.set_step_limit("foil", 0.0).is_err());
}

// ── Grids ─────────────────────────────────────────────────

#[test]
fn placed_grid_is_built_under_mother() {
    let mut kernel = MemoryKernel::new();
    let mut builder = DetectorBuilder::new();
    builder.set_box_definition(alone_box("cryostat", 100.0, "World")).unwrap();
    builder.set_grid_definition(grid("target", "cryostat"));
    let mut hidden = grid("spare", "World");
    hidden.placed = false;
    builder.set_grid_definition(hidden);
    let report = builder.rebuild(&mut kernel).unwrap();

    assert_eq!(report.grids.len(), 1);
    let container = report.placements_named("target_container").next().unwrap();
    assert_eq!(container.mother.as_deref(), Some("cryostat"));
    assert_eq!(report.placements_in(Phase::Grid).count(), 6);
    assert!(kernel.find_volume("spare_container_volume").is_none());

    let xs: Vec<f64> = report
        .placements_in(Phase::Grid)
        .skip(1)
        .map(|p| p.transform.translation[0])
        .collect();
    for (x, e) in xs.iter().zip([-3.0, -1.5, 0.0, 1.5, 3.0]) {
        assert!(close(*x, e));
    }
}

#[test]
fn grid_with_missing_mother_is_fatal() {
    let mut kernel = MemoryKernel::new();
    let mut builder = DetectorBuilder::new();
    builder.set_grid_definition(grid("target", "ghost"));
    assert!(matches!(
        builder.rebuild(&mut kernel).unwrap_err(),
        AssemblyError::GridMotherNotFound { .. }
    ));
}

#[test]
fn invalid_grid_aborts_assembly() {
    let mut kernel = MemoryKernel::new();
    let mut builder = DetectorBuilder::new();
    let mut bad = grid("target", "World");
    bad.pillar_count = -3;
    builder.set_grid_definition(bad);
    assert!(matches!(
        builder.rebuild(&mut kernel).unwrap_err(),
        AssemblyError::Grid(pillar_grid::GridError::NegativePillarCount { count: -3 })
    ));
}

#[test]
fn last_grid_colour_override_wins() {
    let mut kernel = MemoryKernel::new();
    let mut builder = DetectorBuilder::new();
    builder.set_grid_definition(grid("target", "World"));
    builder.set_grid_colors(GridColorOverride {
        container: "red".into(),
        pillar_a: "red".into(),
        pillar_b: "red".into(),
        active: true,
    });
    builder.set_grid_colors(GridColorOverride {
        container: "invisible".into(),
        pillar_a: "Yellow".into(),
        pillar_b: "GREEN".into(),
        active: true,
    });
    let report = builder.rebuild(&mut kernel).unwrap();
    let out = &report.grids[0];
    assert!(!kernel.volume(out.container_volume).unwrap().vis.unwrap().visible);
    assert_eq!(
        Some(kernel.volume(out.pillar_a_volume).unwrap().vis.unwrap().colour),
        ColorKey::Yellow.colour()
    );
}

// ── Rebuild ───────────────────────────────────────────────

#[test]
fn rebuild_after_clear_is_repeatable() {
    let mut kernel = MemoryKernel::new();
    let mut builder = DetectorBuilder::new();
    builder.set_box_definition(alone_box("a", 2.0, "World").at([1.0, 2.0, 3.0])).unwrap();
    builder.set_grid_definition(grid("g", "World"));

    let first: Vec<(String, u32, [f64; 3])> = builder
        .rebuild(&mut kernel)
        .unwrap()
        .placements
        .iter()
        .map(|p| (p.name.clone(), p.copy_number, p.transform.translation))
        .collect();
    kernel.clear_geometry();
    let second: Vec<(String, u32, [f64; 3])> = builder
        .rebuild(&mut kernel)
        .unwrap()
        .placements
        .iter()
        .map(|p| (p.name.clone(), p.copy_number, p.transform.translation))
        .collect();
    assert_eq!(first, second);
    assert_eq!(kernel.placement_count(), first.len());
}

#[test]
fn stored_definitions_replay_through_setters() {
    let mut store = DefinitionStore::new();
    store.primitives.push(alone_box("a", 1.0, "World"));
    store.replicas.push(ReplicaDefinition {
        target: "a".into(),
        count: 0,
        mode: ReplicaMode::Linear,
        shift: [0.0; 3],
    });
    assert!(DetectorBuilder::from_definitions(store, AssemblyConfig::default()).is_err());
}

// ── Properties ────────────────────────────────────────────

proptest! {
    #[test]
    fn linear_copy_positions(count in 1u32..12, sx in -5.0f64..5.0, sy in -5.0f64..5.0, sz in -5.0f64..5.0) {
        let mut kernel = MemoryKernel::new();
        let mut builder = DetectorBuilder::new();
        builder.set_box_definition(alone_box("s", 0.5, "World").at([1.0, 1.0, 1.0])).unwrap();
        builder.set_replica_definition(ReplicaDefinition {
            target: "s".into(),
            count,
            mode: ReplicaMode::Linear,
            shift: [sx, sy, sz],
        }).unwrap();
        let report = builder.rebuild(&mut kernel).unwrap();
        let copies: Vec<&PlacementRecord> = report.placements_named("s").collect();
        prop_assert_eq!(copies.len(), count as usize);
        for (j, p) in copies.iter().enumerate() {
            let j = j as f64;
            prop_assert!(close(p.transform.translation[0], 1.0 + j * sx));
            prop_assert!(close(p.transform.translation[1], 1.0 + j * sy));
            prop_assert!(close(p.transform.translation[2], 1.0 + j * sz));
        }
    }
}

proptest! {
    #[test]
    fn rotational_copies_step_about_x_then_y_then_z(
        a in 0.1f64..1.5,
        b in -1.5f64..-0.1,
        c in 0.1f64..1.5,
        count in 3u32..7,
    ) {
        let mut kernel = MemoryKernel::new();
        let mut builder = DetectorBuilder::new();
        builder
            .set_box_definition(alone_box("blade", 1.0, "World").rotated([10.0, 20.0, 30.0]))
            .unwrap();
        builder.set_replica_definition(ReplicaDefinition {
            target: "blade".into(),
            count,
            mode: ReplicaMode::Rotational,
            shift: [a, b, c],
        }).unwrap();
        let report = builder.rebuild(&mut kernel).unwrap();

        let original = zyx(10f64.to_radians(), 20f64.to_radians(), 30f64.to_radians());
        let step = zyx(a, b, c);
        let copies: Vec<&PlacementRecord> = report.placements_named("blade").collect();
        prop_assert_eq!(copies.len(), count as usize);
        let mut expected = original;
        for p in &copies {
            let off = p.transform.rotation.deviation(&Rotation::from(expected));
            prop_assert!(off < 1e-9, "copy {}: {}", p.copy_number, off);
            expected = step * expected;
        }
    }
}
