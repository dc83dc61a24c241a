//! SceneBuilder: a fluent API for scripting detector descriptions in tests.
//!
//! Drives the real `DetectorBuilder` against a `MemoryKernel`. Names are
//! tracked so a test fails early on an accidental duplicate.

use std::collections::HashMap;

use definition_format::{load_builder, save_definitions, DocumentMetadata};
use detector_types::{BooleanOp, GridColorOverride, GridDefinition, PlacementMode};
use geometry_kernel::{KernelIntrospect, MemoryKernel, VolumeHandle};
use scene_assembler::{
    box_definition, tube_definition, AssemblyConfig, AssemblyReport, DetectorBuilder,
};

use crate::assertions::assert_all_pass;
use crate::helpers::{linear_replica, rotational_replica, HarnessError};
use crate::oracle;

/// A fluent builder for declaring, assembling and inspecting detector scenes.
pub struct SceneBuilder {
    builder: DetectorBuilder,
    kernel: MemoryKernel,
    names: HashMap<String, &'static str>,
    history: Vec<(String, String)>,
    auto_check: bool,
}

impl SceneBuilder {
    /// Default configuration, standard material catalogue.
    pub fn new() -> Self {
        Self::with_config(AssemblyConfig::default())
    }

    pub fn with_config(config: AssemblyConfig) -> Self {
        Self::from_builder(DetectorBuilder::with_config(config))
    }

    fn from_builder(builder: DetectorBuilder) -> Self {
        Self {
            builder,
            kernel: MemoryKernel::new(),
            names: HashMap::new(),
            history: Vec::new(),
            auto_check: false,
        }
    }

    /// Run the graph oracles after every build.
    pub fn with_auto_check(mut self) -> Self {
        self.auto_check = true;
        self
    }

    // ── Global Settings ─────────────────────────────────────────────────

    pub fn world(&mut self, size: [f64; 3]) -> Result<&mut Self, HarnessError> {
        self.builder.set_world_size(size)?;
        self.record("world", format!("{size:?}"));
        Ok(self)
    }

    pub fn max_step(&mut self, max_step: f64) -> &mut Self {
        self.builder.set_max_step(max_step);
        self.record("max_step", max_step.to_string());
        self
    }

    // ── Primitives ──────────────────────────────────────────────────────

    /// Box placed alone in `mother`. `size` is full lengths.
    pub fn box_volume(
        &mut self,
        name: &str,
        material: &str,
        size: [f64; 3],
        mother: &str,
        position: [f64; 3],
    ) -> Result<&mut Self, HarnessError> {
        self.claim_name(name, "box")?;
        let def = box_definition(name, material, size, mother, PlacementMode::Alone).at(position);
        self.builder.set_box_definition(def)?;
        self.record("box", name.to_string());
        Ok(self)
    }

    /// Box placed alone with a rotation in degrees.
    #[allow(clippy::too_many_arguments)]
    pub fn rotated_box(
        &mut self,
        name: &str,
        material: &str,
        size: [f64; 3],
        mother: &str,
        position: [f64; 3],
        rotation_deg: [f64; 3],
    ) -> Result<&mut Self, HarnessError> {
        self.claim_name(name, "box")?;
        let def = box_definition(name, material, size, mother, PlacementMode::Alone)
            .at(position)
            .rotated(rotation_deg);
        self.builder.set_box_definition(def)?;
        self.record("box", format!("{name} rotated {rotation_deg:?}"));
        Ok(self)
    }

    /// Tube along Z placed alone in `mother`. `length` is the full length.
    #[allow(clippy::too_many_arguments)]
    pub fn tube_volume(
        &mut self,
        name: &str,
        material: &str,
        inner_radius: f64,
        outer_radius: f64,
        length: f64,
        mother: &str,
        position: [f64; 3],
    ) -> Result<&mut Self, HarnessError> {
        self.claim_name(name, "tube")?;
        let def = tube_definition(
            name,
            material,
            inner_radius,
            outer_radius,
            length,
            mother,
            PlacementMode::Alone,
        )
        .at(position);
        self.builder.set_tube_definition(def)?;
        self.record("tube", name.to_string());
        Ok(self)
    }

    /// Box that seeds a boolean composite.
    pub fn boolean_root(
        &mut self,
        name: &str,
        material: &str,
        size: [f64; 3],
        mother: &str,
        position: [f64; 3],
    ) -> Result<&mut Self, HarnessError> {
        self.claim_name(name, "boolean-root")?;
        let def = box_definition(name, material, size, mother, PlacementMode::BooleanRoot)
            .at(position);
        self.builder.set_box_definition(def)?;
        self.record("boolean_root", name.to_string());
        Ok(self)
    }

    /// Box combined into `root` with `op`, positioned in the root's frame.
    pub fn boolean_component(
        &mut self,
        name: &str,
        op: BooleanOp,
        size: [f64; 3],
        root: &str,
        offset: [f64; 3],
    ) -> Result<&mut Self, HarnessError> {
        self.claim_name(name, "boolean-component")?;
        let def = box_definition(
            name,
            "Galactic",
            size,
            root,
            PlacementMode::BooleanComponent(op),
        )
        .at(offset);
        self.builder.set_box_definition(def)?;
        self.record("boolean_component", format!("{name} {op:?} {root}"));
        Ok(self)
    }

    /// Tube combined into `root` with `op`.
    #[allow(clippy::too_many_arguments)]
    pub fn boolean_tube(
        &mut self,
        name: &str,
        op: BooleanOp,
        inner_radius: f64,
        outer_radius: f64,
        length: f64,
        root: &str,
        offset: [f64; 3],
    ) -> Result<&mut Self, HarnessError> {
        self.claim_name(name, "boolean-component")?;
        let def = tube_definition(
            name,
            "Galactic",
            inner_radius,
            outer_radius,
            length,
            root,
            PlacementMode::BooleanComponent(op),
        )
        .at(offset);
        self.builder.set_tube_definition(def)?;
        self.record("boolean_component", format!("{name} {op:?} {root}"));
        Ok(self)
    }

    // ── Replicas ────────────────────────────────────────────────────────

    pub fn replica_linear(
        &mut self,
        target: &str,
        count: u32,
        shift: [f64; 3],
    ) -> Result<&mut Self, HarnessError> {
        self.builder
            .set_replica_definition(linear_replica(target, count, shift))?;
        self.record("replica_linear", format!("{target} x{count}"));
        Ok(self)
    }

    /// `step` is the per-copy rotation in radians.
    pub fn replica_rotational(
        &mut self,
        target: &str,
        count: u32,
        step: [f64; 3],
    ) -> Result<&mut Self, HarnessError> {
        self.builder
            .set_replica_definition(rotational_replica(target, count, step))?;
        self.record("replica_rotational", format!("{target} x{count}"));
        Ok(self)
    }

    // ── Volume Settings ─────────────────────────────────────────────────

    pub fn sensitive(&mut self, volume: &str) -> &mut Self {
        self.builder.set_sensitive_region(volume);
        self.record("sensitive", volume.to_string());
        self
    }

    pub fn color(&mut self, volume: &str, key: &str) -> &mut Self {
        self.builder.set_color_definition(volume, key);
        self.record("color", format!("{volume}={key}"));
        self
    }

    pub fn step_limit(&mut self, volume: &str, max_step: f64) -> Result<&mut Self, HarnessError> {
        self.builder.set_step_limit(volume, max_step)?;
        self.record("step_limit", format!("{volume}={max_step}"));
        Ok(self)
    }

    // ── Grids ───────────────────────────────────────────────────────────

    pub fn grid(&mut self, def: GridDefinition) -> Result<&mut Self, HarnessError> {
        self.claim_name(&def.name, "grid")?;
        self.record("grid", format!("{} n={}", def.name, def.pillar_count));
        self.builder.set_grid_definition(def);
        Ok(self)
    }

    pub fn grid_colors(&mut self, colors: GridColorOverride) -> &mut Self {
        self.record("grid_colors", format!("active={}", colors.active));
        self.builder.set_grid_colors(colors);
        self
    }

    // ── Assembly ────────────────────────────────────────────────────────

    /// Clear the kernel's geometry and assemble every recorded definition.
    pub fn build(&mut self) -> Result<&AssemblyReport, HarnessError> {
        self.kernel.clear_geometry();
        self.record("build", String::new());
        self.builder.rebuild(&mut self.kernel)?;
        if self.auto_check {
            assert_all_pass(&oracle::run_graph_oracles(&self.kernel))?;
        }
        self.report()
    }

    /// Assemble into a brand-new kernel, discarding any prior registrations.
    pub fn rebuild_fresh(&mut self) -> Result<&AssemblyReport, HarnessError> {
        self.kernel = MemoryKernel::new();
        self.build()
    }

    pub fn report(&self) -> Result<&AssemblyReport, HarnessError> {
        self.builder.report().ok_or(HarnessError::NotBuilt)
    }

    pub fn kernel(&self) -> &MemoryKernel {
        &self.kernel
    }

    pub fn kernel_mut(&mut self) -> &mut MemoryKernel {
        &mut self.kernel
    }

    pub fn builder(&self) -> &DetectorBuilder {
        &self.builder
    }

    pub fn history(&self) -> &[(String, String)] {
        &self.history
    }

    pub fn volume(&self, name: &str) -> Result<VolumeHandle, HarnessError> {
        self.kernel
            .find_volume(name)
            .ok_or_else(|| HarnessError::VolumeNotFound {
                name: name.to_string(),
            })
    }

    // ── Documents ───────────────────────────────────────────────────────

    pub fn save(&self, project: &str) -> Result<String, HarnessError> {
        save_definitions(self.builder.definitions(), &DocumentMetadata::new(project)).map_err(|e| {
            HarnessError::Document {
                message: e.to_string(),
            }
        })
    }

    /// Rebuild a scene from a saved document. Names are re-registered.
    pub fn load(json: &str, config: AssemblyConfig) -> Result<Self, HarnessError> {
        let (builder, _metadata) =
            load_builder(json, config).map_err(|e| HarnessError::Document {
                message: e.to_string(),
            })?;
        let mut scene = Self::from_builder(builder);
        let defs = scene.builder.definitions();
        let names: Vec<(String, &'static str)> = defs
            .primitives
            .iter()
            .map(|p| (p.name.clone(), p.shape.kind()))
            .chain(defs.grids.iter().map(|g| (g.name.clone(), "grid")))
            .collect();
        for (name, kind) in names {
            scene.claim_name(&name, kind)?;
        }
        scene.record("load", String::new());
        Ok(scene)
    }

    // ── Internal ────────────────────────────────────────────────────────

    fn claim_name(&mut self, name: &str, kind: &'static str) -> Result<(), HarnessError> {
        if self.names.contains_key(name) {
            return Err(HarnessError::DuplicateName {
                name: name.to_string(),
            });
        }
        self.names.insert(name.to_string(), kind);
        Ok(())
    }

    fn record(&mut self, op: &str, detail: String) {
        self.history.push((op.to_string(), detail));
    }
}

impl Default for SceneBuilder {
    fn default() -> Self {
        Self::new()
    }
}
