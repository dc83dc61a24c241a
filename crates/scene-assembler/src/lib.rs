pub mod assemble;
pub mod boolean;
pub mod config;
pub mod replica;
pub mod resolve;
pub mod store;
pub mod types;

use detector_types::{
    ColorAssignment, GridColorOverride, GridDefinition, PlacementMode, PrimitiveDefinition,
    ReplicaDefinition, SensitiveRegion, Shape, StepLimitOverride,
};
use pillar_grid::KernelBundle;

pub use assemble::assemble;
pub use config::AssemblyConfig;
pub use store::DefinitionStore;
pub use types::*;

/// Detector description builder.
///
/// Records definitions as they arrive and turns them into a placement graph
/// on [`DetectorBuilder::rebuild`]. Insertion only checks the invariants of
/// the record itself; cross-references are resolved during assembly.
pub struct DetectorBuilder {
    store: DefinitionStore,
    config: AssemblyConfig,
    /// Report of the last successful rebuild.
    report: Option<AssemblyReport>,
}

impl DetectorBuilder {
    pub fn new() -> Self {
        Self::with_config(AssemblyConfig::default())
    }

    pub fn with_config(config: AssemblyConfig) -> Self {
        Self {
            store: DefinitionStore::new(),
            config,
            report: None,
        }
    }

    /// Replay a stored set of definitions through the checked setters.
    pub fn from_definitions(
        definitions: DefinitionStore,
        config: AssemblyConfig,
    ) -> Result<Self, StoreError> {
        let mut builder = Self::with_config(config);
        if let Some(size) = definitions.world_size {
            builder.set_world_size(size)?;
        }
        if let Some(step) = definitions.max_step {
            builder.set_max_step(step);
        }
        for def in definitions.primitives {
            builder.add_primitive(def)?;
        }
        for replica in definitions.replicas {
            builder.set_replica_definition(replica)?;
        }
        for region in definitions.sensitive_regions {
            builder.set_sensitive_region(region.volume);
        }
        for color in definitions.colors {
            builder.set_color_definition(color.volume, color.color);
        }
        for limit in definitions.step_limits {
            builder.set_step_limit(limit.volume, limit.max_step)?;
        }
        for grid in definitions.grids {
            builder.set_grid_definition(grid);
        }
        if let Some(colors) = definitions.grid_colors {
            builder.set_grid_colors(colors);
        }
        Ok(builder)
    }

    pub fn definitions(&self) -> &DefinitionStore {
        &self.store
    }

    pub fn config(&self) -> &AssemblyConfig {
        &self.config
    }

    pub fn report(&self) -> Option<&AssemblyReport> {
        self.report.as_ref()
    }

    /// World extents as full lengths. A zero component selects the default world.
    pub fn set_world_size(&mut self, size: [f64; 3]) -> Result<(), StoreError> {
        if size.iter().any(|c| *c < 0.0) {
            return Err(StoreError::InvalidWorldSize { size });
        }
        self.store.world_size = Some(size);
        Ok(())
    }

    /// Global max step for the world. Non-positive values leave the default in place.
    pub fn set_max_step(&mut self, max_step: f64) {
        self.store.max_step = Some(max_step);
    }

    pub fn set_box_definition(&mut self, def: PrimitiveDefinition) -> Result<(), StoreError> {
        self.check_shape(&def, "box")?;
        self.add_primitive(def)
    }

    pub fn set_tube_definition(&mut self, def: PrimitiveDefinition) -> Result<(), StoreError> {
        self.check_shape(&def, "tube")?;
        self.add_primitive(def)
    }

    pub fn set_replica_definition(&mut self, replica: ReplicaDefinition) -> Result<(), StoreError> {
        if replica.count == 0 {
            return Err(StoreError::InvalidReplicaCount {
                target: replica.target,
            });
        }
        self.store.replicas.push(replica);
        Ok(())
    }

    pub fn set_sensitive_region(&mut self, volume: impl Into<String>) {
        self.store.sensitive_regions.push(SensitiveRegion {
            volume: volume.into(),
        });
    }

    pub fn set_color_definition(&mut self, volume: impl Into<String>, color: impl Into<String>) {
        self.store.colors.push(ColorAssignment {
            volume: volume.into(),
            color: color.into(),
        });
    }

    pub fn set_step_limit(
        &mut self,
        volume: impl Into<String>,
        max_step: f64,
    ) -> Result<(), StoreError> {
        let volume = volume.into();
        if max_step.is_nan() || max_step <= 0.0 {
            return Err(StoreError::NonPositiveStep { volume, max_step });
        }
        self.store
            .step_limits
            .push(StepLimitOverride { volume, max_step });
        Ok(())
    }

    pub fn set_grid_definition(&mut self, grid: GridDefinition) {
        self.store.grids.push(grid);
    }

    /// Replaces any earlier override; applies to every grid built afterwards.
    pub fn set_grid_colors(&mut self, colors: GridColorOverride) {
        self.store.grid_colors = Some(colors);
    }

    /// Assemble the recorded definitions into `kb`.
    ///
    /// Clearing the kernel's previous graph before a repeated rebuild is up to
    /// the caller. On error the previous report is dropped.
    pub fn rebuild(&mut self, kb: &mut dyn KernelBundle) -> Result<&AssemblyReport, AssemblyError> {
        self.report = None;
        let report = assemble(&self.store, kb, &self.config)?;
        Ok(self.report.insert(report))
    }

    fn check_shape(&self, def: &PrimitiveDefinition, expected: &'static str) -> Result<(), StoreError> {
        if def.shape.kind() != expected {
            return Err(StoreError::ShapeMismatch {
                name: def.name.clone(),
                expected,
                found: def.shape.kind(),
            });
        }
        Ok(())
    }

    fn add_primitive(&mut self, def: PrimitiveDefinition) -> Result<(), StoreError> {
        // The world occupies one slot of the ceiling. Only simple volumes fill
        // slots, but once they are full no primitive of any mode is accepted.
        if self.store.simple_count() + 1 >= self.config.max_volumes {
            return Err(StoreError::VolumeLimitExceeded {
                name: def.name,
                limit: self.config.max_volumes,
            });
        }
        self.store.primitives.push(def);
        Ok(())
    }
}

impl Default for DetectorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Shape-specific constructors for primitive records.
pub fn box_definition(
    name: impl Into<String>,
    material: impl Into<String>,
    size: [f64; 3],
    mother: impl Into<String>,
    mode: PlacementMode,
) -> PrimitiveDefinition {
    PrimitiveDefinition::new(name, material, Shape::Box { size }, mother, mode)
}

pub fn tube_definition(
    name: impl Into<String>,
    material: impl Into<String>,
    inner_radius: f64,
    outer_radius: f64,
    length: f64,
    mother: impl Into<String>,
    mode: PlacementMode,
) -> PrimitiveDefinition {
    PrimitiveDefinition::new(
        name,
        material,
        Shape::Tube {
            inner_radius,
            outer_radius,
            length,
        },
        mother,
        mode,
    )
}
