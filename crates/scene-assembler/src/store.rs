use detector_types::{
    BooleanOp, ColorAssignment, GridColorOverride, GridDefinition, PlacementMode, PrimitiveDefinition,
    ReplicaDefinition, ReplicaMode, SensitiveRegion, Shape, StepLimitOverride,
};
use serde::{Deserialize, Serialize};

/// Ordered, append-only collections of definition records.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefinitionStore {
    /// Full lengths in mm. `None` or a zero component selects the default world.
    pub world_size: Option<[f64; 3]>,
    /// Global max step; applied to the world only when positive.
    pub max_step: Option<f64>,
    /// Primitives of every mode, in declaration order.
    pub primitives: Vec<PrimitiveDefinition>,
    pub replicas: Vec<ReplicaDefinition>,
    pub sensitive_regions: Vec<SensitiveRegion>,
    pub colors: Vec<ColorAssignment>,
    pub step_limits: Vec<StepLimitOverride>,
    pub grids: Vec<GridDefinition>,
    /// Last grid colour override recorded.
    pub grid_colors: Option<GridColorOverride>,
}

impl DefinitionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn simple_volumes(&self) -> impl Iterator<Item = &PrimitiveDefinition> {
        self.primitives
            .iter()
            .filter(|p| p.mode == PlacementMode::Alone)
    }

    pub fn boolean_roots(&self) -> impl Iterator<Item = &PrimitiveDefinition> {
        self.primitives
            .iter()
            .filter(|p| p.mode == PlacementMode::BooleanRoot)
    }

    /// Boolean components paired with the operation they apply to their root.
    pub fn boolean_components(&self) -> impl Iterator<Item = (&PrimitiveDefinition, BooleanOp)> {
        self.primitives
            .iter()
            .filter_map(|p| p.mode.boolean_op().map(|op| (p, op)))
    }

    pub fn simple_count(&self) -> usize {
        self.simple_volumes().count()
    }

    /// Whether some replica definition targets `name`.
    pub fn is_replica_target(&self, name: &str) -> bool {
        self.replicas.iter().any(|r| r.target == name)
    }

    /// First primitive of any mode carrying `name`.
    pub fn find_primitive(&self, name: &str) -> Option<&PrimitiveDefinition> {
        self.primitives.iter().find(|p| p.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty() && self.grids.is_empty()
    }

    /// Multiply every length by `factor`. Angles are left untouched, so
    /// rotational replica steps keep their value.
    pub fn scale_lengths(&mut self, factor: f64) {
        let scale = |v: &mut [f64; 3]| v.iter_mut().for_each(|c| *c *= factor);

        if let Some(size) = self.world_size.as_mut() {
            scale(size);
        }
        if let Some(step) = self.max_step.as_mut() {
            *step *= factor;
        }
        for def in &mut self.primitives {
            scale(&mut def.position);
            match &mut def.shape {
                Shape::Box { size } => scale(size),
                Shape::Tube {
                    inner_radius,
                    outer_radius,
                    length,
                } => {
                    *inner_radius *= factor;
                    *outer_radius *= factor;
                    *length *= factor;
                }
            }
        }
        for replica in &mut self.replicas {
            if replica.mode == ReplicaMode::Linear {
                scale(&mut replica.shift);
            }
        }
        for limit in &mut self.step_limits {
            limit.max_step *= factor;
        }
        for grid in &mut self.grids {
            scale(&mut grid.pillar_a);
            scale(&mut grid.pillar_b);
            scale(&mut grid.position);
        }
    }
}
