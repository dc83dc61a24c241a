use serde::{Deserialize, Serialize};

use crate::modes::{PlacementMode, ReplicaMode};

/// Solid shape of a primitive. Sizes are full lengths in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Shape {
    Box {
        size: [f64; 3],
    },
    Tube {
        inner_radius: f64,
        outer_radius: f64,
        length: f64,
    },
}

impl Shape {
    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Box { .. } => "box",
            Shape::Tube { .. } => "tube",
        }
    }
}

/// A named box or tube with its material, local transform and mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrimitiveDefinition {
    pub name: String,
    pub material: String,
    pub shape: Shape,
    /// Position relative to the mother, in millimetres.
    pub position: [f64; 3],
    /// Rotation about X, then Y, then Z, in degrees.
    #[serde(default)]
    pub rotation: [f64; 3],
    /// Mother volume name for `Alone` and `BooleanRoot`; the root's name for components.
    pub mother: String,
    pub mode: PlacementMode,
}

impl PrimitiveDefinition {
    pub fn new(
        name: impl Into<String>,
        material: impl Into<String>,
        shape: Shape,
        mother: impl Into<String>,
        mode: PlacementMode,
    ) -> Self {
        Self {
            name: name.into(),
            material: material.into(),
            shape,
            position: [0.0; 3],
            rotation: [0.0; 3],
            mother: mother.into(),
            mode,
        }
    }

    pub fn at(mut self, position: [f64; 3]) -> Self {
        self.position = position;
        self
    }

    pub fn rotated(mut self, rotation_deg: [f64; 3]) -> Self {
        self.rotation = rotation_deg;
        self
    }
}

/// Replication of an already-defined `Alone` primitive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplicaDefinition {
    pub target: String,
    pub count: u32,
    pub mode: ReplicaMode,
    /// Per-index translation (mm) for linear mode, per-axis angle step (rad) for rotational.
    pub shift: [f64; 3],
}

/// Maximum step length applied to one named volume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepLimitOverride {
    pub volume: String,
    pub max_step: f64,
}

/// Colour key for one named volume. Unknown keys are tolerated until assembly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorAssignment {
    pub volume: String,
    pub color: String,
}

/// Volume to be wired to the tracking-sensitive detector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitiveRegion {
    pub volume: String,
}

/// Pillar grid request. Pillar `A` appears `pillar_count + 1` times and bounds
/// the container's Y/Z extents; pillar `B` appears `pillar_count` times.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridDefinition {
    pub name: String,
    pub pillar_count: i32,
    /// Full lengths of pillar A in millimetres.
    pub pillar_a: [f64; 3],
    /// Full lengths of pillar B in millimetres.
    pub pillar_b: [f64; 3],
    pub position: [f64; 3],
    /// Container rotation about X, then Y, then Z, in degrees.
    #[serde(default)]
    pub rotation: [f64; 3],
    pub mother: String,
    /// Unplaced grids are kept but skipped during assembly.
    #[serde(default = "default_placed")]
    pub placed: bool,
}

fn default_placed() -> bool {
    true
}

/// Colour keys applied to subsequently built grids while `active`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridColorOverride {
    pub container: String,
    pub pillar_a: String,
    pub pillar_b: String,
    pub active: bool,
}
