use std::fmt;

use geometry_kernel::{KernelError, PlacementHandle, VolumeHandle};
use serde::{Deserialize, Serialize};

/// Errors from grid validation and construction.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GridError {
    #[error("grid has no name")]
    MissingName,

    #[error("pillar {pillar} has a negative dimension: {dims:?}")]
    NegativeDimension { pillar: PillarRole, dims: [f64; 3] },

    #[error("negative pillar count: {count}")]
    NegativePillarCount { count: i32 },

    #[error("pillar B {axis} extent {b} exceeds pillar A extent {a}")]
    ExtentExceeded { axis: char, a: f64, b: f64 },

    #[error("kernel error: {0}")]
    Kernel(#[from] KernelError),
}

/// Which of the two alternating pillars occupies a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PillarRole {
    /// Outer pillar, at even indices.
    A,
    /// Inner pillar, at odd indices.
    B,
}

impl fmt::Display for PillarRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PillarRole::A => f.write_str("A"),
            PillarRole::B => f.write_str("B"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PillarSlot {
    pub index: u32,
    pub role: PillarRole,
    /// Centre in the container frame.
    pub center: [f64; 3],
}

/// Container extent and pillar positions of a validated grid.
#[derive(Debug, Clone, PartialEq)]
pub struct GridLayout {
    /// Full lengths of the container box.
    pub container_size: [f64; 3],
    pub slots: Vec<PillarSlot>,
}

impl GridLayout {
    pub fn count(&self, role: PillarRole) -> usize {
        self.slots.iter().filter(|s| s.role == role).count()
    }
}

/// Material keys used for the container and both pillars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridMaterials {
    pub container: String,
    pub pillar_a: String,
    pub pillar_b: String,
}

impl Default for GridMaterials {
    fn default() -> Self {
        Self {
            container: "Galactic".into(),
            pillar_a: "G4_Si".into(),
            pillar_b: "LiqHe".into(),
        }
    }
}

/// Kernel entities created for one grid.
#[derive(Debug, Clone)]
pub struct GridOutput {
    pub name: String,
    pub layout: GridLayout,
    pub container_volume: VolumeHandle,
    pub container_placement: PlacementHandle,
    pub pillar_a_volume: VolumeHandle,
    /// Absent when the grid has no B pillars.
    pub pillar_b_volume: Option<VolumeHandle>,
    /// Pillar placements by slot index.
    pub pillar_placements: Vec<PlacementHandle>,
}
