use geometry_kernel::{KernelError, PlacementHandle, Transform, VolumeHandle};
use pillar_grid::{GridError, GridOutput};

/// Errors raised when a definition is recorded.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    #[error("volume limit of {limit} reached; cannot register {name}")]
    VolumeLimitExceeded { name: String, limit: usize },

    #[error("{name} is a {found}, expected a {expected}")]
    ShapeMismatch {
        name: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("replica of {target} needs at least one copy")]
    InvalidReplicaCount { target: String },

    #[error("step limit for {volume} must be positive, got {max_step}")]
    NonPositiveStep { volume: String, max_step: f64 },

    #[error("world size components must not be negative: {size:?}")]
    InvalidWorldSize { size: [f64; 3] },
}

/// Fatal assembly conditions. The first one aborts the whole assembly.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AssemblyError {
    #[error("material {material} of {volume} not found")]
    MaterialNotFound { volume: String, material: String },

    #[error("mother volume {mother} of {volume} not found")]
    MotherNotFound { volume: String, mother: String },

    #[error("mother chain of {volume} loops back through {mother} and never reaches the world")]
    MotherCycle { volume: String, mother: String },

    #[error("replica target {target} is not a defined volume")]
    ReplicaTargetNotFound { target: String },

    #[error("replica target {target} takes part in a boolean composition")]
    ReplicaTargetIsBoolean { target: String },

    #[error("{roots} boolean roots but only {components} components")]
    BooleanRootsExceedComponents { roots: usize, components: usize },

    #[error("boolean component {component} names unknown root {root}")]
    BooleanRootNotFound { component: String, root: String },

    #[error("boolean root {root} is defined more than once")]
    DuplicateBooleanRoot { root: String },

    #[error("sensitive region {volume} not found")]
    SensitiveRegionNotFound { volume: String },

    #[error("step limit target {volume} not found")]
    StepLimitTargetNotFound { volume: String },

    #[error("mother volume {mother} of grid {grid} not found")]
    GridMotherNotFound { grid: String, mother: String },

    #[error("kernel error: {0}")]
    Kernel(#[from] KernelError),

    #[error("grid error: {0}")]
    Grid(#[from] GridError),
}

/// Assembly phase that produced a placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    World,
    Simple,
    Replica,
    Boolean,
    Grid,
}

#[derive(Debug, Clone)]
pub struct PlacementRecord {
    pub phase: Phase,
    pub name: String,
    pub copy_number: u32,
    /// Mother volume name; `None` for the world.
    pub mother: Option<String>,
    pub transform: Transform,
    pub handle: PlacementHandle,
}

/// Outcome of a successful assembly.
#[derive(Debug, Clone)]
pub struct AssemblyReport {
    pub world_volume: VolumeHandle,
    pub world_size: [f64; 3],
    /// Placements in the order they were made.
    pub placements: Vec<PlacementRecord>,
    pub grids: Vec<GridOutput>,
    /// Soft problems that were skipped.
    pub warnings: Vec<String>,
}

impl AssemblyReport {
    pub fn placements_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a PlacementRecord> {
        self.placements.iter().filter(move |p| p.name == name)
    }

    pub fn placements_in(&self, phase: Phase) -> impl Iterator<Item = &PlacementRecord> {
        self.placements.iter().filter(move |p| p.phase == phase)
    }
}
