//! Helper functions: error type and definition record constructors.

use detector_types::{GridDefinition, ReplicaDefinition, ReplicaMode};

// ── Error Type ──────────────────────────────────────────────────────────────

/// Unified error type for the test harness.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    #[error("duplicate name: {name}")]
    DuplicateName { name: String },

    #[error("definition rejected: {0}")]
    Store(#[from] scene_assembler::StoreError),

    #[error("assembly failed: {0}")]
    Assembly(#[from] scene_assembler::AssemblyError),

    #[error("document error: {message}")]
    Document { message: String },

    #[error("scene has not been built")]
    NotBuilt,

    #[error("volume not found: {name}")]
    VolumeNotFound { name: String },

    #[error("assertion failed: {detail}")]
    AssertionFailed { detail: String },

    #[error("oracle failure ({oracle}): {detail}")]
    OracleFailure { oracle: String, detail: String },
}

// ── Record Constructors ─────────────────────────────────────────────────────

pub fn linear_replica(target: &str, count: u32, shift: [f64; 3]) -> ReplicaDefinition {
    ReplicaDefinition {
        target: target.to_string(),
        count,
        mode: ReplicaMode::Linear,
        shift,
    }
}

/// Rotational replica; `step` is the per-copy angle about X, Y, Z in radians.
pub fn rotational_replica(target: &str, count: u32, step: [f64; 3]) -> ReplicaDefinition {
    ReplicaDefinition {
        target: target.to_string(),
        count,
        mode: ReplicaMode::Rotational,
        shift: step,
    }
}

/// Placed, unrotated grid at the origin of `mother`.
pub fn grid_definition(
    name: &str,
    pillar_count: i32,
    pillar_a: [f64; 3],
    pillar_b: [f64; 3],
    mother: &str,
) -> GridDefinition {
    GridDefinition {
        name: name.to_string(),
        pillar_count,
        pillar_a,
        pillar_b,
        position: [0.0; 3],
        rotation: [0.0; 3],
        mother: mother.to_string(),
        placed: true,
    }
}

/// Component-wise distance between two points.
pub fn distance(a: [f64; 3], b: [f64; 3]) -> f64 {
    ((a[0] - b[0]).powi(2) + (a[1] - b[1]).powi(2) + (a[2] - b[2]).powi(2)).sqrt()
}
