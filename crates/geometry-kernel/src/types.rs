use detector_types::{BooleanOp, Colour};
use slotmap::new_key_type;

use crate::transform::Transform;

new_key_type! {
    pub struct SolidHandle;
    pub struct VolumeHandle;
    pub struct PlacementHandle;
    pub struct MaterialHandle;
}

/// Errors from kernel operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum KernelError {
    #[error("volume not found: {name}")]
    VolumeNotFound { name: String },

    #[error("material not found: {name}")]
    MaterialNotFound { name: String },

    #[error("entity not found: {entity}")]
    EntityNotFound { entity: String },

    #[error("invalid dimensions for {name}: {reason}")]
    InvalidDimensions { name: String, reason: String },

    #[error("invalid step length {max_step} for {volume}")]
    InvalidStepLength { volume: String, max_step: f64 },
}

/// Solid geometry in kernel units (mm). Boxes and tubes are centred on the origin.
#[derive(Debug, Clone, PartialEq)]
pub enum SolidShape {
    Box {
        half_extents: [f64; 3],
    },
    Tube {
        inner_radius: f64,
        outer_radius: f64,
        half_length: f64,
        start_phi: f64,
        delta_phi: f64,
    },
    Boolean {
        op: BooleanOp,
        left: SolidHandle,
        right: SolidHandle,
        /// Placement of `right` in the frame of `left`.
        right_transform: Transform,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Solid {
    pub name: String,
    pub shape: SolidShape,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: String,
    /// Density in g/cm3.
    pub density: f64,
}

/// Display attributes of a logical volume.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisAttributes {
    pub colour: Colour,
    pub visible: bool,
}

impl VisAttributes {
    pub fn coloured(colour: Colour) -> Self {
        Self {
            colour,
            visible: true,
        }
    }

    pub fn invisible() -> Self {
        Self {
            colour: Colour::WHITE,
            visible: false,
        }
    }
}

/// A solid bound to a material, with the per-volume settings assembly attaches.
#[derive(Debug, Clone, PartialEq)]
pub struct LogicalVolume {
    pub name: String,
    pub solid: SolidHandle,
    pub material: MaterialHandle,
    pub vis: Option<VisAttributes>,
    pub max_step: Option<f64>,
    pub sensitive_detector: Option<String>,
}

/// Request to place a logical volume inside a mother.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementRequest {
    pub name: String,
    pub volume: VolumeHandle,
    /// `None` only for the world.
    pub mother: Option<VolumeHandle>,
    pub transform: Transform,
    pub copy_number: u32,
}

/// A recorded placement in the scene graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub name: String,
    pub volume: VolumeHandle,
    pub mother: Option<VolumeHandle>,
    pub transform: Transform,
    pub copy_number: u32,
}

impl From<PlacementRequest> for Placement {
    fn from(req: PlacementRequest) -> Self {
        Self {
            name: req.name,
            volume: req.volume,
            mother: req.mother,
            transform: req.transform,
            copy_number: req.copy_number,
        }
    }
}
