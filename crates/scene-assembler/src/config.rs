use pillar_grid::GridMaterials;
use serde::{Deserialize, Serialize};

/// Constants used during assembly. Missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssemblyConfig {
    pub world_name: String,
    pub world_material: String,
    /// Full lengths in mm, used when the world size is unset or has a zero component.
    pub default_world_size: [f64; 3],
    /// Step bound applied to the world unless a positive global max step is set.
    pub default_max_step: f64,
    /// Volume ceiling including the world.
    pub max_volumes: usize,
    /// Sensitive detector attached to sensitive regions.
    pub sensitive_detector: String,
    pub grid_materials: GridMaterials,
}

impl Default for AssemblyConfig {
    fn default() -> Self {
        Self {
            world_name: "World".into(),
            world_material: "Galactic".into(),
            default_world_size: [500.0, 500.0, 500.0],
            default_max_step: 2.0,
            max_volumes: 50,
            sensitive_detector: "muonium/TrackerDetectorSD".into(),
            grid_materials: GridMaterials::default(),
        }
    }
}

impl AssemblyConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
