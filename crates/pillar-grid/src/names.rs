/// Kernel entity names derived from a grid's name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridNames {
    pub container_solid: String,
    pub container_volume: String,
    pub container_placement: String,
    pub a_solid: String,
    pub a_volume: String,
    pub a_placement: String,
    pub b_solid: String,
    pub b_volume: String,
    /// B pillars are placed under the bare grid name.
    pub b_placement: String,
}

impl GridNames {
    pub fn new(grid: &str) -> Self {
        Self {
            container_solid: format!("{grid}_container_solid"),
            container_volume: format!("{grid}_container_volume"),
            container_placement: format!("{grid}_container"),
            a_solid: format!("{grid}_a_solid"),
            a_volume: format!("{grid}_a_volume"),
            a_placement: format!("{grid}_a"),
            b_solid: format!("{grid}_b_solid"),
            b_volume: format!("{grid}_b_volume"),
            b_placement: grid.to_string(),
        }
    }
}
