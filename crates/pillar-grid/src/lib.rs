pub mod grid;
pub mod kernel_ext;
pub mod layout;
pub mod names;
pub mod style;
pub mod types;

pub use grid::build_pillar_grid;
pub use kernel_ext::KernelBundle;
pub use layout::compute_layout;
pub use names::GridNames;
pub use style::{grid_colour, GridStyle};
pub use types::*;
