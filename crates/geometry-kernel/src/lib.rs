pub mod materials;
pub mod memory_kernel;
pub mod traits;
pub mod transform;
pub mod types;

pub use materials::*;
pub use memory_kernel::MemoryKernel;
pub use traits::*;
pub use transform::*;
pub use types::*;
