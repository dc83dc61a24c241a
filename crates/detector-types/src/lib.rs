pub mod colour;
pub mod modes;
pub mod records;
pub mod units;

pub use colour::*;
pub use modes::*;
pub use records::*;
