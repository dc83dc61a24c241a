pub mod errors;
pub mod load;
pub mod metadata;
pub mod migrate;
pub mod save;

pub use errors::{LoadError, SaveError};
pub use load::{load_builder, load_definitions};
pub use metadata::DocumentMetadata;
pub use save::{save_definitions, FORMAT_ID, FORMAT_VERSION};
