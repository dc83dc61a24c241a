//! Test harness for detector scene assembly.
//!
//! Provides tools for scripting detector descriptions, assembling them
//! against the in-memory kernel, and verifying the resulting placement graph.
//!
//! # Key Components
//!
//! - [`SceneBuilder`]: fluent API for declaring and assembling scenes
//! - [`oracle`]: verification functions returning pass/fail verdicts
//! - [`assertions`]: assertion helpers with diagnostics
//! - [`helpers`]: error type and record constructors

pub mod assertions;
pub mod helpers;
pub mod oracle;
pub mod workflow;

pub use helpers::HarnessError;
pub use oracle::OracleVerdict;
pub use workflow::SceneBuilder;
