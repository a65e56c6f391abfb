//! Integrators

mod path;

// Re-export.
pub use path::*;
