//! Geometry

mod ray;
mod sphere;
mod vector3;

// Re-export.
pub use ray::*;
pub use sphere::*;
pub use vector3::*;
