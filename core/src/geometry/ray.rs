//! Rays

use super::Vector3f;
use crate::glint::Float;

/// A ray with an origin and a direction. The direction is assumed, not
/// enforced, to be unit length.
#[derive(Copy, Clone, Debug)]
pub struct Ray {
    /// Origin.
    pub o: Vector3f,

    /// Direction.
    pub d: Vector3f,
}

impl Ray {
    /// Creates a new `Ray`.
    ///
    /// * `o` - Origin.
    /// * `d` - Direction.
    pub fn new(o: Vector3f, d: Vector3f) -> Self {
        Self { o, d }
    }

    /// Returns the point at a parametric distance along the ray.
    ///
    /// * `t` - Parametric distance.
    pub fn at(&self, t: Float) -> Vector3f {
        self.o + self.d * t
    }
}
