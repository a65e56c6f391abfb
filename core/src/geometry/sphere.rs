//! Spheres

use super::{Ray, Vector3f};
use crate::glint::{Float, HIT_EPSILON};
use crate::reflection::Brdf;
use crate::spectrum::Spectrum;
use std::sync::Arc;

/// A sphere with a surface response and, for light sources, an emitted
/// radiance.
#[derive(Clone)]
pub struct Sphere {
    /// Radius.
    pub radius: Float,

    /// Center.
    pub center: Vector3f,

    /// Emitted radiance. Zero unless the sphere is a light source.
    pub emission: Spectrum,

    /// Surface BRDF, shared read-only across workers.
    pub brdf: Arc<Brdf>,
}

impl Sphere {
    /// Creates a new `Sphere`.
    ///
    /// * `radius`   - Radius. Must be positive.
    /// * `center`   - Center.
    /// * `emission` - Emitted radiance.
    /// * `brdf`     - Surface BRDF.
    pub fn new(radius: Float, center: Vector3f, emission: Spectrum, brdf: Arc<Brdf>) -> Self {
        debug_assert!(radius > 0.0);
        Self {
            radius,
            center,
            emission,
            brdf,
        }
    }

    /// Returns true if the sphere emits light.
    pub fn is_emissive(&self) -> bool {
        !self.emission.is_black()
    }

    /// Returns the parametric distance to the nearest intersection with the
    /// given ray, or `None` on a miss.
    ///
    /// Solves t²·d·d + 2t·(o−c)·d + (o−c)·(o−c) − r² = 0 and keeps the
    /// nearest root above `HIT_EPSILON` so rays starting on the surface do
    /// not hit it again at their own origin.
    ///
    /// * `ray` - The ray.
    pub fn intersect(&self, ray: &Ray) -> Option<Float> {
        let op = self.center - ray.o;
        let b = op.dot(&ray.d);
        let det = b * b - op.dot(&op) + self.radius * self.radius;
        if det < 0.0 {
            return None;
        }

        let det = det.sqrt();
        let t = b - det;
        if t > HIT_EPSILON {
            return Some(t);
        }
        let t = b + det;
        if t > HIT_EPSILON {
            return Some(t);
        }
        None
    }

    /// Returns the outward surface normal at a point on the sphere.
    ///
    /// * `p` - The surface point.
    pub fn normal_at(&self, p: &Vector3f) -> Vector3f {
        (*p - self.center).normalize()
    }
}
