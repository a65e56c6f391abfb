//! Visibility Tester

use crate::geometry::{Ray, Vector3f};
use crate::scene::Scene;

/// VisibilityTester lets the estimator weigh a light sample under the
/// assumption that the shading point and the sampled light point are
/// mutually visible.
#[derive(Clone)]
pub struct VisibilityTester {
    /// Shadow ray from the shading point toward the sampled light point.
    pub shadow_ray: Ray,

    /// Index of the light sphere the sample was drawn on.
    pub light_index: usize,

    /// Outward surface normal at the sampled light point.
    pub light_n: Vector3f,
}

impl VisibilityTester {
    /// Create a new `VisibilityTester`.
    ///
    /// * `shadow_ray`  - Shadow ray toward the sampled light point.
    /// * `light_index` - Index of the light sphere in the scene.
    /// * `light_n`     - Outward normal at the sampled light point.
    pub fn new(shadow_ray: Ray, light_index: usize, light_n: Vector3f) -> Self {
        Self {
            shadow_ray,
            light_index,
            light_n,
        }
    }

    /// Traces the shadow ray through the scene. Returns true only if the
    /// nearest hit is the light sphere itself and the ray arrives on the
    /// light's outward (emitting) hemisphere; any other sphere in between
    /// occludes the sample.
    ///
    /// * `scene` - The scene.
    pub fn unoccluded(&self, scene: &Scene) -> bool {
        match scene.intersect(&self.shadow_ray) {
            Some(isect) if isect.index == self.light_index => {
                let toward_origin = -self.shadow_ray.d;
                toward_origin.dot(&self.light_n) > 0.0
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Sphere;
    use crate::reflection::Brdf;
    use crate::spectrum::Spectrum;
    use std::sync::Arc;

    fn diffuse() -> Arc<Brdf> {
        Arc::new(Brdf::Diffuse {
            kd: Spectrum::new(0.75),
        })
    }

    fn black() -> Arc<Brdf> {
        Arc::new(Brdf::Diffuse {
            kd: Spectrum::ZERO,
        })
    }

    // Light at the origin; a probe point at z = 10 looking back at it.
    fn light_scene(with_blocker: bool) -> Scene {
        let mut spheres = vec![Sphere::new(
            1.0,
            Vector3f::zero(),
            Spectrum::new(10.0),
            black(),
        )];
        if with_blocker {
            spheres.push(Sphere::new(
                1.0,
                Vector3f::new(0.0, 0.0, 5.0),
                Spectrum::ZERO,
                diffuse(),
            ));
        }
        Scene::new(spheres)
    }

    #[test]
    fn clear_line_of_sight() {
        let scene = light_scene(false);
        let o = Vector3f::new(0.0, 0.0, 10.0);
        let d = Vector3f::new(0.0, 0.0, -1.0);
        // Sample point on the near pole of the light, outward normal +z.
        let tester = VisibilityTester::new(Ray::new(o, d), 0, Vector3f::new(0.0, 0.0, 1.0));
        assert!(tester.unoccluded(&scene));
    }

    #[test]
    fn occluded_by_another_sphere() {
        let scene = light_scene(true);
        let o = Vector3f::new(0.0, 0.0, 10.0);
        let d = Vector3f::new(0.0, 0.0, -1.0);
        let tester = VisibilityTester::new(Ray::new(o, d), 0, Vector3f::new(0.0, 0.0, 1.0));
        assert!(!tester.unoccluded(&scene));
    }

    #[test]
    fn back_facing_light_normal_does_not_emit() {
        let scene = light_scene(false);
        let o = Vector3f::new(0.0, 0.0, 10.0);
        let d = Vector3f::new(0.0, 0.0, -1.0);
        // Sampled normal points away from the probe point.
        let tester = VisibilityTester::new(Ray::new(o, d), 0, Vector3f::new(0.0, 0.0, -1.0));
        assert!(!tester.unoccluded(&scene));
    }
}
