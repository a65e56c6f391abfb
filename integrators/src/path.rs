//! Path Integrator

use glint_core::geometry::{Ray, Sphere, Vector3f};
use glint_core::glint::Float;
use glint_core::integrator::Integrator;
use glint_core::light::{sample_surface, VisibilityTester};
use glint_core::rng::RNG;
use glint_core::scene::Scene;
use glint_core::spectrum::Spectrum;

/// Whether an estimate includes the radiance a surface emits itself.
/// Next-event estimation accounts for the light's emission at the previous
/// path vertex, so the recursive bounce normally excludes it; a delta
/// (mirror) bounce is the exception, since next-event estimation cannot
/// sample through a point mass.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Emission {
    Include,
    Exclude,
}

/// Implements the path tracing algorithm: next-event estimation toward the
/// scene's area lights plus one BRDF-sampled recursive bounce, terminated
/// by Russian roulette. There is no hard depth cap; adding one would bias
/// the estimate.
pub struct PathIntegrator {
    /// Recursion depth beyond which Russian roulette starts killing paths.
    rr_depth: usize,

    /// Survival probability once Russian roulette is active.
    rr_survival: Float,
}

impl PathIntegrator {
    /// Create a new `PathIntegrator`.
    ///
    /// * `rr_depth`    - Depth beyond which Russian roulette applies.
    /// * `rr_survival` - Survival probability once it does.
    pub fn new(rr_depth: usize, rr_survival: Float) -> Self {
        debug_assert!(rr_survival > 0.0 && rr_survival <= 1.0);
        Self {
            rr_depth,
            rr_survival,
        }
    }

    /// Total radiance arriving at the ray origin from the first visible
    /// surface: the surface's own emission plus everything it reflects.
    ///
    /// * `scene` - The scene.
    /// * `ray`   - The ray.
    /// * `depth` - The recursion depth.
    /// * `rng`   - The calling worker's generator.
    /// * `mode`  - Whether the hit surface's own emission counts.
    fn radiance(
        &self,
        scene: &Scene,
        ray: &Ray,
        depth: usize,
        rng: &mut RNG,
        mode: Emission,
    ) -> Spectrum {
        let isect = match scene.intersect(ray) {
            Some(isect) => isect,
            None => return Spectrum::ZERO, // if miss, return black
        };
        let sphere = &scene.spheres[isect.index];

        let x = ray.at(isect.t);
        let wo = -ray.d;

        // Geometric normal, flipped into the hemisphere of the outgoing
        // direction.
        let mut n = sphere.normal_at(&x);
        if n.dot(&wo) < 0.0 {
            n = -n;
        }

        let mut l = match mode {
            Emission::Include => sphere.emission,
            Emission::Exclude => Spectrum::ZERO,
        };

        l += self.direct(scene, &x, &n, &wo, sphere, rng);
        l += self.indirect(scene, &x, &n, &wo, sphere, depth, rng);

        l
    }

    /// Next-event estimation: samples a point on each light's surface and
    /// weighs its emission by the BRDF, the geometric coupling term and
    /// visibility. Never recurses. Delta surfaces have no finite density
    /// toward the light, so they are skipped.
    ///
    /// * `scene`  - The scene.
    /// * `x`      - The shading point.
    /// * `n`      - Surface normal at `x`, oriented toward `wo`.
    /// * `wo`     - Outgoing direction.
    /// * `sphere` - The sphere `x` lies on.
    /// * `rng`    - The calling worker's generator.
    fn direct(
        &self,
        scene: &Scene,
        x: &Vector3f,
        n: &Vector3f,
        wo: &Vector3f,
        sphere: &Sphere,
        rng: &mut RNG,
    ) -> Spectrum {
        if sphere.brdf.is_specular() {
            return Spectrum::ZERO;
        }

        let mut l = Spectrum::ZERO;

        for &light_index in scene.lights.iter() {
            let light = &scene.spheres[light_index];
            let sample = sample_surface(light, rng.uniform_float(), rng.uniform_float());

            let to_light = sample.p - *x;
            let r2 = to_light.length_squared();
            if r2 == 0.0 {
                continue;
            }
            let wi = to_light / r2.sqrt();

            let tester = VisibilityTester::new(Ray::new(*x, wi), light_index, sample.n);
            if !tester.unoccluded(scene) {
                continue;
            }

            l += light.emission
                * sphere.brdf.eval(n, wo, &wi)
                * (n.dot(&wi) * sample.n.dot(&-wi) / (r2 * sample.pdf_area));
        }

        l
    }

    /// One Russian-roulette-gated recursive bounce, importance sampled
    /// from the surface's BRDF and weighted by f·cosθ/(pdf·p). The
    /// recursion excludes the next vertex's own emission (next-event
    /// estimation at this vertex already counted it) unless the bounce
    /// was specular.
    ///
    /// * `scene`  - The scene.
    /// * `x`      - The shading point.
    /// * `n`      - Surface normal at `x`, oriented toward `wo`.
    /// * `wo`     - Outgoing direction.
    /// * `sphere` - The sphere `x` lies on.
    /// * `depth`  - The recursion depth.
    /// * `rng`    - The calling worker's generator.
    fn indirect(
        &self,
        scene: &Scene,
        x: &Vector3f,
        n: &Vector3f,
        wo: &Vector3f,
        sphere: &Sphere,
        depth: usize,
        rng: &mut RNG,
    ) -> Spectrum {
        let p = if depth <= self.rr_depth {
            1.0
        } else {
            self.rr_survival
        };
        if rng.uniform_float() >= p {
            return Spectrum::ZERO; // roulette kill
        }

        let sample = sphere
            .brdf
            .sample(n, wo, rng.uniform_float(), rng.uniform_float());
        if sample.pdf == 0.0 || sample.f.is_black() {
            // Zero-density draw; a terminal zero contribution, not an error.
            return Spectrum::ZERO;
        }

        let mode = if sample.specular {
            Emission::Include
        } else {
            Emission::Exclude
        };
        let bounce = Ray::new(*x, sample.wi);
        let li = self.radiance(scene, &bounce, depth + 1, rng, mode);

        sample.f * li * (n.dot(&sample.wi) / (sample.pdf * p))
    }
}

impl Default for PathIntegrator {
    /// Russian roulette after depth 5 with survival probability 0.9.
    fn default() -> Self {
        Self::new(5, 0.9)
    }
}

impl Integrator for PathIntegrator {
    /// Returns the incident radiance at the origin of a given ray.
    ///
    /// * `ray`   - The ray.
    /// * `scene` - The scene.
    /// * `rng`   - The calling worker's generator.
    /// * `depth` - The recursion depth.
    fn li(&self, ray: &Ray, scene: &Scene, rng: &mut RNG, depth: usize) -> Spectrum {
        self.radiance(scene, ray, depth, rng, Emission::Include)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_core::camera::Camera;
    use glint_core::integrator::RenderOptions;
    use float_cmp::approx_eq;
    use glint_core::reflection::Brdf;
    use glint_core::spectrum::Spectrum;
    use std::sync::Arc;

    fn diffuse(v: Float) -> Arc<Brdf> {
        Arc::new(Brdf::Diffuse {
            kd: Spectrum::new(v),
        })
    }

    /// A floor sphere under a small light; the probe ray hits the floor
    /// straight on.
    fn floor_and_light() -> (Scene, Ray) {
        let scene = Scene::new(vec![
            Sphere::new(
                1e4,
                Vector3f::new(0.0, -1e4, 0.0),
                Spectrum::ZERO,
                diffuse(0.7),
            ),
            Sphere::new(
                2.0,
                Vector3f::new(0.0, 20.0, 0.0),
                Spectrum::new(30.0),
                Arc::new(Brdf::Diffuse {
                    kd: Spectrum::ZERO,
                }),
            ),
        ]);
        let ray = Ray::new(
            Vector3f::new(0.0, 5.0, 0.0),
            Vector3f::new(0.0, -1.0, 0.0),
        );
        (scene, ray)
    }

    #[test]
    fn miss_returns_black() {
        let (scene, _) = floor_and_light();
        // Sideways from above the floor: the closest approach to the light
        // center is 15 (> radius 2) and the floor sphere tops out at y = 0.
        let away = Ray::new(Vector3f::new(0.0, 5.0, 0.0), Vector3f::new(1.0, 0.0, 0.0));
        let mut rng = RNG::new(0);
        let l = PathIntegrator::default().li(&away, &scene, &mut rng, 1);
        assert!(l.is_black());
    }

    #[test]
    fn direct_lighting_matches_analytic_mean() {
        // At the floor point straight under the light the estimate is
        // dominated by next-event estimation, whose closed form for a small
        // distant sphere light is Le·kd·r²/d² = 30·0.7·4/400 = 0.21.
        let (scene, ray) = floor_and_light();
        let integrator = PathIntegrator::default();
        let mut rng = RNG::new(17);
        let n = 40_000;
        let mean = (0..n)
            .map(|_| integrator.li(&ray, &scene, &mut rng, 1).y())
            .sum::<Float>()
            / n as Float;
        let expected = 30.0 * 0.7 * 4.0 / 400.0;
        assert!(
            (mean - expected).abs() / expected < 0.15,
            "mean {mean} vs analytic {expected}"
        );
    }

    #[test]
    fn estimates_are_finite_and_non_negative() {
        let (scene, ray) = floor_and_light();
        let integrator = PathIntegrator::default();
        let mut rng = RNG::new(99);
        for _ in 0..2_000 {
            let l = integrator.li(&ray, &scene, &mut rng, 1);
            assert!(!l.has_nans());
            assert!(l.r >= 0.0 && l.g >= 0.0 && l.b >= 0.0);
            assert!(l.max_component_value().is_finite());
        }
    }

    #[test]
    fn fixed_stream_reproduces_estimates() {
        let (scene, ray) = floor_and_light();
        let integrator = PathIntegrator::default();
        let mut a = RNG::new(7);
        let mut b = RNG::new(7);
        for _ in 0..100 {
            assert_eq!(
                integrator.li(&ray, &scene, &mut a, 1),
                integrator.li(&ray, &scene, &mut b, 1)
            );
        }
    }

    #[test]
    fn russian_roulette_survival_does_not_shift_the_mean() {
        // With rr_depth = 0 the roulette gates every bounce, so any bias
        // from the survival probability would show up immediately. The
        // mean estimate must be invariant; only the variance may change.
        let (scene, ray) = floor_and_light();
        let n = 60_000;

        let mut means = Vec::new();
        for (i, survival) in [0.5, 0.7, 1.0].into_iter().enumerate() {
            let integrator = PathIntegrator::new(0, survival);
            let mut rng = RNG::new(1000 + i as u64);
            let mut acc = 0.0;
            for _ in 0..n {
                acc += integrator.li(&ray, &scene, &mut rng, 1).y();
            }
            means.push(acc / n as Float);
        }

        let reference = means[2]; // survival = 1.0 has the least variance
        assert!(reference > 0.0);
        for mean in means {
            assert!(
                (mean - reference).abs() / reference < 0.1,
                "mean {mean} deviates from reference {reference}"
            );
        }
    }

    #[test]
    fn mirror_reflects_the_light() {
        // A mirror floor under the light: all direct light at the mirror
        // vertex flows through the delta sample, so the reflected ray must
        // pick the emission back up.
        let scene = Scene::new(vec![
            Sphere::new(
                1e4,
                Vector3f::new(0.0, -1e4, 0.0),
                Spectrum::ZERO,
                Arc::new(Brdf::Specular {
                    ks: Spectrum::new(0.999),
                }),
            ),
            Sphere::new(
                2.0,
                Vector3f::new(0.0, 20.0, 0.0),
                Spectrum::new(30.0),
                Arc::new(Brdf::Diffuse {
                    kd: Spectrum::ZERO,
                }),
            ),
        ]);
        // Straight down at the mirror; the mirror direction points back up
        // at the light.
        let ray = Ray::new(
            Vector3f::new(0.0, 5.0, 0.0),
            Vector3f::new(0.0, -1.0, 0.0),
        );
        let integrator = PathIntegrator::default();
        let mut rng = RNG::new(3);
        let l = integrator.li(&ray, &scene, &mut rng, 1);
        // 30 · 0.999, no roulette at depth 1.
        assert!(approx_eq!(f64, l.y(), 30.0 * 0.999, epsilon = 1e-6));
    }

    #[test]
    fn reference_scene_end_to_end() {
        let scene = Scene::cornell_box();
        let camera = Camera::reference(16, 16);
        let opts = RenderOptions {
            width: 16,
            height: 16,
            samples_per_pixel: 4,
            threads: 1,
            seed: 1234,
        };
        let integrator = PathIntegrator::default();
        let film = integrator.render(&scene, &camera, &opts);

        assert_eq!(film.to_rgb8().len(), 16 * 16 * 3);
        for y in 0..16 {
            for x in 0..16 {
                let p = film.pixel(x, y);
                assert!(!p.has_nans());
                assert!(p.max_component_value() <= 1.0);
            }
        }

        // The light hangs top-center; the near-light block must out-shine
        // the farthest corner of the floor.
        let mut near_light = 0.0;
        let mut far_corner = 0.0;
        for dy in 0..4 {
            for dx in 0..4 {
                near_light += film.pixel(6 + dx, dy).y();
                far_corner += film.pixel(dx, 12 + dy).y();
            }
        }
        assert!(
            near_light > far_corner,
            "near-light {near_light} vs far corner {far_corner}"
        );
    }

    #[test]
    fn renders_identically_across_runs() {
        let scene = Scene::cornell_box();
        let camera = Camera::reference(16, 16);
        let opts = RenderOptions {
            width: 16,
            height: 16,
            samples_per_pixel: 4,
            threads: 2,
            seed: 42,
        };
        let integrator = PathIntegrator::default();
        let a = integrator.render(&scene, &camera, &opts);
        let b = integrator.render(&scene, &camera, &opts);
        for y in 0..16 {
            for x in 0..16 {
                assert_eq!(a.pixel(x, y), b.pixel(x, y));
            }
        }
    }
}
