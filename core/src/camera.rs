//! Camera

use crate::geometry::{Ray, Vector3f};
use crate::glint::Float;

/// Pinhole camera. Generates one primary ray per sub-pixel sample with a
/// tent-filter jitter.
pub struct Camera {
    /// Eye position.
    pub eye: Vector3f,

    /// Viewing direction, unit length.
    pub dir: Vector3f,

    /// Horizontal image-plane basis vector.
    cx: Vector3f,

    /// Vertical image-plane basis vector.
    cy: Vector3f,

    /// Image width in pixels.
    width: usize,

    /// Image height in pixels.
    height: usize,
}

/// Field-of-view scale of the reference camera.
const FOV_SCALE: Float = 0.5135;

impl Camera {
    /// Creates a new `Camera`.
    ///
    /// * `eye`    - Eye position.
    /// * `dir`    - Viewing direction (normalized here).
    /// * `width`  - Image width in pixels.
    /// * `height` - Image height in pixels.
    pub fn new(eye: Vector3f, dir: Vector3f, width: usize, height: usize) -> Self {
        let dir = dir.normalize();
        let cx = Vector3f::new(width as Float * FOV_SCALE / height as Float, 0.0, 0.0);
        let cy = cx.cross(&dir).normalize() * FOV_SCALE;
        Self {
            eye,
            dir,
            cx,
            cy,
            width,
            height,
        }
    }

    /// The reference viewpoint for the reference box scene.
    ///
    /// * `width`  - Image width in pixels.
    /// * `height` - Image height in pixels.
    pub fn reference(width: usize, height: usize) -> Self {
        Self::new(
            Vector3f::new(50.0, 52.0, 295.6),
            Vector3f::new(0.0, -0.042612, -1.0),
            width,
            height,
        )
    }

    /// Generates a primary ray through a sub-pixel of pixel (x, y) with a
    /// tent-filter jitter driven by two uniform variates. y counts up from
    /// the bottom of the image.
    ///
    /// * `x`  - Pixel column.
    /// * `y`  - Pixel row, bottom-up.
    /// * `sx` - Sub-pixel column in the 2×2 grid.
    /// * `sy` - Sub-pixel row in the 2×2 grid.
    /// * `u1` - First uniform variate in [0, 1).
    /// * `u2` - Second uniform variate in [0, 1).
    pub fn generate_ray(
        &self,
        x: usize,
        y: usize,
        sx: usize,
        sy: usize,
        u1: Float,
        u2: Float,
    ) -> Ray {
        let dx = tent_filter(u1);
        let dy = tent_filter(u2);

        let px = ((sx as Float + 0.5 + dx) / 2.0 + x as Float) / self.width as Float - 0.5;
        let py = ((sy as Float + 0.5 + dy) / 2.0 + y as Float) / self.height as Float - 0.5;
        let d = self.cx * px + self.cy * py + self.dir;

        Ray::new(self.eye, d.normalize())
    }
}

/// Maps a uniform variate to a tent-distributed offset in (-1, 1).
///
/// * `u` - Uniform variate in [0, 1).
#[inline]
fn tent_filter(u: Float) -> Float {
    let r = 2.0 * u;
    if r < 1.0 {
        r.sqrt() - 1.0
    } else {
        1.0 - (2.0 - r).sqrt()
    }
}
