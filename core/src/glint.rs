//! Common

/// Use 64-bit precision for floating point numbers.
pub type Float = f64;

/// Infinity (∞)
pub const INFINITY: Float = Float::INFINITY;

/// PI (π)
pub const PI: Float = std::f64::consts::PI;

/// 1/PI (1/π)
pub const INV_PI: Float = 1.0 / PI;

/// 2*PI (2π)
pub const TWO_PI: Float = PI * 2.0;

/// 4*PI (4π)
pub const FOUR_PI: Float = PI * 4.0;

/// Minimum parametric distance accepted for a ray-surface hit. Guards
/// secondary rays against re-intersecting the surface they start on.
pub const HIT_EPSILON: Float = 1e-4;

/// 1 - epsilon in the precision we've selected for `Float`.
pub const ONE_MINUS_EPSILON: Float = hexf::hexf64!("0x1.fffffffffffffp-1");

/// Clamps a value to the given bounds.
///
/// * `x`  - The value.
/// * `lo` - Lower bound.
/// * `hi` - Upper bound.
#[inline(always)]
pub fn clamp(x: Float, lo: Float, hi: Float) -> Float {
    if x < lo {
        lo
    } else if x > hi {
        hi
    } else {
        x
    }
}

/// Returns a display-ready 8-bit channel value for a linear radiance
/// channel: clamp to [0, 1], gamma encode with exponent 1/2.2 and round.
///
/// * `value` - Linear channel value.
#[inline(always)]
pub fn gamma_encode(value: Float) -> u8 {
    (clamp(value, 0.0, 1.0).powf(1.0 / 2.2) * 255.0 + 0.5) as u8
}
