//! Spectrum

use crate::glint::{clamp, Float};
use std::fmt;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign};

/// Linear RGB radiance triple. Spectral rendering is out of scope, so the
/// renderer works in RGB throughout.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct RGBSpectrum {
    /// Red channel.
    pub r: Float,

    /// Green channel.
    pub g: Float,

    /// Blue channel.
    pub b: Float,
}

/// Default to using `RGBSpectrum` for rendering.
pub type Spectrum = RGBSpectrum;

impl RGBSpectrum {
    /// Black.
    pub const ZERO: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };

    /// Unit spectrum.
    pub const ONE: Self = Self {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };

    /// Creates a spectrum with all channels set to the same value.
    ///
    /// * `v` - The channel value.
    pub fn new(v: Float) -> Self {
        Self { r: v, g: v, b: v }
    }

    /// Creates a spectrum from individual channel values.
    ///
    /// * `r` - Red channel.
    /// * `g` - Green channel.
    /// * `b` - Blue channel.
    pub fn from_rgb(r: Float, g: Float, b: Float) -> Self {
        Self { r, g, b }
    }

    /// Returns true if all channels are zero.
    pub fn is_black(&self) -> bool {
        self.r == 0.0 && self.g == 0.0 && self.b == 0.0
    }

    /// Returns true if any channel is NaN.
    pub fn has_nans(&self) -> bool {
        self.r.is_nan() || self.g.is_nan() || self.b.is_nan()
    }

    /// Returns the luminance.
    pub fn y(&self) -> Float {
        0.212671 * self.r + 0.715160 * self.g + 0.072169 * self.b
    }

    /// Returns the largest channel value.
    pub fn max_component_value(&self) -> Float {
        self.r.max(self.g).max(self.b)
    }

    /// Returns a copy with each channel clamped to the given bounds.
    ///
    /// * `lo` - Lower bound.
    /// * `hi` - Upper bound.
    pub fn clamp(&self, lo: Float, hi: Float) -> Self {
        Self {
            r: clamp(self.r, lo, hi),
            g: clamp(self.g, lo, hi),
            b: clamp(self.b, lo, hi),
        }
    }
}

impl Add for RGBSpectrum {
    type Output = Self;

    /// Adds the given spectrum and returns the result.
    ///
    /// * `other` - The spectrum to add.
    fn add(self, other: Self) -> Self::Output {
        Self::Output {
            r: self.r + other.r,
            g: self.g + other.g,
            b: self.b + other.b,
        }
    }
}

impl AddAssign for RGBSpectrum {
    /// Performs the `+=` operation.
    ///
    /// * `other` - The spectrum to add.
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Mul for RGBSpectrum {
    type Output = Self;

    /// Returns the component-wise (Hadamard) product.
    ///
    /// * `other` - The other spectrum.
    fn mul(self, other: Self) -> Self::Output {
        Self::Output {
            r: self.r * other.r,
            g: self.g * other.g,
            b: self.b * other.b,
        }
    }
}

impl MulAssign for RGBSpectrum {
    /// Performs the component-wise `*=` operation.
    ///
    /// * `other` - The other spectrum.
    fn mul_assign(&mut self, other: Self) {
        *self = *self * other;
    }
}

impl Mul<Float> for RGBSpectrum {
    type Output = Self;

    /// Scales each channel.
    ///
    /// * `f` - The scaling factor.
    fn mul(self, f: Float) -> Self::Output {
        Self::Output {
            r: self.r * f,
            g: self.g * f,
            b: self.b * f,
        }
    }
}

impl Mul<RGBSpectrum> for Float {
    type Output = RGBSpectrum;

    /// Scales each channel of the spectrum.
    ///
    /// * `s` - The spectrum.
    fn mul(self, s: RGBSpectrum) -> Self::Output {
        s * self
    }
}

impl Div<Float> for RGBSpectrum {
    type Output = Self;

    /// Scales each channel by 1/f.
    ///
    /// * `f` - The scaling factor.
    fn div(self, f: Float) -> Self::Output {
        debug_assert!(f != 0.0);
        Self::Output {
            r: self.r / f,
            g: self.g / f,
            b: self.b / f,
        }
    }
}

impl DivAssign<Float> for RGBSpectrum {
    /// Performs the `/=` operation.
    ///
    /// * `f` - The scaling factor.
    fn div_assign(&mut self, f: Float) {
        *self = *self / f;
    }
}

impl fmt::Display for RGBSpectrum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}]", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn black_detection() {
        assert!(Spectrum::ZERO.is_black());
        assert!(!Spectrum::new(1e-12).is_black());
    }

    #[test]
    fn nan_detection() {
        assert!(!Spectrum::ONE.has_nans());
        assert!(Spectrum::from_rgb(0.0, Float::NAN, 0.0).has_nans());
    }

    #[test]
    fn hadamard_product() {
        let a = Spectrum::from_rgb(0.5, 1.0, 2.0);
        let b = Spectrum::from_rgb(2.0, 3.0, 0.25);
        assert_eq!(a * b, Spectrum::from_rgb(1.0, 3.0, 0.5));
    }

    #[test]
    fn luminance_weights_sum_to_one() {
        assert!((Spectrum::ONE.y() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn clamp_channels() {
        let s = Spectrum::from_rgb(-1.0, 0.5, 7.0).clamp(0.0, 1.0);
        assert_eq!(s, Spectrum::from_rgb(0.0, 0.5, 1.0));
    }
}
