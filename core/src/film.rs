//! Film

use crate::glint::gamma_encode;
use crate::spectrum::Spectrum;
use log::info;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Accumulation buffer for the rendered image. Row 0 is the top of the
/// image; every pixel slot is written by exactly one render task.
pub struct Film {
    /// Image width in pixels.
    pub width: usize,

    /// Image height in pixels.
    pub height: usize,

    /// Linear radiance values, row-major from the top-left.
    pixels: Vec<Spectrum>,
}

impl Film {
    /// Creates a new black `Film`.
    ///
    /// * `width`  - Image width in pixels.
    /// * `height` - Image height in pixels.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![Spectrum::ZERO; width * height],
        }
    }

    /// Merges one finished row into the buffer.
    ///
    /// * `row`    - Row index from the top.
    /// * `pixels` - The row's pixel values, `width` of them.
    pub fn merge_row(&mut self, row: usize, pixels: Vec<Spectrum>) {
        debug_assert_eq!(pixels.len(), self.width);
        let offset = row * self.width;
        self.pixels[offset..offset + self.width].copy_from_slice(&pixels);
    }

    /// Returns the pixel at (x, y), y from the top.
    pub fn pixel(&self, x: usize, y: usize) -> Spectrum {
        self.pixels[y * self.width + x]
    }

    /// Returns the gamma-encoded 8-bit RGB interleaved pixel data.
    pub fn to_rgb8(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(self.pixels.len() * 3);
        for p in self.pixels.iter() {
            data.push(gamma_encode(p.r));
            data.push(gamma_encode(p.g));
            data.push(gamma_encode(p.b));
        }
        data
    }

    /// Writes the image. `.ppm` paths get a text PPM; everything else is
    /// delegated to the `image` crate based on the extension.
    ///
    /// * `path` - Output file path.
    pub fn write_image(&self, path: &str) -> Result<(), String> {
        let extension = Path::new(path)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        match extension.as_deref() {
            Some("ppm") => self.write_ppm(path),
            Some(_) => image::save_buffer(
                path,
                &self.to_rgb8(),
                self.width as u32,
                self.height as u32,
                image::ColorType::Rgb8,
            )
            .map_err(|e| e.to_string()),
            None => Err(format!(
                "Can't determine file type from suffix of filename {path}."
            )),
        }?;

        info!("Wrote image {path} ({} x {})", self.width, self.height);
        Ok(())
    }

    /// Writes a text PPM (P3) file.
    ///
    /// * `path` - Output file path.
    fn write_ppm(&self, path: &str) -> Result<(), String> {
        let file = File::create(path).map_err(|e| e.to_string())?;
        let mut w = BufWriter::new(file);

        writeln!(w, "P3\n{} {}\n{}", self.width, self.height, 255).map_err(|e| e.to_string())?;
        for chunk in self.to_rgb8().chunks(3) {
            write!(w, "{} {} {} ", chunk[0], chunk[1], chunk[2]).map_err(|e| e.to_string())?;
        }
        w.flush().map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_row_places_pixels() {
        let mut film = Film::new(2, 2);
        film.merge_row(1, vec![Spectrum::new(1.0), Spectrum::new(0.5)]);
        assert_eq!(film.pixel(0, 1), Spectrum::new(1.0));
        assert_eq!(film.pixel(1, 1), Spectrum::new(0.5));
        assert_eq!(film.pixel(0, 0), Spectrum::ZERO);
    }

    #[test]
    fn rgb8_is_gamma_encoded() {
        let mut film = Film::new(1, 1);
        film.merge_row(0, vec![Spectrum::from_rgb(0.0, 1.0, 2.0)]);
        let data = film.to_rgb8();
        assert_eq!(data, vec![0, 255, 255]);
    }
}
