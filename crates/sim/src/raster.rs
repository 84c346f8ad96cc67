//! Software rasterizer backing the PNG output path.
//!
//! A plain RGBA8 pixel buffer implementing [`DrawSurface`] with opaque
//! overwrite semantics: no blending, no anti-aliasing. Out-of-bounds
//! writes are silently dropped, so geometry hanging past the canvas (balls
//! mid-wrap, extrapolated points) needs no clipping by the caller.
//! Text labels are ignored; this backend has no font.

use glam::DVec2;
use metaballs_core::{Rgba, SimError};

use crate::surface::DrawSurface;

/// An RGBA8 pixel buffer that receives draw primitives.
#[derive(Debug, Clone)]
pub struct Raster {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl Raster {
    /// Creates a buffer of `width × height` opaque black pixels.
    ///
    /// Returns `SimError::InvalidDimensions` if either dimension is zero.
    pub fn new(width: usize, height: usize) -> Result<Self, SimError> {
        if width == 0 || height == 0 {
            return Err(SimError::InvalidDimensions);
        }
        let mut pixels = vec![0u8; width * height * 4];
        for px in pixels.chunks_exact_mut(4) {
            px[3] = 255;
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// The raw RGBA8 pixel data, row-major.
    pub fn data(&self) -> &[u8] {
        &self.pixels
    }

    /// Consumes the raster, returning the raw pixel data.
    pub fn into_vec(self) -> Vec<u8> {
        self.pixels
    }

    /// The pixel at `(x, y)`; used by tests to probe output.
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        let i = (y * self.width + x) * 4;
        [
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ]
    }

    fn set(&mut self, x: i64, y: i64, px: [u8; 4]) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let i = (y as usize * self.width + x as usize) * 4;
        self.pixels[i..i + 4].copy_from_slice(&px);
    }

    fn draw_line(&mut self, a: DVec2, b: DVec2, px: [u8; 4]) {
        if !a.is_finite() || !b.is_finite() {
            return;
        }
        let d = b - a;
        let steps = d.x.abs().max(d.y.abs()).ceil() as usize;
        if steps == 0 {
            self.set(a.x.round() as i64, a.y.round() as i64, px);
            return;
        }
        for i in 0..=steps {
            let p = a + d * (i as f64 / steps as f64);
            self.set(p.x.round() as i64, p.y.round() as i64, px);
        }
    }
}

impl DrawSurface for Raster {
    fn clear(&mut self, color: Rgba) {
        let px = color.to_bytes();
        for chunk in self.pixels.chunks_exact_mut(4) {
            chunk.copy_from_slice(&px);
        }
    }

    fn fill_rect(&mut self, center: DVec2, size: f64, color: Rgba) {
        if !center.is_finite() {
            return;
        }
        let px = color.to_bytes();
        let half = size / 2.0;
        let x0 = (center.x - half).round() as i64;
        let y0 = (center.y - half).round() as i64;
        let extent = size.round().max(1.0) as i64;
        for y in y0..y0 + extent {
            for x in x0..x0 + extent {
                self.set(x, y, px);
            }
        }
    }

    fn stroke_circle(&mut self, center: DVec2, radius: f64, color: Rgba) {
        if !center.is_finite() || !radius.is_finite() {
            return;
        }
        let px = color.to_bytes();
        let segments = (radius * std::f64::consts::TAU).ceil().max(12.0) as usize;
        let mut prev = center + DVec2::new(radius, 0.0);
        for i in 1..=segments {
            let angle = std::f64::consts::TAU * i as f64 / segments as f64;
            let p = center + DVec2::new(angle.cos(), angle.sin()) * radius;
            self.draw_line(prev, p, px);
            prev = p;
        }
    }

    fn stroke_polyline(&mut self, points: &[DVec2], color: Rgba) {
        let px = color.to_bytes();
        for pair in points.windows(2) {
            self.draw_line(pair[0], pair[1], px);
        }
    }

    fn fill_polygon(&mut self, points: &[DVec2], color: Rgba) {
        if points.len() < 3 || points.iter().any(|p| !p.is_finite()) {
            return;
        }
        let px = color.to_bytes();
        let min_y = points.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
        let max_y = points.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);
        let y0 = (min_y.floor().max(0.0)) as i64;
        let y1 = (max_y.ceil().min(self.height as f64 - 1.0)) as i64;

        let mut xs: Vec<f64> = Vec::new();
        for y in y0..=y1 {
            // Even-odd scanline fill sampled at pixel centers.
            let scan = y as f64 + 0.5;
            xs.clear();
            for i in 0..points.len() {
                let a = points[i];
                let b = points[(i + 1) % points.len()];
                if (a.y <= scan && b.y > scan) || (b.y <= scan && a.y > scan) {
                    let t = (scan - a.y) / (b.y - a.y);
                    xs.push(a.x + (b.x - a.x) * t);
                }
            }
            xs.sort_by(f64::total_cmp);
            for span in xs.chunks_exact(2) {
                let x0 = span[0].round() as i64;
                let x1 = span[1].round() as i64;
                for x in x0..=x1 {
                    self.set(x, y, px);
                }
            }
        }
    }

    fn draw_text(&mut self, _text: &str, _pos: DVec2, _color: Rgba) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_raster_is_opaque_black() {
        let raster = Raster::new(4, 3).unwrap();
        assert_eq!(raster.data().len(), 4 * 3 * 4);
        assert_eq!(raster.pixel(0, 0), [0, 0, 0, 255]);
        assert_eq!(raster.pixel(3, 2), [0, 0, 0, 255]);
    }

    #[test]
    fn zero_dimension_is_rejected() {
        assert!(matches!(Raster::new(0, 10), Err(SimError::InvalidDimensions)));
        assert!(matches!(Raster::new(10, 0), Err(SimError::InvalidDimensions)));
    }

    #[test]
    fn clear_fills_every_pixel() {
        let mut raster = Raster::new(3, 3).unwrap();
        raster.clear(Rgba::rgb(10.0, 20.0, 30.0));
        for y in 0..3 {
            for x in 0..3 {
                assert_eq!(raster.pixel(x, y), [10, 20, 30, 255]);
            }
        }
    }

    #[test]
    fn fill_rect_covers_center_pixel() {
        let mut raster = Raster::new(10, 10).unwrap();
        raster.fill_rect(DVec2::new(5.0, 5.0), 3.0, Rgba::WHITE);
        assert_eq!(raster.pixel(5, 5), [255, 255, 255, 255]);
        assert_eq!(raster.pixel(0, 0), [0, 0, 0, 255]);
    }

    #[test]
    fn polyline_sets_both_endpoints() {
        let mut raster = Raster::new(20, 20).unwrap();
        raster.stroke_polyline(
            &[DVec2::new(2.0, 2.0), DVec2::new(15.0, 9.0)],
            Rgba::WHITE,
        );
        assert_eq!(raster.pixel(2, 2), [255, 255, 255, 255]);
        assert_eq!(raster.pixel(15, 9), [255, 255, 255, 255]);
    }

    #[test]
    fn polygon_fill_covers_interior_not_exterior() {
        let mut raster = Raster::new(20, 20).unwrap();
        let square = [
            DVec2::new(5.0, 5.0),
            DVec2::new(15.0, 5.0),
            DVec2::new(15.0, 15.0),
            DVec2::new(5.0, 15.0),
        ];
        raster.fill_polygon(&square, Rgba::rgb(0.0, 255.0, 0.0));
        assert_eq!(raster.pixel(10, 10), [0, 255, 0, 255]);
        assert_eq!(raster.pixel(2, 2), [0, 0, 0, 255]);
        assert_eq!(raster.pixel(18, 18), [0, 0, 0, 255]);
    }

    #[test]
    fn circle_outline_leaves_center_untouched() {
        let mut raster = Raster::new(40, 40).unwrap();
        raster.stroke_circle(DVec2::new(20.0, 20.0), 10.0, Rgba::WHITE);
        assert_eq!(raster.pixel(20, 20), [0, 0, 0, 255]);
        // Rightmost point of the circle lies on the outline.
        assert_eq!(raster.pixel(30, 20), [255, 255, 255, 255]);
    }

    #[test]
    fn out_of_bounds_geometry_is_dropped_silently() {
        let mut raster = Raster::new(10, 10).unwrap();
        raster.stroke_circle(DVec2::new(100.0, 100.0), 5.0, Rgba::WHITE);
        raster.fill_rect(DVec2::new(-50.0, -50.0), 4.0, Rgba::WHITE);
        raster.stroke_polyline(
            &[DVec2::new(-5.0, -5.0), DVec2::new(-1.0, -1.0)],
            Rgba::WHITE,
        );
        assert!(raster.data().chunks_exact(4).all(|px| px == [0, 0, 0, 255]));
    }

    #[test]
    fn non_finite_geometry_is_ignored() {
        let mut raster = Raster::new(10, 10).unwrap();
        raster.draw_line(
            DVec2::new(f64::NAN, 0.0),
            DVec2::new(5.0, 5.0),
            [255, 255, 255, 255],
        );
        raster.fill_polygon(
            &[
                DVec2::new(0.0, 0.0),
                DVec2::new(f64::INFINITY, 0.0),
                DVec2::new(5.0, 5.0),
            ],
            Rgba::WHITE,
        );
        assert!(raster.data().chunks_exact(4).all(|px| px == [0, 0, 0, 255]));
    }

    #[test]
    fn degenerate_line_draws_single_point() {
        let mut raster = Raster::new(10, 10).unwrap();
        raster.stroke_polyline(
            &[DVec2::new(4.0, 4.0), DVec2::new(4.0, 4.0)],
            Rgba::WHITE,
        );
        assert_eq!(raster.pixel(4, 4), [255, 255, 255, 255]);
    }
}
