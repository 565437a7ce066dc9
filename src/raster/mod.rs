//! # Raster Canvas
//!
//! An RGBA pixel grid with aliased drawing primitives.
//!
//! ## Memory Layout
//!
//! ```text
//! pixels[(y * width + x) * 4 + 0] = R
//! pixels[(y * width + x) * 4 + 1] = G
//! pixels[(y * width + x) * 4 + 2] = B
//! pixels[(y * width + x) * 4 + 3] = A
//! ```
//!
//! Rows are stored top to bottom with no padding, which is also the layout
//! the PNG encoder frames into scanlines.
//!
//! ## Clipping
//!
//! Every primitive takes signed coordinates and clips silently against the
//! canvas: writes outside `[0, width) x [0, height)` are dropped, never
//! reported.

pub mod font;

pub use font::{Glyph, glyph_for, measure_text};

use serde::Serialize;

use crate::error::{Result, YearDotsError};

/// Bytes per pixel (R, G, B, A).
pub const BYTES_PER_PIXEL: usize = 4;

/// Straight (non-premultiplied) RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    /// Opaque gray level.
    pub const fn gray(level: u8) -> Self {
        Self::rgb(level, level, level)
    }

    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// RGBA pixel grid, initialized to fully transparent black.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl Canvas {
    /// Allocate a `width x height` canvas.
    ///
    /// Both dimensions must be non-zero.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(YearDotsError::Geometry(format!(
                "canvas must be at least 1x1, got {}x{}",
                width, height
            )));
        }
        let len = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(BYTES_PER_PIXEL))
            .ok_or_else(|| {
                YearDotsError::Geometry(format!("canvas {}x{} is too large", width, height))
            })?;
        Ok(Self {
            width,
            height,
            pixels: vec![0u8; len],
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Raw row-major RGBA bytes.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Bytes of row `y` (`width * 4` long).
    pub fn row(&self, y: usize) -> &[u8] {
        let stride = self.width * BYTES_PER_PIXEL;
        &self.pixels[y * stride..(y + 1) * stride]
    }

    /// Color at `(x, y)`, or `None` outside the canvas.
    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        let idx = self.index(x, y)?;
        let p = &self.pixels[idx..idx + BYTES_PER_PIXEL];
        Some(Color::rgba(p[0], p[1], p[2], p[3]))
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y * self.width + x) * BYTES_PER_PIXEL)
    }

    /// Fill the whole canvas.
    pub fn clear(&mut self, color: Color) {
        let rgba = color.to_array();
        for px in self.pixels.chunks_exact_mut(BYTES_PER_PIXEL) {
            px.copy_from_slice(&rgba);
        }
    }

    /// Set one pixel; out-of-bounds writes are no-ops.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if let Some(idx) = self.index(x, y) {
            self.pixels[idx..idx + BYTES_PER_PIXEL].copy_from_slice(&color.to_array());
        }
    }

    /// Fill the half-open rectangle `[x0, x1) x [y0, y1)`.
    pub fn fill_rect(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
        let (x0, x1) = clamp_span(x0, x1, self.width);
        let (y0, y1) = clamp_span(y0, y1, self.height);
        let rgba = color.to_array();
        for y in y0..y1 {
            let start = (y * self.width + x0) * BYTES_PER_PIXEL;
            let end = (y * self.width + x1) * BYTES_PER_PIXEL;
            for px in self.pixels[start..end].chunks_exact_mut(BYTES_PER_PIXEL) {
                px.copy_from_slice(&rgba);
            }
        }
    }

    /// Filled disk: sets `(x, y)` iff `(x-cx)² + (y-cy)² <= radius²`.
    pub fn fill_circle(&mut self, cx: i32, cy: i32, radius: i32, color: Color) {
        if radius < 0 {
            return;
        }
        self.fill_annulus(cx, cy, 0, radius, color);
    }

    /// Ring: sets pixels whose squared distance from the center lies in
    /// `[inner², outer²]`, where `inner = max(0, outer - thickness)`.
    pub fn draw_ring(&mut self, cx: i32, cy: i32, outer_radius: i32, thickness: i32, color: Color) {
        if outer_radius < 0 {
            return;
        }
        let inner = (outer_radius - thickness.max(0)).max(0);
        self.fill_annulus(cx, cy, inner, outer_radius, color);
    }

    fn fill_annulus(&mut self, cx: i32, cy: i32, inner: i32, outer: i32, color: Color) {
        let inner2 = i64::from(inner) * i64::from(inner);
        let outer2 = i64::from(outer) * i64::from(outer);

        // Bounding box of the outer circle, clipped to the canvas
        let reach = outer.saturating_add(1);
        let (x0, x1) = clamp_span(cx.saturating_sub(outer), cx.saturating_add(reach), self.width);
        let (y0, y1) = clamp_span(cy.saturating_sub(outer), cy.saturating_add(reach), self.height);
        let rgba = color.to_array();

        for y in y0..y1 {
            let dy = y as i64 - i64::from(cy);
            for x in x0..x1 {
                let dx = x as i64 - i64::from(cx);
                let d2 = dx * dx + dy * dy;
                if d2 >= inner2 && d2 <= outer2 {
                    let idx = (y * self.width + x) * BYTES_PER_PIXEL;
                    self.pixels[idx..idx + BYTES_PER_PIXEL].copy_from_slice(&rgba);
                }
            }
        }
    }
}

/// Clamp a half-open span into `[0, limit]`.
fn clamp_span(start: i32, end: i32, limit: usize) -> (usize, usize) {
    let limit = i64::try_from(limit).unwrap_or(i64::MAX);
    let start = i64::from(start).clamp(0, limit);
    let end = i64::from(end).clamp(0, limit);
    (start as usize, end.max(start) as usize)
}
