//! CPU 2D rendering for the task surface.
//!
//! The task only ever draws a cleared background and one filled disk, so the
//! renderer stays a plain RGBA raster path. Antialiasing is done per pixel by
//! subsampling the disk edge; the sample count comes straight from the
//! configured antialiasing level.

use serde::{Deserialize, Serialize};

pub type Color = [u8; 4];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub const fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn rgba_len(self) -> usize {
        (self.width as usize)
            .saturating_mul(self.height as usize)
            .saturating_mul(4)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_size(w: u32, h: u32) -> Self {
        Self { x: 0, y: 0, w, h }
    }
}

/// Drawing surface for one frame.
///
/// `fill_disk` positions the disk by the top-left corner of its bounding box,
/// not its center; the session's hit geometry is written against the same
/// convention.
pub trait Renderer2d {
    fn begin_frame(&mut self, size: SurfaceSize);
    fn size(&self) -> SurfaceSize;

    /// Opaque fill, clipped to the surface.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Antialiased opaque disk. `origin` is the bounding-box corner in window
    /// coordinates (may be off-surface; the disk is clipped). `aa_samples` is
    /// the number of subsamples per edge pixel; 1 disables smoothing.
    fn fill_disk(&mut self, origin: (i32, i32), radius: u32, color: Color, aa_samples: u32);

    fn clear(&mut self, color: Color) {
        let s = self.size();
        self.fill_rect(Rect::from_size(s.width, s.height), color);
    }
}

/// Renderer that draws into a borrowed RGBA frame buffer.
pub struct CpuRenderer<'a> {
    frame: &'a mut [u8],
    size: SurfaceSize,
}

impl<'a> CpuRenderer<'a> {
    pub fn new(frame: &'a mut [u8], size: SurfaceSize) -> Self {
        Self { frame, size }
    }

    fn put_pixel(&mut self, x: u32, y: u32, color: Color) {
        let idx = ((y as usize * self.size.width as usize) + x as usize) * 4;
        if idx + 4 <= self.frame.len() {
            self.frame[idx..idx + 4].copy_from_slice(&color);
        }
    }

    fn blend_pixel(&mut self, x: u32, y: u32, color: Color, coverage: f64) {
        if coverage <= 0.0 {
            return;
        }
        if coverage >= 1.0 {
            self.put_pixel(x, y, color);
            return;
        }
        let idx = ((y as usize * self.size.width as usize) + x as usize) * 4;
        if idx + 4 > self.frame.len() {
            return;
        }
        let a = (coverage * 255.0).round() as u32;
        let inv = 255 - a;
        for ch in 0..3 {
            let dst = self.frame[idx + ch] as u32;
            let src = color[ch] as u32;
            self.frame[idx + ch] = ((dst * inv + src * a + 127) / 255) as u8;
        }
        self.frame[idx + 3] = 255;
    }
}

/// Side length of the subsample grid for a given antialiasing level.
///
/// Levels are sample counts (16 means a 4x4 grid); anything that is not a
/// perfect square rounds to the nearest grid.
fn aa_grid(aa_samples: u32) -> u32 {
    ((aa_samples.max(1) as f64).sqrt().round() as u32).max(1)
}

impl Renderer2d for CpuRenderer<'_> {
    fn begin_frame(&mut self, size: SurfaceSize) {
        self.size = size;
    }

    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        if self.size.is_empty() || self.frame.len() < self.size.rgba_len() {
            return;
        }
        let max_x = rect.x.saturating_add(rect.w).min(self.size.width);
        let max_y = rect.y.saturating_add(rect.h).min(self.size.height);
        if rect.x >= max_x || rect.y >= max_y {
            return;
        }

        let stride = self.size.width as usize * 4;
        for y in rect.y..max_y {
            let row_start = y as usize * stride + rect.x as usize * 4;
            let row_end = y as usize * stride + max_x as usize * 4;
            for px in self.frame[row_start..row_end].chunks_exact_mut(4) {
                px.copy_from_slice(&color);
            }
        }
    }

    fn fill_disk(&mut self, origin: (i32, i32), radius: u32, color: Color, aa_samples: u32) {
        if radius == 0 || self.size.is_empty() || self.frame.len() < self.size.rgba_len() {
            return;
        }

        let r = radius as f64;
        let cx = origin.0 as f64 + r;
        let cy = origin.1 as f64 + r;
        let diameter = (radius * 2) as i64;

        let min_x = origin.0.max(0) as i64;
        let min_y = origin.1.max(0) as i64;
        let max_x = (origin.0 as i64 + diameter).min(self.size.width as i64);
        let max_y = (origin.1 as i64 + diameter).min(self.size.height as i64);
        if min_x >= max_x || min_y >= max_y {
            return;
        }

        let grid = aa_grid(aa_samples);
        let step = 1.0 / grid as f64;
        // Half the diagonal of a pixel: past this margin a pixel is entirely
        // inside or entirely outside the disk.
        let margin = std::f64::consts::SQRT_2 / 2.0;

        for py in min_y..max_y {
            for px in min_x..max_x {
                let dx = (px as f64 + 0.5) - cx;
                let dy = (py as f64 + 0.5) - cy;
                let dist = (dx * dx + dy * dy).sqrt();

                if dist <= r - margin {
                    self.put_pixel(px as u32, py as u32, color);
                    continue;
                }
                if dist >= r + margin {
                    continue;
                }

                if grid == 1 {
                    if dist < r {
                        self.put_pixel(px as u32, py as u32, color);
                    }
                    continue;
                }

                let mut hits = 0u32;
                for sy in 0..grid {
                    for sx in 0..grid {
                        let sdx = (px as f64 + (sx as f64 + 0.5) * step) - cx;
                        let sdy = (py as f64 + (sy as f64 + 0.5) * step) - cy;
                        if sdx * sdx + sdy * sdy < r * r {
                            hits += 1;
                        }
                    }
                }
                let coverage = hits as f64 / (grid * grid) as f64;
                self.blend_pixel(px as u32, py as u32, color, coverage);
            }
        }
    }
}
