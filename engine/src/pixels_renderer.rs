use pixels::Pixels;

use crate::graphics::{CpuRenderer, Renderer2d, SurfaceSize};

/// Headful presenter built on `pixels`.
///
/// The task draws via `Renderer2d` into the RGBA buffer; this type owns the
/// buffer/surface plumbing and the final present.
pub struct PixelsRenderer {
    pixels: Pixels,
    size: SurfaceSize,
}

impl PixelsRenderer {
    pub fn new(mut pixels: Pixels, size: SurfaceSize) -> Result<Self, pixels::Error> {
        pixels.resize_buffer(size.width, size.height)?;
        Ok(Self { pixels, size })
    }

    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    pub fn resize(&mut self, size: SurfaceSize) -> Result<(), pixels::Error> {
        self.size = size;
        self.pixels.resize_surface(size.width, size.height)?;
        Ok(self.pixels.resize_buffer(size.width, size.height)?)
    }

    pub fn draw_frame<F, R>(&mut self, f: F) -> R
    where
        F: FnOnce(&mut dyn Renderer2d) -> R,
    {
        let mut cpu = CpuRenderer::new(self.pixels.frame_mut(), self.size);
        cpu.begin_frame(self.size);
        f(&mut cpu)
    }

    pub fn present(&mut self) -> Result<(), pixels::Error> {
        self.pixels.render()
    }
}
