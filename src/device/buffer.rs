use parking_lot::Mutex;

use crate::shading::Color;

/// Depth of a pixel nothing has been drawn to since the last clear.
pub const FAR_DEPTH: f32 = f32::MAX;

/// What one pixel holds: the closest depth drawn so far and the colour that came with it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Texel {
    pub depth: f32,
    pub color: Color,
}

/// Colour and depth buffer shared by every in-flight triangle.
/// Each pixel sits behind its own lock, so the depth test and the write that follows are one
/// step for any two writers of the same pixel, while writers of different pixels never meet.
pub struct FrameBuffer {
    pub width: u32,
    pub height: u32,
    texels: Vec<Mutex<Texel>>,
}

impl FrameBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        let n_pixels = width as usize * height as usize;
        let texels = (0..n_pixels)
            .map(|_| Mutex::new(Texel { depth: FAR_DEPTH, color: Color::default() }))
            .collect();
        return Self { width, height, texels };
    }

    /// Fills every pixel with `color` and resets its depth to `FAR_DEPTH`.
    pub fn clear(&self, color: Color) {
        for texel in &self.texels {
            *texel.lock() = Texel { depth: FAR_DEPTH, color };
        }
    }

    fn index(&self, x: usize, y: usize) -> usize {
        return x + y * self.width as usize;
    }

    /// Depth-tested write. Candidates further away than what is stored are discarded,
    /// equal depths overwrite.
    /// Coordinates must be inside the buffer, `draw_point` does the clipping.
    pub fn put_pixel(&self, x: usize, y: usize, z: f32, color: Color) {
        let mut texel = self.texels[self.index(x, y)].lock();
        if texel.depth < z {
            return;
        }
        texel.depth = z;
        texel.color = color;
    }

    pub fn texel_at(&self, x: usize, y: usize) -> Texel {
        return *self.texels[self.index(x, y)].lock();
    }

    pub fn depth_at(&self, x: usize, y: usize) -> f32 {
        return self.texel_at(x, y).depth;
    }

    pub fn color_at(&self, x: usize, y: usize) -> Color {
        return self.texel_at(x, y).color;
    }

    /// Copies colours into `out` as row-major rgba8, 4 bytes per pixel.
    pub fn write_color_bytes(&self, out: &mut [u8]) {
        for (texel, pixel) in self.texels.iter().zip(out.chunks_exact_mut(4)) {
            pixel.copy_from_slice(&texel.lock().color.to_bytes());
        }
    }

    /// Copies depths into `out`, one float per pixel.
    pub fn write_depth(&self, out: &mut [f32]) {
        for (texel, depth) in self.texels.iter().zip(out.iter_mut()) {
            *depth = texel.lock().depth;
        }
    }
}
