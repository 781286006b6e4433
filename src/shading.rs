//! Colours and per-vertex Lambertian lighting.

use crate::math::{normalize, Vector3};

/// Raw rgba8 pixel data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0,   g: 0,   b: 0,   a: 255 };
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255, a: 255 };

    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        return Self { r, g, b, a };
    }

    /// Opaque gray from a level in [0.0, 1.0].
    pub fn from_gray(level: f32) -> Self {
        let value = (level.clamp(0.0, 1.0) * 255.0) as u8;
        return Self::new(value, value, value, 255);
    }

    /// Get convex combination of two colors: t * c_1 + (1 - t) * c_2.
    /// t is unrestricted, channels saturate. Alpha is taken from c_1.
    pub fn blend(color_1: Color, color_2: Color, t: f32) -> Color {
        return Color {
            r: (t * color_1.r as f32 + (1.0 - t) * color_2.r as f32) as u8,
            g: (t * color_1.g as f32 + (1.0 - t) * color_2.g as f32) as u8,
            b: (t * color_1.b as f32 + (1.0 - t) * color_2.b as f32) as u8,
            a: color_1.a,
        };
    }

    /// Colour scaled by a light intensity, i.e. blended towards black.
    pub fn shade(self, intensity: f32) -> Color {
        return Color::blend(self, Color::BLACK, intensity);
    }

    pub fn to_bytes(self) -> [u8; 4] {
        return [self.r, self.g, self.b, self.a];
    }
}

/// Cosine between the normal and the direction towards the light, clamped to [0, 1].
/// Zero length normals stay zero and produce a fully shadowed vertex.
pub fn compute_n_dot_l(world_position: Vector3, world_normal: Vector3, light_position: Vector3) -> f32 {
    let light_direction = normalize(light_position - world_position);
    let normal = normalize(world_normal);
    return normal.dot(&light_direction).max(0.0);
}

/// Flat debug colour for a face: a gray ramp from 0.25 to 1.0 across the mesh.
pub fn face_color(face_index: usize, face_count: usize) -> Color {
    if face_count == 0 {
        return Color::from_gray(0.25);
    }
    let level = 0.25 + (face_index % face_count) as f32 * 0.75 / face_count as f32;
    return Color::from_gray(level);
}
