//! Scanline triangle fill with interpolated depth and Gouraud lighting.

use super::buffer::FrameBuffer;
use crate::math::Vector3;
use crate::scene::ProjectedVertex;
use crate::shading::{compute_n_dot_l, Color};

/// Linear blend between `min` and `max`. The gradient is clamped to [0, 1] so tiny overshoot at
/// triangle boundaries is absorbed.
pub fn interpolate(min: f32, max: f32, gradient: f32) -> f32 {
    return min + (max - min) * gradient.clamp(0.0, 1.0);
}

/// Current row and the light intensities at the ends of the two edges bounding it.
/// a -> b is the left edge, c -> d the right one.
#[derive(Debug, Clone, Copy)]
struct ScanLineData {
    current_y: i32,
    n_dot_l_a: f32,
    n_dot_l_b: f32,
    n_dot_l_c: f32,
    n_dot_l_d: f32,
}

/// Position of `y` along the edge `start -> end`, forced to 1 on horizontal edges.
fn edge_gradient(y: f32, start: Vector3, end: Vector3) -> f32 {
    if start.y == end.y {
        return 1.0;
    }
    return (y - start.y) / (end.y - start.y);
}

/// Whether the middle vertex lies on the right boundary of a y-sorted triangle.
fn middle_is_on_right(p1: Vector3, p2: Vector3, p3: Vector3) -> bool {
    if p2.y > p1.y {
        let slope_12 = (p2.x - p1.x) / (p2.y - p1.y);
        let slope_13 = if p3.y > p1.y { (p3.x - p1.x) / (p3.y - p1.y) } else { 0.0 };
        return slope_12 > slope_13;
    }
    // Flat top, both slopes degenerate: the x order of the top edge decides.
    return p2.x > p1.x;
}

impl FrameBuffer {
    /// Clips to the buffer and forwards to `put_pixel`.
    pub fn draw_point(&self, point: Vector3, color: Color) {
        if point.x >= 0.0 && point.y >= 0.0 && point.x < self.width as f32 && point.y < self.height as f32 {
            self.put_pixel(point.x as usize, point.y as usize, point.z, color);
        }
    }

    /// Fills the span of row `data.current_y` between edges a -> b and c -> d.
    fn process_scan_line(
        &self,
        data: &ScanLineData,
        va: &ProjectedVertex, vb: &ProjectedVertex,
        vc: &ProjectedVertex, vd: &ProjectedVertex,
        color: Color,
    ) {
        let pa = va.coordinates;
        let pb = vb.coordinates;
        let pc = vc.coordinates;
        let pd = vd.coordinates;
        let y = data.current_y as f32;

        let gradient_1 = edge_gradient(y, pa, pb);
        let gradient_2 = edge_gradient(y, pc, pd);

        // Kept as floats: vertices near the eye plane project far outside the i32 range.
        let sx = interpolate(pa.x, pb.x, gradient_1).floor();
        let ex = interpolate(pc.x, pd.x, gradient_2).floor();

        let z1 = interpolate(pa.z, pb.z, gradient_1);
        let z2 = interpolate(pc.z, pd.z, gradient_2);

        let start_n_dot_l = interpolate(data.n_dot_l_a, data.n_dot_l_b, gradient_1);
        let end_n_dot_l = interpolate(data.n_dot_l_c, data.n_dot_l_d, gradient_2);

        // Pixels left or right of the buffer would be clipped anyway.
        let first_x = sx.max(0.0) as u32;
        let last_x = ex.min(self.width as f32) as u32;
        for x in first_x..last_x {
            let gradient = (x as f32 - sx) / (ex - sx);
            let z = interpolate(z1, z2, gradient);
            let n_dot_l = interpolate(start_n_dot_l, end_n_dot_l, gradient);
            self.draw_point(Vector3::new(x as f32, y, z), color.shade(n_dot_l));
        }
    }

    /// Rasterizes a screen-space triangle, lighting each vertex from `light_position` and
    /// interpolating depth and intensity across the interior.
    pub fn draw_triangle(
        &self,
        v1: ProjectedVertex,
        v2: ProjectedVertex,
        v3: ProjectedVertex,
        color: Color,
        light_position: Vector3,
    ) {
        // Sorting so that p1 is the top of the screen, p3 the bottom and p2 in between.
        let (mut v1, mut v2, mut v3) = (v1, v2, v3);
        if v1.coordinates.y > v2.coordinates.y {
            std::mem::swap(&mut v1, &mut v2);
        }
        if v2.coordinates.y > v3.coordinates.y {
            std::mem::swap(&mut v2, &mut v3);
        }
        if v1.coordinates.y > v2.coordinates.y {
            std::mem::swap(&mut v1, &mut v2);
        }

        let p1 = v1.coordinates;
        let p2 = v2.coordinates;
        let p3 = v3.coordinates;

        let nl1 = compute_n_dot_l(v1.world_coordinates, v1.normal, light_position);
        let nl2 = compute_n_dot_l(v2.world_coordinates, v2.normal, light_position);
        let nl3 = compute_n_dot_l(v3.world_coordinates, v3.normal, light_position);

        let middle_on_right = middle_is_on_right(p1, p2, p3);

        // Rows off the buffer produce nothing, skip them up front.
        let first_y = (p1.y.floor() as i32).max(0);
        let last_y = (p3.y.floor() as i32).min(self.height as i32 - 1);
        for y in first_y..=last_y {
            let upper = (y as f32) < p2.y;
            let data = |a, b, c, d| ScanLineData {
                current_y: y,
                n_dot_l_a: a,
                n_dot_l_b: b,
                n_dot_l_c: c,
                n_dot_l_d: d,
            };
            match (middle_on_right, upper) {
                // p1 -> p3 on the left, p2 on the right.
                (true, true) => self.process_scan_line(&data(nl1, nl3, nl1, nl2), &v1, &v3, &v1, &v2, color),
                (true, false) => self.process_scan_line(&data(nl1, nl3, nl2, nl3), &v1, &v3, &v2, &v3, color),
                // p2 on the left, p1 -> p3 on the right.
                (false, true) => self.process_scan_line(&data(nl1, nl2, nl1, nl3), &v1, &v2, &v1, &v3, color),
                (false, false) => self.process_scan_line(&data(nl2, nl3, nl1, nl3), &v2, &v3, &v1, &v3, color),
            }
        }
    }
}
