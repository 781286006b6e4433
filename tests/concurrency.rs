use std::thread;

use scanline_renderer::device::{FrameBuffer, FAR_DEPTH};
use scanline_renderer::math::Vector3;
use scanline_renderer::scene::ProjectedVertex;
use scanline_renderer::shading::Color;
use scanline_renderer::{Camera, Device, Mesh, RenderSettings};

const SIZE: u32 = 64;
const TRIANGLES: usize = 48;

// Light right above the origin, normals facing it: every triangle keeps its exact colour.
fn light() -> Vector3 {
    return Vector3::new(0.0, 0.0, 10.0);
}

fn vertex(x: f32, y: f32, z: f32) -> ProjectedVertex {
    return ProjectedVertex {
        coordinates: Vector3::new(x, y, z),
        normal: Vector3::z(),
        world_coordinates: Vector3::zeros(),
    };
}

/// Overlapping triangles, triangle `id` sits at the flat depth `id + 1`.
fn triangle(id: usize) -> [ProjectedVertex; 3] {
    let z = (id + 1) as f32;
    let i = id as f32;
    return [
        vertex((id % 5) as f32 * 4.0, (id % 3) as f32 * 5.0, z),
        vertex(63.0 - (id % 7) as f32, 8.0 + (id % 4) as f32 * 3.0, z),
        vertex(4.0 + (i * 1.3) % 20.0, 63.0 - (id % 5) as f32, z),
    ];
}

fn color(id: usize) -> Color {
    return Color::new((id * 5) as u8, 255 - id as u8, (id * 3) as u8, 255);
}

fn draw(buffer: &FrameBuffer, id: usize) {
    let [a, b, c] = triangle(id);
    buffer.draw_triangle(a, b, c, color(id), light());
}

#[test]
fn racing_writers_keep_color_and_depth_together() {
    let reference = FrameBuffer::new(SIZE, SIZE);
    for id in 0..TRIANGLES {
        draw(&reference, id);
    }

    let buffer = FrameBuffer::new(SIZE, SIZE);
    for round in 0..10 {
        buffer.clear(Color::BLACK);
        let threads = 2 + round % 7;
        thread::scope(|s| {
            for k in 0..threads {
                let buffer = &buffer;
                s.spawn(move || {
                    // Alternate directions so writers meet on the same pixels from both ends.
                    let ids: Vec<usize> = (0..TRIANGLES).filter(|id| id % threads == k).collect();
                    if k % 2 == 0 {
                        ids.iter().for_each(|&id| draw(buffer, id));
                    } else {
                        ids.iter().rev().for_each(|&id| draw(buffer, id));
                    }
                });
            }
        });

        for y in 0..SIZE as usize {
            for x in 0..SIZE as usize {
                let texel = buffer.texel_at(x, y);
                assert_eq!(texel.depth, reference.depth_at(x, y), "depth at ({}, {})", x, y);
                if texel.depth != FAR_DEPTH {
                    let owner = texel.depth as usize - 1;
                    assert_eq!(texel.color, color(owner), "colour at ({}, {})", x, y);
                }
            }
        }
    }
}

#[test]
fn worker_count_does_not_change_the_depth_buffer() {
    let mut meshes = vec![Mesh::cube("a"), Mesh::cube("b")];
    meshes[0].rotation = Vector3::new(0.4, 0.7, 0.1);
    meshes[1].position = Vector3::new(1.5, -0.5, -2.0);
    meshes[1].rotation = Vector3::new(-0.3, 1.1, 0.0);
    let camera = Camera::default();

    let mut depths = Vec::new();
    for threads in [1, 8] {
        let settings = RenderSettings {
            threads: Some(threads),
            ..Default::default()
        };
        let mut device = Device::with_settings(SIZE, SIZE, settings).unwrap();
        device.clear(0, 0, 0, 255);
        device.render(&camera, &meshes).unwrap();
        depths.push(device.depth_buffer().to_vec());
    }

    assert!(depths[0].iter().any(|&z| z != FAR_DEPTH));
    assert_eq!(depths[0], depths[1]);
}

#[test]
fn device_can_be_reused_across_frames() {
    let mut device = Device::new(SIZE, SIZE).unwrap();
    let mut mesh = Mesh::cube("cube");
    for _ in 0..3 {
        device.clear(0, 0, 0, 255);
        device.render(&Camera::default(), std::slice::from_ref(&mesh)).unwrap();
        // Spinning about z keeps the front face at the same depth.
        let closest = device.depth_buffer().iter().fold(FAR_DEPTH, |a, &b| a.min(b));
        assert!((closest - 9.0).abs() < 1e-3, "{}", closest);
        mesh.rotation.z += 0.3;
    }
}
