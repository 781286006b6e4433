use std::sync::Arc;

use crate::error::{Error, Result};
use crate::math::{Vector2, Vector3};

/// Model-space vertex as supplied by a loader.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub coordinates: Vector3,
    pub normal: Vector3,
    pub texture_coordinates: Option<Vector2>,
}

impl Vertex {
    pub fn new(coordinates: Vector3, normal: Vector3) -> Self {
        return Self {
            coordinates,
            normal,
            texture_coordinates: None,
        };
    }
}

/// Vertex after projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedVertex {
    pub coordinates: Vector3,       // Screen x, y in pixels and view-space z for depth testing.
    pub normal: Vector3,            // World-space normal.
    pub world_coordinates: Vector3, // World-space position, used for lighting.
}

/// Triangle as three zero-based indices into the owning mesh's vertex array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Face {
    pub a: usize,
    pub b: usize,
    pub c: usize,
}

impl Face {
    pub fn new(a: usize, b: usize, c: usize) -> Self {
        return Self { a, b, c };
    }
}

/// Named mesh with its placement in the world.
/// Vertices and faces are immutable and shared, so render jobs can hold them without copying.
/// Position and rotation (x = pitch, y = yaw, z = roll) belong to the frame driver.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub name: String,
    pub position: Vector3,
    pub rotation: Vector3,
    vertices: Arc<[Vertex]>,
    faces: Arc<[Face]>,
}

impl Mesh {
    /// Builds a mesh, rejecting faces that index past the vertex array.
    pub fn new(name: impl Into<String>, vertices: Vec<Vertex>, faces: Vec<Face>) -> Result<Self> {
        for (face_index, face) in faces.iter().enumerate() {
            for index in [face.a, face.b, face.c] {
                if index >= vertices.len() {
                    return Err(Error::FaceIndexOutOfBounds {
                        face: face_index,
                        index,
                        vertex_count: vertices.len(),
                    });
                }
            }
        }

        return Ok(Self {
            name: name.into(),
            position: Vector3::zeros(),
            rotation: Vector3::zeros(),
            vertices: vertices.into(),
            faces: faces.into(),
        });
    }

    pub fn vertices(&self) -> &Arc<[Vertex]> {
        return &self.vertices;
    }

    pub fn faces(&self) -> &Arc<[Face]> {
        return &self.faces;
    }

    /// Axis aligned cube with side 2 centred on the origin, 4 vertices and 2 triangles per side
    /// so each side keeps its own flat normal.
    pub fn cube(name: impl Into<String>) -> Self {
        let sides = [
            Vector3::x(),
            -Vector3::x(),
            Vector3::y(),
            -Vector3::y(),
            Vector3::z(),
            -Vector3::z(),
        ];

        let mut vertices = Vec::with_capacity(24);
        let mut faces = Vec::with_capacity(12);
        for normal in sides {
            // Two axes spanning the side, ordered so corners wind consistently.
            let u = if normal.x.abs() > 0.5 { Vector3::y() } else { Vector3::x() };
            let v = normal.cross(&u);
            let base = vertices.len();
            for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
                vertices.push(Vertex::new(normal + u * su + v * sv, normal));
            }
            faces.push(Face::new(base, base + 1, base + 2));
            faces.push(Face::new(base, base + 2, base + 3));
        }

        return Self {
            name: name.into(),
            position: Vector3::zeros(),
            rotation: Vector3::zeros(),
            vertices: vertices.into(),
            faces: faces.into(),
        };
    }
}
