//! Scene model consumed by the device: meshes, their vertices and faces, and the camera.

mod camera;
pub mod loader;
mod mesh;

pub use camera::Camera;
pub use mesh::{Face, Mesh, ProjectedVertex, Vertex};
