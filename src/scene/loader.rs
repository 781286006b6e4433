//! Wavefront OBJ loading through `obj-rs`. The file format itself is the crate's business; this
//! only turns its vertex and index arrays into a `Mesh`.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use obj::raw::object::Polygon;
use obj::raw::parse_obj;
use obj::{Obj, TexturedVertex};
use tracing::debug;

use super::{Face, Mesh, Vertex};
use crate::error::Result;
use crate::math::{Vector2, Vector3};

/// Loads a triangulated OBJ file with vertex normals.
pub fn load_obj_file<P: AsRef<Path>>(path: P) -> Result<Mesh> {
    let path = path.as_ref();
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    return load_obj_reader(name, BufReader::new(File::open(path)?));
}

/// Same as `load_obj_file` for an already opened source.
/// Texture coordinates are kept when every face carries them along with its normals.
pub fn load_obj_reader<R: BufRead>(name: String, input: R) -> Result<Mesh> {
    let raw = parse_obj(input)?;
    let textured = !raw.polygons.is_empty()
        && raw.polygons.iter().all(|polygon| matches!(polygon, Polygon::PTN(_)));

    let (model_name, vertices, indices) = if textured {
        let model: Obj<TexturedVertex, u32> = Obj::new(raw)?;
        let vertices = model
            .vertices
            .iter()
            .map(|v| Vertex {
                texture_coordinates: Some(Vector2::new(v.texture[0], v.texture[1])),
                ..Vertex::new(Vector3::from(v.position), Vector3::from(v.normal))
            })
            .collect::<Vec<_>>();
        (model.name, vertices, model.indices)
    } else {
        let model: Obj<obj::Vertex, u32> = Obj::new(raw)?;
        let vertices = model
            .vertices
            .iter()
            .map(|v| Vertex::new(Vector3::from(v.position), Vector3::from(v.normal)))
            .collect::<Vec<_>>();
        (model.name, vertices, model.indices)
    };
    debug!(
        "loaded {}: {} vertices, {} indices, textured: {}",
        name,
        vertices.len(),
        indices.len(),
        textured
    );

    let faces = indices
        .chunks_exact(3)
        .map(|i| Face::new(i[0] as usize, i[1] as usize, i[2] as usize))
        .collect();

    return Mesh::new(model_name.unwrap_or(name), vertices, faces);
}
