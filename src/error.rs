use std::fmt;

use crate::math::Vector3;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything the renderer reports instead of drawing garbage.
#[derive(Debug)]
pub enum Error {
    /// Output surface with no pixels.
    InvalidDimensions { width: u32, height: u32 },
    /// Camera sits on its target, or no up direction can be derived for it.
    DegenerateView { eye: Vector3, target: Vector3 },
    /// A vertex landed on the projection singularity (w == 0).
    DegenerateProjection,
    /// Face refers to a vertex the mesh does not have.
    FaceIndexOutOfBounds { face: usize, index: usize, vertex_count: usize },
    Io(std::io::Error),
    Obj(obj::ObjError),
    Config(toml::de::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidDimensions { width, height } => {
                write!(f, "invalid output surface {}x{}", width, height)
            }
            Error::DegenerateView { eye, target } => write!(
                f,
                "degenerate camera: eye ({}, {}, {}) looking at ({}, {}, {})",
                eye.x, eye.y, eye.z, target.x, target.y, target.z
            ),
            Error::DegenerateProjection => write!(f, "vertex projects onto w = 0"),
            Error::FaceIndexOutOfBounds { face, index, vertex_count } => write!(
                f,
                "face {} refers to vertex {} but the mesh has {} vertices",
                face, index, vertex_count
            ),
            Error::Io(e) => write!(f, "io error: {}", e),
            Error::Obj(e) => write!(f, "obj error: {}", e),
            Error::Config(e) => write!(f, "config error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Obj(e) => Some(e),
            Error::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        return Error::Io(e);
    }
}

impl From<obj::ObjError> for Error {
    fn from(e: obj::ObjError) -> Self {
        return Error::Obj(e);
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        return Error::Config(e);
    }
}
