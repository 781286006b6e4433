//! Value-type math used by the pipeline: vectors, row-major matrices and the quaternion used to
//! build rotations.

mod matrix;
mod quaternion;
mod vector;

pub use matrix::Matrix;
pub use vector::{normalize, Vector2, Vector3, ZERO_TOLERANCE};
