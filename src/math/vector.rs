use nalgebra as na;

/// Float triple used for positions, normals and directions.
pub type Vector3 = na::Vector3<f32>;
/// Float pair used for texture coordinates.
pub type Vector2 = na::Vector2<f32>;

/// Lengths at or below this are treated as zero when normalizing.
pub const ZERO_TOLERANCE: f32 = 1e-6;

/// Unit vector in the direction of `v`.
/// Vectors shorter than `ZERO_TOLERANCE` are returned unchanged instead of blowing up.
pub fn normalize(v: Vector3) -> Vector3 {
    return v.try_normalize(ZERO_TOLERANCE).unwrap_or(v);
}
