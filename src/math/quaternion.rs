use nalgebra as na;

/// Quaternion for the given yaw (around Y), pitch (around X) and roll (around Z), in radians.
/// Only used as an intermediate step when building rotation matrices.
pub(crate) fn yaw_pitch_roll(yaw: f32, pitch: f32, roll: f32) -> na::Quaternion<f32> {
    let (sin_roll, cos_roll) = (roll * 0.5).sin_cos();
    let (sin_pitch, cos_pitch) = (pitch * 0.5).sin_cos();
    let (sin_yaw, cos_yaw) = (yaw * 0.5).sin_cos();

    let x = cos_yaw * sin_pitch * cos_roll + sin_yaw * cos_pitch * sin_roll;
    let y = sin_yaw * cos_pitch * cos_roll - cos_yaw * sin_pitch * sin_roll;
    let z = cos_yaw * cos_pitch * sin_roll - sin_yaw * sin_pitch * cos_roll;
    let w = cos_yaw * cos_pitch * cos_roll + sin_yaw * sin_pitch * sin_roll;

    // nalgebra takes the scalar part first.
    return na::Quaternion::new(w, x, y, z);
}
