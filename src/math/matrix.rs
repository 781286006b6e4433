use std::ops::Mul;

use na::{Matrix4, Quaternion};
use nalgebra as na;

use super::quaternion;
use super::vector::{Vector3, ZERO_TOLERANCE};
use crate::error::{Error, Result};

/// 4x4 transform read as row-major M11..M44 with the row-vector convention (v' = v * M),
/// so transforms compose left to right: world * view * projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix(Matrix4<f32>);

impl Default for Matrix {
    fn default() -> Self {
        return Self::identity();
    }
}

impl Matrix {
    pub fn identity() -> Self {
        return Self(Matrix4::identity());
    }

    /// Builds a matrix from 16 values in row-major order.
    pub fn from_rows(values: [f32; 16]) -> Self {
        return Self(Matrix4::from_row_slice(&values));
    }

    /// The 16 values in row-major order.
    pub fn to_rows(&self) -> [f32; 16] {
        let mut values = [0.0; 16];
        for row in 0..4 {
            for column in 0..4 {
                values[row * 4 + column] = self.0[(row, column)];
            }
        }
        return values;
    }

    pub fn translation(offset: Vector3) -> Self {
        let mut m = Matrix4::identity();
        m[(3, 0)] = offset.x;
        m[(3, 1)] = offset.y;
        m[(3, 2)] = offset.z;
        return Self(m);
    }

    /// Left-handed look-at view matrix.
    /// Fails when the eye sits on the target or `up` is parallel to the viewing direction, since
    /// no camera basis exists in either case.
    pub fn look_at_lh(eye: Vector3, target: Vector3, up: Vector3) -> Result<Self> {
        let forward = target - eye;
        if forward.norm() <= ZERO_TOLERANCE {
            return Err(Error::DegenerateView { eye, target });
        }
        let z_axis = forward.normalize();
        let side = up.cross(&z_axis);
        if side.norm() <= ZERO_TOLERANCE {
            return Err(Error::DegenerateView { eye, target });
        }
        let x_axis = side.normalize();
        let y_axis = z_axis.cross(&x_axis);

        #[rustfmt::skip]
        let m = Matrix4::new(
            x_axis.x,          y_axis.x,          z_axis.x,          0.0,
            x_axis.y,          y_axis.y,          z_axis.y,          0.0,
            x_axis.z,          y_axis.z,          z_axis.z,          0.0,
            -x_axis.dot(&eye), -y_axis.dot(&eye), -z_axis.dot(&eye), 1.0,
        );
        return Ok(Self(m));
    }

    /// Right-handed perspective projection from a vertical field of view in radians.
    pub fn perspective_fov_rh(fov: f32, aspect: f32, znear: f32, zfar: f32) -> Self {
        let y_scale = 1.0 / (fov * 0.5).tan();
        let q = zfar / (znear - zfar);

        #[rustfmt::skip]
        let m = Matrix4::new(
            y_scale / aspect, 0.0,     0.0,       0.0,
            0.0,              y_scale, 0.0,       0.0,
            0.0,              0.0,     q,         -1.0,
            0.0,              0.0,     q * znear, 0.0,
        );
        return Self(m);
    }

    /// Rotation around Y (yaw), X (pitch) and Z (roll), built through a quaternion.
    pub fn rotation_yaw_pitch_roll(yaw: f32, pitch: f32, roll: f32) -> Self {
        return Self::rotation_quaternion(&quaternion::yaw_pitch_roll(yaw, pitch, roll));
    }

    fn rotation_quaternion(rotation: &Quaternion<f32>) -> Self {
        let (x, y, z, w) = (rotation.i, rotation.j, rotation.k, rotation.w);
        let xx = x * x;
        let yy = y * y;
        let zz = z * z;
        let xy = x * y;
        let zw = z * w;
        let zx = z * x;
        let yw = y * w;
        let yz = y * z;
        let xw = x * w;

        #[rustfmt::skip]
        let m = Matrix4::new(
            1.0 - 2.0 * (yy + zz), 2.0 * (xy + zw),       2.0 * (zx - yw),       0.0,
            2.0 * (xy - zw),       1.0 - 2.0 * (zz + xx), 2.0 * (yz + xw),       0.0,
            2.0 * (zx + yw),       2.0 * (yz - xw),       1.0 - 2.0 * (yy + xx), 0.0,
            0.0,                   0.0,                   0.0,                   1.0,
        );
        return Self(m);
    }

    /// Transforms a point (w = 1) and applies the perspective divide.
    /// A zero w, or a divide that yields non-finite values, is reported instead of leaking NaNs.
    pub fn transform_coordinate(&self, point: Vector3) -> Result<Vector3> {
        let h = self.0.tr_mul(&point.push(1.0));
        if h.w == 0.0 {
            return Err(Error::DegenerateProjection);
        }
        let result = Vector3::new(h.x / h.w, h.y / h.w, h.z / h.w);
        if !result.iter().all(|c| c.is_finite()) {
            return Err(Error::DegenerateProjection);
        }
        return Ok(result);
    }

    /// Transforms a direction (w = 0): rotation and scale apply, translation does not.
    pub fn transform_normal(&self, normal: Vector3) -> Vector3 {
        let h = self.0.tr_mul(&normal.push(0.0));
        return Vector3::new(h.x, h.y, h.z);
    }
}

impl Mul for Matrix {
    type Output = Matrix;

    fn mul(self, rhs: Matrix) -> Matrix {
        return Matrix(self.0 * rhs.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: Vector3, b: Vector3) {
        assert!((a - b).norm() < 1e-4, "{:?} != {:?}", a, b);
    }

    #[test]
    fn identity_is_neutral() {
        let m = Matrix::rotation_yaw_pitch_roll(0.4, 0.1, -0.3) * Matrix::translation(Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(m * Matrix::identity(), m);
        assert_eq!(Matrix::identity() * m, m);
    }

    #[test]
    fn rows_round_trip() {
        let values: [f32; 16] = core::array::from_fn(|i| i as f32);
        assert_eq!(Matrix::from_rows(values).to_rows(), values);
    }

    #[test]
    fn translation_lives_in_fourth_row() {
        let rows = Matrix::translation(Vector3::new(4.0, 5.0, 6.0)).to_rows();
        assert_eq!(&rows[12..15], &[4.0, 5.0, 6.0]);
        let p = Matrix::translation(Vector3::new(4.0, 5.0, 6.0))
            .transform_coordinate(Vector3::new(1.0, 1.0, 1.0))
            .unwrap();
        assert_close(p, Vector3::new(5.0, 6.0, 7.0));
    }

    #[test]
    fn composition_applies_left_operand_first() {
        // Rotate a quarter turn around Y, then translate along X.
        let m = Matrix::rotation_yaw_pitch_roll(std::f32::consts::FRAC_PI_2, 0.0, 0.0)
            * Matrix::translation(Vector3::new(10.0, 0.0, 0.0));
        let p = m.transform_coordinate(Vector3::x()).unwrap();
        assert_close(p, Vector3::new(10.0, 0.0, -1.0));
    }

    #[test]
    fn yaw_rotates_x_towards_negative_z() {
        let m = Matrix::rotation_yaw_pitch_roll(std::f32::consts::FRAC_PI_2, 0.0, 0.0);
        assert_close(m.transform_normal(Vector3::x()), Vector3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn pitch_rotates_y_towards_positive_z() {
        let m = Matrix::rotation_yaw_pitch_roll(0.0, std::f32::consts::FRAC_PI_2, 0.0);
        assert_close(m.transform_normal(Vector3::y()), Vector3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn transform_normal_ignores_translation() {
        let m = Matrix::translation(Vector3::new(3.0, 3.0, 3.0));
        assert_close(m.transform_normal(Vector3::z()), Vector3::z());
    }

    #[test]
    fn look_at_puts_target_on_positive_z_axis() {
        let eye = Vector3::new(0.0, 0.0, 10.0);
        let view = Matrix::look_at_lh(eye, Vector3::zeros(), Vector3::y()).unwrap();
        assert_close(view.transform_coordinate(Vector3::zeros()).unwrap(), Vector3::new(0.0, 0.0, 10.0));
        assert_close(view.transform_coordinate(eye).unwrap(), Vector3::zeros());
    }

    #[test]
    fn look_at_rejects_degenerate_cameras() {
        let eye = Vector3::new(1.0, 2.0, 3.0);
        assert!(matches!(
            Matrix::look_at_lh(eye, eye, Vector3::y()),
            Err(Error::DegenerateView { .. })
        ));
        assert!(matches!(
            Matrix::look_at_lh(Vector3::new(0.0, 5.0, 0.0), Vector3::zeros(), Vector3::y()),
            Err(Error::DegenerateView { .. })
        ));
    }

    #[test]
    fn perspective_layout() {
        let rows = Matrix::perspective_fov_rh(std::f32::consts::FRAC_PI_2, 2.0, 0.5, 10.0).to_rows();
        let q = 10.0 / (0.5 - 10.0);
        assert!((rows[0] - 0.5).abs() < 1e-6);
        assert!((rows[5] - 1.0).abs() < 1e-6);
        assert!((rows[10] - q).abs() < 1e-6);
        assert_eq!(rows[11], -1.0);
        assert!((rows[14] - q * 0.5).abs() < 1e-6);
        assert_eq!(rows[15], 0.0);
    }

    #[test]
    fn perspective_divides_by_view_depth() {
        let projection = Matrix::perspective_fov_rh(std::f32::consts::FRAC_PI_2, 1.0, 0.01, 1.0);
        let near = projection.transform_coordinate(Vector3::new(1.0, 1.0, 2.0)).unwrap();
        let far = projection.transform_coordinate(Vector3::new(1.0, 1.0, 4.0)).unwrap();
        // w = -z, so points further away shrink towards the centre.
        assert!((near.x + 0.5).abs() < 1e-5);
        assert!((far.x + 0.25).abs() < 1e-5);
    }

    #[test]
    fn zero_w_is_an_error() {
        let projection = Matrix::perspective_fov_rh(0.78, 1.0, 0.01, 1.0);
        assert!(matches!(
            projection.transform_coordinate(Vector3::new(1.0, 1.0, 0.0)),
            Err(Error::DegenerateProjection)
        ));
    }
}
