use crate::math::Vector3;

/// Eye position and look-at target. Read once per render call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vector3,
    pub target: Vector3,
}

impl Camera {
    pub fn new(position: Vector3, target: Vector3) -> Self {
        return Self { position, target };
    }
}

impl Default for Camera {
    fn default() -> Self {
        return Self::new(Vector3::new(0.0, 0.0, 10.0), Vector3::zeros());
    }
}
