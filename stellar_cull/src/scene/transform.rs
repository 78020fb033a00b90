/// Object transform as read from the entity store.

use glam::{Mat3, Vec3};

/// Position, Euler rotation (radians) and per-axis scale of one entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    /// Rotation around X, Y and Z, in radians
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    /// Position 0, rotation 0, scale 1.
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Vec3::ZERO,
        scale: Vec3::ONE,
    };

    pub fn new(position: Vec3, rotation: Vec3, scale: Vec3) -> Self {
        Self { position, rotation, scale }
    }

    /// Translation only.
    pub fn from_position(position: Vec3) -> Self {
        Self { position, ..Self::IDENTITY }
    }

    /// Rotation matrix `Rx * Ry * Rz`.
    pub fn rotation_matrix(&self) -> Mat3 {
        Mat3::from_rotation_x(self.rotation.x)
            * Mat3::from_rotation_y(self.rotation.y)
            * Mat3::from_rotation_z(self.rotation.z)
    }
}

#[cfg(test)]
#[path = "transform_tests.rs"]
mod tests;
