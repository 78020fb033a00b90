/// Axis-aligned bounding boxes and the local → world re-bounding step.

use glam::Vec3;
use super::transform::Transform;

/// Axis-Aligned Bounding Box
///
/// Mesh bounds are stored in local space; a world-space box is derived from
/// them once per object per culling pass and never cached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    /// Minimum corner (x, y, z)
    pub min: Vec3,
    /// Maximum corner (x, y, z)
    pub max: Vec3,
}

impl AABB {
    /// Create a box from its two extreme corners.
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Box centered on `center` extending `half_extent` along each axis.
    pub fn from_center_half_extent(center: Vec3, half_extent: Vec3) -> Self {
        Self {
            min: center - half_extent,
            max: center + half_extent,
        }
    }

    /// The 8 corners, every min/max combination.
    pub fn corners(&self) -> [Vec3; 8] {
        let (lo, hi) = (self.min, self.max);
        [
            Vec3::new(lo.x, lo.y, lo.z),
            Vec3::new(hi.x, lo.y, lo.z),
            Vec3::new(lo.x, hi.y, lo.z),
            Vec3::new(hi.x, hi.y, lo.z),
            Vec3::new(lo.x, lo.y, hi.z),
            Vec3::new(hi.x, lo.y, hi.z),
            Vec3::new(lo.x, hi.y, hi.z),
            Vec3::new(hi.x, hi.y, hi.z),
        ]
    }

    /// Map this local-space box through an object transform and re-bound it.
    ///
    /// Seeds the result with the world position, then for each output axis
    /// `i` and input axis `j` accumulates the min/max of
    /// `R[j][i] * min[j] * |scale[i]|` and `R[j][i] * max[j] * |scale[i]|`,
    /// where `R[j]` is column `j` of the rotation matrix.
    ///
    /// The result always contains the transformed box but is not tight for
    /// rotated boxes. The compaction kernel runs the exact same arithmetic.
    pub fn transformed_by(&self, transform: &Transform) -> AABB {
        let rotation = transform.rotation_matrix();
        let scale = transform.scale.abs();

        let mut new_min = transform.position;
        let mut new_max = transform.position;

        for i in 0..3 {
            for j in 0..3 {
                let r = rotation.col(j)[i];
                let a = r * self.min[j] * scale[i];
                let b = r * self.max[j] * scale[i];
                new_min[i] += a.min(b);
                new_max[i] += a.max(b);
            }
        }

        AABB { min: new_min, max: new_max }
    }
}

#[cfg(test)]
#[path = "aabb_tests.rs"]
mod tests;
