/// Frustum: six clipping planes for visibility culling.
///
/// Each plane is represented as a Vec4 (A, B, C, D) where:
/// - (A, B, C) is the inward-pointing unit normal
/// - D is the signed distance
/// - A point P is inside the frustum if dot(plane, P_homogeneous) >= 0 for all planes
///
/// The same plane layout is uploaded verbatim to the GPU compaction kernel,
/// so the CPU and GPU tests see identical numbers.

use glam::{Mat4, Vec3, Vec4};
use crate::scene::AABB;

/// Frustum plane indices
pub const PLANE_LEFT: usize = 0;
pub const PLANE_RIGHT: usize = 1;
pub const PLANE_BOTTOM: usize = 2;
pub const PLANE_TOP: usize = 3;
pub const PLANE_NEAR: usize = 4;
pub const PLANE_FAR: usize = 5;

/// Six frustum planes for culling.
///
/// Each plane is (A, B, C, D) where Ax + By + Cz + D = 0.
/// Normal (A, B, C) points inward (toward the visible volume).
/// Works with both perspective and orthographic projections.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frustum {
    /// Frustum planes: left, right, bottom, top, near, far
    pub planes: [Vec4; 6],
}

impl Frustum {
    /// Extract frustum planes from separate view and projection matrices.
    pub fn from_camera(view: &Mat4, projection: &Mat4) -> Self {
        Self::from_view_projection(&(*projection * *view))
    }

    /// Extract frustum planes from a view-projection matrix.
    ///
    /// Gribb & Hartmann: each plane is row3 ± row{0,1,2} of the matrix,
    /// normalized by the length of its normal. A zero-length normal is
    /// left as-is; callers must supply an invertible projection.
    pub fn from_view_projection(vp: &Mat4) -> Self {
        let row0 = vp.row(0);
        let row1 = vp.row(1);
        let row2 = vp.row(2);
        let row3 = vp.row(3);

        let mut planes = [
            row3 + row0, // Left
            row3 - row0, // Right
            row3 + row1, // Bottom
            row3 - row1, // Top
            row3 + row2, // Near
            row3 - row2, // Far
        ];

        for plane in &mut planes {
            let normal_len = plane.truncate().length();
            if normal_len > 0.0 {
                *plane /= normal_len;
            }
        }

        Self { planes }
    }

    /// Signed distance from a point to one plane (positive = inside).
    #[inline]
    pub fn signed_distance(plane: Vec4, point: Vec3) -> f32 {
        plane.truncate().dot(point) + plane.w
    }

    /// Test if an AABB intersects this frustum.
    ///
    /// For every plane, all 8 corners are evaluated. The box is rejected only
    /// when every corner lies strictly on the negative side of a single plane;
    /// a corner exactly on the plane keeps the box visible.
    ///
    /// Conservative: may return false positives for boxes straddling several
    /// planes near a frustum edge, never false negatives.
    pub fn intersects_aabb(&self, aabb: &AABB) -> bool {
        let corners = aabb.corners();

        for plane in &self.planes {
            let all_outside = corners
                .iter()
                .all(|corner| Self::signed_distance(*plane, *corner) < 0.0);

            if all_outside {
                return false;
            }
        }

        true
    }

    /// Planes as plain arrays, in the layout the compaction kernel reads.
    pub fn to_gpu_planes(&self) -> [[f32; 4]; 6] {
        self.planes.map(|p| p.to_array())
    }
}

#[cfg(test)]
#[path = "frustum_tests.rs"]
mod tests;
