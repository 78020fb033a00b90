/// Camera: low-level passive data container.
///
/// The caller (game engine) computes the view and projection matrices
/// from its own high-level parameters (position, orientation, FOV, ...)
/// and hands them over here. Row/column conventions are glam's `Mat4`.

use glam::Mat4;
use super::frustum::Frustum;

/// View + projection pair for one culling pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    view_matrix: Mat4,
    projection_matrix: Mat4,
}

impl Camera {
    /// Create a new camera from its view and projection matrices.
    pub fn new(view: Mat4, projection: Mat4) -> Self {
        Self {
            view_matrix: view,
            projection_matrix: projection,
        }
    }

    // ===== GETTERS =====

    /// View matrix (inverse of the camera's world transform).
    pub fn view_matrix(&self) -> &Mat4 {
        &self.view_matrix
    }

    /// Projection matrix (perspective or orthographic).
    pub fn projection_matrix(&self) -> &Mat4 {
        &self.projection_matrix
    }

    /// Combined view-projection matrix (projection * view).
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix * self.view_matrix
    }

    /// Frustum planes extracted from the current matrices.
    ///
    /// Recomputed on every call; frusta are never cached across frames.
    pub fn frustum(&self) -> Frustum {
        Frustum::from_camera(&self.view_matrix, &self.projection_matrix)
    }

    // ===== SETTERS =====

    pub fn set_view_matrix(&mut self, view: Mat4) {
        self.view_matrix = view;
    }

    pub fn set_projection_matrix(&mut self, projection: Mat4) {
        self.projection_matrix = projection;
    }
}

#[cfg(test)]
#[path = "camera_tests.rs"]
mod tests;
