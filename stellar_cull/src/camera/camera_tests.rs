use glam::{Mat4, Vec3};
use super::*;
use crate::camera::PLANE_NEAR;

fn create_test_matrices() -> (Mat4, Mat4) {
    let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::Y);
    let proj = Mat4::perspective_rh(std::f32::consts::FRAC_PI_4, 16.0 / 9.0, 0.1, 100.0);
    (view, proj)
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_camera_new() {
    let (view, proj) = create_test_matrices();
    let camera = Camera::new(view, proj);

    assert_eq!(*camera.view_matrix(), view);
    assert_eq!(*camera.projection_matrix(), proj);
}

// ============================================================================
// view_projection_matrix / frustum
// ============================================================================

#[test]
fn test_view_projection_matrix() {
    let (view, proj) = create_test_matrices();
    let camera = Camera::new(view, proj);

    assert_eq!(camera.view_projection_matrix(), proj * view);
}

#[test]
fn test_frustum_matches_explicit_extraction() {
    let (view, proj) = create_test_matrices();
    let camera = Camera::new(view, proj);

    let from_camera = camera.frustum();
    let explicit = Frustum::from_view_projection(&(proj * view));

    for (a, b) in from_camera.planes.iter().zip(explicit.planes.iter()) {
        assert!((*a - *b).length() < 1e-6);
    }
}

// ============================================================================
// Setters
// ============================================================================

#[test]
fn test_set_view_matrix_changes_frustum() {
    let (view, proj) = create_test_matrices();
    let mut camera = Camera::new(view, proj);
    let before = camera.frustum();

    camera.set_view_matrix(Mat4::look_at_rh(Vec3::new(0.0, 0.0, -5.0), Vec3::ZERO, Vec3::Y));
    let after = camera.frustum();

    assert!((before.planes[PLANE_NEAR] - after.planes[PLANE_NEAR]).length() > 1e-3);
}

#[test]
fn test_set_projection_matrix() {
    let (view, proj) = create_test_matrices();
    let mut camera = Camera::new(view, proj);

    let ortho = Mat4::orthographic_rh(-10.0, 10.0, -10.0, 10.0, 0.1, 100.0);
    camera.set_projection_matrix(ortho);

    assert_eq!(*camera.projection_matrix(), ortho);
}
