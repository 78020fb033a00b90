//! Camera module: camera matrices and frustum math.
//!
//! Provides passive data containers for the culling pipeline.
//! Cameras are owned and driven by the caller; the culling system only
//! reads their matrices once per frame.

mod camera;
mod frustum;

pub use camera::Camera;
pub use frustum::{
    Frustum,
    PLANE_LEFT, PLANE_RIGHT, PLANE_BOTTOM, PLANE_TOP, PLANE_NEAR, PLANE_FAR,
};
