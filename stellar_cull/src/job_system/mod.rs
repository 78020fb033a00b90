//! Job system seam used by the parallel CPU culling strategy.
//!
//! The culling code only sees the `JobSystem` trait; engines plug in their
//! own worker pool. `RayonJobSystem` is a ready-made pool on top of rayon.

mod job_system;
mod rayon_job_system;

pub use job_system::{JobSystem, JobGroup, group_count};
pub use rayon_job_system::RayonJobSystem;
