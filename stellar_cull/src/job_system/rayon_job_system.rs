/// Rayon-backed JobSystem

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use crate::error::{Error, Result};
use crate::engine_info;
use super::job_system::{job_group, group_count, JobGroup, JobSystem};

/// Dedicated rayon thread pool.
///
/// Owning its pool keeps culling work from competing with whatever runs on
/// rayon's global pool.
pub struct RayonJobSystem {
    pool: ThreadPool,
}

impl RayonJobSystem {
    /// Create a pool with `worker_threads` threads (0 = one per logical core).
    pub fn new(worker_threads: usize) -> Result<Self> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(worker_threads)
            .thread_name(|idx| format!("stellar-cull-{}", idx))
            .build()
            .map_err(|e| Error::InitializationFailed(
                format!("Failed to create culling thread pool: {}", e)
            ))?;

        engine_info!("stellar::JobSystem",
            "Rayon job system started with {} threads", pool.current_num_threads());

        Ok(Self { pool })
    }
}

impl JobSystem for RayonJobSystem {
    fn num_threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    fn dispatch(&self, job_count: usize, group_size: usize, job: &(dyn Fn(JobGroup) + Sync)) {
        let groups = group_count(job_count, group_size);
        if groups == 0 {
            return;
        }

        self.pool.install(|| {
            (0..groups)
                .into_par_iter()
                .for_each(|g| job(job_group(g, job_count, group_size)));
        });
    }
}

#[cfg(test)]
#[path = "rayon_job_system_tests.rs"]
mod tests;
