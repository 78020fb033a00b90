/// Multi-threaded CPU culling over a `JobSystem`.
///
/// The object table is cut into fixed-size chunks. Each chunk fills its own
/// survivor list; once the dispatch returns, the lists are concatenated in
/// chunk order. No lock is shared between chunks, and commands and infos
/// stay index-aligned because each list pushes them together.

use std::sync::{Arc, Mutex};
use crate::camera::Frustum;
use crate::error::Result;
use crate::graphics_device::CommandList;
use crate::job_system::{group_count, JobSystem};
use crate::engine_err;
use super::config::CullingMode;
use super::frame_resources::FrameSlot;
use super::strategy::{CpuDrawList, CullInput, CullingStrategy, DrawCount, StrategyOutcome};

/// Survivors and skip count of one chunk
#[derive(Default)]
struct ChunkResult {
    draws: CpuDrawList,
    skipped: u32,
}

pub struct CpuParallelCulling {
    job_system: Arc<dyn JobSystem>,
    chunk_size: usize,
    /// One entry per chunk, reused across frames
    chunks: Vec<Mutex<ChunkResult>>,
    draws: CpuDrawList,
}

impl CpuParallelCulling {
    pub fn new(job_system: Arc<dyn JobSystem>, chunk_size: usize) -> Self {
        Self {
            job_system,
            chunk_size: chunk_size.max(1),
            chunks: Vec::new(),
            draws: CpuDrawList::new(),
        }
    }

    pub fn job_system(&self) -> &Arc<dyn JobSystem> {
        &self.job_system
    }
}

impl CullingStrategy for CpuParallelCulling {
    fn mode(&self) -> CullingMode {
        CullingMode::CpuParallel
    }

    fn cull(
        &mut self,
        frustum: &Frustum,
        input: &CullInput,
        slot: &FrameSlot,
        _cmd: &mut dyn CommandList,
    ) -> Result<StrategyOutcome> {
        let objects = input.objects.as_slice();
        let chunk_count = group_count(objects.len(), self.chunk_size);

        if self.chunks.len() < chunk_count {
            self.chunks.resize_with(chunk_count, Default::default);
        }

        let chunks = &self.chunks[..chunk_count];
        self.job_system.dispatch(objects.len(), self.chunk_size, &|group| {
            let Ok(mut chunk) = chunks[group.group_index].lock() else {
                return;
            };
            chunk.draws.clear();
            chunk.skipped = chunk.draws.cull_objects(&objects[group.range], frustum, input, true);
        });

        // Join done: dispatch has returned, merge in chunk order
        self.draws.clear();
        let mut skipped_objects = 0;
        for chunk in chunks {
            let mut chunk = chunk.lock()
                .map_err(|_| engine_err!("stellar::Culling", "Culling worker panicked"))?;
            skipped_objects += chunk.skipped;
            self.draws.append(&mut chunk.draws);
        }

        let count = self.draws.write_to(slot)?;

        Ok(StrategyOutcome {
            draw_count: DrawCount::Known(count),
            skipped_objects,
        })
    }

    fn visible_object_indices(&self) -> Option<&[u32]> {
        Some(self.draws.object_indices())
    }
}

#[cfg(test)]
#[path = "cpu_parallel_tests.rs"]
mod tests;
