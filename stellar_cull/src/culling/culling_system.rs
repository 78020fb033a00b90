/// CullingSystem - the per-frame entry point of the culling subsystem
///
/// Owns the selected strategy and the frame slots. Once per frame the caller
/// hands over the camera, object table, transform store and mesh table, and
/// gets back the indirect buffer and per-draw buffer to draw from.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use crate::error::{Error, Result};
use crate::graphics_device::{self, Buffer, CommandList};
use crate::job_system::{JobSystem, RayonJobSystem};
use crate::{engine_err, engine_info, engine_trace, engine_warn};
use super::config::{CullingConfig, CullingMode};
use super::cpu_parallel::CpuParallelCulling;
use super::cpu_serial::CpuSerialCulling;
use super::disabled::DisabledCulling;
use super::draw::{DRAW_COMMANDS_OFFSET, DRAW_COMMAND_STRIDE, DRAW_COUNT_OFFSET};
use super::frame_resources::FrameResources;
use super::gpu_compute::GpuComputeCulling;
use super::strategy::{CullInput, CullOutput, CullingStrategy, DrawCount};

const SOURCE: &str = "stellar::Culling";

/// Figures of the last culling pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CullStats {
    pub mode: CullingMode,
    /// Objects in the table
    pub input_objects: u32,
    /// Objects without a transform or a known mesh
    pub skipped_objects: u32,
    pub survivors: DrawCount,
    /// CPU time of the pass (recording only, in GPU mode)
    pub elapsed: Duration,
}

/// Frustum culling and indirect draw compaction.
pub struct CullingSystem {
    config: CullingConfig,
    strategy: Box<dyn CullingStrategy>,
    resources: FrameResources,
    last_stats: Option<CullStats>,
}

impl CullingSystem {
    /// Create the system, building a rayon job system if the mode needs one.
    pub fn new(
        graphics_device: Arc<Mutex<dyn graphics_device::GraphicsDevice>>,
        config: CullingConfig,
    ) -> Result<Self> {
        let job_system: Option<Arc<dyn JobSystem>> = match config.mode {
            CullingMode::CpuParallel => Some(Arc::new(RayonJobSystem::new(config.worker_threads)?)),
            _ => None,
        };
        Self::build(graphics_device, config, job_system)
    }

    /// Create the system on an existing job system.
    ///
    /// The job system is only used in `CpuParallel` mode.
    pub fn with_job_system(
        graphics_device: Arc<Mutex<dyn graphics_device::GraphicsDevice>>,
        config: CullingConfig,
        job_system: Arc<dyn JobSystem>,
    ) -> Result<Self> {
        Self::build(graphics_device, config, Some(job_system))
    }

    fn build(
        graphics_device: Arc<Mutex<dyn graphics_device::GraphicsDevice>>,
        config: CullingConfig,
        job_system: Option<Arc<dyn JobSystem>>,
    ) -> Result<Self> {
        config.validate()?;

        let strategy: Box<dyn CullingStrategy> = match config.mode {
            CullingMode::Off => Box::new(DisabledCulling::new()),
            CullingMode::CpuSerial => Box::new(CpuSerialCulling::new()),
            CullingMode::CpuParallel => {
                let job_system = job_system.ok_or_else(|| Error::InitializationFailed(
                    "cpu-parallel mode requires a job system".to_string()
                ))?;
                Box::new(CpuParallelCulling::new(job_system, config.parallel_chunk_size as usize))
            }
            CullingMode::GpuCompute => {
                let spirv = config.kernel_spirv.as_deref().ok_or_else(|| Error::InitializationFailed(
                    "gpu-compute mode requires the compaction kernel SPIR-V".to_string()
                ))?;
                let mut device = graphics_device.lock()
                    .map_err(|_| engine_err!(SOURCE, "Graphics device mutex poisoned"))?;
                Box::new(GpuComputeCulling::new(&mut *device, spirv)?)
            }
        };

        let resources = FrameResources::new(
            graphics_device,
            config.frames_in_flight,
            config.initial_capacity,
            strategy.compute_pipeline().cloned(),
        )?;

        engine_info!(SOURCE, "Culling mode selected: {}", config.mode);

        Ok(Self {
            config,
            strategy,
            resources,
            last_stats: None,
        })
    }

    /// Cull one frame.
    ///
    /// Writes frame slot `frame_index % frames_in_flight`. In GPU mode the
    /// work is recorded into `cmd`; CPU modes leave `cmd` untouched. The
    /// caller must not reuse a slot while the GPU still reads it.
    pub fn cull(
        &mut self,
        frame_index: u64,
        input: &CullInput,
        cmd: &mut dyn CommandList,
    ) -> Result<CullOutput> {
        let start = Instant::now();
        let input_objects = input.objects.len() as u32;

        self.resources.ensure_capacity(frame_index, input_objects)?;
        let slot = self.resources.slot(frame_index);

        let frustum = input.camera.frustum();
        let outcome = self.strategy.cull(&frustum, input, slot, cmd)?;

        if outcome.skipped_objects > 0 {
            engine_warn!(SOURCE,
                "{} of {} objects skipped (missing transform or mesh)",
                outcome.skipped_objects, input_objects);
        }

        let stats = CullStats {
            mode: self.strategy.mode(),
            input_objects,
            skipped_objects: outcome.skipped_objects,
            survivors: outcome.draw_count,
            elapsed: start.elapsed(),
        };
        engine_trace!(SOURCE, "frame {} slot {}: {} objects, survivors {:?}, {:?}",
            frame_index, slot.index(), input_objects, stats.survivors, stats.elapsed);
        self.last_stats = Some(stats);

        Ok(CullOutput {
            draw_count: outcome.draw_count,
            indirect_buffer: Arc::clone(slot.indirect_buffer()),
            per_draw_buffer: Arc::clone(slot.per_draw_buffer()),
        })
    }

    /// Record the indexed indirect draw that consumes a frame's output.
    ///
    /// The draw count is read by the GPU from the start of the indirect
    /// buffer; the slot capacity bounds it. Vertex/index buffers and the
    /// graphics pipeline must already be bound.
    pub fn record_indirect_draw(&self, frame_index: u64, cmd: &mut dyn CommandList) -> Result<()> {
        let slot = self.resources.slot(frame_index);
        let indirect = slot.indirect_buffer().as_ref();
        cmd.draw_indexed_indirect_count(
            indirect,
            DRAW_COMMANDS_OFFSET,
            indirect,
            DRAW_COUNT_OFFSET,
            slot.capacity(),
            DRAW_COMMAND_STRIDE,
        )
    }

    /// Indirect buffer of a frame: `[u32 count][DrawIndexedIndirectCommand × N]`
    pub fn indirect_buffer(&self, frame_index: u64) -> &Arc<dyn Buffer> {
        self.resources.slot(frame_index).indirect_buffer()
    }

    /// Per-draw buffer of a frame: `[u32 object_index × N]`
    pub fn per_draw_buffer(&self, frame_index: u64) -> &Arc<dyn Buffer> {
        self.resources.slot(frame_index).per_draw_buffer()
    }

    /// Survivor object indices of the last pass (CPU modes only)
    pub fn visible_object_indices(&self) -> Option<&[u32]> {
        self.strategy.visible_object_indices()
    }

    /// Statistics of the last pass
    pub fn last_stats(&self) -> Option<&CullStats> {
        self.last_stats.as_ref()
    }

    pub fn mode(&self) -> CullingMode {
        self.config.mode
    }

    pub fn config(&self) -> &CullingConfig {
        &self.config
    }

    /// Number of draws a frame's slot can currently hold
    pub fn capacity(&self, frame_index: u64) -> u32 {
        self.resources.slot(frame_index).capacity()
    }
}

#[cfg(test)]
#[path = "culling_system_tests.rs"]
mod tests;
