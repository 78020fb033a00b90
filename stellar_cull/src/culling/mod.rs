//! Frustum culling and indirect draw compaction.
//!
//! `CullingSystem` runs one of four interchangeable strategies per frame and
//! writes a count-prefixed indirect draw buffer plus an index-aligned
//! per-draw object index buffer into the current frame slot:
//!
//! ```text
//! indirect:  [u32 count][DrawIndexedIndirectCommand; N]   (commands at byte 4, stride 20)
//! per-draw:  [u32 object_index; N]
//! ```

mod config;
mod draw;
mod strategy;
mod frame_resources;
mod disabled;
mod cpu_serial;
mod cpu_parallel;
mod gpu_compute;
mod culling_system;

pub use config::{CullingMode, CullingConfig};
pub use draw::{
    DrawIndexedIndirectCommand, PerDrawInfo, GpuCullHeader, GpuObjectDescriptor,
    FRUSTUM_CULL_KERNEL_GLSL, CULL_WORKGROUP_SIZE,
    DRAW_COUNT_OFFSET, DRAW_COMMANDS_OFFSET, DRAW_COMMAND_STRIDE, OBJECT_DESCRIPTORS_OFFSET,
    indirect_buffer_size, per_draw_buffer_size, cull_input_buffer_size,
};
pub use strategy::{
    CullingStrategy, CullInput, CullOutput, DrawCount, StrategyOutcome, CpuDrawList,
};
pub use frame_resources::{FrameResources, FrameSlot};
pub use disabled::DisabledCulling;
pub use cpu_serial::CpuSerialCulling;
pub use cpu_parallel::CpuParallelCulling;
pub use gpu_compute::GpuComputeCulling;
pub use culling_system::{CullingSystem, CullStats};

#[cfg(test)]
pub(crate) mod test_scene;
