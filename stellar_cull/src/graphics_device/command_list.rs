/// CommandList trait - for recording compute, transfer and indirect draw commands

use std::sync::Arc;
use bitflags::bitflags;
use crate::error::Result;
use crate::graphics_device::{Buffer, BindingGroup, Pipeline};

bitflags! {
    /// Pipeline stages a barrier waits on or blocks
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PipelineStages: u32 {
        /// Indirect argument fetch
        const DRAW_INDIRECT = 1 << 0;
        const VERTEX_SHADER = 1 << 1;
        const COMPUTE_SHADER = 1 << 2;
        /// Copy and fill commands
        const TRANSFER = 1 << 3;
    }
}

bitflags! {
    /// Memory accesses made available or visible by a barrier
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct AccessFlags: u32 {
        const INDIRECT_COMMAND_READ = 1 << 0;
        const SHADER_READ = 1 << 1;
        const SHADER_WRITE = 1 << 2;
        const TRANSFER_READ = 1 << 3;
        const TRANSFER_WRITE = 1 << 4;
    }
}

/// Execution and memory dependency on a buffer range
///
/// All barriers stay on one queue; no ownership transfer is expressed.
pub struct BufferBarrier<'a> {
    /// Buffer the dependency applies to
    pub buffer: &'a dyn Buffer,
    /// Start of the range in bytes
    pub offset: u64,
    /// Length of the range in bytes; None means up to the end of the buffer
    pub size: Option<u64>,
    pub src_stages: PipelineStages,
    pub src_access: AccessFlags,
    pub dst_stages: PipelineStages,
    pub dst_access: AccessFlags,
}

/// Command list for recording GPU commands
///
/// Commands are recorded and later submitted to the GPU via GraphicsDevice::submit()
pub trait CommandList: Send + Sync {
    /// Begin recording commands
    fn begin(&mut self) -> Result<()>;

    /// End recording commands
    fn end(&mut self) -> Result<()>;

    /// Bind a compute pipeline
    fn bind_compute_pipeline(&mut self, pipeline: &Arc<dyn Pipeline>) -> Result<()>;

    /// Bind a binding group to a compute pipeline slot
    ///
    /// # Arguments
    ///
    /// * `pipeline` - Pipeline to bind the group to (needed to extract pipeline layout)
    /// * `set_index` - Set index
    /// * `binding_group` - The binding group to bind
    fn bind_compute_binding_group(
        &mut self,
        pipeline: &Arc<dyn Pipeline>,
        set_index: u32,
        binding_group: &Arc<dyn BindingGroup>,
    ) -> Result<()>;

    /// Dispatch compute workgroups
    fn dispatch(&mut self, group_count_x: u32, group_count_y: u32, group_count_z: u32) -> Result<()>;

    /// Fill a buffer range with a repeated 32-bit value
    ///
    /// `offset` and `size` must be multiples of 4.
    fn fill_buffer(&mut self, buffer: &dyn Buffer, offset: u64, size: u64, value: u32) -> Result<()>;

    /// Copy a byte range between two buffers
    fn copy_buffer(
        &mut self,
        src: &dyn Buffer,
        src_offset: u64,
        dst: &dyn Buffer,
        dst_offset: u64,
        size: u64,
    ) -> Result<()>;

    /// Record buffer memory barriers
    fn pipeline_barrier(&mut self, barriers: &[BufferBarrier]) -> Result<()>;

    /// Indexed indirect draw whose draw count is read by the GPU
    ///
    /// # Arguments
    ///
    /// * `buffer` - Buffer holding the draw commands
    /// * `offset` - Byte offset of the first command
    /// * `count_buffer` - Buffer holding the `u32` draw count
    /// * `count_offset` - Byte offset of the draw count
    /// * `max_draw_count` - Upper bound on the number of draws
    /// * `stride` - Byte stride between commands
    fn draw_indexed_indirect_count(
        &mut self,
        buffer: &dyn Buffer,
        offset: u64,
        count_buffer: &dyn Buffer,
        count_offset: u64,
        max_draw_count: u32,
        stride: u32,
    ) -> Result<()>;
}
