/// CommandList - Vulkan implementation of graphics_device::CommandList trait

use stellar_cull::stellar::{Result, Error};
use stellar_cull::stellar::device::{
    CommandList as DeviceCommandList,
    Pipeline as DevicePipeline,
    Buffer as DeviceBuffer,
    BindingGroup as DeviceBindingGroup,
    BufferBarrier, PipelineStages, AccessFlags,
};
use stellar_cull::engine_error;
use ash::vk;
use std::sync::Arc;

use crate::vulkan_binding_group::BindingGroup;
use crate::vulkan_buffer::Buffer;
use crate::vulkan_context::GpuContext;
use crate::vulkan_pipeline::Pipeline;

/// Vulkan command list implementation
///
/// Records compute, transfer and indirect draw commands for later
/// submission to the GPU.
pub struct CommandList {
    ctx: Arc<GpuContext>,
    /// Command pool for allocating the command buffer
    command_pool: vk::CommandPool,
    /// Command buffer for recording
    command_buffer: vk::CommandBuffer,
    /// Whether the command list is currently recording
    is_recording: bool,
}

impl CommandList {
    /// Create a new command list on the context's queue family
    pub fn new(ctx: Arc<GpuContext>) -> Result<Self> {
        unsafe {
            let command_pool_create_info = vk::CommandPoolCreateInfo::default()
                .queue_family_index(ctx.queue_family)
                .flags(vk::CommandPoolCreateFlags::RESET_COMMAND_BUFFER);

            let command_pool = ctx.device.create_command_pool(&command_pool_create_info, None)
                .map_err(|e| {
                    engine_error!("stellar::vulkan", "Failed to create command pool: {:?}", e);
                    Error::BackendError(format!("Failed to create command pool: {:?}", e))
                })?;

            let command_buffer_allocate_info = vk::CommandBufferAllocateInfo::default()
                .command_pool(command_pool)
                .level(vk::CommandBufferLevel::PRIMARY)
                .command_buffer_count(1);

            let command_buffers = match ctx.device.allocate_command_buffers(&command_buffer_allocate_info) {
                Ok(buffers) => buffers,
                Err(e) => {
                    ctx.device.destroy_command_pool(command_pool, None);
                    engine_error!("stellar::vulkan", "Failed to allocate command buffer: {:?}", e);
                    return Err(Error::BackendError(format!("Failed to allocate command buffers: {:?}", e)));
                }
            };

            Ok(Self {
                ctx,
                command_pool,
                command_buffer: command_buffers[0],
                is_recording: false,
            })
        }
    }

    /// Get the underlying Vulkan command buffer
    pub fn command_buffer(&self) -> vk::CommandBuffer {
        self.command_buffer
    }

    /// Downcast a trait object created by `VulkanGraphicsDevice`
    ///
    /// # Safety
    ///
    /// `cmd` must have been created by a `VulkanGraphicsDevice`.
    pub(crate) unsafe fn from_dyn(cmd: &dyn DeviceCommandList) -> &CommandList {
        &*(cmd as *const dyn DeviceCommandList as *const CommandList)
    }

    fn ensure_recording(&self) -> Result<()> {
        if !self.is_recording {
            return Err(Error::BackendError("Command list not recording".to_string()));
        }
        Ok(())
    }
}

impl DeviceCommandList for CommandList {
    fn begin(&mut self) -> Result<()> {
        if self.is_recording {
            return Err(Error::BackendError("Command list already recording".to_string()));
        }

        unsafe {
            self.ctx.device
                .reset_command_buffer(self.command_buffer, vk::CommandBufferResetFlags::empty())
                .map_err(|e| Error::BackendError(format!("Failed to reset command buffer: {:?}", e)))?;

            let begin_info = vk::CommandBufferBeginInfo::default()
                .flags(vk::CommandBufferUsageFlags::ONE_TIME_SUBMIT);

            self.ctx.device
                .begin_command_buffer(self.command_buffer, &begin_info)
                .map_err(|e| Error::BackendError(format!("Failed to begin command buffer: {:?}", e)))?;
        }

        self.is_recording = true;
        Ok(())
    }

    fn end(&mut self) -> Result<()> {
        self.ensure_recording()?;

        unsafe {
            self.ctx.device
                .end_command_buffer(self.command_buffer)
                .map_err(|e| Error::BackendError(format!("Failed to end command buffer: {:?}", e)))?;
        }

        self.is_recording = false;
        Ok(())
    }

    fn bind_compute_pipeline(&mut self, pipeline: &Arc<dyn DevicePipeline>) -> Result<()> {
        self.ensure_recording()?;

        unsafe {
            let vk_pipeline = Pipeline::from_dyn(pipeline.as_ref());
            self.ctx.device.cmd_bind_pipeline(
                self.command_buffer,
                vk::PipelineBindPoint::COMPUTE,
                vk_pipeline.pipeline,
            );
        }
        Ok(())
    }

    fn bind_compute_binding_group(
        &mut self,
        pipeline: &Arc<dyn DevicePipeline>,
        set_index: u32,
        binding_group: &Arc<dyn DeviceBindingGroup>,
    ) -> Result<()> {
        self.ensure_recording()?;

        unsafe {
            let vk_pipeline = Pipeline::from_dyn(pipeline.as_ref());
            let vk_group = BindingGroup::from_dyn(binding_group.as_ref());
            self.ctx.device.cmd_bind_descriptor_sets(
                self.command_buffer,
                vk::PipelineBindPoint::COMPUTE,
                vk_pipeline.pipeline_layout,
                set_index,
                &[vk_group.descriptor_set],
                &[],
            );
        }
        Ok(())
    }

    fn dispatch(&mut self, group_count_x: u32, group_count_y: u32, group_count_z: u32) -> Result<()> {
        self.ensure_recording()?;

        unsafe {
            self.ctx.device.cmd_dispatch(self.command_buffer, group_count_x, group_count_y, group_count_z);
        }
        Ok(())
    }

    fn fill_buffer(&mut self, buffer: &dyn DeviceBuffer, offset: u64, size: u64, value: u32) -> Result<()> {
        self.ensure_recording()?;
        if offset % 4 != 0 || size % 4 != 0 {
            return Err(Error::InvalidResource(format!(
                "fill_buffer range {}+{} is not 4-byte aligned", offset, size
            )));
        }

        unsafe {
            let vk_buffer = Buffer::from_dyn(buffer);
            self.ctx.device.cmd_fill_buffer(self.command_buffer, vk_buffer.buffer, offset, size, value);
        }
        Ok(())
    }

    fn copy_buffer(
        &mut self,
        src: &dyn DeviceBuffer,
        src_offset: u64,
        dst: &dyn DeviceBuffer,
        dst_offset: u64,
        size: u64,
    ) -> Result<()> {
        self.ensure_recording()?;

        unsafe {
            let region = vk::BufferCopy::default()
                .src_offset(src_offset)
                .dst_offset(dst_offset)
                .size(size);
            self.ctx.device.cmd_copy_buffer(
                self.command_buffer,
                Buffer::from_dyn(src).buffer,
                Buffer::from_dyn(dst).buffer,
                &[region],
            );
        }
        Ok(())
    }

    fn pipeline_barrier(&mut self, barriers: &[BufferBarrier]) -> Result<()> {
        self.ensure_recording()?;
        if barriers.is_empty() {
            return Ok(());
        }

        let mut src_stages = vk::PipelineStageFlags::empty();
        let mut dst_stages = vk::PipelineStageFlags::empty();
        let buffer_barriers: Vec<vk::BufferMemoryBarrier> = barriers
            .iter()
            .map(|barrier| {
                src_stages |= pipeline_stages_to_vk(barrier.src_stages);
                dst_stages |= pipeline_stages_to_vk(barrier.dst_stages);
                let vk_buffer = unsafe { Buffer::from_dyn(barrier.buffer) };
                vk::BufferMemoryBarrier::default()
                    .src_access_mask(access_flags_to_vk(barrier.src_access))
                    .dst_access_mask(access_flags_to_vk(barrier.dst_access))
                    .src_queue_family_index(vk::QUEUE_FAMILY_IGNORED)
                    .dst_queue_family_index(vk::QUEUE_FAMILY_IGNORED)
                    .buffer(vk_buffer.buffer)
                    .offset(barrier.offset)
                    .size(barrier.size.unwrap_or(vk::WHOLE_SIZE))
            })
            .collect();

        if src_stages.is_empty() {
            src_stages = vk::PipelineStageFlags::TOP_OF_PIPE;
        }
        if dst_stages.is_empty() {
            dst_stages = vk::PipelineStageFlags::BOTTOM_OF_PIPE;
        }

        unsafe {
            self.ctx.device.cmd_pipeline_barrier(
                self.command_buffer,
                src_stages,
                dst_stages,
                vk::DependencyFlags::empty(),
                &[],
                &buffer_barriers,
                &[],
            );
        }
        Ok(())
    }

    fn draw_indexed_indirect_count(
        &mut self,
        buffer: &dyn DeviceBuffer,
        offset: u64,
        count_buffer: &dyn DeviceBuffer,
        count_offset: u64,
        max_draw_count: u32,
        stride: u32,
    ) -> Result<()> {
        self.ensure_recording()?;

        unsafe {
            self.ctx.device.cmd_draw_indexed_indirect_count(
                self.command_buffer,
                Buffer::from_dyn(buffer).buffer,
                offset,
                Buffer::from_dyn(count_buffer).buffer,
                count_offset,
                max_draw_count,
                stride,
            );
        }
        Ok(())
    }
}

impl Drop for CommandList {
    fn drop(&mut self) {
        unsafe {
            // Command buffer is freed with its pool
            self.ctx.device.destroy_command_pool(self.command_pool, None);
        }
    }
}

/// Convert PipelineStages to Vulkan stage flags
pub(crate) fn pipeline_stages_to_vk(stages: PipelineStages) -> vk::PipelineStageFlags {
    let mut flags = vk::PipelineStageFlags::empty();
    if stages.contains(PipelineStages::DRAW_INDIRECT) { flags |= vk::PipelineStageFlags::DRAW_INDIRECT; }
    if stages.contains(PipelineStages::VERTEX_SHADER) { flags |= vk::PipelineStageFlags::VERTEX_SHADER; }
    if stages.contains(PipelineStages::COMPUTE_SHADER) { flags |= vk::PipelineStageFlags::COMPUTE_SHADER; }
    if stages.contains(PipelineStages::TRANSFER) { flags |= vk::PipelineStageFlags::TRANSFER; }
    flags
}

/// Convert AccessFlags to Vulkan access flags
pub(crate) fn access_flags_to_vk(access: AccessFlags) -> vk::AccessFlags {
    let mut flags = vk::AccessFlags::empty();
    if access.contains(AccessFlags::INDIRECT_COMMAND_READ) { flags |= vk::AccessFlags::INDIRECT_COMMAND_READ; }
    if access.contains(AccessFlags::SHADER_READ) { flags |= vk::AccessFlags::SHADER_READ; }
    if access.contains(AccessFlags::SHADER_WRITE) { flags |= vk::AccessFlags::SHADER_WRITE; }
    if access.contains(AccessFlags::TRANSFER_READ) { flags |= vk::AccessFlags::TRANSFER_READ; }
    if access.contains(AccessFlags::TRANSFER_WRITE) { flags |= vk::AccessFlags::TRANSFER_WRITE; }
    flags
}
