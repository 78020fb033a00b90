/// GPU culling: upload object descriptors, record the compaction dispatch.

use std::sync::Arc;
use crate::camera::Frustum;
use crate::error::Result;
use crate::graphics_device::{
    AccessFlags, BindingGroupLayoutDesc, BufferBarrier, CommandList, ComputePipelineDesc,
    GraphicsDevice, Pipeline, PipelineStages, ShaderDesc,
};
use crate::{engine_err, engine_info};
use super::config::CullingMode;
use super::draw::{
    GpuCullHeader, GpuObjectDescriptor, CULL_WORKGROUP_SIZE, DRAW_COUNT_OFFSET,
    OBJECT_DESCRIPTORS_OFFSET,
};
use super::frame_resources::FrameSlot;
use super::strategy::{resolve, CullInput, CullingStrategy, DrawCount, StrategyOutcome};

const SOURCE: &str = "stellar::Culling";

/// Size of the survivor counter at the start of the indirect buffer
const DRAW_COUNT_SIZE: u64 = 4;

/// Records the frustum-cull kernel; never waits for the GPU.
///
/// The survivor count only exists on the GPU. The draw stage reads it with
/// an indirect-count draw from the same buffer.
pub struct GpuComputeCulling {
    pipeline: Arc<dyn Pipeline>,
    /// Host staging of the descriptors, reused across frames
    descriptors: Vec<GpuObjectDescriptor>,
}

impl GpuComputeCulling {
    /// Build the compaction pipeline from the kernel's SPIR-V.
    pub fn new(device: &mut dyn GraphicsDevice, kernel_spirv: &[u8]) -> Result<Self> {
        let shader = device.create_shader(ShaderDesc {
            code: kernel_spirv,
            entry_point: "main".to_string(),
        })?;

        let pipeline = device.create_compute_pipeline(ComputePipelineDesc {
            shader,
            binding_layouts: vec![BindingGroupLayoutDesc::storage_buffers(3)],
            name: "frustum_cull".to_string(),
        })?;

        engine_info!(SOURCE, "Frustum cull compute pipeline created ({} bytes of SPIR-V)",
            kernel_spirv.len());

        Ok(Self {
            pipeline,
            descriptors: Vec::new(),
        })
    }

    /// Record barriers, counter reset and dispatch for `object_count` objects.
    fn record(&self, slot: &FrameSlot, object_count: u32, cmd: &mut dyn CommandList) -> Result<()> {
        let indirect = slot.indirect_buffer().as_ref();
        let per_draw = slot.per_draw_buffer().as_ref();
        let binding_group = slot.binding_group()
            .ok_or_else(|| engine_err!(SOURCE, "Frame slot {} has no kernel binding group", slot.index()))?;

        let draw_reads = PipelineStages::DRAW_INDIRECT | PipelineStages::VERTEX_SHADER;
        let draw_access = AccessFlags::INDIRECT_COMMAND_READ | AccessFlags::SHADER_READ;

        // 1. Previous indirect draw is done reading the counter
        cmd.pipeline_barrier(&[BufferBarrier {
            buffer: indirect,
            offset: DRAW_COUNT_OFFSET,
            size: Some(DRAW_COUNT_SIZE),
            src_stages: PipelineStages::DRAW_INDIRECT,
            src_access: AccessFlags::INDIRECT_COMMAND_READ,
            dst_stages: PipelineStages::TRANSFER,
            dst_access: AccessFlags::TRANSFER_WRITE,
        }])?;

        // 2. Reset the counter
        cmd.fill_buffer(indirect, DRAW_COUNT_OFFSET, DRAW_COUNT_SIZE, 0)?;

        // 3. Zeroed counter visible to the kernel, outputs open for writes
        cmd.pipeline_barrier(&[
            BufferBarrier {
                buffer: indirect,
                offset: DRAW_COUNT_OFFSET,
                size: Some(DRAW_COUNT_SIZE),
                src_stages: PipelineStages::TRANSFER,
                src_access: AccessFlags::TRANSFER_WRITE,
                dst_stages: PipelineStages::COMPUTE_SHADER,
                dst_access: AccessFlags::SHADER_READ | AccessFlags::SHADER_WRITE,
            },
            BufferBarrier {
                buffer: indirect,
                offset: 0,
                size: None,
                src_stages: draw_reads,
                src_access: draw_access,
                dst_stages: PipelineStages::COMPUTE_SHADER,
                dst_access: AccessFlags::SHADER_WRITE,
            },
            BufferBarrier {
                buffer: per_draw,
                offset: 0,
                size: None,
                src_stages: draw_reads,
                src_access: draw_access,
                dst_stages: PipelineStages::COMPUTE_SHADER,
                dst_access: AccessFlags::SHADER_WRITE,
            },
        ])?;

        // 4. One invocation per object
        if object_count > 0 {
            cmd.bind_compute_pipeline(&self.pipeline)?;
            cmd.bind_compute_binding_group(&self.pipeline, 0, binding_group)?;
            cmd.dispatch(object_count.div_ceil(CULL_WORKGROUP_SIZE), 1, 1)?;
        }

        // 5. Kernel output handed to the draw stage
        let handoff = |buffer| BufferBarrier {
            buffer,
            offset: 0,
            size: None,
            src_stages: PipelineStages::COMPUTE_SHADER,
            src_access: AccessFlags::SHADER_WRITE,
            dst_stages: draw_reads,
            dst_access: draw_access,
        };
        cmd.pipeline_barrier(&[handoff(indirect), handoff(per_draw)])?;

        Ok(())
    }
}

impl CullingStrategy for GpuComputeCulling {
    fn mode(&self) -> CullingMode {
        CullingMode::GpuCompute
    }

    fn cull(
        &mut self,
        frustum: &Frustum,
        input: &CullInput,
        slot: &FrameSlot,
        cmd: &mut dyn CommandList,
    ) -> Result<StrategyOutcome> {
        self.descriptors.clear();
        let mut skipped_objects = 0;
        for object in input.objects.iter() {
            match resolve(object, input.transforms, input.meshes) {
                Some((transform, mesh)) => {
                    self.descriptors.push(GpuObjectDescriptor::new(object, &transform, mesh));
                }
                None => skipped_objects += 1,
            }
        }

        let object_count = self.descriptors.len() as u32;
        let input_buffer = slot.input_buffer()
            .ok_or_else(|| engine_err!(SOURCE, "Frame slot {} has no kernel input buffer", slot.index()))?;

        let header = GpuCullHeader::new(frustum, object_count);
        input_buffer.update(0, bytemuck::bytes_of(&header))?;
        if object_count > 0 {
            input_buffer.update(OBJECT_DESCRIPTORS_OFFSET, bytemuck::cast_slice(&self.descriptors))?;
        }

        self.record(slot, object_count, cmd)?;

        Ok(StrategyOutcome {
            draw_count: DrawCount::GpuResident,
            skipped_objects,
        })
    }

    fn compute_pipeline(&self) -> Option<&Arc<dyn Pipeline>> {
        Some(&self.pipeline)
    }
}
