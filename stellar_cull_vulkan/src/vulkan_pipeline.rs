/// Pipeline - Vulkan implementation of graphics_device::Pipeline trait

use stellar_cull::stellar::{Result, Error};
use stellar_cull::stellar::device::{BindingGroupLayoutDesc, Pipeline as DevicePipeline};
use stellar_cull::engine_error;
use ash::vk;
use std::sync::Arc;

use crate::vulkan_context::GpuContext;
use crate::vulkan_shader::ReflectedBinding;

/// Vulkan compute pipeline
pub struct Pipeline {
    ctx: Arc<GpuContext>,
    /// Vulkan compute pipeline
    pub(crate) pipeline: vk::Pipeline,
    /// Pipeline layout, needed to bind descriptor sets
    pub(crate) pipeline_layout: vk::PipelineLayout,
    /// One descriptor set layout per binding group
    pub(crate) descriptor_set_layouts: Vec<vk::DescriptorSetLayout>,
    /// Binding group layouts the pipeline was created with
    pub(crate) binding_layouts: Vec<BindingGroupLayoutDesc>,
    /// Debug name
    pub(crate) name: String,
}

impl Pipeline {
    pub(crate) fn new(
        ctx: Arc<GpuContext>,
        pipeline: vk::Pipeline,
        pipeline_layout: vk::PipelineLayout,
        descriptor_set_layouts: Vec<vk::DescriptorSetLayout>,
        binding_layouts: Vec<BindingGroupLayoutDesc>,
        name: String,
    ) -> Self {
        Self {
            ctx,
            pipeline,
            pipeline_layout,
            descriptor_set_layouts,
            binding_layouts,
            name,
        }
    }

    /// Downcast a trait object created by `VulkanGraphicsDevice`
    ///
    /// # Safety
    ///
    /// `pipeline` must have been created by a `VulkanGraphicsDevice`.
    pub(crate) unsafe fn from_dyn(pipeline: &dyn DevicePipeline) -> &Pipeline {
        &*(pipeline as *const dyn DevicePipeline as *const Pipeline)
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl DevicePipeline for Pipeline {
    fn binding_group_layout_count(&self) -> u32 {
        self.binding_layouts.len() as u32
    }

    fn binding_group_layout(&self, set_index: u32) -> Option<&BindingGroupLayoutDesc> {
        self.binding_layouts.get(set_index as usize)
    }
}

impl Drop for Pipeline {
    fn drop(&mut self) {
        unsafe {
            self.ctx.device.destroy_pipeline(self.pipeline, None);
            self.ctx.device.destroy_pipeline_layout(self.pipeline_layout, None);
            for &layout in &self.descriptor_set_layouts {
                self.ctx.device.destroy_descriptor_set_layout(layout, None);
            }
        }
    }
}

/// Check that the bindings a kernel declares match the requested layouts.
///
/// Every reflected binding must be requested with the same type, and every
/// requested binding must exist in the kernel.
pub(crate) fn validate_bindings(
    pipeline_name: &str,
    reflected: &[ReflectedBinding],
    requested: &[BindingGroupLayoutDesc],
) -> Result<()> {
    for binding in reflected {
        let slot = requested
            .get(binding.set as usize)
            .and_then(|layout| layout.entries.iter().find(|e| e.binding == binding.binding));

        match slot {
            Some(slot) if slot.binding_type == binding.binding_type => {}
            Some(slot) => {
                engine_error!("stellar::vulkan",
                    "Pipeline '{}': set {} binding {} is {:?} in the kernel but {:?} in the layout",
                    pipeline_name, binding.set, binding.binding, binding.binding_type, slot.binding_type);
                return Err(Error::InvalidResource(format!(
                    "pipeline '{}': binding type mismatch at set {} binding {}",
                    pipeline_name, binding.set, binding.binding
                )));
            }
            None => {
                engine_error!("stellar::vulkan",
                    "Pipeline '{}': kernel uses set {} binding {} missing from the layout",
                    pipeline_name, binding.set, binding.binding);
                return Err(Error::InvalidResource(format!(
                    "pipeline '{}': set {} binding {} is not in the layout",
                    pipeline_name, binding.set, binding.binding
                )));
            }
        }
    }

    for (set, layout) in requested.iter().enumerate() {
        for entry in &layout.entries {
            let declared = reflected
                .iter()
                .any(|b| b.set == set as u32 && b.binding == entry.binding);
            if !declared {
                engine_error!("stellar::vulkan",
                    "Pipeline '{}': layout binds set {} binding {} but the kernel does not declare it",
                    pipeline_name, set, entry.binding);
                return Err(Error::InvalidResource(format!(
                    "pipeline '{}': set {} binding {} is not declared by the kernel",
                    pipeline_name, set, entry.binding
                )));
            }
        }
    }

    Ok(())
}
