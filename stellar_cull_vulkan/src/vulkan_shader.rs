/// Shader - Vulkan implementation of graphics_device::Shader trait

use stellar_cull::stellar::device::{BindingType, Shader as DeviceShader};
use ash::vk;
use std::sync::Arc;

use crate::vulkan_context::GpuContext;

/// A descriptor binding the SPIR-V module declares
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReflectedBinding {
    pub set: u32,
    pub binding: u32,
    pub binding_type: BindingType,
}

/// Vulkan compute shader module
pub struct Shader {
    ctx: Arc<GpuContext>,
    /// Vulkan shader module
    pub(crate) module: vk::ShaderModule,
    /// Entry point name
    pub(crate) entry_point: String,
    /// Descriptor bindings found by reflection
    pub(crate) reflected_bindings: Vec<ReflectedBinding>,
}

impl Shader {
    pub(crate) fn new(
        ctx: Arc<GpuContext>,
        module: vk::ShaderModule,
        entry_point: String,
        reflected_bindings: Vec<ReflectedBinding>,
    ) -> Self {
        Self { ctx, module, entry_point, reflected_bindings }
    }

    /// Downcast a trait object created by `VulkanGraphicsDevice`
    ///
    /// # Safety
    ///
    /// `shader` must have been created by a `VulkanGraphicsDevice`.
    pub(crate) unsafe fn from_dyn(shader: &dyn DeviceShader) -> &Shader {
        &*(shader as *const dyn DeviceShader as *const Shader)
    }

    /// Bindings declared by the module
    pub fn reflected_bindings(&self) -> &[ReflectedBinding] {
        &self.reflected_bindings
    }
}

impl DeviceShader for Shader {
    fn entry_point(&self) -> &str {
        &self.entry_point
    }
}

impl Drop for Shader {
    fn drop(&mut self) {
        unsafe {
            self.ctx.device.destroy_shader_module(self.module, None);
        }
    }
}
