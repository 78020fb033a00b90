/*!
# Stellar Cull - Vulkan Backend

Vulkan implementation of the `stellar_cull` graphics-device traits.

This crate provides a headless Vulkan device (no surface, no swapchain) built
on Ash for the bindings, gpu-allocator for memory management and spirq for
compute-kernel reflection. It needs Vulkan 1.2 with `drawIndirectCount`.

```no_run
use std::sync::{Arc, Mutex};
use stellar_cull::stellar::culling::{CullingConfig, CullingMode, CullingSystem};
use stellar_cull::stellar::device::GraphicsDevice;
use stellar_cull_vulkan::{DeviceConfig, VulkanGraphicsDevice};

# fn demo(kernel_spirv: Vec<u8>) -> stellar_cull::stellar::Result<()> {
let device = VulkanGraphicsDevice::new(DeviceConfig::default())?;
let device: Arc<Mutex<dyn GraphicsDevice>> = Arc::new(Mutex::new(device));

let mut config = CullingConfig::with_mode(CullingMode::GpuCompute);
config.kernel_spirv = Some(kernel_spirv.into());
let culling = CullingSystem::new(device, config)?;
# Ok(())
# }
```
*/

mod vulkan_context;
mod vulkan_device;
mod vulkan_buffer;
mod vulkan_shader;
mod vulkan_pipeline;
mod vulkan_binding_group;
mod vulkan_command_list;
#[cfg(feature = "vulkan-validation")]
mod debug;

pub use vulkan_device::{DeviceConfig, VulkanGraphicsDevice};
pub use vulkan_buffer::Buffer as VulkanBuffer;
pub use vulkan_shader::{ReflectedBinding, Shader as VulkanShader};
pub use vulkan_pipeline::Pipeline as VulkanComputePipeline;
pub use vulkan_command_list::CommandList as VulkanCommandList;

// Re-export debug utilities
#[cfg(feature = "vulkan-validation")]
pub use debug::{get_validation_stats, print_validation_stats_report, ValidationStats};
