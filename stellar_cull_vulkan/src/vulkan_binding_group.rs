/// BindingGroup - Vulkan implementation of graphics_device::BindingGroup trait

use std::sync::Arc;
use stellar_cull::stellar::device::BindingGroup as DeviceBindingGroup;
use ash::vk;
use crate::vulkan_context::GpuContext;

/// Vulkan binding group implementation
///
/// Wraps a VkDescriptorSet handle. The set is returned to its pool when the
/// binding group is dropped.
pub struct BindingGroup {
    /// Shared GPU context (owns the descriptor pools)
    pub(crate) ctx: Arc<GpuContext>,
    /// Pool the set was allocated from
    pub(crate) descriptor_pool: vk::DescriptorPool,
    /// Vulkan descriptor set handle
    pub(crate) descriptor_set: vk::DescriptorSet,
    /// Set index this binding group was created for
    pub(crate) set_index: u32,
}

impl BindingGroup {
    /// Downcast a trait object created by `VulkanGraphicsDevice`
    ///
    /// # Safety
    ///
    /// `group` must have been created by a `VulkanGraphicsDevice`.
    pub(crate) unsafe fn from_dyn(group: &dyn DeviceBindingGroup) -> &BindingGroup {
        &*(group as *const dyn DeviceBindingGroup as *const BindingGroup)
    }
}

impl DeviceBindingGroup for BindingGroup {
    fn set_index(&self) -> u32 {
        self.set_index
    }
}

impl Drop for BindingGroup {
    fn drop(&mut self) {
        // Pool access must be externally synchronized
        if let Ok(_pools) = self.ctx.descriptor_pools.lock() {
            unsafe {
                self.ctx.device
                    .free_descriptor_sets(self.descriptor_pool, &[self.descriptor_set])
                    .ok();
            }
        }
    }
}
