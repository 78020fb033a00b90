/// GpuContext - Shared GPU objects for all Vulkan resources
///
/// Contains everything a resource needs to live and die:
/// - Device for Vulkan API calls
/// - Allocator for memory management
/// - Queue for command submission
/// - Descriptor pools that binding groups allocate from and free back to
///
/// Every buffer, shader, pipeline and command list holds an `Arc<GpuContext>`,
/// so the device is destroyed only after the last resource is gone.

use ash::vk;
use gpu_allocator::vulkan::Allocator;
use std::mem::ManuallyDrop;
use std::sync::Mutex;

/// Shared GPU context for all Vulkan resources.
pub struct GpuContext {
    /// Vulkan logical device
    pub device: ash::Device,

    /// GPU memory allocator, dropped before the device is destroyed
    pub allocator: ManuallyDrop<Mutex<Allocator>>,

    /// Queue used for compute, transfer and draw submissions
    pub queue: vk::Queue,

    /// Queue family index of `queue`
    pub queue_family: u32,

    /// Descriptor pools, grown when exhausted and destroyed with the device
    pub(crate) descriptor_pools: Mutex<Vec<vk::DescriptorPool>>,

    /// Vulkan instance, destroyed last
    instance: ash::Instance,

    /// Loaded Vulkan library, unloaded after the instance is gone
    _entry: ash::Entry,

    /// Debug utils loader (validation layers only)
    pub(crate) debug_utils_loader: Option<ash::ext::debug_utils::Instance>,

    /// Debug messenger handle
    pub(crate) debug_messenger: Option<vk::DebugUtilsMessengerEXT>,
}

impl GpuContext {
    /// Create a new GPU context
    ///
    /// # Arguments
    ///
    /// * `device` - Vulkan logical device
    /// * `allocator` - GPU memory allocator
    /// * `queue` - Queue for command submission
    /// * `queue_family` - Family index of `queue`
    /// * `descriptor_pool` - First descriptor pool
    /// * `instance` - Vulkan instance
    /// * `entry` - Loaded Vulkan library
    /// * `debug_utils_loader` - Debug utils loader (if validation enabled)
    /// * `debug_messenger` - Debug messenger handle (if validation enabled)
    pub fn new(
        device: ash::Device,
        allocator: Allocator,
        queue: vk::Queue,
        queue_family: u32,
        descriptor_pool: vk::DescriptorPool,
        instance: ash::Instance,
        entry: ash::Entry,
        debug_utils_loader: Option<ash::ext::debug_utils::Instance>,
        debug_messenger: Option<vk::DebugUtilsMessengerEXT>,
    ) -> Self {
        Self {
            device,
            allocator: ManuallyDrop::new(Mutex::new(allocator)),
            queue,
            queue_family,
            descriptor_pools: Mutex::new(vec![descriptor_pool]),
            instance,
            _entry: entry,
            debug_utils_loader,
            debug_messenger,
        }
    }
}

impl Drop for GpuContext {
    fn drop(&mut self) {
        unsafe {
            self.device.device_wait_idle().ok();

            // 1. Descriptor pools (every binding group is gone by now)
            if let Ok(pools) = self.descriptor_pools.get_mut() {
                for &pool in pools.iter() {
                    self.device.destroy_descriptor_pool(pool, None);
                }
            }

            // 2. Free VkDeviceMemory pages while the device is alive
            ManuallyDrop::drop(&mut self.allocator);

            // 3. Device
            self.device.destroy_device(None);

            // 4. Stop routing validation messages, then destroy the messenger
            #[cfg(feature = "vulkan-validation")]
            crate::debug::cleanup_debug_config();

            if let (Some(debug_utils), Some(messenger)) =
                (&self.debug_utils_loader, self.debug_messenger)
            {
                debug_utils.destroy_debug_utils_messenger(messenger, None);
            }

            // 5. Instance
            self.instance.destroy_instance(None);
        }
    }
}
