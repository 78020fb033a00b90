/// Buffer - Vulkan implementation of graphics_device::Buffer trait

use stellar_cull::stellar::{Result, Error};
use stellar_cull::stellar::device::{Buffer as DeviceBuffer, BufferUsage, MemoryLocation};
use stellar_cull::{engine_bail, engine_error};
use ash::vk;
use gpu_allocator::vulkan::Allocation;
use std::sync::Arc;

use crate::vulkan_context::GpuContext;

/// Vulkan buffer implementation
pub struct Buffer {
    /// Shared GPU context (device, allocator, queue)
    ctx: Arc<GpuContext>,
    /// Vulkan buffer
    pub(crate) buffer: vk::Buffer,
    /// GPU memory allocation
    pub(crate) allocation: Option<Allocation>,
    /// Buffer size
    pub(crate) size: u64,
    /// Debug name
    pub(crate) name: String,
}

impl Buffer {
    /// Wrap a created buffer and its bound allocation
    pub fn new(
        ctx: Arc<GpuContext>,
        buffer: vk::Buffer,
        allocation: Allocation,
        size: u64,
        name: String,
    ) -> Self {
        Self {
            ctx,
            buffer,
            allocation: Some(allocation),
            size,
            name,
        }
    }

    /// Downcast a trait object created by `VulkanGraphicsDevice`
    ///
    /// # Safety
    ///
    /// `buffer` must have been created by a `VulkanGraphicsDevice`.
    pub(crate) unsafe fn from_dyn(buffer: &dyn DeviceBuffer) -> &Buffer {
        &*(buffer as *const dyn DeviceBuffer as *const Buffer)
    }
}

impl DeviceBuffer for Buffer {
    fn update(&self, offset: u64, data: &[u8]) -> Result<()> {
        let Some(mapped_ptr) = self.mapped_ptr() else {
            engine_bail!("stellar::vulkan",
                "Buffer '{}' is not CPU-accessible", self.name);
        };

        let end = offset + data.len() as u64;
        if end > self.size {
            engine_error!("stellar::vulkan",
                "Buffer '{}' update out of range: {}..{} (size {})", self.name, offset, end, self.size);
            return Err(Error::InvalidResource(format!(
                "update of {} bytes at offset {} overflows buffer '{}'", data.len(), offset, self.name
            )));
        }

        unsafe {
            std::ptr::copy_nonoverlapping(
                data.as_ptr(),
                mapped_ptr.add(offset as usize),
                data.len(),
            );
        }
        Ok(())
    }

    fn mapped_ptr(&self) -> Option<*mut u8> {
        self.allocation
            .as_ref()
            .and_then(|allocation| allocation.mapped_ptr())
            .map(|ptr| ptr.as_ptr() as *mut u8)
    }

    fn size(&self) -> u64 {
        self.size
    }
}

impl Drop for Buffer {
    fn drop(&mut self) {
        unsafe {
            // Free GPU memory
            if let Some(allocation) = self.allocation.take() {
                // Don't panic if lock fails - we still need to destroy the buffer
                if let Ok(mut allocator) = self.ctx.allocator.lock() {
                    allocator.free(allocation).ok();
                }
            }

            self.ctx.device.destroy_buffer(self.buffer, None);
        }
    }
}

/// Convert BufferUsage to Vulkan usage flags
pub(crate) fn buffer_usage_to_vk(usage: BufferUsage) -> vk::BufferUsageFlags {
    let mut flags = vk::BufferUsageFlags::empty();
    if usage.contains(BufferUsage::STORAGE) { flags |= vk::BufferUsageFlags::STORAGE_BUFFER; }
    if usage.contains(BufferUsage::INDIRECT) { flags |= vk::BufferUsageFlags::INDIRECT_BUFFER; }
    if usage.contains(BufferUsage::TRANSFER_SRC) { flags |= vk::BufferUsageFlags::TRANSFER_SRC; }
    if usage.contains(BufferUsage::TRANSFER_DST) { flags |= vk::BufferUsageFlags::TRANSFER_DST; }
    flags
}

/// Convert MemoryLocation to a gpu-allocator location
pub(crate) fn memory_location_to_gpu_allocator(location: MemoryLocation) -> gpu_allocator::MemoryLocation {
    match location {
        MemoryLocation::HostVisible => gpu_allocator::MemoryLocation::CpuToGpu,
        MemoryLocation::DeviceLocal => gpu_allocator::MemoryLocation::GpuOnly,
    }
}
