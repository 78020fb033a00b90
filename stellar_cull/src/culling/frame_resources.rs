/// Per-frame-in-flight buffer sets.
///
/// Frame `f` writes slot `f % frames_in_flight`. A slot is never shared
/// between frames; the caller's fences decide when a slot may be reused.

use std::sync::{Arc, Mutex};
use crate::error::Result;
use crate::graphics_device::{
    self, BindingGroup, BindingResource, Buffer, BufferDesc, BufferUsage,
    MemoryLocation, Pipeline,
};
use crate::{engine_err, engine_info};
use super::draw::{cull_input_buffer_size, indirect_buffer_size, per_draw_buffer_size};

const SOURCE: &str = "stellar::FrameResources";

/// GPU-mode extras of a frame slot
struct GpuSlotResources {
    /// Host-visible kernel input (header + object descriptors)
    input_buffer: Arc<dyn Buffer>,
    /// Set 0 of the compaction kernel: input, indirect, per-draw
    binding_group: Arc<dyn BindingGroup>,
}

/// Buffers of one frame in flight
pub struct FrameSlot {
    index: usize,
    capacity: u32,
    indirect_buffer: Arc<dyn Buffer>,
    per_draw_buffer: Arc<dyn Buffer>,
    gpu: Option<GpuSlotResources>,
}

impl FrameSlot {
    /// Slot position, 0..frames_in_flight
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of draws the buffers can hold
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn indirect_buffer(&self) -> &Arc<dyn Buffer> {
        &self.indirect_buffer
    }

    pub fn per_draw_buffer(&self) -> &Arc<dyn Buffer> {
        &self.per_draw_buffer
    }

    /// Kernel input buffer (GPU mode only)
    pub fn input_buffer(&self) -> Option<&Arc<dyn Buffer>> {
        self.gpu.as_ref().map(|gpu| &gpu.input_buffer)
    }

    /// Kernel binding group (GPU mode only)
    pub fn binding_group(&self) -> Option<&Arc<dyn BindingGroup>> {
        self.gpu.as_ref().map(|gpu| &gpu.binding_group)
    }
}

/// Arena of frame slots
pub struct FrameResources {
    graphics_device: Arc<Mutex<dyn graphics_device::GraphicsDevice>>,
    /// Compaction pipeline; Some selects the GPU layout
    pipeline: Option<Arc<dyn Pipeline>>,
    slots: Vec<FrameSlot>,
}

impl FrameResources {
    /// Allocate `frames_in_flight` slots of `capacity` draws each.
    ///
    /// With a pipeline, outputs are device-local and every slot gets a
    /// kernel input buffer and binding group; without one, outputs are
    /// host-visible and mapped.
    pub fn new(
        graphics_device: Arc<Mutex<dyn graphics_device::GraphicsDevice>>,
        frames_in_flight: u32,
        capacity: u32,
        pipeline: Option<Arc<dyn Pipeline>>,
    ) -> Result<Self> {
        let mut resources = Self {
            graphics_device,
            pipeline,
            slots: Vec::with_capacity(frames_in_flight as usize),
        };

        for index in 0..frames_in_flight as usize {
            let slot = resources.create_slot(index, capacity)?;
            resources.slots.push(slot);
        }

        engine_info!(SOURCE, "Created {} frame slots ({} mode, capacity {})",
            frames_in_flight,
            if resources.pipeline.is_some() { "gpu" } else { "cpu" },
            capacity);

        Ok(resources)
    }

    pub fn frames_in_flight(&self) -> usize {
        self.slots.len()
    }

    /// Slot index used by a frame
    pub fn slot_index(&self, frame_index: u64) -> usize {
        (frame_index % self.slots.len() as u64) as usize
    }

    /// Slot used by a frame
    pub fn slot(&self, frame_index: u64) -> &FrameSlot {
        &self.slots[self.slot_index(frame_index)]
    }

    /// Make sure a frame's slot can hold `required` draws.
    ///
    /// Grows to the next power of two. Only this frame's slot is replaced;
    /// the others keep their buffers. Returns true if the slot was grown.
    pub fn ensure_capacity(&mut self, frame_index: u64, required: u32) -> Result<bool> {
        let index = self.slot_index(frame_index);
        let current = self.slots[index].capacity;
        if required <= current {
            return Ok(false);
        }

        let capacity = required.checked_next_power_of_two().unwrap_or(u32::MAX);
        let slot = self.create_slot(index, capacity)?;
        self.slots[index] = slot;

        engine_info!(SOURCE, "Frame slot {} grown from {} to {} draws", index, current, capacity);
        Ok(true)
    }

    fn create_slot(&self, index: usize, capacity: u32) -> Result<FrameSlot> {
        let mut device = self.graphics_device.lock()
            .map_err(|_| engine_err!(SOURCE, "Graphics device mutex poisoned"))?;

        let (output_location, extra_usage) = match self.pipeline {
            Some(_) => (
                MemoryLocation::DeviceLocal,
                BufferUsage::TRANSFER_DST | BufferUsage::TRANSFER_SRC,
            ),
            None => (MemoryLocation::HostVisible, BufferUsage::empty()),
        };

        let indirect_buffer = device.create_buffer(BufferDesc {
            size: indirect_buffer_size(capacity),
            usage: BufferUsage::INDIRECT | BufferUsage::STORAGE | extra_usage,
            location: output_location,
            name: format!("cull_indirect_{}", index),
        })?;

        let per_draw_buffer = device.create_buffer(BufferDesc {
            size: per_draw_buffer_size(capacity),
            usage: BufferUsage::STORAGE | extra_usage,
            location: output_location,
            name: format!("cull_per_draw_{}", index),
        })?;

        let gpu = match &self.pipeline {
            Some(pipeline) => {
                let input_buffer = device.create_buffer(BufferDesc {
                    size: cull_input_buffer_size(capacity),
                    usage: BufferUsage::STORAGE,
                    location: MemoryLocation::HostVisible,
                    name: format!("cull_input_{}", index),
                })?;

                let binding_group = device.create_binding_group(
                    pipeline,
                    0,
                    &[
                        BindingResource::StorageBuffer(input_buffer.as_ref()),
                        BindingResource::StorageBuffer(indirect_buffer.as_ref()),
                        BindingResource::StorageBuffer(per_draw_buffer.as_ref()),
                    ],
                )?;

                Some(GpuSlotResources { input_buffer, binding_group })
            }
            None => None,
        };

        Ok(FrameSlot {
            index,
            capacity,
            indirect_buffer,
            per_draw_buffer,
            gpu,
        })
    }
}

#[cfg(test)]
#[path = "frame_resources_tests.rs"]
mod tests;
