/// Mock GraphicsDevice for unit tests (no GPU required)
///
/// Buffers keep their bytes in memory so tests can read back what the
/// culling strategies wrote. Command lists record every call as a
/// `MockCommand` instead of executing it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::error::{Error, Result};
use crate::engine_bail;
use crate::graphics_device::{
    GraphicsDevice, Buffer, Shader, Pipeline, CommandList, BindingGroup,
    BufferDesc, BufferUsage, MemoryLocation, ShaderDesc, ComputePipelineDesc,
    BindingGroupLayoutDesc, BindingResource, BufferBarrier,
    PipelineStages, AccessFlags,
};

/// Identity of a buffer object, used to compare recorded commands
pub fn buffer_id(buffer: &dyn Buffer) -> usize {
    buffer as *const dyn Buffer as *const () as usize
}

// ============================================================================
// Mock Buffer
// ============================================================================

#[derive(Debug)]
pub struct MockBuffer {
    pub size: u64,
    pub name: String,
    pub usage: BufferUsage,
    pub location: MemoryLocation,
    data: Mutex<Vec<u8>>,
}

impl MockBuffer {
    pub fn new(size: u64, name: String, usage: BufferUsage, location: MemoryLocation) -> Self {
        Self {
            size,
            name,
            usage,
            location,
            data: Mutex::new(vec![0u8; size as usize]),
        }
    }

    /// Copy of the current buffer contents
    pub fn contents(&self) -> Vec<u8> {
        self.data.lock().unwrap().clone()
    }
}

impl Buffer for MockBuffer {
    fn update(&self, offset: u64, data: &[u8]) -> Result<()> {
        if self.location != MemoryLocation::HostVisible {
            engine_bail!("stellar::mock", "update on device-local buffer '{}'", self.name);
        }
        let end = offset + data.len() as u64;
        if end > self.size {
            engine_bail!("stellar::mock",
                "update out of range on '{}': {}..{} (size {})",
                self.name, offset, end, self.size);
        }
        self.data.lock().unwrap()[offset as usize..end as usize].copy_from_slice(data);
        Ok(())
    }

    fn mapped_ptr(&self) -> Option<*mut u8> {
        match self.location {
            MemoryLocation::HostVisible => Some(self.data.lock().unwrap().as_mut_ptr()),
            MemoryLocation::DeviceLocal => None,
        }
    }

    fn size(&self) -> u64 {
        self.size
    }
}

// ============================================================================
// Mock Shader
// ============================================================================

#[derive(Debug)]
pub struct MockShader {
    pub entry_point: String,
    pub code_size: usize,
}

impl Shader for MockShader {
    fn entry_point(&self) -> &str {
        &self.entry_point
    }
}

// ============================================================================
// Mock Pipeline
// ============================================================================

#[derive(Debug)]
pub struct MockPipeline {
    pub name: String,
    pub layouts: Vec<BindingGroupLayoutDesc>,
}

impl Pipeline for MockPipeline {
    fn binding_group_layout_count(&self) -> u32 {
        self.layouts.len() as u32
    }

    fn binding_group_layout(&self, set_index: u32) -> Option<&BindingGroupLayoutDesc> {
        self.layouts.get(set_index as usize)
    }
}

// ============================================================================
// Mock BindingGroup
// ============================================================================

#[derive(Debug)]
pub struct MockBindingGroup {
    pub set_index: u32,
    /// `buffer_id` of each bound buffer, in binding order
    pub buffers: Vec<usize>,
}

impl BindingGroup for MockBindingGroup {
    fn set_index(&self) -> u32 {
        self.set_index
    }
}

// ============================================================================
// Mock CommandList
// ============================================================================

/// Recorded barrier, with the buffer replaced by its `buffer_id`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockBarrier {
    pub buffer: usize,
    pub offset: u64,
    pub size: Option<u64>,
    pub src_stages: PipelineStages,
    pub src_access: AccessFlags,
    pub dst_stages: PipelineStages,
    pub dst_access: AccessFlags,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCommand {
    Begin,
    End,
    BindComputePipeline,
    BindComputeBindingGroup { set_index: u32 },
    Dispatch { x: u32, y: u32, z: u32 },
    FillBuffer { buffer: usize, offset: u64, size: u64, value: u32 },
    CopyBuffer { src: usize, src_offset: u64, dst: usize, dst_offset: u64, size: u64 },
    PipelineBarrier(Vec<MockBarrier>),
    DrawIndexedIndirectCount {
        buffer: usize,
        offset: u64,
        count_buffer: usize,
        count_offset: u64,
        max_draw_count: u32,
        stride: u32,
    },
}

#[derive(Debug, Default)]
pub struct MockCommandList {
    pub commands: Vec<MockCommand>,
}

impl MockCommandList {
    pub fn new() -> Self {
        Self { commands: Vec::new() }
    }
}

impl CommandList for MockCommandList {
    fn begin(&mut self) -> Result<()> {
        self.commands.push(MockCommand::Begin);
        Ok(())
    }

    fn end(&mut self) -> Result<()> {
        self.commands.push(MockCommand::End);
        Ok(())
    }

    fn bind_compute_pipeline(&mut self, _pipeline: &Arc<dyn Pipeline>) -> Result<()> {
        self.commands.push(MockCommand::BindComputePipeline);
        Ok(())
    }

    fn bind_compute_binding_group(
        &mut self,
        _pipeline: &Arc<dyn Pipeline>,
        set_index: u32,
        _binding_group: &Arc<dyn BindingGroup>,
    ) -> Result<()> {
        self.commands.push(MockCommand::BindComputeBindingGroup { set_index });
        Ok(())
    }

    fn dispatch(&mut self, x: u32, y: u32, z: u32) -> Result<()> {
        self.commands.push(MockCommand::Dispatch { x, y, z });
        Ok(())
    }

    fn fill_buffer(&mut self, buffer: &dyn Buffer, offset: u64, size: u64, value: u32) -> Result<()> {
        self.commands.push(MockCommand::FillBuffer {
            buffer: buffer_id(buffer),
            offset,
            size,
            value,
        });
        Ok(())
    }

    fn copy_buffer(
        &mut self,
        src: &dyn Buffer,
        src_offset: u64,
        dst: &dyn Buffer,
        dst_offset: u64,
        size: u64,
    ) -> Result<()> {
        self.commands.push(MockCommand::CopyBuffer {
            src: buffer_id(src),
            src_offset,
            dst: buffer_id(dst),
            dst_offset,
            size,
        });
        Ok(())
    }

    fn pipeline_barrier(&mut self, barriers: &[BufferBarrier]) -> Result<()> {
        let recorded = barriers
            .iter()
            .map(|b| MockBarrier {
                buffer: buffer_id(b.buffer),
                offset: b.offset,
                size: b.size,
                src_stages: b.src_stages,
                src_access: b.src_access,
                dst_stages: b.dst_stages,
                dst_access: b.dst_access,
            })
            .collect();
        self.commands.push(MockCommand::PipelineBarrier(recorded));
        Ok(())
    }

    fn draw_indexed_indirect_count(
        &mut self,
        buffer: &dyn Buffer,
        offset: u64,
        count_buffer: &dyn Buffer,
        count_offset: u64,
        max_draw_count: u32,
        stride: u32,
    ) -> Result<()> {
        self.commands.push(MockCommand::DrawIndexedIndirectCount {
            buffer: buffer_id(buffer),
            offset,
            count_buffer: buffer_id(count_buffer),
            count_offset,
            max_draw_count,
            stride,
        });
        Ok(())
    }
}

// ============================================================================
// Mock GraphicsDevice
// ============================================================================

/// Mock GraphicsDevice that tracks created resources without GPU
#[derive(Debug, Default)]
pub struct MockGraphicsDevice {
    /// Every buffer created, in creation order
    pub created_buffers: Arc<Mutex<Vec<Arc<MockBuffer>>>>,
    /// Names of created pipelines
    pub created_pipelines: Arc<Mutex<Vec<String>>>,
    /// Number of binding groups created
    pub binding_group_count: Arc<Mutex<u32>>,
    /// Number of submitted command lists
    pub submit_count: Arc<Mutex<u32>>,
    /// When set, buffer creation fails with `OutOfMemory`
    pub fail_buffer_allocations: Arc<AtomicBool>,
}

impl MockGraphicsDevice {
    /// Create a new mock graphics device
    pub fn new() -> Self {
        Self::default()
    }

    /// Names of created buffers
    pub fn created_buffer_names(&self) -> Vec<String> {
        self.created_buffers.lock().unwrap().iter().map(|b| b.name.clone()).collect()
    }

    /// Find the most recently created buffer whose name starts with `prefix`
    pub fn last_buffer_named(&self, prefix: &str) -> Option<Arc<MockBuffer>> {
        self.created_buffers
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|b| b.name.starts_with(prefix))
            .cloned()
    }

    /// Find a created buffer by its `buffer_id`
    pub fn buffer_by_id(&self, id: usize) -> Option<Arc<MockBuffer>> {
        self.created_buffers
            .lock()
            .unwrap()
            .iter()
            .find(|b| buffer_id(&***b) == id)
            .cloned()
    }
}

impl GraphicsDevice for MockGraphicsDevice {
    fn create_buffer(&mut self, desc: BufferDesc) -> Result<Arc<dyn Buffer>> {
        if self.fail_buffer_allocations.load(Ordering::Relaxed) {
            return Err(Error::OutOfMemory);
        }
        if desc.size == 0 {
            engine_bail!("stellar::mock", "create_buffer: zero-sized buffer '{}'", desc.name);
        }
        let buffer = Arc::new(MockBuffer::new(desc.size, desc.name, desc.usage, desc.location));
        self.created_buffers.lock().unwrap().push(Arc::clone(&buffer));
        Ok(buffer)
    }

    fn create_shader(&mut self, desc: ShaderDesc) -> Result<Arc<dyn Shader>> {
        if desc.code.is_empty() || desc.code.len() % 4 != 0 {
            return Err(Error::InvalidResource(format!(
                "shader bytecode length {} is not a multiple of 4", desc.code.len()
            )));
        }
        Ok(Arc::new(MockShader {
            entry_point: desc.entry_point,
            code_size: desc.code.len(),
        }))
    }

    fn create_compute_pipeline(&mut self, desc: ComputePipelineDesc) -> Result<Arc<dyn Pipeline>> {
        self.created_pipelines.lock().unwrap().push(desc.name.clone());
        Ok(Arc::new(MockPipeline {
            name: desc.name,
            layouts: desc.binding_layouts,
        }))
    }

    fn create_binding_group(
        &self,
        pipeline: &Arc<dyn Pipeline>,
        set_index: u32,
        resources: &[BindingResource],
    ) -> Result<Arc<dyn BindingGroup>> {
        let layout = match pipeline.binding_group_layout(set_index) {
            Some(layout) => layout,
            None => engine_bail!("stellar::mock",
                "create_binding_group: pipeline has no set {}", set_index),
        };
        if layout.entries.len() != resources.len() {
            engine_bail!("stellar::mock",
                "create_binding_group: set {} expects {} resources, got {}",
                set_index, layout.entries.len(), resources.len());
        }

        let buffers = resources
            .iter()
            .map(|r| match r {
                BindingResource::StorageBuffer(b) => buffer_id(*b),
            })
            .collect();

        *self.binding_group_count.lock().unwrap() += 1;
        Ok(Arc::new(MockBindingGroup { set_index, buffers }))
    }

    fn create_command_list(&self) -> Result<Box<dyn CommandList>> {
        Ok(Box::new(MockCommandList::new()))
    }

    fn submit(&self, commands: &[&dyn CommandList]) -> Result<()> {
        *self.submit_count.lock().unwrap() += commands.len() as u32;
        Ok(())
    }

    fn wait_idle(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
#[path = "mock_graphics_device_tests.rs"]
mod tests;
