/// GraphicsDevice trait - factory for GPU resources and command submission

use std::sync::Arc;
use crate::error::Result;
use crate::graphics_device::{
    Buffer, Shader, Pipeline, BindingGroup, CommandList,
    BufferDesc, ShaderDesc, ComputePipelineDesc, BindingResource,
};

/// Main graphics device trait
///
/// This is the central factory interface for creating GPU resources and
/// submitting commands. Implemented by backend-specific devices
/// (e.g., VulkanGraphicsDevice). Shared as `Arc<Mutex<dyn GraphicsDevice>>`.
pub trait GraphicsDevice: Send + Sync {
    /// Create a buffer
    ///
    /// # Arguments
    ///
    /// * `desc` - Buffer descriptor
    ///
    /// # Returns
    ///
    /// A shared pointer to the created buffer
    fn create_buffer(&mut self, desc: BufferDesc) -> Result<Arc<dyn Buffer>>;

    /// Create a shader module from compiled bytecode
    fn create_shader(&mut self, desc: ShaderDesc) -> Result<Arc<dyn Shader>>;

    /// Create a compute pipeline
    fn create_compute_pipeline(&mut self, desc: ComputePipelineDesc) -> Result<Arc<dyn Pipeline>>;

    /// Create an immutable binding group for one set of a pipeline
    ///
    /// # Arguments
    ///
    /// * `pipeline` - Pipeline whose layout describes the set
    /// * `set_index` - Set index in the pipeline layout
    /// * `resources` - One resource per binding, in binding order
    fn create_binding_group(
        &self,
        pipeline: &Arc<dyn Pipeline>,
        set_index: u32,
        resources: &[BindingResource],
    ) -> Result<Arc<dyn BindingGroup>>;

    /// Create a command list for recording commands
    fn create_command_list(&self) -> Result<Box<dyn CommandList>>;

    /// Submit command lists for execution on the GPU
    fn submit(&self, commands: &[&dyn CommandList]) -> Result<()>;

    /// Wait for all GPU operations to complete
    fn wait_idle(&self) -> Result<()>;
}
