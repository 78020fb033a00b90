/// Compute pipeline trait and descriptor

use std::sync::Arc;
use crate::graphics_device::{BindingGroupLayoutDesc, Shader};

/// Descriptor for creating a compute pipeline
#[derive(Clone)]
pub struct ComputePipelineDesc {
    /// Compute shader module
    pub shader: Arc<dyn Shader>,
    /// One layout per descriptor set, in set order
    pub binding_layouts: Vec<BindingGroupLayoutDesc>,
    /// Debug name
    pub name: String,
}

/// Pipeline resource trait
///
/// Implemented by backend-specific pipeline types (e.g., VulkanComputePipeline).
/// The pipeline is automatically destroyed when dropped.
pub trait Pipeline: Send + Sync {
    /// Number of binding group layouts (descriptor sets) the pipeline declares
    fn binding_group_layout_count(&self) -> u32;

    /// Layout of one binding group, if the set exists
    fn binding_group_layout(&self, set_index: u32) -> Option<&BindingGroupLayoutDesc>;
}
