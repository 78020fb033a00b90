/// BindingGroup trait and binding layout description
///
/// A BindingGroup is an immutable set of GPU resource bindings (buffers).
/// It is the abstraction over GPU descriptor sets, inspired by WebGPU's
/// GPUBindGroup:
/// - Immutable after creation
/// - Layout deduced from the Pipeline
/// - Pool managed internally by the device

use crate::graphics_device::Buffer;

// ============================================================================
// Binding types and layout description
// ============================================================================

/// Type of resource bound at a given slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingType {
    /// Storage buffer (read/write for compute shaders)
    StorageBuffer,
}

/// Description of a single binding slot within a BindingGroupLayout
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingSlotDesc {
    /// Binding number (corresponds to `layout(binding = N)` in GLSL)
    pub binding: u32,
    /// Type of resource at this binding
    pub binding_type: BindingType,
}

/// Description of a BindingGroup layout (blueprint for a set of bindings)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BindingGroupLayoutDesc {
    /// Binding slot descriptions
    pub entries: Vec<BindingSlotDesc>,
}

impl BindingGroupLayoutDesc {
    /// Layout of `count` storage buffers at bindings 0..count
    pub fn storage_buffers(count: u32) -> Self {
        Self {
            entries: (0..count)
                .map(|binding| BindingSlotDesc {
                    binding,
                    binding_type: BindingType::StorageBuffer,
                })
                .collect(),
        }
    }
}

// ============================================================================
// Binding resources (concrete data passed at creation time)
// ============================================================================

/// A concrete resource to bind into a BindingGroup
pub enum BindingResource<'a> {
    /// Storage buffer binding
    StorageBuffer(&'a dyn Buffer),
}

// ============================================================================
// BindingGroup trait
// ============================================================================

/// An immutable set of GPU resource bindings.
///
/// Once created, a BindingGroup cannot be modified; create a new one
/// to change resources.
pub trait BindingGroup: Send + Sync {
    /// Returns the set index this BindingGroup was created for
    fn set_index(&self) -> u32;
}
