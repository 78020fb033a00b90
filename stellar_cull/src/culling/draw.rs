/// GPU-facing records: indirect draw commands, per-draw info and the
/// compaction kernel's input layout.
///
/// Every struct here is `#[repr(C)]` + `Pod` and matches the std430 layout
/// declared in `shaders/frustum_cull.comp`.

use bytemuck::{Pod, Zeroable};
use crate::camera::Frustum;
use crate::scene::{MeshBounds, RenderableObject, Transform};

/// GLSL source of the compaction kernel
pub const FRUSTUM_CULL_KERNEL_GLSL: &str = include_str!("../../shaders/frustum_cull.comp");

/// Workgroup size of the compaction kernel (`local_size_x`)
pub const CULL_WORKGROUP_SIZE: u32 = 64;

/// Byte offset of the survivor count in the indirect buffer
pub const DRAW_COUNT_OFFSET: u64 = 0;

/// Byte offset of the first draw command in the indirect buffer
pub const DRAW_COMMANDS_OFFSET: u64 = 4;

/// Size of one `DrawIndexedIndirectCommand`
pub const DRAW_COMMAND_STRIDE: u32 = std::mem::size_of::<DrawIndexedIndirectCommand>() as u32;

/// Byte offset of the first object descriptor in the kernel input buffer
pub const OBJECT_DESCRIPTORS_OFFSET: u64 = std::mem::size_of::<GpuCullHeader>() as u64;

/// Arguments of one indexed indirect draw (VkDrawIndexedIndirectCommand)
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Pod, Zeroable)]
pub struct DrawIndexedIndirectCommand {
    pub index_count: u32,
    /// Always 1
    pub instance_count: u32,
    pub first_index: u32,
    pub vertex_offset: i32,
    /// Always 0
    pub first_instance: u32,
}

impl DrawIndexedIndirectCommand {
    /// Single-instance draw of a mesh's index range
    pub fn for_mesh(mesh: &MeshBounds) -> Self {
        Self {
            index_count: mesh.index_count,
            instance_count: 1,
            first_index: mesh.first_index,
            vertex_offset: mesh.vertex_offset,
            first_instance: 0,
        }
    }
}

/// Per-draw metadata, index-aligned with the draw commands
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Pod, Zeroable)]
pub struct PerDrawInfo {
    pub object_index: u32,
}

/// Kernel input header: frustum planes and object count
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct GpuCullHeader {
    pub planes: [[f32; 4]; 6],
    pub object_count: u32,
    pub _pad: [u32; 3],
}

impl GpuCullHeader {
    pub fn new(frustum: &Frustum, object_count: u32) -> Self {
        Self {
            planes: frustum.to_gpu_planes(),
            object_count,
            _pad: [0; 3],
        }
    }
}

/// Everything the kernel needs to cull and emit one object
///
/// The rotation matrix is uploaded as three columns so the kernel does no
/// trigonometry. `w` components are unused.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct GpuObjectDescriptor {
    pub position: [f32; 4],
    pub rotation: [[f32; 4]; 3],
    pub scale: [f32; 4],
    pub aabb_min: [f32; 4],
    pub aabb_max: [f32; 4],
    pub command: DrawIndexedIndirectCommand,
    pub object_index: u32,
    pub _pad: [u32; 2],
}

impl GpuObjectDescriptor {
    pub fn new(object: &RenderableObject, transform: &Transform, mesh: &MeshBounds) -> Self {
        let rotation = transform.rotation_matrix();
        Self {
            position: transform.position.extend(0.0).to_array(),
            rotation: [
                rotation.x_axis.extend(0.0).to_array(),
                rotation.y_axis.extend(0.0).to_array(),
                rotation.z_axis.extend(0.0).to_array(),
            ],
            scale: transform.scale.extend(0.0).to_array(),
            aabb_min: mesh.aabb.min.extend(0.0).to_array(),
            aabb_max: mesh.aabb.max.extend(0.0).to_array(),
            command: DrawIndexedIndirectCommand::for_mesh(mesh),
            object_index: object.object_index,
            _pad: [0; 2],
        }
    }
}

// ===== BUFFER SIZES =====

/// Indirect buffer size for `capacity` draws: count + commands
pub fn indirect_buffer_size(capacity: u32) -> u64 {
    DRAW_COMMANDS_OFFSET + capacity as u64 * DRAW_COMMAND_STRIDE as u64
}

/// Per-draw buffer size for `capacity` draws
pub fn per_draw_buffer_size(capacity: u32) -> u64 {
    capacity as u64 * std::mem::size_of::<PerDrawInfo>() as u64
}

/// Kernel input buffer size for `capacity` objects
pub fn cull_input_buffer_size(capacity: u32) -> u64 {
    OBJECT_DESCRIPTORS_OFFSET
        + capacity as u64 * std::mem::size_of::<GpuObjectDescriptor>() as u64
}

#[cfg(test)]
#[path = "draw_tests.rs"]
mod tests;
