/// CullingStrategy trait and the types shared by all strategies.

use std::sync::Arc;
use crate::camera::{Camera, Frustum};
use crate::error::Result;
use crate::graphics_device::{Buffer, CommandList, Pipeline};
use crate::scene::{
    MeshBounds, MeshTable, ObjectTable, RenderableObject, Transform, TransformStore,
};
use super::config::CullingMode;
use super::draw::{DrawIndexedIndirectCommand, PerDrawInfo, DRAW_COUNT_OFFSET, DRAW_COMMANDS_OFFSET};
use super::frame_resources::FrameSlot;

/// Everything one culling pass reads. Nothing here is copied or retained.
#[derive(Clone, Copy)]
pub struct CullInput<'a> {
    pub camera: &'a Camera,
    pub objects: &'a ObjectTable,
    pub transforms: &'a dyn TransformStore,
    pub meshes: &'a MeshTable,
}

/// Survivor count of a pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawCount {
    /// Count known on the CPU (CPU strategies)
    Known(u32),
    /// Count only exists in the indirect buffer on the GPU
    GpuResident,
}

impl DrawCount {
    /// CPU-side count, if known
    pub fn known(&self) -> Option<u32> {
        match self {
            DrawCount::Known(count) => Some(*count),
            DrawCount::GpuResident => None,
        }
    }
}

/// What a strategy reports back for one pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrategyOutcome {
    pub draw_count: DrawCount,
    /// Objects without a transform or a known mesh
    pub skipped_objects: u32,
}

/// Result of `CullingSystem::cull`: the count and the buffers to draw from
#[derive(Clone)]
pub struct CullOutput {
    pub draw_count: DrawCount,
    /// `[u32 count][DrawIndexedIndirectCommand × N]`
    pub indirect_buffer: Arc<dyn Buffer>,
    /// `[u32 object_index × N]`, index-aligned with the commands
    pub per_draw_buffer: Arc<dyn Buffer>,
}

/// One interchangeable culling algorithm.
///
/// Selected once by `CullingMode` and held as `Box<dyn CullingStrategy>`.
/// Every strategy writes the same buffer layout into the frame slot.
pub trait CullingStrategy: Send + Sync {
    fn mode(&self) -> CullingMode;

    /// Run one pass for `input` into `slot`.
    ///
    /// CPU strategies write through the slot's host-visible buffers; the GPU
    /// strategy records its work into `cmd` and returns without waiting.
    fn cull(
        &mut self,
        frustum: &Frustum,
        input: &CullInput,
        slot: &FrameSlot,
        cmd: &mut dyn CommandList,
    ) -> Result<StrategyOutcome>;

    /// Object indices that survived the last pass, when known on the CPU
    fn visible_object_indices(&self) -> Option<&[u32]> {
        None
    }

    /// Compute pipeline whose set 0 the frame slots must bind
    fn compute_pipeline(&self) -> Option<&Arc<dyn Pipeline>> {
        None
    }
}

/// Transform and mesh of an object, or None if either cannot be found
pub(crate) fn resolve<'a>(
    object: &RenderableObject,
    transforms: &dyn TransformStore,
    meshes: &'a MeshTable,
) -> Option<(Transform, &'a MeshBounds)> {
    let transform = transforms.transform(object.entity)?;
    let mesh = meshes.get(object.mesh)?;
    Some((transform, mesh))
}

// ===== CPU DRAW LIST =====

/// Host-side survivor list of the CPU strategies.
///
/// Commands and infos are always pushed together, so index `i` of both
/// vectors describes the same draw.
#[derive(Debug, Default)]
pub struct CpuDrawList {
    commands: Vec<DrawIndexedIndirectCommand>,
    infos: Vec<PerDrawInfo>,
}

impl CpuDrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
        self.infos.clear();
    }

    pub fn push(&mut self, object: &RenderableObject, mesh: &MeshBounds) {
        self.commands.push(DrawIndexedIndirectCommand::for_mesh(mesh));
        self.infos.push(PerDrawInfo { object_index: object.object_index });
    }

    /// Move all draws of `other` to the end of this list
    pub fn append(&mut self, other: &mut CpuDrawList) {
        self.commands.append(&mut other.commands);
        self.infos.append(&mut other.infos);
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn commands(&self) -> &[DrawIndexedIndirectCommand] {
        &self.commands
    }

    pub fn object_indices(&self) -> &[u32] {
        bytemuck::cast_slice(&self.infos)
    }

    /// Cull `objects` into this list and return how many were skipped.
    ///
    /// With `test_visibility == false` every resolvable object is kept and the
    /// frustum is never consulted.
    pub fn cull_objects(
        &mut self,
        objects: &[RenderableObject],
        frustum: &Frustum,
        input: &CullInput,
        test_visibility: bool,
    ) -> u32 {
        let mut skipped = 0;
        for object in objects {
            let Some((transform, mesh)) = resolve(object, input.transforms, input.meshes) else {
                skipped += 1;
                continue;
            };
            if test_visibility {
                let world = mesh.aabb.transformed_by(&transform);
                if !frustum.intersects_aabb(&world) {
                    continue;
                }
            }
            self.push(object, mesh);
        }
        skipped
    }

    /// Write the count, commands and per-draw infos into a frame slot.
    pub fn write_to(&self, slot: &FrameSlot) -> Result<u32> {
        let count = self.commands.len() as u32;
        slot.indirect_buffer().update(DRAW_COUNT_OFFSET, bytemuck::bytes_of(&count))?;
        if count > 0 {
            slot.indirect_buffer().update(DRAW_COMMANDS_OFFSET, bytemuck::cast_slice(&self.commands))?;
            slot.per_draw_buffer().update(0, bytemuck::cast_slice(&self.infos))?;
        }
        Ok(count)
    }
}
