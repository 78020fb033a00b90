/// Single-threaded CPU culling.

use crate::camera::Frustum;
use crate::error::Result;
use crate::graphics_device::CommandList;
use super::config::CullingMode;
use super::frame_resources::FrameSlot;
use super::strategy::{CpuDrawList, CullInput, CullingStrategy, DrawCount, StrategyOutcome};

/// Transforms and tests every object on the calling thread, then copies
/// the survivors into the frame slot.
///
/// The survivor list is kept between frames so its allocation is reused.
#[derive(Debug, Default)]
pub struct CpuSerialCulling {
    draws: CpuDrawList,
}

impl CpuSerialCulling {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CullingStrategy for CpuSerialCulling {
    fn mode(&self) -> CullingMode {
        CullingMode::CpuSerial
    }

    fn cull(
        &mut self,
        frustum: &Frustum,
        input: &CullInput,
        slot: &FrameSlot,
        _cmd: &mut dyn CommandList,
    ) -> Result<StrategyOutcome> {
        self.draws.clear();
        let skipped_objects = self.draws.cull_objects(input.objects.as_slice(), frustum, input, true);
        let count = self.draws.write_to(slot)?;

        Ok(StrategyOutcome {
            draw_count: DrawCount::Known(count),
            skipped_objects,
        })
    }

    fn visible_object_indices(&self) -> Option<&[u32]> {
        Some(self.draws.object_indices())
    }
}
