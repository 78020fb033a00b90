/// Culling disabled: every resolvable object is drawn in table order.

use crate::camera::Frustum;
use crate::error::Result;
use crate::graphics_device::CommandList;
use super::config::CullingMode;
use super::frame_resources::FrameSlot;
use super::strategy::{CpuDrawList, CullInput, CullingStrategy, DrawCount, StrategyOutcome};

/// Baseline strategy; the frustum is never tested.
#[derive(Debug, Default)]
pub struct DisabledCulling {
    draws: CpuDrawList,
}

impl DisabledCulling {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CullingStrategy for DisabledCulling {
    fn mode(&self) -> CullingMode {
        CullingMode::Off
    }

    fn cull(
        &mut self,
        frustum: &Frustum,
        input: &CullInput,
        slot: &FrameSlot,
        _cmd: &mut dyn CommandList,
    ) -> Result<StrategyOutcome> {
        self.draws.clear();
        let skipped_objects = self.draws.cull_objects(input.objects.as_slice(), frustum, input, false);
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
