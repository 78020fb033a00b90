/*!
# Stellar Cull

Frustum culling and indirect draw compaction for a GPU-driven renderer.

Each frame, the objects of a scene are tested against the camera frustum and
the survivors are compacted into a count-prefixed indirect draw buffer plus
an index-aligned per-draw buffer, ready for a single indexed indirect-count
draw. The test runs with one of four interchangeable strategies:

- **Off**: every object is drawn, no test
- **CpuSerial**: one thread walks the object table
- **CpuParallel**: chunks of the table are culled on a worker pool
- **GpuCompute**: a compute kernel culls and appends survivors on the GPU

## Architecture

- **CullingSystem**: per-frame entry point, owns the strategy and frame slots
- **GraphicsDevice**: backend-agnostic device trait (buffers, compute pipelines, command lists)
- **JobSystem**: worker pool trait used by the parallel strategy
- **Camera / Frustum**: view planes extracted from the view-projection matrix
- **ObjectTable / TransformStore / MeshTable**: the scene data being culled

Backends (Vulkan) implement `GraphicsDevice` in their own crate.
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod camera;
pub mod scene;
pub mod graphics_device;
pub mod job_system;
pub mod culling;

// Main stellar namespace module
pub mod stellar {
    // Error types
    pub use crate::error::{Error, Result};

    // Engine singleton
    pub use crate::engine::Engine;

    // Logging sub-module (types only, NOT macros)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    pub mod camera {
        pub use crate::camera::*;
    }

    pub mod scene {
        pub use crate::scene::*;
    }

    pub mod device {
        pub use crate::graphics_device::*;
    }

    pub mod jobs {
        pub use crate::job_system::*;
    }

    pub mod culling {
        pub use crate::culling::*;
    }
}

// Re-export math library at crate root
pub use glam;
