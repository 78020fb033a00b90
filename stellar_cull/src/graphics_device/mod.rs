/// Graphics device module - backend-agnostic GPU resource traits

// Module declarations
pub mod graphics_device;
pub mod buffer;
pub mod shader;
pub mod pipeline;
pub mod binding_group;
pub mod command_list;

// Re-export everything from graphics_device.rs
pub use graphics_device::*;

// Re-export from other modules
pub use buffer::*;
pub use shader::*;
pub use pipeline::*;
pub use binding_group::*;
pub use command_list::*;

// Mock graphics device for tests (no GPU required)
#[cfg(test)]
pub mod mock_graphics_device;
