/// Shader trait and shader descriptor

/// Descriptor for creating a compute shader module
#[derive(Debug, Clone)]
pub struct ShaderDesc<'a> {
    /// Compiled shader bytecode (SPIR-V)
    pub code: &'a [u8],
    /// Entry point function name
    pub entry_point: String,
}

/// Shader resource trait
///
/// Implemented by backend-specific shader types (e.g., VulkanShader).
/// The shader is automatically destroyed when dropped.
pub trait Shader: Send + Sync {
    /// Entry point the module was created with
    fn entry_point(&self) -> &str;
}
