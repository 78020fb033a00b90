/// Culling configuration: strategy selection and sizing knobs.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use crate::error::{Error, Result};

/// Which culling strategy a `CullingSystem` runs.
///
/// Chosen once at construction; the textual names are the ones accepted by
/// `FromStr` and produced by `Display`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CullingMode {
    /// Every object is drawn; no visibility test
    Off,
    /// Frustum test on the calling thread
    #[default]
    CpuSerial,
    /// Frustum test fanned out over the job system
    CpuParallel,
    /// Frustum test and compaction in a compute kernel
    GpuCompute,
}

impl CullingMode {
    /// All modes, in declaration order
    pub const ALL: [CullingMode; 4] = [
        CullingMode::Off,
        CullingMode::CpuSerial,
        CullingMode::CpuParallel,
        CullingMode::GpuCompute,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CullingMode::Off => "off",
            CullingMode::CpuSerial => "cpu-serial",
            CullingMode::CpuParallel => "cpu-parallel",
            CullingMode::GpuCompute => "gpu-compute",
        }
    }

    /// True for the modes whose survivor count is known on the CPU
    pub fn is_cpu(&self) -> bool {
        !matches!(self, CullingMode::GpuCompute)
    }
}

impl fmt::Display for CullingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CullingMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        CullingMode::ALL
            .iter()
            .copied()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| Error::InvalidResource(format!(
                "Unknown culling mode '{}' (expected off, cpu-serial, cpu-parallel or gpu-compute)", s
            )))
    }
}

/// Culling system configuration
#[derive(Clone)]
pub struct CullingConfig {
    /// Strategy to run
    pub mode: CullingMode,
    /// Number of frame slots; frame `f` uses slot `f % frames_in_flight`
    pub frames_in_flight: u32,
    /// Objects each slot can hold before it is grown
    pub initial_capacity: u32,
    /// Objects per job in `CpuParallel` mode
    pub parallel_chunk_size: u32,
    /// Worker threads of the default job system (0 = one per logical core)
    pub worker_threads: usize,
    /// SPIR-V of the compaction kernel, required in `GpuCompute` mode
    pub kernel_spirv: Option<Arc<[u8]>>,
}

impl Default for CullingConfig {
    fn default() -> Self {
        Self {
            mode: CullingMode::default(),
            frames_in_flight: 2,
            initial_capacity: 1024,
            parallel_chunk_size: 256,
            worker_threads: 0,
            kernel_spirv: None,
        }
    }
}

impl fmt::Debug for CullingConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CullingConfig")
            .field("mode", &self.mode)
            .field("frames_in_flight", &self.frames_in_flight)
            .field("initial_capacity", &self.initial_capacity)
            .field("parallel_chunk_size", &self.parallel_chunk_size)
            .field("worker_threads", &self.worker_threads)
            .field("kernel_spirv", &self.kernel_spirv.as_ref().map(|code| code.len()))
            .finish()
    }
}

impl CullingConfig {
    /// Default configuration for one mode
    pub fn with_mode(mode: CullingMode) -> Self {
        Self { mode, ..Self::default() }
    }

    /// Check the configuration before any GPU resource is created.
    pub fn validate(&self) -> Result<()> {
        if self.frames_in_flight == 0 {
            return Err(Error::InitializationFailed(
                "frames_in_flight must be at least 1".to_string()
            ));
        }
        if self.initial_capacity == 0 {
            return Err(Error::InitializationFailed(
                "initial_capacity must be at least 1".to_string()
            ));
        }
        if self.parallel_chunk_size == 0 {
            return Err(Error::InitializationFailed(
                "parallel_chunk_size must be at least 1".to_string()
            ));
        }
        if self.mode == CullingMode::GpuCompute {
            match &self.kernel_spirv {
                None => return Err(Error::InitializationFailed(
                    "gpu-compute mode requires the compaction kernel SPIR-V".to_string()
                )),
                Some(code) if code.is_empty() || code.len() % 4 != 0 => {
                    return Err(Error::InitializationFailed(format!(
                        "compaction kernel SPIR-V has invalid length {}", code.len()
                    )));
                }
                Some(_) => {}
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
