//! CubeCL runtime wrapper for GPU execution.
//!
//! This module provides a wrapper around CubeCL's compute client used by the
//! luma kernels.

use crate::error::{Result, Rgb2YError};
use cubecl::prelude::*;
use std::marker::PhantomData;
use std::panic::{catch_unwind, AssertUnwindSafe};

// Re-export CubeCL's Runtime trait so downstream crates don't need cubecl directly
pub use cubecl::Runtime as CubeclRuntime;

/// Runtime backend types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// CUDA backend (NVIDIA GPUs)
    #[cfg(feature = "cuda")]
    Cuda,
    /// WGPU backend (Vulkan/Metal/DirectX12)
    #[cfg(feature = "wgpu")]
    Wgpu,
    /// CPU fallback
    Cpu,
}

#[cfg(feature = "cuda")]
const PREFERRED_BACKEND: Backend = Backend::Cuda;
#[cfg(all(feature = "wgpu", not(feature = "cuda")))]
const PREFERRED_BACKEND: Backend = Backend::Wgpu;
#[cfg(not(any(feature = "cuda", feature = "wgpu")))]
const PREFERRED_BACKEND: Backend = Backend::Cpu;

impl Backend {
    /// The first GPU backend compiled in, or [`Backend::Cpu`].
    pub const fn preferred() -> Self {
        PREFERRED_BACKEND
    }
}

/// Allocation limits reported by a device's memory manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceMemory {
    /// Largest single allocation page, in bytes.
    pub max_page_size: u64,
    /// Required alignment of allocations, in bytes.
    pub alignment: u64,
}

/// GPU runtime context with a CubeCL client.
///
/// Owns the compute client that textures, luma buffers and kernel launches go
/// through.
pub struct RuntimeContext<R: Runtime> {
    client: ComputeClient<R::Server, R::Channel>,
    _phantom: PhantomData<R>,
}

impl<R: Runtime> RuntimeContext<R> {
    /// Open `device`. Panics inside CubeCL if the device does not exist; use
    /// [`try_new`](Self::try_new) to get an error instead.
    pub fn new(device: R::Device) -> Self {
        Self {
            client: R::client(&device),
            _phantom: PhantomData,
        }
    }

    /// Create a runtime context, reporting a missing device as an error.
    ///
    /// CubeCL panics when the backend cannot find a device; the panic is
    /// caught here and turned into [`Rgb2YError::DeviceNotAvailable`].
    pub fn try_new(device: R::Device) -> Result<Self> {
        catch_unwind(AssertUnwindSafe(|| Self::new(device))).map_err(|_| {
            tracing::warn!(backend = R::name(), "no device available");
            Rgb2YError::DeviceNotAvailable(R::name().to_string())
        })
    }

    /// Client that textures, luma buffers and launches go through.
    pub fn client(&self) -> &ComputeClient<R::Server, R::Channel> {
        &self.client
    }

    /// Backend name used in log fields (e.g. "cuda", "wgpu<wgsl>").
    pub fn backend_name(&self) -> &'static str {
        R::name()
    }

    /// Allocation limits of the device.
    pub fn memory_properties(&self) -> DeviceMemory {
        let mem = self.client.properties().memory_properties();
        DeviceMemory {
            max_page_size: mem.max_page_size,
            alignment: mem.alignment,
        }
    }

    /// Block until every queued luma launch has finished.
    pub fn sync(&self) {
        // reads are ordered after all queued work on the client
        let marker = self.client.empty(std::mem::size_of::<u32>());
        let _ = self.client.read(marker.binding());
    }
}

/// Initialize a CUDA runtime on the first device.
///
/// # Errors
///
/// Returns [`Rgb2YError::DeviceNotAvailable`] if no CUDA device is found.
#[cfg(feature = "cuda")]
pub fn init_cuda_runtime() -> Result<RuntimeContext<cubecl_cuda::CudaRuntime>> {
    use cubecl_cuda::CudaDevice;

    let ctx = RuntimeContext::try_new(CudaDevice::new(0))?;
    tracing::debug!(backend = ctx.backend_name(), "runtime initialized");
    Ok(ctx)
}

/// Initialize a WGPU runtime on the best available adapter.
#[cfg(feature = "wgpu")]
pub fn init_wgpu_runtime() -> Result<RuntimeContext<cubecl_wgpu::WgpuRuntime>> {
    use cubecl_wgpu::WgpuDevice;

    let ctx = RuntimeContext::try_new(WgpuDevice::BestAvailable)?;
    tracing::debug!(backend = ctx.backend_name(), "runtime initialized");
    Ok(ctx)
}
