//! RGB to luma (Y) conversion on the GPU using CubeCL, with a CPU fallback.
//!
//! An RGB image is uploaded once as an [`RgbTexture`] and converted into a
//! single-channel [`LumaBuffer`], one byte per pixel. The channel weighting is
//! either perceptual (ITU-R BT.601) or a plain average; see [`LumaWeighting`].
//!
//! The CPU path in [`cpu`] uses the same fixed-point arithmetic as the GPU
//! kernel, so both produce identical bytes.
//!
//! # Feature Flags
//!
//! - `gpu`: CubeCL kernels, textures and runtime wrappers
//! - `cuda`: Enable CUDA backend (NVIDIA GPUs)
//! - `wgpu`: Enable WGPU backend (Vulkan/Metal/DX12)
//!
//! # Examples
//!
//! ```rust,ignore
//! use rgb2y::{init_wgpu_runtime, rgb_to_y_execute, LumaBuffer, LumaWeighting, PixelFormat, RgbTexture};
//!
//! let runtime = init_wgpu_runtime()?;
//! let texture = RgbTexture::upload(&rgb, width, height, PixelFormat::Rgb8, &runtime)?;
//! let luma = LumaBuffer::allocate(width * height, &runtime)?;
//!
//! rgb_to_y_execute(LumaWeighting::Perceptual, &texture, width * height, &luma, &runtime)?;
//! let y: Vec<u8> = luma.download(&runtime)?;
//! ```

#![deny(missing_docs)]
#![warn(clippy::all)]

pub mod cpu;
pub mod error;
pub mod format;
pub mod parallel;
pub mod weighting;

#[cfg(feature = "gpu")]
pub mod runtime;

#[cfg(feature = "gpu")]
pub mod texture;

#[cfg(feature = "gpu")]
pub mod kernels;

#[cfg(feature = "gpu")]
pub mod ops;


// Re-exports
pub use cpu::{rgb_to_y, rgb_to_y_image, rgb_to_y_image_alloc};
pub use error::{Result, Rgb2YError};
pub use format::PixelFormat;
pub use parallel::ExecutionStrategy;
pub use weighting::LumaWeighting;

#[cfg(feature = "gpu")]
pub use runtime::*;

#[cfg(feature = "gpu")]
pub use texture::*;

#[cfg(feature = "gpu")]
pub use kernels::*;

#[cfg(feature = "gpu")]
pub use ops::*;
