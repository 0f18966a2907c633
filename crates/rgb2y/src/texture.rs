//! Device-resident source textures and luma buffers.
//!
//! [`RgbTexture`] is the read-only input of the luma kernel and
//! [`LumaBuffer`] its output. They are distinct owned types, so a launch can
//! never read and write the same memory.

use crate::error::{Result, Rgb2YError};
use crate::format::PixelFormat;
use crate::kernels::PIXELS_PER_UNIT;
use crate::runtime::RuntimeContext;
use cubecl::prelude::*;
use cubecl::server::Handle;
use kornia_image::{allocator::ImageAllocator, Image};
use std::marker::PhantomData;

/// RGB image on the GPU, one packed `u32` texel per pixel.
pub struct RgbTexture<R: Runtime> {
    handle: Handle,
    width: usize,
    height: usize,
    pixels: usize,
    format: PixelFormat,
    _phantom: PhantomData<R>,
}

impl<R: Runtime> RgbTexture<R> {
    /// Upload interleaved pixel data to the GPU.
    ///
    /// # Arguments
    ///
    /// * `data` - Host pixels, exactly `width * height * format.channels()` bytes
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    /// * `format` - Byte layout of `data`
    /// * `runtime` - Runtime context with GPU client
    ///
    /// # Example
    ///
    /// ```ignore
    /// let texture = RgbTexture::upload(&rgb, 640, 480, PixelFormat::Rgb8, &runtime)?;
    /// ```
    pub fn upload(
        data: &[u8],
        width: usize,
        height: usize,
        format: PixelFormat,
        runtime: &RuntimeContext<R>,
    ) -> Result<Self> {
        // an overflowing size can never match a real slice
        let expected = format.byte_len(width, height).unwrap_or(usize::MAX);
        if data.len() != expected {
            return Err(Rgb2YError::InvalidSourceLength {
                expected,
                actual: data.len(),
            });
        }
        let pixels = expected / format.channels();

        let mut texels: Vec<u32> = data
            .chunks_exact(format.channels())
            .map(|px| format.pack(px))
            .collect();
        if texels.is_empty() {
            // backends reject zero-sized allocations
            texels.push(0);
        }

        let handle = runtime.client().create(bytemuck::cast_slice(&texels));

        Ok(Self {
            handle,
            width,
            height,
            pixels,
            format,
            _phantom: PhantomData,
        })
    }

    /// Upload an RGB kornia image.
    pub fn from_image<A: ImageAllocator>(
        image: &Image<u8, 3, A>,
        runtime: &RuntimeContext<R>,
    ) -> Result<Self> {
        Self::upload(
            image.as_slice(),
            image.cols(),
            image.rows(),
            PixelFormat::Rgb8,
            runtime,
        )
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of texels.
    pub fn pixels(&self) -> usize {
        self.pixels
    }

    /// Layout the texture was uploaded from.
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Get a reference to the underlying handle.
    pub fn handle(&self) -> &Handle {
        &self.handle
    }
}

/// Luma output on the GPU.
///
/// Stores `capacity` bytes as `ceil(capacity / 4)` packed words; lane `k` of
/// word `w` holds pixel `4w + k`.
pub struct LumaBuffer<R: Runtime> {
    handle: Handle,
    capacity: usize,
    _phantom: PhantomData<R>,
}

impl<R: Runtime> LumaBuffer<R> {
    /// Allocate room for `capacity` luma bytes.
    pub fn allocate(capacity: usize, runtime: &RuntimeContext<R>) -> Result<Self> {
        // backends reject zero-sized allocations
        let words = capacity.div_ceil(PIXELS_PER_UNIT as usize).max(1);
        let handle = runtime.client().empty(words * std::mem::size_of::<u32>());

        Ok(Self {
            handle,
            capacity,
            _phantom: PhantomData,
        })
    }

    /// Number of luma bytes the buffer holds.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of packed words backing the buffer.
    pub fn words(&self) -> usize {
        self.capacity.div_ceil(PIXELS_PER_UNIT as usize)
    }

    /// Get a reference to the underlying handle.
    pub fn handle(&self) -> &Handle {
        &self.handle
    }

    /// Read the whole buffer back to the host.
    ///
    /// Blocks until every queued launch writing this buffer has finished.
    pub fn download(&self, runtime: &RuntimeContext<R>) -> Result<Vec<u8>> {
        let bytes = runtime.client().read(self.handle.clone().binding());
        if bytes.len() < self.words() * std::mem::size_of::<u32>() {
            return Err(Rgb2YError::MemoryTransferFailed(format!(
                "read {} bytes, expected {}",
                bytes.len(),
                self.words() * std::mem::size_of::<u32>()
            )));
        }

        // Device bytes may not be 4-aligned on the host side.
        let words: Vec<u32> = bytemuck::pod_collect_to_vec(&bytes[..self.words() * 4]);

        let mut luma: Vec<u8> = words.iter().flat_map(|w| w.to_le_bytes()).collect();
        luma.truncate(self.capacity);
        Ok(luma)
    }

    /// Copy the first `pixels` luma bytes into `dst`.
    ///
    /// Bytes of `dst` past `pixels` are left untouched.
    pub fn download_into(
        &self,
        dst: &mut [u8],
        pixels: usize,
        runtime: &RuntimeContext<R>,
    ) -> Result<()> {
        if pixels > self.capacity {
            return Err(Rgb2YError::InvalidPixelCount {
                requested: pixels,
                available: self.capacity,
            });
        }
        if dst.len() < pixels {
            return Err(Rgb2YError::InvalidBufferSize {
                expected: pixels,
                actual: dst.len(),
            });
        }

        let luma = self.download(runtime)?;
        dst[..pixels].copy_from_slice(&luma[..pixels]);
        Ok(())
    }
}
