//! Host pixel layouts accepted as conversion input.

/// Byte layout of one source pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PixelFormat {
    /// Interleaved `R, G, B`.
    #[default]
    Rgb8,
    /// Interleaved `R, G, B, A`. Alpha is ignored.
    Rgba8,
    /// Interleaved `B, G, R`, as produced by OpenCV.
    Bgr8,
    /// Interleaved `B, G, R, A`. Alpha is ignored.
    Bgra8,
}

impl PixelFormat {
    /// Bytes per pixel.
    pub const fn channels(self) -> usize {
        match self {
            Self::Rgb8 | Self::Bgr8 => 3,
            Self::Rgba8 | Self::Bgra8 => 4,
        }
    }

    /// Bytes of a `width` x `height` image, or `None` if that overflows `usize`.
    pub fn byte_len(self, width: usize, height: usize) -> Option<usize> {
        width.checked_mul(height)?.checked_mul(self.channels())
    }

    /// Read the red, green and blue values of one pixel.
    ///
    /// `px` must hold at least [`channels`](Self::channels) bytes.
    #[inline]
    pub fn rgb_of(self, px: &[u8]) -> (u8, u8, u8) {
        match self {
            Self::Rgb8 | Self::Rgba8 => (px[0], px[1], px[2]),
            Self::Bgr8 | Self::Bgra8 => (px[2], px[1], px[0]),
        }
    }

    /// Encode one pixel as a device texel.
    ///
    /// Red lands in bits 0..8, green in 8..16, blue in 16..24. The top byte is
    /// always zero.
    #[inline]
    pub fn pack(self, px: &[u8]) -> u32 {
        let (r, g, b) = self.rgb_of(px);
        r as u32 | (g as u32) << 8 | (b as u32) << 16
    }
}
