//! CPU execution strategies.

use crate::error::{Result, Rgb2YError};

/// Pixels per chunk used by [`ExecutionStrategy::ParallelElements`].
pub const DEFAULT_CHUNK_PIXELS: usize = 4096;

/// How CPU conversions split their work across the rayon pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionStrategy {
    /// Single pass on the calling thread.
    Serial,
    /// Split the pixels into `n` contiguous chunks.
    Fixed(usize),
    /// Chunks of a fixed number of pixels.
    Chunked(usize),
    /// Chunks of [`DEFAULT_CHUNK_PIXELS`] pixels.
    #[default]
    ParallelElements,
}

impl ExecutionStrategy {
    /// Pixels per chunk for a run over `pixels` pixels.
    ///
    /// Returns `None` for [`ExecutionStrategy::Serial`]. The chunk never
    /// exceeds `pixels` (or 1 when `pixels` is zero).
    pub fn chunk_pixels(self, pixels: usize) -> Result<Option<usize>> {
        match self {
            Self::Serial => Ok(None),
            Self::Fixed(0) => Err(Rgb2YError::Parallel(
                "thread count must be > 0".to_string(),
            )),
            Self::Fixed(n) => Ok(Some(pixels.div_ceil(n).max(1))),
            Self::Chunked(0) => Err(Rgb2YError::Parallel(
                "chunk size must be > 0".to_string(),
            )),
            Self::Chunked(n) => Ok(Some(n.min(pixels.max(1)))),
            Self::ParallelElements => Ok(Some(DEFAULT_CHUNK_PIXELS.min(pixels.max(1)))),
        }
    }
}
