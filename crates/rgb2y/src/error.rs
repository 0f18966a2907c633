//! Error types for luma conversion.

use thiserror::Error;

/// Result type for luma conversion.
pub type Result<T> = std::result::Result<T, Rgb2YError>;

/// Error types that can occur while converting RGB to luma.
#[derive(Error, Debug)]
pub enum Rgb2YError {
    /// The requested pixel count exceeds what the source holds.
    #[error("Invalid pixel count: requested {requested}, source holds {available}")]
    InvalidPixelCount {
        /// Pixels requested by the caller
        requested: usize,
        /// Pixels available in the source
        available: usize,
    },

    /// The output buffer cannot hold the requested pixels.
    #[error("Invalid buffer size: expected at least {expected}, got {actual}")]
    InvalidBufferSize {
        /// Minimum number of bytes required
        expected: usize,
        /// Actual buffer length
        actual: usize,
    },

    /// Host source data does not match the declared dimensions and format.
    #[error("Invalid source length: expected {expected} bytes, got {actual}")]
    InvalidSourceLength {
        /// Expected byte length
        expected: usize,
        /// Actual byte length
        actual: usize,
    },

    /// Pixel count does not fit the device index type.
    #[error("Pixel count {0} overflows the device index range")]
    PixelCountOverflow(usize),

    /// Source and destination images differ in size.
    #[error(
        "Image size mismatch: src {src_width}x{src_height}, dst {dst_width}x{dst_height}"
    )]
    ImageSizeMismatch {
        /// Source width
        src_width: usize,
        /// Source height
        src_height: usize,
        /// Destination width
        dst_width: usize,
        /// Destination height
        dst_height: usize,
    },

    /// Invalid CPU execution strategy.
    #[error("Parallel execution error: {0}")]
    Parallel(String),

    /// GPU device not available or not found.
    #[error("GPU device not available: {0}")]
    DeviceNotAvailable(String),

    /// Memory transfer failed (host ↔ device).
    #[error("Memory transfer failed: {0}")]
    MemoryTransferFailed(String),

    /// Image error from kornia-image.
    #[error("Image error: {0}")]
    ImageError(#[from] kornia_image::ImageError),
}
