//! Luma channel weightings.
//!
//! Both weightings are evaluated in integer arithmetic so the CPU and GPU
//! paths produce identical bytes.

/// Fixed-point BT.601 weights, scaled so that they sum to 256.
pub const PERCEPTUAL_WEIGHTS: [u32; 3] = [77, 150, 29];

/// Right shift applied after the perceptual weighted sum.
pub const PERCEPTUAL_SHIFT: u32 = 8;

/// Rounding bias added before [`PERCEPTUAL_SHIFT`].
pub const PERCEPTUAL_ROUNDING: u32 = 1 << (PERCEPTUAL_SHIFT - 1);

/// How the three color channels contribute to luma.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LumaWeighting {
    /// ITU-R BT.601 weighting: Y = 0.299 * R + 0.587 * G + 0.114 * B
    #[default]
    Perceptual,
    /// Plain average of the three channels.
    Uniform,
}

impl From<bool> for LumaWeighting {
    /// `true` selects [`LumaWeighting::Perceptual`], `false` selects
    /// [`LumaWeighting::Uniform`].
    fn from(weighted: bool) -> Self {
        if weighted {
            Self::Perceptual
        } else {
            Self::Uniform
        }
    }
}

impl LumaWeighting {
    /// Whether this weighting favours channels by perceived brightness.
    pub fn is_weighted(self) -> bool {
        matches!(self, Self::Perceptual)
    }

    /// Real-valued channel weights that the integer forms approximate.
    pub fn coefficients(self) -> [f32; 3] {
        match self {
            Self::Perceptual => [0.299, 0.587, 0.114],
            Self::Uniform => [1.0 / 3.0; 3],
        }
    }

    /// Luma of a single pixel.
    ///
    /// # Examples
    ///
    /// ```
    /// use rgb2y::LumaWeighting;
    ///
    /// assert_eq!(LumaWeighting::Perceptual.luma(255, 0, 0), 77);
    /// assert_eq!(LumaWeighting::Uniform.luma(255, 0, 0), 85);
    /// ```
    #[inline]
    pub const fn luma(self, r: u8, g: u8, b: u8) -> u8 {
        let (r, g, b) = (r as u32, g as u32, b as u32);
        match self {
            Self::Perceptual => {
                let sum = PERCEPTUAL_WEIGHTS[0] * r
                    + PERCEPTUAL_WEIGHTS[1] * g
                    + PERCEPTUAL_WEIGHTS[2] * b
                    + PERCEPTUAL_ROUNDING;
                (sum >> PERCEPTUAL_SHIFT) as u8
            }
            Self::Uniform => ((r + g + b) / 3) as u8,
        }
    }
}
