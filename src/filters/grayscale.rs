//! Grayscale conversion for the gradient path.
//!
//! Uses ITU-R BT.601 luma weights (0.299, 0.587, 0.114) in 14-bit fixed
//! point, the integer form camera pipelines and CV libraries use for 8-bit
//! data. The result is exact and identical on every platform.
//!
//! ## Output
//!
//! A single-channel `(height, width)` map of u8 luma values.

use ndarray::{Array2, ArrayView3, Zip};

use crate::config::ChannelOrder;

/// BT.601 luma coefficients scaled by 2^14
const LUMA_R: u32 = 4899;
const LUMA_G: u32 = 9617;
const LUMA_B: u32 = 1868;
const LUMA_SHIFT: u32 = 14;

/// Luma of one 8-bit pixel, rounded to nearest.
#[inline]
pub fn luma_u8(r: u8, g: u8, b: u8) -> u8 {
    let sum = LUMA_R * r as u32 + LUMA_G * g as u32 + LUMA_B * b as u32;
    // Weights sum to 2^14, so the result never exceeds 255
    ((sum + (1 << (LUMA_SHIFT - 1))) >> LUMA_SHIFT) as u8
}

/// Convert a 3-channel frame to a single-channel luma map.
///
/// # Arguments
/// * `input` - Frame of shape (height, width, 3)
/// * `order` - Component order of `input`
///
/// # Returns
/// Luma map of shape (height, width)
///
/// # Panics
/// If `input` has fewer than 3 channels.
pub fn grayscale(input: ArrayView3<u8>, order: ChannelOrder) -> Array2<u8> {
    let (height, width, _) = input.dim();
    let mut output = Array2::<u8>::zeros((height, width));

    Zip::indexed(&mut output).par_for_each(|(y, x), out| {
        let (r, g, b) = order.rgb_at(&input, y, x);
        *out = luma_u8(r, g, b);
    });

    output
}
