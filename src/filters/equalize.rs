//! Per-channel histogram equalization.
//!
//! Each channel of an 8-bit frame is remapped through its own lookup table
//! built from the channel's cumulative distribution, which spreads the
//! intensities approximately uniformly over 0-255.
//!
//! ## Remap rule
//!
//! With `first` the lowest occupied bin and `total` the pixel count:
//! - `lut[first] = 0`
//! - `lut[i] = round_half_even(sum(hist[first+1..=i]) * 255 / (total - hist[first]))`
//! - a channel holding a single value is left unchanged
//!
//! The scale factor is computed in f32, which reproduces the tables produced
//! by the common CV libraries bit for bit.

use ndarray::{Array3, ArrayView2, ArrayView3, Axis, Zip};
use rayon::prelude::*;

/// Count occurrences of each 8-bit value in a channel.
pub fn channel_histogram(channel: ArrayView2<u8>) -> [u32; 256] {
    let mut hist = [0u32; 256];
    for &v in channel.iter() {
        hist[v as usize] += 1;
    }
    hist
}

/// Build the equalization lookup table for a channel histogram.
pub fn equalization_lut(hist: &[u32; 256]) -> [u8; 256] {
    let mut lut = [0u8; 256];
    let total: u32 = hist.iter().sum();

    let Some(first) = hist.iter().position(|&count| count > 0) else {
        // Empty channel: identity
        for (i, entry) in lut.iter_mut().enumerate() {
            *entry = i as u8;
        }
        return lut;
    };

    if hist[first] == total {
        // Single value: every pixel keeps it
        lut.fill(first as u8);
        return lut;
    }

    let scale = 255.0f32 / (total - hist[first]) as f32;
    let mut sum = 0u32;
    for i in first + 1..256 {
        sum += hist[i];
        lut[i] = (sum as f32 * scale).round_ties_even().clamp(0.0, 255.0) as u8;
    }
    lut
}

/// Equalize every channel of an 8-bit image independently.
///
/// # Arguments
/// * `input` - Image with any channel count (height, width, channels)
///
/// # Returns
/// New image of the same shape; the input is not modified
pub fn equalize_hist(input: ArrayView3<u8>) -> Array3<u8> {
    let mut output = Array3::<u8>::zeros(input.dim());

    let luts: Vec<[u8; 256]> = (0..input.len_of(Axis(2)))
        .into_par_iter()
        .map(|c| equalization_lut(&channel_histogram(input.index_axis(Axis(2), c))))
        .collect();

    for ((channel, out_channel), lut) in input
        .axis_iter(Axis(2))
        .zip(output.axis_iter_mut(Axis(2)))
        .zip(&luts)
    {
        Zip::from(out_channel)
            .and(channel)
            .par_for_each(|o, &v| *o = lut[v as usize]);
    }

    output
}
