//! Inclusive range thresholding and binary mask algebra.
//!
//! Works on any single-channel map whose samples are ordered: 8-bit color
//! channels and f64 gradient maps go through the same code, so float maps
//! are compared at full precision.
//!
//! Every output pixel is written by exactly one closure call, so the
//! row-parallel evaluation never races on a pixel.

use ndarray::{ArrayView2, Zip};

use crate::config::ThresholdRange;
use crate::error::{LaneError, Result};
use crate::frame::Mask;

/// Binarize a map: 1 where `low <= value <= high`, else 0.
///
/// # Arguments
/// * `map` - Single-channel map (u8, f64, ...)
/// * `range` - Inclusive bounds
///
/// # Returns
/// Mask of the same shape as `map`
pub fn within_threshold<T>(map: ArrayView2<T>, range: ThresholdRange<T>) -> Mask
where
    T: PartialOrd + Copy + Send + Sync,
{
    let mut mask = Mask::zeros(map.dim());

    Zip::from(&mut mask)
        .and(map)
        .par_for_each(|m, &v| *m = range.contains(v) as u8);

    mask
}

fn combine(a: ArrayView2<u8>, b: ArrayView2<u8>, op: fn(bool, bool) -> bool) -> Result<Mask> {
    if a.dim() != b.dim() {
        return Err(LaneError::ConversionFailure(format!(
            "cannot combine masks of shape {:?} and {:?}",
            a.dim(),
            b.dim()
        )));
    }
    let mut out = Mask::zeros(a.dim());

    Zip::from(&mut out)
        .and(a)
        .and(b)
        .par_for_each(|o, &x, &y| *o = op(x == 1, y == 1) as u8);

    Ok(out)
}

/// Elementwise AND of two masks.
pub fn mask_and(a: ArrayView2<u8>, b: ArrayView2<u8>) -> Result<Mask> {
    combine(a, b, |x, y| x && y)
}

/// Elementwise OR of two masks.
pub fn mask_or(a: ArrayView2<u8>, b: ArrayView2<u8>) -> Result<Mask> {
    combine(a, b, |x, y| x || y)
}

/// Number of set pixels in a mask.
pub fn count_selected(mask: ArrayView2<u8>) -> usize {
    mask.iter().filter(|&&v| v == 1).count()
}
