//! Frame validation and construction helpers.
//!
//! A frame is an interleaved `(height, width, 3)` array of 8-bit samples.
//! Binding layers receive flat buffers and use [`frame_from_interleaved`];
//! everything else borrows an `ArrayView3<u8>`.

use ndarray::{Array2, Array3, ArrayView3};

use crate::error::{LaneError, Result};

/// Binary mask: same height/width as the frame, samples are 0 or 1.
pub type Mask = Array2<u8>;

/// Number of color channels the pipeline accepts.
pub const FRAME_CHANNELS: usize = 3;

/// Check that `frame` is a non-empty 3-channel image.
///
/// # Returns
/// `(height, width)` of the frame
pub fn validate_frame(frame: &ArrayView3<u8>) -> Result<(usize, usize)> {
    let (height, width, channels) = frame.dim();
    if height == 0 || width == 0 {
        return Err(LaneError::InvalidInput(format!(
            "frame is empty ({width}x{height})"
        )));
    }
    if channels != FRAME_CHANNELS {
        return Err(LaneError::InvalidInput(format!(
            "expected {FRAME_CHANNELS} channels, got {channels}"
        )));
    }
    Ok((height, width))
}

/// Build a frame from a flat interleaved buffer.
///
/// # Arguments
/// * `data` - Interleaved samples (length = width * height * 3)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
pub fn frame_from_interleaved(data: Vec<u8>, width: usize, height: usize) -> Result<Array3<u8>> {
    let expected = width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(FRAME_CHANNELS))
        .ok_or_else(|| {
            LaneError::InvalidInput(format!("frame dimensions {width}x{height} overflow"))
        })?;
    if data.len() != expected {
        return Err(LaneError::InvalidInput(format!(
            "buffer holds {} bytes, {width}x{height}x{FRAME_CHANNELS} needs {expected}",
            data.len()
        )));
    }
    let frame = Array3::from_shape_vec((height, width, FRAME_CHANNELS), data)?;
    validate_frame(&frame.view())?;
    Ok(frame)
}
