//! WebAssembly exports for the lane isolator.
//!
//! Frames cross the boundary as flat interleaved byte buffers
//! (length = width * height * 3); masks come back flat, one byte per pixel.

use wasm_bindgen::prelude::*;

use crate::config::{ChannelOrder, IsolatorConfig};
use crate::filters::equalize::equalize_hist;
use crate::frame::frame_from_interleaved;
use crate::isolator::LaneIsolator;

/// Isolate candidate lane pixels.
///
/// # Arguments
/// * `data` - Flat array of 3-channel bytes
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `bgr` - True if channels are blue, green, red
///
/// # Returns
/// Flat mask of `width * height` bytes, each 0 or 1
#[wasm_bindgen]
pub fn isolate_lines_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    bgr: bool,
) -> Result<Vec<u8>, JsError> {
    let frame = frame_from_interleaved(data.to_vec(), width, height)?;
    let order = if bgr { ChannelOrder::Bgr } else { ChannelOrder::Rgb };
    let isolator = LaneIsolator::new(IsolatorConfig::default().with_channel_order(order))?;

    let mask = isolator.isolate_lines(frame.view())?;
    Ok(mask.into_raw_vec_and_offset().0)
}

/// Same as [`isolate_lines_wasm`] with threshold ranges read from JSON.
#[wasm_bindgen]
pub fn isolate_lines_with_config_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    config_json: &str,
) -> Result<Vec<u8>, JsError> {
    let frame = frame_from_interleaved(data.to_vec(), width, height)?;
    let isolator = LaneIsolator::new(IsolatorConfig::from_json_str(config_json)?)?;

    let mask = isolator.isolate_lines(frame.view())?;
    Ok(mask.into_raw_vec_and_offset().0)
}

/// Per-channel histogram equalization of a flat 3-channel image.
#[wasm_bindgen]
pub fn equalize_hist_wasm(data: &[u8], width: usize, height: usize) -> Result<Vec<u8>, JsError> {
    let frame = frame_from_interleaved(data.to_vec(), width, height)?;
    let result = equalize_hist(frame.view());
    Ok(result.into_raw_vec_and_offset().0)
}
