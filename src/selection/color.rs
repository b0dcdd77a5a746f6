//! Color-space lane selection.
//!
//! Lane paint separates from asphalt more reliably in perceptual channels
//! than in raw RGB. Three channels are thresholded independently and merged
//! with a fixed rule:
//!
//! ```text
//! color = (lightness AND saturation) OR chroma
//! ```
//!
//! The Lab b (blue-yellow) cue alone is enough to select a pixel; lightness
//! and saturation only count when both agree.

use ndarray::{ArrayView3, Axis};
use tracing::trace;

use crate::config::IsolatorConfig;
use crate::error::Result;
use crate::filters::color_science::{hls_saturation, lab_b, luv_lightness};
use crate::filters::threshold::{count_selected, mask_and, mask_or, within_threshold};
use crate::frame::{validate_frame, Mask, FRAME_CHANNELS};

/// Select candidate lane pixels by color.
///
/// # Arguments
/// * `frame` - Equalized frame of shape (height, width, 3)
/// * `config` - Channel order and the lightness/saturation/chroma ranges
///
/// # Returns
/// Mask of shape (height, width)
pub fn color_selection(frame: ArrayView3<u8>, config: &IsolatorConfig) -> Result<Mask> {
    validate_frame(&frame)?;
    select_by_color(frame, config)
}

/// Color selection on a frame already accepted by [`validate_frame`].
pub(crate) fn select_by_color(frame: ArrayView3<u8>, config: &IsolatorConfig) -> Result<Mask> {
    debug_assert_eq!(frame.len_of(Axis(2)), FRAME_CHANNELS);
    let order = config.channel_order;

    let lightness = within_threshold(luv_lightness(frame, order).view(), config.lightness_range);
    let saturation = within_threshold(hls_saturation(frame, order).view(), config.saturation_range);
    let chroma = within_threshold(lab_b(frame, order).view(), config.chroma_range);

    let bright_and_saturated = mask_and(lightness.view(), saturation.view())?;
    let selection = mask_or(bright_and_saturated.view(), chroma.view())?;

    trace!(
        lightness = count_selected(lightness.view()),
        saturation = count_selected(saturation.view()),
        chroma = count_selected(chroma.view()),
        selected = count_selected(selection.view()),
        "color selection"
    );

    Ok(selection)
}
