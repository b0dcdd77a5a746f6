//! Edge-based lane selection.
//!
//! ```text
//! gradient = magnitude in range AND direction in range
//! ```
//!
//! The frame is reduced to luma, differentiated with 3x3 Sobel kernels and
//! the two derived maps are thresholded. A flat patch has zero magnitude and
//! is never selected, whatever its direction.

use ndarray::{ArrayView3, Axis};
use tracing::trace;

use crate::config::IsolatorConfig;
use crate::error::Result;
use crate::filters::edge::{gradient_direction, gradient_magnitude, sobel_derivatives};
use crate::filters::grayscale::grayscale;
use crate::filters::threshold::{count_selected, mask_and, within_threshold};
use crate::frame::{validate_frame, Mask, FRAME_CHANNELS};

/// Select candidate lane pixels by edge strength and orientation.
///
/// # Arguments
/// * `frame` - Equalized frame of shape (height, width, 3)
/// * `config` - Channel order and the magnitude/direction ranges
///
/// # Returns
/// Mask of shape (height, width)
pub fn gradient_selection(frame: ArrayView3<u8>, config: &IsolatorConfig) -> Result<Mask> {
    validate_frame(&frame)?;
    select_by_gradient(frame, config)
}

/// Gradient selection on a frame already accepted by [`validate_frame`].
pub(crate) fn select_by_gradient(frame: ArrayView3<u8>, config: &IsolatorConfig) -> Result<Mask> {
    debug_assert_eq!(frame.len_of(Axis(2)), FRAME_CHANNELS);

    let gray = grayscale(frame, config.channel_order);
    let (dx, dy) = sobel_derivatives(gray.view());

    let magnitude = gradient_magnitude(dx.view(), dy.view())?;
    let direction = gradient_direction(dx.view(), dy.view())?;

    let strong = within_threshold(magnitude.view(), config.magnitude_range);
    let oriented = within_threshold(direction.view(), config.direction_range);
    let selection = mask_and(strong.view(), oriented.view())?;

    trace!(
        magnitude = count_selected(strong.view()),
        direction = count_selected(oriented.view()),
        selected = count_selected(selection.view()),
        "gradient selection"
    );

    Ok(selection)
}
