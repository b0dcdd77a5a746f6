//! Top-level entry point: equalize once, select by color and by gradient,
//! union the two masks.

use ndarray::ArrayView3;
use tracing::{debug, warn};

use crate::config::IsolatorConfig;
use crate::error::Result;
use crate::filters::equalize::equalize_hist;
use crate::filters::threshold::{count_selected, mask_or};
use crate::frame::{validate_frame, Mask};
use crate::selection::color::select_by_color;
use crate::selection::gradient::select_by_gradient;

/// The three masks produced for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct LaneSelection {
    /// Color-space selection
    pub color: Mask,
    /// Edge selection
    pub gradient: Mask,
    /// `color OR gradient`
    pub combined: Mask,
}

/// Lane pixel isolator with a fixed, validated configuration.
///
/// Holds no per-frame state: one instance can be shared across threads and
/// every call is an independent pure transform of its input frame.
#[derive(Debug, Clone, Default)]
pub struct LaneIsolator {
    config: IsolatorConfig,
}

impl LaneIsolator {
    pub fn new(config: IsolatorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &IsolatorConfig {
        &self.config
    }

    /// Isolate candidate lane pixels.
    ///
    /// # Arguments
    /// * `frame` - Undistorted 8-bit frame of shape (height, width, 3)
    ///
    /// # Returns
    /// Mask of shape (height, width) with 1 on candidate lane pixels
    pub fn isolate_lines(&self, frame: ArrayView3<u8>) -> Result<Mask> {
        Ok(self.isolate_lines_detailed(frame)?.combined)
    }

    /// Same pipeline as [`isolate_lines`](Self::isolate_lines), keeping the
    /// color and gradient masks alongside the union.
    pub fn isolate_lines_detailed(&self, frame: ArrayView3<u8>) -> Result<LaneSelection> {
        let (height, width) = validate_frame(&frame).inspect_err(|err| {
            warn!(shape = ?frame.dim(), %err, "rejecting frame");
        })?;

        let equalized = equalize_hist(frame);

        let color = select_by_color(equalized.view(), &self.config)?;
        let gradient = select_by_gradient(equalized.view(), &self.config)?;
        let combined = mask_or(color.view(), gradient.view())?;

        debug!(
            width,
            height,
            color = count_selected(color.view()),
            gradient = count_selected(gradient.view()),
            combined = count_selected(combined.view()),
            "isolated lane pixels"
        );

        Ok(LaneSelection {
            color,
            gradient,
            combined,
        })
    }
}

#[cfg(test)]
mod tests;
