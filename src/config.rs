//! Isolator configuration: the five threshold ranges and the channel order.
//!
//! The ranges are fixed when a [`crate::LaneIsolator`] is built and are never
//! mutated per frame. Every field has a default, so a JSON document only
//! needs to name the ranges it overrides:
//!
//! ```
//! use lane_isolator::IsolatorConfig;
//!
//! let config = IsolatorConfig::from_json_str(r#"{ "chroma_range": { "low": 170, "high": 220 } }"#).unwrap();
//! assert_eq!(config.chroma_range.low, 170);
//! assert_eq!(config.lightness_range.low, 120);
//! ```

use std::cmp::Ordering;
use std::f64::consts::FRAC_PI_2;

use ndarray::ArrayView3;
use serde::{Deserialize, Serialize};

use crate::error::{LaneError, Result};

/// Inclusive `[low, high]` interval used to binarize a single-channel map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdRange<T> {
    pub low: T,
    pub high: T,
}

impl<T: PartialOrd + Copy> ThresholdRange<T> {
    pub const fn new(low: T, high: T) -> Self {
        Self { low, high }
    }

    /// True iff `low <= value <= high`.
    #[inline]
    pub fn contains(&self, value: T) -> bool {
        value >= self.low && value <= self.high
    }

    fn validate(&self, name: &str) -> Result<()> {
        match self.low.partial_cmp(&self.high) {
            Some(Ordering::Less) | Some(Ordering::Equal) => Ok(()),
            Some(Ordering::Greater) => Err(LaneError::InvalidConfig(format!(
                "{name}: low bound exceeds high bound"
            ))),
            None => Err(LaneError::InvalidConfig(format!(
                "{name}: bounds are not comparable (NaN)"
            ))),
        }
    }
}

/// Component order of the interleaved input frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelOrder {
    Rgb,
    /// Blue, green, red: what most camera capture stacks hand over.
    #[default]
    Bgr,
}

impl ChannelOrder {
    /// Read the pixel at `(y, x)` as `(r, g, b)`.
    ///
    /// # Panics
    /// If `(y, x)` is out of bounds or `frame` has fewer than 3 channels.
    #[inline]
    pub fn rgb_at(self, frame: &ArrayView3<u8>, y: usize, x: usize) -> (u8, u8, u8) {
        let (c0, c1, c2) = (frame[[y, x, 0]], frame[[y, x, 1]], frame[[y, x, 2]]);
        match self {
            ChannelOrder::Rgb => (c0, c1, c2),
            ChannelOrder::Bgr => (c2, c1, c0),
        }
    }
}

/// Threshold on Luv lightness (8-bit encoded).
pub const DEFAULT_LIGHTNESS_RANGE: ThresholdRange<u8> = ThresholdRange::new(120, 255);
/// Threshold on HLS saturation (8-bit encoded).
pub const DEFAULT_SATURATION_RANGE: ThresholdRange<u8> = ThresholdRange::new(105, 255);
/// Threshold on Lab b, the blue-yellow axis (8-bit encoded, 128 = neutral).
pub const DEFAULT_CHROMA_RANGE: ThresholdRange<u8> = ThresholdRange::new(180, 210);
/// Threshold on Sobel gradient magnitude.
pub const DEFAULT_MAGNITUDE_RANGE: ThresholdRange<f64> = ThresholdRange::new(30.0, 235.0);
/// Threshold on folded gradient direction, radians in `[0, pi/2]`.
///
/// Spans the full output domain of the direction map, so it selects every
/// pixel. It is still applied like any other range.
pub const DEFAULT_DIRECTION_RANGE: ThresholdRange<f64> = ThresholdRange::new(0.0, FRAC_PI_2);

/// Immutable parameter set for the lane isolation pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IsolatorConfig {
    pub channel_order: ChannelOrder,
    pub lightness_range: ThresholdRange<u8>,
    pub saturation_range: ThresholdRange<u8>,
    pub chroma_range: ThresholdRange<u8>,
    pub magnitude_range: ThresholdRange<f64>,
    pub direction_range: ThresholdRange<f64>,
}

impl Default for IsolatorConfig {
    fn default() -> Self {
        Self {
            channel_order: ChannelOrder::default(),
            lightness_range: DEFAULT_LIGHTNESS_RANGE,
            saturation_range: DEFAULT_SATURATION_RANGE,
            chroma_range: DEFAULT_CHROMA_RANGE,
            magnitude_range: DEFAULT_MAGNITUDE_RANGE,
            direction_range: DEFAULT_DIRECTION_RANGE,
        }
    }
}

impl IsolatorConfig {
    /// Parse a (possibly partial) JSON configuration and validate it.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: IsolatorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every range for `low <= high`.
    pub fn validate(&self) -> Result<()> {
        self.lightness_range.validate("lightness_range")?;
        self.saturation_range.validate("saturation_range")?;
        self.chroma_range.validate("chroma_range")?;
        self.magnitude_range.validate("magnitude_range")?;
        self.direction_range.validate("direction_range")?;
        Ok(())
    }

    pub fn with_channel_order(mut self, order: ChannelOrder) -> Self {
        self.channel_order = order;
        self
    }

    pub fn with_lightness_range(mut self, low: u8, high: u8) -> Self {
        self.lightness_range = ThresholdRange::new(low, high);
        self
    }

    pub fn with_saturation_range(mut self, low: u8, high: u8) -> Self {
        self.saturation_range = ThresholdRange::new(low, high);
        self
    }

    pub fn with_chroma_range(mut self, low: u8, high: u8) -> Self {
        self.chroma_range = ThresholdRange::new(low, high);
        self
    }

    pub fn with_magnitude_range(mut self, low: f64, high: f64) -> Self {
        self.magnitude_range = ThresholdRange::new(low, high);
        self
    }

    pub fn with_direction_range(mut self, low: f64, high: f64) -> Self {
        self.direction_range = ThresholdRange::new(low, high);
        self
    }
}
