//! Pixel-level building blocks of the lane isolation pipeline.
//!
//! ## Supported Formats
//!
//! | Input | Shape | Type | Description |
//! |-------|-------|------|-------------|
//! | Frame | (H, W, 3) | u8 | Interleaved RGB or BGR, 0-255 |
//! | Channel map | (H, W) | u8 | One extracted color channel or luma |
//! | Derivative map | (H, W) | f64 | Sobel response, magnitude, direction |
//! | Mask | (H, W) | u8 | 0 or 1 |
//!
//! Every filter returns a new owned buffer of the input's height and width;
//! no filter mutates its input.
//!
//! ## Filter Categories
//!
//! - **Tonal**: per-channel histogram equalization
//! - **Color science**: Luv lightness, HLS saturation, Lab b extraction
//! - **Grayscale**: BT.601 luma
//! - **Edge detection**: Sobel derivatives, gradient magnitude and direction
//! - **Threshold**: inclusive range binarization, mask AND/OR

pub mod color_science;
pub mod edge;
pub mod equalize;
pub mod grayscale;
pub mod threshold;
