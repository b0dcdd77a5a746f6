//! Lane pixel selectors.
//!
//! This module turns the filters into binary masks:
//! - **Color**: Luv lightness, HLS saturation and Lab b thresholds
//! - **Gradient**: Sobel magnitude and direction thresholds
//!
//! Both take an already equalized frame and never modify it, so they can run
//! on the same borrowed view in any order.

pub mod color;
pub mod gradient;

pub use color::color_selection;
pub use gradient::gradient_selection;
