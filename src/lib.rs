//! Lane-marking pixel isolation.
//!
//! Turns one undistorted color frame from a forward-facing camera into a
//! binary mask of candidate lane-line pixels, for a downstream lane fitter.
//!
//! ## Pipeline
//!
//! ```text
//! frame ──> equalize ──┬──> color selection ────┐
//!                      └──> gradient selection ─┴──> OR ──> mask
//! ```
//!
//! - **Equalize**: per-channel histogram equalization
//! - **Color**: (Luv L AND HLS S) OR Lab b, each an inclusive range
//! - **Gradient**: Sobel magnitude AND folded direction
//!
//! ## Image Format
//! - **Frame**: (height, width, 3) u8, RGB or BGR per [`ChannelOrder`]
//! - **Mask**: (height, width) u8, values 0 or 1
//!
//! ```
//! use lane_isolator::{LaneIsolator, IsolatorConfig};
//! use ndarray::Array3;
//!
//! let frame = Array3::<u8>::from_elem((48, 64, 3), 128);
//! let isolator = LaneIsolator::new(IsolatorConfig::default()).unwrap();
//! let mask = isolator.isolate_lines(frame.view()).unwrap();
//! assert_eq!(mask.dim(), (48, 64));
//! assert!(mask.iter().all(|&v| v == 0));
//! ```

pub mod config;
pub mod error;
pub mod filters;
pub mod frame;
pub mod isolator;
pub mod selection;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use config::{ChannelOrder, IsolatorConfig, ThresholdRange};
pub use error::{LaneError, Result};
pub use frame::Mask;
pub use isolator::{LaneIsolator, LaneSelection};

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use numpy::{IntoPyArray, PyArray2, PyArray3, PyReadonlyArray3};
    use pyo3::exceptions::PyValueError;
    use pyo3::prelude::*;

    use crate::config::{ChannelOrder, IsolatorConfig};
    use crate::error::LaneError;
    use crate::filters::equalize;
    use crate::isolator::LaneIsolator;

    impl From<LaneError> for PyErr {
        fn from(err: LaneError) -> PyErr {
            PyValueError::new_err(err.to_string())
        }
    }

    fn build_isolator(bgr: bool, config_json: Option<&str>) -> Result<LaneIsolator, LaneError> {
        let config = match config_json {
            Some(json) => IsolatorConfig::from_json_str(json)?,
            None => IsolatorConfig::default(),
        };
        let order = if bgr { ChannelOrder::Bgr } else { ChannelOrder::Rgb };
        LaneIsolator::new(config.with_channel_order(order))
    }

    // ========================================================================
    // Lane Isolation
    // ========================================================================

    /// Isolate candidate lane pixels.
    ///
    /// # Arguments
    /// * `image` - uint8 array of shape (H, W, 3)
    /// * `bgr` - True if channels are blue, green, red (camera order)
    /// * `config_json` - Optional JSON overriding threshold ranges
    ///
    /// # Returns
    /// uint8 mask of shape (H, W), values 0 or 1
    #[pyfunction]
    #[pyo3(signature = (image, bgr=true, config_json=None))]
    pub fn isolate_lines<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        bgr: bool,
        config_json: Option<&str>,
    ) -> PyResult<Bound<'py, PyArray2<u8>>> {
        let isolator = build_isolator(bgr, config_json)?;
        let mask = isolator.isolate_lines(image.as_array())?;
        Ok(mask.into_pyarray(py))
    }

    /// Isolate lane pixels, returning `(color, gradient, combined)` masks.
    #[pyfunction]
    #[pyo3(signature = (image, bgr=true, config_json=None))]
    #[allow(clippy::type_complexity)]
    pub fn isolate_lines_detailed<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        bgr: bool,
        config_json: Option<&str>,
    ) -> PyResult<(
        Bound<'py, PyArray2<u8>>,
        Bound<'py, PyArray2<u8>>,
        Bound<'py, PyArray2<u8>>,
    )> {
        let isolator = build_isolator(bgr, config_json)?;
        let selection = isolator.isolate_lines_detailed(image.as_array())?;
        Ok((
            selection.color.into_pyarray(py),
            selection.gradient.into_pyarray(py),
            selection.combined.into_pyarray(py),
        ))
    }

    // ========================================================================
    // Equalization
    // ========================================================================

    /// Per-channel histogram equalization of a uint8 image.
    #[pyfunction]
    pub fn equalize_hist<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
    ) -> Bound<'py, PyArray3<u8>> {
        let result = equalize::equalize_hist(image.as_array());
        result.into_pyarray(py)
    }

    /// Lane isolator extension module
    #[pymodule]
    pub fn lane_isolator(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(isolate_lines, m)?)?;
        m.add_function(wrap_pyfunction!(isolate_lines_detailed, m)?)?;
        m.add_function(wrap_pyfunction!(equalize_hist, m)?)?;
        Ok(())
    }
}

#[cfg(feature = "python")]
pub use python::lane_isolator;
