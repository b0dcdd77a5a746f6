//! Sobel derivatives and the gradient maps derived from them.
//!
//! Derivatives are computed at f64 precision on an 8-bit luma map, so no
//! response is clamped before squaring (a full-swing 3x3 step yields 1020).
//!
//! ## Kernels
//!
//! ```text
//!   d/dx            d/dy
//! -1  0  1       -1 -2 -1
//! -2  0  2        0  0  0
//! -1  0  1        1  2  1
//! ```
//!
//! Pixels outside the image are mirrored without repeating the edge pixel
//! (`dcb|abcd|cba`), so borders get a real response instead of zero.

use ndarray::{Array2, ArrayView2, Zip};

use crate::error::{LaneError, Result};

/// Mirror an out-of-range index back into `0..len` without repeating the edge.
#[inline]
fn reflect_101(i: isize, len: usize) -> usize {
    let last = len as isize - 1;
    if last == 0 {
        return 0;
    }
    let i = if i < 0 { -i } else { i };
    let i = if i > last { 2 * last - i } else { i };
    i as usize
}

fn check_same_shape(dx: &ArrayView2<f64>, dy: &ArrayView2<f64>) -> Result<()> {
    if dx.dim() != dy.dim() {
        return Err(LaneError::ConversionFailure(format!(
            "derivative maps differ in shape: {:?} vs {:?}",
            dx.dim(),
            dy.dim()
        )));
    }
    Ok(())
}

/// Horizontal and vertical 3x3 Sobel derivatives of a grayscale map.
///
/// # Returns
/// `(dx, dy)`, each of the same shape as `gray`
pub fn sobel_derivatives(gray: ArrayView2<u8>) -> (Array2<f64>, Array2<f64>) {
    let (height, width) = gray.dim();
    let mut dx = Array2::<f64>::zeros((height, width));
    let mut dy = Array2::<f64>::zeros((height, width));

    Zip::indexed(&mut dx)
        .and(&mut dy)
        .par_for_each(|(y, x), gx, gy| {
            let ym = reflect_101(y as isize - 1, height);
            let yp = reflect_101(y as isize + 1, height);
            let xm = reflect_101(x as isize - 1, width);
            let xp = reflect_101(x as isize + 1, width);

            let p = |row: usize, col: usize| gray[[row, col]] as f64;

            *gx = (p(ym, xp) - p(ym, xm))
                + 2.0 * (p(y, xp) - p(y, xm))
                + (p(yp, xp) - p(yp, xm));
            *gy = (p(yp, xm) + 2.0 * p(yp, x) + p(yp, xp))
                - (p(ym, xm) + 2.0 * p(ym, x) + p(ym, xp));
        });

    (dx, dy)
}

/// Gradient magnitude `sqrt(dx^2 + dy^2)`.
pub fn gradient_magnitude(dx: ArrayView2<f64>, dy: ArrayView2<f64>) -> Result<Array2<f64>> {
    check_same_shape(&dx, &dy)?;
    let mut magnitude = Array2::<f64>::zeros(dx.dim());

    Zip::from(&mut magnitude)
        .and(dx)
        .and(dy)
        .par_for_each(|m, &gx, &gy| *m = (gx * gx + gy * gy).sqrt());

    Ok(magnitude)
}

/// Folded gradient direction `atan2(|dy|, |dx|)`, in radians within `[0, pi/2]`.
pub fn gradient_direction(dx: ArrayView2<f64>, dy: ArrayView2<f64>) -> Result<Array2<f64>> {
    check_same_shape(&dx, &dy)?;
    let mut direction = Array2::<f64>::zeros(dx.dim());

    Zip::from(&mut direction)
        .and(dx)
        .and(dy)
        .par_for_each(|d, &gx, &gy| *d = gy.abs().atan2(gx.abs()));

    Ok(direction)
}
