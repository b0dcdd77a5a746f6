//! Color-space channel extraction: Luv lightness, HLS saturation, Lab b.
//!
//! Each extractor converts an 8-bit frame pixel by pixel and keeps the one
//! channel the lane selector thresholds. Outputs use the usual 8-bit
//! encodings of these spaces:
//!
//! | Channel | Float domain | 8-bit encoding |
//! |---------|--------------|----------------|
//! | Luv L | 0-100 | `round(L * 255 / 100)` |
//! | HLS S | 0-1 | `round(S * 255)` |
//! | Lab b | about -128..127 | `round(b + 128)`, saturated |
//!
//! Luv and Lab go through sRGB gamma decoding and the D65 sRGB -> XYZ
//! matrix. Formulas follow the CIE definitions in f32; fixed-point
//! implementations of the same spaces may differ by one code value.

use ndarray::{Array2, ArrayView3, Zip};

use crate::config::ChannelOrder;

/// D65 white point Z (X is unused by the b axis, Y = 1)
const WHITE_Z: f32 = 1.088754;

/// sRGB (linear) to XYZ, D65
const RGB_TO_XYZ: [[f32; 3]; 3] = [
    [0.412453, 0.357580, 0.180423],
    [0.212671, 0.715160, 0.072169],
    [0.019334, 0.119193, 0.950227],
];

/// CIE epsilon (216 / 24389)
const CIE_EPSILON: f32 = 0.008856;
/// CIE kappa (24389 / 27)
const CIE_KAPPA: f32 = 903.3;

/// Decode one sRGB-encoded 8-bit component to linear light (0.0-1.0).
#[inline]
pub fn srgb_to_linear(c: u8) -> f32 {
    let v = c as f32 / 255.0;
    if v <= 0.04045 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

fn linear_table() -> [f32; 256] {
    let mut table = [0.0f32; 256];
    for (i, entry) in table.iter_mut().enumerate() {
        *entry = srgb_to_linear(i as u8);
    }
    table
}

#[inline]
fn lab_f(t: f32) -> f32 {
    if t > CIE_EPSILON {
        t.cbrt()
    } else {
        7.787 * t + 16.0 / 116.0
    }
}

#[inline]
fn encode_u8(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

#[inline]
fn luv_lightness_linear(r: f32, g: f32, b: f32) -> u8 {
    let m = &RGB_TO_XYZ[1];
    let y = m[0] * r + m[1] * g + m[2] * b;
    let l = if y > CIE_EPSILON {
        116.0 * y.cbrt() - 16.0
    } else {
        CIE_KAPPA * y
    };
    encode_u8(l * 255.0 / 100.0)
}

#[inline]
fn lab_b_linear(r: f32, g: f32, b: f32) -> u8 {
    let my = &RGB_TO_XYZ[1];
    let mz = &RGB_TO_XYZ[2];
    let y = my[0] * r + my[1] * g + my[2] * b;
    let z = (mz[0] * r + mz[1] * g + mz[2] * b) / WHITE_Z;
    encode_u8(200.0 * (lab_f(y) - lab_f(z)) + 128.0)
}

/// Luv lightness of one 8-bit pixel, encoded 0-255.
pub fn luv_lightness_u8(r: u8, g: u8, b: u8) -> u8 {
    luv_lightness_linear(srgb_to_linear(r), srgb_to_linear(g), srgb_to_linear(b))
}

/// Lab b (blue-yellow) of one 8-bit pixel, encoded with 128 as neutral.
pub fn lab_b_u8(r: u8, g: u8, b: u8) -> u8 {
    lab_b_linear(srgb_to_linear(r), srgb_to_linear(g), srgb_to_linear(b))
}

/// HLS saturation of one 8-bit pixel, encoded 0-255.
///
/// Works directly on gamma-encoded values, like HSL/HLS always does.
pub fn hls_saturation_u8(r: u8, g: u8, b: u8) -> u8 {
    let r = r as f32 / 255.0;
    let g = g as f32 / 255.0;
    let b = b as f32 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let d = max - min;

    if d <= f32::EPSILON {
        return 0;
    }

    let l = (max + min) / 2.0;
    let s = if l < 0.5 {
        d / (max + min)
    } else {
        d / (2.0 - max - min)
    };

    encode_u8(s * 255.0)
}

/// Extract the Luv lightness channel of a 3-channel frame.
///
/// # Arguments
/// * `input` - Frame of shape (height, width, 3)
/// * `order` - Component order of `input`
///
/// # Returns
/// Lightness map of shape (height, width), 0-255
///
/// # Panics
/// If `input` has fewer than 3 channels.
pub fn luv_lightness(input: ArrayView3<u8>, order: ChannelOrder) -> Array2<u8> {
    let (height, width, _) = input.dim();
    let mut output = Array2::<u8>::zeros((height, width));
    let lin = linear_table();

    Zip::indexed(&mut output).par_for_each(|(y, x), out| {
        let (r, g, b) = order.rgb_at(&input, y, x);
        *out = luv_lightness_linear(lin[r as usize], lin[g as usize], lin[b as usize]);
    });

    output
}

/// Extract the HLS saturation channel of a 3-channel frame.
///
/// # Panics
/// If `input` has fewer than 3 channels.
pub fn hls_saturation(input: ArrayView3<u8>, order: ChannelOrder) -> Array2<u8> {
    let (height, width, _) = input.dim();
    let mut output = Array2::<u8>::zeros((height, width));

    Zip::indexed(&mut output).par_for_each(|(y, x), out| {
        let (r, g, b) = order.rgb_at(&input, y, x);
        *out = hls_saturation_u8(r, g, b);
    });

    output
}

/// Extract the Lab b channel of a 3-channel frame.
///
/// # Panics
/// If `input` has fewer than 3 channels.
pub fn lab_b(input: ArrayView3<u8>, order: ChannelOrder) -> Array2<u8> {
    let (height, width, _) = input.dim();
    let mut output = Array2::<u8>::zeros((height, width));
    let lin = linear_table();

    Zip::indexed(&mut output).par_for_each(|(y, x), out| {
        let (r, g, b) = order.rgb_at(&input, y, x);
        *out = lab_b_linear(lin[r as usize], lin[g as usize], lin[b as usize]);
    });

    output
}
