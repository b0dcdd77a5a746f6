//! Tests for the lane isolator
//!
//! End-to-end behavior of the full pipeline on synthetic frames.

use super::*;
use crate::config::{ChannelOrder, ThresholdRange};
use crate::error::LaneError;
use crate::filters::color_science::{hls_saturation, lab_b, luv_lightness};
use crate::filters::edge::{gradient_direction, gradient_magnitude, sobel_derivatives};
use crate::filters::grayscale::grayscale;
use crate::filters::threshold::{count_selected, within_threshold};
use crate::selection::{color_selection, gradient_selection};
use ndarray::Array3;

/// Pseudo-random but fixed test pattern.
fn textured_frame(height: usize, width: usize) -> Array3<u8> {
    Array3::from_shape_fn((height, width, 3), |(y, x, c)| {
        let v = (y * 73 + x * 151 + c * 47 + (x * y) % 29) % 256;
        v as u8
    })
}

/// Road-gray background with a vertical yellow stripe, stored as BGR.
fn stripe_frame(height: usize, width: usize, stripe: std::ops::Range<usize>) -> Array3<u8> {
    const ROAD: [u8; 3] = [90, 90, 90];
    const YELLOW_BGR: [u8; 3] = [40, 200, 230];
    Array3::from_shape_fn((height, width, 3), |(_, x, c)| {
        if stripe.contains(&x) {
            YELLOW_BGR[c]
        } else {
            ROAD[c]
        }
    })
}

fn count(mask: &Mask) -> usize {
    count_selected(mask.view())
}

// ========================================================================
// Construction
// ========================================================================

#[test]
fn test_new_rejects_invalid_config() {
    let config = IsolatorConfig::default().with_lightness_range(200, 100);
    assert!(matches!(
        LaneIsolator::new(config),
        Err(LaneError::InvalidConfig(_))
    ));
}

#[test]
fn test_isolator_is_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<LaneIsolator>();
}

// ========================================================================
// Input Handling
// ========================================================================

#[test]
fn test_empty_frame_rejected() {
    let img = Array3::<u8>::zeros((0, 0, 3));
    assert!(matches!(
        LaneIsolator::default().isolate_lines(img.view()),
        Err(LaneError::InvalidInput(_))
    ));
}

#[test]
fn test_four_channel_frame_rejected() {
    let img = Array3::<u8>::zeros((4, 4, 4));
    assert!(matches!(
        LaneIsolator::default().isolate_lines(img.view()),
        Err(LaneError::InvalidInput(_))
    ));
}

#[test]
fn test_input_frame_is_not_modified() {
    let img = textured_frame(6, 9);
    let before = img.clone();

    LaneIsolator::default().isolate_lines(img.view()).unwrap();

    assert_eq!(img, before);
}

// ========================================================================
// Pipeline Properties
// ========================================================================

#[test]
fn test_deterministic() {
    let img = textured_frame(24, 32);
    let isolator = LaneIsolator::default();

    let first = isolator.isolate_lines_detailed(img.view()).unwrap();
    let second = isolator.isolate_lines_detailed(img.view()).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_shape_preserved() {
    let isolator = LaneIsolator::default();
    for (h, w) in [(1, 1), (1, 7), (7, 1), (2, 2), (13, 29)] {
        let img = textured_frame(h, w);
        let selection = isolator.isolate_lines_detailed(img.view()).unwrap();
        assert_eq!(selection.color.dim(), (h, w));
        assert_eq!(selection.gradient.dim(), (h, w));
        assert_eq!(selection.combined.dim(), (h, w));
    }
}

#[test]
fn test_masks_are_binary() {
    let img = textured_frame(20, 20);
    let selection = LaneIsolator::default()
        .isolate_lines_detailed(img.view())
        .unwrap();

    for mask in [&selection.color, &selection.gradient, &selection.combined] {
        assert!(mask.iter().all(|&v| v == 0 || v == 1));
    }
}

#[test]
fn test_combined_is_union() {
    let img = textured_frame(16, 16);
    let selection = LaneIsolator::default()
        .isolate_lines_detailed(img.view())
        .unwrap();

    for ((&c, &g), &m) in selection
        .color
        .iter()
        .zip(selection.gradient.iter())
        .zip(selection.combined.iter())
    {
        assert_eq!(m, (c == 1 || g == 1) as u8);
    }
}

#[test]
fn test_widening_ranges_never_drops_pixels() {
    let img = textured_frame(24, 24);
    let equalized = crate::filters::equalize::equalize_hist(img.view());
    let order = ChannelOrder::Bgr;

    let lightness = luv_lightness(equalized.view(), order);
    let saturation = hls_saturation(equalized.view(), order);
    let chroma = lab_b(equalized.view(), order);
    let gray = grayscale(equalized.view(), order);
    let (dx, dy) = sobel_derivatives(gray.view());
    let magnitude = gradient_magnitude(dx.view(), dy.view()).unwrap();
    let direction = gradient_direction(dx.view(), dy.view()).unwrap();

    let narrow_wide_u8 = [
        (&lightness, ThresholdRange::new(120, 200), ThresholdRange::new(100, 255)),
        (&saturation, ThresholdRange::new(105, 180), ThresholdRange::new(60, 255)),
        (&chroma, ThresholdRange::new(180, 210), ThresholdRange::new(150, 230)),
    ];
    for (map, narrow, wide) in narrow_wide_u8 {
        let n = count(&within_threshold(map.view(), narrow));
        let w = count(&within_threshold(map.view(), wide));
        assert!(w >= n);
    }

    let narrow_wide_f64 = [
        (&magnitude, ThresholdRange::new(30.0, 235.0), ThresholdRange::new(10.0, 600.0)),
        (&direction, ThresholdRange::new(0.2, 1.0), ThresholdRange::new(0.0, 1.6)),
    ];
    for (map, narrow, wide) in narrow_wide_f64 {
        let n = count(&within_threshold(map.view(), narrow));
        let w = count(&within_threshold(map.view(), wide));
        assert!(w >= n);
    }

    // The combine rules are monotonic too, so the final mask only grows
    let base = LaneIsolator::default().isolate_lines(img.view()).unwrap();
    let widened_config = IsolatorConfig::default()
        .with_lightness_range(100, 255)
        .with_saturation_range(60, 255)
        .with_chroma_range(150, 230)
        .with_magnitude_range(10.0, 600.0);
    let widened = LaneIsolator::new(widened_config)
        .unwrap()
        .isolate_lines(img.view())
        .unwrap();

    assert!(count(&widened) >= count(&base));
    for (&b, &w) in base.iter().zip(widened.iter()) {
        assert!(w >= b);
    }
}

#[test]
fn test_concurrent_calls_match_sequential() {
    let isolator = LaneIsolator::default();
    let frames: Vec<Array3<u8>> = (0..4).map(|i| textured_frame(12 + i, 15 + i)).collect();
    let sequential: Vec<Mask> = frames
        .iter()
        .map(|f| isolator.isolate_lines(f.view()).unwrap())
        .collect();

    let concurrent: Vec<Mask> = std::thread::scope(|scope| {
        let handles: Vec<_> = frames
            .iter()
            .map(|f| scope.spawn(|| isolator.isolate_lines(f.view()).unwrap()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(sequential, concurrent);
}

// ========================================================================
// Scenarios
// ========================================================================

#[test]
fn test_flat_gray_frame_selects_nothing() {
    let img = Array3::<u8>::from_elem((30, 40, 3), 128);
    let selection = LaneIsolator::default()
        .isolate_lines_detailed(img.view())
        .unwrap();

    assert_eq!(count(&selection.color), 0);
    assert_eq!(count(&selection.gradient), 0);
    assert_eq!(count(&selection.combined), 0);
}

#[test]
fn test_chroma_only_frame_selected_end_to_end() {
    // Flat frames survive equalization unchanged. Dark red (BGR 0, 0, 200)
    // is in the chroma window while its lightness is not.
    let mut img = Array3::<u8>::zeros((3, 3, 3));
    img.index_axis_mut(ndarray::Axis(2), 2).fill(200);

    let selection = LaneIsolator::default()
        .isolate_lines_detailed(img.view())
        .unwrap();

    assert_eq!(count(&selection.gradient), 0);
    assert_eq!(count(&selection.combined), 9);
}

#[test]
fn test_yellow_stripe_on_road() {
    let (height, width) = (20, 24);
    let stripe = 10..14;
    let img = stripe_frame(height, width, stripe.clone());

    let selection = LaneIsolator::default()
        .isolate_lines_detailed(img.view())
        .unwrap();
    let mask = &selection.combined;

    for y in 0..height {
        for x in 0..width {
            if stripe.contains(&x) {
                assert_eq!(mask[[y, x]], 1, "stripe pixel ({}, {}) missed", y, x);
            } else if x + 1 < stripe.start || x > stripe.end {
                assert_eq!(mask[[y, x]], 0, "road pixel ({}, {}) selected", y, x);
            }
        }
    }
    // The stripe is caught by color; its hard edges exceed the magnitude window
    assert_eq!(count(&selection.color), height * stripe.len());
}

#[test]
fn test_white_stripe_on_dark_road_selects_nothing() {
    // Equalization stretches the two-level frame to a black road with a
    // white stripe. White has no saturation and neutral b, and the
    // 0 -> 255 step (magnitude 1020) is far above the magnitude window.
    let (height, width) = (20, 24);
    let img = Array3::from_shape_fn((height, width, 3), |(_, x, _)| {
        if (10..14).contains(&x) {
            255u8
        } else {
            70
        }
    });

    let selection = LaneIsolator::default()
        .isolate_lines_detailed(img.view())
        .unwrap();

    assert_eq!(count(&selection.color), 0);
    assert_eq!(count(&selection.gradient), 0);
    assert_eq!(count(&selection.combined), 0);
}

#[test]
fn test_rgb_order_matches_bgr_on_swapped_frame() {
    let bgr = stripe_frame(10, 12, 4..7);
    let mut rgb = bgr.clone();
    rgb.invert_axis(ndarray::Axis(2));

    let from_bgr = LaneIsolator::default().isolate_lines(bgr.view()).unwrap();
    let from_rgb = LaneIsolator::new(IsolatorConfig::default().with_channel_order(ChannelOrder::Rgb))
        .unwrap()
        .isolate_lines(rgb.view())
        .unwrap();

    assert_eq!(from_bgr, from_rgb);
}

#[test]
fn test_detailed_masks_match_public_selectors() {
    let img = textured_frame(14, 18);
    let config = IsolatorConfig::default();
    let equalized = crate::filters::equalize::equalize_hist(img.view());

    let selection = LaneIsolator::new(config.clone())
        .unwrap()
        .isolate_lines_detailed(img.view())
        .unwrap();

    assert_eq!(selection.color, color_selection(equalized.view(), &config).unwrap());
    assert_eq!(
        selection.gradient,
        gradient_selection(equalized.view(), &config).unwrap()
    );
}
