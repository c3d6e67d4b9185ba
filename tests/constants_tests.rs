// Host-side checks for the browser tuning constants.
// The main crate is wasm-only, so the pure module is included directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use approx::assert_relative_eq;
use constants::*;
use scene_core::constants::{BLOOM_DOWNSCALE, PLANE_SEGMENTS, PLANE_SIZE, TONE_MAPPING_EXPOSURE};
use scene_core::settings::bloom_extent;
use scene_core::{FpsSample, Viewport};

#[test]
#[allow(clippy::assertions_on_constants)]
fn drawing_buffer_constants_are_sane() {
    assert!(PIXEL_RATIO_CAP >= 1.0);
    assert!(BLOOM_DOWNSCALE >= 1);
    for c in CLEAR_COLOR {
        assert!((0.0..=1.0).contains(&c));
    }
    assert_eq!(CLEAR_COLOR[3], 1.0);
}

#[test]
fn element_classes_are_distinct() {
    assert_ne!(CANVAS_CLASS, GUI_CLASS);
    assert_ne!(CANVAS_CLASS, STATS_CLASS);
    assert_ne!(GUI_CLASS, STATS_CLASS);
    for class in [CANVAS_CLASS, GUI_CLASS, STATS_CLASS] {
        assert!(!class.contains(char::is_whitespace));
    }
}

#[test]
fn gui_panel_matches_dat_gui_width() {
    assert_eq!(GUI_WIDTH_PX, 320);
    assert!(!GUI_TITLE.is_empty());
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn pointer_mapping() {
    assert_eq!(MOUSE_BUTTON_PRIMARY, 0);
    assert_eq!(MOUSE_BUTTON_SECONDARY, 2);
    assert!(WHEEL_PAGE_PX > WHEEL_LINE_PX);
    assert!(WHEEL_LINE_PX > 0.0);
}

#[test]
fn capped_ratio_limits_backing_store() {
    let ratio = 3.0_f64.min(PIXEL_RATIO_CAP) as f32;
    let viewport = Viewport::new(800, 600, ratio).expect("viewport");
    assert_eq!(viewport.backing_size(), (1600, 1200));
    assert_relative_eq!(viewport.aspect(), 800.0 / 600.0);
}

#[test]
fn bloom_targets_never_collapse() {
    let viewport = Viewport::new(1, 1, 1.0).expect("viewport");
    let (w, h) = viewport.backing_size();
    assert_eq!(bloom_extent(w, h), (1, 1));
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn mesh_fits_u32_indices() {
    let verts = (PLANE_SEGMENTS as u64 + 1).pow(2);
    assert!(verts < u32::MAX as u64);
    assert!(PLANE_SIZE > 0.0);
    assert!(TONE_MAPPING_EXPOSURE > 1.0);
}

#[test]
fn stats_label_format() {
    let sample = FpsSample {
        fps: 59.6,
        min: 58.2,
        max: 61.0,
    };
    assert_eq!(sample.label(), "60 FPS (58-61)");
}
