// Host-side tests for pure input functions.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod input {
    include!("../src/input.rs");
}

use glam::Vec2;
use input::*;

#[test]
fn overlay_keys_are_case_insensitive() {
    assert_eq!(key_command("h"), Some(KeyCommand::ToggleOverlay));
    assert_eq!(key_command("H"), Some(KeyCommand::ToggleOverlay));
}

#[test]
fn escape_and_home_return_the_camera() {
    assert_eq!(key_command("Escape"), Some(KeyCommand::ReturnHome));
    assert_eq!(key_command("Home"), Some(KeyCommand::ReturnHome));
}

#[test]
fn space_toggles_pause() {
    assert_eq!(key_command(" "), Some(KeyCommand::TogglePause));
}

#[test]
fn unmapped_keys_are_ignored() {
    for key in ["a", "Enter", "Shift", "ArrowUp", ""] {
        assert_eq!(key_command(key), None, "key {:?}", key);
    }
}

#[test]
fn canvas_corners_map_to_ndc_corners() {
    let tl = canvas_px_to_ndc(Vec2::new(0.0, 0.0), 800, 600);
    assert_eq!(tl, Vec2::new(-1.0, 1.0));
    let br = canvas_px_to_ndc(Vec2::new(800.0, 600.0), 800, 600);
    assert_eq!(br, Vec2::new(1.0, -1.0));
}

#[test]
fn canvas_center_maps_to_ndc_origin() {
    let c = canvas_px_to_ndc(Vec2::new(400.0, 300.0), 800, 600);
    assert!(c.length() < 1e-6);
}

#[test]
fn zero_sized_canvas_does_not_produce_nan() {
    let p = canvas_px_to_ndc(Vec2::new(0.0, 0.0), 0, 0);
    assert!(p.x.is_finite() && p.y.is_finite());
}
