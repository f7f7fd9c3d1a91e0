// Host-side tests for the hint overlay text.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod overlay {
    include!("../src/overlay.rs");
}

use overlay::hint_text;

#[test]
fn idle_hint_invites_a_click() {
    let text = hint_text(None, false);
    assert!(text.contains("planet"));
    assert!(text.contains("moon"));
}

#[test]
fn following_hint_names_the_object() {
    let text = hint_text(Some("moon"), false);
    assert!(text.starts_with("Following moon"));
}

#[test]
fn returning_hint_differs_from_idle() {
    assert_ne!(hint_text(None, true), hint_text(None, false));
}
