//! Sign Web - stabilized sign recognition core
//!
//! Turns a per-frame stream of 21 MediaPipe hand landmarks into a stable,
//! human-meaningful sign label with a confidence score. Entry point for
//! the WASM module: only module declarations and wasm_bindgen glue live
//! here; all logic is in submodules.

pub mod bank;
mod bridge;
pub mod recognizer;

use wasm_bindgen::prelude::*;

// Re-export wasm_bindgen functions for JS access
pub use bridge::{
    confirm_sign, detect_sign, get_learner_stats, init_recognizer, is_recognizer_ready,
    reset_session, reset_tracking,
};

/// Called automatically when WASM module loads
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}
