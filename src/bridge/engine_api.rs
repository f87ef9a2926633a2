//! Sign engine JS bridge
//!
//! Receives MediaPipe hand landmarks from JavaScript as a flat
//! Float32Array and runs them through the recognition pipeline. One engine
//! per WASM instance; a host tracking two hands loads two instances or
//! serializes its calls.

use crate::recognizer::hand::hand_from_flat;
use crate::recognizer::{SignEngine, DEFAULT_SCORE_THRESHOLD};
use std::cell::RefCell;
use wasm_bindgen::prelude::*;

// Thread-local storage (WASM is single-threaded)
thread_local! {
    static ENGINE: RefCell<SignEngine> = RefCell::new(SignEngine::new());
}

// ============================================================================
// WASM-BINDGEN ENTRY POINTS
// ============================================================================

/// Build the gesture bank. Must be called before detect_sign; returns
/// false (and logs) if the bank cannot be constructed, leaving the engine
/// uninitialized so the host can retry or degrade.
#[wasm_bindgen]
pub fn init_recognizer() -> bool {
    ENGINE.with(|cell| match cell.borrow_mut().initialize() {
        Ok(()) => {
            web_sys::console::log_1(&"✅ Sign recognizer ready".into());
            true
        }
        Err(e) => {
            web_sys::console::error_1(
                &format!("Sign recognizer initialization failed: {}", e).into(),
            );
            false
        }
    })
}

/// Called from JavaScript with a flat Float32Array of 63 values
/// (21 landmarks x3: x, y, z, image-normalized).
///
/// Returns `{name, confidence}` (confidence 0-100) once a label is stable,
/// or null while evidence is insufficient. Pass `min_score <= 0` for the
/// default candidate threshold.
#[wasm_bindgen]
pub fn detect_sign(data: &[f32], frame_width: f32, frame_height: f32, min_score: f32) -> JsValue {
    let hand = match hand_from_flat(data) {
        Some(hand) => hand,
        None => {
            if !data.is_empty() {
                web_sys::console::warn_1(
                    &format!("Invalid landmark data length: {} (expected 63)", data.len()).into(),
                );
            }
            return JsValue::NULL;
        }
    };

    let threshold = if min_score > 0.0 {
        min_score
    } else {
        DEFAULT_SCORE_THRESHOLD
    };

    ENGINE.with(|cell| {
        match cell
            .borrow_mut()
            .detect_frame(&hand, frame_width, frame_height, threshold)
        {
            Some(detection) => {
                let obj = js_sys::Object::new();
                let _ = js_sys::Reflect::set(&obj, &"name".into(), &detection.name.into());
                let _ = js_sys::Reflect::set(
                    &obj,
                    &"confidence".into(),
                    &(detection.confidence_percent as f64).into(),
                );
                obj.into()
            }
            None => JsValue::NULL,
        }
    })
}

/// Called by the host once a label has been held through its debounce
/// window. The only path that updates the learned per-sign bias.
#[wasm_bindgen]
pub fn confirm_sign(name: &str, raw_score: f32) {
    ENGINE.with(|cell| cell.borrow_mut().confirm_sign(name, raw_score));
}

/// Hand tracking lost: drop the smoothing window, keep learned bias
#[wasm_bindgen]
pub fn reset_tracking() {
    ENGINE.with(|cell| cell.borrow_mut().reset());
}

/// Full session reset: smoothing window and learned statistics
#[wasm_bindgen]
pub fn reset_session() {
    ENGINE.with(|cell| cell.borrow_mut().reset_session());
}

/// Whether init_recognizer has succeeded
#[wasm_bindgen]
pub fn is_recognizer_ready() -> bool {
    ENGINE.with(|cell| cell.borrow().is_ready())
}

/// Snapshot of learner statistics as `{name: {ema, count}}`. Deep-copied;
/// mutating the returned object cannot touch engine state.
#[wasm_bindgen]
pub fn get_learner_stats() -> JsValue {
    ENGINE.with(|cell| {
        let stats = cell.borrow().learner_stats();
        let out = js_sys::Object::new();
        for (name, stat) in stats {
            let entry = js_sys::Object::new();
            let _ = js_sys::Reflect::set(&entry, &"ema".into(), &(stat.ema as f64).into());
            let _ = js_sys::Reflect::set(&entry, &"count".into(), &(stat.confirmed as f64).into());
            let _ = js_sys::Reflect::set(&out, &name.into(), &entry.into());
        }
        out.into()
    })
}
