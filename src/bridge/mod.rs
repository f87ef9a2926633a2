//! Bridge module - JS ↔ Rust communication
//!
//! All #[wasm_bindgen] entry points live here.
//! Re-exports only in mod.rs, logic in submodules.

mod engine_api;

pub use engine_api::{
    confirm_sign, detect_sign, get_learner_stats, init_recognizer, is_recognizer_ready,
    reset_session, reset_tracking,
};
