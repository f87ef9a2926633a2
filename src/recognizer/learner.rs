//! Session-scoped per-sign score adaptation
//!
//! Some users consistently score low (or high) on particular signs because
//! of hand anatomy. This tracks a slow exponential moving average of the
//! raw scores of confirmed detections and nudges future scores toward the
//! nominal confident target - but only once enough confirmations exist to
//! trust the offset.

use std::collections::HashMap;

/// EMA smoothing factor. Deliberately slow so one odd session cannot
/// swing the bias.
const ALPHA: f32 = 0.12;

/// Confirmations required before any offset is applied
const MIN_CONFIRMED: u32 = 8;

/// Raw score a reliably produced sign should sit at
const TARGET_SCORE: f32 = 8.5;

/// Offset bound, both directions. Prevents runaway compensation.
const MAX_OFFSET: f32 = 2.5;

/// Per-sign running statistics
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SignStat {
    pub ema: f32,
    pub confirmed: u32,
}

/// Adapts raw bank scores using session history. State lives only for the
/// session; nothing is persisted.
#[derive(Default)]
pub struct OnlineLearner {
    stats: HashMap<String, SignStat>,
}

impl OnlineLearner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a debounce-confirmed detection. This is the only mutation
    /// path - per-frame detections never touch the statistics.
    pub fn observe(&mut self, name: &str, raw_score: f32) {
        let stat = self.stats.entry(name.to_string()).or_insert(SignStat {
            ema: raw_score,
            confirmed: 0,
        });
        stat.confirmed += 1;
        stat.ema = ALPHA * raw_score + (1.0 - ALPHA) * stat.ema;
    }

    /// Bias a raw score by the sign's learned deficit or surplus. Signs
    /// without enough confirmations pass through untouched.
    pub fn adjust(&self, name: &str, raw_score: f32) -> f32 {
        match self.stats.get(name) {
            Some(stat) if stat.confirmed >= MIN_CONFIRMED => {
                let offset = (TARGET_SCORE - stat.ema).clamp(-MAX_OFFSET, MAX_OFFSET);
                raw_score + offset
            }
            _ => raw_score,
        }
    }

    /// Deep copy of the statistics table, for observability tooling
    pub fn snapshot(&self) -> HashMap<String, SignStat> {
        self.stats.clone()
    }

    /// Drop all learned state. Full session reset only - transient hand
    /// loss must not erase the bias.
    pub fn reset(&mut self) {
        self.stats.clear();
    }
}
