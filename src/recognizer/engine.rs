//! Per-frame orchestration and the host-facing contract
//!
//! One engine instance owns one hand's pipeline state. Hosts tracking two
//! hands run two engines; nothing here is shared.

use super::conflict::{ConflictResolver, Resolution};
use super::geometry::GeometricAnalyzer;
use super::hand::Landmark;
use super::learner::{OnlineLearner, SignStat};
use super::smoother::TemporalSmoother;
use crate::bank::{BankError, CurlDirectionBank, GestureBank};
use std::collections::HashMap;

/// Minimum bank score a candidate needs, when the host does not choose
pub const DEFAULT_SCORE_THRESHOLD: f32 = 7.0;

/// Bank candidates considered per frame
const MAX_CANDIDATES: usize = 4;

/// A stable detection reported to the host
#[derive(Clone, Debug, PartialEq)]
pub struct Detection {
    pub name: String,
    /// 0-100
    pub confidence_percent: u32,
}

/// The full recognition pipeline for one tracked hand.
///
/// Construction leaves the engine uninitialized; `initialize` builds and
/// validates the gesture bank. The smoother and learner have independent
/// lifecycles: the smoother resets on every hand loss, the learner only on
/// an explicit session reset.
pub struct SignEngine {
    bank: Option<Box<dyn GestureBank>>,
    analyzer: GeometricAnalyzer,
    resolver: ConflictResolver,
    learner: OnlineLearner,
    smoother: TemporalSmoother,
}

impl SignEngine {
    pub fn new() -> Self {
        Self {
            bank: None,
            analyzer: GeometricAnalyzer::new(),
            resolver: ConflictResolver::new(GeometricAnalyzer::new()),
            learner: OnlineLearner::new(),
            smoother: TemporalSmoother::new(),
        }
    }

    /// Engine with an injected bank, already initialized. Used for tests
    /// and hosts that bring their own candidate source.
    pub fn with_bank(bank: Box<dyn GestureBank>) -> Self {
        let mut engine = Self::new();
        engine.bank = Some(bank);
        engine
    }

    /// Build and validate the built-in gesture bank. On failure the engine
    /// stays uninitialized and the error is returned for the host to log;
    /// nothing here is fatal.
    pub fn initialize(&mut self) -> Result<(), BankError> {
        let bank = CurlDirectionBank::with_default_vocabulary()?;
        self.bank = Some(Box::new(bank));
        Ok(())
    }

    pub fn is_ready(&self) -> bool {
        self.bank.is_some()
    }

    /// Run one frame through the pipeline.
    ///
    /// Landmarks are 0-1 normalized; they are projected into the bank's
    /// pixel-space convention using the frame dimensions. A bank failure
    /// counts as zero candidates, a resolver miss falls back to pure
    /// geometry, and a total miss clears the smoothing window so stale
    /// votes cannot outlive the pose that produced them.
    pub fn detect_frame(
        &mut self,
        landmarks: &[Landmark],
        frame_width: f32,
        frame_height: f32,
        min_score: f32,
    ) -> Option<Detection> {
        let bank = self.bank.as_ref()?;

        let projected: Vec<Landmark> = landmarks
            .iter()
            .map(|lm| Landmark::new(lm.x * frame_width, lm.y * frame_height, lm.z * frame_width))
            .collect();

        let mut candidates = bank.estimate(&projected, min_score).unwrap_or_default();
        candidates.truncate(MAX_CANDIDATES);

        let resolved = match self.resolver.resolve(&candidates, landmarks) {
            Some(resolution) => resolution,
            None => match self.analyzer.classify(landmarks) {
                Some(geo) => Resolution {
                    name: geo.name.to_string(),
                    score: geo.confidence * 10.0,
                },
                None => {
                    self.smoother.reset();
                    return None;
                }
            },
        };

        let adjusted = self.learner.adjust(&resolved.name, resolved.score);
        let confidence = (adjusted / 10.0).clamp(0.0, 1.0);
        self.smoother.push(&resolved.name, confidence);

        self.smoother.best().map(|label| Detection {
            name: label.name,
            confidence_percent: (label.confidence * 100.0).round() as u32,
        })
    }

    /// Record a debounce-confirmed sign. The host decides what "held
    /// stable long enough" means; only these confirmations shape the
    /// learned bias.
    pub fn confirm_sign(&mut self, name: &str, raw_score: f32) {
        self.learner.observe(name, raw_score);
    }

    /// Hand-loss reset: clears the smoothing window only
    pub fn reset(&mut self) {
        self.smoother.reset();
    }

    /// Full session reset: smoothing window and learned statistics
    pub fn reset_session(&mut self) {
        self.smoother.reset();
        self.learner.reset();
    }

    /// Deep-copied learner statistics for observability tooling
    pub fn learner_stats(&self) -> HashMap<String, SignStat> {
        self.learner.snapshot()
    }
}

impl Default for SignEngine {
    fn default() -> Self {
        Self::new()
    }
}
