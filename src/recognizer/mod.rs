//! Recognition pipeline - geometry, conflict resolution, adaptation, smoothing
//!
//! Re-exports only. All logic in submodules.

pub mod hand;

mod conflict;
mod engine;
mod geometry;
mod learner;
mod smoother;

pub use conflict::{ConflictResolver, Resolution};
pub use engine::{Detection, SignEngine, DEFAULT_SCORE_THRESHOLD};
pub use geometry::{GeoOpinion, GeometricAnalyzer};
pub use learner::{OnlineLearner, SignStat};
pub use smoother::{HistoryEntry, StableLabel, TemporalSmoother};
