//! Curl/direction gesture bank
//!
//! The ranked-candidate producer the recognition pipeline consumes. The
//! pipeline only ever depends on the `GestureBank` output contract; the
//! curl/direction internals and the gesture table stay behind this seam.

mod curls;
mod estimator;
mod registry;

pub use curls::{estimate_curl, estimate_direction, Finger, FingerCurl, FingerDirection};
pub use estimator::CurlDirectionBank;
pub use registry::{GestureDescription, GestureRegistry};

use crate::recognizer::hand::Landmark;
use std::fmt;

/// A named, scored opinion from the bank. Scores are 0-10.
#[derive(Clone, Debug, PartialEq)]
pub struct Candidate {
    pub name: String,
    pub score: f32,
}

impl Candidate {
    pub fn new(name: impl Into<String>, score: f32) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }
}

/// Anything that can turn a hand into ranked sign candidates
pub trait GestureBank {
    /// Score the hand against every known sign. Returns candidates with
    /// score >= `min_score`, highest first. May legitimately return an
    /// empty list; may fail, which callers downgrade to "no candidates".
    fn estimate(&self, landmarks: &[Landmark], min_score: f32) -> Result<Vec<Candidate>, BankError>;
}

/// Bank construction and matching failures
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BankError {
    /// Registry holds no gestures at all
    EmptyRegistry,
    /// Two registry entries share a name
    DuplicateGesture(String),
    /// A curl or direction target carries a non-positive weight
    InvalidWeight(String),
    /// A gesture lists no curl targets, so it can never be scored
    MissingCurls(String),
    /// Input was not a full 21-point hand
    MalformedHand(usize),
}

impl fmt::Display for BankError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BankError::EmptyRegistry => write!(f, "gesture registry is empty"),
            BankError::DuplicateGesture(name) => {
                write!(f, "duplicate gesture description: {}", name)
            }
            BankError::InvalidWeight(name) => {
                write!(f, "non-positive target weight in gesture: {}", name)
            }
            BankError::MissingCurls(name) => {
                write!(f, "gesture has no curl targets: {}", name)
            }
            BankError::MalformedHand(points) => {
                write!(f, "expected 21 hand landmarks, got {}", points)
            }
        }
    }
}

impl std::error::Error for BankError {}
