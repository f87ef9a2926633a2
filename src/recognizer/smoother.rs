//! Temporal majority-vote smoothing
//!
//! A single misclassified frame should not flip the displayed label. Every
//! per-frame detection lands in a short window; a label is only reported
//! while it holds a weighted majority of that window, with newer frames
//! counting for more.

use std::collections::VecDeque;

/// Window capacity in frames
const WINDOW_SIZE: usize = 9;

/// Entries required before any label is reported
const MIN_ENTRIES: usize = 2;

/// Minimum share of the total recency weight a label needs to win
const VOTE_FRACTION: f32 = 0.48;

/// One per-frame detection in the window
#[derive(Clone, Debug, PartialEq)]
pub struct HistoryEntry {
    pub name: String,
    /// 0-1
    pub confidence: f32,
}

/// The smoothed winner for the current window
#[derive(Clone, Debug, PartialEq)]
pub struct StableLabel {
    pub name: String,
    /// Vote-weighted average confidence, capped at 1.0
    pub confidence: f32,
}

/// Sliding-window weighted majority vote over per-frame labels
#[derive(Default)]
pub struct TemporalSmoother {
    window: VecDeque<HistoryEntry>,
}

impl TemporalSmoother {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a detection, evicting the oldest entry past capacity
    pub fn push(&mut self, name: &str, confidence: f32) {
        self.window.push_back(HistoryEntry {
            name: name.to_string(),
            confidence,
        });
        if self.window.len() > WINDOW_SIZE {
            self.window.pop_front();
        }
    }

    /// Current stable label, if any name holds a weighted majority.
    ///
    /// Weights grow linearly from 1 (oldest) to n (newest); the total is
    /// the triangular number n(n+1)/2. Ties on the raw vote sum go to the
    /// name seen first in the window.
    pub fn best(&self) -> Option<StableLabel> {
        let n = self.window.len();
        if n < MIN_ENTRIES {
            return None;
        }

        // First-seen order matters for ties, so accumulate in a Vec
        let mut tally: Vec<(&str, f32, f32)> = Vec::new(); // (name, votes, conf*weight)
        for (i, entry) in self.window.iter().enumerate() {
            let weight = (i + 1) as f32;
            match tally.iter_mut().find(|(name, _, _)| *name == entry.name) {
                Some((_, votes, weighted_conf)) => {
                    *votes += weight;
                    *weighted_conf += entry.confidence * weight;
                }
                None => tally.push((entry.name.as_str(), weight, entry.confidence * weight)),
            }
        }

        let total_weight = (n * (n + 1) / 2) as f32;
        let mut winner: Option<(&str, f32, f32)> = None;
        for &(name, votes, weighted_conf) in &tally {
            if votes / total_weight < VOTE_FRACTION {
                continue;
            }
            match winner {
                Some((_, best_votes, _)) if votes <= best_votes => {}
                _ => winner = Some((name, votes, weighted_conf)),
            }
        }

        winner.map(|(name, votes, weighted_conf)| StableLabel {
            name: name.to_string(),
            confidence: (weighted_conf / votes).min(1.0),
        })
    }

    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    /// Empty the window. Called on hand loss and on session reset.
    pub fn reset(&mut self) {
        self.window.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_and_single_entry_yield_none() {
        let mut smoother = TemporalSmoother::new();
        assert!(smoother.best().is_none());
        smoother.push("A", 0.9);
        assert!(smoother.best().is_none());
    }

    #[test]
    fn test_unanimous_window_wins() {
        let mut smoother = TemporalSmoother::new();
        for _ in 0..9 {
            smoother.push("HELLO", 0.9);
        }
        let label = smoother.best().unwrap();
        assert_eq!(label.name, "HELLO");
        assert!(label.confidence <= 1.0);
        assert!((label.confidence - 0.9).abs() < 1e-4);
    }

    #[test]
    fn test_confidence_capped_at_one() {
        let mut smoother = TemporalSmoother::new();
        for _ in 0..9 {
            smoother.push("HELLO", 1.7);
        }
        assert!(smoother.best().unwrap().confidence <= 1.0);
    }

    #[test]
    fn test_window_evicts_oldest() {
        let mut smoother = TemporalSmoother::new();
        for _ in 0..9 {
            smoother.push("A", 0.8);
        }
        // Nine newer frames of B push every A out
        for _ in 0..9 {
            smoother.push("B", 0.8);
        }
        assert_eq!(smoother.len(), 9);
        assert_eq!(smoother.best().unwrap().name, "B");
    }

    #[test]
    fn test_vote_fraction_threshold_boundary() {
        // Full window: total weight = 45, threshold = 0.48 -> 21.6.
        // Newest four frames weigh 6+7+8+9 = 30: comfortably eligible.
        let mut smoother = TemporalSmoother::new();
        for _ in 0..5 {
            smoother.push("OLD", 0.9);
        }
        for _ in 0..4 {
            smoother.push("NEW", 0.9);
        }
        // OLD holds 1+2+3+4+5 = 15 -> 0.333, ineligible; NEW wins
        assert_eq!(smoother.best().unwrap().name, "NEW");
    }

    #[test]
    fn test_just_below_fraction_rejected() {
        // Window of 9, weights 1..9, total 45. A name on positions with
        // weight sum 21 sits at 0.466 < 0.48 and must be rejected even
        // though it is the plurality by weight elsewhere too.
        let mut smoother = TemporalSmoother::new();
        // Weights: A gets 4+8+9 = 21; B gets 1+2+3+5+6+7 = 24 -> 0.533
        let pattern = ["B", "B", "B", "A", "B", "B", "B", "A", "A"];
        for name in pattern {
            smoother.push(name, 0.9);
        }
        let label = smoother.best().unwrap();
        assert_eq!(label.name, "B");
    }

    #[test]
    fn test_no_majority_yields_none() {
        let mut smoother = TemporalSmoother::new();
        // Three names interleaved: nobody reaches 48% of the weight
        let pattern = ["A", "B", "C", "A", "B", "C", "A", "B", "C"];
        for name in pattern {
            smoother.push(name, 0.9);
        }
        assert!(smoother.best().is_none());
    }

    #[test]
    fn test_weighted_average_confidence() {
        let mut smoother = TemporalSmoother::new();
        smoother.push("A", 0.0);
        smoother.push("A", 1.0);
        // Weights 1 and 2: average = (0*1 + 1*2) / 3
        let label = smoother.best().unwrap();
        assert!((label.confidence - 2.0 / 3.0).abs() < 1e-4);
    }

    #[test]
    fn test_reset_clears_window() {
        let mut smoother = TemporalSmoother::new();
        for _ in 0..9 {
            smoother.push("Z", 0.9);
        }
        assert!(smoother.best().is_some());
        smoother.reset();
        assert!(smoother.best().is_none());
        assert!(smoother.is_empty());
    }
}
