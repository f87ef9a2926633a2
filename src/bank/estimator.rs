//! Candidate estimation against the gesture registry
//!
//! Scores every registered sign 0-10 against the observed per-finger curls
//! and directions, then returns the candidates above the caller's
//! threshold, highest score first.

use super::curls::{estimate_curl, estimate_direction, Finger, FingerCurl, FingerDirection};
use super::registry::{GestureDescription, GestureRegistry};
use super::{BankError, Candidate, GestureBank};
use crate::recognizer::hand::{as_hand, Hand, Landmark};

/// The crate's concrete gesture bank
pub struct CurlDirectionBank {
    registry: GestureRegistry,
}

impl CurlDirectionBank {
    /// Validates the registry up front; a bad table fails construction
    /// rather than estimation.
    pub fn new(registry: GestureRegistry) -> Result<Self, BankError> {
        registry.validate()?;
        Ok(Self { registry })
    }

    pub fn with_default_vocabulary() -> Result<Self, BankError> {
        Self::new(GestureRegistry::default_vocabulary())
    }

    pub fn gesture_count(&self) -> usize {
        self.registry.len()
    }

    /// Score one gesture against the observed hand, 0-10.
    ///
    /// Per finger and category: a matching target adds its weight, a
    /// listed-but-mismatched finger subtracts that finger's strongest
    /// weight. The sum is normalized by the best achievable total.
    fn score_gesture(
        desc: &GestureDescription,
        curls: &[FingerCurl; 5],
        directions: &[FingerDirection; 5],
    ) -> f32 {
        let mut raw = 0.0f32;
        let mut total = 0.0f32;

        for finger in Finger::ALL {
            let observed_curl = curls[finger.index()];
            let mut best = 0.0f32;
            let mut matched: Option<f32> = None;
            for t in desc.curls.iter().filter(|t| t.finger == finger) {
                best = best.max(t.weight);
                if t.curl == observed_curl {
                    matched = Some(matched.unwrap_or(0.0).max(t.weight));
                }
            }
            if best > 0.0 {
                total += best;
                raw += matched.unwrap_or(-best);
            }

            let observed_dir = directions[finger.index()];
            let mut best = 0.0f32;
            let mut matched: Option<f32> = None;
            for t in desc.directions.iter().filter(|t| t.finger == finger) {
                best = best.max(t.weight);
                if t.direction == observed_dir {
                    matched = Some(matched.unwrap_or(0.0).max(t.weight));
                }
            }
            if best > 0.0 {
                total += best;
                raw += matched.unwrap_or(-best);
            }
        }

        if total <= 0.0 {
            return 0.0;
        }
        (raw / total * 10.0).clamp(0.0, 10.0)
    }

    fn observe(hand: &Hand) -> ([FingerCurl; 5], [FingerDirection; 5]) {
        let mut curls = [FingerCurl::NoCurl; 5];
        let mut directions = [FingerDirection::VerticalUp; 5];
        for finger in Finger::ALL {
            curls[finger.index()] = estimate_curl(hand, finger);
            directions[finger.index()] = estimate_direction(hand, finger);
        }
        (curls, directions)
    }
}

impl GestureBank for CurlDirectionBank {
    fn estimate(&self, landmarks: &[Landmark], min_score: f32) -> Result<Vec<Candidate>, BankError> {
        let hand = as_hand(landmarks).ok_or(BankError::MalformedHand(landmarks.len()))?;
        let (curls, directions) = Self::observe(hand);

        let mut candidates: Vec<Candidate> = self
            .registry
            .gestures()
            .iter()
            .map(|g| Candidate::new(g.name.clone(), Self::score_gesture(g, &curls, &directions)))
            .filter(|c| c.score >= min_score)
            .collect();

        candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recognizer::hand::{
        Landmark, INDEX_MCP, INDEX_PIP, INDEX_TIP, MIDDLE_MCP, MIDDLE_PIP, MIDDLE_TIP, PINKY_MCP,
        PINKY_PIP, PINKY_TIP, RING_MCP, RING_PIP, RING_TIP, THUMB_IP, THUMB_MCP, THUMB_TIP, WRIST,
    };

    /// Hand with index and middle straight up, everything else folded
    fn two_fingers_up() -> Vec<Landmark> {
        let mut h = vec![Landmark::default(); 21];
        h[WRIST] = Landmark::new(0.50, 0.90, 0.0);

        // Thumb folded across the palm
        h[THUMB_MCP] = Landmark::new(0.42, 0.80, 0.0);
        h[THUMB_IP] = Landmark::new(0.46, 0.76, 0.0);
        h[THUMB_TIP] = Landmark::new(0.44, 0.79, 0.0);

        // Index straight up
        h[INDEX_MCP] = Landmark::new(0.46, 0.70, 0.0);
        h[INDEX_PIP] = Landmark::new(0.46, 0.55, 0.0);
        h[INDEX_TIP] = Landmark::new(0.46, 0.35, 0.0);

        // Middle straight up
        h[MIDDLE_MCP] = Landmark::new(0.52, 0.69, 0.0);
        h[MIDDLE_PIP] = Landmark::new(0.52, 0.54, 0.0);
        h[MIDDLE_TIP] = Landmark::new(0.52, 0.33, 0.0);

        // Ring and pinky folded back toward their knuckles
        h[RING_MCP] = Landmark::new(0.58, 0.70, 0.0);
        h[RING_PIP] = Landmark::new(0.58, 0.62, 0.0);
        h[RING_TIP] = Landmark::new(0.59, 0.71, 0.0);

        h[PINKY_MCP] = Landmark::new(0.63, 0.72, 0.0);
        h[PINKY_PIP] = Landmark::new(0.63, 0.66, 0.0);
        h[PINKY_TIP] = Landmark::new(0.64, 0.73, 0.0);
        h
    }

    #[test]
    fn test_rejects_malformed_hand() {
        let bank = CurlDirectionBank::with_default_vocabulary().unwrap();
        let short = vec![Landmark::default(); 20];
        assert_eq!(bank.estimate(&short, 0.0), Err(BankError::MalformedHand(20)));
    }

    #[test]
    fn test_candidates_ranked_descending() {
        let bank = CurlDirectionBank::with_default_vocabulary().unwrap();
        let candidates = bank.estimate(&two_fingers_up(), 0.0).unwrap();
        assert!(!candidates.is_empty());
        for pair in candidates.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn test_two_fingers_up_favor_u() {
        let bank = CurlDirectionBank::with_default_vocabulary().unwrap();
        let candidates = bank.estimate(&two_fingers_up(), 5.0).unwrap();
        assert_eq!(candidates[0].name, "U");
        assert!(candidates[0].score > 7.0);
    }

    #[test]
    fn test_threshold_filters_low_scores() {
        let bank = CurlDirectionBank::with_default_vocabulary().unwrap();
        let all = bank.estimate(&two_fingers_up(), 0.0).unwrap();
        let strict = bank.estimate(&two_fingers_up(), 9.5).unwrap();
        assert!(strict.len() < all.len());
        assert!(strict.iter().all(|c| c.score >= 9.5));
    }

    #[test]
    fn test_scores_bounded() {
        let bank = CurlDirectionBank::with_default_vocabulary().unwrap();
        let candidates = bank.estimate(&two_fingers_up(), 0.0).unwrap();
        assert!(candidates.iter().all(|c| (0.0..=10.0).contains(&c.score)));
    }

    #[test]
    fn test_invalid_registry_fails_construction() {
        let registry = GestureRegistry::new(vec![]);
        assert!(CurlDirectionBank::new(registry).is_err());
    }
}
