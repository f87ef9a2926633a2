//! Conflict resolution between the gesture bank and the geometric classifier
//!
//! The bank's curl/direction matching confuses signs that share a
//! silhouette. Each confusable cluster gets one rule keyed off the bank's
//! top candidate, using landmark geometry to pick the true label. The
//! bank's score passes through unchanged; only the name is corrected.

use super::geometry::GeometricAnalyzer;
use super::hand::{
    as_hand, dist, hand_scale, Hand, Landmark, INDEX_MCP, INDEX_PIP, INDEX_TIP, MIDDLE_MCP,
    MIDDLE_TIP, PINKY_MCP, PINKY_TIP, RING_MCP, RING_TIP, THUMB_TIP, WRIST,
};
use crate::bank::Candidate;

/// The single resolved opinion for one frame. Scores are 0-10.
#[derive(Clone, Debug, PartialEq)]
pub struct Resolution {
    pub name: String,
    pub score: f32,
}

/// Score multiplier when geometry independently confirms the bank's top pick
const AGREEMENT_BOOST: f32 = 1.12;

/// Geometric confidence above which agreement earns the boost
const AGREEMENT_CONFIDENCE: f32 = 0.80;

/// Geometric confidence above which geometry overrides a disagreeing bank.
/// Static angle/distance measurements are numerically steadier than
/// curl/direction heuristics for the poses the analyzer covers.
const OVERRIDE_CONFIDENCE: f32 = 0.87;

pub struct ConflictResolver {
    analyzer: GeometricAnalyzer,
}

impl ConflictResolver {
    pub fn new(analyzer: GeometricAnalyzer) -> Self {
        Self { analyzer }
    }

    /// Merge the bank's ranked candidates with the geometric opinion.
    /// Returns None only for an empty candidate list or a malformed hand;
    /// the caller then falls back to the geometric classifier alone.
    pub fn resolve(&self, candidates: &[Candidate], landmarks: &[Landmark]) -> Option<Resolution> {
        let top = candidates.first()?;
        let hand = as_hand(landmarks)?;
        let scale = hand_scale(hand);

        if let Some(geo) = self.analyzer.classify_hand(hand) {
            if geo.name == top.name && geo.confidence > AGREEMENT_CONFIDENCE {
                // Two independent signals agree: trust the label more
                return Some(Resolution {
                    name: top.name.clone(),
                    score: (top.score * AGREEMENT_BOOST).min(10.0),
                });
            }
            if geo.name != top.name && geo.confidence > OVERRIDE_CONFIDENCE {
                return Some(Resolution {
                    name: geo.name.to_string(),
                    score: geo.confidence * 10.0,
                });
            }
        }

        let name = self.disambiguate(top.name.as_str(), candidates, hand, scale);
        Some(Resolution {
            name,
            score: top.score,
        })
    }

    /// Per-cluster rules, keyed off the bank's top name. Unknown names pass
    /// through untouched.
    fn disambiguate(
        &self,
        top_name: &str,
        candidates: &[Candidate],
        hand: &Hand,
        scale: f32,
    ) -> String {
        match top_name {
            "A" | "S" | "E" => Self::resolve_fist_family(hand, scale),
            "M" | "N" | "T" => Self::resolve_folded_family(top_name, hand, scale),
            "R" | "U" => Self::resolve_crossed_pair(hand),
            "FIVE" | "FOUR" => Self::resolve_spread_tension(hand, scale),
            "F" => Self::resolve_pinch_pair(hand, scale),
            "HELLO" | "STOP" => Self::resolve_open_palm_pair(hand),
            "P" | "K" | "H" => Self::resolve_pointing_family(top_name, candidates, hand),
            "C" | "O" | "EAT" | "HOT" | "DRINK" => Self::resolve_arc_family(hand, scale),
            "CALL" | "Y" => Self::resolve_pinky_pair(hand),
            "B" => Self::resolve_flat_pair(hand, scale),
            _ => top_name.to_string(),
        }
    }

    /// A / S / E: all share a closed fist; only the thumb placement
    /// differs. Beside the fist = A, crossed over the front = S, tucked
    /// low against the fingers = E.
    fn resolve_fist_family(hand: &Hand, scale: f32) -> String {
        let thumb = hand[THUMB_TIP];
        let lateral = (thumb.x - hand[INDEX_MCP].x).abs();
        if lateral > 0.35 * scale {
            return "A".into();
        }
        if thumb.y > hand[INDEX_PIP].y {
            "E".into()
        } else {
            "S".into()
        }
    }

    /// M / N / T: thumb threaded through folded fingers. The discriminator
    /// is how many fingertips hang below past the thumb tip - three for M,
    /// two for N, one for T. A thumb that is not actually crossing the
    /// folded pack leaves the bank's answer alone.
    fn resolve_folded_family(top_name: &str, hand: &Hand, scale: f32) -> String {
        let thumb = hand[THUMB_TIP];
        let span_lo = hand[INDEX_MCP].x.min(hand[RING_MCP].x) - 0.25 * scale;
        let span_hi = hand[INDEX_MCP].x.max(hand[RING_MCP].x) + 0.25 * scale;
        if thumb.x < span_lo || thumb.x > span_hi {
            return top_name.to_string();
        }

        let over = [INDEX_TIP, MIDDLE_TIP, RING_TIP]
            .iter()
            .filter(|&&tip| hand[tip].y > thumb.y)
            .count();
        match over {
            3 => "M".into(),
            2 => "N".into(),
            _ => "T".into(),
        }
    }

    /// R / U: same two extended fingers; crossed fingers lean toward each
    /// other, parallel fingers lean the same way.
    fn resolve_crossed_pair(hand: &Hand) -> String {
        let index_lean = hand[INDEX_TIP].x - hand[INDEX_MCP].x;
        let middle_lean = hand[MIDDLE_TIP].x - hand[MIDDLE_MCP].x;
        if index_lean * middle_lean < 0.0 {
            "R".into()
        } else {
            "U".into()
        }
    }

    /// FIVE / FOUR: open hand; the thumb either splays away from the palm
    /// (relaxed FIVE) or presses across it (tense FOUR).
    fn resolve_spread_tension(hand: &Hand, scale: f32) -> String {
        let palm_center = Landmark::new(
            (hand[WRIST].x + hand[INDEX_MCP].x + hand[PINKY_MCP].x) / 3.0,
            (hand[WRIST].y + hand[INDEX_MCP].y + hand[PINKY_MCP].y) / 3.0,
            0.0,
        );
        if dist(hand[THUMB_TIP], palm_center) > 0.80 * scale {
            "FIVE".into()
        } else {
            "FOUR".into()
        }
    }

    /// F / O: both pinch thumb to index. O closes the ring completely.
    fn resolve_pinch_pair(hand: &Hand, scale: f32) -> String {
        if dist(hand[THUMB_TIP], hand[INDEX_TIP]) < 0.22 * scale {
            "O".into()
        } else {
            "F".into()
        }
    }

    /// HELLO / STOP: both are an open palm; STOP holds the fingers dead
    /// vertical, HELLO lets them lean.
    fn resolve_open_palm_pair(hand: &Hand) -> String {
        let dx = hand[MIDDLE_TIP].x - hand[MIDDLE_MCP].x;
        let dy = hand[MIDDLE_TIP].y - hand[MIDDLE_MCP].y;
        if dy >= 0.0 {
            // Fingers not even pointing up
            return "HELLO".into();
        }
        let deviation = dx.abs().atan2(-dy).to_degrees();
        if deviation < 25.0 {
            "STOP".into()
        } else {
            "HELLO".into()
        }
    }

    /// P / K / H: P is the downward-pointing member. For the horizontal
    /// members the bank's own pick survives; when the bank said P but the
    /// index is not pointing down, the runner-up candidate carries through
    /// if it names the other two.
    fn resolve_pointing_family(top_name: &str, candidates: &[Candidate], hand: &Hand) -> String {
        let dx = hand[INDEX_TIP].x - hand[INDEX_MCP].x;
        let dy = hand[INDEX_TIP].y - hand[INDEX_MCP].y;
        let downward = dy > 0.0 && dy.abs() > dx.abs();
        if downward {
            return "P".into();
        }
        if top_name == "K" || top_name == "H" {
            return top_name.to_string();
        }
        match candidates.get(1).map(|c| c.name.as_str()) {
            Some("K") => "K".into(),
            Some("H") => "H".into(),
            _ => "K".into(),
        }
    }

    /// C / O / EAT / HOT / DRINK: the arc-shaped cluster. A fully closed
    /// pinch is O; otherwise the fingertip pack's vertical lean picks EAT
    /// (up) or HOT (down), defaulting to C in the neutral band. DRINK
    /// shares the arc silhouette but has no discriminating measurement
    /// here, so it currently falls through to the three-way test and can
    /// resolve to C.
    fn resolve_arc_family(hand: &Hand, scale: f32) -> String {
        if dist(hand[THUMB_TIP], hand[INDEX_TIP]) < 0.25 * scale {
            return "O".into();
        }
        let lean = hand[MIDDLE_TIP].y - hand[MIDDLE_MCP].y;
        if lean < -0.15 * scale {
            "EAT".into()
        } else if lean > 0.15 * scale {
            "HOT".into()
        } else {
            "C".into()
        }
    }

    /// CALL / Y: both extend thumb and pinky; the pinky lies flat for the
    /// phone shape and points up for hang-ten.
    fn resolve_pinky_pair(hand: &Hand) -> String {
        let dx = (hand[PINKY_TIP].x - hand[PINKY_MCP].x).abs();
        let dy = (hand[PINKY_TIP].y - hand[PINKY_MCP].y).abs();
        if dx > dy {
            "CALL".into()
        } else {
            "Y".into()
        }
    }

    /// B / FIVE: flat hand with fingers together vs splayed open
    fn resolve_flat_pair(hand: &Hand, scale: f32) -> String {
        if dist(hand[INDEX_TIP], hand[PINKY_TIP]) / scale > 0.90 {
            "FIVE".into()
        } else {
            "B".into()
        }
    }
}

impl Default for ConflictResolver {
    fn default() -> Self {
        Self::new(GeometricAnalyzer::new())
    }
}
