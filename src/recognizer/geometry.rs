//! Geometric sign classifier
//!
//! Pure rule-based classification over raw landmarks, independent of the
//! curl/direction gesture bank. Checks run in a fixed order and the first
//! matching pose wins. Per-branch confidences are hand-tuned constants
//! reflecting how reliable each geometric signature has proven in practice,
//! not values computed from the data.

use super::hand::{
    angle_deg, as_hand, dist, hand_scale, FingerState, Hand, Landmark, INDEX_MCP, INDEX_TIP,
    MIDDLE_TIP, PINKY_MCP, PINKY_TIP, THUMB_MCP, THUMB_TIP,
};

/// A classification the analyzer is willing to stand behind
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoOpinion {
    pub name: &'static str,
    /// 0-1, fixed per branch
    pub confidence: f32,
}

/// Minimum opening angle (degrees) at the thumb base for the L pose
const L_ANGLE_DEG: f32 = 58.0;

/// Index/middle fingertip spread (relative to hand scale) separating V from U
const V_SPREAD_RATIO: f32 = 0.70;

/// Thumb-to-index pinch distance (relative to hand scale) for the F pose
const PINCH_RATIO: f32 = 0.40;

/// Stateless geometric classifier
pub struct GeometricAnalyzer;

impl GeometricAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Classify a landmark slice. Returns None unless the slice is a full
    /// 21-point hand and one of the geometric signatures matches - "no
    /// match" means defer to the gesture bank, never guess.
    pub fn classify(&self, landmarks: &[Landmark]) -> Option<GeoOpinion> {
        let hand = as_hand(landmarks)?;
        self.classify_hand(hand)
    }

    pub fn classify_hand(&self, hand: &Hand) -> Option<GeoOpinion> {
        let fingers = FingerState::from_hand(hand);
        let count = fingers.extended_count();
        let scale = hand_scale(hand);

        // Thumb only: thumbs-up vs thumbs-down
        if count == 1 && fingers.thumb {
            let name = if hand[THUMB_TIP].y < hand[INDEX_MCP].y {
                "YES"
            } else {
                "NO"
            };
            let confidence = if name == "YES" { 0.95 } else { 0.92 };
            return Some(GeoOpinion { name, confidence });
        }

        // Thumb + index: L only when the thumb opens wide enough
        if count == 2 && fingers.thumb && fingers.index {
            let opening = angle_deg(hand[THUMB_TIP], hand[THUMB_MCP], hand[INDEX_MCP]);
            if opening > L_ANGLE_DEG {
                return Some(GeoOpinion {
                    name: "L",
                    confidence: 0.90,
                });
            }
            // Too closed to call - the bank sees these better
        }

        // Thumb + index + pinky
        if count == 3 && fingers.thumb && fingers.index && fingers.pinky {
            return Some(GeoOpinion {
                name: "I LOVE YOU",
                confidence: 0.93,
            });
        }

        // Thumb + pinky: phone shape lies flat, hang-ten points up
        if count == 2 && fingers.thumb && fingers.pinky {
            let dx = (hand[PINKY_TIP].x - hand[PINKY_MCP].x).abs();
            let dy = (hand[PINKY_TIP].y - hand[PINKY_MCP].y).abs();
            let (name, confidence) = if dx > dy { ("CALL", 0.88) } else { ("Y", 0.85) };
            return Some(GeoOpinion { name, confidence });
        }

        // All five extended: flat upright palm vs relaxed open hand
        if count == 5 {
            let spread = dist(hand[INDEX_TIP], hand[PINKY_TIP]) / scale;
            let upright = hand[INDEX_TIP].y < hand[INDEX_MCP].y;
            let (name, confidence) = if spread < 1.10 && upright {
                ("STOP", 0.82)
            } else {
                ("HELLO", 0.80)
            };
            return Some(GeoOpinion { name, confidence });
        }

        // Index only, others curled toward the thumb. Confidence drops when
        // the curled pack sits away from the thumb tip.
        if count == 1 && fingers.index {
            let pack = dist(hand[THUMB_TIP], hand[MIDDLE_TIP]);
            let confidence = if pack < 0.50 * scale { 0.84 } else { 0.72 };
            return Some(GeoOpinion {
                name: "D",
                confidence,
            });
        }

        // Index + middle + ring fan
        if count == 3 && fingers.index && fingers.middle && fingers.ring {
            return Some(GeoOpinion {
                name: "W",
                confidence: 0.88,
            });
        }

        // Index + middle: spread vs parallel
        if count == 2 && fingers.index && fingers.middle {
            let spread = dist(hand[INDEX_TIP], hand[MIDDLE_TIP]) / scale;
            let (name, confidence) = if spread > V_SPREAD_RATIO {
                ("V", 0.89)
            } else {
                ("U", 0.86)
            };
            return Some(GeoOpinion { name, confidence });
        }

        // Thumb-index pinch with the back three up
        if fingers.middle
            && fingers.ring
            && fingers.pinky
            && dist(hand[THUMB_TIP], hand[INDEX_TIP]) < PINCH_RATIO * scale
        {
            return Some(GeoOpinion {
                name: "F",
                confidence: 0.87,
            });
        }

        // Fully curled fist: thumb pointing up leans A, down leans S
        if count == 0 {
            let thumb_dy = hand[THUMB_TIP].y - hand[THUMB_MCP].y;
            let (name, confidence) = if thumb_dy < 0.0 { ("A", 0.75) } else { ("S", 0.72) };
            return Some(GeoOpinion { name, confidence });
        }

        None
    }
}

impl Default for GeometricAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::recognizer::hand::{
        FINGER_TIPS, INDEX_DIP, INDEX_PIP, MIDDLE_DIP, MIDDLE_MCP, PINKY_DIP, RING_DIP, RING_MCP,
        RING_TIP, THUMB_CMC, THUMB_IP, WRIST,
    };

    /// Neutral fist: wrist at the bottom of frame, every finger curled in
    /// toward the palm. Tests mutate tips to build specific poses.
    pub(crate) fn fist() -> Hand {
        let mut h = [Landmark::default(); 21];
        h[WRIST] = Landmark::new(0.50, 0.90, 0.0);
        h[THUMB_CMC] = Landmark::new(0.45, 0.85, 0.0);
        h[THUMB_MCP] = Landmark::new(0.42, 0.80, 0.0);
        h[THUMB_IP] = Landmark::new(0.44, 0.78, 0.0);
        h[THUMB_TIP] = Landmark::new(0.47, 0.76, 0.0);
        h[INDEX_MCP] = Landmark::new(0.44, 0.70, 0.0);
        h[INDEX_PIP] = Landmark::new(0.45, 0.74, 0.0);
        h[INDEX_DIP] = Landmark::new(0.46, 0.75, 0.0);
        h[INDEX_TIP] = Landmark::new(0.46, 0.76, 0.0);
        h[MIDDLE_MCP] = Landmark::new(0.50, 0.69, 0.0);
        h[10] = Landmark::new(0.50, 0.73, 0.0);
        h[MIDDLE_DIP] = Landmark::new(0.50, 0.75, 0.0);
        h[MIDDLE_TIP] = Landmark::new(0.50, 0.76, 0.0);
        h[RING_MCP] = Landmark::new(0.56, 0.70, 0.0);
        h[14] = Landmark::new(0.55, 0.74, 0.0);
        h[RING_DIP] = Landmark::new(0.54, 0.75, 0.0);
        h[RING_TIP] = Landmark::new(0.54, 0.76, 0.0);
        h[PINKY_MCP] = Landmark::new(0.61, 0.72, 0.0);
        h[18] = Landmark::new(0.60, 0.75, 0.0);
        h[PINKY_DIP] = Landmark::new(0.59, 0.76, 0.0);
        h[PINKY_TIP] = Landmark::new(0.58, 0.77, 0.0);
        h
    }

    /// Extend a finger (0=thumb..4=pinky) to a far-from-wrist tip position
    pub(crate) fn extend(h: &mut Hand, finger: usize, tip: Landmark) {
        h[FINGER_TIPS[finger]] = tip;
    }

    #[test]
    fn test_rejects_partial_hand() {
        let analyzer = GeometricAnalyzer::new();
        let short = vec![Landmark::default(); 20];
        assert!(analyzer.classify(&short).is_none());
        assert!(analyzer.classify(&[]).is_none());
    }

    #[test]
    fn test_deterministic() {
        let analyzer = GeometricAnalyzer::new();
        let mut h = fist();
        extend(&mut h, 0, Landmark::new(0.45, 0.55, 0.0));
        let a = analyzer.classify(&h);
        let b = analyzer.classify(&h);
        assert_eq!(a, b);
    }

    #[test]
    fn test_thumbs_up_is_yes() {
        let analyzer = GeometricAnalyzer::new();
        let mut h = fist();
        extend(&mut h, 0, Landmark::new(0.45, 0.55, 0.0));
        let op = analyzer.classify(&h).unwrap();
        assert_eq!(op.name, "YES");
        assert!((op.confidence - 0.95).abs() < 1e-6);
    }

    #[test]
    fn test_thumbs_down_is_no() {
        let analyzer = GeometricAnalyzer::new();
        let mut h = fist();
        extend(&mut h, 0, Landmark::new(0.45, 1.15, 0.0));
        let op = analyzer.classify(&h).unwrap();
        assert_eq!(op.name, "NO");
    }

    #[test]
    fn test_open_thumb_index_is_l() {
        let analyzer = GeometricAnalyzer::new();
        let mut h = fist();
        // Thumb out to the side, index straight up: ~90 degree opening
        extend(&mut h, 0, Landmark::new(0.17, 0.78, 0.0));
        extend(&mut h, 1, Landmark::new(0.44, 0.30, 0.0));
        let op = analyzer.classify(&h).unwrap();
        assert_eq!(op.name, "L");
        assert!((op.confidence - 0.90).abs() < 1e-6);
    }

    #[test]
    fn test_closed_thumb_index_defers() {
        let analyzer = GeometricAnalyzer::new();
        let mut h = fist();
        // Thumb nearly parallel to the index base ray: opening well under 58
        extend(&mut h, 0, Landmark::new(0.472, 0.54, 0.0));
        extend(&mut h, 1, Landmark::new(0.44, 0.30, 0.0));
        assert!(analyzer.classify(&h).is_none());
    }

    #[test]
    fn test_thumb_index_pinky_is_i_love_you() {
        let analyzer = GeometricAnalyzer::new();
        let mut h = fist();
        extend(&mut h, 0, Landmark::new(0.17, 0.78, 0.0));
        extend(&mut h, 1, Landmark::new(0.44, 0.30, 0.0));
        extend(&mut h, 4, Landmark::new(0.64, 0.35, 0.0));
        let op = analyzer.classify(&h).unwrap();
        assert_eq!(op.name, "I LOVE YOU");
    }

    #[test]
    fn test_horizontal_pinky_is_call() {
        let analyzer = GeometricAnalyzer::new();
        let mut h = fist();
        extend(&mut h, 0, Landmark::new(0.17, 0.78, 0.0));
        extend(&mut h, 4, Landmark::new(0.95, 0.70, 0.0));
        let op = analyzer.classify(&h).unwrap();
        assert_eq!(op.name, "CALL");
    }

    #[test]
    fn test_vertical_pinky_is_y() {
        let analyzer = GeometricAnalyzer::new();
        let mut h = fist();
        extend(&mut h, 0, Landmark::new(0.17, 0.78, 0.0));
        extend(&mut h, 4, Landmark::new(0.64, 0.35, 0.0));
        let op = analyzer.classify(&h).unwrap();
        assert_eq!(op.name, "Y");
    }

    #[test]
    fn test_spread_two_fingers_is_v() {
        let analyzer = GeometricAnalyzer::new();
        let mut h = fist();
        extend(&mut h, 1, Landmark::new(0.34, 0.32, 0.0));
        extend(&mut h, 2, Landmark::new(0.62, 0.30, 0.0));
        let op = analyzer.classify(&h).unwrap();
        assert_eq!(op.name, "V");
    }

    #[test]
    fn test_parallel_two_fingers_is_u() {
        let analyzer = GeometricAnalyzer::new();
        let mut h = fist();
        extend(&mut h, 1, Landmark::new(0.47, 0.30, 0.0));
        extend(&mut h, 2, Landmark::new(0.52, 0.28, 0.0));
        let op = analyzer.classify(&h).unwrap();
        assert_eq!(op.name, "U");
    }

    #[test]
    fn test_three_finger_fan_is_w() {
        let analyzer = GeometricAnalyzer::new();
        let mut h = fist();
        extend(&mut h, 1, Landmark::new(0.40, 0.30, 0.0));
        extend(&mut h, 2, Landmark::new(0.50, 0.28, 0.0));
        extend(&mut h, 3, Landmark::new(0.60, 0.30, 0.0));
        let op = analyzer.classify(&h).unwrap();
        assert_eq!(op.name, "W");
    }

    #[test]
    fn test_index_only_is_d() {
        let analyzer = GeometricAnalyzer::new();
        let mut h = fist();
        extend(&mut h, 1, Landmark::new(0.44, 0.30, 0.0));
        let op = analyzer.classify(&h).unwrap();
        assert_eq!(op.name, "D");
        // Fist tips sit close to the thumb: high-confidence variant
        assert!((op.confidence - 0.84).abs() < 1e-6);
    }

    #[test]
    fn test_pinch_with_back_three_up_is_f() {
        let analyzer = GeometricAnalyzer::new();
        let mut h = fist();
        // Thumb and index tips meet; middle/ring/pinky extended
        h[THUMB_TIP] = Landmark::new(0.46, 0.72, 0.0);
        h[INDEX_TIP] = Landmark::new(0.47, 0.71, 0.0);
        extend(&mut h, 2, Landmark::new(0.50, 0.28, 0.0));
        extend(&mut h, 3, Landmark::new(0.58, 0.30, 0.0));
        extend(&mut h, 4, Landmark::new(0.66, 0.35, 0.0));
        let op = analyzer.classify(&h).unwrap();
        assert_eq!(op.name, "F");
    }

    #[test]
    fn test_fist_thumb_up_is_a() {
        let analyzer = GeometricAnalyzer::new();
        let h = fist();
        // Neutral fist has the thumb tip above its base knuckle
        let op = analyzer.classify(&h).unwrap();
        assert_eq!(op.name, "A");
    }

    #[test]
    fn test_fist_thumb_down_is_s() {
        let analyzer = GeometricAnalyzer::new();
        let mut h = fist();
        h[THUMB_TIP] = Landmark::new(0.46, 0.84, 0.0);
        let op = analyzer.classify(&h).unwrap();
        assert_eq!(op.name, "S");
    }

    #[test]
    fn test_open_hand_is_hello_or_stop() {
        let analyzer = GeometricAnalyzer::new();
        let mut h = fist();
        extend(&mut h, 0, Landmark::new(0.25, 0.60, 0.0));
        extend(&mut h, 1, Landmark::new(0.40, 0.30, 0.0));
        extend(&mut h, 2, Landmark::new(0.50, 0.26, 0.0));
        extend(&mut h, 3, Landmark::new(0.60, 0.30, 0.0));
        extend(&mut h, 4, Landmark::new(0.70, 0.38, 0.0));
        let op = analyzer.classify(&h).unwrap();
        assert!(op.name == "HELLO" || op.name == "STOP");
    }
}
