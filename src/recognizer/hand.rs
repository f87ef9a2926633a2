//! Hand landmark model and per-finger geometry
//!
//! A hand is exactly 21 MediaPipe landmarks. Anything shorter is treated
//! as absent by every consumer in this crate.

use nalgebra::Vector2;

// ============================================================================
// HAND LANDMARK INDICES (MediaPipe Hands - 21 total)
// ============================================================================

pub const WRIST: usize = 0;
pub const THUMB_CMC: usize = 1;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const INDEX_DIP: usize = 7;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_PIP: usize = 14;
pub const RING_DIP: usize = 15;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_DIP: usize = 19;
pub const PINKY_TIP: usize = 20;

/// Fingertip index per finger (thumb..pinky)
pub const FINGER_TIPS: [usize; 5] = [THUMB_TIP, INDEX_TIP, MIDDLE_TIP, RING_TIP, PINKY_TIP];

/// Base knuckle index per finger (thumb..pinky)
pub const FINGER_BASES: [usize; 5] = [THUMB_MCP, INDEX_MCP, MIDDLE_MCP, RING_MCP, PINKY_MCP];

/// Floor for the hand scale normalizer. Prevents division blow-up when the
/// hand is degenerate or pressed against the camera.
pub const SCALE_EPSILON: f32 = 1e-4;

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// A single 3D landmark point (normalized coordinates)
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Landmark {
    pub x: f32, // 0-1 normalized
    pub y: f32, // 0-1 normalized
    pub z: f32, // Relative depth, smaller = closer to camera
}

impl Landmark {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// A fully populated hand: exactly 21 landmarks, indices fixed by anatomy
pub type Hand = [Landmark; 21];

/// Reinterpret a landmark slice as a Hand. Returns None unless the slice
/// holds exactly 21 points - partial hands are rejected, never processed.
pub fn as_hand(landmarks: &[Landmark]) -> Option<&Hand> {
    landmarks.try_into().ok()
}

/// Parse a flat array of 63 floats (21 landmarks x {x,y,z}) as sent by the
/// JS estimator. Returns None on any other length.
pub fn hand_from_flat(data: &[f32]) -> Option<Hand> {
    if data.len() != 63 {
        return None;
    }
    let mut hand = [Landmark::default(); 21];
    for (i, lm) in hand.iter_mut().enumerate() {
        *lm = Landmark::new(data[i * 3], data[i * 3 + 1], data[i * 3 + 2]);
    }
    Some(hand)
}

/// Per-finger extension flags, derived per frame and never persisted
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FingerState {
    pub thumb: bool,
    pub index: bool,
    pub middle: bool,
    pub ring: bool,
    pub pinky: bool,
}

/// Per-finger extension thresholds (thumb..pinky). A finger counts as
/// extended when tip-to-wrist reach exceeds base-to-wrist reach by this
/// factor. Tuned per finger - fingers have different natural
/// length-to-reach ratios.
const EXTENSION_THRESHOLDS: [f32; 5] = [1.30, 1.60, 1.60, 1.55, 1.45];

impl FingerState {
    /// Derive extension flags from raw landmarks
    pub fn from_hand(hand: &Hand) -> Self {
        let wrist = hand[WRIST];
        let mut flags = [false; 5];
        for f in 0..5 {
            let tip_reach = dist(hand[FINGER_TIPS[f]], wrist);
            let base_reach = dist(hand[FINGER_BASES[f]], wrist);
            flags[f] = tip_reach > base_reach * EXTENSION_THRESHOLDS[f];
        }
        Self {
            thumb: flags[0],
            index: flags[1],
            middle: flags[2],
            ring: flags[3],
            pinky: flags[4],
        }
    }

    /// Number of extended fingers (0-5)
    pub fn extended_count(&self) -> u32 {
        self.thumb as u32
            + self.index as u32
            + self.middle as u32
            + self.ring as u32
            + self.pinky as u32
    }
}

// ============================================================================
// GEOMETRY HELPERS
// ============================================================================

/// 2D Euclidean distance between two landmarks (depth is too noisy on
/// consumer webcams to be useful here)
pub fn dist(a: Landmark, b: Landmark) -> f32 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    (dx * dx + dy * dy).sqrt()
}

/// Hand scale normalizer: wrist to middle-finger base knuckle distance,
/// floored at SCALE_EPSILON
pub fn hand_scale(hand: &Hand) -> f32 {
    dist(hand[WRIST], hand[MIDDLE_MCP]).max(SCALE_EPSILON)
}

/// Angle at `vertex` between the rays toward `a` and `b`, in degrees.
///
/// Returns 180.0 for degenerate (zero-length) rays, matching the
/// "assume straight" convention for unreadable joints.
pub fn angle_deg(a: Landmark, vertex: Landmark, b: Landmark) -> f32 {
    let v1 = Vector2::new(a.x - vertex.x, a.y - vertex.y);
    let v2 = Vector2::new(b.x - vertex.x, b.y - vertex.y);

    let mag1 = v1.norm();
    let mag2 = v2.norm();
    if mag1 < 1e-4 || mag2 < 1e-4 {
        return 180.0;
    }

    let cos_angle = (v1.dot(&v2) / (mag1 * mag2)).clamp(-1.0, 1.0);
    cos_angle.acos().to_degrees()
}
