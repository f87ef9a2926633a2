//! Per-finger curl and pointing-direction estimation
//!
//! Each finger is reduced to two discrete observations per frame: how
//! curled it is (angle at the middle joint) and which of eight directions
//! it points (base knuckle to tip). The estimator matches these against
//! the registry's weighted targets.

use crate::recognizer::hand::{
    angle_deg, Hand, INDEX_MCP, INDEX_PIP, INDEX_TIP, MIDDLE_MCP, MIDDLE_PIP, MIDDLE_TIP,
    PINKY_MCP, PINKY_PIP, PINKY_TIP, RING_MCP, RING_PIP, RING_TIP, THUMB_IP, THUMB_MCP, THUMB_TIP,
};

/// Joint angle (degrees) below which a finger counts as fully curled
const FULL_CURL_DEG: f32 = 130.0;
/// Joint angle below which a finger counts as half curled
const HALF_CURL_DEG: f32 = 160.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Finger {
    Thumb,
    Index,
    Middle,
    Ring,
    Pinky,
}

impl Finger {
    pub const ALL: [Finger; 5] = [
        Finger::Thumb,
        Finger::Index,
        Finger::Middle,
        Finger::Ring,
        Finger::Pinky,
    ];

    /// Position in thumb..pinky order
    pub fn index(&self) -> usize {
        match self {
            Finger::Thumb => 0,
            Finger::Index => 1,
            Finger::Middle => 2,
            Finger::Ring => 3,
            Finger::Pinky => 4,
        }
    }

    /// (base knuckle, middle joint, tip) landmark indices
    fn joints(&self) -> (usize, usize, usize) {
        match self {
            Finger::Thumb => (THUMB_MCP, THUMB_IP, THUMB_TIP),
            Finger::Index => (INDEX_MCP, INDEX_PIP, INDEX_TIP),
            Finger::Middle => (MIDDLE_MCP, MIDDLE_PIP, MIDDLE_TIP),
            Finger::Ring => (RING_MCP, RING_PIP, RING_TIP),
            Finger::Pinky => (PINKY_MCP, PINKY_PIP, PINKY_TIP),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FingerCurl {
    NoCurl,
    HalfCurl,
    FullCurl,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FingerDirection {
    VerticalUp,
    VerticalDown,
    HorizontalLeft,
    HorizontalRight,
    DiagonalUpLeft,
    DiagonalUpRight,
    DiagonalDownLeft,
    DiagonalDownRight,
}

/// Curl from the flexion angle at the finger's middle joint
pub fn estimate_curl(hand: &Hand, finger: Finger) -> FingerCurl {
    let (base, mid, tip) = finger.joints();
    let angle = angle_deg(hand[base], hand[mid], hand[tip]);
    if angle < FULL_CURL_DEG {
        FingerCurl::FullCurl
    } else if angle < HALF_CURL_DEG {
        FingerCurl::HalfCurl
    } else {
        FingerCurl::NoCurl
    }
}

/// Eight-way pointing direction of the base-knuckle-to-tip vector.
/// Screen coordinates: y grows downward, so "up" means tip.y < base.y.
pub fn estimate_direction(hand: &Hand, finger: Finger) -> FingerDirection {
    let (base, _, tip) = finger.joints();
    let dx = hand[tip].x - hand[base].x;
    let dy = hand[base].y - hand[tip].y; // flip so positive = up

    let deg = dy.atan2(dx).to_degrees();
    match deg {
        d if d > 157.5 || d <= -157.5 => FingerDirection::HorizontalLeft,
        d if d > 112.5 => FingerDirection::DiagonalUpLeft,
        d if d > 67.5 => FingerDirection::VerticalUp,
        d if d > 22.5 => FingerDirection::DiagonalUpRight,
        d if d > -22.5 => FingerDirection::HorizontalRight,
        d if d > -67.5 => FingerDirection::DiagonalDownRight,
        d if d > -112.5 => FingerDirection::VerticalDown,
        _ => FingerDirection::DiagonalDownLeft,
    }
}
