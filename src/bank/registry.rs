//! Gesture description registry
//!
//! Data configuration, not logic: each sign is a set of weighted curl and
//! direction targets per finger, in the style of a fingerpose gesture
//! table. Built once at startup and never mutated. The disambiguation
//! rules in the recognizer never see this representation, only the ranked
//! candidates the estimator produces from it.

use super::curls::{Finger, FingerCurl, FingerDirection};
use super::BankError;
use std::collections::HashSet;

/// One weighted curl target for one finger
#[derive(Clone, Copy, Debug)]
pub struct CurlTarget {
    pub finger: Finger,
    pub curl: FingerCurl,
    pub weight: f32,
}

/// One weighted direction target for one finger
#[derive(Clone, Copy, Debug)]
pub struct DirectionTarget {
    pub finger: Finger,
    pub direction: FingerDirection,
    pub weight: f32,
}

/// Weighted curl/direction template for a single sign
#[derive(Clone, Debug)]
pub struct GestureDescription {
    pub name: String,
    pub curls: Vec<CurlTarget>,
    pub directions: Vec<DirectionTarget>,
}

impl GestureDescription {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            curls: Vec::new(),
            directions: Vec::new(),
        }
    }

    /// Add an acceptable curl for a finger. A finger may list several
    /// acceptable curls with different weights.
    pub fn curl(mut self, finger: Finger, curl: FingerCurl, weight: f32) -> Self {
        self.curls.push(CurlTarget {
            finger,
            curl,
            weight,
        });
        self
    }

    /// Add an acceptable pointing direction for a finger
    pub fn direction(mut self, finger: Finger, direction: FingerDirection, weight: f32) -> Self {
        self.directions.push(DirectionTarget {
            finger,
            direction,
            weight,
        });
        self
    }
}

/// Immutable table of every sign the bank can propose
#[derive(Clone, Debug)]
pub struct GestureRegistry {
    gestures: Vec<GestureDescription>,
}

impl GestureRegistry {
    pub fn new(gestures: Vec<GestureDescription>) -> Self {
        Self { gestures }
    }

    pub fn gestures(&self) -> &[GestureDescription] {
        &self.gestures
    }

    pub fn len(&self) -> usize {
        self.gestures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gestures.is_empty()
    }

    /// Construction-time validation. A registry that fails here leaves the
    /// engine uninitialized.
    pub fn validate(&self) -> Result<(), BankError> {
        if self.gestures.is_empty() {
            return Err(BankError::EmptyRegistry);
        }
        let mut seen = HashSet::new();
        for g in &self.gestures {
            if !seen.insert(g.name.as_str()) {
                return Err(BankError::DuplicateGesture(g.name.clone()));
            }
            if g.curls.is_empty() {
                return Err(BankError::MissingCurls(g.name.clone()));
            }
            let weights_ok = g.curls.iter().all(|t| t.weight > 0.0)
                && g.directions.iter().all(|t| t.weight > 0.0);
            if !weights_ok {
                return Err(BankError::InvalidWeight(g.name.clone()));
            }
        }
        Ok(())
    }

    /// The built-in sign vocabulary
    pub fn default_vocabulary() -> Self {
        use Finger::*;
        use FingerCurl::*;
        use FingerDirection::*;

        let fist = |d: GestureDescription| {
            d.curl(Index, FullCurl, 1.0)
                .curl(Middle, FullCurl, 1.0)
                .curl(Ring, FullCurl, 1.0)
                .curl(Pinky, FullCurl, 1.0)
        };
        let open = |d: GestureDescription| {
            d.curl(Index, NoCurl, 1.0)
                .curl(Middle, NoCurl, 1.0)
                .curl(Ring, NoCurl, 1.0)
                .curl(Pinky, NoCurl, 1.0)
        };
        let arc = |d: GestureDescription| {
            d.curl(Index, HalfCurl, 1.0)
                .curl(Middle, HalfCurl, 1.0)
                .curl(Ring, HalfCurl, 1.0)
                .curl(Pinky, HalfCurl, 1.0)
        };

        let gestures = vec![
            fist(GestureDescription::new("YES"))
                .curl(Thumb, NoCurl, 1.0)
                .direction(Thumb, VerticalUp, 1.0)
                .direction(Thumb, DiagonalUpLeft, 0.6)
                .direction(Thumb, DiagonalUpRight, 0.6),
            fist(GestureDescription::new("NO"))
                .curl(Thumb, NoCurl, 1.0)
                .direction(Thumb, VerticalDown, 1.0)
                .direction(Thumb, DiagonalDownLeft, 0.6)
                .direction(Thumb, DiagonalDownRight, 0.6),
            GestureDescription::new("L")
                .curl(Thumb, NoCurl, 1.0)
                .curl(Index, NoCurl, 1.0)
                .curl(Middle, FullCurl, 1.0)
                .curl(Ring, FullCurl, 1.0)
                .curl(Pinky, FullCurl, 1.0)
                .direction(Index, VerticalUp, 1.0)
                .direction(Thumb, HorizontalLeft, 0.7)
                .direction(Thumb, HorizontalRight, 0.7),
            GestureDescription::new("I LOVE YOU")
                .curl(Thumb, NoCurl, 1.0)
                .curl(Index, NoCurl, 1.0)
                .curl(Middle, FullCurl, 1.0)
                .curl(Ring, FullCurl, 1.0)
                .curl(Pinky, NoCurl, 1.0)
                .direction(Index, VerticalUp, 1.0)
                .direction(Pinky, VerticalUp, 0.7)
                .direction(Pinky, DiagonalUpRight, 0.5)
                .direction(Pinky, DiagonalUpLeft, 0.5),
            GestureDescription::new("CALL")
                .curl(Thumb, NoCurl, 1.0)
                .curl(Index, FullCurl, 1.0)
                .curl(Middle, FullCurl, 1.0)
                .curl(Ring, FullCurl, 1.0)
                .curl(Pinky, NoCurl, 1.0)
                .direction(Pinky, HorizontalLeft, 0.8)
                .direction(Pinky, HorizontalRight, 0.8),
            GestureDescription::new("Y")
                .curl(Thumb, NoCurl, 1.0)
                .curl(Index, FullCurl, 1.0)
                .curl(Middle, FullCurl, 1.0)
                .curl(Ring, FullCurl, 1.0)
                .curl(Pinky, NoCurl, 1.0)
                .direction(Pinky, VerticalUp, 0.8)
                .direction(Pinky, DiagonalUpRight, 0.6)
                .direction(Pinky, DiagonalUpLeft, 0.6),
            open(GestureDescription::new("STOP"))
                .curl(Thumb, NoCurl, 1.0)
                .direction(Index, VerticalUp, 1.0)
                .direction(Middle, VerticalUp, 1.0),
            open(GestureDescription::new("HELLO"))
                .curl(Thumb, NoCurl, 1.0)
                .curl(Thumb, HalfCurl, 0.5)
                .direction(Index, VerticalUp, 0.7)
                .direction(Index, DiagonalUpLeft, 0.5)
                .direction(Index, DiagonalUpRight, 0.5),
            GestureDescription::new("D")
                .curl(Thumb, HalfCurl, 1.0)
                .curl(Index, NoCurl, 1.0)
                .curl(Middle, FullCurl, 1.0)
                .curl(Middle, HalfCurl, 0.6)
                .curl(Ring, FullCurl, 1.0)
                .curl(Pinky, FullCurl, 1.0)
                .direction(Index, VerticalUp, 1.0),
            GestureDescription::new("W")
                .curl(Thumb, HalfCurl, 1.0)
                .curl(Index, NoCurl, 1.0)
                .curl(Middle, NoCurl, 1.0)
                .curl(Ring, NoCurl, 1.0)
                .curl(Pinky, FullCurl, 1.0)
                .direction(Middle, VerticalUp, 1.0),
            GestureDescription::new("V")
                .curl(Thumb, FullCurl, 0.5)
                .curl(Thumb, HalfCurl, 0.5)
                .curl(Index, NoCurl, 1.0)
                .curl(Middle, NoCurl, 1.0)
                .curl(Ring, FullCurl, 1.0)
                .curl(Pinky, FullCurl, 1.0)
                .direction(Index, DiagonalUpLeft, 0.7)
                .direction(Middle, DiagonalUpRight, 0.7),
            GestureDescription::new("U")
                .curl(Thumb, FullCurl, 0.5)
                .curl(Thumb, HalfCurl, 0.5)
                .curl(Index, NoCurl, 1.0)
                .curl(Middle, NoCurl, 1.0)
                .curl(Ring, FullCurl, 1.0)
                .curl(Pinky, FullCurl, 1.0)
                .direction(Index, VerticalUp, 1.0)
                .direction(Middle, VerticalUp, 1.0),
            GestureDescription::new("F")
                .curl(Thumb, HalfCurl, 1.0)
                .curl(Index, HalfCurl, 1.0)
                .curl(Index, FullCurl, 0.6)
                .curl(Middle, NoCurl, 1.0)
                .curl(Ring, NoCurl, 1.0)
                .curl(Pinky, NoCurl, 1.0)
                .direction(Middle, VerticalUp, 0.8),
            fist(GestureDescription::new("A"))
                .curl(Thumb, NoCurl, 1.0)
                .direction(Thumb, VerticalUp, 0.6)
                .direction(Thumb, DiagonalUpLeft, 0.5)
                .direction(Thumb, DiagonalUpRight, 0.5),
            fist(GestureDescription::new("S")).curl(Thumb, HalfCurl, 1.0),
            fist(GestureDescription::new("E")).curl(Thumb, FullCurl, 1.0),
            fist(GestureDescription::new("M")).curl(Thumb, FullCurl, 1.0).curl(Thumb, HalfCurl, 0.5),
            fist(GestureDescription::new("N")).curl(Thumb, FullCurl, 1.0).curl(Thumb, HalfCurl, 0.6),
            fist(GestureDescription::new("T")).curl(Thumb, HalfCurl, 1.0).curl(Thumb, FullCurl, 0.6),
            GestureDescription::new("R")
                .curl(Thumb, FullCurl, 0.6)
                .curl(Thumb, HalfCurl, 0.6)
                .curl(Index, NoCurl, 1.0)
                .curl(Middle, NoCurl, 1.0)
                .curl(Ring, FullCurl, 1.0)
                .curl(Pinky, FullCurl, 1.0)
                .direction(Index, VerticalUp, 0.8)
                .direction(Middle, VerticalUp, 0.8),
            open(GestureDescription::new("FIVE"))
                .curl(Thumb, NoCurl, 1.0)
                .direction(Index, DiagonalUpLeft, 0.5)
                .direction(Index, VerticalUp, 0.5)
                .direction(Pinky, DiagonalUpRight, 0.5),
            open(GestureDescription::new("FOUR"))
                .curl(Thumb, HalfCurl, 1.0)
                .curl(Thumb, FullCurl, 0.6)
                .direction(Index, VerticalUp, 0.8),
            open(GestureDescription::new("B"))
                .curl(Thumb, HalfCurl, 1.0)
                .direction(Index, VerticalUp, 1.0)
                .direction(Middle, VerticalUp, 1.0),
            arc(GestureDescription::new("O"))
                .curl(Thumb, HalfCurl, 1.0)
                .curl(Index, FullCurl, 0.6),
            arc(GestureDescription::new("C")).curl(Thumb, NoCurl, 0.6).curl(Thumb, HalfCurl, 1.0),
            arc(GestureDescription::new("EAT"))
                .curl(Thumb, HalfCurl, 1.0)
                .direction(Index, HorizontalLeft, 0.5)
                .direction(Index, HorizontalRight, 0.5),
            arc(GestureDescription::new("HOT"))
                .curl(Thumb, HalfCurl, 1.0)
                .direction(Index, DiagonalDownLeft, 0.5)
                .direction(Index, DiagonalDownRight, 0.5),
            GestureDescription::new("DRINK")
                .curl(Thumb, NoCurl, 1.0)
                .curl(Index, HalfCurl, 1.0)
                .curl(Middle, HalfCurl, 1.0)
                .curl(Ring, HalfCurl, 1.0)
                .curl(Pinky, HalfCurl, 1.0)
                .direction(Thumb, DiagonalUpLeft, 0.5)
                .direction(Thumb, DiagonalUpRight, 0.5),
            GestureDescription::new("P")
                .curl(Thumb, NoCurl, 1.0)
                .curl(Index, NoCurl, 1.0)
                .curl(Middle, NoCurl, 0.7)
                .curl(Middle, HalfCurl, 0.7)
                .curl(Ring, FullCurl, 1.0)
                .curl(Pinky, FullCurl, 1.0)
                .direction(Index, VerticalDown, 0.8)
                .direction(Index, DiagonalDownLeft, 0.5)
                .direction(Index, DiagonalDownRight, 0.5),
            GestureDescription::new("K")
                .curl(Thumb, NoCurl, 1.0)
                .curl(Index, NoCurl, 1.0)
                .curl(Middle, NoCurl, 1.0)
                .curl(Ring, FullCurl, 1.0)
                .curl(Pinky, FullCurl, 1.0)
                .direction(Index, VerticalUp, 0.8)
                .direction(Middle, DiagonalUpLeft, 0.5)
                .direction(Middle, DiagonalUpRight, 0.5),
            GestureDescription::new("H")
                .curl(Thumb, HalfCurl, 1.0)
                .curl(Index, NoCurl, 1.0)
                .curl(Middle, NoCurl, 1.0)
                .curl(Ring, FullCurl, 1.0)
                .curl(Pinky, FullCurl, 1.0)
                .direction(Index, HorizontalLeft, 0.7)
                .direction(Index, HorizontalRight, 0.7)
                .direction(Middle, HorizontalLeft, 0.7)
                .direction(Middle, HorizontalRight, 0.7),
        ];

        Self::new(gestures)
    }
}
