//! Mapping finger states to symbolic gestures.

use airctrl_models::{Gesture, Landmark};
use serde::Serialize;

use crate::error::GestureResult;
use crate::fingers::FingerStates;

/// A recognized gesture with the finger states it was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GestureSignal {
    pub gesture: Gesture,
    pub fingers: FingerStates,
    pub finger_count: u8,
}

impl GestureSignal {
    pub fn from_fingers(fingers: FingerStates) -> Self {
        Self {
            gesture: identify_gesture(&fingers),
            fingers,
            finger_count: fingers.count(),
        }
    }
}

/// Classify a hand configuration.
///
/// - no fingers: FIST
/// - all five: OPEN_PALM
/// - index only: POINT
/// - index and middle only: TWO_FINGERS
/// - anything else: UNKNOWN
pub fn identify_gesture(fingers: &FingerStates) -> Gesture {
    match (fingers.count(), fingers) {
        (0, _) => Gesture::Fist,
        (5, _) => Gesture::OpenPalm,
        (1, FingerStates { index: true, .. }) => Gesture::Point,
        (
            2,
            FingerStates {
                index: true,
                middle: true,
                ..
            },
        ) => Gesture::TwoFingers,
        _ => Gesture::Unknown,
    }
}

/// Detect finger states and identify the gesture in one step.
pub fn recognize(points: &[Landmark]) -> GestureResult<GestureSignal> {
    FingerStates::from_hand_landmarks(points).map(GestureSignal::from_fingers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fingers::tests::{curled_hand, raise};
    use crate::fingers::{INDEX_TIP, MIDDLE_TIP, PINKY_TIP, RING_TIP, THUMB_TIP};

    fn hand(raised: &[usize]) -> Vec<Landmark> {
        let mut points = curled_hand();
        for &tip in raised {
            raise(&mut points, tip);
        }
        points
    }

    #[test]
    fn test_vocabulary() {
        let cases: [(&[usize], Gesture); 7] = [
            (&[], Gesture::Fist),
            (&[THUMB_TIP, INDEX_TIP, MIDDLE_TIP, RING_TIP, PINKY_TIP], Gesture::OpenPalm),
            (&[INDEX_TIP], Gesture::Point),
            (&[INDEX_TIP, MIDDLE_TIP], Gesture::TwoFingers),
            (&[THUMB_TIP], Gesture::Unknown),
            (&[MIDDLE_TIP, RING_TIP], Gesture::Unknown),
            (&[THUMB_TIP, INDEX_TIP, MIDDLE_TIP], Gesture::Unknown),
        ];

        for (raised, expected) in cases {
            let signal = recognize(&hand(raised)).unwrap();
            assert_eq!(signal.gesture, expected, "raised {raised:?}");
            assert_eq!(signal.finger_count as usize, raised.len());
        }
    }

    #[test]
    fn test_recognize_rejects_bad_topology() {
        assert!(recognize(&[]).is_err());
    }
}
