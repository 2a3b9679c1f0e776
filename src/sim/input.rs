//! Control input derivation
//!
//! Device tilt replaces the ball velocity outright; it is not a force. Shake
//! detection compares consecutive acceleration samples per axis.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::consts::SHAKE_THRESHOLD;

/// Per-tick control source
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum ControlInput {
    /// Leave the ball velocity alone
    #[default]
    None,
    /// Device orientation in degrees: `gamma` tilts along x, `beta` along y
    Tilt { gamma: f32, beta: f32 },
    /// Direct velocity override (simulated input)
    Velocity(Vec2),
}

impl ControlInput {
    /// Tilt input from device orientation angles
    pub fn tilt(gamma: f32, beta: f32) -> Self {
        ControlInput::Tilt { gamma, beta }
    }

    /// Velocity this input imposes, if any
    pub fn velocity(&self, sensitivity: f32) -> Option<Vec2> {
        match *self {
            ControlInput::None => None,
            ControlInput::Tilt { gamma, beta } => Some(tilt_to_velocity(gamma, beta, sensitivity)),
            ControlInput::Velocity(v) => Some(v),
        }
    }
}

/// Map tilt angles linearly to a velocity
#[inline]
pub fn tilt_to_velocity(gamma: f32, beta: f32, sensitivity: f32) -> Vec2 {
    Vec2::new(gamma, beta) * sensitivity
}

/// Detects shakes from a stream of acceleration-including-gravity samples
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShakeDetector {
    pub threshold: f32,
    last: Vec3,
}

impl Default for ShakeDetector {
    fn default() -> Self {
        Self::new(SHAKE_THRESHOLD)
    }
}

impl ShakeDetector {
    /// The first sample is compared against zero, like a fresh listener
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            last: Vec3::ZERO,
        }
    }

    /// Feed one sample; true if any axis jumped more than the threshold
    pub fn observe(&mut self, accel: Vec3) -> bool {
        let delta = (accel - self.last).abs();
        self.last = accel;
        delta.max_element() > self.threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::TILT_SENSITIVITY;

    #[test]
    fn test_tilt_maps_linearly() {
        let v = ControlInput::tilt(20.0, -45.0).velocity(TILT_SENSITIVITY).unwrap();
        assert!((v - Vec2::new(2.0, -4.5)).length() < 1e-5);
        assert_eq!(tilt_to_velocity(0.0, 0.0, TILT_SENSITIVITY), Vec2::ZERO);
    }

    #[test]
    fn test_none_has_no_velocity() {
        assert_eq!(ControlInput::None.velocity(TILT_SENSITIVITY), None);
        let v = Vec2::new(1.0, 2.0);
        assert_eq!(ControlInput::Velocity(v).velocity(TILT_SENSITIVITY), Some(v));
    }

    #[test]
    fn test_shake_detection() {
        let mut shake = ShakeDetector::default();
        // Gravity at rest: 9.8 on z is below the threshold
        assert!(!shake.observe(Vec3::new(0.0, 0.0, 9.8)));
        assert!(!shake.observe(Vec3::new(1.0, -2.0, 9.5)));
        assert!(shake.observe(Vec3::new(18.0, -2.0, 9.5)));
        // Same reading again is no jump
        assert!(!shake.observe(Vec3::new(18.0, -2.0, 9.5)));
    }
}
