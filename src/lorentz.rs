//! Lorentz transformations in 1+1 dimensions and spacetime-interval classification.
//!
//! Time is carried as `ct` so both coordinates share length units. A frame is
//! described by its velocity β relative to the reference frame; γ is always
//! derived from β and never stored.

use std::fmt;
use std::ops::Sub;

use tracing::warn;

use crate::constants::MAX_BETA;
use crate::errors::{validate_beta, EmRelativityError};
use crate::math::Scalar;

/// Intervals with |Δs²| at or below this are classified as lightlike.
pub const LIGHTLIKE_TOLERANCE: Scalar = 1.0e-9;

/// Clamps `beta` into `[-max_beta, max_beta]`, never past [`MAX_BETA`]. NaN is treated as rest.
#[inline]
#[must_use]
pub fn clamp_beta(beta: Scalar, max_beta: Scalar) -> Scalar {
    if beta.is_nan() {
        return 0.0;
    }
    let limit = max_beta.abs().min(MAX_BETA);
    beta.clamp(-limit, limit)
}

/// Lorentz factor γ = 1/√(1−β²), with |β| clamped to [`MAX_BETA`].
#[inline]
#[must_use]
pub fn gamma(beta: Scalar) -> Scalar {
    let b = clamp_beta(beta, MAX_BETA);
    1.0 / (1.0 - b * b).sqrt()
}

/// Rapidity φ = artanh β; rapidities add under collinear boosts.
#[inline]
#[must_use]
pub fn rapidity(beta: Scalar) -> Scalar {
    clamp_beta(beta, MAX_BETA).atanh()
}

/// Relativistic composition of two collinear speeds: (u + v) / (1 + uv).
#[must_use]
pub fn velocity_addition(u: Scalar, v: Scalar) -> Scalar {
    let u = clamp_beta(u, MAX_BETA);
    let v = clamp_beta(v, MAX_BETA);
    (u + v) / (1.0 + u * v)
}

/// Time measured in a frame where a clock moves with speed `beta`.
#[must_use]
pub fn time_dilation(proper_time: Scalar, beta: Scalar) -> Scalar {
    gamma(beta) * proper_time
}

/// Length of a rod moving with speed `beta` along its length.
#[must_use]
pub fn length_contraction(proper_length: Scalar, beta: Scalar) -> Scalar {
    proper_length / gamma(beta)
}

/// A point in 1+1 spacetime.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SpacetimeEvent {
    /// Position.
    pub x: Scalar,
    /// Time multiplied by c.
    pub ct: Scalar,
}

impl SpacetimeEvent {
    /// Creates an event from position and `ct`.
    #[must_use]
    pub const fn new(x: Scalar, ct: Scalar) -> Self {
        Self { x, ct }
    }

    /// Creates an event from position and coordinate time `t`.
    #[must_use]
    pub fn from_time(x: Scalar, t: Scalar, speed_of_light: Scalar) -> Self {
        Self { x, ct: t * speed_of_light }
    }

    /// Coordinate time t = ct / c.
    #[must_use]
    pub fn time(&self, speed_of_light: Scalar) -> Scalar {
        self.ct / speed_of_light
    }
}

impl Sub for SpacetimeEvent {
    type Output = SpacetimeEvent;

    fn sub(self, rhs: SpacetimeEvent) -> SpacetimeEvent {
        SpacetimeEvent { x: self.x - rhs.x, ct: self.ct - rhs.ct }
    }
}

/// Causal character of the separation between two events.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntervalKind {
    /// Δs² < 0: one event can influence the other.
    Timelike,
    /// Δs² > 0: no signal can connect the events.
    Spacelike,
    /// Δs² = 0: connected by a light ray.
    Lightlike,
}

impl fmt::Display for IntervalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Timelike => "timelike",
            Self::Spacelike => "spacelike",
            Self::Lightlike => "lightlike",
        };
        f.write_str(name)
    }
}

/// Invariant interval Δs² = Δx² − Δ(ct)² between two events.
#[must_use]
pub fn spacetime_interval(a: SpacetimeEvent, b: SpacetimeEvent) -> Scalar {
    let d = b - a;
    d.x * d.x - d.ct * d.ct
}

/// Classifies an interval by its sign, treating |Δs²| ≤ [`LIGHTLIKE_TOLERANCE`] as lightlike.
#[must_use]
pub fn classify_interval(interval: Scalar) -> IntervalKind {
    if interval.abs() <= LIGHTLIKE_TOLERANCE {
        IntervalKind::Lightlike
    } else if interval > 0.0 {
        IntervalKind::Spacelike
    } else {
        IntervalKind::Timelike
    }
}

/// Proper time elapsed between two timelike-separated events, in length units (cτ).
#[must_use]
pub fn proper_time(a: SpacetimeEvent, b: SpacetimeEvent) -> Option<Scalar> {
    let s2 = spacetime_interval(a, b);
    (classify_interval(s2) == IntervalKind::Timelike).then(|| (-s2).sqrt())
}

/// Proper distance between two spacelike-separated events.
#[must_use]
pub fn proper_length(a: SpacetimeEvent, b: SpacetimeEvent) -> Option<Scalar> {
    let s2 = spacetime_interval(a, b);
    (classify_interval(s2) == IntervalKind::Spacelike).then(|| s2.sqrt())
}

/// Inertial frame moving with velocity β along +x relative to the reference frame.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LorentzFrame {
    beta: Scalar,
}

impl LorentzFrame {
    /// Creates a frame, clamping |β| to [`MAX_BETA`].
    #[must_use]
    pub fn new(beta: Scalar) -> Self {
        let clamped = clamp_beta(beta, MAX_BETA);
        if clamped != beta {
            warn!(beta, clamped, "frame speed clamped below c");
        }
        Self { beta: clamped }
    }

    /// Creates a frame, rejecting |β| ≥ 1 instead of clamping.
    pub fn try_new(beta: Scalar) -> Result<Self, EmRelativityError> {
        validate_beta(beta).map(Self::new)
    }

    /// The frame at rest relative to the reference frame.
    #[must_use]
    pub const fn rest() -> Self {
        Self { beta: 0.0 }
    }

    /// Velocity as a fraction of c.
    #[must_use]
    pub fn beta(&self) -> Scalar {
        self.beta
    }

    /// Lorentz factor derived from β.
    #[must_use]
    pub fn gamma(&self) -> Scalar {
        gamma(self.beta)
    }

    /// The reference frame as seen from this one.
    #[must_use]
    pub fn inverse(&self) -> Self {
        Self { beta: -self.beta }
    }

    /// Coordinates of `event` in this frame: x' = γ(x − β·ct), ct' = γ(ct − β·x).
    #[must_use]
    pub fn transform(&self, event: SpacetimeEvent) -> SpacetimeEvent {
        let g = self.gamma();
        let b = self.beta;
        SpacetimeEvent {
            x: g * (event.x - b * event.ct),
            ct: g * (event.ct - b * event.x),
        }
    }

    /// Coordinates of an event given in this frame, expressed in the reference frame.
    #[must_use]
    pub fn inverse_transform(&self, event: SpacetimeEvent) -> SpacetimeEvent {
        self.inverse().transform(event)
    }

    /// Frame obtained by boosting this one by a further `beta` (as measured in this frame).
    ///
    /// The composed speed is clamped to [`MAX_BETA`] like any other frame, so
    /// rapidities only add while the result stays below that limit.
    #[must_use]
    pub fn compose(&self, beta: Scalar) -> Self {
        Self::new(velocity_addition(self.beta, beta))
    }
}

/// Transforms `event` into the frame moving with velocity `beta`.
#[must_use]
pub fn lorentz_transform(event: SpacetimeEvent, beta: Scalar) -> SpacetimeEvent {
    LorentzFrame::new(beta).transform(event)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn gamma_is_one_at_rest() {
        assert_eq!(gamma(0.0), 1.0);
        assert_eq!(LorentzFrame::rest().gamma(), 1.0);
    }

    #[test]
    fn gamma_strictly_increases() {
        let mut prev = gamma(0.0);
        for i in 1..999 {
            let g = gamma(i as Scalar * 1.0e-3);
            assert!(g > prev, "gamma not increasing at beta = {}", i as Scalar * 1.0e-3);
            prev = g;
        }
        assert_relative_eq!(gamma(0.8), 5.0 / 3.0, max_relative = 1.0e-12);
        assert!(gamma(1.0).is_finite());
    }

    #[test]
    fn forward_then_inverse_round_trips() {
        let event = SpacetimeEvent::new(5.0, 2.0);
        let there = lorentz_transform(event, 0.6);
        let back = lorentz_transform(there, -0.6);
        assert_relative_eq!(back.x, 5.0, epsilon = 1.0e-9);
        assert_relative_eq!(back.ct, 2.0, epsilon = 1.0e-9);

        let frame = LorentzFrame::new(0.6);
        let again = frame.inverse_transform(frame.transform(event));
        assert_relative_eq!(again.x, event.x, epsilon = 1.0e-9);
        assert_relative_eq!(again.ct, event.ct, epsilon = 1.0e-9);
    }

    #[test]
    fn transform_matches_textbook_values() {
        // γ = 1.25 at β = 0.6.
        let e = lorentz_transform(SpacetimeEvent::new(5.0, 2.0), 0.6);
        assert_relative_eq!(e.x, 1.25 * (5.0 - 1.2), epsilon = 1.0e-12);
        assert_relative_eq!(e.ct, 1.25 * (2.0 - 3.0), epsilon = 1.0e-12);
    }

    #[test]
    fn interval_is_invariant_and_classification_stable() {
        let a = SpacetimeEvent::new(0.0, 0.0);
        let b = SpacetimeEvent::new(3.0, 1.0);
        let original = spacetime_interval(a, b);
        assert_relative_eq!(original, 8.0);
        for beta in [0.0, 0.3, 0.6, 0.9] {
            let frame = LorentzFrame::new(beta);
            let moved = spacetime_interval(frame.transform(a), frame.transform(b));
            assert_relative_eq!(moved, original, epsilon = 1.0e-9);
            assert_eq!(classify_interval(moved), IntervalKind::Spacelike);
        }
    }

    #[test]
    fn interval_invariance_holds_for_other_event_pairs() {
        let pairs = [
            (SpacetimeEvent::new(1.0, -2.0), SpacetimeEvent::new(-0.5, 4.0)),
            (SpacetimeEvent::new(2.0, 2.0), SpacetimeEvent::new(5.0, 5.0)),
            (SpacetimeEvent::new(-3.0, 0.5), SpacetimeEvent::new(7.0, 1.5)),
        ];
        for (a, b) in pairs {
            let kind = classify_interval(spacetime_interval(a, b));
            for beta in [-0.95, -0.4, 0.25, 0.75] {
                let frame = LorentzFrame::new(beta);
                let moved = spacetime_interval(frame.transform(a), frame.transform(b));
                assert_relative_eq!(moved, spacetime_interval(a, b), epsilon = 1.0e-9);
                assert_eq!(classify_interval(moved), kind);
            }
        }
    }

    #[test]
    fn classification_by_sign() {
        assert_eq!(classify_interval(8.0), IntervalKind::Spacelike);
        assert_eq!(classify_interval(-1.0), IntervalKind::Timelike);
        assert_eq!(classify_interval(0.0), IntervalKind::Lightlike);
        assert_eq!(classify_interval(1.0e-12), IntervalKind::Lightlike);
        assert_eq!(IntervalKind::Timelike.to_string(), "timelike");
    }

    #[test]
    fn lightlike_tolerance_is_absolute() {
        assert_eq!(classify_interval(LIGHTLIKE_TOLERANCE), IntervalKind::Lightlike);
        assert_eq!(classify_interval(-0.5 * LIGHTLIKE_TOLERANCE), IntervalKind::Lightlike);
        assert_eq!(classify_interval(2.0 * LIGHTLIKE_TOLERANCE), IntervalKind::Spacelike);
        assert_eq!(classify_interval(-2.0 * LIGHTLIKE_TOLERANCE), IntervalKind::Timelike);
        // Light ray over a large separation: Δs² is exactly zero regardless of scale.
        let far = SpacetimeEvent::new(1.0e6, 1.0e6);
        assert_eq!(classify_interval(spacetime_interval(SpacetimeEvent::default(), far)), IntervalKind::Lightlike);
    }

    #[test]
    fn proper_time_and_length() {
        let origin = SpacetimeEvent::default();
        assert_relative_eq!(proper_time(origin, SpacetimeEvent::new(3.0, 5.0)).unwrap(), 4.0);
        assert!(proper_time(origin, SpacetimeEvent::new(3.0, 1.0)).is_none());
        assert_relative_eq!(proper_length(origin, SpacetimeEvent::new(5.0, 3.0)).unwrap(), 4.0);
    }

    #[test]
    fn invalid_frame_speed_is_reported_or_clamped() {
        assert_eq!(LorentzFrame::try_new(1.0), Err(EmRelativityError::InvalidVelocity { beta: 1.0 }));
        assert_relative_eq!(LorentzFrame::new(1.5).beta(), MAX_BETA);
        assert_relative_eq!(LorentzFrame::new(-1.5).beta(), -MAX_BETA);
        assert_eq!(LorentzFrame::new(Scalar::NAN).beta(), 0.0);
    }

    #[test]
    fn speeds_compose_below_c() {
        assert_relative_eq!(velocity_addition(0.5, 0.5), 0.8, epsilon = 1.0e-12);
        assert!(velocity_addition(0.99, 0.99) < 1.0);
        assert_relative_eq!(
            rapidity(velocity_addition(0.3, 0.4)),
            rapidity(0.3) + rapidity(0.4),
            epsilon = 1.0e-12
        );
        let composed = LorentzFrame::new(0.3).compose(0.4);
        let e = SpacetimeEvent::new(1.0, 2.0);
        let two_step = lorentz_transform(LorentzFrame::new(0.3).transform(e), 0.4);
        assert_relative_eq!(composed.transform(e).x, two_step.x, epsilon = 1.0e-12);
    }

    #[test]
    fn composed_frame_is_clamped_near_c() {
        // 0.99 ⊕ 0.99 = 0.99995, past the limit.
        assert_relative_eq!(velocity_addition(0.99, 0.99), 1.98 / 1.9801, epsilon = 1.0e-12);
        let composed = LorentzFrame::new(0.99).compose(0.99);
        assert_eq!(composed.beta(), MAX_BETA);
        assert!(rapidity(composed.beta()) < 2.0 * rapidity(0.99));
        let back = LorentzFrame::new(0.9).compose(-0.9);
        assert_relative_eq!(back.beta(), 0.0, epsilon = 1.0e-12);
    }

    #[test]
    fn dilation_and_contraction() {
        assert_relative_eq!(time_dilation(1.0, 0.6), 1.25, epsilon = 1.0e-12);
        assert_relative_eq!(length_contraction(1.0, 0.6), 0.8, epsilon = 1.0e-12);
        let e = SpacetimeEvent::from_time(2.0, 3.0, 10.0);
        assert_relative_eq!(e.ct, 30.0);
        assert_relative_eq!(e.time(10.0), 3.0);
    }
}
