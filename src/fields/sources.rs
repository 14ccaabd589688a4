use tracing::warn;

use crate::constants::MAX_BETA;
use crate::errors::{validate_beta, EmRelativityError};
use crate::lorentz::clamp_beta;
use crate::math::{R2, Scalar};

/// Direction of motion for a moving charge.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Axis {
    /// Motion along the x axis.
    #[default]
    X,
    /// Motion along the y axis.
    Y,
}

impl Axis {
    /// Unit vector along the axis.
    #[must_use]
    pub fn unit(self) -> R2 {
        match self {
            Self::X => R2::x(),
            Self::Y => R2::y(),
        }
    }
}

/// Point charge in units of the elementary charge, optionally moving along an axis.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointCharge {
    /// Position in simulation length units.
    pub position: R2,
    /// Signed charge in multiples of e.
    pub charge: Scalar,
    beta: Scalar,
    axis: Axis,
}

impl PointCharge {
    /// Creates a charge at rest.
    #[must_use]
    pub fn stationary(position: R2, charge: Scalar) -> Self {
        Self { position, charge, beta: 0.0, axis: Axis::X }
    }

    /// Creates a charge moving with speed `beta` (fraction of c) along `axis`.
    ///
    /// Speeds at or beyond [`MAX_BETA`] are clamped.
    #[must_use]
    pub fn moving(position: R2, charge: Scalar, beta: Scalar, axis: Axis) -> Self {
        let clamped = clamp_beta(beta, MAX_BETA);
        if clamped != beta {
            warn!(beta, clamped, "charge speed clamped below c");
        }
        Self { position, charge, beta: clamped, axis }
    }

    /// Like [`PointCharge::moving`] but rejects |β| ≥ 1 instead of clamping.
    pub fn try_moving(position: R2, charge: Scalar, beta: Scalar, axis: Axis) -> Result<Self, EmRelativityError> {
        let beta = validate_beta(beta)?;
        Ok(Self::moving(position, charge, beta, axis))
    }

    /// Speed as a fraction of c (signed along [`PointCharge::axis`]).
    #[must_use]
    pub fn beta(&self) -> Scalar {
        self.beta
    }

    /// Axis of motion.
    #[must_use]
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Returns a copy with a different speed, clamped like [`PointCharge::moving`].
    #[must_use]
    pub fn with_beta(self, beta: Scalar) -> Self {
        Self::moving(self.position, self.charge, beta, self.axis)
    }
}

/// Sense of the current in a straight wire perpendicular to the plane.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WireOrientation {
    /// Current flows toward the viewer; B circulates counter-clockwise.
    #[default]
    OutOfPage,
    /// Current flows away from the viewer; B circulates clockwise.
    IntoPage,
}

impl WireOrientation {
    /// +1 for counter-clockwise circulation, -1 for clockwise.
    #[must_use]
    pub fn sign(self) -> Scalar {
        match self {
            Self::OutOfPage => 1.0,
            Self::IntoPage => -1.0,
        }
    }
}

/// Infinite straight wire crossing the plane at `position`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WireCurrent {
    /// Crossing point in the plane.
    pub position: R2,
    /// Current magnitude (amperes in SI, dimensionless in simulation units).
    pub current: Scalar,
    /// Direction of the current relative to the plane.
    pub orientation: WireOrientation,
}

/// Set of sources describing one scenario.
///
/// Order only matters for rendering; field superposition is order independent.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChargeConfiguration {
    charges: Vec<PointCharge>,
    wires: Vec<WireCurrent>,
}

impl ChargeConfiguration {
    /// Creates an empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a configuration from a list of charges.
    #[must_use]
    pub fn from_charges(charges: impl IntoIterator<Item = PointCharge>) -> Self {
        Self { charges: charges.into_iter().collect(), wires: Vec::new() }
    }

    /// Adds a point charge.
    #[must_use]
    pub fn with_charge(mut self, charge: PointCharge) -> Self {
        self.charges.push(charge);
        self
    }

    /// Adds a wire current.
    #[must_use]
    pub fn with_wire(mut self, wire: WireCurrent) -> Self {
        self.wires.push(wire);
        self
    }

    /// Point charges in insertion order.
    #[must_use]
    pub fn charges(&self) -> &[PointCharge] {
        &self.charges
    }

    /// Wire currents in insertion order.
    #[must_use]
    pub fn wires(&self) -> &[WireCurrent] {
        &self.wires
    }

    /// True when there is nothing to produce a field.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.charges.is_empty() && self.wires.is_empty()
    }

    /// Positive charges, where field lines start.
    pub fn sources(&self) -> impl Iterator<Item = &PointCharge> {
        self.charges.iter().filter(|c| c.charge > 0.0)
    }

    /// Negative charges, where field lines end.
    pub fn sinks(&self) -> impl Iterator<Item = &PointCharge> {
        self.charges.iter().filter(|c| c.charge < 0.0)
    }

    /// Net charge in units of e.
    #[must_use]
    pub fn total_charge(&self) -> Scalar {
        self.charges.iter().map(|c| c.charge).sum()
    }

    /// Smallest distance between any two point charges, if there are at least two.
    #[must_use]
    pub fn min_separation(&self) -> Option<Scalar> {
        let mut best: Option<Scalar> = None;
        for (i, a) in self.charges.iter().enumerate() {
            for b in &self.charges[i + 1..] {
                let d = (a.position - b.position).norm();
                best = Some(best.map_or(d, |m| m.min(d)));
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn luminal_speed_is_clamped() {
        let q = PointCharge::moving(R2::zeros(), 1.0, 1.0, Axis::X);
        assert_relative_eq!(q.beta(), MAX_BETA);
        let q = q.with_beta(-3.0);
        assert_relative_eq!(q.beta(), -MAX_BETA);
        assert_eq!(PointCharge::moving(R2::zeros(), 1.0, Scalar::NAN, Axis::Y).beta(), 0.0);
    }

    #[test]
    fn try_moving_reports_invalid_speed() {
        let err = PointCharge::try_moving(R2::zeros(), 1.0, 1.2, Axis::X).unwrap_err();
        assert_eq!(err, EmRelativityError::InvalidVelocity { beta: 1.2 });
        assert!(PointCharge::try_moving(R2::zeros(), 1.0, 0.5, Axis::X).is_ok());
    }

    #[test]
    fn sources_sinks_and_separation() {
        let config = ChargeConfiguration::new()
            .with_charge(PointCharge::stationary(R2::new(-1.0, 0.0), 1.0))
            .with_charge(PointCharge::stationary(R2::new(1.0, 0.0), -2.0))
            .with_charge(PointCharge::stationary(R2::new(1.0, 0.5), 1.0));
        assert_eq!(config.sources().count(), 2);
        assert_eq!(config.sinks().count(), 1);
        assert_relative_eq!(config.total_charge(), 0.0);
        assert_relative_eq!(config.min_separation().unwrap(), 0.5);
        assert!(ChargeConfiguration::new().min_separation().is_none());
        assert!(ChargeConfiguration::new().is_empty());
    }
}
