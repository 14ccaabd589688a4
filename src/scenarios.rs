//! Named charge arrangements offered to the presentation layer.

use std::fmt;
use std::str::FromStr;

use crate::constants::MAX_BETA;
use crate::errors::EmRelativityError;
use crate::fields::{Axis, ChargeConfiguration, PointCharge, WireCurrent, WireOrientation};
use crate::math::{R2, Scalar};

/// Smallest and largest charge offered by the controls, in units of e.
pub const CHARGE_RANGE: (Scalar, Scalar) = (-2.0, 2.0);
/// Granularity of the charge control.
pub const CHARGE_STEP: Scalar = 0.1;
/// Largest speed offered by the velocity control.
pub const BETA_CONTROL_MAX: Scalar = 0.99;

/// Identifier of a preset.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScenarioId {
    /// One charge at rest.
    #[default]
    SingleCharge,
    /// One charge moving along x.
    MovingCharge,
    /// Opposite charges side by side.
    Dipole,
    /// Four alternating charges on a square.
    Quadrupole,
    /// Two equal charges side by side.
    LikeCharges,
    /// A straight current-carrying wire through the plane.
    CurrentWire,
}

impl ScenarioId {
    /// Every preset, in menu order.
    pub const ALL: [ScenarioId; 6] = [
        Self::SingleCharge,
        Self::MovingCharge,
        Self::Dipole,
        Self::Quadrupole,
        Self::LikeCharges,
        Self::CurrentWire,
    ];

    /// Stable identifier used by the presentation layer.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SingleCharge => "single",
            Self::MovingCharge => "moving",
            Self::Dipole => "dipole",
            Self::Quadrupole => "quadrupole",
            Self::LikeCharges => "like-charges",
            Self::CurrentWire => "current-wire",
        }
    }
}

impl fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScenarioId {
    type Err = EmRelativityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == key)
            .ok_or_else(|| EmRelativityError::UnknownScenario(s.to_string()))
    }
}

/// Descriptive text for a preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scenario {
    /// Identifier.
    pub id: ScenarioId,
    /// Short menu title.
    pub title: &'static str,
    /// One-paragraph explanation shown next to the plot.
    pub description: &'static str,
}

const SCENARIOS: [Scenario; 6] = [
    Scenario {
        id: ScenarioId::SingleCharge,
        title: "Single charge",
        description: "A point charge at rest. Its field points radially and falls off as 1/r²; there is no magnetic field.",
    },
    Scenario {
        id: ScenarioId::MovingCharge,
        title: "Moving charge",
        description: "A point charge in uniform motion. The field is squeezed toward the plane perpendicular to the motion, \
                      enhanced there by γ, and a magnetic field circulates around the line of motion.",
    },
    Scenario {
        id: ScenarioId::Dipole,
        title: "Electric dipole",
        description: "Equal and opposite charges. Field lines leave the positive charge and end on the negative one.",
    },
    Scenario {
        id: ScenarioId::Quadrupole,
        title: "Quadrupole",
        description: "Four alternating charges on the corners of a square; the field cancels at the centre.",
    },
    Scenario {
        id: ScenarioId::LikeCharges,
        title: "Like charges",
        description: "Two equal charges repel; their field lines bend away from each other and run off to infinity.",
    },
    Scenario {
        id: ScenarioId::CurrentWire,
        title: "Current-carrying wire",
        description: "A long straight wire seen end-on. The magnetic field forms circles around it with strength μ₀I/(2πr).",
    },
];

/// User-controlled parameters that shape a preset.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScenarioParams {
    /// Charge magnitude (and sign) in units of e.
    pub charge: Scalar,
    /// Speed of moving charges as a fraction of c.
    pub beta: Scalar,
    /// Displacement of the whole arrangement.
    pub offset: R2,
    /// Distance between neighbouring charges.
    pub separation: Scalar,
    /// Wire current.
    pub current: Scalar,
}

impl Default for ScenarioParams {
    fn default() -> Self {
        Self { charge: 1.0, beta: 0.0, offset: R2::zeros(), separation: 2.0, current: 1.0 }
    }
}

impl ScenarioParams {
    /// Sets the charge, clamped to [`CHARGE_RANGE`] and rounded to [`CHARGE_STEP`].
    #[must_use]
    pub fn with_charge(mut self, charge: Scalar) -> Self {
        let charge = if charge.is_finite() { charge } else { 0.0 };
        let stepped = (charge / CHARGE_STEP).round() * CHARGE_STEP;
        self.charge = stepped.clamp(CHARGE_RANGE.0, CHARGE_RANGE.1);
        self
    }

    /// Sets the speed, clamped to `[0, BETA_CONTROL_MAX]`.
    #[must_use]
    pub fn with_beta(mut self, beta: Scalar) -> Self {
        self.beta = if beta.is_finite() { beta.clamp(0.0, BETA_CONTROL_MAX.min(MAX_BETA)) } else { 0.0 };
        self
    }

    /// Sets the arrangement offset.
    #[must_use]
    pub fn with_offset(mut self, offset: R2) -> Self {
        self.offset = offset;
        self
    }

    /// Sets the spacing between charges (kept positive).
    #[must_use]
    pub fn with_separation(mut self, separation: Scalar) -> Self {
        self.separation = separation.abs().max(Scalar::EPSILON);
        self
    }

    /// Sets the wire current.
    #[must_use]
    pub fn with_current(mut self, current: Scalar) -> Self {
        self.current = current;
        self
    }
}

/// Lookup of preset descriptions and their charge configurations.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScenarioCatalog;

impl ScenarioCatalog {
    /// All presets in menu order.
    #[must_use]
    pub fn all() -> &'static [Scenario] {
        &SCENARIOS
    }

    /// Description of `id`.
    #[must_use]
    pub fn get(id: ScenarioId) -> &'static Scenario {
        SCENARIOS
            .iter()
            .find(|s| s.id == id)
            .unwrap_or(&SCENARIOS[0])
    }

    /// Resolves a string identifier.
    pub fn lookup(name: &str) -> Result<&'static Scenario, EmRelativityError> {
        name.parse().map(Self::get)
    }

    /// Builds the charge configuration for `id` with the given parameters.
    ///
    /// Every charge in a preset shares `params.beta` along x, except the static
    /// single-charge preset which always stays at rest.
    #[must_use]
    pub fn configuration(id: ScenarioId, params: &ScenarioParams) -> ChargeConfiguration {
        let q = params.charge;
        let half = 0.5 * params.separation;
        let o = params.offset;
        let charge = |x: Scalar, y: Scalar, q: Scalar| PointCharge::moving(o + R2::new(x, y), q, params.beta, Axis::X);
        match id {
            ScenarioId::SingleCharge => ChargeConfiguration::from_charges([PointCharge::stationary(o, q)]),
            ScenarioId::MovingCharge => ChargeConfiguration::from_charges([charge(0.0, 0.0, q)]),
            ScenarioId::Dipole => ChargeConfiguration::from_charges([charge(-half, 0.0, q), charge(half, 0.0, -q)]),
            ScenarioId::Quadrupole => ChargeConfiguration::from_charges([
                charge(-half, -half, q),
                charge(half, -half, -q),
                charge(half, half, q),
                charge(-half, half, -q),
            ]),
            ScenarioId::LikeCharges => ChargeConfiguration::from_charges([charge(-half, 0.0, q), charge(half, 0.0, q)]),
            ScenarioId::CurrentWire => ChargeConfiguration::new().with_wire(WireCurrent {
                position: o,
                current: params.current.abs(),
                orientation: if params.current < 0.0 { WireOrientation::IntoPage } else { WireOrientation::OutOfPage },
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn identifiers_round_trip_through_strings() {
        for id in ScenarioId::ALL {
            assert_eq!(id.as_str().parse::<ScenarioId>().unwrap(), id);
            assert_eq!(ScenarioCatalog::get(id).id, id);
        }
        assert_eq!(" Like_Charges ".parse::<ScenarioId>().unwrap(), ScenarioId::LikeCharges);
        assert_eq!(
            "tokamak".parse::<ScenarioId>(),
            Err(EmRelativityError::UnknownScenario("tokamak".into()))
        );
        assert_eq!(ScenarioCatalog::lookup("dipole").unwrap().title, "Electric dipole");
    }

    #[test]
    fn dipole_preset_is_neutral_and_centered_on_offset() {
        let params = ScenarioParams::default().with_charge(1.5).with_offset(R2::new(1.0, -1.0));
        let config = ScenarioCatalog::configuration(ScenarioId::Dipole, &params);
        assert_eq!(config.charges().len(), 2);
        assert_relative_eq!(config.total_charge(), 0.0);
        let mid = (config.charges()[0].position + config.charges()[1].position) * 0.5;
        assert_relative_eq!(mid, R2::new(1.0, -1.0), epsilon = 1.0e-12);
        assert_relative_eq!(config.min_separation().unwrap(), 2.0, epsilon = 1.0e-12);
    }

    #[test]
    fn quadrupole_alternates_signs() {
        let config = ScenarioCatalog::configuration(ScenarioId::Quadrupole, &ScenarioParams::default());
        let signs: Vec<Scalar> = config.charges().iter().map(|c| c.charge.signum()).collect();
        assert_eq!(signs, vec![1.0, -1.0, 1.0, -1.0]);
        assert_relative_eq!(config.total_charge(), 0.0);
    }

    #[test]
    fn speed_applies_to_moving_presets_only() {
        let params = ScenarioParams::default().with_beta(0.8);
        let single = ScenarioCatalog::configuration(ScenarioId::SingleCharge, &params);
        assert_eq!(single.charges()[0].beta(), 0.0);
        let moving = ScenarioCatalog::configuration(ScenarioId::MovingCharge, &params);
        assert_relative_eq!(moving.charges()[0].beta(), 0.8);
        let like = ScenarioCatalog::configuration(ScenarioId::LikeCharges, &params);
        assert!(like.charges().iter().all(|c| c.beta() == 0.8));
    }

    #[test]
    fn wire_preset_carries_current_only() {
        let params = ScenarioParams::default().with_current(-2.0);
        let config = ScenarioCatalog::configuration(ScenarioId::CurrentWire, &params);
        assert!(config.charges().is_empty());
        assert_eq!(config.wires().len(), 1);
        assert_eq!(config.wires()[0].orientation, WireOrientation::IntoPage);
        assert_relative_eq!(config.wires()[0].current, 2.0);
    }

    #[test]
    fn controls_are_clamped_and_quantized() {
        let p = ScenarioParams::default().with_charge(1.234).with_beta(1.5);
        assert_relative_eq!(p.charge, 1.2, epsilon = 1.0e-12);
        assert_relative_eq!(p.beta, BETA_CONTROL_MAX);
        assert_relative_eq!(ScenarioParams::default().with_charge(-7.0).charge, -2.0);
        assert_eq!(ScenarioParams::default().with_beta(Scalar::NAN).beta, 0.0);
        assert!(ScenarioParams::default().with_separation(0.0).separation > 0.0);
    }
}
