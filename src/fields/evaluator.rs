use crate::constants::{FieldUnits, MAX_BETA};
use crate::lorentz::clamp_beta;
use crate::math::{R2, R3, Scalar};

use super::electric::electric_field_from_point_charges;
use super::electrostatic::potential_from_point_charges;
use super::magnetic::magnetic_field_from_sources;
use super::sources::ChargeConfiguration;

/// Numerical limits and unit system used during field evaluation.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvaluatorConfig {
    /// Constants turning charges into fields.
    pub units: FieldUnits,
    /// Floor applied to every source distance used as a divisor.
    pub min_radius: Scalar,
    /// Largest |β| used when computing γ.
    pub max_beta: Scalar,
    /// Speeds below this are treated as rest (no magnetic field).
    pub stationary_threshold: Scalar,
}

impl EvaluatorConfig {
    /// Configuration in SI units with a 1 mm singularity floor.
    #[must_use]
    pub fn si() -> Self {
        Self { units: FieldUnits::si(), min_radius: 1.0e-3, ..Self::default() }
    }

    /// β after clamping to `max_beta` and snapping slow speeds to zero.
    #[inline]
    #[must_use]
    pub fn effective_beta(&self, beta: Scalar) -> Scalar {
        let b = clamp_beta(beta, self.max_beta);
        if b.abs() < self.stationary_threshold { 0.0 } else { b }
    }
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            units: FieldUnits::simulation(),
            min_radius: 0.1,
            max_beta: MAX_BETA,
            stationary_threshold: 0.01,
        }
    }
}

/// Fields and potential at one point.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSample {
    /// Sampled point.
    pub position: R2,
    /// In-plane electric field.
    pub electric: R2,
    /// Magnetic field; x/y from wires, z from moving charges.
    pub magnetic: R3,
    /// Scalar potential (point charges only).
    pub potential: Scalar,
}

/// Stateless evaluator for E, B and φ of a [`ChargeConfiguration`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FieldEvaluator {
    config: EvaluatorConfig,
}

impl FieldEvaluator {
    /// Creates an evaluator with the given limits.
    #[must_use]
    pub fn new(config: EvaluatorConfig) -> Self {
        Self { config }
    }

    /// Limits and units in use.
    #[must_use]
    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    /// Electric field at `point`. Always finite.
    #[must_use]
    pub fn electric(&self, point: R2, sources: &ChargeConfiguration) -> R2 {
        electric_field_from_point_charges(point, sources.charges(), &self.config)
    }

    /// Magnetic field at `point`. Always finite; zero when nothing moves and no wire is present.
    #[must_use]
    pub fn magnetic(&self, point: R2, sources: &ChargeConfiguration) -> R3 {
        magnetic_field_from_sources(point, sources, &self.config)
    }

    /// In-plane part of the magnetic field (the part field lines can follow).
    #[must_use]
    pub fn magnetic_in_plane(&self, point: R2, sources: &ChargeConfiguration) -> R2 {
        self.magnetic(point, sources).xy()
    }

    /// Scalar potential at `point`.
    #[must_use]
    pub fn potential(&self, point: R2, sources: &ChargeConfiguration) -> Scalar {
        potential_from_point_charges(point, sources.charges(), &self.config)
    }

    /// Evaluates everything at once.
    #[must_use]
    pub fn sample(&self, point: R2, sources: &ChargeConfiguration) -> FieldSample {
        FieldSample {
            position: point,
            electric: self.electric(point, sources),
            magnetic: self.magnetic(point, sources),
            potential: self.potential(point, sources),
        }
    }
}

/// Electric field at `point` using the default evaluator.
#[must_use]
pub fn evaluate_electric(point: R2, sources: &ChargeConfiguration) -> R2 {
    FieldEvaluator::default().electric(point, sources)
}

/// Magnetic field at `point` using the default evaluator.
#[must_use]
pub fn evaluate_magnetic(point: R2, sources: &ChargeConfiguration) -> R3 {
    FieldEvaluator::default().magnetic(point, sources)
}
