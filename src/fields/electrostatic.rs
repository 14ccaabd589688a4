use crate::lorentz::gamma;
use crate::math::{R2, Scalar};

use super::evaluator::EvaluatorConfig;
use super::sources::PointCharge;

/// Distance from a charge measured in its rest frame: the component along the
/// direction of motion is stretched by γ, so surfaces of constant distance are
/// ellipses flattened along the motion.
#[must_use]
pub fn contracted_distance(displacement: R2, charge: &PointCharge, config: &EvaluatorConfig) -> Scalar {
    let beta = config.effective_beta(charge.beta());
    if beta == 0.0 {
        return displacement.norm();
    }
    let axis = charge.axis().unit();
    let along = displacement.dot(&axis);
    let across = (displacement - axis * along).norm();
    (gamma(beta) * along).hypot(across)
}

/// Lab-frame electric potential φ at `point` due to a single point charge.
///
/// For uniform motion this is γ·k·q / r', with r' the [`contracted_distance`];
/// the rest-frame potential k·q / r' picks up γ as the time component of the
/// four-potential.
#[must_use]
pub fn potential_of_charge(point: R2, charge: &PointCharge, config: &EvaluatorConfig) -> Scalar {
    let r = contracted_distance(point - charge.position, charge, config).max(config.min_radius);
    let g = gamma(config.effective_beta(charge.beta()));
    let units = &config.units;
    let phi = g * units.coulomb_k * charge.charge * units.charge_unit / r;
    if phi.is_finite() { phi } else { 0.0 }
}

/// Electric potential φ at `point` due to discrete point charges.
#[must_use]
pub fn potential_from_point_charges(point: R2, charges: &[PointCharge], config: &EvaluatorConfig) -> Scalar {
    charges.iter().map(|c| potential_of_charge(point, c, config)).sum()
}
