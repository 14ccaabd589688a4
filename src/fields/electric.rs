use crate::lorentz::gamma;
use crate::math::{finite_or_zero2, normalize_or_zero, R2, Scalar};

use super::evaluator::EvaluatorConfig;
use super::sources::PointCharge;

/// Coulomb field k·q·r̂ / max(|r|, ε)² of a charge at rest, `displacement` pointing
/// from the charge to the field point.
#[inline]
#[must_use]
pub fn coulomb_field(displacement: R2, charge: Scalar, config: &EvaluatorConfig) -> R2 {
    let direction = normalize_or_zero(displacement);
    let r = displacement.norm().max(config.min_radius);
    let units = &config.units;
    direction * (units.coulomb_k * charge * units.charge_unit / (r * r))
}

/// Electric field E at `point` due to a single, possibly moving, point charge.
///
/// The component of the rest-frame field along the direction of motion is left
/// unchanged; the perpendicular component is scaled by γ.
#[must_use]
pub fn electric_field_of_charge(point: R2, charge: &PointCharge, config: &EvaluatorConfig) -> R2 {
    let rest = coulomb_field(point - charge.position, charge.charge, config);
    let beta = config.effective_beta(charge.beta());
    if beta == 0.0 {
        return finite_or_zero2(rest);
    }
    let axis = charge.axis().unit();
    let parallel = axis * rest.dot(&axis);
    let perpendicular = rest - parallel;
    finite_or_zero2(parallel + perpendicular * gamma(beta))
}

/// Electric field E at `point` due to discrete point charges (superposition).
#[must_use]
pub fn electric_field_from_point_charges(point: R2, charges: &[PointCharge], config: &EvaluatorConfig) -> R2 {
    let mut e = R2::zeros();
    for c in charges {
        e += electric_field_of_charge(point, c, config);
    }
    finite_or_zero2(e)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::fields::sources::Axis;

    #[test]
    fn rest_field_follows_inverse_square() {
        let config = EvaluatorConfig::default();
        for q in [1.0, -1.0, 2.0] {
            let charge = PointCharge::stationary(R2::zeros(), q);
            for r in [0.5, 1.0, 2.0, 5.0] {
                let direction = R2::new(0.6, 0.8);
                let e = electric_field_of_charge(direction * r, &charge, &config);
                assert_relative_eq!(e.norm(), q.abs() / (r * r), max_relative = 1.0e-12);
                // Outward for positive charges, inward for negative ones.
                assert_relative_eq!(e.dot(&direction).signum(), q.signum());
                assert_relative_eq!(e.perp(&direction), 0.0, epsilon = 1.0e-12);
            }
        }
    }

    #[test]
    fn perpendicular_component_is_enhanced_by_gamma() {
        let config = EvaluatorConfig::default();
        let point = R2::new(0.0, 1.5);
        let at_rest = electric_field_of_charge(point, &PointCharge::stationary(R2::zeros(), 1.0), &config);
        let moving = electric_field_of_charge(point, &PointCharge::moving(R2::zeros(), 1.0, 0.8, Axis::X), &config);
        let g = 1.0 / (1.0 - 0.64_f64).sqrt();
        assert_relative_eq!(moving.y, g * at_rest.y, max_relative = 1.0e-6);
        assert_relative_eq!(moving.x, 0.0, epsilon = 1.0e-12);
    }

    #[test]
    fn parallel_component_is_unchanged() {
        let config = EvaluatorConfig::default();
        let point = R2::new(2.0, 0.0);
        let at_rest = electric_field_of_charge(point, &PointCharge::stationary(R2::zeros(), 1.0), &config);
        let moving = electric_field_of_charge(point, &PointCharge::moving(R2::zeros(), 1.0, 0.9, Axis::X), &config);
        assert_relative_eq!(moving.x, at_rest.x, max_relative = 1.0e-12);
    }

    #[test]
    fn motion_along_y_flattens_along_y() {
        let config = EvaluatorConfig::default();
        let charge = PointCharge::moving(R2::zeros(), 1.0, 0.6, Axis::Y);
        let e = electric_field_of_charge(R2::new(1.0, 0.0), &charge, &config);
        assert_relative_eq!(e.x, 1.25, max_relative = 1.0e-12);
    }

    #[test]
    fn field_at_the_charge_itself_is_finite() {
        let config = EvaluatorConfig::default();
        let charge = PointCharge::moving(R2::new(1.0, 1.0), 2.0, 0.99, Axis::X);
        let e = electric_field_of_charge(R2::new(1.0, 1.0), &charge, &config);
        assert_eq!(e, R2::zeros());
        let near = electric_field_of_charge(R2::new(1.0, 1.0 + 1.0e-9), &charge, &config);
        assert!(near.x.is_finite() && near.y.is_finite());
        // The floor caps the magnitude at γ·k·q/ε².
        assert!(near.norm() <= gamma(0.99) * 2.0 / (0.1 * 0.1) * (1.0 + 1.0e-9));
    }
}
