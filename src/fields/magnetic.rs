use std::f64::consts::PI;

use crate::math::{cross_z, finite_or_zero2, finite_or_zero3, normalize_or_zero, perpendicular, R2, R3, Scalar};

use super::electric::electric_field_of_charge;
use super::evaluator::EvaluatorConfig;
use super::sources::{ChargeConfiguration, PointCharge, WireCurrent};

/// Out-of-plane magnetic field B_z = (v × E)_z / c² of a moving point charge.
///
/// Returns exactly zero for charges at rest or below the stationary threshold.
#[must_use]
pub fn magnetic_field_of_charge(point: R2, charge: &PointCharge, config: &EvaluatorConfig) -> Scalar {
    let beta = config.effective_beta(charge.beta());
    if beta == 0.0 {
        return 0.0;
    }
    let c = config.units.speed_of_light;
    let velocity = charge.axis().unit() * (beta * c);
    let e = electric_field_of_charge(point, charge, config);
    let bz = cross_z(velocity, e) / (c * c);
    if bz.is_finite() { bz } else { 0.0 }
}

/// In-plane field B = μ₀I / (2π max(r, ε)) circulating around a wire.
#[must_use]
pub fn magnetic_field_of_wire(point: R2, wire: &WireCurrent, config: &EvaluatorConfig) -> R2 {
    let displacement = point - wire.position;
    let r = displacement.norm().max(config.min_radius);
    let magnitude = config.units.permeability * wire.current / (2.0 * PI * r);
    let tangent = perpendicular(normalize_or_zero(displacement));
    finite_or_zero2(tangent * (magnitude * wire.orientation.sign()))
}

/// Total magnetic field at `point`: wires contribute in-plane components, moving
/// charges the z component.
#[must_use]
pub fn magnetic_field_from_sources(point: R2, sources: &ChargeConfiguration, config: &EvaluatorConfig) -> R3 {
    let mut in_plane = R2::zeros();
    for w in sources.wires() {
        in_plane += magnetic_field_of_wire(point, w, config);
    }
    let bz: Scalar = sources
        .charges()
        .iter()
        .map(|c| magnetic_field_of_charge(point, c, config))
        .sum();
    finite_or_zero3(R3::new(in_plane.x, in_plane.y, bz))
}
