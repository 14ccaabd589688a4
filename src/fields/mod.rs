//! Electric and magnetic fields of point charges and wires, at rest and in motion.

mod electric;
mod electrostatic;
mod evaluator;
mod magnetic;
mod sources;
mod transform;

pub use electric::{coulomb_field, electric_field_from_point_charges, electric_field_of_charge};
pub use electrostatic::{contracted_distance, potential_from_point_charges, potential_of_charge};
pub use evaluator::{evaluate_electric, evaluate_magnetic, EvaluatorConfig, FieldEvaluator, FieldSample};
pub use magnetic::{magnetic_field_from_sources, magnetic_field_of_charge, magnetic_field_of_wire};
pub use sources::{Axis, ChargeConfiguration, PointCharge, WireCurrent, WireOrientation};
pub use transform::{transform_fields, PlaneFields};
