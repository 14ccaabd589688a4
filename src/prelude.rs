//! Convenience re-exports for building field visualizations.

pub use crate::constants::*;
pub use crate::errors::{validate_beta, EmRelativityError};
pub use crate::fields::{
    evaluate_electric, evaluate_magnetic, transform_fields, Axis, ChargeConfiguration, EvaluatorConfig,
    FieldEvaluator, FieldSample, PlaneFields, PointCharge, WireCurrent, WireOrientation,
};
pub use crate::grid::{linspace, sweep_map, FieldGrid, GridQuantity};
pub use crate::lorentz::{
    classify_interval, gamma, lorentz_transform, spacetime_interval, IntervalKind, LorentzFrame, SpacetimeEvent,
};
pub use crate::math::{normalize_or_zero, R2, R3, Scalar};
pub use crate::scenarios::{Scenario, ScenarioCatalog, ScenarioId, ScenarioParams};
pub use crate::simulation::{FrameData, FrameRequest, SimulationState};
pub use crate::streamlines::{
    equipotential_contour, trace_electric_lines, trace_field_line, trace_magnetic_lines, Bounds, Equipotential,
    Polyline, Termination, TraceDirection, TraceOptions,
};
