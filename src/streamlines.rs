//! Field-line and equipotential tracing through the fields of a [`ChargeConfiguration`].
//!
//! Field lines are integrated with explicit forward Euler on the unit field
//! direction. Every trace is bounded by `max_steps` and the domain, so it
//! always terminates.

use std::f64::consts::TAU;

use tracing::{debug, trace};

use crate::errors::EmRelativityError;
use crate::fields::{Axis, ChargeConfiguration, FieldEvaluator};
use crate::grid::linspace;
use crate::lorentz::gamma;
use crate::math::{is_finite2, normalize_or_zero, perpendicular, R2, Scalar};

const MAX_PREALLOCATED: usize = 4096;

/// Anything that yields a vector at a point in the plane.
pub trait VectorField {
    /// Field value at `point`.
    fn value_at(&self, point: R2) -> R2;
}

impl<F> VectorField for F
where
    F: Fn(R2) -> R2,
{
    fn value_at(&self, point: R2) -> R2 {
        self(point)
    }
}

/// Electric field of a configuration, borrowed for tracing.
#[derive(Debug, Clone, Copy)]
pub struct ElectricFieldView<'a> {
    evaluator: &'a FieldEvaluator,
    sources: &'a ChargeConfiguration,
}

impl<'a> ElectricFieldView<'a> {
    /// Wraps `evaluator` and `sources`.
    #[must_use]
    pub fn new(evaluator: &'a FieldEvaluator, sources: &'a ChargeConfiguration) -> Self {
        Self { evaluator, sources }
    }
}

impl VectorField for ElectricFieldView<'_> {
    fn value_at(&self, point: R2) -> R2 {
        self.evaluator.electric(point, self.sources)
    }
}

/// In-plane magnetic field of a configuration, borrowed for tracing.
#[derive(Debug, Clone, Copy)]
pub struct MagneticFieldView<'a> {
    evaluator: &'a FieldEvaluator,
    sources: &'a ChargeConfiguration,
}

impl<'a> MagneticFieldView<'a> {
    /// Wraps `evaluator` and `sources`.
    #[must_use]
    pub fn new(evaluator: &'a FieldEvaluator, sources: &'a ChargeConfiguration) -> Self {
        Self { evaluator, sources }
    }
}

impl VectorField for MagneticFieldView<'_> {
    fn value_at(&self, point: R2) -> R2 {
        self.evaluator.magnetic_in_plane(point, self.sources)
    }
}

/// Axis-aligned rectangle limiting every trace.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Lower-left corner.
    pub min: R2,
    /// Upper-right corner.
    pub max: R2,
}

impl Bounds {
    /// Creates bounds from two corners.
    #[must_use]
    pub fn new(min: R2, max: R2) -> Self {
        Self { min, max }
    }

    /// A `width` × `height` rectangle centred on the origin.
    #[must_use]
    pub fn centered(width: Scalar, height: Scalar) -> Self {
        let half = R2::new(width, height) * 0.5;
        Self { min: -half, max: half }
    }

    /// True for a rectangle with positive, finite extent.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        is_finite2(&self.min) && is_finite2(&self.max) && self.min.x < self.max.x && self.min.y < self.max.y
    }

    /// True when `p` lies inside or on the boundary. NaN points are outside.
    #[must_use]
    pub fn contains(&self, p: R2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Horizontal extent.
    #[must_use]
    pub fn width(&self) -> Scalar {
        self.max.x - self.min.x
    }

    /// Vertical extent.
    #[must_use]
    pub fn height(&self) -> Scalar {
        self.max.y - self.min.y
    }

    /// Distance from `p` to the nearest edge (zero outside).
    #[must_use]
    pub fn distance_to_edge(&self, p: R2) -> Scalar {
        let d = (p.x - self.min.x).min(self.max.x - p.x).min(p.y - self.min.y).min(self.max.y - p.y);
        d.max(0.0)
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::centered(12.0, 10.0)
    }
}

/// Whether a trace follows the field or runs against it.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TraceDirection {
    /// Follow the field (away from positive charges).
    #[default]
    Along,
    /// Run against the field (away from negative charges).
    Against,
}

impl TraceDirection {
    /// +1 or -1.
    #[must_use]
    pub fn sign(self) -> Scalar {
        match self {
            Self::Along => 1.0,
            Self::Against => -1.0,
        }
    }
}

/// Why a trace stopped.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Step cap reached.
    MaxSteps,
    /// Next point would leave the domain.
    LeftDomain,
    /// Came within the capture radius of a sink charge.
    ReachedSink,
    /// Field vanished or stopped being finite.
    Stagnated,
    /// Returned to its starting point.
    Closed,
    /// Nothing was traced.
    Empty,
}

/// Ordered points produced by one trace.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    /// Points in trace order, starting at the seed.
    pub points: Vec<R2>,
    /// Reason the trace stopped.
    pub termination: Termination,
}

impl Polyline {
    /// A polyline with no points.
    #[must_use]
    pub fn empty() -> Self {
        Self { points: Vec::new(), termination: Termination::Empty }
    }

    /// Number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True if no points were produced.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Sum of segment lengths.
    #[must_use]
    pub fn arc_length(&self) -> Scalar {
        self.points.windows(2).map(|w| (w[1] - w[0]).norm()).sum()
    }
}

/// Step size, caps and seeding used by the tracer.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceOptions {
    /// Euler step length.
    pub step_size: Scalar,
    /// Hard cap on steps per trace.
    pub max_steps: usize,
    /// Domain every trace must stay inside.
    pub bounds: Bounds,
    /// A trace ends once it is this close to a sink charge.
    pub capture_radius: Scalar,
    /// Radius of the circle seeds are placed on around each source.
    pub seed_radius: Scalar,
    /// Seeds per source charge.
    pub num_field_lines: usize,
    /// Concentric magnetic loops seeded around each wire.
    pub magnetic_loops: usize,
}

impl Default for TraceOptions {
    fn default() -> Self {
        Self {
            step_size: 0.05,
            max_steps: 400,
            bounds: Bounds::default(),
            capture_radius: 0.1,
            seed_radius: 0.15,
            num_field_lines: 16,
            magnetic_loops: 6,
        }
    }
}

impl TraceOptions {
    /// Checks that the options describe a bounded, non-degenerate trace.
    pub fn validate(&self) -> Result<(), EmRelativityError> {
        if !(self.step_size.is_finite() && self.step_size > 0.0) {
            return Err(EmRelativityError::InvalidOptions(format!("step_size must be > 0, got {}", self.step_size)));
        }
        if self.max_steps == 0 {
            return Err(EmRelativityError::InvalidOptions("max_steps must be > 0".into()));
        }
        if !self.bounds.is_valid() {
            return Err(EmRelativityError::InvalidOptions("bounds must have positive extent".into()));
        }
        if !(self.capture_radius >= 0.0 && self.seed_radius > 0.0) {
            return Err(EmRelativityError::InvalidOptions("capture and seed radii must be positive".into()));
        }
        Ok(())
    }
}

/// `n` points equally spaced in angle on a circle of `radius` around `center`.
#[must_use]
pub fn seed_points(center: R2, n: usize, radius: Scalar) -> Vec<R2> {
    (0..n)
        .map(|i| {
            let theta = TAU * i as Scalar / n as Scalar;
            center + R2::new(theta.cos(), theta.sin()) * radius
        })
        .collect()
}

/// Integrates a line through `field` starting at `seed`.
///
/// `sinks` are positions that absorb the line once it comes within
/// `options.capture_radius`. With `close_loops` the trace also stops when it
/// returns to the seed.
#[must_use]
pub fn trace_streamline<F: VectorField + ?Sized>(
    seed: R2,
    direction: TraceDirection,
    field: &F,
    sinks: &[R2],
    close_loops: bool,
    options: &TraceOptions,
) -> Polyline {
    if let Err(err) = options.validate() {
        debug!(%err, "skipping trace");
        return Polyline::empty();
    }
    if !options.bounds.contains(seed) {
        return Polyline { points: Vec::new(), termination: Termination::LeftDomain };
    }

    let h = options.step_size;
    let sign = direction.sign();
    let captured = |p: R2| sinks.iter().any(|s| (p - s).norm() <= options.capture_radius);
    // Euler drifts outward by about π·h per revolution, so closure needs slack.
    let close_radius = 5.0 * h;

    let mut points = Vec::with_capacity(options.max_steps.min(MAX_PREALLOCATED) + 1);
    points.push(seed);
    if captured(seed) {
        return Polyline { points, termination: Termination::ReachedSink };
    }

    let mut p = seed;
    let mut left_seed = false;
    for _ in 0..options.max_steps {
        let dir = normalize_or_zero(field.value_at(p)) * sign;
        if dir == R2::zeros() {
            return finish(points, Termination::Stagnated);
        }
        let next = p + dir * h;
        if !is_finite2(&next) {
            return finish(points, Termination::Stagnated);
        }
        if !options.bounds.contains(next) {
            return finish(points, Termination::LeftDomain);
        }
        points.push(next);
        p = next;

        if captured(p) {
            return finish(points, Termination::ReachedSink);
        }
        if close_loops {
            let d = (p - seed).norm();
            if d > 2.0 * close_radius {
                left_seed = true;
            } else if left_seed && d < close_radius {
                points.push(seed);
                return finish(points, Termination::Closed);
            }
        }
    }
    finish(points, Termination::MaxSteps)
}

fn finish(points: Vec<R2>, termination: Termination) -> Polyline {
    trace!(points = points.len(), ?termination, "trace finished");
    Polyline { points, termination }
}

/// Traces one electric field line from `seed`.
///
/// Lines traced along the field end at negative charges; lines traced against
/// it end at positive charges. Same-sign configurations run to the boundary.
#[must_use]
pub fn trace_field_line(
    seed: R2,
    direction: TraceDirection,
    sources: &ChargeConfiguration,
    evaluator: &FieldEvaluator,
    options: &TraceOptions,
) -> Polyline {
    if sources.charges().is_empty() {
        return Polyline::empty();
    }
    let sinks: Vec<R2> = match direction {
        TraceDirection::Along => sources.sinks().map(|c| c.position).collect(),
        TraceDirection::Against => sources.sources().map(|c| c.position).collect(),
    };
    let field = ElectricFieldView::new(evaluator, sources);
    trace_streamline(seed, direction, &field, &sinks, false, options)
}

/// Traces one closed magnetic field line around the wires of `sources`.
#[must_use]
pub fn trace_magnetic_line(
    seed: R2,
    sources: &ChargeConfiguration,
    evaluator: &FieldEvaluator,
    options: &TraceOptions,
) -> Polyline {
    if sources.wires().is_empty() {
        return Polyline::empty();
    }
    let field = MagneticFieldView::new(evaluator, sources);
    trace_streamline(seed, TraceDirection::Along, &field, &[], true, options)
}

/// Traces `num_field_lines` electric field lines from every source charge.
///
/// Seeds sit around positive charges; with no positive charge present the
/// negative charges are used and lines are traced against the field.
#[must_use]
pub fn trace_electric_lines(
    sources: &ChargeConfiguration,
    evaluator: &FieldEvaluator,
    options: &TraceOptions,
) -> Vec<Polyline> {
    let positives: Vec<R2> = sources.sources().map(|c| c.position).collect();
    let (origins, direction) = if positives.is_empty() {
        (sources.sinks().map(|c| c.position).collect(), TraceDirection::Against)
    } else {
        (positives, TraceDirection::Along)
    };
    if let Some(sep) = sources.min_separation() {
        if options.step_size > 0.25 * sep {
            debug!(step = options.step_size, separation = sep, "step size is coarse for this configuration");
        }
    }

    let lines: Vec<Polyline> = origins
        .iter()
        .flat_map(|&origin| seed_points(origin, options.num_field_lines, options.seed_radius))
        .map(|seed| trace_field_line(seed, direction, sources, evaluator, options))
        .collect();
    debug!(lines = lines.len(), "traced electric field lines");
    lines
}

/// Traces `magnetic_loops` concentric field lines around every wire.
///
/// Seed radii stop where a full turn no longer fits in `max_steps`, so every
/// loop can close.
#[must_use]
pub fn trace_magnetic_lines(
    sources: &ChargeConfiguration,
    evaluator: &FieldEvaluator,
    options: &TraceOptions,
) -> Vec<Polyline> {
    let mut lines = Vec::new();
    for wire in sources.wires() {
        // One turn at radius r takes about 2πr/h steps plus π² of Euler drift.
        let closable = 0.9 * options.max_steps as Scalar * options.step_size / TAU;
        let reach = (0.9 * options.bounds.distance_to_edge(wire.position)).min(closable);
        let first = (4.0 * options.seed_radius).min(reach);
        for r in linspace(first, reach, options.magnetic_loops) {
            if r <= 0.0 {
                continue;
            }
            lines.push(trace_magnetic_line(wire.position + R2::new(r, 0.0), sources, evaluator, options));
        }
    }
    debug!(lines = lines.len(), "traced magnetic field lines");
    lines
}

/// Analytic equipotential of a single charge: an ellipse flattened along the motion.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EllipseParams {
    /// Centre (the charge position).
    pub center: R2,
    /// Semi-axis along the direction of motion.
    pub semi_axis_parallel: Scalar,
    /// Semi-axis across the direction of motion.
    pub semi_axis_perpendicular: Scalar,
    /// Direction of motion.
    pub axis: Axis,
}

impl EllipseParams {
    /// Point at parameter angle `theta`.
    #[must_use]
    pub fn point_at(&self, theta: Scalar) -> R2 {
        let along = self.axis.unit();
        let across = perpendicular(along);
        self.center + along * (self.semi_axis_parallel * theta.cos()) + across * (self.semi_axis_perpendicular * theta.sin())
    }

    /// Samples the ellipse into a closed polyline with `segments` segments.
    #[must_use]
    pub fn to_polyline(&self, segments: usize) -> Polyline {
        if segments == 0 {
            return Polyline::empty();
        }
        let points = (0..=segments)
            .map(|i| self.point_at(TAU * i as Scalar / segments as Scalar))
            .collect();
        Polyline { points, termination: Termination::Closed }
    }
}

/// An equipotential, either in closed form or traced numerically.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub enum Equipotential {
    /// Single-charge configurations.
    Ellipse(EllipseParams),
    /// Everything else; empty when the level is never reached.
    Contour(Polyline),
}

impl Equipotential {
    /// Points of the contour, sampling ellipses with `segments` segments.
    #[must_use]
    pub fn to_polyline(&self, segments: usize) -> Polyline {
        match self {
            Self::Ellipse(e) => e.to_polyline(segments),
            Self::Contour(p) => p.clone(),
        }
    }
}

/// Finds the equipotential φ = `level` nearest to `center`.
///
/// A lone point charge yields the analytic ellipse around it. Otherwise the
/// level is bracketed along rays from `center` and followed perpendicular to
/// ∇φ, projecting back onto the level after each step.
#[must_use]
pub fn equipotential_contour(
    center: R2,
    sources: &ChargeConfiguration,
    evaluator: &FieldEvaluator,
    level: Scalar,
    options: &TraceOptions,
) -> Equipotential {
    if let [charge] = sources.charges() {
        let config = evaluator.config();
        let units = &config.units;
        let beta = config.effective_beta(charge.beta());
        // φ = γkq/r' in the lab, so the rest-frame radius grows with γ.
        let radius = gamma(beta) * units.coulomb_k * charge.charge * units.charge_unit / level;
        if !(radius.is_finite() && radius > config.min_radius) {
            return Equipotential::Contour(Polyline::empty());
        }
        return Equipotential::Ellipse(EllipseParams {
            center: charge.position,
            semi_axis_parallel: radius / gamma(beta),
            semi_axis_perpendicular: radius,
            axis: charge.axis(),
        });
    }
    if sources.charges().is_empty() || options.validate().is_err() || !level.is_finite() {
        return Equipotential::Contour(Polyline::empty());
    }

    let phi = |p: R2| evaluator.potential(p, sources) - level;
    match find_level_crossing(center, &phi, evaluator.config().min_radius, options) {
        Some(start) => Equipotential::Contour(follow_level(start, &phi, options)),
        None => Equipotential::Contour(Polyline::empty()),
    }
}

fn find_level_crossing(center: R2, phi: &impl Fn(R2) -> Scalar, r0: Scalar, options: &TraceOptions) -> Option<R2> {
    let reach = options.bounds.distance_to_edge(center);
    if reach <= r0 {
        return None;
    }
    for dir in [R2::x(), -R2::x(), R2::y(), -R2::y()] {
        let mut prev_r = r0;
        let mut prev = phi(center + dir * r0);
        let mut r = r0 + options.step_size;
        while r <= reach {
            let cur = phi(center + dir * r);
            if prev == 0.0 {
                return Some(center + dir * prev_r);
            }
            if prev.signum() != cur.signum() {
                let (mut lo, mut hi) = (prev_r, r);
                for _ in 0..60 {
                    let mid = 0.5 * (lo + hi);
                    if phi(center + dir * mid).signum() == prev.signum() {
                        lo = mid;
                    } else {
                        hi = mid;
                    }
                }
                return Some(center + dir * (0.5 * (lo + hi)));
            }
            prev_r = r;
            prev = cur;
            r += options.step_size;
        }
    }
    None
}

fn follow_level(start: R2, phi: &impl Fn(R2) -> Scalar, options: &TraceOptions) -> Polyline {
    let h = options.step_size;
    let dh = 1.0e-3 * h;
    let gradient = |p: R2| {
        R2::new(
            (phi(p + R2::new(dh, 0.0)) - phi(p - R2::new(dh, 0.0))) / (2.0 * dh),
            (phi(p + R2::new(0.0, dh)) - phi(p - R2::new(0.0, dh))) / (2.0 * dh),
        )
    };
    let project = |mut p: R2| {
        for _ in 0..3 {
            let g = gradient(p);
            let g2 = g.norm_squared();
            if !(g2 > 0.0 && g2.is_finite()) {
                break;
            }
            p -= g * (phi(p) / g2);
        }
        p
    };

    let mut points = Vec::with_capacity(options.max_steps.min(MAX_PREALLOCATED) + 1);
    points.push(start);
    let mut p = start;
    let mut left_start = false;
    for _ in 0..options.max_steps {
        let tangent = perpendicular(normalize_or_zero(gradient(p)));
        if tangent == R2::zeros() {
            return finish(points, Termination::Stagnated);
        }
        let next = project(p + tangent * h);
        if !is_finite2(&next) {
            return finish(points, Termination::Stagnated);
        }
        if !options.bounds.contains(next) {
            return finish(points, Termination::LeftDomain);
        }
        points.push(next);
        p = next;

        let d = (p - start).norm();
        if d > 3.0 * h {
            left_start = true;
        } else if left_start && d < 1.5 * h {
            points.push(start);
            return finish(points, Termination::Closed);
        }
    }
    finish(points, Termination::MaxSteps)
}
