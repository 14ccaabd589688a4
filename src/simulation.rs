//! Session state and per-frame computation for an interactive front end.

use tracing::{debug, warn};

use crate::fields::{ChargeConfiguration, FieldEvaluator};
use crate::grid::{FieldGrid, GridQuantity};
use crate::lorentz::{gamma, LorentzFrame};
use crate::math::{R2, Scalar};
use crate::scenarios::{Scenario, ScenarioCatalog, ScenarioId, ScenarioParams};
use crate::streamlines::{equipotential_contour, trace_electric_lines, trace_magnetic_lines, Equipotential, Polyline, TraceOptions};

/// Immutable snapshot of everything the user controls.
///
/// Every setter returns a new value; the previous snapshot stays valid.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SimulationState {
    scenario: ScenarioId,
    params: ScenarioParams,
}

impl SimulationState {
    /// Creates a state for `scenario` with the given parameters.
    #[must_use]
    pub fn new(scenario: ScenarioId, params: ScenarioParams) -> Self {
        Self { scenario, params }
    }

    /// Active preset.
    #[must_use]
    pub fn scenario(&self) -> ScenarioId {
        self.scenario
    }

    /// Description of the active preset.
    #[must_use]
    pub fn description(&self) -> &'static Scenario {
        ScenarioCatalog::get(self.scenario)
    }

    /// Current control values.
    #[must_use]
    pub fn params(&self) -> &ScenarioParams {
        &self.params
    }

    /// Switches preset, keeping the control values.
    #[must_use]
    pub fn with_scenario(self, scenario: ScenarioId) -> Self {
        Self { scenario, ..self }
    }

    /// Sets the charge control.
    #[must_use]
    pub fn with_charge(self, charge: Scalar) -> Self {
        Self { params: self.params.with_charge(charge), ..self }
    }

    /// Sets the velocity control.
    #[must_use]
    pub fn with_beta(self, beta: Scalar) -> Self {
        Self { params: self.params.with_beta(beta), ..self }
    }

    /// Moves the whole arrangement.
    #[must_use]
    pub fn with_offset(self, offset: R2) -> Self {
        Self { params: self.params.with_offset(offset), ..self }
    }

    /// Charges and wires of the active preset.
    #[must_use]
    pub fn configuration(&self) -> ChargeConfiguration {
        ScenarioCatalog::configuration(self.scenario, &self.params)
    }

    /// Rest frame of the moving charges, as seen from the lab.
    #[must_use]
    pub fn frame(&self) -> LorentzFrame {
        LorentzFrame::new(self.params.beta)
    }

    /// Computes everything `request` asks for in one pass.
    ///
    /// Never fails: invalid trace options produce empty polylines.
    #[must_use]
    pub fn compute_frame(&self, evaluator: &FieldEvaluator, options: &TraceOptions, request: &FrameRequest) -> FrameData {
        if let Err(err) = options.validate() {
            warn!(%err, "trace options rejected, lines will be empty");
        }
        let configuration = self.configuration();

        let field_lines =
            if request.field_lines { trace_electric_lines(&configuration, evaluator, options) } else { Vec::new() };
        let magnetic_lines =
            if request.magnetic_lines { trace_magnetic_lines(&configuration, evaluator, options) } else { Vec::new() };

        let center = centroid(&configuration);
        let mut equipotentials = Vec::new();
        for &level in &request.equipotential_levels {
            for signed in [level, -level] {
                match equipotential_contour(center, &configuration, evaluator, signed, options) {
                    Equipotential::Contour(line) if line.is_empty() => {}
                    contour => equipotentials.push(contour),
                }
            }
        }

        let heatmap = request.heatmap.map(|quantity| {
            FieldGrid::sample(evaluator, &configuration, options.bounds, request.grid_size.0, request.grid_size.1, quantity)
        });

        let frame_gamma = configuration
            .charges()
            .iter()
            .map(|c| gamma(evaluator.config().effective_beta(c.beta())))
            .fold(1.0, Scalar::max);
        debug!(
            scenario = %self.scenario,
            gamma = frame_gamma,
            field_lines = field_lines.len(),
            magnetic_lines = magnetic_lines.len(),
            equipotentials = equipotentials.len(),
            "frame computed"
        );

        FrameData {
            scenario: self.scenario,
            gamma: frame_gamma,
            configuration,
            field_lines,
            magnetic_lines,
            equipotentials,
            heatmap,
        }
    }
}

fn centroid(configuration: &ChargeConfiguration) -> R2 {
    let charges = configuration.charges();
    if charges.is_empty() {
        return R2::zeros();
    }
    charges.iter().map(|c| c.position).sum::<R2>() / charges.len() as Scalar
}

/// Display toggles selecting which computations a frame runs.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct FrameRequest {
    /// Trace electric field lines.
    pub field_lines: bool,
    /// Trace magnetic field lines around wires.
    pub magnetic_lines: bool,
    /// Potential magnitudes to contour; each is drawn at both signs when reachable.
    pub equipotential_levels: Vec<Scalar>,
    /// Heatmap quantity, if any.
    pub heatmap: Option<GridQuantity>,
    /// Heatmap resolution (columns, rows).
    pub grid_size: (usize, usize),
}

impl Default for FrameRequest {
    fn default() -> Self {
        Self {
            field_lines: true,
            magnetic_lines: true,
            equipotential_levels: Vec::new(),
            heatmap: None,
            grid_size: (48, 40),
        }
    }
}

/// Plain data handed to the renderer.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct FrameData {
    /// Preset the frame was computed for.
    pub scenario: ScenarioId,
    /// Largest Lorentz factor among the charges; 1 when every source is at rest.
    pub gamma: Scalar,
    /// Sources drawn as markers.
    pub configuration: ChargeConfiguration,
    /// Electric field lines.
    pub field_lines: Vec<Polyline>,
    /// Magnetic field lines.
    pub magnetic_lines: Vec<Polyline>,
    /// Non-empty equipotentials.
    pub equipotentials: Vec<Equipotential>,
    /// Heatmap, when requested.
    pub heatmap: Option<FieldGrid>,
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::streamlines::Termination;

    #[test]
    fn setters_return_new_states() {
        let base = SimulationState::default();
        let next = base.with_scenario(ScenarioId::MovingCharge).with_beta(0.6).with_charge(-1.0);
        assert_eq!(base.scenario(), ScenarioId::SingleCharge);
        assert_eq!(base.params().beta, 0.0);
        assert_eq!(next.scenario(), ScenarioId::MovingCharge);
        assert_relative_eq!(next.frame().gamma(), 1.25, epsilon = 1.0e-12);
        assert_relative_eq!(next.configuration().charges()[0].charge, -1.0);
        assert_eq!(next.description().title, "Moving charge");
    }

    #[test]
    fn toggles_select_computations() {
        let state = SimulationState::new(ScenarioId::Dipole, ScenarioParams::default());
        let evaluator = FieldEvaluator::default();
        let options = TraceOptions { num_field_lines: 8, max_steps: 200, ..TraceOptions::default() };

        let none = FrameRequest { field_lines: false, magnetic_lines: false, ..FrameRequest::default() };
        let data = state.compute_frame(&evaluator, &options, &none);
        assert!(data.field_lines.is_empty());
        assert!(data.equipotentials.is_empty());
        assert!(data.heatmap.is_none());

        let all = FrameRequest {
            equipotential_levels: vec![0.5],
            heatmap: Some(GridQuantity::Potential),
            grid_size: (9, 7),
            ..FrameRequest::default()
        };
        let data = state.compute_frame(&evaluator, &options, &all);
        assert_eq!(data.field_lines.len(), 8);
        assert!(data.magnetic_lines.is_empty());
        assert!(data.field_lines.iter().all(|l| l.len() <= 201));
        assert!(data.field_lines.iter().any(|l| l.termination == Termination::ReachedSink));
        assert_eq!(data.equipotentials.len(), 2);
        let grid = data.heatmap.unwrap();
        assert_eq!(grid.values.len(), 63);
    }

    #[test]
    fn wire_frame_has_closed_magnetic_loops() {
        let state = SimulationState::new(ScenarioId::CurrentWire, ScenarioParams::default());
        let options = TraceOptions::default();
        let data = state.compute_frame(&FieldEvaluator::default(), &options, &FrameRequest::default());
        assert!(data.field_lines.is_empty());
        assert_eq!(data.magnetic_lines.len(), options.magnetic_loops);
        assert!(data.magnetic_lines.iter().all(|l| l.termination == Termination::Closed));
    }

    #[test]
    fn frame_gamma_follows_the_sources() {
        let evaluator = FieldEvaluator::default();
        let options = TraceOptions { max_steps: 50, ..TraceOptions::default() };
        let request = FrameRequest { field_lines: false, magnetic_lines: false, ..FrameRequest::default() };
        let params = ScenarioParams::default().with_beta(0.8);
        for id in [ScenarioId::SingleCharge, ScenarioId::CurrentWire] {
            let data = SimulationState::new(id, params).compute_frame(&evaluator, &options, &request);
            assert_eq!(data.gamma, 1.0, "{id}");
        }
        let data = SimulationState::new(ScenarioId::Dipole, params).compute_frame(&evaluator, &options, &request);
        assert_relative_eq!(data.gamma, 5.0 / 3.0, epsilon = 1.0e-12);
    }

    #[test]
    fn single_charge_equipotential_is_flattened_when_moving() {
        let state = SimulationState::new(ScenarioId::MovingCharge, ScenarioParams::default()).with_beta(0.8);
        let request = FrameRequest { field_lines: false, equipotential_levels: vec![0.5], ..FrameRequest::default() };
        let data = state.compute_frame(&FieldEvaluator::default(), &TraceOptions::default(), &request);
        assert_eq!(data.equipotentials.len(), 1);
        match &data.equipotentials[0] {
            Equipotential::Ellipse(e) => {
                assert_relative_eq!(e.semi_axis_perpendicular, 2.0 * data.gamma, epsilon = 1.0e-12);
                assert_relative_eq!(e.semi_axis_parallel, 2.0, epsilon = 1.0e-12);
            }
            other => panic!("expected ellipse, got {other:?}"),
        }
    }

    #[cfg(feature = "serde")]
    #[test]
    fn session_and_request_survive_json() {
        let state = SimulationState::new(ScenarioId::LikeCharges, ScenarioParams::default())
            .with_offset(R2::new(0.5, -1.0))
            .with_beta(0.3);
        let json = serde_json::to_string(&state).unwrap();
        assert_eq!(serde_json::from_str::<SimulationState>(&json).unwrap(), state);

        let request = FrameRequest { heatmap: Some(GridQuantity::MagneticMagnitude), ..FrameRequest::default() };
        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(serde_json::from_str::<FrameRequest>(&json).unwrap(), request);
    }
}
