use em_relativity::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    // Dipole moving at 0.6c; field lines bunch up across the direction of motion.
    let state = SimulationState::new(ScenarioId::Dipole, ScenarioParams::default()).with_beta(0.6);
    let request = FrameRequest { equipotential_levels: vec![0.5, 1.0], ..FrameRequest::default() };
    let frame = state.compute_frame(&FieldEvaluator::default(), &TraceOptions::default(), &request);

    eprintln!("{} (gamma = {:.4})", state.description().title, frame.gamma);
    println!("kind, line, x, y");
    for (i, line) in frame.field_lines.iter().enumerate() {
        for p in &line.points {
            println!("field, {i}, {:.6}, {:.6}", p.x, p.y);
        }
    }
    for (i, contour) in frame.equipotentials.iter().enumerate() {
        for p in &contour.to_polyline(96).points {
            println!("equipotential, {i}, {:.6}, {:.6}", p.x, p.y);
        }
    }
}
