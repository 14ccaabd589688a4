#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![warn(clippy::all, clippy::cargo, clippy::nursery, missing_docs)]
#![doc = include_str!("../README.md")]

/// Physical constants and unit systems.
pub mod constants;
/// Shared vector aliases and finiteness helpers.
pub mod math;
/// Electric and magnetic fields of point charges and wires.
pub mod fields;
/// Field line tracing and equipotential contours.
pub mod streamlines;
/// Special-relativity kinematics in one space dimension.
pub mod lorentz;
/// Named charge arrangements.
pub mod scenarios;
/// Regular-grid sampling and parameter sweeps.
pub mod grid;
/// Immutable session state and per-frame computation.
pub mod simulation;
/// Error types shared across modules.
pub mod errors;

/// Common exports for downstream crates.
pub mod prelude;
