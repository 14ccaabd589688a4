//! Coarse field sampling on a regular grid (heatmaps) and sweep helpers.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::fields::{ChargeConfiguration, FieldEvaluator};
use crate::math::{R2, Scalar};
use crate::streamlines::Bounds;

/// Generates `n` linearly spaced samples in [start, stop].
#[must_use]
pub fn linspace(start: Scalar, stop: Scalar, n: usize) -> Vec<Scalar> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n as Scalar - 1.0);
            (0..n).map(|i| start + step * i as Scalar).collect()
        }
    }
}

/// Applies `f` to each parameter value (e.g. a β sweep) and collects results.
#[must_use]
pub fn sweep_map<I, F, T>(values: I, f: F) -> Vec<T>
where
    I: IntoIterator<Item = Scalar>,
    F: FnMut(Scalar) -> T,
{
    values.into_iter().map(f).collect()
}

/// Scalar shown by a heatmap cell.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GridQuantity {
    /// |E|.
    #[default]
    ElectricMagnitude,
    /// |B| including the out-of-plane component.
    MagneticMagnitude,
    /// φ.
    Potential,
}

/// Row-major samples of one quantity over a rectangle.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct FieldGrid {
    /// Sampled rectangle; samples include its edges.
    pub bounds: Bounds,
    /// Samples per row.
    pub nx: usize,
    /// Number of rows.
    pub ny: usize,
    /// Quantity held in `values`.
    pub quantity: GridQuantity,
    /// `nx * ny` values, row `iy` starting at `iy * nx`.
    pub values: Vec<Scalar>,
}

impl FieldGrid {
    /// Samples `quantity` on an `nx` × `ny` lattice spanning `bounds`.
    ///
    /// With the `parallel` feature the cells are spread across rayon workers,
    /// all reading the same immutable configuration.
    #[must_use]
    pub fn sample(
        evaluator: &FieldEvaluator,
        sources: &ChargeConfiguration,
        bounds: Bounds,
        nx: usize,
        ny: usize,
        quantity: GridQuantity,
    ) -> Self {
        let xs = linspace(bounds.min.x, bounds.max.x, nx);
        let ys = linspace(bounds.min.y, bounds.max.y, ny);
        let cell = |i: usize| {
            let p = R2::new(xs[i % nx], ys[i / nx]);
            match quantity {
                GridQuantity::ElectricMagnitude => evaluator.electric(p, sources).norm(),
                GridQuantity::MagneticMagnitude => evaluator.magnetic(p, sources).norm(),
                GridQuantity::Potential => evaluator.potential(p, sources),
            }
        };

        #[cfg(feature = "parallel")]
        let values: Vec<Scalar> = (0..nx * ny).into_par_iter().map(cell).collect();
        #[cfg(not(feature = "parallel"))]
        let values: Vec<Scalar> = (0..nx * ny).map(cell).collect();

        Self { bounds, nx, ny, quantity, values }
    }

    /// Position of cell (`ix`, `iy`).
    #[must_use]
    pub fn point(&self, ix: usize, iy: usize) -> R2 {
        let fx = if self.nx > 1 { ix as Scalar / (self.nx - 1) as Scalar } else { 0.0 };
        let fy = if self.ny > 1 { iy as Scalar / (self.ny - 1) as Scalar } else { 0.0 };
        R2::new(
            self.bounds.min.x + fx * self.bounds.width(),
            self.bounds.min.y + fy * self.bounds.height(),
        )
    }

    /// Value of cell (`ix`, `iy`), if inside the grid.
    #[must_use]
    pub fn value(&self, ix: usize, iy: usize) -> Option<Scalar> {
        (ix < self.nx && iy < self.ny).then(|| self.values[iy * self.nx + ix])
    }

    /// Largest absolute value, useful for normalising a colour scale.
    #[must_use]
    pub fn max_abs(&self) -> Scalar {
        self.values.iter().fold(0.0, |m, v| m.max(v.abs()))
    }
}
