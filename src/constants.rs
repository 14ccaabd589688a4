//! Physical constants and the unit systems the field evaluator works in.
//!
//! ## Accuracy
//!
//! Constants marked "exact" have zero uncertainty by SI definition (2019 revision).
//! Measured constants (ε₀, μ₀) are provided with 11-12 significant figures.
//!
//! ## References
//!
//! - NIST Reference on Constants, Units, and Uncertainty: <https://physics.nist.gov/cuu/Constants/>
//! - CODATA 2018 values published May 20, 2019 (following 2019 SI redefinition)

use std::f64::consts::PI;

use crate::math::Scalar;

/// Vacuum permittivity ε₀ in farads per meter (F/m).
pub const VACUUM_PERMITTIVITY: f64 = 8.854_187_812_8e-12;
/// Vacuum permeability μ₀ in henries per meter (H/m).
pub const VACUUM_PERMEABILITY: f64 = 1.256_637_062_12e-6;
/// Speed of light in vacuum _c_ in meters per second (m/s).
/// Exact value by SI definition (2019): 299,792,458 m/s.
pub const SPEED_OF_LIGHT: f64 = 299_792_458.0;
/// Elementary charge _e_ in coulombs (C).
/// Exact value by 2019 SI definition: 1.602176634 × 10⁻¹⁹ C.
pub const ELEMENTARY_CHARGE: f64 = 1.602_176_634e-19;
/// Coulomb constant k = 1/(4πε₀) in N·m²/C².
/// Approximate value: 8.9875517923 × 10⁹ N·m²/C².
pub const COULOMB_CONSTANT: f64 = 8.987_551_792_3e9;

/// Largest speed (as a fraction of c) any charge or frame is allowed to reach.
pub const MAX_BETA: Scalar = 0.999;

/// Returns k = 1/(4πε₀) computed from the permittivity.
#[inline]
#[must_use]
pub fn coulomb_constant_from_permittivity(permittivity: Scalar) -> Scalar {
    1.0 / (4.0 * PI * permittivity)
}

/// Set of constants the evaluator uses to turn charges into fields.
///
/// Charges are always given in multiples of the elementary charge and
/// positions in the length unit of the chosen system.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldUnits {
    /// Coulomb constant k.
    pub coulomb_k: Scalar,
    /// Vacuum permeability μ₀.
    pub permeability: Scalar,
    /// Speed of light c.
    pub speed_of_light: Scalar,
    /// Size of one charge unit (the elementary charge) in this system.
    pub charge_unit: Scalar,
}

impl FieldUnits {
    /// Dimensionless simulation units: k = 1, c = 1, one charge unit = 1.
    ///
    /// μ₀ follows from μ₀ε₀c² = 1, i.e. μ₀ = 4πk/c².
    #[must_use]
    pub fn simulation() -> Self {
        Self {
            coulomb_k: 1.0,
            permeability: 4.0 * PI,
            speed_of_light: 1.0,
            charge_unit: 1.0,
        }
    }

    /// SI units: meters, coulombs, tesla, volts per meter.
    #[must_use]
    pub fn si() -> Self {
        Self {
            coulomb_k: coulomb_constant_from_permittivity(VACUUM_PERMITTIVITY),
            permeability: VACUUM_PERMEABILITY,
            speed_of_light: SPEED_OF_LIGHT,
            charge_unit: ELEMENTARY_CHARGE,
        }
    }
}

impl Default for FieldUnits {
    fn default() -> Self {
        Self::simulation()
    }
}
