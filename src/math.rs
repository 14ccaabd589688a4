//! Shared numerical primitives anchored on `nalgebra`.

use nalgebra::{Vector2, Vector3};

/// Primary scalar type used across the crate.
pub type Scalar = f64;
/// Convenient alias for two-dimensional real vectors (the simulation plane).
pub type R2 = Vector2<Scalar>;
/// Convenient alias for three-dimensional real vectors.
pub type R3 = Vector3<Scalar>;

/// Returns the unit vector along `v`, or the zero vector when `v` has no length.
#[inline]
#[must_use]
pub fn normalize_or_zero(v: R2) -> R2 {
    let n = v.norm();
    if n > 0.0 && n.is_finite() {
        v / n
    } else {
        R2::zeros()
    }
}

/// Out-of-plane (z) component of the cross product `a × b` of two in-plane vectors.
#[inline]
#[must_use]
pub fn cross_z(a: R2, b: R2) -> Scalar {
    a.x * b.y - a.y * b.x
}

/// Rotates `v` by +90° in the plane.
#[inline]
#[must_use]
pub fn perpendicular(v: R2) -> R2 {
    R2::new(-v.y, v.x)
}

/// True when both components are finite.
#[inline]
#[must_use]
pub fn is_finite2(v: &R2) -> bool {
    v.x.is_finite() && v.y.is_finite()
}

/// Replaces a vector containing NaN or ±∞ with zero.
#[inline]
#[must_use]
pub fn finite_or_zero2(v: R2) -> R2 {
    if is_finite2(&v) { v } else { R2::zeros() }
}

/// Replaces a vector containing NaN or ±∞ with zero.
#[inline]
#[must_use]
pub fn finite_or_zero3(v: R3) -> R3 {
    if v.iter().all(|c| c.is_finite()) { v } else { R3::zeros() }
}
