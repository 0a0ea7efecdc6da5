//! Vector helpers that glam does not provide in the form the
//! scattering code needs.

use crate::Vec3;

/// Per-component magnitude under which a vector counts as zero.
pub const NEAR_ZERO_EPSILON: f64 = 1e-8;

/// True if every component is within [`NEAR_ZERO_EPSILON`] of zero.
#[inline]
pub fn near_zero(v: Vec3) -> bool {
    v.abs().max_element() < NEAR_ZERO_EPSILON
}

/// Normalize `v`, or `None` when it is near zero or not finite.
///
/// Callers must decide what a degenerate direction means for them; a
/// plain `normalize()` would hand back NaN instead.
#[inline]
pub fn try_unit_vector(v: Vec3) -> Option<Vec3> {
    if near_zero(v) {
        return None;
    }
    v.try_normalize()
}

/// Reflect `v` about the normal `n`: `v - 2*dot(v,n)*n`.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract the unit vector `uv` through a surface with unit normal `n`.
///
/// Splits the outgoing ray into components perpendicular and parallel to
/// `n`. Total internal reflection is not detected here; the caller checks
/// `etai_over_etat * sin_theta > 1` first.
#[inline]
pub fn refract(uv: Vec3, n: Vec3, etai_over_etat: f64) -> Vec3 {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}
