//! Pairwise force kernel.

use glam::Vec2;

/// Squared distance substituted for coincident particles.
pub const COINCIDENT_DIST_SQ: f32 = 1e-6;

/// Force on a particle at `delta = position[a] - position[b]` from its neighbour `b`.
///
/// Only neighbours strictly closer than `radius` contribute. The force points
/// along `delta`, so a positive `coefficient` pushes `a` away from `b` and a
/// negative one pulls it towards `b`. Coincident particles get no direction and
/// therefore no force.
#[inline]
pub fn pair_force(delta: Vec2, radius: f32, coefficient: f32, force_scale: f32) -> Vec2 {
    let mut dist_sq = delta.length_squared();
    if dist_sq == 0.0 {
        dist_sq = COINCIDENT_DIST_SQ;
    }

    let distance = dist_sq.sqrt();
    if distance >= radius {
        return Vec2::ZERO;
    }

    // distance is at least 1e-3 here; a zero delta yields a zero direction
    let direction = delta / distance;
    direction * (coefficient * force_scale)
}
