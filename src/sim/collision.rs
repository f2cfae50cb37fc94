//! Collision detection and response for circular bodies

use glam::Vec2;

/// Elastic response between two overlapping circles, radius standing in for mass.
///
/// impulse = 2 * (v_rel · n) / (r_a + r_b)
/// v_a -= impulse * r_b * n
/// v_b += impulse * r_a * n
///
/// Only approaching pairs are resolved; afterwards the normal component of the
/// relative velocity is exactly mirrored, so the pair is separating. Pairs with
/// coincident centers have no normal and are left alone. Returns whether the
/// velocities changed.
pub fn resolve_elastic(
    pos_a: Vec2,
    vel_a: &mut Vec2,
    radius_a: f32,
    pos_b: Vec2,
    vel_b: &mut Vec2,
    radius_b: f32,
) -> bool {
    let delta = pos_a - pos_b;
    let distance = delta.length();
    if distance >= radius_a + radius_b || distance <= f32::EPSILON {
        return false;
    }

    let normal = delta / distance;
    let dot = (*vel_a - *vel_b).dot(normal);
    if dot >= 0.0 {
        // Already separating
        return false;
    }

    let impulse = 2.0 * dot / (radius_a + radius_b);
    *vel_a -= impulse * radius_b * normal;
    *vel_b += impulse * radius_a * normal;

    true
}
