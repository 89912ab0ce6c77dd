//! Steering math shared by locomotion, camera and chase.
//!
//! Coordinate conventions (Bevy): Y up, -Z forward.

use bevy::prelude::*;

/// Направления короче этого считаются нулевыми (squared length)
pub const DIRECTION_EPSILON_SQ: f32 = 1e-4;

/// Drop the vertical component.
pub fn planar(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}

/// Move `current` toward `target` by at most `max_delta`, never past it.
pub fn move_towards(current: Vec3, target: Vec3, max_delta: f32) -> Vec3 {
    let delta = target - current;
    let distance = delta.length();
    if distance <= max_delta || distance <= f32::EPSILON {
        target
    } else {
        current + delta / distance * max_delta
    }
}

/// Yaw-only rotation whose forward (-Z) points along the planar part of `direction`.
///
/// Returns `None` for (near-)vertical or zero directions.
pub fn yaw_toward(direction: Vec3) -> Option<Quat> {
    let flat = planar(direction);
    if flat.length_squared() < DIRECTION_EPSILON_SQ {
        return None;
    }
    Some(Quat::from_rotation_y(f32::atan2(-flat.x, -flat.z)))
}

/// Frame-rate independent exponential smoothing factor `1 - e^(-dt/tau)`.
pub fn smoothing_factor(dt: f32, tau: f32) -> f32 {
    1.0 - (-dt / tau.max(1e-4)).exp()
}

/// Interpolation factor for "rate × dt" slerps, clamped to [0, 1].
pub fn slerp_factor(rate: f32, dt: f32) -> f32 {
    (rate * dt).clamp(0.0, 1.0)
}

/// Angle between two directions in degrees; zero when either is degenerate.
pub fn angle_between_degrees(a: Vec3, b: Vec3) -> f32 {
    if a.length_squared() < f32::EPSILON || b.length_squared() < f32::EPSILON {
        return 0.0;
    }
    a.angle_between(b).to_degrees()
}
