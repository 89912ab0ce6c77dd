//! Line-of-sight perception (radius → FOV cone → raycast).

use bevy::prelude::*;

use super::components::{ChaseBody, ChaseConfig, TargetSnapshot};
use crate::physics::{ProbeFilter, SpatialQuery};
use crate::shared::angle_between_degrees;

/// Видит ли враг цель в этот тик
///
/// Проверки по порядку (дешёвые первыми):
/// 1. цель есть и в пределах detect_radius
/// 2. угол между forward и направлением на цель ≤ fov/2
/// 3. луч от глаз к точке прицеливания: пусто, попал в цель/её потомка
///    или препятствие дальше точки прицеливания
pub fn can_see_target(
    config: &ChaseConfig,
    body: &ChaseBody,
    target: Option<&TargetSnapshot>,
    probe: &impl SpatialQuery,
) -> bool {
    let Some(target) = target else {
        return false;
    };

    let to_target = target.position - body.position;
    if to_target.length_squared() > config.detect_radius * config.detect_radius {
        return false;
    }

    if angle_between_degrees(body.forward(), to_target) > config.fov_degrees * 0.5 {
        return false;
    }

    let eye = body.position + Vec3::Y * config.eye_height;
    let aim = target.position + Vec3::Y * config.target_aim_height;
    let Some(direction) = (aim - eye).try_normalize() else {
        // Глаза совпали с точкой прицеливания: закрывать нечему
        return true;
    };
    let aim_distance = eye.distance(aim);

    let filter = ProbeFilter::new(config.sight_groups).excluding(body.entity);
    match probe.cast_ray(eye, direction, config.detect_radius, filter) {
        // Стена за целью (у цели без коллайдера) обзор не закрывает
        Some(hit) if hit.distance > aim_distance => true,
        Some(hit) => probe.belongs_to(hit.entity, target.entity),
        None => true,
    }
}
