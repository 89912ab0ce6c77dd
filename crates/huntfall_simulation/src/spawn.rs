//! Spawn helpers: игрок, враг, камера, стены
//!
//! Собирают контроллер + Rapier коллайдеры + collision groups в одну entity.
//! Tuning берётся из `AgentTuning` resource.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::ai::{ChaseController, ChaseTarget};
use crate::camera::{CameraRig, CameraTarget, OccludingRenderer};
use crate::config::AgentTuning;
use crate::locomotion::LocomotionController;
use crate::movement::{NavAgent, NavAgentConfig};
use crate::physics::{actor_groups, environment_groups};

/// Капсула актёра: высота 1.8м (0.5 + 0.5 + 2 × 0.4), радиус 0.4м
fn actor_collider() -> Collider {
    Collider::capsule_y(0.5, 0.4)
}

/// Игрок: LocomotionController + Rapier KinematicCharacterController
pub fn spawn_player(commands: &mut Commands, tuning: &AgentTuning, position: Vec3) -> Entity {
    commands
        .spawn((
            Transform::from_translation(position),
            LocomotionController::new(tuning.locomotion),
            // Rapier physics
            RigidBody::KinematicPositionBased,
            actor_collider(),
            KinematicCharacterController::default(),
            actor_groups(),
        ))
        .id()
}

/// Враг: ChaseController + NavAgent (двигает Transform напрямую)
pub fn spawn_enemy(
    commands: &mut Commands,
    tuning: &AgentTuning,
    position: Vec3,
    target: Option<Entity>,
) -> Entity {
    commands
        .spawn((
            Transform::from_translation(position),
            ChaseController::new(tuning.chase),
            ChaseTarget { entity: target },
            NavAgent::new(NavAgentConfig::default()),
            RigidBody::KinematicPositionBased,
            actor_collider(),
            actor_groups(),
        ))
        .id()
}

/// Камера, смотрящая на цель с дистанции max_distance сзади
///
/// Стартовая поза задаёт yaw/pitch/distance rig-а (см. sync_from_pose).
pub fn spawn_camera_rig(
    commands: &mut Commands,
    tuning: &AgentTuning,
    target: Entity,
    target_position: Vec3,
) -> Entity {
    let pivot = target_position + Vec3::Y * tuning.camera.orbit_height_offset;
    let position = pivot + Vec3::Z * tuning.camera.max_distance;

    commands
        .spawn((
            Transform::from_translation(position).looking_at(pivot, Vec3::Y),
            CameraRig::new(tuning.camera),
            CameraTarget::new(target),
        ))
        .id()
}

/// Точка глаз для first person (дочерняя entity)
pub fn attach_eye_anchor(commands: &mut Commands, body: Entity, height: f32) -> Entity {
    commands
        .spawn((Transform::from_xyz(0.0, height, 0.0), ChildOf(body)))
        .id()
}

/// Self-occluding часть тела (скрывается в first person)
pub fn attach_occluding_renderer(commands: &mut Commands, body: Entity) -> Entity {
    commands
        .spawn((
            Transform::default(),
            OccludingRenderer::default(),
            ChildOf(body),
        ))
        .id()
}

/// Статичная стена/пол (блокирует LOS и камеру)
pub fn spawn_wall(commands: &mut Commands, center: Vec3, half_extents: Vec3) -> Entity {
    commands
        .spawn((
            Transform::from_translation(center),
            RigidBody::Fixed,
            Collider::cuboid(half_extents.x, half_extents.y, half_extents.z),
            environment_groups(),
        ))
        .id()
}
