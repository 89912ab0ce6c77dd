//! Camera ECS systems

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::components::*;
use super::rig::CameraRig;
use crate::error::{disable, Disabled, SetupError};
use crate::locomotion::LocomotionController;
use crate::physics::RapierSpatialQuery;

/// RendererToggle: запоминает запрошенную видимость до конца тика
///
/// Система применяет её к `CameraTarget::renderers` после `advance`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PendingVisibility(pub Option<bool>);

impl RendererToggle for PendingVisibility {
    fn set_visible(&mut self, visible: bool) {
        self.0 = Some(visible);
    }
}

/// Система: инициализация rig из текущей позы камеры
///
/// Setup ошибки:
/// - цель не существует → MissingCameraTarget
/// - нет Rapier контекста → MissingSpatialQuery
pub fn initialize_camera_rigs(
    mut commands: Commands,
    mut rigs: Query<(Entity, &mut CameraRig, &CameraTarget, &Transform), Added<CameraRig>>,
    targets: Query<&Transform, Without<CameraRig>>,
    rapier: ReadRapierContext,
) {
    let has_spatial_query = rapier.single().is_ok();

    for (entity, mut rig, target, transform) in rigs.iter_mut() {
        let Ok(target_transform) = targets.get(target.entity) else {
            disable(
                &mut commands,
                entity,
                SetupError::MissingCameraTarget {
                    rig: entity,
                    target: target.entity,
                },
            );
            continue;
        };
        if !has_spatial_query {
            disable(&mut commands, entity, SetupError::MissingSpatialQuery);
            continue;
        }

        rig.sync_from_pose(
            transform.translation,
            transform.rotation,
            target_transform.translation,
        );
        crate::log(&format!(
            "Camera rig {:?} → {:?} (distance {:.2}, yaw {:.1}°, pitch {:.1}°)",
            entity,
            target.entity,
            rig.state.target_distance,
            rig.state.yaw,
            rig.state.pitch
        ));
    }
}

/// Система: один тик камеры
///
/// Пишет позу в Transform камеры; в first person доворачивает тело цели.
/// Мёртвое тело (LocomotionController::is_alive == false) не поворачивается.
pub fn advance_camera_rigs(
    mut rigs: Query<
        (Entity, &mut CameraRig, &mut CameraInput, &CameraTarget, &mut Transform),
        Without<Disabled>,
    >,
    mut bodies: Query<(&mut Transform, Option<&LocomotionController>), Without<CameraRig>>,
    anchors: Query<&GlobalTransform>,
    mut renderers: Query<&mut OccludingRenderer>,
    parents: Query<&ChildOf>,
    rapier: ReadRapierContext,
    time: Res<Time<Fixed>>,
) {
    let Ok(context) = rapier.single() else {
        return;
    };
    let parent_of = |entity: Entity| parents.get(entity).ok().map(ChildOf::parent);
    let probe = RapierSpatialQuery::new(&context, &parent_of);
    let delta = time.delta_secs();

    for (entity, mut rig, mut input, target, mut transform) in rigs.iter_mut() {
        // Цель могла быть удалена после инициализации
        let Ok((mut body, locomotion)) = bodies.get_mut(target.entity) else {
            continue;
        };

        let frame = CameraFrame {
            target_entity: Some(target.entity),
            target_position: body.translation,
            target_rotation: body.rotation,
            eye_anchor: target
                .eye_anchor
                .and_then(|anchor| anchors.get(anchor).ok())
                .map(GlobalTransform::translation),
        };

        let mut visibility = PendingVisibility::default();
        let outcome = rig.advance(&input, delta, &frame, &probe, &mut visibility);

        if let PendingVisibility(Some(visible)) = visibility {
            // Удалённые рендереры просто пропускаем
            for &renderer in &target.renderers {
                if let Ok(mut occluding) = renderers.get_mut(renderer) {
                    occluding.visible = visible;
                }
            }
        }

        let body_alive = locomotion.is_none_or(LocomotionController::is_alive);
        if let Some(rotation) = outcome.body_rotation.filter(|_| body_alive) {
            body.rotation = rotation;
        }
        transform.translation = rig.state.position;
        transform.rotation = rig.state.rotation;

        if outcome.mode_changed {
            crate::log_info(&format!("Camera {:?} → {:?}", entity, rig.mode()));
        }

        input.mouse_delta = Vec2::ZERO;
        input.scroll_delta = 0.0;
    }
}
