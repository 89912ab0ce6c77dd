//! Locomotion ECS systems

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::components::{LocomotionEvent, LocomotionInput};
use super::controller::LocomotionController;
use super::events::{Jumped, PlayerDied};
use crate::error::{disable, Disabled, SetupError};
use crate::physics::RapierCharacterBody;
use crate::shared::KillRequest;

/// Система: проверка коллабораторов при появлении контроллера
///
/// - нет KinematicCharacterController → Disabled (MissingCharacterBody)
/// - нет Rapier контекста → Disabled (MissingSpatialQuery): KCC некому применять
pub fn initialize_locomotion(
    mut commands: Commands,
    mut query: Query<
        (
            Entity,
            &mut LocomotionController,
            &Transform,
            Has<KinematicCharacterController>,
        ),
        Added<LocomotionController>,
    >,
    rapier: ReadRapierContext,
) {
    let has_physics = rapier.single().is_ok();

    for (entity, mut controller, transform, has_body) in query.iter_mut() {
        if !has_body {
            disable(&mut commands, entity, SetupError::MissingCharacterBody(entity));
            continue;
        }
        if !has_physics {
            disable(&mut commands, entity, SetupError::MissingSpatialQuery);
            continue;
        }

        controller.sync_rotation(transform.rotation);
        crate::log(&format!("Locomotion ready: {:?}", entity));
    }
}

/// Система: KillRequest → LocomotionController::die
pub fn apply_locomotion_kills(
    mut kills: EventReader<KillRequest>,
    mut query: Query<&mut LocomotionController>,
) {
    for kill in kills.read() {
        let Ok(mut controller) = query.get_mut(kill.entity) else {
            continue;
        };
        if controller.die() {
            crate::log_info(&format!("Player {:?} died", kill.entity));
        }
    }
}

/// Система: один тик locomotion для каждого живого персонажа
///
/// Rotation синхронизируется с Transform до тика (камера могла повернуть
/// тело), результат пишется обратно. Translation уходит в Rapier KCC.
pub fn advance_locomotion(
    mut query: Query<
        (
            Entity,
            &mut LocomotionController,
            &mut LocomotionInput,
            &mut KinematicCharacterController,
            Option<&KinematicCharacterControllerOutput>,
            &mut Transform,
        ),
        Without<Disabled>,
    >,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (entity, mut controller, mut input, mut character, output, mut transform) in
        query.iter_mut()
    {
        if !controller.is_alive() {
            // Мёртвое тело не двигается
            character.translation = None;
            continue;
        }

        controller.sync_rotation(transform.rotation);

        let mut body = RapierCharacterBody::new(&mut character, output);
        let outcome = controller.advance(&input, delta, &mut body);
        transform.rotation = controller.rotation();

        if outcome.jumped {
            crate::log(&format!(
                "{:?} jumped (v_y = {:.2})",
                entity,
                controller.jump_velocity()
            ));
        }

        // Press edge обработан
        input.jump_requested = false;
    }
}

/// Система: outbox → Bevy events (порядок эмиссии сохраняется)
pub fn flush_locomotion_events(
    mut query: Query<(Entity, &mut LocomotionController)>,
    mut jumped_events: EventWriter<Jumped>,
    mut died_events: EventWriter<PlayerDied>,
) {
    for (entity, mut controller) in query.iter_mut() {
        if controller.pending_events().is_empty() {
            continue;
        }
        for event in controller.drain_events() {
            match event {
                LocomotionEvent::Jumped => {
                    jumped_events.write(Jumped { entity });
                }
                LocomotionEvent::Died => {
                    died_events.write(PlayerDied { entity });
                }
            }
        }
    }
}
