//! Chase AI systems (setup, kills, tick, event flush).

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::ai::{
    AttackEntered, ChaseBody, ChaseController, ChaseEvent, ChaseTarget, EnemyDied,
    MovementStarted, MovementStopped, TargetSnapshot,
};
use crate::error::{disable, Disabled, SetupError};
use crate::movement::NavAgent;
use crate::physics::RapierSpatialQuery;
use crate::shared::KillRequest;

/// Система: проверка коллабораторов при появлении ChaseController
///
/// - нет NavAgent → Disabled (MissingNavAgent)
/// - нет Rapier контекста → Disabled (MissingSpatialQuery)
/// - нет цели → только warning: враг стоит в Idle, пока цель не назначат
pub fn initialize_chasers(
    mut commands: Commands,
    query: Query<(Entity, &ChaseTarget, Has<NavAgent>), Added<ChaseController>>,
    rapier: ReadRapierContext,
) {
    let has_spatial_query = rapier.single().is_ok();

    for (entity, target, has_agent) in query.iter() {
        if !has_agent {
            disable(&mut commands, entity, SetupError::MissingNavAgent(entity));
            continue;
        }
        if !has_spatial_query {
            disable(&mut commands, entity, SetupError::MissingSpatialQuery);
            continue;
        }

        match target.entity {
            Some(target) => crate::log(&format!("Chaser {:?} tracks {:?}", entity, target)),
            None => crate::log_warning(&format!("Chaser {:?} has no target assigned", entity)),
        }
    }
}

/// Система: KillRequest → ChaseController::die
///
/// Агент останавливается вместе со state machine; у отключённой entity
/// агента может не быть, тогда только Died.
pub fn apply_chase_kills(
    mut kills: EventReader<KillRequest>,
    mut query: Query<(&mut ChaseController, Option<&mut NavAgent>)>,
) {
    for kill in kills.read() {
        let Ok((mut controller, agent)) = query.get_mut(kill.entity) else {
            continue;
        };

        let died = match agent {
            Some(mut agent) => controller.die(&mut *agent),
            None => controller.mark_dead(),
        };
        if died {
            crate::log_info(&format!("Enemy {:?} died", kill.entity));
        }
    }
}

/// Система: один тик chase state machine
///
/// Цель резолвится через Query::get: despawned цель = None (не видна,
/// дистанция бесконечна). Целью не может быть другой chaser.
pub fn advance_chasers(
    mut chasers: Query<
        (
            Entity,
            &mut ChaseController,
            &ChaseTarget,
            &mut NavAgent,
            &mut Transform,
        ),
        Without<Disabled>,
    >,
    targets: Query<&Transform, Without<ChaseController>>,
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

    for (entity, mut controller, chase_target, mut agent, mut transform) in chasers.iter_mut() {
        if !controller.is_alive() {
            continue;
        }

        let target = chase_target.entity.and_then(|target| {
            targets.get(target).ok().map(|target_transform| TargetSnapshot {
                entity: target,
                position: target_transform.translation,
            })
        });

        let mut body = ChaseBody {
            entity: Some(entity),
            position: transform.translation,
            rotation: transform.rotation,
        };

        let outcome = controller.advance(delta, &mut body, target, &probe, &mut *agent);
        transform.rotation = body.rotation;

        if let Some((from, to)) = outcome.transition {
            crate::log_info(&format!("Chaser {:?}: {:?} → {:?}", entity, from, to));
        }
    }
}

/// Система: outbox → Bevy events (порядок эмиссии сохраняется)
pub fn flush_chase_events(
    mut query: Query<(Entity, &mut ChaseController)>,
    mut attack_events: EventWriter<AttackEntered>,
    mut died_events: EventWriter<EnemyDied>,
    mut started_events: EventWriter<MovementStarted>,
    mut stopped_events: EventWriter<MovementStopped>,
) {
    for (entity, mut controller) in query.iter_mut() {
        if controller.pending_events().is_empty() {
            continue;
        }
        for event in controller.drain_events() {
            match event {
                ChaseEvent::AttackEntered => {
                    attack_events.write(AttackEntered { entity });
                }
                ChaseEvent::Died => {
                    died_events.write(EnemyDied { entity });
                }
                ChaseEvent::MovementStarted => {
                    started_events.write(MovementStarted { entity });
                }
                ChaseEvent::MovementStopped => {
                    stopped_events.write(MovementStopped { entity });
                }
            }
        }
    }
}
