//! AI decision-making module
//!
//! Perception-driven chase: враг видит цель (радиус + FOV + LOS луч),
//! преследует через PathfindingAgent, в зоне атаки стоит и доворачивается.

use bevy::prelude::*;

pub mod components;
pub mod controller;
pub mod events;
pub mod perception;
pub mod systems;


// Re-export основных типов
pub use components::*;
pub use controller::ChaseController;
pub use events::*;
pub use perception::can_see_target;
pub use systems::*;

use crate::shared::KillRequest;
use crate::SimulationSet;

/// AI Plugin
///
/// Регистрирует AI системы в FixedUpdate для детерминизма.
/// Порядок выполнения (через SimulationSet):
/// 1. initialize_chasers: проверка NavAgent/Rapier (Setup)
/// 2. apply_chase_kills: KillRequest → die (Intent)
/// 3. advance_chasers: perception + переходы + команды агенту (Advance)
/// 4. flush_chase_events: outbox → Bevy events (Flush)
pub struct AIPlugin;

impl Plugin for AIPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<AttackEntered>()
            .add_event::<EnemyDied>()
            .add_event::<MovementStarted>()
            .add_event::<MovementStopped>()
            .add_event::<KillRequest>()
            .add_systems(
                FixedUpdate,
                (
                    initialize_chasers.in_set(SimulationSet::Setup),
                    apply_chase_kills.in_set(SimulationSet::Intent),
                    advance_chasers.in_set(SimulationSet::Advance),
                    flush_chase_events.in_set(SimulationSet::Flush),
                ),
            );
    }
}
