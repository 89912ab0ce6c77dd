//! Locomotion domain: capsule movement игрока
//!
//! Содержит:
//! - LocomotionController (ground/air velocity, jump buffer, coyote time)
//! - LocomotionInput (input snapshot на тик)
//! - Jumped / PlayerDied events
//!
//! Контроллер ничего не знает о Rapier: ground test и move primitive идут
//! через `CharacterBody`, события через outbox.

use bevy::prelude::*;

pub mod components;
pub mod controller;
pub mod events;
pub mod systems;


pub use components::*;
pub use controller::LocomotionController;
pub use events::{Jumped, PlayerDied};
pub use systems::*;

use crate::shared::KillRequest;
use crate::SimulationSet;

/// Locomotion Plugin
pub struct LocomotionPlugin;

impl Plugin for LocomotionPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<Jumped>()
            .add_event::<PlayerDied>()
            .add_event::<KillRequest>()
            .add_systems(
                FixedUpdate,
                (
                    initialize_locomotion.in_set(SimulationSet::Setup),
                    apply_locomotion_kills.in_set(SimulationSet::Intent),
                    advance_locomotion.in_set(SimulationSet::Advance),
                    flush_locomotion_events.in_set(SimulationSet::Flush),
                ),
            );
    }
}
