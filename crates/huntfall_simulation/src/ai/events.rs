//! AI Events: сигналы chase state machine наружу
//!
//! Каждое событие fire-once и несёт только entity врага.
//! Потребители: анимация (Attack/Death триггеры, footsteps), combat resolution.

use bevy::prelude::*;

/// Враг вошёл в зону атаки (один раз на вход в Attacking)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackEntered {
    pub entity: Entity,
}

/// Враг умер
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnemyDied {
    pub entity: Entity,
}

/// Planar speed агента поднялась выше movement_threshold
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovementStarted {
    pub entity: Entity,
}

/// Planar speed агента опустилась до movement_threshold
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MovementStopped {
    pub entity: Entity,
}
