//! Locomotion events (Bevy side)

use bevy::prelude::*;

/// Event: игрок оттолкнулся от земли (audio/animation hook)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Jumped {
    pub entity: Entity,
}

/// Event: игрок умер (один раз на entity)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerDied {
    pub entity: Entity,
}
