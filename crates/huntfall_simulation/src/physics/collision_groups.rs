//! Collision groups: centralised constants для всего проекта.
//!
//! ## Слои (битовая маска, на каком слое объект):
//! - Layer 1 (0b1): Reserved
//! - Layer 2 (0b10): Actors (player, enemies)
//! - Layer 3 (0b100): Environment (walls, floors, obstacles)
//!
//! ## Маски запросов:
//! - LOS raycast: Actors + Environment (цель должна быть попадаемой)
//! - Camera probe: только Environment (актёры не выталкивают камеру)

use bevy_rapier3d::prelude::*;

pub const LAYER_ACTORS: u32 = 0b10;

pub const LAYER_ENVIRONMENT: u32 = 0b100;

/// Line-of-sight ray: видит актёров и упирается в окружение
pub const MASK_SIGHT: u32 = LAYER_ACTORS | LAYER_ENVIRONMENT;

/// Camera collision probe
pub const MASK_CAMERA: u32 = LAYER_ENVIRONMENT;

/// Actors collide with Actors + Environment
pub fn actor_groups() -> CollisionGroups {
    CollisionGroups::new(
        Group::from_bits_truncate(LAYER_ACTORS),
        Group::from_bits_truncate(LAYER_ACTORS | LAYER_ENVIRONMENT),
    )
}

/// Environment collides with everything
pub fn environment_groups() -> CollisionGroups {
    CollisionGroups::new(Group::from_bits_truncate(LAYER_ENVIRONMENT), Group::ALL)
}
