//! Movement domain: pathfinding agent
//!
//! Содержит:
//! - PathfindingAgent (трейт коллаборатора: destination, reset, stop, velocity)
//! - NavAgent (Bevy компонент: прямолинейный steering agent)
//! - steer_nav_agents (velocity → Transform, поворот по направлению движения)
//!
//! Chase state machine командует агентом только через трейт, поэтому
//! navmesh-сервис можно подставить не трогая ai домен.

use bevy::prelude::*;

pub mod navigation;


pub use navigation::*;

use crate::SimulationSet;

/// Navigation Plugin
///
/// Регистрирует steering в FixedUpdate после решений AI.
pub struct NavigationPlugin;

impl Plugin for NavigationPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            navigation::steer_nav_agents.in_set(SimulationSet::Navigation),
        );
    }
}
