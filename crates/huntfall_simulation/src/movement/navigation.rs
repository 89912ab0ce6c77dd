//! Pathfinding agent: трейт + прямолинейная реализация.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::Disabled;
use crate::shared::{move_towards, planar, slerp_factor, yaw_toward};

/// Команды и чтения pathfinding агента
///
/// Семантика как у navmesh агента:
/// - `set_destination`: новый путь к точке
/// - `reset_path`: очистить путь (агент тормозит)
/// - `stop(true)`: заморозить агента, `stop(false)`: разморозить
pub trait PathfindingAgent {
    fn set_destination(&mut self, point: Vec3);
    fn reset_path(&mut self);
    fn stop(&mut self, stopped: bool);
    fn velocity(&self) -> Vec3;
    fn stopping_distance(&self) -> f32;
}

/// Параметры агента
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Reflect)]
#[serde(default)]
pub struct NavAgentConfig {
    /// Максимальная скорость (m/s)
    pub speed: f32,
    /// Ускорение/торможение (m/s²)
    pub acceleration: f32,
    /// Скорость поворота по направлению движения (rate × dt slerp)
    pub angular_speed: f32,
    /// Дистанция прибытия (метры)
    pub stopping_distance: f32,
}

impl Default for NavAgentConfig {
    fn default() -> Self {
        Self {
            speed: 3.5,
            acceleration: 8.0,
            angular_speed: 10.0,
            stopping_distance: 0.5,
        }
    }
}

/// Прямолинейный agent (без navmesh)
///
/// Едет к destination по прямой в XZ, тормозит внутри stopping_distance.
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
pub struct NavAgent {
    pub config: NavAgentConfig,
    pub destination: Option<Vec3>,
    pub is_stopped: bool,
    pub velocity: Vec3,
}

impl NavAgent {
    pub fn new(config: NavAgentConfig) -> Self {
        Self {
            config,
            ..default()
        }
    }

    pub fn has_path(&self) -> bool {
        self.destination.is_some()
    }

    /// Один шаг steering: обновить velocity, вернуть перемещение за `dt`
    pub fn steer(&mut self, position: Vec3, dt: f32) -> Vec3 {
        if self.is_stopped {
            self.velocity = Vec3::ZERO;
            return Vec3::ZERO;
        }

        let desired = match self.destination {
            Some(destination) => {
                let to_destination = planar(destination - position);
                if to_destination.length() <= self.config.stopping_distance {
                    Vec3::ZERO
                } else {
                    to_destination.normalize_or_zero() * self.config.speed
                }
            }
            None => Vec3::ZERO,
        };

        self.velocity = move_towards(self.velocity, desired, self.config.acceleration * dt);
        self.velocity * dt
    }
}

impl PathfindingAgent for NavAgent {
    fn set_destination(&mut self, point: Vec3) {
        self.destination = Some(point);
    }

    fn reset_path(&mut self) {
        self.destination = None;
    }

    fn stop(&mut self, stopped: bool) {
        self.is_stopped = stopped;
        if stopped {
            self.velocity = Vec3::ZERO;
        }
    }

    fn velocity(&self) -> Vec3 {
        self.velocity
    }

    fn stopping_distance(&self) -> f32 {
        self.config.stopping_distance
    }
}

/// Система: NavAgent velocity → Transform
///
/// Пока у агента есть путь, тело поворачивается по направлению движения.
/// Без пути (Attacking, Idle) поворотом владеет AI.
pub fn steer_nav_agents(
    mut query: Query<(&mut NavAgent, &mut Transform), Without<Disabled>>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (mut agent, mut transform) in query.iter_mut() {
        let displacement = agent.steer(transform.translation, delta);
        transform.translation += displacement;

        if !agent.has_path() {
            continue;
        }
        if let Some(facing) = yaw_toward(agent.velocity) {
            let factor = slerp_factor(agent.config.angular_speed, delta);
            transform.rotation = transform.rotation.slerp(facing, factor);
        }
    }
}
