//! Chase AI components (config, state machine mode, target handle).

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::physics::MASK_SIGHT;

/// Параметры восприятия и преследования
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Reflect)]
#[serde(default)]
pub struct ChaseConfig {
    /// Дальность обнаружения (метры)
    pub detect_radius: f32,
    /// Полный угол конуса зрения (градусы)
    pub fov_degrees: f32,
    /// Сколько секунд помним цель после потери LOS
    pub lose_sight_time: f32,
    /// Дистанция атаки (к ней добавляется stopping_distance агента)
    pub attack_range: f32,
    /// Период обновления destination во время погони
    pub repath_interval: f32,
    /// Скорость доворота к цели в Attacking
    pub face_target_speed: f32,
    /// Высота глаз над позицией врага
    pub eye_height: f32,
    /// Высота точки прицеливания над позицией цели
    pub target_aim_height: f32,
    /// Порог planar speed для MovementStarted/Stopped
    pub movement_threshold: f32,
    /// Маска слоёв для LOS луча
    pub sight_groups: u32,
}

impl Default for ChaseConfig {
    fn default() -> Self {
        Self {
            detect_radius: 12.0,
            fov_degrees: 120.0,
            lose_sight_time: 2.0,
            attack_range: 1.8,
            repath_interval: 0.1,
            face_target_speed: 10.0,
            eye_height: 1.6,
            target_aim_height: 1.2,
            movement_threshold: 0.05,
            sight_groups: MASK_SIGHT,
        }
    }
}

impl ChaseConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.detect_radius > 0.0) {
            return Err(ConfigError::invalid(
                "chase.detect_radius",
                format!("must be > 0, got {}", self.detect_radius),
            ));
        }
        if !(self.fov_degrees > 0.0 && self.fov_degrees <= 360.0) {
            return Err(ConfigError::invalid(
                "chase.fov_degrees",
                format!("must be in (0, 360], got {}", self.fov_degrees),
            ));
        }
        let non_negative = [
            ("chase.lose_sight_time", self.lose_sight_time),
            ("chase.attack_range", self.attack_range),
            ("chase.repath_interval", self.repath_interval),
            ("chase.face_target_speed", self.face_target_speed),
            ("chase.movement_threshold", self.movement_threshold),
        ];
        for (field, value) in non_negative {
            if !(value >= 0.0) {
                return Err(ConfigError::invalid(field, format!("must be >= 0, got {}", value)));
            }
        }
        Ok(())
    }
}

/// Состояния chase state machine
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
pub enum ChaseMode {
    /// Цель не видна (или забыта)
    #[default]
    Idle,
    /// Едем к цели, destination обновляется каждые repath_interval
    Chasing,
    /// В зоне атаки: стоим, смотрим на цель
    Attacking,
}

/// Runtime state chase state machine
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct ChaseState {
    pub mode: ChaseMode,
    /// Накопленное время тиков ("now")
    pub clock: f32,
    /// Когда цель была видна последний раз (-inf = никогда)
    pub last_seen_time: f32,
    pub repath_timer: f32,
    /// Edge detector для MovementStarted/Stopped
    pub was_moving: bool,
    /// Planar speed агента последнего тика
    pub movement_speed: f32,
    pub rotation: Quat,
    pub is_alive: bool,
}

impl Default for ChaseState {
    fn default() -> Self {
        Self {
            mode: ChaseMode::Idle,
            clock: 0.0,
            last_seen_time: f32::NEG_INFINITY,
            repath_timer: 0.0,
            was_moving: false,
            movement_speed: 0.0,
            rotation: Quat::IDENTITY,
            is_alive: true,
        }
    }
}

/// Исходящие события (outbox)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChaseEvent {
    AttackEntered,
    Died,
    MovementStarted,
    MovementStopped,
}

/// Слабая ссылка на цель: entity может исчезнуть в любой момент
///
/// Резолвится каждый тик через Query::get → Option<TargetSnapshot>.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct ChaseTarget {
    pub entity: Option<Entity>,
}

impl ChaseTarget {
    pub fn new(entity: Entity) -> Self {
        Self {
            entity: Some(entity),
        }
    }
}

/// Цель, разрешённая на этот тик
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetSnapshot {
    pub entity: Entity,
    pub position: Vec3,
}

/// Тело врага на этот тик; rotation меняется при доводке на цель
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChaseBody {
    /// Собственный collider (исключается из LOS)
    pub entity: Option<Entity>,
    pub position: Vec3,
    pub rotation: Quat,
}

impl ChaseBody {
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }
}

/// Результат тика
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ChaseOutcome {
    pub can_see: bool,
    /// (from, to) если состояние сменилось
    pub transition: Option<(ChaseMode, ChaseMode)>,
}
