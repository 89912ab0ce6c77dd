//! Locomotion данные: tuning, runtime state, input snapshot.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Tuning персонажа игрока (load-time, не меняется в тике)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Reflect)]
#[serde(default)]
pub struct LocomotionConfig {
    /// m/s
    pub walk_speed: f32,
    /// m/s (с модификатором бега)
    pub run_speed: f32,
    /// m/s² на земле
    pub ground_acceleration: f32,
    /// m/s² в воздухе (слабый air control)
    pub air_acceleration: f32,
    /// Высота прыжка (метры) → v_y = sqrt(2·h·g)
    pub jump_height: f32,
    /// m/s², положительное число
    pub gravity: f32,
    /// Множитель гравитации на подъёме без удержания прыжка (short hop)
    pub fall_multiplier: f32,
    /// Grace window после схода с земли (сек)
    pub coyote_time: f32,
    /// Grace window для раннего нажатия прыжка (сек)
    pub jump_buffer: f32,
    /// Прижимающая скорость на земле (маленькая отрицательная)
    pub ground_stick_velocity: f32,
    /// Скорость доворота к направлению движения (rate × dt slerp)
    pub turn_rate: f32,
    /// Поворачивать тело по направлению движения
    pub rotate_to_move: bool,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            walk_speed: 5.0,
            run_speed: 8.0,
            ground_acceleration: 50.0,
            air_acceleration: 12.0,
            jump_height: 1.2,
            gravity: 9.81,
            fall_multiplier: 2.0,
            coyote_time: 0.12,
            jump_buffer: 0.12,
            ground_stick_velocity: -0.1,
            turn_rate: 12.0,
            rotate_to_move: true,
        }
    }
}

impl LocomotionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("locomotion.walk_speed", self.walk_speed),
            ("locomotion.run_speed", self.run_speed),
            ("locomotion.ground_acceleration", self.ground_acceleration),
            ("locomotion.air_acceleration", self.air_acceleration),
            ("locomotion.jump_height", self.jump_height),
            ("locomotion.gravity", self.gravity),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(ConfigError::invalid(field, format!("must be > 0, got {}", value)));
            }
        }

        let non_negative = [
            ("locomotion.coyote_time", self.coyote_time),
            ("locomotion.jump_buffer", self.jump_buffer),
            ("locomotion.turn_rate", self.turn_rate),
        ];
        for (field, value) in non_negative {
            if !(value >= 0.0) {
                return Err(ConfigError::invalid(field, format!("must be >= 0, got {}", value)));
            }
        }

        if !(self.fall_multiplier >= 1.0) {
            return Err(ConfigError::invalid(
                "locomotion.fall_multiplier",
                format!("must be >= 1, got {}", self.fall_multiplier),
            ));
        }
        if self.ground_stick_velocity > 0.0 {
            return Err(ConfigError::invalid(
                "locomotion.ground_stick_velocity",
                "must not point upwards",
            ));
        }
        Ok(())
    }
}

/// Runtime state контроллера
///
/// Пока `is_alive == false`, velocity и rotation не меняются.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct LocomotionState {
    pub velocity: Vec3,
    /// Остаток coyote окна (0 = истекло)
    pub grounded_timer: f32,
    /// Остаток jump buffer (0 = нет запроса)
    pub jump_buffer_timer: f32,
    /// Сырой ground test последнего тика
    pub grounded: bool,
    pub rotation: Quat,
    pub is_alive: bool,
}

impl Default for LocomotionState {
    fn default() -> Self {
        Self {
            velocity: Vec3::ZERO,
            grounded_timer: 0.0,
            jump_buffer_timer: 0.0,
            grounded: false,
            rotation: Quat::IDENTITY,
            is_alive: true,
        }
    }
}

/// Input snapshot на тик (пишется input слоем, читается locomotion)
///
/// `jump_requested`: press edge: advance система сбрасывает его после тика.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct LocomotionInput {
    /// x = вправо, y = вперёд; длина > 1 обрезается
    pub move_axis: Vec2,
    pub wants_run: bool,
    pub jump_requested: bool,
    pub jump_held: bool,
    /// Базис камеры (world space); вертикаль отбрасывается
    pub camera_forward: Vec3,
    pub camera_right: Vec3,
}

impl Default for LocomotionInput {
    fn default() -> Self {
        Self {
            move_axis: Vec2::ZERO,
            wants_run: false,
            jump_requested: false,
            jump_held: false,
            camera_forward: Vec3::NEG_Z,
            camera_right: Vec3::X,
        }
    }
}

/// Исходящие события контроллера (outbox)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocomotionEvent {
    Jumped,
    Died,
}

/// Результат одного тика
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LocomotionOutcome {
    /// Перемещение, переданное телу
    pub displacement: Vec3,
    pub jumped: bool,
}
