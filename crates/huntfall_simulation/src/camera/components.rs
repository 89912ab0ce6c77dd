//! Camera rig данные: tuning, state, input, привязка к цели.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::physics::MASK_CAMERA;

/// Режим камеры (pure function от target_distance)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Reflect)]
pub enum CameraMode {
    #[default]
    ThirdPerson,
    FirstPerson,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Reflect)]
#[serde(default)]
pub struct CameraConfig {
    pub min_distance: f32,
    pub max_distance: f32,
    /// target_distance <= threshold → first person
    pub first_person_threshold: f32,
    pub zoom_speed: f32,
    /// Градусы на единицу mouse delta в секунду
    pub orbit_sensitivity: f32,
    pub min_pitch: f32,
    pub max_pitch: f32,
    /// Pivot над позицией цели (примерно торс)
    pub orbit_height_offset: f32,
    /// Time constant сглаживания дистанции (0 = мгновенно)
    pub distance_smooth: f32,
    pub rotation_smooth: f32,
    pub collision_radius: f32,
    /// Маска слоёв, блокирующих камеру
    pub collision_groups: u32,
    pub hide_player_in_first_person: bool,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            min_distance: 0.1,
            max_distance: 6.0,
            first_person_threshold: 0.35,
            zoom_speed: 6.0,
            orbit_sensitivity: 120.0,
            min_pitch: -45.0,
            max_pitch: 70.0,
            orbit_height_offset: 1.6,
            distance_smooth: 0.08,
            rotation_smooth: 12.0,
            collision_radius: 0.2,
            collision_groups: MASK_CAMERA,
            hide_player_in_first_person: true,
        }
    }
}

impl CameraConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.min_distance >= 0.0) {
            return Err(ConfigError::invalid(
                "camera.min_distance",
                format!("must be >= 0, got {}", self.min_distance),
            ));
        }
        if self.max_distance < self.min_distance {
            return Err(ConfigError::invalid(
                "camera.max_distance",
                format!(
                    "range inverted: [{}, {}]",
                    self.min_distance, self.max_distance
                ),
            ));
        }
        if self.max_pitch < self.min_pitch {
            return Err(ConfigError::invalid(
                "camera.max_pitch",
                format!("range inverted: [{}, {}]", self.min_pitch, self.max_pitch),
            ));
        }
        let non_negative = [
            ("camera.first_person_threshold", self.first_person_threshold),
            ("camera.zoom_speed", self.zoom_speed),
            ("camera.orbit_sensitivity", self.orbit_sensitivity),
        ];
        for (field, value) in non_negative {
            // NaN и inf тоже отклоняются
            if !(value >= 0.0 && value.is_finite()) {
                return Err(ConfigError::invalid(
                    field,
                    format!("must be finite and >= 0, got {}", value),
                ));
            }
        }
        if !(self.collision_radius > 0.0) {
            return Err(ConfigError::invalid(
                "camera.collision_radius",
                format!("must be > 0, got {}", self.collision_radius),
            ));
        }
        if self.distance_smooth < 0.0 || self.rotation_smooth < 0.0 {
            return Err(ConfigError::invalid("camera.smoothing", "must be >= 0"));
        }
        Ok(())
    }
}

/// Runtime state камеры (углы в градусах)
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct CameraState {
    pub yaw: f32,
    pub pitch: f32,
    pub target_distance: f32,
    pub current_distance: f32,
    pub mode: CameraMode,
    pub position: Vec3,
    pub rotation: Quat,
}

impl CameraState {
    pub fn new(config: &CameraConfig) -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            target_distance: config.max_distance,
            current_distance: config.max_distance,
            mode: CameraMode::ThirdPerson,
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

/// Input snapshot камеры на тик (дельты обнуляются после тика)
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct CameraInput {
    /// x = вправо, y = вверх
    pub mouse_delta: Vec2,
    /// > 0 = приблизить
    pub scroll_delta: f32,
}

/// Что камера отслеживает
///
/// - `entity`: корень персонажа (позиция + yaw тела в first person)
/// - `eye_anchor`: точка глаз (без неё используется позиция `entity`)
/// - `renderers`: self-occluding части тела, скрываемые в first person
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct CameraTarget {
    pub entity: Entity,
    pub eye_anchor: Option<Entity>,
    pub renderers: Vec<Entity>,
}

impl CameraTarget {
    pub fn new(entity: Entity) -> Self {
        Self {
            entity,
            eye_anchor: None,
            renderers: Vec::new(),
        }
    }
}

/// Видимость self-occluding рендерера (читается presentation слоем)
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct OccludingRenderer {
    pub visible: bool,
}

impl Default for OccludingRenderer {
    fn default() -> Self {
        Self { visible: true }
    }
}

/// Тиковый снимок цели для `CameraRig::advance`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraFrame {
    /// Collider цели, игнорируется probe
    pub target_entity: Option<Entity>,
    pub target_position: Vec3,
    pub target_rotation: Quat,
    pub eye_anchor: Option<Vec3>,
}

/// Результат тика камеры
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CameraOutcome {
    pub mode_changed: bool,
    /// Новый поворот тела цели (только в first person)
    pub body_rotation: Option<Quat>,
}

/// Переключение видимости self-occluding рендереров
pub trait RendererToggle {
    fn set_visible(&mut self, visible: bool);
}
