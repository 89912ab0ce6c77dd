//! Orbit / first-person camera rig.
//!
//! Координаты Bevy: Y вверх, -Z вперёд. Положительный pitch смотрит вниз,
//! положительный yaw поворачивает вправо (по часовой сверху).

use bevy::prelude::*;

use super::components::*;
use crate::physics::{ProbeFilter, SpatialQuery};
use crate::shared::{slerp_factor, smoothing_factor};

/// Вырожденный probe (pivot == desired) не кастуется
const MIN_PROBE_DISTANCE: f32 = 1e-4;

/// Запас от препятствия при pull-in (× collision_radius)
const COLLISION_PULL_IN: f32 = 1.05;

/// Режим как чистая функция от target distance
pub fn mode_for_distance(target_distance: f32, threshold: f32) -> CameraMode {
    if target_distance <= threshold {
        CameraMode::FirstPerson
    } else {
        CameraMode::ThirdPerson
    }
}

#[derive(Component, Debug, Clone)]
#[require(CameraInput, Transform)]
pub struct CameraRig {
    pub config: CameraConfig,
    pub state: CameraState,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::new(CameraConfig::default())
    }
}

impl CameraRig {
    pub fn new(config: CameraConfig) -> Self {
        Self {
            state: CameraState::new(&config),
            config,
        }
    }

    /// Инициализация из существующей позы камеры
    ///
    /// distance = |camera − pivot| (clamped), yaw/pitch из forward вектора.
    pub fn sync_from_pose(&mut self, position: Vec3, rotation: Quat, target_position: Vec3) {
        let pivot = self.pivot(target_position);
        let distance = (position - pivot)
            .length()
            .clamp(self.config.min_distance, self.config.max_distance);
        self.state.target_distance = distance;
        self.state.current_distance = distance;

        let forward = rotation * Vec3::NEG_Z;
        self.state.yaw = f32::atan2(forward.x, -forward.z).to_degrees();
        self.state.pitch = (-forward.y)
            .clamp(-1.0, 1.0)
            .asin()
            .to_degrees()
            .clamp(self.config.min_pitch, self.config.max_pitch);

        self.state.position = position;
        self.state.rotation = rotation;
    }

    pub fn orbit_rotation(&self) -> Quat {
        Quat::from_euler(
            EulerRot::YXZ,
            -self.state.yaw.to_radians(),
            -self.state.pitch.to_radians(),
            0.0,
        )
    }

    pub fn pivot(&self, target_position: Vec3) -> Vec3 {
        target_position + Vec3::Y * self.config.orbit_height_offset
    }

    pub fn mode(&self) -> CameraMode {
        self.state.mode
    }

    pub fn advance(
        &mut self,
        input: &CameraInput,
        dt: f32,
        frame: &CameraFrame,
        probe: &impl SpatialQuery,
        renderers: &mut impl RendererToggle,
    ) -> CameraOutcome {
        let config = self.config;

        // Look
        self.state.yaw += input.mouse_delta.x * config.orbit_sensitivity * dt;
        self.state.pitch = (self.state.pitch
            - input.mouse_delta.y * config.orbit_sensitivity * dt)
            .clamp(config.min_pitch, config.max_pitch);

        // Zoom (scroll нормализован к 60 fps)
        if input.scroll_delta.abs() > 0.001 {
            self.state.target_distance = (self.state.target_distance
                - input.scroll_delta * config.zoom_speed * dt * 60.0)
                .clamp(config.min_distance, config.max_distance);
        }

        // Mode
        let desired_mode = mode_for_distance(self.state.target_distance, config.first_person_threshold);
        let mode_changed = desired_mode != self.state.mode;
        if mode_changed {
            self.state.mode = desired_mode;
            if config.hide_player_in_first_person {
                renderers.set_visible(desired_mode == CameraMode::ThirdPerson);
            }
        }

        let orbit = self.orbit_rotation();
        let body_rotation = match self.state.mode {
            CameraMode::FirstPerson => {
                self.state.position = frame.eye_anchor.unwrap_or(frame.target_position);
                self.state.rotation = orbit;

                // Тело поворачивается только по yaw, pitch остаётся у камеры
                let body_target = Quat::from_rotation_y(-self.state.yaw.to_radians());
                Some(
                    frame
                        .target_rotation
                        .slerp(body_target, slerp_factor(config.rotation_smooth, dt)),
                )
            }
            CameraMode::ThirdPerson => {
                let state = &mut self.state;
                state.current_distance += (state.target_distance - state.current_distance)
                    * smoothing_factor(dt, config.distance_smooth);

                let pivot = frame.target_position + Vec3::Y * config.orbit_height_offset;
                let desired = pivot + orbit * Vec3::new(0.0, 0.0, state.current_distance);
                let filter = ProbeFilter::new(config.collision_groups).excluding(frame.target_entity);

                state.position = Self::resolve_collision(&config, pivot, desired, probe, filter);
                state.rotation = state
                    .rotation
                    .slerp(orbit, slerp_factor(config.rotation_smooth, dt));
                None
            }
        };

        CameraOutcome {
            mode_changed,
            body_rotation,
        }
    }

    /// Sphere probe от pivot к desired; при попадании камера встаёт перед препятствием
    pub fn resolve_collision(
        config: &CameraConfig,
        pivot: Vec3,
        desired: Vec3,
        probe: &impl SpatialQuery,
        filter: ProbeFilter,
    ) -> Vec3 {
        let offset = desired - pivot;
        let distance = offset.length();
        if distance < MIN_PROBE_DISTANCE {
            return desired;
        }
        let direction = offset / distance;

        match probe.cast_sphere(pivot, config.collision_radius, direction, distance, filter) {
            Some(hit) => hit.point + hit.normal * config.collision_radius * COLLISION_PULL_IN,
            None => desired,
        }
    }
}
