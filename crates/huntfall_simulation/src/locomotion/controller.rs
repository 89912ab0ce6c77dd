//! Locomotion tick algorithm.
//!
//! Порядок шага фиксирован:
//! 1. ground test → coyote timer
//! 2. jump buffer timer
//! 3. wish direction (camera-relative) → horizontal velocity
//! 4. jump (одна проверка на тик)
//! 5. гравитация / ground stick
//! 6. move primitive тела
//! 7. поворот к направлению движения

use bevy::prelude::*;

use super::components::*;
use crate::physics::CharacterBody;
use crate::shared::{move_towards, planar, slerp_factor, yaw_toward, EventQueue, DIRECTION_EPSILON_SQ};

/// Контроллер капсулы игрока
#[derive(Component, Debug, Clone, Default)]
#[require(LocomotionInput)]
pub struct LocomotionController {
    pub config: LocomotionConfig,
    pub state: LocomotionState,
    events: EventQueue<LocomotionEvent>,
}

impl LocomotionController {
    pub fn new(config: LocomotionConfig) -> Self {
        Self {
            config,
            state: LocomotionState::default(),
            events: EventQueue::default(),
        }
    }

    pub fn advance(
        &mut self,
        input: &LocomotionInput,
        dt: f32,
        body: &mut impl CharacterBody,
    ) -> LocomotionOutcome {
        if !self.state.is_alive {
            return LocomotionOutcome::default();
        }

        let config = self.config;
        let state = &mut self.state;

        // 1. Coyote
        state.grounded = body.is_grounded();
        state.grounded_timer = if state.grounded {
            config.coyote_time
        } else {
            (state.grounded_timer - dt).max(0.0)
        };

        // 2. Jump buffer
        state.jump_buffer_timer = (state.jump_buffer_timer - dt).max(0.0);
        if input.jump_requested {
            state.jump_buffer_timer = config.jump_buffer;
        }

        // 3. Horizontal
        let (wish, magnitude) = Self::wish_direction(input);
        let speed = if input.wants_run {
            config.run_speed
        } else {
            config.walk_speed
        };
        let acceleration = if state.grounded {
            config.ground_acceleration
        } else {
            config.air_acceleration
        };
        let horizontal = move_towards(
            planar(state.velocity),
            wish * speed * magnitude,
            acceleration * dt,
        );
        state.velocity.x = horizontal.x;
        state.velocity.z = horizontal.z;

        // 4. Jump
        let jumped = state.jump_buffer_timer > 0.0 && state.grounded_timer > 0.0;
        if jumped {
            state.jump_buffer_timer = 0.0;
            state.grounded_timer = 0.0;
            state.velocity.y = (2.0 * config.jump_height * config.gravity).sqrt();
            self.events.push(LocomotionEvent::Jumped);
        }

        // 5. Gravity
        let multiplier = if state.velocity.y > 0.0 && !input.jump_held {
            config.fall_multiplier
        } else {
            1.0
        };
        state.velocity.y -= config.gravity * dt * multiplier;
        if state.grounded && state.velocity.y <= 0.0 {
            state.velocity.y = config.ground_stick_velocity;
        }

        // 6. Move
        let displacement = body.move_by(state.velocity * dt);

        // 7. Face movement
        if config.rotate_to_move && wish.length_squared() > DIRECTION_EPSILON_SQ {
            if let Some(facing) = yaw_toward(wish) {
                state.rotation = state
                    .rotation
                    .slerp(facing, slerp_factor(config.turn_rate, dt));
            }
        }

        LocomotionOutcome {
            displacement,
            jumped,
        }
    }

    /// Camera-relative направление + сила input (0..=1)
    pub fn wish_direction(input: &LocomotionInput) -> (Vec3, f32) {
        let axis = input.move_axis.clamp_length_max(1.0);
        let forward = planar(input.camera_forward).normalize_or_zero();
        let right = planar(input.camera_right).normalize_or_zero();
        let wish = (forward * axis.y + right * axis.x).normalize_or_zero();
        (wish, axis.length())
    }

    pub fn jump_velocity(&self) -> f32 {
        (2.0 * self.config.jump_height * self.config.gravity).sqrt()
    }

    /// Terminal переход. `true` только на первом вызове.
    pub fn die(&mut self) -> bool {
        if !self.state.is_alive {
            return false;
        }
        self.state.is_alive = false;
        self.events.push(LocomotionEvent::Died);
        true
    }

    /// Внешний поворот тела (например, first-person камера) до тика
    pub fn sync_rotation(&mut self, rotation: Quat) {
        if self.state.is_alive {
            self.state.rotation = rotation;
        }
    }

    pub fn velocity(&self) -> Vec3 {
        self.state.velocity
    }

    /// Горизонтальная скорость (для анимационного слоя)
    pub fn planar_speed(&self) -> f32 {
        planar(self.state.velocity).length()
    }

    pub fn is_grounded(&self) -> bool {
        self.state.grounded
    }

    pub fn is_alive(&self) -> bool {
        self.state.is_alive
    }

    pub fn rotation(&self) -> Quat {
        self.state.rotation
    }

    pub fn pending_events(&self) -> &EventQueue<LocomotionEvent> {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<LocomotionEvent> {
        self.events.drain().collect()
    }
}
