//! Chase state machine (Idle → Chasing → Attacking).
//!
//! Переходы:
//! - Idle: видим цель в радиусе → Chasing (repath сразу), иначе reset_path
//! - Chasing: repath по таймеру; в зоне атаки → Attacking; забыли → Idle
//! - Attacking: доворот на цель; вышла из зоны → Chasing; забыли → Idle
//!
//! Зона атаки = attack_range + stopping_distance агента (граница включительно).
//! Память о цели (last_seen_time) общая для Chasing и Attacking.

use bevy::prelude::*;

use super::components::*;
use super::perception::can_see_target;
use crate::movement::PathfindingAgent;
use crate::physics::SpatialQuery;
use crate::shared::{planar, slerp_factor, yaw_toward, EventQueue, DIRECTION_EPSILON_SQ};

#[derive(Component, Debug, Clone, Default)]
#[require(ChaseTarget)]
pub struct ChaseController {
    pub config: ChaseConfig,
    pub state: ChaseState,
    events: EventQueue<ChaseEvent>,
}

impl ChaseController {
    pub fn new(config: ChaseConfig) -> Self {
        Self {
            config,
            state: ChaseState::default(),
            events: EventQueue::default(),
        }
    }

    pub fn advance(
        &mut self,
        dt: f32,
        body: &mut ChaseBody,
        target: Option<TargetSnapshot>,
        probe: &impl SpatialQuery,
        agent: &mut impl PathfindingAgent,
    ) -> ChaseOutcome {
        if !self.state.is_alive {
            return ChaseOutcome::default();
        }

        let config = self.config;
        self.state.clock += dt;
        let now = self.state.clock;

        let can_see = can_see_target(&config, body, target.as_ref(), probe);
        if can_see {
            self.state.last_seen_time = now;
        }

        let distance = target.map_or(f32::INFINITY, |target| body.position.distance(target.position));
        let engage_range = config.attack_range + agent.stopping_distance();
        let lost_sight = now - self.state.last_seen_time > config.lose_sight_time;
        let previous = self.state.mode;

        match self.state.mode {
            ChaseMode::Idle => {
                if can_see && distance <= config.detect_radius {
                    self.state.mode = ChaseMode::Chasing;
                    self.state.repath_timer = 0.0;
                } else {
                    agent.reset_path();
                }
            }
            ChaseMode::Chasing => {
                self.state.repath_timer -= dt;
                if self.state.repath_timer <= 0.0 {
                    // Без цели некуда ехать: таймер остаётся истёкшим
                    if let Some(target) = target {
                        agent.set_destination(target.position);
                        self.state.repath_timer = config.repath_interval;
                    }
                }

                if distance <= engage_range {
                    self.state.mode = ChaseMode::Attacking;
                    agent.reset_path();
                    self.events.push(ChaseEvent::AttackEntered);
                } else if lost_sight {
                    self.state.mode = ChaseMode::Idle;
                    agent.reset_path();
                }
            }
            ChaseMode::Attacking => {
                if let Some(target) = target {
                    self.face_target(body, target.position, dt);
                }

                if distance > engage_range {
                    self.state.mode = ChaseMode::Chasing;
                } else if lost_sight {
                    self.state.mode = ChaseMode::Idle;
                }
            }
        }

        self.update_movement_edges(agent.velocity());
        self.state.rotation = body.rotation;

        ChaseOutcome {
            can_see,
            transition: (previous != self.state.mode).then_some((previous, self.state.mode)),
        }
    }

    /// Yaw-only доворот к точке (pitch/roll тела не трогаем)
    pub fn face_target(&self, body: &mut ChaseBody, point: Vec3, dt: f32) {
        let look = planar(point - body.position);
        if look.length_squared() < DIRECTION_EPSILON_SQ {
            return;
        }
        if let Some(facing) = yaw_toward(look) {
            body.rotation = body
                .rotation
                .slerp(facing, slerp_factor(self.config.face_target_speed, dt));
        }
    }

    /// MovementStarted / MovementStopped один раз на пересечение порога
    pub fn update_movement_edges(&mut self, agent_velocity: Vec3) {
        let speed = planar(agent_velocity).length();
        self.state.movement_speed = speed;

        let moving = speed > self.config.movement_threshold;
        if moving && !self.state.was_moving {
            self.events.push(ChaseEvent::MovementStarted);
        } else if !moving && self.state.was_moving {
            self.events.push(ChaseEvent::MovementStopped);
        }
        self.state.was_moving = moving;
    }

    /// Terminal переход: Died + остановка агента. `true` только первый раз.
    pub fn die(&mut self, agent: &mut impl PathfindingAgent) -> bool {
        if !self.mark_dead() {
            return false;
        }
        agent.stop(true);
        agent.reset_path();
        true
    }

    /// Terminal переход без агента (entity отключена на setup)
    pub fn mark_dead(&mut self) -> bool {
        if !self.state.is_alive {
            return false;
        }
        self.state.is_alive = false;
        self.events.push(ChaseEvent::Died);
        true
    }

    pub fn mode(&self) -> ChaseMode {
        self.state.mode
    }

    /// Для анимационного слоя (HasTarget)
    pub fn has_target(&self) -> bool {
        self.state.mode != ChaseMode::Idle
    }

    /// Planar speed агента (для анимационного слоя)
    pub fn movement_speed(&self) -> f32 {
        self.state.movement_speed
    }

    pub fn is_alive(&self) -> bool {
        self.state.is_alive
    }

    pub fn pending_events(&self) -> &EventQueue<ChaseEvent> {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<ChaseEvent> {
        self.events.drain().collect()
    }
}
