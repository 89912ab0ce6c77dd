//! Huntfall Simulation Core
//!
//! Agent-control ядро экшен-игры на Bevy 0.16 + Rapier:
//! - locomotion: капсула игрока (jump buffer, coyote time)
//! - camera: third/first-person rig с orbit collision
//! - ai: perception + chase state machine врага
//!
//! Все подсистемы тикают в FixedUpdate (60Hz) в фиксированном порядке
//! (см. SimulationSet). Друг друга не вызывают: связь только через events.

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use bevy_rapier3d::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

// Публичные модули
pub mod ai;
pub mod camera;
pub mod config;
pub mod error;
pub mod locomotion;
pub mod logger;
pub mod movement;
pub mod physics;
pub mod shared;
pub mod spawn;

// Re-export основных типов
pub use ai::{AIPlugin, AttackEntered, ChaseController, ChaseMode, EnemyDied, MovementStarted, MovementStopped};
pub use camera::{CameraMode, CameraRig, CameraRigPlugin};
pub use config::AgentTuning;
pub use error::{ConfigError, Disabled, SetupError};
pub use locomotion::{Jumped, LocomotionController, LocomotionPlugin, PlayerDied};
pub use logger::{
    init_logger, log, log_error, log_info, log_level, log_warning, set_log_level, set_logger,
    set_logger_if_needed, LogLevel, LogPrinter,
};
pub use movement::{NavAgent, NavigationPlugin};
pub use shared::KillRequest;

/// Порядок тика внутри FixedUpdate
///
/// 1. Setup: проверка коллабораторов у новых entity (Disabled при ошибке)
/// 2. Intent: внешние команды (KillRequest)
/// 3. Advance: locomotion + chase state machine
/// 4. Navigation: steering агентов
/// 5. Camera: rig после того как тело сдвинулось/повернулось
/// 6. Flush: outbox → Bevy events
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    Setup,
    Intent,
    Advance,
    Navigation,
    Camera,
    Flush,
}

/// Главный plugin симуляции (объединяет все подсистемы)
///
/// Rapier plugin добавляется отдельно (см. create_headless_app).
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep 60Hz для simulation tick
            .insert_resource(Time::<Fixed>::from_hz(60.0))
            // Tuning по умолчанию, если не загружен заранее
            .init_resource::<AgentTuning>()
            .register_type::<AgentTuning>()
            .configure_sets(
                FixedUpdate,
                (
                    SimulationSet::Setup,
                    SimulationSet::Intent,
                    SimulationSet::Advance,
                    SimulationSet::Navigation,
                    SimulationSet::Camera,
                    SimulationSet::Flush,
                )
                    .chain(),
            )
            .add_plugins((LocomotionPlugin, AIPlugin, NavigationPlugin, CameraRigPlugin));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Длительность одного кадра headless app (= один FixedUpdate тик)
pub const HEADLESS_FRAME: Duration = Duration::from_nanos(16_666_667);

/// Создаёт minimal Bevy App для headless симуляции
///
/// MinimalPlugins + Transform + Rapier (в fixed schedule) + SimulationPlugin.
/// Время двигается вручную: каждый `app.update()` после первого = один тик 60Hz.
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins((
        MinimalPlugins,
        bevy::transform::TransformPlugin,
        RapierPhysicsPlugin::<NoUserData>::default().in_fixed_schedule(),
        SimulationPlugin,
    ))
    .insert_resource(Time::<Fixed>::from_duration(HEADLESS_FRAME))
    .insert_resource(TimeUpdateStrategy::ManualDuration(HEADLESS_FRAME))
    .insert_resource(DeterministicRng::new(seed));

    app
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    // Сериализуем в байты через Debug (простейший способ)
    let mut snapshot = Vec::new();
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
