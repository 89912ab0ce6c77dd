//! Headless интеграционные тесты: locomotion + camera + chase в одном App
//!
//! Первый `app.update()` FixedUpdate не тикает (время ещё не накоплено),
//! каждый следующий = ровно один тик 60Hz.

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use bevy_rapier3d::prelude::*;

use huntfall_simulation::camera::{CameraInput, CameraTarget, OccludingRenderer};
use huntfall_simulation::spawn::{
    attach_occluding_renderer, spawn_camera_rig, spawn_enemy, spawn_player, spawn_wall,
};
use huntfall_simulation::{
    create_headless_app, AgentTuning, AttackEntered, CameraMode, CameraRig, ChaseController,
    ChaseMode, Disabled, EnemyDied, KillRequest, LocomotionController, MovementStarted,
    PlayerDied, SetupError, SimulationPlugin, HEADLESS_FRAME,
};

/// Счётчики событий (собираются из EventReader, без двойного чтения)
#[derive(Resource, Default, Debug)]
struct EventLog {
    attack_entered: Vec<Entity>,
    movement_started: Vec<Entity>,
    enemy_died: Vec<Entity>,
    player_died: Vec<Entity>,
}

fn record_events(
    mut log: ResMut<EventLog>,
    mut attacks: EventReader<AttackEntered>,
    mut started: EventReader<MovementStarted>,
    mut enemy_died: EventReader<EnemyDied>,
    mut player_died: EventReader<PlayerDied>,
) {
    log.attack_entered.extend(attacks.read().map(|event| event.entity));
    log.movement_started.extend(started.read().map(|event| event.entity));
    log.enemy_died.extend(enemy_died.read().map(|event| event.entity));
    log.player_died.extend(player_died.read().map(|event| event.entity));
}

fn test_app() -> App {
    let mut app = create_headless_app(7);
    app.init_resource::<EventLog>()
        .add_systems(FixedPostUpdate, record_events);
    app
}

fn run_ticks(app: &mut App, ticks: usize) {
    for _ in 0..ticks {
        app.update();
    }
}

fn spawn_with_tuning<F>(app: &mut App, spawn: F) -> Entity
where
    F: FnOnce(&mut Commands, &AgentTuning) -> Entity,
{
    let tuning = app.world().resource::<AgentTuning>().clone();
    let world = app.world_mut();
    let entity = {
        let mut commands = world.commands();
        spawn(&mut commands, &tuning)
    };
    world.flush();
    entity
}

#[test]
fn test_enemy_chases_and_enters_attack() {
    let mut app = test_app();

    // Цель без коллайдера: LOS луч ни во что не упирается
    let target = app.world_mut().spawn(Transform::from_xyz(0.0, 0.0, -6.0)).id();
    let enemy = spawn_with_tuning(&mut app, |commands, tuning| {
        spawn_enemy(commands, tuning, Vec3::ZERO, Some(target))
    });

    run_ticks(&mut app, 3);
    assert_eq!(
        app.world().get::<ChaseController>(enemy).unwrap().mode(),
        ChaseMode::Chasing
    );

    run_ticks(&mut app, 240);

    let controller = app.world().get::<ChaseController>(enemy).unwrap();
    assert_eq!(controller.mode(), ChaseMode::Attacking);

    let log = app.world().resource::<EventLog>();
    assert_eq!(log.attack_entered, vec![enemy]);
    assert_eq!(log.movement_started, vec![enemy]);

    let enemy_position = app.world().get::<Transform>(enemy).unwrap().translation;
    assert!(enemy_position.distance(Vec3::new(0.0, 0.0, -6.0)) <= 2.3 + 1e-3);
}

#[test]
fn test_enemy_ignores_target_outside_detect_radius() {
    let mut app = test_app();

    let target = app.world_mut().spawn(Transform::from_xyz(0.0, 0.0, -15.0)).id();
    let enemy = spawn_with_tuning(&mut app, |commands, tuning| {
        spawn_enemy(commands, tuning, Vec3::ZERO, Some(target))
    });

    run_ticks(&mut app, 30);

    let controller = app.world().get::<ChaseController>(enemy).unwrap();
    assert_eq!(controller.mode(), ChaseMode::Idle);
    assert_eq!(app.world().get::<Transform>(enemy).unwrap().translation, Vec3::ZERO);
}

#[test]
fn test_kill_requests_emit_died_once() {
    let mut app = test_app();

    let player = spawn_with_tuning(&mut app, |commands, tuning| {
        spawn_player(commands, tuning, Vec3::new(0.0, 0.95, 0.0))
    });
    let enemy = spawn_with_tuning(&mut app, |commands, tuning| {
        spawn_enemy(commands, tuning, Vec3::new(0.0, 0.95, -10.0), Some(player))
    });

    run_ticks(&mut app, 2);

    app.world_mut().send_event(KillRequest { entity: player });
    app.world_mut().send_event(KillRequest { entity: enemy });
    run_ticks(&mut app, 1);
    app.world_mut().send_event(KillRequest { entity: player });
    app.world_mut().send_event(KillRequest { entity: enemy });
    run_ticks(&mut app, 5);

    let log = app.world().resource::<EventLog>();
    assert_eq!(log.player_died, vec![player]);
    assert_eq!(log.enemy_died, vec![enemy]);

    assert!(!app.world().get::<LocomotionController>(player).unwrap().is_alive());
    assert!(!app.world().get::<ChaseController>(enemy).unwrap().is_alive());
}

#[test]
fn test_dead_player_is_frozen() {
    let mut app = test_app();

    let player = spawn_with_tuning(&mut app, |commands, tuning| {
        spawn_player(commands, tuning, Vec3::new(0.0, 0.95, 0.0))
    });
    run_ticks(&mut app, 2);

    app.world_mut().send_event(KillRequest { entity: player });
    run_ticks(&mut app, 2);
    let frozen = app.world().get::<Transform>(player).unwrap().translation;

    run_ticks(&mut app, 30);
    let later = app.world().get::<Transform>(player).unwrap().translation;
    assert!(frozen.distance(later) < 1e-4);
}

#[test]
fn test_chaser_without_nav_agent_is_disabled() {
    let mut app = test_app();

    let enemy = app
        .world_mut()
        .spawn((Transform::default(), ChaseController::default()))
        .id();

    run_ticks(&mut app, 3);

    let disabled = app.world().get::<Disabled>(enemy).expect("chaser must be disabled");
    assert_eq!(disabled.reason, SetupError::MissingNavAgent(enemy));
}

#[test]
fn test_locomotion_without_character_body_is_disabled() {
    let mut app = test_app();

    let player = app
        .world_mut()
        .spawn((Transform::default(), LocomotionController::default()))
        .id();

    run_ticks(&mut app, 3);

    let disabled = app.world().get::<Disabled>(player).expect("player must be disabled");
    assert_eq!(disabled.reason, SetupError::MissingCharacterBody(player));
}

#[test]
fn test_camera_with_missing_target_is_disabled() {
    let mut app = test_app();

    let ghost = app.world_mut().spawn_empty().id();
    app.world_mut().despawn(ghost);
    let rig = app
        .world_mut()
        .spawn((CameraRig::default(), CameraTarget::new(ghost)))
        .id();

    run_ticks(&mut app, 3);

    let disabled = app.world().get::<Disabled>(rig).expect("rig must be disabled");
    assert_eq!(
        disabled.reason,
        SetupError::MissingCameraTarget { rig, target: ghost }
    );
}

#[test]
fn test_camera_follows_at_max_distance() {
    let mut app = test_app();

    let target = app.world_mut().spawn(Transform::default()).id();
    let rig = spawn_with_tuning(&mut app, |commands, tuning| {
        spawn_camera_rig(commands, tuning, target, Vec3::ZERO)
    });

    run_ticks(&mut app, 30);

    let pivot = Vec3::Y * 1.6;
    let camera = app.world().get::<Transform>(rig).unwrap().translation;
    assert!((camera.distance(pivot) - 6.0).abs() < 0.05, "camera at {camera}");
    assert_eq!(
        app.world().get::<CameraRig>(rig).unwrap().mode(),
        CameraMode::ThirdPerson
    );
}

#[test]
fn test_wall_pulls_camera_in() {
    let mut app = test_app();

    let target = app.world_mut().spawn(Transform::default()).id();
    spawn_with_tuning(&mut app, |commands, _| {
        spawn_wall(commands, Vec3::new(0.0, 1.6, 3.0), Vec3::new(5.0, 5.0, 0.1))
    });
    let rig = spawn_with_tuning(&mut app, |commands, tuning| {
        spawn_camera_rig(commands, tuning, target, Vec3::ZERO)
    });

    run_ticks(&mut app, 60);

    let camera = app.world().get::<Transform>(rig).unwrap().translation;
    assert!(camera.z < 2.9, "camera should stay in front of the wall, got {camera}");
    assert!(camera.z > 0.0);
}

#[test]
fn test_scroll_to_first_person_hides_body() {
    let mut app = test_app();

    let target = app.world_mut().spawn(Transform::default()).id();
    let renderer = spawn_with_tuning(&mut app, |commands, _| {
        attach_occluding_renderer(commands, target)
    });
    let rig = spawn_with_tuning(&mut app, |commands, tuning| {
        let rig = spawn_camera_rig(commands, tuning, target, Vec3::ZERO);
        commands.entity(rig).insert(CameraTarget {
            entity: target,
            eye_anchor: None,
            renderers: vec![renderer],
        });
        rig
    });

    run_ticks(&mut app, 2);
    assert!(app.world().get::<OccludingRenderer>(renderer).unwrap().visible);

    // Один тик с большим scroll: target_distance упирается в min_distance
    app.world_mut().get_mut::<CameraInput>(rig).unwrap().scroll_delta = 1.0;
    run_ticks(&mut app, 1);

    assert_eq!(
        app.world().get::<CameraRig>(rig).unwrap().mode(),
        CameraMode::FirstPerson
    );
    assert!(!app.world().get::<OccludingRenderer>(renderer).unwrap().visible);
    assert_eq!(app.world().get::<CameraInput>(rig).unwrap().scroll_delta, 0.0);
}

#[test]
fn test_dead_player_ignores_first_person_look() {
    let mut app = test_app();

    let player = spawn_with_tuning(&mut app, |commands, tuning| {
        spawn_player(commands, tuning, Vec3::new(0.0, 0.95, 0.0))
    });
    let rig = spawn_with_tuning(&mut app, |commands, tuning| {
        spawn_camera_rig(commands, tuning, player, Vec3::new(0.0, 0.95, 0.0))
    });

    run_ticks(&mut app, 2);
    app.world_mut().get_mut::<CameraInput>(rig).unwrap().scroll_delta = 1.0;
    run_ticks(&mut app, 1);
    assert_eq!(
        app.world().get::<CameraRig>(rig).unwrap().mode(),
        CameraMode::FirstPerson
    );

    // Живое тело поворачивается вслед за мышью
    let before_look = app.world().get::<Transform>(player).unwrap().rotation;
    for _ in 0..5 {
        app.world_mut().get_mut::<CameraInput>(rig).unwrap().mouse_delta = Vec2::new(5.0, 0.0);
        run_ticks(&mut app, 1);
    }
    let after_look = app.world().get::<Transform>(player).unwrap().rotation;
    assert!(before_look.angle_between(after_look) > 1e-3);

    app.world_mut().send_event(KillRequest { entity: player });
    run_ticks(&mut app, 2);
    let frozen = app.world().get::<Transform>(player).unwrap().rotation;

    for _ in 0..10 {
        app.world_mut().get_mut::<CameraInput>(rig).unwrap().mouse_delta = Vec2::new(5.0, 0.0);
        run_ticks(&mut app, 1);
    }

    let later = app.world().get::<Transform>(player).unwrap().rotation;
    assert!(frozen.angle_between(later) < 1e-5, "dead body turned: {frozen} → {later}");
    assert!(app.world().get::<CameraRig>(rig).unwrap().state.yaw > 0.0);
}

/// App без Rapier plugin: physics world отсутствует
fn app_without_physics() -> App {
    let mut app = App::new();
    app.add_plugins((
        MinimalPlugins,
        bevy::transform::TransformPlugin,
        SimulationPlugin,
    ))
    .insert_resource(Time::<Fixed>::from_duration(HEADLESS_FRAME))
    .insert_resource(TimeUpdateStrategy::ManualDuration(HEADLESS_FRAME));
    app
}

#[test]
fn test_locomotion_without_physics_world_is_disabled() {
    let mut app = app_without_physics();

    let player = app
        .world_mut()
        .spawn((
            Transform::from_xyz(0.0, 0.95, 0.0),
            LocomotionController::default(),
            KinematicCharacterController::default(),
        ))
        .id();

    run_ticks(&mut app, 3);

    let disabled = app.world().get::<Disabled>(player).expect("player must be disabled");
    assert_eq!(disabled.reason, SetupError::MissingSpatialQuery);

    // Отключённый контроллер не пишет translation в KCC
    let character = app.world().get::<KinematicCharacterController>(player).unwrap();
    assert!(character.translation.is_none());
    assert_eq!(
        app.world().get::<LocomotionController>(player).unwrap().velocity(),
        Vec3::ZERO
    );
}
