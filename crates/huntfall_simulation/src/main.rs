//! Headless симуляция Huntfall
//!
//! Игрок бродит со случайным (seeded) input, враг его замечает и
//! преследует, камера следует за игроком. Аргумент: путь к tuning JSON.

use bevy::prelude::*;
use rand::Rng;

use huntfall_simulation::camera::CameraTarget;
use huntfall_simulation::locomotion::LocomotionInput;
use huntfall_simulation::spawn::{
    attach_eye_anchor, attach_occluding_renderer, spawn_camera_rig, spawn_enemy, spawn_player,
    spawn_wall,
};
use huntfall_simulation::{
    create_headless_app, log_error, log_info, AgentTuning, AttackEntered, CameraRig,
    ChaseController, DeterministicRng, Jumped,
};

const TICK_COUNT: usize = 1200;

/// Случайный input игрока (детерминирован seed-ом)
fn wander(mut rng: ResMut<DeterministicRng>, mut inputs: Query<&mut LocomotionInput>) {
    for mut input in inputs.iter_mut() {
        if rng.rng.gen_bool(0.05) {
            input.move_axis = Vec2::new(rng.rng.gen_range(-1.0..=1.0), rng.rng.gen_range(-1.0..=1.0));
            input.wants_run = rng.rng.gen_bool(0.3);
        }
        input.jump_requested = rng.rng.gen_bool(0.01);
        input.jump_held = input.jump_requested || (input.jump_held && rng.rng.gen_bool(0.9));
    }
}

fn report(mut jumps: EventReader<Jumped>, mut attacks: EventReader<AttackEntered>) {
    for jump in jumps.read() {
        log_info(&format!("Jumped: {:?}", jump.entity));
    }
    for attack in attacks.read() {
        log_info(&format!("Attack entered: {:?}", attack.entity));
    }
}

fn setup_scene(mut commands: Commands, tuning: Res<AgentTuning>) {
    // Пол + стена-укрытие
    spawn_wall(&mut commands, Vec3::new(0.0, -0.5, 0.0), Vec3::new(50.0, 0.5, 50.0));
    spawn_wall(&mut commands, Vec3::new(4.0, 1.0, -4.0), Vec3::new(1.0, 1.0, 0.2));

    let player_position = Vec3::new(0.0, 0.95, 0.0);
    let player = spawn_player(&mut commands, &tuning, player_position);
    let eye = attach_eye_anchor(&mut commands, player, 0.7);
    let body_mesh = attach_occluding_renderer(&mut commands, player);

    let camera = spawn_camera_rig(&mut commands, &tuning, player, player_position);
    commands.entity(camera).insert(CameraTarget {
        entity: player,
        eye_anchor: Some(eye),
        renderers: vec![body_mesh],
    });

    spawn_enemy(&mut commands, &tuning, Vec3::new(0.0, 0.95, -10.0), Some(player));
}

fn main() {
    let seed = 42;
    println!("Starting Huntfall headless simulation (seed: {})", seed);

    let tuning = match std::env::args().nth(1) {
        Some(path) => match AgentTuning::load(&path) {
            Ok(tuning) => tuning,
            Err(error) => {
                log_error(&format!("Tuning {} rejected: {}", path, error));
                std::process::exit(1);
            }
        },
        None => AgentTuning::default(),
    };

    let mut app = create_headless_app(seed);
    app.insert_resource(tuning)
        .add_systems(Startup, setup_scene)
        .add_systems(FixedPreUpdate, wander)
        .add_systems(FixedPostUpdate, report);

    for tick in 0..TICK_COUNT {
        app.update();

        if tick % 120 == 0 {
            let world = app.world_mut();
            let mut chasers = world.query::<&ChaseController>();
            for chaser in chasers.iter(world) {
                println!(
                    "Tick {}: enemy {:?} (speed {:.2})",
                    tick,
                    chaser.mode(),
                    chaser.movement_speed()
                );
            }
            let mut rigs = world.query::<&CameraRig>();
            for rig in rigs.iter(world) {
                println!(
                    "Tick {}: camera {:?} yaw {:.1} pitch {:.1}",
                    tick,
                    rig.mode(),
                    rig.state.yaw,
                    rig.state.pitch
                );
            }
        }
    }

    println!("Simulation complete!");
}
