//! Camera domain: third/first-person rig
//!
//! Содержит:
//! - CameraRig (yaw/pitch/zoom, orbit collision, first-person switch)
//! - CameraTarget / CameraInput / OccludingRenderer компоненты
//! - RendererToggle (скрытие self-occluding частей тела в first person)

use bevy::prelude::*;

pub mod components;
pub mod rig;
pub mod systems;


pub use components::*;
pub use rig::{mode_for_distance, CameraRig};
pub use systems::*;

use crate::SimulationSet;

/// Camera Plugin
pub struct CameraRigPlugin;

impl Plugin for CameraRigPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            (
                initialize_camera_rigs.in_set(SimulationSet::Setup),
                advance_camera_rigs.in_set(SimulationSet::Camera),
            ),
        );
    }
}
