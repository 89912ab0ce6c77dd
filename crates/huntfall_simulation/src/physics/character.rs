//! Character move primitive.
//!
//! Контроллер только считает velocity и отдаёт `velocity × dt` телу;
//! коллизии разрешает physics world.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

pub trait CharacterBody {
    /// Ground contact test для капсулы персонажа
    fn is_grounded(&self) -> bool;

    /// Запрос перемещения на `translation` (world space).
    /// Возвращает перемещение, известное телу на момент вызова.
    fn move_by(&mut self, translation: Vec3) -> Vec3;
}

/// Rapier KinematicCharacterController адаптер
///
/// - grounded берётся из output прошлого physics step
/// - translation применяется Rapier в следующем step (PostUpdate)
pub struct RapierCharacterBody<'a> {
    controller: &'a mut KinematicCharacterController,
    output: Option<&'a KinematicCharacterControllerOutput>,
}

impl<'a> RapierCharacterBody<'a> {
    pub fn new(
        controller: &'a mut KinematicCharacterController,
        output: Option<&'a KinematicCharacterControllerOutput>,
    ) -> Self {
        Self { controller, output }
    }
}

impl CharacterBody for RapierCharacterBody<'_> {
    fn is_grounded(&self) -> bool {
        self.output.is_some_and(|output| output.grounded)
    }

    fn move_by(&mut self, translation: Vec3) -> Vec3 {
        // Rapier разрешит коллизии в своём step; до него известен только запрос
        self.controller.translation = Some(translation);
        translation
    }
}
