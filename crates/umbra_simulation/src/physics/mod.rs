//! Physics simulation module
//!
//! Kinematic движение (velocity integration), obstacle grid, vault lerp.
//! Всё в FixedUpdate: Time<Fixed> идёт от Time<Virtual>, поэтому пауза/EndGame
//! останавливают движение автоматически.

use bevy::prelude::*;

pub mod movement;
pub mod obstacles;

// Re-export основных типов
pub use movement::{advance_vaults, integrate_velocity, slide};
pub use obstacles::Obstacles;

/// Physics Plugin
///
/// Регистрирует системы в FixedUpdate (60Hz).
pub struct PhysicsPlugin;

impl Plugin for PhysicsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Obstacles>();

        app.add_systems(
            FixedUpdate,
            (advance_vaults, integrate_velocity).chain(), // Последовательное выполнение
        );
    }
}
