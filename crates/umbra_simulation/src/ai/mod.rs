//! AI decision-making module
//!
//! Enemy perception (vision cone + proximity) и FSM Patrol / Pursuit / Memory.
//! FSM переходы - чистая функция, движение применяется отдельной системой.

use bevy::prelude::*;

pub mod components;
pub mod systems;

// Re-export основных типов
pub use components::*;

use crate::{gameplay_running, SimSet};

/// AI Plugin
///
/// Регистрирует AI системы в Update (virtual time, замирают на паузе).
/// Порядок выполнения:
/// 1. update_behavior - sensors + FSM step → Directive
/// 2. apply_directives - Directive → Velocity/Heading
pub struct AIPlugin;

impl Plugin for AIPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (systems::update_behavior, systems::apply_directives)
                .chain() // Последовательное выполнение для детерминизма
                .in_set(SimSet::Behavior)
                .run_if(gameplay_running),
        );
    }
}
