//! Player spawn.

use bevy::prelude::*;

use crate::components::{Actor, Faction, Heading, Health, Player, PlayerState, WorldPosition};
use crate::config::{PlayerSettings, SimulationConfig};

/// Спавн игрока в spawn_point с полными ресурсами
pub fn spawn_player(commands: &mut Commands, settings: &PlayerSettings) -> Entity {
    let (x, y) = settings.spawn_point;
    let entity = commands
        .spawn((
            Player,
            Actor { faction: Faction::Player },
            Health::new(settings.max_health),
            PlayerState::from_settings(settings),
            WorldPosition(Vec2::new(x, y)),
            Heading::default(),
        ))
        .id();

    crate::log_info(&format!("Player spawned: {:?} at ({}, {})", entity, x, y));
    entity
}

/// Startup system
pub fn spawn_player_on_startup(mut commands: Commands, config: Res<SimulationConfig>) {
    spawn_player(&mut commands, &config.player);
}
