//! Wave beacon: интерактивная точка старта/остановки волн.

use bevy::prelude::*;

use super::state::WaveState;
use super::systems::WaveCommand;
use crate::components::{Player, WorldPosition};
use crate::config::SimulationConfig;
use crate::player::PlayerIntent;

#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
#[require(WorldPosition)]
pub struct WaveBeacon {
    pub interact_range: f32,
}

pub fn spawn_beacon(mut commands: Commands, config: Res<SimulationConfig>) {
    let (x, y) = config.beacon.position;
    commands.spawn((
        WaveBeacon {
            interact_range: config.beacon.interact_range,
        },
        WorldPosition(Vec2::new(x, y)),
    ));
}

/// System: interact рядом с beacon → Start (волна не идёт) / Stop (идёт)
pub fn interact_with_beacon(
    intent: Res<PlayerIntent>,
    player: Query<&WorldPosition, With<Player>>,
    beacons: Query<(&WaveBeacon, &WorldPosition)>,
    state: Res<WaveState>,
    mut wave_commands: EventWriter<WaveCommand>,
) {
    if !intent.interact {
        return;
    }
    let Ok(player_pos) = player.single() else {
        return;
    };

    let in_range = beacons
        .iter()
        .any(|(beacon, position)| position.0.distance(player_pos.0) <= beacon.interact_range);
    if !in_range {
        return;
    }

    let command = if state.in_progress {
        WaveCommand::Stop
    } else {
        WaveCommand::Start
    };
    crate::log(&format!("Beacon interact → {:?}", command));
    wave_commands.write(command);
}
