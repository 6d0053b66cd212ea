//! Wave controller systems.

use bevy::prelude::*;

use super::spawn::{roll_enemy_kind, spawn_enemy, try_random_walkable_position, SpawnArea, SpawnError, WaveMember};
use super::state::{CountdownTick, EndGameOutcome, WaveAdvance, WaveState};
use crate::ai::Enemy;
use crate::combat::{Dead, EntityDied, Projectile};
use crate::components::{Faction, Heading, Health, Player, PlayerState, Velocity, WorldPosition};
use crate::config::SimulationConfig;
use crate::player::PlayerIntent;
use crate::DeterministicRng;

/// Команда wave controller'у (beacon, UI, тесты)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaveCommand {
    Start,
    Stop,
}

/// Event: полный сброс сессии (restart после поражения)
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct SessionReset;

/// System: Start/Stop команды
pub fn handle_wave_commands(
    mut commands: Commands,
    mut wave_commands: EventReader<WaveCommand>,
    mut state: ResMut<WaveState>,
    enemies: Query<Entity, With<Enemy>>,
) {
    for command in wave_commands.read() {
        match command {
            WaveCommand::Start => {
                if state.start_waves() {
                    crate::log_info("🌊 Waves started");
                } else {
                    crate::log("Waves already started, ignoring start");
                }
            }
            WaveCommand::Stop => {
                if !state.stop_waves() {
                    crate::log("End game in progress, ignoring stop");
                    continue;
                }
                let mut despawned = 0;
                for entity in enemies.iter() {
                    commands.entity(entity).despawn();
                    despawned += 1;
                }
                crate::log_info(&format!("🛑 Waves stopped, {} enemies despawned", despawned));
            }
        }
    }
}

/// System: смерти → счётчик волны / поражение
///
/// Смерти врагов прошлых поколений (до stop/reset) игнорируются.
pub fn track_casualties(mut died_events: EventReader<EntityDied>, mut state: ResMut<WaveState>) {
    for died in died_events.read() {
        match died.faction {
            Faction::Enemy => {
                if died.wave_generation != Some(state.generation) {
                    continue;
                }
                let cleared = state.enemy_defeated();
                crate::log(&format!("Enemies left: {}", state.enemies_alive));
                if cleared {
                    crate::log_info(&format!("✅ Wave {}/{} cleared", state.current_wave, state.total_waves));
                }
            }
            Faction::Player => {
                if state.trigger_end_game(EndGameOutcome::Defeat) {
                    crate::log_info("💀 Player died → EndGame (defeat)");
                }
            }
        }
    }
}

/// System: inter-wave delay → следующая волна (или победа)
pub fn advance_waves(
    mut commands: Commands,
    mut state: ResMut<WaveState>,
    mut rng: ResMut<DeterministicRng>,
    area: Res<SpawnArea>,
    config: Res<SimulationConfig>,
    time: Res<Time>,
) {
    if !state.tick_delay(time.delta_secs()) {
        return;
    }

    match state.begin_next_wave() {
        WaveAdvance::Spawn { wave, count } => {
            crate::log_info(&format!("🌊 Wave {}/{} begins ({} enemies)", wave, state.total_waves, count));

            let generation = state.generation;
            for _ in 0..count {
                match spawn_wave_enemy(&mut commands, &config, &area, generation, &mut rng) {
                    Ok(entity) => {
                        state.record_spawned();
                        crate::log(&format!("Spawned enemy {:?}", entity));
                    }
                    Err(error) => crate::log_error(&format!("Enemy spawn failed: {}", error)),
                }
            }

            state.finish_spawning();
            if state.enemies_alive < count {
                crate::log_warning(&format!("Wave {}: only {}/{} enemies spawned", wave, state.enemies_alive, count));
            }
        }
        WaveAdvance::Victory => crate::log_info("🏆 All waves cleared → EndGame (victory)"),
    }
}

fn spawn_wave_enemy(
    commands: &mut Commands,
    config: &SimulationConfig,
    area: &SpawnArea,
    generation: u32,
    rng: &mut DeterministicRng,
) -> Result<Entity, SpawnError> {
    let position = try_random_walkable_position(area.0.as_ref(), &mut rng.rng, config.waves.spawn_attempts)?;
    let kind = roll_enemy_kind(&config.waves.roster, &mut rng.rng)?;
    Ok(spawn_enemy(commands, config, kind, position, generation, &mut rng.rng))
}

/// System: EndGame - заморозка gameplay времени + real-time countdown
///
/// Работает и на паузе (Time<Real> не зависит от Time<Virtual>).
pub fn run_end_game(
    mut state: ResMut<WaveState>,
    mut virtual_time: ResMut<Time<Virtual>>,
    real_time: Res<Time<Real>>,
    mut reset_events: EventWriter<SessionReset>,
) {
    if !state.is_end_game() {
        return;
    }

    if !virtual_time.is_paused() {
        virtual_time.pause();
        if let Some(end_game) = state.end_game() {
            crate::log_info(&format!("⏸️ EndGame: \"{}\", gameplay frozen", end_game.message));
        }
    }

    match state.tick_countdown(real_time.delta_secs()) {
        CountdownTick::Ticked(remaining) => crate::log(&format!("Restart countdown: {}", remaining)),
        CountdownTick::Restart => {
            crate::log_info("🔄 Countdown finished → session reset");
            reset_events.write(SessionReset);
        }
        CountdownTick::Finished => crate::log("EndGame countdown finished, session stays frozen"),
        CountdownTick::Inactive | CountdownTick::Pending => {}
    }
}

/// System: полный сброс сессии
///
/// Враги и снаряды удаляются, волны → Idle, игрок восстанавливается на точке спавна,
/// gameplay время снова идёт.
#[allow(clippy::too_many_arguments)]
pub fn reset_session(
    mut commands: Commands,
    mut reset_events: EventReader<SessionReset>,
    mut state: ResMut<WaveState>,
    mut virtual_time: ResMut<Time<Virtual>>,
    mut intent: ResMut<PlayerIntent>,
    config: Res<SimulationConfig>,
    transient: Query<Entity, Or<(With<Enemy>, With<Projectile>, With<WaveMember>)>>,
    mut player: Query<
        (Entity, &mut Health, &mut PlayerState, &mut WorldPosition, &mut Heading, &mut Velocity),
        With<Player>,
    >,
) {
    if reset_events.read().count() == 0 {
        return;
    }

    for entity in transient.iter() {
        commands.entity(entity).despawn();
    }

    state.reset();
    *intent = PlayerIntent::default();

    if let Ok((entity, mut health, mut player_state, mut position, mut heading, mut velocity)) = player.single_mut() {
        let settings = &config.player;
        *health = Health::new(settings.max_health);
        *player_state = PlayerState::from_settings(settings);
        position.0 = Vec2::new(settings.spawn_point.0, settings.spawn_point.1);
        *heading = Heading::default();
        velocity.0 = Vec2::ZERO;
        commands.entity(entity).remove::<Dead>();
    }

    virtual_time.unpause();
    crate::log_info("Session reset complete");
}
