//! Wave controller module
//!
//! Idle / InterWaveDelay / WaveActive / EndGame.
//! - WaveState - единственный владелец прогресса волн
//! - Смерти приходят через EntityDied (враги не держат ссылку на контроллер)
//! - EndGame замораживает Time<Virtual>, countdown идёт по Time<Real>

use bevy::prelude::*;

pub mod beacon;
pub mod spawn;
pub mod state;
pub mod systems;


// Re-export основных типов
pub use beacon::WaveBeacon;
pub use spawn::{SpawnArea, SpawnError, SpawnSurface, WalkableTiles, WaveMember};
pub use state::{CountdownTick, EndGame, EndGameOutcome, WaveAdvance, WavePhase, WaveState};
pub use systems::{SessionReset, WaveCommand};

use crate::config::SimulationConfig;
use crate::{gameplay_running, SimSet};

/// Wave Plugin
///
/// Порядок выполнения (SimSet::Waves, после Combat):
/// 1. handle_wave_commands - Start/Stop
/// 2. track_casualties - EntityDied → счётчик / поражение
/// 3. advance_waves - delay → spawn следующей волны / победа
/// 4. run_end_game - freeze + countdown (работает на паузе)
/// 5. reset_session - SessionReset → всё с нуля (работает на паузе)
pub struct WavePlugin;

impl Plugin for WavePlugin {
    fn build(&self, app: &mut App) {
        // SimulationConfig вставляется до плагина (SimulationPlugin / create_headless_app)
        let settings = app
            .world()
            .get_resource::<SimulationConfig>()
            .map(|config| config.waves.clone())
            .unwrap_or_default();

        app.insert_resource(WaveState::from_settings(&settings))
            .init_resource::<SpawnArea>()
            .add_event::<WaveCommand>()
            .add_event::<SessionReset>();

        app.add_systems(Startup, beacon::spawn_beacon);

        app.add_systems(
            Update,
            beacon::interact_with_beacon
                .in_set(SimSet::Input)
                .run_if(gameplay_running),
        );

        app.add_systems(
            Update,
            (
                (
                    systems::handle_wave_commands,
                    systems::track_casualties,
                    systems::advance_waves,
                )
                    .chain()
                    .run_if(gameplay_running),
                systems::run_end_game,
                systems::reset_session,
            )
                .chain() // Последовательное выполнение
                .in_set(SimSet::Waves),
        );
    }
}
