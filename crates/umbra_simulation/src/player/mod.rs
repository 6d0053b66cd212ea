//! Player module
//!
//! Presentation слой пишет PlayerIntent каждый кадр, ECS системы применяют:
//! - controller: движение, sprint/stamina, crouch, regen, vault
//! - attack: fireball, slash, stealth kill request
//! - toggle_pause: пауза gameplay времени (кроме EndGame)

use bevy::prelude::*;

pub mod attack;
pub mod controller;
pub mod intent;
pub mod spawn;

// Re-export основных типов
pub use attack::SwingStarted;
pub use intent::PlayerIntent;
pub use spawn::spawn_player;

use crate::waves::WaveState;
use crate::{gameplay_running, SimSet};

/// Player Plugin
///
/// Порядок выполнения (SimSet::Input):
/// 1. toggle_pause - работает и на паузе
/// 2. update_player_controller - intent → state/velocity
/// 3. player_attacks - intent → projectiles / DamageEvent / StealthKillAttempt
///
/// PostUpdate: clear_intent_edges
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlayerIntent>().add_event::<SwingStarted>();

        app.add_systems(Startup, spawn::spawn_player_on_startup);

        app.add_systems(
            Update,
            (
                toggle_pause,
                (controller::update_player_controller, attack::player_attacks)
                    .chain()
                    .run_if(gameplay_running),
            )
                .chain() // Последовательное выполнение
                .in_set(SimSet::Input),
        );

        app.add_systems(PostUpdate, intent::clear_intent_edges);
    }
}

/// System: pause intent → пауза/снятие паузы Time<Virtual>
///
/// В EndGame время заморожено wave controller'ом, pause игнорируется.
pub fn toggle_pause(intent: Res<PlayerIntent>, state: Res<WaveState>, mut virtual_time: ResMut<Time<Virtual>>) {
    if !intent.pause {
        return;
    }
    if state.is_end_game() {
        crate::log("Pause ignored during end game");
        return;
    }

    if virtual_time.is_paused() {
        virtual_time.unpause();
        crate::log_info("▶️ Resumed");
    } else {
        virtual_time.pause();
        crate::log_info("⏸️ Paused");
    }
}
