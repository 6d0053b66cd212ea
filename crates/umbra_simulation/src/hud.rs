//! HUD sinks: health/stamina/mana bars и текстовые labels.
//!
//! Симуляция только пишет в sinks (set_max / set / set_text), никогда не читает.
//! Не подключённый sink - display side effect пропускается, логика не меняется.

use bevy::prelude::*;

use crate::components::{Health, Player, PlayerState};
use crate::waves::WaveState;

/// Полоска ресурса (slider)
pub trait ResourceBar: Send + Sync {
    fn set_max(&mut self, value: f32);
    fn set(&mut self, value: f32);
}

/// Текстовый label
pub trait HudLabel: Send + Sync {
    fn set_text(&mut self, text: &str);
}

/// Resource: подключённые sinks (любой может отсутствовать)
#[derive(Resource, Default)]
pub struct Hud {
    pub health: Option<Box<dyn ResourceBar>>,
    pub stamina: Option<Box<dyn ResourceBar>>,
    pub mana: Option<Box<dyn ResourceBar>>,
    pub wave_label: Option<Box<dyn HudLabel>>,
    pub enemy_label: Option<Box<dyn HudLabel>>,
    pub end_game_message: Option<Box<dyn HudLabel>>,
    pub countdown_label: Option<Box<dyn HudLabel>>,
}

fn push_bar(bar: &mut Option<Box<dyn ResourceBar>>, max: Option<f32>, value: f32) {
    if let Some(bar) = bar.as_mut() {
        if let Some(max) = max {
            bar.set_max(max);
        }
        bar.set(value);
    }
}

fn push_label(label: &mut Option<Box<dyn HudLabel>>, text: &str) {
    if let Some(label) = label.as_mut() {
        label.set_text(text);
    }
}

/// Startup: предупреждение о неподключённых sinks
pub fn report_unwired_sinks(hud: Res<Hud>) {
    let sinks = [
        ("health bar", hud.health.is_some()),
        ("stamina bar", hud.stamina.is_some()),
        ("mana bar", hud.mana.is_some()),
        ("wave label", hud.wave_label.is_some()),
        ("enemy label", hud.enemy_label.is_some()),
        ("end game message", hud.end_game_message.is_some()),
        ("countdown label", hud.countdown_label.is_some()),
    ];

    for (name, wired) in sinks {
        if !wired {
            crate::log_warning(&format!("HUD {} is not assigned, display updates skipped", name));
        }
    }
}

/// System: health/stamina/mana игрока → bars
///
/// set_max - при появлении игрока или переподключении sinks, set - после каждого изменения.
pub fn sync_player_hud(mut hud: ResMut<Hud>, player: Query<(Ref<Health>, Ref<PlayerState>), With<Player>>) {
    let Ok((health, state)) = player.single() else {
        return;
    };

    let rewired = hud.is_changed();
    // Запись в sinks не считается изменением Hud
    let hud = hud.bypass_change_detection();

    if health.is_changed() || rewired {
        let max = (health.is_added() || rewired).then_some(health.max as f32);
        push_bar(&mut hud.health, max, health.current as f32);
    }

    if state.is_changed() || rewired {
        let set_max = state.is_added() || rewired;
        push_bar(&mut hud.stamina, set_max.then_some(state.stamina.max), state.stamina.current);
        push_bar(&mut hud.mana, set_max.then_some(state.mana.max), state.mana.current);
    }
}

/// System: WaveState → labels
pub fn sync_wave_hud(mut hud: ResMut<Hud>, state: Res<WaveState>) {
    if !state.is_changed() && !hud.is_changed() {
        return;
    }
    let hud = hud.bypass_change_detection();

    push_label(&mut hud.wave_label, &state.wave_label());
    push_label(&mut hud.enemy_label, &state.enemy_label());

    match state.end_game() {
        Some(end_game) => {
            push_label(&mut hud.end_game_message, end_game.message);
            push_label(&mut hud.countdown_label, &end_game.countdown_label());
        }
        None => {
            push_label(&mut hud.end_game_message, "");
            push_label(&mut hud.countdown_label, "");
        }
    }
}

/// HUD Plugin - синхронизация в PostUpdate (после всех gameplay изменений кадра)
pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Hud>()
            .add_systems(PostStartup, report_unwired_sinks)
            .add_systems(PostUpdate, (sync_player_hud, sync_wave_hud));
    }
}
