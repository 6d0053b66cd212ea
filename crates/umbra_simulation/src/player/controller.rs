//! Player controller: движение, sprint/stamina, crouch, regen, vault.

use bevy::prelude::*;

use super::intent::PlayerIntent;
use crate::combat::Dead;
use crate::components::{Heading, Health, Player, PlayerState, Velocity, VaultMotion, WorldPosition};
use crate::config::{PlayerSettings, SimulationConfig};
use crate::physics::Obstacles;

/// Радиус проверки препятствия перед vault
pub const VAULT_CHECK_RADIUS: f32 = 0.4;

/// System: intent → состояние контроллера + Velocity
pub fn update_player_controller(
    intent: Res<PlayerIntent>,
    config: Res<SimulationConfig>,
    obstacles: Res<Obstacles>,
    time: Res<Time>,
    mut player: Query<
        (&mut Health, &mut PlayerState, &WorldPosition, &mut Heading, &mut Velocity),
        (With<Player>, Without<Dead>),
    >,
) {
    let Ok((mut health, mut state, position, mut heading, mut velocity)) = player.single_mut() else {
        return;
    };
    let delta = time.delta_secs();
    let settings = &config.player;

    // Поворот к прицелу
    if let Some(aim) = intent.aim_point {
        if let Some(direction) = (aim - position.0).try_normalize() {
            heading.0 = direction;
        }
    }

    state.crouching = intent.crouch_held;
    update_sprint(&mut state, intent.sprint_held, delta);
    state.mana.regenerate(delta);
    regenerate_health(&mut health, &mut state, settings.health_regen_interval, delta);

    if intent.vault {
        match vault_target(position.0, intent.move_axis, &obstacles) {
            Some(end) => {
                if state.is_vaulting() {
                    crate::log("Vault restarted, previous vault cancelled");
                }
                state.vault = Some(VaultMotion {
                    start: position.0,
                    end,
                    elapsed: 0.0,
                    duration: settings.vault_duration,
                });
                crate::log(&format!("Vaulting to {:?}", end));
            }
            None => crate::log("Vault failed: must have an obstacle in movement direction"),
        }
    }

    velocity.0 = movement_velocity(&state, intent.move_axis, settings);
}

/// Sprint: держим кнопку и stamina > 0. Stamina кончилась - lock до отпускания.
pub fn update_sprint(state: &mut PlayerState, sprint_held: bool, delta: f32) {
    if !sprint_held {
        state.sprinting = false;
        state.sprint_locked = false;
    } else if !state.sprint_locked && !state.stamina.is_empty() {
        state.sprinting = true;
    }

    if state.sprinting {
        state.stamina.drain(delta);
        if state.stamina.is_empty() {
            state.sprinting = false;
            state.sprint_locked = true;
        }
    } else {
        state.stamina.regenerate(delta);
    }
}

/// +1 HP за каждый полный интервал ниже max
pub fn regenerate_health(health: &mut Health, state: &mut PlayerState, interval: f32, delta: f32) {
    if !health.is_alive() || health.current >= health.max || interval <= 0.0 {
        state.health_regen_timer = 0.0;
        return;
    }

    state.health_regen_timer += delta;
    while state.health_regen_timer >= interval && health.current < health.max {
        state.health_regen_timer -= interval;
        health.heal(1);
    }
}

/// Куда приземлимся: точка (клетка игрока + направление), если там препятствие
pub fn vault_target(position: Vec2, move_axis: Vec2, obstacles: &Obstacles) -> Option<Vec2> {
    let direction = move_axis.try_normalize()?;
    let target = position.round() + direction;
    obstacles.overlaps_circle(target, VAULT_CHECK_RADIUS).then_some(target)
}

/// Velocity из ввода (vault блокирует движение)
pub fn movement_velocity(state: &PlayerState, move_axis: Vec2, settings: &PlayerSettings) -> Vec2 {
    if state.is_vaulting() {
        return Vec2::ZERO;
    }

    let speed = if state.sprinting {
        settings.move_speed * settings.sprint_multiplier
    } else {
        settings.move_speed
    };
    move_axis.normalize_or_zero() * speed
}
