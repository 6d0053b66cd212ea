//! Kinematic движение на top-down плоскости.
//!
//! Velocity выставляют AI/controller (Update), здесь только интеграция.
//! Детерминизм: fixed timestep (60Hz).

use bevy::prelude::*;

use super::obstacles::Obstacles;
use crate::combat::Projectile;
use crate::components::{PlayerState, Velocity, WorldPosition};

/// Система интеграции velocity → WorldPosition
///
/// - Акторы скользят вдоль препятствий (оси X/Y проверяются раздельно)
/// - Снаряд, влетевший в препятствие, деспавнится
/// - Игрок в vault не интегрируется (позицию ведёт advance_vaults)
pub fn integrate_velocity(
    mut commands: Commands,
    mut bodies: Query<(Entity, &Velocity, &mut WorldPosition, Option<&Projectile>, Option<&PlayerState>)>,
    obstacles: Res<Obstacles>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (entity, velocity, mut position, projectile, player) in bodies.iter_mut() {
        if velocity.0 == Vec2::ZERO || player.is_some_and(PlayerState::is_vaulting) {
            continue;
        }

        let step = velocity.0 * delta;
        if projectile.is_some() {
            position.0 += step;
            if obstacles.is_blocked(position.0) {
                commands.entity(entity).despawn();
            }
            continue;
        }

        position.0 = slide(position.0, step, &obstacles);
    }
}

/// Шаг с разделением по осям: упёрлись по X - всё ещё можем ехать по Y
pub fn slide(from: Vec2, step: Vec2, obstacles: &Obstacles) -> Vec2 {
    let full = from + step;
    if obstacles.allows_step(from, full) {
        return full;
    }

    let mut position = from;
    let along_x = position + Vec2::new(step.x, 0.0);
    if obstacles.allows_step(position, along_x) {
        position = along_x;
    }
    let along_y = position + Vec2::new(0.0, step.y);
    if obstacles.allows_step(position, along_y) {
        position = along_y;
    }
    position
}

/// Система vault: линейная интерполяция start → end за duration
pub fn advance_vaults(mut players: Query<(&mut PlayerState, &mut WorldPosition)>, time: Res<Time<Fixed>>) {
    let delta = time.delta_secs();

    for (mut state, mut position) in players.iter_mut() {
        let Some(vault) = state.vault.as_mut() else {
            continue;
        };

        vault.elapsed += delta;
        position.0 = vault.sample();

        if vault.is_finished() {
            state.vault = None;
        }
    }
}
