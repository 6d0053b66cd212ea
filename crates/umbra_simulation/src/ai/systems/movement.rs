//! AI movement systems (Directive → Velocity + Heading).
//!
//! Velocity интегрируется в FixedUpdate (crate::physics), здесь только intent.

use bevy::prelude::*;

use crate::ai::{Directive, Enemy, EnemyKind};
use crate::combat::RangedWeapon;
use crate::components::{Heading, Velocity, WorldPosition};
use crate::config::{BehaviorSettings, SimulationConfig};

/// Система: применение Directive к движению врагов
pub fn apply_directives(
    mut agents: Query<(
        &Enemy,
        &Directive,
        &WorldPosition,
        &mut Heading,
        &mut Velocity,
        Option<&RangedWeapon>,
    )>,
    config: Res<SimulationConfig>,
    time: Res<Time>,
) {
    let delta = time.delta_secs();
    let settings = &config.behavior;

    for (enemy, directive, position, mut heading, mut velocity, weapon) in agents.iter_mut() {
        match *directive {
            Directive::PatrolMove { direction } => {
                velocity.0 = direction * settings.move_speed * settings.patrol_speed_factor;
                heading.rotate_towards(direction, settings.patrol_turn_rate_deg.to_radians() * delta);
            }

            Directive::Hold => {
                velocity.0 = Vec2::ZERO;
            }

            Directive::LookAround => {
                velocity.0 = Vec2::ZERO;
                heading.rotate_by(settings.look_turn_rate_deg.to_radians() * delta);
            }

            Directive::Engage { target, .. } => {
                let max_turn = settings.combat_turn_rate_deg.to_radians() * delta;
                velocity.0 = match (enemy.kind, weapon) {
                    (EnemyKind::Ranged, Some(weapon)) => {
                        let to_target = target - position.0;
                        heading.rotate_towards(to_target, max_turn);
                        maintain_distance(
                            position.0,
                            target,
                            weapon.preferred_distance,
                            weapon.tolerance,
                            settings.move_speed,
                        )
                    }
                    // Ranged без оружия ведёт себя как melee
                    _ => chase(position.0, &mut heading, target, max_turn, settings),
                };
            }
        }
    }
}

/// Melee pursuit: доворачиваемся к цели и бежим вдоль heading.
///
/// У самой last known position останавливаемся (иначе кружим вокруг точки).
pub fn chase(
    position: Vec2,
    heading: &mut Heading,
    target: Vec2,
    max_turn: f32,
    settings: &BehaviorSettings,
) -> Vec2 {
    let to_target = target - position;
    heading.rotate_towards(to_target, max_turn);

    if to_target.length() <= settings.arrive_radius {
        Vec2::ZERO
    } else {
        heading.0 * settings.move_speed
    }
}

/// Ranged stand-off: отходим если ближе preferred−tolerance,
/// подходим если дальше preferred+tolerance, иначе стоим.
pub fn maintain_distance(position: Vec2, target: Vec2, preferred: f32, tolerance: f32, speed: f32) -> Vec2 {
    let to_target = target - position;
    let distance = to_target.length();
    let direction = to_target.normalize_or_zero();

    if distance < preferred - tolerance {
        -direction * speed
    } else if distance > preferred + tolerance {
        direction * speed
    } else {
        Vec2::ZERO
    }
}
