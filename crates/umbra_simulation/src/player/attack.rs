//! Player attacks: fireball, slash, stealth kill.

use bevy::prelude::*;

use super::intent::PlayerIntent;
use crate::ai::Enemy;
use crate::combat::{spawn_projectile, DamageEvent, DamageSource, Dead, StealthKillAttempt};
use crate::components::{Faction, Heading, Health, Player, PlayerState, WeaponSlot, WorldPosition};
use crate::config::{PlayerSettings, SimulationConfig};

/// Event: swing начат (attack window открыт)
#[derive(Event, Debug, Clone)]
pub struct SwingStarted {
    pub attacker: Entity,
    pub attack_point: Vec2,
    pub hits: usize,
}

/// System: атаки игрока по intents
///
/// - Primary: fireball в слоте Fireball (без маны - ничего), slash в слоте Slash
/// - Secondary: slash
/// - Slash не начинается, пока открыто attack window
#[allow(clippy::too_many_arguments)]
pub fn player_attacks(
    mut commands: Commands,
    intent: Res<PlayerIntent>,
    config: Res<SimulationConfig>,
    time: Res<Time>,
    mut player: Query<(Entity, &mut PlayerState, &WorldPosition, &Heading), (With<Player>, Without<Dead>)>,
    enemies: Query<(Entity, &WorldPosition, &Health), With<Enemy>>,
    mut damage_events: EventWriter<DamageEvent>,
    mut stealth_events: EventWriter<StealthKillAttempt>,
    mut swing_events: EventWriter<SwingStarted>,
) {
    let Ok((entity, mut state, position, heading)) = player.single_mut() else {
        return;
    };
    let settings = &config.player;

    state.attack_timer = (state.attack_timer - time.delta_secs()).max(0.0);

    if let Some(slot) = intent.select_slot {
        state.slot = slot;
    }

    let mut swing = intent.attack_secondary;
    if intent.attack_primary {
        match state.slot {
            WeaponSlot::Fireball => {
                if state.mana.consume(settings.fireball_mana_cost) {
                    let direction = fireball_direction(position.0, intent.aim_point, heading.0);
                    spawn_projectile(
                        &mut commands,
                        entity,
                        Faction::Player,
                        position.0,
                        direction * settings.fireball_speed,
                        settings.fireball_damage,
                        settings.fireball_lifetime,
                        settings.hit_radius,
                    );
                    crate::log(&format!("🔥 Fireball towards {:?}", direction));
                } else {
                    crate::log("Not enough mana for fireball");
                }
            }
            WeaponSlot::Slash => swing = true,
        }
    }

    if swing && !state.is_attacking() {
        state.attack_timer = settings.attack_duration;

        let attack_point = position.0 + heading.0 * settings.melee_reach;
        let targets = swing_targets(
            attack_point,
            settings,
            enemies
                .iter()
                .filter(|(_, _, health)| health.is_alive())
                .map(|(enemy, pos, _)| (enemy, pos.0)),
        );

        for &target in &targets {
            damage_events.write(DamageEvent {
                source: Some(entity),
                target,
                amount: settings.melee_damage,
                kind: DamageSource::Melee,
            });
        }
        swing_events.write(SwingStarted {
            attacker: entity,
            attack_point,
            hits: targets.len(),
        });
    }

    if intent.stealth_kill {
        stealth_events.write(StealthKillAttempt {
            source: entity,
            range: settings.stealth_kill_range,
        });
    }
}

/// Направление fireball: к прицелу, иначе по heading
pub fn fireball_direction(origin: Vec2, aim_point: Option<Vec2>, heading: Vec2) -> Vec2 {
    aim_point
        .and_then(|aim| (aim - origin).try_normalize())
        .unwrap_or(heading)
}

/// Все враги в радиусе melee_range от attack point
pub fn swing_targets(
    attack_point: Vec2,
    settings: &PlayerSettings,
    enemies: impl Iterator<Item = (Entity, Vec2)>,
) -> Vec<Entity> {
    enemies
        .filter(|(_, position)| position.distance(attack_point) <= settings.melee_range)
        .map(|(entity, _)| entity)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fireball_direction_prefers_aim() {
        let direction = fireball_direction(Vec2::ZERO, Some(Vec2::new(0.0, -4.0)), Vec2::X);
        assert_eq!(direction, Vec2::new(0.0, -1.0));

        // Прицел в точке игрока → heading
        assert_eq!(fireball_direction(Vec2::ONE, Some(Vec2::ONE), Vec2::X), Vec2::X);
        assert_eq!(fireball_direction(Vec2::ZERO, None, Vec2::Y), Vec2::Y);
    }

    #[test]
    fn test_swing_hits_everyone_in_range() {
        let settings = PlayerSettings::default();
        let enemies = [
            (Entity::from_raw(1), Vec2::new(0.5, 0.0)),
            (Entity::from_raw(2), Vec2::new(1.5, 0.0)),
            (Entity::from_raw(3), Vec2::new(3.0, 0.0)),
        ];

        let hits = swing_targets(Vec2::new(0.5, 0.0), &settings, enemies.into_iter());
        assert_eq!(hits, vec![Entity::from_raw(1), Entity::from_raw(2)]);
    }
}
