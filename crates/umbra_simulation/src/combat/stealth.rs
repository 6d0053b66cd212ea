//! Stealth kill: мгновенное убийство врага, который не знает об игроке.

use bevy::prelude::*;

use super::damage::{DamageEvent, DamageSource};
use crate::ai::{BehaviorState, Enemy};
use crate::components::{Health, WorldPosition};

/// Урон stealth kill (гарантированно больше любого max HP)
pub const STEALTH_KILL_DAMAGE: u32 = 9999;

/// Event: попытка stealth kill из позиции source
#[derive(Event, Debug, Clone)]
pub struct StealthKillAttempt {
    pub source: Entity,
    pub range: f32,
}

/// Кандидат для stealth kill
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StealthCandidate {
    pub entity: Entity,
    pub position: Vec2,
    /// Враг в Pursuit/Memory - stealth kill невозможен
    pub aware: bool,
}

/// Выбор цели: ближайший не-aware враг в радиусе, ничья → меньший Entity.
pub fn select_stealth_kill_target(
    origin: Vec2,
    range: f32,
    candidates: impl IntoIterator<Item = StealthCandidate>,
) -> Option<Entity> {
    candidates
        .into_iter()
        .filter(|candidate| !candidate.aware)
        .map(|candidate| (candidate.entity, origin.distance(candidate.position)))
        .filter(|(_, distance)| *distance <= range)
        .min_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)))
        .map(|(entity, _)| entity)
}

/// System: StealthKillAttempt → DamageEvent(9999) по одной цели
///
/// Невалидная цель (нет, все aware, вне радиуса) - no-op.
pub fn process_stealth_kills(
    mut attempts: EventReader<StealthKillAttempt>,
    sources: Query<&WorldPosition>,
    enemies: Query<(Entity, &WorldPosition, &BehaviorState, &Health), With<Enemy>>,
    mut damage_events: EventWriter<DamageEvent>,
) {
    for attempt in attempts.read() {
        let Ok(origin) = sources.get(attempt.source) else {
            continue;
        };

        let candidates = enemies
            .iter()
            .filter(|(_, _, _, health)| health.is_alive())
            .map(|(entity, position, state, _)| StealthCandidate {
                entity,
                position: position.0,
                aware: state.is_player_detected(),
            });

        match select_stealth_kill_target(origin.0, attempt.range, candidates) {
            Some(target) => {
                crate::log_info(&format!("🗡️ Stealth kill: {:?} → {:?}", attempt.source, target));
                damage_events.write(DamageEvent {
                    source: Some(attempt.source),
                    target,
                    amount: STEALTH_KILL_DAMAGE,
                    kind: DamageSource::StealthKill,
                });
            }
            None => crate::log("Stealth kill: no unaware target in range"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(index: u32, x: f32, aware: bool) -> StealthCandidate {
        StealthCandidate {
            entity: Entity::from_raw(index),
            position: Vec2::new(x, 0.0),
            aware,
        }
    }

    #[test]
    fn test_aware_enemy_cannot_be_stealth_killed() {
        let target = select_stealth_kill_target(Vec2::ZERO, 1.2, [candidate(1, 0.5, true)]);
        assert_eq!(target, None);
    }

    #[test]
    fn test_nearest_unaware_wins() {
        let target = select_stealth_kill_target(
            Vec2::ZERO,
            1.2,
            [
                candidate(1, 1.0, false),
                candidate(2, 0.3, true), // ближе, но aware
                candidate(3, 0.6, false),
                candidate(4, 5.0, false), // вне радиуса
            ],
        );
        assert_eq!(target, Some(Entity::from_raw(3)));
    }

    #[test]
    fn test_tie_broken_by_entity_order() {
        let target = select_stealth_kill_target(
            Vec2::ZERO,
            1.2,
            [candidate(7, 0.5, false), candidate(2, -0.5, false)],
        );
        assert_eq!(target, Some(Entity::from_raw(2)));
    }

    #[test]
    fn test_range_is_inclusive() {
        let target = select_stealth_kill_target(Vec2::ZERO, 1.2, [candidate(1, 1.2, false)]);
        assert_eq!(target, Some(Entity::from_raw(1)));
    }
}
