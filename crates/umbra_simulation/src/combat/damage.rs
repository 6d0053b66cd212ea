//! Damage resolution and death systems.
//!
//! Единственная точка изменения Health: все источники урона (swing, снаряды,
//! касание, stealth kill) пишут DamageEvent, resolve_damage применяет.

use bevy::prelude::*;

use crate::components::{Actor, Faction, HitOutcome, Health};
use crate::waves::WaveMember;

/// Источник урона
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DamageSource {
    /// Удар игрока (slash)
    Melee,
    /// Снаряд (fireball / enemy spell)
    Ranged,
    /// Касание melee врага
    Contact,
    /// Мгновенное убийство со спины
    StealthKill,
}

/// Event: запрос на нанесение урона (ephemeral combat event)
#[derive(Event, Debug, Clone)]
pub struct DamageEvent {
    /// Кто нанёс (None = environment)
    pub source: Option<Entity>,
    pub target: Entity,
    pub amount: u32,
    pub kind: DamageSource,
}

/// Event: урон применён (для health bars / VFX)
#[derive(Event, Debug, Clone)]
pub struct DamageDealt {
    pub attacker: Option<Entity>,
    pub target: Entity,
    /// Фактически снятое HP (после clamp)
    pub damage: u32,
    pub source: DamageSource,
    /// Оставшаяся доля HP (0.0..=1.0) - значение для health bar
    pub remaining_fraction: f32,
}

/// Event: актор умер (ровно один раз на актора)
#[derive(Event, Debug, Clone)]
pub struct EntityDied {
    pub entity: Entity,
    pub killer: Option<Entity>,
    pub faction: Faction,
    /// Generation волны, к которой принадлежал враг (None у игрока)
    pub wave_generation: Option<u32>,
}

/// Компонент-маркер: entity мертв (Health == 0), но не деспавнен (игрок)
#[derive(Component, Debug)]
pub struct Dead;

/// Система: применение DamageEvent
///
/// - HP clamp в ноль (saturating)
/// - Killed → EntityDied; враг деспавнится, игрок получает Dead
/// - Урон по уже мёртвому - no-op (никаких повторных death events)
pub fn resolve_damage(
    mut commands: Commands,
    mut damage_events: EventReader<DamageEvent>,
    mut targets: Query<(&mut Health, &Actor, Option<&WaveMember>)>,
    mut dealt_events: EventWriter<DamageDealt>,
    mut died_events: EventWriter<EntityDied>,
) {
    for event in damage_events.read() {
        let Ok((mut health, actor, member)) = targets.get_mut(event.target) else {
            // Цель уже деспавнена (умерла раньше в этом кадре)
            continue;
        };

        let before = health.current;
        let outcome = health.take_damage(event.amount);
        if outcome == HitOutcome::AlreadyDead {
            continue;
        }

        dealt_events.write(DamageDealt {
            attacker: event.source,
            target: event.target,
            damage: before - health.current,
            source: event.kind,
            remaining_fraction: health.fraction(),
        });

        crate::log(&format!(
            "💥 {:?} hit {:?} for {} ({:?}), HP: {} → {}",
            event.source, event.target, event.amount, event.kind, before, health.current
        ));

        if outcome != HitOutcome::Killed {
            continue;
        }

        died_events.write(EntityDied {
            entity: event.target,
            killer: event.source,
            faction: actor.faction,
            wave_generation: member.map(|m| m.generation),
        });

        match actor.faction {
            Faction::Enemy => {
                crate::log_info(&format!("⚰️ Enemy {:?} died, despawning", event.target));
                commands.entity(event.target).despawn();
            }
            Faction::Player => {
                crate::log_info(&format!("☠️ Player {:?} died", event.target));
                commands.entity(event.target).insert(Dead);
            }
        }
    }
}
