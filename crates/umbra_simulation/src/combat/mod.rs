//! Combat system module
//!
//! ECS ответственность:
//! - Health: единственная точка изменения - resolve_damage
//! - Источники урона: снаряды, касание, swing игрока, stealth kill
//! - Events: DamageEvent (запрос) → DamageDealt / EntityDied (результат)
//!
//! Смерть врага = despawn + EntityDied (волны считают потери по событию),
//! смерть игрока = Dead marker + EntityDied (волны переходят в EndGame).

use bevy::prelude::*;

pub mod contact;
pub mod damage;
pub mod projectile;
pub mod stealth;
pub mod weapon;

#[cfg(test)]
mod damage_tests;

// Re-export основных типов
pub use contact::ContactDamage;
pub use damage::{DamageDealt, DamageEvent, DamageSource, Dead, EntityDied};
pub use projectile::{spawn_projectile, Projectile};
pub use stealth::{select_stealth_kill_target, StealthCandidate, StealthKillAttempt, STEALTH_KILL_DAMAGE};
pub use weapon::{RangedWeapon, WeaponFired};

use crate::{gameplay_running, SimSet};

/// Combat Plugin
///
/// Регистрирует combat системы в Update (SimSet::Combat).
///
/// Порядок выполнения:
/// 1. ai_ranged_fire - cooldown + spell projectiles
/// 2. tick_projectiles - lifetime
/// 3. apply_contact_damage - касание melee врага → DamageEvent
/// 4. process_stealth_kills - StealthKillAttempt → DamageEvent
/// 5. resolve_damage - DamageEvent → Health, DamageDealt, EntityDied
///
/// FixedUpdate: process_projectile_hits после каждого шага integrate_velocity.
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        // Регистрация событий
        app.add_event::<DamageEvent>()
            .add_event::<DamageDealt>()
            .add_event::<EntityDied>()
            .add_event::<StealthKillAttempt>()
            .add_event::<WeaponFired>();

        app.add_systems(
            Update,
            (
                weapon::ai_ranged_fire,
                projectile::tick_projectiles,
                contact::apply_contact_damage,
                stealth::process_stealth_kills,
                damage::resolve_damage,
            )
                .chain() // Последовательное выполнение
                .in_set(SimSet::Combat)
                .run_if(gameplay_running),
        );

        app.add_systems(
            FixedUpdate,
            projectile::process_projectile_hits.after(crate::physics::integrate_velocity),
        );
    }
}
