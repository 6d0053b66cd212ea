//! Ranged weapon (enemy spell caster).
//!
//! ECS решает "можно ли стрелять" (cooldown + Directive::Engage { fire: true }),
//! снаряд - обычный entity с Projectile + Velocity.

use bevy::prelude::*;

use super::projectile::spawn_projectile;
use crate::ai::Directive;
use crate::components::{Faction, WorldPosition};
use crate::config::SimulationConfig;

/// Ranged оружие врага
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct RangedWeapon {
    /// Секунд между выстрелами (1 / fire_rate)
    pub fire_interval: f32,
    /// Остаток cooldown (0 = готов)
    pub cooldown: f32,
    pub damage: u32,
    pub projectile_speed: f32,
    pub projectile_lifetime: f32,
    /// Дистанция, которую ranged враг держит до цели
    pub preferred_distance: f32,
    pub tolerance: f32,
}

impl RangedWeapon {
    pub fn from_config(config: &SimulationConfig) -> Self {
        let ranged = &config.ranged;
        Self {
            fire_interval: 1.0 / ranged.fire_rate,
            cooldown: 0.0,
            damage: ranged.projectile_damage,
            projectile_speed: ranged.projectile_speed,
            projectile_lifetime: ranged.projectile_lifetime,
            preferred_distance: config.ranged_preferred_distance(),
            tolerance: ranged.tolerance,
        }
    }

    pub fn can_fire(&self) -> bool {
        self.cooldown <= 0.0
    }

    pub fn start_cooldown(&mut self) {
        self.cooldown = self.fire_interval;
    }

    pub fn tick(&mut self, delta: f32) {
        self.cooldown = (self.cooldown - delta).max(0.0);
    }
}

/// Event: выстрел произведён (для звука/VFX и тестов)
#[derive(Event, Debug, Clone)]
pub struct WeaponFired {
    pub shooter: Entity,
    pub origin: Vec2,
    pub direction: Vec2,
    pub damage: u32,
}

/// System: cooldown + стрельба ranged врагов
///
/// Стреляем только при активном detection (Pursuit), в Memory - нет.
pub fn ai_ranged_fire(
    mut commands: Commands,
    mut shooters: Query<(Entity, &Directive, &WorldPosition, &mut RangedWeapon)>,
    mut fired_events: EventWriter<WeaponFired>,
    config: Res<SimulationConfig>,
    time: Res<Time>,
) {
    let delta = time.delta_secs();

    for (entity, directive, position, mut weapon) in shooters.iter_mut() {
        weapon.tick(delta);

        let Directive::Engage { target, fire: true } = *directive else {
            continue;
        };
        if !weapon.can_fire() {
            continue;
        }
        let Some(direction) = (target - position.0).try_normalize() else {
            continue;
        };

        spawn_projectile(
            &mut commands,
            entity,
            Faction::Enemy,
            position.0,
            direction * weapon.projectile_speed,
            weapon.damage,
            weapon.projectile_lifetime,
            config.player.hit_radius,
        );
        weapon.start_cooldown();

        fired_events.write(WeaponFired {
            shooter: entity,
            origin: position.0,
            direction,
            damage: weapon.damage,
        });

        crate::log(&format!("🔥 Enemy {:?} casts spell towards {:?}", entity, target));
    }
}
