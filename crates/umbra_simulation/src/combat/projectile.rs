//! Projectiles: fireball игрока и spell врага.
//!
//! Движение - общий integrate_velocity (FixedUpdate). Здесь lifetime (Update)
//! и попадания (FixedUpdate, после каждого шага интеграции).

use bevy::prelude::*;

use super::damage::{DamageEvent, DamageSource};
use crate::components::{Actor, Faction, Health, Velocity, WorldPosition};

/// Снаряд в полёте
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
#[require(WorldPosition, Velocity)]
pub struct Projectile {
    pub shooter: Entity,
    /// Сторона стрелявшего - своих не бьём
    pub faction: Faction,
    pub damage: u32,
    /// Остаток жизни (секунды)
    pub lifetime: f32,
    /// Радиус попадания (снаряд + тело цели)
    pub radius: f32,
}

#[allow(clippy::too_many_arguments)]
pub fn spawn_projectile(
    commands: &mut Commands,
    shooter: Entity,
    faction: Faction,
    origin: Vec2,
    velocity: Vec2,
    damage: u32,
    lifetime: f32,
    radius: f32,
) -> Entity {
    commands
        .spawn((
            Projectile {
                shooter,
                faction,
                damage,
                lifetime,
                radius,
            },
            WorldPosition(origin),
            Velocity(velocity),
        ))
        .id()
}

/// System: lifetime снарядов
pub fn tick_projectiles(
    mut commands: Commands,
    mut projectiles: Query<(Entity, &mut Projectile)>,
    time: Res<Time>,
) {
    let delta = time.delta_secs();

    for (entity, mut projectile) in projectiles.iter_mut() {
        projectile.lifetime -= delta;
        if projectile.lifetime <= 0.0 {
            commands.entity(entity).despawn();
        }
    }
}

/// System: попадания снарядов → DamageEvent
///
/// Один снаряд - одна цель (ближайшая живая чужой стороны), затем despawn.
pub fn process_projectile_hits(
    mut commands: Commands,
    projectiles: Query<(Entity, &Projectile, &WorldPosition)>,
    targets: Query<(Entity, &Actor, &Health, &WorldPosition)>,
    mut damage_events: EventWriter<DamageEvent>,
) {
    for (entity, projectile, position) in projectiles.iter() {
        if projectile.lifetime <= 0.0 {
            continue; // уже деспавнится
        }

        let hit = targets
            .iter()
            .filter(|(target, actor, health, _)| {
                *target != projectile.shooter && actor.faction != projectile.faction && health.is_alive()
            })
            .map(|(target, _, _, target_pos)| (target, position.0.distance(target_pos.0)))
            .filter(|(_, distance)| *distance <= projectile.radius)
            .min_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));

        let Some((target, _)) = hit else {
            continue;
        };

        damage_events.write(DamageEvent {
            source: Some(projectile.shooter),
            target,
            amount: projectile.damage,
            kind: DamageSource::Ranged,
        });
        commands.entity(entity).despawn();

        crate::log(&format!(
            "🎯 Projectile {:?} (shooter {:?}) hit {:?}",
            entity, projectile.shooter, target
        ));
    }
}
