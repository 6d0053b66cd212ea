//! Contact damage (melee враг касается игрока).

use bevy::prelude::*;

use super::damage::{DamageEvent, DamageSource};
use crate::components::{Health, Player, WorldPosition};
use crate::config::ContactSettings;

/// Урон при касании. Наносится один раз на начало контакта.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct ContactDamage {
    pub damage: u32,
    pub radius: f32,
    /// Касались в прошлом тике
    pub touching: bool,
}

impl ContactDamage {
    pub fn from_settings(settings: &ContactSettings) -> Self {
        Self {
            damage: settings.damage,
            radius: settings.radius,
            touching: false,
        }
    }

    /// Обновляет флаг касания; true только на переходе "не касался → касается"
    pub fn update_contact(&mut self, touching_now: bool) -> bool {
        let started = touching_now && !self.touching;
        self.touching = touching_now;
        started
    }
}

/// System: contact damage по игроку
pub fn apply_contact_damage(
    mut attackers: Query<(Entity, &WorldPosition, &mut ContactDamage)>,
    player: Query<(Entity, &WorldPosition, &Health), With<Player>>,
    mut damage_events: EventWriter<DamageEvent>,
) {
    let target = player
        .single()
        .ok()
        .filter(|(_, _, health)| health.is_alive())
        .map(|(entity, position, _)| (entity, position.0));

    for (entity, position, mut contact) in attackers.iter_mut() {
        let touching_now = target.is_some_and(|(_, target_pos)| position.0.distance(target_pos) <= contact.radius);
        if !contact.update_contact(touching_now) {
            continue;
        }

        let Some((player_entity, _)) = target else {
            continue;
        };

        damage_events.write(DamageEvent {
            source: Some(entity),
            target: player_entity,
            amount: contact.damage,
            kind: DamageSource::Contact,
        });
    }
}
