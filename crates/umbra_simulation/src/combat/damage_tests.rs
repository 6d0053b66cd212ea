//! Tests for damage resolution.

#[cfg(test)]
mod tests {
    use super::super::damage::*;
    use crate::components::{Actor, Faction, Health};
    use bevy::prelude::*;
    use proptest::prelude::*;

    fn damage_app() -> App {
        let mut app = App::new();
        app.add_event::<DamageEvent>()
            .add_event::<DamageDealt>()
            .add_event::<EntityDied>()
            .add_systems(Update, resolve_damage);
        app
    }

    fn hit(app: &mut App, target: Entity, amount: u32) {
        app.world_mut().send_event(DamageEvent {
            source: None,
            target,
            amount,
            kind: DamageSource::Melee,
        });
    }

    fn count<E: Event>(app: &App) -> usize {
        let events = app.world().resource::<Events<E>>();
        events.get_cursor().read(events).count()
    }

    #[test]
    fn test_enemy_death_despawns_and_notifies_once() {
        let mut app = damage_app();
        let enemy = app
            .world_mut()
            .spawn((Actor { faction: Faction::Enemy }, Health::new(100)))
            .id();

        hit(&mut app, enemy, 60);
        hit(&mut app, enemy, 60);
        hit(&mut app, enemy, 60); // По уже мёртвому - no-op
        app.update();

        assert_eq!(count::<EntityDied>(&app), 1);
        assert_eq!(count::<DamageDealt>(&app), 2);
        assert!(app.world().get_entity(enemy).is_err(), "enemy should be despawned");
    }

    #[test]
    fn test_damage_dealt_reports_remaining_fraction() {
        let mut app = damage_app();
        let enemy = app
            .world_mut()
            .spawn((Actor { faction: Faction::Enemy }, Health::new(100)))
            .id();

        hit(&mut app, enemy, 25);
        app.update();

        let events = app.world().resource::<Events<DamageDealt>>();
        let dealt: Vec<_> = events.get_cursor().read(events).cloned().collect();
        assert_eq!(dealt.len(), 1);
        assert_eq!(dealt[0].damage, 25);
        assert_eq!(dealt[0].remaining_fraction, 0.75);
    }

    #[test]
    fn test_player_death_marks_dead_without_despawn() {
        let mut app = damage_app();
        let player = app
            .world_mut()
            .spawn((Actor { faction: Faction::Player }, Health::new(10)))
            .id();

        hit(&mut app, player, 50);
        app.update();

        let entity = app.world().entity(player);
        assert!(entity.contains::<Dead>());
        assert_eq!(entity.get::<Health>().map(|h| h.current), Some(0));
        assert_eq!(count::<EntityDied>(&app), 1);
    }

    proptest! {
        #[test]
        fn prop_health_clamped_and_single_death(hits in prop::collection::vec(0u32..200, 1..40)) {
            let mut health = Health::new(100);
            let mut deaths = 0;

            for amount in hits {
                let before = health.current;
                match health.take_damage(amount) {
                    crate::components::HitOutcome::Killed => deaths += 1,
                    crate::components::HitOutcome::AlreadyDead => prop_assert_eq!(before, 0),
                    crate::components::HitOutcome::Damaged => prop_assert!(health.current > 0),
                }
                prop_assert!(health.current <= before);
                prop_assert!(health.current <= health.max);
            }

            prop_assert!(deaths <= 1);
            prop_assert_eq!(deaths == 1, health.current == 0);
        }
    }
}
