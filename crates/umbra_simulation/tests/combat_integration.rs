//! Интеграционные тесты боя
//!
//! Stealth kill против Patrol / Pursuit, contact damage, снаряды, атаки игрока.

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use umbra_simulation::ai::{BehaviorState, Enemy, EnemyKind};
use umbra_simulation::combat::{ContactDamage, Projectile, RangedWeapon};
use umbra_simulation::config::SimulationConfig;
use umbra_simulation::{
    create_headless_app, Actor, EntityDied, Faction, Heading, Health, Player, PlayerIntent, PlayerState,
    SimulationPlugin, Velocity, WeaponSlot, WorldPosition,
};

fn combat_app() -> App {
    let mut app = create_headless_app(7);
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(250)))
        .add_plugins(SimulationPlugin);
    app.update(); // Startup: игрок в (0, 0)
    app
}

/// Враг без оружия/contact damage (только сенсоры + FSM)
fn spawn_passive_enemy(app: &mut App, position: Vec2, heading: Vec2, state: BehaviorState) -> Entity {
    let sensor = app.world().resource::<SimulationConfig>().sensors.melee;
    app.world_mut()
        .spawn((
            Enemy { kind: EnemyKind::Melee },
            Actor { faction: Faction::Enemy },
            Health::new(100),
            WorldPosition(position),
            Heading(heading),
            sensor,
            state,
        ))
        .id()
}

fn player(app: &mut App) -> Entity {
    let world = app.world_mut();
    let mut query = world.query_filtered::<Entity, With<Player>>();
    query.single(world).expect("player spawned")
}

fn deaths(app: &App) -> usize {
    let events = app.world().resource::<Events<EntityDied>>();
    events.get_cursor().read(events).count()
}

#[test]
fn test_stealth_kill_against_patrol_is_lethal() {
    let mut app = combat_app();
    // Стоит спиной к игроку, дальше proximity радиуса (0.7) → не видит
    let enemy = spawn_passive_enemy(&mut app, Vec2::new(0.0, 1.0), Vec2::Y, BehaviorState::default());

    app.world_mut().resource_mut::<PlayerIntent>().stealth_kill = true;
    app.update();

    assert!(app.world().get_entity(enemy).is_err(), "patrolling enemy should be killed");
    assert_eq!(deaths(&app), 1);
}

#[test]
fn test_stealth_kill_against_pursuit_does_nothing() {
    let mut app = combat_app();
    // Смотрит прямо на игрока → Pursuit
    let enemy = spawn_passive_enemy(
        &mut app,
        Vec2::new(0.0, 1.0),
        -Vec2::Y,
        BehaviorState::Pursuit { last_seen: Vec2::ZERO },
    );

    app.world_mut().resource_mut::<PlayerIntent>().stealth_kill = true;
    app.update();

    let health = app.world().get::<Health>(enemy).expect("enemy still alive");
    assert_eq!(health.current, 100);
    assert!(app.world().get::<BehaviorState>(enemy).is_some_and(BehaviorState::is_player_detected));
    assert_eq!(deaths(&app), 0);
}

#[test]
fn test_stealth_kill_out_of_range_is_noop() {
    let mut app = combat_app();
    let enemy = spawn_passive_enemy(&mut app, Vec2::new(0.0, 3.0), Vec2::Y, BehaviorState::default());

    app.world_mut().resource_mut::<PlayerIntent>().stealth_kill = true;
    app.update();

    assert_eq!(app.world().get::<Health>(enemy).map(|h| h.current), Some(100));
}

#[test]
fn test_contact_damage_once_per_contact() {
    let mut app = combat_app();
    let player = player(&mut app);
    let contact = app.world().resource::<SimulationConfig>().contact;
    let enemy = spawn_passive_enemy(&mut app, Vec2::new(0.5, 0.0), -Vec2::X, BehaviorState::default());
    app.world_mut()
        .entity_mut(enemy)
        .insert(ContactDamage::from_settings(&contact));

    app.update();
    assert_eq!(app.world().get::<Health>(player).map(|h| h.current), Some(90));

    // Касание продолжается - повторного урона нет
    app.update();
    assert_eq!(app.world().get::<Health>(player).map(|h| h.current), Some(90));
}

#[test]
fn test_ranged_enemy_fires_only_while_detecting() {
    let mut app = combat_app();
    let weapon = RangedWeapon::from_config(app.world().resource::<SimulationConfig>());
    let sensor = app.world().resource::<SimulationConfig>().sensors.ranged;

    // Смотрит на игрока с 6 units → detection, в Pursuit стреляет
    app.world_mut().spawn((
        Enemy { kind: EnemyKind::Ranged },
        Actor { faction: Faction::Enemy },
        Health::new(100),
        WorldPosition(Vec2::new(0.0, 6.0)),
        Heading(-Vec2::Y),
        sensor,
        BehaviorState::Pursuit { last_seen: Vec2::ZERO },
        weapon,
    ));

    app.update();

    let world = app.world_mut();
    let mut projectiles = world.query::<&Projectile>();
    let fired: Vec<_> = projectiles.iter(world).collect();
    assert_eq!(fired.len(), 1);
    assert_eq!(fired[0].faction, Faction::Enemy);
    assert_eq!(fired[0].damage, 20);
}

#[test]
fn test_spell_hits_player_with_long_frames() {
    let mut app = combat_app();
    let player = player(&mut app);

    // 10 units/s, кадр 250ms = 2.5 units: попадание проверяется на каждом fixed шаге
    app.world_mut().spawn((
        Projectile {
            shooter: Entity::PLACEHOLDER,
            faction: Faction::Enemy,
            damage: 20,
            lifetime: 2.0,
            radius: 0.4,
        },
        WorldPosition(Vec2::new(0.0, 6.0)),
        Velocity(Vec2::new(0.0, -10.0)),
    ));

    for _ in 0..4 {
        app.update();
    }

    assert_eq!(app.world().get::<Health>(player).map(|h| h.current), Some(80));
    let world = app.world_mut();
    assert_eq!(world.query::<&Projectile>().iter(world).count(), 0);
}

#[test]
fn test_slash_hits_enemy_in_front() {
    let mut app = combat_app();
    let enemy = spawn_passive_enemy(&mut app, Vec2::new(0.0, 1.0), Vec2::Y, BehaviorState::default());

    {
        let mut intent = app.world_mut().resource_mut::<PlayerIntent>();
        intent.aim_point = Some(Vec2::new(0.0, 5.0));
        intent.attack_secondary = true;
    }
    app.update();
    assert_eq!(app.world().get::<Health>(enemy).map(|h| h.current), Some(50));

    // Attack window 0.3s: следующий кадр (0.25s) swing не начинается
    app.world_mut().resource_mut::<PlayerIntent>().attack_secondary = true;
    app.update();
    assert_eq!(app.world().get::<Health>(enemy).map(|h| h.current), Some(50));
}

#[test]
fn test_fireball_costs_mana_and_spawns_projectile() {
    let mut app = combat_app();
    let player = player(&mut app);

    {
        let mut intent = app.world_mut().resource_mut::<PlayerIntent>();
        intent.select_slot = Some(WeaponSlot::Fireball);
        intent.aim_point = Some(Vec2::new(5.0, 0.0));
        intent.attack_primary = true;
    }
    app.update();

    let state = app.world().get::<PlayerState>(player).expect("player state");
    // 100 − 20, регенерация 2/s за 0.25s до выстрела упирается в max
    assert!((state.mana.current - 80.0).abs() < 1e-4, "mana = {}", state.mana.current);

    let world = app.world_mut();
    let mut projectiles = world.query::<&Projectile>();
    let fired: Vec<_> = projectiles.iter(world).collect();
    assert_eq!(fired.len(), 1);
    assert_eq!(fired[0].faction, Faction::Player);
    assert_eq!(fired[0].shooter, player);
}
