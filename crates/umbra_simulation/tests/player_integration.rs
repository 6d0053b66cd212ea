//! Интеграционные тесты игрока
//!
//! Beacon (Start/Stop волн), pause intent, vault через controller + FixedUpdate.

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use umbra_simulation::ai::Enemy;
use umbra_simulation::waves::WalkableTiles;
use umbra_simulation::{
    create_headless_app, Obstacles, Player, PlayerIntent, PlayerState, SimulationConfig, SimulationPlugin,
    SpawnArea, Velocity, WavePhase, WaveState, WorldPosition,
};

fn player_app(config: SimulationConfig, obstacles: Obstacles) -> App {
    let mut app = create_headless_app(11);
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(250)))
        .insert_resource(config)
        .insert_resource(obstacles)
        .insert_resource(SpawnArea::new(WalkableTiles::rect(IVec2::splat(40), IVec2::splat(45))))
        .add_plugins(SimulationPlugin);
    app.update(); // Startup: игрок в (0, 0)
    app
}

fn run_frames(app: &mut App, frames: usize) {
    for _ in 0..frames {
        app.update();
    }
}

fn player(app: &mut App) -> Entity {
    let world = app.world_mut();
    let mut query = world.query_filtered::<Entity, With<Player>>();
    query.single(world).expect("player spawned")
}

fn player_position(app: &mut App) -> Vec2 {
    let entity = player(app);
    app.world().get::<WorldPosition>(entity).map(|p| p.0).expect("player position")
}

fn enemy_count(app: &mut App) -> usize {
    let world = app.world_mut();
    let mut query = world.query_filtered::<Entity, With<Enemy>>();
    query.iter(world).count()
}

fn interact(app: &mut App) {
    app.world_mut().resource_mut::<PlayerIntent>().interact = true;
    app.update();
}

#[test]
fn test_beacon_toggles_waves_on_in_progress() {
    let mut app = player_app(SimulationConfig::default(), Obstacles::default());

    // Beacon в (0, -3), радиус 2: из (0, 0) не достать
    interact(&mut app);
    assert!(!app.world().resource::<WaveState>().started);

    let entity = player(&mut app);
    app.world_mut()
        .get_mut::<WorldPosition>(entity)
        .expect("player position")
        .0 = Vec2::new(0.0, -2.0);

    interact(&mut app);
    {
        let state = app.world().resource::<WaveState>();
        assert!(state.started);
        assert!(matches!(state.phase, WavePhase::InterWaveDelay { .. }));
    }

    // Волна идёт → повторный interact останавливает серию
    run_frames(&mut app, 9);
    assert!(app.world().resource::<WaveState>().in_progress);
    assert_eq!(enemy_count(&mut app), 5);

    interact(&mut app);
    let state = app.world().resource::<WaveState>();
    assert_eq!(state.phase, WavePhase::Idle);
    assert!(!state.started);
    assert_eq!(enemy_count(&mut app), 0);
}

#[test]
fn test_pause_intent_freezes_and_resumes_movement() {
    let mut app = player_app(SimulationConfig::default(), Obstacles::default());

    app.world_mut().resource_mut::<PlayerIntent>().move_axis = Vec2::X;
    app.update();

    app.world_mut().resource_mut::<PlayerIntent>().pause = true;
    app.update();
    assert!(app.world().resource::<Time<Virtual>>().is_paused());

    // Velocity осталась, но FixedUpdate не тикает
    let frozen = player_position(&mut app);
    run_frames(&mut app, 2);
    assert_eq!(player_position(&mut app), frozen);

    app.world_mut().resource_mut::<PlayerIntent>().pause = true;
    app.update();
    assert!(!app.world().resource::<Time<Virtual>>().is_paused());

    app.update();
    assert!(player_position(&mut app).x > frozen.x);
}

#[test]
fn test_vault_blocks_input_and_restart_cancels_previous() {
    let mut config = SimulationConfig::default();
    config.player.vault_duration = 1.0;
    let mut app = player_app(config, Obstacles::from_cells([IVec2::new(1, 0), IVec2::new(2, 0)]));
    let entity = player(&mut app);

    {
        let mut intent = app.world_mut().resource_mut::<PlayerIntent>();
        intent.move_axis = Vec2::X;
        intent.vault = true;
    }
    app.update();
    let first = app
        .world()
        .get::<PlayerState>(entity)
        .and_then(|state| state.vault)
        .expect("vault started");
    assert_eq!(first.start, Vec2::ZERO);
    assert_eq!(first.end, Vec2::new(1.0, 0.0));

    // Середина vault: позицию ведёт lerp, move_axis игнорируется
    app.update();
    let position = player_position(&mut app);
    assert!(position.x > 0.0 && position.x < 1.0, "position = {:?}", position);
    assert_eq!(position.y, 0.0);
    assert_eq!(app.world().get::<Velocity>(entity).map(|v| v.0), Some(Vec2::ZERO));

    // Новый vault посреди старого начинается с текущей точки
    app.world_mut().resource_mut::<PlayerIntent>().vault = true;
    app.update();
    let position = player_position(&mut app);
    let second = app
        .world()
        .get::<PlayerState>(entity)
        .and_then(|state| state.vault)
        .expect("vault restarted");
    assert_eq!(second.start, position);
    assert!(second.start.x > 0.0);
    assert_eq!(second.elapsed, 0.0);
}
