//! Headless симуляция UMBRA
//!
//! Скриптованная сессия без рендера: игрок подходит к beacon, запускает волны
//! и отбивается slash'ами. Первый аргумент - путь к RON конфигу (опционально).

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use umbra_simulation::{
    create_headless_app, init_logger, log_info, Obstacles, Player, PlayerIntent, SimulationConfig,
    SimulationPlugin, SpawnArea, WaveState, WorldPosition,
};
use umbra_simulation::waves::WalkableTiles;

const TICKS: u32 = 3000;
const FRAME: Duration = Duration::from_millis(16);

fn main() {
    init_logger();

    let path = std::env::args().nth(1);
    // Ошибка уже залогирована
    let Ok(config) = SimulationConfig::from_cli_path(path.as_deref()) else {
        std::process::exit(1);
    };
    let seed = config.seed;
    let beacon = Vec2::new(config.beacon.position.0, config.beacon.position.1);

    let obstacles = arena_cover();
    let spawn_area = WalkableTiles::rect(IVec2::splat(-10), IVec2::splat(11)).without(obstacles.cells());

    let mut app = create_headless_app(seed);
    app.insert_resource(config)
        .insert_resource(SpawnArea::new(spawn_area))
        .insert_resource(obstacles)
        .insert_resource(TimeUpdateStrategy::ManualDuration(FRAME))
        .add_plugins(SimulationPlugin);

    log_info(&format!("Starting UMBRA headless simulation (seed: {})", seed));

    let mut waves_requested = false;
    for tick in 0..TICKS {
        drive_player(&mut app, beacon, &mut waves_requested, tick);
        app.update();

        let state = app.world().resource::<WaveState>();
        if tick % 120 == 0 {
            log_info(&format!("Tick {}: {}, {}, phase {:?}", tick, state.wave_label(), state.enemy_label(), state.phase));
        }
        if let Some(end_game) = state.end_game() {
            log_info(&format!("Tick {}: {}", tick, end_game.message));
            break;
        }
    }

    log_info("Simulation complete!");
}

/// Укрытия: две стенки по бокам от центра
fn arena_cover() -> Obstacles {
    let mut obstacles = Obstacles::default();
    for y in -3..=3 {
        obstacles.insert(IVec2::new(-5, y));
        obstacles.insert(IVec2::new(5, y));
    }
    obstacles
}

/// Простой скрипт игрока: к beacon → interact → slash по кругу
fn drive_player(app: &mut App, beacon: Vec2, waves_requested: &mut bool, tick: u32) {
    let world = app.world_mut();
    let position = world
        .query_filtered::<&WorldPosition, With<Player>>()
        .iter(world)
        .next()
        .map(|position| position.0)
        .unwrap_or_default();

    let mut intent = world.resource_mut::<PlayerIntent>();
    if !*waves_requested {
        let to_beacon = beacon - position;
        if to_beacon.length() > 1.0 {
            intent.move_axis = to_beacon;
        } else {
            intent.move_axis = Vec2::ZERO;
            intent.interact = true;
            *waves_requested = true;
        }
        return;
    }

    // Вращаем прицел, swing каждые 20 тиков
    let angle = tick as f32 * 0.05;
    intent.aim_point = Some(position + Vec2::from_angle(angle));
    intent.attack_secondary = tick % 20 == 0;
}
