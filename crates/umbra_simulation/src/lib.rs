//! UMBRA Simulation Core
//!
//! ECS-симуляция stealth-action арены на Bevy 0.16 (headless, без рендера).
//!
//! Подсистемы:
//! - ai: sensors (vision cone + proximity) и FSM Patrol / Pursuit / Memory
//! - combat: damage resolution, снаряды, contact damage, stealth kill
//! - player: controller, атаки, пауза
//! - waves: wave controller + EndGame countdown + session reset
//! - physics: velocity integration, obstacles, vault
//! - hud: sinks для bars/labels presentation слоя

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod ai;
pub mod combat;
pub mod components;
pub mod config;
pub mod hud;
pub mod logger;
pub mod physics;
pub mod player;
pub mod waves;

// Re-export базовых компонентов для удобства
pub use ai::{AIPlugin, BehaviorState, Directive, EnemyKind, SensorConfig};
pub use combat::{CombatPlugin, DamageDealt, DamageEvent, Dead, EntityDied, StealthKillAttempt};
pub use components::*;
pub use config::{ConfigError, SimulationConfig};
pub use hud::{Hud, HudLabel, HudPlugin, ResourceBar};
pub use logger::{init_logger, log, log_error, log_info, log_warning, LogLevel, LogPrinter};
pub use physics::{Obstacles, PhysicsPlugin};
pub use player::{PlayerIntent, PlayerPlugin};
pub use waves::{SessionReset, SpawnArea, SpawnError, WaveCommand, WavePhase, WavePlugin, WaveState};

/// Порядок gameplay систем внутри кадра (Update)
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimSet {
    /// Player intents, beacon, пауза
    Input,
    /// Sensors + FSM + steering
    Behavior,
    /// Снаряды, касания, stealth kill, damage resolution
    Combat,
    /// Wave controller, EndGame, session reset
    Waves,
}

/// Run condition: gameplay время идёт (не пауза и не EndGame)
pub fn gameplay_running(time: Res<Time<Virtual>>) -> bool {
    !time.is_paused()
}

/// Главный plugin симуляции (объединяет все подсистемы)
///
/// SimulationConfig (если нужен не default) вставляется до добавления плагина.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimulationConfig>();

        if !app.world().contains_resource::<DeterministicRng>() {
            let seed = app.world().resource::<SimulationConfig>().seed;
            app.insert_resource(DeterministicRng::new(seed));
        }

        app
            // Fixed timestep 60Hz для movement (легче считать интервалы)
            .insert_resource(Time::<Fixed>::from_hz(60.0))
            .configure_sets(
                Update,
                (SimSet::Input, SimSet::Behavior, SimSet::Combat, SimSet::Waves).chain(),
            )
            // Подсистемы
            .add_plugins((PlayerPlugin, AIPlugin, CombatPlugin, WavePlugin, PhysicsPlugin, HudPlugin));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// SimulationPlugin не добавляется: вызывающий может сначала вставить свой
/// SimulationConfig / SpawnArea / Obstacles.
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(60.0)); // 60Hz FixedUpdate

    app
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    // Сериализуем в байты через Debug (простейший способ)
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
