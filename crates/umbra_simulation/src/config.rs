//! Simulation config (tuning parameters, RON loadable).
//!
//! Defaults = оригинальный баланс игры. Per-entity компоненты
//! (SensorConfig, RangedWeapon, ContactDamage) заполняются отсюда при спавне.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::ai::{EnemyKind, SensorConfig};

/// Ошибки загрузки/валидации конфига
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse RON config: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("invalid config value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: &'static str },
}

/// Сенсоры по типу врага (immutable per kind)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorSettings {
    pub melee: SensorConfig,
    pub ranged: SensorConfig,
}

impl Default for SensorSettings {
    fn default() -> Self {
        Self {
            melee: SensorConfig {
                vision_range: 5.0,
                vision_angle_deg: 60.0,
                proximity_radius: 0.7,
            },
            ranged: SensorConfig {
                vision_range: 10.0,
                vision_angle_deg: 60.0,
                proximity_radius: 0.7,
            },
        }
    }
}

impl SensorSettings {
    pub fn for_kind(&self, kind: EnemyKind) -> SensorConfig {
        match kind {
            EnemyKind::Melee => self.melee,
            EnemyKind::Ranged => self.ranged,
        }
    }
}

/// Тайминги FSM и скорости поворота
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BehaviorSettings {
    /// Скорость движения врага (units/sec)
    pub move_speed: f32,
    /// Множитель скорости в Patrol::Move
    pub patrol_speed_factor: f32,
    pub patrol_move_duration: f32,
    pub patrol_wait_duration: f32,
    pub patrol_look_duration: f32,
    /// Сколько секунд враг "помнит" игрока после потери detection
    pub memory_duration: f32,
    /// Поворот к направлению патруля (deg/sec)
    pub patrol_turn_rate_deg: f32,
    /// Поворот к цели в бою (deg/sec)
    pub combat_turn_rate_deg: f32,
    /// Вращение на месте в Patrol::Look (deg/sec)
    pub look_turn_rate_deg: f32,
    /// Ближе этого к last known position - стоим
    pub arrive_radius: f32,
}

impl Default for BehaviorSettings {
    fn default() -> Self {
        Self {
            move_speed: 3.0,
            patrol_speed_factor: 0.5,
            patrol_move_duration: 2.0,
            patrol_wait_duration: 1.5,
            patrol_look_duration: 1.0,
            memory_duration: 5.0,
            patrol_turn_rate_deg: 90.0,
            combat_turn_rate_deg: 180.0,
            look_turn_rate_deg: 60.0,
            arrive_radius: 0.1,
        }
    }
}

/// Ranged enemy: дистанция + стрельба
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangedSettings {
    /// None → vision_range - 0.5 (держим игрока на краю конуса)
    pub preferred_distance: Option<f32>,
    pub tolerance: f32,
    /// Выстрелов в секунду
    pub fire_rate: f32,
    pub projectile_speed: f32,
    pub projectile_damage: u32,
    pub projectile_lifetime: f32,
}

impl Default for RangedSettings {
    fn default() -> Self {
        Self {
            preferred_distance: None,
            tolerance: 1.0,
            fire_rate: 1.0,
            projectile_speed: 10.0,
            projectile_damage: 20,
            projectile_lifetime: 3.0,
        }
    }
}

/// Melee enemy: урон при касании
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContactSettings {
    pub damage: u32,
    /// Сумма радиусов тел врага и игрока
    pub radius: f32,
}

impl Default for ContactSettings {
    fn default() -> Self {
        Self { damage: 10, radius: 0.8 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemySettings {
    pub max_health: u32,
}

impl Default for EnemySettings {
    fn default() -> Self {
        Self { max_health: 100 }
    }
}

/// Игрок: ресурсы, движение, атаки
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerSettings {
    pub spawn_point: (f32, f32),
    pub move_speed: f32,
    pub sprint_multiplier: f32,
    pub max_health: u32,
    /// +1 HP каждые N секунд (ниже max)
    pub health_regen_interval: f32,
    pub max_stamina: f32,
    pub stamina_regen_rate: f32,
    pub stamina_drain_rate: f32,
    pub max_mana: f32,
    pub mana_regen_rate: f32,
    pub fireball_mana_cost: f32,
    pub fireball_damage: u32,
    pub fireball_speed: f32,
    pub fireball_lifetime: f32,
    pub melee_damage: u32,
    pub melee_range: f32,
    /// Смещение attack point от центра игрока вдоль heading
    pub melee_reach: f32,
    pub attack_duration: f32,
    pub stealth_kill_range: f32,
    pub vault_duration: f32,
    pub hit_radius: f32,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            spawn_point: (0.0, 0.0),
            move_speed: 5.0,
            sprint_multiplier: 2.0,
            max_health: 100,
            health_regen_interval: 1.0,
            max_stamina: 100.0,
            stamina_regen_rate: 5.0,
            stamina_drain_rate: 20.0,
            max_mana: 100.0,
            mana_regen_rate: 2.0,
            fireball_mana_cost: 20.0,
            fireball_damage: 10,
            fireball_speed: 8.0,
            fireball_lifetime: 2.0,
            melee_damage: 50,
            melee_range: 1.0,
            melee_reach: 0.5,
            attack_duration: 0.3,
            stealth_kill_range: 1.2,
            vault_duration: 0.25,
            hit_radius: 0.4,
        }
    }
}

/// Волны: размер, количество, задержки
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveSettings {
    pub enemies_per_wave: u32,
    pub total_waves: u32,
    /// Пауза перед каждой волной (секунды virtual time)
    pub wave_delay: f32,
    /// End-game countdown (секунды real time)
    pub restart_delay: f32,
    /// Сколько раз сэмплируем клетку спавна прежде чем сдаться
    pub spawn_attempts: u32,
    pub roster: Vec<EnemyKind>,
}

impl Default for WaveSettings {
    fn default() -> Self {
        Self {
            enemies_per_wave: 5,
            total_waves: 3,
            wave_delay: 2.0,
            restart_delay: 5.0,
            spawn_attempts: 100,
            roster: vec![EnemyKind::Melee, EnemyKind::Ranged],
        }
    }
}

/// Wave beacon: точка, у которой игрок запускает/останавливает волны
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BeaconSettings {
    pub position: (f32, f32),
    pub interact_range: f32,
}

impl Default for BeaconSettings {
    fn default() -> Self {
        Self {
            position: (0.0, -3.0),
            interact_range: 2.0,
        }
    }
}

/// Корневой конфиг симуляции
#[derive(Resource, Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub seed: u64,
    pub sensors: SensorSettings,
    pub behavior: BehaviorSettings,
    pub ranged: RangedSettings,
    pub contact: ContactSettings,
    pub enemy: EnemySettings,
    pub player: PlayerSettings,
    pub waves: WaveSettings,
    pub beacon: BeaconSettings,
}

impl SimulationConfig {
    /// Парсит RON и валидирует результат
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_ron_str(&source)
    }

    /// Конфиг из необязательного CLI пути, без пути - default.
    ///
    /// Logger поднимается до чтения файла: ошибка загрузки всегда попадает в лог.
    pub fn from_cli_path(path: Option<&str>) -> Result<Self, ConfigError> {
        crate::logger::init_logger();
        let Some(path) = path else {
            return Ok(Self::default());
        };
        Self::load(path).inspect_err(|error| crate::log_error(&format!("Config {}: {}", path, error)))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let b = &self.behavior;
        if b.patrol_move_duration <= 0.0 || b.patrol_wait_duration <= 0.0 || b.patrol_look_duration <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "behavior.patrol_*_duration",
                reason: "patrol phase durations must be positive",
            });
        }
        if b.memory_duration <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "behavior.memory_duration",
                reason: "must be positive",
            });
        }
        if self.ranged.fire_rate <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "ranged.fire_rate",
                reason: "must be positive",
            });
        }
        if self.waves.roster.is_empty() {
            return Err(ConfigError::Invalid {
                field: "waves.roster",
                reason: "at least one enemy kind is required",
            });
        }
        if self.waves.spawn_attempts == 0 {
            return Err(ConfigError::Invalid {
                field: "waves.spawn_attempts",
                reason: "must be at least 1",
            });
        }
        if self.waves.restart_delay < 0.0 || self.waves.wave_delay < 0.0 {
            return Err(ConfigError::Invalid {
                field: "waves.*_delay",
                reason: "delays cannot be negative",
            });
        }
        Ok(())
    }

    /// Preferred distance для ranged врага (явная или от дальности зрения)
    pub fn ranged_preferred_distance(&self) -> f32 {
        self.ranged
            .preferred_distance
            .unwrap_or(self.sensors.ranged.vision_range - 0.5)
    }
}
