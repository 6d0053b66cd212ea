//! Enemy spawning: поиск walkable клетки + сборка entity врага.

use bevy::prelude::*;
use rand::Rng;
use std::collections::HashSet;
use thiserror::Error;

use crate::ai::{random_direction, BehaviorState, Enemy, EnemyKind};
use crate::combat::{ContactDamage, RangedWeapon};
use crate::components::{Actor, Faction, Heading, Health, WorldPosition};
use crate::config::SimulationConfig;

/// Ошибки спавна (ловятся и логируются wave controller'ом)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpawnError {
    #[error("could not find valid spawn position after {attempts} attempts")]
    PositionExhausted { attempts: u32 },

    #[error("enemy roster is empty")]
    EmptyRoster,
}

/// Поверхность, на которой можно спавнить (tilemap арены)
pub trait SpawnSurface: Send + Sync {
    /// Диапазон клеток для сэмплирования: [min, max)
    fn cell_bounds(&self) -> (IVec2, IVec2);

    fn is_walkable(&self, cell: IVec2) -> bool;

    /// Центр клетки в world координатах
    fn cell_center(&self, cell: IVec2) -> Vec2 {
        cell.as_vec2()
    }
}

/// Равномерно сэмплирует клетки в bounds, максимум `attempts` раз.
pub fn try_random_walkable_position(
    surface: &dyn SpawnSurface,
    rng: &mut impl Rng,
    attempts: u32,
) -> Result<Vec2, SpawnError> {
    let (min, max) = surface.cell_bounds();
    if min.x >= max.x || min.y >= max.y {
        return Err(SpawnError::PositionExhausted { attempts: 0 });
    }

    for _ in 0..attempts {
        let cell = IVec2::new(rng.gen_range(min.x..max.x), rng.gen_range(min.y..max.y));
        if surface.is_walkable(cell) {
            return Ok(surface.cell_center(cell));
        }
    }

    Err(SpawnError::PositionExhausted { attempts })
}

/// Tilemap: набор walkable клеток
#[derive(Debug, Clone, Default)]
pub struct WalkableTiles {
    min: IVec2,
    max: IVec2,
    tiles: HashSet<IVec2>,
}

impl WalkableTiles {
    /// Прямоугольник [min, max), все клетки walkable
    pub fn rect(min: IVec2, max: IVec2) -> Self {
        let tiles = (min.x..max.x)
            .flat_map(|x| (min.y..max.y).map(move |y| IVec2::new(x, y)))
            .collect();
        Self { min, max, tiles }
    }

    /// Убирает клетки (препятствия) из walkable набора
    pub fn without(mut self, blocked: impl IntoIterator<Item = IVec2>) -> Self {
        for cell in blocked {
            self.tiles.remove(&cell);
        }
        self
    }
}

impl SpawnSurface for WalkableTiles {
    fn cell_bounds(&self) -> (IVec2, IVec2) {
        (self.min, self.max)
    }

    fn is_walkable(&self, cell: IVec2) -> bool {
        self.tiles.contains(&cell)
    }
}

/// Resource: где спавнить врагов
#[derive(Resource)]
pub struct SpawnArea(pub Box<dyn SpawnSurface>);

impl SpawnArea {
    pub fn new(surface: impl SpawnSurface + 'static) -> Self {
        Self(Box::new(surface))
    }
}

impl Default for SpawnArea {
    /// Арена 21×21 вокруг начала координат
    fn default() -> Self {
        Self::new(WalkableTiles::rect(IVec2::splat(-10), IVec2::splat(11)))
    }
}

/// Принадлежность врага волне (для фильтрации устаревших смертей)
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct WaveMember {
    pub generation: u32,
}

/// Равномерный выбор типа врага из roster
pub fn roll_enemy_kind(roster: &[EnemyKind], rng: &mut impl Rng) -> Result<EnemyKind, SpawnError> {
    if roster.is_empty() {
        return Err(SpawnError::EmptyRoster);
    }
    Ok(roster[rng.gen_range(0..roster.len())])
}

/// Спавн врага: позиция + kind → полностью собранный entity
///
/// Параметры (сенсоры, оружие, contact damage) берутся из SimulationConfig.
pub fn spawn_enemy(
    commands: &mut Commands,
    config: &SimulationConfig,
    kind: EnemyKind,
    position: Vec2,
    generation: u32,
    rng: &mut impl Rng,
) -> Entity {
    let direction = random_direction(rng);

    let mut entity = commands.spawn((
        Enemy { kind },
        Actor { faction: Faction::Enemy },
        Health::new(config.enemy.max_health),
        WorldPosition(position),
        Heading::from_direction(direction),
        config.sensors.for_kind(kind),
        BehaviorState::patrol_towards(direction),
        WaveMember { generation },
    ));

    match kind {
        EnemyKind::Melee => {
            entity.insert(ContactDamage::from_settings(&config.contact));
        }
        EnemyKind::Ranged => {
            entity.insert(RangedWeapon::from_config(config));
        }
    }

    entity.id()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_walkable_position_found() {
        let tiles = WalkableTiles::rect(IVec2::ZERO, IVec2::splat(4));
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let position = try_random_walkable_position(&tiles, &mut rng, 100).expect("walkable cell");
        assert!(tiles.is_walkable(position.as_ivec2()));
    }

    #[test]
    fn test_exhaustion_is_explicit_error() {
        // Bounds 10×10, walkable клеток нет
        let tiles = WalkableTiles::rect(IVec2::ZERO, IVec2::splat(10)).without(
            (0..10).flat_map(|x| (0..10).map(move |y| IVec2::new(x, y))),
        );
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let result = try_random_walkable_position(&tiles, &mut rng, 100);
        assert_eq!(result, Err(SpawnError::PositionExhausted { attempts: 100 }));
    }

    #[test]
    fn test_obstacles_excluded() {
        let tiles = WalkableTiles::rect(IVec2::ZERO, IVec2::new(2, 1)).without([IVec2::new(0, 0)]);
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        for _ in 0..20 {
            let position = try_random_walkable_position(&tiles, &mut rng, 100).expect("walkable cell");
            assert_eq!(position, Vec2::new(1.0, 0.0));
        }
    }

    #[test]
    fn test_empty_roster_rejected() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(roll_enemy_kind(&[], &mut rng), Err(SpawnError::EmptyRoster));
        assert_eq!(roll_enemy_kind(&[EnemyKind::Ranged], &mut rng), Ok(EnemyKind::Ranged));
    }
}
