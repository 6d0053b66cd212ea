//! Базовые компоненты акторов: Actor, Health, ResourcePool

use bevy::prelude::*;

/// Сторона конфликта
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect)]
pub enum Faction {
    Player,
    #[default]
    Enemy,
}

/// Актор (игрок или враг) - базовый компонент для живых существ
///
/// Автоматически добавляет Health и позиционные компоненты через Required Components.
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
#[require(Health, crate::components::WorldPosition, crate::components::Heading, crate::components::Velocity)]
pub struct Actor {
    pub faction: Faction,
}

/// Результат одного попадания по Health
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// HP уменьшилось (или урон 0), актор жив
    Damaged,
    /// Это попадание опустило HP до нуля - единственный death event
    Killed,
    /// Актор уже мёртв, попадание проигнорировано
    AlreadyDead,
}

/// Здоровье актора
///
/// Инвариант: 0 ≤ current ≤ max
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Health {
    pub current: u32,
    pub max: u32,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100) // Default 100 HP
    }
}

impl Health {
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0
    }

    /// Отнимает HP с clamp в ноль.
    ///
    /// `Killed` возвращается ровно один раз за жизнь актора.
    pub fn take_damage(&mut self, amount: u32) -> HitOutcome {
        if !self.is_alive() {
            return HitOutcome::AlreadyDead;
        }

        self.current = self.current.saturating_sub(amount);

        if self.is_alive() {
            HitOutcome::Damaged
        } else {
            HitOutcome::Killed
        }
    }

    pub fn heal(&mut self, amount: u32) {
        self.current = self.current.saturating_add(amount).min(self.max);
    }

    /// Доля HP (0.0..=1.0) для health bar
    pub fn fraction(&self) -> f32 {
        if self.max == 0 {
            0.0
        } else {
            self.current as f32 / self.max as f32
        }
    }
}

/// Пул ресурса игрока (stamina, mana)
///
/// Инвариант: 0.0 ≤ current ≤ max
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct ResourcePool {
    pub current: f32,
    pub max: f32,
    pub regen_rate: f32, // units per second
    pub drain_rate: f32, // units per second (пока действие активно)
}

impl ResourcePool {
    pub fn new(max: f32, regen_rate: f32, drain_rate: f32) -> Self {
        Self {
            current: max,
            max,
            regen_rate,
            drain_rate,
        }
    }

    pub fn can_afford(&self, cost: f32) -> bool {
        self.current >= cost
    }

    /// Списывает cost целиком или ничего
    pub fn consume(&mut self, cost: f32) -> bool {
        if self.can_afford(cost) {
            self.current -= cost;
            true
        } else {
            false
        }
    }

    /// Возвращает true если значение изменилось
    pub fn regenerate(&mut self, delta_time: f32) -> bool {
        if self.current >= self.max {
            return false;
        }
        self.current = (self.current + self.regen_rate * delta_time).min(self.max);
        true
    }

    pub fn drain(&mut self, delta_time: f32) {
        self.current = (self.current - self.drain_rate * delta_time).max(0.0);
    }

    pub fn is_empty(&self) -> bool {
        self.current <= 0.0
    }

    pub fn refill(&mut self) {
        self.current = self.max;
    }
}
