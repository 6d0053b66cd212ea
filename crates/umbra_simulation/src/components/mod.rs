//! ECS Components для игровых entity
//!
//! Организация по доменам:
//! - actor: базовые характеристики (faction, health, resource pools)
//! - world: позиционирование на top-down плоскости (WorldPosition, Heading, Velocity)
//! - player: player control marker + состояние контроллера
//! - ai: re-export FSM компонентов из crate::ai

pub mod actor;
pub mod ai;
pub mod player;
pub mod world;

// Re-exports для удобного импорта
pub use actor::*;
pub use ai::*;
pub use player::*;
pub use world::*;
