//! Enemy marker + kind (roster entry).

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Тип врага - определяет сенсоры и поведение в Pursuit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Reflect)]
pub enum EnemyKind {
    /// Бежит на игрока, урон при касании
    Melee,
    /// Держит дистанцию и стреляет
    Ranged,
}

/// Враг под управлением AI FSM
///
/// FSM компоненты добавляются через Required Components (Patrol::Wait по умолчанию).
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
#[require(crate::ai::BehaviorState, crate::ai::Directive, crate::ai::StateEnteredAt)]
pub struct Enemy {
    pub kind: EnemyKind,
}
