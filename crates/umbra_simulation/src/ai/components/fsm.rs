//! FSM AI components (behavior state, patrol sub-phases, directives).
//!
//! Переходы - чистая функция `BehaviorState::step`, без side effects.
//! Движение/поворот/стрельба применяются отдельно по `Directive`.

use bevy::prelude::*;
use rand::Rng;
use std::f32::consts::TAU;

use super::sensor::Perception;
use crate::config::BehaviorSettings;

/// Под-фаза патруля (активна только в Patrol)
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub enum PatrolPhase {
    /// Идём по выбранному направлению, медленно доворачиваясь к нему
    Move { direction: Vec2 },
    /// Стоим
    Wait,
    /// Осматриваемся (вращение на месте)
    Look,
}

/// AI FSM состояния врага
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub enum BehaviorState {
    /// Patrol - игрок не обнаружен
    Patrol {
        phase: PatrolPhase,
        /// Время в текущей под-фазе (секунды)
        phase_timer: f32,
    },

    /// Pursuit - игрок обнаружен прямо сейчас
    Pursuit {
        /// Последняя позиция, где видели цель
        last_seen: Vec2,
    },

    /// Memory - detection потерян, действуем по last known position
    Memory {
        /// Сколько секунд без detection
        elapsed: f32,
        last_seen: Vec2,
    },
}

impl Default for BehaviorState {
    fn default() -> Self {
        Self::Patrol {
            phase: PatrolPhase::Wait,
            phase_timer: 0.0,
        }
    }
}

/// Что агент должен делать в этом тике (результат шага FSM)
#[derive(Component, Debug, Clone, Copy, PartialEq, Default, Reflect)]
#[reflect(Component)]
pub enum Directive {
    /// Движение по направлению патруля (половина скорости)
    PatrolMove { direction: Vec2 },
    /// Стоим на месте
    #[default]
    Hold,
    /// Вращаемся на месте
    LookAround,
    /// Преследование (melee) / удержание дистанции (ranged) относительно target
    Engage {
        target: Vec2,
        /// Только при активном detection; в тик перехода и в Memory - нет
        fire: bool,
    },
}

/// Короткое имя состояния (логи, snapshot)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BehaviorKind {
    Patrol,
    Pursuit,
    Memory,
}

impl BehaviorState {
    /// Начальный патруль: сразу идём в случайном направлении
    pub fn patrol_towards(direction: Vec2) -> Self {
        Self::Patrol {
            phase: PatrolPhase::Move { direction },
            phase_timer: 0.0,
        }
    }

    /// Возврат в патруль после Memory - начинаем с Wait (Move пропускаем)
    pub fn patrol_after_memory() -> Self {
        Self::Patrol {
            phase: PatrolPhase::Wait,
            phase_timer: 0.0,
        }
    }

    pub fn kind(&self) -> BehaviorKind {
        match self {
            Self::Patrol { .. } => BehaviorKind::Patrol,
            Self::Pursuit { .. } => BehaviorKind::Pursuit,
            Self::Memory { .. } => BehaviorKind::Memory,
        }
    }

    /// true в Pursuit и Memory (используется для stealth kill gate)
    pub fn is_player_detected(&self) -> bool {
        matches!(self, Self::Pursuit { .. } | Self::Memory { .. })
    }

    /// Один тик FSM.
    ///
    /// Таблица переходов (total):
    /// - Patrol + detected → Pursuit (патрульный таймер сбрасывается, преследование с этого же тика)
    /// - Patrol + !detected → Patrol (цикл Move → Wait → Look → Move)
    /// - Pursuit + detected → Pursuit (last_seen обновляется)
    /// - Pursuit + !detected → Memory { elapsed: 0 }
    /// - Memory + detected → Pursuit
    /// - Memory + !detected → Memory (elapsed += dt) | Patrol::Wait при elapsed ≥ memory_duration
    pub fn step(
        &self,
        perception: Perception,
        delta: f32,
        settings: &BehaviorSettings,
        rng: &mut impl Rng,
    ) -> (BehaviorState, Directive) {
        match *self {
            Self::Patrol { phase, phase_timer } => {
                if perception.detected {
                    (Self::Pursuit { last_seen: perception.target }, engage(perception.target, false))
                } else {
                    patrol_step(phase, phase_timer + delta, settings, rng)
                }
            }

            Self::Pursuit { last_seen } => {
                if perception.detected {
                    (Self::Pursuit { last_seen: perception.target }, engage(perception.target, true))
                } else {
                    (Self::Memory { elapsed: 0.0, last_seen }, engage(last_seen, false))
                }
            }

            Self::Memory { elapsed, last_seen } => {
                if perception.detected {
                    return (Self::Pursuit { last_seen: perception.target }, engage(perception.target, false));
                }

                let elapsed = elapsed + delta;
                if elapsed >= settings.memory_duration {
                    (Self::patrol_after_memory(), Directive::Hold)
                } else {
                    (Self::Memory { elapsed, last_seen }, engage(last_seen, false))
                }
            }
        }
    }
}

fn engage(target: Vec2, fire: bool) -> Directive {
    Directive::Engage { target, fire }
}

/// Патрульный цикл: таймер уже включает delta текущего тика
fn patrol_step(
    phase: PatrolPhase,
    timer: f32,
    settings: &BehaviorSettings,
    rng: &mut impl Rng,
) -> (BehaviorState, Directive) {
    let patrol = |phase, phase_timer| BehaviorState::Patrol { phase, phase_timer };

    match phase {
        PatrolPhase::Move { direction } => {
            if timer >= settings.patrol_move_duration {
                (patrol(PatrolPhase::Wait, 0.0), Directive::Hold)
            } else {
                (patrol(phase, timer), Directive::PatrolMove { direction })
            }
        }
        PatrolPhase::Wait => {
            if timer >= settings.patrol_wait_duration {
                (patrol(PatrolPhase::Look, 0.0), Directive::Hold)
            } else {
                (patrol(phase, timer), Directive::Hold)
            }
        }
        PatrolPhase::Look => {
            if timer >= settings.patrol_look_duration {
                let direction = random_direction(rng);
                (patrol(PatrolPhase::Move { direction }, 0.0), Directive::LookAround)
            } else {
                (patrol(phase, timer), Directive::LookAround)
            }
        }
    }
}

/// Случайный unit vector (равномерно по углу)
pub fn random_direction(rng: &mut impl Rng) -> Vec2 {
    Vec2::from_angle(rng.gen_range(0.0..TAU))
}

/// Момент входа в текущее состояние (virtual elapsed seconds)
#[derive(Component, Debug, Clone, Copy, PartialEq, Default, Reflect)]
#[reflect(Component)]
pub struct StateEnteredAt(pub f32);
