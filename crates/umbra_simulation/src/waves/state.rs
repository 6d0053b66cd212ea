//! Wave controller state machine (pure, без ECS side effects).
//!
//! Idle → InterWaveDelay → WaveActive → InterWaveDelay → … → EndGame.
//! Spawn/despawn и заморозка времени делаются системами по возвращаемым значениям.

use bevy::prelude::*;

use crate::config::WaveSettings;

pub const VICTORY_MESSAGE: &str = "Winner!";
pub const DEFEAT_MESSAGE: &str = "You Died";

/// Итог сессии
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndGameOutcome {
    Victory,
    Defeat,
}

/// Overlay конца игры + real-time countdown
#[derive(Debug, Clone, PartialEq)]
pub struct EndGame {
    pub outcome: EndGameOutcome,
    pub message: &'static str,
    /// Перезапуск по окончании countdown (только поражение)
    pub restart: bool,
    /// Целые секунды до конца countdown
    pub remaining: u32,
    /// Накопитель real time внутри текущей секунды
    pub accumulator: f32,
    /// Countdown дошёл до нуля
    pub resolved: bool,
}

impl EndGame {
    pub fn countdown_label(&self) -> String {
        if self.restart {
            format!("Restarting in {}...", self.remaining)
        } else {
            String::new()
        }
    }
}

/// Фаза wave controller
#[derive(Debug, Clone, PartialEq, Default)]
pub enum WavePhase {
    #[default]
    Idle,
    /// Ждём перед следующим продвижением волны (virtual time)
    InterWaveDelay { remaining: f32 },
    WaveActive,
    EndGame(EndGame),
}

/// Результат продвижения волны
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaveAdvance {
    /// Волна `wave` началась, нужно заспавнить `count` врагов
    Spawn { wave: u32, count: u32 },
    /// Волны кончились → победа
    Victory,
}

/// Результат тика end-game countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownTick {
    /// Не EndGame или countdown уже завершён
    Inactive,
    /// Секунда ещё не набралась
    Pending,
    /// Прошла секунда, новое значение
    Ticked(u32),
    /// Дошли до нуля, нужен session reset
    Restart,
    /// Дошли до нуля без перезапуска (победа, остаёмся замороженными)
    Finished,
}

/// Глобальное состояние волн. Меняется только wave-системами.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct WaveState {
    pub current_wave: u32,
    pub total_waves: u32,
    pub enemies_per_wave: u32,
    pub enemies_alive: u32,
    pub in_progress: bool,
    pub started: bool,
    pub phase: WavePhase,
    /// Счётчик сброса: смерти врагов прошлых поколений игнорируются
    pub generation: u32,
    wave_delay: f32,
    restart_delay: f32,
}

impl Default for WaveState {
    fn default() -> Self {
        Self::from_settings(&WaveSettings::default())
    }
}

impl WaveState {
    pub fn from_settings(settings: &WaveSettings) -> Self {
        Self {
            current_wave: 0,
            total_waves: settings.total_waves,
            enemies_per_wave: settings.enemies_per_wave,
            enemies_alive: 0,
            in_progress: false,
            started: false,
            phase: WavePhase::Idle,
            generation: 0,
            wave_delay: settings.wave_delay,
            restart_delay: settings.restart_delay,
        }
    }

    pub fn is_end_game(&self) -> bool {
        matches!(self.phase, WavePhase::EndGame(_))
    }

    pub fn end_game(&self) -> Option<&EndGame> {
        match &self.phase {
            WavePhase::EndGame(end_game) => Some(end_game),
            _ => None,
        }
    }

    /// "Wave: i/n"
    pub fn wave_label(&self) -> String {
        format!("Wave: {}/{}", self.current_wave, self.total_waves)
    }

    /// "Enemies: k"
    pub fn enemy_label(&self) -> String {
        format!("Enemies: {}", self.enemies_alive)
    }

    /// Старт серии волн. false если уже запущено (или игра окончена).
    pub fn start_waves(&mut self) -> bool {
        if self.started || self.is_end_game() {
            return false;
        }
        self.started = true;
        self.phase = WavePhase::InterWaveDelay {
            remaining: self.wave_delay,
        };
        true
    }

    /// Hard reset: прогресс и счётчики в ноль, Idle, новое поколение.
    ///
    /// Despawn живых врагов - на стороне системы. В EndGame игнорируется.
    pub fn stop_waves(&mut self) -> bool {
        if self.is_end_game() {
            return false;
        }
        self.reset();
        true
    }

    /// Полный сброс (включая EndGame) - для session reset
    pub fn reset(&mut self) {
        self.current_wave = 0;
        self.enemies_alive = 0;
        self.in_progress = false;
        self.started = false;
        self.phase = WavePhase::Idle;
        self.generation = self.generation.wrapping_add(1);
    }

    /// Тикает inter-wave delay; true когда пора продвигать волну
    pub fn tick_delay(&mut self, delta: f32) -> bool {
        let WavePhase::InterWaveDelay { remaining } = &mut self.phase else {
            return false;
        };
        *remaining -= delta;
        *remaining <= 0.0
    }

    /// Продвижение: следующая волна или победа
    pub fn begin_next_wave(&mut self) -> WaveAdvance {
        if self.current_wave < self.total_waves {
            self.current_wave += 1;
            self.in_progress = true;
            self.enemies_alive = 0;
            self.phase = WavePhase::WaveActive;
            WaveAdvance::Spawn {
                wave: self.current_wave,
                count: self.enemies_per_wave,
            }
        } else {
            self.trigger_end_game(EndGameOutcome::Victory);
            WaveAdvance::Victory
        }
    }

    /// Враг успешно заспавнен и зарегистрирован
    pub fn record_spawned(&mut self) {
        self.enemies_alive += 1;
    }

    /// Спавн волны завершён. Если не заспавнился никто - волна сразу очищена.
    pub fn finish_spawning(&mut self) {
        if self.phase == WavePhase::WaveActive && self.enemies_alive == 0 {
            self.clear_wave();
        }
    }

    /// Смерть врага текущей волны. true если волна очищена.
    pub fn enemy_defeated(&mut self) -> bool {
        if self.phase != WavePhase::WaveActive || self.enemies_alive == 0 {
            return false;
        }
        self.enemies_alive -= 1;
        if self.enemies_alive == 0 {
            self.clear_wave();
            true
        } else {
            false
        }
    }

    fn clear_wave(&mut self) {
        self.in_progress = false;
        self.phase = WavePhase::InterWaveDelay {
            remaining: self.wave_delay,
        };
    }

    /// Переход в EndGame. Повторный вызов - no-op (первый итог побеждает).
    pub fn trigger_end_game(&mut self, outcome: EndGameOutcome) -> bool {
        if self.is_end_game() {
            return false;
        }

        let (message, restart) = match outcome {
            EndGameOutcome::Victory => (VICTORY_MESSAGE, false),
            EndGameOutcome::Defeat => (DEFEAT_MESSAGE, true),
        };
        self.in_progress = false;
        self.phase = WavePhase::EndGame(EndGame {
            outcome,
            message,
            restart,
            remaining: self.restart_delay.ceil().max(0.0) as u32,
            accumulator: 0.0,
            resolved: false,
        });
        true
    }

    /// Countdown на real time: −1 за каждую полную секунду
    pub fn tick_countdown(&mut self, real_delta: f32) -> CountdownTick {
        let WavePhase::EndGame(end_game) = &mut self.phase else {
            return CountdownTick::Inactive;
        };
        if end_game.resolved {
            return CountdownTick::Inactive;
        }

        if end_game.remaining > 0 {
            end_game.accumulator += real_delta;
            if end_game.accumulator < 1.0 {
                return CountdownTick::Pending;
            }
            // Не больше одной секунды за тик: длинный кадр не перескакивает значения
            end_game.accumulator = (end_game.accumulator - 1.0).min(1.0);
            end_game.remaining -= 1;
            if end_game.remaining > 0 {
                return CountdownTick::Ticked(end_game.remaining);
            }
        }

        end_game.resolved = true;
        if end_game.restart {
            CountdownTick::Restart
        } else {
            CountdownTick::Finished
        }
    }
}
