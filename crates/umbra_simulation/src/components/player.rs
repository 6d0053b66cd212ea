//! Player control marker + состояние контроллера игрока
//!
//! Отмечает entity которым управляет игрок через PlayerIntent (в отличие от AI).

use bevy::prelude::*;

use super::ResourcePool;
use crate::config::PlayerSettings;

/// Marker component для player-controlled entity
///
/// - AI systems используют `Without<Player>` filter (пропускают игрока)
/// - Input systems используют `With<Player>` filter
///
/// В single-player режиме только один entity имеет этот компонент.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Player;

/// Выбранный слот оружия (hotbar 1/2)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum WeaponSlot {
    #[default]
    Fireball,
    Slash,
}

/// Vault в процессе: линейная интерполяция start → end
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct VaultMotion {
    pub start: Vec2,
    pub end: Vec2,
    pub elapsed: f32,
    pub duration: f32,
}

impl VaultMotion {
    /// Позиция на текущем прогрессе (clamp в конце)
    pub fn sample(&self) -> Vec2 {
        let t = if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        };
        self.start.lerp(self.end, t)
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}

/// Состояние контроллера игрока: ресурсы, стойка, таймеры действий
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct PlayerState {
    pub stamina: ResourcePool,
    pub mana: ResourcePool,
    pub sprinting: bool,
    /// Stamina кончилась во время спринта - ждём отпускания кнопки
    pub sprint_locked: bool,
    pub crouching: bool,
    pub slot: WeaponSlot,
    /// Остаток окна атаки (swing), 0 = можно бить снова
    pub attack_timer: f32,
    /// Накопитель для health regen (+1 HP за интервал)
    pub health_regen_timer: f32,
    pub vault: Option<VaultMotion>,
}

impl PlayerState {
    pub fn from_settings(settings: &PlayerSettings) -> Self {
        Self {
            stamina: ResourcePool::new(settings.max_stamina, settings.stamina_regen_rate, settings.stamina_drain_rate),
            mana: ResourcePool::new(settings.max_mana, settings.mana_regen_rate, 0.0),
            sprinting: false,
            sprint_locked: false,
            crouching: false,
            slot: WeaponSlot::default(),
            attack_timer: 0.0,
            health_regen_timer: 0.0,
            vault: None,
        }
    }

    pub fn is_attacking(&self) -> bool {
        self.attack_timer > 0.0
    }

    pub fn is_vaulting(&self) -> bool {
        self.vault.is_some()
    }
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::from_settings(&PlayerSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vault_motion_sample() {
        let mut vault = VaultMotion {
            start: Vec2::ZERO,
            end: Vec2::new(1.0, 0.0),
            elapsed: 0.0,
            duration: 0.25,
        };
        assert_eq!(vault.sample(), Vec2::ZERO);

        vault.elapsed = 0.125;
        assert!(vault.sample().abs_diff_eq(Vec2::new(0.5, 0.0), 1e-6));
        assert!(!vault.is_finished());

        vault.elapsed = 1.0; // overshoot → clamp
        assert_eq!(vault.sample(), Vec2::new(1.0, 0.0));
        assert!(vault.is_finished());
    }

    #[test]
    fn test_player_state_defaults() {
        let state = PlayerState::default();
        assert_eq!(state.stamina.current, 100.0);
        assert_eq!(state.mana.current, 100.0);
        assert_eq!(state.slot, WeaponSlot::Fireball);
        assert!(!state.is_attacking());
        assert!(!state.is_vaulting());
    }
}
