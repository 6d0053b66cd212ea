//! Player input intents (уже debounced presentation слоем).
//!
//! Held-флаги живут пока их держат; edge-флаги (attack, vault, pause, …)
//! сбрасываются в конце кадра (PostUpdate).

use bevy::prelude::*;

use crate::components::WeaponSlot;

/// Ввод игрока на текущий тик
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct PlayerIntent {
    /// Направление движения (нормализуется контроллером)
    pub move_axis: Vec2,
    /// Куда целимся (world coords), None → по heading
    pub aim_point: Option<Vec2>,
    pub sprint_held: bool,
    pub crouch_held: bool,

    // Edge-triggered
    pub attack_primary: bool,
    pub attack_secondary: bool,
    pub stealth_kill: bool,
    pub vault: bool,
    pub pause: bool,
    pub interact: bool,
    pub select_slot: Option<WeaponSlot>,
}

impl PlayerIntent {
    /// Сброс одноразовых intents после обработки кадра
    pub fn clear_edges(&mut self) {
        self.attack_primary = false;
        self.attack_secondary = false;
        self.stealth_kill = false;
        self.vault = false;
        self.pause = false;
        self.interact = false;
        self.select_slot = None;
    }
}

/// System: PostUpdate - сброс edge intents
pub fn clear_intent_edges(mut intent: ResMut<PlayerIntent>) {
    intent.clear_edges();
}
