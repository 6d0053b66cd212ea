//! FSM AI systems (sensing + state transitions).

use bevy::prelude::*;

use crate::ai::{BehaviorState, Directive, Enemy, Perception, SensorConfig, StateEnteredAt};
use crate::components::{Heading, Player, PlayerState, WorldPosition};
use crate::config::SimulationConfig;
use crate::DeterministicRng;

/// Система: sensors → FSM step для каждого врага
///
/// Цель одна - игрок. Crouch скрывает от proximity circle, но не от конуса.
/// Если игрока нет - detection = false.
pub fn update_behavior(
    mut agents: Query<(
        Entity,
        &Enemy,
        &SensorConfig,
        &WorldPosition,
        &Heading,
        &mut BehaviorState,
        &mut Directive,
        &mut StateEnteredAt,
    )>,
    player: Query<(&WorldPosition, &PlayerState), With<Player>>,
    config: Res<SimulationConfig>,
    mut rng: ResMut<DeterministicRng>,
    time: Res<Time>,
) {
    let delta = time.delta_secs();
    let now = time.elapsed_secs();
    let target = player.single().ok().map(|(pos, state)| (pos.0, state.crouching));

    for (entity, enemy, sensor, position, heading, mut state, mut directive, mut entered_at) in agents.iter_mut() {
        let perception = match target {
            Some((target_pos, concealed)) if sensor.detects(position.0, heading.0, target_pos, concealed) => {
                Perception::seen(target_pos)
            }
            _ => Perception::unseen(),
        };

        let (next_state, next_directive) = state.step(perception, delta, &config.behavior, &mut rng.rng);

        if next_state.kind() != state.kind() {
            crate::log(&format!(
                "AI: {:?} ({:?}) {:?} → {:?} after {:.2}s",
                entity,
                enemy.kind,
                state.kind(),
                next_state.kind(),
                now - entered_at.0
            ));
            entered_at.0 = now;
        }

        if *state != next_state {
            *state = next_state;
        }
        *directive = next_directive;
    }
}
