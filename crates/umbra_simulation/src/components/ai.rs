//! AI компоненты: state machine, sensors, enemy kind

// NOTE: BehaviorState/SensorConfig определены в crate::ai module,
// здесь только re-export для единообразия импорта через crate::components
pub use crate::ai::{BehaviorState, Enemy, EnemyKind, PatrolPhase, SensorConfig};
