//! AI components

pub mod enemy;
pub mod fsm;
pub mod sensor;


// Re-export all components
pub use enemy::*;
pub use fsm::*;
pub use sensor::*;
