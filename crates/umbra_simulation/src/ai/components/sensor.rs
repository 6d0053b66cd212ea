//! Sensor model: vision cone + proximity circle.
//!
//! Чистые функции текущего кадра, без памяти. Память о цели живёт в BehaviorState.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Допуск для angle test на границе конуса (acos float шум)
const ANGLE_TOLERANCE: f32 = 1e-5;

/// Параметры сенсоров врага (immutable per kind)
#[derive(Component, Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Reflect)]
#[reflect(Component)]
pub struct SensorConfig {
    /// Дальность конуса зрения (world units)
    pub vision_range: f32,
    /// ПОЛНЫЙ угол конуса в градусах (сравниваем с половиной)
    pub vision_angle_deg: f32,
    /// Радиус "слуха" - не работает против crouching цели
    pub proximity_radius: f32,
}

impl SensorConfig {
    pub fn half_angle(&self) -> f32 {
        (self.vision_angle_deg * 0.5).to_radians()
    }

    /// Цель в конусе: distance ≤ range И angle ≤ half-angle (inclusive)
    pub fn in_vision_cone(&self, origin: Vec2, heading: Vec2, target: Vec2) -> bool {
        let to_target = target - origin;
        to_target.length() <= self.vision_range
            && unsigned_angle(heading, to_target) <= self.half_angle() + ANGLE_TOLERANCE
    }

    pub fn in_proximity(&self, origin: Vec2, target: Vec2) -> bool {
        origin.distance(target) <= self.proximity_radius
    }

    /// Detection = cone OR (proximity AND NOT concealed)
    pub fn detects(&self, origin: Vec2, heading: Vec2, target: Vec2, concealed: bool) -> bool {
        self.in_vision_cone(origin, heading, target) || (!concealed && self.in_proximity(origin, target))
    }
}

/// Беззнаковый угол между векторами (радианы, 0..=π).
///
/// Нулевой вектор → 0 (цель в той же точке считается "прямо перед").
pub fn unsigned_angle(a: Vec2, b: Vec2) -> f32 {
    let denominator = a.length() * b.length();
    if denominator <= f32::EPSILON {
        return 0.0;
    }
    (a.dot(b) / denominator).clamp(-1.0, 1.0).acos()
}

/// Что агент "видит" в этом тике
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Perception {
    pub detected: bool,
    /// Текущая позиция цели (валидна только при detected)
    pub target: Vec2,
}

impl Perception {
    pub fn seen(target: Vec2) -> Self {
        Self { detected: true, target }
    }

    pub fn unseen() -> Self {
        Self {
            detected: false,
            target: Vec2::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn melee_sensor() -> SensorConfig {
        SensorConfig {
            vision_range: 5.0,
            vision_angle_deg: 60.0,
            proximity_radius: 0.7,
        }
    }

    #[test]
    fn test_target_in_front_detected() {
        let sensor = melee_sensor();
        assert!(sensor.detects(Vec2::ZERO, Vec2::Y, Vec2::new(0.0, 3.0), false));
        assert!(sensor.detects(Vec2::ZERO, Vec2::Y, Vec2::new(0.0, 3.0), true)); // crouch не спасает от зрения
    }

    #[test]
    fn test_range_boundary_inclusive() {
        let sensor = melee_sensor();
        assert!(sensor.in_vision_cone(Vec2::ZERO, Vec2::Y, Vec2::new(0.0, 5.0)));
        assert!(!sensor.in_vision_cone(Vec2::ZERO, Vec2::Y, Vec2::new(0.0, 5.01)));
    }

    #[test]
    fn test_angle_boundary_inclusive() {
        // 180° конус → half-angle 90°, цель строго сбоку
        let sensor = SensorConfig {
            vision_angle_deg: 180.0,
            ..melee_sensor()
        };
        assert!(sensor.in_vision_cone(Vec2::ZERO, Vec2::Y, Vec2::new(3.0, 0.0)));
        assert!(!sensor.in_vision_cone(Vec2::ZERO, Vec2::Y, Vec2::new(3.0, -0.1)));
    }

    #[test]
    fn test_outside_half_angle_not_seen() {
        let sensor = melee_sensor();
        // 45° от heading > 30° half-angle
        assert!(!sensor.in_vision_cone(Vec2::ZERO, Vec2::Y, Vec2::new(2.0, 2.0)));
    }

    #[test]
    fn test_proximity_suppressed_by_crouch() {
        let sensor = melee_sensor();
        let behind = Vec2::new(0.0, -0.5);
        assert!(sensor.detects(Vec2::ZERO, Vec2::Y, behind, false));
        assert!(!sensor.detects(Vec2::ZERO, Vec2::Y, behind, true));
    }

    #[test]
    fn test_same_position_counts_as_angle_zero() {
        assert_eq!(unsigned_angle(Vec2::Y, Vec2::ZERO), 0.0);
        assert!(melee_sensor().in_vision_cone(Vec2::ONE, Vec2::Y, Vec2::ONE));
    }
}
