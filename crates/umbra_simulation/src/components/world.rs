//! World positioning компоненты: WorldPosition, Heading, Velocity
//!
//! Top-down плоскость (x, y). Velocity интегрируется в FixedUpdate (crate::physics).

use bevy::prelude::*;

/// Позиция актора/снаряда в world units
#[derive(Component, Debug, Clone, Copy, PartialEq, Default, Reflect)]
#[reflect(Component)]
pub struct WorldPosition(pub Vec2);

/// Направление взгляда (unit vector)
///
/// Инвариант: длина = 1. Default смотрит "вверх" (+Y).
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Heading(pub Vec2);

impl Default for Heading {
    fn default() -> Self {
        Self(Vec2::Y)
    }
}

impl Heading {
    /// Heading из произвольного вектора (нулевой → default)
    pub fn from_direction(direction: Vec2) -> Self {
        Self(direction.try_normalize().unwrap_or(Vec2::Y))
    }

    /// Поворот не больше чем на `max_radians` в сторону `target` (rotate-towards)
    pub fn rotate_towards(&mut self, target: Vec2, max_radians: f32) {
        self.0 = rotate_towards(self.0, target, max_radians);
    }

    /// Вращение на месте (положительный угол = против часовой)
    pub fn rotate_by(&mut self, radians: f32) {
        self.0 = Vec2::from_angle(radians).rotate(self.0).normalize_or(Vec2::Y);
    }
}

/// Скорость (units/sec), выставляется AI/controller, интегрируется physics
#[derive(Component, Debug, Clone, Copy, PartialEq, Default, Reflect)]
#[reflect(Component)]
pub struct Velocity(pub Vec2);

/// Rotate-towards для unit векторов.
///
/// Знак поворота выбирается по кратчайшей дуге; если до цели меньше
/// `max_radians` - снапаемся ровно на цель.
pub fn rotate_towards(current: Vec2, target: Vec2, max_radians: f32) -> Vec2 {
    let Some(target) = target.try_normalize() else {
        return current;
    };

    let signed_angle = current.perp_dot(target).atan2(current.dot(target));
    if signed_angle.abs() <= max_radians {
        return target;
    }

    let step = max_radians.copysign(signed_angle);
    Vec2::from_angle(step).rotate(current).normalize_or(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_rotate_towards_is_bounded() {
        // 90° до цели, шаг 45°
        let rotated = rotate_towards(Vec2::Y, Vec2::X, FRAC_PI_2 / 2.0);
        let expected = Vec2::new(1.0, 1.0).normalize();
        assert!(rotated.abs_diff_eq(expected, 1e-5), "rotated = {:?}", rotated);
    }

    #[test]
    fn test_rotate_towards_snaps_when_close() {
        let rotated = rotate_towards(Vec2::Y, Vec2::X, FRAC_PI_2 + 0.1);
        assert!(rotated.abs_diff_eq(Vec2::X, 1e-6));
    }

    #[test]
    fn test_rotate_towards_zero_target_keeps_heading() {
        assert_eq!(rotate_towards(Vec2::Y, Vec2::ZERO, 1.0), Vec2::Y);
    }

    #[test]
    fn test_heading_rotate_by_stays_unit() {
        let mut heading = Heading::default();
        for _ in 0..100 {
            heading.rotate_by(0.37);
        }
        assert!((heading.0.length() - 1.0).abs() < 1e-4);
    }
}
