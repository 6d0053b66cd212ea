//! Obstacle grid (collider tilemap): клетки 1×1 с центрами в целых координатах.

use bevy::prelude::*;
use std::collections::HashSet;

/// Resource: заблокированные клетки арены
#[derive(Resource, Debug, Clone, Default)]
pub struct Obstacles {
    cells: HashSet<IVec2>,
}

impl Obstacles {
    pub fn from_cells(cells: impl IntoIterator<Item = IVec2>) -> Self {
        Self {
            cells: cells.into_iter().collect(),
        }
    }

    pub fn insert(&mut self, cell: IVec2) {
        self.cells.insert(cell);
    }

    pub fn cells(&self) -> impl Iterator<Item = IVec2> + '_ {
        self.cells.iter().copied()
    }

    /// Клетка, в которую попадает точка
    pub fn cell_of(point: Vec2) -> IVec2 {
        point.round().as_ivec2()
    }

    pub fn is_blocked(&self, point: Vec2) -> bool {
        self.cells.contains(&Self::cell_of(point))
    }

    /// Пересекает ли круг хотя бы одну заблокированную клетку (overlap circle)
    pub fn overlaps_circle(&self, center: Vec2, radius: f32) -> bool {
        let reach = radius.ceil() as i32 + 1;
        let origin = Self::cell_of(center);

        (-reach..=reach)
            .flat_map(|dx| (-reach..=reach).map(move |dy| origin + IVec2::new(dx, dy)))
            .filter(|cell| self.cells.contains(cell))
            .any(|cell| {
                let min = cell.as_vec2() - Vec2::splat(0.5);
                let max = cell.as_vec2() + Vec2::splat(0.5);
                center.clamp(min, max).distance(center) <= radius
            })
    }

    /// Можно ли шагнуть from → to (из заблокированной клетки выйти можно)
    pub fn allows_step(&self, from: Vec2, to: Vec2) -> bool {
        let target = Self::cell_of(to);
        target == Self::cell_of(from) || !self.cells.contains(&target)
    }
}
