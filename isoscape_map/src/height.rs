// Copyright 2025 the Isoscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Height edits and the slope correction that follows them.
//!
//! Raising or lowering a tile may leave a neighbor two or more steps away. The
//! walk pushes such neighbors one step closer, recursing outwards inside a
//! direction cone so that it never turns back towards the edited tile. The same
//! walk runs in two modes: a dry run that only asks the policy, and an applied
//! run that writes heights and collects the touched tiles for slope correction.

use alloc::vec::Vec;

use isoscape_geom::{Corners, Slope};

use crate::{HeightPolicy, Map};

/// Propagation direction, from the edited tile outwards.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Direction {
    N,
    S,
    W,
    E,
    Ne,
    Se,
    Sw,
    Nw,
}

use Direction::{E, N, Ne, Nw, S, Se, Sw, W};

/// Neighbors of the edited tile, in visiting order.
const NEIGHBORS: [(i32, i32, Direction); 8] = [
    (1, 0, Se),
    (0, 1, Sw),
    (1, 1, S),
    (-1, -1, N),
    (-1, 0, Nw),
    (0, -1, Ne),
    (1, -1, E),
    (-1, 1, W),
];

/// Tiles whose corners include this tile's north corner.
const BACKWARD: [(i32, i32); 3] = [(-1, -1), (-1, 0), (0, -1)];

/// Tiles providing this tile's west, east and south corners.
const FORWARD: [(i32, i32); 3] = [(1, 0), (0, 1), (1, 1)];

impl Direction {
    /// Neighbors still ahead when travelling in this direction.
    fn cone(self) -> &'static [(i32, i32, Self)] {
        match self {
            N => &[(-1, -1, N), (-1, 0, Nw), (0, -1, Ne)],
            S => &[(1, 1, S), (1, 0, Se), (0, 1, Sw)],
            W => &[(-1, 1, W), (-1, 0, Nw), (0, 1, Sw)],
            E => &[(1, -1, E), (1, 0, Se), (0, -1, Ne)],
            Ne => &[(0, -1, Ne)],
            Se => &[(1, 0, Se)],
            Sw => &[(0, 1, Sw)],
            Nw => &[(-1, 0, Nw)],
        }
    }
}

/// The map as seen by one walk: read-only for a dry run, writable when applying.
enum Grid<'a, D> {
    DryRun(&'a Map<D>),
    Apply(&'a mut Map<D>),
}

struct Walk<'a, D, P: ?Sized> {
    grid: Grid<'a, D>,
    policy: &'a mut P,
    /// Tiles whose height changed, in completion order.
    touched: Vec<(i32, i32)>,
}

impl<D, P: HeightPolicy<D> + ?Sized> Walk<'_, D, P> {
    fn map(&self) -> &Map<D> {
        match &self.grid {
            Grid::DryRun(map) => map,
            Grid::Apply(map) => map,
        }
    }

    fn in_bounds(&self, x: i32, y: i32) -> bool {
        let map = self.map();
        (0..=map.last_x()).contains(&x) && (0..=map.last_y()).contains(&y)
    }

    fn clamp(&self, z: i32) -> i32 {
        z.clamp(0, self.map().max_height())
    }

    /// Consults the policy for tiles that need authorization.
    fn authorize(&mut self, x: i32, y: i32, z: i32) -> bool {
        let Grid::DryRun(map) = &self.grid else {
            return true;
        };
        if !map.is_editable(x, y) {
            return true;
        }
        let (lx, ly) = map.to_logical(x, y);
        match map.get(x, y) {
            Some(tile) => self.policy.can_set_height(tile, lx, ly, z),
            None => true,
        }
    }

    /// Writes a height and flags the tiles whose slopes depend on it.
    fn write(&mut self, x: i32, y: i32, z: i32) {
        let Grid::Apply(map) = &mut self.grid else {
            return;
        };
        let Some(tile) = map.get_mut(x, y) else {
            return;
        };
        let old = tile.height();
        debug_assert_ne!(old, z, "writes only happen on change");
        #[expect(clippy::cast_possible_truncation, reason = "clamped to 0..=15")]
        tile.set_height(z as u8);
        tile.mark_needs_slope(true);
        for (dx, dy) in BACKWARD {
            if let Some(tile) = map.get_mut(x + dx, y + dy) {
                tile.mark_needs_slope(true);
            }
        }
        if map.is_playable(x, y) {
            let (lx, ly) = map.to_logical(x, y);
            if let Some(tile) = map.get(x, y) {
                self.policy.height_changed(tile, lx, ly, old);
            }
        }
    }

    /// Visits the neighbors of the edited tile at its new height `z`.
    fn spread(&mut self, x: i32, y: i32, z: i32) -> bool {
        for (dx, dy, direction) in NEIGHBORS {
            let (nx, ny) = (x + dx, y + dy);
            if !self.in_bounds(nx, ny) {
                continue;
            }
            let diff = z - self.map().height_at(nx, ny);
            let ok = if diff >= 2 {
                self.push(nx, ny, z - 1, true, direction)
            } else if diff <= -2 {
                self.push(nx, ny, z + 1, false, direction)
            } else {
                true
            };
            if !ok {
                return false;
            }
        }
        true
    }

    /// Moves `(x, y)` to `z` and continues inside the cone of `direction`.
    fn push(&mut self, x: i32, y: i32, z: i32, raising: bool, direction: Direction) -> bool {
        let z = self.clamp(z);
        if z == self.map().height_at(x, y) {
            return true;
        }
        let applying = matches!(self.grid, Grid::Apply(_));
        if applying {
            self.write(x, y, z);
        } else if !self.authorize(x, y, z) {
            return false;
        }

        let mut ok = true;
        for &(dx, dy, next) in direction.cone() {
            if !ok {
                break;
            }
            let (nx, ny) = (x + dx, y + dy);
            if !self.in_bounds(nx, ny) {
                continue;
            }
            let diff = z - self.map().height_at(nx, ny);
            if raising && diff >= 2 {
                ok = self.push(nx, ny, z - 1, true, next);
            } else if !raising && diff <= -2 {
                ok = self.push(nx, ny, z + 1, false, next);
            }
        }

        if applying {
            self.touched.push((x, y));
        }
        ok
    }
}

impl<D> Map<D> {
    /// Whether grid tile `(x, y)` can be moved to height `z`.
    ///
    /// Runs the same walk as [`set_height`](Self::set_height) without changing
    /// anything, asking `policy` about every playable or boundary tile whose
    /// height would change. Stops at the first refusal. `z` is clamped to
    /// `[0, max_height]` first.
    pub fn can_set_height<P: HeightPolicy<D> + ?Sized>(
        &self,
        x: i32,
        y: i32,
        z: i32,
        policy: &mut P,
    ) -> bool {
        let mut walk = Walk {
            grid: Grid::DryRun(self),
            policy,
            touched: Vec::new(),
        };
        let z = walk.clamp(z);
        if z != self.height_at(x, y) && !walk.authorize(x, y, z) {
            return false;
        }
        walk.spread(x, y, z)
    }

    /// Moves grid tile `(x, y)` to height `z`, dragging neighbors along so that
    /// no two adjacent tiles end up more than one step apart, then recomputes
    /// the affected slopes.
    ///
    /// `z` is clamped to `[0, max_height]`. This does not consult the policy's
    /// authorization hook; call [`can_set_height`](Self::can_set_height) first
    /// when edits need approval.
    pub fn set_height<P: HeightPolicy<D> + ?Sized>(
        &mut self,
        x: i32,
        y: i32,
        z: i32,
        policy: &mut P,
    ) {
        let reach = usize::try_from(self.max_height()).unwrap_or_default();
        let mut walk = Walk {
            grid: Grid::Apply(self),
            policy: &mut *policy,
            touched: Vec::with_capacity(4 * reach * reach),
        };
        let z = walk.clamp(z);
        if z != walk.map().height_at(x, y) {
            walk.touched.push((x, y));
            walk.write(x, y, z);
        }
        walk.spread(x, y, z);
        let touched = walk.touched;

        tracing::trace!(x, y, z, touched = touched.len(), "height edit applied");

        for (tx, ty) in touched {
            for (dx, dy) in BACKWARD {
                self.update_slope(tx + dx, ty + dy, policy);
            }
            self.update_slope(tx, ty, policy);
        }
    }

    /// Recomputes the slope of grid tile `(x, y)` if it is flagged.
    fn update_slope<P: HeightPolicy<D> + ?Sized>(&mut self, x: i32, y: i32, policy: &mut P) {
        let Some(tile) = self.get_mut(x, y) else {
            return;
        };
        if !tile.needs_slope() {
            return;
        }
        tile.mark_needs_slope(false);
        if x > self.last_x() || y > self.last_y() {
            return;
        }

        let own = self.height_at(x, y);
        let [west, east, south] = FORWARD.map(|(dx, dy)| self.height_at(x + dx, y + dy));
        let highest = own.max(west).max(east).max(south);
        let next = if own == west && own == east && own == south {
            Slope::Flat
        } else {
            let mut corners = Corners::empty();
            corners.set(Corners::N, own == highest);
            corners.set(Corners::W, west == highest);
            corners.set(Corners::E, east == highest);
            corners.set(Corners::S, south == highest);
            Slope::from_corners(corners)
        };

        let playable = self.is_playable(x, y);
        let (lx, ly) = self.to_logical(x, y);
        let Some(tile) = self.get_mut(x, y) else {
            return;
        };
        let old = tile.slope();
        if old != next {
            tile.set_slope(next);
            if playable {
                policy.slope_changed(tile, lx, ly, old);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AcceptAll, Tile};

    fn flat(width: i32, height: i32, max_height: i32) -> Map<()> {
        Map::new(width, height, max_height, &mut |_x: i32, _y: i32| Tile::new(()))
    }

    #[test]
    fn cones_never_point_back() {
        for (dx, dy, direction) in NEIGHBORS {
            for &(cx, cy, _) in direction.cone() {
                assert!(
                    (dx + cx, dy + cy) != (0, 0),
                    "{direction:?} cone returns to the origin"
                );
            }
        }
    }

    #[test]
    fn unchanged_height_touches_nothing() {
        let mut map = flat(4, 4, 2);
        map.set_height(3, 3, 0, &mut AcceptAll);
        assert!(map.tiles().all(|t| t.height() == 0 && t.slope() == Slope::Flat));
    }

    #[test]
    fn single_step_raise_shapes_neighbors() {
        let mut map = flat(6, 6, 2);
        let (x, y) = map.to_grid(2, 2);
        map.set_height(x, y, 1, &mut AcceptAll);
        assert_eq!(map.height_at(x, y), 1);
        assert_eq!(map.get(x, y).unwrap().slope(), Slope::N);
        assert_eq!(map.get(x - 1, y - 1).unwrap().slope(), Slope::S);
        assert_eq!(map.get(x - 1, y).unwrap().slope(), Slope::W);
        assert_eq!(map.get(x, y - 1).unwrap().slope(), Slope::E);
        assert_eq!(map.get(x + 1, y).unwrap().slope(), Slope::Flat);
    }

    #[test]
    fn heights_are_clamped() {
        let mut map = flat(6, 6, 2);
        let (x, y) = map.to_grid(3, 3);
        map.set_height(x, y, 9, &mut AcceptAll);
        assert_eq!(map.height_at(x, y), 2);
        map.set_height(x, y, -4, &mut AcceptAll);
        assert_eq!(map.height_at(x, y), 0);
        // Neighbors one step up are already within reach and stay put.
        assert_eq!(map.height_at(x + 1, y), 1);
    }
}
