// Copyright 2025 the Isoscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tile slopes and their corner bits.

bitflags::bitflags! {
    /// Tile corners raised one step above the tile's lowest corner.
    ///
    /// The north corner sits at the tile's own grid position; the west, east and
    /// south corners are shared with the tiles at `(x + 1, y)`, `(x, y + 1)` and
    /// `(x + 1, y + 1)`.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Corners: u8 {
        /// Top corner of the diamond.
        const N = 0b0001;
        /// Bottom corner of the diamond.
        const S = 0b0010;
        /// Left corner of the diamond.
        const W = 0b0100;
        /// Right corner of the diamond.
        const E = 0b1000;
    }
}

/// One of the 15 shapes a tile surface can take.
///
/// Each variant names the corners that are one step above the others.
/// Four raised corners are not a slope: such a tile is simply one step higher
/// and [`Flat`](Self::Flat).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Slope {
    /// All corners at the same height.
    #[default]
    Flat = 0,
    /// North corner raised.
    N,
    /// South corner raised.
    S,
    /// East corner raised.
    E,
    /// West corner raised.
    W,
    /// North and east corners raised.
    Ne,
    /// East and south corners raised.
    Es,
    /// South and west corners raised.
    Sw,
    /// West and north corners raised.
    Wn,
    /// North and south corners raised.
    Ns,
    /// West and east corners raised.
    We,
    /// All but the west corner raised.
    Nes,
    /// All but the north corner raised.
    Esw,
    /// All but the south corner raised.
    Wne,
    /// All but the east corner raised.
    Swn,
}

impl Slope {
    /// Every slope, in index order.
    pub const ALL: [Self; 15] = [
        Self::Flat,
        Self::N,
        Self::S,
        Self::E,
        Self::W,
        Self::Ne,
        Self::Es,
        Self::Sw,
        Self::Wn,
        Self::Ns,
        Self::We,
        Self::Nes,
        Self::Esw,
        Self::Wne,
        Self::Swn,
    ];

    /// Dense index of this slope, `0..15`.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The raised corners of this slope.
    #[must_use]
    pub const fn corners(self) -> Corners {
        match self {
            Self::Flat => Corners::empty(),
            Self::N => Corners::N,
            Self::S => Corners::S,
            Self::E => Corners::E,
            Self::W => Corners::W,
            Self::Ne => Corners::N.union(Corners::E),
            Self::Es => Corners::E.union(Corners::S),
            Self::Sw => Corners::S.union(Corners::W),
            Self::Wn => Corners::W.union(Corners::N),
            Self::Ns => Corners::N.union(Corners::S),
            Self::We => Corners::W.union(Corners::E),
            Self::Nes => Corners::N.union(Corners::E).union(Corners::S),
            Self::Esw => Corners::E.union(Corners::S).union(Corners::W),
            Self::Wne => Corners::W.union(Corners::N).union(Corners::E),
            Self::Swn => Corners::S.union(Corners::W).union(Corners::N),
        }
    }

    /// The slope whose raised corners are `corners`.
    ///
    /// No raised corner and four raised corners both give [`Flat`](Self::Flat).
    #[must_use]
    pub fn from_corners(corners: Corners) -> Self {
        if corners == Corners::all() {
            return Self::Flat;
        }
        Self::ALL
            .into_iter()
            .find(|slope| slope.corners() == corners)
            .unwrap_or(Self::Flat)
    }

    /// Height of `corner` above the tile's lowest corner, `0` or `1`.
    #[must_use]
    pub fn corner_offset(self, corner: Corners) -> i32 {
        i32::from(self.corners().contains(corner))
    }

    /// Difference between the lowest corner and the north corner.
    ///
    /// A tile's height is the height of its north corner, so slopes that raise
    /// the north corner have their lowest corner one step below it.
    #[must_use]
    pub fn min_height_offset(self) -> i32 {
        -self.corner_offset(Corners::N)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_round_trip() {
        for slope in Slope::ALL {
            assert_eq!(Slope::from_corners(slope.corners()), slope);
        }
        assert_eq!(Slope::from_corners(Corners::all()), Slope::Flat);
    }

    #[test]
    fn index_order_is_stable() {
        for (i, slope) in Slope::ALL.into_iter().enumerate() {
            assert_eq!(slope.index(), i);
        }
        assert_eq!(Slope::Nes.index(), 11);
    }

    #[test]
    fn north_raising_slopes_sit_one_step_lower() {
        assert_eq!(Slope::Flat.min_height_offset(), 0);
        assert_eq!(Slope::N.min_height_offset(), -1);
        assert_eq!(Slope::Es.min_height_offset(), 0);
        assert_eq!(Slope::Swn.min_height_offset(), -1);
    }
}
