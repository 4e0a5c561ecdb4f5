// Copyright 2025 the Isoscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// The outcome of [`clamp`]: the clamped value and which bound, if any, was hit.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Clamped<T> {
    /// The value, limited to `[min, max]`.
    pub value: T,
    /// The input was below `min`.
    pub to_min: bool,
    /// The input was above `max`.
    pub to_max: bool,
}

impl<T> Clamped<T> {
    /// Returns `true` if either bound was hit.
    #[must_use]
    pub const fn was_clamped(&self) -> bool {
        self.to_min || self.to_max
    }
}

/// Limits `value` to `[min, max]`, reporting which bound was applied.
///
/// ```
/// use isoscape_geom::clamp;
///
/// let c = clamp(-3, 0, 10);
/// assert_eq!(c.value, 0);
/// assert!(c.to_min && !c.to_max);
/// assert!(!clamp(4, 0, 10).was_clamped());
/// ```
#[must_use]
pub fn clamp<T: Ord + Copy>(value: T, min: T, max: T) -> Clamped<T> {
    debug_assert!(min <= max, "clamp bounds are inverted");
    if value < min {
        Clamped {
            value: min,
            to_min: true,
            to_max: false,
        }
    } else if value > max {
        Clamped {
            value: max,
            to_min: false,
            to_max: true,
        }
    } else {
        Clamped {
            value,
            to_min: false,
            to_max: false,
        }
    }
}
