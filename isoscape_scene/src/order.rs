// Copyright 2025 the Isoscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use isoscape_render::SceneObject;

/// Draw order of scene objects.
///
/// Implemented for closures `Fn(&SceneObject<U>, &SceneObject<U>) -> bool`.
pub trait DrawOrder<U> {
    /// Whether `a` must be drawn before `b`.
    ///
    /// Must be a strict order: never `true` for both `(a, b)` and `(b, a)`.
    /// Objects for which neither call returns `true` keep the order they were
    /// collected in.
    fn draws_before(&self, a: &SceneObject<U>, b: &SceneObject<U>) -> bool;
}

impl<U, F> DrawOrder<U> for F
where
    F: Fn(&SceneObject<U>, &SceneObject<U>) -> bool,
{
    fn draws_before(&self, a: &SceneObject<U>, b: &SceneObject<U>) -> bool {
        self(a, b)
    }
}

/// Back-to-front order for isometric scenes.
///
/// Objects further from the viewer (smaller `x + y`) are drawn first; at equal
/// depth, lower objects are drawn first.
#[derive(Copy, Clone, Debug, Default)]
pub struct DepthOrder;

impl<U> DrawOrder<U> for DepthOrder {
    fn draws_before(&self, a: &SceneObject<U>, b: &SceneObject<U>) -> bool {
        let (a, b) = (a.position(), b.position());
        (a.x + a.y, a.z) < (b.x + b.y, b.z)
    }
}

/// Stable selection sort: repeatedly rotates the first minimum into place.
pub(crate) fn selection_sort<T>(entries: &mut [T], before: impl Fn(&T, &T) -> bool) {
    for i in 0..entries.len() {
        let mut min = i;
        for (j, entry) in entries.iter().enumerate().skip(i + 1) {
            if before(entry, &entries[min]) {
                min = j;
            }
        }
        entries[i..=min].rotate_right(1);
    }
}

#[cfg(test)]
mod tests {
    use super::selection_sort;

    #[test]
    fn sort_is_stable() {
        let mut v = [(2, 'a'), (1, 'b'), (2, 'c'), (0, 'd'), (1, 'e')];
        selection_sort(&mut v, |a, b| a.0 < b.0);
        assert_eq!(v, [(0, 'd'), (1, 'b'), (1, 'e'), (2, 'a'), (2, 'c')]);
    }

    #[test]
    fn sort_without_order_keeps_input() {
        let mut v = [3, 1, 2];
        selection_sort(&mut v, |_, _| false);
        assert_eq!(v, [3, 1, 2]);
    }
}
