// Copyright 2025 the Isoscape Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Object arena with per-cell corner chains.

use alloc::vec::Vec;

use isoscape_geom::{RealPoint, VirtualPoint};

use crate::{CellId, Corner, GridLayout, ObjectFlags, ObjectId, ScreenRect};

type Link = (ObjectId, Corner);

/// What precedes a chain entry: the cell head, or another object's corner.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Prev {
    Cell(CellId),
    Object(ObjectId, Corner),
}

#[derive(Copy, Clone, Debug, Default)]
struct CornerLink {
    prev: Option<Prev>,
    next: Option<Link>,
}

/// An object stored in a [`SpatialIndex`].
#[derive(Clone, Debug)]
pub struct IsoObject<P> {
    position: VirtualPoint,
    flags: ObjectFlags,
    bounds: Option<ScreenRect>,
    links: [CornerLink; 4],
    /// Caller data carried with the object.
    pub payload: P,
}

impl<P> IsoObject<P> {
    /// Virtual position of the object.
    #[must_use]
    pub const fn position(&self) -> VirtualPoint {
        self.position
    }

    /// Current flags.
    #[must_use]
    pub const fn flags(&self) -> ObjectFlags {
        self.flags
    }

    /// Whether the object is drawn.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.flags.contains(ObjectFlags::VISIBLE)
    }

    /// Whether the object was already collected for the current frame.
    #[must_use]
    pub const fn is_selected(&self) -> bool {
        self.flags.contains(ObjectFlags::SELECTED)
    }

    /// Screen rectangle the object was last placed with, if it is linked.
    #[must_use]
    pub const fn bounds(&self) -> Option<ScreenRect> {
        self.bounds
    }

    /// Whether any corner is linked into a cell.
    #[must_use]
    pub fn is_linked(&self) -> bool {
        self.links.iter().any(|l| l.prev.is_some())
    }
}

#[derive(Clone, Debug)]
struct Slot<P> {
    generation: u32,
    object: Option<IsoObject<P>>,
}

/// Spatial index of screen objects over a [`GridLayout`].
///
/// Each object is linked into the cells its bounding box corners fall in, once
/// per distinct cell. A cell therefore lists every object with at least one
/// corner inside it, and walking the cells overlapping a viewport finds every
/// object no larger than [`GridLayout::check_object_limits`] allows.
#[derive(Clone, Debug)]
pub struct SpatialIndex<P> {
    layout: GridLayout,
    heads: Vec<Option<Link>>,
    slots: Vec<Slot<P>>,
    free: Vec<u32>,
    len: usize,
}

impl<P> SpatialIndex<P> {
    /// Creates an empty index over `layout`.
    #[must_use]
    pub fn new(layout: GridLayout) -> Self {
        let mut heads = Vec::new();
        heads.resize(layout.cell_count(), None);
        Self {
            layout,
            heads,
            slots: Vec::new(),
            free: Vec::new(),
            len: 0,
        }
    }

    /// The cell layout.
    #[must_use]
    pub const fn layout(&self) -> &GridLayout {
        &self.layout
    }

    /// Number of live objects.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether there are no live objects.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Adds an unlinked, visible object at `position`.
    ///
    /// It is not found through any cell until [`place`](Self::place) is called.
    pub fn insert(&mut self, position: VirtualPoint, payload: P) -> ObjectId {
        let object = IsoObject {
            position,
            flags: ObjectFlags::default(),
            bounds: None,
            links: [CornerLink::default(); 4],
            payload,
        };
        self.len += 1;
        if let Some(idx) = self.free.pop() {
            let slot = &mut self.slots[idx as usize];
            slot.generation += 1;
            slot.object = Some(object);
            return ObjectId::new(idx, slot.generation);
        }
        #[expect(
            clippy::cast_possible_truncation,
            reason = "more than u32::MAX objects is unsupported"
        )]
        let idx = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 1,
            object: Some(object),
        });
        ObjectId::new(idx, 1)
    }

    /// Removes an object, unlinking it first. Returns its payload.
    pub fn remove(&mut self, id: ObjectId) -> Option<P> {
        if !self.contains(id) {
            return None;
        }
        self.unlink(id);
        let object = self.slots[id.idx()].object.take()?;
        #[expect(
            clippy::cast_possible_truncation,
            reason = "slot indices were created from u32"
        )]
        self.free.push(id.idx() as u32);
        self.len -= 1;
        Some(object.payload)
    }

    /// Whether `id` refers to a live object.
    #[must_use]
    pub fn contains(&self, id: ObjectId) -> bool {
        self.slots
            .get(id.idx())
            .is_some_and(|s| s.generation == id.1 && s.object.is_some())
    }

    /// The object for `id`, if live.
    #[must_use]
    pub fn get(&self, id: ObjectId) -> Option<&IsoObject<P>> {
        let slot = self.slots.get(id.idx())?;
        if slot.generation != id.1 {
            return None;
        }
        slot.object.as_ref()
    }

    /// Mutable access to the object's payload.
    pub fn payload_mut(&mut self, id: ObjectId) -> Option<&mut P> {
        self.object_mut(id).map(|o| &mut o.payload)
    }

    fn object_mut(&mut self, id: ObjectId) -> Option<&mut IsoObject<P>> {
        let slot = self.slots.get_mut(id.idx())?;
        if slot.generation != id.1 {
            return None;
        }
        slot.object.as_mut()
    }

    /// Iterates over all live objects.
    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &IsoObject<P>)> + '_ {
        self.slots.iter().enumerate().filter_map(|(idx, slot)| {
            #[expect(
                clippy::cast_possible_truncation,
                reason = "slot indices were created from u32"
            )]
            let idx = idx as u32;
            let object = slot.object.as_ref()?;
            Some((ObjectId::new(idx, slot.generation), object))
        })
    }

    /// Updates an object's logical position. Returns `false` for stale ids.
    ///
    /// The cell links are left alone; call [`place`](Self::place) with the new
    /// screen rectangle afterwards.
    pub fn set_position(&mut self, id: ObjectId, position: VirtualPoint) -> bool {
        self.object_mut(id).map(|o| o.position = position).is_some()
    }

    /// Shows or hides an object.
    pub fn set_visible(&mut self, id: ObjectId, visible: bool) -> bool {
        self.object_mut(id)
            .map(|o| o.flags.set(ObjectFlags::VISIBLE, visible))
            .is_some()
    }

    /// Marks an object as collected for the current frame, or clears the mark.
    pub fn set_selected(&mut self, id: ObjectId, selected: bool) -> bool {
        self.object_mut(id)
            .map(|o| o.flags.set(ObjectFlags::SELECTED, selected))
            .is_some()
    }

    /// The cell containing screen point `p`.
    #[must_use]
    pub fn cell_at(&self, p: RealPoint) -> Option<CellId> {
        self.layout.cell_at(p)
    }

    /// Links an object into the cells under the corners of `rect`.
    ///
    /// Any previous links are dropped first. Corners outside every cell, and
    /// corners sharing a cell with an earlier corner, are not linked. Returns
    /// `false` if `id` is stale.
    pub fn place(&mut self, id: ObjectId, rect: ScreenRect) -> bool {
        if !self.contains(id) {
            return false;
        }
        self.unlink(id);

        let mut cells: [Option<CellId>; 4] = [None; 4];
        for role in Corner::ALL {
            let cell = self.layout.cell_at(rect.corner(role));
            let i = role.idx();
            if let Some(cell) = cell
                && !cells[..i].contains(&Some(cell))
            {
                cells[i] = Some(cell);
                self.push_front(cell, id, role);
            }
        }
        if let Some(object) = self.object_mut(id) {
            object.bounds = Some(rect);
        }
        true
    }

    /// Removes every cell link of an object. The object stays in the arena.
    pub fn unlink(&mut self, id: ObjectId) {
        if !self.contains(id) {
            return;
        }
        for role in Corner::ALL {
            self.unlink_corner(id, role);
        }
        if let Some(object) = self.object_mut(id) {
            object.bounds = None;
        }
    }

    /// Objects linked into `cell`, newest first. An object appears once per cell.
    pub fn objects_in_cell(&self, cell: CellId) -> CellObjects<'_, P> {
        CellObjects {
            index: self,
            next: self.cell_head(cell),
        }
    }

    /// First entry of `cell`'s chain and the corner it is linked by.
    ///
    /// With [`next_in_cell`](Self::next_in_cell) this walks a cell without
    /// holding a borrow of the index between steps.
    #[must_use]
    pub fn cell_head(&self, cell: CellId) -> Option<(ObjectId, Corner)> {
        self.heads.get(cell.index()).copied().flatten()
    }

    /// Entry following `id`'s `role` corner in its cell's chain.
    #[must_use]
    pub fn next_in_cell(&self, id: ObjectId, role: Corner) -> Option<(ObjectId, Corner)> {
        self.link(id, role).and_then(|link| link.next)
    }

    fn link(&self, id: ObjectId, role: Corner) -> Option<&CornerLink> {
        self.get(id).map(|o| &o.links[role.idx()])
    }

    fn link_mut(&mut self, id: ObjectId, role: Corner) -> Option<&mut CornerLink> {
        self.object_mut(id).map(|o| &mut o.links[role.idx()])
    }

    fn push_front(&mut self, cell: CellId, id: ObjectId, role: Corner) {
        let old = self.heads[cell.index()].replace((id, role));
        if let Some((next_id, next_role)) = old
            && let Some(next) = self.link_mut(next_id, next_role)
        {
            next.prev = Some(Prev::Object(id, role));
        }
        if let Some(link) = self.link_mut(id, role) {
            link.prev = Some(Prev::Cell(cell));
            link.next = old;
        }
    }

    fn unlink_corner(&mut self, id: ObjectId, role: Corner) {
        let Some(&CornerLink { prev, next }) = self.link(id, role) else {
            return;
        };
        let Some(prev) = prev else {
            return;
        };
        match prev {
            Prev::Cell(cell) => self.heads[cell.index()] = next,
            Prev::Object(prev_id, prev_role) => {
                if let Some(link) = self.link_mut(prev_id, prev_role) {
                    link.next = next;
                }
            }
        }
        if let Some((next_id, next_role)) = next
            && let Some(link) = self.link_mut(next_id, next_role)
        {
            link.prev = Some(prev);
        }
        if let Some(link) = self.link_mut(id, role) {
            *link = CornerLink::default();
        }
    }

    /// Walks every chain and checks that links agree in both directions.
    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        let mut seen = 0;
        for (cell, head) in self.heads.iter().enumerate() {
            let mut expected_prev = Prev::Cell(CellId(u32::try_from(cell).unwrap()));
            let mut cursor = *head;
            let mut in_cell = Vec::new();
            while let Some((id, role)) = cursor {
                let link = self.link(id, role).expect("chain points at a live object");
                assert_eq!(link.prev, Some(expected_prev));
                assert!(!in_cell.contains(&id), "object linked twice into one cell");
                in_cell.push(id);
                seen += 1;
                expected_prev = Prev::Object(id, role);
                cursor = link.next;
            }
        }
        let linked: usize = self
            .iter()
            .map(|(_, o)| o.links.iter().filter(|l| l.prev.is_some()).count())
            .sum();
        assert_eq!(seen, linked);
    }
}

/// Iterator over the objects linked into one cell.
#[derive(Debug)]
pub struct CellObjects<'a, P> {
    index: &'a SpatialIndex<P>,
    next: Option<Link>,
}

impl<'a, P> Iterator for CellObjects<'a, P> {
    type Item = (ObjectId, &'a IsoObject<P>);

    fn next(&mut self) -> Option<Self::Item> {
        let (id, role) = self.next?;
        let object = self.index.get(id)?;
        self.next = object.links[role.idx()].next;
        Some((id, object))
    }
}
