// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Slot containers: the storage a menu wraps.
//!
//! ## Overview
//!
//! [`SlotContainer`] is the boundary to the host's storage. A container is a
//! fixed-capacity ordered array of slots addressed by index in `0..size()`,
//! plus the list of viewers currently looking at it.
//!
//! Callers go through [`Menu`](crate::menu::Menu), which checks bounds before
//! touching the container, so implementations may treat an out-of-range index
//! as a logic error.
//!
//! [`SlotArray`] is an in-memory implementation for hosts that keep container
//! state in-process, and for tests.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt::Debug;

use crate::types::ContainerId;

/// Fixed-capacity, index-addressed item storage with a viewer list.
pub trait SlotContainer {
    /// Item stored in a slot.
    type Item: Clone + Debug;
    /// Identity of a viewer.
    type Viewer: Copy + Eq + Debug;

    /// Identifier of this container; stable for its whole lifetime.
    fn id(&self) -> ContainerId;

    /// Number of slots.
    fn size(&self) -> usize;

    /// Returns the item in `slot`, or `None` if the slot is empty.
    fn get(&self, slot: usize) -> Option<Self::Item>;

    /// Replace the content of `slot`; `None` empties it.
    fn set(&mut self, slot: usize, item: Option<Self::Item>);

    /// Empty every slot.
    fn clear(&mut self);

    /// Viewers currently looking at this container.
    fn viewers(&self) -> Vec<Self::Viewer>;

    /// Called by the dispatcher once `viewer` has opened this container.
    ///
    /// Hosts that track viewers natively can leave this as a no-op.
    fn viewer_opened(&mut self, _viewer: Self::Viewer) {}

    /// Called by the dispatcher once `viewer` has closed this container.
    fn viewer_closed(&mut self, _viewer: Self::Viewer) {}
}

/// In-memory [`SlotContainer`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlotArray<I, V> {
    id: ContainerId,
    slots: Vec<Option<I>>,
    viewers: Vec<V>,
}

impl<I: Clone, V: Copy + Eq> SlotArray<I, V> {
    /// Create an empty container with `size` slots.
    pub fn new(id: ContainerId, size: usize) -> Self {
        Self {
            id,
            slots: vec![None; size],
            viewers: Vec::new(),
        }
    }

    /// Number of occupied slots.
    pub fn occupied(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }
}

impl<I: Clone + Debug, V: Copy + Eq + Debug> SlotContainer for SlotArray<I, V> {
    type Item = I;
    type Viewer = V;

    fn id(&self) -> ContainerId {
        self.id
    }

    fn size(&self) -> usize {
        self.slots.len()
    }

    fn get(&self, slot: usize) -> Option<I> {
        self.slots.get(slot).cloned().flatten()
    }

    fn set(&mut self, slot: usize, item: Option<I>) {
        if let Some(s) = self.slots.get_mut(slot) {
            *s = item;
        }
    }

    fn clear(&mut self) {
        self.slots.iter_mut().for_each(|s| *s = None);
    }

    fn viewers(&self) -> Vec<V> {
        self.viewers.clone()
    }

    fn viewer_opened(&mut self, viewer: V) {
        if !self.viewers.contains(&viewer) {
            self.viewers.push(viewer);
        }
    }

    fn viewer_closed(&mut self, viewer: V) {
        self.viewers.retain(|v| *v != viewer);
    }
}
