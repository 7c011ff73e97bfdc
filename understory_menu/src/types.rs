// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types: container identifiers, click actions, and per-menu policy flags.
//!
//! ## Overview
//!
//! These types are shared by the [`menu`](crate::menu), [`dispatcher`](crate::dispatcher)
//! and [`event`](crate::event) modules and by hosts that translate their native events.

/// Identifier of a slot container.
///
/// The host assigns container identifiers; the
/// [dispatcher](crate::dispatcher::MenuDispatcher) uses them as registry keys, so
/// two live containers known to the same dispatcher must never share one.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ContainerId(u64);

impl ContainerId {
    /// Wrap a raw host identifier.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw host identifier.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl core::fmt::Display for ContainerId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "container#{}", self.0)
    }
}

/// What a click would do to the slots if the host were left to apply it.
///
/// Hosts map their native click descriptions onto this set before handing a
/// [`ClickEvent`](crate::event::ClickEvent) to the dispatcher.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ClickAction {
    /// Nothing happens.
    Nothing,
    /// Pick up every item in the clicked slot.
    PickupAll,
    /// Pick up part of the clicked slot.
    PickupSome,
    /// Pick up half of the clicked slot.
    PickupHalf,
    /// Pick up a single item from the clicked slot.
    PickupOne,
    /// Place every item on the cursor into the clicked slot.
    PlaceAll,
    /// Place as many cursor items as fit into the clicked slot.
    PlaceSome,
    /// Place a single cursor item into the clicked slot.
    PlaceOne,
    /// Swap the cursor with the clicked slot.
    SwapWithCursor,
    /// Drop the whole cursor stack.
    DropAllCursor,
    /// Drop one item from the cursor.
    DropOneCursor,
    /// Drop the whole stack of the clicked slot.
    DropAllSlot,
    /// Drop one item from the clicked slot.
    DropOneSlot,
    /// Shift-click: move the clicked stack into the other container of the view.
    MoveToOtherInventory,
    /// Move the clicked stack to a hotbar slot and re-add the displaced stack elsewhere.
    HotbarMoveAndReadd,
    /// Swap the clicked slot with a hotbar slot.
    HotbarSwap,
    /// Clone the clicked stack onto the cursor (creative mode).
    CloneStack,
    /// Double-click: gather matching items from every slot in the view onto the cursor.
    CollectToCursor,
    /// The host could not classify the click.
    Unknown,
}

impl ClickAction {
    /// Returns `true` for actions that move items between the two containers of a
    /// view without going through the clicked slot alone.
    pub const fn crosses_containers(self) -> bool {
        matches!(self, Self::CollectToCursor | Self::MoveToOtherInventory)
    }
}

bitflags::bitflags! {
    /// Per-menu switches for the default hook bodies in [`policy`](crate::policy).
    ///
    /// The default value has every flag set, which makes a menu fully
    /// non-extractive: nothing enters or leaves its slots unless a handler
    /// deliberately allows it.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct MenuPolicy: u8 {
        /// Cancel [`ClickAction::CollectToCursor`] wherever it was clicked.
        const CANCEL_COLLECT_TO_CURSOR       = 0b0000_0001;
        /// Cancel [`ClickAction::MoveToOtherInventory`] wherever it was clicked.
        const CANCEL_MOVE_TO_OTHER_INVENTORY = 0b0000_0010;
        /// Cancel every click inside the menu's own container.
        const LOCK_SLOTS                     = 0b0000_0100;
        /// Cancel drags touching any of the menu's own slots.
        const LOCK_DRAGS                     = 0b0000_1000;
        /// Cancel item transfers whose destination is the menu's container.
        const BLOCK_ITEMS_IN                 = 0b0001_0000;
        /// Cancel item transfers whose source is the menu's container.
        const BLOCK_ITEMS_OUT                = 0b0010_0000;
    }
}

impl Default for MenuPolicy {
    fn default() -> Self {
        Self::all()
    }
}
