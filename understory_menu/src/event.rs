// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interaction events delivered to menus.
//!
//! ## Overview
//!
//! The host translates its native events into these descriptions and hands them
//! to a [`MenuDispatcher`](crate::dispatcher::MenuDispatcher).
//! Menus react by mutating slots, by setting the cancellation flag, or by
//! queuing a next menu.
//!
//! ## Cancellation
//!
//! Cancelling is a flag on the event, read by the host after dispatch returns to
//! decide whether to discard the native effect (for example an item move).
//! Setting it repeatedly is harmless. See [`Cancellable`].

use alloc::string::String;
use alloc::vec::Vec;

use crate::types::{ClickAction, ContainerId};

/// Events whose native effect the host discards when cancelled.
pub trait Cancellable {
    /// Returns whether the event is currently cancelled.
    fn is_cancelled(&self) -> bool;

    /// Set or clear the cancellation flag.
    fn set_cancelled(&mut self, cancelled: bool);

    /// Cancel the event.
    fn cancel(&mut self) {
        self.set_cancelled(true);
    }
}

/// A viewer is about to see a container.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpenEvent<V> {
    /// Viewer opening the container.
    pub viewer: V,
    /// Container being opened.
    pub container: ContainerId,
    cancelled: bool,
}

impl<V> OpenEvent<V> {
    /// Create an uncancelled open event.
    pub fn new(viewer: V, container: ContainerId) -> Self {
        Self {
            viewer,
            container,
            cancelled: false,
        }
    }
}

/// A viewer stopped seeing a container.
///
/// Close events can't be cancelled; a menu that wants to stay visible queues
/// itself with [`Menu::set_next`](crate::menu::Menu::set_next) instead.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CloseEvent<V> {
    /// Viewer that closed the container.
    pub viewer: V,
    /// Container that was closed.
    pub container: ContainerId,
}

impl<V> CloseEvent<V> {
    /// Create a close event.
    pub fn new(viewer: V, container: ContainerId) -> Self {
        Self { viewer, container }
    }
}

/// A viewer clicked somewhere in a view.
///
/// A view shows two containers: the `top` one (the menu) and the viewer's own
/// container below it. `clicked` tells which of them received the click, or
/// `None` for clicks outside both.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClickEvent<V> {
    /// Viewer that clicked.
    pub viewer: V,
    /// What the click would do.
    pub action: ClickAction,
    /// Top container of the view.
    pub top: ContainerId,
    /// Container that received the click, if any.
    pub clicked: Option<ContainerId>,
    /// Slot index within `clicked`, if any.
    pub slot: Option<usize>,
    cancelled: bool,
}

impl<V> ClickEvent<V> {
    /// Create an uncancelled click event.
    pub fn new(
        viewer: V,
        action: ClickAction,
        top: ContainerId,
        clicked: Option<ContainerId>,
        slot: Option<usize>,
    ) -> Self {
        Self {
            viewer,
            action,
            top,
            clicked,
            slot,
            cancelled: false,
        }
    }
}

/// A viewer dragged a stack across several slots of a view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DragEvent<V> {
    /// Viewer that dragged.
    pub viewer: V,
    /// Top container of the view.
    pub top: ContainerId,
    /// Raw view slots touched by the drag.
    ///
    /// Raw slots number the top container first (`0..top_size`) and continue
    /// into the viewer's own container.
    pub raw_slots: Vec<usize>,
    cancelled: bool,
}

impl<V> DragEvent<V> {
    /// Create an uncancelled drag event.
    pub fn new(viewer: V, top: ContainerId, raw_slots: Vec<usize>) -> Self {
        Self {
            viewer,
            top,
            raw_slots,
            cancelled: false,
        }
    }
}

/// Something other than a viewer moves an item between two containers.
///
/// Typical sources are automated transport such as hoppers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemMoveEvent<I> {
    /// Container the item leaves.
    pub source: ContainerId,
    /// Container the item enters.
    pub destination: ContainerId,
    /// Item being moved.
    pub item: I,
    cancelled: bool,
}

impl<I> ItemMoveEvent<I> {
    /// Create an uncancelled item move event.
    pub fn new(source: ContainerId, destination: ContainerId, item: I) -> Self {
        Self {
            source,
            destination,
            item,
            cancelled: false,
        }
    }
}

/// The module owning a dispatcher is shutting down.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DisableEvent {
    /// Name of the module being disabled.
    pub module: String,
}

impl DisableEvent {
    /// Create a disable event for the named module.
    pub fn new(module: impl Into<String>) -> Self {
        Self {
            module: module.into(),
        }
    }
}

impl<V> Cancellable for OpenEvent<V> {
    fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    fn set_cancelled(&mut self, cancelled: bool) {
        self.cancelled = cancelled;
    }
}

impl<V> Cancellable for ClickEvent<V> {
    fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    fn set_cancelled(&mut self, cancelled: bool) {
        self.cancelled = cancelled;
    }
}

impl<V> Cancellable for DragEvent<V> {
    fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    fn set_cancelled(&mut self, cancelled: bool) {
        self.cancelled = cancelled;
    }
}

impl<I> Cancellable for ItemMoveEvent<I> {
    fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    fn set_cancelled(&mut self, cancelled: bool) {
        self.cancelled = cancelled;
    }
}
