// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host session actions.
//!
//! ## Overview
//!
//! [`Session`] is what the core asks of the host: which container a viewer is
//! currently looking at, and requests to open or close one. Requests are fire
//! and forget. The host reports their completion later (or synchronously, from
//! inside the request) through
//! [`MenuDispatcher::handle_open`](crate::dispatcher::MenuDispatcher::handle_open) and
//! [`MenuDispatcher::handle_close`](crate::dispatcher::MenuDispatcher::handle_close).

use crate::types::ContainerId;

/// Host capabilities consumed by menus and dispatchers.
pub trait Session<V> {
    /// Returns whether `viewer` is still connected and can be shown anything.
    fn is_connected(&self, viewer: V) -> bool;

    /// Top container of the view `viewer` currently has open, if any.
    fn top_container(&self, viewer: V) -> Option<ContainerId>;

    /// Ask the host to show `container` to `viewer`.
    fn request_open(&self, viewer: V, container: ContainerId);

    /// Ask the host to close whatever `viewer` has open.
    fn request_close(&self, viewer: V);
}
