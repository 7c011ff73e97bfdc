// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dispatcher: the menu registry and the entry point for host events.
//!
//! ## Overview
//!
//! A [`MenuDispatcher`] maps container identifiers to the [`Menu`] owning them
//! and translates host events into hook calls on that menu. It is an explicit
//! object owned by the host module; dispatchers are cheap handles, and clones
//! share the same registry.
//!
//! ## Lifecycle
//!
//! - A new dispatcher is detached. [`attach`](MenuDispatcher::attach) it once
//!   the host delivers events to it; menus refuse to open through a detached
//!   dispatcher because they would never see their close or click events.
//! - [`handle_disable`](MenuDispatcher::handle_disable) tears everything down:
//!   menus get their disable hook, viewers are closed out, the registry is
//!   emptied and the dispatcher detached.
//!
//! ## Routing
//!
//! | Host event       | Routed to                        | Extra context                          |
//! |------------------|----------------------------------|----------------------------------------|
//! | open             | menu owning the opened container |                                        |
//! | close            | menu owning the closed container | then opens the queued next menu        |
//! | click            | menu owning the view's top       | `external` if the click missed it      |
//! | drag             | menu owning the view's top       |                                        |
//! | item move        | source menu, then destination    | `is_destination`                       |
//! | disable          | every registered menu            |                                        |
//!
//! Events whose container has no menu are ignored. No registry borrow is held
//! while a hook runs, so hooks may open, close and (un)register menus.

use alloc::collections::BTreeMap;
use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};

use crate::container::SlotContainer;
use crate::error::MenuError;
use crate::event::{
    Cancellable, ClickEvent, CloseEvent, DisableEvent, DragEvent, ItemMoveEvent, OpenEvent,
};
use crate::menu::{Menu, MenuRef};
use crate::session::Session;
use crate::types::ContainerId;

struct Registry<C: SlotContainer> {
    session: Rc<dyn Session<C::Viewer>>,
    ready: Cell<bool>,
    menus: RefCell<BTreeMap<ContainerId, MenuRef<C>>>,
}

/// Registry of menus and router of host events.
///
/// The registry lives as long as any handle to it. Menus only refer back to
/// it weakly, so dropping the last handle frees the registry along with every
/// menu nobody else holds.
pub struct MenuDispatcher<C: SlotContainer> {
    inner: Rc<Registry<C>>,
}

/// Non-owning reference to a dispatcher's registry, held by menus.
pub(crate) struct WeakDispatcher<C: SlotContainer> {
    inner: Weak<Registry<C>>,
}

impl<C: SlotContainer> WeakDispatcher<C> {
    /// The dispatcher, if any handle to it is still alive.
    pub(crate) fn upgrade(&self) -> Option<MenuDispatcher<C>> {
        self.inner.upgrade().map(|inner| MenuDispatcher { inner })
    }
}

impl<C: SlotContainer> Clone for MenuDispatcher<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<C: SlotContainer> core::fmt::Debug for MenuDispatcher<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MenuDispatcher")
            .field("ready", &self.inner.ready.get())
            .field("menus", &self.len())
            .finish_non_exhaustive()
    }
}

impl<C: SlotContainer> MenuDispatcher<C> {
    /// Create a detached dispatcher backed by `session`.
    pub fn new<S>(session: Rc<S>) -> Self
    where
        S: Session<C::Viewer> + 'static,
    {
        Self {
            inner: Rc::new(Registry {
                session,
                ready: Cell::new(false),
                menus: RefCell::new(BTreeMap::new()),
            }),
        }
    }

    /// Host session this dispatcher sends open and close requests to.
    pub fn session(&self) -> Rc<dyn Session<C::Viewer>> {
        Rc::clone(&self.inner.session)
    }

    /// Mark the dispatcher as receiving host events.
    pub fn attach(&self) {
        self.inner.ready.set(true);
        log::debug!("dispatcher attached");
    }

    /// Mark the dispatcher as no longer receiving host events.
    ///
    /// Registered menus stay registered; they just can't be opened.
    pub fn detach(&self) {
        self.inner.ready.set(false);
        log::debug!("dispatcher detached");
    }

    /// Returns whether the dispatcher receives host events.
    pub fn is_ready(&self) -> bool {
        self.inner.ready.get()
    }

    /// Returns whether both handles share the same registry.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub(crate) fn downgrade(&self) -> WeakDispatcher<C> {
        WeakDispatcher {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Register `menu`.
    ///
    /// Returns `Ok(true)` if it was newly registered and `Ok(false)` if it
    /// already was. A menu bound to another dispatcher is handed off here with
    /// [`Menu::switch_dispatcher`], so it is never registered twice.
    ///
    /// Fails with [`MenuError::ContainerClaimed`] when a different menu already
    /// owns the container.
    pub fn register(&self, menu: &MenuRef<C>) -> Result<bool, MenuError> {
        match menu.dispatcher() {
            Some(own) if own.ptr_eq(self) => self.insert(menu),
            _ => menu.switch_dispatcher(self).map(|_| true),
        }
    }

    pub(crate) fn insert(&self, menu: &MenuRef<C>) -> Result<bool, MenuError> {
        let id = menu.id();
        let mut menus = self.inner.menus.borrow_mut();
        if let Some(owner) = menus.get(&id) {
            if Rc::ptr_eq(owner, menu) {
                return Ok(false);
            }
            log::warn!("{id} is already claimed by another menu");
            return Err(MenuError::ContainerClaimed { container: id });
        }
        menus.insert(id, Rc::clone(menu));
        log::debug!("{id} registered");
        Ok(true)
    }

    /// Remove `menu` from the registry and drop its queued next menu.
    ///
    /// Returns `false` if it wasn't registered here. Another menu claiming the
    /// same container is left alone.
    pub fn unregister(&self, menu: &Menu<C>) -> bool {
        let removed = self.remove(menu);
        if removed {
            menu.set_next(None);
        }
        removed
    }

    /// Remove `menu` from the registry, keeping its next menu.
    pub(crate) fn remove(&self, menu: &Menu<C>) -> bool {
        let removed = {
            let mut menus = self.inner.menus.borrow_mut();
            let owned = menus
                .get(&menu.id())
                .is_some_and(|owner| core::ptr::eq(Rc::as_ptr(owner), menu));
            if owned { menus.remove(&menu.id()) } else { None }
        };
        let Some(removed) = removed else {
            return false;
        };
        log::debug!("{} unregistered", removed.id());
        true
    }

    /// Returns whether `menu` is registered here.
    pub fn contains(&self, menu: &Menu<C>) -> bool {
        self.inner
            .menus
            .borrow()
            .get(&menu.id())
            .is_some_and(|owner| core::ptr::eq(Rc::as_ptr(owner), menu))
    }

    /// Menu owning `container`, if any.
    pub fn find_menu_for(&self, container: ContainerId) -> Option<MenuRef<C>> {
        self.inner.menus.borrow().get(&container).cloned()
    }

    /// Snapshot of every registered menu, ordered by container identifier.
    pub fn menus(&self) -> Vec<MenuRef<C>> {
        self.inner.menus.borrow().values().cloned().collect()
    }

    /// Number of registered menus.
    pub fn len(&self) -> usize {
        self.inner.menus.borrow().len()
    }

    /// Returns whether no menu is registered.
    pub fn is_empty(&self) -> bool {
        self.inner.menus.borrow().is_empty()
    }

    /// Deliver an open event.
    ///
    /// Unless the hook cancels it, the container learns about its new viewer.
    pub fn handle_open(&self, event: &mut OpenEvent<C::Viewer>) {
        let Some(menu) = self.find_menu_for(event.container) else {
            return;
        };
        log::trace!("open {} for {:?}", menu.id(), event.viewer);
        menu.handler().on_open(&menu, event);
        if !event.is_cancelled() {
            menu.with_container_mut(|c| c.viewer_opened(event.viewer));
        }
    }

    /// Deliver a close event, then open the closed menu's next menu, if any,
    /// for the same viewer.
    ///
    /// The next menu is taken out of the closed menu exactly once, so it never
    /// carries over to a later, unrelated close.
    pub fn handle_close(&self, event: &CloseEvent<C::Viewer>) {
        let Some(menu) = self.find_menu_for(event.container) else {
            return;
        };
        log::trace!("close {} for {:?}", menu.id(), event.viewer);
        menu.with_container_mut(|c| c.viewer_closed(event.viewer));
        menu.handler().on_close(&menu, event);

        let Some(next) = menu.take_next() else {
            return;
        };
        match next.open_after_close(event.viewer) {
            Ok(()) => log::trace!("{} follows {} for {:?}", next.id(), menu.id(), event.viewer),
            Err(err @ (MenuError::DispatcherNotReady | MenuError::ViewerDisconnected { .. })) => {
                log::debug!("dropping {} queued after {}: {err}", next.id(), menu.id());
            }
            Err(err) => log::warn!("can't open {} after {}: {err}", next.id(), menu.id()),
        }
    }

    /// Deliver a click event to the menu owning the view's top container.
    pub fn handle_click(&self, event: &mut ClickEvent<C::Viewer>) {
        let Some(menu) = self.find_menu_for(event.top) else {
            return;
        };
        let external = event.clicked != Some(menu.id());
        log::trace!(
            "click {:?} on {} (external: {external})",
            event.action,
            menu.id()
        );
        menu.handler().on_click(&menu, event, external);
    }

    /// Deliver a drag event to the menu owning the view's top container.
    pub fn handle_drag(&self, event: &mut DragEvent<C::Viewer>) {
        let Some(menu) = self.find_menu_for(event.top) else {
            return;
        };
        log::trace!("drag over {} slots of {}", event.raw_slots.len(), menu.id());
        menu.handler().on_drag(&menu, event);
    }

    /// Deliver an item move event to the source menu and then to the
    /// destination menu, whichever of them exist.
    pub fn handle_item_move(&self, event: &mut ItemMoveEvent<C::Item>) {
        if let Some(source) = self.find_menu_for(event.source) {
            log::trace!("item leaving {}", source.id());
            source.handler().on_item_move(&source, event, false);
        }
        if let Some(destination) = self.find_menu_for(event.destination) {
            log::trace!("item entering {}", destination.id());
            destination
                .handler()
                .on_item_move(&destination, event, true);
        }
    }

    /// Tear the dispatcher down for a disabled module.
    ///
    /// Detaches first so that no menu can be (re)opened during teardown, runs
    /// every menu's disable hook, drops queued next menus, closes every viewer
    /// out and finally empties the registry.
    ///
    /// A host that completes closes later than [`Session::request_close`]
    /// delivers them after the registry is empty, so those closes reach no
    /// menu and run no close hook. Viewers still listed by a container once
    /// the close requests are out are removed from it here.
    pub fn handle_disable(&self, event: &DisableEvent) {
        self.detach();
        let menus = self.menus();
        log::debug!(
            "disabling {} menus for module {:?}",
            menus.len(),
            event.module
        );
        for menu in &menus {
            menu.handler().on_disable(menu, event);
        }
        for menu in &menus {
            menu.set_next(None);
            menu.close();
            menu.with_container_mut(|c| {
                for viewer in c.viewers() {
                    c.viewer_closed(viewer);
                }
            });
        }
        self.inner.menus.borrow_mut().clear();
    }
}
