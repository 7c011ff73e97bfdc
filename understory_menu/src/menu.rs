// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Menus: a slot container bound to a dispatcher, with overridable event hooks.
//!
//! ## Overview
//!
//! A [`Menu`] owns exactly one [`SlotContainer`] and is identified by it.
//! It reacts to interaction events through a [`MenuHandler`], whose default
//! hook bodies make the menu non-extractive (see [`policy`](crate::policy)).
//! Menus are shared as [`MenuRef`]s so dispatchers, handlers and other menus
//! can point at them.
//!
//! ## Lifecycle
//!
//! - A menu starts unregistered. [`Menu::open`] registers it with its
//!   dispatcher; it then stays registered across any number of opens and
//!   closes until [`Menu::unregister`] or a hand-off with
//!   [`Menu::switch_dispatcher`].
//! - [`Menu::close`] asks the host to close the menu for every current viewer.
//!   It does not unregister the menu.
//! - A menu does not keep its dispatcher alive. Once unregistered and no
//!   longer referenced (by the host, a handler or another menu's next menu)
//!   it is dropped; unregistering clears its own next menu for that reason.
//!
//! ## Chaining
//!
//! A viewer never has two menus open at once. When [`Menu::open`] finds a
//! viewer already looking at another registered menu, it queues itself as that
//! menu's [next](Menu::set_next) menu and asks the host to close it; the
//! dispatcher reopens the queued menu once the close completes.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};

use crate::container::SlotContainer;
use crate::dispatcher::{MenuDispatcher, WeakDispatcher};
use crate::error::{MenuError, check_slot};
use crate::event::{ClickEvent, CloseEvent, DisableEvent, DragEvent, ItemMoveEvent, OpenEvent};
use crate::policy;
use crate::types::{ContainerId, MenuPolicy};

/// Shared handle to a [`Menu`].
pub type MenuRef<C> = Rc<Menu<C>>;

/// Event hooks of a menu.
///
/// Every method has a default body, so an implementation only overrides the
/// hooks it customizes. Hooks receive the menu they belong to; they can mutate
/// its slots, cancel the event, or queue a next menu.
///
/// Hooks take `&self` because the host may deliver events re-entrantly (for
/// example a close event from inside a click hook that closed the menu).
/// Handlers with state use interior mutability.
pub trait MenuHandler<C: SlotContainer> {
    /// A viewer is opening the menu. Does nothing by default.
    fn on_open(&self, _menu: &MenuRef<C>, _event: &mut OpenEvent<C::Viewer>) {}

    /// A viewer closed the menu. Does nothing by default.
    ///
    /// This is the conventional place to call [`Menu::set_next`]; the
    /// dispatcher consumes the next menu right after this hook returns.
    fn on_close(&self, _menu: &MenuRef<C>, _event: &CloseEvent<C::Viewer>) {}

    /// A viewer clicked in a view whose top container is this menu.
    ///
    /// `external` is `true` when the click did not land in the menu's own
    /// container. Defaults to [`policy::click`].
    fn on_click(&self, menu: &MenuRef<C>, event: &mut ClickEvent<C::Viewer>, external: bool) {
        policy::click(menu.policy(), event, external);
    }

    /// A viewer dragged across a view whose top container is this menu.
    ///
    /// Defaults to [`policy::drag`].
    fn on_drag(&self, menu: &MenuRef<C>, event: &mut DragEvent<C::Viewer>) {
        policy::drag(menu.policy(), menu.size(), event);
    }

    /// An item is being moved into or out of the menu's container by something
    /// other than a viewer.
    ///
    /// `is_destination` is `true` when the menu's container receives the item.
    /// Defaults to [`policy::item_move`].
    fn on_item_move(
        &self,
        menu: &MenuRef<C>,
        event: &mut ItemMoveEvent<C::Item>,
        is_destination: bool,
    ) {
        policy::item_move(menu.policy(), event, is_destination);
    }

    /// The module owning the dispatcher is shutting down. Does nothing by default.
    fn on_disable(&self, _menu: &MenuRef<C>, _event: &DisableEvent) {}
}

/// Handler that keeps every default hook.
#[derive(Copy, Clone, Debug, Default)]
pub struct DefaultHandler;

impl<C: SlotContainer> MenuHandler<C> for DefaultHandler {}

/// A slot container bound to a dispatcher.
pub struct Menu<C: SlotContainer> {
    id: ContainerId,
    container: RefCell<C>,
    dispatcher: RefCell<WeakDispatcher<C>>,
    next: RefCell<Option<MenuRef<C>>>,
    policy: Cell<MenuPolicy>,
    handler: Box<dyn MenuHandler<C>>,
}

impl<C: SlotContainer> core::fmt::Debug for Menu<C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Menu")
            .field("id", &self.id)
            .field("size", &self.size())
            .field("policy", &self.policy.get())
            .field("has_next", &self.next.borrow().is_some())
            .finish_non_exhaustive()
    }
}

impl<C: SlotContainer> Menu<C> {
    /// Create a menu with the [`DefaultHandler`].
    ///
    /// The menu is not registered until it is first opened, and it only holds
    /// a weak reference to `dispatcher`.
    pub fn new(container: C, dispatcher: &MenuDispatcher<C>) -> MenuRef<C> {
        Self::with_handler(container, dispatcher, DefaultHandler)
    }

    /// Create a menu with a custom handler.
    pub fn with_handler<H>(container: C, dispatcher: &MenuDispatcher<C>, handler: H) -> MenuRef<C>
    where
        H: MenuHandler<C> + 'static,
    {
        Rc::new(Self {
            id: container.id(),
            container: RefCell::new(container),
            dispatcher: RefCell::new(dispatcher.downgrade()),
            next: RefCell::new(None),
            policy: Cell::new(MenuPolicy::default()),
            handler: Box::new(handler),
        })
    }

    /// Identifier of the wrapped container, which also identifies the menu.
    pub fn id(&self) -> ContainerId {
        self.id
    }

    /// Number of slots.
    pub fn size(&self) -> usize {
        self.container.borrow().size()
    }

    /// Put `item` into every slot in `slots`; `None` empties them.
    ///
    /// All slots are checked before anything is written, so an out-of-bounds
    /// slot leaves the container untouched.
    pub fn set(&self, item: Option<C::Item>, slots: &[usize]) -> Result<&Self, MenuError> {
        let mut container = self.container.borrow_mut();
        let size = container.size();
        for &slot in slots {
            check_slot(slot, size)?;
        }
        for &slot in slots {
            container.set(slot, item.clone());
        }
        Ok(self)
    }

    /// Returns the item in `slot`, or `None` if the slot is empty.
    pub fn item(&self, slot: usize) -> Result<Option<C::Item>, MenuError> {
        let container = self.container.borrow();
        check_slot(slot, container.size())?;
        Ok(container.get(slot))
    }

    /// Empty every slot.
    pub fn clear(&self) -> &Self {
        self.container.borrow_mut().clear();
        self
    }

    /// Viewers currently looking at the menu.
    pub fn viewers(&self) -> Vec<C::Viewer> {
        self.container.borrow().viewers()
    }

    /// Run `f` with read access to the wrapped container.
    ///
    /// # Panics
    ///
    /// Panics if `f` mutates this same menu (for example through
    /// [`Menu::set`] or [`Menu::clear`]), since the container is borrowed
    /// for the duration of the call.
    pub fn with_container<R>(&self, f: impl FnOnce(&C) -> R) -> R {
        f(&*self.container.borrow())
    }

    pub(crate) fn with_container_mut<R>(&self, f: impl FnOnce(&mut C) -> R) -> R {
        f(&mut *self.container.borrow_mut())
    }

    /// Policy used by the default hook bodies.
    pub fn policy(&self) -> MenuPolicy {
        self.policy.get()
    }

    /// Replace the policy used by the default hook bodies.
    pub fn set_policy(&self, policy: MenuPolicy) -> &Self {
        self.policy.set(policy);
        self
    }

    /// Menu queued to open after this one closes, if any.
    pub fn next(&self) -> Option<MenuRef<C>> {
        self.next.borrow().clone()
    }

    /// Queue `next` to be opened for a viewer right after this menu closes for
    /// them, or clear the queue with `None`.
    pub fn set_next(&self, next: Option<MenuRef<C>>) -> &Self {
        *self.next.borrow_mut() = next;
        self
    }

    /// Take the queued next menu, leaving the queue empty.
    pub fn take_next(&self) -> Option<MenuRef<C>> {
        self.next.take()
    }

    /// Dispatcher this menu (un)registers with, or `None` once every handle to
    /// it has been dropped.
    pub fn dispatcher(&self) -> Option<MenuDispatcher<C>> {
        self.dispatcher.borrow().upgrade()
    }

    /// Handler receiving this menu's events.
    pub fn handler(&self) -> &dyn MenuHandler<C> {
        &*self.handler
    }

    /// Returns whether the menu is registered with its dispatcher.
    pub fn is_registered(&self) -> bool {
        self.dispatcher().is_some_and(|d| d.contains(self))
    }

    /// Remove the menu from its dispatcher's registry and drop its queued
    /// next menu.
    ///
    /// Returns `false` if it wasn't registered.
    pub fn unregister(&self) -> bool {
        self.dispatcher().is_some_and(|d| d.unregister(self))
    }

    /// Open the menu for each of `viewers`.
    ///
    /// The call is rejected before any state changes if `viewers` is empty, if a
    /// viewer is disconnected, if the dispatcher is gone or isn't attached, or
    /// if another menu claims this container. Otherwise the menu is registered, and each
    /// viewer is handled on its own:
    ///
    /// - A viewer already looking at a registered menu gets this menu queued as
    ///   that menu's next menu, and a close request; the dispatcher opens this
    ///   menu once the close completes.
    /// - Any other viewer gets an open request right away.
    pub fn open(self: &Rc<Self>, viewers: &[C::Viewer]) -> Result<&Rc<Self>, MenuError> {
        if viewers.is_empty() {
            return Err(MenuError::NoViewers);
        }
        let Some(dispatcher) = self.dispatcher() else {
            return Err(MenuError::DispatcherNotReady);
        };
        let session = dispatcher.session();
        if let Some(index) = viewers.iter().position(|v| !session.is_connected(*v)) {
            return Err(MenuError::ViewerDisconnected { index });
        }
        if !dispatcher.is_ready() {
            return Err(MenuError::DispatcherNotReady);
        }
        dispatcher.register(self)?;

        for &viewer in viewers {
            let current = session
                .top_container(viewer)
                .and_then(|top| dispatcher.find_menu_for(top));
            match current {
                Some(current) => {
                    log::trace!(
                        "{} queued behind {} for viewer {:?}",
                        self.id,
                        current.id(),
                        viewer
                    );
                    current.set_next(Some(Rc::clone(self)));
                    session.request_close(viewer);
                }
                None => session.request_open(viewer, self.id),
            }
        }
        Ok(self)
    }

    /// Open the menu for a single viewer. See [`Menu::open`].
    pub fn open_for(self: &Rc<Self>, viewer: C::Viewer) -> Result<&Rc<Self>, MenuError> {
        self.open(core::slice::from_ref(&viewer))
    }

    /// Ask the host to close the menu for every current viewer.
    ///
    /// A viewer may see another menu right away if this menu has a next menu
    /// queued or its close hook queues one.
    pub fn close(&self) -> &Self {
        let Some(dispatcher) = self.dispatcher() else {
            return self;
        };
        let session = dispatcher.session();
        for viewer in self.viewers() {
            session.request_close(viewer);
        }
        self
    }

    /// Move the menu's registration to `dispatcher`, returning the previous one
    /// if it is still alive.
    ///
    /// The menu is registered with `dispatcher` before it leaves the previous
    /// registry, so it is never absent from both. If `dispatcher` refuses the
    /// menu (its container is claimed there), nothing changes. Viewers keep
    /// whatever they have open, and a queued next menu stays queued.
    pub fn switch_dispatcher(
        self: &Rc<Self>,
        dispatcher: &MenuDispatcher<C>,
    ) -> Result<Option<MenuDispatcher<C>>, MenuError> {
        let previous = self.dispatcher();
        dispatcher.insert(self)?;
        if !previous.as_ref().is_some_and(|p| p.ptr_eq(dispatcher)) {
            if let Some(previous) = &previous {
                previous.remove(self);
            }
            *self.dispatcher.borrow_mut() = dispatcher.downgrade();
            log::debug!("{} handed off to another dispatcher", self.id);
        }
        Ok(previous)
    }

    /// Show the menu to `viewer` whose previous menu just closed.
    pub(crate) fn open_after_close(self: &Rc<Self>, viewer: C::Viewer) -> Result<(), MenuError> {
        let Some(dispatcher) = self.dispatcher() else {
            return Err(MenuError::DispatcherNotReady);
        };
        let session = dispatcher.session();
        if !session.is_connected(viewer) {
            return Err(MenuError::ViewerDisconnected { index: 0 });
        }
        if !dispatcher.is_ready() {
            return Err(MenuError::DispatcherNotReady);
        }
        dispatcher.register(self)?;
        session.request_open(viewer, self.id);
        Ok(())
    }
}
