// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_menu --heading-base-level=0

//! Understory Menu: lifecycle and event routing for shared slot menus.
//!
//! ## Overview
//!
//! A menu is an interactive surface over a fixed array of item slots (a chest,
//! a shop, a settings screen) that any number of viewers can look at at once.
//! This crate is the core those menus run on:
//!
//! - [`Menu`](crate::menu::Menu) binds one [`SlotContainer`](crate::container::SlotContainer)
//!   to a dispatcher and exposes checked slot access.
//! - [`MenuHandler`](crate::menu::MenuHandler) is the set of overridable event hooks.
//!   Its defaults make menus non-extractive; see [`policy`](crate::policy).
//! - [`MenuDispatcher`](crate::dispatcher::MenuDispatcher) is the registry mapping
//!   containers to menus and the entry point for host events.
//! - [`Session`](crate::session::Session) is what the core asks of the host:
//!   which container a viewer has open, and requests to open or close one.
//!
//! It does not render anything and does not subscribe to any event bus; the host
//! translates its native events into [`event`](crate::event) values and calls the
//! dispatcher.
//!
//! ## Chaining
//!
//! A viewer never sees two menus at once. Opening a menu for a viewer who
//! already has one open queues the new menu as the old menu's *next* menu and
//! asks the host to close the old one. When the host reports the close, the
//! dispatcher takes the next menu (once) and opens it for that viewer.
//! Close hooks use the same mechanism to send a viewer on to another menu.
//!
//! ## Threading
//!
//! Everything is synchronous and single-threaded: menus and dispatchers are
//! `Rc` handles, and the host is expected to deliver events for a dispatcher
//! one at a time. Hooks may re-enter the dispatcher, for example when the host
//! delivers a close event from inside [`Session::request_close`](crate::session::Session::request_close).
//!
//! ## Example
//!
//! ```
//! use std::cell::RefCell;
//! use std::collections::BTreeMap;
//! use std::rc::Rc;
//!
//! use understory_menu::container::SlotArray;
//! use understory_menu::dispatcher::MenuDispatcher;
//! use understory_menu::event::{Cancellable, ClickEvent, CloseEvent};
//! use understory_menu::menu::Menu;
//! use understory_menu::session::Session;
//! use understory_menu::types::{ClickAction, ContainerId};
//!
//! // A host that remembers what each viewer looks at.
//! #[derive(Default)]
//! struct Host(RefCell<BTreeMap<u32, ContainerId>>);
//!
//! impl Session<u32> for Host {
//!     fn is_connected(&self, _viewer: u32) -> bool { true }
//!     fn top_container(&self, viewer: u32) -> Option<ContainerId> {
//!         self.0.borrow().get(&viewer).copied()
//!     }
//!     fn request_open(&self, viewer: u32, container: ContainerId) {
//!         self.0.borrow_mut().insert(viewer, container);
//!     }
//!     fn request_close(&self, viewer: u32) {
//!         self.0.borrow_mut().remove(&viewer);
//!     }
//! }
//!
//! let host = Rc::new(Host::default());
//! let dispatcher = MenuDispatcher::new(host.clone());
//! dispatcher.attach();
//!
//! let shop = Menu::new(SlotArray::<&str, u32>::new(ContainerId::new(1), 27), &dispatcher);
//! shop.set(Some("apple"), &[10, 11]).unwrap();
//! shop.open_for(7).unwrap();
//! assert_eq!(host.top_container(7), Some(shop.id()));
//!
//! // Clicking inside the shop never moves items by default.
//! let mut click = ClickEvent::new(7, ClickAction::PickupAll, shop.id(), Some(shop.id()), Some(10));
//! dispatcher.handle_click(&mut click);
//! assert!(click.is_cancelled());
//!
//! // Opening another menu over the shop queues it behind the shop.
//! let bank = Menu::new(SlotArray::new(ContainerId::new(2), 54), &dispatcher);
//! bank.open_for(7).unwrap();
//! assert!(Rc::ptr_eq(&shop.next().unwrap(), &bank));
//!
//! // The host reports the close; the dispatcher opens the bank.
//! dispatcher.handle_close(&CloseEvent::new(7, shop.id()));
//! assert_eq!(host.top_container(7), Some(bank.id()));
//! assert!(shop.next().is_none());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod container;
pub mod dispatcher;
pub mod error;
pub mod event;
pub mod menu;
pub mod policy;
pub mod session;
pub mod types;

#[cfg(test)]
mod testing;

pub use error::{ErrorKind, MenuError};
