// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Menu chaining.
//!
//! This example uses a host that reports opens and closes synchronously, the
//! way game servers do, and walks a viewer through a main menu, a confirmation
//! dialog that sends them back on close, and a hand-off to a second dispatcher.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p understory_demos --example menu_chaining`

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use understory_menu::container::SlotArray;
use understory_menu::dispatcher::MenuDispatcher;
use understory_menu::event::{CloseEvent, DisableEvent, OpenEvent};
use understory_menu::menu::{Menu, MenuHandler, MenuRef};
use understory_menu::session::Session;
use understory_menu::types::ContainerId;

type Chest = SlotArray<&'static str, u32>;

/// Host that delivers open and close events from inside the requests.
#[derive(Default)]
struct SyncHost {
    tops: RefCell<BTreeMap<u32, ContainerId>>,
    dispatchers: RefCell<Vec<MenuDispatcher<Chest>>>,
}

impl SyncHost {
    fn dispatchers(&self) -> Vec<MenuDispatcher<Chest>> {
        self.dispatchers.borrow().clone()
    }
}

impl Session<u32> for SyncHost {
    fn is_connected(&self, _viewer: u32) -> bool {
        true
    }

    fn top_container(&self, viewer: u32) -> Option<ContainerId> {
        self.tops.borrow().get(&viewer).copied()
    }

    fn request_open(&self, viewer: u32, container: ContainerId) {
        println!("  host: viewer {viewer} now sees {container}");
        self.tops.borrow_mut().insert(viewer, container);
        for d in self.dispatchers() {
            d.handle_open(&mut OpenEvent::new(viewer, container));
        }
    }

    fn request_close(&self, viewer: u32) {
        let closed = self.tops.borrow_mut().remove(&viewer);
        let Some(closed) = closed else {
            return;
        };
        println!("  host: viewer {viewer} closed {closed}");
        for d in self.dispatchers() {
            d.handle_close(&CloseEvent::new(viewer, closed));
        }
    }
}

/// Sends the viewer back to `back` whenever the dialog closes.
struct Dialog {
    back: MenuRef<Chest>,
}

impl MenuHandler<Chest> for Dialog {
    fn on_close(&self, menu: &MenuRef<Chest>, event: &CloseEvent<u32>) {
        println!("  dialog: viewer {} returns to the main menu", event.viewer);
        menu.set_next(Some(self.back.clone()));
    }

    fn on_disable(&self, _menu: &MenuRef<Chest>, event: &DisableEvent) {
        println!("  dialog: module {} is going away", event.module);
    }
}

fn main() {
    env_logger::init();

    let host = Rc::new(SyncHost::default());
    let lobby = MenuDispatcher::new(host.clone());
    let arena = MenuDispatcher::new(host.clone());
    host.dispatchers.borrow_mut().extend([lobby.clone(), arena.clone()]);
    lobby.attach();
    arena.attach();

    let main_menu = Menu::new(Chest::new(ContainerId::new(1), 27), &lobby);
    let dialog = Menu::with_handler(
        Chest::new(ContainerId::new(2), 9),
        &lobby,
        Dialog {
            back: main_menu.clone(),
        },
    );

    println!("== Main menu ==");
    main_menu.open_for(1).expect("lobby is attached");

    println!("== Dialog over the main menu ==");
    dialog.open_for(1).expect("lobby is attached");
    println!("  main menu viewers: {:?}", main_menu.viewers());
    println!("  dialog viewers: {:?}", dialog.viewers());

    println!("== Closing the dialog ==");
    dialog.close();
    println!("  main menu viewers: {:?}", main_menu.viewers());

    println!("== Hand-off to the arena dispatcher ==");
    let previous = main_menu
        .switch_dispatcher(&arena)
        .expect("container is free in the arena");
    println!(
        "  handed off from the lobby: {}",
        previous.is_some_and(|d| d.ptr_eq(&lobby))
    );
    println!(
        "  lobby knows main menu: {}, arena knows main menu: {}",
        lobby.find_menu_for(main_menu.id()).is_some(),
        arena.find_menu_for(main_menu.id()).is_some()
    );

    println!("== Lobby shutdown ==");
    lobby.handle_disable(&DisableEvent::new("lobby"));
    println!(
        "  lobby menus: {}, arena menus: {}, viewer 1 sees {:?}",
        lobby.len(),
        arena.len(),
        host.top_container(1)
    );
}
