// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Menu basics.
//!
//! This example builds a small shop menu, opens it for two viewers, and feeds
//! it a few clicks, a drag and a hopper transfer to show the default guards
//! and a handler that overrides the click hook.
//!
//! Run:
//! - `RUST_LOG=trace cargo run -p understory_demos --example menu_basics`

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

use understory_menu::container::SlotArray;
use understory_menu::dispatcher::MenuDispatcher;
use understory_menu::event::{Cancellable, ClickEvent, DragEvent, ItemMoveEvent, OpenEvent};
use understory_menu::menu::{Menu, MenuHandler, MenuRef};
use understory_menu::policy;
use understory_menu::session::Session;
use understory_menu::types::{ClickAction, ContainerId};

type Chest = SlotArray<&'static str, u32>;

#[derive(Default)]
struct ConsoleHost {
    tops: RefCell<BTreeMap<u32, ContainerId>>,
}

impl Session<u32> for ConsoleHost {
    fn is_connected(&self, _viewer: u32) -> bool {
        true
    }

    fn top_container(&self, viewer: u32) -> Option<ContainerId> {
        self.tops.borrow().get(&viewer).copied()
    }

    fn request_open(&self, viewer: u32, container: ContainerId) {
        println!("  host: open {container} for viewer {viewer}");
        self.tops.borrow_mut().insert(viewer, container);
    }

    fn request_close(&self, viewer: u32) {
        println!("  host: close view of viewer {viewer}");
        self.tops.borrow_mut().remove(&viewer);
    }
}

/// Sells whatever is in the clicked shop slot; everything else keeps the default guards.
#[derive(Default)]
struct Shop {
    sales: Cell<u32>,
}

impl MenuHandler<Chest> for Shop {
    fn on_click(&self, menu: &MenuRef<Chest>, event: &mut ClickEvent<u32>, external: bool) {
        policy::click(menu.policy(), event, external);
        if external || event.action != ClickAction::PickupAll {
            return;
        }
        if let Some(Ok(Some(item))) = event.slot.map(|s| menu.item(s)) {
            self.sales.set(self.sales.get() + 1);
            println!("  shop: viewer {} bought {item}", event.viewer);
        }
    }
}

fn main() {
    env_logger::init();

    let host = Rc::new(ConsoleHost::default());
    let dispatcher = MenuDispatcher::new(host.clone());
    dispatcher.attach();

    let shop = Menu::with_handler(Chest::new(ContainerId::new(1), 27), &dispatcher, Shop::default());
    shop.set(Some("apple"), &[10, 11, 12])
        .and_then(|m| m.set(Some("bread"), &[14]))
        .expect("slots are in range");

    println!("== Open for viewers 1 and 2 ==");
    shop.open(&[1, 2]).expect("dispatcher is attached");
    for viewer in [1, 2] {
        dispatcher.handle_open(&mut OpenEvent::new(viewer, shop.id()));
    }
    println!("  viewers: {:?}", shop.viewers());

    println!("== Clicks ==");
    let own = ContainerId::new(100);
    let clicks = [
        ("buy apple", ClickAction::PickupAll, Some(shop.id()), Some(10)),
        ("shift-click from own inventory", ClickAction::MoveToOtherInventory, Some(own), Some(3)),
        ("rearrange own inventory", ClickAction::PickupAll, Some(own), Some(3)),
        ("double-click collect", ClickAction::CollectToCursor, Some(own), Some(5)),
    ];
    for (label, action, clicked, slot) in clicks {
        let mut ev = ClickEvent::new(1, action, shop.id(), clicked, slot);
        dispatcher.handle_click(&mut ev);
        println!("  {label}: cancelled={}", ev.is_cancelled());
    }
    println!("  apples left in slot 10: {:?}", shop.item(10));

    println!("== Drags ==");
    for raw_slots in [vec![30, 31, 40], vec![26, 27]] {
        let mut ev = DragEvent::new(2, shop.id(), raw_slots.clone());
        dispatcher.handle_drag(&mut ev);
        println!("  drag over {raw_slots:?}: cancelled={}", ev.is_cancelled());
    }

    println!("== Hopper ==");
    let mut ev = ItemMoveEvent::new(ContainerId::new(200), shop.id(), "dirt");
    dispatcher.handle_item_move(&mut ev);
    println!("  hopper into shop: cancelled={}", ev.is_cancelled());

    println!("== Close ==");
    shop.close();
    println!("  still registered: {}", shop.is_registered());
}
