// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Default cancellation rules for menu hooks.
//!
//! ## Overview
//!
//! The default bodies of [`MenuHandler`](crate::menu::MenuHandler)'s
//! `on_click`, `on_drag` and `on_item_move` call these functions with the
//! menu's [`MenuPolicy`]. Handlers that override a hook can still call them to
//! keep the default guard and add their own behavior on top.
//!
//! With the default policy:
//!
//! - Collect-to-cursor and shift-click moves are cancelled everywhere in the view.
//! - Any click inside the menu's container is cancelled.
//! - A drag touching at least one of the menu's slots is cancelled.
//! - Item transfers into or out of the menu's container are cancelled.
//!
//! The rules only ever cancel; they never clear a cancellation set by someone else.

use crate::event::{Cancellable, ClickEvent, DragEvent, ItemMoveEvent};
use crate::types::{ClickAction, MenuPolicy};

/// Apply the click rules.
///
/// `external` is `true` when the click did not land in the menu's container
/// (the viewer's own container, or outside the view).
pub fn click<V>(policy: MenuPolicy, event: &mut ClickEvent<V>, external: bool) {
    let guarded = match event.action {
        ClickAction::CollectToCursor => policy.contains(MenuPolicy::CANCEL_COLLECT_TO_CURSOR),
        ClickAction::MoveToOtherInventory => {
            policy.contains(MenuPolicy::CANCEL_MOVE_TO_OTHER_INVENTORY)
        }
        _ => false,
    };
    if guarded || (!external && policy.contains(MenuPolicy::LOCK_SLOTS)) {
        event.cancel();
    }
}

/// Apply the drag rule for a menu with `size` slots.
pub fn drag<V>(policy: MenuPolicy, size: usize, event: &mut DragEvent<V>) {
    if policy.contains(MenuPolicy::LOCK_DRAGS) && event.raw_slots.iter().any(|&s| s < size) {
        event.cancel();
    }
}

/// Apply the item transfer rules.
///
/// `is_destination` is `true` when the menu's container receives the item.
pub fn item_move<I>(policy: MenuPolicy, event: &mut ItemMoveEvent<I>, is_destination: bool) {
    let flag = if is_destination {
        MenuPolicy::BLOCK_ITEMS_IN
    } else {
        MenuPolicy::BLOCK_ITEMS_OUT
    };
    if policy.contains(flag) {
        event.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ContainerId;
    use alloc::vec;
    use alloc::vec::Vec;

    const MENU: ContainerId = ContainerId::new(1);
    const OWN: ContainerId = ContainerId::new(2);

    const ACTIONS: [ClickAction; 19] = [
        ClickAction::Nothing,
        ClickAction::PickupAll,
        ClickAction::PickupSome,
        ClickAction::PickupHalf,
        ClickAction::PickupOne,
        ClickAction::PlaceAll,
        ClickAction::PlaceSome,
        ClickAction::PlaceOne,
        ClickAction::SwapWithCursor,
        ClickAction::DropAllCursor,
        ClickAction::DropOneCursor,
        ClickAction::DropAllSlot,
        ClickAction::DropOneSlot,
        ClickAction::MoveToOtherInventory,
        ClickAction::HotbarMoveAndReadd,
        ClickAction::HotbarSwap,
        ClickAction::CloneStack,
        ClickAction::CollectToCursor,
        ClickAction::Unknown,
    ];

    fn click_event(action: ClickAction, external: bool) -> ClickEvent<u32> {
        let clicked = if external { Some(OWN) } else { Some(MENU) };
        ClickEvent::new(1, action, MENU, clicked, Some(0))
    }

    fn clicked(policy: MenuPolicy, action: ClickAction, external: bool) -> bool {
        let mut ev = click_event(action, external);
        click(policy, &mut ev, external);
        ev.is_cancelled()
    }

    #[test]
    fn cross_container_actions_always_cancelled() {
        for external in [false, true] {
            assert!(clicked(MenuPolicy::default(), ClickAction::CollectToCursor, external));
            assert!(clicked(MenuPolicy::default(), ClickAction::MoveToOtherInventory, external));
        }
    }

    #[test]
    fn internal_clicks_always_cancelled() {
        for action in ACTIONS {
            assert!(clicked(MenuPolicy::default(), action, false), "{action:?}");
        }
    }

    #[test]
    fn external_clicks_pass_unless_crossing() {
        let passed: Vec<_> = ACTIONS
            .into_iter()
            .filter(|a| !clicked(MenuPolicy::default(), *a, true))
            .collect();
        assert_eq!(passed.len(), ACTIONS.len() - 2);
        assert!(passed.iter().all(|a| !a.crosses_containers()));
    }

    #[test]
    fn unlocked_slots_still_guard_shift_click() {
        let policy = MenuPolicy::default() - MenuPolicy::LOCK_SLOTS;
        assert!(!clicked(policy, ClickAction::PickupAll, false));
        assert!(clicked(policy, ClickAction::MoveToOtherInventory, false));
        assert!(!clicked(MenuPolicy::empty(), ClickAction::CollectToCursor, true));
    }

    #[test]
    fn click_rules_never_uncancel() {
        let mut ev = click_event(ClickAction::PickupAll, true);
        ev.cancel();
        click(MenuPolicy::default(), &mut ev, true);
        assert!(ev.is_cancelled());
    }

    #[test]
    fn drag_cancelled_only_when_touching_menu_slots() {
        let size = 27;
        let mut outside = DragEvent::new(1_u32, MENU, vec![27, 30, 62]);
        drag(MenuPolicy::default(), size, &mut outside);
        assert!(!outside.is_cancelled());

        let mut straddling = DragEvent::new(1_u32, MENU, vec![40, 26]);
        drag(MenuPolicy::default(), size, &mut straddling);
        assert!(straddling.is_cancelled());

        let mut inside = DragEvent::new(1_u32, MENU, vec![0]);
        drag(MenuPolicy::default() - MenuPolicy::LOCK_DRAGS, size, &mut inside);
        assert!(!inside.is_cancelled());
    }

    #[test]
    fn empty_drag_is_left_alone() {
        let mut ev = DragEvent::new(1_u32, MENU, Vec::new());
        drag(MenuPolicy::default(), 9, &mut ev);
        assert!(!ev.is_cancelled());
    }

    #[test]
    fn item_moves_blocked_both_ways_by_default() {
        for is_destination in [false, true] {
            let mut ev = ItemMoveEvent::new(OWN, MENU, "iron");
            item_move(MenuPolicy::default(), &mut ev, is_destination);
            assert!(ev.is_cancelled());
        }
    }

    #[test]
    fn outgoing_moves_can_be_allowed() {
        let policy = MenuPolicy::default() - MenuPolicy::BLOCK_ITEMS_OUT;
        let mut out = ItemMoveEvent::new(MENU, OWN, "iron");
        item_move(policy, &mut out, false);
        assert!(!out.is_cancelled());
        let mut into = ItemMoveEvent::new(OWN, MENU, "iron");
        item_move(policy, &mut into, true);
        assert!(into.is_cancelled());
    }
}
