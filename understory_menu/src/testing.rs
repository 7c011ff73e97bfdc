// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Test doubles shared by the unit tests.

use alloc::collections::{BTreeMap, BTreeSet};
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};

use crate::container::SlotArray;
use crate::dispatcher::MenuDispatcher;
use crate::event::{Cancellable, ClickEvent, CloseEvent, DisableEvent, ItemMoveEvent, OpenEvent};
use crate::menu::{MenuHandler, MenuRef};
use crate::policy;
use crate::session::Session;
use crate::types::ContainerId;

pub(crate) type Viewer = u32;
pub(crate) type Chest = SlotArray<&'static str, Viewer>;

pub(crate) fn chest(id: u64, size: usize) -> Chest {
    SlotArray::new(ContainerId::new(id), size)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Request {
    Open(Viewer, ContainerId),
    Close(Viewer),
}

/// Session that records requests and tracks each viewer's top container.
#[derive(Debug, Default)]
pub(crate) struct RecordingSession {
    tops: RefCell<BTreeMap<Viewer, ContainerId>>,
    offline: RefCell<BTreeSet<Viewer>>,
    requests: RefCell<Vec<Request>>,
}

impl RecordingSession {
    pub(crate) fn requests(&self) -> Vec<Request> {
        self.requests.borrow().clone()
    }

    pub(crate) fn take_requests(&self) -> Vec<Request> {
        self.requests.take()
    }

    pub(crate) fn top(&self, viewer: Viewer) -> Option<ContainerId> {
        self.tops.borrow().get(&viewer).copied()
    }

    pub(crate) fn set_top(&self, viewer: Viewer, container: ContainerId) {
        self.tops.borrow_mut().insert(viewer, container);
    }

    pub(crate) fn disconnect(&self, viewer: Viewer) {
        self.offline.borrow_mut().insert(viewer);
    }
}

impl Session<Viewer> for RecordingSession {
    fn is_connected(&self, viewer: Viewer) -> bool {
        !self.offline.borrow().contains(&viewer)
    }

    fn top_container(&self, viewer: Viewer) -> Option<ContainerId> {
        self.top(viewer)
    }

    fn request_open(&self, viewer: Viewer, container: ContainerId) {
        self.set_top(viewer, container);
        self.requests.borrow_mut().push(Request::Open(viewer, container));
    }

    fn request_close(&self, viewer: Viewer) {
        self.tops.borrow_mut().remove(&viewer);
        self.requests.borrow_mut().push(Request::Close(viewer));
    }
}

pub(crate) fn session() -> Rc<RecordingSession> {
    Rc::new(RecordingSession::default())
}

/// Attached dispatcher over `session`.
pub(crate) fn dispatcher(session: &Rc<RecordingSession>) -> MenuDispatcher<Chest> {
    let d = MenuDispatcher::new(Rc::clone(session));
    d.attach();
    d
}

/// Session that completes requests on the spot by delivering the matching
/// open or close event, the way game servers do.
#[derive(Debug, Default)]
pub(crate) struct EchoSession {
    record: RecordingSession,
    dispatcher: RefCell<Option<MenuDispatcher<Chest>>>,
}

impl EchoSession {
    pub(crate) fn top(&self, viewer: Viewer) -> Option<ContainerId> {
        self.record.top(viewer)
    }

    fn dispatcher(&self) -> Option<MenuDispatcher<Chest>> {
        self.dispatcher.borrow().clone()
    }
}

impl Session<Viewer> for EchoSession {
    fn is_connected(&self, viewer: Viewer) -> bool {
        self.record.is_connected(viewer)
    }

    fn top_container(&self, viewer: Viewer) -> Option<ContainerId> {
        self.record.top(viewer)
    }

    fn request_open(&self, viewer: Viewer, container: ContainerId) {
        if self.record.top(viewer).is_some() {
            self.request_close(viewer);
        }
        self.record.request_open(viewer, container);
        if let Some(d) = self.dispatcher() {
            let mut ev = OpenEvent::new(viewer, container);
            d.handle_open(&mut ev);
            if ev.is_cancelled() {
                self.record.tops.borrow_mut().remove(&viewer);
            }
        }
    }

    fn request_close(&self, viewer: Viewer) {
        let Some(closed) = self.record.top(viewer) else {
            return;
        };
        self.record.request_close(viewer);
        if let Some(d) = self.dispatcher() {
            d.handle_close(&CloseEvent::new(viewer, closed));
        }
    }
}

/// Attached dispatcher whose session delivers events synchronously.
pub(crate) fn echo_dispatcher() -> (Rc<EchoSession>, MenuDispatcher<Chest>) {
    let session = Rc::new(EchoSession::default());
    let d = MenuDispatcher::new(Rc::clone(&session));
    *session.dispatcher.borrow_mut() = Some(d.clone());
    d.attach();
    (session, d)
}

/// Knobs and counters for [`ScriptedHandler`].
#[derive(Debug, Default)]
pub(crate) struct Script {
    pub(crate) opens: Cell<usize>,
    pub(crate) closes: Cell<usize>,
    pub(crate) disables: Cell<usize>,
    pub(crate) cancel_opens: Cell<bool>,
    pub(crate) moves: RefCell<Vec<(ContainerId, bool)>>,
    pub(crate) next_on_close: RefCell<Option<MenuRef<Chest>>>,
    pub(crate) open_on_click: RefCell<Option<MenuRef<Chest>>>,
}

impl Script {
    pub(crate) fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }
}

/// Handler driven by a shared [`Script`].
#[derive(Debug)]
pub(crate) struct ScriptedHandler(pub(crate) Rc<Script>);

impl MenuHandler<Chest> for ScriptedHandler {
    fn on_open(&self, _menu: &MenuRef<Chest>, event: &mut OpenEvent<Viewer>) {
        self.0.opens.set(self.0.opens.get() + 1);
        if self.0.cancel_opens.get() {
            event.cancel();
        }
    }

    fn on_close(&self, menu: &MenuRef<Chest>, _event: &CloseEvent<Viewer>) {
        self.0.closes.set(self.0.closes.get() + 1);
        if let Some(next) = self.0.next_on_close.borrow().clone() {
            menu.set_next(Some(next));
        }
    }

    fn on_click(&self, menu: &MenuRef<Chest>, event: &mut ClickEvent<Viewer>, external: bool) {
        policy::click(menu.policy(), event, external);
        let target = self.0.open_on_click.borrow().clone();
        if let Some(target) = target {
            target.open_for(event.viewer).unwrap();
        }
    }

    fn on_item_move(
        &self,
        menu: &MenuRef<Chest>,
        event: &mut ItemMoveEvent<&'static str>,
        is_destination: bool,
    ) {
        self.0.moves.borrow_mut().push((menu.id(), is_destination));
        policy::item_move(menu.policy(), event, is_destination);
    }

    fn on_disable(&self, _menu: &MenuRef<Chest>, _event: &DisableEvent) {
        self.0.disables.set(self.0.disables.get() + 1);
    }
}
