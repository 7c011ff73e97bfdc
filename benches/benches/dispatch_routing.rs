// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_menu::container::SlotArray;
use understory_menu::dispatcher::MenuDispatcher;
use understory_menu::event::{ClickEvent, CloseEvent, DragEvent, ItemMoveEvent};
use understory_menu::menu::{Menu, MenuRef};
use understory_menu::session::Session;
use understory_menu::types::{ClickAction, ContainerId};

type Chest = SlotArray<u32, u32>;

#[derive(Default)]
struct Host {
    tops: RefCell<BTreeMap<u32, ContainerId>>,
}

impl Session<u32> for Host {
    fn is_connected(&self, _viewer: u32) -> bool {
        true
    }

    fn top_container(&self, viewer: u32) -> Option<ContainerId> {
        self.tops.borrow().get(&viewer).copied()
    }

    fn request_open(&self, viewer: u32, container: ContainerId) {
        self.tops.borrow_mut().insert(viewer, container);
    }

    fn request_close(&self, viewer: u32) {
        self.tops.borrow_mut().remove(&viewer);
    }
}

fn setup(n: u64) -> (Rc<Host>, MenuDispatcher<Chest>, Vec<MenuRef<Chest>>) {
    let host = Rc::new(Host::default());
    let dispatcher = MenuDispatcher::new(host.clone());
    dispatcher.attach();
    let menus = (0..n)
        .map(|i| Menu::new(Chest::new(ContainerId::new(i), 27), &dispatcher))
        .collect::<Vec<_>>();
    for m in &menus {
        dispatcher.register(m).expect("ids are distinct");
    }
    (host, dispatcher, menus)
}

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        // xorshift64*
        let mut x = self.0;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.0 = x;
        x.wrapping_mul(0x2545_F491_4F6C_DD1D)
    }
}

fn bench_clicks(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch_click");
    for &n in &[16_u64, 256, 4096] {
        let (_host, dispatcher, _menus) = setup(n);
        let mut rng = Rng::new(0x9E37_79B9_7F4A_7C15);
        let own = ContainerId::new(u64::MAX);
        group.throughput(Throughput::Elements(1));
        group.bench_function(format!("registered_{n}"), |b| {
            b.iter(|| {
                let top = ContainerId::new(rng.next_u64() % n);
                let clicked = if rng.next_u64() & 1 == 0 { top } else { own };
                let mut ev = ClickEvent::new(1, ClickAction::PickupAll, top, Some(clicked), Some(3));
                dispatcher.handle_click(&mut ev);
                black_box(ev);
            });
        });
    }
    group.finish();
}

fn bench_drags_and_moves(c: &mut Criterion) {
    let (_host, dispatcher, _menus) = setup(256);
    let raw_slots: Vec<usize> = (27..63).chain([5]).collect();
    c.bench_function("dispatch_drag_36_slots", |b| {
        b.iter(|| {
            let mut ev = DragEvent::new(1, ContainerId::new(7), raw_slots.clone());
            dispatcher.handle_drag(&mut ev);
            black_box(ev);
        });
    });
    c.bench_function("dispatch_item_move_between_menus", |b| {
        b.iter(|| {
            let mut ev = ItemMoveEvent::new(ContainerId::new(3), ContainerId::new(200), 64_u32);
            dispatcher.handle_item_move(&mut ev);
            black_box(ev);
        });
    });
}

fn bench_chained_close(c: &mut Criterion) {
    c.bench_function("close_then_open_next", |b| {
        b.iter_batched(
            || {
                let (host, dispatcher, menus) = setup(64);
                menus[0].open_for(1).expect("attached");
                menus[1].open_for(1).expect("attached");
                (host, dispatcher, menus)
            },
            |(host, dispatcher, menus)| {
                dispatcher.handle_close(&CloseEvent::new(1, menus[0].id()));
                black_box(host.top_container(1));
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_clicks, bench_drags_and_moves, bench_chained_close);
criterion_main!(benches);
