// Copyright 2025 the Bubbling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::cell::Cell;
use std::rc::Rc;

use bubbling_dispatch::document::Document;
use bubbling_dispatch::types::{EventType, ListenerFlags};
use bubbling_tree::NodeId;
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

/// Chain of `depth` nodes with `per_node` click listeners each; returns the leaf.
fn build_chain(depth: usize, per_node: usize, flags: ListenerFlags) -> (Document<u64>, NodeId) {
    let mut doc = Document::new();
    let mut parent = None;
    let mut leaf = None;
    for _ in 0..depth {
        let node = doc.create_element(parent, "div").unwrap();
        for _ in 0..per_node {
            doc.register_with(node, EventType::CLICK, flags, |e, _| {
                *e.payload_mut() += 1;
                Ok(())
            })
            .unwrap();
        }
        parent = Some(node);
        leaf = Some(node);
    }
    (doc, leaf.unwrap())
}

fn bench_bubble(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch_bubble");
    for depth in [4_usize, 16, 64, 256] {
        let (mut doc, leaf) = build_chain(depth, 2, ListenerFlags::empty());
        group.throughput(Throughput::Elements((depth * 2) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(depth), &depth, |b, _| {
            b.iter(|| {
                let ev = doc.dispatch(black_box(leaf), EventType::CLICK, 0).unwrap();
                black_box(ev.into_payload())
            });
        });
    }
    group.finish();
}

fn bench_capture_and_bubble(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch_capture_bubble");
    for depth in [16_usize, 256] {
        let (mut doc, leaf) = build_chain(depth, 1, ListenerFlags::empty());
        let mut node = Some(leaf);
        while let Some(n) = node {
            doc.register_with(n, EventType::CLICK, ListenerFlags::CAPTURE, |_, _| Ok(()))
                .unwrap();
            node = doc.parent(n);
        }
        group.bench_with_input(BenchmarkId::from_parameter(depth), &depth, |b, _| {
            b.iter(|| black_box(doc.dispatch(leaf, EventType::CLICK, 0).unwrap()));
        });
    }
    group.finish();
}

fn bench_stop_early(c: &mut Criterion) {
    let (mut doc, leaf) = build_chain(256, 2, ListenerFlags::empty());
    let hits = Rc::new(Cell::new(0_u64));
    let h = hits.clone();
    doc.register(leaf, EventType::CLICK, move |e, _| {
        h.set(h.get() + 1);
        e.stop_propagation();
        Ok(())
    })
    .unwrap();
    c.bench_function("dispatch_stop_at_leaf_depth_256", |b| {
        b.iter(|| black_box(doc.dispatch(leaf, EventType::CLICK, 0).unwrap()));
    });
    black_box(hits.get());
}

fn bench_register_unregister(c: &mut Criterion) {
    let (mut doc, leaf) = build_chain(8, 0, ListenerFlags::empty());
    c.bench_function("register_unregister", |b| {
        b.iter(|| {
            let id = doc.register(leaf, EventType::KEYDOWN, |_, _| Ok(())).unwrap();
            black_box(doc.unregister(leaf, EventType::KEYDOWN, id))
        });
    });
}

criterion_group!(
    benches,
    bench_bubble,
    bench_capture_and_bubble,
    bench_stop_early,
    bench_register_unregister
);
criterion_main!(benches);
