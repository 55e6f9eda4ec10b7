// Copyright 2025 the Bubbling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover tracking.
//!
//! Moves a pointer across the items of a list and prints the `pointerleave` / `pointerenter`
//! events dispatched for each move. Hit testing is faked with a lookup by x coordinate.
//!
//! Run:
//! - `cargo run -p bubbling_demos --example hover_tracking`

use bubbling_dispatch::document::Document;
use bubbling_dispatch::error::DispatchError;
use bubbling_dispatch::hover::{HoverState, dispatch_hover};
use bubbling_dispatch::payload::{Payload, PointerPayload};
use bubbling_tree::NodeId;
use kurbo::Point;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), DispatchError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut doc: Document = Document::new();
    let body = doc.create_element(None, "body").expect("fresh document");
    let list = doc.create_element(Some(body), "ul").expect("live parent");
    let items: Vec<NodeId> = (0..3)
        .map(|_| doc.create_element(Some(list), "li").expect("live parent"))
        .collect();

    for node in [body, list].into_iter().chain(items.iter().copied()) {
        for ty in ["pointerenter", "pointerleave"] {
            doc.register(node, ty, |event, doc| {
                let node = event.target();
                println!("  {:<12} <{}> {node}", event.event_type(), doc.tag(node).unwrap_or("?"));
                Ok(())
            })?;
        }
    }

    // Each item is 100 units wide; anything past the list is outside the document.
    let hit = |x: f64| -> Option<NodeId> {
        let i = (x / 100.0) as usize;
        items.get(i).copied()
    };

    let mut hover = HoverState::new();
    for x in [50.0, 60.0, 150.0, 250.0, 400.0] {
        println!("== pointer at x = {x} ==");
        let payload = Payload::Pointer(PointerPayload {
            position: Point::new(x, 10.0),
            ..PointerPayload::default()
        });
        let transitions = dispatch_hover(&mut doc, &mut hover, hit(x), payload)?;
        if transitions.is_empty() {
            println!("  (no change)");
        }
    }
    Ok(())
}
