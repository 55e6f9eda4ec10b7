// Copyright 2025 the Bubbling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Click bubbling.
//!
//! Builds `html > p > button`, logs a line from each node's click handler, then repeats the
//! click with `stop_propagation` in the button's handler.
//!
//! Run:
//! - `cargo run -p bubbling_demos --example click_bubbling`
//! - `RUST_LOG=bubbling_dispatch=trace cargo run -p bubbling_demos --example click_bubbling`

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use bubbling_dispatch::document::Document;
use bubbling_dispatch::error::DispatchError;
use bubbling_dispatch::payload::Payload;
use bubbling_dispatch::types::EventType;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), DispatchError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut doc: Document = Document::new();
    let html = doc.create_element(None, "html").expect("fresh document");
    let p = doc.create_element(Some(html), "p").expect("live parent");
    let button = doc.create_element(Some(p), "button").expect("live parent");

    let log = Rc::new(RefCell::new(Vec::new()));
    let stop_at_button = Rc::new(Cell::new(false));

    for (node, name) in [(html, "Document"), (p, "Paragraph")] {
        let log = log.clone();
        doc.register(node, EventType::CLICK, move |_, _| {
            log.borrow_mut().push(name);
            Ok(())
        })?;
    }
    {
        let log = log.clone();
        let stop = stop_at_button.clone();
        doc.register(button, EventType::CLICK, move |event, doc| {
            log.borrow_mut().push("Button");
            if let Some(pointer) = event.payload().as_pointer() {
                println!(
                    "  <{}> clicked at ({}, {})",
                    doc.tag(event.target()).unwrap_or("?"),
                    pointer.position.x,
                    pointer.position.y
                );
            }
            if stop.get() {
                event.stop_propagation();
            }
            Ok(())
        })?;
    }

    println!("== Click, bubbling ==");
    doc.dispatch(button, EventType::CLICK, Payload::click_at((24.0, 8.0)))?;
    println!("  log: {:?}", log.borrow());

    println!("== Click, stopPropagation in the button handler ==");
    log.borrow_mut().clear();
    stop_at_button.set(true);
    let event = doc.dispatch(button, EventType::CLICK, Payload::click_at((24.0, 8.0)))?;
    println!(
        "  log: {:?} (stopped: {})",
        log.borrow(),
        event.is_propagation_stopped()
    );
    Ok(())
}
