// Copyright 2025 the Bubbling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard handling with capture, passive, and once listeners.
//!
//! A capture listener on the document intercepts `Ctrl+S` before the focused input sees it,
//! prevents the default action and stops propagation. Other keys reach the input, then bubble
//! to a passive key counter on the form. A once listener greets the first key press.
//!
//! Run:
//! - `cargo run -p bubbling_demos --example keyboard_shortcuts`

use std::cell::Cell;
use std::rc::Rc;

use bubbling_dispatch::document::Document;
use bubbling_dispatch::error::DispatchError;
use bubbling_dispatch::payload::{KeyPayload, Modifiers, Payload};
use bubbling_dispatch::types::{EventType, ListenerFlags};
use tracing_subscriber::EnvFilter;

fn key(key: &str, code: &str, modifiers: Modifiers) -> Payload {
    Payload::Key(KeyPayload {
        key: key.into(),
        code: code.into(),
        modifiers,
        repeat: false,
    })
}

fn main() -> Result<(), DispatchError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut doc: Document = Document::new();
    let html = doc.create_element(None, "html").expect("fresh document");
    let form = doc.create_element(Some(html), "form").expect("live parent");
    let input = doc.create_element(Some(form), "input").expect("live parent");

    doc.register_with(html, EventType::KEYDOWN, ListenerFlags::CAPTURE, |event, _| {
        let Some(k) = event.payload().as_key() else {
            return Ok(());
        };
        if k.modifiers.contains(Modifiers::CONTROL) && k.code == "KeyS" {
            println!("  [shortcut] save");
            event.prevent_default();
            event.stop_propagation();
        }
        Ok(())
    })?;

    doc.register_with(html, EventType::KEYDOWN, ListenerFlags::ONCE, |_, _| {
        println!("  [once] first key press reached the document");
        Ok(())
    })?;

    doc.register(input, EventType::KEYDOWN, |event, _| {
        if let Some(k) = event.payload().as_key() {
            println!("  [input] typed {:?}", k.key);
        }
        Ok(())
    })?;

    let counted = Rc::new(Cell::new(0_u32));
    let c = counted.clone();
    doc.register_with(form, EventType::KEYDOWN, ListenerFlags::PASSIVE, move |event, _| {
        c.set(c.get() + 1);
        // Ignored: passive listeners cannot cancel.
        event.prevent_default();
        Ok(())
    })?;

    for payload in [
        key("h", "KeyH", Modifiers::empty()),
        key("i", "KeyI", Modifiers::empty()),
        key("s", "KeyS", Modifiers::CONTROL),
    ] {
        let event = doc.dispatch(input, EventType::KEYDOWN, payload)?;
        println!(
            "  -> default prevented: {}, stopped: {}",
            event.default_prevented(),
            event.is_propagation_stopped()
        );
    }
    println!("keys counted by the form: {}", counted.get());
    Ok(())
}
