// Copyright 2025 the Bubbling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bubbling Dispatch: a deterministic, `no_std` DOM-style event dispatcher.
//!
//! ## Overview
//!
//! This crate registers handlers on the nodes of a [`Document`](crate::document::Document)
//! and dispatches named events along the path from a target node to the root, the way web pages
//! deliver clicks and key presses. It does not perform hit testing: the embedder decides which
//! node an input lands on and calls [`Document::dispatch`](crate::document::Document::dispatch).
//!
//! ## Propagation
//!
//! A dispatch resolves the listeners of every node on the target → root path when it starts,
//! then invokes them in order:
//!
//! - capture listeners ([`ListenerFlags::CAPTURE`](crate::types::ListenerFlags::CAPTURE)),
//!   root → target;
//! - the target's own listeners, in insertion order;
//! - the remaining (bubble) listeners, target's parent → root, if the event bubbles.
//!
//! A handler can call [`Event::stop_propagation`](crate::event::Event::stop_propagation); no
//! further handler runs after it returns, not even on the same node.
//! A handler can also fail: returning `Err` aborts the dispatch and the caller receives a
//! [`DispatchError::Handler`](crate::error::DispatchError::Handler).
//!
//! ## Example
//!
//! ```
//! use std::{cell::RefCell, rc::Rc};
//!
//! use bubbling_dispatch::document::Document;
//! use bubbling_dispatch::payload::Payload;
//! use bubbling_dispatch::types::EventType;
//!
//! let mut doc: Document = Document::new();
//! let html = doc.create_element(None, "html").unwrap();
//! let p = doc.create_element(Some(html), "p").unwrap();
//! let button = doc.create_element(Some(p), "button").unwrap();
//!
//! let log = Rc::new(RefCell::new(Vec::new()));
//! for (node, name) in [(html, "Document"), (p, "Paragraph"), (button, "Button")] {
//!     let log = log.clone();
//!     doc.register(node, EventType::CLICK, move |_event, _doc| {
//!         log.borrow_mut().push(name);
//!         Ok(())
//!     })
//!     .unwrap();
//! }
//!
//! doc.dispatch(button, EventType::CLICK, Payload::click_at((10.0, 10.0))).unwrap();
//! assert_eq!(*log.borrow(), ["Button", "Paragraph", "Document"]);
//! ```
//!
//! ## Modules
//!
//! - [`document`]: the node tree, registration, and the dispatch algorithm.
//! - [`event`]: the [`Event`](crate::event::Event) handed to handlers.
//! - [`types`]: event names, phases, listener flags, and per-dispatch options.
//! - [`payload`]: the default pointer/keyboard payload schema.
//! - [`hover`]: enter/leave transitions for the hovered path.
//! - [`listeners`]: the shared [`Handler`](crate::listeners::Handler) type.
//! - [`error`]: [`DispatchError`](crate::error::DispatchError).
//!
//! ## Logging
//!
//! Dispatch start/finish and failures are reported at `debug` level through `tracing`, and
//! individual handler invocations at `trace` level. Install a subscriber to see them.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod document;
pub mod error;
pub mod event;
pub mod hover;
pub mod listeners;
pub mod payload;
pub mod types;

pub use bubbling_tree::{NodeId, TreeError};
