// Copyright 2025 the Bubbling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-node listener storage.
//!
//! Entries are kept in insertion order per event type. Removal is logical (a `removed` flag)
//! so that a dispatch in progress never observes a list being shuffled under it; removed
//! entries are compacted once no dispatch is active.

use alloc::collections::BTreeMap;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::Cell;

use crate::document::Document;
use crate::error::HandlerError;
use crate::event::Event;
use crate::types::{EventType, ListenerFlags, ListenerId};

/// Shared, reference-counted event handler.
///
/// Handlers receive the in-flight [`Event`] and the [`Document`] itself, so they can register,
/// unregister, or dispatch further events. Returning `Err` aborts the dispatch.
///
/// Cloning a `Handler` and registering both clones counts as two registrations.
pub type Handler<P> = Rc<dyn Fn(&mut Event<P>, &mut Document<P>) -> Result<(), HandlerError>>;

/// Wrap a closure as a [`Handler`], for registering the same handler more than once.
///
/// ```
/// use bubbling_dispatch::document::Document;
/// use bubbling_dispatch::listeners::handler;
/// use bubbling_dispatch::types::{EventType, ListenerFlags};
///
/// let mut doc: Document = Document::new();
/// let button = doc.create_element(None, "button").unwrap();
/// let h = handler(|_event, _doc| Ok(()));
/// doc.register_handler(button, EventType::CLICK, ListenerFlags::empty(), h.clone()).unwrap();
/// doc.register_handler(button, EventType::CLICK, ListenerFlags::empty(), h).unwrap();
/// assert_eq!(doc.listener_count(button, EventType::CLICK), 2);
/// ```
pub fn handler<P, F>(f: F) -> Handler<P>
where
    F: Fn(&mut Event<P>, &mut Document<P>) -> Result<(), HandlerError> + 'static,
{
    Rc::new(f)
}

pub(crate) struct HandlerEntry<P> {
    pub(crate) id: ListenerId,
    pub(crate) flags: ListenerFlags,
    pub(crate) handler: Handler<P>,
    pub(crate) removed: bool,
    /// Set on first invocation; shared with every dispatch snapshot holding this entry.
    pub(crate) fired: Rc<Cell<bool>>,
}

impl<P> core::fmt::Debug for HandlerEntry<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("HandlerEntry")
            .field("id", &self.id)
            .field("flags", &self.flags)
            .field("removed", &self.removed)
            .field("fired", &self.fired.get())
            .finish_non_exhaustive()
    }
}

pub(crate) struct ListenerMap<P> {
    by_type: BTreeMap<EventType, Vec<HandlerEntry<P>>>,
}

impl<P> core::fmt::Debug for ListenerMap<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map()
            .entries(self.by_type.iter().map(|(k, v)| (k.as_str(), v.len())))
            .finish()
    }
}

impl<P> Default for ListenerMap<P> {
    fn default() -> Self {
        Self {
            by_type: BTreeMap::new(),
        }
    }
}

impl<P> ListenerMap<P> {
    pub(crate) fn push(
        &mut self,
        event_type: EventType,
        id: ListenerId,
        flags: ListenerFlags,
        handler: Handler<P>,
    ) {
        self.by_type.entry(event_type).or_default().push(HandlerEntry {
            id,
            flags,
            handler,
            removed: false,
            fired: Rc::new(Cell::new(false)),
        });
    }

    /// Flag the entry as removed. Returns false if it is unknown or already removed.
    pub(crate) fn mark_removed(&mut self, event_type: &EventType, id: ListenerId) -> bool {
        let Some(entries) = self.by_type.get_mut(event_type) else {
            return false;
        };
        match entries.iter_mut().find(|e| e.id == id && !e.removed) {
            Some(entry) => {
                entry.removed = true;
                true
            }
            None => false,
        }
    }

    /// Drop removed entries and empty lists.
    pub(crate) fn compact(&mut self) {
        self.by_type.retain(|_, entries| {
            entries.retain(|e| !e.removed);
            !entries.is_empty()
        });
    }

    /// Live entries for `event_type` in insertion order.
    pub(crate) fn live(&self, event_type: &EventType) -> impl Iterator<Item = &HandlerEntry<P>> {
        self.by_type
            .get(event_type)
            .into_iter()
            .flatten()
            .filter(|e| !e.removed)
    }

    pub(crate) fn total_entries(&self) -> usize {
        self.by_type.values().map(Vec::len).sum()
    }
}
