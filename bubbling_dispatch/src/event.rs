// Copyright 2025 the Bubbling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The event object handed to every handler during a dispatch.

use alloc::vec::Vec;

use bubbling_tree::NodeId;

use crate::types::{EventInit, EventType, Phase};

/// A single in-flight (or completed) event.
///
/// Created by [`Document::dispatch`](crate::document::Document::dispatch) and returned to the
/// caller once dispatch completes, so flags set by handlers can be inspected.
///
/// While a handler runs, [`current_target`](Self::current_target) and [`phase`](Self::phase)
/// describe where the event is. Both are `None` before and after dispatch.
#[derive(Clone, Debug)]
pub struct Event<P> {
    event_type: EventType,
    target: NodeId,
    path: Vec<NodeId>,
    init: EventInit,
    payload: P,
    current_target: Option<NodeId>,
    phase: Option<Phase>,
    propagation_stopped: bool,
    default_prevented: bool,
    in_passive_listener: bool,
}

impl<P> Event<P> {
    pub(crate) fn new(
        event_type: EventType,
        target: NodeId,
        path: Vec<NodeId>,
        init: EventInit,
        payload: P,
    ) -> Self {
        Self {
            event_type,
            target,
            path,
            init,
            payload,
            current_target: None,
            phase: None,
            propagation_stopped: false,
            default_prevented: false,
            in_passive_listener: false,
        }
    }

    /// Event type name.
    pub fn event_type(&self) -> &EventType {
        &self.event_type
    }

    /// Node the event was dispatched at.
    pub fn target(&self) -> NodeId {
        self.target
    }

    /// Node whose handler is currently running.
    pub fn current_target(&self) -> Option<NodeId> {
        self.current_target
    }

    /// Phase of the currently running handler.
    pub fn phase(&self) -> Option<Phase> {
        self.phase
    }

    /// Propagation path resolved at dispatch start, target first and root last.
    pub fn path(&self) -> &[NodeId] {
        &self.path
    }

    /// Whether this event continues from the target up to the root.
    pub fn bubbles(&self) -> bool {
        self.init.bubbles
    }

    /// Whether [`prevent_default`](Self::prevent_default) has any effect.
    pub fn cancelable(&self) -> bool {
        self.init.cancelable
    }

    /// Type-specific data.
    pub fn payload(&self) -> &P {
        &self.payload
    }

    /// Mutable type-specific data; changes are visible to later handlers.
    pub fn payload_mut(&mut self) -> &mut P {
        &mut self.payload
    }

    /// Consume the event, returning its payload.
    pub fn into_payload(self) -> P {
        self.payload
    }

    /// Stop the dispatch after the current handler returns.
    ///
    /// No further handlers run, neither at the current node nor at any node after it.
    /// Idempotent; once set, the flag stays set.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Whether [`stop_propagation`](Self::stop_propagation) was called.
    pub fn is_propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }

    /// Ask the embedder to skip its default action for this event.
    ///
    /// Ignored when the event is not [cancelable](Self::cancelable) or when called from a
    /// listener registered with [`ListenerFlags::PASSIVE`](crate::types::ListenerFlags::PASSIVE).
    pub fn prevent_default(&mut self) {
        if self.init.cancelable && !self.in_passive_listener {
            self.default_prevented = true;
        }
    }

    /// Whether the default action was prevented.
    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub(crate) fn enter(&mut self, node: NodeId, phase: Phase, passive: bool) {
        self.current_target = Some(node);
        self.phase = Some(phase);
        self.in_passive_listener = passive;
    }

    pub(crate) fn finish(&mut self) {
        self.current_target = None;
        self.phase = None;
        self.in_passive_listener = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use bubbling_tree::Tree;

    fn event(init: EventInit) -> Event<()> {
        let mut tree = Tree::new();
        let node = tree.insert(None, ()).unwrap();
        Event::new(EventType::CLICK, node, vec![node], init, ())
    }

    #[test]
    fn stop_propagation_is_sticky() {
        let mut ev = event(EventInit::default());
        assert!(!ev.is_propagation_stopped());
        ev.stop_propagation();
        ev.stop_propagation();
        assert!(ev.is_propagation_stopped());
    }

    #[test]
    fn prevent_default_needs_cancelable_and_active_listener() {
        let mut ev = event(EventInit::TARGET_ONLY);
        ev.prevent_default();
        assert!(!ev.default_prevented());

        let mut ev = event(EventInit::BUBBLING);
        let target = ev.target();
        ev.enter(target, Phase::Target, true);
        ev.prevent_default();
        assert!(!ev.default_prevented());
        ev.enter(target, Phase::Target, false);
        ev.prevent_default();
        assert!(ev.default_prevented());
    }

    #[test]
    fn finish_clears_position() {
        let mut ev = event(EventInit::default());
        let target = ev.target();
        ev.enter(target, Phase::Bubble, false);
        assert_eq!(ev.current_target(), Some(target));
        assert_eq!(ev.phase(), Some(Phase::Bubble));
        ev.finish();
        assert_eq!(ev.current_target(), None);
        assert_eq!(ev.phase(), None);
        assert_eq!(ev.path(), &[target]);
    }
}
