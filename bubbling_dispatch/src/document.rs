// Copyright 2025 the Bubbling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Document: the node tree, its listeners, and the dispatch algorithm.
//!
//! ## Overview
//!
//! A [`Document`] owns a [`Tree`] whose nodes carry a tag name and a listener map.
//! [`Document::dispatch`] walks from the target node up to the root, invoking every listener
//! registered for the event type, in insertion order, at each node.
//!
//! ## Phases
//!
//! With capture listeners in play, a dispatch runs in three phases:
//!
//! 1) Capture: capture listeners from the root down to the target's parent.
//! 2) Target: capture listeners, then the other listeners, at the target itself.
//! 3) Bubble: non-capture listeners from the target's parent up to the root
//!    (skipped when [`EventInit::bubbles`] is false).
//!
//! Without capture listeners, this is the plain target → root walk.
//!
//! ## Snapshot semantics
//!
//! Listeners for the whole path are resolved once, when the dispatch starts.
//! Registering or unregistering during the dispatch (including from a handler) only affects
//! later dispatches, and so does restructuring the tree.
//!
//! ## Stopping
//!
//! After each handler returns, the dispatch checks [`Event::is_propagation_stopped`].
//! Once set, no further handler runs: not at the current node, and not at any later node.

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::Cell;

use bubbling_tree::{NodeId, Tree, TreeError};
use tracing::{debug, trace};

use crate::error::{DispatchError, HandlerError};
use crate::event::Event;
use crate::listeners::{Handler, ListenerMap, handler};
use crate::payload::Payload;
use crate::types::{EventInit, EventType, ListenerFlags, ListenerId, Phase};

/// Per-node data stored in the document tree.
pub struct NodeData<P> {
    tag: String,
    listeners: ListenerMap<P>,
}

impl<P> NodeData<P> {
    /// Tag name given at creation, e.g. `"button"`.
    pub fn tag(&self) -> &str {
        &self.tag
    }
}

impl<P> core::fmt::Debug for NodeData<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("NodeData")
            .field("tag", &self.tag)
            .field("listener_entries", &self.listeners.total_entries())
            .finish()
    }
}

/// A tree of nodes plus the listeners registered on them.
///
/// `P` is the payload type carried by events; it defaults to [`Payload`].
///
/// ## Usage
///
/// - Build the tree with [`Document::create_element`].
/// - Attach handlers with [`Document::register`] (or [`Document::register_with`] for
///   capture/once/passive listeners) and detach them with [`Document::unregister`].
/// - Fire events with [`Document::dispatch`]; inspect the returned [`Event`].
///
/// The document is single-threaded. Handlers are reference-counted and run synchronously on the
/// calling thread; embedders that share a document must serialize access themselves.
pub struct Document<P = Payload> {
    tree: Tree<NodeData<P>>,
    next_listener: u64,
    dispatch_depth: Rc<Cell<u32>>,
    pending_compaction: Vec<NodeId>,
}

impl<P> core::fmt::Debug for Document<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Document")
            .field("tree", &self.tree)
            .field("next_listener", &self.next_listener)
            .field("dispatch_depth", &self.dispatch_depth.get())
            .finish_non_exhaustive()
    }
}

impl<P> Default for Document<P> {
    fn default() -> Self {
        Self::new()
    }
}

/// Counts one running dispatch; the count drops again even if a handler unwinds.
struct DepthGuard(Rc<Cell<u32>>);

impl DepthGuard {
    fn enter(depth: &Rc<Cell<u32>>) -> Self {
        depth.set(depth.get() + 1);
        Self(depth.clone())
    }
}

impl Drop for DepthGuard {
    fn drop(&mut self) {
        self.0.set(self.0.get() - 1);
    }
}

struct Step<P> {
    node: NodeId,
    phase: Phase,
    id: ListenerId,
    flags: ListenerFlags,
    handler: Handler<P>,
    fired: Rc<Cell<bool>>,
}

impl<P> Document<P> {
    /// Create an empty document.
    pub fn new() -> Self {
        Self {
            tree: Tree::new(),
            next_listener: 1,
            dispatch_depth: Rc::new(Cell::new(0)),
            pending_compaction: Vec::new(),
        }
    }

    // --- structure ---

    /// Create a node as the last child of `parent` (or as a root if `None`).
    pub fn create_element(
        &mut self,
        parent: Option<NodeId>,
        tag: impl Into<String>,
    ) -> Result<NodeId, TreeError> {
        self.tree.insert(
            parent,
            NodeData {
                tag: tag.into(),
                listeners: ListenerMap::default(),
            },
        )
    }

    /// Remove a node with its subtree and all their listeners.
    ///
    /// Returns `false` if `node` is stale. Safe to call from a handler; the running dispatch
    /// keeps its snapshot.
    pub fn remove_node(&mut self, node: NodeId) -> bool {
        self.tree.remove(node)
    }

    /// Move `node` (with its subtree) under `new_parent`, or make it a root.
    pub fn reparent(&mut self, node: NodeId, new_parent: Option<NodeId>) -> Result<(), TreeError> {
        self.tree.reparent(node, new_parent)
    }

    /// Read-only access to the underlying tree.
    pub fn tree(&self) -> &Tree<NodeData<P>> {
        &self.tree
    }

    /// Returns true if `node` is alive in this document.
    pub fn is_alive(&self, node: NodeId) -> bool {
        self.tree.is_alive(node)
    }

    /// Tag name of a live node.
    pub fn tag(&self, node: NodeId) -> Option<&str> {
        self.tree.data(node).map(NodeData::tag)
    }

    /// Parent of `node`.
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.tree.parent(node)
    }

    /// Children of `node` in document order.
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.tree.children(node)
    }

    // --- listeners ---

    /// Append `f` to `node`'s listeners for `event_type` (bubble phase).
    ///
    /// Fails with [`DispatchError::UnknownNode`] if `node` is stale.
    pub fn register<F>(
        &mut self,
        node: NodeId,
        event_type: impl Into<EventType>,
        f: F,
    ) -> Result<ListenerId, DispatchError>
    where
        F: Fn(&mut Event<P>, &mut Self) -> Result<(), HandlerError> + 'static,
    {
        self.register_handler(node, event_type, ListenerFlags::empty(), handler(f))
    }

    /// Like [`register`](Self::register), with [`ListenerFlags`].
    pub fn register_with<F>(
        &mut self,
        node: NodeId,
        event_type: impl Into<EventType>,
        flags: ListenerFlags,
        f: F,
    ) -> Result<ListenerId, DispatchError>
    where
        F: Fn(&mut Event<P>, &mut Self) -> Result<(), HandlerError> + 'static,
    {
        self.register_handler(node, event_type, flags, handler(f))
    }

    /// Register an already shared [`Handler`].
    ///
    /// Registering the same handler twice yields two entries, invoked twice per dispatch.
    pub fn register_handler(
        &mut self,
        node: NodeId,
        event_type: impl Into<EventType>,
        flags: ListenerFlags,
        handler: Handler<P>,
    ) -> Result<ListenerId, DispatchError> {
        let event_type = event_type.into();
        let id = ListenerId(self.next_listener);
        let data = self
            .tree
            .data_mut(node)
            .ok_or(DispatchError::UnknownNode(node))?;
        data.listeners.push(event_type, id, flags, handler);
        self.next_listener += 1;
        trace!(%node, ?id, ?flags, "listener registered");
        Ok(id)
    }

    /// Remove a listener previously returned by [`register`](Self::register).
    ///
    /// Unknown nodes, types, or handles are ignored; the return value reports whether a listener
    /// was removed. A dispatch already in progress still runs the listener if it was resolved.
    pub fn unregister(
        &mut self,
        node: NodeId,
        event_type: impl Into<EventType>,
        id: ListenerId,
    ) -> bool {
        let event_type = event_type.into();
        let removed = self.mark_removed(node, &event_type, id);
        if !removed {
            debug!(%node, %event_type, ?id, "unregister: no matching listener");
        }
        removed
    }

    /// Number of live listeners on `node` for `event_type`.
    pub fn listener_count(&self, node: NodeId, event_type: impl Into<EventType>) -> usize {
        let event_type = event_type.into();
        self.tree
            .data(node)
            .map_or(0, |d| d.listeners.live(&event_type).count())
    }

    /// Returns true while a dispatch is running (including nested dispatches).
    pub fn is_dispatching(&self) -> bool {
        self.dispatch_depth.get() > 0
    }

    // --- dispatch ---

    /// Dispatch a bubbling, cancelable event at `target`.
    ///
    /// Walks `target` → root, invoking each node's listeners for `event_type` in insertion
    /// order, and returns the event once no handler is left or propagation was stopped.
    ///
    /// Fails with [`DispatchError::UnknownNode`] if `target` is stale, or with
    /// [`DispatchError::Handler`] as soon as a handler returns an error.
    pub fn dispatch(
        &mut self,
        target: NodeId,
        event_type: impl Into<EventType>,
        payload: P,
    ) -> Result<Event<P>, DispatchError> {
        self.dispatch_with(target, event_type, EventInit::default(), payload)
    }

    /// Dispatch with explicit [`EventInit`] options.
    pub fn dispatch_with(
        &mut self,
        target: NodeId,
        event_type: impl Into<EventType>,
        init: EventInit,
        payload: P,
    ) -> Result<Event<P>, DispatchError> {
        let event_type = event_type.into();
        if !self.tree.is_alive(target) {
            return Err(DispatchError::UnknownNode(target));
        }
        let path: Vec<NodeId> = self.tree.ancestors(target).collect();
        let steps = self.resolve(&event_type, &path, init.bubbles);
        debug!(
            %event_type,
            %target,
            depth = path.len(),
            listeners = steps.len(),
            "dispatch start"
        );

        let mut event = Event::new(event_type, target, path, init, payload);
        let depth = DepthGuard::enter(&self.dispatch_depth);
        let result = self.run(&steps, &mut event);
        drop(depth);
        if self.dispatch_depth.get() == 0 {
            self.compact_pending();
        }
        event.finish();
        result?;

        debug!(
            event_type = %event.event_type(),
            stopped = event.is_propagation_stopped(),
            default_prevented = event.default_prevented(),
            "dispatch complete"
        );
        Ok(event)
    }

    /// Resolve the fixed list of handlers for one dispatch.
    fn resolve(&self, event_type: &EventType, path: &[NodeId], bubbles: bool) -> Vec<Step<P>> {
        let mut steps = Vec::new();
        let Some((&target, ancestors)) = path.split_first() else {
            return steps;
        };
        for &node in ancestors.iter().rev() {
            self.collect(node, event_type, Phase::Capture, true, &mut steps);
        }
        self.collect(target, event_type, Phase::Target, true, &mut steps);
        self.collect(target, event_type, Phase::Target, false, &mut steps);
        if bubbles {
            for &node in ancestors {
                self.collect(node, event_type, Phase::Bubble, false, &mut steps);
            }
        }
        steps
    }

    fn collect(
        &self,
        node: NodeId,
        event_type: &EventType,
        phase: Phase,
        capture: bool,
        out: &mut Vec<Step<P>>,
    ) {
        let Some(data) = self.tree.data(node) else {
            return;
        };
        out.extend(
            data.listeners
                .live(event_type)
                .filter(|e| e.flags.contains(ListenerFlags::CAPTURE) == capture)
                .map(|e| Step {
                    node,
                    phase,
                    id: e.id,
                    flags: e.flags,
                    handler: e.handler.clone(),
                    fired: e.fired.clone(),
                }),
        );
    }

    fn run(&mut self, steps: &[Step<P>], event: &mut Event<P>) -> Result<(), DispatchError> {
        for step in steps {
            if step.flags.contains(ListenerFlags::ONCE) {
                // A nested dispatch may already have consumed it.
                if step.fired.replace(true) {
                    continue;
                }
                let event_type = event.event_type().clone();
                self.mark_removed(step.node, &event_type, step.id);
            }
            event.enter(
                step.node,
                step.phase,
                step.flags.contains(ListenerFlags::PASSIVE),
            );
            trace!(node = %step.node, phase = ?step.phase, id = ?step.id, "invoke");
            if let Err(source) = (step.handler)(event, self) {
                debug!(
                    event_type = %event.event_type(),
                    node = %step.node,
                    phase = ?step.phase,
                    error = %source,
                    "handler failed; aborting dispatch"
                );
                return Err(DispatchError::Handler {
                    event_type: event.event_type().clone(),
                    node: step.node,
                    phase: step.phase,
                    source,
                });
            }
            if event.is_propagation_stopped() {
                trace!(node = %step.node, "propagation stopped");
                break;
            }
        }
        Ok(())
    }

    fn mark_removed(&mut self, node: NodeId, event_type: &EventType, id: ListenerId) -> bool {
        let dispatching = self.dispatch_depth.get() > 0;
        let Some(data) = self.tree.data_mut(node) else {
            return false;
        };
        if !data.listeners.mark_removed(event_type, id) {
            return false;
        }
        if dispatching {
            self.pending_compaction.push(node);
        } else {
            data.listeners.compact();
        }
        true
    }

    fn compact_pending(&mut self) {
        for node in core::mem::take(&mut self.pending_compaction) {
            if let Some(data) = self.tree.data_mut(node) {
                data.listeners.compact();
            }
        }
    }
}
