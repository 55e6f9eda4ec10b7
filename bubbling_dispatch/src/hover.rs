// Copyright 2025 the Bubbling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover tracking: enter/leave transitions from hovered-path changes.
//!
//! ## Usage
//!
//! 1) Resolve the node under the pointer (hit testing is up to the embedder).
//! 2) Call [`dispatch_hover`] with that node, or `None` when the pointer left the document.
//! 3) `pointerleave` is dispatched to every node that is no longer hovered (inner → outer),
//!    then `pointerenter` to every newly hovered node (outer → inner). Neither bubbles.
//!
//! [`HoverState::update_path`] exposes the transition computation on its own.
//!
//! ## Minimal example
//!
//! ```
//! use bubbling_dispatch::hover::{HoverState, HoverEvent};
//! let mut h: HoverState<u32> = HoverState::new();
//! assert_eq!(h.update_path(&[1, 2]), vec![HoverEvent::Enter(1), HoverEvent::Enter(2)]);
//! assert_eq!(h.update_path(&[1, 3]), vec![HoverEvent::Leave(2), HoverEvent::Enter(3)]);
//! ```

use alloc::vec::Vec;

use bubbling_tree::NodeId;

use crate::document::Document;
use crate::error::DispatchError;
use crate::types::{EventInit, EventType};

/// Hovered root→target path and the transitions between successive paths.
///
/// Leave transitions are emitted from inner-most to outer-most, enter transitions from
/// outer-most to inner-most, relative to the lowest common ancestor of the old and new paths.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HoverState<K: Copy + Eq = NodeId> {
    current: Vec<K>,
}

/// A hover transition.
///
/// Returned by [`HoverState::update_path`] and [`dispatch_hover`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HoverEvent<K> {
    /// Pointer entered the node (outer → inner order).
    Enter(K),
    /// Pointer left the node (inner → outer order).
    Leave(K),
}

impl<K: Copy + Eq> HoverState<K> {
    /// Create an empty hover state.
    pub fn new() -> Self {
        Self {
            current: Vec::new(),
        }
    }

    /// Current root→target path; empty when nothing is hovered.
    pub fn current_path(&self) -> &[K] {
        &self.current
    }

    /// Forget the hovered path, returning leave transitions inner → outer.
    pub fn clear(&mut self) -> Vec<HoverEvent<K>> {
        self.update_path(&[])
    }

    /// Replace the hovered path and return the leave/enter transitions.
    pub fn update_path(&mut self, new_path: &[K]) -> Vec<HoverEvent<K>> {
        let shared = self
            .current
            .iter()
            .zip(new_path)
            .take_while(|(old, new)| old == new)
            .count();

        let leaves = self.current[shared..]
            .iter()
            .rev()
            .map(|&k| HoverEvent::Leave(k));
        let enters = new_path[shared..].iter().map(|&k| HoverEvent::Enter(k));
        let out = leaves.chain(enters).collect();

        self.current.clear();
        self.current.extend_from_slice(new_path);
        out
    }
}

/// Move the hover to `target` and dispatch the resulting leave/enter events.
///
/// Events are dispatched with [`EventInit::TARGET_ONLY`] and a clone of `payload`. Leave events
/// for nodes removed since the last update are skipped. The state is updated before any
/// handler runs, so on error it already reflects `target`.
pub fn dispatch_hover<P: Clone>(
    doc: &mut Document<P>,
    state: &mut HoverState<NodeId>,
    target: Option<NodeId>,
    payload: P,
) -> Result<Vec<HoverEvent<NodeId>>, DispatchError> {
    let path = match target {
        Some(t) if !doc.is_alive(t) => return Err(DispatchError::UnknownNode(t)),
        Some(t) => doc.tree().path_from_root(t),
        None => Vec::new(),
    };
    let transitions = state.update_path(&path);
    for transition in &transitions {
        match *transition {
            HoverEvent::Leave(node) if doc.is_alive(node) => {
                doc.dispatch_with(
                    node,
                    EventType::POINTERLEAVE,
                    EventInit::TARGET_ONLY,
                    payload.clone(),
                )?;
            }
            HoverEvent::Leave(_) => {}
            HoverEvent::Enter(node) => {
                doc.dispatch_with(
                    node,
                    EventType::POINTERENTER,
                    EventInit::TARGET_ONLY,
                    payload.clone(),
                )?;
            }
        }
    }
    Ok(transitions)
}
