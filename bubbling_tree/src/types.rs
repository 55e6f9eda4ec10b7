// Copyright 2025 the Bubbling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the node tree: identifiers and errors.

use thiserror::Error;

/// Identifier for a node in the tree.
///
/// This is a small, copyable handle that stays stable while the node lives but becomes
/// invalid when the node is removed.
/// It consists of a slot index and a generation counter.
///
/// ## Semantics
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On remove, the slot is freed; any existing `NodeId` that pointed to that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `NodeId`.
///
/// ### Liveness
///
/// Use [`Tree::is_alive`](crate::Tree::is_alive) to check whether a `NodeId` still refers to a live node.
/// Stale `NodeId`s never alias a different live node because the generation must match.
///
/// ### Notes
///
/// - The generation increments on slot reuse and never decreases.
/// - A slot whose generation reaches `u32::MAX` is retired when freed and never reused.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    /// Slot index of this node.
    pub const fn index(self) -> u32 {
        self.0
    }

    /// Generation of the slot when this identifier was handed out.
    pub const fn generation(self) -> u32 {
        self.1
    }
}

impl core::fmt::Display for NodeId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{}v{}", self.0, self.1)
    }
}

/// Errors returned by structural tree operations.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
pub enum TreeError {
    /// The identifier does not refer to a live node (never inserted, or removed).
    #[error("node {0} is not alive in this tree")]
    UnknownNode(NodeId),
    /// Reparenting would make a node its own ancestor.
    #[error("cannot move node {node} under {new_parent}: it would become its own ancestor")]
    Cycle {
        /// Node being moved.
        node: NodeId,
        /// Requested parent, which is `node` itself or one of its descendants.
        new_parent: NodeId,
    },
}
