// Copyright 2025 the Bubbling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bubbling Tree: a `no_std` node arena with generational identifiers.
//!
//! This crate holds the structure that event propagation walks: a hierarchy of nodes, each with
//! an ordered list of children and a non-owning link to its parent.
//! It knows nothing about events; [`Tree`] is generic over the data stored at each node.
//!
//! - Nodes live in slots and are addressed by [`NodeId`] (slot index + generation).
//! - Parents are stored as identifiers, so there are no reference cycles and no `Rc`/`Weak` pairs.
//! - Structural operations validate identifiers and report [`TreeError`] instead of panicking.
//!
//! ## API overview
//!
//! - [`Tree::insert`] → [`NodeId`]
//! - [`Tree::remove`] drops a node with its subtree.
//! - [`Tree::reparent`] moves a subtree; cycles are rejected.
//! - [`Tree::ancestors`] walks target → root, the order bubbling uses.
//! - [`Tree::path_from_root`] returns root → target, the order capturing uses.
//!
//! ## Minimal usage
//!
//! ```
//! use bubbling_tree::Tree;
//!
//! let mut tree = Tree::new();
//! let document = tree.insert(None, "document").unwrap();
//! let paragraph = tree.insert(Some(document), "p").unwrap();
//! let button = tree.insert(Some(paragraph), "button").unwrap();
//!
//! let path: Vec<_> = tree.ancestors(button).map(|id| *tree.data(id).unwrap()).collect();
//! assert_eq!(path, ["button", "p", "document"]);
//!
//! tree.remove(paragraph);
//! assert!(!tree.is_alive(button));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod tree;
mod types;

pub use tree::{Ancestors, Tree};
pub use types::{NodeId, TreeError};
