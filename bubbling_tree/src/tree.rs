// Copyright 2025 the Bubbling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: slots, structure updates, and ancestry queries.

use alloc::vec::Vec;

use crate::types::{NodeId, TreeError};

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Arena of nodes carrying user data `T`.
///
/// Nodes are addressed by generational [`NodeId`]s. Each node stores its parent as a plain
/// identifier, so the parent never owns the child beyond tree membership and no reference
/// cycles exist.
pub struct Tree<T> {
    nodes: Vec<Option<Node<T>>>, // slots
    generations: Vec<u32>,       // last generation per slot (persists across frees)
    free_list: Vec<usize>,
    len: usize,
}

impl<T> core::fmt::Debug for Tree<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tree")
            .field("nodes_total", &self.nodes.len())
            .field("nodes_alive", &self.len)
            .field("free_list", &self.free_list.len())
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Debug)]
struct Node<T> {
    generation: u32,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    data: T,
}

impl<T> Node<T> {
    fn new(generation: u32, data: T) -> Self {
        Self {
            generation,
            parent: None,
            children: Vec::new(),
            data,
        }
    }
}

impl<T> Tree<T> {
    /// Create a new empty tree.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            len: 0,
        }
    }

    /// Insert a new node as the last child of `parent` (or as a root if `None`).
    ///
    /// Fails with [`TreeError::UnknownNode`] if `parent` is stale.
    pub fn insert(&mut self, parent: Option<NodeId>, data: T) -> Result<NodeId, TreeError> {
        if let Some(p) = parent
            && !self.is_alive(p)
        {
            return Err(TreeError::UnknownNode(p));
        }
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            // Slots on the free list are below `u32::MAX`; see `remove`.
            let generation = self.generations[idx] + 1;
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, data));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node::new(generation, data)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        let id = NodeId::new(idx, generation);
        self.len += 1;
        if let Some(p) = parent {
            self.link_parent(id, p);
        }
        Ok(id)
    }

    /// Remove a node and its whole subtree.
    ///
    /// Returns `false` (and does nothing) if `id` is stale.
    pub fn remove(&mut self, id: NodeId) -> bool {
        if !self.is_alive(id) {
            return false;
        }
        if let Some(parent) = self.parent(id) {
            self.unlink_parent(id, parent);
        }
        let mut stack = Vec::from([id]);
        while let Some(cur) = stack.pop() {
            if let Some(node) = self.nodes[cur.idx()].take() {
                stack.extend(node.children);
                // A slot whose generation is exhausted is retired for good.
                if self.generations[cur.idx()] < u32::MAX {
                    self.free_list.push(cur.idx());
                }
                self.len -= 1;
            }
        }
        true
    }

    /// Move `id` (with its subtree) to the end of `new_parent`'s children, or make it a root.
    pub fn reparent(&mut self, id: NodeId, new_parent: Option<NodeId>) -> Result<(), TreeError> {
        if !self.is_alive(id) {
            return Err(TreeError::UnknownNode(id));
        }
        if let Some(p) = new_parent {
            if !self.is_alive(p) {
                return Err(TreeError::UnknownNode(p));
            }
            if p == id || self.is_ancestor(id, p) {
                return Err(TreeError::Cycle {
                    node: id,
                    new_parent: p,
                });
            }
        }
        if let Some(parent) = self.parent(id) {
            self.unlink_parent(id, parent);
        }
        if let Some(p) = new_parent {
            self.link_parent(id, p);
        }
        Ok(())
    }

    /// Returns true if `id` refers to a live node.
    ///
    /// A `NodeId` is considered live if its slot exists and its generation matches
    /// the current generation stored in that slot.
    /// See [`NodeId`] docs for the generational semantics.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.node_opt(id).is_some()
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the tree has no live nodes.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Parent of `id`, or `None` for roots and stale ids.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node_opt(id)?.parent
    }

    /// Children of `id` in insertion order; empty for stale ids.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node_opt(id).map_or(&[], |n| n.children.as_slice())
    }

    /// User data of a live node.
    pub fn data(&self, id: NodeId) -> Option<&T> {
        self.node_opt(id).map(|n| &n.data)
    }

    /// Mutable user data of a live node.
    pub fn data_mut(&mut self, id: NodeId) -> Option<&mut T> {
        self.node_opt_mut(id).map(|n| &mut n.data)
    }

    /// Iterate live root nodes in slot order.
    pub fn roots(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().enumerate().filter_map(|(i, n)| match n {
            Some(n) if n.parent.is_none() => {
                #[allow(
                    clippy::cast_possible_truncation,
                    reason = "NodeId uses 32-bit indices by design."
                )]
                Some(NodeId::new(i as u32, n.generation))
            }
            _ => None,
        })
    }

    /// Walk from `id` up to its root, inclusive on both ends.
    ///
    /// Yields nothing if `id` is stale.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_, T> {
        Ancestors {
            tree: self,
            next: self.is_alive(id).then_some(id),
        }
    }

    /// Root→`id` path (inclusive); empty if `id` is stale.
    pub fn path_from_root(&self, id: NodeId) -> Vec<NodeId> {
        let mut out: Vec<NodeId> = self.ancestors(id).collect();
        out.reverse();
        out
    }

    /// Number of strict ancestors of `id` (roots have depth 0).
    pub fn depth(&self, id: NodeId) -> Option<usize> {
        if !self.is_alive(id) {
            return None;
        }
        Some(self.ancestors(id).count() - 1)
    }

    /// Returns true if `ancestor` is a strict ancestor of `node`.
    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        self.ancestors(node).skip(1).any(|a| a == ancestor)
    }

    // --- internals ---

    fn node_opt(&self, id: NodeId) -> Option<&Node<T>> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        (n.generation == id.1).then_some(n)
    }

    fn node_opt_mut(&mut self, id: NodeId) -> Option<&mut Node<T>> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    fn link_parent(&mut self, id: NodeId, parent: NodeId) {
        debug_assert!(self.is_alive(parent), "linking under a stale parent");
        if let Some(p) = self.node_opt_mut(parent) {
            p.children.push(id);
        }
        if let Some(n) = self.node_opt_mut(id) {
            n.parent = Some(parent);
        }
    }

    fn unlink_parent(&mut self, id: NodeId, parent: NodeId) {
        if let Some(p) = self.node_opt_mut(parent) {
            p.children.retain(|c| *c != id);
        }
        if let Some(n) = self.node_opt_mut(id) {
            n.parent = None;
        }
    }
}

/// Iterator over a node and its ancestors, innermost first.
///
/// Returned by [`Tree::ancestors`].
#[derive(Clone, Debug)]
pub struct Ancestors<'a, T> {
    tree: &'a Tree<T>,
    next: Option<NodeId>,
}

impl<T> Iterator for Ancestors<'_, T> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let cur = self.next?;
        self.next = self.tree.parent(cur);
        Some(cur)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn chain() -> (Tree<&'static str>, NodeId, NodeId, NodeId) {
        let mut tree = Tree::new();
        let root = tree.insert(None, "root").unwrap();
        let p = tree.insert(Some(root), "p").unwrap();
        let button = tree.insert(Some(p), "button").unwrap();
        (tree, root, p, button)
    }

    #[test]
    fn insert_links_parent_and_children() {
        let (tree, root, p, button) = chain();
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.parent(button), Some(p));
        assert_eq!(tree.parent(p), Some(root));
        assert_eq!(tree.parent(root), None);
        assert_eq!(tree.children(root), &[p]);
        assert_eq!(tree.data(button), Some(&"button"));
    }

    #[test]
    fn children_keep_insertion_order() {
        let mut tree = Tree::new();
        let root = tree.insert(None, 0).unwrap();
        let a = tree.insert(Some(root), 1).unwrap();
        let b = tree.insert(Some(root), 2).unwrap();
        let c = tree.insert(Some(root), 3).unwrap();
        assert_eq!(tree.children(root), &[a, b, c]);
    }

    #[test]
    fn insert_under_stale_parent_fails() {
        let mut tree = Tree::new();
        let root = tree.insert(None, ()).unwrap();
        assert!(tree.remove(root));
        assert_eq!(
            tree.insert(Some(root), ()),
            Err(TreeError::UnknownNode(root))
        );
        assert!(tree.is_empty());
    }

    #[test]
    fn ancestors_walk_target_to_root() {
        let (tree, root, p, button) = chain();
        let walked: Vec<_> = tree.ancestors(button).collect();
        assert_eq!(walked, vec![button, p, root]);
        assert_eq!(tree.path_from_root(button), vec![root, p, button]);
        assert_eq!(tree.depth(button), Some(2));
        assert_eq!(tree.depth(root), Some(0));
        assert!(tree.is_ancestor(root, button));
        assert!(!tree.is_ancestor(button, button));
    }

    #[test]
    fn remove_drops_whole_subtree() {
        let (mut tree, root, p, button) = chain();
        let sibling = tree.insert(Some(root), "span").unwrap();
        assert!(tree.remove(p));
        assert!(!tree.is_alive(p));
        assert!(!tree.is_alive(button));
        assert!(tree.is_alive(sibling));
        assert_eq!(tree.children(root), &[sibling]);
        assert_eq!(tree.len(), 2);
        assert!(!tree.remove(p), "second remove is a no-op");
        assert_eq!(tree.ancestors(button).count(), 0);
        assert!(tree.path_from_root(button).is_empty());
    }

    #[test]
    fn liveness_insert_remove_reuse() {
        let mut tree = Tree::new();
        let root = tree.insert(None, ()).unwrap();
        let a = tree.insert(Some(root), ()).unwrap();
        assert!(tree.is_alive(a));

        tree.remove(a);
        assert!(!tree.is_alive(a));

        // Reuse the slot; old id must remain stale; new id is live.
        let b = tree.insert(Some(root), ()).unwrap();
        assert!(tree.is_alive(b));
        assert!(!tree.is_alive(a));
        assert_eq!(a.index(), b.index(), "freed slot should be reused");
        assert!(b.generation() > a.generation(), "generation must increase on reuse");
        assert_eq!(tree.data(a), None);
    }

    #[test]
    fn reparent_moves_subtree() {
        let (mut tree, root, p, button) = chain();
        let div = tree.insert(Some(root), "div").unwrap();
        tree.reparent(p, Some(div)).unwrap();
        assert_eq!(tree.children(root), &[div]);
        assert_eq!(tree.children(div), &[p]);
        assert_eq!(tree.path_from_root(button), vec![root, div, p, button]);

        tree.reparent(p, None).unwrap();
        assert_eq!(tree.parent(p), None);
        let roots: Vec<_> = tree.roots().collect();
        assert_eq!(roots, vec![root, p]);
    }

    #[test]
    fn reparent_rejects_cycles_and_stale_ids() {
        let (mut tree, root, p, button) = chain();
        assert_eq!(
            tree.reparent(root, Some(button)),
            Err(TreeError::Cycle {
                node: root,
                new_parent: button
            })
        );
        assert_eq!(
            tree.reparent(p, Some(p)),
            Err(TreeError::Cycle {
                node: p,
                new_parent: p
            })
        );
        let gone = tree.insert(None, "gone").unwrap();
        tree.remove(gone);
        assert_eq!(
            tree.reparent(gone, Some(root)),
            Err(TreeError::UnknownNode(gone))
        );
        assert_eq!(
            tree.reparent(p, Some(gone)),
            Err(TreeError::UnknownNode(gone))
        );
        // Structure untouched by the failed calls.
        assert_eq!(tree.path_from_root(button), vec![root, p, button]);
    }

    #[test]
    fn exhausted_slot_is_retired_instead_of_reused() {
        let mut tree = Tree::new();
        let first = tree.insert(None, "a").unwrap();
        assert!(tree.remove(first));
        tree.generations[first.idx()] = u32::MAX - 1;

        let last = tree.insert(None, "b").unwrap();
        assert_eq!(last.index(), first.index());
        assert_eq!(last.generation(), u32::MAX);
        assert!(tree.remove(last));

        let fresh = tree.insert(None, "c").unwrap();
        assert_ne!(fresh.index(), last.index());
        assert!(!tree.is_alive(last));
        assert!(tree.is_alive(fresh));
    }

    #[test]
    fn data_mut_updates_in_place() {
        let mut tree = Tree::new();
        let n = tree.insert(None, 1_u32).unwrap();
        *tree.data_mut(n).unwrap() += 41;
        assert_eq!(tree.data(n), Some(&42));
    }
}
