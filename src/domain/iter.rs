//! Stack-based traversals over a [`TreeArena`].

use crate::domain::arena::{NodeId, TreeArena, TreeNode};

/// Walks parent links upwards.
pub struct Ancestors<'a, V> {
    arena: &'a TreeArena<V>,
    next: Option<NodeId>,
}

impl<'a, V> Ancestors<'a, V> {
    pub(crate) fn new(arena: &'a TreeArena<V>, start: Option<NodeId>) -> Self {
        Self { arena, next: start }
    }
}

impl<V> Iterator for Ancestors<'_, V> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self
            .arena
            .get_node(current)
            .ok()
            .and_then(|node| node.parent());
        Some(current)
    }
}

/// Pre-order, left-to-right.
pub struct TreeIterator<'a, V> {
    arena: &'a TreeArena<V>,
    stack: Vec<NodeId>,
}

impl<'a, V> TreeIterator<'a, V> {
    pub(crate) fn new(arena: &'a TreeArena<V>, start: NodeId) -> Self {
        Self {
            arena,
            stack: vec![start],
        }
    }
}

impl<'a, V> Iterator for TreeIterator<'a, V> {
    type Item = (NodeId, &'a TreeNode<V>);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Ok(node) = self.arena.get_node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                self.stack.extend(node.children().iter().rev());
                return Some((current_idx, node));
            }
        }
        None
    }
}

/// Post-order: every node after all of its descendants.
pub struct PostOrderIterator<'a, V> {
    arena: &'a TreeArena<V>,
    stack: Vec<(NodeId, bool)>,
}

impl<'a, V> PostOrderIterator<'a, V> {
    pub(crate) fn new(arena: &'a TreeArena<V>, start: NodeId) -> Self {
        Self {
            arena,
            stack: vec![(start, false)],
        }
    }
}

impl<'a, V> Iterator for PostOrderIterator<'a, V> {
    type Item = (NodeId, &'a TreeNode<V>);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current_idx, visited)) = self.stack.pop() {
            if let Ok(node) = self.arena.get_node(current_idx) {
                if visited {
                    return Some((current_idx, node));
                }
                self.stack.push((current_idx, true));
                for &child in node.children().iter().rev() {
                    self.stack.push((child, false));
                }
            }
        }
        None
    }
}
