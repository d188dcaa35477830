use generational_arena::{Arena, Index};
use std::collections::HashMap;
use tracing::{debug, instrument};

use crate::domain::error::{TreeError, TreeResult};
use crate::domain::iter::{Ancestors, PostOrderIterator, TreeIterator};

/// Handle to a node inside a [`TreeArena`].
///
/// Generational: once a node is removed its handle never resolves again,
/// even if the slot gets reused.
pub type NodeId = Index;

/// Tree node in the arena-based hierarchy structure.
///
/// Links are private so that only [`TreeArena`] can change them; this is what
/// keeps `parent` and `children` symmetric.
#[derive(Debug, Clone)]
pub struct TreeNode<V> {
    /// Payload held by this node
    value: V,
    /// Index of parent node in the arena, None for root nodes
    parent: Option<NodeId>,
    /// Indices of child nodes in the arena, in sibling order
    children: Vec<NodeId>,
}

impl<V> TreeNode<V> {
    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Arena-based forest of nodes.
///
/// Every node is created as a standalone root and joins other nodes through
/// [`add_child`](Self::add_child) or [`set_parent`](Self::set_parent).
/// Invariants after every public call:
/// - `c` is listed in `p.children` iff `c.parent == Some(p)`
/// - no node is its own ancestor
/// - a node is listed in at most one child list
/// - child order only changes by explicit attach/detach
#[derive(Debug)]
pub struct TreeArena<V> {
    arena: Arena<TreeNode<V>>,
}

impl<V> Default for TreeArena<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> TreeArena<V> {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
        }
    }

    /// Creates a standalone root node holding `value`.
    #[instrument(level = "trace", skip(self, value))]
    pub fn insert(&mut self, value: V) -> NodeId {
        self.arena.insert(TreeNode {
            value,
            parent: None,
            children: Vec::new(),
        })
    }

    #[instrument(level = "trace", skip(self))]
    pub fn get_node(&self, id: NodeId) -> TreeResult<&TreeNode<V>> {
        self.arena.get(id).ok_or(TreeError::NodeNotFound(id))
    }

    fn node_mut(&mut self, id: NodeId) -> TreeResult<&mut TreeNode<V>> {
        self.arena.get_mut(id).ok_or(TreeError::NodeNotFound(id))
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.arena.contains(id)
    }

    /// Number of live nodes across all trees of the arena.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// All root nodes, in arena slot order.
    pub fn roots(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.arena
            .iter()
            .filter(|(_, node)| node.is_root())
            .map(|(idx, _)| idx)
    }

    pub fn value(&self, id: NodeId) -> TreeResult<&V> {
        Ok(&self.get_node(id)?.value)
    }

    pub fn value_mut(&mut self, id: NodeId) -> TreeResult<&mut V> {
        Ok(&mut self.node_mut(id)?.value)
    }

    /// Replaces the payload and returns the previous one.
    pub fn set_value(&mut self, id: NodeId, value: V) -> TreeResult<V> {
        Ok(std::mem::replace(&mut self.node_mut(id)?.value, value))
    }

    pub fn parent(&self, id: NodeId) -> TreeResult<Option<NodeId>> {
        Ok(self.get_node(id)?.parent)
    }

    pub fn children(&self, id: NodeId) -> TreeResult<&[NodeId]> {
        Ok(&self.get_node(id)?.children)
    }

    pub fn is_root(&self, id: NodeId) -> TreeResult<bool> {
        Ok(self.get_node(id)?.is_root())
    }

    pub fn is_leaf(&self, id: NodeId) -> TreeResult<bool> {
        Ok(self.get_node(id)?.is_leaf())
    }

    /// `id` is a direct child of `other`.
    pub fn is_child_of(&self, id: NodeId, other: NodeId) -> TreeResult<bool> {
        self.get_node(other)?;
        Ok(self.get_node(id)?.parent == Some(other))
    }

    /// `other` is a direct child of `id`.
    pub fn is_parent_of(&self, id: NodeId, other: NodeId) -> TreeResult<bool> {
        self.get_node(other)?;
        Ok(self.get_node(id)?.children.contains(&other))
    }

    /// Parent links from `id` upwards, parent first. `id` itself is not yielded.
    pub fn ancestors(&self, id: NodeId) -> TreeResult<Ancestors<'_, V>> {
        let start = self.get_node(id)?.parent;
        Ok(Ancestors::new(self, start))
    }

    #[instrument(level = "trace", skip(self))]
    pub fn is_descendant_of(&self, id: NodeId, other: NodeId) -> TreeResult<bool> {
        self.get_node(other)?;
        Ok(self.ancestors(id)?.any(|ancestor| ancestor == other))
    }

    pub fn is_ancestor_of(&self, id: NodeId, other: NodeId) -> TreeResult<bool> {
        self.is_descendant_of(other, id)
    }

    pub fn previous_sibling(&self, id: NodeId) -> TreeResult<Option<NodeId>> {
        Ok(self
            .sibling_position(id)?
            .and_then(|(siblings, index)| index.checked_sub(1).map(|i| siblings[i])))
    }

    pub fn next_sibling(&self, id: NodeId) -> TreeResult<Option<NodeId>> {
        Ok(self
            .sibling_position(id)?
            .and_then(|(siblings, index)| siblings.get(index + 1).copied()))
    }

    fn sibling_position(&self, id: NodeId) -> TreeResult<Option<(&[NodeId], usize)>> {
        let Some(parent) = self.get_node(id)?.parent else {
            return Ok(None);
        };
        let siblings = &self
            .arena
            .get(parent)
            .ok_or(TreeError::TreeIntegrity(id))?
            .children;
        let index = siblings
            .iter()
            .position(|&sibling| sibling == id)
            .ok_or(TreeError::TreeIntegrity(id))?;
        Ok(Some((siblings.as_slice(), index)))
    }

    pub fn root_of(&self, id: NodeId) -> TreeResult<NodeId> {
        Ok(self.ancestors(id)?.last().unwrap_or(id))
    }

    /// Number of ancestors; a root is at level 0.
    pub fn level(&self, id: NodeId) -> TreeResult<usize> {
        Ok(self.ancestors(id)?.count())
    }

    /// Intermediate nodes on the tree path from `from` to `to`, endpoints excluded.
    ///
    /// Climbs from `from` to the lowest common ancestor, then descends to `to`.
    /// The common ancestor is part of the path unless it is one of the endpoints.
    #[instrument(level = "debug", skip(self))]
    pub fn nodes_along_path(&self, from: NodeId, to: NodeId) -> TreeResult<Vec<NodeId>> {
        if from == to || self.is_parent_of(from, to)? || self.is_child_of(from, to)? {
            return Ok(Vec::new());
        }

        let upward: Vec<NodeId> = std::iter::once(from).chain(self.ancestors(from)?).collect();
        let downward: Vec<NodeId> = std::iter::once(to).chain(self.ancestors(to)?).collect();
        let down_positions: HashMap<NodeId, usize> = downward
            .iter()
            .enumerate()
            .map(|(position, &idx)| (idx, position))
            .collect();

        let (up_idx, down_idx) = upward
            .iter()
            .enumerate()
            .find_map(|(position, idx)| down_positions.get(idx).map(|&d| (position, d)))
            .ok_or(TreeError::DisjointNodes { from, to })?;

        let common = upward[up_idx];
        let upward_len = if common == to { up_idx - 1 } else { up_idx };

        let mut path: Vec<NodeId> = upward.iter().skip(1).take(upward_len).copied().collect();
        path.extend(downward.iter().take(down_idx).skip(1).rev());
        Ok(path)
    }

    /// Moves `id` under `new_parent`, or detaches it when `None`.
    ///
    /// Re-setting the current parent keeps the node at its position.
    #[instrument(level = "debug", skip(self))]
    pub fn set_parent(&mut self, id: NodeId, new_parent: Option<NodeId>) -> TreeResult<()> {
        match new_parent {
            Some(parent) => self.add_child(parent, id),
            None => {
                self.get_node(id)?;
                self.detach(id);
                Ok(())
            }
        }
    }

    /// Appends `child` to the children of `parent`, detaching it from its
    /// previous parent first. A child that is already listed stays put.
    #[instrument(level = "debug", skip(self))]
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> TreeResult<()> {
        self.ensure_can_attach(child, parent)?;
        if self.get_node(child)?.parent == Some(parent) {
            return Ok(());
        }
        self.detach(child);
        self.attach(parent, child);
        Ok(())
    }

    /// Detaches `child` if it is listed under `parent`; otherwise does nothing.
    #[instrument(level = "debug", skip(self))]
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> TreeResult<()> {
        if self.is_parent_of(parent, child)? {
            self.detach(child);
        }
        Ok(())
    }

    /// Destroys `id` and its whole subtree. Returns the number of removed nodes.
    #[instrument(level = "debug", skip(self))]
    pub fn remove(&mut self, id: NodeId) -> TreeResult<usize> {
        self.get_node(id)?;
        self.detach(id);
        let subtree: Vec<NodeId> = self.iter(id)?.map(|(idx, _)| idx).collect();
        for idx in &subtree {
            self.arena.remove(*idx);
        }
        debug!(removed = subtree.len(), "subtree removed");
        Ok(subtree.len())
    }

    fn ensure_can_attach(&self, child: NodeId, parent: NodeId) -> TreeResult<()> {
        self.get_node(child)?;
        self.get_node(parent)?;
        if child == parent || self.is_descendant_of(parent, child)? {
            debug!(?child, ?parent, "attach rejected: cyclic reference");
            return Err(TreeError::CyclicReference {
                node: child,
                parent,
            });
        }
        Ok(())
    }

    // Callers have checked both handles.
    fn attach(&mut self, parent: NodeId, child: NodeId) {
        if let Some(node) = self.arena.get_mut(parent) {
            node.children.push(child);
        }
        if let Some(node) = self.arena.get_mut(child) {
            node.parent = Some(parent);
        }
    }

    fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.arena.get_mut(id).and_then(|node| node.parent.take()) else {
            return;
        };
        if let Some(node) = self.arena.get_mut(parent) {
            node.children.retain(|&child| child != id);
        }
    }

    /// Pre-order traversal of the subtree rooted at `id`.
    #[instrument(level = "trace", skip(self))]
    pub fn iter(&self, id: NodeId) -> TreeResult<TreeIterator<'_, V>> {
        self.get_node(id)?;
        Ok(TreeIterator::new(self, id))
    }

    /// Post-order traversal of the subtree rooted at `id`.
    #[instrument(level = "trace", skip(self))]
    pub fn iter_postorder(&self, id: NodeId) -> TreeResult<PostOrderIterator<'_, V>> {
        self.get_node(id)?;
        Ok(PostOrderIterator::new(self, id))
    }

    /// Height of the subtree rooted at `id`; a leaf has depth 1.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self, id: NodeId) -> TreeResult<usize> {
        let mut max_depth = 0;
        let mut stack = vec![(self.get_node(id)?, 1)];

        while let Some((node, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            for &child in &node.children {
                if let Some(child_node) = self.arena.get(child) {
                    stack.push((child_node, depth + 1));
                }
            }
        }

        Ok(max_depth)
    }

    /// Collects all leaf nodes of the subtree rooted at `id`, left to right.
    #[instrument(level = "debug", skip(self))]
    pub fn leaf_nodes(&self, id: NodeId) -> TreeResult<Vec<NodeId>> {
        Ok(self
            .iter(id)?
            .filter(|(_, node)| node.is_leaf())
            .map(|(idx, _)| idx)
            .collect())
    }
}
