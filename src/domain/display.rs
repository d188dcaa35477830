/*
Unicode rendering for humans (`├──`, `└──`) via termtree.
Output of this adapter is not meant to be parsed back; the ascii driver owns the
lossless format.
 */
use std::collections::HashMap;
use std::fmt::Display;

use termtree::Tree;
use tracing::instrument;

use crate::domain::arena::{NodeId, TreeArena};
use crate::domain::error::{TreeError, TreeResult};

pub trait TreeDisplay {
    fn to_tree_string(&self, id: NodeId) -> TreeResult<Tree<String>>;
}

impl<V: Display> TreeDisplay for TreeArena<V> {
    // Built bottom-up from the post-order walk, so no recursion on deep trees.
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self, id: NodeId) -> TreeResult<Tree<String>> {
        let mut built: HashMap<NodeId, Tree<String>> = HashMap::new();

        for (idx, node) in self.iter_postorder(id)? {
            let leaves: Vec<Tree<String>> = node
                .children()
                .iter()
                .filter_map(|child| built.remove(child))
                .collect();
            let label = node.value().to_string().replace('\n', "\\n");
            built.insert(idx, Tree::new(label).with_leaves(leaves));
        }

        built.remove(&id).ok_or(TreeError::NodeNotFound(id))
    }
}
