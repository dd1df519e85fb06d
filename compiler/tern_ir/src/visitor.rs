//! Pre-order traversal cursor.
//!
//! Declaration passes annotate nodes while they walk, and some (imports)
//! append whole new files to the forest mid-walk. A borrowing iterator
//! cannot do that, so traversal state lives in an explicit stack and the
//! caller decides per node whether to descend.

use crate::{NodeId, SyntaxForest};

/// Whether a traversal should enter the children of the node just visited.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum WalkControl {
    Descend,
    Skip,
}

/// Depth-first, left-to-right cursor over one tree of the forest.
#[derive(Clone, Debug)]
pub struct Walk {
    stack: Vec<NodeId>,
}

impl Walk {
    pub fn new(root: NodeId) -> Self {
        Walk { stack: vec![root] }
    }

    /// Next node in pre-order, or `None` when the tree is exhausted.
    pub fn next(
        &mut self,
        forest: &SyntaxForest,
        previous: Option<(NodeId, WalkControl)>,
    ) -> Option<NodeId> {
        if let Some((id, WalkControl::Descend)) = previous {
            self.descend(forest, id);
        }
        self.stack.pop()
    }

    /// Schedule the children of `id` to be visited next, in order.
    pub fn descend(&mut self, forest: &SyntaxForest, id: NodeId) {
        self.stack.extend(forest.children(id).iter().rev().copied());
    }

    pub fn is_done(&self) -> bool {
        self.stack.is_empty()
    }
}
