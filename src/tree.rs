//! Directory aggregation tree.
//!
//! Every scanned file bumps the counter of each directory node on its way
//! down from the root, so a node's `count` is the number of files at or
//! below it. Nodes live in an arena and refer to each other by [`NodeId`]:
//! a parent owns its children through the arena, a child only remembers the
//! index of its parent for climbing.
//!
//! The tree itself is not synchronized. The scan pipeline keeps it behind a
//! single lock together with the record list (see [`crate::scan`]).

use fnv::FnvHashMap;

/// Index of a node inside a [`DirTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// One directory level.
#[derive(Debug, Clone)]
pub struct DirNode {
    /// Segment name; empty for the root.
    pub name: String,
    /// Number of files whose path passes through this node.
    pub count: usize,
    pub parent: Option<NodeId>,
    /// Child segment name to child node, case-sensitive as scanned.
    pub children: FnvHashMap<String, NodeId>,
}

impl DirNode {
    fn new(name: &str, parent: Option<NodeId>) -> Self {
        Self {
            name: name.to_string(),
            count: 0,
            parent,
            children: FnvHashMap::default(),
        }
    }
}

/// Arena-backed directory tree with a single root.
#[derive(Debug, Clone)]
pub struct DirTree {
    nodes: Vec<DirNode>,
}

impl Default for DirTree {
    fn default() -> Self {
        Self::new()
    }
}

impl DirTree {
    pub fn new() -> Self {
        Self {
            nodes: vec![DirNode::new("", None)],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn node(&self, id: NodeId) -> &DirNode {
        &self.nodes[id.0]
    }

    pub fn count(&self, id: NodeId) -> usize {
        self.nodes[id.0].count
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// Total number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        // The root always exists.
        false
    }

    /// Number of edges between `id` and the root.
    pub fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut cur = id;
        while let Some(parent) = self.parent(cur) {
            depth += 1;
            cur = parent;
        }
        depth
    }

    /// Descends from the root through `dir_segs`, creating missing nodes, and
    /// increments the count of the root and of every node visited.
    ///
    /// Returns the node reached by the last segment (the root for no segments).
    pub fn insert<S: AsRef<str>>(&mut self, dir_segs: &[S]) -> NodeId {
        let mut cur = self.root();
        self.nodes[cur.0].count += 1;

        for seg in dir_segs {
            let seg = seg.as_ref();
            let next = match self.nodes[cur.0].children.get(seg) {
                Some(&child) => child,
                None => {
                    let child = NodeId(self.nodes.len());
                    self.nodes.push(DirNode::new(seg, Some(cur)));
                    self.nodes[cur.0].children.insert(seg.to_string(), child);
                    child
                }
            };
            cur = next;
            self.nodes[cur.0].count += 1;
        }

        cur
    }

    /// Looks up an existing node by its segments below the root.
    pub fn find<S: AsRef<str>>(&self, dir_segs: &[S]) -> Option<NodeId> {
        dir_segs.iter().try_fold(self.root(), |cur, seg| {
            self.nodes[cur.0].children.get(seg.as_ref()).copied()
        })
    }

    /// Picks the group anchor for a file whose directory node is `start`.
    ///
    /// Climbs toward the root while the current node's count is below
    /// `threshold` and the node still has a great-grandparent. Climbing
    /// therefore never lands on the root or on a depth-1 node.
    pub fn pick_group(&self, start: NodeId, threshold: usize) -> NodeId {
        let mut cur = start;
        while self.count(cur) < threshold {
            let Some(parent) = self.parent(cur) else { break };
            let Some(grandparent) = self.parent(parent) else { break };
            if self.parent(grandparent).is_none() {
                break;
            }
            cur = parent;
        }

        if self.parent(cur).is_none() {
            return start;
        }
        cur
    }

    /// Group key of a node: segment names from the top level down to `id`,
    /// joined with `_`. The root maps to `"root"`.
    pub fn node_key(&self, id: NodeId) -> String {
        if self.parent(id).is_none() {
            return "root".to_string();
        }

        let mut parts = Vec::new();
        let mut cur = id;
        while let Some(parent) = self.parent(cur) {
            parts.push(self.nodes[cur.0].name.as_str());
            cur = parent;
        }
        parts.reverse();
        parts.join("_")
    }
}
