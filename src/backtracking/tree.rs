// Copyright (C) 2025 Jeremy J. Carroll. See LICENSE for details.

//! Recursion tree built alongside a backtracking trace.
//!
//! Every recursive call becomes one node, appended to its parent's children
//! at the moment the call begins. Nodes live in an arena owned by the tree;
//! a [`NodeId`] is a non-owning handle into it, so looking up a parent is a
//! direct index rather than a walk from the root. A second registry maps the
//! rendered string id back to its handle for consumers that only hold the
//! string form.

use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

/// Handle to a node in a [`RecursionTree`].
///
/// Renders as `"root"` for the synthetic root and `"call-N"` otherwise. Ids
/// are assigned sequentially, so two generations over the same input
/// produce identical ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);

    pub fn index(self) -> usize {
        self.0
    }

    pub fn is_root(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            write!(f, "root")
        } else {
            write!(f, "call-{}", self.0)
        }
    }
}

impl Serialize for NodeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone)]
struct TreeEntry {
    name: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Arena-backed recursion tree with O(1) parent lookup.
#[derive(Debug, Clone)]
pub struct RecursionTree {
    entries: Vec<TreeEntry>,
    registry: HashMap<String, NodeId>,
}

/// Owned nested form, as handed to a tree renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecursionTreeNode {
    pub id: String,
    pub name: String,
    pub children: Vec<RecursionTreeNode>,
}

impl RecursionTree {
    /// A tree holding only the root, labelled with the problem name.
    pub fn new(root_name: impl Into<String>) -> Self {
        let mut registry = HashMap::new();
        registry.insert(NodeId::ROOT.to_string(), NodeId::ROOT);
        RecursionTree {
            entries: vec![TreeEntry {
                name: root_name.into(),
                parent: None,
                children: Vec::new(),
            }],
            registry,
        }
    }

    /// Append a new child under `parent` and return its handle.
    pub fn add_child(&mut self, parent: NodeId, name: impl Into<String>) -> NodeId {
        let id = NodeId(self.entries.len());
        self.entries.push(TreeEntry {
            name: name.into(),
            parent: Some(parent),
            children: Vec::new(),
        });
        self.entries[parent.0].children.push(id);
        self.registry.insert(id.to_string(), id);
        id
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve a rendered id such as `"call-7"`.
    pub fn find(&self, id: &str) -> Option<NodeId> {
        self.registry.get(id).copied()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        id.0 < self.entries.len()
    }

    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.entries.get(id.0).map(|entry| entry.name.as_str())
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.entries.get(id.0).and_then(|entry| entry.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.entries
            .get(id.0)
            .map(|entry| entry.children.as_slice())
            .unwrap_or(&[])
    }

    /// Distance from the root.
    pub fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut current = id;
        while let Some(parent) = self.parent(current) {
            depth += 1;
            current = parent;
        }
        depth
    }

    /// Materialize the nested form.
    ///
    /// Uses an explicit stack; deep searches (a 64-square tour) would
    /// otherwise recurse once per level.
    pub fn to_nested(&self) -> RecursionTreeNode {
        let mut built: Vec<Option<RecursionTreeNode>> = vec![None; self.entries.len()];
        // Children always have larger indices than their parent, so a
        // reverse sweep sees every child before its parent.
        for index in (0..self.entries.len()).rev() {
            let entry = &self.entries[index];
            let children = entry
                .children
                .iter()
                .filter_map(|child| built[child.0].take())
                .collect();
            built[index] = Some(RecursionTreeNode {
                id: NodeId(index).to_string(),
                name: entry.name.clone(),
                children,
            });
        }
        built[0].take().unwrap_or_else(|| RecursionTreeNode {
            id: NodeId::ROOT.to_string(),
            name: String::new(),
            children: Vec::new(),
        })
    }
}

impl Serialize for RecursionTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_nested().serialize(serializer)
    }
}

impl RecursionTreeNode {
    /// Total nodes in this subtree.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(RecursionTreeNode::count).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn children_keep_insertion_order() {
        let mut tree = RecursionTree::new("Demo");
        let a = tree.add_child(NodeId::ROOT, "Row 0");
        let b = tree.add_child(a, "Row 1");
        let c = tree.add_child(a, "Row 1");

        assert_eq!(tree.children(a), &[b, c]);
        assert_eq!(tree.parent(c), Some(a));
        assert_eq!(tree.depth(c), 2);
        assert_eq!(tree.find("call-3"), Some(c));
        assert_eq!(tree.find("root"), Some(NodeId::ROOT));
        assert_eq!(tree.find("call-9"), None);
    }

    #[test]
    fn nested_form_mirrors_the_arena() {
        let mut tree = RecursionTree::new("Demo");
        let a = tree.add_child(NodeId::ROOT, "A");
        tree.add_child(a, "A1");
        tree.add_child(NodeId::ROOT, "B");

        let nested = tree.to_nested();
        assert_eq!(nested.id, "root");
        assert_eq!(nested.name, "Demo");
        assert_eq!(nested.count(), 4);
        assert_eq!(nested.children[0].name, "A");
        assert_eq!(nested.children[0].children[0].id, "call-2");
        assert_eq!(nested.children[1].id, "call-3");
    }

    #[test]
    fn serializes_as_nested_json() {
        let mut tree = RecursionTree::new("Demo");
        tree.add_child(NodeId::ROOT, "A");
        let json = serde_json::to_value(&tree).unwrap();
        assert_eq!(json["id"], "root");
        assert_eq!(json["children"][0]["id"], "call-1");
        assert_eq!(json["children"][0]["name"], "A");
    }
}
