use std::collections::{HashMap, HashSet};

use crate::error::DuplicateLocator;
use crate::node::{Children, Node};
use crate::NodeId;

/// Storage of one loaded node.
#[derive(Debug, Clone)]
pub(crate) struct NodeData {
    pub(crate) label: String,
    pub(crate) locator: Option<String>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: ChildrenState,
}

/// Child state of a loaded node. `Lazy` becomes `Loaded` exactly once.
#[derive(Debug, Clone)]
pub(crate) enum ChildrenState {
    /// Children were inlined in the tree literal.
    Inline(Vec<NodeId>),
    /// Children live in a group that has not been fetched yet.
    Lazy(String),
    /// Children were fetched from the named group (possibly empty, also used
    /// as the write-once cache after a failed fetch).
    Loaded {
        group: String,
        children: Vec<NodeId>,
    },
}

/// All nodes of a loaded tree, allocated together and referenced by
/// position. Parent links only, no cycles. The locator map is extended as
/// lazy groups are materialized.
#[derive(Debug, Clone, Default)]
pub(crate) struct Arena {
    nodes: Vec<NodeData>,
    roots: Vec<NodeId>,
    by_locator: HashMap<String, NodeId>,
}

impl Arena {
    pub(crate) fn load(roots: Vec<Node>) -> Result<Self, DuplicateLocator> {
        let mut arena = Self::default();
        for node in roots {
            let id = arena.insert_tree(None, node)?;
            arena.roots.push(id);
        }
        Ok(arena)
    }

    /// Insert `node` and its inline descendants, registering every locator.
    ///
    /// Returns the locator that clashed on a duplicate. Callers either abort
    /// construction entirely or pre-validate so this cannot fail.
    pub(crate) fn insert_tree(
        &mut self,
        parent: Option<NodeId>,
        node: Node,
    ) -> Result<NodeId, DuplicateLocator> {
        let Node {
            label,
            locator,
            children,
        } = node;

        let id = NodeId(self.nodes.len());
        if let Some(ref locator) = locator {
            if self.by_locator.contains_key(locator) {
                return Err(DuplicateLocator(locator.clone()));
            }
            self.by_locator.insert(locator.clone(), id);
        }
        self.nodes.push(NodeData {
            label,
            locator,
            parent,
            children: ChildrenState::Inline(Vec::new()),
        });

        match children {
            Children::None => {}
            Children::Inline(children) => {
                let mut child_ids = Vec::with_capacity(children.len());
                for child in children {
                    child_ids.push(self.insert_tree(Some(id), child)?);
                }
                self.nodes[id.0].children = ChildrenState::Inline(child_ids);
            }
            Children::Lazy(group) => {
                self.nodes[id.0].children = ChildrenState::Lazy(group);
            }
        }
        Ok(id)
    }

    /// Check that a fetched subtree introduces no locator that already
    /// exists in the arena and none twice within itself.
    ///
    /// Run before [`insert_tree`](Self::insert_tree) so a rejected group
    /// leaves the arena untouched.
    pub(crate) fn validate_new(&self, nodes: &[Node]) -> Result<(), DuplicateLocator> {
        fn walk<'tree>(
            arena: &Arena,
            seen: &mut HashSet<&'tree str>,
            nodes: &'tree [Node],
        ) -> Result<(), DuplicateLocator> {
            for node in nodes {
                if let Some(locator) = node.locator() {
                    if arena.by_locator.contains_key(locator) || !seen.insert(locator) {
                        return Err(DuplicateLocator(locator.to_owned()));
                    }
                }
                if let Children::Inline(children) = node.children() {
                    walk(arena, seen, children)?;
                }
            }
            Ok(())
        }
        walk(self, &mut HashSet::new(), nodes)
    }

    pub(crate) fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub(crate) fn node(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut NodeData {
        &mut self.nodes[id.0]
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn lookup(&self, locator: &str) -> Option<NodeId> {
        self.by_locator.get(locator).copied()
    }

    /// Path from the root to `id`, inclusive, following parent links.
    pub(crate) fn path_of(&self, id: NodeId) -> Vec<NodeId> {
        let mut path = vec![id];
        let mut current = id;
        while let Some(parent) = self.node(current).parent {
            path.push(parent);
            current = parent;
        }
        path.reverse();
        path
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn load_registers_all_locators() {
        let arena = Arena::load(Node::example()).unwrap();
        assert_eq!(arena.roots().len(), 1);
        for locator in [
            "index.html",
            "namespaces.html",
            "annotated.html",
            "files.html",
        ] {
            assert!(arena.lookup(locator).is_some(), "missing {locator}");
        }
        assert_eq!(arena.lookup("files/a.c.html"), None, "lazy, not loaded");
    }

    #[test]
    fn load_rejects_duplicate_locator() {
        let roots = vec![
            Node::new_leaf("a", "same.html"),
            Node::new_leaf("b", "same.html"),
        ];
        let duplicate = Arena::load(roots).unwrap_err();
        assert_eq!(duplicate.0, "same.html");
    }

    #[test]
    fn sections_without_locator_may_repeat() {
        let roots = vec![
            Node::new_section("Files", vec![Node::new_leaf("a.c", "a.html")]),
            Node::new_section("Files", vec![Node::new_leaf("b.c", "b.html")]),
        ];
        let arena = Arena::load(roots).unwrap();
        assert_eq!(arena.roots().len(), 2);
        assert_eq!(arena.len(), 4);
    }

    #[test]
    fn path_of_walks_to_root() {
        let arena = Arena::load(Node::example()).unwrap();
        let id = arena.lookup("classes.html").unwrap();
        let labels = arena
            .path_of(id)
            .into_iter()
            .map(|id| arena.node(id).label.clone())
            .collect::<Vec<_>>();
        assert_eq!(
            labels,
            ["os161-doc", "Data Structures", "Data Structure Index"]
        );
    }

    #[test]
    fn validate_new_rejects_clash_with_existing() {
        let arena = Arena::load(Node::example()).unwrap();
        let fetched = vec![Node::new_leaf("shadow", "index.html")];
        let duplicate = arena.validate_new(&fetched).unwrap_err();
        assert_eq!(duplicate.0, "index.html");
    }

    #[test]
    fn validate_new_rejects_internal_duplicate() {
        let arena = Arena::load(Node::example()).unwrap();
        let fetched = vec![
            Node::new_leaf("x", "files/x.html"),
            Node::new_section("nested", vec![Node::new_leaf("x again", "files/x.html")]),
        ];
        let duplicate = arena.validate_new(&fetched).unwrap_err();
        assert_eq!(duplicate.0, "files/x.html");
    }

    #[test]
    fn validate_new_accepts_fresh_locators() {
        let arena = Arena::load(Node::example()).unwrap();
        arena.validate_new(&Node::example_files_group()).unwrap();
    }
}
