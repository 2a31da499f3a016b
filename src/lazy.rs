use std::collections::HashMap;

use crate::error::GroupError;
use crate::node::Node;

/// Supplies the children of lazy groups on first expansion.
///
/// Documentation generators keep large subtrees (file lists, member lists)
/// out of the initial tree literal and name them by a group identifier
/// instead. A `LazyGroupSource` maps such an identifier back to its node
/// entries, typically by loading a per-group chunk from disk or network.
///
/// `fetch` takes `&mut self` so implementations can do IO or keep their own
/// bookkeeping. The [`NavigationIndex`](crate::NavigationIndex) guarantees at
/// most one `fetch` per node for the lifetime of the session.
pub trait LazyGroupSource {
    /// Return the node entries of the given group.
    ///
    /// # Errors
    ///
    /// [`GroupError::UnknownGroup`] when no such group exists,
    /// [`GroupError::Malformed`] when its payload cannot be turned into
    /// nodes.
    fn fetch(&mut self, group: &str) -> Result<Vec<Node>, GroupError>;
}

/// A [`LazyGroupSource`] holding all groups in memory.
///
/// Useful when the host application embeds every group chunk up front and
/// only wants the deferred-materialization behavior, and as the obvious
/// test double.
#[derive(Debug, Clone, Default)]
pub struct StaticGroups {
    groups: HashMap<String, Vec<Node>>,
}

impl StaticGroups {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a group, replacing any previous entries under the same id.
    pub fn insert<G>(&mut self, group: G, nodes: Vec<Node>)
    where
        G: Into<String>,
    {
        self.groups.insert(group.into(), nodes);
    }

    #[must_use]
    pub fn contains(&self, group: &str) -> bool {
        self.groups.contains_key(group)
    }
}

impl<G> FromIterator<(G, Vec<Node>)> for StaticGroups
where
    G: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (G, Vec<Node>)>>(iter: I) -> Self {
        let mut groups = Self::new();
        for (group, nodes) in iter {
            groups.insert(group, nodes);
        }
        groups
    }
}

impl LazyGroupSource for StaticGroups {
    fn fetch(&mut self, group: &str) -> Result<Vec<Node>, GroupError> {
        self.groups
            .get(group)
            .cloned()
            .ok_or_else(|| GroupError::UnknownGroup(group.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn static_groups_returns_entries() {
        let mut source = StaticGroups::from_iter([("files_dup", Node::example_files_group())]);
        let nodes = source.fetch("files_dup").unwrap();
        assert_eq!(nodes, Node::example_files_group());
    }

    #[test]
    fn static_groups_unknown_group_errors() {
        let mut source = StaticGroups::new();
        let error = source.fetch("nope").unwrap_err();
        assert!(matches!(error, GroupError::UnknownGroup(group) if group == "nope"));
    }

    #[test]
    fn insert_replaces_previous_entries() {
        let mut source = StaticGroups::new();
        source.insert("g", vec![Node::new_leaf("old", "old.html")]);
        source.insert("g", vec![Node::new_leaf("new", "new.html")]);
        let nodes = source.fetch("g").unwrap();
        assert_eq!(nodes, vec![Node::new_leaf("new", "new.html")]);
    }
}
