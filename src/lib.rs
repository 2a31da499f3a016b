#![forbid(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery)]

/*!
Synchronized navigation index for generated documentation browsers.

Documentation generators emit two parallel artifacts: a rooted tree of
labeled pages (for the tree-view panel) and a flat ordered list of page
locators (for next/previous traversal). [`NavigationIndex`] loads both once
and answers the two queries a browser UI needs to keep its panels in
agreement: resolving an incoming locator back to its path in the tree
([`resolve_path`](NavigationIndex::resolve_path)) and materializing
lazily-deferred subtrees on first visit
([`expand`](NavigationIndex::expand)).

Large subtrees are typically not inlined in the tree literal; they are named
by a group id and fetched on demand through a [`LazyGroupSource`]. Fetches
are cached per node, so expansion is idempotent and each group is requested
at most once per session.

# Example

```
use doc_navtree::{NavigationIndex, Node, StaticGroups};

let tree = vec![Node::new_section(
    "Files",
    vec![Node::new_leaf("a.c", "files/a.c.html")],
)];
let flat = vec!["files/a.c.html".to_owned()];
let mut navigation = NavigationIndex::new(tree, flat)?;

let mut source = StaticGroups::new();
let path = navigation.resolve_path(&mut source, "files/a.c.html")?;
let labels = path
    .iter()
    .map(|&id| navigation.label(id))
    .collect::<Vec<_>>();
assert_eq!(labels, ["Files", "a.c"]);
# Ok::<(), Box<dyn std::error::Error>>(())
```
*/

use tracing::{debug, warn};

mod arena;
mod error;
mod index;
mod lazy;
#[cfg(feature = "json")]
pub mod literal;
mod node;

use crate::arena::{Arena, ChildrenState};
pub use crate::error::{ExpandError, GroupError, LoadError, ResolveError};
pub use crate::index::FlatIndex;
pub use crate::lazy::{LazyGroupSource, StaticGroups};
pub use crate::node::{Children, Node};

/// Position of a loaded node within a [`NavigationIndex`].
///
/// Ids are handed out by the index and are only meaningful for the index
/// that produced them. Passing an id from a different index is a logic error
/// and panics on access, like indexing a slice out of bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

/// The loaded navigation tree plus its flat locator index.
///
/// Built once from generator output and read-only afterwards, except for the
/// write-once per-node cache filled by [`expand`](Self::expand). There is no
/// ambient singleton; construct one and hand it to whatever rendering layer
/// needs it.
#[derive(Debug, Clone)]
pub struct NavigationIndex {
    arena: Arena,
    flat: FlatIndex,
}

impl NavigationIndex {
    /// Load a navigation tree and its flat locator index.
    ///
    /// # Errors
    ///
    /// [`LoadError::DuplicateLocator`] when two nodes in the tree carry the
    /// same locator, [`LoadError::DuplicateIndexLocator`] when the flat list
    /// repeats a locator. Both abort construction; the generator output is
    /// malformed and resolution over it would be ambiguous.
    pub fn new(roots: Vec<Node>, index: Vec<String>) -> Result<Self, LoadError> {
        let arena =
            Arena::load(roots).map_err(|duplicate| LoadError::DuplicateLocator(duplicate.0))?;
        let flat = FlatIndex::new(index)?;
        Ok(Self { arena, flat })
    }

    /// Load directly from the generator's JSON literals, the tree in the
    /// `[label, locatorOrNull, children]` shape and the flat index as an
    /// array of locator strings.
    ///
    /// # Errors
    ///
    /// [`LoadError::Literal`] when either literal deviates from that shape,
    /// otherwise as [`new`](Self::new).
    #[cfg(feature = "json")]
    pub fn from_json(
        tree: &serde_json::Value,
        index: &serde_json::Value,
    ) -> Result<Self, LoadError> {
        let roots = crate::literal::nodes_from_json(tree)?;
        let locators = crate::literal::locators_from_json(index)?;
        Self::new(roots, locators)
    }

    /// The top level of the tree.
    #[must_use]
    pub fn roots(&self) -> &[NodeId] {
        self.arena.roots()
    }

    /// Total number of nodes materialized so far, lazy children included
    /// once fetched.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    /// The flat locator index accompanying the tree.
    #[must_use]
    pub const fn flat_index(&self) -> &FlatIndex {
        &self.flat
    }

    #[must_use]
    pub fn label(&self, id: NodeId) -> &str {
        &self.arena.node(id).label
    }

    #[must_use]
    pub fn locator(&self, id: NodeId) -> Option<&str> {
        self.arena.node(id).locator.as_deref()
    }

    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.arena.node(id).parent
    }

    /// The children of a node, or `None` while its lazy group has not been
    /// fetched yet. Use [`expand`](Self::expand) to materialize it.
    #[must_use]
    pub fn children(&self, id: NodeId) -> Option<&[NodeId]> {
        match &self.arena.node(id).children {
            ChildrenState::Inline(children) | ChildrenState::Loaded { children, .. } => {
                Some(children)
            }
            ChildrenState::Lazy(_) => None,
        }
    }

    /// Whether the node's children still await their first fetch.
    #[must_use]
    pub fn is_lazy(&self, id: NodeId) -> bool {
        matches!(self.arena.node(id).children, ChildrenState::Lazy(_))
    }

    /// Find an already-materialized node by its locator.
    ///
    /// Does not touch lazy groups; use
    /// [`resolve_path`](Self::resolve_path) for the searching variant.
    #[must_use]
    pub fn lookup(&self, locator: &str) -> Option<NodeId> {
        self.arena.lookup(locator)
    }

    /// The path from the root to `id`, both inclusive.
    #[must_use]
    pub fn path_of(&self, id: NodeId) -> Vec<NodeId> {
        self.arena.path_of(id)
    }

    /// The children of a node, fetching them on first call for lazy nodes.
    ///
    /// Inline or already-fetched children are returned without consulting
    /// `source`. A lazy node fetches exactly once and caches the result for
    /// the rest of the session, so repeated calls are idempotent and
    /// fetch-free.
    ///
    /// # Errors
    ///
    /// [`ExpandError`] when the fetch fails or the fetched subtree clashes
    /// with an existing locator. The subtree is then cached as empty: the
    /// error goes to the triggering caller only and the session stays
    /// usable.
    pub fn expand<S>(&mut self, source: &mut S, id: NodeId) -> Result<&[NodeId], ExpandError>
    where
        S: LazyGroupSource,
    {
        let group = match &self.arena.node(id).children {
            ChildrenState::Inline(_) | ChildrenState::Loaded { .. } => {
                return Ok(self.loaded_children(id));
            }
            ChildrenState::Lazy(group) => group.clone(),
        };

        debug!(group = %group, "fetching lazy group");
        match self.materialize(source, id, &group) {
            Ok(children) => {
                self.arena.node_mut(id).children = ChildrenState::Loaded { group, children };
                Ok(self.loaded_children(id))
            }
            Err(error) => {
                warn!(group = %group, error = %error, "lazy group failed, caching subtree as empty");
                self.arena.node_mut(id).children = ChildrenState::Loaded {
                    group,
                    children: Vec::new(),
                };
                Err(error)
            }
        }
    }

    /// Resolve a locator to its path in the tree, from the root to the
    /// matching node.
    ///
    /// Already-materialized locators resolve through the locator map without
    /// a tree walk. Otherwise the tree is searched depth-first, expanding
    /// lazy groups on demand through `source`. A group that fails to fetch
    /// during the search is cached as empty and the search continues past
    /// it.
    ///
    /// # Errors
    ///
    /// [`ResolveError::NotFound`] when the locator exists nowhere in the
    /// tree; callers typically fall back to showing the tree collapsed at
    /// the root. [`ResolveError::Expansion`] when the locator was not found
    /// but a lazy group failed to load, since the locator may have lived in
    /// the part that never materialized.
    pub fn resolve_path<S>(
        &mut self,
        source: &mut S,
        locator: &str,
    ) -> Result<Vec<NodeId>, ResolveError>
    where
        S: LazyGroupSource,
    {
        if let Some(id) = self.arena.lookup(locator) {
            return Ok(self.arena.path_of(id));
        }

        let mut first_failure = None;
        let mut stack = self.arena.roots().iter().rev().copied().collect::<Vec<_>>();
        while let Some(id) = stack.pop() {
            if self.is_lazy(id) {
                match self.expand(source, id) {
                    Ok(_) => {
                        if let Some(found) = self.arena.lookup(locator) {
                            return Ok(self.arena.path_of(found));
                        }
                    }
                    Err(error) => {
                        if first_failure.is_none() {
                            first_failure = Some(error);
                        }
                    }
                }
            }
            if let Some(children) = self.children(id) {
                stack.extend(children.iter().rev());
            }
        }

        first_failure.map_or_else(
            || Err(ResolveError::NotFound(locator.to_owned())),
            |error| Err(ResolveError::Expansion(error)),
        )
    }

    /// Fetch and insert the children of a lazy group.
    ///
    /// The whole fetched subtree is validated against the existing locators
    /// before anything is inserted, so a rejected group leaves the arena
    /// untouched.
    fn materialize<S>(
        &mut self,
        source: &mut S,
        id: NodeId,
        group: &str,
    ) -> Result<Vec<NodeId>, ExpandError>
    where
        S: LazyGroupSource,
    {
        let nodes = source.fetch(group).map_err(|source| ExpandError::Fetch {
            group: group.to_owned(),
            source,
        })?;
        self.arena
            .validate_new(&nodes)
            .map_err(|duplicate| ExpandError::DuplicateLocator {
                group: group.to_owned(),
                locator: duplicate.0,
            })?;

        let mut children = Vec::with_capacity(nodes.len());
        for node in nodes {
            let child = self.arena.insert_tree(Some(id), node).map_err(|duplicate| {
                ExpandError::DuplicateLocator {
                    group: group.to_owned(),
                    locator: duplicate.0,
                }
            })?;
            children.push(child);
        }
        Ok(children)
    }

    /// Children of a node known to not be in the `Lazy` state.
    fn loaded_children(&self, id: NodeId) -> &[NodeId] {
        match &self.arena.node(id).children {
            ChildrenState::Inline(children) | ChildrenState::Loaded { children, .. } => children,
            ChildrenState::Lazy(_) => &[],
        }
    }
}
