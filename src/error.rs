use thiserror::Error;

/// Structural problems detected while loading the tree and flat index.
///
/// All of these abort construction of the
/// [`NavigationIndex`](crate::NavigationIndex); a malformed index is not
/// recoverable at runtime.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Two distinct nodes in the tree carry the same locator, so a path
    /// lookup for it would be ambiguous.
    #[error("duplicate locator in navigation tree: {0:?}")]
    DuplicateLocator(String),

    /// The flat index lists the same locator twice.
    #[error("duplicate locator in flat index: {0:?}")]
    DuplicateIndexLocator(String),

    /// The generator literal did not have the expected shape.
    #[cfg(feature = "json")]
    #[error(transparent)]
    Literal(#[from] crate::literal::LiteralError),
}

/// What a [`LazyGroupSource`](crate::LazyGroupSource) reports when it cannot
/// supply a group.
#[derive(Debug, Error)]
pub enum GroupError {
    /// The source has no group with this identifier.
    #[error("unknown lazy group {0:?}")]
    UnknownGroup(String),

    /// The group exists but its payload could not be turned into nodes.
    #[error("malformed lazy group {group:?}: {reason}")]
    Malformed { group: String, reason: String },
}

/// A lazy expansion that could not be completed.
///
/// The affected subtree is cached as empty afterwards; the session stays
/// usable and the same node will not be fetched again.
#[derive(Debug, Error)]
pub enum ExpandError {
    /// The collaborator failed to supply the group.
    #[error("fetching lazy group {group:?} failed")]
    Fetch {
        group: String,
        #[source]
        source: GroupError,
    },

    /// A fetched node clashes with a locator already present in the tree.
    #[error("lazy group {group:?} contains duplicate locator {locator:?}")]
    DuplicateLocator { group: String, locator: String },
}

/// Outcome of [`resolve_path`](crate::NavigationIndex::resolve_path) when no
/// path can be produced.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The locator is present in neither the tree nor any reachable lazy
    /// group. Browsers typically fall back to the collapsed root on this.
    #[error("locator {0:?} not found in navigation tree")]
    NotFound(String),

    /// A lazy group needed by the search failed to load, so absence of the
    /// locator could not be established.
    #[error(transparent)]
    Expansion(#[from] ExpandError),
}

impl ResolveError {
    /// Whether this is the ordinary "no such page" outcome as opposed to a
    /// degraded search.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Internal marker for a locator clash found during an arena insertion.
#[derive(Debug)]
pub(crate) struct DuplicateLocator(pub(crate) String);
