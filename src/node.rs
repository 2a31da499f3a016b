/// One entry of the generated navigation tree before it is loaded into a
/// [`NavigationIndex`](crate::NavigationIndex).
///
/// Mirrors one `[label, locatorOrNull, children]` entry of the generator
/// literal: a display `label`, an optional opaque `locator` naming the target
/// page or anchor, and [`Children`] that are either inlined, absent, or
/// deferred to a lazy group.
///
/// # Locators
///
/// A locator is an opaque string (typically a URL fragment like
/// `"files/a.c.html"`). Section headers carry no locator. Locators must be
/// unique across the whole tree; this is enforced when the tree is loaded,
/// not while it is being built, so constructing a `Node` never fails.
///
/// # Example
///
/// ```
/// # use doc_navtree::Node;
/// let leaf = Node::new_leaf("a.c", "files/a.c.html");
/// let section = Node::new_section("Files", vec![leaf]);
/// ```
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub(crate) label: String,
    pub(crate) locator: Option<String>,
    pub(crate) children: Children,
}

/// The children of a [`Node`] as declared by the generator.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Children {
    /// A leaf page without a subtree.
    #[default]
    None,
    /// Children present in the tree literal itself.
    Inline(Vec<Node>),
    /// Children deferred to a lazy group, fetched on first expansion via a
    /// [`LazyGroupSource`](crate::LazyGroupSource).
    Lazy(String),
}

impl Node {
    /// Create a leaf `Node` pointing at a single page.
    pub fn new_leaf<L, T>(label: L, locator: T) -> Self
    where
        L: Into<String>,
        T: Into<String>,
    {
        Self {
            label: label.into(),
            locator: Some(locator.into()),
            children: Children::None,
        }
    }

    /// Create a structural `Node` without a target of its own, like a
    /// "Files" or "Namespaces" section header.
    pub fn new_section<L>(label: L, children: Vec<Self>) -> Self
    where
        L: Into<String>,
    {
        Self {
            label: label.into(),
            locator: None,
            children: Children::Inline(children),
        }
    }

    /// Create a `Node` with an explicit locator and inline children.
    pub fn new<L>(label: L, locator: Option<String>, children: Vec<Self>) -> Self
    where
        L: Into<String>,
    {
        Self {
            label: label.into(),
            locator,
            children: Children::Inline(children),
        }
    }

    /// Create a `Node` whose children live in a lazy group and are fetched
    /// on first expansion.
    pub fn new_lazy<L, G>(label: L, locator: Option<String>, group: G) -> Self
    where
        L: Into<String>,
        G: Into<String>,
    {
        Self {
            label: label.into(),
            locator,
            children: Children::Lazy(group.into()),
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn locator(&self) -> Option<&str> {
        self.locator.as_deref()
    }

    #[must_use]
    pub const fn children(&self) -> &Children {
        &self.children
    }
}

#[cfg(test)]
impl Node {
    /// A miniature of the os161 Doxygen navtree: sections with and without
    /// locators, one lazy group, locators shaped like the generator's page
    /// URLs.
    pub(crate) fn example() -> Vec<Self> {
        vec![Self::new(
            "os161-doc",
            Some("index.html".to_owned()),
            vec![
                Self::new_section(
                    "Namespaces",
                    vec![
                        Self::new_leaf("Namespace List", "namespaces.html"),
                        Self::new_leaf("Namespace Members", "namespacemembers.html"),
                    ],
                ),
                Self::new(
                    "Data Structures",
                    Some("annotated.html".to_owned()),
                    vec![
                        Self::new_leaf("Data Structure Index", "classes.html"),
                        Self::new_leaf("Data Fields", "functions.html"),
                    ],
                ),
                Self::new_lazy("Files", Some("files.html".to_owned()), "files_dup"),
            ],
        )]
    }

    /// The children the `"files_dup"` group of [`example`](Self::example)
    /// resolves to.
    pub(crate) fn example_files_group() -> Vec<Self> {
        vec![
            Self::new_leaf("a.c", "files/a.c.html"),
            Self::new_leaf("b.c", "files/b.c.html"),
        ]
    }
}
