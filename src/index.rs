use std::collections::HashMap;

use crate::error::LoadError;

/// The ordered sequence of all leaf locators, one per page.
///
/// This is the second half of the generator output: a flat list parallel to
/// the tree, used for linear next/previous traversal and "jump to page N"
/// lookups without walking the tree. The order is the generator's reading
/// order and is preserved as given.
///
/// # Example
///
/// ```
/// # use doc_navtree::FlatIndex;
/// let index = FlatIndex::new(vec![
///     "index.html".to_owned(),
///     "files.html".to_owned(),
/// ])?;
/// assert_eq!(index.position("files.html"), Some(1));
/// assert_eq!(index.next("index.html"), Some("files.html"));
/// # Ok::<(), doc_navtree::LoadError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct FlatIndex {
    locators: Vec<String>,
    positions: HashMap<String, usize>,
}

impl FlatIndex {
    /// Create a `FlatIndex` from the generator's ordered locator list.
    ///
    /// # Errors
    ///
    /// [`LoadError::DuplicateIndexLocator`] when a locator is listed twice.
    pub fn new(locators: Vec<String>) -> Result<Self, LoadError> {
        let mut positions = HashMap::with_capacity(locators.len());
        for (position, locator) in locators.iter().enumerate() {
            if positions.insert(locator.clone(), position).is_some() {
                return Err(LoadError::DuplicateIndexLocator(locator.clone()));
            }
        }
        Ok(Self {
            locators,
            positions,
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.locators.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locators.is_empty()
    }

    /// The locator at the given position, if any.
    #[must_use]
    pub fn get(&self, position: usize) -> Option<&str> {
        self.locators.get(position).map(String::as_str)
    }

    /// The position of the given locator in reading order.
    #[must_use]
    pub fn position(&self, locator: &str) -> Option<usize> {
        self.positions.get(locator).copied()
    }

    #[must_use]
    pub fn contains(&self, locator: &str) -> bool {
        self.positions.contains_key(locator)
    }

    /// The locator following the given one in reading order.
    ///
    /// `None` when the locator is unknown or already the last page.
    #[must_use]
    pub fn next(&self, locator: &str) -> Option<&str> {
        let position = self.position(locator)?;
        self.get(position.checked_add(1)?)
    }

    /// The locator preceding the given one in reading order.
    ///
    /// `None` when the locator is unknown or already the first page.
    #[must_use]
    pub fn previous(&self, locator: &str) -> Option<&str> {
        let position = self.position(locator)?;
        self.get(position.checked_sub(1)?)
    }

    /// All locators in reading order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.locators.iter().map(String::as_str)
    }
}

impl<'index> IntoIterator for &'index FlatIndex {
    type Item = &'index str;
    type IntoIter = std::iter::Map<std::slice::Iter<'index, String>, fn(&String) -> &str>;

    fn into_iter(self) -> Self::IntoIter {
        self.locators.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn example() -> FlatIndex {
        FlatIndex::new(vec![
            "index.html".to_owned(),
            "namespaces.html".to_owned(),
            "files.html".to_owned(),
            "files/a.c.html".to_owned(),
        ])
        .expect("all index locators are unique")
    }

    #[test]
    fn position_and_get_are_inverse() {
        let index = example();
        for (position, locator) in index.iter().enumerate().collect::<Vec<_>>() {
            assert_eq!(index.position(locator), Some(position));
            assert_eq!(index.get(position), Some(locator));
        }
    }

    #[test]
    fn next_walks_forward() {
        let index = example();
        assert_eq!(index.next("index.html"), Some("namespaces.html"));
        assert_eq!(index.next("files/a.c.html"), None);
        assert_eq!(index.next("unknown.html"), None);
    }

    #[test]
    fn previous_walks_backward() {
        let index = example();
        assert_eq!(index.previous("namespaces.html"), Some("index.html"));
        assert_eq!(index.previous("index.html"), None);
        assert_eq!(index.previous("unknown.html"), None);
    }

    #[test]
    fn out_of_range_position_is_none() {
        let index = example();
        assert_eq!(index.get(index.len()), None);
    }

    #[test]
    fn duplicate_locator_fails() {
        let error = FlatIndex::new(vec![
            "index.html".to_owned(),
            "files.html".to_owned(),
            "index.html".to_owned(),
        ])
        .unwrap_err();
        assert!(matches!(
            error,
            LoadError::DuplicateIndexLocator(locator) if locator == "index.html"
        ));
    }

    #[test]
    fn empty_index_works() {
        let index = FlatIndex::new(Vec::new()).unwrap();
        assert!(index.is_empty());
        assert_eq!(index.get(0), None);
    }
}
