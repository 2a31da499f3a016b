use serde_json::Value;
use thiserror::Error;

use crate::node::{Children, Node};

/// A generator literal that does not have the expected shape.
///
/// `path` points at the offending value in JSON-pointer-like notation
/// (`$[0][2]` is the third element of the first entry).
#[derive(Debug, Error)]
#[error("malformed tree literal at {path}: {reason}")]
pub struct LiteralError {
    pub path: String,
    pub reason: &'static str,
}

impl LiteralError {
    fn new(path: String, reason: &'static str) -> Self {
        Self { path, reason }
    }
}

/// Parse the generator's navigation tree literal.
///
/// The expected shape is the Doxygen `NAVTREE` one: an array of entries,
/// each entry `[label, locatorOrNull, children]` where `children` is `null`
/// (leaf), a nested array of entries, or a string naming a lazy group.
///
/// # Errors
///
/// [`LiteralError`] pointing at the first value that deviates from that
/// shape.
pub fn nodes_from_json(value: &Value) -> Result<Vec<Node>, LiteralError> {
    entries(value, "$")
}

fn entries(value: &Value, path: &str) -> Result<Vec<Node>, LiteralError> {
    let Value::Array(array) = value else {
        return Err(LiteralError::new(path.to_owned(), "expected an array of entries"));
    };
    array
        .iter()
        .enumerate()
        .map(|(index, entry)| node(entry, &format!("{path}[{index}]")))
        .collect()
}

fn node(value: &Value, path: &str) -> Result<Node, LiteralError> {
    let Value::Array(entry) = value else {
        return Err(LiteralError::new(
            path.to_owned(),
            "expected a [label, locator, children] entry",
        ));
    };
    if entry.len() != 3 {
        return Err(LiteralError::new(
            path.to_owned(),
            "expected exactly three elements in entry",
        ));
    }

    let Value::String(label) = &entry[0] else {
        return Err(LiteralError::new(
            format!("{path}[0]"),
            "expected the label to be a string",
        ));
    };
    let locator = match &entry[1] {
        Value::Null => None,
        Value::String(locator) => Some(locator.clone()),
        _ => {
            return Err(LiteralError::new(
                format!("{path}[1]"),
                "expected the locator to be a string or null",
            ))
        }
    };
    let children = match &entry[2] {
        Value::Null => Children::None,
        Value::String(group) => Children::Lazy(group.clone()),
        Value::Array(_) => Children::Inline(entries(&entry[2], &format!("{path}[2]"))?),
        _ => {
            return Err(LiteralError::new(
                format!("{path}[2]"),
                "expected the children to be an array, a group id or null",
            ))
        }
    };

    Ok(Node {
        label: label.clone(),
        locator,
        children,
    })
}

/// Parse the generator's flat index literal: an array of locator strings.
///
/// # Errors
///
/// [`LiteralError`] when the value is not an array of strings.
pub fn locators_from_json(value: &Value) -> Result<Vec<String>, LiteralError> {
    let Value::Array(array) = value else {
        return Err(LiteralError::new(
            "$".to_owned(),
            "expected an array of locators",
        ));
    };
    array
        .iter()
        .enumerate()
        .map(|(index, locator)| match locator {
            Value::String(locator) => Ok(locator.clone()),
            _ => Err(LiteralError::new(
                format!("$[{index}]"),
                "expected the locator to be a string",
            )),
        })
        .collect()
}
