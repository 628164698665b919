//! Immutable lists with shared structure
//!
//! Cloning a list clones an `Arc`, so binding a list to a variable,
//! looking it up or nesting it in another list never copies its
//! elements. Every list caches its nesting depth and total size, and
//! the checked constructor refuses lists past [`MAX_NESTING_DEPTH`] or
//! [`MAX_VALUE_SIZE`]. Printing, comparing and dropping recurse over
//! nesting, so those bounds keep them within stack and memory limits.

use std::ops::Deref;
use std::sync::Arc;

use super::{EvalError, Value};

/// Deepest list nesting any value may have
pub const MAX_NESTING_DEPTH: usize = 256;

/// Largest total size of a value: one per datum, plus the bytes of every
/// string, symbol and node name it contains, counting shared parts
/// each time they appear
pub const MAX_VALUE_SIZE: usize = 1 << 22;

#[derive(Debug, Clone)]
pub struct List {
    items: Arc<[Value]>,
    depth: usize,
    size: usize,
}

impl List {
    /// Build a list, enforcing the depth and size limits
    ///
    /// `procedure` names the operation in the error.
    pub fn new(procedure: &str, items: Vec<Value>) -> Result<Self, EvalError> {
        let list = Self::from_items(items);

        if list.depth > MAX_NESTING_DEPTH {
            return Err(EvalError::NestingTooDeep(procedure.to_string()));
        }
        if list.size > MAX_VALUE_SIZE {
            return Err(EvalError::TooLarge(procedure.to_string()));
        }

        Ok(list)
    }

    fn from_items(items: Vec<Value>) -> Self {
        let depth = 1 + items.iter().map(Value::depth).max().unwrap_or(0);
        let size = items
            .iter()
            .fold(1usize, |total, item| total.saturating_add(item.size()));

        Self {
            items: items.into(),
            depth,
            size,
        }
    }

    pub fn items(&self) -> &[Value] {
        &self.items
    }

    /// Nesting depth; a list of atoms has depth 1
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Every element but the first, or `None` for the empty list
    pub fn tail(&self) -> Option<List> {
        let (_, rest) = self.items.split_first()?;
        Some(Self::from_items(rest.to_vec()))
    }
}

impl Default for List {
    fn default() -> Self {
        Self::from_items(Vec::new())
    }
}

impl Deref for List {
    type Target = [Value];

    fn deref(&self) -> &[Value] {
        &self.items
    }
}

impl PartialEq for List {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.items, &other.items)
            || (self.size == other.size && self.items == other.items)
    }
}

#[cfg(test)]
impl From<Vec<Value>> for List {
    fn from(items: Vec<Value>) -> Self {
        Self::from_items(items)
    }
}

impl Value {
    /// Nesting depth; atoms are 0
    pub fn depth(&self) -> usize {
        match self {
            Value::List(list) => list.depth,
            _ => 0,
        }
    }

    /// Size counted against [`MAX_VALUE_SIZE`]
    pub fn size(&self) -> usize {
        match self {
            Value::Str(s) | Value::Symbol(s) | Value::Procedure(s) => 1 + s.len(),
            Value::Node(node) => 1 + node.node_type.len() + node.name.len(),
            Value::List(list) => list.size,
            Value::Integer(_) | Value::Real(_) | Value::Bool(_) | Value::Unspecified => 1,
        }
    }
}
