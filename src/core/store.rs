//! Shared knowledge store
//!
//! Holds the state the interpreter reads and mutates across requests:
//! typed named nodes, top-level variable bindings, and the
//! attentional-focus boundary. The store guards its own tables with a
//! lock; it never serializes whole commands against each other.

use std::collections::{BTreeSet, HashMap};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::core::scheme::Value;

/// Identity of a node in the store: its type and its name
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeRef {
    /// Node type, e.g. `ConceptNode`
    pub node_type: String,

    /// Node name, unique within its type
    pub name: String,
}

impl NodeRef {
    pub fn new(node_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            node_type: node_type.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Default)]
struct StoreInner {
    nodes: BTreeSet<NodeRef>,
    bindings: HashMap<String, Value>,
    af_boundary: i64,
}

/// Knowledge store shared by every request
///
/// Created and owned by the host application. The relay only holds an
/// `Arc` to it and hands it to the interpreter.
#[derive(Debug, Default)]
pub struct KnowledgeStore {
    inner: RwLock<StoreInner>,
}

impl KnowledgeStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    // Every write leaves the tables consistent, so a poisoned lock is
    // still safe to use.
    fn read(&self) -> RwLockReadGuard<'_, StoreInner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreInner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Insert a node, returning the existing one if already present
    pub fn add_node(&self, node_type: &str, name: &str) -> NodeRef {
        let node = NodeRef::new(node_type, name);
        self.write().nodes.insert(node.clone());
        node
    }

    /// Look up a node by type and name
    pub fn get_node(&self, node_type: &str, name: &str) -> Option<NodeRef> {
        let node = NodeRef::new(node_type, name);
        self.read().nodes.get(&node).cloned()
    }

    /// Remove a node. Returns false if it was not present.
    pub fn remove_node(&self, node: &NodeRef) -> bool {
        self.write().nodes.remove(node)
    }

    /// Total number of stored nodes
    pub fn node_count(&self) -> usize {
        self.read().nodes.len()
    }

    /// All nodes of the given type, ordered by name
    pub fn nodes_of_type(&self, node_type: &str) -> Vec<NodeRef> {
        self.read()
            .nodes
            .iter()
            .filter(|node| node.node_type == node_type)
            .cloned()
            .collect()
    }

    /// Bind (or rebind) a top-level variable
    pub fn define(&self, name: &str, value: Value) {
        self.write().bindings.insert(name.to_string(), value);
    }

    /// Get the value bound to a top-level variable
    ///
    /// Lists are shared with the binding, not copied.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        self.read().bindings.get(name).cloned()
    }

    /// Check whether a variable has been defined
    pub fn is_defined(&self, name: &str) -> bool {
        self.read().bindings.contains_key(name)
    }

    /// Current attentional-focus boundary
    pub fn af_boundary(&self) -> i64 {
        self.read().af_boundary
    }

    /// Set the attentional-focus boundary, returning the new value
    pub fn set_af_boundary(&self, boundary: i64) -> i64 {
        self.write().af_boundary = boundary;
        boundary
    }
}
