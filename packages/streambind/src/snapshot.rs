//! Generic, serializable capture of a node.
//!
//! [`SnapshotHandler`] binds any element without a domain type: it records
//! the node's attributes and values as a [`NodeSnapshot`], nesting the
//! snapshots produced for handled child elements. Child snapshots are shared
//! through `Rc`, so an enclosing element never copies its subtree.

use std::collections::BTreeMap;
use std::rc::Rc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ConversionError;
use crate::node::{Node, Slot, Value};
use crate::registry::{HandlerRegistry, NodeHandler};

/// Placeholder for objects that are neither text, dates nor snapshots.
pub const OPAQUE_PLACEHOLDER: &str = "<object>";

/// Serializable copy of one node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeSnapshot {
    /// Attributes of the element.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,

    /// Recorded values by name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub values: BTreeMap<String, SnapshotValue>,
}

/// Serializable copy of one slot or value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SnapshotValue {
    /// Text value.
    Text(String),
    /// Snapshot of a handled child element.
    Node(Rc<NodeSnapshot>),
    /// Several values under the same name.
    List(Vec<SnapshotValue>),
}

impl NodeSnapshot {
    /// Capture a node.
    #[must_use]
    pub fn from_node(node: &Node) -> Self {
        let attributes = node
            .attributes()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        let values = node
            .values()
            .map(|(name, slot)| (name.to_string(), SnapshotValue::from_slot(slot)))
            .collect();
        Self { attributes, values }
    }

    /// Text recorded under `name`, if it is a single text value.
    #[must_use]
    pub fn text(&self, name: &str) -> Option<&str> {
        match self.values.get(name)? {
            SnapshotValue::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl SnapshotValue {
    fn from_slot(slot: &Slot) -> Self {
        match slot {
            Slot::Single(value) => Self::from_value(value),
            Slot::Set(values) => Self::List(values.iter().map(Self::from_value).collect()),
        }
    }

    fn from_value(value: &Value) -> Self {
        match value {
            Value::Text(text) => Self::Text(text.clone()),
            Value::Date(date) => Self::Text(format_date(*date)),
            Value::Object(_) => match value.downcast_ref::<Rc<NodeSnapshot>>() {
                Some(snapshot) => Self::Node(Rc::clone(snapshot)),
                None => Self::Text(OPAQUE_PLACEHOLDER.to_string()),
            },
        }
    }
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Handler producing a shared [`NodeSnapshot`] for any element.
#[derive(Debug, Clone, Copy, Default)]
pub struct SnapshotHandler;

impl NodeHandler for SnapshotHandler {
    type Output = Rc<NodeSnapshot>;

    fn process(&self, node: &Node) -> Result<Rc<NodeSnapshot>, ConversionError> {
        Ok(Rc::new(NodeSnapshot::from_node(node)))
    }
}

/// Create a registry with a [`SnapshotHandler`] for every given element.
#[must_use]
pub fn create_snapshot_registry<'a>(elements: impl IntoIterator<Item = &'a str>) -> HandlerRegistry {
    elements
        .into_iter()
        .fold(HandlerRegistry::new(), |registry, element| {
            registry.register_handler(element, SnapshotHandler)
        })
}
