//! Graph document exchanged with clients
//!
//! The wire format is `{nodes: [{id, label, description?, category?}],
//! links: [{source, target}]}`. Links are not checked against nodes; a dangling
//! endpoint only shows up as an odd degree count downstream.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Category reported for nodes that carry none
pub const UNKNOWN_CATEGORY: &str = "unknown";

/// A snapshot of the client's knowledge graph
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphDocument {
    /// Nodes in document order
    #[serde(default, deserialize_with = "null_as_empty")]
    pub nodes: Vec<GraphNode>,

    /// Links in document order
    #[serde(default, deserialize_with = "null_as_empty")]
    pub links: Vec<GraphLink>,
}

/// A single node of the graph document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    /// Opaque node identifier
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: String,

    /// Human-readable label
    #[serde(default, deserialize_with = "lenient_text")]
    pub label: String,

    /// Optional free-text description
    #[serde(
        default,
        deserialize_with = "lenient_optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,

    /// Optional category name
    #[serde(
        default,
        deserialize_with = "lenient_optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub category: Option<String>,
}

/// A link between two node ids
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphLink {
    /// Source node id
    #[serde(default, deserialize_with = "lenient_id")]
    pub source: String,

    /// Target node id
    #[serde(default, deserialize_with = "lenient_id")]
    pub target: String,
}

impl GraphDocument {
    /// Create a document from nodes and links
    pub fn new(nodes: Vec<GraphNode>, links: Vec<GraphLink>) -> Self {
        Self { nodes, links }
    }

    /// Parse a document from JSON text
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Node ids in document order
    pub fn node_ids(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|node| node.id.as_str())
    }

    /// True when the document has neither nodes nor links
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.links.is_empty()
    }
}

impl GraphNode {
    /// Create a node with only an id and a label
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            description: None,
            category: None,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the category
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Description, or the empty string when absent
    pub fn description_or_empty(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }

    /// Category, or [`UNKNOWN_CATEGORY`] when absent
    pub fn category_or_unknown(&self) -> &str {
        self.category.as_deref().unwrap_or(UNKNOWN_CATEGORY)
    }
}

impl GraphLink {
    /// Create a link between two node ids
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

/// `null` collections deserialize as empty
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Ids may be strings, numbers, or node objects carrying an `id` field.
///
/// Force-directed layout libraries replace link endpoints with the node
/// objects themselves, so both shapes show up in practice.
fn lenient_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(id_from_value(&value))
}

fn id_from_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Object(map) => map.get("id").map(id_from_value).unwrap_or_default(),
        _ => String::new(),
    }
}

fn text_from_value(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(text_from_value(value).unwrap_or_default())
}

/// Scalars become text; arrays, objects and `null` count as absent
fn lenient_optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(text_from_value(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_document() {
        let doc = GraphDocument::from_json(
            r#"{
                "nodes": [
                    {"id": "n1", "label": "The Void", "description": "Absence", "category": "core"},
                    {"id": "n2", "label": "Anxiety"}
                ],
                "links": [{"source": "n1", "target": "n2"}]
            }"#,
        )
        .unwrap();

        assert_eq!(doc.nodes.len(), 2);
        assert_eq!(doc.links.len(), 1);
        assert_eq!(doc.nodes[0].category_or_unknown(), "core");
        assert_eq!(doc.nodes[1].category_or_unknown(), UNKNOWN_CATEGORY);
        assert_eq!(doc.nodes[1].description_or_empty(), "");
    }

    #[test]
    fn test_missing_collections_are_empty() {
        let doc = GraphDocument::from_json("{}").unwrap();
        assert!(doc.is_empty());

        let doc = GraphDocument::from_json(r#"{"nodes": null, "links": null}"#).unwrap();
        assert!(doc.is_empty());
    }

    #[test]
    fn test_missing_node_fields_default() {
        let doc = GraphDocument::from_json(r#"{"nodes": [{}], "links": [{}]}"#).unwrap();
        assert_eq!(doc.nodes[0].id, "");
        assert_eq!(doc.nodes[0].label, "");
        assert_eq!(doc.links[0].source, "");
    }

    #[test]
    fn test_numeric_and_object_endpoints() {
        let doc = GraphDocument::from_json(
            r#"{
                "nodes": [{"id": 1, "label": "One"}, {"id": "two", "label": null}],
                "links": [{"source": {"id": 1, "label": "One"}, "target": "two"}]
            }"#,
        )
        .unwrap();

        assert_eq!(doc.nodes[0].id, "1");
        assert_eq!(doc.nodes[1].label, "");
        assert_eq!(doc.links[0].source, "1");
        assert_eq!(doc.links[0].target, "two");
    }

    #[test]
    fn test_mistyped_optional_fields_degrade() {
        let doc = GraphDocument::from_json(
            r#"{
                "nodes": [
                    {"id": "a", "label": "A", "category": 3, "description": ["x"]},
                    {"id": "b", "label": "B", "category": {"name": "c"}, "description": true},
                    {"id": "c", "label": "C", "category": null}
                ],
                "links": []
            }"#,
        )
        .unwrap();

        assert_eq!(doc.nodes[0].category_or_unknown(), "3");
        assert_eq!(doc.nodes[0].description_or_empty(), "");
        assert_eq!(doc.nodes[1].category_or_unknown(), UNKNOWN_CATEGORY);
        assert_eq!(doc.nodes[1].description_or_empty(), "true");
        assert_eq!(doc.nodes[2].category, None);
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let doc = GraphDocument::from_json(
            r#"{"nodes": [{"id": "a", "label": "A", "x": 10.5, "vx": 0}], "meta": {"v": 2}}"#,
        )
        .unwrap();
        assert_eq!(doc.node_ids().collect::<Vec<_>>(), vec!["a"]);
    }
}
