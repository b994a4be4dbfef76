//! Core types for Postmock
//!
//! The `raw` half of this module is a defensive serde view of the Postman
//! collection document (optional fields everywhere, mixed string/object URL
//! shapes). The flattened half is what the rest of the crate works with.

use serde::Deserialize;

// ============================================================================
// Raw collection document (as fetched from the Postman API)
// ============================================================================

/// Top-level document returned by `GET /collections/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct CollectionDocument {
    pub collection: Collection,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Collection {
    #[serde(default)]
    pub info: CollectionInfo,
    #[serde(default)]
    pub item: Vec<CollectionNode>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CollectionInfo {
    #[serde(default)]
    pub name: String,
}

/// A node in the collection tree: a folder when `item` is present, a
/// request item otherwise.
#[derive(Debug, Clone, Deserialize)]
pub struct CollectionNode {
    pub name: Option<String>,
    pub item: Option<Vec<CollectionNode>>,
    pub request: Option<RequestSpec>,
    /// Recorded example responses for a request item
    #[serde(default)]
    pub response: Vec<ExampleEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RequestSpec {
    pub method: Option<String>,
    pub url: Option<UrlSpec>,
}

/// Postman stores URLs either as a plain string or as a structured object
/// with a raw form and/or a list of path segments.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum UrlSpec {
    Raw(String),
    Detailed {
        raw: Option<String>,
        #[serde(default)]
        path: Vec<PathSegment>,
    },
}

/// Path segments are usually strings, but the format permits objects
/// (e.g. `{"value": ..., "type": ...}`); anything non-string is stringified.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    Text(String),
    Other(serde_json::Value),
}

impl PathSegment {
    pub fn as_text(&self) -> String {
        match self {
            PathSegment::Text(s) => s.clone(),
            PathSegment::Other(v) => v.to_string(),
        }
    }
}

/// One recorded example response on a request item.
#[derive(Debug, Clone, Deserialize)]
pub struct ExampleEntry {
    pub code: Option<u16>,
    #[serde(default)]
    pub header: Vec<HeaderEntry>,
    pub body: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HeaderEntry {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub value: String,
}

// ============================================================================
// Flattened model
// ============================================================================

/// The fixed reply served for one route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockResponse {
    pub status: u16,
    /// Header pairs in insertion order
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl Default for MockResponse {
    fn default() -> Self {
        Self {
            status: 200,
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            body: r#"{"message": "Mock response"}"#.to_string(),
        }
    }
}

/// One flattened (method, path) pair bound to a single fixed response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// HTTP method, normalized to upper-case
    pub method: String,
    /// Leading-slash path, may contain `{param}` placeholders
    pub path: String,
    /// Human-readable request name from the collection
    pub name: String,
    pub response: MockResponse,
    /// Id of the collection this route was flattened from
    pub collection_id: String,
    /// Mount root the path was rewritten under, if any
    pub root: Option<String>,
}

/// A collection id paired with an optional path prefix to serve it under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionMount {
    pub id: String,
    /// Must start with `/` when present
    pub root: Option<String>,
}

impl CollectionMount {
    pub fn new(id: impl Into<String>, root: Option<String>) -> Self {
        Self {
            id: id.into(),
            root,
        }
    }
}

/// Display metadata for one mounted collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionSummary {
    pub id: String,
    pub name: String,
    pub root: Option<String>,
    pub route_count: usize,
}

/// The merged, immutable result of a route-table build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTable {
    pub routes: Vec<Route>,
    pub collections: Vec<CollectionSummary>,
}
