//! Collection flattener
//!
//! Walks the nested folder tree of a collection document in pre-order and
//! emits one route per request item. Items without a request object or
//! without a resolvable path are dropped silently; that is expected, lossy
//! behavior, not an error.

use std::sync::OnceLock;

use regex::Regex;
use url::Url;

use crate::error::{Error, Result};
use crate::types::{
    CollectionDocument, CollectionNode, ExampleEntry, MockResponse, PathSegment, Route, UrlSpec,
};

/// Folder nesting deeper than this is treated as a malformed document.
const MAX_FOLDER_DEPTH: usize = 64;

/// Literal substituted for `{{variable}}` in raw URL strings. The point is
/// only to make the string parseable, not to resolve real values.
const VARIABLE_PLACEHOLDER: &str = "localhost:8000";

static VARIABLE_PATTERN: OnceLock<Regex> = OnceLock::new();

/// Flatten a collection document into routes, in pre-order traversal order.
pub fn flatten(doc: &CollectionDocument, collection_id: &str) -> Result<Vec<Route>> {
    let mut routes = Vec::new();
    walk(&doc.collection.item, "", 0, collection_id, &mut routes)?;
    Ok(routes)
}

fn walk(
    items: &[CollectionNode],
    folder_trail: &str,
    depth: usize,
    collection_id: &str,
    routes: &mut Vec<Route>,
) -> Result<()> {
    if depth > MAX_FOLDER_DEPTH {
        return Err(Error::MalformedCollection(format!(
            "folder nesting exceeds {} levels",
            MAX_FOLDER_DEPTH
        )));
    }

    for node in items {
        match &node.item {
            Some(children) => {
                // Folder: the name is accumulated for debugging only; the
                // produced path comes from each request's own URL.
                let trail = format!("{}/{}", folder_trail, node.name.as_deref().unwrap_or(""));
                walk(children, &trail, depth + 1, collection_id, routes)?;
            }
            None => parse_request(node, folder_trail, collection_id, routes),
        }
    }

    Ok(())
}

fn parse_request(
    node: &CollectionNode,
    folder_trail: &str,
    collection_id: &str,
    routes: &mut Vec<Route>,
) {
    let Some(request) = &node.request else {
        return;
    };

    let method = request
        .method
        .as_deref()
        .unwrap_or("GET")
        .to_ascii_uppercase();

    let Some(path) = resolve_path(request.url.as_ref()) else {
        tracing::debug!(
            folder = folder_trail,
            name = node.name.as_deref().unwrap_or(""),
            "skipping request item with no resolvable path"
        );
        return;
    };

    let response = node
        .response
        .first()
        .map(example_response)
        .unwrap_or_default();

    routes.push(Route {
        method,
        path,
        name: node.name.clone().unwrap_or_else(|| "Unknown".to_string()),
        response,
        collection_id: collection_id.to_string(),
        root: None,
    });
}

/// Resolve the served path from a request's URL field.
///
/// Returns `None` only when an absolute URL carries no path component; a
/// missing or empty URL resolves to `/`.
fn resolve_path(url: Option<&UrlSpec>) -> Option<String> {
    match url {
        Some(UrlSpec::Raw(raw)) => path_from_raw(raw),
        Some(UrlSpec::Detailed { raw, path }) => {
            if let Some(raw) = raw.as_deref().filter(|r| !r.is_empty()) {
                path_from_raw(raw)
            } else if !path.is_empty() {
                Some(path_from_segments(path))
            } else {
                Some("/".to_string())
            }
        }
        None => Some("/".to_string()),
    }
}

/// Join path segments with `/` and turn `{{name}}` segment tokens into
/// single-brace `{name}` path parameters.
fn path_from_segments(segments: &[PathSegment]) -> String {
    let joined = segments
        .iter()
        .map(PathSegment::as_text)
        .collect::<Vec<_>>()
        .join("/");
    format!("/{}", joined).replace("{{", "{").replace("}}", "}")
}

/// Normalize a raw URL string into a served path.
///
/// `{{variable}}` placeholders are replaced with a fixed literal first so
/// the string parses; absolute URLs keep only their path component; anything
/// else is treated as a path and slash-prefixed.
fn path_from_raw(raw: &str) -> Option<String> {
    let substituted = substitute_variables(raw);

    if substituted.starts_with("http://") || substituted.starts_with("https://") {
        let (_, rest) = substituted.split_once("://")?;
        if !rest.contains('/') {
            // Bare host, no path component to serve
            return None;
        }
        let parsed = Url::parse(&substituted).ok()?;
        return Some(parsed.path().to_string());
    }

    if substituted.starts_with('/') {
        Some(substituted)
    } else {
        Some(format!("/{}", substituted))
    }
}

fn substitute_variables(raw: &str) -> String {
    if !raw.contains("{{") {
        return raw.to_string();
    }
    let pattern = VARIABLE_PATTERN
        .get_or_init(|| Regex::new(r"\{\{[^}]+\}\}").expect("placeholder pattern is valid"));
    pattern.replace_all(raw, VARIABLE_PLACEHOLDER).into_owned()
}

/// Map a recorded example onto the response we will serve. Header entries
/// with an empty key or value are dropped.
fn example_response(entry: &ExampleEntry) -> MockResponse {
    MockResponse {
        status: entry.code.unwrap_or(200),
        headers: entry
            .header
            .iter()
            .filter(|h| !h.key.is_empty() && !h.value.is_empty())
            .map(|h| (h.key.clone(), h.value.clone()))
            .collect(),
        body: entry.body.clone().unwrap_or_default(),
    }
}
