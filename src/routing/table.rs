//! Route-table construction
//!
//! Fetches and flattens each mounted collection strictly in mount order,
//! rewrites paths under their roots, and rejects (method, path) collisions
//! between collections that both lack an explicit root. Nothing is installed
//! until every conflict check has passed.

use std::collections::HashMap;

use crate::collection::flatten;
use crate::error::{Conflicts, Error, Result, RouteConflict};
use crate::postman::PostmanClient;
use crate::types::{CollectionMount, CollectionSummary, Route, RouteTable};

/// One fetched collection, flattened but not yet merged.
struct FlattenedCollection {
    mount: CollectionMount,
    name: String,
    routes: Vec<Route>,
}

/// Fetch every mount and merge the results into an immutable route table.
///
/// Mounts are processed sequentially in input order; that order determines
/// conflict-detection precedence and the final table order. Any fetch
/// failure aborts immediately, there is no retry.
pub async fn build_route_table(
    client: &PostmanClient,
    mounts: &[CollectionMount],
) -> Result<RouteTable> {
    let mut collections = Vec::with_capacity(mounts.len());

    for mount in mounts {
        let document = client.get_collection(&mount.id).await?;
        let routes = flatten(&document, &mount.id)?;

        let name = if document.collection.info.name.is_empty() {
            mount.id.clone()
        } else {
            document.collection.info.name.clone()
        };
        tracing::info!(
            collection = %mount.id,
            routes = routes.len(),
            "flattened collection"
        );

        collections.push(FlattenedCollection {
            mount: mount.clone(),
            name,
            routes,
        });
    }

    assemble(collections)
}

/// Pure merge step: root rewriting, tagging, and the conflict scan.
fn assemble(collections: Vec<FlattenedCollection>) -> Result<RouteTable> {
    let mut routes = Vec::new();
    let mut summaries = Vec::new();

    for collection in collections {
        let route_count = collection.routes.len();

        for mut route in collection.routes {
            if let Some(root) = &collection.mount.root {
                route.path = join_under_root(root, &route.path);
                route.root = Some(root.clone());
            }
            route.collection_id = collection.mount.id.clone();
            routes.push(route);
        }

        summaries.push(CollectionSummary {
            id: collection.mount.id,
            name: collection.name,
            root: collection.mount.root,
            route_count,
        });
    }

    let conflicts = scan_conflicts(&routes);
    if !conflicts.is_empty() {
        return Err(Error::RouteConflict(Conflicts(conflicts)));
    }

    Ok(RouteTable {
        routes,
        collections: summaries,
    })
}

/// Rewrite `path` under `root` with exactly one separating slash, whatever
/// the trailing/leading slash situation on either side.
fn join_under_root(root: &str, path: &str) -> String {
    format!(
        "{}/{}",
        root.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Scan the accumulated list in order, keyed by (method, path). A later
/// route with an already-seen key conflicts only when both it and the first
/// recorded route lack a mount root; explicit roots signal intentional
/// separation.
fn scan_conflicts(routes: &[Route]) -> Vec<RouteConflict> {
    let mut first_seen: HashMap<(String, String), &Route> = HashMap::new();
    let mut conflicts = Vec::new();

    for route in routes {
        let key = (route.method.to_ascii_uppercase(), route.path.clone());
        match first_seen.get(&key) {
            Some(existing) => {
                if existing.root.is_none() && route.root.is_none() {
                    conflicts.push(RouteConflict {
                        method: route.method.clone(),
                        path: route.path.clone(),
                        first_collection: existing.collection_id.clone(),
                        second_collection: route.collection_id.clone(),
                    });
                }
            }
            None => {
                first_seen.insert(key, route);
            }
        }
    }

    conflicts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MockResponse;

    fn route(method: &str, path: &str) -> Route {
        Route {
            method: method.to_string(),
            path: path.to_string(),
            name: format!("{} {}", method, path),
            response: MockResponse::default(),
            collection_id: String::new(),
            root: None,
        }
    }

    fn collection(id: &str, root: Option<&str>, routes: Vec<Route>) -> FlattenedCollection {
        FlattenedCollection {
            mount: CollectionMount::new(id, root.map(str::to_string)),
            name: format!("Collection {}", id),
            routes,
        }
    }

    #[test]
    fn test_join_under_root_single_slash() {
        assert_eq!(join_under_root("/api/v1", "/users"), "/api/v1/users");
        assert_eq!(join_under_root("/api/v1/", "/users"), "/api/v1/users");
        assert_eq!(join_under_root("/api/v1", "users"), "/api/v1/users");
        assert_eq!(join_under_root("/api/v1/", "users"), "/api/v1/users");
        assert_eq!(join_under_root("/", "/users"), "/users");
    }

    #[test]
    fn test_rootless_collision_is_a_conflict() {
        let err = assemble(vec![
            collection("abc123", None, vec![route("GET", "/users")]),
            collection("def456", None, vec![route("GET", "/users")]),
        ])
        .unwrap_err();

        let Error::RouteConflict(conflicts) = err else {
            panic!("expected a route conflict");
        };
        assert_eq!(conflicts.0.len(), 1);
        assert_eq!(conflicts.0[0].first_collection, "abc123");
        assert_eq!(conflicts.0[0].second_collection, "def456");

        let message = conflicts.to_string();
        assert!(message.contains("abc123"));
        assert!(message.contains("def456"));
        assert!(message.contains("GET /users"));
    }

    #[test]
    fn test_all_conflicting_pairs_are_reported() {
        let err = assemble(vec![
            collection(
                "abc123",
                None,
                vec![route("GET", "/users"), route("POST", "/orders")],
            ),
            collection(
                "def456",
                None,
                vec![route("GET", "/users"), route("POST", "/orders")],
            ),
        ])
        .unwrap_err();

        let Error::RouteConflict(conflicts) = err else {
            panic!("expected a route conflict");
        };
        assert_eq!(conflicts.0.len(), 2);
    }

    #[test]
    fn test_explicit_root_suppresses_conflict() {
        let table = assemble(vec![
            collection("abc123", None, vec![route("GET", "/users")]),
            collection("def456", Some("/api/v2"), vec![route("GET", "/users")]),
        ])
        .unwrap();

        assert_eq!(table.routes.len(), 2);
        assert_eq!(table.routes[0].path, "/users");
        assert_eq!(table.routes[1].path, "/api/v2/users");
        assert_eq!(table.routes[1].root.as_deref(), Some("/api/v2"));
    }

    #[test]
    fn test_same_root_same_path_is_not_a_conflict() {
        // Two mounts sharing a root can collide after rewriting; that is the
        // mount owner's deliberate choice, not the router's concern.
        let table = assemble(vec![
            collection("abc123", Some("/api"), vec![route("GET", "/users")]),
            collection("def456", Some("/api"), vec![route("GET", "/users")]),
        ])
        .unwrap();

        assert_eq!(table.routes.len(), 2);
        assert_eq!(table.routes[0].path, table.routes[1].path);
    }

    #[test]
    fn test_method_distinguishes_routes() {
        let table = assemble(vec![
            collection("abc123", None, vec![route("GET", "/users")]),
            collection("def456", None, vec![route("POST", "/users")]),
        ])
        .unwrap();

        assert_eq!(table.routes.len(), 2);
    }

    #[test]
    fn test_routes_are_tagged_with_owner() {
        let table = assemble(vec![collection(
            "abc123",
            Some("/api/v1/"),
            vec![route("GET", "/users")],
        )])
        .unwrap();

        assert_eq!(table.routes[0].collection_id, "abc123");
        assert_eq!(table.routes[0].path, "/api/v1/users");
        assert_eq!(table.collections.len(), 1);
        assert_eq!(table.collections[0].route_count, 1);
        assert_eq!(table.collections[0].name, "Collection abc123");
    }

    #[test]
    fn test_empty_collection_yields_zero_routes() {
        let table = assemble(vec![
            collection("abc123", None, vec![]),
            collection("def456", None, vec![route("GET", "/users")]),
        ])
        .unwrap();

        assert_eq!(table.routes.len(), 1);
        assert_eq!(table.collections[0].route_count, 0);
    }

    #[test]
    fn test_assembly_preserves_order_and_is_idempotent() {
        let build = || {
            assemble(vec![
                collection(
                    "abc123",
                    None,
                    vec![route("GET", "/a"), route("GET", "/b")],
                ),
                collection("def456", Some("/v2"), vec![route("GET", "/c")]),
            ])
            .unwrap()
        };

        let first = build();
        let second = build();

        let paths: Vec<&str> = first.routes.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(paths, vec!["/a", "/b", "/v2/c"]);
        assert_eq!(first, second);
    }
}
