//! Router construction from a built route table

use std::collections::HashSet;

use axum::routing::{on, MethodFilter, MethodRouter};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers;
use crate::types::RouteTable;

/// Build the axum router serving every route in the table.
///
/// Each route gets a handler that always returns its fixed response.
/// Duplicate (method, path) pairs can only reach this point through
/// explicitly rooted mounts sharing a root; the first declaration wins.
pub fn create_router(table: &RouteTable) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut method_routers: Vec<(String, MethodRouter)> = Vec::new();
    let mut seen: HashSet<(String, String)> = HashSet::new();

    for route in &table.routes {
        if !seen.insert((route.method.clone(), route.path.clone())) {
            tracing::warn!(
                method = %route.method,
                path = %route.path,
                collection = %route.collection_id,
                "duplicate route not registered; first declaration wins"
            );
            continue;
        }

        let Some(filter) = method_filter(&route.method) else {
            tracing::warn!(
                method = %route.method,
                path = %route.path,
                "unsupported HTTP method, route not registered"
            );
            continue;
        };

        let response = route.response.clone();
        let handler = move || {
            let response = response.clone();
            async move { handlers::mock_response(&response) }
        };

        match method_routers.iter_mut().find(|(path, _)| path == &route.path) {
            Some((_, method_router)) => {
                let merged = std::mem::take(method_router).on(filter, handler);
                *method_router = merged;
            }
            None => method_routers.push((route.path.clone(), on(filter, handler))),
        }
    }

    let mut router = Router::new();
    for (path, method_router) in method_routers {
        router = router.route(&path, method_router);
    }

    router.layer(cors).layer(TraceLayer::new_for_http())
}

fn method_filter(method: &str) -> Option<MethodFilter> {
    match method {
        "GET" => Some(MethodFilter::GET),
        "POST" => Some(MethodFilter::POST),
        "PUT" => Some(MethodFilter::PUT),
        "PATCH" => Some(MethodFilter::PATCH),
        "DELETE" => Some(MethodFilter::DELETE),
        "HEAD" => Some(MethodFilter::HEAD),
        "OPTIONS" => Some(MethodFilter::OPTIONS),
        "TRACE" => Some(MethodFilter::TRACE),
        _ => None,
    }
}
