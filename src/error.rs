//! Error types for Postmock

use std::fmt;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Collection not found: {0}")]
    CollectionNotFound(String),

    #[error("Postman API authentication failed (status {0}); check POSTMAN_API_KEY")]
    Auth(u16),

    #[error("Postman API request failed with status {0}")]
    Api(u16),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Malformed collection document: {0}")]
    MalformedCollection(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Conflicting routes across collections: {0}")]
    RouteConflict(Conflicts),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// One (method, path) pair claimed by two collections that both lack an
/// explicit mount root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteConflict {
    pub method: String,
    pub path: String,
    pub first_collection: String,
    pub second_collection: String,
}

impl fmt::Display for RouteConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} (collections {} and {})",
            self.method, self.path, self.first_collection, self.second_collection
        )
    }
}

/// Every conflict found during a route-table build, in scan order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflicts(pub Vec<RouteConflict>);

impl fmt::Display for Conflicts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, conflict) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}", conflict)?;
        }
        Ok(())
    }
}
