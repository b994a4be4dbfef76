//! Postmock - serve Postman collections as local mock HTTP servers

pub mod config;
pub mod error;
pub mod types;

pub mod api;
pub mod collection;
pub mod postman;
pub mod routing;

pub use config::Config;
pub use error::{Error, Result};
pub use types::*;
