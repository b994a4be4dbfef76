//! HTTP serving layer

mod handlers;
mod routes;

pub use routes::create_router;
