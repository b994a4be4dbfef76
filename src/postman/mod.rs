//! Postman management API client

mod client;

pub use client::PostmanClient;
