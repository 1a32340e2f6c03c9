//! HTTP layer translating requests into service calls.
//!
//! # Modules
//!
//! - [`dto`] - Request/response bodies
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Request processing middleware
//! - [`routes`] - Shortening and analytics routes

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
