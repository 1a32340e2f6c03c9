//! Infrastructure layer: concrete collaborators behind the domain traits.
//!
//! - [`cache`] - Look-aside cache (Redis and no-op implementations)
//! - [`persistence`] - PostgreSQL store for mappings and redirect events

pub mod cache;
pub mod persistence;
