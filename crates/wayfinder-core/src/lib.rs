//! Cross-cutting service plumbing: configuration loading,
//! request-id middleware, tracing setup and serde helpers.

pub mod config;
pub mod middleware;
pub mod serde;
pub mod tracing;
