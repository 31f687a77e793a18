//! Content resolution layer for the Please Recompile blog.
//!
//! Raw Contentful responses are flattened by [`domain::resolve`], decoded and settled against
//! static fallback content by [`application::gateway::ContentGateway`], and fetched through a
//! [`application::source::ContentSource`] picked at startup.

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
