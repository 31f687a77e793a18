//! Application layer: content sources, the gateway, fallback content, and page views.

pub mod error;
pub mod fallback;
pub mod gateway;
pub mod generation;
pub mod source;
pub mod views;
