//! Domain layer: content records, link resolution, and post-list rules.

pub mod entities;
pub mod posts;
pub mod resolve;
