//! Wire types for the Contentful Delivery API responses consumed by `recompile`,
//! plus the query descriptors and envelope used by the same-origin content proxy.

mod entries;
mod proxy;
mod query;

pub use entries::{
    AssetFields, AssetFile, EntryCollection, Includes, Link, LinkType, RawAsset, RawEntry, Sys,
};
pub use proxy::{ProxyEnvelope, ProxyParams};
pub use query::{ContentQuery, DEFAULT_RELATED_POOL, QueryError};
