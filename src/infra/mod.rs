//! Infrastructure adapters: content transports, the proxy HTTP surface, and runtime bootstrap.

pub mod delivery;
pub mod error;
pub mod http;
pub mod proxy;
pub mod sources;
pub mod telemetry;
pub mod transport;
