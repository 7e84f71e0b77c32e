//! Topology layer: raw document loading + validated in-memory model.
//!
//! This module is intentionally separate from derivation and writing.
//! It owns:
//! - Endpoint type and parser (host[:port])
//! - Raw document loading (YAML / JSON)
//! - Topology (resolved roles and settings)

pub mod endpoint;
pub mod error;
pub mod model;
pub mod raw;

pub use endpoint::{Endpoint, EndpointParser, PortDefaults};
pub use error::TopologyError;
pub use model::Topology;
pub use raw::RawTopology;
