use thiserror::Error;

/// Failures while turning a raw topology document into a [`Topology`](super::Topology).
///
/// Every variant aborts the run; there is no partial-topology mode.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TopologyError {
    /// A key with no default is absent (or null) in the document.
    #[error("missing required topology key `{field}`")]
    MissingRequiredField { field: String },

    /// The string does not match `host[:port]` or the port is out of range.
    #[error("malformed endpoint {raw:?}: expected host[:port] with port in 1-65535")]
    MalformedEndpoint { raw: String },

    /// Neither a raw value nor a fallback value was available.
    #[error("no endpoint value and no fallback available")]
    MissingEndpoint,

    /// A recognized key holds a value of the wrong shape.
    #[error("topology key `{field}` must be {expected}")]
    InvalidFieldType {
        field: String,
        expected: &'static str,
    },
}
