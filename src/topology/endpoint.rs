//! Endpoint type and the `host[:port]` parser.
//!
//! Example: "zk1:2181"  =>  Endpoint { host: "zk1", port: Some(2181) }
//!          "zk1"       =>  Endpoint { host: "zk1", port: <default or None> }

use crate::topology::TopologyError;
use regex::Regex;
use serde::Serialize;
use std::fmt;

/// Default ports applied per role when the document omits one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortDefaults {
    pub name_node: u16,
    pub resource_manager: u16,
    pub job_tracker: u16,
}

impl Default for PortDefaults {
    fn default() -> Self {
        Self {
            name_node: 9000,
            resource_manager: 8032,
            job_tracker: 8021,
        }
    }
}

/// A resolved host with an optional port. `host` is never empty.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Endpoint {
    host: String,
    port: Option<u16>,
}

impl Endpoint {
    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> Option<u16> {
        self.port
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.port {
            Some(port) => write!(f, "{}:{}", self.host, port),
            None => f.write_str(&self.host),
        }
    }
}

/// Parses endpoint strings. Holds the compiled grammar so callers build it once.
#[derive(Debug, Clone)]
pub struct EndpointParser {
    grammar: Regex,
}

impl EndpointParser {
    pub fn new() -> anyhow::Result<Self> {
        // host: one or more non-colon chars; port: optional digit run.
        let grammar = Regex::new(r"^(?P<host>[^:]+)(?::(?P<port>\d+))?$")?;
        Ok(Self { grammar })
    }

    /// Parse `raw`, falling back to `default_raw` when `raw` is absent.
    ///
    /// A port in the string always wins over `default_port`.
    pub fn parse(
        &self,
        raw: Option<&str>,
        default_port: Option<u16>,
        default_raw: Option<&str>,
    ) -> Result<Endpoint, TopologyError> {
        let text = raw.or(default_raw).ok_or(TopologyError::MissingEndpoint)?;

        let malformed = || TopologyError::MalformedEndpoint {
            raw: text.to_string(),
        };

        let caps = self.grammar.captures(text).ok_or_else(malformed)?;
        let host = caps.name("host").ok_or_else(malformed)?.as_str();

        let port = match caps.name("port") {
            Some(m) => match m.as_str().parse::<u16>() {
                Ok(0) | Err(_) => return Err(malformed()),
                Ok(p) => Some(p),
            },
            None => default_port,
        };

        Ok(Endpoint {
            host: host.to_string(),
            port,
        })
    }
}
