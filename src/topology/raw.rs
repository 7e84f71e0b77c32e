//! Raw topology document: a flat, string-keyed map of dynamically typed values.
//!
//! YAML shape:
//! name-node: nn1:9000
//! data-nodes: [dn1, dn2]
//! zookeeper-nodes: [zk1, zk2, zk3]
//! accumulo-master: am1
//! cloud-install-dir: /opt/cloud
//! dfs.replication: "2"
//!
//! JSON documents use the same keys.

use anyhow::{Context, bail};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// The topology bundled with the binary, used when no document is given.
pub const EMBEDDED_TOPOLOGY: &str = include_str!("../../conf/config.yaml");

/// Top-level keys mapped to their undecoded values.
pub type RawTopology = BTreeMap<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Yaml,
    Json,
}

impl DocumentFormat {
    /// `.json` is JSON; everything else, including no extension, is YAML.
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("json") => Self::Json,
            _ => Self::Yaml,
        }
    }
}

pub fn parse_document(text: &str, format: DocumentFormat) -> anyhow::Result<RawTopology> {
    let doc: Option<RawTopology> = match format {
        DocumentFormat::Yaml => {
            serde_yaml_ng::from_str(text).context("invalid topology YAML")?
        }
        DocumentFormat::Json => serde_json::from_str(text).context("invalid topology JSON")?,
    };

    match doc {
        Some(map) => Ok(map),
        None => bail!("topology document is empty"),
    }
}

pub fn load_document(path: &Path) -> anyhow::Result<RawTopology> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("read topology document {}", path.display()))?;
    parse_document(&text, DocumentFormat::from_path(path))
        .with_context(|| format!("parse topology document {}", path.display()))
}

pub fn load_embedded() -> anyhow::Result<RawTopology> {
    parse_document(EMBEDDED_TOPOLOGY, DocumentFormat::Yaml).context("parse embedded topology")
}
