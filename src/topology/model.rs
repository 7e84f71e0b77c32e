//! Resolved topology: every role turned into endpoints, settings kept as strings.
//!
//! We check required keys, parse endpoint strings, and apply role fallbacks:
//! - resource manager and job tracker default to the name node's host
//! - data nodes and zookeeper nodes keep their input order and get no default port

use crate::topology::{Endpoint, EndpointParser, PortDefaults, RawTopology, TopologyError};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

pub const KEY_NAME_NODE: &str = "name-node";
pub const KEY_DATA_NODES: &str = "data-nodes";
pub const KEY_ZOOKEEPER_NODES: &str = "zookeeper-nodes";
pub const KEY_ACCUMULO_MASTER: &str = "accumulo-master";
pub const KEY_INSTALL_DIR: &str = "cloud-install-dir";
pub const KEY_JAVA_HOME: &str = "java-home";
pub const KEY_DFS_REPLICATION: &str = "dfs.replication";
pub const KEY_RESOURCE_MANAGER: &str = "yarn.resourcemanager.hostname";
pub const KEY_JOB_TRACKER: &str = "mapreduce.jobtracker.address";
pub const KEY_CLUSTER_NAME: &str = "hadoop-cluster-name";

pub const DEFAULT_CLUSTER_NAME: &str = "hadoop-cluster";

/// Immutable, fully resolved view of the cluster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Topology {
    pub name_node: Endpoint,
    pub data_nodes: Vec<Endpoint>,
    pub zookeepers: Vec<Endpoint>,
    pub accumulo_master: Endpoint,
    pub resource_manager: Endpoint,
    pub job_tracker: Endpoint,
    pub install_dir: String,

    /// Every scalar top-level value, stringified.
    pub settings: BTreeMap<String, String>,

    /// String-valued top-level keys plus the cluster name, fed to script templates.
    pub template_values: BTreeMap<String, String>,
}

impl Topology {
    /// Validate the raw document and resolve all roles. Fails on the first problem.
    pub fn build(
        raw: &RawTopology,
        parser: &EndpointParser,
        ports: &PortDefaults,
    ) -> Result<Self, TopologyError> {
        let name_node = parser.parse(
            Some(required_str(raw, KEY_NAME_NODE)?),
            Some(ports.name_node),
            None,
        )?;

        let data_nodes = endpoint_list(raw, KEY_DATA_NODES, parser)?;
        let zookeepers = endpoint_list(raw, KEY_ZOOKEEPER_NODES, parser)?;

        let accumulo_master =
            parser.parse(Some(required_str(raw, KEY_ACCUMULO_MASTER)?), None, None)?;

        let resource_manager = parser.parse(
            optional_str(raw, KEY_RESOURCE_MANAGER)?,
            Some(ports.resource_manager),
            Some(name_node.host()),
        )?;
        let job_tracker = parser.parse(
            optional_str(raw, KEY_JOB_TRACKER)?,
            Some(ports.job_tracker),
            Some(name_node.host()),
        )?;

        let install_dir = required_str(raw, KEY_INSTALL_DIR)?.to_string();

        let mut settings = BTreeMap::new();
        let mut template_values = BTreeMap::new();
        for (key, value) in raw {
            match value {
                Value::String(s) => {
                    settings.insert(key.clone(), s.clone());
                    template_values.insert(key.clone(), s.clone());
                }
                Value::Number(n) => {
                    settings.insert(key.clone(), n.to_string());
                }
                Value::Bool(b) => {
                    settings.insert(key.clone(), b.to_string());
                }
                Value::Null | Value::Array(_) | Value::Object(_) => {}
            }
        }
        // Scripts always see a cluster name, even a numeric one.
        let cluster_name = settings
            .get(KEY_CLUSTER_NAME)
            .cloned()
            .unwrap_or_else(|| DEFAULT_CLUSTER_NAME.to_string());
        template_values.insert(KEY_CLUSTER_NAME.to_string(), cluster_name);

        Ok(Self {
            name_node,
            data_nodes,
            zookeepers,
            accumulo_master,
            resource_manager,
            job_tracker,
            install_dir,
            settings,
            template_values,
        })
    }

    pub fn setting(&self, key: &str) -> Option<&str> {
        self.settings.get(key).map(String::as_str)
    }

    pub fn java_home(&self) -> Option<&str> {
        self.setting(KEY_JAVA_HOME)
    }

    /// `<install_dir>/<suffix>` with exactly one separator between them.
    pub fn install_path(&self, suffix: &str) -> String {
        format!(
            "{}/{}",
            self.install_dir.trim_end_matches('/'),
            suffix.trim_start_matches('/')
        )
    }
}

/// Present-and-non-null value, or `None`.
fn lookup<'a>(raw: &'a RawTopology, key: &str) -> Option<&'a Value> {
    raw.get(key).filter(|v| !v.is_null())
}

fn optional_str<'a>(raw: &'a RawTopology, key: &str) -> Result<Option<&'a str>, TopologyError> {
    match lookup(raw, key) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(_) => Err(TopologyError::InvalidFieldType {
            field: key.to_string(),
            expected: "a string",
        }),
    }
}

fn required_str<'a>(raw: &'a RawTopology, key: &str) -> Result<&'a str, TopologyError> {
    optional_str(raw, key)?.ok_or_else(|| TopologyError::MissingRequiredField {
        field: key.to_string(),
    })
}

fn endpoint_list(
    raw: &RawTopology,
    key: &str,
    parser: &EndpointParser,
) -> Result<Vec<Endpoint>, TopologyError> {
    let invalid = || TopologyError::InvalidFieldType {
        field: key.to_string(),
        expected: "a list of strings",
    };

    let items = match lookup(raw, key) {
        None => {
            return Err(TopologyError::MissingRequiredField {
                field: key.to_string(),
            });
        }
        Some(Value::Array(items)) => items,
        Some(_) => return Err(invalid()),
    };

    items
        .iter()
        .map(|item| {
            let s = item.as_str().ok_or_else(invalid)?;
            parser.parse(Some(s), None, None)
        })
        .collect()
}
