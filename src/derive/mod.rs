//! Derivation: pure functions from a [`Topology`] to per-service artifacts.
//!
//! Nothing here touches the filesystem; see `write` for that.

pub mod accumulo;
pub mod artifact;
pub mod hadoop;
pub mod zookeeper;

pub use accumulo::{AccumuloArtifacts, derive_accumulo};
pub use artifact::{EnvPatch, HostList, KeyValueSet};
pub use hadoop::{HadoopArtifacts, derive_hadoop};
pub use zookeeper::{ZookeeperArtifacts, derive_zookeeper};

use crate::topology::Topology;
use serde::Serialize;
use std::collections::BTreeMap;

/// Everything one run emits, before serialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Plan {
    pub hadoop: HadoopArtifacts,
    pub zookeeper: ZookeeperArtifacts,
    pub accumulo: AccumuloArtifacts,
    pub scripts: BTreeMap<String, String>,
}

pub fn derive_plan(topology: &Topology) -> Plan {
    Plan {
        hadoop: derive_hadoop(topology),
        zookeeper: derive_zookeeper(topology),
        accumulo: derive_accumulo(topology),
        scripts: topology.template_values.clone(),
    }
}

/// Data node hosts, ports dropped, input order.
fn worker_hosts(topology: &Topology) -> HostList {
    HostList::new(
        topology
            .data_nodes
            .iter()
            .map(|ep| ep.host().to_string())
            .collect(),
    )
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::topology::{EndpointParser, PortDefaults, RawTopology};
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};

    /// Build a topology from a small base document with `overrides` merged on top.
    pub(crate) fn topology(overrides: Value) -> Topology {
        let mut doc = json!({
            "name-node": "nn1",
            "data-nodes": ["dn1", "dn2"],
            "zookeeper-nodes": ["zk1", "zk2", "zk3"],
            "accumulo-master": "am1",
            "cloud-install-dir": "/opt/cloud",
        });
        if let (Some(base), Value::Object(extra)) = (doc.as_object_mut(), overrides) {
            base.extend(extra);
        }
        let raw: RawTopology = serde_json::from_value(doc).unwrap();
        Topology::build(
            &raw,
            &EndpointParser::new().unwrap(),
            &PortDefaults::default(),
        )
        .unwrap()
    }

    #[test]
    fn reference_topology_end_to_end() {
        let plan = derive_plan(&topology(json!({})));

        assert_eq!(plan.hadoop.slaves.render(), "dn1\ndn2");
        assert_eq!(plan.accumulo.slaves.render(), "dn1\ndn2");
        assert_eq!(
            plan.hadoop.core_site.get("fs.defaultFS"),
            Some("hdfs://nn1:9000")
        );
        let zoo = &plan.zookeeper.zoo_conf;
        assert_eq!(zoo.get("server.1"), Some("zk1:2888:3888"));
        assert_eq!(zoo.get("server.2"), Some("zk2:2888:3888"));
        assert_eq!(zoo.get("server.3"), Some("zk3:2888:3888"));
        assert!(!zoo.contains_key("server.4"));
    }

    #[test]
    fn derivation_is_idempotent() {
        let t = topology(json!({"java-home": "/jvm", "dfs.replication": "2"}));
        let first = serde_json::to_string(&derive_plan(&t)).unwrap();
        let second = serde_json::to_string(&derive_plan(&t)).unwrap();
        assert_eq!(first, second);
        assert_eq!(derive_plan(&t), derive_plan(&t.clone()));
    }

    #[test]
    fn scripts_carry_template_values() {
        let plan = derive_plan(&topology(json!({"hadoop-cluster-name": "prod"})));
        assert_eq!(plan.scripts["hadoop-cluster-name"], "prod");
        assert_eq!(plan.scripts["name-node"], "nn1");
    }
}
