//! Accumulo site configuration and role host lists.

use crate::derive::hadoop::name_node_uri;
use crate::derive::{HostList, KeyValueSet};
use crate::topology::Topology;
use serde::Serialize;

/// Tablet server tuning and tracing defaults. Static, not derived from the topology.
const SITE_STATIC: &[(&str, &str)] = &[
    ("instance.secret", "DEFAULT"),
    ("tserver.memory.maps.max", "256M"),
    ("tserver.memory.maps.native.enabled", "true"),
    ("tserver.cache.data.size", "15M"),
    ("tserver.cache.index.size", "40M"),
    ("trace.token.property.password", "secret"),
    ("trace.user", "root"),
    ("tserver.sort.buffer.size", "50M"),
    ("tserver.walog.max.size", "256M"),
];

/// Classpath patterns relative to the install directory.
const CLASSPATH_PATTERNS: &[&str] = &[
    "accumulo/lib/accumulo-server.jar",
    "accumulo/lib/accumulo-core.jar",
    "accumulo/lib/accumulo-start.jar",
    "accumulo/lib/accumulo-fate.jar",
    "accumulo/lib/accumulo-proxy.jar",
    "accumulo/lib/[^.].*.jar",
    "zookeeper/zookeeper[^.].*.jar",
    "hadoop/etc/hadoop",
    "hadoop/share/hadoop/common/[^.].*.jar",
    "hadoop/share/hadoop/common/lib/(?!slf4j)[^.].*.jar",
    "hadoop/share/hadoop/hdfs/[^.].*.jar",
    "hadoop/share/hadoop/mapreduce/[^.].*.jar",
    "hadoop/share/hadoop/yarn/[^.].*.jar",
    "hadoop/share/hadoop/yarn/lib/jersey.*.jar",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccumuloArtifacts {
    pub site: KeyValueSet,
    pub slaves: HostList,
    pub masters: HostList,
    pub monitor: HostList,
    pub tracers: HostList,
    pub gc: HostList,
}

pub fn derive_accumulo(topology: &Topology) -> AccumuloArtifacts {
    let master = topology.accumulo_master.host();
    AccumuloArtifacts {
        site: site(topology),
        slaves: super::worker_hosts(topology),
        masters: HostList::single(master),
        monitor: HostList::single(master),
        tracers: HostList::single(master),
        gc: HostList::single(master),
    }
}

pub fn site(topology: &Topology) -> KeyValueSet {
    let zookeepers = topology
        .zookeepers
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",");

    let mut kv: KeyValueSet = SITE_STATIC.iter().copied().collect();
    kv.set(
        "instance.volumes",
        format!("{}/accumulo", name_node_uri(topology)),
    )
    .set("instance.zookeeper.host", zookeepers)
    .set("general.classpaths", classpaths(topology));
    kv
}

/// Comma-separated, one entry per line.
pub fn classpaths(topology: &Topology) -> String {
    CLASSPATH_PATTERNS
        .iter()
        .map(|p| topology.install_path(p))
        .collect::<Vec<_>>()
        .join(",\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derive::tests::topology;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn volumes_and_zookeeper_hosts() {
        let kv = site(&topology(json!({
            "name-node": "nn1:8020",
            "zookeeper-nodes": ["zk1", "zk2:2182", "zk3"],
        })));
        assert_eq!(kv.get("instance.volumes"), Some("hdfs://nn1:8020/accumulo"));
        assert_eq!(
            kv.get("instance.zookeeper.host"),
            Some("zk1,zk2:2182,zk3")
        );
    }

    #[test]
    fn static_tuning_is_present() {
        let kv = site(&topology(json!({})));
        assert_eq!(kv.get("instance.secret"), Some("DEFAULT"));
        assert_eq!(kv.get("tserver.memory.maps.max"), Some("256M"));
        assert_eq!(kv.get("tserver.walog.max.size"), Some("256M"));
        assert_eq!(kv.iter().count(), SITE_STATIC.len() + 3);
    }

    #[test]
    fn classpaths_are_rooted_at_install_dir() {
        let cp = classpaths(&topology(json!({"cloud-install-dir": "/srv/"})));
        let entries: Vec<&str> = cp.split(",\n").collect();
        assert_eq!(entries.len(), CLASSPATH_PATTERNS.len());
        assert_eq!(entries[0], "/srv/accumulo/lib/accumulo-server.jar");
        assert!(entries.iter().all(|e| e.starts_with("/srv/")));
        assert!(!cp.ends_with(','));
    }

    #[test]
    fn role_host_lists_hold_master_host() {
        let a = derive_accumulo(&topology(json!({"accumulo-master": "am1:9999"})));
        for list in [&a.masters, &a.monitor, &a.tracers, &a.gc] {
            assert_eq!(list.render(), "am1");
        }
    }

    #[test]
    fn slaves_keep_worker_order() {
        let a = derive_accumulo(&topology(json!({"data-nodes": ["dn3", "dn1", "dn2"]})));
        assert_eq!(a.slaves.render(), "dn3\ndn1\ndn2");
    }
}
