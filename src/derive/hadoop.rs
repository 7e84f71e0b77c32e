//! Hadoop (HDFS + YARN + MapReduce) configuration derived from the topology.

use crate::derive::{EnvPatch, HostList, KeyValueSet};
use crate::topology::Topology;
use crate::topology::model::KEY_DFS_REPLICATION;
use serde::Serialize;

pub const DEFAULT_DFS_REPLICATION: &str = "3";

/// MapReduce resource sizing. Static, not derived from the topology.
const MAPRED_STATIC: &[(&str, &str)] = &[
    ("yarn.app.mapreduce.am.resource.mb", "1024"),
    ("yarn.app.mapreduce.am.command-opts", "-Xmx768m"),
    ("mapreduce.framework.name", "yarn"),
    ("mapreduce.map.cpu.vcores", "1"),
    ("mapreduce.reduce.cpu.vcores", "1"),
    ("mapreduce.map.memory.mb", "1024"),
    ("mapreduce.map.java.opts", "-Xmx768m"),
    ("mapreduce.reduce.memory.mb", "1024"),
    ("mapreduce.reduce.java.opts", "-Xmx768m"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HadoopArtifacts {
    pub core_site: KeyValueSet,
    pub hdfs_site: KeyValueSet,
    pub yarn_site: KeyValueSet,
    pub mapred_site: KeyValueSet,
    pub env_patch: EnvPatch,
    pub slaves: HostList,
}

pub fn derive_hadoop(topology: &Topology) -> HadoopArtifacts {
    HadoopArtifacts {
        core_site: core_site(topology),
        hdfs_site: hdfs_site(topology),
        yarn_site: yarn_site(topology),
        mapred_site: mapred_site(topology),
        env_patch: env_patch(topology),
        slaves: super::worker_hosts(topology),
    }
}

/// `hdfs://host:port` of the name node.
pub fn name_node_uri(topology: &Topology) -> String {
    let nn = &topology.name_node;
    match nn.port() {
        Some(port) => format!("hdfs://{}:{}", nn.host(), port),
        None => format!("hdfs://{}", nn.host()),
    }
}

pub fn core_site(topology: &Topology) -> KeyValueSet {
    let mut kv = KeyValueSet::new();
    kv.set("fs.defaultFS", name_node_uri(topology));
    kv
}

pub fn hdfs_site(topology: &Topology) -> KeyValueSet {
    let replication = topology
        .setting(KEY_DFS_REPLICATION)
        .unwrap_or(DEFAULT_DFS_REPLICATION);

    let mut kv = KeyValueSet::new();
    kv.set("dfs.replication", replication)
        .set(
            "dfs.namenode.name.dir",
            topology.install_path("hadoop/nameNodeDir"),
        )
        .set(
            "dfs.datanode.data.dir",
            topology.install_path("hadoop/dataDir"),
        );
    kv
}

pub fn yarn_site(topology: &Topology) -> KeyValueSet {
    let mut kv = KeyValueSet::new();
    kv.set("yarn.nodemanager.aux-services", "mapreduce_shuffle")
        .set(
            "yarn.resourcemanager.hostname",
            topology.resource_manager.host(),
        );
    kv
}

pub fn mapred_site(topology: &Topology) -> KeyValueSet {
    let mut kv: KeyValueSet = MAPRED_STATIC.iter().copied().collect();
    kv.set(
        "mapreduce.jobtracker.address",
        topology.job_tracker.to_string(),
    );
    kv
}

pub fn env_patch(topology: &Topology) -> EnvPatch {
    let mut patch = EnvPatch::new();
    patch
        .export(
            "HADOOP_PREFIX",
            format!("\"{}\"", topology.install_path("hadoop")),
        )
        .export("HADOOP_HOME", "$HADOOP_PREFIX")
        .export("HADOOP_COMMON_HOME", "$HADOOP_PREFIX")
        .export("HADOOP_CONF_DIR", "$HADOOP_PREFIX/etc/hadoop")
        .export("HADOOP_HDFS_HOME", "$HADOOP_PREFIX")
        .export("HADOOP_MAPRED_HOME", "$HADOOP_PREFIX")
        .export("HADOOP_YARN_HOME", "$HADOOP_PREFIX");

    if let Some(java_home) = topology.java_home() {
        patch.export("JAVA_HOME", format!("\"{java_home}\""));
    }
    patch
}
