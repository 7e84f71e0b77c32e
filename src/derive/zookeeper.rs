//! ZooKeeper ensemble configuration.

use crate::derive::KeyValueSet;
use crate::topology::Topology;
use serde::Serialize;

pub const CLIENT_PORT: u16 = 2181;
/// Quorum peer port, fixed by the ZooKeeper protocol.
pub const PEER_PORT: u16 = 2888;
/// Leader election port, fixed by the ZooKeeper protocol.
pub const ELECTION_PORT: u16 = 3888;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ZookeeperArtifacts {
    pub zoo_conf: KeyValueSet,
}

pub fn derive_zookeeper(topology: &Topology) -> ZookeeperArtifacts {
    let mut kv = KeyValueSet::new();
    kv.set("tickTime", "2000")
        .set("dataDir", topology.install_path("zookeeper/dataDir"))
        .set("clientPort", CLIENT_PORT.to_string())
        .set("initLimit", "10")
        .set("syncLimit", "5");

    // A standalone server takes no peer list.
    if topology.zookeepers.len() > 1 {
        for (idx, zk) in topology.zookeepers.iter().enumerate() {
            kv.set(
                format!("server.{}", idx + 1),
                format!("{}:{}:{}", zk.host(), PEER_PORT, ELECTION_PORT),
            );
        }
    }

    ZookeeperArtifacts { zoo_conf: kv }
}
