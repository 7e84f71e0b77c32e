//! Turn one cluster topology document into Hadoop, ZooKeeper and Accumulo
//! configuration files, host lists and templated scripts.
//!
//! Pipeline: load raw document -> [`topology::Topology`] -> [`derive::Plan`] -> [`write::ArtifactWriter`].

pub mod derive;
pub mod render;
pub mod topology;
pub mod write;

use tracing::info;

pub type Result<T> = anyhow::Result<T>;

/// Resolve the topology and derive every artifact. Touches no files.
pub fn plan(raw: &topology::RawTopology) -> Result<derive::Plan> {
    let parser = topology::EndpointParser::new()?;
    let resolved = topology::Topology::build(raw, &parser, &topology::PortDefaults::default())?;
    info!(
        name_node = %resolved.name_node,
        data_nodes = resolved.data_nodes.len(),
        zookeepers = resolved.zookeepers.len(),
        accumulo_master = %resolved.accumulo_master,
        "resolved topology"
    );
    Ok(derive::derive_plan(&resolved))
}

/// Derive every artifact and write it under `root`.
pub fn apply(raw: &topology::RawTopology, root: &std::path::Path) -> Result<()> {
    let plan = plan(raw)?;
    write::ArtifactWriter::new(root)?.write_plan(&plan)
}
