use clap::{Parser, Subcommand};
use cluster_conf::Result;
use cluster_conf::topology::raw;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cluster-conf")]
#[command(about = "Materialize a cluster topology into service configuration", long_about = None)]
struct Cli {
    /// Topology document (.yaml/.yml or .json). Defaults to the embedded one.
    #[arg(long, global = true)]
    topology: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write configuration files and render scripts under the unpack root.
    Apply {
        #[arg(long, env = "UNPACK_LOCATION", default_value = "target/servers")]
        unpack_location: PathBuf,
    },

    /// Print every derived artifact as JSON without touching the filesystem.
    Plan,
}

fn main() -> Result<()> {
    // Logs go to stderr so `plan` output stays machine-readable.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // 1) Load the raw document.
    let raw_topology = match &cli.topology {
        Some(path) => raw::load_document(path)?,
        None => raw::load_embedded()?,
    };

    match cli.cmd {
        Commands::Apply { unpack_location } => {
            // 2) Resolve, derive, write.
            cluster_conf::apply(&raw_topology, &unpack_location)?;
            tracing::info!(root = %unpack_location.display(), "configuration written");
        }
        Commands::Plan => {
            let plan = cluster_conf::plan(&raw_topology)?;
            println!("{}", serde_json::to_string_pretty(&plan)?);
        }
    }

    Ok(())
}
