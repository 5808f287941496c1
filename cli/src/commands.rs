//! Command-line surface of `heketi-cli`

use clap::{Args, Parser, Subcommand};
use serde_json::Value;

use crate::client::{HeketiClient, CLUSTERS, NODES, VOLUMES};
use crate::errors::ClientError;

/// Manage clusters, nodes and volumes through the storage gateway.
///
/// The gateway is taken from HEKETI_CLI_SERVER unless --server is given.
#[derive(Parser, Debug)]
#[command(name = "heketi-cli", version)]
pub struct Cli {
    /// Print responses as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Gateway URL
    #[arg(long, global = true)]
    pub server: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Manage clusters (sets of storage nodes)
    #[command(subcommand)]
    Cluster(ClusterCommand),
    /// Register storage nodes
    #[command(subcommand)]
    Node(NodeCommand),
    /// Manage volumes
    #[command(subcommand)]
    Volume(VolumeCommand),
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum ClusterCommand {
    /// Create an empty cluster
    Create,
    /// Destroy the cluster with the given id
    Destroy { id: String },
    /// List all clusters
    List,
    /// Show the cluster with the given id
    Info { id: String },
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum NodeCommand {
    /// Add a node to a cluster
    Add(NodeAddArgs),
    /// Remove the node with the given id
    Destroy { id: String },
    /// List all nodes
    List,
    /// Show the node with the given id
    Info { id: String },
}

#[derive(Args, Debug, PartialEq)]
pub struct NodeAddArgs {
    /// Cluster the node joins
    #[arg(long)]
    pub cluster: String,
    /// Failure domain of the node
    #[arg(long, default_value_t = 0)]
    pub zone: u32,
    #[arg(long = "manage-host-name")]
    pub manage_host_name: String,
    #[arg(long = "storage-host-name")]
    pub storage_host_name: String,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum VolumeCommand {
    /// Create a volume
    Create {
        /// Size in GB
        #[arg(long)]
        size: u64,
        #[arg(long)]
        name: Option<String>,
    },
    /// Destroy the volume with the given id
    Destroy { id: String },
    /// List all volumes
    List,
    /// Show the volume with the given id
    Info { id: String },
}

/// Run `command` against the gateway and return what should be printed
pub async fn execute(
    command: &Command,
    client: &HeketiClient,
    json_output: bool,
) -> Result<String, ClientError> {
    match command {
        Command::Cluster(ClusterCommand::Create) => {
            let cluster = client.cluster_create().await?;
            Ok(created("cluster", cluster, json_output))
        }
        Command::Cluster(ClusterCommand::Destroy { id }) => {
            client.cluster_destroy(id).await?;
            Ok(format!("Cluster {} destroyed", id))
        }
        Command::Cluster(ClusterCommand::List) => Ok(render(&client.list(CLUSTERS).await?)),
        Command::Cluster(ClusterCommand::Info { id }) => Ok(render(&client.info(CLUSTERS, id).await?)),

        Command::Node(NodeCommand::Add(args)) => {
            let node = client
                .node_add(
                    &args.cluster,
                    args.zone,
                    &args.manage_host_name,
                    &args.storage_host_name,
                )
                .await?;
            Ok(created("node", node, json_output))
        }
        Command::Node(NodeCommand::Destroy { id }) => {
            client.node_destroy(id).await?;
            Ok(format!("Node {} destroyed", id))
        }
        Command::Node(NodeCommand::List) => Ok(render(&client.list(NODES).await?)),
        Command::Node(NodeCommand::Info { id }) => Ok(render(&client.info(NODES, id).await?)),

        Command::Volume(VolumeCommand::Create { size, name }) => {
            let volume = client.volume_create(*size, name.as_deref()).await?;
            Ok(created("volume", volume, json_output))
        }
        Command::Volume(VolumeCommand::Destroy { id }) => {
            client.volume_destroy(id).await?;
            Ok(format!("Volume {} destroyed", id))
        }
        Command::Volume(VolumeCommand::List) => Ok(render(&client.list(VOLUMES).await?)),
        Command::Volume(VolumeCommand::Info { id }) => Ok(render(&client.info(VOLUMES, id).await?)),
    }
}

fn created(kind: &str, created: Option<Value>, json_output: bool) -> String {
    match created {
        Some(value) if json_output => render(&value),
        Some(value) => match value.get("id") {
            Some(Value::String(id)) => format!("Successfully created {} with id: {}", kind, id),
            Some(id) => format!("Successfully created {} with id: {}", kind, id),
            None => format!("Successfully created {}", kind),
        },
        None => format!("Successfully created {}", kind),
    }
}

fn render(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
