// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Defines the convert subcommand and its emission flags.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "konvoy")]
#[command(about = "Convert application service models into Kubernetes and OpenShift manifests")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress progress messages
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a service model into cluster resources
    Convert(ConvertArgs),
}

#[derive(Args)]
pub struct ConvertArgs {
    /// Service model file (defaults to konvoy.yml in the current directory)
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Write to this file, or into this directory if it exists or ends with '/'
    #[arg(short, long, conflicts_with = "stdout")]
    pub out: Option<PathBuf>,

    /// Write all documents to stdout
    #[arg(long)]
    pub stdout: bool,

    /// Generate YAML instead of JSON
    #[arg(short, long)]
    pub yaml: bool,

    /// Desired replicas for deployments and replication controllers
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(i32).range(0..))]
    pub replicas: i32,

    /// Emit Deployments (the default when no kind is chosen)
    #[arg(long)]
    pub deployment: bool,

    /// Emit DaemonSets
    #[arg(long)]
    pub daemon_set: bool,

    /// Emit ReplicationControllers
    #[arg(long)]
    pub replication_controller: bool,

    /// Emit OpenShift DeploymentConfigs
    #[arg(long)]
    pub deployment_config: bool,

    /// Package the output as a Helm chart
    #[arg(short, long)]
    pub chart: bool,
}
