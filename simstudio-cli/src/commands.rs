use std::path::PathBuf;

use clap::Subcommand;

use crate::args::*;

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Execute a workflow and print its result.
    Execute {
        workflow_id: String,
        #[command(flatten)]
        input: InputArgs,
        #[command(flatten)]
        timeout: TimeoutArgs,
        #[command(flatten)]
        output: OutputArgs,
        #[command(flatten)]
        connection: ConnectionArgs,
    },
    /// Show the deployment status of a workflow.
    Status {
        workflow_id: String,
        #[command(flatten)]
        output: OutputArgs,
        #[command(flatten)]
        connection: ConnectionArgs,
    },
    /// Check that a workflow is deployed and ready to execute.
    Validate {
        workflow_id: String,
        /// Report status errors instead of treating them as "not ready".
        #[arg(long)]
        strict: bool,
        #[command(flatten)]
        output: OutputArgs,
        #[command(flatten)]
        connection: ConnectionArgs,
    },
    /// Execute every deployed workflow listed in a manifest.
    Batch {
        path: PathBuf,
        #[command(flatten)]
        timeout: TimeoutArgs,
        #[command(flatten)]
        output: OutputArgs,
        #[command(flatten)]
        connection: ConnectionArgs,
    },
}
