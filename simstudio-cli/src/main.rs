use clap::Parser;
use tracing_subscriber::EnvFilter;

mod args;
mod cmd;
mod commands;
mod exit_codes;
mod output;

pub use args::*;
use commands::Command;

#[derive(Debug, Parser)]
#[command(name = "simstudio", version, about = "Execute Sim Studio workflows")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("error: failed to create tokio runtime: {e}");
            std::process::exit(exit_codes::RUNTIME_ERROR);
        }
    };

    let exit_code = rt.block_on(run_command(cli.command));
    std::process::exit(exit_code);
}

async fn run_command(command: Command) -> i32 {
    match command {
        Command::Execute {
            workflow_id,
            input,
            timeout,
            output,
            connection,
        } => cmd::execute::execute_cmd(&workflow_id, input, timeout, output, connection).await,
        Command::Status {
            workflow_id,
            output,
            connection,
        } => cmd::status::status_cmd(&workflow_id, output, connection).await,
        Command::Validate {
            workflow_id,
            strict,
            output,
            connection,
        } => cmd::validate::validate_cmd(&workflow_id, strict, output, connection).await,
        Command::Batch {
            path,
            timeout,
            output,
            connection,
        } => cmd::batch::batch_cmd(&path, timeout, output, connection).await,
    }
}
