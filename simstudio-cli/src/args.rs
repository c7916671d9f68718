use std::path::PathBuf;

use clap::Args;

use crate::output::OutputFormat;

#[derive(Debug, Args, Clone)]
pub struct OutputArgs {
    #[arg(long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

/// Falls back to `SIMSTUDIO_API_KEY` / `SIMSTUDIO_BASE_URL` when not given.
#[derive(Debug, Args, Clone)]
pub struct ConnectionArgs {
    #[arg(long, global = true)]
    pub api_key: Option<String>,
    #[arg(long, global = true)]
    pub base_url: Option<String>,
}

#[derive(Debug, Args, Clone)]
pub struct InputArgs {
    /// JSON or YAML file with the workflow input.
    #[arg(long)]
    pub input: Option<PathBuf>,
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub set_inputs: Vec<String>,
}

#[derive(Debug, Args, Clone)]
pub struct TimeoutArgs {
    /// Seconds.
    #[arg(long, default_value_t = 30.0)]
    pub timeout: f64,
}
