use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::output::Format;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    Aws {
        #[command(subcommand)]
        command: AwsCommand,
    },
    State {
        #[command(subcommand)]
        command: StateCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum AwsCommand {
    Verify(VerifyArgs),
}

#[derive(Subcommand, Debug)]
pub enum StateCommand {
    Outputs(OutputsArgs),
    Resources(ResourcesArgs),
    Get(GetArgs),
}

#[derive(clap::Args, Debug)]
pub struct VerifyArgs {
    /// State file to read; discovered in the current directory when omitted
    #[arg(long)]
    pub state: Option<PathBuf>,

    /// Dotted path to the task definition identifier inside the state outputs
    #[arg(long, default_value = "task_definition.task.family")]
    pub output_path: String,

    /// Verify this task definition directly, skipping the state lookup
    #[arg(long)]
    pub task_definition: Option<String>,

    #[arg(long, env = "AWS_REGION")]
    pub region: Option<String>,

    #[arg(long, env = "AWS_PROFILE")]
    pub profile: Option<String>,

    #[arg(long, env = "AWS_ENDPOINT_URL")]
    pub endpoint_url: Option<String>,

    #[arg(long, value_enum, default_value = "table")]
    pub format: Format,
}

#[derive(clap::Args, Debug)]
pub struct OutputsArgs {
    /// State file to read; discovered in the current directory when omitted
    #[arg(long)]
    pub state: Option<PathBuf>,

    #[arg(long, value_enum, default_value = "table")]
    pub format: Format,
}

#[derive(clap::Args, Debug)]
pub struct ResourcesArgs {
    /// State file to read; discovered in the current directory when omitted
    #[arg(long)]
    pub state: Option<PathBuf>,

    #[arg(long, value_enum, default_value = "table")]
    pub format: Format,
}

#[derive(clap::Args, Debug)]
pub struct GetArgs {
    /// Dotted output path, e.g. task_definition.task.family
    pub path: String,

    /// State file to read; discovered in the current directory when omitted
    #[arg(long)]
    pub state: Option<PathBuf>,
}
