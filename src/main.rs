mod cli;
mod control;
mod error;
mod output;
mod providers;
mod resource;
mod terraform;

use std::path::{Path, PathBuf};

use clap::Parser;
use color_eyre::eyre::Result;
use tracing_subscriber::EnvFilter;

use cli::{AwsCommand, Cli, Command, GetArgs, OutputsArgs, ResourcesArgs, StateCommand, VerifyArgs};
use control::{Check, Control, Summary};
use error::TivError;
use providers::aws::ECS_TASK_DEFINITION;
use resource::VerifyConfig;
use terraform::StateFile;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Aws { command } => match command {
            AwsCommand::Verify(args) => run_verify(args).await?,
        },
        Command::State { command } => match command {
            StateCommand::Outputs(args) => run_state_outputs(args)?,
            StateCommand::Resources(args) => run_state_resources(args)?,
            StateCommand::Get(args) => run_state_get(args)?,
        },
    }

    Ok(())
}

async fn run_verify(args: VerifyArgs) -> Result<(), TivError> {
    let task_definition = match args.task_definition {
        Some(id) => id,
        None => {
            let path = resolve_state_path(args.state)?;
            let state = StateFile::from_path(&path)?;
            let id = state.output_string(&args.output_path)?;
            tracing::info!(
                path = %path.display(),
                output_path = %args.output_path,
                task_definition = %id,
                "resolved task definition from state"
            );
            id
        }
    };

    let config = VerifyConfig {
        region: args.region,
        profile: args.profile,
        endpoint_url: args.endpoint_url,
    };
    let provider = providers::get_provider("aws", &config)?;

    let control =
        Control::new("default").check(Check::exists(ECS_TASK_DEFINITION, &task_definition));
    let reports = vec![control.run(provider.as_ref()).await];

    println!("{}", output::render_reports(&reports, args.format)?);

    let summary = Summary::of(&reports);
    if summary.all_passed() {
        tracing::info!(total = summary.total, "verification passed");
        Ok(())
    } else {
        Err(TivError::VerificationFailed {
            failed: summary.failed,
            errors: summary.errors,
            total: summary.total,
        })
    }
}

fn run_state_outputs(args: OutputsArgs) -> Result<(), TivError> {
    let state = load_state(args.state)?;
    println!("{}", output::render_outputs(&state, args.format)?);
    Ok(())
}

fn run_state_resources(args: ResourcesArgs) -> Result<(), TivError> {
    let state = load_state(args.state)?;
    println!("{}", output::render_resources(&state, args.format)?);
    Ok(())
}

fn run_state_get(args: GetArgs) -> Result<(), TivError> {
    let state = load_state(args.state)?;
    println!("{}", output::render_value(state.output_value(&args.path)?)?);
    Ok(())
}

fn resolve_state_path(explicit: Option<PathBuf>) -> Result<PathBuf, TivError> {
    match explicit {
        Some(path) => Ok(path),
        None => Ok(StateFile::discover(Path::new("."))?),
    }
}

fn load_state(explicit: Option<PathBuf>) -> Result<StateFile, TivError> {
    let path = resolve_state_path(explicit)?;
    Ok(StateFile::from_path(&path)?)
}
