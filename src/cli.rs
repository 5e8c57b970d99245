pub mod args;

pub use args::{
    AwsCommand, Cli, Command, GetArgs, OutputsArgs, ResourcesArgs, StateCommand, VerifyArgs,
};
