//! TIV - Terraform Infrastructure Verifier
//!
//! A library for verifying that resources recorded in Terraform state still exist at the cloud provider.

pub mod control;
pub mod output;
pub mod providers;
pub mod resource;
pub mod terraform;

mod error;

pub use control::{Check, Control, ControlReport, Expectation, Outcome, Summary};
pub use error::TivError;
pub use providers::aws::{AwsError, AwsProvider, EcsClient, TaskDefinitionSummary};
pub use resource::{Resource, ResourceQuery, VerifyConfig};
pub use terraform::StateFile;
