pub mod aws;

use async_trait::async_trait;
use thiserror::Error;

use crate::resource::{Resource, ResourceQuery, VerifyConfig};

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("unknown provider: {0}")]
    UnknownProvider(String),

    #[error("provider '{provider}' cannot verify resource type '{resource_type}'")]
    UnsupportedResource {
        provider: String,
        resource_type: String,
    },

    #[error("invalid query: {0}")]
    InvalidQuery(String),

    #[error("authentication error: {0}")]
    Auth(String),

    #[error("AWS error: {0}")]
    Aws(String),
}

/// A cloud API that can answer existence queries for Terraform-managed
/// resources.
#[async_trait]
pub trait Provider: Send + Sync {
    fn name(&self) -> &str;

    /// Looks up the queried resource, returning it when it exists.
    ///
    /// `Ok(None)` means the provider answered and the resource is not there;
    /// `Err` is reserved for queries that could not be answered at all.
    async fn lookup(&self, query: &ResourceQuery) -> Result<Option<Resource>, ProviderError>;

    fn resource_types(&self) -> Vec<&str>;
}

pub fn get_provider(name: &str, config: &VerifyConfig) -> Result<Box<dyn Provider>, ProviderError> {
    match name {
        "aws" => Ok(Box::new(aws::AwsProvider::new(config.clone()))),
        other => Err(ProviderError::UnknownProvider(other.to_string())),
    }
}
