mod client;
mod error;
mod types;

pub use client::EcsClient;
pub use error::AwsError;
pub use types::{
    ECS_TASK_DEFINITION, TaskDefinitionSummary, is_task_definition_arn, is_valid_identifier,
};

use async_trait::async_trait;
use tokio::sync::OnceCell;

use super::{Provider, ProviderError};
use crate::resource::{Resource, ResourceQuery, VerifyConfig};

/// AWS provider backed by the ECS API.
///
/// The SDK client is built on first use so that queries rejected by local
/// validation never touch credential resolution.
pub struct AwsProvider {
    config: VerifyConfig,
    client: OnceCell<EcsClient>,
}

impl AwsProvider {
    pub fn new(config: VerifyConfig) -> Self {
        Self {
            config,
            client: OnceCell::new(),
        }
    }

    /// NOTE: Primarily used for testing with mock servers.
    #[allow(dead_code)]
    pub fn with_client(client: EcsClient) -> Self {
        Self {
            config: VerifyConfig::default(),
            client: OnceCell::new_with(Some(client)),
        }
    }

    async fn client(&self) -> Result<&EcsClient, ProviderError> {
        self.client
            .get_or_try_init(|| async {
                EcsClient::load(&self.config).await.map_err(ProviderError::from)
            })
            .await
    }
}

#[async_trait]
impl Provider for AwsProvider {
    fn name(&self) -> &str {
        "aws"
    }

    async fn lookup(&self, query: &ResourceQuery) -> Result<Option<Resource>, ProviderError> {
        match query.resource_type.as_str() {
            ECS_TASK_DEFINITION => {
                let id = query.id.trim();
                if !(is_task_definition_arn(id) || is_valid_identifier(id)) {
                    return Err(ProviderError::InvalidQuery(format!(
                        "'{id}' is not a task definition family, family:revision, or ARN"
                    )));
                }

                let client = self.client().await?;
                let found = client
                    .describe_task_definition(id)
                    .await
                    .map_err(ProviderError::from)?;

                match &found {
                    Some(summary) => tracing::info!(
                        task_definition = %summary.qualified_name(),
                        "task definition described"
                    ),
                    None => tracing::info!(task_definition = %id, "task definition not found"),
                }

                Ok(found.map(TaskDefinitionSummary::into_resource))
            }
            other => {
                tracing::debug!(
                    resource_type = %other,
                    supported = ?self.resource_types(),
                    "unsupported resource type"
                );
                Err(ProviderError::UnsupportedResource {
                    provider: self.name().to_string(),
                    resource_type: other.to_string(),
                })
            }
        }
    }

    fn resource_types(&self) -> Vec<&str> {
        vec![ECS_TASK_DEFINITION]
    }
}
