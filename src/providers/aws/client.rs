use aws_config::{BehaviorVersion, Region};
use aws_sdk_ecs::error::ProvideErrorMetadata;

use super::AwsError;
use super::types::TaskDefinitionSummary;
use crate::resource::VerifyConfig;

/// Thin wrapper around the ECS SDK client that turns DescribeTaskDefinition
/// into an existence query.
pub struct EcsClient {
    inner: aws_sdk_ecs::Client,
}

impl EcsClient {
    /// Builds a client from the default credential and region resolution
    /// chain, with any overrides layered on top.
    pub async fn load(config: &VerifyConfig) -> Result<Self, AwsError> {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = &config.region {
            loader = loader.region(Region::new(region.clone()));
        }
        if let Some(profile) = &config.profile {
            loader = loader.profile_name(profile);
        }
        let sdk_config = loader.load().await;

        if sdk_config.region().is_none() {
            return Err(AwsError::Config {
                message: "no AWS region configured; pass --region or set AWS_REGION".to_string(),
            });
        }

        let mut builder = aws_sdk_ecs::config::Builder::from(&sdk_config);
        if let Some(endpoint_url) = &config.endpoint_url {
            tracing::debug!(endpoint_url = %endpoint_url, "using custom ECS endpoint");
            builder = builder.endpoint_url(endpoint_url);
        }

        Ok(Self::from_conf(builder.build()))
    }

    /// NOTE: Primarily used for testing with mock servers.
    pub fn from_conf(conf: aws_sdk_ecs::Config) -> Self {
        Self {
            inner: aws_sdk_ecs::Client::from_conf(conf),
        }
    }

    /// Describes a task definition by family, `family:revision` or ARN.
    ///
    /// Returns `Ok(None)` when the task definition does not exist. ECS
    /// reports a nonexistent family as a `ClientException` rather than a
    /// dedicated not-found error, so that exception is part of the normal
    /// answer here.
    pub async fn describe_task_definition(
        &self,
        task_definition: &str,
    ) -> Result<Option<TaskDefinitionSummary>, AwsError> {
        let response = self
            .inner
            .describe_task_definition()
            .task_definition(task_definition)
            .send()
            .await;

        match response {
            Ok(output) => {
                let task = output.task_definition().ok_or_else(|| AwsError::Malformed {
                    message: "DescribeTaskDefinition succeeded without a taskDefinition body"
                        .to_string(),
                })?;
                Ok(Some(TaskDefinitionSummary::from_sdk(task)))
            }
            Err(err) => {
                if let Some(service_err) = err.as_service_error() {
                    if service_err.is_client_exception() {
                        tracing::debug!(
                            task_definition = %task_definition,
                            message = service_err.message().unwrap_or(""),
                            "task definition not found"
                        );
                        return Ok(None);
                    }
                    return Err(AwsError::from_service_error(service_err));
                }
                Err(AwsError::from_sdk_failure(&err))
            }
        }
    }
}

impl std::fmt::Debug for EcsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EcsClient").finish_non_exhaustive()
    }
}
