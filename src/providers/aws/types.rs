use serde_json::json;

use crate::resource::Resource;

/// Terraform resource type the AWS provider can verify.
pub const ECS_TASK_DEFINITION: &str = "aws_ecs_task_definition";

/// ECS caps family names at 255 characters of letters, digits, hyphens and
/// underscores.
const MAX_FAMILY_LEN: usize = 255;

/// The slice of a described task definition the verification report cares
/// about.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskDefinitionSummary {
    pub family: String,
    pub revision: i32,
    pub status: Option<String>,
    pub arn: Option<String>,
}

impl TaskDefinitionSummary {
    pub(crate) fn from_sdk(task_definition: &aws_sdk_ecs::types::TaskDefinition) -> Self {
        Self {
            family: task_definition.family().unwrap_or_default().to_string(),
            revision: task_definition.revision(),
            status: task_definition
                .status()
                .map(|status| status.as_str().to_string()),
            arn: task_definition.task_definition_arn().map(str::to_string),
        }
    }

    /// `family:revision`, the form ECS itself lists task definitions under.
    pub fn qualified_name(&self) -> String {
        format!("{}:{}", self.family, self.revision)
    }

    pub fn into_resource(self) -> Resource {
        let name = self.qualified_name();
        Resource {
            resource_type: ECS_TASK_DEFINITION.to_string(),
            resource_id: self.arn.unwrap_or_else(|| name.clone()),
            name,
            metadata: json!({
                "revision": self.revision,
                "status": self.status,
            }),
        }
    }
}

// NOTE: Auto-detects full ARNs vs family[:revision] identifiers
pub fn is_task_definition_arn(input: &str) -> bool {
    input.starts_with("arn:") && input.contains(":task-definition/")
}

/// Checks a `family` or `family:revision` identifier against the ECS naming
/// rules before it is sent anywhere.
pub fn is_valid_identifier(input: &str) -> bool {
    let (family, revision) = match input.rsplit_once(':') {
        Some((family, revision)) => (family, Some(revision)),
        None => (input, None),
    };

    if let Some(revision) = revision {
        if revision.is_empty() || !revision.chars().all(|c| c.is_ascii_digit()) {
            return false;
        }
    }

    !family.is_empty()
        && family.len() <= MAX_FAMILY_LEN
        && family
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
