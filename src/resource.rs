use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Resource {
    pub resource_type: String,
    pub resource_id: String,
    pub name: String,
    pub metadata: serde_json::Value,
}

/// Identifies one remote resource to look up: a Terraform resource type plus
/// the provider-side identifier extracted from state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct ResourceQuery {
    pub resource_type: String,
    pub id: String,
}

impl ResourceQuery {
    pub fn new(resource_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            resource_type: resource_type.into(),
            id: id.into(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct VerifyConfig {
    pub region: Option<String>,
    pub profile: Option<String>,
    pub endpoint_url: Option<String>,
}
