//! Terraform state parsing for verification.
//!
//! Reads tfstate v4 files and resolves output values down to the identifiers
//! the provider checks run against.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Name of the state file Terraform writes next to the configuration.
pub const DEFAULT_STATE_FILE: &str = "terraform.tfstate";

/// Directory Terraform keeps non-default workspace states under.
pub const WORKSPACE_STATE_DIR: &str = "terraform.tfstate.d";

const SUPPORTED_VERSION: u64 = 4;

#[derive(Debug, Error)]
pub enum TerraformError {
    #[error("failed to read state file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse state file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("state file has no version field, not a terraform state file?")]
    MissingVersion,

    #[error("unsupported state file version {version} (expected 4)")]
    UnsupportedVersion { version: u64 },

    #[error("no state file found under {}", .dir.display())]
    StateFileNotFound { dir: PathBuf },

    #[error("output '{name}' not found in state")]
    OutputNotFound { name: String },

    #[error("no value at '{path}' (stopped at '{segment}')")]
    PathNotFound { path: String, segment: String },

    #[error("value at '{path}' is not a scalar (found {kind})")]
    NotScalar { path: String, kind: &'static str },

    #[error("invalid output path '{path}'")]
    InvalidPath { path: String },
}

#[derive(Debug, Deserialize)]
pub struct StateFile {
    pub version: u64,
    #[serde(default)]
    pub terraform_version: Option<String>,
    #[serde(default)]
    pub serial: Option<u64>,
    #[serde(default)]
    pub outputs: BTreeMap<String, OutputValue>,
    #[serde(default)]
    pub resources: Vec<StateResource>,
}

#[derive(Debug, Deserialize)]
pub struct OutputValue {
    pub value: Value,
    /// tfstate encodes output types as either a bare string ("string") or a
    /// constraint array (["object", {...}]).
    #[serde(rename = "type", default)]
    pub type_: Value,
    #[serde(default)]
    pub sensitive: bool,
}

impl OutputValue {
    /// Short human-readable form of the output type for listings.
    pub fn type_summary(&self) -> &str {
        match &self.type_ {
            Value::String(name) => name,
            Value::Array(parts) => parts.first().and_then(Value::as_str).unwrap_or("complex"),
            _ => "unknown",
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct StateResource {
    #[serde(default)]
    pub module: Option<String>,
    pub mode: ResourceMode,
    #[serde(rename = "type")]
    pub type_: String,
    pub name: String,
    #[serde(default)]
    pub provider: String,
    #[serde(default)]
    pub instances: Vec<Value>,
}

impl StateResource {
    /// Renders the `terraform state list` address form, including the
    /// `module.` path and the `data.` prefix for data sources.
    pub fn address(&self) -> String {
        let mut address = String::new();
        if let Some(module) = &self.module {
            address.push_str(module);
            address.push('.');
        }
        if self.mode == ResourceMode::Data {
            address.push_str("data.");
        }
        address.push_str(&self.type_);
        address.push('.');
        address.push_str(&self.name);
        address
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceMode {
    Managed,
    Data,
}

impl ResourceMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Managed => "managed",
            Self::Data => "data",
        }
    }
}

impl StateFile {
    /// Locates a state file the way terraform leaves them behind: the default
    /// `terraform.tfstate` in `dir` first, then any workspace state under
    /// `terraform.tfstate.d/<workspace>/`.
    pub fn discover(dir: &Path) -> Result<PathBuf, TerraformError> {
        let default = dir.join(DEFAULT_STATE_FILE);
        if default.is_file() {
            return Ok(default);
        }

        let workspace_dir = dir.join(WORKSPACE_STATE_DIR);
        if workspace_dir.is_dir() {
            let entries = fs::read_dir(&workspace_dir).map_err(|source| TerraformError::Read {
                path: workspace_dir.clone(),
                source,
            })?;

            let mut candidates = Vec::new();
            for entry in entries {
                let entry = entry.map_err(|source| TerraformError::Read {
                    path: workspace_dir.clone(),
                    source,
                })?;
                let candidate = entry.path().join(DEFAULT_STATE_FILE);
                if candidate.is_file() {
                    candidates.push(candidate);
                }
            }

            candidates.sort();
            if candidates.len() > 1 {
                tracing::warn!(
                    count = candidates.len(),
                    "multiple workspace state files found, using the first"
                );
            }
            if let Some(found) = candidates.into_iter().next() {
                return Ok(found);
            }
        }

        Err(TerraformError::StateFileNotFound {
            dir: dir.to_path_buf(),
        })
    }

    pub fn from_path(path: &Path) -> Result<Self, TerraformError> {
        let raw = fs::read_to_string(path).map_err(|source| TerraformError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let state = Self::from_json(&raw)?;
        tracing::debug!(
            path = %path.display(),
            version = state.version,
            terraform_version = state.terraform_version.as_deref().unwrap_or("unknown"),
            serial = state.serial,
            outputs = state.outputs.len(),
            "loaded terraform state"
        );
        Ok(state)
    }

    /// Parses a state document. The version gate runs on the raw JSON so a
    /// v3 file reports its version instead of a shape mismatch.
    pub fn from_json(raw: &str) -> Result<Self, TerraformError> {
        let document: Value = serde_json::from_str(raw)?;
        let version = document
            .get("version")
            .and_then(Value::as_u64)
            .ok_or(TerraformError::MissingVersion)?;
        if version != SUPPORTED_VERSION {
            return Err(TerraformError::UnsupportedVersion { version });
        }
        Ok(serde_json::from_value(document)?)
    }

    pub fn output(&self, name: &str) -> Result<&OutputValue, TerraformError> {
        self.outputs
            .get(name)
            .ok_or_else(|| TerraformError::OutputNotFound {
                name: name.to_string(),
            })
    }

    /// Resolves a dotted path of the form `output_name.key.0.key`. The first
    /// segment names the output; the remaining segments index into its value
    /// (object keys, or array positions when the segment parses as a number).
    pub fn output_value(&self, path: &str) -> Result<&Value, TerraformError> {
        let mut segments = path.split('.');
        let name = match segments.next() {
            Some(first) if !first.is_empty() => first,
            _ => {
                return Err(TerraformError::InvalidPath {
                    path: path.to_string(),
                });
            }
        };

        let mut current = &self.output(name)?.value;
        for segment in segments {
            if segment.is_empty() {
                return Err(TerraformError::InvalidPath {
                    path: path.to_string(),
                });
            }
            let next = match current {
                Value::Object(map) => map.get(segment),
                Value::Array(items) => segment
                    .parse::<usize>()
                    .ok()
                    .and_then(|index| items.get(index)),
                _ => None,
            };
            current = next.ok_or_else(|| TerraformError::PathNotFound {
                path: path.to_string(),
                segment: segment.to_string(),
            })?;
        }
        Ok(current)
    }

    /// `output_value` plus scalar coercion: strings pass through, numbers and
    /// booleans render to their literal form, everything else is an error. A
    /// null here almost always means the apply never populated the output, so
    /// it is rejected rather than coerced to an empty string.
    pub fn output_string(&self, path: &str) -> Result<String, TerraformError> {
        let value = self.output_value(path)?;
        match value {
            Value::String(text) => Ok(text.clone()),
            Value::Number(number) => Ok(number.to_string()),
            Value::Bool(flag) => Ok(flag.to_string()),
            other => Err(TerraformError::NotScalar {
                path: path.to_string(),
                kind: value_kind(other),
            }),
        }
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
