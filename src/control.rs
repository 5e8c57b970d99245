//! Controls and checks: the verification model.
//!
//! A control groups named checks. Each check queries one resource through a
//! provider and holds an expectation about the answer. Running a control
//! never aborts midway: provider errors become `Error` outcomes on the
//! affected check so the report always covers every check.

use serde::Serialize;

use crate::providers::Provider;
use crate::resource::{Resource, ResourceQuery};

#[derive(Debug, Clone)]
pub struct Control {
    pub id: String,
    pub checks: Vec<Check>,
}

impl Control {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            checks: Vec::new(),
        }
    }

    pub fn check(mut self, check: Check) -> Self {
        self.checks.push(check);
        self
    }

    pub async fn run(&self, provider: &dyn Provider) -> ControlReport {
        let mut results = Vec::with_capacity(self.checks.len());
        for check in &self.checks {
            let result = match provider.lookup(&check.query).await {
                Ok(found) => check.judge(found),
                Err(err) => check.errored(err.to_string()),
            };
            match result.outcome {
                Outcome::Passed => {
                    tracing::info!(control = %self.id, check = %result.title, "check passed");
                }
                Outcome::Failed => {
                    tracing::warn!(control = %self.id, check = %result.title, "check failed");
                }
                Outcome::Error => {
                    tracing::warn!(
                        control = %self.id,
                        check = %result.title,
                        detail = result.detail.as_deref().unwrap_or(""),
                        "check errored"
                    );
                }
            }
            results.push(result);
        }
        ControlReport {
            control: self.id.clone(),
            results,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Check {
    pub title: String,
    pub query: ResourceQuery,
    pub expect: Expectation,
}

impl Check {
    pub fn exists(resource_type: &str, id: &str) -> Self {
        Self {
            title: format!("{resource_type} '{id}'"),
            query: ResourceQuery::new(resource_type, id),
            expect: Expectation::Exists,
        }
    }

    #[allow(dead_code)] // NOTE: dual of `exists`, no CLI surface yet
    pub fn absent(resource_type: &str, id: &str) -> Self {
        Self {
            title: format!("{resource_type} '{id}'"),
            query: ResourceQuery::new(resource_type, id),
            expect: Expectation::Absent,
        }
    }

    fn judge(&self, found: Option<Resource>) -> CheckResult {
        let satisfied = match self.expect {
            Expectation::Exists => found.is_some(),
            Expectation::Absent => found.is_none(),
        };
        let detail = match (&found, self.expect) {
            (Some(resource), Expectation::Exists) => {
                Some(format!("found {}", resource.resource_id))
            }
            (Some(resource), Expectation::Absent) => {
                Some(format!("unexpectedly found {}", resource.resource_id))
            }
            (None, Expectation::Exists) => Some(format!(
                "{} '{}' not found",
                self.query.resource_type, self.query.id
            )),
            (None, Expectation::Absent) => None,
        };
        CheckResult {
            title: self.title.clone(),
            expectation: self.expect,
            outcome: if satisfied {
                Outcome::Passed
            } else {
                Outcome::Failed
            },
            detail,
            resource: found,
        }
    }

    fn errored(&self, message: String) -> CheckResult {
        CheckResult {
            title: self.title.clone(),
            expectation: self.expect,
            outcome: Outcome::Error,
            detail: Some(message),
            resource: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Expectation {
    Exists,
    #[allow(dead_code)] // NOTE: only reachable through Check::absent
    Absent,
}

impl Expectation {
    pub fn describe(self) -> &'static str {
        match self {
            Self::Exists => "should exist",
            Self::Absent => "should be absent",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Passed,
    Failed,
    Error,
}

impl Outcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Failed => "failed",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckResult {
    pub title: String,
    pub expectation: Expectation,
    pub outcome: Outcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<Resource>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ControlReport {
    pub control: String,
    pub results: Vec<CheckResult>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub errors: usize,
}

impl Summary {
    pub fn of(reports: &[ControlReport]) -> Self {
        let mut summary = Self::default();
        for report in reports {
            for result in &report.results {
                summary.total += 1;
                match result.outcome {
                    Outcome::Passed => summary.passed += 1,
                    Outcome::Failed => summary.failed += 1,
                    Outcome::Error => summary.errors += 1,
                }
            }
        }
        summary
    }

    pub fn all_passed(&self) -> bool {
        self.failed == 0 && self.errors == 0
    }
}
