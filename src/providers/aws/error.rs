use aws_sdk_ecs::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_ecs::operation::describe_task_definition::DescribeTaskDefinitionError;
use thiserror::Error;

use crate::providers::ProviderError;

/// Errors raised while talking to the ECS API.
///
/// SECURITY: Error messages must never contain credential material. This
/// crate never holds credentials directly; resolution stays inside
/// aws-config and the SDK.
#[derive(Debug, Error)]
pub enum AwsError {
    /// The request was rejected for credential or signature reasons
    #[error("authentication failed: {message}")]
    Auth { message: String },

    /// A service-side error that is not a missing resource
    #[error("ECS API error ({code}): {message}")]
    Api { code: String, message: String },

    /// Connection-level failure: DNS, TLS, timeouts
    #[error("transport error: {message}")]
    Transport { message: String },

    /// A response arrived but could not be understood
    #[error("malformed response: {message}")]
    Malformed { message: String },

    /// Client-side setup problem, detected before any request is sent
    #[error("configuration error: {message}")]
    Config { message: String },
}

/// Error codes that signal a credential problem rather than a service fault.
const AUTH_ERROR_CODES: &[&str] = &[
    "AccessDeniedException",
    "ExpiredTokenException",
    "IncompleteSignature",
    "InvalidClientTokenId",
    "InvalidSignatureException",
    "MissingAuthenticationToken",
    "SignatureDoesNotMatch",
    "UnrecognizedClientException",
];

pub(crate) fn is_auth_error_code(code: &str) -> bool {
    AUTH_ERROR_CODES.contains(&code)
}

impl AwsError {
    /// Classifies a modeled or unmodeled service error by its error code.
    pub(crate) fn from_service_error(err: &DescribeTaskDefinitionError) -> Self {
        let code = err.code().unwrap_or("Unknown").to_string();
        let message = err.message().unwrap_or("no error message").to_string();
        if is_auth_error_code(&code) {
            Self::Auth {
                message: format!("{code}: {message}"),
            }
        } else {
            Self::Api { code, message }
        }
    }

    /// Classifies failures that never produced a service error, such as
    /// connection refusals and undecodable responses.
    pub(crate) fn from_sdk_failure(err: &SdkError<DescribeTaskDefinitionError>) -> Self {
        let message = DisplayErrorContext(err).to_string();
        match err {
            SdkError::ResponseError(_) => Self::Malformed { message },
            _ => Self::Transport { message },
        }
    }
}

impl From<AwsError> for ProviderError {
    fn from(err: AwsError) -> Self {
        let message = err.to_string();
        match err {
            AwsError::Auth { .. } => ProviderError::Auth(message),
            _ => ProviderError::Aws(message),
        }
    }
}
