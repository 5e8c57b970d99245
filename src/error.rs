use thiserror::Error;

#[derive(Debug, Error)]
pub enum TivError {
    #[error(transparent)]
    Terraform(#[from] crate::terraform::TerraformError),

    #[error(transparent)]
    Provider(#[from] crate::providers::ProviderError),

    #[error("failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("verification failed: {failed} failed, {errors} errored out of {total} checks")]
    VerificationFailed {
        failed: usize,
        errors: usize,
        total: usize,
    },
}
