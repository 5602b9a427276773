use thiserror::Error;

/// Errors raised while provisioning or reading A2I resources.
#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error("Resource already exists: {0}")]
    ResourceExists(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Access denied: {0}")]
    AccessDenied(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Output URI '{uri}' does not start with s3://{bucket}/ followed by a key")]
    MalformedUri { bucket: String, uri: String },

    #[error("Failed to decode human loop output: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Remote call failed ({code}): {message}")]
    Remote { code: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ProvisionError {
    /// Maps an AWS error code onto the matching variant.
    ///
    /// Codes come from SageMaker, S3 and IAM, which spell the same condition
    /// differently.
    pub fn from_service_code(code: Option<&str>, message: Option<&str>) -> Self {
        let message = message.unwrap_or("no message").to_string();
        match code {
            Some("ResourceInUse") | Some("EntityAlreadyExists") => {
                ProvisionError::ResourceExists(message)
            }
            Some("ValidationException") | Some("ValidationError") | Some("InvalidInput")
            | Some("MalformedPolicyDocument") => ProvisionError::Validation(message),
            Some("AccessDenied") | Some("AccessDeniedException") => {
                ProvisionError::AccessDenied(message)
            }
            Some("ResourceNotFound") | Some("NoSuchEntity") | Some("NoSuchKey")
            | Some("NoSuchBucket") | Some("NotFound") => ProvisionError::NotFound(message),
            Some(other) => ProvisionError::Remote {
                code: other.to_string(),
                message,
            },
            None => ProvisionError::Remote {
                code: "Unknown".to_string(),
                message,
            },
        }
    }

    /// Short machine-friendly name, used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            ProvisionError::ResourceExists(_) => "resource_exists",
            ProvisionError::Validation(_) => "validation",
            ProvisionError::AccessDenied(_) => "access_denied",
            ProvisionError::NotFound(_) => "not_found",
            ProvisionError::MalformedUri { .. } => "malformed_uri",
            ProvisionError::Decode(_) => "decode",
            ProvisionError::Remote { .. } => "remote",
            ProvisionError::Io(_) => "io",
        }
    }
}

pub type Result<T> = std::result::Result<T, ProvisionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_in_use_maps_to_exists() {
        let err = ProvisionError::from_service_code(Some("ResourceInUse"), Some("taken"));
        assert!(matches!(err, ProvisionError::ResourceExists(ref m) if m == "taken"));
    }

    #[test]
    fn test_missing_key_maps_to_not_found() {
        let err = ProvisionError::from_service_code(Some("NoSuchKey"), None);
        assert_eq!(err.kind(), "not_found");
    }

    #[test]
    fn test_unknown_code_is_remote() {
        let err = ProvisionError::from_service_code(Some("Throttling"), Some("slow down"));
        match err {
            ProvisionError::Remote { code, message } => {
                assert_eq!(code, "Throttling");
                assert_eq!(message, "slow down");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
