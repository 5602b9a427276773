use crate::error::{ProvisionError, Result};

/// Checks that `value` looks like `arn:<partition>:<service>:<region>:<account>:<resource>`.
///
/// Region and account may be empty (IAM managed policies have neither); the
/// partition, service and resource may not. Nothing is resolved remotely.
pub fn validate_arn(field: &str, value: &str) -> Result<()> {
    let parts: Vec<&str> = value.splitn(6, ':').collect();
    let well_formed = parts.len() == 6
        && parts[0] == "arn"
        && !parts[1].is_empty()
        && !parts[2].is_empty()
        && !parts[5].is_empty()
        && !value.chars().any(char::is_whitespace);

    if well_formed {
        Ok(())
    } else {
        Err(ProvisionError::Validation(format!(
            "{field} '{value}' is not a valid ARN"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_sagemaker_arn() {
        assert!(validate_arn(
            "HumanTaskUiArn",
            "arn:aws:sagemaker:us-east-1:123456789012:human-task-ui/doc-review-ui"
        )
        .is_ok());
    }

    #[test]
    fn test_accepts_managed_policy_arn() {
        assert!(validate_arn("PolicyArn", "arn:aws:iam::aws:policy/AmazonS3FullAccess").is_ok());
    }

    #[test]
    fn test_resource_may_contain_colons() {
        assert!(validate_arn("RoleArn", "arn:aws:iam::123456789012:role/a:b").is_ok());
    }

    #[test]
    fn test_rejects_empty() {
        assert!(matches!(
            validate_arn("HumanTaskUiArn", ""),
            Err(ProvisionError::Validation(_))
        ));
    }

    #[test]
    fn test_rejects_missing_resource() {
        assert!(validate_arn("WorkteamArn", "arn:aws:sagemaker:us-east-1:123456789012:").is_err());
        assert!(validate_arn("WorkteamArn", "not-an-arn").is_err());
    }
}
