use clap::ValueEnum;

/// What a best-effort step does when the remote call fails.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FailurePolicy {
    /// Log the failure, record it in the report and carry on.
    #[default]
    LogAndContinue,
    /// Return the first failure to the caller.
    Propagate,
}

/// Human loop settings submitted alongside each flow definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowSettings {
    pub task_count: i32,
    pub task_title: String,
    pub task_description: String,
    pub request_source: String,
}

impl Default for FlowSettings {
    fn default() -> Self {
        Self {
            task_count: 1,
            task_title: "Document analysis sample task".to_string(),
            task_description: "Document analysis sample task description".to_string(),
            request_source: "AWS/Textract/AnalyzeDocument/Forms/V1".to_string(),
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ProvisionerOptions {
    pub failure_policy: FailurePolicy,
    pub flow: FlowSettings,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ProvisionerOptions::default();
        assert_eq!(options.failure_policy, FailurePolicy::LogAndContinue);
        assert_eq!(options.flow.task_count, 1);
        assert_eq!(options.flow.request_source, "AWS/Textract/AnalyzeDocument/Forms/V1");
    }

    #[test]
    fn test_policy_parses_from_cli_value() {
        assert_eq!(
            FailurePolicy::from_str("propagate", true).unwrap(),
            FailurePolicy::Propagate
        );
        assert_eq!(
            FailurePolicy::from_str("log-and-continue", true).unwrap(),
            FailurePolicy::LogAndContinue
        );
    }
}
