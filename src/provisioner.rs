use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{info, warn};

use crate::arn::validate_arn;
use crate::conditions::ActivationConditions;
use crate::config::{FailurePolicy, ProvisionerOptions};
use crate::error::{ProvisionError, Result};
use crate::results::{output_key, HumanLoopOutput};
use crate::services::{
    CorsRule, FlowDefinitionDescription, FlowDefinitionRequest, ObjectStore, ReviewService,
    RoleManager,
};
use crate::template::TASK_TEMPLATE;

/// Managed policies the notebook role needs to drive Textract, A2I and S3.
pub const NOTEBOOK_ROLE_POLICIES: [&str; 3] = [
    "arn:aws:iam::aws:policy/AmazonTextractFullAccess",
    "arn:aws:iam::aws:policy/AmazonSageMakerFullAccess",
    "arn:aws:iam::aws:policy/AmazonS3FullAccess",
];

/// A step of a best-effort operation that did not go through.
#[derive(Debug)]
pub struct StepFailure {
    pub step: String,
    pub error: ProvisionError,
}

/// Outcome of a best-effort operation.
#[derive(Debug, Default)]
pub struct SetupReport {
    pub completed: Vec<String>,
    pub failures: Vec<StepFailure>,
}

impl SetupReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Issues A2I provisioning calls against explicitly supplied service clients.
pub struct Provisioner<R, S, I> {
    review: R,
    storage: S,
    roles: I,
    options: ProvisionerOptions,
}

impl<R, S, I> Provisioner<R, S, I>
where
    R: ReviewService,
    S: ObjectStore,
    I: RoleManager,
{
    pub fn new(review: R, storage: S, roles: I) -> Self {
        Self::with_options(review, storage, roles, ProvisionerOptions::default())
    }

    pub fn with_options(review: R, storage: S, roles: I, options: ProvisionerOptions) -> Self {
        Self {
            review,
            storage,
            roles,
            options,
        }
    }

    pub fn review(&self) -> &R {
        &self.review
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn roles(&self) -> &I {
        &self.roles
    }

    /// Registers the review template and returns the task UI ARN.
    pub async fn create_task_ui(&self, name: &str) -> Result<String> {
        if name.is_empty() {
            return Err(ProvisionError::Validation(
                "HumanTaskUiName must not be empty".to_string(),
            ));
        }
        let arn = self.review.create_human_task_ui(name, TASK_TEMPLATE).await?;
        info!(name, arn = %arn, "Created human task UI");
        Ok(arn)
    }

    /// Creates a flow definition wired to the Textract forms activation rules.
    pub async fn create_flow_definition(
        &self,
        name: &str,
        workteam_arn: &str,
        human_task_ui_arn: &str,
        role_arn: &str,
        output_path: &str,
    ) -> Result<String> {
        validate_arn("WorkteamArn", workteam_arn)?;
        validate_arn("HumanTaskUiArn", human_task_ui_arn)?;
        validate_arn("RoleArn", role_arn)?;

        let flow = &self.options.flow;
        let request = FlowDefinitionRequest {
            name: name.to_string(),
            role_arn: role_arn.to_string(),
            workteam_arn: workteam_arn.to_string(),
            human_task_ui_arn: human_task_ui_arn.to_string(),
            task_count: flow.task_count,
            task_title: flow.task_title.clone(),
            task_description: flow.task_description.clone(),
            request_source: flow.request_source.clone(),
            activation_conditions: ActivationConditions::textract_forms().to_json()?,
            output_path: output_path.to_string(),
        };

        let arn = self.review.create_flow_definition(&request).await?;
        info!(name, arn = %arn, output_path, "Created flow definition");
        Ok(arn)
    }

    pub async fn describe_flow_definition(&self, name: &str) -> Result<FlowDefinitionDescription> {
        self.review.describe_flow_definition(name).await
    }

    /// Fetches and parses the JSON document A2I wrote at `output_uri`.
    pub async fn retrieve_results(&self, bucket: &str, output_uri: &str) -> Result<Value> {
        self.retrieve_results_as(bucket, output_uri).await
    }

    pub async fn retrieve_human_loop_output(
        &self,
        bucket: &str,
        output_uri: &str,
    ) -> Result<HumanLoopOutput> {
        self.retrieve_results_as(bucket, output_uri).await
    }

    async fn retrieve_results_as<T: DeserializeOwned>(
        &self,
        bucket: &str,
        output_uri: &str,
    ) -> Result<T> {
        let key = output_key(bucket, output_uri)?;
        let body = self.storage.get_object(bucket, key).await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Replaces the bucket's CORS rules with a single GET-from-anywhere rule.
    pub async fn add_cors_policy(&self, bucket: &str) -> Result<SetupReport> {
        let mut report = SetupReport::default();
        let step = format!("cors:{bucket}");

        match self
            .storage
            .put_bucket_cors(bucket, &[CorsRule::allow_get_from_any_origin()])
            .await
        {
            Ok(()) => {
                info!(bucket, "CORS rules added");
                report.completed.push(step);
            }
            Err(error) => self.record_failure(&mut report, step, error)?,
        }

        Ok(report)
    }

    /// Attaches each of [`NOTEBOOK_ROLE_POLICIES`] to `role_name`.
    pub async fn grant_role_permissions(&self, role_name: &str) -> Result<SetupReport> {
        let mut report = SetupReport::default();

        for policy_arn in NOTEBOOK_ROLE_POLICIES {
            match self.roles.attach_role_policy(role_name, policy_arn).await {
                Ok(()) => {
                    info!(role = role_name, policy = policy_arn, "Attached policy");
                    report.completed.push(policy_arn.to_string());
                }
                Err(error) => self.record_failure(&mut report, policy_arn.to_string(), error)?,
            }
        }

        Ok(report)
    }

    fn record_failure(
        &self,
        report: &mut SetupReport,
        step: String,
        error: ProvisionError,
    ) -> Result<()> {
        match self.options.failure_policy {
            FailurePolicy::Propagate => Err(error),
            FailurePolicy::LogAndContinue => {
                warn!(step = %step, kind = error.kind(), error = %error, "Setup step failed");
                report.failures.push(StepFailure { step, error });
                Ok(())
            }
        }
    }
}
