use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata};
use aws_sdk_s3::types::{CorsConfiguration, CorsRule as S3CorsRule};
use aws_sdk_sagemaker::operation::describe_flow_definition::DescribeFlowDefinitionOutput;
use aws_sdk_sagemaker::types::{
    AwsManagedHumanLoopRequestSource, FlowDefinitionOutputConfig, HumanLoopActivationConditionsConfig,
    HumanLoopActivationConfig, HumanLoopConfig, HumanLoopRequestSource, UiTemplate,
};
use tokio::io::AsyncReadExt;
use tracing::debug;

use crate::error::{ProvisionError, Result};
use crate::services::{
    CorsRule, FlowDefinitionDescription, FlowDefinitionRequest, FlowDefinitionStatus, ObjectStore,
    ReviewService, RoleManager,
};

/// Classifies an SDK failure by its AWS error code.
fn service_error<E>(err: E) -> ProvisionError
where
    E: ProvideErrorMetadata + std::error::Error,
{
    match err.code() {
        Some(code) => ProvisionError::from_service_code(Some(code), err.message()),
        None => ProvisionError::Remote {
            code: "Unknown".to_string(),
            message: DisplayErrorContext(&err).to_string(),
        },
    }
}

/// An S3 request type was built without one of its required members.
fn build_error(err: impl std::fmt::Display) -> ProvisionError {
    ProvisionError::Validation(err.to_string())
}

pub struct SageMakerReviewService {
    client: aws_sdk_sagemaker::Client,
}

impl SageMakerReviewService {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: aws_sdk_sagemaker::Client::new(config),
        }
    }
}

/// A member the service documents as always present was absent from a response.
fn missing_field(operation: &str, field: &str) -> ProvisionError {
    ProvisionError::Remote {
        code: "MissingField".to_string(),
        message: format!("{operation} response has no {field}"),
    }
}

fn required(value: Option<&str>, operation: &str, field: &str) -> Result<String> {
    value
        .map(str::to_string)
        .ok_or_else(|| missing_field(operation, field))
}

fn describe_output(resp: &DescribeFlowDefinitionOutput) -> Result<FlowDefinitionDescription> {
    const OPERATION: &str = "DescribeFlowDefinition";
    let status = resp
        .flow_definition_status()
        .ok_or_else(|| missing_field(OPERATION, "FlowDefinitionStatus"))?;

    Ok(FlowDefinitionDescription {
        name: required(resp.flow_definition_name(), OPERATION, "FlowDefinitionName")?,
        arn: required(resp.flow_definition_arn(), OPERATION, "FlowDefinitionArn")?,
        status: FlowDefinitionStatus::from(status.as_str()),
        failure_reason: resp.failure_reason().map(str::to_string),
    })
}

#[async_trait]
impl ReviewService for SageMakerReviewService {
    async fn create_human_task_ui(&self, name: &str, content: &str) -> Result<String> {
        let resp = self
            .client
            .create_human_task_ui()
            .human_task_ui_name(name)
            .ui_template(UiTemplate::builder().content(content).build())
            .send()
            .await
            .map_err(service_error)?;

        let arn = required(resp.human_task_ui_arn(), "CreateHumanTaskUi", "HumanTaskUiArn")?;
        debug!(name, arn = %arn, "CreateHumanTaskUi returned");
        Ok(arn)
    }

    async fn create_flow_definition(&self, request: &FlowDefinitionRequest) -> Result<String> {
        let loop_config = HumanLoopConfig::builder()
            .workteam_arn(&request.workteam_arn)
            .human_task_ui_arn(&request.human_task_ui_arn)
            .task_count(request.task_count)
            .task_description(&request.task_description)
            .task_title(&request.task_title)
            .build();

        let request_source = HumanLoopRequestSource::builder()
            .aws_managed_human_loop_request_source(AwsManagedHumanLoopRequestSource::from(
                request.request_source.as_str(),
            ))
            .build();

        let activation = HumanLoopActivationConfig::builder()
            .human_loop_activation_conditions_config(
                HumanLoopActivationConditionsConfig::builder()
                    .human_loop_activation_conditions(&request.activation_conditions)
                    .build(),
            )
            .build();

        let output = FlowDefinitionOutputConfig::builder()
            .s3_output_path(&request.output_path)
            .build();

        let resp = self
            .client
            .create_flow_definition()
            .flow_definition_name(&request.name)
            .role_arn(&request.role_arn)
            .human_loop_config(loop_config)
            .human_loop_request_source(request_source)
            .human_loop_activation_config(activation)
            .output_config(output)
            .send()
            .await
            .map_err(service_error)?;

        required(
            resp.flow_definition_arn(),
            "CreateFlowDefinition",
            "FlowDefinitionArn",
        )
    }

    async fn describe_flow_definition(&self, name: &str) -> Result<FlowDefinitionDescription> {
        let resp = self
            .client
            .describe_flow_definition()
            .flow_definition_name(name)
            .send()
            .await
            .map_err(service_error)?;

        describe_output(&resp)
    }
}

pub struct S3ObjectStore {
    client: aws_sdk_s3::Client,
}

impl S3ObjectStore {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: aws_sdk_s3::Client::new(config),
        }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>> {
        let resp = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(service_error)?;

        let mut data = Vec::new();
        let mut stream = resp.body.into_async_read();
        stream.read_to_end(&mut data).await?;

        debug!(bucket, key, bytes = data.len(), "Downloaded object");
        Ok(data)
    }

    async fn put_bucket_cors(&self, bucket: &str, rules: &[CorsRule]) -> Result<()> {
        let mut config = CorsConfiguration::builder();
        for rule in rules {
            let s3_rule = S3CorsRule::builder()
                .set_allowed_headers(Some(rule.allowed_headers.clone()))
                .set_allowed_methods(Some(rule.allowed_methods.clone()))
                .set_allowed_origins(Some(rule.allowed_origins.clone()))
                .set_expose_headers(Some(rule.expose_headers.clone()))
                .build()
                .map_err(build_error)?;
            config = config.cors_rules(s3_rule);
        }

        self.client
            .put_bucket_cors()
            .bucket(bucket)
            .cors_configuration(config.build().map_err(build_error)?)
            .send()
            .await
            .map_err(service_error)?;
        Ok(())
    }
}

pub struct IamRoleManager {
    client: aws_sdk_iam::Client,
}

impl IamRoleManager {
    pub fn new(config: &SdkConfig) -> Self {
        Self {
            client: aws_sdk_iam::Client::new(config),
        }
    }
}

#[async_trait]
impl RoleManager for IamRoleManager {
    async fn attach_role_policy(&self, role_name: &str, policy_arn: &str) -> Result<()> {
        self.client
            .attach_role_policy()
            .role_name(role_name)
            .policy_arn(policy_arn)
            .send()
            .await
            .map_err(service_error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_s3::error::{ErrorMetadata, SdkError};
    use aws_sdk_s3::operation::get_object::GetObjectError;
    use aws_sdk_s3::types::error::NoSuchKey;
    use aws_sdk_sagemaker::operation::describe_flow_definition::DescribeFlowDefinitionError;
    use aws_sdk_sagemaker::types::error::ResourceNotFound;
    use aws_sdk_sagemaker::types::FlowDefinitionStatus as SdkFlowStatus;
    use aws_smithy_runtime_api::http::{Response, StatusCode};
    use aws_smithy_types::body::SdkBody;

    fn raw_response(status: u16) -> Response {
        Response::new(StatusCode::try_from(status).unwrap(), SdkBody::empty())
    }

    fn metadata(code: &str, message: &str) -> ErrorMetadata {
        ErrorMetadata::builder().code(code).message(message).build()
    }

    #[test]
    fn test_missing_object_is_not_found() {
        let err = SdkError::service_error(
            GetObjectError::NoSuchKey(
                NoSuchKey::builder()
                    .meta(metadata("NoSuchKey", "The specified key does not exist."))
                    .build(),
            ),
            raw_response(404),
        );
        assert!(matches!(service_error(err), ProvisionError::NotFound(_)));
    }

    #[test]
    fn test_unknown_flow_definition_is_not_found() {
        let err = SdkError::service_error(
            DescribeFlowDefinitionError::ResourceNotFound(
                ResourceNotFound::builder()
                    .meta(metadata("ResourceNotFound", "Flow definition missing"))
                    .build(),
            ),
            raw_response(400),
        );
        match service_error(err) {
            ProvisionError::NotFound(message) => assert_eq!(message, "Flow definition missing"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_task_ui_is_resource_exists() {
        let err = SdkError::service_error(
            DescribeFlowDefinitionError::generic(metadata("ResourceInUse", "name taken")),
            raw_response(400),
        );
        assert!(matches!(service_error(err), ProvisionError::ResourceExists(_)));
    }

    #[test]
    fn test_describe_output_maps_fields() {
        let resp = DescribeFlowDefinitionOutput::builder()
            .flow_definition_name("doc-flow")
            .flow_definition_arn("arn:aws:sagemaker:us-east-1:123456789012:flow-definition/doc-flow")
            .flow_definition_status(SdkFlowStatus::Failed)
            .failure_reason("role cannot be assumed")
            .build();

        let description = describe_output(&resp).unwrap();
        assert_eq!(description.name, "doc-flow");
        assert_eq!(description.status, crate::services::FlowDefinitionStatus::Failed);
        assert_eq!(description.failure_reason.as_deref(), Some("role cannot be assumed"));
    }

    #[test]
    fn test_describe_output_without_arn_is_an_error() {
        let resp = DescribeFlowDefinitionOutput::builder()
            .flow_definition_name("doc-flow")
            .flow_definition_status(SdkFlowStatus::Active)
            .build();

        match describe_output(&resp).unwrap_err() {
            ProvisionError::Remote { code, message } => {
                assert_eq!(code, "MissingField");
                assert!(message.contains("FlowDefinitionArn"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_required_rejects_absent_arn() {
        assert!(required(None, "CreateHumanTaskUi", "HumanTaskUiArn").is_err());
        assert_eq!(
            required(Some("arn:aws:sagemaker:us-east-1:1:human-task-ui/x"), "CreateHumanTaskUi", "HumanTaskUiArn")
                .unwrap(),
            "arn:aws:sagemaker:us-east-1:1:human-task-ui/x"
        );
    }
}
