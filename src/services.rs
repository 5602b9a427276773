//! Service seams used by the provisioner.
//!
//! Each trait covers the calls made against one AWS service. The AWS
//! implementations live in [`crate::aws`]; tests substitute in-memory fakes.

use async_trait::async_trait;

use crate::error::Result;

/// Everything `CreateFlowDefinition` needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowDefinitionRequest {
    pub name: String,
    pub role_arn: String,
    pub workteam_arn: String,
    pub human_task_ui_arn: String,
    pub task_count: i32,
    pub task_title: String,
    pub task_description: String,
    pub request_source: String,
    /// Serialized activation-condition document.
    pub activation_conditions: String,
    pub output_path: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowDefinitionStatus {
    Initializing,
    Active,
    Failed,
    Deleting,
    Unknown(String),
}

impl From<&str> for FlowDefinitionStatus {
    fn from(value: &str) -> Self {
        match value {
            "Initializing" => FlowDefinitionStatus::Initializing,
            "Active" => FlowDefinitionStatus::Active,
            "Failed" => FlowDefinitionStatus::Failed,
            "Deleting" => FlowDefinitionStatus::Deleting,
            other => FlowDefinitionStatus::Unknown(other.to_string()),
        }
    }
}

impl std::fmt::Display for FlowDefinitionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FlowDefinitionStatus::Initializing => write!(f, "Initializing"),
            FlowDefinitionStatus::Active => write!(f, "Active"),
            FlowDefinitionStatus::Failed => write!(f, "Failed"),
            FlowDefinitionStatus::Deleting => write!(f, "Deleting"),
            FlowDefinitionStatus::Unknown(s) => write!(f, "{s}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowDefinitionDescription {
    pub name: String,
    pub arn: String,
    pub status: FlowDefinitionStatus,
    pub failure_reason: Option<String>,
}

/// One S3 CORS rule.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CorsRule {
    pub allowed_headers: Vec<String>,
    pub allowed_methods: Vec<String>,
    pub allowed_origins: Vec<String>,
    pub expose_headers: Vec<String>,
}

impl CorsRule {
    /// Lets the worker UI fetch documents with plain GETs from any origin.
    pub fn allow_get_from_any_origin() -> Self {
        Self {
            allowed_methods: vec!["GET".to_string()],
            allowed_origins: vec!["*".to_string()],
            ..Default::default()
        }
    }
}

/// SageMaker calls for task UIs and flow definitions.
#[async_trait]
pub trait ReviewService: Send + Sync {
    /// Returns the ARN of the new task UI.
    async fn create_human_task_ui(&self, name: &str, content: &str) -> Result<String>;

    /// Returns the ARN of the new flow definition.
    async fn create_flow_definition(&self, request: &FlowDefinitionRequest) -> Result<String>;

    async fn describe_flow_definition(&self, name: &str) -> Result<FlowDefinitionDescription>;
}

/// S3 calls.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Downloads the whole object body.
    async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>>;

    /// Replaces the bucket's CORS configuration with `rules`.
    async fn put_bucket_cors(&self, bucket: &str, rules: &[CorsRule]) -> Result<()>;
}

/// IAM calls.
#[async_trait]
pub trait RoleManager: Send + Sync {
    async fn attach_role_policy(&self, role_name: &str, policy_arn: &str) -> Result<()>;
}
