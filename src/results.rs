use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{ProvisionError, Result};

/// Extracts the object key from an A2I output URI.
///
/// The key is whatever follows the first `s3://{bucket}/` in `uri`.
pub fn output_key<'a>(bucket: &str, uri: &'a str) -> Result<&'a str> {
    let prefix = format!("s3://{bucket}/");
    match uri.split_once(prefix.as_str()) {
        Some((_, key)) if !key.is_empty() => Ok(key),
        _ => Err(ProvisionError::MalformedUri {
            bucket: bucket.to_string(),
            uri: uri.to_string(),
        }),
    }
}

/// `output.json` written by A2I when a human loop completes.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HumanLoopOutput {
    pub flow_definition_arn: Option<String>,
    pub human_loop_name: Option<String>,
    #[serde(default)]
    pub human_answers: Vec<HumanAnswer>,
    #[serde(default)]
    pub input_content: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HumanAnswer {
    #[serde(default)]
    pub answer_content: Value,
    pub submission_time: Option<String>,
    pub acceptance_time: Option<String>,
    pub time_spent_in_seconds: Option<f64>,
    pub worker_id: Option<String>,
    #[serde(default)]
    pub worker_metadata: Value,
}
