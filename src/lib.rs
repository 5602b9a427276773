//! Provisioning client for Amazon Augmented AI (A2I) human review of Textract
//! document analysis.
//!
//! [`Provisioner`] creates the task UI and flow definition, grants the notebook
//! role its managed policies, opens the bucket to the worker UI via CORS and
//! reads back human loop output.

pub mod arn;
pub mod aws;
pub mod conditions;
pub mod config;
pub mod error;
pub mod provisioner;
pub mod results;
pub mod services;
pub mod template;

pub use config::{FailurePolicy, FlowSettings, ProvisionerOptions};
pub use error::{ProvisionError, Result};
pub use provisioner::{Provisioner, SetupReport, StepFailure, NOTEBOOK_ROLE_POLICIES};
pub use results::HumanLoopOutput;
pub use services::{FlowDefinitionDescription, FlowDefinitionStatus};
