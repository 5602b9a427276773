use a2i_setup::aws::{IamRoleManager, S3ObjectStore, SageMakerReviewService};
use a2i_setup::{FailurePolicy, Provisioner, ProvisionerOptions, SetupReport};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type AwsProvisioner = Provisioner<SageMakerReviewService, S3ObjectStore, IamRoleManager>;

#[derive(Parser, Debug)]
#[command(name = "a2i-setup", version, about = "Provision A2I human review for Textract")]
struct Cli {
    /// How CORS and role-permission steps react to failures
    #[arg(long, value_enum, env = "A2I_FAILURE_POLICY", default_value = "log-and-continue", global = true)]
    failure_policy: FailurePolicy,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Register the Textract review template as a human task UI
    CreateTaskUi {
        #[arg(long)]
        name: String,
    },
    /// Create a flow definition bound to an existing task UI
    CreateFlowDefinition {
        #[arg(long)]
        name: String,
        #[arg(long, env = "A2I_WORKTEAM_ARN")]
        workteam_arn: String,
        #[arg(long)]
        task_ui_arn: String,
        #[arg(long, env = "A2I_ROLE_ARN")]
        role_arn: String,
        #[arg(long, env = "A2I_OUTPUT_PATH")]
        output_path: String,
    },
    /// Print the status of a flow definition
    DescribeFlowDefinition {
        #[arg(long)]
        name: String,
    },
    /// Download and print the output of a finished human loop
    RetrieveResults {
        #[arg(long)]
        bucket: String,
        #[arg(long)]
        output_uri: String,
    },
    /// Allow GET requests from any origin on a bucket
    AddCors {
        #[arg(long)]
        bucket: String,
    },
    /// Attach the Textract, SageMaker and S3 managed policies to a role
    GrantRolePermissions {
        #[arg(long)]
        role_name: String,
    },
    /// Run the whole setup: role policies, CORS, task UI, flow definition
    Setup {
        #[arg(long)]
        role_name: String,
        #[arg(long)]
        bucket: String,
        #[arg(long)]
        task_ui_name: String,
        #[arg(long)]
        flow_definition_name: String,
        #[arg(long, env = "A2I_WORKTEAM_ARN")]
        workteam_arn: String,
        #[arg(long, env = "A2I_ROLE_ARN")]
        role_arn: String,
        #[arg(long, env = "A2I_OUTPUT_PATH")]
        output_path: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    // Credentials and region come from the usual AWS environment chain
    let config = aws_config::load_from_env().await;
    let provisioner: AwsProvisioner = Provisioner::with_options(
        SageMakerReviewService::new(&config),
        S3ObjectStore::new(&config),
        IamRoleManager::new(&config),
        ProvisionerOptions {
            failure_policy: cli.failure_policy,
            ..Default::default()
        },
    );

    match cli.command {
        Commands::CreateTaskUi { name } => {
            let arn = provisioner.create_task_ui(&name).await?;
            println!("{arn}");
        }
        Commands::CreateFlowDefinition {
            name,
            workteam_arn,
            task_ui_arn,
            role_arn,
            output_path,
        } => {
            let arn = provisioner
                .create_flow_definition(&name, &workteam_arn, &task_ui_arn, &role_arn, &output_path)
                .await?;
            println!("{arn}");
        }
        Commands::DescribeFlowDefinition { name } => {
            let description = provisioner.describe_flow_definition(&name).await?;
            println!("{} {}", description.arn, description.status);
            if let Some(reason) = description.failure_reason {
                println!("Failure reason: {reason}");
            }
        }
        Commands::RetrieveResults { bucket, output_uri } => {
            let output = provisioner.retrieve_results(&bucket, &output_uri).await?;
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Commands::AddCors { bucket } => {
            let report = provisioner.add_cors_policy(&bucket).await?;
            summarize("add-cors", &report);
        }
        Commands::GrantRolePermissions { role_name } => {
            let report = provisioner.grant_role_permissions(&role_name).await?;
            summarize("grant-role-permissions", &report);
        }
        Commands::Setup {
            role_name,
            bucket,
            task_ui_name,
            flow_definition_name,
            workteam_arn,
            role_arn,
            output_path,
        } => {
            let report = provisioner.grant_role_permissions(&role_name).await?;
            summarize("grant-role-permissions", &report);
            let report = provisioner.add_cors_policy(&bucket).await?;
            summarize("add-cors", &report);

            let ui_arn = provisioner
                .create_task_ui(&task_ui_name)
                .await
                .with_context(|| format!("creating task UI '{task_ui_name}'"))?;
            let flow_arn = provisioner
                .create_flow_definition(
                    &flow_definition_name,
                    &workteam_arn,
                    &ui_arn,
                    &role_arn,
                    &output_path,
                )
                .await
                .with_context(|| format!("creating flow definition '{flow_definition_name}'"))?;

            info!(task_ui = %ui_arn, flow_definition = %flow_arn, "Setup finished");
            println!("{flow_arn}");
        }
    }

    Ok(())
}

fn summarize(operation: &str, report: &SetupReport) {
    // Individual failures were already logged as they happened
    info!(
        operation,
        completed = report.completed.len(),
        failed = report.failures.len(),
        "Best-effort step finished"
    );
}
