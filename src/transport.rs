//! # Step Functions Transport
//!
//! The four remote operations the recovery controller consumes, behind a
//! trait so the controller can run against the AWS SDK or a test double.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sfn_recover::{RecoverConfig, transport::SfnClient};
//!
//! let config = RecoverConfig::load()?;
//! let client = SfnClient::from_config(&config.aws).await;
//! let page = client.list_executions(request).await?;
//! ```

use async_trait::async_trait;
use aws_sdk_sfn::error::DisplayErrorContext;
use aws_sdk_sfn::types as sfn;
use chrono::{DateTime, Utc};
use tracing::{debug, instrument};

use crate::config::AwsConfig;
use crate::error::{RecoverError, RecoverResult};
use crate::types::{
    ExecutionDetail, ExecutionPage, ExecutionStatus, ExecutionSummary, ListExecutionsRequest,
    StartedExecution,
};

/// Operations of the orchestration service used for recovery.
#[async_trait]
pub trait StepFunctionsClient: Send + Sync {
    /// Get the transport name for debugging/logging.
    fn transport_name(&self) -> &'static str;

    /// List one page of executions for a state machine.
    async fn list_executions(&self, request: ListExecutionsRequest) -> RecoverResult<ExecutionPage>;

    /// Describe a single execution, including its original input.
    async fn describe_execution(&self, execution_arn: &str) -> RecoverResult<ExecutionDetail>;

    /// Start a new execution of a state machine with the given input.
    async fn start_execution(
        &self,
        state_machine_arn: &str,
        input: Option<String>,
    ) -> RecoverResult<StartedExecution>;

    /// Redrive an execution in place. Returns when the service acknowledged it.
    async fn redrive_execution(&self, execution_arn: &str) -> RecoverResult<DateTime<Utc>>;
}

// ===================================================================================
// AWS SDK IMPLEMENTATION
// ===================================================================================

/// Step Functions client backed by the AWS SDK.
#[derive(Debug, Clone)]
pub struct SfnClient {
    inner: aws_sdk_sfn::Client,
}

impl SfnClient {
    /// Wrap an existing SDK client.
    pub fn new(inner: aws_sdk_sfn::Client) -> Self {
        Self { inner }
    }

    /// Build a client from the default AWS credential and region chain,
    /// with any overrides from configuration applied.
    pub async fn from_config(aws: &AwsConfig) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());

        if let Some(region) = &aws.region {
            loader = loader.region(aws_config::Region::new(region.clone()));
        }
        if let Some(profile) = &aws.profile {
            loader = loader.profile_name(profile);
        }
        if let Some(endpoint) = &aws.endpoint_url {
            loader = loader.endpoint_url(endpoint);
        }

        let sdk_config = loader.load().await;
        debug!(
            region = ?sdk_config.region().map(|r| r.to_string()),
            endpoint_url = ?aws.endpoint_url,
            "Loaded AWS SDK configuration"
        );

        Self::new(aws_sdk_sfn::Client::new(&sdk_config))
    }
}

#[async_trait]
impl StepFunctionsClient for SfnClient {
    fn transport_name(&self) -> &'static str {
        "aws-sdk"
    }

    #[instrument(skip(self, request), fields(state_machine_arn = %request.state_machine_arn, status = ?request.status_filter))]
    async fn list_executions(&self, request: ListExecutionsRequest) -> RecoverResult<ExecutionPage> {
        let output = self
            .inner
            .list_executions()
            .state_machine_arn(&request.state_machine_arn)
            .max_results(request.max_results)
            .set_next_token(request.next_token)
            .set_status_filter(request.status_filter.as_ref().map(to_sdk_status))
            .send()
            .await
            .map_err(|e| remote_error("ListExecutions", e))?;

        let executions = output
            .executions()
            .iter()
            .map(summary_from_sdk)
            .collect::<RecoverResult<Vec<_>>>()?;

        Ok(ExecutionPage {
            executions,
            next_token: output.next_token().map(str::to_string),
        })
    }

    #[instrument(skip(self))]
    async fn describe_execution(&self, execution_arn: &str) -> RecoverResult<ExecutionDetail> {
        let output = self
            .inner
            .describe_execution()
            .execution_arn(execution_arn)
            .send()
            .await
            .map_err(|e| remote_error("DescribeExecution", e))?;

        Ok(ExecutionDetail {
            execution_arn: output.execution_arn().to_string(),
            status: from_sdk_status(output.status()),
            start_date: to_chrono(output.start_date())?,
            input: output.input().map(str::to_string),
        })
    }

    #[instrument(skip(self, input))]
    async fn start_execution(
        &self,
        state_machine_arn: &str,
        input: Option<String>,
    ) -> RecoverResult<StartedExecution> {
        let output = self
            .inner
            .start_execution()
            .state_machine_arn(state_machine_arn)
            .set_input(input)
            .send()
            .await
            .map_err(|e| remote_error("StartExecution", e))?;

        Ok(StartedExecution {
            execution_arn: output.execution_arn().to_string(),
            start_date: to_chrono(output.start_date())?,
        })
    }

    #[instrument(skip(self))]
    async fn redrive_execution(&self, execution_arn: &str) -> RecoverResult<DateTime<Utc>> {
        let output = self
            .inner
            .redrive_execution()
            .execution_arn(execution_arn)
            .send()
            .await
            .map_err(|e| remote_error("RedriveExecution", e))?;

        to_chrono(output.redrive_date())
    }
}

// ===================================================================================
// CONVERSIONS
// ===================================================================================

fn remote_error<E>(operation: &str, err: E) -> RecoverError
where
    E: std::error::Error + 'static,
{
    RecoverError::remote(operation, DisplayErrorContext(&err).to_string())
}

fn to_sdk_status(status: &ExecutionStatus) -> sfn::ExecutionStatus {
    sfn::ExecutionStatus::from(status.as_str())
}

fn from_sdk_status(status: &sfn::ExecutionStatus) -> ExecutionStatus {
    ExecutionStatus::from(status.as_str())
}

fn to_chrono(date: &aws_sdk_sfn::primitives::DateTime) -> RecoverResult<DateTime<Utc>> {
    DateTime::from_timestamp(date.secs(), date.subsec_nanos()).ok_or_else(|| {
        RecoverError::Internal(format!("Timestamp out of range: {} seconds", date.secs()))
    })
}

fn summary_from_sdk(item: &sfn::ExecutionListItem) -> RecoverResult<ExecutionSummary> {
    Ok(ExecutionSummary {
        execution_arn: item.execution_arn().to_string(),
        name: item.name().to_string(),
        status: from_sdk_status(item.status()),
        start_date: to_chrono(item.start_date())?,
        stop_date: item.stop_date().map(to_chrono).transpose()?,
        redrive_count: item.redrive_count(),
    })
}
