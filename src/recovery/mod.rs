//! # Execution Recovery
//!
//! Lists failed or timed-out executions of one state machine and recovers
//! them, either by restarting them with their original input or by
//! redriving them in place.
//!
//! Executions are processed one at a time in listing order. The first
//! failure stops the run and is returned; nothing is skipped.

mod pages;

pub use pages::{ExecutionBatch, PageQuery, PageStream};

use std::io::Write;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::config::{RecoverConfig, DEFAULT_PAGE_SIZE};
use crate::error::RecoverResult;
use crate::logging::{log_error, log_recovery_operation};
use crate::transport::StepFunctionsClient;
use crate::types::{ExecutionStatus, FailedStatus, TimeWindow};

/// Recovery controller for a single state machine
pub struct Recoverer {
    client: Arc<dyn StepFunctionsClient>,
    state_machine_arn: String,
    window: TimeWindow,
    page_size: i32,
}

impl std::fmt::Debug for Recoverer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Recoverer")
            .field("transport", &self.client.transport_name())
            .field("state_machine_arn", &self.state_machine_arn)
            .field("window", &self.window)
            .field("page_size", &self.page_size)
            .finish()
    }
}

impl Recoverer {
    pub fn new(client: Arc<dyn StepFunctionsClient>, state_machine_arn: impl Into<String>) -> Self {
        Self {
            client,
            state_machine_arn: state_machine_arn.into(),
            window: TimeWindow::default(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Build a controller from loaded configuration. Rejects out-of-range
    /// page sizes and empty windows.
    pub fn from_config(
        client: Arc<dyn StepFunctionsClient>,
        config: &RecoverConfig,
    ) -> RecoverResult<Self> {
        config.validate()?;
        let arn = config.recovery.require_state_machine_arn()?;
        let mut recoverer = Self::new(client, arn).with_page_size(config.recovery.page_size);
        recoverer.set_time_window(config.recovery.from_timestamp, config.recovery.to_timestamp);
        Ok(recoverer)
    }

    pub fn with_page_size(mut self, page_size: i32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Replace the start-time window used by later listings. 0 leaves a side
    /// unbounded. Listings already in progress keep their old window.
    pub fn set_time_window(&mut self, from_unix: i64, to_unix: i64) {
        self.window = TimeWindow::from_unix(from_unix, to_unix);
    }

    pub fn time_window(&self) -> TimeWindow {
        self.window
    }

    pub fn state_machine_arn(&self) -> &str {
        &self.state_machine_arn
    }

    /// Stream the executions matching `status` and the current window, one
    /// batch per listing page.
    pub fn list_matching_executions(&self, status: impl Into<ExecutionStatus>) -> PageStream {
        PageStream::spawn(
            Arc::clone(&self.client),
            PageQuery {
                state_machine_arn: self.state_machine_arn.clone(),
                status: status.into(),
                window: self.window,
                page_size: self.page_size,
            },
        )
    }

    pub async fn restart_failed<W: Write>(&self, out: &mut W) -> RecoverResult<usize> {
        self.restart(FailedStatus::Failed, out).await
    }

    pub async fn restart_timed_out<W: Write>(&self, out: &mut W) -> RecoverResult<usize> {
        self.restart(FailedStatus::TimedOut, out).await
    }

    pub async fn redrive_failed<W: Write>(&self, out: &mut W) -> RecoverResult<usize> {
        self.redrive(FailedStatus::Failed, out).await
    }

    pub async fn redrive_timed_out<W: Write>(&self, out: &mut W) -> RecoverResult<usize> {
        self.redrive(FailedStatus::TimedOut, out).await
    }

    /// Start a new execution for every match, reusing the original input.
    ///
    /// Writes the old and new ARN for each restarted execution to `out` and
    /// returns how many were restarted.
    #[instrument(skip(self, out), fields(state_machine_arn = %self.state_machine_arn, window = %self.window))]
    pub async fn restart<W: Write>(&self, status: FailedStatus, out: &mut W) -> RecoverResult<usize> {
        let mut pages = self.list_matching_executions(status);
        let mut restarted = 0usize;

        while let Some(batch) = pages.next_page().await {
            for execution in batch? {
                let started = self
                    .restart_one(&execution.execution_arn)
                    .await
                    .inspect_err(|e| {
                        log_error(
                            "recovery",
                            "restart",
                            &e.to_string(),
                            Some(&execution.execution_arn),
                        )
                    })?;

                writeln!(
                    out,
                    "restarted execution: {}\nnew execution: {}\n",
                    execution.execution_arn, started
                )?;
                log_recovery_operation(
                    "restart",
                    &execution.execution_arn,
                    Some(&started),
                    execution.status.as_str(),
                );
                restarted += 1;
            }
        }

        info!(restarted, %status, "Restart complete");
        Ok(restarted)
    }

    async fn restart_one(&self, execution_arn: &str) -> RecoverResult<String> {
        let detail = self.client.describe_execution(execution_arn).await?;
        let started = self
            .client
            .start_execution(&self.state_machine_arn, detail.input)
            .await?;
        Ok(started.execution_arn)
    }

    /// Redrive every match in place.
    ///
    /// Writes each redriven ARN to `out` and returns how many were redriven.
    #[instrument(skip(self, out), fields(state_machine_arn = %self.state_machine_arn, window = %self.window))]
    pub async fn redrive<W: Write>(&self, status: FailedStatus, out: &mut W) -> RecoverResult<usize> {
        let mut pages = self.list_matching_executions(status);
        let mut redriven = 0usize;

        while let Some(batch) = pages.next_page().await {
            for execution in batch? {
                self.client
                    .redrive_execution(&execution.execution_arn)
                    .await
                    .inspect_err(|e| {
                        log_error(
                            "recovery",
                            "redrive",
                            &e.to_string(),
                            Some(&execution.execution_arn),
                        )
                    })?;

                writeln!(out, "redriven execution: {}\n", execution.execution_arn)?;
                log_recovery_operation(
                    "redrive",
                    &execution.execution_arn,
                    None,
                    execution.status.as_str(),
                );
                redriven += 1;
            }
        }

        info!(redriven, %status, "Redrive complete");
        Ok(redriven)
    }
}
