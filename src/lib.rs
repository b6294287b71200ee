#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # sfn-recover
//!
//! Recovery for failed and timed-out AWS Step Functions executions.
//!
//! ## Overview
//!
//! The [`recovery::Recoverer`] pages through the executions of one state
//! machine that ended in `FAILED` or `TIMED_OUT`, optionally narrowed to a
//! start-time window, and applies one of two recovery actions to each:
//!
//! - **restart**: start a brand-new execution with the original input
//! - **redrive**: resume the existing execution from where it failed
//!
//! ## Module Organization
//!
//! - [`recovery`] - Recovery controller and paginated listing stream
//! - [`transport`] - Step Functions operations and the AWS SDK client
//! - [`types`] - Execution data model, status filters and time windows
//! - [`config`] - Configuration loading
//! - [`error`] - Structured error handling
//! - [`logging`] - Structured logging setup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use sfn_recover::{RecoverConfig, Recoverer, transport::SfnClient};
//!
//! # async fn example() -> sfn_recover::RecoverResult<()> {
//! let config = RecoverConfig::load()?;
//! let client = Arc::new(SfnClient::from_config(&config.aws).await);
//!
//! let recoverer = Recoverer::from_config(client, &config)?;
//! let redriven = recoverer.redrive_failed(&mut std::io::stdout()).await?;
//! println!("{redriven} executions redriven");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod recovery;
pub mod transport;
pub mod types;

pub use crate::config::{AwsConfig, RecoverConfig, RecoveryConfig};
pub use crate::error::{RecoverError, RecoverResult};
pub use crate::recovery::{ExecutionBatch, PageStream, Recoverer};
pub use crate::transport::{SfnClient, StepFunctionsClient};
pub use crate::types::{
    ExecutionDetail, ExecutionPage, ExecutionStatus, ExecutionSummary, FailedStatus,
    ListExecutionsRequest, StartedExecution, TimeWindow,
};
