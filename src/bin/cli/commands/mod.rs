//! Command handlers for the sfn-recover CLI

pub mod config;
pub mod list;
pub mod recover;

pub use config::handle_config_command;
pub use list::handle_list_command;
pub use recover::{handle_recover_command, RecoveryAction};

use sfn_recover::{RecoverConfig, RecoverResult, Recoverer, SfnClient};
use std::sync::Arc;

/// Build a recovery controller backed by the AWS SDK
pub(crate) async fn build_recoverer(config: &RecoverConfig) -> RecoverResult<Recoverer> {
    // Fail on a missing ARN before touching the AWS credential chain
    config.recovery.require_state_machine_arn()?;
    let client = SfnClient::from_config(&config.aws).await;
    Recoverer::from_config(Arc::new(client), config)
}
