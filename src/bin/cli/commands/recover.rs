//! Restart and redrive command handlers

use sfn_recover::{FailedStatus, RecoverConfig, RecoverResult};
use tracing::info;

use super::build_recoverer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryAction {
    Restart,
    Redrive,
}

pub async fn handle_recover_command(
    action: RecoveryAction,
    status: FailedStatus,
    config: &RecoverConfig,
) -> RecoverResult<()> {
    let recoverer = build_recoverer(config).await?;
    let mut out = std::io::stdout();

    let processed = match (action, status) {
        (RecoveryAction::Restart, FailedStatus::Failed) => recoverer.restart_failed(&mut out).await,
        (RecoveryAction::Restart, FailedStatus::TimedOut) => {
            recoverer.restart_timed_out(&mut out).await
        }
        (RecoveryAction::Redrive, FailedStatus::Failed) => recoverer.redrive_failed(&mut out).await,
        (RecoveryAction::Redrive, FailedStatus::TimedOut) => {
            recoverer.redrive_timed_out(&mut out).await
        }
    }?;

    info!(
        action = ?action,
        status = %status,
        processed,
        state_machine_arn = %recoverer.state_machine_arn(),
        "Recovery finished"
    );
    Ok(())
}
