//! Dry-run listing of recoverable executions

use futures::StreamExt;
use sfn_recover::{FailedStatus, RecoverConfig, RecoverError, RecoverResult};

use super::build_recoverer;

pub async fn handle_list_command(
    status: FailedStatus,
    format: &str,
    config: &RecoverConfig,
) -> RecoverResult<()> {
    if !matches!(format, "text" | "json") {
        return Err(RecoverError::invalid_input(format!(
            "Invalid format '{}'. Valid: text, json",
            format
        )));
    }

    let recoverer = build_recoverer(config).await?;
    let mut pages = recoverer.list_matching_executions(status);
    let mut total = 0usize;

    while let Some(batch) = pages.next().await {
        for execution in batch? {
            total += 1;
            if format == "json" {
                println!("{}", serde_json::to_string(&execution)?);
            } else {
                println!(
                    "{} | {} | {}",
                    execution.execution_arn,
                    execution.status,
                    execution.start_date.to_rfc3339()
                );
            }
        }
    }

    if format == "text" {
        println!(
            "\nFound {} {} execution(s) in window {}",
            total,
            status,
            recoverer.time_window()
        );
    }
    Ok(())
}
