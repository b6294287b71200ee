use sfn_recover::{ExecutionStatus, ExecutionSummary};

use super::mock_sfn::at;

pub const STATE_MACHINE_ARN: &str = "arn:aws:states:us-east-1:123456789012:stateMachine:orders";

/// Execution ARN for a run of the test state machine
pub fn execution_arn(name: &str) -> String {
    format!("arn:aws:states:us-east-1:123456789012:execution:orders:{name}")
}

pub fn summary(name: &str, status: ExecutionStatus, started: i64) -> ExecutionSummary {
    ExecutionSummary {
        execution_arn: execution_arn(name),
        name: name.to_string(),
        status,
        start_date: at(started),
        stop_date: Some(at(started + 60)),
        redrive_count: Some(0),
    }
}

pub fn failed(name: &str, started: i64) -> ExecutionSummary {
    summary(name, ExecutionStatus::Failed, started)
}

pub fn timed_out(name: &str, started: i64) -> ExecutionSummary {
    summary(name, ExecutionStatus::TimedOut, started)
}
