use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use sfn_recover::{
    ExecutionDetail, ExecutionPage, ExecutionStatus, ExecutionSummary, ListExecutionsRequest,
    RecoverError, RecoverResult, StartedExecution, StepFunctionsClient,
};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// One recorded call against the mock service
#[derive(Debug, Clone, PartialEq)]
pub enum MockCall {
    List(ListExecutionsRequest),
    Describe(String),
    Start {
        state_machine_arn: String,
        input: Option<String>,
    },
    Redrive(String),
}

/// In-memory Step Functions double.
///
/// Serves a fixed sequence of pages; page `n` carries the token `page-{n+1}`
/// unless it is the last one. Every call is recorded in order.
#[derive(Debug, Default)]
pub struct MockStepFunctions {
    pages: Vec<Vec<ExecutionSummary>>,
    inputs: HashMap<String, String>,
    failing_arns: HashSet<String>,
    failing_list_page: Option<usize>,
    failing_start_inputs: HashSet<String>,
    calls: Mutex<Vec<MockCall>>,
}

impl MockStepFunctions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve these pages, in order
    pub fn with_pages(mut self, pages: Vec<Vec<ExecutionSummary>>) -> Self {
        self.pages = pages;
        self
    }

    /// Original input returned by describe for `arn`
    pub fn with_input(mut self, arn: &str, input: &str) -> Self {
        self.inputs.insert(arn.to_string(), input.to_string());
        self
    }

    /// Make describe and redrive fail for `arn`
    pub fn failing_for(mut self, arn: &str) -> Self {
        self.failing_arns.insert(arn.to_string());
        self
    }

    /// Make start fail when it is given `input`
    pub fn failing_start_for(mut self, input: &str) -> Self {
        self.failing_start_inputs.insert(input.to_string());
        self
    }

    /// Make the listing call for page index `page` fail
    pub fn failing_list_page(mut self, page: usize) -> Self {
        self.failing_list_page = Some(page);
        self
    }

    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn list_calls(&self) -> Vec<ListExecutionsRequest> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                MockCall::List(req) => Some(req),
                _ => None,
            })
            .collect()
    }

    pub fn describe_calls(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                MockCall::Describe(arn) => Some(arn),
                _ => None,
            })
            .collect()
    }

    pub fn start_calls(&self) -> Vec<(String, Option<String>)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                MockCall::Start {
                    state_machine_arn,
                    input,
                } => Some((state_machine_arn, input)),
                _ => None,
            })
            .collect()
    }

    pub fn redrive_calls(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                MockCall::Redrive(arn) => Some(arn),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: MockCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn check_failure(&self, operation: &str, arn: &str) -> RecoverResult<()> {
        if self.failing_arns.contains(arn) {
            return Err(RecoverError::remote(
                operation,
                format!("simulated failure for {arn}"),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl StepFunctionsClient for MockStepFunctions {
    fn transport_name(&self) -> &'static str {
        "mock"
    }

    async fn list_executions(&self, request: ListExecutionsRequest) -> RecoverResult<ExecutionPage> {
        let index = match request.next_token.as_deref() {
            None => 0,
            Some(token) => token
                .strip_prefix("page-")
                .and_then(|n| n.parse::<usize>().ok())
                .ok_or_else(|| RecoverError::remote("ListExecutions", "invalid token"))?,
        };
        self.record(MockCall::List(request));

        if self.failing_list_page == Some(index) {
            return Err(RecoverError::remote(
                "ListExecutions",
                format!("simulated failure on page {index}"),
            ));
        }

        let executions = self.pages.get(index).cloned().unwrap_or_default();
        let next_token = (index + 1 < self.pages.len()).then(|| format!("page-{}", index + 1));
        Ok(ExecutionPage {
            executions,
            next_token,
        })
    }

    async fn describe_execution(&self, execution_arn: &str) -> RecoverResult<ExecutionDetail> {
        self.record(MockCall::Describe(execution_arn.to_string()));
        self.check_failure("DescribeExecution", execution_arn)?;

        Ok(ExecutionDetail {
            execution_arn: execution_arn.to_string(),
            status: ExecutionStatus::Failed,
            start_date: at(0),
            input: self.inputs.get(execution_arn).cloned(),
        })
    }

    async fn start_execution(
        &self,
        state_machine_arn: &str,
        input: Option<String>,
    ) -> RecoverResult<StartedExecution> {
        let started = self.start_calls().len() + 1;
        let fails = input
            .as_ref()
            .is_some_and(|i| self.failing_start_inputs.contains(i));
        self.record(MockCall::Start {
            state_machine_arn: state_machine_arn.to_string(),
            input,
        });
        if fails {
            return Err(RecoverError::remote(
                "StartExecution",
                format!("simulated start failure #{started}"),
            ));
        }

        Ok(StartedExecution {
            execution_arn: format!("{state_machine_arn}:restart-{started}"),
            start_date: at(0),
        })
    }

    async fn redrive_execution(&self, execution_arn: &str) -> RecoverResult<DateTime<Utc>> {
        self.record(MockCall::Redrive(execution_arn.to_string()));
        self.check_failure("RedriveExecution", execution_arn)?;
        Ok(at(0))
    }
}

pub fn at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).unwrap()
}
