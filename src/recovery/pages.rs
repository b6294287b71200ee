//! Lazy, single-pass stream of filtered execution pages.
//!
//! A background task walks the listing API and hands each page over a
//! single-slot channel. The producer reserves the slot before it fetches, so
//! it never runs more than one page ahead of the consumer.

use futures::Stream;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::error::RecoverResult;
use crate::transport::StepFunctionsClient;
use crate::types::{ExecutionStatus, ExecutionSummary, ListExecutionsRequest, TimeWindow};

/// One page of executions after window filtering
pub type ExecutionBatch = Vec<ExecutionSummary>;

/// Parameters for a paginated listing
#[derive(Debug, Clone)]
pub struct PageQuery {
    pub state_machine_arn: String,
    pub status: ExecutionStatus,
    pub window: TimeWindow,
    pub page_size: i32,
}

/// Stream of filtered pages produced by a background listing task.
///
/// Yields one item per remote page, in the order the service returned them,
/// including pages left empty by filtering. A listing failure is yielded as
/// the last item. Dropping the stream stops the producer.
pub struct PageStream {
    receiver: mpsc::Receiver<RecoverResult<ExecutionBatch>>,
    producer: JoinHandle<()>,
}

impl PageStream {
    /// Spawn the producer task. Must be called within a tokio runtime.
    pub fn spawn(client: Arc<dyn StepFunctionsClient>, query: PageQuery) -> Self {
        let (sender, receiver) = mpsc::channel(1);
        let producer = tokio::spawn(produce_pages(client, query, sender));
        Self { receiver, producer }
    }

    /// Receive the next page, or `None` once the listing is exhausted
    pub async fn next_page(&mut self) -> Option<RecoverResult<ExecutionBatch>> {
        self.receiver.recv().await
    }
}

impl Stream for PageStream {
    type Item = RecoverResult<ExecutionBatch>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.receiver.poll_recv(cx)
    }
}

impl Drop for PageStream {
    fn drop(&mut self) {
        self.producer.abort();
    }
}

async fn produce_pages(
    client: Arc<dyn StepFunctionsClient>,
    query: PageQuery,
    sender: mpsc::Sender<RecoverResult<ExecutionBatch>>,
) {
    let mut next_token: Option<String> = None;
    let mut page_number = 0usize;

    loop {
        // Wait for the consumer to take the previous page before fetching
        let Ok(permit) = sender.reserve().await else {
            debug!(page_number, "Page consumer went away, stopping listing");
            return;
        };

        let request = ListExecutionsRequest::new(&query.state_machine_arn, query.page_size)
            .with_status(query.status.clone())
            .with_next_token(next_token.take());

        let page = match client.list_executions(request).await {
            Ok(page) => page,
            Err(e) => {
                warn!(page_number, error = %e, "Listing executions failed");
                permit.send(Err(e));
                return;
            }
        };
        page_number += 1;

        let fetched = page.executions.len();
        let batch = query.window.filter(page.executions);
        debug!(
            page_number,
            fetched,
            matched = batch.len(),
            has_more = page.next_token.is_some(),
            "Fetched execution page"
        );

        permit.send(Ok(batch));

        match page.next_token.filter(|t| !t.is_empty()) {
            Some(token) => next_token = Some(token),
            None => return,
        }
    }
}
