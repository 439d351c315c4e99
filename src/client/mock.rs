use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;

use super::Transport;
use crate::error::RequestFailure;

/// One scripted reply: what to return, and how long to take.
#[derive(Debug, Clone)]
pub struct MockReply {
    pub delay: Duration,
    pub outcome: Result<Value, RequestFailure>,
}

impl MockReply {
    pub fn ok(value: Value) -> Self {
        Self {
            delay: Duration::ZERO,
            outcome: Ok(value),
        }
    }

    pub fn fail(message: &str) -> Self {
        Self {
            delay: Duration::ZERO,
            outcome: Err(RequestFailure::new(message)),
        }
    }

    /// Delay the reply by `delay`.
    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// A request the mock has seen.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub url: String,
    pub body: Value,
}

/// A scripted transport for tests. Returns pre-defined replies in call order.
pub struct MockTransport {
    replies: Vec<MockReply>,
    index: AtomicUsize,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockTransport {
    pub fn new(replies: Vec<MockReply>) -> Self {
        Self {
            replies,
            index: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Every request received so far, in call order.
    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().await.clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn post_json(&self, url: &str, body: &Value) -> Result<Value, RequestFailure> {
        let i = self.index.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().await.push(RecordedRequest {
            url: url.to_string(),
            body: body.clone(),
        });

        let reply = self.replies.get(i).cloned().ok_or_else(|| {
            RequestFailure::new(format!(
                "MockTransport: no more replies (called {} times)",
                i + 1
            ))
        })?;

        if !reply.delay.is_zero() {
            tokio::time::sleep(reply.delay).await;
        }
        reply.outcome
    }
}
