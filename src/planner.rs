//! Owns the form snapshot and runs submissions against a [`Transport`].

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::{AbortHandle, JoinHandle};
use tracing::{debug, info, warn};

use crate::client::Transport;
use crate::render::render;
use crate::state::{Event, OverlapPolicy, Snapshot, Ticket, reduce};
use crate::trip::{Field, Shell, TripResult};

/// Resolved settings for one planner session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannerConfig {
    pub shell: Shell,
    /// Full URL requests are POSTed to.
    pub endpoint: String,
    pub policy: OverlapPolicy,
}

/// The form plus the request client behind it.
///
/// All state lives in a `watch` channel so a renderer can follow along via
/// [`Planner::subscribe`]. Each change runs through [`reduce`].
pub struct Planner {
    config: PlannerConfig,
    transport: Arc<dyn Transport>,
    state: Arc<watch::Sender<Snapshot>>,
    next_ticket: u64,
    /// Tasks that may still be running. Finished ones are pruned on submit.
    in_flight: Vec<(Ticket, AbortHandle)>,
}

impl Planner {
    pub fn new(config: PlannerConfig, transport: Arc<dyn Transport>) -> Self {
        let (tx, _) = watch::channel(Snapshot::new(config.shell, config.policy));
        Self {
            config,
            transport,
            state: Arc::new(tx),
            next_ticket: 0,
            in_flight: Vec::new(),
        }
    }

    pub fn shell(&self) -> Shell {
        self.config.shell
    }

    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }

    pub fn policy(&self) -> OverlapPolicy {
        self.config.policy
    }

    /// Number of submissions started so far.
    pub fn submissions(&self) -> u64 {
        self.next_ticket
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.borrow().clone()
    }

    /// Follow snapshot changes. Does not replay the past, but the receiver
    /// starts out holding the current snapshot.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.state.subscribe()
    }

    pub fn render(&self) -> String {
        render(&self.state.borrow())
    }

    /// Set a field to `text`, verbatim.
    pub fn edit(&self, field: Field, text: impl Into<String>) {
        dispatch(
            &self.state,
            Event::Edited {
                field,
                text: text.into(),
            },
        );
    }

    /// Empty the form and forget the result. Cancels every request in flight.
    pub fn reset(&mut self) {
        for ticket in self.abort_in_flight() {
            info!(%ticket, "request cancelled by reset");
        }
        dispatch(&self.state, Event::Reset);
    }

    /// Abort every task still running and return their tickets.
    fn abort_in_flight(&mut self) -> Vec<Ticket> {
        self.in_flight
            .drain(..)
            .filter(|(_, abort)| !abort.is_finished())
            .map(|(ticket, abort)| {
                abort.abort();
                ticket
            })
            .collect()
    }

    /// Start a submission with the current field values and return at once.
    ///
    /// Under [`OverlapPolicy::LatestIssued`] this cancels the previous
    /// submission if it is still running.
    pub fn submit(&mut self) -> RequestHandle {
        self.next_ticket += 1;
        let ticket = Ticket(self.next_ticket);

        if self.config.policy == OverlapPolicy::LatestIssued {
            for previous in self.abort_in_flight() {
                info!(%previous, superseded_by = %ticket, "request cancelled");
            }
        } else {
            self.in_flight.retain(|(_, abort)| !abort.is_finished());
        }

        dispatch(&self.state, Event::Submitted { ticket });
        let body = self.state.borrow().form.body(self.config.shell);
        debug!(%ticket, endpoint = %self.config.endpoint, "submitting trip request");

        let url = self.config.endpoint.clone();
        let transport = Arc::clone(&self.transport);
        let state = Arc::clone(&self.state);
        let task = tokio::spawn(async move {
            let result = TripResult::from(transport.post_json(&url, &body).await);
            debug!(%ticket, success = result.is_success(), "trip request settled");
            dispatch(
                &state,
                Event::Settled {
                    ticket,
                    result: result.clone(),
                },
            );
            result
        });

        self.in_flight.push((ticket, task.abort_handle()));
        RequestHandle {
            ticket,
            task,
            state: Arc::clone(&self.state),
        }
    }

    /// Submit and wait for the outcome.
    pub async fn plan_trip(&mut self) -> TripResult {
        let mut handle = self.submit();
        handle
            .settled()
            .await
            .unwrap_or_else(|| TripResult::Failure("request cancelled".to_string()))
    }
}

/// A submission in flight.
pub struct RequestHandle {
    ticket: Ticket,
    task: JoinHandle<TripResult>,
    state: Arc<watch::Sender<Snapshot>>,
}

impl RequestHandle {
    pub fn ticket(&self) -> Ticket {
        self.ticket
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Abort the request. The busy flag clears; the previous result stays.
    pub fn cancel(&self) {
        self.task.abort();
        dispatch(&self.state, Event::Cancelled { ticket: self.ticket });
        info!(ticket = %self.ticket, "request cancelled");
    }

    /// Wait for the request to finish. `None` if it was cancelled.
    /// Call at most once per handle.
    pub async fn settled(&mut self) -> Option<TripResult> {
        match (&mut self.task).await {
            Ok(result) => Some(result),
            Err(e) => {
                if e.is_panic() {
                    warn!(ticket = %self.ticket, "request task panicked");
                    dispatch(&self.state, Event::Cancelled { ticket: self.ticket });
                }
                None
            }
        }
    }
}

fn dispatch(state: &watch::Sender<Snapshot>, event: Event) {
    state.send_modify(|snapshot| *snapshot = reduce(snapshot, event));
}
