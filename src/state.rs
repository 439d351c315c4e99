//! Form state as an immutable snapshot plus a pure reducer.
//!
//! Every change to what the user sees goes through [`reduce`]: field edits,
//! submissions, settled requests and cancellations are all [`Event`]s. The
//! [`Planner`](crate::planner::Planner) owns the current snapshot and feeds it
//! events; nothing else mutates it.

use std::fmt;
use std::str::FromStr;

use crate::trip::{Field, Shell, TripForm, TripResult};

/// Identifies one submission. Issued in increasing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(pub u64);

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What happens when a submission starts while another is still in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlapPolicy {
    /// The newest submission owns the result. Older ones are cancelled and
    /// their late replies dropped.
    #[default]
    LatestIssued,
    /// Every reply overwrites the result as it arrives. Whichever resolves
    /// last wins, regardless of issue order.
    Race,
}

impl OverlapPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            OverlapPolicy::LatestIssued => "latest",
            OverlapPolicy::Race => "race",
        }
    }
}

impl fmt::Display for OverlapPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OverlapPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "latest" | "latest-issued" => Ok(OverlapPolicy::LatestIssued),
            "race" => Ok(OverlapPolicy::Race),
            other => anyhow::bail!("unknown overlap policy: {other} (expected latest or race)"),
        }
    }
}

/// Derived view of where the form is in its request cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Busy,
    Succeeded,
    Failed,
}

/// Everything the renderer needs, at one point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub shell: Shell,
    pub policy: OverlapPolicy,
    pub form: TripForm,
    /// The submission currently owning the busy flag, if any.
    pub pending: Option<Ticket>,
    pub result: Option<TripResult>,
}

impl Snapshot {
    pub fn new(shell: Shell, policy: OverlapPolicy) -> Self {
        Self {
            shell,
            policy,
            form: TripForm::default(),
            pending: None,
            result: None,
        }
    }

    /// True while a request is in flight.
    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    pub fn phase(&self) -> Phase {
        if self.is_busy() {
            return Phase::Busy;
        }
        match &self.result {
            None => Phase::Idle,
            Some(TripResult::Success(_)) => Phase::Succeeded,
            Some(TripResult::Failure(_)) => Phase::Failed,
        }
    }
}

/// Something that happened to the form.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Edited { field: Field, text: String },
    Submitted { ticket: Ticket },
    Settled { ticket: Ticket, result: TripResult },
    Cancelled { ticket: Ticket },
    Reset,
}

/// Apply one event to a snapshot, producing the next snapshot.
pub fn reduce(snapshot: &Snapshot, event: Event) -> Snapshot {
    let mut next = snapshot.clone();
    match event {
        Event::Edited { field, text } => {
            next.form.set(field, text);
        }
        Event::Submitted { ticket } => {
            next.pending = Some(ticket);
        }
        Event::Settled { ticket, result } => match snapshot.policy {
            OverlapPolicy::LatestIssued => {
                if snapshot.pending == Some(ticket) {
                    next.pending = None;
                    next.result = Some(result);
                }
            }
            OverlapPolicy::Race => {
                next.pending = None;
                next.result = Some(result);
            }
        },
        Event::Cancelled { ticket } => {
            if snapshot.pending == Some(ticket) {
                next.pending = None;
            }
        }
        Event::Reset => {
            next = Snapshot::new(snapshot.shell, snapshot.policy);
        }
    }
    next
}
