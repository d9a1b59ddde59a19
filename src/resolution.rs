//! Resolution state for the lookup view
//!
//! One [`Resolution`] value replaces separate loading/error/data flags, and
//! every change goes through a single private transition function. Each fetch
//! is tagged with a [`Ticket`]; completions carrying an outdated ticket are
//! dropped so a slow, superseded query can never overwrite a newer one.
//! The last successful records stay visible while loading and after a
//! failure, until a newer fetch succeeds.

use crate::error::LookupError;
use crate::lookup::Record;
use crate::resolver::Query;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Resolution {
    #[default]
    Idle,
    /// `previous` holds the last successful records, shown until this fetch lands
    Loading { previous: Vec<Record> },
    Success(Vec<Record>),
    /// `previous` holds the last successful records, kept on screen
    /// alongside the retry prompt.
    Failed {
        reason: String,
        previous: Vec<Record>,
    },
}

impl Resolution {
    pub fn is_loading(&self) -> bool {
        matches!(self, Resolution::Loading { .. })
    }

    /// Records to display in this state
    pub fn records(&self) -> &[Record] {
        match self {
            Resolution::Success(records) => records,
            Resolution::Loading { previous } | Resolution::Failed { previous, .. } => previous,
            Resolution::Idle => &[],
        }
    }
}

#[derive(Debug, Clone)]
enum Transition {
    Start,
    Succeed(Vec<Record>),
    Fail(String),
    Reset,
}

/// Handle for one in-flight resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    token: u64,
    query: Query,
}

impl Ticket {
    pub fn token(&self) -> u64 {
        self.token
    }

    pub fn query(&self) -> &Query {
        &self.query
    }
}

#[derive(Debug, Default)]
pub struct ResolutionTracker {
    state: Resolution,
    last_success: Vec<Record>,
    latest: Option<Ticket>,
    next_token: u64,
}

impl ResolutionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &Resolution {
        &self.state
    }

    fn apply(&mut self, transition: Transition) {
        self.state = match transition {
            Transition::Start => Resolution::Loading {
                previous: self.last_success.clone(),
            },
            Transition::Succeed(records) => {
                self.last_success = records.clone();
                Resolution::Success(records)
            }
            Transition::Fail(reason) => Resolution::Failed {
                reason,
                previous: self.last_success.clone(),
            },
            Transition::Reset => {
                self.last_success.clear();
                self.latest = None;
                Resolution::Idle
            }
        };
    }

    /// Start resolving `query`; supersedes any fetch still in flight
    pub fn begin(&mut self, query: Query) -> Ticket {
        self.next_token += 1;
        let ticket = Ticket {
            token: self.next_token,
            query,
        };
        self.latest = Some(ticket.clone());
        self.apply(Transition::Start);
        ticket
    }

    pub fn is_current(&self, ticket: &Ticket) -> bool {
        self.latest.as_ref() == Some(ticket)
    }

    /// Commit an outcome; returns false (and changes nothing) when stale
    pub fn complete(&mut self, ticket: &Ticket, outcome: Result<Vec<Record>, LookupError>) -> bool {
        if !self.is_current(ticket) {
            tracing::debug!(token = ticket.token, "discarding stale resolution");
            return false;
        }
        match outcome {
            Ok(records) => self.apply(Transition::Succeed(records)),
            Err(e) => self.apply(Transition::Fail(e.to_string())),
        }
        true
    }

    /// Back to idle; forgets shown records and orphans any in-flight ticket
    pub fn reset(&mut self) {
        self.apply(Transition::Reset);
    }

    /// Query of the latest ticket, for a user-triggered retry
    pub fn retry_query(&self) -> Option<Query> {
        self.latest.as_ref().map(|t| t.query.clone())
    }
}
