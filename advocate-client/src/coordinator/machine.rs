//! Search lifecycle as a pure transition function.
//!
//! [`SearchMachine::handle`] consumes one [`Event`] and returns the
//! [`Command`]s the driver must execute. No clocks, channels or I/O live here;
//! the debounce timer is only an identifier the driver arms and reports back.

use std::collections::BTreeMap;
use std::time::Duration;

use advocate_core::Advocate;

use crate::error::FetchError;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// What to do when responses settle out of issue order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseOrdering {
    /// Every settled fetch overwrites the result set, even one issued before
    /// a fetch that already settled.
    #[default]
    LastResolvedWins,
    /// Drop a response when a later-issued request has already been applied.
    LatestIssuedWins,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoordinatorConfig {
    pub debounce: Duration,
    pub ordering: ResponseOrdering,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            ordering: ResponseOrdering::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(pub u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub id: RequestId,
    /// Trimmed, non-empty search term; `None` fetches everything.
    pub query: Option<String>,
}

impl FetchRequest {
    pub fn is_filtered(&self) -> bool {
        self.query.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The consumer is ready; load the unfiltered list.
    Started,
    /// The input box now holds this text.
    Keystroke(String),
    DebounceElapsed(TimerId),
    FetchSettled {
        request: RequestId,
        outcome: Result<Vec<Advocate>, FetchError>,
    },
    ClearRequested,
    RetryRequested,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    ScheduleDebounce { timer: TimerId, delay: Duration },
    CancelDebounce(TimerId),
    IssueFetch(FetchRequest),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Debouncing,
    Fetching,
    Errored,
}

/// Read-only view handed to the rendering consumer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSnapshot {
    /// Exactly what is in the input box.
    pub raw_query: String,
    /// The settled term the displayed results were requested for.
    pub effective_query: Option<String>,
    pub phase: Phase,
    /// An unfiltered fetch is in flight.
    pub loading: bool,
    /// A filtered fetch is in flight.
    pub searching: bool,
    pub error: Option<String>,
    pub advocates: Vec<Advocate>,
}

impl SearchSnapshot {
    pub fn result_count(&self) -> usize {
        self.advocates.len()
    }

    pub fn is_filtered(&self) -> bool {
        self.effective_query.is_some()
    }

    /// Whether a clear action makes sense right now.
    pub fn can_clear(&self) -> bool {
        !self.raw_query.is_empty()
    }

    pub fn can_retry(&self) -> bool {
        self.phase == Phase::Errored
    }
}

#[derive(Debug)]
pub struct SearchMachine {
    config: CoordinatorConfig,
    raw_query: String,
    effective_query: Option<String>,
    pending_timer: Option<TimerId>,
    next_timer: u64,
    next_request: u64,
    in_flight: BTreeMap<RequestId, Option<String>>,
    last_applied: Option<RequestId>,
    failed_query: Option<Option<String>>,
    advocates: Vec<Advocate>,
    error: Option<String>,
}

impl Default for SearchMachine {
    fn default() -> Self {
        Self::new(CoordinatorConfig::default())
    }
}

impl SearchMachine {
    pub fn new(config: CoordinatorConfig) -> Self {
        Self {
            config,
            raw_query: String::new(),
            effective_query: None,
            pending_timer: None,
            next_timer: 0,
            next_request: 0,
            in_flight: BTreeMap::new(),
            last_applied: None,
            failed_query: None,
            advocates: Vec::new(),
            error: None,
        }
    }

    pub fn config(&self) -> CoordinatorConfig {
        self.config
    }

    pub fn phase(&self) -> Phase {
        if self.pending_timer.is_some() {
            Phase::Debouncing
        } else if !self.in_flight.is_empty() {
            Phase::Fetching
        } else if self.error.is_some() {
            Phase::Errored
        } else {
            Phase::Idle
        }
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.values().any(Option::is_none)
    }

    pub fn is_searching(&self) -> bool {
        self.in_flight.values().any(Option::is_some)
    }

    pub fn raw_query(&self) -> &str {
        &self.raw_query
    }

    pub fn advocates(&self) -> &[Advocate] {
        &self.advocates
    }

    pub fn snapshot(&self) -> SearchSnapshot {
        SearchSnapshot {
            raw_query: self.raw_query.clone(),
            effective_query: self.effective_query.clone(),
            phase: self.phase(),
            loading: self.is_loading(),
            searching: self.is_searching(),
            error: self.error.clone(),
            advocates: self.advocates.clone(),
        }
    }

    pub fn handle(&mut self, event: Event) -> Vec<Command> {
        match event {
            Event::Started => vec![self.issue_fetch(None)],
            Event::Keystroke(text) => self.on_keystroke(text),
            Event::DebounceElapsed(timer) => self.on_debounce_elapsed(timer),
            Event::FetchSettled { request, outcome } => {
                self.on_fetch_settled(request, outcome);
                Vec::new()
            }
            Event::ClearRequested => self.on_clear(),
            Event::RetryRequested => self.on_retry(),
        }
    }

    fn on_keystroke(&mut self, text: String) -> Vec<Command> {
        self.raw_query = text;

        let mut commands = Vec::with_capacity(2);
        if let Some(previous) = self.pending_timer.take() {
            commands.push(Command::CancelDebounce(previous));
        }
        let timer = TimerId(self.next_timer);
        self.next_timer += 1;
        self.pending_timer = Some(timer);
        commands.push(Command::ScheduleDebounce {
            timer,
            delay: self.config.debounce,
        });
        commands
    }

    fn on_debounce_elapsed(&mut self, timer: TimerId) -> Vec<Command> {
        if self.pending_timer != Some(timer) {
            // Superseded by a later keystroke or a clear.
            return Vec::new();
        }
        self.pending_timer = None;

        let settled = settle(&self.raw_query);
        if settled == self.effective_query && self.error.is_none() {
            return Vec::new();
        }
        self.effective_query = settled.clone();
        vec![self.issue_fetch(settled)]
    }

    fn on_clear(&mut self) -> Vec<Command> {
        let mut commands = Vec::with_capacity(2);
        if let Some(pending) = self.pending_timer.take() {
            commands.push(Command::CancelDebounce(pending));
        }
        self.raw_query.clear();
        self.effective_query = None;
        commands.push(self.issue_fetch(None));
        commands
    }

    fn on_retry(&mut self) -> Vec<Command> {
        match self.failed_query.clone() {
            Some(query) => vec![self.issue_fetch(query)],
            None => Vec::new(),
        }
    }

    fn on_fetch_settled(&mut self, request: RequestId, outcome: Result<Vec<Advocate>, FetchError>) {
        let Some(query) = self.in_flight.remove(&request) else {
            tracing::warn!(request = request.0, "settlement for unknown request ignored");
            return;
        };

        if self.config.ordering == ResponseOrdering::LatestIssuedWins
            && self.last_applied.is_some_and(|applied| applied > request)
        {
            tracing::debug!(request = request.0, "stale response dropped");
            return;
        }
        self.last_applied = Some(request);

        match outcome {
            Ok(advocates) => {
                self.advocates = advocates;
                self.error = None;
                self.failed_query = None;
            }
            Err(e) => {
                self.advocates.clear();
                self.error = Some(e.to_string());
                self.failed_query = Some(query);
            }
        }
    }

    fn issue_fetch(&mut self, query: Option<String>) -> Command {
        let id = RequestId(self.next_request);
        self.next_request += 1;
        self.in_flight.insert(id, query.clone());
        Command::IssueFetch(FetchRequest { id, query })
    }
}

/// The term a settled input box fetches with.
fn settle(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
