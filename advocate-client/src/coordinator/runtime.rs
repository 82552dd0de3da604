//! Tokio driver for [`SearchMachine`].
//!
//! One task owns the machine. User input arrives over an mpsc channel, fetches
//! run in a `JoinSet`, and at most one debounce `Sleep` is armed at a time.
//! After every event the current snapshot is published on a watch channel.
//! A fetch task that panics settles its request as a transport failure.

use std::collections::HashMap;
use std::pin::Pin;
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{mpsc, watch};
use tokio::task::{self, JoinError, JoinHandle, JoinSet};
use tokio::time::{self, Sleep};

use advocate_core::Advocate;

use super::machine::{
    Command, CoordinatorConfig, Event, FetchRequest, RequestId, SearchMachine, SearchSnapshot,
    TimerId,
};
use crate::error::FetchError;
use crate::source::{fetch_records, AdvocateSource};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Input {
    Text(String),
    Clear,
    Retry,
}

#[derive(Debug, Error)]
#[error("search coordinator has stopped")]
pub struct CoordinatorClosed;

/// Consumer-side handle: send input, observe snapshots.
///
/// Dropping every clone stops the driver task.
#[derive(Debug, Clone)]
pub struct SearchHandle {
    inputs: mpsc::UnboundedSender<Input>,
    snapshots: watch::Receiver<SearchSnapshot>,
}

impl SearchHandle {
    /// Report the full current contents of the search box.
    pub fn input(&self, text: impl Into<String>) -> Result<(), CoordinatorClosed> {
        self.send(Input::Text(text.into()))
    }

    pub fn clear(&self) -> Result<(), CoordinatorClosed> {
        self.send(Input::Clear)
    }

    pub fn retry(&self) -> Result<(), CoordinatorClosed> {
        self.send(Input::Retry)
    }

    pub fn snapshot(&self) -> SearchSnapshot {
        self.snapshots.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SearchSnapshot> {
        self.snapshots.clone()
    }

    fn send(&self, input: Input) -> Result<(), CoordinatorClosed> {
        self.inputs.send(input).map_err(|_| CoordinatorClosed)
    }
}

type Outcome = Result<Vec<Advocate>, FetchError>;

struct ArmedTimer {
    id: TimerId,
    sleep: Pin<Box<Sleep>>,
}

pub struct SearchCoordinator {
    machine: SearchMachine,
    source: Arc<dyn AdvocateSource>,
    inputs: mpsc::UnboundedReceiver<Input>,
    snapshots: watch::Sender<SearchSnapshot>,
    fetches: JoinSet<Outcome>,
    /// Which request each fetch task is answering.
    requests: HashMap<task::Id, RequestId>,
    timer: Option<ArmedTimer>,
}

impl SearchCoordinator {
    /// Start the driver task. The initial unfiltered fetch is issued right away.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(
        source: Arc<dyn AdvocateSource>,
        config: CoordinatorConfig,
    ) -> (SearchHandle, JoinHandle<()>) {
        let machine = SearchMachine::new(config);
        let (input_tx, input_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, snapshot_rx) = watch::channel(machine.snapshot());

        let mut coordinator = SearchCoordinator {
            machine,
            source,
            inputs: input_rx,
            snapshots: snapshot_tx,
            fetches: JoinSet::new(),
            requests: HashMap::new(),
            timer: None,
        };
        // Issue the initial fetch before any receiver can observe a snapshot.
        coordinator.dispatch(Event::Started);
        let task = tokio::spawn(coordinator.run());

        let handle = SearchHandle {
            inputs: input_tx,
            snapshots: snapshot_rx,
        };
        (handle, task)
    }

    async fn run(mut self) {
        loop {
            tokio::select! {
                input = self.inputs.recv() => match input {
                    Some(Input::Text(text)) => self.dispatch(Event::Keystroke(text)),
                    Some(Input::Clear) => self.dispatch(Event::ClearRequested),
                    Some(Input::Retry) => self.dispatch(Event::RetryRequested),
                    None => break,
                },
                Some(joined) = self.fetches.join_next_with_id(), if !self.fetches.is_empty() => {
                    self.on_joined(joined);
                }
                timer = wait_timer(&mut self.timer) => {
                    self.timer = None;
                    self.dispatch(Event::DebounceElapsed(timer));
                }
            }
        }

        self.fetches.abort_all();
        tracing::debug!("search coordinator stopped");
    }

    fn on_joined(&mut self, joined: Result<(task::Id, Outcome), JoinError>) {
        let (task_id, outcome) = match joined {
            Ok((task_id, outcome)) => (task_id, outcome),
            Err(e) => {
                tracing::error!(error = %e, "fetch task failed");
                let outcome = Err(FetchError::Transport(format!("fetch task failed: {e}")));
                (e.id(), outcome)
            }
        };
        match self.requests.remove(&task_id) {
            Some(request) => self.dispatch(Event::FetchSettled { request, outcome }),
            None => tracing::warn!(task = %task_id, "finished fetch task has no request"),
        }
    }

    fn dispatch(&mut self, event: Event) {
        for command in self.machine.handle(event) {
            self.execute(command);
        }
        self.snapshots.send_replace(self.machine.snapshot());
    }

    fn execute(&mut self, command: Command) {
        match command {
            Command::ScheduleDebounce { timer, delay } => {
                self.timer = Some(ArmedTimer {
                    id: timer,
                    sleep: Box::pin(time::sleep(delay)),
                });
            }
            Command::CancelDebounce(timer) => {
                if self.timer.as_ref().is_some_and(|armed| armed.id == timer) {
                    self.timer = None;
                }
            }
            Command::IssueFetch(FetchRequest { id, query }) => {
                let source = Arc::clone(&self.source);
                let handle = self.fetches.spawn(async move {
                    fetch_records(&*source, query.as_deref()).await
                });
                self.requests.insert(handle.id(), id);
            }
        }
    }
}

async fn wait_timer(timer: &mut Option<ArmedTimer>) -> TimerId {
    match timer {
        Some(armed) => {
            armed.sleep.as_mut().await;
            armed.id
        }
        None => std::future::pending().await,
    }
}
