//! Search coordinator: debounced input, one fetch per settled query.

mod machine;
mod runtime;

pub use machine::{
    Command, CoordinatorConfig, Event, FetchRequest, Phase, RequestId, ResponseOrdering,
    SearchMachine, SearchSnapshot, TimerId, DEFAULT_DEBOUNCE,
};
pub use runtime::{CoordinatorClosed, SearchCoordinator, SearchHandle};
