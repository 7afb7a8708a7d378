#[path = "dispatch/types.rs"]
mod types;

#[path = "dispatch/dispatcher.rs"]
mod dispatcher;

pub use dispatcher::{Dispatcher, DEFAULT_TIMEOUT};
pub use types::{best_entry, DispatchRequest, Metrics, Outcome, ResultEntry};
