#[path = "handlers/experiments.rs"]
mod experiments;

#[path = "handlers/status.rs"]
mod status;

#[path = "handlers/helpers.rs"]
mod helpers;

pub use experiments::{create_experiment, list_experiments, list_models};
pub use helpers::{ApiError, ApiResult};
pub use status::handle_root;
