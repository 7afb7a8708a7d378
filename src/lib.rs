//! Multi-provider prompt dispatch and scoring.
//!
//! A prompt is sent to several models at once. Each requested identifier is resolved
//! through the [`registry`], called over its provider [`transport`] with a per-call
//! timeout, timed, and scored by [`scoring`]. The [`dispatch`] engine returns one ordered
//! entry per requested model, failures included, and the [`store`] keeps the result as an
//! experiment.
//!
//! ```no_run
//! use llm_eval::{config::load_config, dispatch::DispatchRequest};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let service = load_config(None)?.build_service()?;
//! let experiment = service
//!     .run(DispatchRequest::new(
//!         "Why is the sky blue?",
//!         vec!["mixtral-8x7b".into(), "gpt-2".into()],
//!     ))
//!     .await?;
//! for entry in &experiment.responses {
//!     println!("{}: {:?}", entry.model, entry.metrics());
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod dispatch;
pub mod error;
pub mod registry;
pub mod scoring;
pub mod service;
pub mod store;
pub mod transport;

#[cfg(feature = "api")]
pub mod api;

pub use dispatch::{DispatchRequest, Dispatcher, ResultEntry};
pub use error::EvalError;
pub use service::ExperimentService;
