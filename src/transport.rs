//! Provider transports.
//!
//! One transport per [`ProviderKind`](crate::registry::ProviderKind). Each sends a prompt
//! (plus optional system prompt) to its endpoint and normalises every success and error
//! shape into `Result<String, EvalError>`. Nothing from reqwest escapes this module.

#[path = "transport/traits.rs"]
mod traits;

#[path = "transport/http.rs"]
mod http;

#[path = "transport/chat_completion.rs"]
mod chat_completion;

#[path = "transport/text_completion.rs"]
mod text_completion;

pub use chat_completion::{ChatCompletionConfig, ChatCompletionTransport};
pub use text_completion::{TextCompletionConfig, TextCompletionTransport};
pub use traits::{SharedTransport, Transport, TransportRequest};

/// Sampling temperature used by both transports unless configured otherwise.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
/// Generation budget for text-completion providers.
pub const DEFAULT_MAX_NEW_TOKENS: u32 = 100;
