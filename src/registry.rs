//! Static mapping from logical model identifiers to provider bindings.
//!
//! The registry is built once at startup and never mutated afterwards. Lookups are
//! exact-match and case-sensitive; anything not in the table fails closed with
//! [`EvalError::UnresolvedModel`](crate::error::EvalError::UnresolvedModel).

#[path = "registry/binding.rs"]
mod binding;

#[path = "registry/models.rs"]
mod models;

pub use binding::{ProviderBinding, ProviderKind};
pub use models::{ModelRegistry, ModelRegistryBuilder};
