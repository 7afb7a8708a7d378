use std::collections::HashMap;

use crate::error::EvalError;

use super::binding::{ProviderBinding, ProviderKind};

/// Immutable lookup table of model identifiers.
#[derive(Debug, Clone, Default)]
pub struct ModelRegistry {
    bindings: HashMap<String, ProviderBinding>,
}

impl ModelRegistry {
    pub fn builder() -> ModelRegistryBuilder {
        ModelRegistryBuilder::default()
    }

    /// Built-in table: Mixtral on a chat endpoint and GPT-2 on a text endpoint.
    pub fn default_table() -> Self {
        Self::builder()
            .register(ProviderBinding::new(
                "mixtral-8x7b",
                ProviderKind::ChatCompletion,
                "mixtral-8x7b-32768",
            ))
            .register(ProviderBinding::new(
                "gpt-2",
                ProviderKind::TextCompletion,
                "gpt2",
            ))
            .build()
    }

    /// Looks up a binding by exact identifier.
    pub fn resolve(&self, identifier: &str) -> Result<&ProviderBinding, EvalError> {
        self.bindings
            .get(identifier)
            .ok_or_else(|| EvalError::UnresolvedModel(identifier.to_string()))
    }

    /// All registered identifiers, sorted.
    pub fn identifiers(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.bindings.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// All bindings, sorted by identifier.
    pub fn bindings(&self) -> Vec<&ProviderBinding> {
        let mut bindings: Vec<&ProviderBinding> = self.bindings.values().collect();
        bindings.sort_by(|a, b| a.identifier.cmp(&b.identifier));
        bindings
    }

    /// Provider kinds referenced by at least one binding.
    pub fn kinds(&self) -> Vec<ProviderKind> {
        let mut kinds: Vec<ProviderKind> = Vec::new();
        for binding in self.bindings.values() {
            if !kinds.contains(&binding.provider_kind) {
                kinds.push(binding.provider_kind);
            }
        }
        kinds
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Builder pattern for ModelRegistry.
#[derive(Default)]
pub struct ModelRegistryBuilder {
    registry: ModelRegistry,
}

impl ModelRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a binding, logging and skipping invalid identifiers.
    pub fn register(mut self, binding: ProviderBinding) -> Self {
        if let Err(err) = self.insert(binding) {
            log::warn!("Invalid model binding: {err}");
        }
        self
    }

    /// Adds a binding with validation.
    pub fn try_register(mut self, binding: ProviderBinding) -> Result<Self, EvalError> {
        self.insert(binding)?;
        Ok(self)
    }

    pub fn build(self) -> ModelRegistry {
        self.registry
    }

    fn insert(&mut self, binding: ProviderBinding) -> Result<(), EvalError> {
        if binding.identifier.trim().is_empty() {
            return Err(EvalError::InvalidRequest(
                "Model identifier cannot be empty".to_string(),
            ));
        }
        if binding.provider_model_name.trim().is_empty() {
            return Err(EvalError::InvalidRequest(format!(
                "Model {} has no provider model name",
                binding.identifier
            )));
        }
        if self.registry.bindings.contains_key(&binding.identifier) {
            return Err(EvalError::InvalidRequest(format!(
                "Model {} registered twice",
                binding.identifier
            )));
        }
        self.registry
            .bindings
            .insert(binding.identifier.clone(), binding);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_resolves_known_models() {
        let registry = ModelRegistry::default_table();
        let mixtral = registry.resolve("mixtral-8x7b").unwrap();
        assert_eq!(mixtral.provider_kind, ProviderKind::ChatCompletion);
        assert_eq!(mixtral.provider_model_name, "mixtral-8x7b-32768");

        let gpt2 = registry.resolve("gpt-2").unwrap();
        assert_eq!(gpt2.provider_kind, ProviderKind::TextCompletion);
        assert_eq!(gpt2.provider_model_name, "gpt2");
    }

    #[test]
    fn lookup_is_exact_and_case_sensitive() {
        let registry = ModelRegistry::default_table();
        assert!(matches!(
            registry.resolve("Mixtral-8x7b"),
            Err(EvalError::UnresolvedModel(id)) if id == "Mixtral-8x7b"
        ));
        assert!(registry.resolve("mixtral").is_err());
        assert!(registry.resolve("").is_err());
    }

    #[test]
    fn identifiers_are_sorted() {
        let registry = ModelRegistry::default_table();
        assert_eq!(registry.identifiers(), vec!["gpt-2", "mixtral-8x7b"]);
        assert_eq!(registry.kinds().len(), 2);
    }

    #[test]
    fn try_register_rejects_duplicates_and_blanks() {
        let builder = ModelRegistry::builder()
            .try_register(ProviderBinding::new("a", ProviderKind::ChatCompletion, "a-1"))
            .unwrap();
        assert!(builder
            .try_register(ProviderBinding::new("a", ProviderKind::TextCompletion, "a-2"))
            .is_err());

        assert!(ModelRegistry::builder()
            .try_register(ProviderBinding::new("  ", ProviderKind::ChatCompletion, "x"))
            .is_err());
    }

    #[test]
    fn register_skips_invalid_bindings() {
        let registry = ModelRegistry::builder()
            .register(ProviderBinding::new("", ProviderKind::ChatCompletion, "x"))
            .register(ProviderBinding::new("ok", ProviderKind::ChatCompletion, "ok-1"))
            .build();
        assert_eq!(registry.len(), 1);
    }
}
