//! Model value object representing an LLM model id

use serde::{Deserialize, Serialize};

/// Identifier of an LLM model (Value Object).
///
/// Model ids are provider-scoped strings such as `"anthropic/claude-sonnet-4"`
/// or `"meta/llama-3:fast"`. The engine never interprets the id beyond passing
/// it to the gateway; a provider may substitute a different id at serve time
/// (fallback model), which is reported back on the response.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Model(String);

impl Model {
    /// Create a model id.
    ///
    /// # Panics
    /// Panics if the id is empty or only whitespace
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        assert!(!id.trim().is_empty(), "Model id cannot be empty");
        Self(id)
    }

    /// Try to create a model id, returning None if invalid
    pub fn try_new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            None
        } else {
            Some(Self(id))
        }
    }

    /// Get the string identifier for this model
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the inner id
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Model {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Model(s.to_string()))
    }
}

impl From<&str> for Model {
    fn from(s: &str) -> Self {
        Model::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_roundtrip() {
        let model = Model::new("anthropic/claude-sonnet-4");
        let s = model.to_string();
        let parsed: Model = s.parse().unwrap();
        assert_eq!(model, parsed);
    }

    #[test]
    fn test_serde_is_plain_string() {
        let model = Model::new("x/y:fast");
        let json = serde_json::to_string(&model).unwrap();
        assert_eq!(json, r#""x/y:fast""#);
        let back: Model = serde_json::from_str(&json).unwrap();
        assert_eq!(back, model);
    }

    #[test]
    #[should_panic]
    fn test_empty_model_panics() {
        Model::new("  ");
    }

    #[test]
    fn test_try_new() {
        assert!(Model::try_new("").is_none());
        assert!(Model::try_new("x/y").is_some());
    }
}
