use std::{fmt, sync::Arc};
use uuid::Uuid;

/// Idempotency token attached to one logical load batch.
///
/// The same label is sent on every attempt of a batch so that the store can
/// recognise a retried submission it has already committed.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LoadLabel(Arc<str>);

impl LoadLabel {
    pub fn new(id: impl Into<String>) -> Self {
        Self(Arc::from(id.into()))
    }

    /// Generates a fresh random label, optionally prefixed as `<prefix>-<uuid>`.
    pub fn generate(prefix: Option<&str>) -> Self {
        let id = Uuid::new_v4();
        match prefix {
            Some(prefix) if !prefix.is_empty() => Self::new(format!("{prefix}-{id}")),
            _ => Self::new(id.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LoadLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for LoadLabel {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for LoadLabel {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_is_unique() {
        assert_ne!(LoadLabel::generate(None), LoadLabel::generate(None));
    }

    #[test]
    fn test_generate_with_prefix() {
        let label = LoadLabel::generate(Some("orders"));
        let suffix = label.as_str().strip_prefix("orders-").unwrap();
        assert!(Uuid::parse_str(suffix).is_ok());
    }

    #[test]
    fn test_generate_ignores_empty_prefix() {
        let label = LoadLabel::generate(Some(""));
        assert!(Uuid::parse_str(label.as_str()).is_ok());
    }
}
