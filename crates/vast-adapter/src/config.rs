//! Adapter configuration.

use crate::type_key::TypeKey;

/// Behavior switches for a [`ListAdapter`](crate::ListAdapter).
///
/// With the `serde` feature the config can be read from a host's settings
/// file:
///
/// ```ignore
/// let config: AdapterConfig = serde_json::from_str(r#"{"detect_moves": false}"#)?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AdapterConfig {
    /// Report rows that left the LCS as moves instead of remove + insert.
    /// Default: true
    pub detect_moves: bool,

    /// View type of the placeholder row shown while the list is empty.
    /// The key must be registered. Default: none
    pub empty_view: Option<TypeKey>,

    /// Emit a `debug!` event with the op summary of every applied script.
    /// Default: true
    pub log_scripts: bool,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            detect_moves: true,
            empty_view: None,
            log_scripts: true,
        }
    }
}

impl AdapterConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn detect_moves(mut self, detect: bool) -> Self {
        self.detect_moves = detect;
        self
    }

    #[must_use]
    pub fn empty_view(mut self, key: impl Into<TypeKey>) -> Self {
        self.empty_view = Some(key.into());
        self
    }

    #[must_use]
    pub fn log_scripts(mut self, log: bool) -> Self {
        self.log_scripts = log;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = AdapterConfig::default();
        assert!(config.detect_moves);
        assert!(config.empty_view.is_none());
        assert!(config.log_scripts);
    }

    #[test]
    fn builder() {
        let config = AdapterConfig::new().detect_moves(false).empty_view(9u32);
        assert!(!config.detect_moves);
        assert_eq!(config.empty_view, Some(TypeKey::id(9)));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn partial_json_uses_defaults() {
        let config: AdapterConfig =
            serde_json::from_str(r#"{"detect_moves": false, "empty_view": "empty"}"#).unwrap();
        assert!(!config.detect_moves);
        assert_eq!(config.empty_view, Some(TypeKey::name("empty")));
        assert!(config.log_scripts);
    }
}
