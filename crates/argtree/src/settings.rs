//! Parser settings.
//!
//! Settings are resolved once when a [`Parser`](crate::Parser) is built and
//! inherited unchanged by every nested command.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Which spellings the matcher considers.
///
/// Carried for configuration compatibility; matching currently always tries
/// both short and long spellings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NameMode {
    #[default]
    Both,
    Long,
    Short,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Match tokens, spellings and command names without lower-casing them.
    pub case_sensitive: bool,
    /// First input index handed to the engine.
    pub start_index: usize,
    /// Exclusive upper bound of the scanned input. `None` scans to the end.
    pub stop_index: Option<usize>,
    /// Options must be written `--name=value`.
    pub require_equals: bool,
    pub mode: NameMode,
    /// Omit undetected arguments and commands from results.
    pub keep_only_detected: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            case_sensitive: false,
            start_index: 0,
            stop_index: None,
            require_equals: false,
            mode: NameMode::Both,
            keep_only_detected: false,
        }
    }
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn case_sensitive(mut self, on: bool) -> Self {
        self.case_sensitive = on;
        self
    }

    pub fn start_index(mut self, index: usize) -> Self {
        self.start_index = index;
        self
    }

    pub fn stop_index(mut self, index: impl Into<Option<usize>>) -> Self {
        self.stop_index = index.into();
        self
    }

    pub fn require_equals(mut self, on: bool) -> Self {
        self.require_equals = on;
        self
    }

    pub fn mode(mut self, mode: NameMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn keep_only_detected(mut self, on: bool) -> Self {
        self.keep_only_detected = on;
        self
    }

    /// Apply the case policy to a token, spelling or command name.
    pub fn normalize<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if self.case_sensitive {
            Cow::Borrowed(text)
        } else {
            Cow::Owned(text.to_lowercase())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_resolves_to_defaults() {
        let settings: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, Settings::default());
        assert!(!settings.case_sensitive);
        assert_eq!(settings.start_index, 0);
        assert_eq!(settings.stop_index, None);
        assert_eq!(settings.mode, NameMode::Both);
    }

    #[test]
    fn settings_deserialize_camel_case() {
        let json = r#"{
  "caseSensitive": true,
  "startIndex": 2,
  "stopIndex": 5,
  "requireEquals": true,
  "mode": "long",
  "keepOnlyDetected": true
}"#;
        let settings: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(
            settings,
            Settings::new()
                .case_sensitive(true)
                .start_index(2)
                .stop_index(5)
                .require_equals(true)
                .mode(NameMode::Long)
                .keep_only_detected(true)
        );
    }

    #[test]
    fn normalize_follows_case_policy() {
        assert_eq!(Settings::default().normalize("--HELP"), "--help");
        assert_eq!(
            Settings::default().case_sensitive(true).normalize("--HELP"),
            "--HELP"
        );
    }
}
