//! Emoji identity and matching against configured values.

use serde::{Deserialize, Serialize};

/// The identity of a reaction emoji as delivered by the host platform.
///
/// Custom emojis carry a snowflake id (and usually a name); standard emojis
/// carry only the unicode name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmojiRef {
    /// Custom emoji id, if any.
    pub id: Option<String>,
    /// Unicode character(s) or custom emoji name.
    pub name: Option<String>,
}

impl EmojiRef {
    /// A standard unicode emoji.
    pub fn unicode(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: Some(name.into()),
        }
    }

    /// A guild custom emoji.
    pub fn custom(id: impl Into<String>, name: Option<String>) -> Self {
        Self {
            id: Some(id.into()),
            name,
        }
    }

    /// Whether this emoji is the one named by `configured`.
    ///
    /// Matches by custom id or by name; either is sufficient. An empty
    /// configured value never matches.
    ///
    /// # Examples
    ///
    /// ```
    /// use rollcall_core::EmojiRef;
    ///
    /// assert!(EmojiRef::unicode("📊").matches("📊"));
    /// assert!(EmojiRef::custom("123", Some("party".into())).matches("123"));
    /// assert!(EmojiRef::custom("123", Some("party".into())).matches("party"));
    /// assert!(!EmojiRef::unicode("📊").matches(""));
    /// ```
    pub fn matches(&self, configured: &str) -> bool {
        if configured.is_empty() {
            return false;
        }
        self.id.as_deref() == Some(configured) || self.name.as_deref() == Some(configured)
    }

    /// Whether this emoji matches any of the configured values.
    pub fn matches_any<S: AsRef<str>>(&self, configured: &[S]) -> bool {
        configured.iter().any(|value| self.matches(value.as_ref()))
    }

    /// The string an operator would put in configuration to target this emoji.
    pub fn config_value(&self) -> &str {
        self.id
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or_default()
    }
}
