//! Value objects shared by the domain entities.

use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

use crate::config::{DEFAULT_DISPLAY_NAME, MAX_POST_CONTENT_LENGTH};
use crate::errors::{AppError, AppResult};

/// E-mail address of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Parse a user-supplied address.
    pub fn parse(raw: &str) -> AppResult<Self> {
        let trimmed = raw.trim();
        if !trimmed.validate_email() {
            return Err(AppError::validation("Please enter a valid email address"));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Rebuild from a stored value without re-validating it.
    pub fn from_stored(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Optional display name. Renders as a placeholder when absent.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DisplayName(Option<String>);

impl DisplayName {
    /// Blank input is treated as "no display name".
    pub fn new(raw: Option<String>) -> Self {
        Self(raw.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()))
    }

    /// Name to show, falling back to the placeholder.
    pub fn as_str(&self) -> &str {
        self.0.as_deref().unwrap_or(DEFAULT_DISPLAY_NAME)
    }

    /// Stored value, `None` when unset.
    pub fn raw(&self) -> Option<&str> {
        self.0.as_deref()
    }

    pub fn into_raw(self) -> Option<String> {
        self.0
    }

    pub fn is_set(&self) -> bool {
        self.0.is_some()
    }
}

impl std::fmt::Display for DisplayName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Text body of a post: non-blank and at most
/// [`MAX_POST_CONTENT_LENGTH`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Content(String);

impl Content {
    pub fn parse(raw: &str) -> AppResult<Self> {
        if raw.trim().is_empty() {
            return Err(AppError::validation("Post content must not be empty"));
        }
        if raw.chars().count() > MAX_POST_CONTENT_LENGTH {
            return Err(AppError::validation(format!(
                "Post content must be at most {} characters",
                MAX_POST_CONTENT_LENGTH
            )));
        }
        Ok(Self(raw.to_string()))
    }

    /// Rebuild from a stored value without re-validating it.
    pub fn from_stored(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_length_boundaries() {
        assert!(Content::parse("").is_err());
        assert!(Content::parse("   \n\t").is_err());
        assert!(Content::parse(&"a".repeat(MAX_POST_CONTENT_LENGTH)).is_ok());
        assert!(Content::parse(&"a".repeat(MAX_POST_CONTENT_LENGTH + 1)).is_err());
    }

    #[test]
    fn content_counts_characters_not_bytes() {
        let text = "é".repeat(MAX_POST_CONTENT_LENGTH);
        assert!(text.len() > MAX_POST_CONTENT_LENGTH);
        assert!(Content::parse(&text).is_ok());
    }

    #[test]
    fn display_name_falls_back_to_placeholder() {
        assert_eq!(DisplayName::new(None).as_str(), DEFAULT_DISPLAY_NAME);
        assert_eq!(DisplayName::new(Some("  ".into())).as_str(), DEFAULT_DISPLAY_NAME);
        assert_eq!(DisplayName::new(Some(" Alice ".into())).as_str(), "Alice");
        assert!(!DisplayName::default().is_set());
    }

    #[test]
    fn email_is_validated_and_trimmed() {
        assert_eq!(Email::parse(" a@example.com ").unwrap().as_str(), "a@example.com");
        assert!(Email::parse("not-an-email").is_err());
    }
}
