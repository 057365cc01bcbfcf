//! Feedback layer configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Tunables for banners, loading state and the entrance animation.
///
/// Durations are stored in milliseconds so the struct maps directly onto
/// JSON configuration:
///
/// ```rust
/// use oxide_feedback::FeedbackConfig;
///
/// let config = FeedbackConfig::from_json(r#"{ "banner_lifetime_ms": 3000 }"#).unwrap();
/// assert_eq!(config.banner_lifetime().as_secs(), 3);
/// assert_eq!(config.processing_label, "Processing...");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackConfig {
    /// How long a banner stays before dismissing itself.
    pub banner_lifetime_ms: u64,
    /// Delay before a form container plays its entrance transition.
    pub entrance_delay_ms: u64,
    /// CSS transition applied when the entrance plays.
    pub entrance_transition: String,
    /// Page-level message shown when a submission is blocked.
    pub blocked_message: String,
    /// Label shown on the submit button while submitting.
    pub processing_label: String,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            banner_lifetime_ms: 5000,
            entrance_delay_ms: 100,
            entrance_transition: "all 0.5s ease-out".to_string(),
            blocked_message: "Please correct the errors before submitting.".to_string(),
            processing_label: "Processing...".to_string(),
        }
    }
}

impl FeedbackConfig {
    /// Creates a configuration with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a JSON configuration; missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Fails with [`crate::FeedbackError::Config`] on malformed JSON or
    /// mistyped keys.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Returns the banner lifetime.
    #[must_use]
    pub const fn banner_lifetime(&self) -> Duration {
        Duration::from_millis(self.banner_lifetime_ms)
    }

    /// Returns the entrance delay.
    #[must_use]
    pub const fn entrance_delay(&self) -> Duration {
        Duration::from_millis(self.entrance_delay_ms)
    }

    /// Sets the banner lifetime.
    #[must_use]
    pub fn with_banner_lifetime(mut self, lifetime: Duration) -> Self {
        self.banner_lifetime_ms = duration_ms(lifetime);
        self
    }

    /// Sets the entrance delay.
    #[must_use]
    pub fn with_entrance_delay(mut self, delay: Duration) -> Self {
        self.entrance_delay_ms = duration_ms(delay);
        self
    }

    /// Sets the blocked-submission message.
    #[must_use]
    pub fn with_blocked_message(mut self, message: impl Into<String>) -> Self {
        self.blocked_message = message.into();
        self
    }

    /// Sets the submit button label used while submitting.
    #[must_use]
    pub fn with_processing_label(mut self, label: impl Into<String>) -> Self {
        self.processing_label = label.into();
        self
    }
}

fn duration_ms(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}
