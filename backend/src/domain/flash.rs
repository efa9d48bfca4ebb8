//! Transient feedback shown after a member action.
//!
//! A success message disappears on its own once its time-to-live has passed.
//! Expiry is checked against the injected clock whenever the message is
//! read, so there is no timer to leak: a superseded or cancelled message is
//! gone for good.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;

/// How long a success message stays visible unless configured otherwise.
pub const DEFAULT_FLASH_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone)]
struct Shown {
    text: String,
    at: DateTime<Utc>,
}

/// Success and error slots of a member view.
pub struct FlashMessage {
    clock: Arc<dyn Clock>,
    ttl: TimeDelta,
    success: Option<Shown>,
    error: Option<String>,
}

impl FlashMessage {
    /// Create empty slots whose success message lives for `ttl`.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use koperasi::domain::{DEFAULT_FLASH_TTL, FlashMessage};
    /// use mockable::DefaultClock;
    ///
    /// let mut flash = FlashMessage::new(Arc::new(DefaultClock), DEFAULT_FLASH_TTL);
    /// flash.show("Simpanan berhasil ditambahkan");
    /// assert_eq!(flash.current(), Some("Simpanan berhasil ditambahkan"));
    /// ```
    pub fn new(clock: Arc<dyn Clock>, ttl: Duration) -> Self {
        Self {
            clock,
            ttl: TimeDelta::from_std(ttl).unwrap_or(TimeDelta::MAX),
            success: None,
            error: None,
        }
    }

    /// Show a success message, replacing any message still visible and
    /// restarting the countdown.
    pub fn show(&mut self, text: impl Into<String>) {
        self.success = Some(Shown {
            text: text.into(),
            at: self.clock.utc(),
        });
    }

    /// Record a validation error. Errors stay until the next attempt.
    pub fn fail(&mut self, text: impl Into<String>) {
        self.error = Some(text.into());
    }

    /// Clear the error slot ahead of a new attempt.
    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Drop the success message before it expires.
    pub fn cancel(&mut self) {
        self.success = None;
    }

    /// The success message, if it is still within its time-to-live.
    pub fn current(&self) -> Option<&str> {
        let shown = self.success.as_ref()?;
        let age = self.clock.utc().signed_duration_since(shown.at);
        (age < self.ttl).then_some(shown.text.as_str())
    }

    /// The pending error message.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use chrono::TimeZone;
    use rstest::{fixture, rstest};

    use super::*;
    use crate::test_support::FixedClock;

    struct Harness {
        clock: Arc<FixedClock>,
        flash: FlashMessage,
    }

    #[fixture]
    fn harness() -> Harness {
        let now = Utc
            .with_ymd_and_hms(2024, 1, 1, 9, 0, 0)
            .single()
            .expect("valid timestamp");
        let clock = Arc::new(FixedClock::new(now));
        let flash = FlashMessage::new(clock.clone(), DEFAULT_FLASH_TTL);
        Harness { clock, flash }
    }

    #[rstest]
    fn message_visible_before_ttl(mut harness: Harness) {
        harness.flash.show("ok");
        harness.clock.advance(Duration::from_millis(2_999));
        assert_eq!(harness.flash.current(), Some("ok"));
    }

    #[rstest]
    fn message_clears_after_ttl(mut harness: Harness) {
        harness.flash.show("ok");
        harness.clock.advance(DEFAULT_FLASH_TTL);
        assert_eq!(harness.flash.current(), None);
    }

    #[rstest]
    fn new_message_restarts_countdown(mut harness: Harness) {
        harness.flash.show("first");
        harness.clock.advance(Duration::from_secs(2));
        harness.flash.show("second");
        harness.clock.advance(Duration::from_secs(2));

        assert_eq!(harness.flash.current(), Some("second"));
    }

    #[rstest]
    fn cancelled_message_never_reappears(mut harness: Harness) {
        harness.flash.show("ok");
        harness.flash.cancel();
        assert_eq!(harness.flash.current(), None);
    }

    #[rstest]
    fn error_persists_until_next_attempt(mut harness: Harness) {
        harness.flash.fail("bad amount");
        harness.clock.advance(Duration::from_secs(60));
        assert_eq!(harness.flash.error(), Some("bad amount"));

        harness.flash.clear_error();
        assert_eq!(harness.flash.error(), None);
    }
}
