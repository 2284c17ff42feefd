//! Transient user-facing status messages.
//!
//! Single replaceable slot, not a queue: setting a new message overwrites the
//! previous one and its deadline, which is what cancels the prior timer.
//! Reads take an explicit "now" so expiry is observable and testable without
//! sleeping.

use std::time::{Duration, Instant};

/// Success messages auto-clear after 3 seconds.
pub const SUCCESS_TTL: Duration = Duration::from_secs(3);
/// Error messages linger a little longer, 5 seconds.
pub const ERROR_TTL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
}

/// One-slot holder for the current transient message.
#[derive(Debug, Default)]
pub struct StatusSlot {
    current: Option<(StatusMessage, Instant)>,
}

impl StatusSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the slot with a message expiring at `now + ttl`.
    pub fn set(&mut self, kind: StatusKind, text: impl Into<String>, ttl: Duration, now: Instant) {
        self.current = Some((
            StatusMessage {
                text: text.into(),
                kind,
            },
            now + ttl,
        ));
    }

    pub fn success(&mut self, text: impl Into<String>, now: Instant) {
        self.set(StatusKind::Success, text, SUCCESS_TTL, now);
    }

    pub fn error(&mut self, text: impl Into<String>, now: Instant) {
        self.set(StatusKind::Error, text, ERROR_TTL, now);
    }

    /// The live message, or `None` once the deadline has passed.
    pub fn current(&self, now: Instant) -> Option<&StatusMessage> {
        match &self.current {
            Some((message, expires_at)) if now < *expires_at => Some(message),
            _ => None,
        }
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_slot_has_no_message() {
        let slot = StatusSlot::new();
        assert!(slot.current(Instant::now()).is_none());
    }

    #[test]
    fn success_visible_until_ttl() {
        let now = Instant::now();
        let mut slot = StatusSlot::new();
        slot.success("Note saved successfully!", now);

        let live = slot.current(now + Duration::from_secs(2)).unwrap();
        assert_eq!(live.kind, StatusKind::Success);
        assert_eq!(live.text, "Note saved successfully!");

        assert!(slot.current(now + SUCCESS_TTL).is_none());
    }

    #[test]
    fn error_outlives_success_ttl() {
        let now = Instant::now();
        let mut slot = StatusSlot::new();
        slot.error("Failed to save note", now);

        assert!(slot.current(now + Duration::from_secs(4)).is_some());
        assert!(slot.current(now + ERROR_TTL).is_none());
    }

    #[test]
    fn new_message_replaces_prior_and_its_deadline() {
        let now = Instant::now();
        let mut slot = StatusSlot::new();
        slot.error("first failure", now);

        // Replacement arrives before the first deadline fires.
        let later = now + Duration::from_secs(2);
        slot.success("Note saved successfully!", later);

        let live = slot.current(later).unwrap();
        assert_eq!(live.text, "Note saved successfully!");

        // The first message's 5s deadline does not clear the replacement.
        let live = slot.current(now + Duration::from_millis(4900)).unwrap();
        assert_eq!(live.kind, StatusKind::Success);
        assert!(slot.current(later + SUCCESS_TTL).is_none());
    }

    #[test]
    fn explicit_ttl_overrides_kind_default() {
        let now = Instant::now();
        let mut slot = StatusSlot::new();
        slot.set(StatusKind::Error, "stub message", SUCCESS_TTL, now);

        assert!(slot.current(now + Duration::from_secs(2)).is_some());
        assert!(slot.current(now + SUCCESS_TTL).is_none());
    }

    #[test]
    fn clear_empties_slot() {
        let now = Instant::now();
        let mut slot = StatusSlot::new();
        slot.success("done", now);
        slot.clear();
        assert!(slot.current(now).is_none());
    }
}
