//! Notification kinds and the per-appointment dispatch log.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The closed set of notification kinds an appointment can emit.
///
/// Adding a kind here is the only change needed to track a new latch;
/// the log below covers the whole set by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// New booking, sent to the counselor.
    BookingCreated,
    /// Appointment confirmed, sent to the client.
    Confirmed,
    /// Appointment rejected, sent to the client.
    Rejected,
    /// Upcoming-session reminder, sent to the client.
    Reminder,
}

impl NotificationKind {
    pub const ALL: [NotificationKind; 4] = [
        NotificationKind::BookingCreated,
        NotificationKind::Confirmed,
        NotificationKind::Rejected,
        NotificationKind::Reminder,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::BookingCreated => "booking_created",
            NotificationKind::Confirmed => "confirmed",
            NotificationKind::Rejected => "rejected",
            NotificationKind::Reminder => "reminder",
        }
    }
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-appointment record of which notifications have been dispatched.
///
/// Each entry is a one-way latch: once a kind is marked sent it never
/// unmarks, which is what makes dispatch at-most-once. The dispatcher
/// itself keeps no memory; callers check-and-set here inside the same
/// logical operation as the status transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationLog {
    sent: BTreeMap<NotificationKind, bool>,
}

impl NotificationLog {
    /// A fresh log with nothing sent.
    pub fn new() -> Self {
        let sent = NotificationKind::ALL.iter().map(|k| (*k, false)).collect();
        Self { sent }
    }

    /// Latches a kind as sent. Returns true if this call flipped it,
    /// false if it was already latched.
    pub fn mark_sent(&mut self, kind: NotificationKind) -> bool {
        let entry = self.sent.entry(kind).or_insert(false);
        if *entry {
            false
        } else {
            *entry = true;
            true
        }
    }

    pub fn is_sent(&self, kind: NotificationKind) -> bool {
        self.sent.get(&kind).copied().unwrap_or(false)
    }
}

impl Default for NotificationLog {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_log_has_nothing_sent() {
        let log = NotificationLog::new();
        for kind in NotificationKind::ALL {
            assert!(!log.is_sent(kind));
        }
    }

    #[test]
    fn mark_sent_latches_once() {
        let mut log = NotificationLog::new();
        assert!(log.mark_sent(NotificationKind::Confirmed));
        assert!(log.is_sent(NotificationKind::Confirmed));
        // Second attempt reports already-latched
        assert!(!log.mark_sent(NotificationKind::Confirmed));
        assert!(log.is_sent(NotificationKind::Confirmed));
    }

    #[test]
    fn kinds_latch_independently() {
        let mut log = NotificationLog::new();
        log.mark_sent(NotificationKind::BookingCreated);
        assert!(!log.is_sent(NotificationKind::Rejected));
        assert!(!log.is_sent(NotificationKind::Reminder));
    }

    #[test]
    fn log_round_trips_through_json() {
        let mut log = NotificationLog::new();
        log.mark_sent(NotificationKind::BookingCreated);
        let json = serde_json::to_string(&log).unwrap();
        let back: NotificationLog = serde_json::from_str(&json).unwrap();
        assert_eq!(back, log);
    }
}
