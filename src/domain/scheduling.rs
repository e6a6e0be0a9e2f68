//! Slot validation: decides whether a requested (counselor, date, time)
//! falls inside the counselor's schedule.
//!
//! This is the pure half of the check. The booked-slot half runs against the
//! appointment repository in the booking handler, backed by a storage-level
//! uniqueness guarantee so two concurrent requests for the same slot cannot
//! both win.
//!
//! A counselor with no availability record is bookable at any time: schedules
//! are opt-in, and counselors who never configured one must not be blocked.

use chrono::NaiveDate;

use crate::domain::availability::{Availability, DayOfWeek, TimeOfDay};

/// Why a requested slot was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotRejection {
    /// No working template entry (or a blocking exception) for this day.
    NotAvailableThisDay,
    /// The day is working but the time misses the window.
    OutsideWorkingHours,
    /// An active (pending or confirmed) appointment already holds the slot.
    AlreadyBooked,
}

impl SlotRejection {
    pub fn message(&self) -> &'static str {
        match self {
            SlotRejection::NotAvailableThisDay => "Counselor is not available on this day",
            SlotRejection::OutsideWorkingHours => {
                "Selected time is outside counselor working hours"
            }
            SlotRejection::AlreadyBooked => "This time slot is already booked",
        }
    }
}

impl std::fmt::Display for SlotRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Checks a requested time against the counselor's schedule.
///
/// A date-specific exception overrides the weekly template for that date:
/// a blocking exception rejects the day outright, an available exception
/// substitutes its own window. Otherwise the weekly template entry for the
/// day decides, using the half-open window `start <= time < end`.
pub fn evaluate_slot(
    availability: Option<&Availability>,
    date: NaiveDate,
    time: TimeOfDay,
) -> Result<(), SlotRejection> {
    let Some(availability) = availability else {
        return Ok(());
    };

    if let Some(exception) = availability.exception_for(date) {
        if !exception.is_available {
            return Err(SlotRejection::NotAvailableThisDay);
        }
        if !exception.contains(time) {
            return Err(SlotRejection::OutsideWorkingHours);
        }
        return Ok(());
    }

    let day = DayOfWeek::from_date(date);
    let entry = availability
        .weekly_template
        .entry_for(day)
        .filter(|e| e.is_working)
        .ok_or(SlotRejection::NotAvailableThisDay)?;

    if !entry.contains(time) {
        return Err(SlotRejection::OutsideWorkingHours);
    }

    Ok(())
}
