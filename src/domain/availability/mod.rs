//! Counselor availability: weekly working-hours template and date-specific
//! exceptions.

mod aggregate;
mod schedule;

pub use aggregate::Availability;
pub use schedule::{DayOfWeek, ScheduleException, TimeOfDay, WeeklyTemplate, WorkingHours};
