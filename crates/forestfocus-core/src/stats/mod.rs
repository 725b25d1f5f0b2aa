//! Statistics module for ForestFocus
//!
//! Keeps a log of completed focus sessions and derives the dashboard
//! numbers from it: range totals, the last seven days, and the most
//! productive weekday.

mod productivity;
mod session_log;

pub use productivity::{
    DayProgress, ProductivityAnalyzer, ProductivityReport, ProductiveWeekday, ReportRange,
};
pub use session_log::{SessionLog, SessionRecord};
