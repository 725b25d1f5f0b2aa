mod alert;
mod engine;
mod interval;

pub use alert::{Chime, CompletionAlert, TerminalBell};
pub use engine::{now_ms, TimerEngine, TimerState};
pub use interval::{IntervalKind, TimerSettings};
