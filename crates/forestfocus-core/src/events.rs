use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::{IntervalKind, TimerState};

/// Every timer state change produces an Event.
/// The CLI prints them; the session orchestrator reacts to completions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        kind: IntervalKind,
        duration_secs: u64,
        ticket: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerResumed {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerReset {
        kind: IntervalKind,
        at: DateTime<Utc>,
    },
    KindSelected {
        kind: IntervalKind,
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    /// An interval ran down to zero. `next_kind` is already selected.
    TimerCompleted {
        kind: IntervalKind,
        next_kind: IntervalKind,
        focus_sessions: u32,
        at: DateTime<Utc>,
    },
    /// A completed interval returned to idle after the reset delay.
    TimerIdle {
        kind: IntervalKind,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        state: TimerState,
        kind: IntervalKind,
        remaining_secs: u64,
        total_secs: u64,
        progress_pct: f64,
        focus_sessions: u32,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// A focus interval finished: the session-completed notification.
    pub fn is_session_completed(&self) -> bool {
        matches!(
            self,
            Event::TimerCompleted {
                kind: IntervalKind::Focus,
                ..
            }
        )
    }
}
