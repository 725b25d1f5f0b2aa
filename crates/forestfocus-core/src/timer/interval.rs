use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// The three countdown kinds the timer cycles through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IntervalKind {
    Focus,
    ShortBreak,
    LongBreak,
}

impl IntervalKind {
    pub fn is_focus(self) -> bool {
        self == IntervalKind::Focus
    }

    pub fn label(self) -> &'static str {
        match self {
            IntervalKind::Focus => "Focus",
            IntervalKind::ShortBreak => "Short Break",
            IntervalKind::LongBreak => "Long Break",
        }
    }
}

impl fmt::Display for IntervalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IntervalKind::Focus => "focus",
            IntervalKind::ShortBreak => "short-break",
            IntervalKind::LongBreak => "long-break",
        };
        f.write_str(name)
    }
}

impl FromStr for IntervalKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "focus" => Ok(IntervalKind::Focus),
            "short-break" | "short_break" | "shortbreak" | "short" => Ok(IntervalKind::ShortBreak),
            "long-break" | "long_break" | "longbreak" | "long" => Ok(IntervalKind::LongBreak),
            _ => Err(ValidationError::UnknownIntervalKind(s.to_string())),
        }
    }
}

/// Durations and cadence the engine runs with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerSettings {
    pub focus_secs: u64,
    pub short_break_secs: u64,
    pub long_break_secs: u64,
    /// Every n-th completed focus interval is followed by a long break.
    pub long_break_every: u32,
    /// Seconds a completed interval lingers before returning to idle.
    pub auto_reset_secs: u64,
}

impl TimerSettings {
    pub fn duration_secs(&self, kind: IntervalKind) -> u64 {
        match kind {
            IntervalKind::Focus => self.focus_secs,
            IntervalKind::ShortBreak => self.short_break_secs,
            IntervalKind::LongBreak => self.long_break_secs,
        }
    }

    /// Interval that follows `finished`, given the focus count including it.
    pub fn next_after(&self, finished: IntervalKind, completed_focus: u32) -> IntervalKind {
        match finished {
            IntervalKind::Focus => {
                if self.long_break_every > 0 && completed_focus % self.long_break_every == 0 {
                    IntervalKind::LongBreak
                } else {
                    IntervalKind::ShortBreak
                }
            }
            IntervalKind::ShortBreak | IntervalKind::LongBreak => IntervalKind::Focus,
        }
    }
}

impl Default for TimerSettings {
    fn default() -> Self {
        Self {
            focus_secs: 25 * 60,
            short_break_secs: 5 * 60,
            long_break_secs: 15 * 60,
            long_break_every: 4,
            auto_reset_secs: 3,
        }
    }
}
