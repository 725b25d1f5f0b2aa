//! Timer engine implementation.
//!
//! The engine is a tick-driven state machine with no internal thread. A
//! driver calls `tick()` once per wall-clock second (the CLI uses a tokio
//! interval), or `catch_up()` to replay the seconds that passed while the
//! process was not running.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running -> Paused -> Running -> Completed -> Idle
//! ```
//!
//! `Completed` returns to `Idle` on its own after `auto_reset_secs` ticks.
//!
//! ## Tickets
//!
//! Every transition that starts or stops a countdown issues a new ticket.
//! A tick carrying an older ticket is ignored, so a tick that was already
//! scheduled when the user paused or reset never lands on the new state.
//!
//! ```ignore
//! let mut engine = TimerEngine::new(TimerSettings::default());
//! engine.start();
//! let ticket = engine.ticket();
//! // Once per second:
//! if let Some(event) = engine.tick(ticket) { /* TimerCompleted, TimerIdle */ }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::interval::{IntervalKind, TimerSettings};
use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Running,
    Paused,
    Completed,
}

/// Core countdown engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerEngine {
    settings: TimerSettings,
    state: TimerState,
    kind: IntervalKind,
    remaining_secs: u64,
    /// Focus intervals completed since the engine was created.
    completed_focus: u32,
    /// Ticks left before a completed interval returns to idle.
    #[serde(default)]
    reset_in_secs: u64,
    #[serde(default)]
    ticket: u64,
    /// Wall-clock position (ms since epoch) the last applied tick stands for.
    #[serde(default)]
    last_tick_epoch_ms: Option<u64>,
}

impl TimerEngine {
    /// Create an idle engine with a full focus interval ready.
    pub fn new(settings: TimerSettings) -> Self {
        Self {
            settings,
            state: TimerState::Idle,
            kind: IntervalKind::Focus,
            remaining_secs: settings.duration_secs(IntervalKind::Focus),
            completed_focus: 0,
            reset_in_secs: 0,
            ticket: 0,
            last_tick_epoch_ms: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn kind(&self) -> IntervalKind {
        self.kind
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn total_secs(&self) -> u64 {
        self.settings.duration_secs(self.kind)
    }

    pub fn completed_focus(&self) -> u32 {
        self.completed_focus
    }

    pub fn ticket(&self) -> u64 {
        self.ticket
    }

    pub fn settings(&self) -> &TimerSettings {
        &self.settings
    }

    pub fn last_tick_epoch_ms(&self) -> Option<u64> {
        self.last_tick_epoch_ms
    }

    /// 0.0 .. 100.0 progress within the current interval.
    pub fn progress_pct(&self) -> f64 {
        let total = self.total_secs();
        if total == 0 {
            return 0.0;
        }
        (total.saturating_sub(self.remaining_secs) as f64 / total as f64 * 100.0).min(100.0)
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            state: self.state,
            kind: self.kind,
            remaining_secs: self.remaining_secs,
            total_secs: self.total_secs(),
            progress_pct: self.progress_pct(),
            focus_sessions: self.completed_focus,
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        match self.state {
            TimerState::Idle | TimerState::Completed => {
                self.reset_in_secs = 0;
                self.state = TimerState::Running;
                self.issue_ticket(Some(now_ms()));
                debug!(kind = %self.kind, ticket = self.ticket, "timer started");
                Some(Event::TimerStarted {
                    kind: self.kind,
                    duration_secs: self.total_secs(),
                    ticket: self.ticket,
                    at: Utc::now(),
                })
            }
            TimerState::Paused => self.resume(),
            TimerState::Running => None,
        }
    }

    pub fn pause(&mut self) -> Option<Event> {
        if self.state != TimerState::Running {
            return None;
        }
        self.state = TimerState::Paused;
        self.issue_ticket(None);
        debug!(remaining = self.remaining_secs, "timer paused");
        Some(Event::TimerPaused {
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    pub fn resume(&mut self) -> Option<Event> {
        if self.state != TimerState::Paused {
            return None;
        }
        self.state = TimerState::Running;
        self.issue_ticket(Some(now_ms()));
        Some(Event::TimerResumed {
            remaining_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Restore the full duration of the current kind without completing it.
    pub fn reset(&mut self) -> Option<Event> {
        self.state = TimerState::Idle;
        self.remaining_secs = self.total_secs();
        self.reset_in_secs = 0;
        self.issue_ticket(None);
        Some(Event::TimerReset {
            kind: self.kind,
            at: Utc::now(),
        })
    }

    /// Switch interval kind. Refused while running.
    pub fn select(&mut self, kind: IntervalKind) -> Option<Event> {
        if self.state == TimerState::Running {
            return None;
        }
        self.kind = kind;
        self.state = TimerState::Idle;
        self.remaining_secs = self.total_secs();
        self.reset_in_secs = 0;
        self.issue_ticket(None);
        Some(Event::KindSelected {
            kind,
            duration_secs: self.remaining_secs,
            at: Utc::now(),
        })
    }

    /// Apply one second. Stale tickets and non-counting states are no-ops.
    pub fn tick(&mut self, ticket: u64) -> Option<Event> {
        if ticket != self.ticket {
            return None;
        }
        match self.state {
            TimerState::Running => {
                self.advance_anchor();
                self.remaining_secs = self.remaining_secs.saturating_sub(1);
                if self.remaining_secs == 0 {
                    let at = self.anchor_instant();
                    return Some(self.complete(at));
                }
                None
            }
            TimerState::Completed => {
                self.advance_anchor();
                self.reset_in_secs = self.reset_in_secs.saturating_sub(1);
                if self.reset_in_secs == 0 {
                    let at = self.anchor_instant();
                    return Some(self.return_to_idle(at));
                }
                None
            }
            TimerState::Idle | TimerState::Paused => None,
        }
    }

    /// Replay the whole seconds elapsed since the last applied tick.
    pub fn catch_up(&mut self, now_ms: u64) -> Vec<Event> {
        let mut events = Vec::new();
        let Some(anchor) = self.last_tick_epoch_ms else {
            return events;
        };
        let elapsed_secs = now_ms.saturating_sub(anchor) / 1000;
        for _ in 0..elapsed_secs {
            if !matches!(self.state, TimerState::Running | TimerState::Completed) {
                break;
            }
            if let Some(event) = self.tick(self.ticket) {
                events.push(event);
            }
        }
        events
    }

    pub fn set_settings(&mut self, settings: TimerSettings) {
        self.settings = settings;
        if self.state != TimerState::Running && self.state != TimerState::Paused {
            self.remaining_secs = self.total_secs();
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn complete(&mut self, at: DateTime<Utc>) -> Event {
        let finished = self.kind;
        if finished.is_focus() {
            self.completed_focus += 1;
        }
        let next = self.settings.next_after(finished, self.completed_focus);
        self.kind = next;
        self.remaining_secs = self.total_secs();
        self.state = TimerState::Completed;
        self.reset_in_secs = self.settings.auto_reset_secs;
        debug!(%finished, %next, focus_sessions = self.completed_focus, "interval completed");

        let event = Event::TimerCompleted {
            kind: finished,
            next_kind: next,
            focus_sessions: self.completed_focus,
            at,
        };
        if self.reset_in_secs == 0 {
            self.return_to_idle(at);
        }
        event
    }

    fn return_to_idle(&mut self, at: DateTime<Utc>) -> Event {
        self.state = TimerState::Idle;
        self.reset_in_secs = 0;
        self.issue_ticket(None);
        Event::TimerIdle {
            kind: self.kind,
            at,
        }
    }

    /// Wall-clock instant of the last applied tick.
    fn anchor_instant(&self) -> DateTime<Utc> {
        self.last_tick_epoch_ms
            .and_then(|ms| i64::try_from(ms).ok())
            .and_then(DateTime::from_timestamp_millis)
            .unwrap_or_else(Utc::now)
    }

    fn issue_ticket(&mut self, anchor: Option<u64>) {
        self.ticket = self.ticket.wrapping_add(1);
        self.last_tick_epoch_ms = anchor;
    }

    fn advance_anchor(&mut self) {
        if let Some(anchor) = self.last_tick_epoch_ms.as_mut() {
            *anchor = anchor.saturating_add(1000);
        }
    }
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new(TimerSettings::default())
    }
}

/// Milliseconds since the Unix epoch.
pub fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
