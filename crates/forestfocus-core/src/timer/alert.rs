//! Audible completion alert.
//!
//! Playing a sound is an optional capability. When it is missing or fails
//! the timer carries on silently.

use std::io::{self, IsTerminal, Write};

use tracing::debug;

use crate::events::Event;

/// Something that can make a completion sound.
pub trait Chime {
    fn play(&self) -> io::Result<()>;
}

/// Rings the terminal bell on stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalBell;

impl Chime for TerminalBell {
    fn play(&self) -> io::Result<()> {
        let mut stderr = io::stderr().lock();
        stderr.write_all(b"\x07")?;
        stderr.flush()
    }
}

/// Plays a chime when an interval completes, if one is available.
#[derive(Default)]
pub struct CompletionAlert {
    chime: Option<Box<dyn Chime>>,
}

impl CompletionAlert {
    pub fn silent() -> Self {
        Self { chime: None }
    }

    pub fn with_chime(chime: Box<dyn Chime>) -> Self {
        Self { chime: Some(chime) }
    }

    /// Use the terminal bell when enabled and stderr is an interactive terminal.
    pub fn detect(enabled: bool) -> Self {
        if enabled && io::stderr().is_terminal() {
            Self::with_chime(Box::new(TerminalBell))
        } else {
            Self::silent()
        }
    }

    pub fn is_audible(&self) -> bool {
        self.chime.is_some()
    }

    /// Returns true when a chime actually played.
    pub fn notify(&self, event: &Event) -> bool {
        if !matches!(event, Event::TimerCompleted { .. }) {
            return false;
        }
        let Some(chime) = self.chime.as_ref() else {
            return false;
        };
        match chime.play() {
            Ok(()) => true,
            Err(err) => {
                debug!(error = %err, "completion chime unavailable");
                false
            }
        }
    }
}
