//! Per-invocation state shared by the commands.

use forestfocus_core::timer::now_ms;
use forestfocus_core::{
    CompletionAlert, Config, Event, KeyValueStore, SessionOrchestrator, SessionOutcome,
    SqliteStore, TimerEngine,
};
use serde::Serialize;
use tracing::warn;

pub type CliResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

const ENGINE_KEY: &str = "timer-engine";

/// Configuration and store, opened once per command.
pub struct Context {
    pub config: Config,
    pub store: SqliteStore,
}

impl Context {
    pub fn open() -> CliResult<Self> {
        Ok(Self {
            config: Config::load()?,
            store: SqliteStore::open()?,
        })
    }

    pub fn orchestrator(&self) -> SessionOrchestrator<&SqliteStore> {
        SessionOrchestrator::open(&self.store, self.config.identity(), self.config.session_rules())
    }

    /// The saved engine with current settings applied, brought up to date
    /// with the wall clock. Returns the events produced while catching up.
    pub fn load_engine(&self) -> (TimerEngine, Vec<Event>) {
        let mut engine = match self.store.get(ENGINE_KEY) {
            Ok(Some(json)) => serde_json::from_str::<TimerEngine>(&json).unwrap_or_else(|e| {
                warn!(error = %e, "discarding unreadable timer state");
                TimerEngine::default()
            }),
            Ok(None) => TimerEngine::default(),
            Err(e) => {
                warn!(error = %e, "could not read timer state");
                TimerEngine::default()
            }
        };
        engine.set_settings(self.config.timer_settings());
        let events = engine.catch_up(now_ms());
        (engine, events)
    }

    pub fn save_engine(&self, engine: &TimerEngine) -> CliResult {
        let json = serde_json::to_string(engine)?;
        self.store.set(ENGINE_KEY, &json)?;
        Ok(())
    }

    pub fn alert(&self) -> CompletionAlert {
        CompletionAlert::detect(self.config.notifications.chime)
    }
}

/// Print events and route focus completions to the orchestrator.
pub fn dispatch(
    events: &[Event],
    orchestrator: &mut SessionOrchestrator<&SqliteStore>,
    alert: &CompletionAlert,
) -> CliResult<Vec<SessionOutcome>> {
    let mut outcomes = Vec::new();
    for event in events {
        print_json(event)?;
        alert.notify(event);
        if let Some(outcome) = orchestrator.handle_event(event) {
            print_json(&outcome)?;
            outcomes.push(outcome);
        }
    }
    Ok(outcomes)
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> CliResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
