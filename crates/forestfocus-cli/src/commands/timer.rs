use std::io::Write;
use std::time::Duration;

use clap::Subcommand;
use forestfocus_core::{Event, IntervalKind, TimerEngine, TimerState};
use tracing::debug;

use crate::context::{dispatch, print_json, CliResult, Context};

#[derive(Subcommand)]
pub enum TimerAction {
    /// Start (or resume) the current interval
    Start,
    /// Pause the running interval
    Pause,
    /// Resume a paused interval
    Resume,
    /// Restore the full duration without completing
    Reset,
    /// Print current timer state as JSON
    Status,
    /// Switch interval kind (not while running)
    Select {
        /// focus, short-break or long-break
        kind: IntervalKind,
    },
    /// Run the countdown in the foreground until the interval finishes
    Run,
}

pub fn run(action: TimerAction) -> CliResult {
    let ctx = Context::open()?;
    let (mut engine, caught_up) = ctx.load_engine();
    let mut orchestrator = ctx.orchestrator();
    let alert = ctx.alert();
    dispatch(&caught_up, &mut orchestrator, &alert)?;

    match action {
        TimerAction::Start => emit(engine.start(), &engine)?,
        TimerAction::Pause => emit(engine.pause(), &engine)?,
        TimerAction::Resume => emit(engine.resume(), &engine)?,
        TimerAction::Reset => emit(engine.reset(), &engine)?,
        TimerAction::Select { kind } => match engine.select(kind) {
            Some(event) => print_json(&event)?,
            None => return Err("cannot switch interval kind while the timer is running".into()),
        },
        TimerAction::Status => print_json(&engine.snapshot())?,
        TimerAction::Run => {
            if engine.state() != TimerState::Running {
                if let Some(event) = engine.start() {
                    print_json(&event)?;
                }
            }
            ctx.save_engine(&engine)?;

            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            runtime.block_on(async {
                let mut interval = tokio::time::interval(Duration::from_secs(1));
                // The first tick of an interval completes immediately.
                interval.tick().await;
                let ctrl_c = tokio::signal::ctrl_c();
                tokio::pin!(ctrl_c);

                loop {
                    tokio::select! {
                        _ = interval.tick() => {
                            let Some(event) = engine.tick(engine.ticket()) else {
                                countdown(&engine);
                                continue;
                            };
                            eprintln!();
                            let finished = matches!(event, Event::TimerIdle { .. })
                                || engine.state() == TimerState::Idle;
                            dispatch(std::slice::from_ref(&event), &mut orchestrator, &alert)?;
                            ctx.save_engine(&engine)?;
                            if finished {
                                break;
                            }
                        }
                        _ = &mut ctrl_c => {
                            eprintln!();
                            debug!("interrupted, pausing timer");
                            if let Some(event) = engine.pause() {
                                print_json(&event)?;
                            }
                            break;
                        }
                    }
                }
                CliResult::Ok(())
            })?;
        }
    }

    ctx.save_engine(&engine)?;
    Ok(())
}

fn emit(event: Option<Event>, engine: &TimerEngine) -> CliResult {
    match event {
        Some(event) => print_json(&event),
        None => print_json(&engine.snapshot()),
    }
}

fn countdown(engine: &TimerEngine) {
    let secs = match engine.state() {
        TimerState::Running => engine.remaining_secs(),
        _ => return,
    };
    eprint!("\r{} {:02}:{:02} ", engine.kind(), secs / 60, secs % 60);
    let _ = std::io::stderr().flush();
}
