//! Foreground session command.
//!
//! Runs a single countdown on a current-thread tokio runtime. Ticks come
//! from an [`IntervalTicker`] over a channel; only ticks carrying the
//! session's live handle are applied, so a late tick from a cancelled
//! registration is dropped. Ctrl-C ends the session early and keeps the
//! whole minutes already worked.

use std::future::Future;
use std::io::Write;
use std::ops::RangeInclusive;

use colored::Colorize;
use serde_json::json;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::cli::args::OutputFormat;
use crate::core::{IntervalTicker, TickHandle};
use crate::error::PomoError;
use crate::features::focus::{
    format_minutes, parse_in_range, Mode, SessionEvent, SessionListener, TimerSession,
    BREAK_MINUTES, WORK_MINUTES,
};
use crate::features::history::ProgressStatus;
use crate::output::{format_countdown_pretty, to_json};

use super::Context;

/// How a foreground session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    /// The countdown reached zero.
    Completed,
    /// Stopped early; holds the whole minutes recorded.
    Interrupted(u32),
    /// The tick source went away.
    Abandoned,
}

/// Run one work or break session until it completes or is interrupted.
///
/// # Errors
///
/// Returns `PomoError::InvalidInput` for an unknown mode or an out-of-range
/// duration, or an error if the history cannot be opened or the runtime
/// cannot start.
pub fn start(
    ctx: &Context,
    mode: &str,
    work: Option<&str>,
    break_minutes: Option<&str>,
    format: OutputFormat,
) -> Result<String, PomoError> {
    let mode = Mode::parse(mode).ok_or_else(|| {
        PomoError::InvalidInput(format!("Unknown session kind: {mode}. Use work or break"))
    })?;
    check_duration(work, &WORK_MINUTES, "Work")?;
    check_duration(break_minutes, &BREAK_MINUTES, "Break")?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let history = ctx.open_history()?;
    let (ticker, mut ticks) = IntervalTicker::new(runtime.handle().clone());
    let mut session = TimerSession::with_config(&ctx.config.timer, history, ticker);

    if let Some(text) = work {
        session.set_work_duration(text);
    }
    if let Some(text) = break_minutes {
        session.set_break_duration(text);
    }
    if mode == Mode::Break {
        session.switch_mode();
    }

    let total_seconds = session.remaining_seconds();
    session.subscribe(EventPrinter::new(mode, total_seconds, format));

    log::info!("starting {mode} session of {total_seconds}s");
    session.start();
    let outcome = runtime.block_on(drive(&mut session, &mut ticks, ctrl_c()));

    let status = ProgressStatus::of(session.history());
    let minutes = match outcome {
        Outcome::Completed => session.duration_for(mode),
        Outcome::Interrupted(minutes) => minutes,
        Outcome::Abandoned => 0,
    };

    match format {
        OutputFormat::Json => {
            let key = match outcome {
                Outcome::Completed => "completed",
                Outcome::Interrupted(_) | Outcome::Abandoned => "interrupted",
            };
            to_json(&json!({
                key: mode,
                "minutes": minutes,
                "progress": status,
            }))
        }
        OutputFormat::Pretty => {
            let headline = match outcome {
                Outcome::Completed => format!(
                    "{} {} session complete ({})",
                    "✓".green(),
                    mode,
                    format_minutes(u64::from(minutes))
                ),
                Outcome::Interrupted(_) | Outcome::Abandoned => format!(
                    "\n{} {} session stopped early ({} recorded)",
                    "■".yellow(),
                    mode,
                    format_minutes(u64::from(minutes))
                ),
            };
            let mut output = vec![headline];
            output.push(format!(
                "   Today: {} of {} ({:.0}%)",
                format_minutes(u64::from(status.minutes_completed)),
                format_minutes(u64::from(status.goal_minutes)),
                status.percent
            ));
            let next = match mode {
                Mode::Work => "   Time for a break? 'pomotrack start --mode break'",
                Mode::Break => "   Ready to focus again? 'pomotrack start'",
            };
            output.push(String::new());
            output.push(next.dimmed().to_string());
            Ok(output.join("\n"))
        }
    }
}

/// Resolves on Ctrl-C. Never resolves if the handler cannot be installed.
async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::warn!("cannot listen for Ctrl-C: {e}");
        std::future::pending::<()>().await;
    }
}

/// Feed ticks to `session` until it stops or `interrupt` resolves.
///
/// An interrupt ends the session through `switch_mode`, which records the
/// whole minutes worked so far.
async fn drive(
    session: &mut TimerSession,
    ticks: &mut UnboundedReceiver<TickHandle>,
    interrupt: impl Future<Output = ()>,
) -> Outcome {
    tokio::pin!(interrupt);

    while session.is_running() {
        tokio::select! {
            biased;
            tick = ticks.recv() => match tick {
                Some(handle) if session.tick_handle() == Some(handle) => session.tick(),
                Some(handle) => log::debug!("dropping stale tick {}", handle.id()),
                None => {
                    log::warn!("tick source closed before the session finished");
                    return Outcome::Abandoned;
                }
            },
            () = &mut interrupt => {
                let minutes = session.elapsed_seconds() / 60;
                log::info!("{} session interrupted after {minutes} minutes", session.mode());
                session.switch_mode();
                return Outcome::Interrupted(minutes);
            }
        }
    }

    Outcome::Completed
}

fn check_duration(
    text: Option<&str>,
    range: &RangeInclusive<u32>,
    what: &str,
) -> Result<(), PomoError> {
    match text {
        Some(t) if parse_in_range(t, range).is_none() => Err(PomoError::InvalidInput(format!(
            "{what} duration must be a whole number of minutes between {} and {}",
            range.start(),
            range.end()
        ))),
        _ => Ok(()),
    }
}

/// Writes session events to stdout until the first write error.
struct EventPrinter<W: Write> {
    out: W,
    mode: Mode,
    total_seconds: u32,
    format: OutputFormat,
    closed: bool,
}

impl EventPrinter<std::io::Stdout> {
    fn new(mode: Mode, total_seconds: u32, format: OutputFormat) -> Self {
        Self::with_writer(std::io::stdout(), mode, total_seconds, format)
    }
}

impl<W: Write> EventPrinter<W> {
    const fn with_writer(out: W, mode: Mode, total_seconds: u32, format: OutputFormat) -> Self {
        Self {
            out,
            mode,
            total_seconds,
            format,
            closed: false,
        }
    }

    fn write_event(&mut self, event: &SessionEvent) -> std::io::Result<()> {
        match self.format {
            OutputFormat::Json => {
                let mut value = serde_json::to_value(event)?;
                if let (Some((previous, current)), Some(fields)) =
                    (event.progress_percent(), value.as_object_mut())
                {
                    fields.insert("previous_percent".to_string(), json!(previous));
                    fields.insert("percent".to_string(), json!(current));
                }
                writeln!(self.out, "{value}")
            }
            OutputFormat::Pretty => match event {
                SessionEvent::TimeChanged { remaining_seconds } => {
                    write!(
                        self.out,
                        "{}",
                        format_countdown_pretty(self.mode, *remaining_seconds, self.total_seconds)
                    )?;
                    self.out.flush()
                }
                SessionEvent::SessionComplete { .. } => writeln!(self.out),
                _ => Ok(()),
            },
        }
    }
}

impl<W: Write> SessionListener for EventPrinter<W> {
    fn on_event(&mut self, event: &SessionEvent) {
        if self.closed {
            return;
        }
        if let Err(e) = self.write_event(event) {
            log::debug!("output closed, no longer printing events: {e}");
            self.closed = true;
        }
    }
}
