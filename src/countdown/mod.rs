//! Live countdown display
//!
//! Free-runs once per second over its own copy of the restart interval and
//! rewrites a single console line in place. Cursor movement is symmetric
//! (save, overwrite, restore) so line-oriented output appended by the
//! rest of the program is never torn. The display is tolerant of drift: it
//! is not linked to the scheduler and simply re-arms itself at zero.

#[cfg(test)]
mod tests;

use std::io::Write;
use std::time::Duration;

use crossterm::cursor::{self, MoveTo, RestorePosition, SavePosition};
use crossterm::queue;
use crossterm::style::Print;
use crossterm::terminal::{Clear, ClearType};
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

/// The once-per-second countdown activity.
///
/// Owns its own copy of the interval and the captured cursor position; no
/// state is shared with the scheduler.
pub struct CountdownDisplay {
    interval: Duration,
    remaining: Duration,
    token: CancellationToken,
    /// Console position of the countdown line. `None` when the console has
    /// no addressable cursor (pipes, tests); then the display falls back
    /// to carriage-return rewrites.
    origin: Option<(u16, u16)>,
}

impl CountdownDisplay {
    /// Capture the cursor position the countdown line will live at.
    pub fn new(interval: Duration, token: CancellationToken) -> Self {
        Self {
            interval,
            remaining: interval,
            token,
            origin: cursor::position().ok(),
        }
    }

    /// Tick until cancellation. A tick that lags in after cancellation is
    /// a no-op, not an error.
    pub async fn run(mut self) {
        // Reserve the line so appended output lands below it
        println!("Time until restart: {}", format_remaining(self.remaining));

        let mut ticker = tokio::time::interval(Duration::from_secs(1));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        ticker.tick().await; // the first tick completes immediately

        loop {
            tokio::select! {
                _ = self.token.cancelled() => return,
                _ = ticker.tick() => {
                    if self.token.is_cancelled() {
                        return;
                    }
                    self.remaining = next_remaining(self.remaining, self.interval);
                    self.render();
                }
            }
        }
    }

    fn render(&self) {
        let text = format!("Time until restart: {}", format_remaining(self.remaining));
        let mut out = std::io::stdout();
        let result = match self.origin {
            Some(origin) => render_in_place(&mut out, origin, &text),
            None => write!(out, "\r{text}").and_then(|_| out.flush()),
        };
        if let Err(e) = result {
            tracing::debug!("countdown render failed: {e}");
        }
    }
}

/// Overwrite the countdown line at `origin` and put the cursor back where
/// it was, in one queued batch.
///
/// Strictly write-only: the terminal's own save/restore sequences park and
/// recover the cursor, so no reply is ever read back from the tty. Querying
/// the position here would race the command reader thread, which blocks on
/// the same terminal and would swallow the reply bytes as operator input.
fn render_in_place(
    out: &mut impl Write,
    origin: (u16, u16),
    text: &str,
) -> std::io::Result<()> {
    queue!(
        out,
        SavePosition,
        MoveTo(origin.0, origin.1),
        Clear(ClearType::UntilNewLine),
        Print(text),
        RestorePosition,
    )?;
    out.flush()
}

/// Remaining time after one tick. Saturates at zero, at which point the
/// display re-arms itself with the full interval.
pub fn next_remaining(remaining: Duration, interval: Duration) -> Duration {
    match remaining.checked_sub(Duration::from_secs(1)) {
        Some(next) if !next.is_zero() => next,
        _ => interval,
    }
}

/// Format a remaining duration by magnitude: `hh:mm:ss` through the whole
/// 24th hour (24:59:59 is the largest such value), `dd:hh:mm:ss` beyond
/// nine days, `d:hh:mm:ss` in between.
pub fn format_remaining(remaining: Duration) -> String {
    let total = remaining.as_secs();
    let total_hours = total / 3_600;
    let days = total / 86_400;
    let hours = (total % 86_400) / 3_600;
    let minutes = (total % 3_600) / 60;
    let seconds = total % 60;

    if days == 0 || total_hours == 24 {
        format!("{total_hours:02}:{minutes:02}:{seconds:02}")
    } else if days > 9 {
        format!("{days:02}:{hours:02}:{minutes:02}:{seconds:02}")
    } else {
        format!("{days}:{hours:02}:{minutes:02}:{seconds:02}")
    }
}
