//! Non-blocking console command reader
//!
//! A dedicated background thread performs the real blocking reads and
//! hands completed lines back over a channel. Callers wait with a bounded
//! timeout, so a silent console never stalls the control loop; the thread
//! itself is daemon-style and is never joined.

#[cfg(test)]
mod tests;

use std::io::BufRead;
use std::sync::mpsc;
use std::time::Duration;

use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

/// Timeout-bounded line input.
///
/// One read at a time: a request that times out stays outstanding, and the
/// line that eventually answers it satisfies the next call. Concurrent
/// calls are not a supported use case.
pub struct CommandReader {
    request_tx: mpsc::Sender<()>,
    line_rx: UnboundedReceiver<String>,
    pending: bool,
}

impl CommandReader {
    /// Reader over stdin.
    pub fn spawn() -> Self {
        Self::from_source(std::io::BufReader::new(std::io::stdin()))
    }

    /// Reader over any line source; tests drive this with in-memory input.
    pub fn from_source<R>(source: R) -> Self
    where
        R: BufRead + Send + 'static,
    {
        let (request_tx, request_rx) = mpsc::channel();
        let (line_tx, line_rx) = unbounded_channel();

        let spawned = std::thread::Builder::new()
            .name("command-reader".to_string())
            .spawn(move || reader_thread(source, request_rx, line_tx));
        if let Err(e) = spawned {
            tracing::error!("failed to spawn command reader thread: {e}");
        }

        Self {
            request_tx,
            line_rx,
            pending: false,
        }
    }

    /// Wait up to `timeout` for one console line.
    ///
    /// `None` means no input arrived in time, a normal polling outcome and
    /// never an error. When the source is exhausted the call still spends
    /// the timeout, keeping the caller's polling cadence instead of
    /// spinning.
    pub async fn read_line(&mut self, timeout: Duration) -> Option<String> {
        if !self.pending {
            if self.request_tx.send(()).is_err() {
                tokio::time::sleep(timeout).await;
                return None;
            }
            self.pending = true;
        }

        match tokio::time::timeout(timeout, self.line_rx.recv()).await {
            Ok(Some(line)) => {
                self.pending = false;
                Some(line)
            }
            Ok(None) => {
                // Reader thread ended (end of input)
                tokio::time::sleep(timeout).await;
                None
            }
            Err(_) => None,
        }
    }

    /// Wait indefinitely for one console line; used for the final
    /// "press any key" prompt.
    pub async fn read_line_unbounded(&mut self) -> Option<String> {
        if !self.pending {
            self.request_tx.send(()).ok()?;
            self.pending = true;
        }
        let line = self.line_rx.recv().await;
        if line.is_some() {
            self.pending = false;
        }
        line
    }
}

/// Blocking read loop: one line per request, stopped by end of input or by
/// the `CommandReader` being dropped.
fn reader_thread<R: BufRead>(
    mut source: R,
    request_rx: mpsc::Receiver<()>,
    line_tx: UnboundedSender<String>,
) {
    while request_rx.recv().is_ok() {
        let mut line = String::new();
        match source.read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {
                let line = line.trim_end_matches(['\r', '\n']).to_string();
                if line_tx.send(line).is_err() {
                    break;
                }
            }
        }
    }
    tracing::debug!("command reader thread stopped");
}
