//! Command reader handshake and timeout tests

use std::io::{self, BufReader, Cursor, Read};
use std::time::{Duration, Instant};

use super::CommandReader;

/// A source that never produces input.
struct Silent;

impl Read for Silent {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        std::thread::sleep(Duration::from_secs(3600));
        Ok(0)
    }
}

/// A source that produces one line after a delay, then nothing.
struct DelayedLine {
    delay: Duration,
    line: &'static [u8],
    sent: bool,
}

impl Read for DelayedLine {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.sent {
            std::thread::sleep(Duration::from_secs(3600));
            return Ok(0);
        }
        std::thread::sleep(self.delay);
        self.sent = true;
        let n = self.line.len().min(buf.len());
        buf[..n].copy_from_slice(&self.line[..n]);
        Ok(n)
    }
}

#[tokio::test]
async fn delivers_available_lines_in_order() {
    let mut reader = CommandReader::from_source(Cursor::new("first\n1\n"));
    assert_eq!(
        reader.read_line(Duration::from_secs(1)).await.as_deref(),
        Some("first")
    );
    assert_eq!(
        reader.read_line(Duration::from_secs(1)).await.as_deref(),
        Some("1")
    );
}

#[tokio::test]
async fn strips_line_endings() {
    let mut reader = CommandReader::from_source(Cursor::new("1\r\n"));
    assert_eq!(
        reader.read_line(Duration::from_secs(1)).await.as_deref(),
        Some("1")
    );
}

#[tokio::test]
async fn times_out_within_the_bound_when_silent() {
    let mut reader = CommandReader::from_source(BufReader::new(Silent));

    let start = Instant::now();
    let result = reader.read_line(Duration::from_millis(300)).await;
    let elapsed = start.elapsed();

    assert!(result.is_none(), "timeout must be a no-input result");
    assert!(elapsed >= Duration::from_millis(300));
    assert!(
        elapsed < Duration::from_millis(1_500),
        "read_line must not block past the bound, took {elapsed:?}"
    );
}

#[tokio::test]
async fn late_line_satisfies_the_next_call() {
    let mut reader = CommandReader::from_source(BufReader::new(DelayedLine {
        delay: Duration::from_millis(400),
        line: b"1\n",
        sent: false,
    }));

    // First poll times out while the line is still being typed
    assert!(reader.read_line(Duration::from_millis(100)).await.is_none());

    // The outstanding request is answered by the same line later
    let line = reader.read_line(Duration::from_secs(2)).await;
    assert_eq!(line.as_deref(), Some("1"));
}

#[tokio::test]
async fn exhausted_source_keeps_the_polling_cadence() {
    let mut reader = CommandReader::from_source(Cursor::new(""));

    let start = Instant::now();
    assert!(reader.read_line(Duration::from_millis(200)).await.is_none());
    let elapsed = start.elapsed();

    assert!(elapsed >= Duration::from_millis(200));
    assert!(elapsed < Duration::from_millis(1_000));
}

#[tokio::test]
async fn unbounded_read_returns_the_next_line() {
    let mut reader = CommandReader::from_source(Cursor::new("done\n"));
    assert_eq!(reader.read_line_unbounded().await.as_deref(), Some("done"));
}
