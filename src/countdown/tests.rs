//! Countdown formatting and tick-down tests

use std::time::Duration;

use proptest::prelude::*;
use tokio_util::sync::CancellationToken;

use super::{format_remaining, next_remaining, render_in_place, CountdownDisplay};

#[test]
fn formats_sub_day_durations_as_hms() {
    assert_eq!(format_remaining(Duration::ZERO), "00:00:00");
    assert_eq!(format_remaining(Duration::from_secs(59)), "00:00:59");
    assert_eq!(format_remaining(Duration::from_secs(3_661)), "01:01:01");
    assert_eq!(format_remaining(Duration::from_secs(86_399)), "23:59:59");
}

#[test]
fn whole_24th_hour_renders_without_a_day_field() {
    assert_eq!(format_remaining(Duration::from_secs(86_400)), "24:00:00");
    assert_eq!(format_remaining(Duration::from_secs(86_401)), "24:00:01");
    // 24h30m
    assert_eq!(format_remaining(Duration::from_secs(88_200)), "24:30:00");
    assert_eq!(format_remaining(Duration::from_secs(89_999)), "24:59:59");
}

#[test]
fn formats_multi_day_durations_with_a_day_field() {
    assert_eq!(format_remaining(Duration::from_secs(90_000)), "1:01:00:00");
    assert_eq!(
        format_remaining(Duration::from_secs(9 * 86_400)),
        "9:00:00:00"
    );
    assert_eq!(
        format_remaining(Duration::from_secs(10 * 86_400)),
        "10:00:00:00"
    );
}

#[test]
fn in_place_rewrite_is_write_only_and_restores_the_cursor() {
    let mut out = Vec::new();
    render_in_place(&mut out, (0, 3), "Time until restart: 00:00:59").unwrap();

    let bytes = String::from_utf8(out).unwrap();
    let save = bytes.find("\x1b7").expect("missing cursor save");
    let restore = bytes.rfind("\x1b8").expect("missing cursor restore");
    let text = bytes
        .find("Time until restart")
        .expect("missing countdown text");
    assert!(save < text && text < restore);
    // A position report request would be answered on the same tty the
    // command reader is blocked on, so the rewrite must never emit one.
    assert!(!bytes.contains("\x1b[6n"));
}

#[test]
fn tick_down_resets_to_the_interval_at_zero() {
    let interval = Duration::from_secs(30);
    assert_eq!(
        next_remaining(Duration::from_secs(5), interval),
        Duration::from_secs(4)
    );
    assert_eq!(next_remaining(Duration::from_secs(1), interval), interval);
    assert_eq!(next_remaining(Duration::ZERO, interval), interval);
}

proptest! {
    /// The rendered countdown is never negative and always one of the
    /// three documented shapes.
    #[test]
    fn format_shape_is_always_valid(secs in 0u64..100_000_000) {
        let text = format_remaining(Duration::from_secs(secs));
        prop_assert!(!text.contains('-'));

        let parts: Vec<&str> = text.split(':').collect();
        if secs < 90_000 {
            prop_assert_eq!(parts.len(), 3);
        } else {
            prop_assert_eq!(parts.len(), 4);
        }
        // Minutes and seconds stay within clock bounds
        let minutes: u64 = parts[parts.len() - 2].parse().unwrap();
        let seconds: u64 = parts[parts.len() - 1].parse().unwrap();
        prop_assert!(minutes < 60);
        prop_assert!(seconds < 60);
    }

    /// Ticking down never produces a value above the larger of the current
    /// remaining time and the interval.
    #[test]
    fn tick_down_stays_bounded(
        remaining_secs in 0u64..1_000_000,
        interval_secs in 1u64..1_000_000,
    ) {
        let next = next_remaining(
            Duration::from_secs(remaining_secs),
            Duration::from_secs(interval_secs),
        );
        let bound = Duration::from_secs(remaining_secs.max(interval_secs));
        prop_assert!(next <= bound);
        prop_assert!(!next.is_zero() || interval_secs == 0);
    }
}

#[tokio::test]
async fn stops_within_one_tick_of_cancellation() {
    let token = CancellationToken::new();
    let display = CountdownDisplay::new(Duration::from_secs(3600), token.clone());
    let handle = tokio::spawn(display.run());

    tokio::time::sleep(Duration::from_millis(100)).await;
    token.cancel();

    tokio::time::timeout(Duration::from_millis(1_500), handle)
        .await
        .expect("display should stop within one tick")
        .expect("display task must not panic");
}

#[tokio::test]
async fn run_after_cancellation_is_a_no_op() {
    let token = CancellationToken::new();
    token.cancel();
    let display = CountdownDisplay::new(Duration::from_secs(3600), token);

    tokio::time::timeout(Duration::from_millis(500), display.run())
        .await
        .expect("a cancelled display should return immediately");
}
