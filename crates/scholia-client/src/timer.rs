//! Countdown used while a timed test is being taken.

use std::time::Duration;

use tokio::time::{Instant, MissedTickBehavior, interval, sleep_until};
use tokio_util::sync::CancellationToken;

/// How a [`Countdown::run`] finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownEnd {
  Expired,
  Cancelled,
}

/// A fixed deadline counted against tokio's clock.
#[derive(Debug, Clone, Copy)]
pub struct Countdown {
  deadline: Instant,
  total:    Duration,
}

impl Countdown {
  pub fn new(total: Duration) -> Self {
    Self { deadline: Instant::now() + total, total }
  }

  /// A countdown for a test paper's `duration_minutes`.
  pub fn minutes(minutes: u32) -> Self {
    Self::new(Duration::from_secs(u64::from(minutes) * 60))
  }

  pub fn total(&self) -> Duration { self.total }

  /// Time left, saturating at zero.
  pub fn remaining(&self) -> Duration {
    self.deadline.saturating_duration_since(Instant::now())
  }

  pub fn is_expired(&self) -> bool { Instant::now() >= self.deadline }

  /// Call `on_tick` with the remaining time every `tick` until the deadline
  /// passes or `cancel` fires. A final tick of zero is delivered on expiry.
  pub async fn run(
    &self,
    tick: Duration,
    cancel: &CancellationToken,
    mut on_tick: impl FnMut(Duration),
  ) -> CountdownEnd {
    let mut ticker = interval(tick);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let expiry = sleep_until(self.deadline);
    tokio::pin!(expiry);

    loop {
      tokio::select! {
        biased;
        () = cancel.cancelled() => return CountdownEnd::Cancelled,
        () = &mut expiry => {
          on_tick(Duration::ZERO);
          return CountdownEnd::Expired;
        }
        _ = ticker.tick() => on_tick(self.remaining()),
      }
    }
  }
}

/// `mm:ss`, or `h:mm:ss` past an hour.
pub fn format_remaining(d: Duration) -> String {
  let secs = d.as_secs();
  let (h, m, s) = (secs / 3600, (secs / 60) % 60, secs % 60);
  if h > 0 {
    format!("{h}:{m:02}:{s:02}")
  } else {
    format!("{m:02}:{s:02}")
  }
}
