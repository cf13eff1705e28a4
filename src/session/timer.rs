//! Elapsed-time accounting for open sessions.
//!
//! A [`DurationTimer`] measures wall-clock time since it was started,
//! minus the sum of any pause intervals, plus an optional duration
//! carried over from a previously saved session. All arithmetic is on
//! whole seconds; sub-second components are discarded at capture time
//! so repeated queries report stable values.

use chrono::{DateTime, Duration, Timelike, Utc};

/// Capture the current instant truncated to whole seconds.
fn now_whole_seconds() -> DateTime<Utc> {
    let now = Utc::now();
    now.with_nanosecond(0).unwrap_or(now)
}

/// Tracks elapsed session time across pause/resume cycles.
#[derive(Debug, Clone)]
pub struct DurationTimer {
    /// When timing began.
    start_time: DateTime<Utc>,
    /// Duration carried over from a previous run of the same session.
    initial_duration: Duration,
    /// Start of the in-progress pause, if any. Set iff paused.
    pause_started_at: Option<DateTime<Utc>>,
    /// Completed pause intervals, in order.
    pause_intervals: Vec<Duration>,
}

impl DurationTimer {
    /// Start a timer with no carried-over duration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_initial(Duration::zero())
    }

    /// Start a timer that resumes counting from `initial`.
    #[must_use]
    pub fn with_initial(initial: Duration) -> Self {
        Self {
            start_time: now_whole_seconds(),
            initial_duration: initial,
            pause_started_at: None,
            pause_intervals: Vec::new(),
        }
    }

    /// Check whether the timer is currently paused.
    #[must_use]
    pub const fn is_paused(&self) -> bool {
        self.pause_started_at.is_some()
    }

    /// Stop the clock until the next [`unpause`](Self::unpause).
    ///
    /// A second call while already paused is ignored, so overlapping
    /// pause windows cannot be opened. Returns the new paused flag.
    pub fn pause(&mut self) -> bool {
        if self.pause_started_at.is_none() {
            self.pause_started_at = Some(now_whole_seconds());
        }
        true
    }

    /// Close the open pause interval and resume the clock.
    ///
    /// No-op if the timer is not paused. Returns the new paused flag.
    pub fn unpause(&mut self) -> bool {
        if let Some(started) = self.pause_started_at.take() {
            let interval = now_whole_seconds().signed_duration_since(started);
            self.pause_intervals.push(interval);
        }
        false
    }

    /// Elapsed time, excluding all pause intervals.
    ///
    /// Computed fresh on every call; never mutates state. While paused
    /// the reported duration is frozen at the instant the pause began,
    /// so the still-open pause window is excluded too.
    #[must_use]
    pub fn get_duration(&self) -> Duration {
        let reference = self.pause_started_at.unwrap_or_else(now_whole_seconds);
        let mut elapsed = reference.signed_duration_since(self.start_time);
        for interval in &self.pause_intervals {
            elapsed = elapsed - *interval;
        }
        elapsed + self.initial_duration
    }
}

impl Default for DurationTimer {
    fn default() -> Self {
        Self::new()
    }
}

/// Format a duration as `H:MM:SS`.
#[must_use]
pub fn format_hms(d: Duration) -> String {
    let total_seconds = d.num_seconds().max(0);
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{hours}:{minutes:02}:{seconds:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_timer_reads_zero() {
        let timer = DurationTimer::new();
        assert_eq!(timer.get_duration(), Duration::zero());
        assert!(!timer.is_paused());
    }

    #[test]
    fn test_carried_initial_duration() {
        let timer = DurationTimer::with_initial(Duration::seconds(90));
        assert!(timer.get_duration() >= Duration::seconds(90));
    }

    #[test]
    fn test_pause_freezes_duration() {
        let mut timer = DurationTimer::new();
        assert!(timer.pause());
        assert!(timer.is_paused());
        let frozen = timer.get_duration();
        assert_eq!(timer.get_duration(), frozen);
    }

    #[test]
    fn test_pause_is_idempotent() {
        let mut timer = DurationTimer::new();
        timer.pause();
        timer.pause();
        assert!(timer.is_paused());
        // A single unpause must fully resume: only one window was open.
        assert!(!timer.unpause());
        assert!(!timer.is_paused());
        assert_eq!(timer.pause_intervals.len(), 1);
    }

    #[test]
    fn test_unpause_without_pause_is_noop() {
        let mut timer = DurationTimer::new();
        assert!(!timer.unpause());
        assert!(timer.pause_intervals.is_empty());
    }

    #[test]
    fn test_pause_interval_excluded() {
        let mut timer = DurationTimer::new();
        timer.pause();
        timer.unpause();
        assert_eq!(timer.pause_intervals.len(), 1);
        assert!(timer.pause_intervals[0] >= Duration::zero());
        assert!(timer.get_duration() >= Duration::zero());
    }

    #[test]
    fn test_multiple_pause_cycles_accumulate() {
        let mut timer = DurationTimer::new();
        for _ in 0..3 {
            timer.pause();
            timer.unpause();
        }
        assert_eq!(timer.pause_intervals.len(), 3);
        let before = timer.get_duration();
        let after = timer.get_duration();
        assert!(after >= before);
    }

    #[test]
    fn test_format_hms() {
        assert_eq!(format_hms(Duration::zero()), "0:00:00");
        assert_eq!(format_hms(Duration::seconds(61)), "0:01:01");
        assert_eq!(format_hms(Duration::seconds(3723)), "1:02:03");
        assert_eq!(format_hms(Duration::seconds(-5)), "0:00:00");
    }
}
