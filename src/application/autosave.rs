//! Periodic auto-save schedule

use std::time::{Duration, Instant};

/// Default spacing between unconditional saves
pub const DEFAULT_AUTOSAVE_INTERVAL: Duration = Duration::from_secs(5);

/// Owned save schedule with an explicit start/stop lifecycle.
///
/// The task does not read a clock itself: callers pass `now`, so the
/// schedule can be driven by wall time or stepped manually in tests.
#[derive(Debug, Clone)]
pub struct AutoSaveTask {
    interval: Duration,
    running: bool,
    /// `None` while running means the interval is too long to schedule
    next_due: Option<Instant>,
    forced: bool,
}

impl AutoSaveTask {
    pub fn new(interval: Duration) -> Self {
        AutoSaveTask {
            interval,
            running: false,
            next_due: None,
            forced: false,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Start the schedule; the first save is due one interval after `now`
    pub fn start(&mut self, now: Instant) {
        self.running = true;
        self.next_due = now.checked_add(self.interval);
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.next_due = None;
        self.forced = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Make the next `poll` fire regardless of the clock
    pub fn trigger(&mut self) {
        if self.running {
            self.forced = true;
        }
    }

    /// Returns true when a save is due and reschedules the next one.
    /// Several missed intervals collapse into a single save.
    pub fn poll(&mut self, now: Instant) -> bool {
        if !self.running {
            return false;
        }

        let due = match self.next_due {
            Some(due) if now >= due => due,
            _ if self.forced => {
                self.forced = false;
                return true;
            }
            _ => return false,
        };

        self.forced = false;
        if self.interval.is_zero() {
            self.next_due = Some(now);
            return true;
        }

        let mut next = Some(due);
        while let Some(at) = next {
            if at > now {
                break;
            }
            next = at.checked_add(self.interval);
        }
        self.next_due = next;
        true
    }
}

impl Default for AutoSaveTask {
    fn default() -> Self {
        AutoSaveTask::new(DEFAULT_AUTOSAVE_INTERVAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_running_until_started() {
        let mut task = AutoSaveTask::default();
        let now = Instant::now();
        assert!(!task.is_running());
        assert!(!task.poll(now + Duration::from_secs(60)));
    }

    #[test]
    fn test_fires_every_interval() {
        let mut task = AutoSaveTask::default();
        let start = Instant::now();
        task.start(start);

        assert!(!task.poll(start + Duration::from_secs(4)));
        assert!(task.poll(start + Duration::from_secs(5)));
        assert!(!task.poll(start + Duration::from_secs(6)));
        assert!(task.poll(start + Duration::from_secs(10)));
    }

    #[test]
    fn test_missed_intervals_collapse() {
        let mut task = AutoSaveTask::default();
        let start = Instant::now();
        task.start(start);

        assert!(task.poll(start + Duration::from_secs(23)));
        assert!(!task.poll(start + Duration::from_secs(24)));
        assert!(task.poll(start + Duration::from_secs(25)));
    }

    #[test]
    fn test_manual_trigger() {
        let mut task = AutoSaveTask::new(Duration::from_secs(5));
        let start = Instant::now();

        task.trigger();
        assert!(!task.poll(start), "trigger is ignored while stopped");

        task.start(start);
        task.trigger();
        assert!(task.poll(start));
        assert!(!task.poll(start));
    }

    #[test]
    fn test_stop() {
        let mut task = AutoSaveTask::default();
        let start = Instant::now();
        task.start(start);
        task.stop();
        assert!(!task.poll(start + Duration::from_secs(30)));
    }

    #[test]
    fn test_unschedulable_interval_never_fires_on_its_own() {
        let mut task = AutoSaveTask::new(Duration::from_secs(u64::MAX));
        let start = Instant::now();
        task.start(start);

        assert!(task.is_running());
        assert!(!task.poll(start + Duration::from_secs(3600)));

        task.trigger();
        assert!(task.poll(start));
        assert!(!task.poll(start + Duration::from_secs(7200)));
    }
}
