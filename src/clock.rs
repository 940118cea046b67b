use web_time::{Duration, Instant};

/// Elapsed-time clock for one game.
///
/// `start` is idempotent and `stop` freezes the elapsed value exactly once;
/// a stopped clock cannot be restarted, only reset together with the board.
/// The once-per-second display tick belongs to the presentation layer; this
/// only holds the authoritative elapsed time.
#[derive(Clone, Debug, Default)]
pub struct GameClock {
    started_at: Option<Instant>,
    frozen: Option<Duration>,
}

impl GameClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self) {
        if self.started_at.is_none() && self.frozen.is_none() {
            log::debug!("clock started");
            self.started_at = Some(Instant::now());
        }
    }

    pub fn stop(&mut self) {
        if self.frozen.is_none() {
            if let Some(started_at) = self.started_at {
                self.frozen = Some(started_at.elapsed());
                log::debug!("clock stopped at {:?}", self.frozen);
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.started_at.is_some() && self.frozen.is_none()
    }

    pub fn elapsed(&self) -> Duration {
        self.frozen
            .or_else(|| self.started_at.map(|started_at| started_at.elapsed()))
            .unwrap_or(Duration::ZERO)
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed().as_secs()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_once_and_keeps_running() {
        let mut clock = GameClock::new();
        clock.start();
        let first = clock.started_at;

        clock.start();

        assert_eq!(clock.started_at, first);
        assert!(clock.is_running());
    }

    #[test]
    fn stop_freezes_the_elapsed_value() {
        let mut clock = GameClock::new();
        clock.start();
        clock.stop();

        let frozen = clock.elapsed();

        assert!(!clock.is_running());
        assert_eq!(clock.elapsed(), frozen);
    }

    #[test]
    fn stopped_clock_does_not_restart() {
        let mut clock = GameClock::new();
        clock.start();
        clock.stop();

        clock.start();

        assert!(!clock.is_running());
    }

    #[test]
    fn unstarted_clock_reads_zero() {
        let clock = GameClock::new();

        assert_eq!(clock.elapsed_secs(), 0);
        assert!(!clock.is_running());
    }

    #[test]
    fn reset_allows_a_fresh_start() {
        let mut clock = GameClock::new();
        clock.start();
        clock.stop();

        clock.reset();
        clock.start();

        assert!(clock.is_running());
    }
}
