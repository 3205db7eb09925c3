use crate::config::LoaderConfig;
use std::time::{Duration, Instant};

const BAR_CELLS: usize = 10;

/// Cosmetic progress for an outstanding query.
///
/// The percentage grows with elapsed time but never passes the configured
/// cap; it only reaches 100 once `complete` is called.
#[derive(Debug, Clone)]
pub struct LoaderProgress {
    config: LoaderConfig,
    started: Instant,
    completed: bool,
}

impl LoaderProgress {
    pub fn start(config: LoaderConfig) -> Self {
        Self {
            config,
            started: Instant::now(),
            completed: false,
        }
    }

    pub fn percent(&self) -> u8 {
        if self.completed {
            return 100;
        }
        self.percent_at(self.started.elapsed())
    }

    /// Percentage shown after `elapsed`, ignoring completion
    pub fn percent_at(&self, elapsed: Duration) -> u8 {
        let cap = self.config.cap_percent.min(100) as f64;
        let expected = self.config.expected().as_millis().max(1) as f64;
        let value = elapsed.as_millis() as f64 / expected * 100.0;
        value.min(cap) as u8
    }

    pub fn complete(&mut self) {
        self.completed = true;
    }

    pub fn is_complete(&self) -> bool {
        self.completed
    }

    pub fn bar(&self) -> String {
        render_bar(self.percent())
    }
}

/// Ten-cell bar, e.g. `[█████▒▒▒▒▒]` for 50%
pub fn render_bar(percent: u8) -> String {
    let filled = ((percent.min(100) as f64 / 10.0).round() as usize).min(BAR_CELLS);
    format!("[{}{}]", "█".repeat(filled), "▒".repeat(BAR_CELLS - filled))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_grows_with_time() {
        let progress = LoaderProgress::start(LoaderConfig::default());
        assert_eq!(progress.percent_at(Duration::ZERO), 0);
        assert_eq!(progress.percent_at(Duration::from_secs(2)), 25);
        assert_eq!(progress.percent_at(Duration::from_secs(4)), 50);
    }

    #[test]
    fn test_percent_is_capped_until_complete() {
        let mut progress = LoaderProgress::start(LoaderConfig::default());
        assert_eq!(progress.percent_at(Duration::from_secs(60)), 99);

        progress.complete();
        assert!(progress.is_complete());
        assert_eq!(progress.percent(), 100);
    }

    #[test]
    fn test_render_bar() {
        assert_eq!(render_bar(0), "[▒▒▒▒▒▒▒▒▒▒]");
        assert_eq!(render_bar(50), "[█████▒▒▒▒▒]");
        assert_eq!(render_bar(99), "[██████████]");
        assert_eq!(render_bar(100), "[██████████]");
    }
}
