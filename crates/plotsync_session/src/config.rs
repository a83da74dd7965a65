//! Sequencer configuration.

use std::time::Duration;

/// Configuration for the sequencer.
#[derive(Debug, Clone)]
pub struct SequencerConfig {
    /// How long a session may sit idle before `reap_idle` removes it.
    /// `None` disables reaping; sessions then live until closed.
    pub idle_timeout: Option<Duration>,
}

impl SequencerConfig {
    /// Creates a configuration with reaping disabled.
    pub fn new() -> Self {
        Self { idle_timeout: None }
    }

    /// Sets the idle timeout for session reaping.
    pub fn with_idle_timeout(mut self, timeout: Duration) -> Self {
        self.idle_timeout = Some(timeout);
        self
    }
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_never_reaps() {
        assert!(SequencerConfig::default().idle_timeout.is_none());
    }

    #[test]
    fn config_builder() {
        let config = SequencerConfig::new().with_idle_timeout(Duration::from_secs(300));
        assert_eq!(config.idle_timeout, Some(Duration::from_secs(300)));
    }
}
