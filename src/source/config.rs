//! File source configuration

use std::path::PathBuf;
use std::time::Duration;

use super::error::SourceError;

/// How many consecutive failed reads the source tolerates for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryBudget {
    /// Give up after this many failed attempts
    Limited(u32),
    /// Wait for the frame forever
    Unlimited,
}

impl RetryBudget {
    /// Attempts allowed per frame (`None` = unlimited)
    pub fn attempts(&self) -> Option<u32> {
        match self {
            RetryBudget::Limited(n) => Some(*n),
            RetryBudget::Unlimited => None,
        }
    }
}

impl Default for RetryBudget {
    fn default() -> Self {
        RetryBudget::Limited(5)
    }
}

/// File source configuration options
///
/// Frames are read from `<directory>/<prefix><frame><suffix>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceConfig {
    /// Directory the frames are written to
    pub directory: PathBuf,

    /// Filename text before the frame number
    pub prefix: String,

    /// First frame number to read
    pub start_frame: u64,

    /// Filename text after the frame number (usually the extension)
    pub suffix: String,

    /// Failed attempts tolerated per frame
    pub retry_budget: RetryBudget,

    /// Pause after a failed attempt
    pub retry_interval: Duration,

    /// Pause after each published frame
    pub throttle_interval: Duration,
}

impl SourceConfig {
    /// Create a config with default retry and pacing settings
    pub fn new(
        directory: impl Into<PathBuf>,
        prefix: impl Into<String>,
        start_frame: u64,
        suffix: impl Into<String>,
    ) -> Self {
        Self {
            directory: directory.into(),
            prefix: prefix.into(),
            start_frame,
            suffix: suffix.into(),
            retry_budget: RetryBudget::default(),
            retry_interval: Duration::from_secs(1),
            throttle_interval: Duration::from_millis(40), // 25 fps
        }
    }

    /// Give up on a frame after `attempts` failed reads
    pub fn retries(mut self, attempts: u32) -> Self {
        self.retry_budget = RetryBudget::Limited(attempts);
        self
    }

    /// Never give up waiting for the next frame
    pub fn unlimited_retries(mut self) -> Self {
        self.retry_budget = RetryBudget::Unlimited;
        self
    }

    /// Set the pause after a failed attempt
    pub fn retry_interval(mut self, interval: Duration) -> Self {
        self.retry_interval = interval;
        self
    }

    /// Set the pause after each published frame
    pub fn throttle_interval(mut self, interval: Duration) -> Self {
        self.throttle_interval = interval;
        self
    }

    /// Path of the file holding `frame`
    pub fn path_for(&self, frame: u64) -> PathBuf {
        let name = format!("{}{}{}", self.prefix, frame, self.suffix);
        self.directory.join(name)
    }

    /// Check the config can drive a source
    pub fn validate(&self) -> Result<(), SourceError> {
        if self.directory.as_os_str().is_empty() {
            return Err(SourceError::InvalidConfig("frame directory is empty".into()));
        }
        if !self.directory.is_dir() {
            return Err(SourceError::InvalidConfig(format!(
                "frame directory does not exist: {}",
                self.directory.display()
            )));
        }
        if self.retry_budget == RetryBudget::Limited(0) {
            return Err(SourceError::InvalidConfig(
                "retry budget must allow at least one attempt".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let config = SourceConfig::new("/frames", "frame", 0, ".bin");

        assert_eq!(config.retry_budget, RetryBudget::Limited(5));
        assert_eq!(config.retry_interval, Duration::from_secs(1));
        assert_eq!(config.throttle_interval, Duration::from_millis(40));
        assert_eq!(config.directory, PathBuf::from("/frames"));
    }

    #[test]
    fn test_path_for() {
        let config = SourceConfig::new("/frames", "frame", 0, ".bin");
        assert_eq!(config.path_for(0), PathBuf::from("/frames/frame0.bin"));
        assert_eq!(config.path_for(1234), PathBuf::from("/frames/frame1234.bin"));
    }

    #[test]
    fn test_path_for_trailing_separator() {
        let with = SourceConfig::new("/frames/", "f", 7, ".png");
        let without = SourceConfig::new("/frames", "f", 7, ".png");
        assert_eq!(with.path_for(7), without.path_for(7));
    }

    #[test]
    fn test_builder_chaining() {
        let config = SourceConfig::new("/frames", "frame", 3, ".bin")
            .retries(10)
            .retry_interval(Duration::from_millis(5))
            .throttle_interval(Duration::ZERO);

        assert_eq!(config.start_frame, 3);
        assert_eq!(config.retry_budget.attempts(), Some(10));
        assert_eq!(config.retry_interval, Duration::from_millis(5));
        assert_eq!(config.throttle_interval, Duration::ZERO);

        let config = config.unlimited_retries();
        assert_eq!(config.retry_budget.attempts(), None);
    }

    #[test]
    fn test_validate_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let config = SourceConfig::new(missing, "frame", 0, ".bin");

        assert!(matches!(
            config.validate(),
            Err(SourceError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_validate_zero_retries() {
        let dir = tempfile::tempdir().unwrap();
        let config = SourceConfig::new(dir.path(), "frame", 0, ".bin").retries(0);

        assert!(matches!(
            config.validate(),
            Err(SourceError::InvalidConfig(_))
        ));
        assert!(config.retries(1).validate().is_ok());
    }

    #[test]
    fn test_validate_empty_directory_path() {
        let config = SourceConfig::new("", "frame", 0, ".bin");
        assert!(config.validate().is_err());
    }
}
