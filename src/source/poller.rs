//! Polling file source
//!
//! Reads `<prefix><N><suffix>` frames from a directory in order and
//! publishes each one to a [`SessionRegistry`]. A missing frame is retried
//! with a fixed backoff; the frame number only advances after a successful
//! read, so no frame is ever skipped or published twice.

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use tokio_util::sync::CancellationToken;

use crate::registry::SessionRegistry;
use crate::stats::{SourceSnapshot, SourceStats};

use super::config::SourceConfig;
use super::error::SourceError;
use super::reader::read_frame;

/// Outcome of a source run that was stopped by cancellation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSummary {
    /// Frames published during this run
    pub frames_published: u64,
    /// Bytes published during this run
    pub bytes_published: u64,
    /// Frame the source would have read next
    pub next_frame: u64,
    /// How long the run lasted
    pub duration: Duration,
}

/// Producer that feeds numbered frame files into a registry
#[derive(Debug, Clone)]
pub struct FileSource {
    config: SourceConfig,
    stats: Arc<SourceStats>,
}

impl FileSource {
    /// Create a source, validating the configuration
    pub fn new(config: SourceConfig) -> Result<Self, SourceError> {
        config.validate()?;

        Ok(Self {
            stats: Arc::new(SourceStats::new(config.start_frame)),
            config,
        })
    }

    /// Get the source configuration
    pub fn config(&self) -> &SourceConfig {
        &self.config
    }

    /// Snapshot the producer counters
    pub fn stats(&self) -> SourceSnapshot {
        self.stats.snapshot()
    }

    /// Run the production loop on the calling thread
    ///
    /// Returns `Ok` when `cancel` is observed. Cancellation is checked once
    /// per iteration; an in-flight read or sleep always completes first.
    /// Returns [`SourceError::Exhausted`] when a frame stays unreadable for
    /// the whole retry budget, and [`SourceError::FrameOverflow`] after
    /// publishing frame `u64::MAX`.
    pub fn run(
        &self,
        registry: &SessionRegistry,
        cancel: &CancellationToken,
    ) -> Result<SourceSummary, SourceError> {
        let started = Instant::now();
        let budget = self.config.retry_budget.attempts();

        let mut frame = self.config.start_frame;
        let mut remaining = budget;
        let mut frames_published = 0u64;
        let mut bytes_published = 0u64;

        tracing::info!(
            directory = %self.config.directory.display(),
            prefix = %self.config.prefix,
            suffix = %self.config.suffix,
            start_frame = frame,
            "File source started"
        );

        loop {
            if cancel.is_cancelled() {
                tracing::info!(
                    frames = frames_published,
                    next_frame = frame,
                    "File source stopped"
                );
                return Ok(SourceSummary {
                    frames_published,
                    bytes_published,
                    next_frame: frame,
                    duration: started.elapsed(),
                });
            }

            let path = self.config.path_for(frame);

            match read_frame(&path, frame) {
                Ok(file) => {
                    let size = file.len();
                    let sessions = registry.publish(file);

                    self.stats.record_published(frame, size);
                    frames_published += 1;
                    bytes_published += size as u64;

                    tracing::debug!(
                        frame = frame,
                        bytes = size,
                        sessions = sessions,
                        "Frame published"
                    );

                    let Some(next) = frame.checked_add(1) else {
                        tracing::warn!(
                            frame = frame,
                            "Frame numbers exhausted, stopping file source"
                        );
                        return Err(SourceError::FrameOverflow { frame });
                    };
                    frame = next;
                    remaining = budget;
                    pause(self.config.throttle_interval);
                }
                Err(e) => {
                    self.stats.record_retry();

                    if let Some(left) = remaining.as_mut() {
                        *left -= 1;
                        if *left == 0 {
                            let attempts = budget.unwrap_or_default();
                            tracing::warn!(
                                frame = frame,
                                path = %path.display(),
                                attempts = attempts,
                                error = %e,
                                "Retry budget exhausted, stopping file source"
                            );
                            return Err(SourceError::Exhausted {
                                frame,
                                path,
                                attempts,
                                source: e,
                            });
                        }
                    }

                    tracing::debug!(
                        frame = frame,
                        path = %path.display(),
                        remaining = ?remaining,
                        error = %e,
                        "Frame not readable yet"
                    );
                    pause(self.config.retry_interval);
                }
            }
        }
    }

    /// Run the production loop on a dedicated thread
    ///
    /// The returned handle yields the same result as [`run`](Self::run).
    /// The source's statistics stay observable through `self`.
    pub fn spawn(
        &self,
        registry: Arc<SessionRegistry>,
        cancel: CancellationToken,
    ) -> Result<thread::JoinHandle<Result<SourceSummary, SourceError>>, SourceError> {
        let source = self.clone();

        thread::Builder::new()
            .name("framecast-source".into())
            .spawn(move || source.run(&registry, &cancel))
            .map_err(SourceError::Spawn)
    }
}

fn pause(interval: Duration) {
    if !interval.is_zero() {
        thread::sleep(interval);
    }
}
