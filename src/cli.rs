use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use framecast::{RegistryConfig, SourceConfig};

#[derive(Parser, Debug)]
#[command(name = "framecast")]
#[command(author, version, about = "Fan out numbered frame files to independent sessions")]
pub struct Cli {
    /// Directory the frames are written to
    pub path: PathBuf,

    /// Filename text before the frame number
    pub prefix: String,

    /// First frame number to read
    pub start_frame: u64,

    /// Filename text after the frame number
    pub suffix: String,

    /// Failed reads tolerated per frame (0 = wait forever)
    #[arg(long, default_value_t = 5)]
    pub retries: u32,

    /// Pause after a failed read, in milliseconds
    #[arg(long, default_value_t = 1000)]
    pub retry_interval_ms: u64,

    /// Pause after each published frame, in milliseconds
    #[arg(long, default_value_t = 40)]
    pub throttle_ms: u64,

    /// Files buffered per session before the oldest is dropped (0 = unbounded)
    #[arg(long, default_value_t = 100)]
    pub queue_capacity: usize,

    /// Number of local sessions draining the stream
    #[arg(long, default_value_t = 1)]
    pub sessions: usize,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn source_config(&self) -> SourceConfig {
        let config = SourceConfig::new(&self.path, &self.prefix, self.start_frame, &self.suffix)
            .retry_interval(Duration::from_millis(self.retry_interval_ms))
            .throttle_interval(Duration::from_millis(self.throttle_ms));

        match self.retries {
            0 => config.unlimited_retries(),
            n => config.retries(n),
        }
    }

    pub fn registry_config(&self) -> RegistryConfig {
        match self.queue_capacity {
            0 => RegistryConfig::default().unbounded(),
            n => RegistryConfig::default().queue_capacity(n),
        }
    }
}
