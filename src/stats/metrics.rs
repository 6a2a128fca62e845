//! Statistics and metrics for the file source

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Live producer counters, shared between the source thread and observers
#[derive(Debug)]
pub struct SourceStats {
    started_at: Instant,
    frames_published: AtomicU64,
    bytes_published: AtomicU64,
    retries: AtomicU64,
    next_frame: AtomicU64,
}

impl SourceStats {
    /// Create counters for a source starting at `start_frame`
    pub fn new(start_frame: u64) -> Self {
        Self {
            started_at: Instant::now(),
            frames_published: AtomicU64::new(0),
            bytes_published: AtomicU64::new(0),
            retries: AtomicU64::new(0),
            next_frame: AtomicU64::new(start_frame),
        }
    }

    /// Record a frame that was read and published
    ///
    /// `next_frame` saturates at `u64::MAX`; the source stops there.
    pub fn record_published(&self, frame: u64, bytes: usize) {
        self.frames_published.fetch_add(1, Ordering::Relaxed);
        self.bytes_published.fetch_add(bytes as u64, Ordering::Relaxed);
        self.next_frame.store(frame.saturating_add(1), Ordering::Relaxed);
    }

    /// Record a failed read attempt
    pub fn record_retry(&self) {
        self.retries.fetch_add(1, Ordering::Relaxed);
    }

    /// Take a point-in-time copy of the counters
    pub fn snapshot(&self) -> SourceSnapshot {
        SourceSnapshot {
            frames_published: self.frames_published.load(Ordering::Relaxed),
            bytes_published: self.bytes_published.load(Ordering::Relaxed),
            retries: self.retries.load(Ordering::Relaxed),
            next_frame: self.next_frame.load(Ordering::Relaxed),
            uptime: self.started_at.elapsed(),
        }
    }
}

/// Point-in-time producer statistics
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceSnapshot {
    /// Frames read and published
    pub frames_published: u64,
    /// Total bytes published
    pub bytes_published: u64,
    /// Failed read attempts
    pub retries: u64,
    /// Frame number the source will read next
    pub next_frame: u64,
    /// Time since the counters were created
    pub uptime: Duration,
}

impl SourceSnapshot {
    /// Published frames per second
    pub fn framerate(&self) -> f64 {
        let secs = self.uptime.as_secs_f64();
        if secs > 0.0 {
            self.frames_published as f64 / secs
        } else {
            0.0
        }
    }

    /// Published bits per second
    pub fn bitrate(&self) -> u64 {
        let secs = self.uptime.as_secs();
        if secs > 0 {
            (self.bytes_published * 8) / secs
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_stats_new() {
        let stats = SourceStats::new(10);
        let snap = stats.snapshot();

        assert_eq!(snap.frames_published, 0);
        assert_eq!(snap.bytes_published, 0);
        assert_eq!(snap.retries, 0);
        assert_eq!(snap.next_frame, 10);
    }

    #[test]
    fn test_source_stats_record() {
        let stats = SourceStats::new(0);
        stats.record_published(0, 100);
        stats.record_retry();
        stats.record_retry();
        stats.record_published(1, 50);

        let snap = stats.snapshot();
        assert_eq!(snap.frames_published, 2);
        assert_eq!(snap.bytes_published, 150);
        assert_eq!(snap.retries, 2);
        assert_eq!(snap.next_frame, 2);
    }

    #[test]
    fn test_source_stats_last_frame() {
        let stats = SourceStats::new(u64::MAX);
        stats.record_published(u64::MAX, 1);

        let snap = stats.snapshot();
        assert_eq!(snap.frames_published, 1);
        assert_eq!(snap.next_frame, u64::MAX);
    }

    #[test]
    fn test_snapshot_bitrate() {
        let snap = SourceSnapshot {
            bytes_published: 1_000_000,
            uptime: Duration::from_secs(10),
            ..Default::default()
        };

        // 1,000,000 bytes * 8 bits / 10 seconds
        assert_eq!(snap.bitrate(), 800_000);
    }

    #[test]
    fn test_snapshot_zero_uptime() {
        let snap = SourceSnapshot {
            frames_published: 5,
            bytes_published: 500,
            ..Default::default()
        };

        assert_eq!(snap.bitrate(), 0);
        assert_eq!(snap.framerate(), 0.0);
    }

    #[test]
    fn test_snapshot_framerate() {
        let snap = SourceSnapshot {
            frames_published: 250,
            uptime: Duration::from_secs(10),
            ..Default::default()
        };

        assert!((snap.framerate() - 25.0).abs() < f64::EPSILON);
    }
}
