//! framecast command-line runner
//!
//! Reads `<path>/<prefix><N><suffix>` frames starting at the given number
//! and fans them out to a set of local sessions that log what they receive.
//!
//! Run with: framecast <path> <prefix> <start frame #> <suffix>
//!
//! Example:
//!   framecast /tmp/render frame 0 .png --sessions 2 --throttle-ms 33

mod cli;

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use cli::Cli;
use framecast::{FileSource, QueueHandle, SessionRegistry, SourceError, SourceSummary};

/// What the blocking join of the source thread hands back
type Joined =
    Result<std::thread::Result<Result<SourceSummary, SourceError>>, tokio::task::JoinError>;

/// Drain one session's queue until the session is torn down
fn spawn_consumer(handle: QueueHandle) -> JoinHandle<u64> {
    tokio::task::spawn_blocking(move || {
        let id = handle.session_id();
        let mut received = 0u64;

        while let Some(file) = handle.pop() {
            received += 1;
            tracing::debug!(
                session_id = %id,
                frame = file.frame(),
                bytes = file.len(),
                "Frame received"
            );
        }

        tracing::info!(session_id = %id, received = received, "Session drained");
        received
    })
}

/// Resolve on ctrl-c
///
/// If the handler cannot be installed this never resolves, so the source
/// keeps running until it stops on its own.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

/// Turn the source thread's join result into the run outcome
fn source_outcome(joined: Joined) -> framecast::Result<SourceSummary> {
    match joined {
        Ok(Ok(outcome)) => outcome.map_err(Into::into),
        Ok(Err(_)) => Err(std::io::Error::other("source thread panicked").into()),
        Err(e) => Err(std::io::Error::other(format!("source join task failed: {}", e)).into()),
    }
}

async fn run(cli: Cli) -> framecast::Result<()> {
    let registry = Arc::new(SessionRegistry::with_config(cli.registry_config()));
    let source = FileSource::new(cli.source_config())?;

    let sessions: Vec<_> = (0..cli.sessions.max(1))
        .map(|_| registry.open_session())
        .collect();
    let consumers: Vec<_> = sessions
        .iter()
        .map(|(_, handle)| spawn_consumer(handle.clone()))
        .collect();

    let cancel = CancellationToken::new();
    let worker = source.spawn(Arc::clone(&registry), cancel.clone())?;
    let mut worker = tokio::task::spawn_blocking(move || worker.join());

    let joined = tokio::select! {
        joined = &mut worker => joined,
        _ = shutdown_signal() => {
            tracing::info!("Shutdown signal received");
            cancel.cancel();
            worker.await
        }
    };

    let outcome = source_outcome(joined);

    // Tearing the sessions down wakes their consumers
    for (id, _) in &sessions {
        registry.unregister(*id);
    }
    for consumer in consumers {
        let _ = consumer.await;
    }

    let stats = source.stats();
    tracing::info!(
        frames = stats.frames_published,
        bytes = stats.bytes_published,
        retries = stats.retries,
        fps = stats.framerate(),
        "File source finished"
    );

    let summary = outcome?;
    tracing::info!(
        next_frame = summary.next_frame,
        duration_ms = summary.duration.as_millis() as u64,
        "Stopped cleanly"
    );
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "framecast failed");
            ExitCode::FAILURE
        }
    }
}
