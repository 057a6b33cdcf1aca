use std::path::PathBuf;
use std::sync::Arc;

use citizen_cot::{EnvSource, PollSettings, Poller};
use citizen_feed::{FeedClient, FeedConfig};
use clap::{Parser, ValueEnum};
use cot_sink::{EventPayload, EventSink, QueueSink, WriterSink};
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Events buffered between the poller and the queue drain.
const QUEUE_CAPACITY: usize = 256;

#[derive(Debug, Error)]
enum CliError {
    #[error("could not load env file {path:?}: {source}")]
    EnvFile {
        path: PathBuf,
        source: dotenvy::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(#[from] citizen_cot::ConfigError),

    #[error("could not build feed client: {0}")]
    Feed(#[from] citizen_feed::FeedError),

    #[error("could not flush events: {0}")]
    Sink(#[from] cot_sink::SinkError),

    #[error("event queue drain failed: {0}")]
    Drain(#[from] tokio::task::JoinError),
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Output {
    /// Write each event to stdout, one per line.
    Stdout,
    /// Hand events to an in-process queue and log what leaves it.
    QueueLog,
}

#[derive(Debug, Parser)]
#[command(name = "citizen-cot")]
#[command(about = "Poll the Citizen incident feed and emit Cursor-on-Target events")]
struct Args {
    /// Env file to load before reading settings (default: ./.env if present)
    #[arg(long)]
    env_file: Option<PathBuf>,

    /// Run a single poll cycle, then exit
    #[arg(long)]
    once: bool,

    /// Where events go
    #[arg(long, value_enum, default_value_t = Output::Stdout)]
    output: Output,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    load_env(args.env_file.as_ref())?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Arc::new(EnvSource::new());
    let settings = PollSettings::load(config.as_ref()).map_err(CliError::from)?;

    let feed = FeedClient::new(FeedConfig::with_timeout(settings.feed_timeout))
        .map_err(CliError::from)?;

    let (sink, drain) = build_sink(args.output);

    info!("citizen-cot {} starting (sink: {})", citizen_cot::version(), sink.name());
    let mut poller = Poller::new(Arc::new(feed), sink.clone(), config, settings);

    if args.once {
        let report = poller.poll_once().await;
        info!(?report, "Single cycle complete");
    } else {
        tokio::select! {
            _ = poller.run() => {}
            result = tokio::signal::ctrl_c() => {
                if let Err(e) = result {
                    error!("Could not listen for shutdown signal: {}", e);
                }
                info!("Shutting down");
            }
        }
    }

    drop(poller);
    shutdown(sink, drain).await?;
    Ok(())
}

/// The sink for `output`, plus the drain task when events go through a queue.
fn build_sink(output: Output) -> (Arc<dyn EventSink>, Option<JoinHandle<usize>>) {
    match output {
        Output::Stdout => (Arc::new(WriterSink::stdout()), None),
        Output::QueueLog => {
            let (sink, rx) = QueueSink::channel(QUEUE_CAPACITY);
            let drain = tokio::spawn(drain_queue(rx));
            (Arc::new(sink), Some(drain))
        }
    }
}

/// Flush and release the sink, then wait for the queue to empty.
///
/// The caller must hold no other reference to `sink`, or the drain never
/// sees the channel close.
async fn shutdown(
    sink: Arc<dyn EventSink>,
    drain: Option<JoinHandle<usize>>,
) -> Result<usize, CliError> {
    sink.flush().await?;
    drop(sink);

    let Some(drain) = drain else {
        return Ok(0);
    };
    let drained = drain.await?;
    info!(drained, "Event queue drained");
    Ok(drained)
}

fn load_env(path: Option<&PathBuf>) -> Result<(), CliError> {
    match path {
        Some(path) => dotenvy::from_path(path)
            .map(|_| ())
            .map_err(|source| CliError::EnvFile {
                path: path.clone(),
                source,
            }),
        None => {
            let _ = dotenvy::dotenv();
            Ok(())
        }
    }
}

async fn drain_queue(mut rx: mpsc::Receiver<EventPayload>) -> usize {
    let mut drained = 0;
    while let Some(payload) = rx.recv().await {
        info!(uid = %payload.uid, bytes = payload.len(), "Event dequeued");
        drained += 1;
    }
    drained
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_shutdown_waits_for_queued_events() {
        let (sink, drain) = build_sink(Output::QueueLog);
        for uid in ["a", "b", "c"] {
            sink.submit(EventPayload::new(uid, "<event/>")).await.unwrap();
        }

        let drained = shutdown(sink, drain).await.unwrap();
        assert_eq!(drained, 3);
    }

    #[tokio::test]
    async fn test_shutdown_without_queue() {
        let (sink, drain) = build_sink(Output::Stdout);
        assert!(drain.is_none());
        assert_eq!(shutdown(sink, drain).await.unwrap(), 0);
    }
}
