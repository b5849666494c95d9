use crate::event::Event;
use crate::sink::Sink;
use async_trait::async_trait;
use std::error::Error;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{sleep, Duration};

/// Asynchronous destination fed by a [`BufferedSink`].
///
/// Implementations transport events to a slow backend (a file on a
/// network mount, a remote collector, ...). `send` is called from the
/// buffering task, never from the thread that emitted the event.
#[async_trait]
pub trait AsyncSink: Send + Sync {
    /// Deliver a single event.
    ///
    /// **Returns**
    /// - `Ok(())` if the backend accepted the event.
    /// - `Err(..)` if it failed. The buffering task treats this as
    ///   transient and retries the rest of the batch with backoff.
    async fn send(&self, event: &Event) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// Flush anything the backend buffers itself. Called after every
    /// delivered batch and once more when the sink shuts down.
    ///
    /// Default implementation is a no-op.
    async fn flush(&self) -> Result<(), Box<dyn Error + Send + Sync>> {
        Ok(())
    }
}

/// Buffering configuration for [`BufferedSink`].
///
/// **Fields**
/// - `channel_buffer`: maximum number of queued events before new
///   events are dropped.
/// - `batch_size`: number of events handed to the backend per batch.
/// - `flush_interval`: maximum time a partial batch waits before being
///   delivered anyway.
#[derive(Clone, Debug)]
pub struct BufferConfig {
    pub channel_buffer: usize,
    pub batch_size: usize,
    pub flush_interval: Duration,
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            channel_buffer: 1024,
            batch_size: 128,
            flush_interval: Duration::from_secs(1),
        }
    }
}

/// [`Sink`] that queues events on a bounded channel and delivers them to
/// an [`AsyncSink`] from a background task, keeping backend latency off
/// the emitting thread.
///
/// When the queue is full the event is dropped and counted. The
/// background task ends, after delivering what is left, once the
/// `BufferedSink` (and every logger holding it) has been dropped.
pub struct BufferedSink {
    sender: mpsc::Sender<Event>,
    /// Total events handed to this sink.
    pub total_events: Arc<AtomicU64>,
    /// Successfully enqueued into the channel.
    pub enqueued_events: Arc<AtomicU64>,
    /// Dropped because the channel was full.
    pub dropped_events: Arc<AtomicU64>,
}

const INITIAL_BACKOFF: Duration = Duration::from_millis(100);
const MAX_BACKOFF: Duration = Duration::from_secs(10);

impl BufferedSink {
    /// Create the sink and spawn the task that pulls events from the
    /// channel and sends them to `sink`. Must be called from within a
    /// Tokio runtime.
    ///
    /// Minimal thresholds are enforced for `channel_buffer`,
    /// `batch_size` and `flush_interval` to avoid degenerate configs.
    pub fn new(sink: Arc<dyn AsyncSink>, config: BufferConfig) -> (Self, JoinHandle<()>) {
        let buffer = config.channel_buffer.max(16);
        let batch_size = config.batch_size.max(1);
        let flush_interval = config.flush_interval.max(Duration::from_millis(10));

        let (tx, mut rx) = mpsc::channel::<Event>(buffer);

        let handle = tokio::spawn(async move {
            let mut batch = Vec::with_capacity(batch_size);

            loop {
                tokio::select! {
                    received = rx.recv() => match received {
                        Some(event) => {
                            batch.push(event);
                            if batch.len() >= batch_size {
                                deliver(&*sink, &mut batch).await;
                            }
                        }
                        None => {
                            if !batch.is_empty() {
                                deliver(&*sink, &mut batch).await;
                            }
                            break;
                        }
                    },
                    _ = sleep(flush_interval) => {
                        if !batch.is_empty() {
                            deliver(&*sink, &mut batch).await;
                        }
                    }
                }
            }

            tracing::debug!(target: "templated_log", "buffered sink stopped");
        });

        (
            Self {
                sender: tx,
                total_events: Arc::new(AtomicU64::new(0)),
                enqueued_events: Arc::new(AtomicU64::new(0)),
                dropped_events: Arc::new(AtomicU64::new(0)),
            },
            handle,
        )
    }
}

/// Send `batch` until every event is accepted, retrying from the first
/// failed event with exponential backoff.
async fn deliver(sink: &dyn AsyncSink, batch: &mut Vec<Event>) {
    let mut backoff = INITIAL_BACKOFF;

    loop {
        let mut sent = 0;
        let mut failure = None;
        for event in batch.iter() {
            match sink.send(event).await {
                Ok(()) => sent += 1,
                Err(e) => {
                    failure = Some(e);
                    break;
                }
            }
        }
        batch.drain(..sent);

        match failure {
            None => break,
            Some(e) => {
                tracing::warn!(
                    target: "templated_log",
                    error = %e,
                    pending = batch.len(),
                    "async sink send failed, retrying in {:?}",
                    backoff
                );
                sleep(backoff).await;
                backoff = std::cmp::min(backoff * 2, MAX_BACKOFF);
            }
        }
    }

    if let Err(e) = sink.flush().await {
        tracing::warn!(target: "templated_log", error = %e, "async sink flush failed");
    }
}

impl Sink for BufferedSink {
    fn handle(&self, event: &Event) {
        self.total_events.fetch_add(1, Ordering::Relaxed);

        match self.sender.try_send(event.clone()) {
            Ok(()) => {
                self.enqueued_events.fetch_add(1, Ordering::Relaxed);
            }
            Err(_) => {
                self.dropped_events.fetch_add(1, Ordering::Relaxed);
                tracing::warn!(target: "templated_log", "event channel full, dropping event");
            }
        }
    }
}
