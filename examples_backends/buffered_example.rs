use std::error::Error;
use std::sync::Arc;

use async_trait::async_trait;
use templated_log::buffered::{AsyncSink, BufferConfig, BufferedSink};
use templated_log::{args, Event, Logger};
use tokio::time::{sleep, Duration};

/// Pretend backend with noticeable latency per event.
struct SlowCollector;

#[async_trait]
impl AsyncSink for SlowCollector {
    async fn send(&self, event: &Event) -> Result<(), Box<dyn Error + Send + Sync>> {
        sleep(Duration::from_millis(5)).await;
        println!("[collector] {}", serde_json::to_string(event)?);
        Ok(())
    }
}

#[tokio::main]
async fn main() {
    let (sink, handle) = BufferedSink::new(Arc::new(SlowCollector), BufferConfig::default());
    let dropped = Arc::clone(&sink.dropped_events);

    let log = Logger::new(sink).with_context("job", "nightly-export");
    for batch in 0..10 {
        log.info("exported batch {batch} with {rows} rows", args![batch, batch * 1000]);
    }

    // dropping the last logger closes the channel and lets the task drain
    drop(log);
    handle.await.expect("buffering task panicked");

    println!("dropped events: {}", dropped.load(std::sync::atomic::Ordering::Relaxed));
}
