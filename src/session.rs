//! Transcript Session
//!
//! Async loop that consumes transcripts as a speech-to-text engine delivers
//! them and forwards each result.

use crate::processor::{ProcessResult, Processor};
use tokio::sync::mpsc;
use tracing::{debug, info};

/// Default channel capacity for transcripts and results
pub const CHANNEL_CAPACITY: usize = 32;

/// Process transcripts in arrival order until either side hangs up.
///
/// Returns the number of transcripts processed.
pub async fn run(
    processor: Processor,
    mut transcripts: mpsc::Receiver<String>,
    results: mpsc::Sender<ProcessResult>,
) -> usize {
    let mut processed = 0;

    while let Some(text) = transcripts.recv().await {
        if text.trim().is_empty() {
            debug!("Ignoring blank transcript");
            continue;
        }

        let result = processor.process(&text);
        processed += 1;

        if results.send(result).await.is_err() {
            debug!("Result receiver dropped, stopping session");
            break;
        }
    }

    info!("🛑 Session ended after {} transcripts", processed);
    processed
}

/// Spawn a session on the current runtime
pub fn spawn(
    processor: Processor,
) -> (
    mpsc::Sender<String>,
    mpsc::Receiver<ProcessResult>,
    tokio::task::JoinHandle<usize>,
) {
    let (transcript_tx, transcript_rx) = mpsc::channel(CHANNEL_CAPACITY);
    let (result_tx, result_rx) = mpsc::channel(CHANNEL_CAPACITY);
    let handle = tokio::spawn(run(processor, transcript_rx, result_tx));
    (transcript_tx, result_rx, handle)
}
