// ai
//! 🚚 The Batch Uploader: chunk, compose, POST, log, repeat.
//!
//! 🧠 Knowledge graph:
//! - Chunks: consecutive slices of at most `CHUNK_SIZE` docs, input order, never empty
//! - One `Sink::send` per chunk, strictly one at a time
//! - Every response is logged (status + body). Non-2xx gets a warning on top and the
//!   loop keeps going. Nothing here ever reads a status code to decide what happens next.
//! - Transport errors (no response at all) end the run, naming the chunk
//! - No retries. If you want retries, you want a different tool. 🦆

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::backends::{Sink, SinkBackend};
use crate::common::{CHUNK_SIZE, Document};
use crate::composers::NdjsonComposer;
use crate::progress::UploadProgress;

/// 📊 What happened, in numbers. Returned by [`crate::run`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadReport {
    pub chunks_sent: usize,
    pub documents_sent: usize,
    /// ⚠️ Chunks the cluster answered with something other than 2xx.
    pub chunks_rejected: usize,
    pub elapsed: Duration,
}

impl UploadReport {
    pub fn chunks_accepted(&self) -> usize {
        self.chunks_sent - self.chunks_rejected
    }
}

/// 🚚 Owns the sink for the duration of one run.
#[derive(Debug)]
pub(crate) struct BatchUploader {
    sink: SinkBackend,
    composer: NdjsonComposer,
    chunk_size: usize,
}

impl BatchUploader {
    pub(crate) fn new(sink: SinkBackend) -> Self {
        Self {
            sink,
            composer: NdjsonComposer,
            chunk_size: CHUNK_SIZE,
        }
    }

    /// 🚀 Upload every document, `chunk_size` at a time.
    ///
    /// Zero documents means zero requests. The sink is closed once the last
    /// chunk has been answered.
    pub(crate) async fn upload(&mut self, documents: &[Document]) -> Result<UploadReport> {
        let start_time = Instant::now();
        let progress = UploadProgress::new(documents.len() as u64);
        let mut report = UploadReport::default();

        for (index, chunk) in documents.chunks(self.chunk_size).enumerate() {
            let chunk_number = index + 1;
            info!(chunk = chunk_number, docs = chunk.len(), "📡 bulk upload request {chunk_number}");

            let payload = self.composer.compose(chunk)?;
            let response = self.sink.send(payload).await.with_context(|| {
                format!("💀 Bulk upload request {chunk_number} failed before the cluster could answer. Later chunks were not sent.")
            })?;

            info!(
                chunk = chunk_number,
                status = response.status,
                "📬 <Response [{}]> {}",
                response.status,
                response.body
            );
            if !response.is_success() {
                // -- ⚠️ logged, counted, and otherwise ignored. the next chunk goes out regardless.
                warn!(
                    chunk = chunk_number,
                    status = response.status,
                    "⚠️ bulk upload request {chunk_number} was answered with {}; continuing with the next chunk anyway",
                    response.status
                );
                report.chunks_rejected += 1;
            }

            report.chunks_sent += 1;
            report.documents_sent += chunk.len();
            progress.update(chunk_number, chunk.len() as u64);
        }

        progress.finish();
        self.sink.close().await?;
        report.elapsed = start_time.elapsed();

        info!(
            uploaded = report.documents_sent,
            chunks = report.chunks_sent,
            rejected = report.chunks_rejected,
            "✅ finished upload"
        );
        Ok(report)
    }
}
