//! 🔌 Backends: where the real I/O happens.
//!
//! 🚰 The file source pours documents in, the sinks slurp request bodies out.
//! And in between, we panic! (kidding, we use anyhow)
//!
//! 🦆 The duck is here because every file must have one. This is law. Do not question the duck.

use anyhow::Result;
use async_trait::async_trait;

use crate::common::BulkResponse;

pub(crate) mod file_source;
#[cfg(test)]
pub(crate) mod in_mem_sink;
pub(crate) mod opensearch_sink;

pub use opensearch_sink::OpenSearchSinkConfig;

/// 🕳️ A sink that sends pre-rendered payloads: pure I/O, zero logic.
///
/// # Contract 📜
/// - `send` accepts a fully rendered `_bulk` body and delivers it. Whatever
///   status comes back is returned as a [`BulkResponse`], good news or bad.
/// - `Err` from `send` means the request never got an answer (DNS, TLS,
///   connection refused, timeout). That one stops the run.
/// - `close` releases whatever the sink holds. Call it once, at the end.
#[async_trait]
pub(crate) trait Sink: std::fmt::Debug {
    /// 📡 Send one rendered payload. I/O only. No retries, no judgment.
    async fn send(&mut self, payload: String) -> Result<BulkResponse>;
    /// 🗑️ Finalize and release. Not on Fridays. Actually, also on Fridays.
    async fn close(&mut self) -> Result<()>;
}

/// 🎭 The many faces of a Sink. The uploader holds one of these and never
/// learns whether its bodies went over the wire or into a `Vec`.
#[derive(Debug)]
pub(crate) enum SinkBackend {
    OpenSearch(opensearch_sink::OpenSearchSink),
    #[cfg(test)]
    InMemory(in_mem_sink::InMemorySink),
}

#[async_trait]
impl Sink for SinkBackend {
    async fn send(&mut self, payload: String) -> Result<BulkResponse> {
        match self {
            SinkBackend::OpenSearch(sink) => sink.send(payload).await,
            #[cfg(test)]
            SinkBackend::InMemory(sink) => sink.send(payload).await,
        }
    }

    async fn close(&mut self) -> Result<()> {
        match self {
            SinkBackend::OpenSearch(sink) => sink.close().await,
            #[cfg(test)]
            SinkBackend::InMemory(sink) => sink.close().await,
        }
    }
}
