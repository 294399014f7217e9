//! 🚀 opu: load a prow job's JSON dump, normalize its Kubernetes events, bulk-index it all.
//!
//! Loader → Normalizer → Batch Uploader. One file in, `ceil(N/1000)` POSTs out,
//! every document into `job1`.

pub mod app_config;
mod backends;
mod common;
mod composers;
pub mod progress;
mod transforms;
mod uploader;

use std::path::Path;

use anyhow::{Context, Result};

use crate::app_config::AppConfig;
use crate::backends::SinkBackend;
use crate::backends::opensearch_sink::OpenSearchSink;
use crate::uploader::BatchUploader;

pub use crate::backends::OpenSearchSinkConfig;
pub use crate::common::{BulkResponse, CHUNK_SIZE, Document, TARGET_INDEX};
pub use crate::transforms::normalize;
pub use crate::uploader::UploadReport;

/// 🚀 One full run: read `input`, normalize every item, upload in chunks.
///
/// Input and normalization errors happen before the first request. A transport
/// error stops the run at that chunk. Non-2xx answers are logged, counted in the
/// report, and otherwise ignored.
pub async fn run(app_config: AppConfig, input: &Path) -> Result<UploadReport> {
    let documents = backends::file_source::load_documents(input).await?;
    let documents = transforms::normalize_all(documents)
        .context(format!("💀 Normalizing the items of '{}' failed.", input.display()))?;

    let sink = SinkBackend::OpenSearch(OpenSearchSink::new(app_config.sink_config)?);
    BatchUploader::new(sink).upload(&documents).await
}
