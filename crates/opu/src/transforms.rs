// ai
//! 🔄 Transforms: turning whatever the prow job dumped into what the index wants 🎭
//!
//! 🎬 COLD OPEN: INT. CI ARTIFACT BUCKET, 2:47 AM
//!
//! One file, two kinds of citizens. Kubernetes events show up with
//! `firstTimestamp`, `lastTimestamp`, `type` and a `source` object, all named
//! by someone who never had to chart them on a timeline. Everything else shows
//! up and nobody asks questions.
//!
//! ```text
//!   input item              ingest                    egress
//!  ┌────────────┐   ┌─────────────────────┐   ┌────────────────┐
//!  │ kind=Event │──▶│ KubeEventNormalizer │──▶│ OpenSearchBulk │──▶ 2 NDJSON lines
//!  │ anything   │──▶│     (identity)      │──▶│                │
//!  └────────────┘   └─────────────────────┘   └────────────────┘
//! ```
//!
//! Every transform is a zero-sized marker type with a static method. The
//! compiler monomorphizes the calls and nobody pays for a vtable. 🦆

use crate::common::Document;
use anyhow::{Context, Result};

pub(crate) mod kube_event;
pub(crate) mod opensearch;

pub(crate) use kube_event::KubeEventNormalizer;
pub(crate) use opensearch::OpenSearchBulk;

/// 📥 IngestTransform: reshapes one loaded document into the common document shape.
///
/// # Contract 📜
/// - Takes the document by value and hands back a new one.
/// - On `Err` the input is gone and nothing half-renamed escapes. The caller
///   decides whether to skip or abort (we abort).
pub(crate) trait IngestTransform {
    fn transform_doc(doc: Document) -> Result<Document>;
}

/// 📤 EgressTransform: renders one document into the sink's wire format.
///
/// Borrows, because rendering is read-only and the uploader owns the chunk.
/// No trailing newline: the composer decides how lines are joined.
pub(crate) trait EgressTransform {
    fn transform_doc(doc: &Document) -> Result<String>;
}

/// 🔄 Normalize one document. Event documents get renamed, everything else walks through.
///
/// See [`KubeEventNormalizer`] for the exact rename rules.
pub fn normalize(doc: Document) -> Result<Document> {
    KubeEventNormalizer::transform_doc(doc)
}

/// 🔄 Normalize every loaded document, in order, before a single byte goes on the wire.
///
/// The first failing item aborts the whole batch with its position in the error
/// chain. Nothing has been uploaded at that point.
pub(crate) fn normalize_all(docs: Vec<Document>) -> Result<Vec<Document>> {
    docs.into_iter()
        .enumerate()
        .map(|(position, doc)| {
            normalize(doc).with_context(|| {
                format!("💀 Item #{position} of `items` could not be normalized. Nothing was uploaded.")
            })
        })
        .collect()
}
