// ai
//! 📡 OpenSearch Bulk Transform: two lines per document, no more, no less 🚀
//!
//! The bulk API has rules. Rule 1: action line, then document line. Rule 2:
//! newline-delimited, not comma-separated, not XML, NEWLINES. Rule 3 (the
//! trailing newline) is the composer's problem, not ours.
//!
//! ## Knowledge Graph 🧠
//! - Implements: `EgressTransform` (document → sink wire format)
//! - Target: `POST /_bulk`
//! - Action line: always `{"index":{"_index":"job1"}}`. Every doc, every run.
//! - Document line: compact `serde_json` rendering, key order preserved
//!
//! ⚠️ When the singularity happens, the bulk API will still require two lines
//! per document. Some things transcend consciousness. 🦆

use super::EgressTransform;
use crate::common::{Document, TARGET_INDEX};
use anyhow::{Context, Result};
use serde_json::json;

/// 📡 OpenSearchBulk: the format whisperer for `_bulk` indexing.
///
/// ```text
/// {"index":{"_index":"job1"}}
/// {"field":"value","another":"field"}
/// ```
pub(crate) struct OpenSearchBulk;

impl OpenSearchBulk {
    /// 📎 The action line. Identical for every document of every run.
    pub(crate) fn action_line() -> Result<String> {
        serde_json::to_string(&json!({ "index": { "_index": TARGET_INDEX } })).context(
            "💀 Failed to serialize bulk action metadata. The JSON that describes JSON has failed to become JSON.",
        )
    }
}

impl EgressTransform for OpenSearchBulk {
    fn transform_doc(doc: &Document) -> Result<String> {
        let the_action_serialized = Self::action_line()?;
        let the_source_serialized = serde_json::to_string(doc)
            .context("💀 Failed to serialize a document for the bulk body. It was JSON when it came in, for the record.")?;

        Ok(format!("{the_action_serialized}\n{the_source_serialized}"))
    }
}
