// ai
//! 🎬 *[a dark and stormy deploy. the sink demands newlines. the composer obliges.]*
//!
//! 📡 **NdjsonComposer**: turns one chunk of documents into one `_bulk` body.
//!
//! 🧠 Knowledge graph:
//! - Per document: the two lines from `OpenSearchBulk` (action + source), each followed by `\n`
//! - After the chunk: one extra `\n`, i.e. a trailing blank line
//! - So `[d1, d2]` composes to `A\nd1\nA\nd2\n\n`
//! - Document order in the body is chunk order. Always.
//!
//! 🦆 The duck asked what NDJSON stands for. We told it. It left anyway.

use crate::common::Document;
use crate::transforms::{EgressTransform, OpenSearchBulk};
use anyhow::Result;

/// 📡 Newline-Delimited JSON, the format `/_bulk` demands.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct NdjsonComposer;

impl NdjsonComposer {
    #[inline]
    pub(crate) fn compose(&self, chunk: &[Document]) -> Result<String> {
        let mut payload = String::new();

        for doc in chunk {
            payload.push_str(&OpenSearchBulk::transform_doc(doc)?);
            payload.push('\n');
        }

        // -- ✅ the trailing blank line. ES and OpenSearch both want the body newline-terminated.
        payload.push('\n');
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const ACTION: &str = r#"{"index":{"_index":"job1"}}"#;

    fn doc(value: serde_json::Value) -> Document {
        match value {
            serde_json::Value::Object(map) => map,
            other => panic!("💀 test fixture must be an object, got {other}"),
        }
    }

    #[test]
    fn ndjson_the_one_where_two_docs_make_four_lines_and_a_blank() -> Result<()> {
        let the_chunk = vec![doc(json!({"doc": 1})), doc(json!({"doc": 2, "kind": "Job"}))];

        let the_body = NdjsonComposer.compose(&the_chunk)?;

        let d1 = r#"{"doc":1}"#;
        let d2 = r#"{"doc":2,"kind":"Job"}"#;
        assert_eq!(the_body, format!("{ACTION}\n{d1}\n{ACTION}\n{d2}\n\n"));
        Ok(())
    }

    #[test]
    fn ndjson_the_one_where_every_doc_gets_its_own_action_line() -> Result<()> {
        let the_chunk: Vec<Document> = (0..5).map(|i| doc(json!({"n": i}))).collect();

        let the_body = NdjsonComposer.compose(&the_chunk)?;
        let the_lines: Vec<&str> = the_body.split('\n').collect();

        // 🧮 5 docs × 2 lines + the blank line + the empty tail after the final '\n'
        assert_eq!(the_lines.len(), 12);
        for (i, pair) in the_lines[..10].chunks(2).enumerate() {
            assert_eq!(pair[0], ACTION);
            assert_eq!(pair[1], format!("{{\"n\":{i}}}"));
        }
        assert_eq!(&the_lines[10..], &["", ""]);
        Ok(())
    }
}
