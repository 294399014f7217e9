//! 📦 Common data structures: the building blocks of opu
//!
//! 🎬 INT. PROW ARTIFACT BUCKET, 3:47 AM
//!
//! A JSON file lands. Inside it, an `items` array. Inside that, thousands of
//! Kubernetes events, each one convinced it is the most important event that
//! ever happened to a kubelet. They are all going to `job1`. Every single one.
//!
//! This module holds the humble types that ferry them there. 🦆

use serde::Deserialize;
use serde_json::{Map, Value};

/// 📡 Every document of every run lands in this index. No config knob. No exceptions.
pub const TARGET_INDEX: &str = "job1";

/// 📦 Documents per `_bulk` request. The last chunk may be smaller; none is ever empty.
pub const CHUNK_SIZE: usize = 1000;

/// 🎯 One record headed for the index.
///
/// An ordered JSON object. Ordered because `serde_json` is built with
/// `preserve_order`, which means key iteration follows the input file and the
/// `locator` of a normalized event comes out the same way every run.
pub type Document = Map<String, Value>;

/// 📋 The shape of the input file. Only `items` matters; everything else the
/// file carries (`apiVersion`, `kind: List`, `metadata`, ...) is ignored.
#[derive(Debug, Deserialize, Default)]
pub(crate) struct ItemList {
    pub items: Vec<Document>,
}

/// 📬 What the cluster said back about one chunk.
///
/// Status and body are kept verbatim. They get logged, counted, and otherwise
/// left alone: a 401 is a perfectly valid answer as far as the upload loop cares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkResponse {
    pub status: u16,
    pub body: String,
}

impl BulkResponse {
    /// ✅ 2xx. The only numbers that make on-call happy.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn the_one_where_item_list_ignores_the_wrapping_paper() -> anyhow::Result<()> {
        let the_list: ItemList = serde_json::from_str(
            r#"{"apiVersion":"v1","kind":"List","items":[{"a":1},{"b":2}],"metadata":{}}"#,
        )?;
        assert_eq!(the_list.items.len(), 2);
        assert_eq!(the_list.items[1]["b"], 2);
        Ok(())
    }

    #[test]
    fn the_one_where_only_2xx_counts_as_success() {
        let ok = BulkResponse { status: 200, body: String::new() };
        let created = BulkResponse { status: 201, body: String::new() };
        let nope = BulkResponse { status: 401, body: "Unauthorized".to_string() };
        assert!(ok.is_success());
        assert!(created.is_success());
        assert!(!nope.is_success());
    }
}
