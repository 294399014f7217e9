// ai
//! 🎫 Kube Event Normalizer: teaching Kubernetes events to speak timeline 🕰️
//!
//! A Kubernetes event knows when it first happened, when it last happened,
//! how worried to be, and who reported it. It just insists on calling those
//! `firstTimestamp`, `lastTimestamp`, `type` and `source`. The index wants
//! `from`, `to`, `level` and a one-line `locator`. This module is the
//! interpreter.
//!
//! ## Knowledge Graph 🧠
//! - Implements: `IngestTransform`
//! - Triggers on: `kind == "Event"` (a string, exactly). Anything else is returned untouched.
//! - Renames: `firstTimestamp → from`, `lastTimestamp → to`, `type → level` (if present)
//! - Collapses: `source` object → `locator` = `"k1/v1 k2/v2"` in the object's key order
//! - Key order of the output: surviving keys as they were, then `from`, `to`, `level`, `locator`
//! - Fails with a missing-key error when `firstTimestamp`, `lastTimestamp` or `source` is absent

use super::IngestTransform;
use crate::common::Document;
use anyhow::{Context, Result, bail};
use serde_json::Value;

/// 🎫 KubeEventNormalizer: the zero-sized rename desk for Kubernetes events.
pub(crate) struct KubeEventNormalizer;

impl KubeEventNormalizer {
    fn is_event(doc: &Document) -> bool {
        doc.get("kind").and_then(Value::as_str) == Some("Event")
    }

    /// 📍 `{"ns":"n1","host":"h1"}` → `"ns/n1 host/h1"`.
    ///
    /// Strings render bare. Anything fancier (numbers, bools, nested objects)
    /// renders as compact JSON: `healthy/true` and `x/null`, never the
    /// Python-`str()` spelling `healthy/True` / `x/None`.
    fn locator(source: &Document) -> String {
        source
            .iter()
            .map(|(key, value)| match value {
                Value::String(s) => format!("{key}/{s}"),
                other => format!("{key}/{other}"),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn missing(key: &str) -> String {
        format!(
            "💀 Event document is missing required key '{key}'. It said kind=Event with its whole chest \
             and then showed up without the paperwork."
        )
    }
}

impl IngestTransform for KubeEventNormalizer {
    /// 🔄 Rename an Event into the common shape, or hand a non-Event straight back.
    ///
    /// The output is built fresh from the consumed input, so a failure never
    /// leaves a half-renamed document lying around for someone to upload.
    fn transform_doc(doc: Document) -> Result<Document> {
        if !Self::is_event(&doc) {
            // -- 🚶 Not an event. Not our department. Next window please.
            return Ok(doc);
        }

        let mut first_timestamp = None;
        let mut last_timestamp = None;
        let mut event_type = None;
        let mut source = None;
        let mut normalized = Document::new();

        for (key, value) in doc {
            match key.as_str() {
                "firstTimestamp" => first_timestamp = Some(value),
                "lastTimestamp" => last_timestamp = Some(value),
                "type" => event_type = Some(value),
                "source" => source = Some(value),
                _ => {
                    normalized.insert(key, value);
                }
            }
        }

        let from = first_timestamp.with_context(|| Self::missing("firstTimestamp"))?;
        let to = last_timestamp.with_context(|| Self::missing("lastTimestamp"))?;
        let locator = match source.with_context(|| Self::missing("source"))? {
            Value::Object(source) => Self::locator(&source),
            other => bail!(
                "💀 Event document has a 'source' that is not an object (got {other}). \
                 A locator needs key/value pairs, not vibes."
            ),
        };

        normalized.insert("from".to_string(), from);
        normalized.insert("to".to_string(), to);
        if let Some(level) = event_type {
            normalized.insert("level".to_string(), level);
        }
        normalized.insert("locator".to_string(), Value::String(locator));

        Ok(normalized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            other => panic!("💀 test fixture must be an object, got {other}"),
        }
    }

    fn keys(doc: &Document) -> Vec<&str> {
        doc.keys().map(String::as_str).collect()
    }

    #[test]
    fn the_one_where_a_full_event_gets_the_makeover() -> Result<()> {
        let the_event = doc(json!({
            "kind": "Event",
            "firstTimestamp": "2024-01-01T00:00:00Z",
            "lastTimestamp": "2024-01-01T00:05:00Z",
            "type": "Warning",
            "message": "Back-off restarting failed container",
            "source": {"ns": "n1", "host": "h1"}
        }));

        let the_result = KubeEventNormalizer::transform_doc(the_event)?;

        assert_eq!(the_result["from"], "2024-01-01T00:00:00Z");
        assert_eq!(the_result["to"], "2024-01-01T00:05:00Z");
        assert_eq!(the_result["level"], "Warning");
        assert_eq!(the_result["locator"], "ns/n1 host/h1");
        for gone in ["firstTimestamp", "lastTimestamp", "type", "source"] {
            assert!(the_result.get(gone).is_none(), "'{gone}' should have been renamed away");
        }
        assert_eq!(
            keys(&the_result),
            vec!["kind", "message", "from", "to", "level", "locator"],
            "surviving keys first, renamed keys appended"
        );
        Ok(())
    }

    #[test]
    fn the_one_where_no_type_means_no_level() -> Result<()> {
        let the_event = doc(json!({
            "kind": "Event",
            "firstTimestamp": "A",
            "lastTimestamp": "B",
            "source": {"ns": "n1", "host": "h1"}
        }));

        let the_result = KubeEventNormalizer::transform_doc(the_event)?;

        assert!(the_result.get("level").is_none());
        assert_eq!(
            the_result,
            doc(json!({"kind": "Event", "from": "A", "to": "B", "locator": "ns/n1 host/h1"}))
        );
        Ok(())
    }

    #[test]
    fn the_one_where_non_events_are_left_alone() -> Result<()> {
        let the_bystanders = vec![
            json!({"kind": "Pod", "firstTimestamp": "x", "source": "not-an-object"}),
            json!({"kind": "event", "type": "Normal"}),
            json!({"kind": 7}),
            json!({"prowjob": "periodic-ci-e2e", "result": "FAILURE"}),
            json!({}),
        ];

        for bystander in the_bystanders {
            let the_original = doc(bystander);
            let the_result = KubeEventNormalizer::transform_doc(the_original.clone())?;
            assert_eq!(the_result, the_original, "identity is the whole job here");
        }
        Ok(())
    }

    #[test]
    fn the_one_where_missing_timestamps_are_reported_by_name() {
        let the_incomplete = doc(json!({"kind": "Event", "firstTimestamp": "A", "source": {}}));

        let the_err = KubeEventNormalizer::transform_doc(the_incomplete)
            .expect_err("lastTimestamp is missing");

        assert!(the_err.to_string().contains("'lastTimestamp'"), "got: {the_err}");
    }

    #[test]
    fn the_one_where_source_is_required_and_must_be_an_object() {
        let the_sourceless = doc(json!({"kind": "Event", "firstTimestamp": "A", "lastTimestamp": "B"}));
        let the_err = KubeEventNormalizer::transform_doc(the_sourceless).expect_err("no source");
        assert!(the_err.to_string().contains("'source'"), "got: {the_err}");

        let the_stringly = doc(json!({
            "kind": "Event", "firstTimestamp": "A", "lastTimestamp": "B", "source": "kubelet"
        }));
        let the_err = KubeEventNormalizer::transform_doc(the_stringly).expect_err("string source");
        assert!(the_err.to_string().contains("not an object"), "got: {the_err}");
    }

    #[test]
    fn the_one_where_locator_values_that_are_not_strings_render_as_json() -> Result<()> {
        let the_event = doc(json!({
            "kind": "Event",
            "firstTimestamp": null,
            "lastTimestamp": null,
            "source": {"component": "kubelet", "port": 10250, "healthy": true}
        }));

        let the_result = KubeEventNormalizer::transform_doc(the_event)?;

        assert_eq!(the_result["locator"], "component/kubelet port/10250 healthy/true");
        assert_eq!(the_result["from"], Value::Null, "values are moved, not judged");
        Ok(())
    }

    #[test]
    fn the_one_where_an_existing_from_key_is_overwritten_in_place() -> Result<()> {
        let the_event = doc(json!({
            "from": "stale",
            "kind": "Event",
            "firstTimestamp": "fresh",
            "lastTimestamp": "B",
            "source": {"component": "kubelet"}
        }));

        let the_result = KubeEventNormalizer::transform_doc(the_event)?;

        assert_eq!(the_result["from"], "fresh");
        assert_eq!(keys(&the_result), vec!["from", "kind", "to", "locator"]);
        Ok(())
    }
}
