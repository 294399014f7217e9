//! 🎼 Composers: chunks of documents in, one request body out.
//!
//! Only one body format ships today: the NDJSON stream `_bulk` wants.

pub(crate) mod ndjson;

pub(crate) use ndjson::NdjsonComposer;
