//! Output rendering for the enriched record set.
//!
//! Thin serializers over the aggregator's output; JSON goes straight through
//! `serde_json` in `main`.

pub mod csv;
pub mod terminal;
