//! Relation serializer
//!
//! Renders extractions in the JSON wire format clients expect:
//!
//! ```text
//! [{"confidence":0.8,"context":"","negated":0,"passive":0,
//!   "string":"(Obama; gave; a speech)","rel":"gave","arg1":"Obama",
//!   "arg2s":["a speech"]}]
//! ```
//!
//! Field order is fixed and the boolean flags are encoded as `1`/`0`.

use serde::{Deserialize, Serialize};

use crate::{Extraction, Result};

/// Borrowed view of an extraction in wire field order
#[derive(Serialize)]
struct ExtractionRecord<'a> {
    confidence: f64,
    context: &'a str,
    negated: u8,
    passive: u8,
    string: &'a str,
    rel: &'a str,
    arg1: &'a str,
    arg2s: &'a [String],
}

impl<'a> From<&'a Extraction> for ExtractionRecord<'a> {
    fn from(e: &'a Extraction) -> Self {
        Self {
            confidence: e.confidence,
            context: &e.context,
            negated: u8::from(e.negated),
            passive: u8::from(e.passive),
            string: &e.triple_text,
            rel: &e.relation,
            arg1: &e.subject,
            arg2s: &e.objects,
        }
    }
}

/// Serialize extractions to a JSON array, preserving engine order
pub fn serialize(extractions: &[Extraction]) -> Result<String> {
    let records: Vec<ExtractionRecord<'_>> = extractions.iter().map(Into::into).collect();
    Ok(serde_json::to_string(&records)?)
}

/// Same as [`serialize`], pretty-printed
pub fn serialize_pretty(extractions: &[Extraction]) -> Result<String> {
    let records: Vec<ExtractionRecord<'_>> = extractions.iter().map(Into::into).collect();
    Ok(serde_json::to_string_pretty(&records)?)
}

/// Serialize extractions to a `serde_json::Value` array
pub fn to_value(extractions: &[Extraction]) -> Result<serde_json::Value> {
    let records: Vec<ExtractionRecord<'_>> = extractions.iter().map(Into::into).collect();
    Ok(serde_json::to_value(records)?)
}

/// Owned wire record, as returned by remote OpenIE services
#[derive(Debug, Clone, Deserialize)]
pub struct WireExtraction {
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub context: String,
    #[serde(default)]
    pub negated: Flag,
    #[serde(default)]
    pub passive: Flag,
    #[serde(default)]
    pub string: Option<String>,
    pub rel: String,
    pub arg1: String,
    #[serde(default)]
    pub arg2s: Vec<String>,
}

/// Flag accepted as `0`/`1` or `false`/`true`
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
pub enum Flag {
    Int(u8),
    Bool(bool),
}

impl Default for Flag {
    fn default() -> Self {
        Flag::Bool(false)
    }
}

impl Flag {
    pub fn is_set(self) -> bool {
        match self {
            Flag::Int(v) => v != 0,
            Flag::Bool(v) => v,
        }
    }
}

impl From<WireExtraction> for Extraction {
    fn from(w: WireExtraction) -> Self {
        let mut extraction = Extraction::new(w.arg1, w.rel, w.arg2s)
            .with_confidence(w.confidence.unwrap_or(0.0))
            .with_context(w.context)
            .negated(w.negated.is_set())
            .passive(w.passive.is_set());
        if let Some(text) = w.string {
            extraction = extraction.with_triple_text(text);
        }
        extraction
    }
}

/// Parse a wire-format JSON array back into extractions
pub fn deserialize(json: &str) -> Result<Vec<Extraction>> {
    let records: Vec<WireExtraction> = serde_json::from_str(json)?;
    Ok(records.into_iter().map(Extraction::from).collect())
}
