//! OpenIE Core - Extraction model, engine trait and shared types
//!
//! This crate defines the core abstractions used throughout the OpenIE server:
//! - The `Extraction` record produced by every engine
//! - The `ExtractionEngine` trait behind which backends are swapped
//! - Common error types
//! - Configuration management
//! - The relation serializer (JSON wire format)

pub mod config;
pub mod serialize;

pub use config::{AppConfig, ConfigError, EngineBackend, EngineConfig, LoggingConfig, ServerConfig};
pub use serialize::{serialize, WireExtraction};

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Core error types for OpenIE operations
#[derive(Error, Debug)]
pub enum OpenIeError {
    #[error("Extraction engine error: {0}")]
    Engine(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<ConfigError> for OpenIeError {
    fn from(err: ConfigError) -> Self {
        OpenIeError::ConfigError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, OpenIeError>;

// ============================================================================
// Extraction Model
// ============================================================================

/// A single subject/relation/object(s) fact derived from a sentence
///
/// Records are created fresh per request by an engine and never mutated
/// after being handed to the serializer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Extraction {
    /// Engine confidence score (no fixed range)
    pub confidence: f64,

    /// Surrounding syntactic context, may be empty
    pub context: String,

    /// Relation is negated ("did not give")
    pub negated: bool,

    /// Relation is in passive voice ("was given by")
    pub passive: bool,

    /// Human-readable rendering of the whole triple
    pub triple_text: String,

    /// Relation phrase
    pub relation: String,

    /// First argument, commonly the grammatical subject
    pub subject: String,

    /// Secondary arguments in sentence order
    pub objects: Vec<String>,
}

impl Extraction {
    /// Create an extraction with confidence `1.0` and rendered triple text
    pub fn new(
        subject: impl Into<String>,
        relation: impl Into<String>,
        objects: Vec<String>,
    ) -> Self {
        let subject = subject.into();
        let relation = relation.into();
        let triple_text = render_triple(&subject, &relation, &objects);

        Self {
            confidence: 1.0,
            context: String::new(),
            negated: false,
            passive: false,
            triple_text,
            relation,
            subject,
            objects,
        }
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence;
        self
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = context.into();
        self
    }

    pub fn negated(mut self, negated: bool) -> Self {
        self.negated = negated;
        self
    }

    pub fn passive(mut self, passive: bool) -> Self {
        self.passive = passive;
        self
    }

    /// Override the rendered triple text
    pub fn with_triple_text(mut self, text: impl Into<String>) -> Self {
        self.triple_text = text.into();
        self
    }
}

/// Render `(subject; relation; obj1; obj2)`
pub fn render_triple(subject: &str, relation: &str, objects: &[String]) -> String {
    let mut parts = Vec::with_capacity(objects.len() + 2);
    parts.push(subject);
    parts.push(relation);
    parts.extend(objects.iter().map(String::as_str));
    format!("({})", parts.join("; "))
}

// ============================================================================
// Traits
// ============================================================================

/// Trait for extraction backends
///
/// Implementations must be safe for concurrent read-only use once built;
/// the server shares a single instance across all requests.
#[async_trait::async_trait]
pub trait ExtractionEngine: Send + Sync {
    /// Extract facts from text, in the engine's natural order
    async fn extract(&self, text: &str) -> Result<Vec<Extraction>>;

    /// Get engine name for logging
    fn name(&self) -> &str;
}

// ============================================================================
// Tests
// ============================================================================
