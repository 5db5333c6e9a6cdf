//! OpenIE Extractor - Extraction engine backends
//!
//! Every backend implements [`openie_core::ExtractionEngine`]:
//! - [`PatternEngine`]: in-process rule-based extraction
//! - [`RemoteEngine`]: forwards text to a hosted OpenIE service
//! - [`StaticEngine`]: fixed results, for tests and demos

use std::sync::Arc;

use openie_core::{EngineBackend, EngineConfig, Extraction, ExtractionEngine, OpenIeError, Result};

pub mod pattern;
pub mod remote;

pub use pattern::PatternEngine;
pub use remote::RemoteEngine;

/// Build the engine selected by configuration
pub fn build_engine(config: &EngineConfig) -> Result<Arc<dyn ExtractionEngine>> {
    let engine: Arc<dyn ExtractionEngine> = match config.backend {
        EngineBackend::Pattern => Arc::new(PatternEngine::new()?),
        EngineBackend::Remote => Arc::new(RemoteEngine::from_config(config)?),
    };

    if config.min_confidence > 0.0 {
        return Ok(Arc::new(ConfidenceFilter::new(engine, config.min_confidence)));
    }
    Ok(engine)
}

// ============================================================================
// Confidence filter
// ============================================================================

/// Drops extractions scoring below a threshold, keeping engine order
pub struct ConfidenceFilter {
    inner: Arc<dyn ExtractionEngine>,
    min_confidence: f64,
}

impl ConfidenceFilter {
    pub fn new(inner: Arc<dyn ExtractionEngine>, min_confidence: f64) -> Self {
        Self {
            inner,
            min_confidence,
        }
    }
}

#[async_trait::async_trait]
impl ExtractionEngine for ConfidenceFilter {
    async fn extract(&self, text: &str) -> Result<Vec<Extraction>> {
        let extractions = self.inner.extract(text).await?;
        let total = extractions.len();
        let kept: Vec<Extraction> = extractions
            .into_iter()
            .filter(|e| e.confidence >= self.min_confidence)
            .collect();

        if kept.len() < total {
            tracing::debug!(
                dropped = total - kept.len(),
                threshold = self.min_confidence,
                "Filtered low-confidence extractions"
            );
        }
        Ok(kept)
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}

// ============================================================================
// Static engine
// ============================================================================

/// Engine returning a fixed answer for every input
#[derive(Debug, Clone)]
pub struct StaticEngine {
    outcome: std::result::Result<Vec<Extraction>, String>,
}

impl StaticEngine {
    pub fn new(extractions: Vec<Extraction>) -> Self {
        Self {
            outcome: Ok(extractions),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Engine whose every call fails with `message`
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            outcome: Err(message.into()),
        }
    }
}

#[async_trait::async_trait]
impl ExtractionEngine for StaticEngine {
    async fn extract(&self, _text: &str) -> Result<Vec<Extraction>> {
        self.outcome.clone().map_err(OpenIeError::Engine)
    }

    fn name(&self) -> &str {
        "static"
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn scored(subject: &str, confidence: f64) -> Extraction {
        Extraction::new(subject, "is", vec![]).with_confidence(confidence)
    }

    #[test]
    fn test_static_engine() {
        let engine = StaticEngine::new(vec![scored("a", 0.5)]);
        let result = tokio_test::block_on(engine.extract("anything")).unwrap();
        assert_eq!(result, vec![scored("a", 0.5)]);

        let failing = StaticEngine::failing("backend down");
        let err = tokio_test::block_on(failing.extract("anything")).unwrap_err();
        assert_eq!(err.to_string(), "Extraction engine error: backend down");
    }

    #[test]
    fn test_confidence_filter_keeps_order() {
        let inner = Arc::new(StaticEngine::new(vec![
            scored("low", 0.2),
            scored("high", 0.9),
            scored("edge", 0.5),
        ]));
        let filter = ConfidenceFilter::new(inner, 0.5);

        let result = tokio_test::block_on(filter.extract("x")).unwrap();
        let subjects: Vec<&str> = result.iter().map(|e| e.subject.as_str()).collect();
        assert_eq!(subjects, ["high", "edge"]);
        assert_eq!(filter.name(), "static");
    }

    #[test]
    fn test_build_engine_from_config() {
        let engine = build_engine(&EngineConfig::default()).unwrap();
        assert_eq!(engine.name(), "pattern");

        let remote = build_engine(&EngineConfig {
            backend: EngineBackend::Remote,
            min_confidence: 0.3,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(remote.name(), "remote");
    }
}
