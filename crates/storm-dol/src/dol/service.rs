use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::domain::{PropertyContext, WeatherEvent};
use super::intake::QuarantinedEvent;
use super::scoring::ScoringEngine;
use super::selection::DolResult;
use crate::config::AnalysisConfig;

/// Errors raised before any event is scored.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AnalysisError {
    #[error("property location ({lat}, {lon}) is not a valid WGS84 coordinate")]
    InvalidProperty { lat: f64, lon: f64 },
    #[error("batch of {size} claims exceeds the limit of {limit}")]
    BatchTooLarge { size: usize, limit: usize },
}

/// Recommendation plus the events that were held back from scoring.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DolAnalysis {
    #[serde(flatten)]
    pub result: DolResult,
    pub quarantined: Vec<QuarantinedEvent>,
}

/// One claim inside a batch request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimAnalysisRequest {
    pub claim_id: String,
    pub property: PropertyContext,
    #[serde(default)]
    pub events: Vec<WeatherEvent>,
}

/// Per-claim batch outcome; a bad property fails only its own claim.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClaimAnalysis {
    pub claim_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<DolAnalysis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Service composing intake, scoring, and date selection.
#[derive(Debug, Clone)]
pub struct DolAnalyzer {
    engine: ScoringEngine,
    config: AnalysisConfig,
}

impl Default for DolAnalyzer {
    fn default() -> Self {
        Self::new(AnalysisConfig::default())
    }
}

impl DolAnalyzer {
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            engine: ScoringEngine::new(config.unresolved_location),
            config,
        }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Recommend a date of loss for one property.
    pub fn analyze(
        &self,
        property: &PropertyContext,
        events: &[WeatherEvent],
    ) -> Result<DolAnalysis, AnalysisError> {
        if !property.is_valid() {
            return Err(AnalysisError::InvalidProperty {
                lat: property.location.lat,
                lon: property.location.lon,
            });
        }

        let outcome = self.engine.score(events, property);
        let result = outcome.select();

        info!(
            recommended = %result.recommended_date_label(),
            confidence = result.confidence,
            scanned = result.total_events_scanned,
            quarantined = result.events_quarantined,
            "date of loss selected"
        );

        Ok(DolAnalysis {
            result,
            quarantined: outcome.quarantined,
        })
    }

    /// Analyze independent claims, in parallel when enabled. Output order follows input order.
    pub fn analyze_batch(
        &self,
        claims: &[ClaimAnalysisRequest],
    ) -> Result<Vec<ClaimAnalysis>, AnalysisError> {
        if claims.len() > self.config.max_batch_size {
            return Err(AnalysisError::BatchTooLarge {
                size: claims.len(),
                limit: self.config.max_batch_size,
            });
        }

        let results: Vec<ClaimAnalysis> = if self.config.parallel_batches {
            claims
                .par_iter()
                .map(|claim| self.analyze_claim(claim))
                .collect()
        } else {
            claims.iter().map(|claim| self.analyze_claim(claim)).collect()
        };

        Ok(results)
    }

    fn analyze_claim(&self, claim: &ClaimAnalysisRequest) -> ClaimAnalysis {
        match self.analyze(&claim.property, &claim.events) {
            Ok(analysis) => ClaimAnalysis {
                claim_id: claim.claim_id.clone(),
                analysis: Some(analysis),
                error: None,
            },
            Err(err) => ClaimAnalysis {
                claim_id: claim.claim_id.clone(),
                analysis: None,
                error: Some(err.to_string()),
            },
        }
    }
}
