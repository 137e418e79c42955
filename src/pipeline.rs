//! FIRESIGHT - Analysis Pipeline
//!
//! End-to-end orchestration: feature extraction, scoring, classification,
//! narrative assembly, audit persistence. Computation stages fail fast;
//! audit persistence is best-effort relative to delivering the result.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::audit::AuditLog;
use crate::classifier::{voltage_ratio, BurnSmell, RiskClassifier, RiskTier};
use crate::error::{FireError, FireResult};
use crate::features::{ColorVector, FeatureExtractor};
use crate::prompts;
use crate::scorer::RiskScorer;

/// Caller-supplied analysis request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisInput {
    pub address: String,
    pub room: String,
    pub appliance: String,
    pub burn_smell: BurnSmell,
    pub symptoms: String,
    /// Measured voltages; first reading is the reference divisor
    pub voltages: Vec<f64>,
    /// Appliance photo (drives brightness)
    pub photo: PathBuf,
    /// Surrounding-area photo (drives the color vector)
    pub area: PathBuf,
    /// Forecast horizon in months, at least 1
    pub forecast_months: u32,
}

impl AnalysisInput {
    /// Reject malformed input before any pipeline stage runs
    pub fn validate(&self) -> FireResult<()> {
        if self.forecast_months == 0 {
            return Err(FireError::InvalidInput(
                "forecast horizon must be at least 1 month".into(),
            ));
        }
        if let Some(&first) = self.voltages.first() {
            if first == 0.0 {
                return Err(FireError::InvalidInput(
                    "first voltage reading is zero".into(),
                ));
            }
        }
        Ok(())
    }
}

/// The three narrative payloads attached to a result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NarrativeSet {
    pub forecast: String,
    pub mitigation: String,
    pub public_alert: String,
}

/// One completed analysis. Immutable once assembled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub tier: RiskTier,
    pub score: f64,
    pub brightness: f64,
    pub voltage_ratio: f64,
    pub color_vector: ColorVector,
    pub forecast_months: u32,
    pub prompts: NarrativeSet,
    pub input: AnalysisInput,
}

/// Pipeline outcome: the computed result plus the audit persistence
/// status. An audit failure never revokes the result.
#[derive(Debug)]
pub struct AnalysisOutcome {
    pub result: AnalysisResult,
    /// Audit row id on success, the persistence error otherwise
    pub audit: Result<i64, FireError>,
}

impl AnalysisOutcome {
    pub fn persisted(&self) -> bool {
        self.audit.is_ok()
    }
}

/// End-to-end analysis pipeline
pub struct AnalysisPipeline {
    audit: AuditLog,
}

impl AnalysisPipeline {
    pub fn new(audit: AuditLog) -> Self {
        Self { audit }
    }

    /// Run one full analysis.
    ///
    /// Any extraction, scoring or classification failure aborts the call
    /// with no partial result. Audit persistence failure is captured in
    /// the outcome and reported, never silently dropped.
    pub fn run(&self, input: AnalysisInput) -> FireResult<AnalysisOutcome> {
        input.validate()?;

        let features = FeatureExtractor::extract(&input.photo, &input.area)?;
        let ratio = voltage_ratio(&input.voltages)?;
        let score = RiskScorer::score(&features.color_vector);

        let tier = RiskClassifier::classify(
            &input.symptoms,
            input.burn_smell,
            features.brightness,
            ratio,
        );

        let prompts = NarrativeSet {
            forecast: prompts::forecast_prompt(
                &input,
                features.brightness,
                ratio,
                score,
                &features.color_vector,
                input.forecast_months,
            ),
            mitigation: prompts::mitigation_prompt(tier, score),
            public_alert: prompts::public_alert_prompt(tier, score, input.forecast_months),
        };

        let result = AnalysisResult {
            tier,
            score,
            brightness: features.brightness,
            voltage_ratio: ratio,
            color_vector: features.color_vector,
            forecast_months: input.forecast_months,
            prompts,
            input,
        };

        info!(%tier, score, brightness = result.brightness, "analysis complete");

        let audit = self.audit.append(&result);
        if let Err(ref e) = audit {
            error!("audit persistence failed: {e}");
        }

        Ok(AnalysisOutcome { result, audit })
    }

    /// Access the underlying audit log
    pub fn audit_log(&self) -> &AuditLog {
        &self.audit
    }
}
