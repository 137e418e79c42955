//! FIRESIGHT - Risk Classifier
//!
//! Ordered decision list over the extracted signals. First matching
//! rule wins; rule order is part of the contract.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{FireError, FireResult};

/// Reported burn smell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BurnSmell {
    Yes,
    No,
}

/// Discrete risk classification outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskTier {
    Electrical,
    Overheat,
    Structural,
    Low,
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RiskTier::Electrical => "Electrical",
            RiskTier::Overheat => "Overheat",
            RiskTier::Structural => "Structural",
            RiskTier::Low => "Low",
        };
        write!(f, "{name}")
    }
}

/// Rule-based risk classifier
pub struct RiskClassifier;

impl RiskClassifier {
    /// Classify one analysis. Rules are evaluated top to bottom:
    ///
    /// 1. burn symptom or reported burn smell   -> Electrical
    /// 2. brightness below 0.3                  -> Overheat
    /// 3. voltage ratio below 0.75              -> Electrical
    /// 4. panel/loose symptom                   -> Structural
    /// 5. otherwise                             -> Low
    pub fn classify(
        symptoms: &str,
        burn_smell: BurnSmell,
        brightness: f64,
        voltage_ratio: f64,
    ) -> RiskTier {
        let symptoms = symptoms.to_lowercase();

        if symptoms.contains("burn") || burn_smell == BurnSmell::Yes {
            RiskTier::Electrical
        } else if brightness < 0.3 {
            RiskTier::Overheat
        } else if voltage_ratio < 0.75 {
            RiskTier::Electrical
        } else if symptoms.contains("panel") || symptoms.contains("loose") {
            RiskTier::Structural
        } else {
            RiskTier::Low
        }
    }
}

/// Worst-case sag of the voltage readings relative to the first one:
/// `min(v / voltages[0])`, or 1.0 when no readings were supplied.
pub fn voltage_ratio(voltages: &[f64]) -> FireResult<f64> {
    let Some(&first) = voltages.first() else {
        return Ok(1.0);
    };

    if first == 0.0 {
        return Err(FireError::InvalidInput(
            "first voltage reading is zero".into(),
        ));
    }

    Ok(voltages
        .iter()
        .map(|v| v / first)
        .fold(f64::INFINITY, f64::min))
}
