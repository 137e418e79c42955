//! FIRESIGHT - Narrative Generators
//!
//! Three staged narrative payloads attached to every analysis result.
//! Pure string templates over the computed signals; the pipeline treats
//! them as opaque text.

use crate::classifier::RiskTier;
use crate::features::ColorVector;
use crate::pipeline::AnalysisInput;

/// Stage 1 - risk forecast briefing for the downstream reasoning model
pub fn forecast_prompt(
    input: &AnalysisInput,
    brightness: f64,
    voltage_ratio: f64,
    score: f64,
    color: &ColorVector,
    months: u32,
) -> String {
    format!(
        "STAGE 1 - SIMULATED FIRE RISK FORECAST\n\
         Forecast horizon: {months} months\n\
         Risk signature score: {score:.5}\n\
         Hue distribution: {color:?}\n\
         \n\
         System: {appliance}\n\
         Zone: {room}\n\
         Burn smell: {smell:?}\n\
         Voltage ratio: {voltage_ratio:.4}\n\
         Light intensity: {brightness:.4}\n\
         \n\
         Forecast thermal stress, arcing emergence and material degradation \
         over a {months}-month horizon. Escalate if the score exceeds 0.5 and \
         symptoms include burning or panel instability. Treat brightness below \
         0.3 as internal overheat. Treat a voltage ratio below 0.75 as high \
         strain failure within 12-24 months.",
        months = months,
        score = score,
        color = color.as_slice(),
        appliance = input.appliance,
        room = input.room,
        smell = input.burn_smell,
        voltage_ratio = voltage_ratio,
        brightness = brightness,
    )
}

/// Stage 2 - mitigation planning guidance
pub fn mitigation_prompt(tier: RiskTier, score: f64) -> String {
    format!(
        "STAGE 2 - MITIGATION PLANNING\n\
         Risk tier: {tier}\n\
         Risk signature score: {score:.4}\n\
         \n\
         Guidelines:\n\
         - Electrical: shut breaker, isolate device, certified inspection\n\
         - Overheat: stop use, inspect airflow and wiring\n\
         - Structural: panel securement, thermal dampening\n\
         - Low: monitor monthly"
    )
}

/// Stage 3 - public safety alert
pub fn public_alert_prompt(tier: RiskTier, score: f64, months: u32) -> String {
    format!(
        "STAGE 3 - PUBLIC SAFETY ALERT\n\
         FIRESIGHT has analyzed your system and identified a {tier} tier risk \
         with a signature score of {score:.4} projected {months} months forward.\n\
         \n\
         We recommend immediate safety steps to ensure this does not become a \
         fire hazard. Stay safe."
    )
}
