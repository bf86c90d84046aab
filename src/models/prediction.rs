use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use uuid::Uuid;

/// One delay-risk assessment for one shipment, produced by a batch run.
/// History is append-only; the newest record per shipment is authoritative.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    /// Unique identifier
    pub id: Uuid,

    /// Shipment this assessment applies to
    pub shipment_id: Uuid,

    /// Token grouping every prediction produced by one batch execution
    pub run_id: String,

    /// Classifier's P(arrives more than 12 h late), in [0, 1]
    pub delay_probability: f64,

    /// Predicted delay magnitude in hours
    pub predicted_delay_hours: f64,

    /// Coarse risk bucket derived from the probability
    pub risk_tier: RiskTier,

    /// Ordered, human-readable contributing factors
    pub risk_factors: String,

    /// Generation timestamp
    pub generated_at: DateTime<Utc>,
}

/// Coarse risk bucket derived from the delay probability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_tier_display() {
        assert_eq!(RiskTier::Low.to_string(), "low");
        assert_eq!(RiskTier::Medium.to_string(), "medium");
        assert_eq!(RiskTier::High.to_string(), "high");
    }

    #[test]
    fn test_prediction_serde_round_trip() {
        let prediction = Prediction {
            id: Uuid::new_v4(),
            shipment_id: Uuid::new_v4(),
            run_id: "a1b2c3d4".to_string(),
            delay_probability: 0.62,
            predicted_delay_hours: 29.76,
            risk_tier: RiskTier::Medium,
            risk_factors: "Port congestion: high".to_string(),
            generated_at: Utc::now(),
        };

        let json = serde_json::to_string(&prediction).unwrap();
        let back: Prediction = serde_json::from_str(&json).unwrap();
        assert_eq!(back.run_id, prediction.run_id);
        assert_eq!(back.risk_tier, RiskTier::Medium);
    }
}
