mod config;
mod rules;

pub use config::{CategoryField, CategoryRule, KeywordMatch, ScoringConfig};

use super::domain::{EmployeeAttributes, RiskLevel};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Stateless scorer applying the weighted-sum absence model to attributes.
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    config: ScoringConfig,
}

impl ScoringEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    /// Predict monthly absence hours, drawing the uncertainty term from `rng`.
    pub fn predict<R: Rng + ?Sized>(&self, attributes: &EmployeeAttributes, rng: &mut R) -> Prediction {
        let spread = self.config.jitter_spread;
        let jitter = if spread > 0.0 {
            rng.gen_range(-spread..spread)
        } else {
            0.0
        };
        self.predict_with_jitter(attributes, jitter)
    }

    /// Deterministic variant with the uncertainty term supplied by the caller.
    pub fn predict_with_jitter(&self, attributes: &EmployeeAttributes, jitter: f64) -> Prediction {
        let (mut components, total) = rules::score_attributes(attributes, &self.config);
        components.push(ScoreComponent {
            factor: ScoreFactor::Jitter,
            adjustment: jitter,
            notes: "model uncertainty".to_string(),
        });

        let raw_hours = total + jitter;
        let hours = raw_hours.clamp(self.config.min_hours, self.config.max_hours);
        let risk_level = RiskLevel::from_hours(hours);

        debug!(
            age = attributes.age,
            service_length = attributes.service_length,
            raw_hours,
            hours,
            risk = risk_level.label(),
            "scored absence prediction"
        );

        Prediction {
            hours,
            raw_hours,
            jitter,
            risk_level,
            components,
        }
    }
}

/// Named contribution to a prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreFactor {
    Base,
    Age,
    ServiceLength,
    ServicePerAge,
    Category(CategoryField),
    Jitter,
}

/// Discrete contribution to a prediction, allowing transparent audits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub factor: ScoreFactor,
    pub adjustment: f64,
    pub notes: String,
}

/// Bounded prediction plus the trail of adjustments that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub hours: f64,
    pub raw_hours: f64,
    pub jitter: f64,
    pub risk_level: RiskLevel,
    pub components: Vec<ScoreComponent>,
}
