// src/models/assessment.rs
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize)]
pub struct Question {
    pub id: u32,
    pub text: String,
    /// Severity weight of each answer choice, in display order.
    pub weights: Vec<u32>,
}

impl Question {
    pub fn max_weight(&self) -> u32 {
        self.weights.iter().copied().max().unwrap_or(0)
    }

    /// Weight of the selected choice; unknown choices count as zero severity.
    pub fn weight_of(&self, choice: Option<usize>) -> u32 {
        choice
            .and_then(|i| self.weights.get(i))
            .copied()
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Zone {
    Green,
    Yellow,
    Red,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WellnessLevel {
    Good,
    Medium,
    Low,
}

impl Zone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Zone::Green => "green",
            Zone::Yellow => "yellow",
            Zone::Red => "red",
        }
    }

    pub fn level(&self) -> WellnessLevel {
        match self {
            Zone::Green => WellnessLevel::Good,
            Zone::Yellow => WellnessLevel::Medium,
            Zone::Red => WellnessLevel::Low,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Zone::Green => "Healthy",
            Zone::Yellow => "Moderate",
            Zone::Red => "Needs attention",
        }
    }
}

/// Outcome of scoring one answer vector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    pub total_score: u32,
    pub max_score: u32,
    pub symptom_percent: f64,
    pub health_percent: f64,
    pub level: WellnessLevel,
    pub zone: Zone,
    pub label: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    #[serde(default)]
    pub answers: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct QuestionnaireView<'a> {
    pub questions: &'a [Question],
    pub max_score: u32,
}
