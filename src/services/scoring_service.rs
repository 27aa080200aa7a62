// src/services/scoring_service.rs
//! Questionnaire scoring and wellness-zone classification.
use crate::models::assessment::{Assessment, Question, QuestionnaireView, Zone};
use serde_json::Value;

pub const GREEN_THRESHOLD: f64 = 70.0;
pub const YELLOW_THRESHOLD: f64 = 40.0;

const DEFAULT_WEIGHTS: [u32; 4] = [0, 1, 2, 3];

const DEFAULT_PROMPTS: [&str; 20] = [
    "Little interest or pleasure in doing things",
    "Feeling down, depressed, or hopeless",
    "Trouble falling or staying asleep, or sleeping too much",
    "Feeling tired or having little energy",
    "Poor appetite or overeating",
    "Feeling bad about yourself, or that you have let others down",
    "Trouble concentrating on studies or reading",
    "Moving or speaking noticeably slower or more restlessly than usual",
    "Feeling nervous, anxious, or on edge",
    "Not being able to stop or control worrying",
    "Worrying too much about different things",
    "Trouble relaxing",
    "Being so restless that it is hard to sit still",
    "Becoming easily annoyed or irritable",
    "Feeling afraid as if something awful might happen",
    "Feeling overwhelmed by academic workload",
    "Avoiding friends, family, or social activities",
    "Feeling lonely or isolated",
    "Thoughts that you would be better off not being around",
    "Finding it hard to enjoy things you usually look forward to",
];

/// A fixed, ordered set of questions. `max_score` is derived once at
/// construction and never changes afterwards.
#[derive(Debug, Clone)]
pub struct Questionnaire {
    questions: Vec<Question>,
    max_score: u32,
}

impl Default for Questionnaire {
    fn default() -> Self {
        let questions = DEFAULT_PROMPTS
            .iter()
            .zip(1..)
            .map(|(text, id)| Question {
                id,
                text: text.to_string(),
                weights: DEFAULT_WEIGHTS.to_vec(),
            })
            .collect();
        Self::new(questions)
    }
}

impl Questionnaire {
    pub fn new(questions: Vec<Question>) -> Self {
        let max_score = questions.iter().map(Question::max_weight).sum();
        Questionnaire {
            questions,
            max_score,
        }
    }

    pub fn max_score(&self) -> u32 {
        self.max_score
    }

    pub fn view(&self) -> QuestionnaireView<'_> {
        QuestionnaireView {
            questions: &self.questions,
            max_score: self.max_score,
        }
    }

    /// Scores an answer vector of selected choice indices. Entries past the
    /// end of the slice, `None`, or out of range score zero.
    pub fn assess(&self, answers: &[Option<usize>]) -> Assessment {
        let total_score: u32 = self
            .questions
            .iter()
            .enumerate()
            .map(|(i, q)| q.weight_of(answers.get(i).copied().flatten()))
            .sum();

        let symptom_percent = if self.max_score == 0 {
            0.0
        } else {
            f64::from(total_score) / f64::from(self.max_score) * 100.0
        };
        let health_percent = 100.0 - symptom_percent;
        let zone = classify(health_percent);

        Assessment {
            total_score,
            max_score: self.max_score,
            symptom_percent,
            health_percent,
            level: zone.level(),
            zone,
            label: zone.label(),
        }
    }

    pub fn assess_json(&self, answers: &Value) -> Assessment {
        self.assess(&answer_indices(answers))
    }
}

/// Zone for a health percentage. Both thresholds are inclusive.
pub fn classify(health_percent: f64) -> Zone {
    if health_percent >= GREEN_THRESHOLD {
        Zone::Green
    } else if health_percent >= YELLOW_THRESHOLD {
        Zone::Yellow
    } else {
        Zone::Red
    }
}

/// Reads a JSON answers payload as choice indices. Anything that is not an
/// array yields an empty vector. Elements that are not whole non-negative
/// numbers (`2` and `2.0` both count) become `None`.
pub fn answer_indices(answers: &Value) -> Vec<Option<usize>> {
    match answers {
        Value::Array(items) => items.iter().map(choice_index).collect(),
        _ => Vec::new(),
    }
}

fn choice_index(v: &Value) -> Option<usize> {
    let n = match v.as_u64() {
        Some(n) => n,
        None => {
            let f = v.as_f64()?;
            if !f.is_finite() || f < 0.0 || f.fract() != 0.0 || f > u64::MAX as f64 {
                return None;
            }
            f as u64
        }
    };
    usize::try_from(n).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::assessment::WellnessLevel;
    use serde_json::json;

    #[test]
    fn default_questionnaire_has_twenty_questions_worth_sixty() {
        let q = Questionnaire::default();
        assert_eq!(q.view().questions.len(), 20);
        assert_eq!(q.max_score(), 60);
    }

    #[test]
    fn all_zero_answers_are_fully_healthy() {
        let q = Questionnaire::default();
        let a = q.assess(&vec![Some(0); 20]);
        assert_eq!(a.total_score, 0);
        assert_eq!(a.health_percent, 100.0);
        assert_eq!(a.zone, Zone::Green);
        assert_eq!(a.level, WellnessLevel::Good);
    }

    #[test]
    fn all_max_answers_are_red() {
        let q = Questionnaire::default();
        let a = q.assess(&vec![Some(3); 20]);
        assert_eq!(a.total_score, 60);
        assert_eq!(a.symptom_percent, 100.0);
        assert_eq!(a.health_percent, 0.0);
        assert_eq!(a.zone, Zone::Red);
        assert_eq!(a.level, WellnessLevel::Low);
        assert_eq!(a.label, "Needs attention");
    }

    #[test]
    fn zone_boundaries_are_inclusive() {
        assert_eq!(classify(70.0), Zone::Green);
        assert_eq!(classify(69.999), Zone::Yellow);
        assert_eq!(classify(40.0), Zone::Yellow);
        assert_eq!(classify(39.999), Zone::Red);
        assert_eq!(classify(100.0), Zone::Green);
        assert_eq!(classify(0.0), Zone::Red);
    }

    #[test]
    fn boundary_scores_on_default_questionnaire() {
        let q = Questionnaire::default();
        // 18 of 60 is 30% symptoms, exactly 70% health.
        let mut answers = vec![Some(3); 6];
        answers.extend(vec![Some(0); 14]);
        let a = q.assess(&answers);
        assert_eq!(a.total_score, 18);
        assert_eq!(a.zone, Zone::Green);

        // 36 of 60 is exactly 40% health.
        let a = q.assess(&vec![Some(3); 12]);
        assert_eq!(a.total_score, 36);
        assert_eq!(a.zone, Zone::Yellow);

        let a = q.assess(&[vec![Some(3); 12], vec![Some(1)]].concat());
        assert_eq!(a.total_score, 37);
        assert_eq!(a.zone, Zone::Red);
    }

    #[test]
    fn missing_and_out_of_range_answers_score_zero() {
        let q = Questionnaire::default();
        assert_eq!(q.assess(&[]).total_score, 0);
        assert_eq!(q.assess(&[None, Some(9), Some(2)]).total_score, 2);
        // Extra answers beyond the question list are ignored.
        assert_eq!(q.assess(&vec![Some(1); 25]).total_score, 20);
    }

    #[test]
    fn empty_questionnaire_is_degenerate_but_total() {
        let q = Questionnaire::new(Vec::new());
        let a = q.assess(&[Some(1)]);
        assert_eq!(a.max_score, 0);
        assert_eq!(a.symptom_percent, 0.0);
        assert_eq!(a.health_percent, 100.0);
        assert_eq!(a.zone, Zone::Green);
    }

    #[test]
    fn max_score_uses_the_largest_weight_per_question() {
        let q = Questionnaire::new(vec![
            Question { id: 1, text: "a".into(), weights: vec![3, 0, 1] },
            Question { id: 2, text: "b".into(), weights: vec![] },
            Question { id: 3, text: "c".into(), weights: vec![0, 5] },
        ]);
        assert_eq!(q.max_score(), 8);
        assert_eq!(q.assess(&[Some(0), Some(0), Some(1)]).total_score, 8);
    }

    #[test]
    fn json_answers_are_read_leniently() {
        let q = Questionnaire::default();
        let a = q.assess_json(&json!([3, "x", -1, 2.5, null, 3]));
        assert_eq!(a.total_score, 6);
        assert_eq!(q.assess_json(&json!({ "q1": 3 })).total_score, 0);
    }

    #[test]
    fn whole_float_answers_count_as_choices() {
        let q = Questionnaire::default();
        assert_eq!(q.assess_json(&json!([2.0, 3.0])).total_score, 5);
        assert_eq!(answer_indices(&json!([1.0, -2.0, 0.5])), vec![Some(1), None, None]);
    }
}
