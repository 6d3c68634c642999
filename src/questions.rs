use once_cell::sync::Lazy;
use serde::Deserialize;

/// The question bank shipped with the binary.
pub static QUESTIONS: Lazy<Questionnaire> = Lazy::new(|| {
    serde_json::from_str(include_str!("../resources/questionnaire.json"))
        .expect("embedded questionnaire must be valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleId {
    /// Perceived Stress Scale, 10 items
    Pss,
    /// Holmes-Rahe social readjustment rating
    LifeEvents,
    Economic,
}

impl ScaleId {
    /// Documented numeric range of the scale, derived from the question bank.
    pub fn range(self) -> ScaleRange {
        QUESTIONS
            .scale(self)
            .map(Scale::range)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EconomicFactor {
    FinancialSecurity,
    EmergencyPreparedness,
    HousingStability,
    HealthcareBurden,
    EmploymentSecurity,
    DebtStress,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScaleRange {
    pub min: u32,
    pub max: u32,
}

impl ScaleRange {
    pub fn contains(&self, score: u32) -> bool {
        (self.min..=self.max).contains(&score)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    pub label: String,
    pub value: u8,
}

/// How a question is asked and how its answer is scored.
///
/// The stored answer is always a `u8`, read as an option index for
/// `SingleChoice`, a Likert value for `Scaled` and a multiplier of `weight`
/// for `Numeric`. Life events are `Numeric` over 0..=1: the event happened
/// or it did not.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuestionKind {
    Scaled {
        min: u8,
        max: u8,
        /// Item is worded positively, so a low answer means high stress.
        #[serde(default)]
        reverse: bool,
        #[serde(default)]
        labels: Vec<String>,
    },
    SingleChoice {
        options: Vec<Choice>,
    },
    Numeric {
        min: u8,
        max: u8,
        /// Points awarded per unit of the answer.
        weight: u32,
        #[serde(default)]
        labels: Vec<String>,
    },
}

impl QuestionKind {
    pub fn accepts(&self, answer: u8) -> bool {
        match self {
            QuestionKind::Scaled { min, max, .. } | QuestionKind::Numeric { min, max, .. } => {
                (*min..=*max).contains(&answer)
            }
            QuestionKind::SingleChoice { options } => usize::from(answer) < options.len(),
        }
    }

    /// Item score for `answer`, or `None` when the answer is out of range.
    pub fn score(&self, answer: u8) -> Option<u32> {
        if !self.accepts(answer) {
            return None;
        }
        let score = match self {
            QuestionKind::Scaled {
                min, max, reverse, ..
            } => {
                if *reverse {
                    u32::from(max - answer + min)
                } else {
                    u32::from(answer)
                }
            }
            QuestionKind::SingleChoice { options } => u32::from(options[usize::from(answer)].value),
            QuestionKind::Numeric { weight, .. } => u32::from(answer) * weight,
        };
        Some(score)
    }

    /// Lowest and highest item score this question can contribute.
    pub fn score_range(&self) -> ScaleRange {
        match self {
            QuestionKind::Scaled { min, max, .. } => ScaleRange {
                min: u32::from(*min),
                max: u32::from(*max),
            },
            QuestionKind::SingleChoice { options } => ScaleRange {
                min: options.iter().map(|o| u32::from(o.value)).min().unwrap_or(0),
                max: options.iter().map(|o| u32::from(o.value)).max().unwrap_or(0),
            },
            QuestionKind::Numeric {
                min, max, weight, ..
            } => ScaleRange {
                min: u32::from(*min) * weight,
                max: u32::from(*max) * weight,
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Question {
    pub id: u32,
    pub text: String,
    pub kind: QuestionKind,
    /// Set on economic items so individual factors can be inspected.
    #[serde(default)]
    pub factor: Option<EconomicFactor>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Scale {
    pub id: ScaleId,
    pub title: String,
    /// Shown above the scale's questions.
    pub instructions: String,
    pub questions: Vec<Question>,
}

impl Scale {
    pub fn range(&self) -> ScaleRange {
        self.questions
            .iter()
            .map(|q| q.kind.score_range())
            .fold(ScaleRange::default(), |acc, r| ScaleRange {
                min: acc.min + r.min,
                max: acc.max + r.max,
            })
    }
}

/// Master representation of the assessment: PSS-10, life events and
/// economic pressure, in the order they are asked.
#[derive(Debug, Deserialize)]
pub struct Questionnaire {
    pub scales: Vec<Scale>,
}

impl Questionnaire {
    fn iter(&self) -> impl Iterator<Item = &Question> {
        self.scales.iter().flat_map(|scale| scale.questions.iter())
    }

    /// Question at position `index` in asking order.
    pub fn get(&self, index: usize) -> Option<&Question> {
        self.iter().nth(index)
    }

    /// Question by its 1-based id.
    pub fn question(&self, id: u32) -> Option<&Question> {
        self.iter().find(|question| question.id == id)
    }

    pub fn questions(&self) -> Vec<&Question> {
        self.iter().collect()
    }

    pub fn scale(&self, id: ScaleId) -> Option<&Scale> {
        self.scales.iter().find(|scale| scale.id == id)
    }

    pub fn scale_of(&self, question_id: u32) -> Option<ScaleId> {
        self.scales
            .iter()
            .find(|scale| scale.questions.iter().any(|q| q.id == question_id))
            .map(|scale| scale.id)
    }

    pub fn index_of(&self, question_id: u32) -> Option<usize> {
        self.iter().position(|question| question.id == question_id)
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
