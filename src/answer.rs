use std::collections::BTreeMap;

use crate::questions::{ScaleId, QUESTIONS};
use crate::score::ScoreResult;
use crate::Error;

/// Answers collected so far, one slot per question in asking order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerStore {
    values: Vec<Option<u8>>,
    offset: usize,
}

impl Default for AnswerStore {
    fn default() -> Self {
        Self {
            values: vec![None; QUESTIONS.len()],
            offset: 0,
        }
    }
}

impl AnswerStore {
    /// Stores the answer to the next question in asking order.
    pub fn push(&mut self, value: u8) -> Result<(), Error> {
        let question = QUESTIONS
            .get(self.offset)
            .ok_or(Error::UnknownQuestion(self.offset as u32 + 1))?;
        if !question.kind.accepts(value) {
            return Err(Error::InvalidAnswerValue {
                question: question.id,
                value,
            });
        }
        self.values[self.offset] = Some(value);
        self.offset += 1;
        Ok(())
    }

    /// Stores the answer to question `question_id`.
    pub fn insert(&mut self, question_id: u32, value: u8) -> Result<(), Error> {
        let index = QUESTIONS
            .index_of(question_id)
            .ok_or(Error::UnknownQuestion(question_id))?;
        let question = QUESTIONS
            .get(index)
            .ok_or(Error::UnknownQuestion(question_id))?;
        if !question.kind.accepts(value) {
            return Err(Error::InvalidAnswerValue {
                question: question_id,
                value,
            });
        }
        self.values[index] = Some(value);
        Ok(())
    }

    pub fn clear(&mut self, question_id: u32) -> Result<(), Error> {
        let index = QUESTIONS
            .index_of(question_id)
            .ok_or(Error::UnknownQuestion(question_id))?;
        self.values[index] = None;
        Ok(())
    }

    pub fn get(&self, question_id: u32) -> Option<u8> {
        QUESTIONS
            .index_of(question_id)
            .and_then(|index| self.values[index])
    }

    /// Ids of the questions still unanswered.
    pub fn missing(&self) -> Vec<u32> {
        QUESTIONS
            .questions()
            .iter()
            .zip(&self.values)
            .filter(|(_, value)| value.is_none())
            .map(|(question, _)| question.id)
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.values.iter().all(Option::is_some)
    }

    pub fn answered(&self) -> usize {
        self.values.iter().filter(|value| value.is_some()).count()
    }

    /// Scores every scale.
    ///
    /// PSS-10 items 4, 5, 7 and 8 are worded positively and scored in
    /// reverse (0⇒4 … 4⇒0). A life event that happened scores its
    /// Holmes-Rahe points. Economic items score the chosen option's value, so a
    /// high economic score means high security.
    pub fn to_score_result(&self) -> Result<ScoreResult, Error> {
        let missing = self.missing();
        if !missing.is_empty() {
            return Err(Error::IncompleteInput { missing });
        }

        let mut sums: BTreeMap<ScaleId, u32> = BTreeMap::new();
        let mut factors = BTreeMap::new();
        for scale in &QUESTIONS.scales {
            for question in &scale.questions {
                let value = self.get(question.id).ok_or(Error::IncompleteInput {
                    missing: vec![question.id],
                })?;
                let score = question
                    .kind
                    .score(value)
                    .ok_or(Error::InvalidAnswerValue {
                        question: question.id,
                        value,
                    })?;
                *sums.entry(scale.id).or_default() += score;
                if let Some(factor) = question.factor {
                    factors.insert(factor, score as u8);
                }
            }
        }

        Ok(ScoreResult::new(
            sums.get(&ScaleId::Pss).copied().unwrap_or(0) as u8,
            sums.get(&ScaleId::LifeEvents).copied().unwrap_or(0),
            sums.get(&ScaleId::Economic).copied().unwrap_or(0) as u8,
            factors,
        ))
    }

    /// Sample answers describing someone under heavy economic pressure.
    pub fn demo() -> Result<Self, Error> {
        let mut store = AnswerStore::default();
        // PSS-10: "fairly often" on stress items, "almost never" on coping items
        for id in 1..=10 {
            let value = if matches!(id, 4 | 5 | 7 | 8) { 1 } else { 3 };
            store.insert(id, value)?;
        }
        // job loss, change in financial state, large mortgage, living conditions
        for id in 11..=53 {
            store.insert(id, u8::from(matches!(id, 18 | 26 | 30 | 38)))?;
        }
        // struggling, no emergency fund, temporary housing, burdensome
        // healthcare, uncertain job, overwhelming debt
        for (id, option) in [(54, 1), (55, 0), (56, 1), (57, 1), (58, 1), (59, 0)] {
            store.insert(id, option)?;
        }
        match store.missing() {
            missing if missing.is_empty() => Ok(store),
            missing => Err(Error::IncompleteInput { missing }),
        }
    }
}
