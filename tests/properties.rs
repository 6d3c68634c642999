use std::collections::BTreeMap;

use moodstone::visual::{CALM_JITTER, MAX_JITTER};
use moodstone::{
    AnswerStore, Error, QuestionKind, ScaleId, ScoreResult, VisualParameters, QUESTIONS,
};
use proptest::prelude::*;

/// Folds arbitrary bytes onto each question's accepted answers.
fn store_from(raw: &[u8]) -> AnswerStore {
    let mut store = AnswerStore::default();
    for (question, byte) in QUESTIONS.questions().into_iter().zip(raw) {
        let (min, max) = match &question.kind {
            QuestionKind::Scaled { min, max, .. } | QuestionKind::Numeric { min, max, .. } => {
                (*min, *max)
            }
            QuestionKind::SingleChoice { options } => (0, options.len() as u8 - 1),
        };
        let value = min + byte % (max - min + 1);
        store.insert(question.id, value).unwrap();
    }
    store
}

fn raw_answers() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), QUESTIONS.len())
}

proptest! {
    #[test]
    fn sub_scores_stay_in_range(raw in raw_answers()) {
        let score = store_from(&raw).to_score_result().unwrap();
        prop_assert!(ScaleId::Pss.range().contains(u32::from(score.pss)));
        prop_assert!(ScaleId::LifeEvents.range().contains(score.life_events));
        prop_assert!(ScaleId::Economic.range().contains(u32::from(score.economic)));
        prop_assert!((0.0..=100.0).contains(&score.aggregate));
    }

    #[test]
    fn scoring_is_deterministic(raw in raw_answers()) {
        let a = store_from(&raw).to_score_result().unwrap();
        let b = store_from(&raw).to_score_result().unwrap();
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(VisualParameters::from_score(&a), VisualParameters::from_score(&b));
    }

    #[test]
    fn one_missing_item_is_incomplete(raw in raw_answers(), skip in 1u32..=59) {
        let mut store = store_from(&raw);
        store.clear(skip).unwrap();
        match store.to_score_result() {
            Err(Error::IncompleteInput { missing }) => prop_assert_eq!(missing, vec![skip]),
            other => prop_assert!(false, "expected IncompleteInput, got {:?}", other),
        }
    }

    #[test]
    fn chaos_grows_with_aggregate(
        a in (0u8..=40, 0u32..=400, 0u8..=30),
        b in (0u8..=40, 0u32..=400, 0u8..=30),
    ) {
        let first = ScoreResult::new(a.0, a.1, a.2, BTreeMap::new());
        let second = ScoreResult::new(b.0, b.1, b.2, BTreeMap::new());
        let (low, high) = if first.aggregate <= second.aggregate {
            (first, second)
        } else {
            (second, first)
        };
        let low = VisualParameters::from_score(&low);
        let high = VisualParameters::from_score(&high);
        prop_assert!(low.jitter <= high.jitter);
        prop_assert!((CALM_JITTER..=MAX_JITTER).contains(&high.jitter));
    }
}

#[test]
fn minimum_score_is_calm() {
    let mut store = AnswerStore::default();
    for question in QUESTIONS.questions() {
        // lowest stress answer for each item
        let value = match &question.kind {
            QuestionKind::Scaled { min, max, reverse, .. } => {
                if *reverse {
                    *max
                } else {
                    *min
                }
            }
            QuestionKind::Numeric { min, .. } => *min,
            QuestionKind::SingleChoice { options } => options.len() as u8 - 1,
        };
        store.insert(question.id, value).unwrap();
    }
    let score = store.to_score_result().unwrap();
    assert_eq!(score.aggregate, 0.0);
    assert_eq!(VisualParameters::from_score(&score), VisualParameters::calm());
}

#[test]
fn maximum_score_hits_max_jitter() {
    let mut store = AnswerStore::default();
    for question in QUESTIONS.questions() {
        let value = match &question.kind {
            QuestionKind::Scaled { min, max, reverse, .. } => {
                if *reverse {
                    *min
                } else {
                    *max
                }
            }
            QuestionKind::Numeric { max, .. } => *max,
            QuestionKind::SingleChoice { .. } => 0,
        };
        store.insert(question.id, value).unwrap();
    }
    let score = store.to_score_result().unwrap();
    assert_eq!(score.aggregate, 100.0);
    assert_eq!(VisualParameters::from_score(&score).jitter, MAX_JITTER);
}
