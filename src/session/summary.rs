//! Per-topic "needs work" ranking
//!
//! Only the latest attempt of each question counts. A question scores 0 when
//! answered correctly without hints, 1 when correct with hints and 2 when wrong.

use std::collections::HashMap;

use crate::progress::{AttemptRecord, StoreState};

/// Aggregated statistics for one (unit, topic) group
#[derive(Debug, Clone, PartialEq)]
pub struct TopicSummary {
    pub unit: String,
    pub topic: String,
    /// Questions with any attempt record
    pub total: u32,
    /// Questions whose last attempt was correct
    pub correct: u32,
    /// Sum of last-attempt hint counts
    pub hints: u32,
    pub weakness_sum: u32,
    /// `correct / total`
    pub accuracy: f64,
    /// `weakness_sum / total`
    pub weakness_avg: f64,
}

/// Weakness of a question judged by its last attempt
pub fn weakness_score(record: &AttemptRecord) -> u32 {
    match (record.last_was_correct, record.last_hints_used) {
        (false, _) => 2,
        (true, 0) => 0,
        (true, _) => 1,
    }
}

/// Rank the topics of the given session questions, weakest first
pub fn summarize<S: AsRef<str>>(state: &StoreState, session_ids: &[S]) -> Vec<TopicSummary> {
    rank(session_ids.iter().filter_map(|id| state.get(id.as_ref())))
}

/// Rank every topic that has any recorded attempt
pub fn summarize_all(state: &StoreState) -> Vec<TopicSummary> {
    rank(state.records.values())
}

fn rank<'a>(records: impl Iterator<Item = &'a AttemptRecord>) -> Vec<TopicSummary> {
    let mut groups: Vec<TopicSummary> = Vec::new();
    let mut index: HashMap<(String, String), usize> = HashMap::new();

    for record in records {
        let key = (record.unit.clone(), record.topic.clone());
        let slot = *index.entry(key).or_insert_with(|| {
            groups.push(TopicSummary {
                unit: record.unit.clone(),
                topic: record.topic.clone(),
                total: 0,
                correct: 0,
                hints: 0,
                weakness_sum: 0,
                accuracy: 0.0,
                weakness_avg: 0.0,
            });
            groups.len() - 1
        });

        let group = &mut groups[slot];
        group.total += 1;
        if record.last_was_correct {
            group.correct += 1;
        }
        group.hints += record.last_hints_used;
        group.weakness_sum += weakness_score(record);
    }

    for group in &mut groups {
        let total = f64::from(group.total);
        group.accuracy = f64::from(group.correct) / total;
        group.weakness_avg = f64::from(group.weakness_sum) / total;
    }

    groups.sort_by(|a, b| {
        b.weakness_avg
            .total_cmp(&a.weakness_avg)
            .then_with(|| a.accuracy.total_cmp(&b.accuracy))
    });

    groups
}
