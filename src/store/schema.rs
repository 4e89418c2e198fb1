use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::quiz::subject::ALL_SUBJECTS;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubjectStats {
    pub attempts: u64,
    pub correct: u64,
}

impl SubjectStats {
    pub fn accuracy(&self) -> f64 {
        if self.attempts == 0 {
            return 0.0;
        }
        self.correct as f64 / self.attempts as f64 * 100.0
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Stats {
    pub total_attempts: u64,
    pub correct_answers: u64,
    pub subjects: BTreeMap<String, SubjectStats>,
    pub variants_completed: u64,
    pub best_score: u64,
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            total_attempts: 0,
            correct_answers: 0,
            subjects: ALL_SUBJECTS
                .iter()
                .map(|s| (s.key().to_string(), SubjectStats::default()))
                .collect(),
            variants_completed: 0,
            best_score: 0,
        }
    }
}

impl Stats {
    /// Overall accuracy in percent, `None` before the first attempt.
    pub fn accuracy(&self) -> Option<f64> {
        if self.total_attempts == 0 {
            return None;
        }
        Some(self.correct_answers as f64 / self.total_attempts as f64 * 100.0)
    }

    pub fn record_attempt(&mut self, subject: &str, correct: bool) {
        self.total_attempts = self.total_attempts.saturating_add(1);
        let entry = self.subjects.entry(subject.to_string()).or_default();
        entry.attempts = entry.attempts.saturating_add(1);
        if correct {
            self.correct_answers = self.correct_answers.saturating_add(1);
            entry.correct = entry.correct.saturating_add(1);
        }
    }

    pub fn record_variant_finished(&mut self) {
        self.variants_completed = self.variants_completed.saturating_add(1);
    }
}
