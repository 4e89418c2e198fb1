use crate::quiz::answer;
use crate::quiz::question::{QuestionBank, QuestionRecord};
use crate::store::schema::Stats;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CursorState {
    NoSubjectSelected,
    SubjectSelectedWithQuestions,
    SubjectSelectedEmpty,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CheckOutcome {
    /// No question is displayed.
    NoQuestion,
    /// Blank input; stats untouched.
    EmptyInput,
    Correct,
    Incorrect {
        expected: String,
        explanation: Option<String>,
    },
}

impl CheckOutcome {
    /// True when the check touched the stats counters.
    pub fn counted(&self) -> bool {
        matches!(self, CheckOutcome::Correct | CheckOutcome::Incorrect { .. })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Revealed {
    pub answer: String,
    pub explanation: Option<String>,
}

/// Which subject and which question inside it is on screen.
///
/// The cursor never owns questions; every call borrows the bank so a fresh
/// ingestion can swap the bank underneath it (see [`QuizSession::rebind`]).
#[derive(Clone, Debug, Default)]
pub struct QuizSession {
    subject: Option<String>,
    index: usize,
}

impl QuizSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subject(&self) -> Option<&str> {
        self.subject.as_deref()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    fn questions<'a>(&self, bank: &'a QuestionBank) -> &'a [QuestionRecord] {
        self.subject
            .as_deref()
            .and_then(|s| bank.get(s))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn state(&self, bank: &QuestionBank) -> CursorState {
        match self.subject {
            None => CursorState::NoSubjectSelected,
            Some(_) if self.questions(bank).is_empty() => CursorState::SubjectSelectedEmpty,
            Some(_) => CursorState::SubjectSelectedWithQuestions,
        }
    }

    pub fn select_subject(&mut self, bank: &QuestionBank, subject: &str) -> CursorState {
        self.subject = Some(subject.to_string());
        self.index = 0;
        self.state(bank)
    }

    /// Step to the next question, wrapping to the first after the last.
    pub fn advance(&mut self, bank: &QuestionBank) {
        let len = self.questions(bank).len();
        if len > 0 {
            self.index = (self.index + 1) % len;
        }
    }

    pub fn current<'a>(&self, bank: &'a QuestionBank) -> Option<&'a QuestionRecord> {
        self.questions(bank).get(self.index)
    }

    pub fn question_total(&self, bank: &QuestionBank) -> usize {
        self.questions(bank).len()
    }

    /// Keep the subject across a bank swap; an index past the new end wraps to 0.
    pub fn rebind(&mut self, bank: &QuestionBank) {
        if self.index >= self.questions(bank).len() {
            self.index = 0;
        }
    }

    pub fn check_answer(
        &self,
        bank: &QuestionBank,
        stats: &mut Stats,
        input: &str,
    ) -> CheckOutcome {
        let (Some(subject), Some(question)) = (self.subject.as_deref(), self.current(bank)) else {
            return CheckOutcome::NoQuestion;
        };
        if input.trim().is_empty() {
            return CheckOutcome::EmptyInput;
        }

        let correct = answer::answers_match(input, &question.answer);
        stats.record_attempt(subject, correct);

        if correct {
            CheckOutcome::Correct
        } else {
            CheckOutcome::Incorrect {
                expected: question.answer.trim().to_string(),
                explanation: question.explanation().map(str::to_string),
            }
        }
    }

    pub fn reveal(&self, bank: &QuestionBank) -> Option<Revealed> {
        self.current(bank).map(|q| Revealed {
            answer: q.answer.clone(),
            explanation: q.explanation().map(str::to_string),
        })
    }
}
