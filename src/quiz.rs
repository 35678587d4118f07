//! Per-visitor quiz state machine.
//!
//! `NotStarted` is the absence of a `QuizSession` in the visitor's slot.
//! `start` enters `InProgress`; answering walks the index forward; running
//! out of questions moves the session to `Completed`, which is terminal. A
//! completed session keeps the question count it finished with, so questions
//! appended later never reopen it or change its score.

use tracing::{debug, instrument};

use crate::bank::QuestionBank;
use crate::domain::{percent, AnswerLetter, Question, QuizResult};
use crate::error::QuizError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    InProgress,
    Completed { total: usize, recorded: bool },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizSession {
    student_name: String,
    current_index: usize,
    score: usize,
    phase: Phase,
}

/// What the visitor should see next.
#[derive(Debug, PartialEq, Eq)]
pub enum Step<'a> {
    Question {
        number: usize,
        total: usize,
        question: &'a Question,
    },
    Finished,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Submission {
    Correct,
    Incorrect,
    Ignored,
}

/// Result of a results view. `first_view` is true exactly once per completion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Outcome {
    pub result: QuizResult,
    pub first_view: bool,
}

impl QuizSession {
    pub fn start(name: &str) -> Result<Self, QuizError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(QuizError::validation("Please enter your name."));
        }
        Ok(Self {
            student_name: name.to_string(),
            current_index: 0,
            score: 0,
            phase: Phase::InProgress,
        })
    }

    pub fn student_name(&self) -> &str {
        &self.student_name
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn is_completed(&self) -> bool {
        matches!(self.phase, Phase::Completed { .. })
    }

    /// The question to show, or the transition to `Completed` when the bank
    /// is exhausted.
    pub fn current_question<'a>(&mut self, bank: &'a QuestionBank) -> Step<'a> {
        if self.is_completed() {
            return Step::Finished;
        }
        match bank.get(self.current_index) {
            Some(question) => Step::Question {
                number: self.current_index + 1,
                total: bank.len(),
                question,
            },
            None => {
                self.complete(bank);
                Step::Finished
            }
        }
    }

    /// Grade `letter` against the current question and advance.
    ///
    /// Blank letters, completed sessions and out-of-range indices are
    /// silently ignored. Any other non-blank letter counts, right or wrong.
    #[instrument(level = "debug", skip(self, bank), fields(index = self.current_index))]
    pub fn submit_answer(&mut self, bank: &QuestionBank, letter: &str) -> Submission {
        let letter = letter.trim();
        if letter.is_empty() || self.is_completed() {
            return Submission::Ignored;
        }
        let Some(question) = bank.get(self.current_index) else {
            return Submission::Ignored;
        };

        let outcome = if AnswerLetter::parse(letter) == Some(question.correct) {
            self.score += 1;
            Submission::Correct
        } else {
            Submission::Incorrect
        };
        self.current_index += 1;
        debug!(target: "quiz", index = self.current_index, score = self.score, ?outcome, "Answer graded");
        outcome
    }

    /// Final score. Completes the session if it was still in progress.
    pub fn compute_result(&mut self, bank: &QuestionBank) -> Outcome {
        let (total, first_view) = match self.phase {
            Phase::Completed { total, recorded } => (total, !recorded),
            Phase::InProgress => (bank.len(), true),
        };
        self.phase = Phase::Completed { total, recorded: true };
        Outcome {
            result: QuizResult {
                name: self.student_name.clone(),
                percent: percent(self.score, total),
                correct: self.score,
                total,
            },
            first_view,
        }
    }

    /// Enter `Completed`, freezing the question count.
    fn complete(&mut self, bank: &QuestionBank) {
        if self.phase == Phase::InProgress {
            self.phase = Phase::Completed { total: bank.len(), recorded: false };
        }
    }
}
