//! The question bank: an ordered, append-only list of questions.
//!
//! Insertion order is quiz order. The bank never edits or removes entries, so
//! an index handed out to a running quiz stays valid for the process lifetime.

use tracing::{debug, instrument};

use crate::domain::{AnswerLetter, Question};
use crate::error::QuizError;
use crate::seeds::seed_questions;

#[derive(Clone, Debug, Default)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seeds() -> Self {
        Self { questions: seed_questions() }
    }

    /// Validate and push a question to the end of the bank.
    ///
    /// Rejects a blank question text, any blank option, or an answer outside
    /// A-D. The bank is untouched on rejection.
    #[instrument(level = "debug", skip(self, text, options), fields(answer = %answer))]
    pub fn append(&mut self, text: &str, options: [&str; 4], answer: &str) -> Result<(), QuizError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(QuizError::validation("Question text is required."));
        }
        if options.iter().any(|o| o.trim().is_empty()) {
            return Err(QuizError::validation("All four options are required."));
        }
        let correct = AnswerLetter::parse(answer)
            .ok_or_else(|| QuizError::validation("Answer must be one of A, B, C or D."))?;

        self.questions.push(Question {
            text: text.to_string(),
            options: options.map(|o| o.trim().to_string()),
            correct,
        });
        debug!(target: "quiz", len = self.questions.len(), "Question appended");
        Ok(())
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn all(&self) -> &[Question] {
        &self.questions
    }
}
