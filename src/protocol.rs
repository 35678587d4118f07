//! Request and response payloads for the HTTP endpoints (serde ready).
//!
//! Form fields default to empty strings so a missing field reaches validation
//! as "blank" instead of being rejected by the extractor.

use serde::{Deserialize, Serialize};

use crate::logic::NewQuestion;

#[derive(Debug, Deserialize)]
pub struct StartForm {
    #[serde(default)]
    pub student_name: String,
}

#[derive(Debug, Deserialize)]
pub struct AnswerForm {
    #[serde(default)]
    pub answer: String,
}

#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct AddQuestionForm {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub option0: String,
    #[serde(default)]
    pub option1: String,
    #[serde(default)]
    pub option2: String,
    #[serde(default)]
    pub option3: String,
    #[serde(default)]
    pub answer: String,
}

impl AddQuestionForm {
    pub fn as_new_question(&self) -> NewQuestion<'_> {
        NewQuestion {
            text: &self.question,
            options: [
                self.option0.as_str(),
                self.option1.as_str(),
                self.option2.as_str(),
                self.option3.as_str(),
            ],
            answer: &self.answer,
        }
    }
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
    pub questions: usize,
    pub sessions: usize,
}
