//! Core behaviors behind the HTTP handlers.
//!
//! This includes:
//!   - starting a quiz, reading the current question, submitting answers
//!   - producing and recording the final result
//!   - the admin gate (login, logout, require) and question appends
//!
//! Everything here works on an opaque session token; cookies live in `session`.

use tracing::{info, instrument, warn};

use crate::domain::{Question, QuizResult, ScoreRecord};
use crate::error::QuizError;
use crate::quiz::{QuizSession, Step};
use crate::session::SessionData;
use crate::state::AppState;

/// Owned view of the current quiz position.
#[derive(Debug, PartialEq, Eq)]
pub enum QuizView {
  NoQuiz,
  Question { number: usize, total: usize, question: Question },
  Finished,
}

#[derive(Debug, PartialEq, Eq)]
pub enum ResultsView {
  NoQuiz,
  /// Questions remain; the visitor belongs back on the quiz page.
  StillInProgress,
  Done(QuizResult),
}

/// Admin form payload for a new question.
#[derive(Debug, Default)]
pub struct NewQuestion<'a> {
  pub text: &'a str,
  pub options: [&'a str; 4],
  pub answer: &'a str,
}

/// NotStarted -> InProgress. Replaces any quiz already in the slot; the admin flag survives.
#[instrument(level = "info", skip(state, token, name))]
pub async fn start_quiz(state: &AppState, token: &str, name: &str) -> Result<(), QuizError> {
  let quiz = QuizSession::start(name)?;
  let mut data = state.sessions.get(token).await.unwrap_or_default();
  info!(target: "quiz", student = %quiz.student_name(), "Quiz started");
  data.quiz = Some(quiz);
  state.sessions.set(token, data).await;
  Ok(())
}

#[instrument(level = "debug", skip(state, token))]
pub async fn current_question(state: &AppState, token: &str) -> QuizView {
  let bank = state.bank.read().await;
  let Some(mut data) = state.sessions.get(token).await else { return QuizView::NoQuiz };
  let Some(quiz) = data.quiz.as_mut() else { return QuizView::NoQuiz };

  let view = match quiz.current_question(&bank) {
    Step::Question { number, total, question } => QuizView::Question { number, total, question: question.clone() },
    Step::Finished => QuizView::Finished,
  };
  if view == QuizView::Finished {
    // Persist the InProgress -> Completed transition.
    state.sessions.set(token, data).await;
  }
  view
}

/// Returns false when the visitor has no quiz to answer.
#[instrument(level = "info", skip(state, token), fields(answer = %letter))]
pub async fn submit_answer(state: &AppState, token: &str, letter: &str) -> bool {
  let bank = state.bank.read().await;
  let Some(mut data) = state.sessions.get(token).await else { return false };
  let Some(quiz) = data.quiz.as_mut() else { return false };

  let outcome = quiz.submit_answer(&bank, letter);
  info!(target: "quiz", student = %quiz.student_name(), ?outcome, index = quiz.current_index(), score = quiz.score(), "Answer submitted");
  state.sessions.set(token, data).await;
  true
}

/// Compute the final score; the first view of a completed quiz appends a score record.
#[instrument(level = "info", skip(state, token))]
pub async fn finish_quiz(state: &AppState, token: &str) -> ResultsView {
  let bank = state.bank.read().await;
  let Some(mut data) = state.sessions.get(token).await else { return ResultsView::NoQuiz };
  let Some(quiz) = data.quiz.as_mut() else { return ResultsView::NoQuiz };

  if !quiz.is_completed() && quiz.current_index() < bank.len() {
    return ResultsView::StillInProgress;
  }
  let outcome = quiz.compute_result(&bank);
  state.sessions.set(token, data).await;

  if outcome.first_view {
    state.record_score(outcome.result.to_record()).await;
    info!(target: "quiz", student = %outcome.result.name, percent = outcome.result.percent, correct = outcome.result.correct, total = outcome.result.total, "Result recorded");
  }
  ResultsView::Done(outcome.result)
}

/// Drop everything held for this visitor (quiz and admin flag).
#[instrument(level = "debug", skip(state, token))]
pub async fn reset_session(state: &AppState, token: &str) {
  state.sessions.clear(token).await;
}

/// Exact match against the configured credentials.
#[instrument(level = "info", skip(state, token, password))]
pub async fn admin_login(state: &AppState, token: &str, username: &str, password: &str) -> Result<(), QuizError> {
  let settings = &state.settings;
  if username != settings.admin_username || password != settings.admin_password {
    warn!(target: "admin", %username, "Admin login rejected");
    return Err(QuizError::Auth);
  }
  let mut data = state.sessions.get(token).await.unwrap_or_default();
  data.admin = true;
  state.sessions.set(token, data).await;
  info!(target: "admin", %username, "Admin logged in");
  Ok(())
}

/// Clear the admin flag; a no-op when it was never set.
#[instrument(level = "info", skip(state, token))]
pub async fn admin_logout(state: &AppState, token: &str) {
  if let Some(mut data) = state.sessions.get(token).await {
    if data.admin {
      info!(target: "admin", "Admin logged out");
    }
    data.admin = false;
    state.sessions.set(token, data).await;
  }
}

pub async fn is_admin(state: &AppState, token: Option<&str>) -> bool {
  match token {
    Some(t) => state.sessions.get(t).await.map(|d: SessionData| d.admin).unwrap_or(false),
    None => false,
  }
}

pub async fn require_admin(state: &AppState, token: Option<&str>) -> Result<(), QuizError> {
  if is_admin(state, token).await {
    Ok(())
  } else {
    Err(QuizError::NotAuthenticated)
  }
}

/// Snapshot for the admin panel.
pub async fn admin_overview(state: &AppState) -> (Vec<Question>, Vec<ScoreRecord>) {
  let questions = state.bank.read().await.all().to_vec();
  let scores = state.score_records().await;
  (questions, scores)
}

#[instrument(level = "info", skip(state, token, q))]
pub async fn add_question(state: &AppState, token: Option<&str>, q: NewQuestion<'_>) -> Result<(), QuizError> {
  require_admin(state, token).await?;
  let mut bank = state.bank.write().await;
  bank.append(q.text, q.options, q.answer)?;
  info!(target: "admin", total = bank.len(), "Question added");
  Ok(())
}
