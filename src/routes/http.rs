//! HTTP endpoint handlers. These are thin wrappers that forward to core logic
//! and render the outcome as a page or a redirect.

use axum::{
  extract::{Form, State},
  http::StatusCode,
  response::{Html, IntoResponse, Redirect, Response},
  Json,
};
use axum_extra::extract::cookie::SignedCookieJar;
use tracing::{debug, instrument};

use crate::error::QuizError;
use crate::logic::{self, QuizView, ResultsView};
use crate::protocol::*;
use crate::session::{ensure_token, forget_token, token_from};
use crate::state::AppState;
use crate::views;

/// Turn a core error into what the visitor sees. `back` is the retry link for validation errors.
fn render_error(err: QuizError, back: &str) -> Response {
  match err {
    QuizError::Validation(msg) => (StatusCode::BAD_REQUEST, Html(views::error_page(&msg, back))).into_response(),
    QuizError::Auth => (StatusCode::UNAUTHORIZED, Html(views::admin_login(Some("Invalid credentials.")))).into_response(),
    QuizError::NotAuthenticated => Redirect::to("/admin").into_response(),
  }
}

#[instrument(level = "info", skip_all)]
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
  Json(HealthOut {
    ok: true,
    questions: state.question_count().await,
    sessions: state.sessions.len().await,
  })
}

/// Home clears whatever the visitor had, quiz and admin flag alike.
#[instrument(level = "info", skip_all)]
pub async fn home(State(state): State<AppState>, jar: SignedCookieJar) -> impl IntoResponse {
  if let Some(token) = token_from(&jar) {
    logic::reset_session(&state, &token).await;
  }
  let count = state.question_count().await;
  (forget_token(jar), Html(views::home(count)))
}

#[instrument(level = "info", skip_all, fields(name_len = form.student_name.len()))]
pub async fn start(State(state): State<AppState>, jar: SignedCookieJar, Form(form): Form<StartForm>) -> Response {
  let (jar, token) = ensure_token(jar);
  match logic::start_quiz(&state, &token, &form.student_name).await {
    Ok(()) => (jar, Redirect::to("/quiz")).into_response(),
    Err(e) => render_error(e, "/"),
  }
}

#[instrument(level = "info", skip_all)]
pub async fn quiz(State(state): State<AppState>, jar: SignedCookieJar) -> Response {
  let Some(token) = token_from(&jar) else { return Redirect::to("/").into_response() };
  match logic::current_question(&state, &token).await {
    QuizView::Question { number, total, question } => Html(views::question(number, total, &question)).into_response(),
    QuizView::Finished => Redirect::to("/results").into_response(),
    QuizView::NoQuiz => Redirect::to("/").into_response(),
  }
}

#[instrument(level = "info", skip_all, fields(answer = %form.answer))]
pub async fn submit(State(state): State<AppState>, jar: SignedCookieJar, Form(form): Form<AnswerForm>) -> Redirect {
  let Some(token) = token_from(&jar) else { return Redirect::to("/") };
  if logic::submit_answer(&state, &token, &form.answer).await {
    Redirect::to("/quiz")
  } else {
    Redirect::to("/")
  }
}

#[instrument(level = "info", skip_all)]
pub async fn results(State(state): State<AppState>, jar: SignedCookieJar) -> Response {
  let Some(token) = token_from(&jar) else { return Redirect::to("/").into_response() };
  match logic::finish_quiz(&state, &token).await {
    ResultsView::Done(result) => Html(views::results(&result)).into_response(),
    ResultsView::StillInProgress => Redirect::to("/quiz").into_response(),
    ResultsView::NoQuiz => Redirect::to("/").into_response(),
  }
}

#[instrument(level = "info")]
pub async fn admin_login_form() -> Html<String> {
  Html(views::admin_login(None))
}

#[instrument(level = "info", skip_all, fields(username = %form.username))]
pub async fn admin_login(State(state): State<AppState>, jar: SignedCookieJar, Form(form): Form<LoginForm>) -> Response {
  let (jar, token) = ensure_token(jar);
  match logic::admin_login(&state, &token, &form.username, &form.password).await {
    Ok(()) => (jar, Redirect::to("/admin/panel")).into_response(),
    // Keep the cookie so the visitor's slot survives a failed attempt.
    Err(e) => (jar, render_error(e, "/admin")).into_response(),
  }
}

#[instrument(level = "info", skip_all)]
pub async fn admin_panel(State(state): State<AppState>, jar: SignedCookieJar) -> Response {
  let token = token_from(&jar);
  if let Err(e) = logic::require_admin(&state, token.as_deref()).await {
    return render_error(e, "/admin");
  }
  let (questions, scores) = logic::admin_overview(&state).await;
  debug!(target: "admin", questions = questions.len(), scores = scores.len(), "Admin panel rendered");
  Html(views::admin_panel(&state.settings.admin_username, &questions, &scores)).into_response()
}

#[instrument(level = "info", skip_all)]
pub async fn add_question_form(State(state): State<AppState>, jar: SignedCookieJar) -> Response {
  let token = token_from(&jar);
  match logic::require_admin(&state, token.as_deref()).await {
    Ok(()) => Html(views::add_question_form()).into_response(),
    Err(e) => render_error(e, "/admin"),
  }
}

#[instrument(level = "info", skip_all)]
pub async fn add_question(State(state): State<AppState>, jar: SignedCookieJar, Form(form): Form<AddQuestionForm>) -> Response {
  let token = token_from(&jar);
  match logic::add_question(&state, token.as_deref(), form.as_new_question()).await {
    Ok(()) => Redirect::to("/admin/panel").into_response(),
    Err(e) => render_error(e, "/admin/add"),
  }
}

#[instrument(level = "info", skip_all)]
pub async fn admin_logout(State(state): State<AppState>, jar: SignedCookieJar) -> Redirect {
  if let Some(token) = token_from(&jar) {
    logic::admin_logout(&state, &token).await;
  }
  Redirect::to("/")
}
