//! End-to-end tests: drive the real router and carry the session cookie like a browser.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use tower::ServiceExt;

use super::build_router;
use crate::config::Settings;
use crate::session::SESSION_COOKIE;
use crate::state::AppState;

struct Page {
    status: StatusCode,
    location: Option<String>,
    body: String,
}

impl Page {
    fn redirects_to(&self, path: &str) -> bool {
        self.status == StatusCode::SEE_OTHER && self.location.as_deref() == Some(path)
    }
}

/// Minimal cookie-carrying client.
struct Browser {
    app: Router,
    cookie: Option<String>,
}

impl Browser {
    fn new(state: &AppState) -> Self {
        Self { app: build_router(state.clone()), cookie: None }
    }

    async fn send(&mut self, mut req: Request<Body>) -> Page {
        if let Some(c) = &self.cookie {
            req.headers_mut().insert(header::COOKIE, c.parse().unwrap());
        }
        let resp = self.app.clone().oneshot(req).await.unwrap();

        for value in resp.headers().get_all(header::SET_COOKIE) {
            let raw = value.to_str().unwrap();
            let pair = raw.split(';').next().unwrap_or_default();
            if let Some((name, val)) = pair.split_once('=') {
                if name.trim() == SESSION_COOKIE {
                    self.cookie = if val.is_empty() { None } else { Some(pair.to_string()) };
                }
            }
        }

        let status = resp.status();
        let location = resp
            .headers()
            .get(header::LOCATION)
            .map(|v| v.to_str().unwrap().to_string());
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        Page { status, location, body: String::from_utf8(bytes.to_vec()).unwrap() }
    }

    async fn get(&mut self, path: &str) -> Page {
        let req = Request::builder().uri(path).body(Body::empty()).unwrap();
        self.send(req).await
    }

    async fn post(&mut self, path: &str, form: &str) -> Page {
        let req = Request::builder()
            .method("POST")
            .uri(path)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_string()))
            .unwrap();
        self.send(req).await
    }

    async fn play(&mut self, name: &str, answers: &[&str]) -> Page {
        assert!(self.post("/start", &format!("student_name={name}")).await.redirects_to("/quiz"));
        for a in answers {
            assert!(self.get("/quiz").await.body.contains("Question"));
            assert!(self.post("/submit", &format!("answer={a}")).await.redirects_to("/quiz"));
        }
        assert!(self.get("/quiz").await.redirects_to("/results"));
        self.get("/results").await
    }

    async fn login_admin(&mut self) {
        let page = self.post("/admin", "username=admin&password=secure123").await;
        assert!(page.redirects_to("/admin/panel"));
    }
}

fn state() -> AppState {
    AppState::new(Settings::default())
}

#[tokio::test]
async fn all_correct_answers_score_100() {
    let s = state();
    let page = Browser::new(&s).play("Ada", &["B", "B", "B", "B", "B"]).await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("<b>100%</b>"));
    assert!(page.body.contains("(5/5 correct)"));
}

#[tokio::test]
async fn all_wrong_answers_score_0() {
    let s = state();
    let page = Browser::new(&s).play("Ada", &["A", "A", "A", "A", "A"]).await;
    assert!(page.body.contains("<b>0%</b>"));
}

#[tokio::test]
async fn mixed_answers_score_60() {
    let s = state();
    let page = Browser::new(&s).play("Ada", &["B", "A", "B", "A", "B"]).await;
    assert!(page.body.contains("<b>60%</b>"));
    assert!(page.body.contains("(3/5 correct)"));
}

#[tokio::test]
async fn lowercase_answers_are_graded() {
    let s = state();
    let page = Browser::new(&s).play("Ada", &["b", "b", "b", "b", "b"]).await;
    assert!(page.body.contains("<b>100%</b>"));
}

#[tokio::test]
async fn empty_answer_does_not_advance() {
    let s = state();
    let mut b = Browser::new(&s);
    b.post("/start", "student_name=Ada").await;
    assert!(b.post("/submit", "answer=").await.redirects_to("/quiz"));
    assert!(b.post("/submit", "").await.redirects_to("/quiz"));
    assert!(b.get("/quiz").await.body.contains("Question 1 of 5"));
}

#[tokio::test]
async fn blank_name_shows_error_page() {
    let s = state();
    let mut b = Browser::new(&s);
    let page = b.post("/start", "student_name=+++").await;
    assert_eq!(page.status, StatusCode::BAD_REQUEST);
    assert!(page.body.contains("Please enter your name."));
    assert!(page.body.contains("href='/'"));
    assert!(b.get("/quiz").await.redirects_to("/"));
}

#[tokio::test]
async fn quiz_pages_without_session_go_home() {
    let s = state();
    let mut b = Browser::new(&s);
    assert!(b.get("/quiz").await.redirects_to("/"));
    assert!(b.post("/submit", "answer=B").await.redirects_to("/"));
    assert!(b.get("/results").await.redirects_to("/"));
    assert!(s.score_records().await.is_empty());
}

#[tokio::test]
async fn results_before_the_end_go_back_to_quiz() {
    let s = state();
    let mut b = Browser::new(&s);
    b.post("/start", "student_name=Ada").await;
    b.post("/submit", "answer=B").await;
    assert!(b.get("/results").await.redirects_to("/quiz"));
    assert!(s.score_records().await.is_empty());
}

#[tokio::test]
async fn home_clears_the_session() {
    let s = state();
    let mut b = Browser::new(&s);
    b.post("/start", "student_name=Ada").await;
    let home = b.get("/").await;
    assert_eq!(home.status, StatusCode::OK);
    assert!(home.body.contains("There are <b>5</b> questions"));
    assert!(b.get("/quiz").await.redirects_to("/"));
    assert_eq!(s.sessions.len().await, 0);
}

#[tokio::test]
async fn refreshing_results_records_once() {
    let s = state();
    let mut b = Browser::new(&s);
    b.play("Ada", &["B"; 5]).await;
    assert!(b.get("/results").await.body.contains("<b>100%</b>"));
    assert_eq!(s.score_records().await.len(), 1);

    b.play("Ada", &["A"; 5]).await;
    let records = s.score_records().await;
    assert_eq!(records.len(), 2);
    assert_eq!((records[0].percent, records[1].percent), (100, 0));
}

#[tokio::test]
async fn wrong_password_keeps_panel_locked() {
    let s = state();
    let mut b = Browser::new(&s);
    let page = b.post("/admin", "username=admin&password=nope").await;
    assert_eq!(page.status, StatusCode::UNAUTHORIZED);
    assert!(page.body.contains("Invalid credentials."));
    assert!(page.body.contains("name=\"password\""));
    assert!(b.get("/admin/panel").await.redirects_to("/admin"));
}

#[tokio::test]
async fn admin_pages_require_login() {
    let s = state();
    let mut b = Browser::new(&s);
    assert!(b.get("/admin/panel").await.redirects_to("/admin"));
    assert!(b.get("/admin/add").await.redirects_to("/admin"));
    let form = "question=Q&option0=a&option1=b&option2=c&option3=d&answer=A";
    assert!(b.post("/admin/add", form).await.redirects_to("/admin"));
    assert_eq!(s.question_count().await, 5);
    assert_eq!(b.get("/admin").await.status, StatusCode::OK);
}

#[tokio::test]
async fn admin_sees_questions_and_scores() {
    let s = state();
    Browser::new(&s).play("Grace", &["B", "A", "B", "A", "B"]).await;

    let mut admin = Browser::new(&s);
    admin.login_admin().await;
    let panel = admin.get("/admin/panel").await;
    assert_eq!(panel.status, StatusCode::OK);
    assert!(panel.body.contains("Welcome, admin"));
    assert!(panel.body.contains("Quiz Questions (5 total)"));
    assert!(panel.body.contains("<tr><td>Grace</td><td>60</td></tr>"));

    assert!(admin.get("/admin/logout").await.redirects_to("/"));
    assert!(admin.get("/admin/panel").await.redirects_to("/admin"));
}

#[tokio::test]
async fn panel_without_attempts_says_so() {
    let s = state();
    let mut admin = Browser::new(&s);
    admin.login_admin().await;
    assert!(admin.get("/admin/panel").await.body.contains("No quiz attempts yet."));
}

#[tokio::test]
async fn added_question_extends_new_quizzes() {
    let s = state();
    let mut admin = Browser::new(&s);
    admin.login_admin().await;
    assert_eq!(admin.get("/admin/add").await.status, StatusCode::OK);
    let form = "question=Is+Rust+fun%3F&option0=Yes&option1=No&option2=Maybe&option3=Later&answer=a";
    assert!(admin.post("/admin/add", form).await.redirects_to("/admin/panel"));
    assert!(admin.get("/admin/panel").await.body.contains("Quiz Questions (6 total)"));

    let mut student = Browser::new(&s);
    student.post("/start", "student_name=Ada").await;
    assert!(student.get("/quiz").await.body.contains("Question 1 of 6"));
    for _ in 0..5 {
        student.post("/submit", "answer=B").await;
    }
    let sixth = student.get("/quiz").await;
    assert!(sixth.body.contains("Question 6 of 6"));
    assert!(sixth.body.contains("Is Rust fun?"));
    student.post("/submit", "answer=A").await;
    assert!(student.get("/quiz").await.redirects_to("/results"));
    let results = student.get("/results").await;
    assert!(results.body.contains("(6/6 correct)"));
}

#[tokio::test]
async fn invalid_question_is_rejected() {
    let s = state();
    let mut admin = Browser::new(&s);
    admin.login_admin().await;
    let form = "question=Q&option0=a&option1=&option2=c&option3=d&answer=A";
    let page = admin.post("/admin/add", form).await;
    assert_eq!(page.status, StatusCode::BAD_REQUEST);
    assert!(page.body.contains("href='/admin/add'"));

    let form = "question=Q&option0=a&option1=b&option2=c&option3=d&answer=E";
    assert_eq!(admin.post("/admin/add", form).await.status, StatusCode::BAD_REQUEST);
    assert_eq!(s.question_count().await, 5);
}

#[tokio::test]
async fn home_logs_the_admin_out() {
    let s = state();
    let mut admin = Browser::new(&s);
    admin.login_admin().await;
    admin.get("/").await;
    assert!(admin.get("/admin/panel").await.redirects_to("/admin"));
}

#[tokio::test]
async fn tampered_cookie_is_ignored() {
    let s = state();
    let mut b = Browser::new(&s);
    b.login_admin().await;
    let forged = b.cookie.clone().map(|c| format!("{c}x"));
    b.cookie = forged;
    assert!(b.get("/admin/panel").await.redirects_to("/admin"));

    b.cookie = Some(format!("{SESSION_COOKIE}=not-signed"));
    assert!(b.get("/quiz").await.redirects_to("/"));
}

#[tokio::test]
async fn health_reports_question_count() {
    let s = state();
    let page = Browser::new(&s).get("/api/v1/health").await;
    assert_eq!(page.status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&page.body).unwrap();
    assert_eq!(json["ok"], true);
    assert_eq!(json["questions"], 5);
}

#[tokio::test]
async fn student_names_are_escaped() {
    let s = state();
    let page = Browser::new(&s).play("%3Cb%3EEve%3C%2Fb%3E", &["B"; 5]).await;
    assert!(page.body.contains("&lt;b&gt;Eve&lt;/b&gt;"));
}
