//! Server-rendered HTML pages. Every page shares `layout` and its stylesheet.

use crate::domain::{Question, QuizResult, ScoreRecord};
use crate::util::escape_html as esc;

const CSS: &str = r#"
<style>
body {
  font-family: 'Poppins', sans-serif;
  background: linear-gradient(135deg, #84fab0 0%, #8fd3f4 100%);
  text-align: center;
  color: #222;
  margin: 0; padding: 0;
}
.container {
  background: white;
  border-radius: 20px;
  box-shadow: 0 4px 20px rgba(0,0,0,0.1);
  padding: 30px;
  width: 80%;
  max-width: 600px;
  margin: 50px auto;
}
button {
  background-color: #4CAF50;
  border: none;
  color: white;
  padding: 10px 20px;
  text-align: center;
  border-radius: 10px;
  font-size: 16px;
  cursor: pointer;
}
button:hover { background-color: #45a049; }
input[type=text], input[type=password] {
  padding: 10px;
  border-radius: 8px;
  border: 1px solid #ccc;
  width: 80%;
}
a { color: #4CAF50; text-decoration: none; }
a:hover { text-decoration: underline; }
table { margin: 0 auto; }
.error { color: #c0392b; }
</style>
"#;

pub fn layout(title: &str, body: &str) -> String {
  format!(
    "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>{}</title>{CSS}</head><body><div class='container'>{body}</div></body></html>",
    esc(title)
  )
}

pub fn home(question_count: usize) -> String {
  let body = format!(
    r#"
    <h2>Welcome to the Programming Quiz</h2>
    <p>There are <b>{question_count}</b> questions in this quiz.</p>
    <form action="/start" method="POST">
      <input type="text" name="student_name" placeholder="Enter your name" required><br><br>
      <button type="submit">Start Quiz</button>
    </form>
    <br><a href="/admin">Admin Login</a>
    "#
  );
  layout("Quiz Home", &body)
}

pub fn question(number: usize, total: usize, q: &Question) -> String {
  let options: String = q
    .labeled_options()
    .map(|(letter, text)| {
      format!("<label><input type='radio' name='answer' value='{letter}'> {letter}. {}</label><br>", esc(text))
    })
    .collect();
  let body = format!(
    r#"
    <h3>Question {number} of {total}</h3>
    <p><b>{}</b></p>
    <form method="POST" action="/submit">
    {options}
    <br><button type="submit">Submit Answer</button>
    </form>
    "#,
    esc(&q.text)
  );
  layout(&format!("Question {number}"), &body)
}

pub fn results(r: &QuizResult) -> String {
  let body = format!(
    r#"
    <h2>Quiz Completed!</h2>
    <p><b>{}</b>, your score is <b>{}%</b> ({}/{} correct)</p>
    <a href="/">Back to Home</a>
    "#,
    esc(&r.name),
    r.percent,
    r.correct,
    r.total
  );
  layout("Results", &body)
}

/// Login form, optionally preceded by an inline error.
pub fn admin_login(error: Option<&str>) -> String {
  let notice = error
    .map(|e| format!("<p class='error'>{}</p>", esc(e)))
    .unwrap_or_default();
  let body = format!(
    r#"
    <h2>Admin Login</h2>
    {notice}
    <form method="POST" action="/admin">
      <input type="text" name="username" placeholder="Username" required><br><br>
      <input type="password" name="password" placeholder="Password" required><br><br>
      <button type="submit">Login</button>
    </form>
    <br><a href="/">Back to Home</a>
    "#
  );
  layout("Admin Login", &body)
}

pub fn admin_panel(admin_name: &str, questions: &[Question], scores: &[ScoreRecord]) -> String {
  let question_items: String = questions
    .iter()
    .enumerate()
    .map(|(i, q)| format!("<li><b>{}.</b> {} <br><i>Answer: {}</i></li>", i + 1, esc(&q.text), q.correct))
    .collect();

  let scores_html = if scores.is_empty() {
    "<p>No quiz attempts yet.</p>".to_string()
  } else {
    let rows: String = scores
      .iter()
      .map(|s| format!("<tr><td>{}</td><td>{}</td></tr>", esc(&s.name), s.percent))
      .collect();
    format!("<table border='1' cellpadding='6' style='margin:auto;'><tr><th>Student Name</th><th>Score (%)</th></tr>{rows}</table>")
  };

  let body = format!(
    r#"
    <h2>Admin Panel</h2>
    <p>Welcome, {}</p>
    <h3>Quiz Questions ({} total)</h3>
    <ul>
    {question_items}
    </ul>
    <a href="/admin/add">Add Question</a><br><br>
    <h3>Student Scores</h3>
    {scores_html}
    <br><a href="/admin/logout">Logout</a>
    "#,
    esc(admin_name),
    questions.len()
  );
  layout("Admin Panel", &body)
}

pub fn add_question_form() -> String {
  let body = r#"
    <h2>Add New Question</h2>
    <form method="POST" action="/admin/add">
      <input type="text" name="question" placeholder="Question text" required><br><br>
      <input type="text" name="option0" placeholder="Option A" required><br>
      <input type="text" name="option1" placeholder="Option B" required><br>
      <input type="text" name="option2" placeholder="Option C" required><br>
      <input type="text" name="option3" placeholder="Option D" required><br><br>
      <input type="text" name="answer" placeholder="Correct Answer (A/B/C/D)" required><br><br>
      <button type="submit">Add Question</button>
    </form>
    <br><a href="/admin/panel">Back</a>
    "#;
  layout("Add Question", body)
}

/// Inline error with a link back to where the visitor came from.
pub fn error_page(message: &str, back: &str) -> String {
  let body = format!("<p class='error'>{}</p><a href='{}'>Back</a>", esc(message), esc(back));
  layout("Error", &body)
}
