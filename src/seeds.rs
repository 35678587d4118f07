//! Built-in questions that guarantee the quiz is playable without any config.

use crate::domain::{AnswerLetter, Question};

fn question(text: &str, options: [&str; 4], correct: AnswerLetter) -> Question {
  Question {
    text: text.into(),
    options: options.map(String::from),
    correct,
  }
}

/// The five starter questions. Every correct answer is B.
pub fn seed_questions() -> Vec<Question> {
  vec![
    question(
      "What is a programming language?",
      [
        "A type of computer hardware",
        "A way to communicate with a computer using code",
        "A social media app",
        "A computer virus",
      ],
      AnswerLetter::B,
    ),
    question(
      "Which of the following is a programming language?",
      ["HTML", "Python", "Google", "Excel"],
      AnswerLetter::B,
    ),
    question(
      "What is the main purpose of writing a program?",
      [
        "To decorate a website",
        "To make the computer perform tasks",
        "To play music",
        "To design posters",
      ],
      AnswerLetter::B,
    ),
    question(
      "In programming, what is a variable?",
      ["A type of food", "A storage location for data", "A computer virus", "A network device"],
      AnswerLetter::B,
    ),
    question(
      "What does 'print' do in most programming languages?",
      [
        "Sends data to a printer",
        "Displays output on the screen",
        "Shuts down the computer",
        "Deletes data",
      ],
      AnswerLetter::B,
    ),
  ]
}
