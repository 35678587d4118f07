//! Domain models: questions, answer letters, score records and quiz results.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the four option labels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnswerLetter {
  A,
  B,
  C,
  D,
}

impl AnswerLetter {
  pub const ALL: [AnswerLetter; 4] = [AnswerLetter::A, AnswerLetter::B, AnswerLetter::C, AnswerLetter::D];

  /// Case-insensitive parse of a trimmed single letter. Anything else is `None`.
  pub fn parse(raw: &str) -> Option<Self> {
    match raw.trim().to_ascii_uppercase().as_str() {
      "A" => Some(AnswerLetter::A),
      "B" => Some(AnswerLetter::B),
      "C" => Some(AnswerLetter::C),
      "D" => Some(AnswerLetter::D),
      _ => None,
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      AnswerLetter::A => "A",
      AnswerLetter::B => "B",
      AnswerLetter::C => "C",
      AnswerLetter::D => "D",
    }
  }
}

impl fmt::Display for AnswerLetter {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// A multiple-choice question. Immutable once in the bank.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Question {
  pub text: String,
  pub options: [String; 4],
  pub correct: AnswerLetter,
}

impl Question {
  /// Options paired with their labels, in display order.
  pub fn labeled_options(&self) -> impl Iterator<Item = (AnswerLetter, &str)> {
    AnswerLetter::ALL.into_iter().zip(self.options.iter().map(String::as_str))
  }
}

/// Outcome of one completed quiz, visible to the admin.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ScoreRecord {
  pub name: String,
  pub percent: u8,
}

/// What the student sees on the results page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizResult {
  pub name: String,
  pub percent: u8,
  pub correct: usize,
  pub total: usize,
}

impl QuizResult {
  pub fn to_record(&self) -> ScoreRecord {
    ScoreRecord { name: self.name.clone(), percent: self.percent }
  }
}

/// `round(100 * correct / total)`, with an empty quiz scoring 0.
pub fn percent(correct: usize, total: usize) -> u8 {
  if total == 0 {
    return 0;
  }
  let ratio = correct.min(total) as f64 / total as f64;
  (ratio * 100.0).round() as u8
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parse_letter_is_case_insensitive() {
    assert_eq!(AnswerLetter::parse("b"), Some(AnswerLetter::B));
    assert_eq!(AnswerLetter::parse(" D "), Some(AnswerLetter::D));
    assert_eq!(AnswerLetter::parse("E"), None);
    assert_eq!(AnswerLetter::parse(""), None);
    assert_eq!(AnswerLetter::parse("AB"), None);
  }

  #[test]
  fn percent_rounds_and_guards_empty_quiz() {
    assert_eq!(percent(0, 0), 0);
    assert_eq!(percent(3, 5), 60);
    assert_eq!(percent(5, 5), 100);
    assert_eq!(percent(1, 3), 33);
    assert_eq!(percent(2, 3), 67);
    assert_eq!(percent(1, 8), 13);
  }

  #[test]
  fn labeled_options_follow_display_order() {
    let q = Question {
      text: "?".into(),
      options: ["w".into(), "x".into(), "y".into(), "z".into()],
      correct: AnswerLetter::C,
    };
    let labels: Vec<String> = q.labeled_options().map(|(l, o)| format!("{l}{o}")).collect();
    assert_eq!(labels, ["Aw", "Bx", "Cy", "Dz"]);
  }
}
