//! Process configuration from environment variables, plus an optional TOML
//! question file.
//!
//! Recognized variables:
//!   SECRET_KEY      : cookie signing key material (>= 64 bytes, else a random key is used)
//!   ADMIN_USERNAME  : default "admin"
//!   ADMIN_PASSWORD  : default "secure123"
//!   HOST            : default "0.0.0.0"
//!   PORT            : u16 (default 5000)
//!   QUIZ_BANK_PATH  : TOML file with extra questions (see `BankConfig`)

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use serde::Deserialize;
use tracing::{error, info, warn};

pub const DEFAULT_ADMIN_USERNAME: &str = "admin";
pub const DEFAULT_ADMIN_PASSWORD: &str = "secure123";
pub const DEFAULT_PORT: u16 = 5000;

#[derive(Clone)]
pub struct Settings {
  pub secret_key: Option<String>,
  pub admin_username: String,
  pub admin_password: String,
  pub host: IpAddr,
  pub port: u16,
  pub bank_path: Option<String>,
}

impl Default for Settings {
  fn default() -> Self {
    Self {
      secret_key: None,
      admin_username: DEFAULT_ADMIN_USERNAME.into(),
      admin_password: DEFAULT_ADMIN_PASSWORD.into(),
      host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
      port: DEFAULT_PORT,
      bank_path: None,
    }
  }
}

// Keep the password out of logs.
impl std::fmt::Debug for Settings {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Settings")
      .field("secret_key", &self.secret_key.as_ref().map(|_| "<set>"))
      .field("admin_username", &self.admin_username)
      .field("host", &self.host)
      .field("port", &self.port)
      .field("bank_path", &self.bank_path)
      .finish()
  }
}

impl Settings {
  pub fn from_env() -> Self {
    Self::from_lookup(|key| std::env::var(key).ok())
  }

  /// Build settings from any key lookup. Unparseable values fall back to defaults.
  pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
    let defaults = Self::default();
    let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    let port = match non_empty("PORT") {
      Some(raw) => raw.trim().parse::<u16>().unwrap_or_else(|e| {
        warn!(target: "quiz_server", %raw, error = %e, "Invalid PORT; using default");
        DEFAULT_PORT
      }),
      None => DEFAULT_PORT,
    };
    let host = match non_empty("HOST") {
      Some(raw) => raw.trim().parse::<IpAddr>().unwrap_or_else(|e| {
        warn!(target: "quiz_server", %raw, error = %e, "Invalid HOST; using default");
        defaults.host
      }),
      None => defaults.host,
    };

    Self {
      secret_key: non_empty("SECRET_KEY"),
      admin_username: non_empty("ADMIN_USERNAME").unwrap_or(defaults.admin_username),
      admin_password: non_empty("ADMIN_PASSWORD").unwrap_or(defaults.admin_password),
      host,
      port,
      bank_path: non_empty("QUIZ_BANK_PATH"),
    }
  }

  pub fn addr(&self) -> SocketAddr {
    SocketAddr::new(self.host, self.port)
  }
}

/// Question file schema:
///
/// ```toml
/// replace_seeds = false
///
/// [[questions]]
/// text = "Which keyword declares an immutable binding in Rust?"
/// options = ["var", "let", "mut", "const fn"]
/// answer = "B"
/// ```
#[derive(Clone, Debug, Deserialize, Default)]
pub struct BankConfig {
  #[serde(default)]
  pub replace_seeds: bool,
  #[serde(default)]
  pub questions: Vec<QuestionCfg>,
}

/// Raw entry; validated by `QuestionBank::append` at load time.
#[derive(Clone, Debug, Deserialize)]
pub struct QuestionCfg {
  pub text: String,
  #[serde(default)]
  pub options: Vec<String>,
  pub answer: String,
}

/// Load the question file named by `path`. On any IO or parse error, returns None.
pub fn load_bank_config(path: &str) -> Option<BankConfig> {
  match std::fs::read_to_string(path) {
    Ok(s) => match toml::from_str::<BankConfig>(&s) {
      Ok(cfg) => {
        info!(target: "quiz_server", %path, questions = cfg.questions.len(), "Loaded question file (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "quiz_server", %path, error = %e, "Failed to parse TOML question file");
        None
      }
    },
    Err(e) => {
      error!(target: "quiz_server", %path, error = %e, "Failed to read TOML question file");
      None
    }
  }
}
