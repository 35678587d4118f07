//! Application state: the process-scoped stores injected into every handler.
//!
//! This module owns:
//!   - the question bank (seeds + optional TOML file, grows via admin)
//!   - the append-only score records
//!   - the session slots keyed by opaque token
//!   - settings and the cookie signing key
//!
//! Each store sits behind its own `RwLock`. When more than one is held, the
//! order is bank, then sessions, then scores.

use std::sync::Arc;

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use tokio::sync::RwLock;
use tracing::{error, info, instrument, warn};

use crate::bank::QuestionBank;
use crate::config::{load_bank_config, BankConfig, Settings};
use crate::domain::ScoreRecord;
use crate::session::SessionStore;

#[derive(Clone)]
pub struct AppState {
    pub bank: Arc<RwLock<QuestionBank>>,
    pub scores: Arc<RwLock<Vec<ScoreRecord>>>,
    pub sessions: SessionStore,
    pub settings: Arc<Settings>,
    key: Key,
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.key.clone()
    }
}

impl AppState {
    /// Build state from settings: seed the bank, merge the question file, derive the key.
    #[instrument(level = "info", skip_all)]
    pub fn new(settings: Settings) -> Self {
        let file = settings.bank_path.as_deref().and_then(load_bank_config);
        let bank = build_bank(file.as_ref());
        if bank.is_empty() {
            warn!(target: "quiz_server", "Question bank is empty; every quiz will score 0%");
        }
        info!(target: "quiz_server", questions = bank.len(), "Startup question bank ready");

        let key = signing_key(settings.secret_key.as_deref());

        Self {
            bank: Arc::new(RwLock::new(bank)),
            scores: Arc::new(RwLock::new(Vec::new())),
            sessions: SessionStore::new(),
            settings: Arc::new(settings),
            key,
        }
    }

    pub async fn question_count(&self) -> usize {
        self.bank.read().await.len()
    }

    /// Append one score record.
    #[instrument(level = "debug", skip(self, record), fields(name = %record.name, percent = record.percent))]
    pub async fn record_score(&self, record: ScoreRecord) {
        self.scores.write().await.push(record);
    }

    pub async fn score_records(&self) -> Vec<ScoreRecord> {
        self.scores.read().await.clone()
    }
}

/// Seeds first (unless the file replaces them), then every valid file entry.
fn build_bank(file: Option<&BankConfig>) -> QuestionBank {
    let mut bank = match file {
        Some(cfg) if cfg.replace_seeds => QuestionBank::new(),
        _ => QuestionBank::with_seeds(),
    };
    let Some(cfg) = file else { return bank };

    for (i, q) in cfg.questions.iter().enumerate() {
        let options: Option<[&str; 4]> = match q.options.as_slice() {
            [a, b, c, d] => Some([a.as_str(), b.as_str(), c.as_str(), d.as_str()]),
            _ => None,
        };
        let Some(options) = options else {
            error!(target: "quiz_server", entry = i, found = q.options.len(), "Skipping question: exactly four options required");
            continue;
        };
        if let Err(e) = bank.append(&q.text, options, &q.answer) {
            error!(target: "quiz_server", entry = i, error = %e, "Skipping invalid question from file");
        }
    }
    bank
}

/// Use the configured secret when it is long enough, else a per-process random key.
fn signing_key(secret: Option<&str>) -> Key {
    match secret {
        Some(s) => match Key::try_from(s.as_bytes()) {
            Ok(key) => key,
            Err(e) => {
                warn!(target: "quiz_server", error = %e, "SECRET_KEY too short (need 64 bytes); using a random key");
                Key::generate()
            }
        },
        None => {
            warn!(target: "quiz_server", "SECRET_KEY not set; using a random key (sessions end on restart)");
            Key::generate()
        }
    }
}
