//! Server-side session slots keyed by an opaque token.
//!
//! The token travels in a signed, HTTP-only cookie. Quiz and admin logic only
//! see the token string and the `get` / `set` / `clear` interface; the cookie
//! helpers at the bottom are the only place that knows about the transport.

use std::{collections::HashMap, sync::Arc};

use axum_extra::extract::cookie::{Cookie, SameSite, SignedCookieJar};
use tokio::sync::RwLock;
use tracing::instrument;
use uuid::Uuid;

use crate::quiz::QuizSession;

pub const SESSION_COOKIE: &str = "quiz_session";

/// Everything stored for one visitor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionData {
    pub quiz: Option<QuizSession>,
    pub admin: bool,
}

#[derive(Clone, Default)]
pub struct SessionStore {
    slots: Arc<RwLock<HashMap<String, SessionData>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the slot, or `None` for an unknown token.
    #[instrument(level = "trace", skip(self, token))]
    pub async fn get(&self, token: &str) -> Option<SessionData> {
        self.slots.read().await.get(token).cloned()
    }

    #[instrument(level = "trace", skip(self, token, data))]
    pub async fn set(&self, token: &str, data: SessionData) {
        self.slots.write().await.insert(token.to_string(), data);
    }

    #[instrument(level = "trace", skip(self, token))]
    pub async fn clear(&self, token: &str) {
        self.slots.write().await.remove(token);
    }

    pub async fn len(&self) -> usize {
        self.slots.read().await.len()
    }
}

/// Token from a verified cookie. Tampered or missing cookies yield `None`.
pub fn token_from(jar: &SignedCookieJar) -> Option<String> {
    jar.get(SESSION_COOKIE).map(|c| c.value().to_string())
}

/// Reuse the visitor's token, or issue a fresh one and attach its cookie.
pub fn ensure_token(jar: SignedCookieJar) -> (SignedCookieJar, String) {
    if let Some(token) = token_from(&jar) {
        return (jar, token);
    }
    let token = Uuid::new_v4().to_string();
    let cookie = Cookie::build((SESSION_COOKIE, token.clone()))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .build();
    (jar.add(cookie), token)
}

/// Ask the browser to drop the session cookie.
pub fn forget_token(jar: SignedCookieJar) -> SignedCookieJar {
    jar.remove(Cookie::build(SESSION_COOKIE).path("/").build())
}
