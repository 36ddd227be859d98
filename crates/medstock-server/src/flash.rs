//! One-shot status messages carried across a redirect.
//!
//! A mutating handler attaches a [`Flash`] to its redirect as a cookie. The
//! next page that renders it also clears the cookie, so each message is
//! shown once.

use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue};
use axum::response::{Html, IntoResponse, Redirect, Response};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

/// Name of the cookie holding the pending message.
pub const COOKIE_NAME: &str = "flash";

const CLEAR_COOKIE: &str = "flash=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax";

/// Severity of a flash message. Doubles as the CSS class suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Info,
    Warning,
    Danger,
}

impl Level {
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Success => "success",
            Level::Info => "info",
            Level::Warning => "warning",
            Level::Danger => "danger",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "success" => Some(Level::Success),
            "info" => Some(Level::Info),
            "warning" => Some(Level::Warning),
            "danger" => Some(Level::Danger),
            _ => None,
        }
    }
}

/// A message to show on the next rendered page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    pub level: Level,
    pub message: String,
}

impl Flash {
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(Level::Success, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Level::Info, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Level::Warning, message)
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self::new(Level::Danger, message)
    }

    /// Cookie value: `<level>.<base64url message>`.
    pub fn encode(&self) -> String {
        format!(
            "{}.{}",
            self.level.as_str(),
            URL_SAFE_NO_PAD.encode(self.message.as_bytes())
        )
    }

    /// Parses a cookie value produced by [`Flash::encode`].
    pub fn decode(value: &str) -> Option<Self> {
        let (level, payload) = value.split_once('.')?;
        let level = Level::parse(level)?;
        let bytes = URL_SAFE_NO_PAD.decode(payload).ok()?;
        let message = String::from_utf8(bytes).ok()?;
        Some(Self { level, message })
    }

    /// Reads a pending flash from the request's `Cookie` headers.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|cookies| cookies.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == COOKIE_NAME)
            .and_then(|(_, value)| Self::decode(value))
    }

    /// Redirects to `to` (303 See Other) with this message attached.
    pub fn redirect(self, to: &str) -> Response {
        let mut response = Redirect::to(to).into_response();
        let cookie = format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax",
            COOKIE_NAME,
            self.encode()
        );
        // The encoded value is ASCII only, so this cannot fail
        if let Ok(value) = HeaderValue::from_str(&cookie) {
            response.headers_mut().append(SET_COOKIE, value);
        }
        response
    }
}

/// Wraps a rendered page, clearing the flash cookie when one was displayed.
pub fn page(html: String, shown: Option<&Flash>) -> Response {
    let mut response = Html(html).into_response();
    if shown.is_some() {
        response
            .headers_mut()
            .append(SET_COOKIE, HeaderValue::from_static(CLEAR_COOKIE));
    }
    response
}
