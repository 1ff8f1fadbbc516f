use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;

use super::http::{ApiClient, HttpReply, Method, RequestError, Transport, NO_BODY};
use crate::session::{Session, User};

/// Why a login or OAuth exchange did not produce a session. The `Display`
/// output is the text shown to the user.
#[derive(Error, Debug)]
pub enum AuthError {
    /// The backend refused, with its own message.
    #[error("{0}")]
    Rejected(String),

    #[error("Invalid response format")]
    InvalidResponse,

    #[error("No authorization code received")]
    MissingCode,

    #[error("Failed to get Google OAuth URL")]
    OAuthUrlUnavailable,

    #[error(transparent)]
    Request(#[from] RequestError),
}

#[derive(Deserialize)]
struct SessionEnvelope {
    #[serde(default)]
    success: bool,
    data: Option<SessionData>,
}

#[derive(Deserialize)]
struct SessionData {
    token: Option<String>,
    user: Option<User>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct OAuthUrlData {
    auth_url: Option<String>,
}

#[derive(Deserialize)]
struct OAuthUrlEnvelope {
    data: Option<OAuthUrlData>,
}

fn backend_message(body: &Value) -> Option<String> {
    body.get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .map(String::from)
}

fn session_from_reply(reply: HttpReply, rejected: &str) -> Result<Session, AuthError> {
    if !reply.is_success() {
        let message = backend_message(&reply.body).unwrap_or_else(|| rejected.to_string());
        return Err(AuthError::Rejected(message));
    }

    let envelope: SessionEnvelope =
        serde_json::from_value(reply.body).map_err(|_| AuthError::InvalidResponse)?;

    match envelope.data {
        Some(SessionData {
            token: Some(token),
            user: Some(user),
        }) if envelope.success && !token.is_empty() => Ok(Session::new(token, user)),
        _ => Err(AuthError::InvalidResponse),
    }
}

/// Password and Google sign-in. These calls never carry a bearer token.
pub trait AuthService {
    /// `POST /api/users/login`. The caller persists the returned session.
    fn login(&self, email: &str, password: &str) -> Result<Session, AuthError>;

    /// Asks the backend where to send the user for Google sign-in.
    fn google_login_url(&self) -> Result<String, AuthError>;

    /// Exchanges the authorization code from the OAuth redirect for a session.
    fn google_callback(
        &self,
        code: Option<&str>,
        state: Option<&str>,
    ) -> Result<Session, AuthError>;
}

impl<T: Transport> AuthService for ApiClient<T> {
    fn login(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let body = json!({ "email": email, "password": password });
        let reply = self.send_anonymous(Method::Post, "/api/users/login", Some(&body))?;
        session_from_reply(reply, "Login failed")
    }

    fn google_login_url(&self) -> Result<String, AuthError> {
        let reply = self.send_anonymous(Method::Get, "/api/auth/google/login", NO_BODY)?;
        if !reply.is_success() {
            return Err(AuthError::OAuthUrlUnavailable);
        }

        serde_json::from_value::<OAuthUrlEnvelope>(reply.body)
            .ok()
            .and_then(|e| e.data)
            .and_then(|d| d.auth_url)
            .filter(|url| !url.is_empty())
            .ok_or(AuthError::OAuthUrlUnavailable)
    }

    fn google_callback(
        &self,
        code: Option<&str>,
        state: Option<&str>,
    ) -> Result<Session, AuthError> {
        let code = code.filter(|c| !c.is_empty()).ok_or(AuthError::MissingCode)?;
        let body = json!({ "code": code, "state": state });
        let reply = self.send_anonymous(Method::Post, "/api/auth/google/callback", Some(&body))?;
        session_from_reply(reply, "Authentication failed")
    }
}
