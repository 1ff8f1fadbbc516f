use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::ApiResponse;
use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    /// bearer token, sent as `Authorization: Bearer <token>` when present
    pub bearer: Option<String>,
    pub body: Option<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpReply {
    pub status: u16,
    pub body: Value,
}

impl HttpReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Moves one JSON request to the backend and brings back the JSON reply.
///
/// Non-2xx replies with a JSON body are replies, not errors: the backend
/// reports failures inside the envelope.
pub trait Transport {
    fn send(&self, request: &HttpRequest) -> Result<HttpReply, RequestError>;
}

#[derive(Error, Debug)]
pub enum RequestError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] ureq::Error),

    #[error("Failed to read response body: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to encode request body: {0}")]
    EncodeError(#[from] serde_json::Error),

    #[error("Server returned an error: {status}")]
    ServerError { status: u16 },
}

pub fn authorization_header(token: Option<&str>) -> Option<String> {
    token
        .filter(|t| !t.is_empty())
        .map(|t| format!("Bearer {}", t))
}

#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        Self {
            agent: ureq::AgentBuilder::new().build(),
        }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpReply, RequestError> {
        let mut call = self
            .agent
            .request(request.method.as_str(), &request.url)
            .set("Content-Type", "application/json");

        if let Some(header) = authorization_header(request.bearer.as_deref()) {
            call = call.set("Authorization", &header);
        }

        let result = match &request.body {
            Some(body) => call.send_json(body),
            None => call.call(),
        };

        match result {
            Ok(response) => {
                let status = response.status();
                let body: Value = response.into_json()?;
                Ok(HttpReply { status, body })
            }
            Err(ureq::Error::Status(status, response)) => {
                let body: Value = response
                    .into_json()
                    .map_err(|_| RequestError::ServerError { status })?;
                Ok(HttpReply { status, body })
            }
            Err(other) => Err(RequestError::HttpError(other)),
        }
    }
}

/// Typed client for the LearnMate backend.
///
/// The session is injected at construction; every request made through
/// [`ApiClient::send`] carries its token.
#[derive(Debug, Clone)]
pub struct ApiClient<T = UreqTransport> {
    base_url: String,
    transport: T,
    session: Option<Session>,
}

impl ApiClient<UreqTransport> {
    pub fn new(base_url: &str) -> Self {
        Self::with_transport(base_url, UreqTransport::new())
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn with_transport(base_url: &str, transport: T) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
            session: None,
        }
    }

    pub fn with_session(mut self, session: Option<Session>) -> Self {
        self.session = session;
        self
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.session.as_ref().is_some_and(Session::is_admin)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Sends an authorized request.
    pub(crate) fn send<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<HttpReply, RequestError>
    where
        B: Serialize + ?Sized,
    {
        let token = self.session.as_ref().map(|s| s.token().to_string());
        self.send_as(method, path, body, token)
    }

    /// Sends a request without the session token, used by the login flows.
    pub(crate) fn send_anonymous<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<HttpReply, RequestError>
    where
        B: Serialize + ?Sized,
    {
        self.send_as(method, path, body, None)
    }

    fn send_as<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        bearer: Option<String>,
    ) -> Result<HttpReply, RequestError>
    where
        B: Serialize + ?Sized,
    {
        let body = body.map(serde_json::to_value).transpose()?;
        let request = HttpRequest {
            method,
            url: self.url(path),
            bearer,
            body,
        };

        tracing::debug!(method = method.as_str(), url = %request.url, "sending request");
        let reply = self.transport.send(&request)?;
        tracing::debug!(status = reply.status, url = %request.url, "received reply");
        Ok(reply)
    }

    /// Performs a call and reads the reply as an envelope, degrading any
    /// transport or decode failure to `{success: false, error: failure}`.
    pub(crate) fn exchange<B, D>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        failure: &str,
    ) -> ApiResponse<D>
    where
        B: Serialize + ?Sized,
        D: DeserializeOwned,
    {
        match self.send(method, path, body) {
            Ok(reply) => decode_envelope(reply.body, failure),
            Err(e) => {
                tracing::warn!(path, error = %e, "{}", failure);
                ApiResponse::failure(failure)
            }
        }
    }
}

pub(crate) fn decode_envelope<D: DeserializeOwned>(body: Value, failure: &str) -> ApiResponse<D> {
    match serde_json::from_value::<ApiResponse<D>>(body) {
        Ok(envelope) => envelope,
        Err(e) => {
            tracing::warn!(error = %e, "{}: unexpected response shape", failure);
            ApiResponse::failure(failure)
        }
    }
}

/// Placeholder body for requests that send none.
pub(crate) const NO_BODY: Option<&Value> = None;
