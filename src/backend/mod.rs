//! Client for the external Sulio API.
//!
//! Registration, OTP verification, login, password reset, the chatbot and
//! the diary all live in the backend service; this module only speaks its
//! JSON-over-HTTP interface. Calls that need an identity send the token the
//! same way the browser does, as a `token` cookie.

mod types;

pub use self::types::{
    ChatReply, ChatRequest, DiaryEntry, LoginRequest, LoginResponse, NewDiaryEntry,
    PasswordResetRequest, RegisterRequest, ResetPasswordRequest, VerifyOtpRequest,
};

use crate::{guard::cookie::TOKEN_COOKIE_NAME, APP_USER_AGENT};
use reqwest::{header::COOKIE, Method, RequestBuilder, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, instrument};
use url::Url;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";

const NO_CHAT_RESPONSE: &str = "AI did not return a response.";

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid base URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid response body: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{message}")]
    Api { status: StatusCode, message: String },
}

impl Error {
    /// HTTP status of an API error.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(err) => err.status(),
            _ => None,
        }
    }
}

#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
    token: Option<SecretString>,
}

impl Client {
    /// Client for the API rooted at `base_url`, e.g. `http://localhost:5000/api`.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not a valid URL or the HTTP client
    /// cannot be built.
    pub fn new(base_url: &str) -> Result<Self, Error> {
        Url::parse(base_url)?;

        let http = reqwest::Client::builder()
            .user_agent(APP_USER_AGENT)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    /// Attach the session token sent with every request.
    #[must_use]
    pub fn with_token(mut self, token: SecretString) -> Self {
        self.token = Some(token);
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// # Errors
    ///
    /// Returns [`Error::Api`] with the backend's message when registration is rejected.
    #[instrument(skip_all, fields(email = %user.email))]
    pub async fn register(&self, user: &RegisterRequest) -> Result<Value, Error> {
        self.send(self.json(Method::POST, "/auth/register", user), "Registration failed")
            .await
    }

    /// # Errors
    ///
    /// Returns [`Error::Api`] when the OTP is wrong or expired.
    #[instrument(skip_all, fields(email = %data.email))]
    pub async fn verify_otp(&self, data: &VerifyOtpRequest) -> Result<Value, Error> {
        self.send(
            self.json(Method::POST, "/auth/verify", data),
            "OTP verification failed",
        )
        .await
    }

    /// # Errors
    ///
    /// Returns [`Error::Api`] when the credentials are rejected.
    #[instrument(skip_all, fields(email = %credentials.email))]
    pub async fn login(&self, credentials: &LoginRequest) -> Result<LoginResponse, Error> {
        self.send(
            self.json(Method::POST, "/auth/login", credentials),
            "Login failed",
        )
        .await
    }

    /// # Errors
    ///
    /// Returns [`Error::Api`] when the backend refuses to send a reset code.
    #[instrument(skip(self))]
    pub async fn request_password_reset(&self, email: &str) -> Result<Value, Error> {
        let body = PasswordResetRequest {
            email: email.to_string(),
        };
        self.send(
            self.json(Method::POST, "/auth/request-password-reset", &body),
            "Password reset request failed",
        )
        .await
    }

    /// # Errors
    ///
    /// Returns [`Error::Api`] when the reset code or new password is rejected.
    #[instrument(skip_all, fields(email = %data.email))]
    pub async fn reset_password(&self, data: &ResetPasswordRequest) -> Result<Value, Error> {
        self.send(
            self.json(Method::POST, "/auth/reset-password", data),
            "Password reset failed",
        )
        .await
    }

    /// Ask the chatbot; returns its answer text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Api`] when the backend fails to answer.
    #[instrument(skip_all, fields(task = %request.task))]
    pub async fn chat(&self, request: &ChatRequest) -> Result<String, Error> {
        let reply: ChatReply = self
            .send(
                self.json(Method::POST, "/chat/chat", request),
                "AI failed to respond.",
            )
            .await?;
        Ok(reply
            .response
            .unwrap_or_else(|| NO_CHAT_RESPONSE.to_string()))
    }

    /// # Errors
    ///
    /// Returns [`Error::Api`] when the entries cannot be fetched.
    #[instrument(skip(self))]
    pub async fn diary_entries(&self) -> Result<Vec<DiaryEntry>, Error> {
        let listing: types::DiaryListing = self
            .send(
                self.request(Method::GET, "/diary"),
                "Failed to fetch diary entries",
            )
            .await?;
        Ok(listing.into())
    }

    /// # Errors
    ///
    /// Returns [`Error::Api`] when the entry is rejected.
    #[instrument(skip_all)]
    pub async fn create_diary_entry(&self, entry: &NewDiaryEntry) -> Result<DiaryEntry, Error> {
        self.send(self.json(Method::POST, "/diary", entry), "Failed to save entry")
            .await
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .http
            .request(method, format!("{}{path}", self.base_url));
        match &self.token {
            Some(token) => builder.header(
                COOKIE,
                format!("{TOKEN_COOKIE_NAME}={}", token.expose_secret()),
            ),
            None => builder,
        }
    }

    fn json<T: Serialize + ?Sized>(&self, method: Method, path: &str, body: &T) -> RequestBuilder {
        self.request(method, path).json(body)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        fallback: &str,
    ) -> Result<T, Error> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        debug!("backend responded {}", status);

        if !status.is_success() {
            return Err(Error::Api {
                status,
                message: error_message(&body).unwrap_or_else(|| fallback.to_string()),
            });
        }

        Ok(serde_json::from_slice(&body)?)
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "***"))
            .finish()
    }
}

// The backend reports failures as `message` on auth routes and `error` elsewhere.
fn error_message(body: &[u8]) -> Option<String> {
    let value: Value = serde_json::from_slice(body).ok()?;
    ["message", "error"]
        .iter()
        .find_map(|key| value.get(*key)?.as_str())
        .filter(|message| !message.is_empty())
        .map(str::to_string)
}
