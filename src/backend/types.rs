use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VerifyOtpRequest {
    pub email: String,
    pub otp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login reply. The token may also arrive only as a `Set-Cookie`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<Value>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PasswordResetRequest {
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub email: String,
    pub otp: String,
    pub new_password: String,
    pub confirm_password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatRequest {
    pub query: String,
    pub igid: String,
    pub task: String,
}

impl ChatRequest {
    /// Query for the general task.
    #[must_use]
    pub fn general(query: impl Into<String>, igid: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            igid: igid.into(),
            task: "general".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatReply {
    #[serde(default)]
    pub response: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewDiaryEntry {
    pub content: String,
    pub mood: String,
    pub tags: Vec<String>,
}

impl NewDiaryEntry {
    /// Entry from comma-separated `tags`; blank tags are dropped.
    #[must_use]
    pub fn new(content: impl Into<String>, mood: impl Into<String>, tags: &str) -> Self {
        Self {
            content: content.into(),
            mood: mood.into(),
            tags: tags
                .split(',')
                .map(str::trim)
                .filter(|tag| !tag.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DiaryEntry {
    #[serde(default, alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub content: String,
    #[serde(default)]
    pub mood: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// The backend answers either `[...]` or `{ "entries": [...] }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum DiaryListing {
    Bare(Vec<DiaryEntry>),
    Wrapped { entries: Vec<DiaryEntry> },
}

impl From<DiaryListing> for Vec<DiaryEntry> {
    fn from(listing: DiaryListing) -> Self {
        match listing {
            DiaryListing::Bare(entries) | DiaryListing::Wrapped { entries } => entries,
        }
    }
}
