//! Backend client against a mocked Sulio API.

use anyhow::Result;
use mockito::Matcher;
use reqwest::StatusCode;
use secrecy::SecretString;
use serde_json::json;
use sulio::backend::{
    ChatRequest, Client, Error, LoginRequest, NewDiaryEntry, RegisterRequest,
    ResetPasswordRequest, VerifyOtpRequest,
};

fn api_base(server: &mockito::ServerGuard) -> String {
    format!("{}/api", server.url())
}

#[tokio::test]
async fn login_returns_token() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/auth/login")
        .match_body(Matcher::Json(json!({
            "email": "ana@example.com",
            "password": "hunter22"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"token":"abc.def.ghi","user":{"email":"ana@example.com"}}"#)
        .create_async()
        .await;

    let client = Client::new(&api_base(&server))?;
    let response = client
        .login(&LoginRequest {
            email: "ana@example.com".to_string(),
            password: "hunter22".to_string(),
        })
        .await?;

    assert_eq!(response.token.as_deref(), Some("abc.def.ghi"));
    assert_eq!(response.user, Some(json!({ "email": "ana@example.com" })));
    mock.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn login_failure_surfaces_backend_message() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/api/auth/login")
        .with_status(401)
        .with_body(r#"{"message":"Invalid credentials"}"#)
        .create_async()
        .await;

    let client = Client::new(&api_base(&server))?;
    let err = client
        .login(&LoginRequest {
            email: "ana@example.com".to_string(),
            password: "wrong".to_string(),
        })
        .await
        .err()
        .ok_or_else(|| anyhow::anyhow!("login should fail"))?;

    assert_eq!(err.to_string(), "Invalid credentials");
    assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
    Ok(())
}

#[tokio::test]
async fn failure_without_message_uses_fallback() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/api/auth/verify")
        .with_status(500)
        .with_body("upstream exploded")
        .create_async()
        .await;

    let client = Client::new(&api_base(&server))?;
    let result = client
        .verify_otp(&VerifyOtpRequest {
            email: "ana@example.com".to_string(),
            otp: "123456".to_string(),
        })
        .await;

    assert!(matches!(
        result,
        Err(Error::Api { status, ref message })
            if status == StatusCode::INTERNAL_SERVER_ERROR && message == "OTP verification failed"
    ));
    Ok(())
}

#[tokio::test]
async fn register_sends_camel_case_fields() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/auth/register")
        .match_body(Matcher::Json(json!({
            "firstName": "Ana",
            "lastName": "Lima",
            "email": "ana@example.com",
            "phoneNumber": "555-0100",
            "password": "hunter22",
            "confirmPassword": "hunter22"
        })))
        .with_status(201)
        .with_body(r#"{"message":"OTP sent"}"#)
        .create_async()
        .await;

    let client = Client::new(&api_base(&server))?;
    let reply = client
        .register(&RegisterRequest {
            first_name: "Ana".to_string(),
            last_name: "Lima".to_string(),
            email: "ana@example.com".to_string(),
            phone_number: "555-0100".to_string(),
            password: "hunter22".to_string(),
            confirm_password: "hunter22".to_string(),
        })
        .await?;

    assert_eq!(reply["message"], "OTP sent");
    mock.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn password_reset_flow() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let request = server
        .mock("POST", "/api/auth/request-password-reset")
        .match_body(Matcher::Json(json!({ "email": "ana@example.com" })))
        .with_status(200)
        .with_body(r#"{"message":"Reset code sent"}"#)
        .create_async()
        .await;
    let reset = server
        .mock("POST", "/api/auth/reset-password")
        .match_body(Matcher::Json(json!({
            "email": "ana@example.com",
            "otp": "654321",
            "newPassword": "n3w-pass",
            "confirmPassword": "n3w-pass"
        })))
        .with_status(400)
        .with_body(r#"{"error":"OTP expired"}"#)
        .create_async()
        .await;

    let client = Client::new(&api_base(&server))?;
    client.request_password_reset("ana@example.com").await?;

    let err = client
        .reset_password(&ResetPasswordRequest {
            email: "ana@example.com".to_string(),
            otp: "654321".to_string(),
            new_password: "n3w-pass".to_string(),
            confirm_password: "n3w-pass".to_string(),
        })
        .await
        .err()
        .ok_or_else(|| anyhow::anyhow!("reset should fail"))?;

    assert_eq!(err.to_string(), "OTP expired");
    request.assert_async().await;
    reset.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn chat_sends_token_cookie() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/chat/chat")
        .match_header("cookie", "token=abc.def.ghi")
        .match_body(Matcher::Json(json!({
            "query": "hello",
            "igid": "ig-1",
            "task": "general"
        })))
        .with_status(200)
        .with_body(r#"{"response":"Hi there"}"#)
        .create_async()
        .await;

    let client = Client::new(&api_base(&server))?
        .with_token(SecretString::from("abc.def.ghi".to_string()));
    let answer = client.chat(&ChatRequest::general("hello", "ig-1")).await?;

    assert_eq!(answer, "Hi there");
    mock.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn chat_without_response_uses_default_text() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/api/chat/chat")
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;

    let client = Client::new(&api_base(&server))?;
    let answer = client.chat(&ChatRequest::general("hello", "ig-1")).await?;

    assert_eq!(answer, "AI did not return a response.");
    Ok(())
}

#[tokio::test]
async fn diary_entries_accepts_both_shapes() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let client = Client::new(&api_base(&server))?;

    let bare = server
        .mock("GET", "/api/diary")
        .with_status(200)
        .with_body(r#"[{"_id":"1","content":"first","mood":"happy","tags":["a"]}]"#)
        .create_async()
        .await;
    let entries = client.diary_entries().await?;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].id.as_deref(), Some("1"));
    assert_eq!(entries[0].tags, vec!["a".to_string()]);
    bare.remove_async().await;

    let _wrapped = server
        .mock("GET", "/api/diary")
        .with_status(200)
        .with_body(r#"{"entries":[{"content":"one"},{"content":"two"}]}"#)
        .create_async()
        .await;
    let entries = client.diary_entries().await?;
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[1].content, "two");
    Ok(())
}

#[tokio::test]
async fn create_diary_entry_splits_tags() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/diary")
        .match_body(Matcher::Json(json!({
            "content": "Slept well",
            "mood": "calm",
            "tags": ["sleep", "rest"]
        })))
        .with_status(201)
        .with_body(r#"{"_id":"42","content":"Slept well","mood":"calm","tags":["sleep","rest"]}"#)
        .create_async()
        .await;

    let client = Client::new(&api_base(&server))?;
    let entry = client
        .create_diary_entry(&NewDiaryEntry::new("Slept well", "calm", "sleep, rest,"))
        .await?;

    assert_eq!(entry.id.as_deref(), Some("42"));
    mock.assert_async().await;
    Ok(())
}

#[tokio::test]
async fn diary_failure_uses_fallback() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/api/diary")
        .with_status(503)
        .create_async()
        .await;

    let client = Client::new(&api_base(&server))?;
    let err = client
        .diary_entries()
        .await
        .err()
        .ok_or_else(|| anyhow::anyhow!("listing should fail"))?;

    assert_eq!(err.to_string(), "Failed to fetch diary entries");
    Ok(())
}
