use bandcoach::GatewayError;
use bandcoach::feedback::{EssayTask, FeedbackGateway};

use crate::scripted_provider::{ScriptedProvider, credential, essay_of};

async fn score_with_failure(message: &str) -> GatewayError {
    let gateway = FeedbackGateway::new(ScriptedProvider::failing(message));
    let err = gateway
        .submit_essay_for_scoring(&credential(), &essay_of(300), "Discuss X", EssayTask::Task2)
        .await
        .expect_err("scripted failure");
    assert_eq!(gateway.provider().calls(), 1, "failures are not retried");
    err
}

#[tokio::test]
async fn rejected_key_is_invalid_credential() {
    let err = score_with_failure(
        "Gemini API error (400 Bad Request): INVALID_ARGUMENT: API key not valid. Please pass a valid API key.",
    )
    .await;
    assert_eq!(err, GatewayError::InvalidCredential);
}

#[tokio::test]
async fn exhausted_quota_is_quota_exceeded() {
    let err = score_with_failure(
        "Gemini API error (429 Too Many Requests): RESOURCE_EXHAUSTED: Resource has been exhausted (e.g. check quota).",
    )
    .await;
    assert_eq!(err, GatewayError::QuotaExceeded);
}

#[tokio::test]
async fn transport_failure_is_network_failure() {
    let err = score_with_failure("error sending request for url (https://generativelanguage.googleapis.com/)").await;
    assert_eq!(err, GatewayError::NetworkFailure);
}

#[tokio::test]
async fn unknown_failure_keeps_sanitized_message() {
    let err = score_with_failure("Gemini API error (500 Internal Server Error): INTERNAL: backend unavailable").await;
    let GatewayError::ProviderFailure(message) = err else {
        panic!("expected ProviderFailure, got {err:?}");
    };
    assert!(message.contains("backend unavailable"));
}

#[tokio::test]
async fn credential_check_succeeds_on_any_reply() {
    let gateway = FeedbackGateway::new(ScriptedProvider::replying("Hello! How can I help?"));
    gateway
        .validate_credential(&credential())
        .await
        .expect("key accepted");

    let request = &gateway.provider().requests()[0];
    assert_eq!(request.turns.len(), 1);
    assert_eq!(request.turns[0].content, "Test");
}

#[tokio::test]
async fn credential_check_reports_rejection() {
    let gateway = FeedbackGateway::new(ScriptedProvider::failing(
        "Gemini API error (400 Bad Request): INVALID_ARGUMENT: API key not valid.",
    ));
    assert_eq!(
        gateway.validate_credential(&credential()).await,
        Err(GatewayError::InvalidCredential)
    );
}

#[tokio::test]
async fn failed_chat_turn_leaves_history_untouched() {
    let gateway = FeedbackGateway::new(ScriptedProvider::failing("TypeError: fetch failed"));
    let history = vec![bandcoach::llm::ChatTurn::user("Hi")];
    let err = gateway
        .chat(&credential(), &history, "Are you there?")
        .await
        .expect_err("network failure");
    assert_eq!(err, GatewayError::NetworkFailure);
    assert_eq!(history.len(), 1);
}
