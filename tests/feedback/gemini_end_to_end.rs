use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use bandcoach::GatewayError;
use bandcoach::feedback::{EssayTask, FeedbackGateway};
use bandcoach::llm::{ChatTurn, GeminiProvider};

use crate::scripted_provider::{credential, essay_of, essay_reply};

const MODEL: &str = "gemini-1.5-flash";
const GENERATE_PATH: &str = "/v1beta/models/gemini-1.5-flash:generateContent";

fn candidate(text: &str) -> serde_json::Value {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }],
        "usageMetadata": { "promptTokenCount": 420, "candidatesTokenCount": 180 }
    })
}

fn gateway_for(server: &MockServer) -> FeedbackGateway<GeminiProvider> {
    FeedbackGateway::new(GeminiProvider::with_base_url(&server.uri(), MODEL))
}

#[tokio::test]
async fn essay_scoring_round_trip_through_gemini() {
    let server = MockServer::start().await;
    let fenced = format!("```json\n{}\n```", essay_reply(7.5));

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(header("x-goog-api-key", "AIzaSyIntegrationTestKey"))
        .and(body_partial_json(json!({
            "generationConfig": { "responseMimeType": "application/json" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(candidate(&fenced)))
        .expect(1)
        .mount(&server)
        .await;

    let feedback = gateway_for(&server)
        .submit_essay_for_scoring(&credential(), &essay_of(300), "Discuss X", EssayTask::Task2)
        .await
        .expect("scored essay");

    assert_eq!(feedback.scores.overall.value(), 7.5);
    assert_eq!(feedback.scores.lexical.value(), 8.0);
}

#[tokio::test]
async fn chat_turns_are_sent_with_model_role() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(body_partial_json(json!({
            "contents": [
                { "role": "user", "parts": [{ "text": "A" }] },
                { "role": "model", "parts": [{ "text": "B" }] },
                { "role": "user", "parts": [{ "text": "C" }] }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(candidate("Happy to help.")))
        .expect(1)
        .mount(&server)
        .await;

    let reply = gateway_for(&server)
        .chat(
            &credential(),
            &[ChatTurn::user("A"), ChatTurn::assistant("B")],
            "C",
        )
        .await
        .expect("chat reply");
    assert_eq!(reply, "Happy to help.");
}

#[tokio::test]
async fn invalid_key_maps_to_invalid_credential() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {
                "code": 400,
                "message": "API key not valid. Please pass a valid API key.",
                "status": "INVALID_ARGUMENT"
            }
        })))
        .mount(&server)
        .await;

    let result = gateway_for(&server).validate_credential(&credential()).await;
    assert_eq!(result, Err(GatewayError::InvalidCredential));
}

#[tokio::test]
async fn quota_error_maps_to_quota_exceeded() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": {
                "code": 429,
                "message": "Resource has been exhausted (e.g. check quota).",
                "status": "RESOURCE_EXHAUSTED"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = gateway_for(&server)
        .repair_grammar(&credential(), "i is happy")
        .await
        .expect_err("quota exhausted");
    assert_eq!(err, GatewayError::QuotaExceeded);
}

#[tokio::test]
async fn unreachable_host_maps_to_network_failure() {
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let gateway = FeedbackGateway::new(GeminiProvider::with_base_url(&uri, MODEL));
    let err = gateway
        .repair_grammar(&credential(), "i is happy")
        .await
        .expect_err("nothing is listening");
    assert_eq!(err, GatewayError::NetworkFailure);
}

#[tokio::test]
async fn blocked_prompt_is_provider_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "promptFeedback": { "blockReason": "SAFETY" } })),
        )
        .mount(&server)
        .await;

    let err = gateway_for(&server)
        .chat(&credential(), &[], "Tell me something")
        .await
        .expect_err("blocked");
    assert!(matches!(err, GatewayError::ProviderFailure(ref m) if m.contains("SAFETY")));
}
