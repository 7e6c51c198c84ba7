use bandcoach::GatewayError;
use bandcoach::feedback::{FeedbackGateway, FeedbackRequest, FeedbackResponse, StyleMode, TaskType};
use bandcoach::llm::{ChatRole, ChatTurn};

use crate::scripted_provider::{ScriptedProvider, credential};

#[tokio::test]
async fn chat_history_reaches_provider_in_order() {
    let gateway = FeedbackGateway::new(ScriptedProvider::replying("Sure, here are some tips."));
    let history = [ChatTurn::user("A"), ChatTurn::assistant("B")];

    let reply = gateway
        .chat(&credential(), &history, "C")
        .await
        .expect("chat reply");
    assert_eq!(reply, "Sure, here are some tips.");

    let requests = gateway.provider().requests();
    assert_eq!(requests.len(), 1);
    let turns: Vec<(ChatRole, &str)> = requests[0]
        .turns
        .iter()
        .map(|turn| (turn.role, turn.content.as_str()))
        .collect();
    assert_eq!(
        turns,
        [
            (ChatRole::User, "A"),
            (ChatRole::Assistant, "B"),
            (ChatRole::User, "C"),
        ]
    );
    assert!(requests[0].system.is_some());
    assert!(!requests[0].json_reply);
}

#[tokio::test]
async fn chat_request_via_submit_carries_history() {
    let gateway = FeedbackGateway::new(ScriptedProvider::replying("Band 7 needs a clear overview."));
    let request = FeedbackRequest::chat(
        vec![
            ChatTurn::user("How is Task 1 marked?"),
            ChatTurn::assistant("On four criteria."),
        ],
        "What about band 7?",
    );

    let response = gateway.submit(&credential(), &request).await.expect("chat");
    assert_eq!(response.task(), TaskType::Chat);
    assert_eq!(
        response,
        FeedbackResponse::Chat {
            reply: "Band 7 needs a clear overview.".into()
        }
    );
    assert_eq!(gateway.provider().requests()[0].turns.len(), 3);
}

#[tokio::test]
async fn grammar_repair_returns_corrected_text() {
    let gateway = FeedbackGateway::new(ScriptedProvider::replying("I am happy.\n"));
    let corrected = gateway
        .repair_grammar(&credential(), "i is happy")
        .await
        .expect("grammar reply");

    assert!(!corrected.is_empty());
    assert_eq!(corrected, "I am happy.");
    let instruction = &gateway.provider().requests()[0].turns[0].content;
    assert!(instruction.contains("i is happy"));
}

#[tokio::test]
async fn style_transform_uses_requested_mode() {
    let gateway = FeedbackGateway::new(ScriptedProvider::new([
        Ok("Urban congestion has intensified considerably.".to_string()),
        Ok("Traffic has grown worse.".to_string()),
    ]));

    let academic = gateway
        .transform_style(&credential(), "Traffic in cities is getting really bad.", StyleMode::Academic)
        .await
        .expect("academic rewrite");
    let concise = gateway
        .transform_style(&credential(), "Traffic in cities is getting really bad.", StyleMode::Concise)
        .await
        .expect("concise rewrite");

    assert_eq!(academic, "Urban congestion has intensified considerably.");
    assert_eq!(concise, "Traffic has grown worse.");

    let requests = gateway.provider().requests();
    assert!(requests[0].turns[0].content.contains("Band 9"));
    assert!(requests[1].turns[0].content.contains("concise"));
}

#[tokio::test]
async fn brainstorm_reply_is_parsed() {
    let reply = r#"```json
{"agree": ["Reduces traffic", "Helps low-income families", "Cuts emissions"],
 "disagree": ["Expensive for taxpayers", "May overcrowd services", "Less funding for upkeep"],
 "structure": "Intro > Body 1 (benefits) > Body 2 (costs) > Conclusion"}
```"#;
    let gateway = FeedbackGateway::new(ScriptedProvider::replying(reply));
    let ideas = gateway
        .request_brainstorm(&credential(), "Should public transport be free?")
        .await
        .expect("brainstorm reply");

    assert_eq!(ideas.agree.len(), 3);
    assert_eq!(ideas.disagree.len(), 3);
    assert!(ideas.structure.starts_with("Intro"));
}

#[tokio::test]
async fn brainstorm_without_counterpoints_is_malformed() {
    let gateway = FeedbackGateway::new(ScriptedProvider::replying(
        r#"{"agree": ["One"], "disagree": [], "structure": "Intro > Conclusion"}"#,
    ));
    let err = gateway
        .request_brainstorm(&credential(), "Should public transport be free?")
        .await
        .expect_err("empty disagree list");
    assert!(matches!(err, GatewayError::MalformedReply { .. }));
}
