use bandcoach::GatewayError;
use bandcoach::feedback::{EssayTask, FeedbackGateway, FeedbackRequest, FeedbackResponse, word_count};

use crate::scripted_provider::{ScriptedProvider, credential, essay_of, essay_reply};

#[tokio::test]
async fn task2_essay_is_scored_from_a_clean_reply() {
    let essay = essay_of(300);
    assert_eq!(word_count(&essay), 300);

    let gateway = FeedbackGateway::new(ScriptedProvider::replying(&essay_reply(7.5)));
    let feedback = gateway
        .submit_essay_for_scoring(&credential(), &essay, "Discuss X", EssayTask::Task2)
        .await
        .expect("well-formed reply should score");

    assert_eq!(feedback.scores.overall.value(), 7.5);
    assert!(!feedback.feedback.task_response.is_empty());
    assert!(!feedback.feedback.coherence.is_empty());
    assert!(!feedback.feedback.lexical.is_empty());
    assert!(!feedback.feedback.grammar.is_empty());
    assert_eq!(feedback.comparisons.len(), 2);

    let provider = gateway.provider();
    assert_eq!(provider.calls(), 1);
    let request = &provider.requests()[0];
    assert!(request.json_reply);
    let instruction = &request.turns[0].content;
    assert!(instruction.contains("Discuss X"));
    assert!(instruction.contains(&essay));
    assert_eq!(provider.credentials_seen(), ["AIzaSyIntegrationTestKey"]);
}

#[tokio::test]
async fn fenced_and_prose_wrapped_reply_matches_clean_reply() {
    let clean = essay_reply(7.0);
    let wrapped = format!("Here is my assessment:\n```json\n{clean}\n```\nGood luck with the exam!");

    let essay = essay_of(260);
    let from_clean = FeedbackGateway::new(ScriptedProvider::replying(&clean))
        .submit_essay_for_scoring(&credential(), &essay, "Discuss X", EssayTask::Task2)
        .await
        .expect("clean reply");
    let from_wrapped = FeedbackGateway::new(ScriptedProvider::replying(&wrapped))
        .submit_essay_for_scoring(&credential(), &essay, "Discuss X", EssayTask::Task2)
        .await
        .expect("wrapped reply");

    assert_eq!(from_clean, from_wrapped);
}

#[tokio::test]
async fn task1_reply_may_use_task_achievement_key() {
    let reply = essay_reply(6.5).replace("taskResponse", "taskAchievement");
    let gateway = FeedbackGateway::new(ScriptedProvider::replying(&reply));
    let feedback = gateway
        .submit_essay_for_scoring(
            &credential(),
            &essay_of(170),
            "The chart shows household spending",
            EssayTask::Task1,
        )
        .await
        .expect("task achievement alias");

    assert_eq!(feedback.scores.task_response.value(), 7.5);
    let instruction = &gateway.provider().requests()[0].turns[0].content;
    assert!(instruction.contains("Task Achievement"));
}

#[tokio::test]
async fn out_of_range_overall_is_never_clamped() {
    let gateway = FeedbackGateway::new(ScriptedProvider::replying(&essay_reply(9.5)));
    let err = gateway
        .submit_essay_for_scoring(&credential(), &essay_of(300), "Discuss X", EssayTask::Task2)
        .await
        .expect_err("9.5 is outside the band scale");
    assert!(matches!(err, GatewayError::MalformedReply { .. }));
}

#[tokio::test]
async fn off_grid_band_is_rejected() {
    let gateway = FeedbackGateway::new(ScriptedProvider::replying(&essay_reply(7.3)));
    let err = gateway
        .submit_essay_for_scoring(&credential(), &essay_of(300), "Discuss X", EssayTask::Task2)
        .await
        .expect_err("7.3 is not a half band");
    assert!(matches!(err, GatewayError::MalformedReply { .. }));
}

#[tokio::test]
async fn reply_without_json_object_is_malformed() {
    let gateway = FeedbackGateway::new(ScriptedProvider::replying(
        "I'm sorry, I can't grade that essay right now.",
    ));
    let err = gateway
        .submit_essay_for_scoring(&credential(), &essay_of(300), "Discuss X", EssayTask::Task2)
        .await
        .expect_err("prose-only reply");
    assert!(matches!(err, GatewayError::MalformedReply { .. }));
    assert_eq!(gateway.provider().calls(), 1);
}

#[tokio::test]
async fn missing_feedback_text_is_malformed() {
    let reply = essay_reply(7.0).replace("Paragraphs are logically sequenced.", "");
    let gateway = FeedbackGateway::new(ScriptedProvider::replying(&reply));
    let err = gateway
        .submit_essay_for_scoring(&credential(), &essay_of(300), "Discuss X", EssayTask::Task2)
        .await
        .expect_err("empty coherence feedback");
    assert!(matches!(err, GatewayError::MalformedReply { .. }));
}

#[tokio::test]
async fn submit_routes_writing1_requests() {
    let gateway = FeedbackGateway::new(ScriptedProvider::replying(&essay_reply(6.0)));
    let request = FeedbackRequest::essay(EssayTask::Task1, "The map shows", essay_of(160));
    let response = gateway
        .submit(&credential(), &request)
        .await
        .expect("writing 1 response");

    let FeedbackResponse::Writing1(feedback) = response else {
        panic!("expected a Writing1 response, got {response:?}");
    };
    assert_eq!(feedback.scores.overall.value(), 6.0);
}

#[tokio::test]
async fn speaking_transcript_is_assessed() {
    let reply = serde_json::json!({
        "scores": {"fluency": 6, "lexical": 6.5, "grammar": 6, "pronunciation": 7, "overall": 6.5},
        "feedback": {
            "fluency": "Frequent pauses mid-sentence.",
            "lexical": "Adequate range for familiar topics.",
            "grammar": "Mostly simple sentences.",
            "pronunciation": "Generally easy to follow."
        },
        "fillers": ["um", "you know"],
        "comparisons": [{"original": "It is nice place.", "improved": "It's a delightful spot."}]
    })
    .to_string();

    let gateway = FeedbackGateway::new(ScriptedProvider::replying(&reply));
    let feedback = gateway
        .assess_speaking(
            &credential(),
            "Um, my hometown is, you know, a small town near the coast.",
            "Describe your hometown",
        )
        .await
        .expect("speaking reply");

    assert_eq!(feedback.scores.overall.value(), 6.5);
    assert_eq!(feedback.fillers, ["um", "you know"]);
    let instruction = &gateway.provider().requests()[0].turns[0].content;
    assert!(instruction.contains("Describe your hometown"));
    assert!(instruction.contains("Pronunciation"));
}
