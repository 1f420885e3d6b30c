use crate::api::ApiClient;
use crate::chat::composer::{accept_input, counter_state, Severity};
use crate::chat::session::{ChatSession, ExchangePhase, Intent};
use crate::chat::transcript::{Speaker, Transcript, TranscriptEntry};
use crate::models::BotReply;
use crate::render::Renderer;

// Helper: a session pointed at a never-listening port, so any exchange that
// does reach the network fails fast with a transport error.
fn create_test_session() -> ChatSession {
    let client = ApiClient::new("http://127.0.0.1:9".to_string(), false);
    ChatSession::new(client, Renderer::new())
}

fn create_test_reply(response_type: &str) -> BotReply {
    serde_json::from_str(&format!(
        r#"{{
            "bot_response": "test reply",
            "response_type": "{}",
            "sentiment": "POSITIVE",
            "confidence": 0.9
        }}"#,
        response_type
    ))
    .unwrap()
}

#[test]
fn counter_text_matches_length() {
    for len in [0usize, 1, 250, 400, 401, 450, 451, 500, 600] {
        let text = "a".repeat(len);
        let counter = counter_state(&text);
        assert_eq!(counter.text, format!("{}/500", len));
    }
}

#[test]
fn counter_severity_tiers() {
    assert_eq!(counter_state(&"a".repeat(400)).severity, Severity::Normal);
    assert_eq!(counter_state(&"a".repeat(401)).severity, Severity::Warning);
    assert_eq!(counter_state(&"a".repeat(450)).severity, Severity::Warning);
    assert_eq!(counter_state(&"a".repeat(451)).severity, Severity::Critical);
    assert_eq!(counter_state("").severity, Severity::Normal);
}

#[test]
fn counter_counts_chars_not_bytes() {
    let counter = counter_state("héllo 🤖");
    assert_eq!(counter.text, "7/500");
}

#[test]
fn blank_input_is_rejected() {
    assert_eq!(accept_input(""), None);
    assert_eq!(accept_input("   \t\n"), None);
    assert_eq!(accept_input("  hello  "), Some("hello".to_string()));
}

#[test]
fn transcript_opens_with_welcome() {
    let transcript = Transcript::new();
    assert_eq!(transcript.len(), 1);
    let welcome = transcript.last().unwrap();
    assert_eq!(welcome.speaker, Speaker::Bot);
    assert_eq!(
        welcome.reply.as_ref().unwrap().response_type,
        "system"
    );
}

#[test]
fn transcript_reset_leaves_welcome_plus_confirmation() {
    let mut transcript = Transcript::new();
    for i in 0..10 {
        transcript.push(TranscriptEntry::user(format!("message {}", i)));
        transcript.push(TranscriptEntry::bot(create_test_reply("rule_based")));
    }
    assert_eq!(transcript.len(), 21);

    transcript.reset();
    assert_eq!(transcript.len(), 2);
    let confirmation = transcript.last().unwrap();
    let reply = confirmation.reply.as_ref().unwrap();
    assert_eq!(reply.response_type, "system");
    assert_eq!(reply.sentiment, "POSITIVE");
    assert_eq!(reply.confidence, 1.0);
}

#[test]
fn bot_entries_are_addressed_one_based() {
    let mut transcript = Transcript::new();
    transcript.push(TranscriptEntry::user("hi"));
    transcript.push(TranscriptEntry::bot(create_test_reply("faq")));

    // #1 is the welcome turn, #2 the faq reply.
    assert_eq!(
        transcript.bot_entry(2).unwrap().reply.as_ref().unwrap().response_type,
        "faq"
    );
    assert!(transcript.bot_entry(0).is_none());
    assert!(transcript.bot_entry(3).is_none());
    assert_eq!(transcript.bot_count(), 2);
}

#[tokio::test]
async fn blank_submission_leaves_transcript_untouched() {
    let mut session = create_test_session();
    let before = session.transcript().len();

    session
        .dispatch(Intent::Submit("   ".to_string()))
        .await
        .unwrap();

    assert_eq!(session.transcript().len(), before);
    assert_eq!(session.phase(), ExchangePhase::Idle);
}

#[tokio::test]
async fn failed_exchange_appends_exactly_one_error_turn() {
    let mut session = create_test_session();
    let before = session.transcript().len();

    session
        .dispatch(Intent::Submit("hello".to_string()))
        .await
        .unwrap();

    // One user turn plus one synthetic bot turn.
    assert_eq!(session.transcript().len(), before + 2);
    let last = session.transcript().last().unwrap();
    let reply = last.reply.as_ref().unwrap();
    assert_eq!(reply.response_type, "error");
    assert_eq!(reply.sentiment, "NEUTRAL");
    assert_eq!(reply.confidence, 0.0);
    assert_eq!(session.phase(), ExchangePhase::Idle);
}

#[tokio::test]
async fn clear_resets_regardless_of_prior_size() {
    let mut session = create_test_session();
    for _ in 0..5 {
        session
            .dispatch(Intent::Submit("hello".to_string()))
            .await
            .unwrap();
    }
    assert!(session.transcript().len() > 2);

    session.dispatch(Intent::Clear).await.unwrap();
    assert_eq!(session.transcript().len(), 2);
    assert_eq!(
        session
            .transcript()
            .last()
            .unwrap()
            .reply
            .as_ref()
            .unwrap()
            .response_type,
        "system"
    );
}

#[tokio::test]
async fn stale_completion_after_clear_is_discarded() {
    let mut session = create_test_session();
    let stale_generation = session.generation();

    session.dispatch(Intent::Clear).await.unwrap();
    let len_after_clear = session.transcript().len();

    // A reply resolving against the pre-clear generation must be dropped.
    let appended = session
        .complete_exchange(stale_generation, create_test_reply("rule_based"))
        .await;
    assert!(!appended);
    assert_eq!(session.transcript().len(), len_after_clear);

    // A current-generation completion still lands.
    let appended = session
        .complete_exchange(session.generation(), create_test_reply("rule_based"))
        .await;
    assert!(appended);
    assert_eq!(session.transcript().len(), len_after_clear + 1);
}

#[tokio::test]
async fn detail_view_opens_and_closes() {
    let mut session = create_test_session();

    // Welcome turn is bot reply #1.
    session.dispatch(Intent::OpenDetail(1)).await.unwrap();
    assert!(session.detail_open());

    session.dispatch(Intent::CloseDetail).await.unwrap();
    assert!(!session.detail_open());

    // Out-of-range target leaves the view closed.
    session.dispatch(Intent::OpenDetail(99)).await.unwrap();
    assert!(!session.detail_open());
}

#[tokio::test]
async fn clear_closes_an_open_detail_view() {
    let mut session = create_test_session();
    session.dispatch(Intent::OpenDetail(1)).await.unwrap();
    assert!(session.detail_open());

    session.dispatch(Intent::Clear).await.unwrap();
    assert!(!session.detail_open());
}
