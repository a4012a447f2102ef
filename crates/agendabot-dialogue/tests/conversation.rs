//! End-to-end conversation tests for the agendabot-dialogue crate.
//!
//! These drive a [`Session`] turn by turn with a recording submitter, the
//! way the REPL does, and check both the bot's replies and what reached the
//! scheduling service.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::json;

use agendabot_dialogue::{
    Collection, DialogueError, DialogueState, FrequencyDetails, IntervalHours, Reply,
    ScheduleRequest, ScheduleSubmitter, Session, SubmissionResult,
};
use agendabot_intent::{Intent, IntentClassifier, LexicalMatcher, NoSynonyms};

// ── helpers ──────────────────────────────────────────────────────────────────

#[derive(Default)]
struct RecordingSubmitter {
    calls: Mutex<Vec<ScheduleRequest>>,
    fail_with: Option<String>,
}

impl RecordingSubmitter {
    fn failing(reason: &str) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_with: Some(reason.to_string()),
        }
    }

    fn calls(&self) -> Vec<ScheduleRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ScheduleSubmitter for RecordingSubmitter {
    async fn submit(&self, request: &ScheduleRequest) -> SubmissionResult {
        self.calls.lock().unwrap().push(request.clone());
        match &self.fail_with {
            Some(reason) => SubmissionResult::Failed(reason.clone()),
            None => SubmissionResult::Accepted(json!({"status": "scheduled"})),
        }
    }
}

fn session(submitter: Arc<RecordingSubmitter>) -> Session<NoSynonyms, Arc<RecordingSubmitter>> {
    Session::new(IntentClassifier::new(LexicalMatcher::new(NoSynonyms)), submitter)
}

async fn say(session: &mut Session<NoSynonyms, Arc<RecordingSubmitter>>, text: &str) -> String {
    session.handle(text).await.unwrap().text().to_string()
}

// ── scenarios ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn scheduling_request_enters_collection() {
    let submitter = Arc::new(RecordingSubmitter::default());
    let mut s = session(submitter.clone());

    let reply = say(&mut s, "Quero agendar um relatório").await;
    assert_eq!(reply, Intent::Scheduling.reply());
    assert_eq!(s.state(), &DialogueState::CollectingDates(Collection::Kickoff));
    assert!(submitter.calls().is_empty());
}

#[tokio::test]
async fn daily_schedule_is_submitted_once() {
    let submitter = Arc::new(RecordingSubmitter::default());
    let mut s = session(submitter.clone());

    say(&mut s, "quero agendar").await;
    assert!(say(&mut s, "ok").await.contains("data inicial"));
    assert!(say(&mut s, "01012024").await.contains("data final"));
    assert!(say(&mut s, "31122024").await.contains("primeiro relatório"));
    assert!(say(&mut s, "01012024").await.contains("frequência"));
    assert!(say(&mut s, "diária").await.contains("uma ou a cada duas horas"));
    let summary = say(&mut s, "uma").await;

    let calls = submitter.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(
        calls[0].details,
        FrequencyDetails::Daily {
            interval_hours: IntervalHours::One
        }
    );
    assert!(summary.starts_with("Agendamento definido:"));
    assert!(summary.contains("Detalhes da frequência: uma"));
    assert!(summary.contains(r#"Resposta da API: {"status":"scheduled"}"#));
    assert_eq!(s.state(), &DialogueState::Initial);
}

#[tokio::test]
async fn invalid_daily_interval_aborts_without_submitting() {
    let submitter = Arc::new(RecordingSubmitter::default());
    let mut s = session(submitter.clone());

    for line in ["agendar", "vamos", "01012024", "31122024", "01012024", "diária"] {
        say(&mut s, line).await;
    }
    let reply = say(&mut s, "três").await;

    assert_eq!(
        reply,
        "Para frequência diária, escolha entre a cada uma ou a cada duas horas."
    );
    assert!(submitter.calls().is_empty());
    assert_eq!(s.state(), &DialogueState::Initial);
}

#[tokio::test]
async fn weekly_schedule_round_trip() {
    let submitter = Arc::new(RecordingSubmitter::default());
    let mut s = session(submitter.clone());

    for line in [
        "preciso agendar",
        "certo",
        "01022024",
        "30062024",
        "05022024",
        "SEMANAL",
        "segunda-feira, quarta-feira",
    ] {
        say(&mut s, line).await;
    }
    let summary = say(&mut s, "duas").await;

    assert_eq!(submitter.calls().len(), 1);
    assert!(summary.contains("Frequência: semanal"));
    assert!(summary.contains("dias: segunda-feira, quarta-feira; horas: duas"));
}

#[tokio::test]
async fn submission_failure_is_reported_and_session_continues() {
    let submitter = Arc::new(RecordingSubmitter::failing(
        "Erro ao enviar a requisição: 503 Service Unavailable",
    ));
    let mut s = session(submitter.clone());

    for line in ["agendar", "ok", "01012024", "31122024", "01012024", "diária"] {
        say(&mut s, line).await;
    }
    let summary = say(&mut s, "duas").await;
    assert!(
        summary.ends_with("Resposta da API: Erro ao enviar a requisição: 503 Service Unavailable")
    );
    assert!(!s.is_ended());

    let next = say(&mut s, "ajuda").await;
    assert_eq!(next, Intent::Help.reply());
}

#[tokio::test]
async fn abort_discards_partial_request() {
    let submitter = Arc::new(RecordingSubmitter::default());
    let mut s = session(submitter.clone());

    for line in ["agendar", "ok", "01012024"] {
        say(&mut s, line).await;
    }
    let reply = say(&mut s, "31/12/2024").await;
    assert!(reply.starts_with("Data final inválida"));
    assert_eq!(s.state(), &DialogueState::Initial);

    // A new collection starts from scratch.
    say(&mut s, "agendar").await;
    assert!(say(&mut s, "de novo").await.contains("data inicial"));
}

#[tokio::test]
async fn exit_mid_collection_ends_session() {
    let submitter = Arc::new(RecordingSubmitter::default());
    let mut s = session(submitter.clone());

    for line in ["agendar", "ok", "01012024"] {
        say(&mut s, line).await;
    }
    let reply = s.handle("  EXIT ").await.unwrap();
    assert_eq!(reply, Reply::Farewell("Até mais!".into()));
    assert!(reply.ends_session());
    assert!(s.is_ended());
    assert!(submitter.calls().is_empty());

    let err = s.handle("olá").await.unwrap_err();
    assert!(matches!(err, DialogueError::SessionEnded { session_id } if session_id == s.id()));
}

#[tokio::test]
async fn unknown_utterance_gets_clarification() {
    let mut s = session(Arc::new(RecordingSubmitter::default()));
    let reply = say(&mut s, "qual o sentido da vida").await;
    assert_eq!(reply, Intent::Unknown.reply());
}
