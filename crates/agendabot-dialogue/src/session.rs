//! Conversation session -- the top-level dialogue state machine.
//!
//! [`transition`] is the pure part: given the current [`DialogueState`] and a
//! normalized utterance it returns the next state and an [`Effect`].
//! [`Session`] owns the state for one conversation, performs the effects
//! (including the one asynchronous call, the submission) and turns them into
//! a [`Reply`].

use tracing::{debug, info, warn};
use uuid::Uuid;

use agendabot_intent::{Intent, IntentClassifier, SynonymSource};

use crate::error::{DialogueError, Result};
use crate::machine::{Advance, Collection};
use crate::request::ScheduleRequest;
use crate::submit::{ScheduleSubmitter, format_summary};

/// Utterances that end the session, checked before anything else.
pub const EXIT_TOKENS: [&str; 3] = ["sair", "exit", "quit"];

/// Shown when a session starts.
pub const GREETING: &str = "Olá! Eu sou o chatbot. Pergunte-me sobre o agendamento de \
                            relatórios em CSV e eu tentarei ajudar.";

/// Shown when a session ends.
pub const FAREWELL: &str = "Até mais!";

/// Lower-case and trim raw user text.
pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Whether a normalized utterance is an exit command.
pub fn is_exit(utterance: &str) -> bool {
    EXIT_TOKENS.contains(&utterance)
}

// ---------------------------------------------------------------------------
// Pure state machine
// ---------------------------------------------------------------------------

/// Where the conversation is.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DialogueState {
    /// Answering questions; nothing is being collected.
    #[default]
    Initial,
    /// Collecting a schedule request, one field per turn.
    CollectingDates(Collection),
}

/// What the session has to do after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Show this text.
    Say(String),
    /// Submit the request and show the summary.
    Submit(ScheduleRequest),
    /// End the session.
    Exit,
}

/// Compute the next state for a normalized utterance.
///
/// In `Initial`, an explicit scheduling request wins over the classifier's
/// precedence so that "quero agendar um relatório" starts a collection.
pub fn transition<S: SynonymSource>(
    state: DialogueState,
    utterance: &str,
    classifier: &IntentClassifier<S>,
) -> (DialogueState, Effect) {
    if is_exit(utterance) {
        return (DialogueState::Initial, Effect::Exit);
    }

    match state {
        DialogueState::Initial => {
            if classifier.expresses(Intent::Scheduling, utterance) {
                return (
                    DialogueState::CollectingDates(Collection::Kickoff),
                    Effect::Say(Intent::Scheduling.reply().to_string()),
                );
            }
            let intent = classifier.classify(utterance);
            debug!(%intent, "informational turn");
            (DialogueState::Initial, Effect::Say(intent.reply().to_string()))
        }

        DialogueState::CollectingDates(collection) => match collection.advance(utterance) {
            Advance::Next(next) => {
                let prompt = next.prompt();
                (DialogueState::CollectingDates(next), Effect::Say(prompt))
            }
            Advance::Complete(request) => (DialogueState::Initial, Effect::Submit(request)),
            Advance::Abort(reason) => {
                debug!(%reason, "collection aborted");
                (DialogueState::Initial, Effect::Say(reason.to_string()))
            }
        },
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// The bot's answer to one turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Show this text and keep going.
    Message(String),
    /// Show this text and end the session.
    Farewell(String),
}

impl Reply {
    pub fn text(&self) -> &str {
        match self {
            Self::Message(text) | Self::Farewell(text) => text,
        }
    }

    pub fn ends_session(&self) -> bool {
        matches!(self, Self::Farewell(_))
    }
}

/// One conversation with one user.
pub struct Session<S, T> {
    id: Uuid,
    classifier: IntentClassifier<S>,
    submitter: T,
    state: DialogueState,
    ended: bool,
}

impl<S: SynonymSource, T: ScheduleSubmitter> Session<S, T> {
    pub fn new(classifier: IntentClassifier<S>, submitter: T) -> Self {
        let id = Uuid::now_v7();
        info!(session_id = %id, "session started");
        Self {
            id,
            classifier,
            submitter,
            state: DialogueState::Initial,
            ended: false,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> &DialogueState {
        &self.state
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }

    pub fn greeting(&self) -> &'static str {
        GREETING
    }

    /// Process one line of raw user text.
    pub async fn handle(&mut self, raw: &str) -> Result<Reply> {
        if self.ended {
            return Err(DialogueError::SessionEnded {
                session_id: self.id,
            });
        }

        let utterance = normalize(raw);
        let state = std::mem::take(&mut self.state);
        let (next, effect) = transition(state, &utterance, &self.classifier);
        self.state = next;

        match effect {
            Effect::Say(text) => Ok(Reply::Message(text)),
            Effect::Exit => {
                info!(session_id = %self.id, "user requested exit");
                self.ended = true;
                Ok(Reply::Farewell(FAREWELL.to_string()))
            }
            Effect::Submit(request) => {
                info!(
                    session_id = %self.id,
                    frequency = %request.frequency(),
                    "submitting schedule request"
                );
                let result = self.submitter.submit(&request).await;
                if !result.is_accepted() {
                    warn!(session_id = %self.id, %result, "schedule submission failed");
                }
                Ok(Reply::Message(format_summary(&request, &result)))
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
