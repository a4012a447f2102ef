//! Service adapters for AgendaBot -- the scheduling service client and the
//! file-backed lexicon.
//!
//! [`HttpScheduleSubmitter`] implements the dialogue's
//! [`ScheduleSubmitter`](agendabot_dialogue::ScheduleSubmitter) seam;
//! [`LexiconSynonyms`] implements the intent engine's
//! [`SynonymSource`](agendabot_intent::SynonymSource) capability.

pub mod error;
pub mod lexicon;
pub mod schedule_api;

pub use error::{AdapterError, Result};
pub use lexicon::LexiconSynonyms;
pub use schedule_api::{DEFAULT_SERVICE_URL, HttpScheduleSubmitter, ScheduleServiceConfig};
