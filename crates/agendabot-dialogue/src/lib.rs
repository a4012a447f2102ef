//! Scheduling dialogue for AgendaBot.
//!
//! This crate provides:
//!
//! - **Field validation**: dates, times and list fields via [`validate`].
//! - **Data model**: [`request::ScheduleRequest`] and its wire payload.
//! - **Collection**: the per-field transition function
//!   [`machine::Collection::advance`] and the blocking [`machine::collect`].
//! - **Sessions**: the top-level state machine [`session::transition`] and
//!   the [`session::Session`] that owns it for one conversation.
//! - **Submission seam**: the [`submit::ScheduleSubmitter`] trait.

pub mod error;
pub mod machine;
pub mod request;
pub mod session;
pub mod submit;
pub mod validate;

pub use error::{DialogueError, FieldError, Result};
pub use machine::{Advance, Collection, Dates, InputProvider, collect};
pub use request::{
    DetailsPayload, Frequency, FrequencyDetails, IntervalHours, ScheduleDate, SchedulePayload,
    ScheduleRequest,
};
pub use session::{
    DialogueState, EXIT_TOKENS, Effect, FAREWELL, GREETING, Reply, Session, is_exit, normalize,
    transition,
};
pub use submit::{ScheduleSubmitter, SubmissionResult, format_summary};
pub use validate::{validate_date, validate_time, validate_weekday_list};
