//! The seam between the dialogue and the external scheduling service.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::request::ScheduleRequest;

/// Outcome of one submission: the decoded response body, or a readable
/// description of what went wrong.  Never both.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionResult {
    Accepted(serde_json::Value),
    Failed(String),
}

impl SubmissionResult {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }
}

impl fmt::Display for SubmissionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Accepted(body) => write!(f, "{body}"),
            Self::Failed(reason) => f.write_str(reason),
        }
    }
}

/// Anything that can hand a completed request to the scheduling service.
///
/// Implementations must not fail: transport and service errors are folded
/// into [`SubmissionResult::Failed`].  Each call is an independent request;
/// no deduplication or retry happens at this layer.
#[async_trait]
pub trait ScheduleSubmitter: Send + Sync {
    async fn submit(&self, request: &ScheduleRequest) -> SubmissionResult;
}

#[async_trait]
impl<T: ScheduleSubmitter + ?Sized> ScheduleSubmitter for Arc<T> {
    async fn submit(&self, request: &ScheduleRequest) -> SubmissionResult {
        (**self).submit(request).await
    }
}

/// The final message of a successful collection, echoing every field and
/// the service's answer.
pub fn format_summary(request: &ScheduleRequest, result: &SubmissionResult) -> String {
    let payload = request.to_payload();
    format!(
        "Agendamento definido:\n\
         Data inicial: {}\n\
         Data final: {}\n\
         Primeira data do relatório: {}\n\
         Frequência: {}\n\
         Detalhes da frequência: {}\n\
         Resposta da API: {}",
        payload.start_date,
        payload.end_date,
        payload.first_report_date,
        payload.frequency,
        payload.frequency_details,
        result,
    )
}
