//! Dialogue error types.
//!
//! [`FieldError`] is the user-facing reason a collection was aborted; its
//! `Display` text is what the bot says.  [`DialogueError`] covers misuse of a
//! session by the caller.

/// Why a schedule collection was aborted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("Data inicial inválida. Por favor, informe a data no formato ddmmaaaa.")]
    InvalidStartDate,

    #[error("Data final inválida. Por favor, informe a data no formato ddmmaaaa.")]
    InvalidEndDate,

    #[error("Data do primeiro relatório inválida. Por favor, informe a data no formato ddmmaaaa.")]
    InvalidFirstReportDate,

    #[error("Frequência não reconhecida. Escolha entre diária, semanal ou mensal.")]
    UnknownFrequency,

    #[error("Para frequência diária, escolha entre a cada uma ou a cada duas horas.")]
    InvalidDailyInterval,

    #[error("Dias da semana inválidos. Informe os dias como 'segunda-feira, quarta-feira'.")]
    InvalidWeekdays,

    #[error("Para frequência semanal, escolha entre a cada uma ou a cada duas horas.")]
    InvalidWeeklyInterval,

    #[error("Meses inválidos. Informe os meses como 'janeiro, fevereiro'.")]
    InvalidMonths,

    #[error("Dias do mês inválidos. Informe os dias como '1, 15' (entre 1 e 31).")]
    InvalidDaysOfMonth,

    #[error("Para frequência mensal, escolha entre a cada uma ou a cada duas horas.")]
    InvalidMonthlyInterval,

    /// The input source closed before the collection finished.
    #[error("Agendamento interrompido antes de todas as informações serem fornecidas.")]
    InputClosed,
}

/// Errors raised by the session API itself.
#[derive(Debug, thiserror::Error)]
pub enum DialogueError {
    /// The session already received an exit command.
    #[error("session {session_id} has ended")]
    SessionEnded { session_id: uuid::Uuid },
}

/// Convenience alias used throughout the dialogue crate.
pub type Result<T> = std::result::Result<T, DialogueError>;
