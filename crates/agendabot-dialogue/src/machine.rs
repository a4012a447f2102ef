//! Schedule collection -- one validated field per step.
//!
//! A [`Collection`] is the partially collected request plus a cursor: each
//! variant names the field the bot is waiting for and carries everything
//! gathered so far.  [`Collection::advance`] is the whole transition
//! function.  It consumes the collection and one raw input and yields the
//! next collection, the completed [`ScheduleRequest`], or the reason the
//! collection was aborted.
//!
//! Field order:
//!
//! 1. start date, end date, first-report date (`ddmmaaaa`)
//! 2. frequency (`diária` / `semanal` / `mensal`)
//! 3. daily: interval; weekly: weekdays then interval; monthly: months,
//!    days of the month, then interval
//!
//! A failed validation aborts; it never re-prompts in place.

use chrono::{Month, Weekday};
use tracing::debug;

use agendabot_intent::frequency_detail_prompt;

use crate::error::FieldError;
use crate::request::{Frequency, FrequencyDetails, IntervalHours, ScheduleDate, ScheduleRequest};
use crate::validate::{parse_days_of_month, parse_month_list, parse_weekday_list};

const START_DATE_PROMPT: &str =
    "Por favor, informe a data inicial do agendamento (exemplo: 01012024):";
const END_DATE_PROMPT: &str = "Agora, informe a data final do agendamento (exemplo: 31122024):";
const FIRST_REPORT_PROMPT: &str =
    "Por fim, informe a data para gerar o primeiro relatório (exemplo: 01012024):";
const FREQUENCY_PROMPT: &str = "Qual é a frequência desejada (diária/semanal/mensal):";
const WEEKDAYS_PROMPT: &str = "Quais dias da semana (exemplo: segunda-feira, quarta-feira):";
const MONTHS_PROMPT: &str = "Quais meses (exemplo: janeiro, fevereiro):";
const DAYS_OF_MONTH_PROMPT: &str = "Quais dias do mês (exemplo: 1, 15):";
const INTERVAL_PROMPT: &str = "A cada quantas horas (uma ou duas):";

/// The three dates every request carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dates {
    pub start: ScheduleDate,
    pub end: ScheduleDate,
    pub first_report: ScheduleDate,
}

/// A schedule request under construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Collection {
    /// Entered the collecting state; the next utterance starts the sequence.
    /// That utterance is not read as a field, even if it is a valid date.
    Kickoff,
    StartDate,
    EndDate {
        start: ScheduleDate,
    },
    FirstReportDate {
        start: ScheduleDate,
        end: ScheduleDate,
    },
    Frequency {
        dates: Dates,
    },
    DailyInterval {
        dates: Dates,
    },
    WeeklyDays {
        dates: Dates,
    },
    WeeklyInterval {
        dates: Dates,
        days: Vec<Weekday>,
    },
    MonthlyMonths {
        dates: Dates,
    },
    MonthlyDays {
        dates: Dates,
        months: Vec<Month>,
    },
    MonthlyInterval {
        dates: Dates,
        months: Vec<Month>,
        days_of_month: Vec<u8>,
    },
}

/// Result of feeding one input to a [`Collection`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// More input is needed; ask with [`Collection::prompt`].
    Next(Collection),
    /// Every field is present and valid.
    Complete(ScheduleRequest),
    /// Validation failed; nothing is retained.
    Abort(FieldError),
}

impl Collection {
    /// Short name of the awaited field, for logs.
    pub fn field(&self) -> &'static str {
        match self {
            Self::Kickoff => "kickoff",
            Self::StartDate => "start_date",
            Self::EndDate { .. } => "end_date",
            Self::FirstReportDate { .. } => "first_report_date",
            Self::Frequency { .. } => "frequency",
            Self::DailyInterval { .. } => "daily_interval",
            Self::WeeklyDays { .. } => "weekly_days",
            Self::WeeklyInterval { .. } => "weekly_interval",
            Self::MonthlyMonths { .. } => "monthly_months",
            Self::MonthlyDays { .. } => "monthly_days",
            Self::MonthlyInterval { .. } => "monthly_interval",
        }
    }

    /// The question asking for the awaited field.
    ///
    /// The first weekly and monthly detail prompts are headed by the
    /// frequency-specific sub-question.
    pub fn prompt(&self) -> String {
        match self {
            Self::Kickoff => String::new(),
            Self::StartDate => START_DATE_PROMPT.into(),
            Self::EndDate { .. } => END_DATE_PROMPT.into(),
            Self::FirstReportDate { .. } => FIRST_REPORT_PROMPT.into(),
            Self::Frequency { .. } => FREQUENCY_PROMPT.into(),
            Self::DailyInterval { .. } => frequency_detail_prompt(Frequency::Daily.label()).into(),
            Self::WeeklyDays { .. } => format!(
                "{}\n{WEEKDAYS_PROMPT}",
                frequency_detail_prompt(Frequency::Weekly.label())
            ),
            Self::MonthlyMonths { .. } => format!(
                "{}\n{MONTHS_PROMPT}",
                frequency_detail_prompt(Frequency::Monthly.label())
            ),
            Self::MonthlyDays { .. } => DAYS_OF_MONTH_PROMPT.into(),
            Self::WeeklyInterval { .. } | Self::MonthlyInterval { .. } => INTERVAL_PROMPT.into(),
        }
    }

    /// Consume one raw input.
    pub fn advance(self, input: &str) -> Advance {
        let input = input.trim();
        debug!(field = self.field(), "advancing collection");

        match self {
            Self::Kickoff => Advance::Next(Self::StartDate),

            Self::StartDate => match ScheduleDate::parse(input) {
                Some(start) => Advance::Next(Self::EndDate { start }),
                None => Advance::Abort(FieldError::InvalidStartDate),
            },

            Self::EndDate { start } => match ScheduleDate::parse(input) {
                Some(end) => Advance::Next(Self::FirstReportDate { start, end }),
                None => Advance::Abort(FieldError::InvalidEndDate),
            },

            Self::FirstReportDate { start, end } => match ScheduleDate::parse(input) {
                Some(first_report) => Advance::Next(Self::Frequency {
                    dates: Dates {
                        start,
                        end,
                        first_report,
                    },
                }),
                None => Advance::Abort(FieldError::InvalidFirstReportDate),
            },

            Self::Frequency { dates } => match Frequency::parse(input) {
                Some(Frequency::Daily) => Advance::Next(Self::DailyInterval { dates }),
                Some(Frequency::Weekly) => Advance::Next(Self::WeeklyDays { dates }),
                Some(Frequency::Monthly) => Advance::Next(Self::MonthlyMonths { dates }),
                None => Advance::Abort(FieldError::UnknownFrequency),
            },

            Self::DailyInterval { dates } => match IntervalHours::parse(input) {
                Some(interval_hours) => {
                    complete(dates, FrequencyDetails::Daily { interval_hours })
                }
                None => Advance::Abort(FieldError::InvalidDailyInterval),
            },

            Self::WeeklyDays { dates } => match parse_weekday_list(input) {
                Some(days) => Advance::Next(Self::WeeklyInterval { dates, days }),
                None => Advance::Abort(FieldError::InvalidWeekdays),
            },

            Self::WeeklyInterval { dates, days } => match IntervalHours::parse(input) {
                Some(interval_hours) => complete(
                    dates,
                    FrequencyDetails::Weekly {
                        days,
                        interval_hours,
                    },
                ),
                None => Advance::Abort(FieldError::InvalidWeeklyInterval),
            },

            Self::MonthlyMonths { dates } => match parse_month_list(input) {
                Some(months) => Advance::Next(Self::MonthlyDays { dates, months }),
                None => Advance::Abort(FieldError::InvalidMonths),
            },

            Self::MonthlyDays { dates, months } => match parse_days_of_month(input) {
                Some(days_of_month) => Advance::Next(Self::MonthlyInterval {
                    dates,
                    months,
                    days_of_month,
                }),
                None => Advance::Abort(FieldError::InvalidDaysOfMonth),
            },

            Self::MonthlyInterval {
                dates,
                months,
                days_of_month,
            } => match IntervalHours::parse(input) {
                Some(interval_hours) => complete(
                    dates,
                    FrequencyDetails::Monthly {
                        months,
                        days_of_month,
                        interval_hours,
                    },
                ),
                None => Advance::Abort(FieldError::InvalidMonthlyInterval),
            },
        }
    }
}

fn complete(dates: Dates, details: FrequencyDetails) -> Advance {
    Advance::Complete(ScheduleRequest {
        start_date: dates.start,
        end_date: dates.end,
        first_report_date: dates.first_report,
        details,
    })
}

// ---------------------------------------------------------------------------
// Blocking rendition
// ---------------------------------------------------------------------------

/// Supplies raw input when the collection asks for it.
///
/// Returning `None` means the input source is closed.
pub trait InputProvider {
    fn next_input(&mut self, prompt: &str) -> Option<String>;
}

impl<F> InputProvider for F
where
    F: FnMut(&str) -> Option<String>,
{
    fn next_input(&mut self, prompt: &str) -> Option<String> {
        self(prompt)
    }
}

/// Run the whole collection as a single sequence, starting at the start
/// date and pulling each field from `inputs`.
pub fn collect(inputs: &mut impl InputProvider) -> Result<ScheduleRequest, FieldError> {
    let mut collection = Collection::StartDate;
    loop {
        let Some(input) = inputs.next_input(&collection.prompt()) else {
            return Err(FieldError::InputClosed);
        };
        match collection.advance(&input) {
            Advance::Next(next) => collection = next,
            Advance::Complete(request) => return Ok(request),
            Advance::Abort(reason) => return Err(reason),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
