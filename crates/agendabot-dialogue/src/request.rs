//! Schedule request data model and its wire payload.

use std::fmt;

use chrono::{Month, NaiveDate, Weekday};
use serde::Serialize;

use crate::validate::{month_name, parse_date, weekday_name};

// ---------------------------------------------------------------------------
// Dates
// ---------------------------------------------------------------------------

/// A validated `ddmmaaaa` date that remembers the text the user typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleDate {
    raw: String,
    date: NaiveDate,
}

impl ScheduleDate {
    /// Validate and wrap a `ddmmaaaa` string.
    pub fn parse(raw: &str) -> Option<Self> {
        parse_date(raw).map(|date| Self {
            raw: raw.to_string(),
            date,
        })
    }

    /// The validated text, as sent to the scheduling service.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }
}

impl fmt::Display for ScheduleDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

// ---------------------------------------------------------------------------
// Frequency
// ---------------------------------------------------------------------------

/// How often the report is generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
}

impl Frequency {
    /// Parse one of the closed set `diária`, `semanal`, `mensal`,
    /// ignoring case and surrounding whitespace.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "diária" => Some(Self::Daily),
            "semanal" => Some(Self::Weekly),
            "mensal" => Some(Self::Monthly),
            _ => None,
        }
    }

    /// The literal label used in prompts and on the wire.
    pub fn label(self) -> &'static str {
        match self {
            Self::Daily => "diária",
            Self::Weekly => "semanal",
            Self::Monthly => "mensal",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Generate every one or every two hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntervalHours {
    One,
    Two,
}

impl IntervalHours {
    /// Parse exactly `uma` or `duas`, ignoring case and surrounding whitespace.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "uma" => Some(Self::One),
            "duas" => Some(Self::Two),
            _ => None,
        }
    }

    pub fn hours(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::One => "uma",
            Self::Two => "duas",
        }
    }
}

/// Cadence-specific sub-parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrequencyDetails {
    Daily {
        interval_hours: IntervalHours,
    },
    Weekly {
        days: Vec<Weekday>,
        interval_hours: IntervalHours,
    },
    Monthly {
        months: Vec<Month>,
        days_of_month: Vec<u8>,
        interval_hours: IntervalHours,
    },
}

impl FrequencyDetails {
    /// The frequency this variant belongs to.
    pub fn frequency(&self) -> Frequency {
        match self {
            Self::Daily { .. } => Frequency::Daily,
            Self::Weekly { .. } => Frequency::Weekly,
            Self::Monthly { .. } => Frequency::Monthly,
        }
    }

    pub fn interval_hours(&self) -> IntervalHours {
        match self {
            Self::Daily { interval_hours }
            | Self::Weekly { interval_hours, .. }
            | Self::Monthly { interval_hours, .. } => *interval_hours,
        }
    }

    /// Wire representation of the details.
    pub fn to_payload(&self) -> DetailsPayload {
        match self {
            Self::Daily { interval_hours } => DetailsPayload::Interval(interval_hours.label()),
            Self::Weekly {
                days,
                interval_hours,
            } => DetailsPayload::Weekly {
                days: join(days.iter().map(|d| weekday_name(*d).to_string())),
                hours: interval_hours.label(),
            },
            Self::Monthly {
                months,
                days_of_month,
                interval_hours,
            } => DetailsPayload::Monthly {
                months: join(months.iter().map(|m| month_name(*m).to_string())),
                days_of_month: join(days_of_month.iter().map(u8::to_string)),
                hours: interval_hours.label(),
            },
        }
    }
}

fn join(items: impl Iterator<Item = String>) -> String {
    items.collect::<Vec<_>>().join(", ")
}

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// A complete, individually validated schedule request.
///
/// Only the dialogue state machine builds these, and only once every field
/// has passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleRequest {
    pub start_date: ScheduleDate,
    pub end_date: ScheduleDate,
    pub first_report_date: ScheduleDate,
    pub details: FrequencyDetails,
}

impl ScheduleRequest {
    pub fn frequency(&self) -> Frequency {
        self.details.frequency()
    }

    /// The JSON body sent to the scheduling service.
    pub fn to_payload(&self) -> SchedulePayload {
        SchedulePayload {
            start_date: self.start_date.as_str().to_string(),
            end_date: self.end_date.as_str().to_string(),
            first_report_date: self.first_report_date.as_str().to_string(),
            frequency: self.frequency().label(),
            frequency_details: self.details.to_payload(),
        }
    }
}

/// Request body of `POST schedule-request`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchedulePayload {
    pub start_date: String,
    pub end_date: String,
    pub first_report_date: String,
    pub frequency: &'static str,
    pub frequency_details: DetailsPayload,
}

/// `frequency_details` on the wire: a bare interval label for daily
/// schedules, an object otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DetailsPayload {
    Interval(&'static str),
    Weekly {
        days: String,
        hours: &'static str,
    },
    Monthly {
        months: String,
        days_of_month: String,
        hours: &'static str,
    },
}

impl fmt::Display for DetailsPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Interval(hours) => f.write_str(hours),
            Self::Weekly { days, hours } => write!(f, "dias: {days}; horas: {hours}"),
            Self::Monthly {
                months,
                days_of_month,
                hours,
            } => write!(f, "meses: {months}; dias do mês: {days_of_month}; horas: {hours}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn date(s: &str) -> ScheduleDate {
        ScheduleDate::parse(s).unwrap()
    }

    fn dates_with(details: FrequencyDetails) -> ScheduleRequest {
        ScheduleRequest {
            start_date: date("01012024"),
            end_date: date("31122024"),
            first_report_date: date("02012024"),
            details,
        }
    }

    #[test]
    fn frequency_labels_are_case_insensitive() {
        assert_eq!(Frequency::parse("Diária"), Some(Frequency::Daily));
        assert_eq!(Frequency::parse(" SEMANAL "), Some(Frequency::Weekly));
        assert_eq!(Frequency::parse("mensal"), Some(Frequency::Monthly));
        assert_eq!(Frequency::parse("diaria"), None);
        assert_eq!(Frequency::parse("anual"), None);
    }

    #[test]
    fn interval_accepts_only_uma_or_duas() {
        assert_eq!(IntervalHours::parse("uma"), Some(IntervalHours::One));
        assert_eq!(IntervalHours::parse("Duas"), Some(IntervalHours::Two));
        assert_eq!(IntervalHours::parse("três"), None);
        assert_eq!(IntervalHours::parse("1"), None);
        assert_eq!(IntervalHours::Two.hours(), 2);
    }

    #[test]
    fn daily_payload_uses_bare_label() {
        let req = dates_with(FrequencyDetails::Daily {
            interval_hours: IntervalHours::One,
        });
        let value = serde_json::to_value(req.to_payload()).unwrap();
        assert_eq!(
            value,
            json!({
                "start_date": "01012024",
                "end_date": "31122024",
                "first_report_date": "02012024",
                "frequency": "diária",
                "frequency_details": "uma",
            })
        );
    }

    #[test]
    fn weekly_payload_is_an_object() {
        let req = dates_with(FrequencyDetails::Weekly {
            days: vec![Weekday::Mon, Weekday::Wed],
            interval_hours: IntervalHours::Two,
        });
        let value = serde_json::to_value(req.to_payload()).unwrap();
        assert_eq!(value["frequency"], "semanal");
        assert_eq!(
            value["frequency_details"],
            json!({"days": "segunda-feira, quarta-feira", "hours": "duas"})
        );
    }

    #[test]
    fn monthly_payload_is_an_object() {
        let req = dates_with(FrequencyDetails::Monthly {
            months: vec![Month::January, Month::March],
            days_of_month: vec![1, 15],
            interval_hours: IntervalHours::One,
        });
        let value = serde_json::to_value(req.to_payload()).unwrap();
        assert_eq!(
            value["frequency_details"],
            json!({"months": "janeiro, março", "days_of_month": "1, 15", "hours": "uma"})
        );
        assert_eq!(req.frequency(), Frequency::Monthly);
    }

    #[test]
    fn schedule_date_keeps_raw_text() {
        let d = date("05062024");
        assert_eq!(d.as_str(), "05062024");
        assert_eq!(d.date(), NaiveDate::from_ymd_opt(2024, 6, 5).unwrap());
        assert!(ScheduleDate::parse("31022024").is_none());
    }
}
