//! Field validators.
//!
//! Pure, total functions: malformed input yields `false` / `None`, never a
//! panic.  Producing the rejection message is the caller's job.
//!
//! Accepted weekday names (case-insensitive, accents optional):
//! `segunda`..`sexta` with or without the `-feira` suffix, `sábado`,
//! `domingo`.  Accepted month names: `janeiro`..`dezembro`, `março` also as
//! `marco`.

use std::sync::LazyLock;

use chrono::{Datelike, Month, NaiveDate, NaiveTime, Weekday};
use regex::Regex;

/// Day-month-year, eight digits, no separators (e.g. `01012024`).
const DATE_FORMAT: &str = "%d%m%Y";

/// Hour-minute, four digits (e.g. `1430`).
const TIME_FORMAT: &str = "%H%M";

/// `word(, word)*` where words may carry hyphens (`segunda-feira`).
static COMMA_LIST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\w-]+(?:, [\w-]+)*$").expect("comma list pattern is valid")
});

// ---------------------------------------------------------------------------
// Dates and times
// ---------------------------------------------------------------------------

fn all_digits(s: &str, len: usize) -> bool {
    s.len() == len && s.bytes().all(|b| b.is_ascii_digit())
}

/// Parse a `ddmmaaaa` date that exists on the calendar.
///
/// Years start at 1; `0000` is not a year.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    if !all_digits(s, 8) {
        return None;
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .ok()
        .filter(|date| date.year() >= 1)
}

/// Whether `s` is an eight-digit day-month-year calendar date.
pub fn validate_date(s: &str) -> bool {
    parse_date(s).is_some()
}

/// Parse a `hhmm` wall-clock time.
pub fn parse_time(s: &str) -> Option<NaiveTime> {
    if !all_digits(s, 4) {
        return None;
    }
    NaiveTime::parse_from_str(s, TIME_FORMAT).ok()
}

/// Whether `s` is a four-digit hour-minute time.
pub fn validate_time(s: &str) -> bool {
    parse_time(s).is_some()
}

// ---------------------------------------------------------------------------
// Lists
// ---------------------------------------------------------------------------

/// Whether `s` has the shape `word(, word)*`.
pub fn is_comma_list(s: &str) -> bool {
    COMMA_LIST.is_match(s)
}

fn parse_list<T>(s: &str, item: impl Fn(&str) -> Option<T>) -> Option<Vec<T>> {
    if !is_comma_list(s) {
        return None;
    }
    s.split(", ").map(item).collect()
}

/// Parse a comma-space separated list of weekday names.
pub fn parse_weekday_list(s: &str) -> Option<Vec<Weekday>> {
    parse_list(s, weekday_from_name)
}

/// Whether `s` is a comma-space separated list of known weekday names.
pub fn validate_weekday_list(s: &str) -> bool {
    parse_weekday_list(s).is_some()
}

/// Parse a comma-space separated list of month names.
pub fn parse_month_list(s: &str) -> Option<Vec<Month>> {
    parse_list(s, month_from_name)
}

/// Parse a comma-space separated list of days of the month (1 to 31).
pub fn parse_days_of_month(s: &str) -> Option<Vec<u8>> {
    parse_list(s, |token| {
        if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        token.parse::<u8>().ok().filter(|d| (1..=31).contains(d))
    })
}

// ---------------------------------------------------------------------------
// Vocabulary
// ---------------------------------------------------------------------------

/// Look up a Portuguese weekday name.
pub fn weekday_from_name(name: &str) -> Option<Weekday> {
    let name = name.to_lowercase();
    let (stem, feira) = match name.strip_suffix("-feira") {
        Some(stem) => (stem, true),
        None => (name.as_str(), false),
    };
    let day = match stem {
        "segunda" => Weekday::Mon,
        "terça" | "terca" => Weekday::Tue,
        "quarta" => Weekday::Wed,
        "quinta" => Weekday::Thu,
        "sexta" => Weekday::Fri,
        "sábado" | "sabado" if !feira => Weekday::Sat,
        "domingo" if !feira => Weekday::Sun,
        _ => return None,
    };
    Some(day)
}

/// Canonical Portuguese name of a weekday.
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "segunda-feira",
        Weekday::Tue => "terça-feira",
        Weekday::Wed => "quarta-feira",
        Weekday::Thu => "quinta-feira",
        Weekday::Fri => "sexta-feira",
        Weekday::Sat => "sábado",
        Weekday::Sun => "domingo",
    }
}

/// Look up a Portuguese month name.
pub fn month_from_name(name: &str) -> Option<Month> {
    let month = match name.to_lowercase().as_str() {
        "janeiro" => Month::January,
        "fevereiro" => Month::February,
        "março" | "marco" => Month::March,
        "abril" => Month::April,
        "maio" => Month::May,
        "junho" => Month::June,
        "julho" => Month::July,
        "agosto" => Month::August,
        "setembro" => Month::September,
        "outubro" => Month::October,
        "novembro" => Month::November,
        "dezembro" => Month::December,
        _ => return None,
    };
    Some(month)
}

/// Canonical Portuguese name of a month.
pub fn month_name(month: Month) -> &'static str {
    match month {
        Month::January => "janeiro",
        Month::February => "fevereiro",
        Month::March => "março",
        Month::April => "abril",
        Month::May => "maio",
        Month::June => "junho",
        Month::July => "julho",
        Month::August => "agosto",
        Month::September => "setembro",
        Month::October => "outubro",
        Month::November => "novembro",
        Month::December => "dezembro",
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
