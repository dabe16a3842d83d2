use chrono::{Local, NaiveDateTime, TimeDelta};

use crate::error::ScrapeError;

pub const LIST_SEPARATOR: &str = "\n\n- ";

pub const POST_DATE_FORMAT: &str = "%Y-%m-%d";

/// Collapses every whitespace run to a single space and trims both ends.
pub fn clean_one(value: &str) -> String {
    value.split_whitespace().collect::<Vec<&str>>().join(" ")
}

/// Joins fragments as-is; elements are not cleaned individually.
pub fn clean_many<S: AsRef<str>>(values: &[S]) -> String {
    values
        .iter()
        .map(|v| v.as_ref())
        .collect::<Vec<&str>>()
        .join(LIST_SEPARATOR)
}

/// Prefixes `$` on every part of a salary range that starts with a digit,
/// e.g. `40 - 50 an hour` becomes `$40 - $50 an hour`.
pub fn attach_currency_symbol(salary: &str) -> String {
    let salary = salary.replace('\u{2013}', "-");

    match salary.chars().next() {
        Some(first) if first.is_ascii_digit() => salary
            .split('-')
            .map(|part| {
                let amount_start = part.len() - part.trim_start().len();
                format!("{}${}", &part[..amount_start], &part[amount_start..])
            })
            .collect::<Vec<String>>()
            .join("-"),
        _ => salary,
    }
}

/// Cheap format check to run before `relative_time_to_date`.
pub fn is_relative_time_phrase(phrase: &str) -> bool {
    let tokens: Vec<&str> = phrase.split_whitespace().collect();
    tokens.len() == 3 && tokens[0].parse::<i64>().is_ok()
}

/// Parses `<integer> <unit> ago` against the local clock.
///
/// Unknown units are logged and yield `Ok(None)`. Anything that is not three
/// whitespace separated tokens with a leading integer is an error, so callers
/// should check with [`is_relative_time_phrase`] first.
pub fn relative_time_to_date(phrase: &str) -> Result<Option<NaiveDateTime>, ScrapeError> {
    relative_time_from(phrase, Local::now().naive_local())
}

pub fn relative_time_from(
    phrase: &str,
    now: NaiveDateTime,
) -> Result<Option<NaiveDateTime>, ScrapeError> {
    let malformed = || ScrapeError::MalformedTimePhrase(phrase.to_string());

    let tokens: Vec<&str> = phrase.split_whitespace().collect();
    let [value, unit, _] = tokens.as_slice() else {
        return Err(malformed());
    };
    let value: i64 = value.parse().map_err(|_| malformed())?;

    let Some(unit_seconds) = unit_seconds(unit) else {
        log::warn!("Unsupported time unit `{}` in `{}`", unit, phrase);
        return Ok(None);
    };

    let delta = value
        .checked_mul(unit_seconds)
        .and_then(TimeDelta::try_seconds)
        .ok_or_else(malformed)?;

    now.checked_sub_signed(delta)
        .map(Some)
        .ok_or_else(malformed)
}

pub fn format_post_date(date: NaiveDateTime) -> String {
    date.format(POST_DATE_FORMAT).to_string()
}

fn unit_seconds(unit: &str) -> Option<i64> {
    match unit {
        "second" | "seconds" => Some(1),
        "minute" | "minutes" => Some(60),
        "hour" | "hours" => Some(60 * 60),
        "day" | "days" => Some(24 * 60 * 60),
        "week" | "weeks" => Some(7 * 24 * 60 * 60),
        _ => None,
    }
}
