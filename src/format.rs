//! Display helpers using German locale conventions

use chrono::{DateTime, NaiveDateTime, TimeZone};
use std::fmt::Display;

const DATE_TIME_FORMAT: &str = "%d.%m.%Y, %H:%M";

/// Format an amount as euros, e.g. `1234.5` -> `1.234,50 €`
///
/// The sign is separated by a non-breaking space.
pub fn format_currency(amount: f64) -> String {
    let total_cents = (amount.abs() * 100.0).round() as u64;
    let euros = total_cents / 100;
    let cents = total_cents % 100;
    let sign = if amount < 0.0 && total_cents > 0 { "-" } else { "" };

    format!("{}{},{:02}\u{a0}€", sign, group_thousands(euros), cents)
}

/// Format a timestamp as medium date plus short time, e.g. `16.10.2026, 14:30`
///
/// The value is rendered in its own time zone; convert with
/// `with_timezone(&chrono::Local)` first to show local time.
pub fn format_date_time<Tz>(date: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    date.format(DATE_TIME_FORMAT).to_string()
}

/// Same as [`format_date_time`] for values without a time zone
pub fn format_naive_date_time(date: &NaiveDateTime) -> String {
    date.format(DATE_TIME_FORMAT).to_string()
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}
