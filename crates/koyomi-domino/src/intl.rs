//! International (locale) settings and the date-time pattern they imply.
//!
//! Domino renders `DateTime` text according to the session's
//! international settings. The builders here turn those settings into a
//! `chrono` strftime pattern that parses the renderings back.

use serde::Deserialize;

use crate::error::{BridgeError, BridgeResult};

/// Field order of the date portion of a rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateOrder {
    YearMonthDay,
    DayMonthYear,
    MonthDayYear,
}

/// Snapshot of a session's international settings.
///
/// Carries the fields the platform exposes: separators, three mutually
/// exclusive date-order flags, the 24-hour flag, and the AM/PM labels.
/// The flags are kept exactly as the platform reports them;
/// [`IntlSettings::date_order`] validates them.
#[derive(Debug, Clone, Deserialize)]
#[expect(
    clippy::struct_excessive_bools,
    reason = "Mirrors the flag surface the platform's international settings expose"
)]
pub struct IntlSettings {
    pub time_separator: String,
    pub date_separator: String,
    pub date_ymd: bool,
    pub date_dmy: bool,
    pub date_mdy: bool,
    pub time_24_hour: bool,
    pub am_string: String,
    pub pm_string: String,
}

impl IntlSettings {
    /// Validates the three date-order flags.
    ///
    /// ## Errors
    /// Fails unless exactly one flag is set.
    pub fn date_order(&self) -> BridgeResult<DateOrder> {
        match (self.date_ymd, self.date_dmy, self.date_mdy) {
            (true, false, false) => Ok(DateOrder::YearMonthDay),
            (false, true, false) => Ok(DateOrder::DayMonthYear),
            (false, false, true) => Ok(DateOrder::MonthDayYear),
            (ymd, dmy, mdy) => Err(BridgeError::MalformedLocaleConfiguration { ymd, dmy, mdy }),
        }
    }
}

/// Escapes a literal separator for use inside a `chrono` format string.
fn escape_literal(separator: &str) -> String {
    separator.replace('%', "%%")
}

/// ## Summary
/// Builds the `chrono` pattern that parses the platform's text renderings
/// of a date-time, without a zone slot.
///
/// The pattern is the date fields in locale order joined by the date
/// separator, a space, then hour, minute and second joined by the time
/// separator, with a trailing AM/PM slot in 12-hour mode. The AM/PM label
/// strings themselves never enter the pattern; only the 24-hour flag
/// decides whether the slot appears.
///
/// There is no zone slot because `chrono` cannot parse abbreviated zone
/// names (`%Z` formats but does not parse); strip the trailing zone token
/// of a rendering before parsing with this pattern.
///
/// ## Errors
/// Fails fast with [`BridgeError::MalformedLocaleConfiguration`] when the
/// date-order flags are inconsistent.
pub fn build_pattern(intl: &IntlSettings) -> BridgeResult<String> {
    let date_sep = escape_literal(&intl.date_separator);
    let time_sep = escape_literal(&intl.time_separator);
    let mut pattern = String::new();
    // Date
    let (first, second, third) = match intl.date_order()? {
        DateOrder::YearMonthDay => ("%Y", "%m", "%d"),
        DateOrder::DayMonthYear => ("%d", "%m", "%Y"),
        DateOrder::MonthDayYear => ("%m", "%d", "%Y"),
    };
    pattern.push_str(first);
    pattern.push_str(&date_sep);
    pattern.push_str(second);
    pattern.push_str(&date_sep);
    pattern.push_str(third);
    pattern.push(' ');
    // Time
    pattern.push_str(if intl.time_24_hour { "%H" } else { "%I" });
    pattern.push_str(&time_sep);
    pattern.push_str("%M");
    pattern.push_str(&time_sep);
    pattern.push_str("%S");
    // AM or PM
    if !intl.time_24_hour {
        pattern.push_str(" %p");
    }
    tracing::debug!(%pattern, "built locale date-time pattern");
    Ok(pattern)
}

/// ## Summary
/// Builds the same pattern with a trailing zone-name slot (` %Z`).
///
/// Formatting only: `chrono` renders `%Z` but refuses to parse it, so
/// this variant cannot be used on the platform's text renderings.
///
/// ## Errors
/// As [`build_pattern`].
pub fn build_pattern_with_zone(intl: &IntlSettings) -> BridgeResult<String> {
    let mut pattern = build_pattern(intl)?;
    pattern.push_str(" %Z");
    Ok(pattern)
}
