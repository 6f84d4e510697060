//! The conversion matrix.
//!
//! One function per ordered pair of temporal representations, named
//! `source_to_target`. `SystemTime` values are always interpreted and
//! produced as UTC; they carry no zone of their own. Pairs the matrix
//! leaves out (a `NaiveDate` straight from an instant, say) drop context
//! silently and are composed from two supported conversions instead.

use std::time::SystemTime;

use chrono::{
    DateTime, Duration, FixedOffset, Local, LocalResult, NaiveDate, NaiveDateTime, NaiveTime,
    TimeZone, Utc,
};
use chrono_tz::Tz;

use crate::calendar::{CalendarValue, CalendarZone};
use crate::error::{ConvertError, CoreResult};

fn require_gregorian(cal: &CalendarValue) -> CoreResult<()> {
    if cal.is_gregorian() {
        Ok(())
    } else {
        Err(ConvertError::UnsupportedCalendarSystem(cal.system))
    }
}

// ---- to SystemTime ----

/// Converts a calendar to an epoch timestamp.
///
/// A missing time component resolves to midnight, a missing date to the
/// current date in the calendar's zone.
///
/// ## Errors
/// Fails if the calendar is not Gregorian.
pub fn calendar_to_system_time(cal: &CalendarValue) -> CoreResult<SystemTime> {
    Ok(calendar_to_utc(cal)?.into())
}

/// Converts an instant to an epoch timestamp.
#[must_use]
pub fn utc_to_system_time(instant: DateTime<Utc>) -> SystemTime {
    instant.into()
}

/// Converts a zoned date-time to an epoch timestamp, normalizing to UTC.
#[must_use]
pub fn zoned_to_system_time<Z: TimeZone>(zoned: &DateTime<Z>) -> SystemTime {
    zoned.with_timezone(&Utc).into()
}

/// Converts a date to the epoch timestamp of that day's start, in UTC.
#[must_use]
pub fn date_to_system_time(date: NaiveDate) -> SystemTime {
    date.and_time(NaiveTime::MIN).and_utc().into()
}

/// Merges a time of day onto a date and converts the pair, assuming UTC.
#[must_use]
pub fn time_to_system_time_on(time: NaiveTime, date: NaiveDate) -> SystemTime {
    date.and_time(time).and_utc().into()
}

/// Merges a time of day onto the current system date, assuming UTC.
#[must_use]
pub fn time_to_system_time(time: NaiveTime) -> SystemTime {
    time_to_system_time_on(time, Local::now().date_naive())
}

/// Converts a zone-less date-time to an epoch timestamp, assuming it is
/// already expressed in UTC. No zone conversion is applied.
#[must_use]
pub fn datetime_to_system_time(datetime: NaiveDateTime) -> SystemTime {
    datetime.and_utc().into()
}

// ---- to CalendarValue ----

/// Converts an epoch timestamp to a UTC calendar.
#[must_use]
pub fn system_time_to_calendar(timestamp: SystemTime) -> CalendarValue {
    system_time_to_calendar_in(timestamp, CalendarZone::Utc)
}

/// Converts an epoch timestamp to a calendar in the given zone, applying
/// zone conversion to the fields.
#[must_use]
pub fn system_time_to_calendar_in(timestamp: SystemTime, zone: CalendarZone) -> CalendarValue {
    let utc: DateTime<Utc> = timestamp.into();
    let wall = utc.with_timezone(&zone.offset_at(utc)).naive_local();
    CalendarValue::from_parts(wall.date(), wall.time(), zone)
}

/// Converts an instant to a UTC calendar.
#[must_use]
pub fn utc_to_calendar(instant: DateTime<Utc>) -> CalendarValue {
    system_time_to_calendar(instant.into())
}

/// Converts a zoned date-time to a calendar carrying the same named zone.
#[must_use]
pub fn zoned_to_calendar(zoned: &DateTime<Tz>) -> CalendarValue {
    let wall = zoned.naive_local();
    CalendarValue::from_parts(wall.date(), wall.time(), CalendarZone::Named(zoned.timezone()))
}

/// Converts a fixed-offset date-time to a calendar carrying that offset.
#[must_use]
pub fn offset_to_calendar(zoned: &DateTime<FixedOffset>) -> CalendarValue {
    let wall = zoned.naive_local();
    CalendarValue::from_parts(wall.date(), wall.time(), CalendarZone::Fixed(zoned.timezone()))
}

/// Converts a date to a date-only calendar. The time component is left
/// unset; readers see an intentionally incomplete value.
#[must_use]
pub fn date_to_calendar(date: NaiveDate) -> CalendarValue {
    CalendarValue::date_only(date)
}

/// Converts a time of day to a time-only calendar. The date component is
/// left unset; readers see an intentionally incomplete value.
#[must_use]
pub fn time_to_calendar(time: NaiveTime) -> CalendarValue {
    CalendarValue::time_only(time)
}

/// Converts a zone-less date-time to a calendar in the host's default
/// zone. This is the one matrix entry that is zone-sensitive rather than
/// UTC-assumed.
#[must_use]
pub fn datetime_to_calendar(datetime: NaiveDateTime) -> CalendarValue {
    CalendarValue::from_parts(datetime.date(), datetime.time(), CalendarZone::Local)
}

// ---- to instants ----

/// Converts an epoch timestamp to an instant.
#[must_use]
pub fn system_time_to_utc(timestamp: SystemTime) -> DateTime<Utc> {
    timestamp.into()
}

/// Converts a calendar to an instant.
///
/// Defaults for missing components are as in [`calendar_to_system_time`].
///
/// ## Errors
/// Fails if the calendar is not Gregorian.
pub fn calendar_to_utc(cal: &CalendarValue) -> CoreResult<DateTime<Utc>> {
    require_gregorian(cal)?;
    Ok(cal.zone.resolve_wall(cal.wall_clock()).with_timezone(&Utc))
}

/// Converts a zoned date-time to an instant.
#[must_use]
pub fn zoned_to_utc<Z: TimeZone>(zoned: &DateTime<Z>) -> DateTime<Utc> {
    zoned.with_timezone(&Utc)
}

/// Converts a zone-less date-time known to be in the given fixed offset
/// to an instant.
#[must_use]
pub fn datetime_to_utc_at(datetime: NaiveDateTime, offset: FixedOffset) -> DateTime<Utc> {
    DateTime::<FixedOffset>::from_naive_utc_and_offset(datetime - offset, offset).with_timezone(&Utc)
}

// ---- to zoned values ----

/// Converts an epoch timestamp to a zoned date-time, always in UTC.
#[must_use]
pub fn system_time_to_zoned(timestamp: SystemTime) -> DateTime<Utc> {
    timestamp.into()
}

/// Converts an epoch timestamp to a date-time carrying the numeric offset
/// the host's default zone has at that instant.
///
/// The result records a fixed offset, not a symbolic zone: it answers
/// "what was the local offset at this moment", an answer that stays
/// stable across later daylight-saving transitions.
#[must_use]
pub fn system_time_to_zoned_local(timestamp: SystemTime) -> DateTime<FixedOffset> {
    let utc: DateTime<Utc> = timestamp.into();
    let offset = Local.offset_from_utc_datetime(&utc.naive_utc());
    utc.with_timezone(&offset)
}

/// Converts a calendar to a date-time carrying the offset the calendar's
/// zone has at that wall-clock time.
///
/// ## Errors
/// Fails if the calendar is not Gregorian.
pub fn calendar_to_zoned(cal: &CalendarValue) -> CoreResult<DateTime<FixedOffset>> {
    require_gregorian(cal)?;
    Ok(cal.zone.resolve_wall(cal.wall_clock()))
}

/// Converts an instant to a zoned date-time in the given zone.
#[must_use]
pub fn utc_to_zoned_in<Z: TimeZone>(instant: DateTime<Utc>, zone: &Z) -> DateTime<Z> {
    instant.with_timezone(zone)
}

/// Interprets a zone-less date-time as wall-clock time in the given zone.
///
/// Wall times inside a daylight-saving gap shift forward one hour;
/// folded wall times resolve to the earlier of the two instants.
#[must_use]
pub fn datetime_to_zoned_in<Z: TimeZone>(datetime: NaiveDateTime, zone: &Z) -> DateTime<Z> {
    match zone.from_local_datetime(&datetime) {
        LocalResult::Single(zoned) => zoned,
        LocalResult::Ambiguous(first, _) => first,
        LocalResult::None => {
            let shifted = datetime + Duration::hours(1);
            match zone.from_local_datetime(&shifted) {
                LocalResult::Single(zoned) | LocalResult::Ambiguous(zoned, _) => zoned,
                // No real zone gaps twice within an hour.
                LocalResult::None => zone.from_utc_datetime(&datetime),
            }
        }
    }
}

// ---- to local (zone-less) values ----

/// Reads the calendar date of an epoch timestamp, interpreted as UTC.
#[must_use]
pub fn system_time_to_date(timestamp: SystemTime) -> NaiveDate {
    system_time_to_utc(timestamp).date_naive()
}

/// Reads the date component of a calendar. Zone and time information is
/// discarded; a calendar without a date yields `None`.
///
/// ## Errors
/// Fails if the calendar is not Gregorian.
pub fn calendar_to_date(cal: &CalendarValue) -> CoreResult<Option<NaiveDate>> {
    require_gregorian(cal)?;
    Ok(cal.date)
}

/// Reads the time of day of an epoch timestamp, interpreted as UTC.
#[must_use]
pub fn system_time_to_time(timestamp: SystemTime) -> NaiveTime {
    system_time_to_utc(timestamp).time()
}

/// Reads the time component of a calendar. Zone and date information is
/// discarded; a calendar without a time yields `None`.
///
/// ## Errors
/// Fails if the calendar is not Gregorian.
pub fn calendar_to_time(cal: &CalendarValue) -> CoreResult<Option<NaiveTime>> {
    require_gregorian(cal)?;
    Ok(cal.time)
}

/// Reads the wall-clock date-time of an epoch timestamp, interpreted as
/// UTC.
#[must_use]
pub fn system_time_to_datetime(timestamp: SystemTime) -> NaiveDateTime {
    system_time_to_utc(timestamp).naive_utc()
}

/// Reads the wall-clock date-time of a calendar, discarding the zone.
/// `None` unless both components are set.
///
/// ## Errors
/// Fails if the calendar is not Gregorian.
pub fn calendar_to_datetime(cal: &CalendarValue) -> CoreResult<Option<NaiveDateTime>> {
    require_gregorian(cal)?;
    Ok(match (cal.date, cal.time) {
        (Some(date), Some(time)) => Some(date.and_time(time)),
        _ => None,
    })
}
