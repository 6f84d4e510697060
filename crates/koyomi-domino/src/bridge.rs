//! The Domino `DateTime` bridge.

use std::sync::OnceLock;
use std::time::SystemTime;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use chrono_tz::Tz;
use koyomi_core::{CalendarValue, convert};

use crate::error::{BridgeError, BridgeResult};
use crate::intl::build_pattern;
use crate::session::{DateTimeValue, Session};
use crate::zone;

/// Converts between Domino `DateTime` values and the other temporal
/// representations.
///
/// Owns the session handle it constructs values through and caches the
/// locale-derived parse pattern: the first text conversion builds it from
/// the session's international settings, every later conversion reuses
/// it. Concurrent first calls may build the pattern redundantly, but
/// `OnceLock` publishes exactly one fully built value.
pub struct DominoBridge<S: Session> {
    session: S,
    pattern: OnceLock<String>,
}

impl<S: Session> DominoBridge<S> {
    /// Creates a bridge over a live session.
    #[must_use]
    pub fn new(session: S) -> Self {
        Self {
            session,
            pattern: OnceLock::new(),
        }
    }

    /// The session this bridge constructs values through.
    #[must_use]
    pub fn session(&self) -> &S {
        &self.session
    }

    /// Locale parse pattern, built on first use.
    fn pattern(&self) -> BridgeResult<&str> {
        if let Some(pattern) = self.pattern.get() {
            return Ok(pattern);
        }
        let intl = self.session.international().map_err(session_error)?;
        let built = build_pattern(&intl)?;
        Ok(self.pattern.get_or_init(|| built))
    }

    /// Parses a text rendering with the cached pattern after stripping
    /// the trailing zone token.
    fn parse_rendering(&self, text: &str) -> BridgeResult<NaiveDateTime> {
        let pattern = self.pattern()?;
        let body = strip_zone_token(text).ok_or_else(|| BridgeError::TextParse {
            text: text.to_owned(),
            pattern: pattern.to_owned(),
            source: None,
        })?;
        NaiveDateTime::parse_from_str(body, pattern).map_err(|source| BridgeError::TextParse {
            text: text.to_owned(),
            pattern: pattern.to_owned(),
            source: Some(source),
        })
    }

    // ---- DateTime -> internal representations ----

    /// ## Summary
    /// Converts a `DateTime` value to a date-time with its full zone
    /// offset preserved.
    ///
    /// The platform reports a value's zone as a whole number of hours,
    /// which misreports half- and quarter-hour zones such as central
    /// Australia or Nepal. The full offset is therefore reconstructed
    /// from text: both renderings are parsed with the locale pattern and
    /// the signed minute difference between the zone-local and the GMT
    /// wall clock is the zone's offset, fractional hours included.
    ///
    /// Prefer [`Self::to_zoned_date_time_utc`] when the original zone
    /// need not survive; it skips the double parse entirely.
    ///
    /// ## Errors
    /// Fails on inconsistent locale settings, renderings that do not
    /// match the locale pattern, differences that are not a valid UTC
    /// offset, and session failures.
    #[tracing::instrument(skip_all)]
    pub fn to_offset_date_time(&self, value: &S::Value) -> BridgeResult<DateTime<FixedOffset>> {
        let local = self.parse_rendering(&value.zone_time().map_err(session_error)?)?;
        let gmt = self.parse_rendering(&value.gmt_time().map_err(session_error)?)?;
        let minutes = local.signed_duration_since(gmt).num_minutes();
        let offset = offset_from_minutes(minutes)?;
        tracing::trace!(%offset, "reconstructed zone offset");
        Ok(DateTime::from_naive_utc_and_offset(local - offset, offset))
    }

    /// ## Summary
    /// Converts a `DateTime` value plus a known Notes time zone field to
    /// a date-time in the matching named zone.
    ///
    /// Cheaper than [`Self::to_offset_date_time`] (a single parse, no
    /// differencing), but only available when the caller holds the zone
    /// field and its label maps.
    ///
    /// ## Errors
    /// [`BridgeError::UnresolvableZoneLabel`] when the field has no
    /// mapping; otherwise as [`Self::to_offset_date_time`].
    pub fn to_zoned_date_time(
        &self,
        value: &S::Value,
        notes_zone: &str,
    ) -> BridgeResult<DateTime<Tz>> {
        let tz = zone::zone_id(notes_zone)
            .ok_or_else(|| BridgeError::UnresolvableZoneLabel(notes_zone.to_owned()))?;
        let local = self.parse_rendering(&value.zone_time().map_err(session_error)?)?;
        Ok(convert::datetime_to_zoned_in(local, &tz))
    }

    /// ## Summary
    /// Converts a `DateTime` value to a zoned date-time normalized to
    /// UTC, via the native accessor and with no text parsing.
    ///
    /// The fastest conversion; use it whenever the original zone does
    /// not matter.
    ///
    /// ## Errors
    /// Session failures only.
    pub fn to_zoned_date_time_utc(&self, value: &S::Value) -> BridgeResult<DateTime<Utc>> {
        Ok(convert::system_time_to_utc(self.to_system_time(value)?))
    }

    /// The value as an epoch timestamp, via the native accessor.
    ///
    /// ## Errors
    /// Session failures only.
    pub fn to_system_time(&self, value: &S::Value) -> BridgeResult<SystemTime> {
        value.to_system_time().map_err(session_error)
    }

    /// The value as an instant, via the native accessor.
    ///
    /// ## Errors
    /// Session failures only.
    pub fn to_utc(&self, value: &S::Value) -> BridgeResult<DateTime<Utc>> {
        self.to_zoned_date_time_utc(value)
    }

    /// Converts a value plus a known Notes time zone field to a calendar
    /// in that zone.
    ///
    /// ## Errors
    /// As [`Self::to_zoned_date_time`].
    pub fn to_calendar(&self, value: &S::Value, notes_zone: &str) -> BridgeResult<CalendarValue> {
        Ok(convert::zoned_to_calendar(
            &self.to_zoned_date_time(value, notes_zone)?,
        ))
    }

    /// ## Summary
    /// Reads the value's own wall-clock date-time, discarding the zone.
    ///
    /// Parses the zone-local rendering rather than a host-local one: the
    /// original date and time must come through unshifted.
    ///
    /// ## Errors
    /// As [`Self::to_offset_date_time`], minus the differencing.
    pub fn to_naive_date_time(&self, value: &S::Value) -> BridgeResult<NaiveDateTime> {
        self.parse_rendering(&value.zone_time().map_err(session_error)?)
    }

    /// Reads the value's calendar date, discarding time and zone.
    ///
    /// ## Errors
    /// As [`Self::to_naive_date_time`].
    pub fn to_naive_date(&self, value: &S::Value) -> BridgeResult<NaiveDate> {
        Ok(self.to_naive_date_time(value)?.date())
    }

    /// Reads the value's time of day, discarding date and zone.
    ///
    /// ## Errors
    /// As [`Self::to_naive_date_time`].
    pub fn to_naive_time(&self, value: &S::Value) -> BridgeResult<NaiveTime> {
        Ok(self.to_naive_date_time(value)?.time())
    }

    // ---- internal representations -> DateTime ----

    /// Constructs a value from an epoch timestamp.
    ///
    /// ## Errors
    /// Session failures only.
    pub fn from_system_time(&self, timestamp: SystemTime) -> BridgeResult<S::Value> {
        self.session
            .date_time_from_system_time(timestamp)
            .map_err(session_error)
    }

    /// Constructs a value from an instant.
    ///
    /// ## Errors
    /// Session failures only.
    pub fn from_utc(&self, instant: DateTime<Utc>) -> BridgeResult<S::Value> {
        self.from_system_time(convert::utc_to_system_time(instant))
    }

    /// Constructs a value from calendar fields.
    ///
    /// ## Errors
    /// Fails for non-Gregorian calendars, whose fields the platform
    /// would reinterpret silently, and on session failures.
    pub fn from_calendar(&self, cal: &CalendarValue) -> BridgeResult<S::Value> {
        if !cal.is_gregorian() {
            return Err(koyomi_core::ConvertError::UnsupportedCalendarSystem(cal.system).into());
        }
        self.session
            .date_time_from_calendar(cal)
            .map_err(session_error)
    }

    /// Constructs a value from a zoned date-time.
    ///
    /// ## Errors
    /// Session failures only.
    pub fn from_zoned(&self, zoned: &DateTime<Tz>) -> BridgeResult<S::Value> {
        self.from_calendar(&convert::zoned_to_calendar(zoned))
    }

    /// Constructs a value from a fixed-offset date-time.
    ///
    /// ## Errors
    /// Session failures only.
    pub fn from_offset(&self, zoned: &DateTime<FixedOffset>) -> BridgeResult<S::Value> {
        self.from_calendar(&convert::offset_to_calendar(zoned))
    }

    /// Constructs a value from a zone-less date-time, which lands in the
    /// host's default zone.
    ///
    /// ## Errors
    /// Session failures only.
    pub fn from_naive_date_time(&self, datetime: NaiveDateTime) -> BridgeResult<S::Value> {
        self.from_calendar(&convert::datetime_to_calendar(datetime))
    }

    /// ## Summary
    /// Constructs a date-only value with the time wildcarded.
    ///
    /// The created value's time component is marked "any time" rather
    /// than left at an implicit midnight, so the platform treats it as
    /// unconstrained.
    ///
    /// ## Errors
    /// Session failures only.
    pub fn from_naive_date(&self, date: NaiveDate) -> BridgeResult<S::Value> {
        let mut value = self.from_calendar(&convert::date_to_calendar(date))?;
        value.set_any_time().map_err(session_error)?;
        Ok(value)
    }

    /// ## Summary
    /// Constructs a time-only value with the date wildcarded.
    ///
    /// The created value's date component is marked "any date" rather
    /// than left at an implicit epoch date.
    ///
    /// ## Errors
    /// Session failures only.
    pub fn from_naive_time(&self, time: NaiveTime) -> BridgeResult<S::Value> {
        let mut value = self.from_calendar(&convert::time_to_calendar(time))?;
        value.set_any_date().map_err(session_error)?;
        Ok(value)
    }
}

fn session_error<E>(err: E) -> BridgeError
where
    E: std::error::Error + Send + Sync + 'static,
{
    BridgeError::Session(Box::new(err))
}

/// Splits off the trailing zone token of a rendering (everything after
/// the last space).
fn strip_zone_token(text: &str) -> Option<&str> {
    let (body, _zone) = text.rsplit_once(' ')?;
    Some(body)
}

/// Builds a fixed offset from a signed minute difference.
fn offset_from_minutes(minutes: i64) -> BridgeResult<FixedOffset> {
    i32::try_from(minutes.saturating_mul(60))
        .ok()
        .and_then(FixedOffset::east_opt)
        .ok_or(BridgeError::OffsetOutOfRange { minutes })
}
