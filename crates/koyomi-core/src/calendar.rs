//! Field-based calendar values.

use std::fmt;

use chrono::{
    DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone, Utc,
};
use chrono_tz::Tz;

/// Calendar system a [`CalendarValue`]'s fields are expressed in.
///
/// Only [`CalendarSystem::Gregorian`] fields convert to instants and
/// `chrono` values; the other systems number years and months differently
/// and must be rejected rather than reinterpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CalendarSystem {
    /// Proleptic Gregorian, the only convertible system.
    Gregorian,
    Buddhist,
    Hebrew,
    Islamic,
    Japanese,
}

impl CalendarSystem {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Gregorian => "gregorian",
            Self::Buddhist => "buddhist",
            Self::Hebrew => "hebrew",
            Self::Islamic => "islamic",
            Self::Japanese => "japanese",
        }
    }
}

impl fmt::Display for CalendarSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Zone attached to a [`CalendarValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarZone {
    /// Coordinated universal time.
    Utc,
    /// A fixed offset from UTC, not tied to any named zone's DST rules.
    Fixed(FixedOffset),
    /// A named IANA zone with its full DST rules.
    Named(Tz),
    /// The host's default zone, resolved when the value is converted so
    /// the calendar itself stays a pure value.
    Local,
}

impl CalendarZone {
    /// Offset this zone has at the given UTC instant.
    pub(crate) fn offset_at(self, utc: DateTime<Utc>) -> FixedOffset {
        match self {
            Self::Utc => Utc.fix(),
            Self::Fixed(offset) => offset,
            Self::Named(tz) => tz.offset_from_utc_datetime(&utc.naive_utc()).fix(),
            Self::Local => Local.offset_from_utc_datetime(&utc.naive_utc()),
        }
    }

    /// Interprets a wall-clock date-time in this zone.
    pub(crate) fn resolve_wall(self, wall: NaiveDateTime) -> DateTime<FixedOffset> {
        match self {
            Self::Utc => DateTime::from_naive_utc_and_offset(wall, Utc.fix()),
            Self::Fixed(offset) => DateTime::from_naive_utc_and_offset(wall - offset, offset),
            Self::Named(tz) => crate::convert::datetime_to_zoned_in(wall, &tz).fixed_offset(),
            Self::Local => crate::convert::datetime_to_zoned_in(wall, &Local).fixed_offset(),
        }
    }
}

/// A field-based calendar value with an attached zone.
///
/// Mirrors the shape of a groupware calendar record: the date and the
/// time of day are independent components and a value may intentionally
/// carry only one of them. Readers must not assume both are present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarValue {
    /// Calendar date, if set.
    pub date: Option<NaiveDate>,
    /// Time of day, if set.
    pub time: Option<NaiveTime>,
    /// Zone the fields are expressed in.
    pub zone: CalendarZone,
    /// Calendar system the fields are expressed in.
    pub system: CalendarSystem,
}

impl CalendarValue {
    /// Creates an empty Gregorian calendar in the given zone.
    #[must_use]
    pub const fn new(zone: CalendarZone) -> Self {
        Self {
            date: None,
            time: None,
            zone,
            system: CalendarSystem::Gregorian,
        }
    }

    /// Creates a complete Gregorian calendar from explicit components.
    #[must_use]
    pub const fn from_parts(date: NaiveDate, time: NaiveTime, zone: CalendarZone) -> Self {
        Self {
            date: Some(date),
            time: Some(time),
            zone,
            system: CalendarSystem::Gregorian,
        }
    }

    /// Creates a date-only calendar in the host's default zone. The time
    /// component is intentionally left unset.
    #[must_use]
    pub const fn date_only(date: NaiveDate) -> Self {
        Self {
            date: Some(date),
            time: None,
            zone: CalendarZone::Local,
            system: CalendarSystem::Gregorian,
        }
    }

    /// Creates a time-only calendar in the host's default zone. The date
    /// component is intentionally left unset.
    #[must_use]
    pub const fn time_only(time: NaiveTime) -> Self {
        Self {
            date: None,
            time: Some(time),
            zone: CalendarZone::Local,
            system: CalendarSystem::Gregorian,
        }
    }

    /// Returns the same calendar tagged with a different calendar system.
    #[must_use]
    pub const fn with_system(self, system: CalendarSystem) -> Self {
        Self { system, ..self }
    }

    /// Whether both the date and the time component are set.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.date.is_some() && self.time.is_some()
    }

    /// Whether the fields use the plain Gregorian calendar.
    #[must_use]
    pub const fn is_gregorian(&self) -> bool {
        matches!(self.system, CalendarSystem::Gregorian)
    }

    /// Wall-clock date-time after applying the documented defaults: a
    /// missing time is midnight, a missing date is the current date in
    /// this calendar's zone.
    pub(crate) fn wall_clock(&self) -> NaiveDateTime {
        let date = self.date.unwrap_or_else(|| {
            let now = Utc::now();
            now.with_timezone(&self.zone.offset_at(now)).date_naive()
        });
        date.and_time(self.time.unwrap_or(NaiveTime::MIN))
    }
}
