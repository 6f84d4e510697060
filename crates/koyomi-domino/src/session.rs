//! Collaborator traits for the live platform session.
//!
//! The bridge depends on exactly two capabilities of a Domino session:
//! constructing a `DateTime` value and reading the international
//! settings. Session lifetime and thread affinity stay entirely with the
//! caller; the bridge never opens or closes anything.

use std::time::SystemTime;

use koyomi_core::CalendarValue;

use crate::intl::IntlSettings;

/// A Domino `DateTime` value.
///
/// Both text renderings end in a trailing zone token. There is no native
/// zone accessor here on purpose: the platform reports the zone at
/// whole-hour granularity only, which is why the bridge reconstructs
/// offsets from the renderings instead.
pub trait DateTimeValue {
    /// Error reported by the platform.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Text rendering in the value's own zone.
    ///
    /// ## Errors
    /// Propagates platform failures.
    fn zone_time(&self) -> Result<String, Self::Error>;

    /// Text rendering normalized to GMT.
    ///
    /// ## Errors
    /// Propagates platform failures.
    fn gmt_time(&self) -> Result<String, Self::Error>;

    /// The value as an epoch timestamp (UTC); the native accessor.
    ///
    /// ## Errors
    /// Propagates platform failures.
    fn to_system_time(&self) -> Result<SystemTime, Self::Error>;

    /// Marks the date component as unconstrained ("any date").
    ///
    /// ## Errors
    /// Propagates platform failures.
    fn set_any_date(&mut self) -> Result<(), Self::Error>;

    /// Marks the time component as unconstrained ("any time").
    ///
    /// ## Errors
    /// Propagates platform failures.
    fn set_any_time(&mut self) -> Result<(), Self::Error>;
}

/// A live platform session able to construct `DateTime` values.
pub trait Session {
    /// Error reported by the platform.
    type Error: std::error::Error + Send + Sync + 'static;
    /// The platform's date-time value.
    type Value: DateTimeValue<Error = Self::Error>;

    /// Constructs a value from calendar fields.
    ///
    /// ## Errors
    /// Propagates platform failures.
    fn date_time_from_calendar(&self, cal: &CalendarValue) -> Result<Self::Value, Self::Error>;

    /// Constructs a value from an epoch timestamp.
    ///
    /// ## Errors
    /// Propagates platform failures.
    fn date_time_from_system_time(&self, timestamp: SystemTime)
    -> Result<Self::Value, Self::Error>;

    /// Reads the session's international settings.
    ///
    /// ## Errors
    /// Propagates platform failures.
    fn international(&self) -> Result<IntlSettings, Self::Error>;
}
