//! Calendar and instant conversion primitives.
//!
//! `koyomi-core` provides the conversion matrix between the temporal
//! representations used across the workspace: `std::time::SystemTime`
//! (epoch timestamps, always read and written as UTC), the `chrono`
//! instant and zoned types, the zone-less `Naive*` values, and
//! [`CalendarValue`], a field-based calendar that may intentionally carry
//! only a date or only a time.
//!
//! Every conversion is a pure synchronous function; the only fallible
//! path is reading fields out of a calendar that does not use the plain
//! Gregorian system.

pub mod calendar;
pub mod convert;
pub mod error;

pub use calendar::{CalendarSystem, CalendarValue, CalendarZone};
pub use error::{ConvertError, CoreResult};
