use thiserror::Error;

use crate::calendar::CalendarSystem;

/// Conversion errors.
#[derive(Error, Debug)]
pub enum ConvertError {
    /// A field conversion was asked of a calendar that does not use the
    /// plain Gregorian system. Reinterpreting such fields silently would
    /// produce wrong dates (a Buddhist year runs 543 ahead of the
    /// Gregorian one), so this is always an explicit failure.
    #[error("cannot convert {0} calendar fields; only the Gregorian calendar is supported")]
    UnsupportedCalendarSystem(CalendarSystem),
}

pub type CoreResult<T> = std::result::Result<T, ConvertError>;
