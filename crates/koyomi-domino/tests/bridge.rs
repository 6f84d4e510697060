//! Bridge integration tests over an in-memory Domino session.
//!
//! The mock session renders values the way a US-locale (month-day-year,
//! 12-hour) server would, so the text paths run end to end without a
//! live platform.

use std::cell::Cell;
use std::convert::Infallible;
use std::time::SystemTime;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use koyomi_core::{CalendarSystem, CalendarValue, CalendarZone, convert};
use koyomi_domino::{BridgeError, DateTimeValue, DominoBridge, IntlSettings, Session};

fn us_settings() -> IntlSettings {
    IntlSettings {
        time_separator: ":".to_owned(),
        date_separator: "/".to_owned(),
        date_ymd: false,
        date_dmy: false,
        date_mdy: true,
        time_24_hour: false,
        am_string: "AM".to_owned(),
        pm_string: "PM".to_owned(),
    }
}

#[derive(Debug, Clone)]
struct MockDateTime {
    zone_time: String,
    gmt_time: String,
    timestamp: SystemTime,
    any_date: bool,
    any_time: bool,
}

impl MockDateTime {
    fn from_texts(zone_time: &str, gmt_time: &str) -> Self {
        Self {
            zone_time: zone_time.to_owned(),
            gmt_time: gmt_time.to_owned(),
            timestamp: SystemTime::UNIX_EPOCH,
            any_date: false,
            any_time: false,
        }
    }

    fn from_instant(instant: DateTime<Utc>) -> Self {
        let rendered = format!("{} GMT", instant.format("%m/%d/%Y %I:%M:%S %p"));
        Self {
            zone_time: rendered.clone(),
            gmt_time: rendered,
            timestamp: convert::utc_to_system_time(instant),
            any_date: false,
            any_time: false,
        }
    }
}

impl DateTimeValue for MockDateTime {
    type Error = Infallible;

    fn zone_time(&self) -> Result<String, Infallible> {
        Ok(self.zone_time.clone())
    }

    fn gmt_time(&self) -> Result<String, Infallible> {
        Ok(self.gmt_time.clone())
    }

    fn to_system_time(&self) -> Result<SystemTime, Infallible> {
        Ok(self.timestamp)
    }

    fn set_any_date(&mut self) -> Result<(), Infallible> {
        self.any_date = true;
        Ok(())
    }

    fn set_any_time(&mut self) -> Result<(), Infallible> {
        self.any_time = true;
        Ok(())
    }
}

struct MockSession {
    intl: IntlSettings,
    intl_reads: Cell<u32>,
}

impl MockSession {
    fn new() -> Self {
        Self::with_settings(us_settings())
    }

    fn with_settings(intl: IntlSettings) -> Self {
        Self {
            intl,
            intl_reads: Cell::new(0),
        }
    }
}

impl Session for MockSession {
    type Error = Infallible;
    type Value = MockDateTime;

    fn date_time_from_calendar(&self, cal: &CalendarValue) -> Result<MockDateTime, Infallible> {
        let timestamp =
            convert::calendar_to_system_time(cal).expect("mock calendars are Gregorian");
        Ok(MockDateTime::from_instant(convert::system_time_to_utc(
            timestamp,
        )))
    }

    fn date_time_from_system_time(
        &self,
        timestamp: SystemTime,
    ) -> Result<MockDateTime, Infallible> {
        Ok(MockDateTime::from_instant(convert::system_time_to_utc(
            timestamp,
        )))
    }

    fn international(&self) -> Result<IntlSettings, Infallible> {
        self.intl_reads.set(self.intl_reads.get() + 1);
        Ok(self.intl.clone())
    }
}

fn bridge() -> DominoBridge<MockSession> {
    DominoBridge::new(MockSession::new())
}

#[test_log::test]
fn reconstructs_whole_hour_offset() {
    let value = MockDateTime::from_texts("10/9/2018 11:10:09 PM MST", "10/10/2018 6:10:09 AM GMT");
    let odt = bridge().to_offset_date_time(&value).unwrap();
    assert_eq!(*odt.offset(), FixedOffset::west_opt(7 * 3600).unwrap());
    assert_eq!(
        odt.with_timezone(&Utc),
        Utc.with_ymd_and_hms(2018, 10, 10, 6, 10, 9).unwrap()
    );
}

#[test_log::test]
fn reconstructs_half_hour_offset() {
    // Central Australia: the platform's whole-hour zone accessor would
    // truncate +09:30 to +09:00.
    let value = MockDateTime::from_texts("10/10/2018 8:40:09 AM ACST", "10/9/2018 11:10:09 PM GMT");
    let odt = bridge().to_offset_date_time(&value).unwrap();
    assert_eq!(
        *odt.offset(),
        FixedOffset::east_opt(9 * 3600 + 30 * 60).unwrap()
    );
    assert_eq!(
        odt.with_timezone(&Utc),
        Utc.with_ymd_and_hms(2018, 10, 9, 23, 10, 9).unwrap()
    );
}

#[test_log::test]
fn reconstructs_quarter_hour_offset() {
    // Nepal, +05:45.
    let value = MockDateTime::from_texts("10/10/2018 4:55:09 AM NPT", "10/9/2018 11:10:09 PM GMT");
    let odt = bridge().to_offset_date_time(&value).unwrap();
    assert_eq!(
        *odt.offset(),
        FixedOffset::east_opt(5 * 3600 + 45 * 60).unwrap()
    );
}

#[test_log::test]
fn zoned_conversion_resolves_the_label() {
    let value = MockDateTime::from_texts("10/10/2018 8:10:09 AM JST", "10/9/2018 11:10:09 PM GMT");
    let zdt = bridge()
        .to_zoned_date_time(&value, "Z=-23$DO=0$ZX=79$ZN=Tokyo")
        .unwrap();
    assert_eq!(zdt.timezone(), Tz::Asia__Tokyo);
    assert_eq!(
        zdt.with_timezone(&Utc),
        Utc.with_ymd_and_hms(2018, 10, 9, 23, 10, 9).unwrap()
    );
}

#[test_log::test]
fn unresolvable_labels_are_explicit() {
    let value = MockDateTime::from_texts("10/10/2018 8:10:09 AM XST", "10/9/2018 11:10:09 PM GMT");
    let err = bridge()
        .to_zoned_date_time(&value, "Z=5$DO=1$ZX=31$ZN=Atlantis")
        .unwrap_err();
    assert!(matches!(err, BridgeError::UnresolvableZoneLabel(_)));
}

#[test_log::test]
fn utc_fast_path_never_parses_text() {
    let instant = Utc.with_ymd_and_hms(2018, 10, 10, 6, 10, 9).unwrap();
    let mut value = MockDateTime::from_texts("not a date at all", "junk junk");
    value.timestamp = convert::utc_to_system_time(instant);
    let b = bridge();
    assert_eq!(b.to_zoned_date_time_utc(&value).unwrap(), instant);
    assert_eq!(b.to_utc(&value).unwrap(), instant);
    assert_eq!(
        b.to_system_time(&value).unwrap(),
        convert::utc_to_system_time(instant)
    );
}

#[test_log::test]
fn naive_reads_use_the_zone_local_rendering() {
    let value = MockDateTime::from_texts("10/9/2018 11:10:09 PM MST", "10/10/2018 6:10:09 AM GMT");
    let b = bridge();
    assert_eq!(
        b.to_naive_date_time(&value).unwrap(),
        NaiveDate::from_ymd_opt(2018, 10, 9)
            .unwrap()
            .and_hms_opt(23, 10, 9)
            .unwrap()
    );
    assert_eq!(
        b.to_naive_date(&value).unwrap(),
        NaiveDate::from_ymd_opt(2018, 10, 9).unwrap()
    );
    assert_eq!(
        b.to_naive_time(&value).unwrap(),
        NaiveTime::from_hms_opt(23, 10, 9).unwrap()
    );
}

#[test_log::test]
fn constructed_values_preserve_the_instant() {
    let instant = Utc.with_ymd_and_hms(2018, 10, 10, 6, 10, 9).unwrap();
    let b = bridge();
    let value = b.from_utc(instant).unwrap();
    assert_eq!(b.to_utc(&value).unwrap(), instant);

    // The mock renders GMT texts, so the reconstruction path agrees too.
    let odt = b.to_offset_date_time(&value).unwrap();
    assert_eq!(*odt.offset(), FixedOffset::east_opt(0).unwrap());
    assert_eq!(odt.with_timezone(&Utc), instant);
}

#[test_log::test]
fn date_only_values_wildcard_the_time() {
    let value = bridge()
        .from_naive_date(NaiveDate::from_ymd_opt(2018, 10, 9).unwrap())
        .unwrap();
    assert!(value.any_time);
    assert!(!value.any_date);
}

#[test_log::test]
fn time_only_values_wildcard_the_date() {
    let value = bridge()
        .from_naive_time(NaiveTime::from_hms_opt(23, 10, 9).unwrap())
        .unwrap();
    assert!(value.any_date);
    assert!(!value.any_time);
}

#[test_log::test]
fn the_pattern_is_built_once_per_bridge() {
    let b = bridge();
    let value = MockDateTime::from_texts("10/9/2018 11:10:09 PM MST", "10/10/2018 6:10:09 AM GMT");
    b.to_offset_date_time(&value).unwrap();
    b.to_offset_date_time(&value).unwrap();
    b.to_naive_date_time(&value).unwrap();
    assert_eq!(b.session().intl_reads.get(), 1);
}

#[test_log::test]
fn malformed_locale_settings_fail_fast() {
    let mut intl = us_settings();
    intl.date_mdy = false;
    let b = DominoBridge::new(MockSession::with_settings(intl));
    let value = MockDateTime::from_texts("10/9/2018 11:10:09 PM MST", "10/10/2018 6:10:09 AM GMT");
    assert!(matches!(
        b.to_offset_date_time(&value),
        Err(BridgeError::MalformedLocaleConfiguration { .. })
    ));
}

#[test_log::test]
fn drifted_renderings_surface_parse_failures() {
    let value = MockDateTime::from_texts("2018-10-09 23:10:09 GMT", "2018-10-10 06:10:09 GMT");
    assert!(matches!(
        bridge().to_offset_date_time(&value),
        Err(BridgeError::TextParse { .. })
    ));
}

#[test_log::test]
fn renderings_without_a_zone_token_surface_parse_failures() {
    let value = MockDateTime::from_texts("nospace", "nospace");
    assert!(matches!(
        bridge().to_naive_date_time(&value),
        Err(BridgeError::TextParse { source: None, .. })
    ));
}

#[test_log::test]
fn non_gregorian_calendars_cannot_cross_the_bridge() {
    let cal = CalendarValue::from_parts(
        NaiveDate::from_ymd_opt(2018, 10, 9).unwrap(),
        NaiveTime::from_hms_opt(23, 10, 9).unwrap(),
        CalendarZone::Utc,
    )
    .with_system(CalendarSystem::Buddhist);
    assert!(matches!(
        bridge().from_calendar(&cal),
        Err(BridgeError::Convert(_))
    ));
}

#[test_log::test]
fn mismatched_renderings_are_rejected() {
    // Twenty days apart; no zone is twenty days from GMT.
    let value = MockDateTime::from_texts("10/30/2018 11:10:09 PM MST", "10/10/2018 6:10:09 AM GMT");
    assert!(matches!(
        bridge().to_offset_date_time(&value),
        Err(BridgeError::OffsetOutOfRange { .. })
    ));
}
