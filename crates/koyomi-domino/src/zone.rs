//! Notes time zone tables.
//!
//! Two static lookups: Notes time zone field labels onto IANA zone
//! identifiers, and the legacy three/four-letter zone codes onto fixed
//! offsets. Both report misses with `None`; callers decide whether to
//! fall back or reject the input.

use std::str::FromStr;

use chrono_tz::Tz;

/// Minimum byte offset of the `ZN=` marker in a well-formed field: the
/// offset and DST sub-fields always precede it.
const MIN_MARKER_OFFSET: usize = 8;

/// Notes zone labels onto the closest IANA identifier, sorted by label.
///
/// Many-to-one: several regional labels share an identifier. A few
/// targets keep the platform's own, sometimes outdated, notion of the
/// zone rather than today's civil time. "Samoa" maps to `Pacific/Samoa`
/// (UTC-11) even though Notes still lists the zone at UTC-13; the island
/// crossed the date line on 2011-12-29 and the IANA value is the correct
/// one.
const ZONE_LABELS: &[(&str, &str)] = &[
    ("AUS Central", "Australia/Darwin"),
    ("AUS Eastern", "Australia/Melbourne"),
    ("Afghanistan", "Asia/Kabul"),
    ("Alaskan", "US/Alaska"),
    ("Aleutian", "US/Aleutian"),
    ("Altai", "Asia/Hovd"),
    ("Arab", "Asia/Kuwait"),
    ("Arabian", "Asia/Dubai"),
    ("Arabic", "Asia/Baghdad"),
    ("Argentina", "America/Buenos_Aires"),
    ("Astrakhan", "Europe/Samara"),
    ("Atlantic", "Canada/Atlantic"),
    ("Aus Central W.", "Australia/Eucla"),
    ("Azerbaijan", "Asia/Baku"),
    ("Azores", "Atlantic/Azores"),
    ("Bahia", "America/Bahia"),
    ("Bangladesh", "Asia/Dacca"),
    ("Belarus", "Europe/Minsk"),
    ("Bougainville", "Pacific/Bougainville"),
    ("Canada Central", "America/Regina"),
    ("Cape Verde", "Atlantic/Cape_Verde"),
    ("Caucasus", "Asia/Yerevan"),
    ("Cen. Australia", "Australia/Adelaide"),
    ("Central", "America/Chicago"),
    ("Central America", "America/Costa_Rica"),
    ("Central Asia", "Asia/Dacca"),
    ("Central Brazilian", "America/Cuiaba"),
    ("Central Europe", "Europe/Prague"),
    ("Central European", "Europe/Sarajevo"),
    ("Central Pacific", "Pacific/Efate"),
    ("Central Standard Time (Mexico)", "America/Mexico_City"),
    ("Chatham Islands", "Pacific/Chatham"),
    ("China", "Asia/Chongqing"),
    ("Cuba", "America/Havana"),
    ("Dateline", "Etc/GMT+12"),
    ("E. Africa", "Africa/Nairobi"),
    ("E. Australia", "Australia/Brisbane"),
    ("E. Europe", "Europe/Minsk"),
    ("E. South America", "America/Sao_Paulo"),
    ("Easter Island", "Pacific/Easter"),
    ("Eastern", "America/New_York"),
    ("Eastern Standard Time (Mexico)", "America/Cancun"),
    ("Egypt", "Africa/Cairo"),
    ("Ekaterinburg", "Asia/Yekaterinburg"),
    ("FLE", "Europe/Riga"),
    ("Fiji", "Pacific/Fiji"),
    ("GMT", "Europe/London"),
    ("GTB", "Europe/Istanbul"),
    ("Georgian", "Asia/Tbilisi"),
    ("Greenland", "America/Danmarkshavn"),
    ("Greenwich", "Africa/Monrovia"),
    ("Haiti", "America/Port-au-Prince"),
    ("Hawaiian", "Pacific/Honolulu"),
    ("India", "Asia/Kolkata"),
    ("Iran", "Asia/Tehran"),
    ("Israel", "Asia/Tel_Aviv"),
    ("Jordan", "Asia/Amman"),
    ("Kaliningrad", "Europe/Kaliningrad"),
    ("Kamchatka", "Asia/Kamchatka"),
    ("Korea", "Asia/Seoul"),
    ("Libya", "Africa/Tripoli"),
    ("Line Islands", "Etc/GMT-14"),
    ("Lord Howe", "Australia/Lord_Howe"),
    ("Magadan", "Asia/Magadan"),
    ("Magallanes", "America/Santiago"),
    ("Marquesas", "Pacific/Marquesas"),
    ("Mauritius", "Indian/Mauritius"),
    ("Mid-Atlantic", "Etc/GMT+2"),
    ("Middle East", "Asia/Beirut"),
    ("Montevideo", "America/Montevideo"),
    ("Morocco", "Africa/Casablanca"),
    ("Mountain", "America/Denver"),
    ("Mountain Standard Time (Mexico)", "America/Chihuahua"),
    ("Myanmar", "Asia/Rangoon"),
    ("N. Central Asia", "Asia/Novosibirsk"),
    ("Namibia", "Africa/Windhoek"),
    ("Nepal", "Asia/Kathmandu"),
    ("New Zealand", "Pacific/Auckland"),
    ("Newfoundland", "Canada/Newfoundland"),
    ("Norfolk", "Pacific/Norfolk"),
    ("North Asia", "Asia/Krasnoyarsk"),
    ("North Asia East", "Asia/Irkutsk"),
    ("North Korea", "Asia/Pyongyang"),
    ("Omsk", "Asia/Omsk"),
    ("Pacific", "America/Los_Angeles"),
    ("Pacific SA", "America/Santiago"),
    ("Pacific Standard Time (Mexico)", "America/Tijuana"),
    ("Pakistan", "Asia/Karachi"),
    ("Paraguay", "America/Asuncion"),
    ("Romance", "Europe/Brussels"),
    ("Russia Time Zone 10", "Asia/Srednekolymsk"),
    ("Russia Time Zone 11", "Asia/Magadan"),
    ("Russia Time Zone 3", "Europe/Samara"),
    ("Russian", "Europe/Moscow"),
    ("SA Eastern", "America/Cayenne"),
    ("SA Pacific", "America/Lima"),
    ("SA Western", "America/La_Paz"),
    ("SE Asia", "Asia/Jakarta"),
    ("Saint Pierre", "America/Miquelon"),
    ("Sakhalin", "Asia/Sakhalin"),
    ("Samoa", "Pacific/Samoa"),
    ("Saratov", "Europe/Volgograd"),
    ("Singapore", "Asia/Singapore"),
    ("South Africa", "Africa/Harare"),
    ("Sri Lanka", "Asia/Colombo"),
    ("Sudan", "Africa/Khartoum"),
    ("Syria", "Asia/Damascus"),
    ("Taipei", "Asia/Taipei"),
    ("Tasmania", "Australia/Tasmania"),
    ("Tocantins", "America/Araguaina"),
    ("Tokyo", "Asia/Tokyo"),
    ("Tomsk", "Asia/Novosibirsk"),
    ("Tonga", "Pacific/Tongatapu"),
    ("Transbaikal", "Asia/Chita"),
    ("Turkey", "Europe/Istanbul"),
    ("Turks And Caicos", "America/Grand_Turk"),
    ("US Eastern", "America/Indiana/Indianapolis"),
    ("US Mountain", "US/Arizona"),
    ("UTC", "UTC"),
    ("UTC+12", "Etc/GMT-12"),
    ("UTC+13", "Etc/GMT-13"),
    ("UTC-02", "Etc/GMT+2"),
    ("UTC-08", "Etc/GMT+8"),
    ("UTC-09", "Etc/GMT+9"),
    ("UTC-11", "Etc/GMT+11"),
    ("Ulaanbaatar", "Asia/Ulaanbaatar"),
    ("Venezuela", "America/Caracas"),
    ("Vladivostok", "Asia/Vladivostok"),
    ("W. Australia", "Australia/Perth"),
    ("W. Central Africa", "Africa/Luanda"),
    ("W. Europe", "Europe/Amsterdam"),
    ("W. Mongolia", "Asia/Hovd"),
    ("West Asia", "Asia/Tashkent"),
    ("West Bank", "Asia/Gaza"),
    ("West Pacific", "Pacific/Guam"),
    ("Yakutsk", "Asia/Yakutsk"),
];

/// Legacy three/four-letter zone codes onto `±HH:MM` offsets, sorted.
///
/// The codes are ambiguous by nature: one code can stand for several
/// real-world zones, and some clash with better-known meanings entirely
/// (`BST` is the Bering standard zone at UTC-10 here, not British Summer
/// Time; `MDT` shares its offset with `CST`). Use only as a last resort
/// for fields that carry nothing better.
const SHORT_ZONES: &[(&str, &str)] = &[
    ("ADT", "-03:00"),
    ("AST", "-04:00"),
    ("BST", "-10:00"),
    ("CDT", "-05:00"),
    ("CEDT", "+02:00"),
    ("CET", "+01:00"),
    ("CST", "-06:00"),
    ("EDT", "-04:00"),
    ("EST", "-05:00"),
    ("GDT", "+01:00"),
    ("MDT", "-06:00"),
    ("MST", "-07:00"),
    ("NDT", "-02:30"),
    ("NST", "-03:30"),
    ("PDT", "-07:00"),
    ("PST", "-08:00"),
    ("YDT", "-08:00"),
    ("YST", "-09:00"),
    ("YW1", "-00:00"),
    ("YW2", "-01:00"),
    ("YW3", "-02:00"),
    ("ZE10", "+10:00"),
    ("ZE11", "+11:00"),
    ("ZE12", "+12:00"),
    ("ZE13", "+13:00"),
    ("ZE2", "+02:00"),
    ("ZE3", "+03:00"),
    ("ZE3B", "+03:30"),
    ("ZE4", "+04:00"),
    ("ZE4B", "+04:30"),
    ("ZE5", "+05:00"),
    ("ZE5B", "+05:30"),
    ("ZE5C", "+05:45"),
    ("ZE6", "+06:00"),
    ("ZE6B", "+06:30"),
    ("ZE7", "+07:00"),
    ("ZE8", "+08:00"),
    ("ZE9", "+09:00"),
    ("ZE9B", "+09:30"),
    ("ZW1", "-01:00"),
    ("ZW12", "-12:00"),
    ("ZW2", "-02:00"),
    ("ZW3", "-03:00"),
];

fn lookup(table: &'static [(&'static str, &'static str)], key: &str) -> Option<&'static str> {
    table
        .binary_search_by_key(&key, |&(label, _)| label)
        .ok()
        .map(|index| table[index].1)
}

/// Extracts the zone label from a composite Notes time zone field.
///
/// The label is the substring after the last `ZN=` marker. Fields where
/// the marker is absent, or appears too early to leave room for the
/// offset and DST sub-fields, are malformed and yield `None`.
#[must_use]
pub fn zone_label(field: &str) -> Option<&str> {
    let index = field.rfind("ZN=")?;
    if index < MIN_MARKER_OFFSET {
        return None;
    }
    Some(&field[index + 3..])
}

/// ## Summary
/// Maps a Notes time zone field onto the closest IANA zone name.
///
/// Returns `None` for malformed fields and unknown labels, so callers
/// can fall back to [`short_zone_offset`] or reject the input.
#[must_use]
pub fn iana_zone_name(field: &str) -> Option<&'static str> {
    let label = zone_label(field)?;
    let name = lookup(ZONE_LABELS, label);
    if name.is_none() {
        tracing::warn!(label, "no IANA mapping for Notes time zone label");
    }
    name
}

/// ## Summary
/// Resolves a Notes time zone field to a `chrono_tz` zone.
///
/// `None` under the same conditions as [`iana_zone_name`].
#[must_use]
pub fn zone_id(field: &str) -> Option<Tz> {
    iana_zone_name(field).and_then(|name| Tz::from_str(name).ok())
}

/// ## Summary
/// Decodes a legacy Notes zone code to a fixed `±HH:MM` offset string.
///
/// `None` for unknown codes. Last resort only; see the ambiguity notes
/// on the table.
#[must_use]
pub fn short_zone_offset(code: &str) -> Option<&'static str> {
    lookup(SHORT_ZONES, code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    #[test]
    fn label_tables_are_sorted_and_unique() {
        for table in [ZONE_LABELS, SHORT_ZONES] {
            for window in table.windows(2) {
                assert!(
                    window[0].0 < window[1].0,
                    "{:?} must sort before {:?}",
                    window[0].0,
                    window[1].0
                );
            }
        }
    }

    #[test]
    fn every_label_target_is_a_real_zone() {
        for &(label, name) in ZONE_LABELS {
            assert!(
                Tz::from_str(name).is_ok(),
                "label {label:?} maps to unknown zone {name:?}"
            );
        }
    }

    #[test]
    fn every_short_code_target_is_a_valid_offset() {
        for &(code, offset) in SHORT_ZONES {
            let text = format!("2018-10-09 23:10:09 {offset}");
            assert!(
                DateTime::parse_from_str(&text, "%Y-%m-%d %H:%M:%S %:z").is_ok(),
                "code {code:?} maps to unparsable offset {offset:?}"
            );
        }
    }

    #[test]
    fn label_is_extracted_after_the_last_marker() {
        assert_eq!(
            zone_label("Z=-23$DO=0$DL=0$ZX=79$ZN=Tokyo"),
            Some("Tokyo")
        );
        assert_eq!(
            zone_label("Z=5$DO=1$DL=4 1 1 10 -1 1$ZX=31$ZN=Eastern"),
            Some("Eastern")
        );
    }

    #[test]
    fn malformed_fields_report_not_found() {
        // No marker at all.
        assert_eq!(zone_label("Z=5$DO=1"), None);
        // Marker too early to follow the offset sub-fields.
        assert_eq!(zone_label("ZN=Tokyo"), None);
        assert_eq!(iana_zone_name("ZN=Tokyo"), None);
    }

    #[test]
    fn known_labels_resolve() {
        assert_eq!(
            iana_zone_name("Z=-23$DO=0$ZX=79$ZN=Tokyo"),
            Some("Asia/Tokyo")
        );
        assert_eq!(
            zone_id("Z=-23$DO=0$ZX=79$ZN=Tokyo"),
            Some(Tz::Asia__Tokyo)
        );
        assert_eq!(
            zone_id("Z=5$DO=1$DL=4 1 1 10 -1 1$ZX=31$ZN=Eastern"),
            Some(Tz::America__New_York)
        );
        // Fractional-hour zones resolve too.
        assert_eq!(
            zone_id("Z=-9$DO=1$ZX=52$ZN=Cen. Australia"),
            Some(Tz::Australia__Adelaide)
        );
    }

    #[test]
    fn unknown_labels_report_not_found() {
        assert_eq!(iana_zone_name("Z=5$DO=1$ZX=31$ZN=Atlantis"), None);
        assert_eq!(zone_id("Z=5$DO=1$ZX=31$ZN=Atlantis"), None);
    }

    #[test]
    fn short_codes_decode_to_fixed_offsets() {
        assert_eq!(short_zone_offset("MST"), Some("-07:00"));
        assert_eq!(short_zone_offset("NST"), Some("-03:30"));
        assert_eq!(short_zone_offset("ZE5C"), Some("+05:45"));
        assert_eq!(short_zone_offset("ZE9B"), Some("+09:30"));
        assert_eq!(short_zone_offset("XYZ"), None);
    }
}
