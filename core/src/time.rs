use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};

const DISPLAY_FORMAT: &str = "%d/%m/%Y, %H:%M";

/// `dd/mm/yyyy, HH:MM` in the local timezone, the format todo lists show
/// next to each entry.
pub fn format_created_at(at: &DateTime<Utc>) -> String {
    format_in(&at.with_timezone(&Local))
}

fn format_in<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    at.format(DISPLAY_FORMAT).to_string()
}

/// Reads a stored creation time. RFC 3339 is what this crate writes; older
/// lists saved the display form, which is taken as local time.
pub fn parse_created_at(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(at) = DateTime::parse_from_rfc3339(value) {
        return Some(at.with_timezone(&Utc));
    }
    parse_in(&Local, value)
}

fn parse_in<Tz: TimeZone>(tz: &Tz, value: &str) -> Option<DateTime<Utc>> {
    let naive = NaiveDateTime::parse_from_str(value, DISPLAY_FORMAT).ok()?;
    // A time skipped by a DST change has no mapping; an ambiguous one takes
    // the earlier instant.
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|at| at.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_pads_fields() {
        let at = Utc.with_ymd_and_hms(2025, 3, 7, 9, 5, 0).unwrap();
        assert_eq!(format_in(&at), "07/03/2025, 09:05");
    }

    #[test]
    fn test_parse_rfc3339() {
        let at = parse_created_at("2025-01-01T10:30:00.000Z").unwrap();
        assert_eq!(at, Utc.with_ymd_and_hms(2025, 1, 1, 10, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_display_form() {
        let at = parse_in(&Utc, "01/01/2025, 10:30").unwrap();
        assert_eq!(at, Utc.with_ymd_and_hms(2025, 1, 1, 10, 30, 0).unwrap());

        let local = parse_created_at("07/03/2025, 09:05").unwrap();
        assert_eq!(format_created_at(&local), "07/03/2025, 09:05");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_created_at("yesterday").is_none());
        assert!(parse_created_at("31/02/2025, 10:30").is_none());
    }
}
