use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};

/// Anything that can be interpreted as a naive UTC timestamp for season lookup.
///
/// Timezone-aware values are converted to UTC, dates resolve to midnight and
/// text is parsed from RFC 3339 or `YYYY-MM-DD[ HH:MM[:SS]]`.
pub trait AnyTimestamp {
    fn to_timestamp(&self) -> Option<NaiveDateTime>;
}

impl AnyTimestamp for NaiveDateTime {
    fn to_timestamp(&self) -> Option<NaiveDateTime> {
        Some(*self)
    }
}

impl AnyTimestamp for NaiveDate {
    fn to_timestamp(&self) -> Option<NaiveDateTime> {
        self.and_hms_opt(0, 0, 0)
    }
}

impl<Tz: TimeZone> AnyTimestamp for DateTime<Tz> {
    fn to_timestamp(&self) -> Option<NaiveDateTime> {
        Some(self.naive_utc())
    }
}

impl AnyTimestamp for str {
    fn to_timestamp(&self) -> Option<NaiveDateTime> {
        let text = self.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
            return Some(dt.naive_utc());
        }
        for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M"] {
            if let Ok(naive_dt) = NaiveDateTime::parse_from_str(text, format) {
                return Some(naive_dt);
            }
        }
        NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.to_timestamp())
    }
}

impl AnyTimestamp for String {
    fn to_timestamp(&self) -> Option<NaiveDateTime> {
        self.as_str().to_timestamp()
    }
}

impl<T: AnyTimestamp + ?Sized> AnyTimestamp for &T {
    fn to_timestamp(&self) -> Option<NaiveDateTime> {
        (**self).to_timestamp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    fn ts(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn test_parse_text_forms() {
        assert_eq!("2024-03-20".to_timestamp(), Some(ts(2024, 3, 20, 0, 0, 0)));
        assert_eq!("2024-03-20 03:07".to_timestamp(), Some(ts(2024, 3, 20, 3, 7, 0)));
        assert_eq!(
            "2024-03-20 03:07:30".to_timestamp(),
            Some(ts(2024, 3, 20, 3, 7, 30))
        );
        assert_eq!(
            "2024-03-20T05:07:00+02:00".to_timestamp(),
            Some(ts(2024, 3, 20, 3, 7, 0))
        );
        assert_eq!("not a date".to_timestamp(), None);
        assert_eq!(String::from("2024-12-24").to_timestamp(), Some(ts(2024, 12, 24, 0, 0, 0)));
    }

    #[test]
    fn test_aware_values_convert_to_utc() {
        let offset = FixedOffset::east_opt(3600).unwrap();
        let local = offset.with_ymd_and_hms(2024, 6, 1, 0, 30, 0).unwrap();
        assert_eq!(local.to_timestamp(), Some(ts(2024, 5, 31, 23, 30, 0)));

        let utc = Utc.with_ymd_and_hms(2024, 6, 1, 0, 30, 0).unwrap();
        assert_eq!(utc.to_timestamp(), Some(ts(2024, 6, 1, 0, 30, 0)));
    }
}
