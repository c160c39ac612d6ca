use std::fmt::Display;

use chrono::{DateTime, Datelike, NaiveDateTime};

use crate::error::{Error, Result};

const UTC_TIME_FORMATS: &[&str] = &["%y%m%d%H%M%SZ", "%y%m%d%H%MZ"];
const UTC_TIME_OFFSET_FORMATS: &[&str] = &["%y%m%d%H%M%S%z", "%y%m%d%H%M%z"];
const GENERALIZED_TIME_FORMATS: &[&str] = &["%Y%m%d%H%M%SZ", "%Y%m%d%H%M%S%.fZ", "%Y%m%d%H%M%S"];
const GENERALIZED_TIME_OFFSET_FORMATS: &[&str] = &["%Y%m%d%H%M%S%z", "%Y%m%d%H%M%S%.f%z"];

/// UTCTime, `YYMMDDhhmm[ss]` followed by `Z` or an offset.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UtcTime {
    contents: Vec<u8>,
}

impl UtcTime {
    pub fn as_bytes(&self) -> &[u8] {
        &self.contents
    }

    /// The instant in UTC. Two-digit years follow RFC 5280: 50-99 are 19xx,
    /// 00-49 are 20xx.
    pub fn to_naive_datetime(&self) -> Result<NaiveDateTime> {
        let text = std::str::from_utf8(&self.contents)
            .map_err(|_| Error::UtcTimeInvalidFormat(String::from_utf8_lossy(&self.contents).into()))?;
        let datetime = parse(text, UTC_TIME_FORMATS, UTC_TIME_OFFSET_FORMATS)
            .ok_or_else(|| Error::UtcTimeInvalidFormat(text.to_string()))?;
        // chrono pivots two-digit years at 69
        if datetime.year() >= 2050 {
            return datetime
                .with_year(datetime.year() - 100)
                .ok_or_else(|| Error::UtcTimeInvalidFormat(text.to_string()));
        }
        Ok(datetime)
    }
}

impl From<NaiveDateTime> for UtcTime {
    fn from(value: NaiveDateTime) -> Self {
        UtcTime {
            contents: value.format("%y%m%d%H%M%SZ").to_string().into_bytes(),
        }
    }
}

impl From<Vec<u8>> for UtcTime {
    fn from(contents: Vec<u8>) -> Self {
        UtcTime { contents }
    }
}

impl Display for UtcTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.to_naive_datetime() {
            Ok(datetime) => write!(f, "{}", datetime),
            Err(_) => write!(f, "{}", String::from_utf8_lossy(&self.contents)),
        }
    }
}

/// GeneralizedTime, `YYYYMMDDhhmmss[.fff]` followed by `Z`, an offset or
/// nothing (local time, taken as UTC here).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GeneralizedTime {
    contents: Vec<u8>,
}

impl GeneralizedTime {
    pub fn as_bytes(&self) -> &[u8] {
        &self.contents
    }

    pub fn to_naive_datetime(&self) -> Result<NaiveDateTime> {
        let text = std::str::from_utf8(&self.contents).map_err(|_| {
            Error::GeneralizedTimeInvalidFormat(String::from_utf8_lossy(&self.contents).into())
        })?;
        parse(text, GENERALIZED_TIME_FORMATS, GENERALIZED_TIME_OFFSET_FORMATS)
            .ok_or_else(|| Error::GeneralizedTimeInvalidFormat(text.to_string()))
    }
}

impl From<NaiveDateTime> for GeneralizedTime {
    fn from(value: NaiveDateTime) -> Self {
        GeneralizedTime {
            contents: value.format("%Y%m%d%H%M%SZ").to_string().into_bytes(),
        }
    }
}

impl From<Vec<u8>> for GeneralizedTime {
    fn from(contents: Vec<u8>) -> Self {
        GeneralizedTime { contents }
    }
}

impl Display for GeneralizedTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.to_naive_datetime() {
            Ok(datetime) => write!(f, "{}", datetime),
            Err(_) => write!(f, "{}", String::from_utf8_lossy(&self.contents)),
        }
    }
}

fn parse(text: &str, formats: &[&str], offset_formats: &[&str]) -> Option<NaiveDateTime> {
    formats
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .or_else(|| {
            offset_formats.iter().find_map(|format| {
                DateTime::parse_from_str(text, format)
                    .ok()
                    .map(|datetime| datetime.naive_utc())
            })
        })
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};
    use rstest::rstest;

    use crate::error::Error;
    use crate::time::{GeneralizedTime, UtcTime};

    fn datetime(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[rstest(input, expected,
        case("250523091047Z", datetime(2025, 5, 23, 9, 10, 47)),
        case("991231235959Z", datetime(1999, 12, 31, 23, 59, 59)),
        case("550101000000Z", datetime(1955, 1, 1, 0, 0, 0)),
        case("491231235959Z", datetime(2049, 12, 31, 23, 59, 59)),
        case("1105232038Z", datetime(2011, 5, 23, 20, 38, 0)),
        case("250523091047+0900", datetime(2025, 5, 23, 0, 10, 47)),
    )]
    fn test_utc_time(input: &str, expected: NaiveDateTime) {
        let time = UtcTime::from(input.as_bytes().to_vec());
        assert_eq!(expected, time.to_naive_datetime().unwrap());
    }

    #[rstest(input,
        case("20250523091047Z"),
        case("2505230910"),
        case("not a time"),
    )]
    fn test_utc_time_invalid(input: &str) {
        let time = UtcTime::from(input.as_bytes().to_vec());
        assert!(matches!(
            time.to_naive_datetime(),
            Err(Error::UtcTimeInvalidFormat(_))
        ));
    }

    #[rstest(input, expected,
        case("20250523091047Z", datetime(2025, 5, 23, 9, 10, 47)),
        case("20491231235959Z", datetime(2049, 12, 31, 23, 59, 59)),
        case("20250523091047.5Z", NaiveDate::from_ymd_opt(2025, 5, 23).unwrap().and_hms_milli_opt(9, 10, 47, 500).unwrap()),
        case("20250523091047", datetime(2025, 5, 23, 9, 10, 47)),
        case("20250523091047-0100", datetime(2025, 5, 23, 10, 10, 47)),
    )]
    fn test_generalized_time(input: &str, expected: NaiveDateTime) {
        let time = GeneralizedTime::from(input.as_bytes().to_vec());
        assert_eq!(expected, time.to_naive_datetime().unwrap());
    }

    #[test]
    fn test_generalized_time_invalid() {
        let time = GeneralizedTime::from(b"2025-05-23".to_vec());
        assert!(matches!(
            time.to_naive_datetime(),
            Err(Error::GeneralizedTimeInvalidFormat(_))
        ));
    }

    #[test]
    fn test_from_naive_datetime() {
        let value = datetime(2011, 5, 23, 20, 38, 21);
        assert_eq!(b"110523203821Z", UtcTime::from(value).as_bytes());
        assert_eq!(b"20110523203821Z", GeneralizedTime::from(value).as_bytes());
    }
}
