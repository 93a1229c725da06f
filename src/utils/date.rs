//! UTC datetime utilities without timezone dependencies.
//!
//! Provides a lightweight `DateTimeUtc` struct for frontmatter dates.
//! Posts are ordered by this value (newest first), so it is totally ordered
//! field by field.
//!
//! # Accepted formats
//!
//! ```text
//! 2024-06-15
//! 2024-06-15T14:30:45Z
//! 2024-06-15T14:30:45
//! 2024-06-15 14:30:45
//! 2024-06-15T14:30:45.123Z
//! ```

use std::fmt;

use anyhow::{Result, bail};

/// UTC datetime without timezone complexity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateTimeUtc {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

impl DateTimeUtc {
    pub const fn new(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    pub const fn from_ymd(year: u16, month: u8, day: u8) -> Self {
        Self::new(year, month, day, 0, 0, 0)
    }

    /// Parse a frontmatter date. Returns `None` for anything not listed in
    /// the module docs, or for out-of-range components.
    pub fn parse(s: &str) -> Option<Self> {
        let bytes = s.trim().as_bytes();

        // Minimum: "YYYY-MM-DD" (10 chars)
        if bytes.len() < 10 {
            return None;
        }

        let year = parse_u16(&bytes[0..4])?;
        if bytes[4] != b'-' {
            return None;
        }
        let month = parse_u8(&bytes[5..7])?;
        if bytes[7] != b'-' {
            return None;
        }
        let day = parse_u8(&bytes[8..10])?;

        let (hour, minute, second) = if bytes.len() == 10 {
            (0, 0, 0)
        } else {
            if bytes.len() < 19 || !matches!(bytes[10], b'T' | b' ') {
                return None;
            }
            if bytes[13] != b':' || bytes[16] != b':' {
                return None;
            }
            if !is_valid_time_suffix(&bytes[19..]) {
                return None;
            }
            (
                parse_u8(&bytes[11..13])?,
                parse_u8(&bytes[14..16])?,
                parse_u8(&bytes[17..19])?,
            )
        };

        let dt = Self::new(year, month, day, hour, minute, second);
        dt.validate().ok()?;
        Some(dt)
    }

    #[allow(clippy::trivially_copy_pass_by_ref)] // Method style is more idiomatic
    pub fn validate(&self) -> Result<()> {
        let Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        } = *self;

        if !(1..=12).contains(&month) {
            bail!("month is invalid: {month}");
        }

        let max_days = Self::days_in_month(year, month);
        if day == 0 || day > max_days {
            bail!("day is invalid: {day}");
        }
        if hour > 23 {
            bail!("hour is invalid: {hour}");
        }
        if minute > 59 {
            bail!("minute is invalid: {minute}");
        }
        if second > 59 {
            bail!("second is invalid: {second}");
        }

        Ok(())
    }

    #[inline]
    #[allow(clippy::manual_is_multiple_of)] // Manual impl for const fn
    const fn is_leap_year(year: u16) -> bool {
        year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
    }

    #[inline]
    const fn days_in_month(year: u16, month: u8) -> u8 {
        match month {
            1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
            4 | 6 | 9 | 11 => 30,
            2 if Self::is_leap_year(year) => 29,
            2 => 28,
            _ => 0,
        }
    }

    /// Format as `YYYY-MM-DD` (sitemap `<lastmod>`, `<time datetime>`).
    pub fn to_iso_date(self) -> String {
        format!("{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }

    /// Format as RFC 3339: `YYYY-MM-DDTHH:MM:SSZ`
    pub fn to_rfc3339(self) -> String {
        format!(
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}Z",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }

    /// Human-readable date for post headers: `Jun 15, 2024`
    pub fn to_display(self) -> String {
        format!(
            "{} {:02}, {:04}",
            MONTHS[usize::from(self.month - 1)],
            self.day,
            self.year
        )
    }
}

impl fmt::Display for DateTimeUtc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_rfc3339())
    }
}

/// Accept nothing, `Z`, or fractional seconds optionally followed by `Z`.
fn is_valid_time_suffix(rest: &[u8]) -> bool {
    let rest = rest.strip_suffix(b"Z").unwrap_or(rest);
    match rest.split_first() {
        None => true,
        Some((b'.', digits)) => !digits.is_empty() && digits.iter().all(u8::is_ascii_digit),
        Some(_) => false,
    }
}

/// Parse 2-digit ASCII number
#[inline]
fn parse_u8(bytes: &[u8]) -> Option<u8> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = bytes[0].wrapping_sub(b'0');
    let d2 = bytes[1].wrapping_sub(b'0');
    if d1 > 9 || d2 > 9 {
        return None;
    }
    Some(d1 * 10 + d2)
}

/// Parse 4-digit ASCII number
#[inline]
fn parse_u16(bytes: &[u8]) -> Option<u16> {
    if bytes.len() != 4 {
        return None;
    }
    let mut result = 0u16;
    for &b in bytes {
        let d = b.wrapping_sub(b'0');
        if d > 9 {
            return None;
        }
        result = result * 10 + u16::from(d);
    }
    Some(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_only() {
        let dt = DateTimeUtc::parse("2024-06-15").unwrap();
        assert_eq!(dt, DateTimeUtc::from_ymd(2024, 6, 15));
    }

    #[test]
    fn test_parse_with_time() {
        let expected = DateTimeUtc::new(2024, 6, 15, 14, 30, 45);
        assert_eq!(DateTimeUtc::parse("2024-06-15T14:30:45Z"), Some(expected));
        assert_eq!(DateTimeUtc::parse("2024-06-15T14:30:45"), Some(expected));
        assert_eq!(DateTimeUtc::parse("2024-06-15 14:30:45"), Some(expected));
        assert_eq!(DateTimeUtc::parse("2024-06-15T14:30:45.123Z"), Some(expected));
    }

    #[test]
    fn test_parse_invalid() {
        assert_eq!(DateTimeUtc::parse(""), None);
        assert_eq!(DateTimeUtc::parse("2024/06/15"), None);
        assert_eq!(DateTimeUtc::parse("2024-13-01"), None);
        assert_eq!(DateTimeUtc::parse("2024-06-15T14:30"), None);
        assert_eq!(DateTimeUtc::parse("2024-06-15T14:30:45+02:00"), None);
        assert_eq!(DateTimeUtc::parse("Jul 08 2022"), None);
    }

    #[test]
    fn test_ordering_newest_last() {
        let older = DateTimeUtc::parse("2021-04-20").unwrap();
        let newer = DateTimeUtc::parse("2021-04-20T08:00:00Z").unwrap();
        let newest = DateTimeUtc::parse("2022-01-01").unwrap();
        assert!(older < newer);
        assert!(newer < newest);
    }

    #[test]
    fn test_datetime_utc_validate_invalid_day() {
        // Day 31 in a 30-day month
        assert!(DateTimeUtc::new(2024, 4, 31, 12, 0, 0).validate().is_err());

        // Day 29 in February (non-leap year)
        assert!(DateTimeUtc::new(2023, 2, 29, 12, 0, 0).validate().is_err());
    }

    #[test]
    fn test_datetime_utc_validate_leap_year() {
        assert!(DateTimeUtc::new(2024, 2, 29, 12, 0, 0).validate().is_ok());
        assert!(DateTimeUtc::new(2000, 2, 29, 12, 0, 0).validate().is_ok()); // divisible by 400
        assert!(DateTimeUtc::new(1900, 2, 29, 12, 0, 0).validate().is_err()); // divisible by 100 but not 400
    }

    #[test]
    fn test_formatting() {
        let dt = DateTimeUtc::new(2022, 7, 8, 9, 5, 0);
        assert_eq!(dt.to_iso_date(), "2022-07-08");
        assert_eq!(dt.to_rfc3339(), "2022-07-08T09:05:00Z");
        assert_eq!(dt.to_display(), "Jul 08, 2022");
        assert_eq!(dt.to_string(), "2022-07-08T09:05:00Z");
    }
}
