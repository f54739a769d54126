//! Date/time digitization.
//!
//! Accepted literals are `Mon D YYYY` or `Mon D YYYY HH:MM:SS`, with any run of
//! whitespace, `,`, `-`, `/` or `:` between fields. Examples:
//! `Jan 1 2024 00:00:00`, `Mar 15, 2023 13:45:30`, `Dec-31-1999`.

use dtx_tensor::NdArray;

use crate::calendar::{days_in_month, month_from_name, week_of_year, weekday};
use crate::error::{DateTimeErrorKind, Result, TransformError};
use crate::record::Record;

/// Output columns produced for each date/time element.
pub const NUM_DATE_TIME_COLS: usize = 7;

/// Calendar components of one date/time value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateTimeDigits {
    /// Monday = 0 through Sunday = 6.
    pub weekday: i64,
    pub year: i64,
    pub hour: i64,
    pub minute: i64,
    pub second: i64,
    pub month: i64,
    /// ISO 8601 week number.
    pub week_of_year: i64,
}

impl DateTimeDigits {
    /// Components in output column order.
    pub fn to_array(self) -> [i64; NUM_DATE_TIME_COLS] {
        [
            self.weekday,
            self.year,
            self.hour,
            self.minute,
            self.second,
            self.month,
            self.week_of_year,
        ]
    }

    fn to_values(self) -> [f64; NUM_DATE_TIME_COLS] {
        self.to_array().map(|v| v as f64)
    }
}

fn is_delimiter(c: char) -> bool {
    c.is_whitespace() || matches!(c, ',' | '-' | '/' | ':')
}

/// Unsigned decimal field. Signs are never part of a date/time literal.
fn parse_number(token: &str) -> std::result::Result<i64, DateTimeErrorKind> {
    let invalid = || DateTimeErrorKind::InvalidNumber {
        token: token.to_string(),
    };
    if !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    token.parse::<i64>().map_err(|_| invalid())
}

/// Split on delimiters, rejecting a `-` that starts a number instead of
/// separating two fields.
fn tokenize(text: &str) -> std::result::Result<Vec<&str>, DateTimeErrorKind> {
    for (i, c) in text.char_indices() {
        if c != '-' {
            continue;
        }
        let rest = &text[i + 1..];
        let starts_number = rest.starts_with(|n: char| n.is_ascii_digit());
        let after_delimiter = text[..i].chars().next_back().is_none_or(is_delimiter);
        if starts_number && after_delimiter {
            let end = rest.find(is_delimiter).unwrap_or(rest.len());
            return Err(DateTimeErrorKind::InvalidNumber {
                token: text[i..=i + end].to_string(),
            });
        }
    }
    Ok(text.split(is_delimiter).filter(|t| !t.is_empty()).collect())
}

/// Split a date/time literal into its calendar components.
pub fn digitize_datetime(text: &str) -> std::result::Result<DateTimeDigits, DateTimeErrorKind> {
    let tokens = tokenize(text)?;
    if tokens.len() != 3 && tokens.len() != 6 {
        return Err(DateTimeErrorKind::Malformed {
            tokens: tokens.len(),
        });
    }

    let month = month_from_name(tokens[0]).ok_or_else(|| DateTimeErrorKind::UnknownMonth {
        token: tokens[0].to_string(),
    })?;
    let day = parse_number(tokens[1])?;
    let year = parse_number(tokens[2])?;
    let (hour, minute, second) = if tokens.len() == 6 {
        (
            parse_number(tokens[3])?,
            parse_number(tokens[4])?,
            parse_number(tokens[5])?,
        )
    } else {
        (0, 0, 0)
    };

    if !(1..=9999).contains(&year) {
        return Err(DateTimeErrorKind::YearOutOfRange { year });
    }
    let max_day = days_in_month(year, month).unwrap_or(0);
    if !(1..=max_day).contains(&day) {
        return Err(DateTimeErrorKind::DayOutOfRange { year, month, day });
    }
    if !(0..24).contains(&hour) || !(0..60).contains(&minute) || !(0..60).contains(&second) {
        return Err(DateTimeErrorKind::TimeOutOfRange {
            hour,
            minute,
            second,
        });
    }

    Ok(DateTimeDigits {
        weekday: weekday(year, month, day),
        year,
        hour,
        minute,
        second,
        month,
        week_of_year: week_of_year(year, month, day),
    })
}

/// Expands each date/time string into [`NUM_DATE_TIME_COLS`] numbers.
///
/// Unlike the other transformers this one fails hard: a value that does not
/// digitize means metadata and data disagree.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateTimeTransformer;

impl DateTimeTransformer {
    pub(crate) fn map_record(&self, record: &Record<'_>, array: &mut NdArray) -> Result<()> {
        for (element, leaf) in record.leaves() {
            let digits = leaf
                .as_str()
                .ok_or(DateTimeErrorKind::NotAString)
                .and_then(digitize_datetime)
                .map_err(|reason| TransformError::DateTime {
                    element,
                    value: leaf.as_str().map_or_else(|| leaf.to_string(), str::to_string),
                    reason,
                })?;
            array.write_slice(element * NUM_DATE_TIME_COLS, &digits.to_values())?;
        }
        Ok(())
    }
}
