//! Terminals that decode a scalar into a richer type.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine as _;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};

use super::Value;
use crate::error::AssertionFailed;
use crate::json::Json;
use crate::AssertionResult;

/// Date time formats in `chrono` syntax, for use with [`Value::date_time`].
pub mod formats {
    /// Calendar date, e.g. `2020-02-29`.
    pub const DATE: &str = "%Y-%m-%d";

    /// ISO 8601 with a colon-separated offset, e.g. `2020-02-29T13:37:00+01:00`.
    pub const ATOM: &str = "%Y-%m-%dT%H:%M:%S%:z";
}

// Standard alphabet; padding may be present or left out.
const BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

impl<'a> Value<'a> {
    /// Asserts this value is a string conforming to `format`, then returns
    /// the date time it denotes.
    ///
    /// `format` uses `chrono` syntax, see [`formats`]. Text without an offset
    /// is placed in `timezone`, or UTC when `None`. Formats without a time of
    /// day yield midnight.
    ///
    /// # Example
    ///
    /// ```rust
    /// use chrono::FixedOffset;
    /// use jsonprobe::{formats, Json};
    ///
    /// let document = Json::parse(r#"["2020-02-29T13:37:00+01:00", "2020-02-29"]"#).unwrap();
    /// let root = document.root();
    ///
    /// let atom = root.nth(0).unwrap().date_time(formats::ATOM, None).unwrap();
    /// assert_eq!(atom.offset(), &FixedOffset::east_opt(3600).unwrap());
    ///
    /// let date = root.nth(1).unwrap().date(formats::DATE).unwrap();
    /// assert_eq!(date.to_rfc3339(), "2020-02-29T00:00:00+00:00");
    /// ```
    pub fn date_time(
        &self,
        format: &str,
        timezone: Option<FixedOffset>,
    ) -> AssertionResult<DateTime<FixedOffset>> {
        let text = self.string()?;

        if let Ok(parsed) = DateTime::parse_from_str(text, format) {
            return Ok(parsed);
        }

        let naive = NaiveDateTime::parse_from_str(text, format).ok().or_else(|| {
            NaiveDate::parse_from_str(text, format)
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        });

        naive
            .and_then(|naive| {
                timezone
                    .or_else(|| FixedOffset::east_opt(0))
                    .and_then(|offset| offset.from_local_datetime(&naive).single())
            })
            .ok_or_else(|| {
                AssertionFailed::new(format!(
                    "Expected {} to be a date time string according to format {}, '{}' given.",
                    self.pointer, format, text
                ))
            })
    }

    /// Same as [`date_time`](Self::date_time) in UTC, typically with
    /// [`formats::DATE`].
    pub fn date(&self, format: &str) -> AssertionResult<DateTime<FixedOffset>> {
        self.date_time(format, None)
    }

    /// Asserts this value is a number of seconds since the Unix epoch, then
    /// returns that instant.
    pub fn timestamp(&self) -> AssertionResult<DateTime<Utc>> {
        let seconds = self.int()?;

        DateTime::from_timestamp(seconds, 0).ok_or_else(|| {
            AssertionFailed::new(format!(
                "Expected {} to be a Unix timestamp, {} given.",
                self.pointer,
                Json::pretty_print_value(self.node)
            ))
        })
    }

    /// Asserts this value is a base64 encoded string, then returns the
    /// decoded bytes.
    pub fn base64(&self) -> AssertionResult<Vec<u8>> {
        let encoded = self.string()?;

        BASE64.decode(encoded).map_err(|_| {
            AssertionFailed::new(format!(
                "Expected {} to contain a base64 encoded string, \
                 it contained characters outside the base64 alphabet.",
                self.pointer
            ))
        })
    }
}
