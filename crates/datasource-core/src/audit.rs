//! Audit stamps attached by API layers to records they return.
//!
//! An [`AuditRecord`] describes one instant three ways: Unix milliseconds,
//! an ISO 8601 string with millisecond precision, and a human readable
//! server rendering. All renderings are in UTC.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::macros::format_description;

use crate::error::{CoreError, Result};

const NANOS_PER_MILLI: i128 = 1_000_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub date: AuditDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditDateTime {
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
    /// e.g. `2023-05-15T14:30:00.000Z`
    pub iso8601: String,
    /// e.g. `Mon May 15 2023 14:30:00 GMT+0000 (Coordinated Universal Time)`
    pub server: String,
}

impl AuditRecord {
    /// Audit stamp for the current instant.
    pub fn now() -> Result<Self> {
        let now = OffsetDateTime::now_utc();
        let timestamp = i64::try_from(now.unix_timestamp_nanos() / NANOS_PER_MILLI)
            .map_err(|e| CoreError::invalid_timestamp(e.to_string()))?;
        Self::at(timestamp)
    }

    /// Audit stamp for a Unix timestamp in milliseconds.
    ///
    /// Supported instants span the years -9999 through 9999
    /// (`-377705116800000..=253402300799999`). Years are rendered with four
    /// digits and a leading `-` when negative (`-0001-...`), never in the
    /// six-digit `+010000` extended form.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidTimestamp` for timestamps outside that range.
    pub fn at(timestamp: i64) -> Result<Self> {
        let datetime =
            OffsetDateTime::from_unix_timestamp_nanos(i128::from(timestamp) * NANOS_PER_MILLI)
                .map_err(|e| {
                    CoreError::invalid_timestamp(format!("{timestamp} is out of range: {e}"))
                })?;

        Ok(Self {
            date: AuditDateTime {
                timestamp,
                iso8601: format_iso8601(datetime)?,
                server: format_server(datetime)?,
            },
        })
    }
}

fn format_iso8601(datetime: OffsetDateTime) -> Result<String> {
    let format = format_description!(
        "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z"
    );
    Ok(datetime.format(&format)?)
}

fn format_server(datetime: OffsetDateTime) -> Result<String> {
    let format = format_description!(
        "[weekday repr:short] [month repr:short] [day] [year] [hour]:[minute]:[second] GMT[offset_hour sign:mandatory][offset_minute]"
    );
    let rendered = datetime.format(&format)?;
    Ok(format!("{rendered} (Coordinated Universal Time)"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn test_audit_record_at_fixed_instant() {
        let instant = datetime!(2023-05-15 14:30:00.250 UTC);
        let millis = (instant.unix_timestamp_nanos() / NANOS_PER_MILLI) as i64;

        let audit = AuditRecord::at(millis).unwrap();
        assert_eq!(audit.date.timestamp, millis);
        assert_eq!(audit.date.iso8601, "2023-05-15T14:30:00.250Z");
        assert_eq!(
            audit.date.server,
            "Mon May 15 2023 14:30:00 GMT+0000 (Coordinated Universal Time)"
        );
    }

    #[test]
    fn test_audit_record_epoch() {
        let audit = AuditRecord::at(0).unwrap();
        assert_eq!(audit.date.iso8601, "1970-01-01T00:00:00.000Z");
        assert_eq!(
            audit.date.server,
            "Thu Jan 01 1970 00:00:00 GMT+0000 (Coordinated Universal Time)"
        );
    }

    #[test]
    fn test_audit_record_out_of_range() {
        let err = AuditRecord::at(i64::MAX).unwrap_err();
        assert!(matches!(err, CoreError::InvalidTimestamp(_)));
    }

    #[test]
    fn test_audit_record_year_range() {
        let last = AuditRecord::at(253_402_300_799_999).unwrap();
        assert_eq!(last.date.iso8601, "9999-12-31T23:59:59.999Z");
        assert!(matches!(
            AuditRecord::at(253_402_300_800_000),
            Err(CoreError::InvalidTimestamp(_))
        ));

        let first = AuditRecord::at(-377_705_116_800_000).unwrap();
        assert_eq!(first.date.iso8601, "-9999-01-01T00:00:00.000Z");
        assert!(matches!(
            AuditRecord::at(-377_705_116_800_001),
            Err(CoreError::InvalidTimestamp(_))
        ));

        let before_year_zero = AuditRecord::at(-62_198_755_200_000).unwrap();
        assert!(before_year_zero.date.iso8601.starts_with("-0001-01-01T"));
    }

    #[test]
    fn test_audit_record_now() {
        let before = OffsetDateTime::now_utc().unix_timestamp() * 1000;
        let audit = AuditRecord::now().unwrap();
        assert!(audit.date.timestamp >= before);
        assert!(audit.date.iso8601.ends_with('Z'));
    }

    #[test]
    fn test_audit_record_serialization() {
        let audit = AuditRecord::at(0).unwrap();
        let json = serde_json::to_value(&audit).unwrap();
        assert_eq!(json["date"]["timestamp"], 0);
        assert_eq!(json["date"]["iso8601"], "1970-01-01T00:00:00.000Z");
    }
}
