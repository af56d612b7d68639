//! Resolves IANA timezone names for displaying dates.

use time::{OffsetDateTime, UtcOffset};
use time_tz::{Offset, TimeZone};

use crate::Error;

/// The UTC offset in effect for `canonical_timezone` at `at`,
/// e.g. "Pacific/Auckland".
///
/// # Errors
/// Returns [Error::InvalidTimezone] if the name is not a known timezone.
pub fn get_offset_at(canonical_timezone: &str, at: OffsetDateTime) -> Result<UtcOffset, Error> {
    time_tz::timezones::get_by_name(canonical_timezone)
        .map(|tz| tz.get_offset_utc(&at).to_utc())
        .ok_or_else(|| Error::InvalidTimezone(canonical_timezone.to_owned()))
}

/// Convert `date_time` to the local time of `canonical_timezone`.
///
/// # Errors
/// Returns [Error::InvalidTimezone] if the name is not a known timezone.
pub fn to_local(
    date_time: OffsetDateTime,
    canonical_timezone: &str,
) -> Result<OffsetDateTime, Error> {
    let offset = get_offset_at(canonical_timezone, date_time)?;
    Ok(date_time.to_offset(offset))
}

#[cfg(test)]
mod tests {
    use time::{UtcOffset, macros::datetime};

    use crate::{
        Error,
        timezone::{get_offset_at, to_local},
    };

    #[test]
    fn london_has_zero_offset_in_winter() {
        let offset = get_offset_at("Europe/London", datetime!(2023-12-25 12:00 UTC));

        assert_eq!(offset, Ok(UtcOffset::UTC));
    }

    #[test]
    fn auckland_is_ahead_in_summer() {
        let local = to_local(datetime!(2023-12-24 20:00 UTC), "Pacific/Auckland").unwrap();

        assert_eq!(local.offset().whole_hours(), 13);
        assert_eq!(local.day(), 25);
    }

    #[test]
    fn unknown_timezone_fails() {
        let result = get_offset_at("Mars/Olympus_Mons", datetime!(2023-12-25 12:00 UTC));

        assert_eq!(
            result,
            Err(Error::InvalidTimezone("Mars/Olympus_Mons".to_owned()))
        );
    }
}
