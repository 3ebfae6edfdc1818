//! Calendar rules: day-of-month limits, time-of-day and zone offset ranges.

use crate::error::{ParseError, Result};
use crate::model::{Date, DateOrSeason, Edtf, Endpoint, ListElement, Zone, ZoneOffset};

/// Largest zone offset magnitude, `14:00`.
const MAX_ZONE_MINUTES: i32 = 14 * 60;

/// Proleptic Gregorian leap year rule, applied to negative years as well.
pub fn is_leap_year(year: i64) -> bool {
    year.rem_euclid(4) == 0 && (year.rem_euclid(100) != 0 || year.rem_euclid(400) == 0)
}

/// Returns 0 for a month outside `1..=12`.
pub fn days_in_month(year: i64, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// `00:00:00` through `23:59:59`, plus `24:00:00`.
pub fn validate_time(hour: u8, minute: u8, second: u8) -> Result<()> {
    let end_of_day = hour == 24 && minute == 0 && second == 0;
    if end_of_day || (hour <= 23 && minute <= 59 && second <= 59) {
        Ok(())
    } else {
        Err(ParseError::InvalidTime {
            hour,
            minute,
            second,
        })
    }
}

/// At most 14 hours either way, and `-14:00` is not a zone.
pub fn validate_zone(offset_minutes: i32) -> Result<()> {
    if offset_minutes.abs() > MAX_ZONE_MINUTES || offset_minutes == -MAX_ZONE_MINUTES {
        Err(ParseError::InvalidZoneOffset {
            minutes: offset_minutes,
        })
    } else {
        Ok(())
    }
}

pub fn validate_zone_offset(offset: &ZoneOffset) -> Result<()> {
    if offset.minutes > 59 {
        return Err(ParseError::InvalidZoneOffset {
            minutes: offset.total_minutes(),
        });
    }
    validate_zone(offset.total_minutes())
}

/// Checks the day against the length of its month.
///
/// Skipped whenever a digit of the year, month or day is unspecified:
/// `2013-02-3u` could be read as an impossible day, but the grammar allows it.
pub fn validate_date(date: &Date) -> Result<()> {
    let (Some(month), Some(day)) = (date.month, date.day) else {
        return Ok(());
    };
    if date.has_unspecified() {
        return Ok(());
    }
    if day.value > days_in_month(date.year.value, month.value) {
        return Err(ParseError::InvalidCalendarDate {
            year: date.year.value,
            month: month.value,
            day: day.value,
        });
    }
    Ok(())
}

/// Applies the calendar rules to every date and time inside a value.
pub fn validate_value(value: &Edtf) -> Result<()> {
    match value {
        Edtf::Date(date) => validate_date(date),
        Edtf::DateTime(dt) => {
            validate_date(&dt.date)?;
            validate_time(dt.time.hour, dt.time.minute, dt.time.second)?;
            match &dt.time.zone {
                Some(Zone::Offset(offset)) => validate_zone_offset(offset),
                Some(Zone::Utc) | None => Ok(()),
            }
        }
        Edtf::Interval(interval) => [&interval.start, &interval.end]
            .into_iter()
            .try_for_each(|endpoint| match endpoint {
                Endpoint::Known(DateOrSeason::Date(date)) => validate_date(date),
                _ => Ok(()),
            }),
        Edtf::List(list) => list.elements.iter().try_for_each(|element| match element {
            ListElement::Date(date) => validate_date(date),
            ListElement::Range(range) => {
                validate_date(&range.start)?;
                validate_date(&range.end)
            }
        }),
        Edtf::Season(_) | Edtf::LongYear(_) | Edtf::MaskedYear(_) => Ok(()),
    }
}
