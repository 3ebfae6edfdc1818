//! Parsers for the primitive tokens of EDTF: years, months, days, times,
//! zones, seasons and qualification markers.
//!
//! Every parser here is a winnow parser over `&mut &str`. A backtrack just
//! means the token is not there; the level grammars use it to try the next
//! alternative.

use winnow::combinator::{alt, opt, preceded, repeat, terminated};
use winnow::prelude::*;
use winnow::token::take_while;

use super::{GrammarError, PResult};
use crate::model::{
    Day, LongYear, MaskedPrecision, MaskedYear, Month, Quality, Season, SeasonKind, Time,
    Unspecified, Year, Zone, ZoneOffset,
};

/// `u` is the placeholder the grammar uses; `X` is accepted as well.
fn is_placeholder(c: char) -> bool {
    c == 'u' || c == 'X'
}

fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

fn backtrack<T>(input: &str) -> PResult<T> {
    Err(GrammarError::at(input))
}

fn two_digits(input: &mut &str) -> PResult<u8> {
    take_while(2, is_digit)
        .try_map(str::parse::<u8>)
        .parse_next(input)
}

/// Exactly `width` characters, each a digit or a placeholder. Placeholders
/// read as `0` in the returned value.
fn masked_field(input: &mut &str, width: usize) -> PResult<(u32, Unspecified)> {
    let text = take_while(width, |c: char| is_digit(c) || is_placeholder(c)).parse_next(input)?;
    let mut value = 0;
    let mut mask = Unspecified::NONE;
    for (i, c) in text.chars().enumerate() {
        value *= 10;
        match c.to_digit(10) {
            Some(d) => value += d,
            None => mask = mask.with_digit(i),
        }
    }
    Ok((value, mask))
}

/// `[1-9][0-9]*`
fn positive_integer<'i>(input: &mut &'i str) -> PResult<&'i str> {
    take_while(1.., is_digit)
        .verify(|s: &str| !s.starts_with('0'))
        .parse_next(input)
}

/// A single `?`, `~` or `?~`.
pub(crate) fn marker(input: &mut &str) -> PResult<Quality> {
    alt((
        "?~".value(Quality::UNCERTAIN_APPROXIMATE),
        '?'.value(Quality::UNCERTAIN),
        '~'.value(Quality::APPROXIMATE),
    ))
    .parse_next(input)
}

/// An optional marker.
pub(crate) fn quality(input: &mut &str) -> PResult<Quality> {
    opt(marker)
        .map(Option::unwrap_or_default)
        .parse_next(input)
}

/// Any number of markers, merged.
pub(crate) fn markers(input: &mut &str) -> PResult<Quality> {
    repeat(0.., marker)
        .fold(Quality::default, Quality::merge)
        .parse_next(input)
}

/// Optional `-` and four digits. `-0000` is not a year.
pub(crate) fn year(input: &mut &str) -> PResult<Year> {
    let negative = opt('-').parse_next(input)?.is_some();
    let value = take_while(4, is_digit)
        .try_map(str::parse::<i64>)
        .parse_next(input)?;
    if negative && value == 0 {
        return backtrack(input);
    }
    Ok(Year::new(if negative { -value } else { value }))
}

/// Four digits or placeholders with at least one placeholder: `1uu4`.
pub(crate) fn year_with_u(input: &mut &str) -> PResult<Year> {
    let (value, unspecified) = masked_field(input, 4)?;
    if unspecified.is_none() {
        return backtrack(input);
    }
    Ok(Year {
        value: i64::from(value),
        unspecified,
    })
}

/// The level 1 form: one or two trailing placeholders, `199u` or `19uu`.
pub(crate) fn year_with_trailing_u(input: &mut &str) -> PResult<Year> {
    let year = year_with_u.parse_next(input)?;
    if year.unspecified != Unspecified::trailing(1, 4)
        && year.unspecified != Unspecified::trailing(2, 4)
    {
        return backtrack(input);
    }
    Ok(year)
}

/// `01` to `12`.
pub(crate) fn month(input: &mut &str) -> PResult<Month> {
    two_digits
        .verify(|m: &u8| (1..=12).contains(m))
        .map(Month::new)
        .parse_next(input)
}

/// A month that may have placeholders: `0u`, `1u`, `u` followed by a digit
/// or placeholder, or a plain month.
pub(crate) fn month_with_u(input: &mut &str) -> PResult<Month> {
    let (value, unspecified) = masked_field(input, 2)?;
    let valid = if unspecified.is_none() {
        (1..=12).contains(&value)
    } else if unspecified.is_digit(0) {
        true
    } else {
        value / 10 <= 1
    };
    if !valid {
        return backtrack(input);
    }
    Ok(Month {
        value: value as u8,
        unspecified,
    })
}

/// `01` to `31`. The month decides how many of those exist.
pub(crate) fn day(input: &mut &str) -> PResult<Day> {
    two_digits
        .verify(|d: &u8| (1..=31).contains(d))
        .map(Day::new)
        .parse_next(input)
}

/// A day that may have placeholders: `u` followed by a digit or placeholder,
/// `1u` to `3u`, or a plain day.
pub(crate) fn day_with_u(input: &mut &str) -> PResult<Day> {
    let (value, unspecified) = masked_field(input, 2)?;
    let valid = if unspecified.is_none() {
        (1..=31).contains(&value)
    } else if unspecified.is_digit(0) {
        true
    } else {
        (1..=3).contains(&(value / 10))
    };
    if !valid {
        return backtrack(input);
    }
    Ok(Day {
        value: value as u8,
        unspecified,
    })
}

/// `uu` as a whole month.
pub(crate) fn unspecified_month(input: &mut &str) -> PResult<Month> {
    take_while(2, is_placeholder)
        .value(Month::unspecified())
        .parse_next(input)
}

/// `uu` as a whole day.
pub(crate) fn unspecified_day(input: &mut &str) -> PResult<Day> {
    take_while(2, is_placeholder)
        .value(Day::unspecified())
        .parse_next(input)
}

/// `21` to `24`.
pub(crate) fn season_kind(input: &mut &str) -> PResult<SeasonKind> {
    two_digits.verify_map(SeasonKind::from_code).parse_next(input)
}

/// `2001-21`, unqualified and unmarked.
pub(crate) fn season(input: &mut &str) -> PResult<Season> {
    let year = year.parse_next(input)?;
    let kind = preceded('-', season_kind).parse_next(input)?;
    Ok(Season {
        year,
        kind,
        qualifier: None,
        quality: Quality::NONE,
    })
}

/// The free text of a qualified season: anything up to whitespace.
pub(crate) fn qualifying_string(input: &mut &str) -> PResult<String> {
    take_while(1.., |c: char| !c.is_whitespace())
        .map(str::to_string)
        .parse_next(input)
}

/// `HH:MM:SS` with an optional zone. Ranges are left to the calendar rules.
pub(crate) fn time(input: &mut &str) -> PResult<Time> {
    let hour = two_digits.parse_next(input)?;
    let minute = preceded(':', two_digits).parse_next(input)?;
    let second = preceded(':', two_digits).parse_next(input)?;
    let zone = opt(zone).parse_next(input)?;
    Ok(Time {
        hour,
        minute,
        second,
        zone,
    })
}

/// `Z`, `+HH`, `-HH:MM`. An hour of `00` needs its minutes: `+00:30`.
pub(crate) fn zone(input: &mut &str) -> PResult<Zone> {
    alt(('Z'.value(Zone::Utc), zone_offset.map(Zone::Offset))).parse_next(input)
}

fn zone_offset(input: &mut &str) -> PResult<ZoneOffset> {
    let negative = alt(('+'.value(false), '-'.value(true))).parse_next(input)?;
    let hours = two_digits.parse_next(input)?;
    let minutes = opt(preceded(':', two_digits)).parse_next(input)?;
    if hours == 0 && minutes.is_none() {
        return backtrack(input);
    }
    Ok(ZoneOffset {
        negative,
        hours,
        minutes: minutes.unwrap_or(0),
    })
}

/// `y170000002`: more than four digits, no leading zero.
pub(crate) fn long_year_simple(input: &mut &str) -> PResult<LongYear> {
    let negative = preceded('y', opt('-')).parse_next(input)?.is_some();
    let mantissa = take_while(5.., is_digit)
        .verify(|s: &str| !s.starts_with('0'))
        .try_map(str::parse::<u64>)
        .parse_next(input)?;
    Ok(LongYear {
        negative,
        mantissa,
        exponent: None,
        precision: None,
    })
}

/// `y-17e7`, `y17e7p3`.
pub(crate) fn long_year_scientific(input: &mut &str) -> PResult<LongYear> {
    let negative = preceded('y', opt('-')).parse_next(input)?.is_some();
    let mantissa = positive_integer
        .try_map(str::parse::<u64>)
        .parse_next(input)?;
    let exponent = preceded('e', positive_integer.try_map(str::parse::<u32>)).parse_next(input)?;
    let precision =
        opt(preceded('p', positive_integer.try_map(str::parse::<u32>))).parse_next(input)?;
    Ok(LongYear {
        negative,
        mantissa,
        exponent: Some(exponent),
        precision,
    })
}

/// `196x` or `19xx`.
pub(crate) fn masked_year(input: &mut &str) -> PResult<MaskedYear> {
    let century = take_while(2, is_digit)
        .try_map(str::parse::<u16>)
        .parse_next(input)?;
    let masked = alt((
        "xx".value(MaskedYear {
            value: century * 100,
            precision: MaskedPrecision::Century,
        }),
        terminated(take_while(1, is_digit).try_map(str::parse::<u16>), 'x').map(|decade| {
            MaskedYear {
                value: century * 100 + decade * 10,
                precision: MaskedPrecision::Decade,
            }
        }),
    ))
    .parse_next(input)?;
    Ok(masked)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year() {
        let mut input = "2004-06";
        assert_eq!(year(&mut input).unwrap(), Year::new(2004));
        assert_eq!(input, "-06");

        let mut input = "-0044";
        assert_eq!(year(&mut input).unwrap().value, -44);

        assert!(year(&mut "-0000").is_err());
        assert!(year(&mut "204").is_err());
    }

    #[test]
    fn test_year_placeholders() {
        let mut input = "1uu4";
        let y = year_with_u(&mut input).unwrap();
        assert_eq!(y.value, 1004);
        assert!(y.unspecified.is_digit(1));
        assert!(y.unspecified.is_digit(2));

        assert!(year_with_u(&mut "2004").is_err());
        assert!(year_with_trailing_u(&mut "199u").is_ok());
        assert!(year_with_trailing_u(&mut "19XX").is_ok());
        assert!(year_with_trailing_u(&mut "1uuu").is_err());
        assert!(year_with_trailing_u(&mut "u999").is_err());
    }

    #[test]
    fn test_month_and_day() {
        assert_eq!(month(&mut "12").unwrap(), Month::new(12));
        assert!(month(&mut "13").is_err());
        assert!(month(&mut "00").is_err());
        assert_eq!(day(&mut "31").unwrap(), Day::new(31));
        assert!(day(&mut "32").is_err());
    }

    #[test]
    fn test_masked_month_and_day() {
        assert!(month_with_u(&mut "1u").is_ok());
        assert!(month_with_u(&mut "0u").is_ok());
        assert!(month_with_u(&mut "2u").is_err());
        assert!(month_with_u(&mut "u5").is_ok());
        assert!(month_with_u(&mut "uu").is_ok());
        assert!(month_with_u(&mut "13").is_err());

        assert!(day_with_u(&mut "3u").is_ok());
        assert!(day_with_u(&mut "0u").is_err());
        assert!(day_with_u(&mut "4u").is_err());
        assert!(day_with_u(&mut "u9").is_ok());
        assert!(day_with_u(&mut "uu").is_ok());
    }

    #[test]
    fn test_markers() {
        assert_eq!(marker(&mut "?~").unwrap(), Quality::UNCERTAIN_APPROXIMATE);
        assert_eq!(marker(&mut "?").unwrap(), Quality::UNCERTAIN);
        assert_eq!(marker(&mut "~").unwrap(), Quality::APPROXIMATE);
        assert!(marker(&mut "").is_err());
        assert_eq!(quality(&mut "-06").unwrap(), Quality::NONE);
        assert_eq!(markers(&mut "~?").unwrap(), Quality::UNCERTAIN_APPROXIMATE);
    }

    #[test]
    fn test_time_and_zone() {
        let t = time(&mut "23:20:30Z").unwrap();
        assert_eq!((t.hour, t.minute, t.second), (23, 20, 30));
        assert_eq!(t.zone, Some(Zone::Utc));

        let t = time(&mut "23:20:30-04").unwrap();
        assert_eq!(
            t.zone,
            Some(Zone::Offset(ZoneOffset {
                negative: true,
                hours: 4,
                minutes: 0
            }))
        );

        assert!(zone(&mut "+00:45").is_ok());
        let mut input = "+00";
        assert!(zone(&mut input).is_err());
    }

    #[test]
    fn test_season() {
        let s = season(&mut "2001-23").unwrap();
        assert_eq!(s.kind, SeasonKind::Autumn);
        assert!(season(&mut "2001-25").is_err());
        assert!(season(&mut "2001-12").is_err());
    }

    #[test]
    fn test_long_years() {
        let y = long_year_simple(&mut "y-170000002").unwrap();
        assert!(y.negative);
        assert_eq!(y.mantissa, 170_000_002);
        assert!(long_year_simple(&mut "y1234").is_err());
        assert!(long_year_simple(&mut "y01234").is_err());

        let y = long_year_scientific(&mut "y17e7p3").unwrap();
        assert_eq!(y.mantissa, 17);
        assert_eq!(y.exponent, Some(7));
        assert_eq!(y.precision, Some(3));
        assert!(long_year_scientific(&mut "y17").is_err());
    }

    #[test]
    fn test_masked_year() {
        let y = masked_year(&mut "196x").unwrap();
        assert_eq!(y.value, 1960);
        assert_eq!(y.precision, MaskedPrecision::Decade);
        let y = masked_year(&mut "19xx").unwrap();
        assert_eq!(y.value, 1900);
        assert_eq!(y.precision, MaskedPrecision::Century);
        assert!(masked_year(&mut "1x6x").is_err());
    }
}
