//! Level 1: whole-value markers, unspecified trailing digits, seasons, long
//! years and intervals with `unknown` or `open` ends.

use winnow::combinator::{alt, eof, opt, preceded, separated_pair, terminated};
use winnow::prelude::*;

use super::{bounded, component, level0, GrammarError, PResult};
use crate::model::{Date, DateOrSeason, Edtf, Endpoint, Interval, Season};

/// `2004-06-11?`: a level 0 date with one marker for the whole value.
pub(crate) fn qualified_date(input: &mut &str) -> PResult<Date> {
    let date = level0::date.parse_next(input)?;
    let quality = component::marker.parse_next(input)?;
    Ok(date.with_quality(quality))
}

/// `199u`, `19uu`, `2004-uu`, `2004-06-uu`, `2004-uu-uu`.
pub(crate) fn unspecified_date(input: &mut &str) -> PResult<Date> {
    alt((
        unspecified_month_or_day,
        component::year_with_trailing_u.map(Date::from_year),
    ))
    .parse_next(input)
}

fn unspecified_month_or_day(input: &mut &str) -> PResult<Date> {
    let mut date = Date::from_year(component::year.parse_next(input)?);
    let _ = '-'.parse_next(input)?;
    if let Some(month) = opt(component::unspecified_month).parse_next(input)? {
        date.month = Some(month);
        date.day = opt(preceded('-', component::unspecified_day)).parse_next(input)?;
    } else {
        date.month = Some(component::month.parse_next(input)?);
        date.day = Some(preceded('-', component::unspecified_day).parse_next(input)?);
    }
    Ok(date)
}

/// A season with an optional marker: `2001-21`, `2001-21~`.
pub(crate) fn qualified_season(input: &mut &str) -> PResult<Season> {
    let mut season = component::season.parse_next(input)?;
    season.quality = component::quality.parse_next(input)?;
    Ok(season)
}

/// A level 0 date followed by any number of markers, as an interval end.
pub(crate) fn marked_date(input: &mut &str) -> PResult<Date> {
    let date = level0::date.parse_next(input)?;
    let quality = component::markers.parse_next(input)?;
    Ok(date.with_quality(quality))
}

/// A season followed by any number of markers, as an interval end.
pub(crate) fn marked_season(input: &mut &str) -> PResult<Season> {
    let mut season = component::season.parse_next(input)?;
    season.quality = component::markers.parse_next(input)?;
    Ok(season)
}

fn date_or_season(input: &mut &str) -> PResult<DateOrSeason> {
    alt((
        bounded(marked_season).map(DateOrSeason::Season),
        bounded(marked_date).map(DateOrSeason::Date),
    ))
    .parse_next(input)
}

/// The keywords an interval start may use instead of a date.
pub(crate) fn start_keyword(input: &mut &str) -> PResult<Endpoint> {
    alt((
        "unknown".value(Endpoint::Unknown),
        "..".value(Endpoint::Unbounded),
    ))
    .parse_next(input)
}

/// The keywords an interval end may use instead of a date.
pub(crate) fn end_keyword(input: &mut &str) -> PResult<Endpoint> {
    alt((
        "open".value(Endpoint::Open),
        "unknown".value(Endpoint::Unknown),
        "..".value(Endpoint::Unbounded),
    ))
    .parse_next(input)
}

/// `START/END` where `open` may only end an interval. `../..` is rejected.
pub(crate) fn interval_of<'i, S, E>(
    start: S,
    end: E,
) -> impl Parser<&'i str, Interval, GrammarError>
where
    S: Parser<&'i str, Endpoint, GrammarError>,
    E: Parser<&'i str, Endpoint, GrammarError>,
{
    separated_pair(start, '/', end)
        .verify(|(from, to): &(Endpoint, Endpoint)| {
            !(*from == Endpoint::Unbounded && *to == Endpoint::Unbounded)
        })
        .map(|(start, end)| Interval { start, end })
}

pub(crate) fn interval(input: &mut &str) -> PResult<Interval> {
    interval_of(
        alt((start_keyword, date_or_season.map(Endpoint::Known))),
        alt((end_keyword, date_or_season.map(Endpoint::Known))),
    )
    .parse_next(input)
}

pub(crate) fn expression(input: &mut &str) -> PResult<Edtf> {
    alt((
        terminated(interval, eof).map(Edtf::Interval),
        terminated(qualified_date, eof).map(Edtf::Date),
        terminated(unspecified_date, eof).map(Edtf::Date),
        terminated(qualified_season, eof).map(Edtf::Season),
        terminated(component::long_year_simple, eof).map(Edtf::LongYear),
    ))
    .parse_next(input)
}
