//! Level 0: calendar dates, date-times and intervals of plain dates.

use winnow::combinator::{alt, eof, opt, preceded, separated_pair, terminated};
use winnow::prelude::*;

use super::{component, PResult};
use crate::model::{Date, DateTime, Edtf, Endpoint, Interval};

/// `YYYY`, `YYYY-MM` or `YYYY-MM-DD`.
pub(crate) fn date(input: &mut &str) -> PResult<Date> {
    let mut date = Date::from_year(component::year.parse_next(input)?);
    if let Some(month) = opt(preceded('-', component::month)).parse_next(input)? {
        date.month = Some(month);
        date.day = opt(preceded('-', component::day)).parse_next(input)?;
    }
    Ok(date)
}

/// `YYYY-MM-DDTHH:MM:SS` with an optional zone.
pub(crate) fn date_time(input: &mut &str) -> PResult<DateTime> {
    let date = date
        .verify(|d: &Date| d.day.is_some())
        .parse_next(input)?;
    let time = preceded('T', component::time).parse_next(input)?;
    Ok(DateTime { date, time })
}

fn endpoint(input: &mut &str) -> PResult<Endpoint> {
    alt(("..".value(Endpoint::Unbounded), date.map(Endpoint::from))).parse_next(input)
}

/// `DATE/DATE`; either side, but not both, may be `..`.
pub(crate) fn interval(input: &mut &str) -> PResult<Interval> {
    separated_pair(endpoint, '/', endpoint)
        .verify(|(start, end): &(Endpoint, Endpoint)| {
            !(*start == Endpoint::Unbounded && *end == Endpoint::Unbounded)
        })
        .map(|(start, end)| Interval { start, end })
        .parse_next(input)
}

pub(crate) fn expression(input: &mut &str) -> PResult<Edtf> {
    alt((
        terminated(interval, eof).map(Edtf::Interval),
        terminated(date_time, eof).map(Edtf::DateTime),
        terminated(date, eof).map(Edtf::Date),
    ))
    .parse_next(input)
}
