//! Level 2: markers on individual components, unspecified digits anywhere,
//! masked precision, lists, cross-level intervals, scientific long years
//! and qualified seasons.
//!
//! A bare marker after the year applies to the year. A bare marker after a
//! month that is followed by a day applies to the year and the month. A
//! marker after the last bare component applies to the whole date. A marker
//! after a parenthesized component applies to that component alone.

use winnow::combinator::{alt, delimited, eof, opt, preceded, separated_pair, terminated};
use winnow::prelude::*;
use winnow::token::one_of;

use super::{bounded, component, level0, level1, GrammarError, PResult};
use crate::model::{
    ConsecutiveRange, Date, DateOrSeason, Day, Edtf, Endpoint, Interval, List, ListElement,
    ListKind, Month, Quality, Season, Year,
};

/// `(DD)?` and friends: a component in parentheses with a required marker.
fn parenthesized<'i, O, P>(parser: P) -> impl Parser<&'i str, (O, Quality), GrammarError>
where
    P: Parser<&'i str, O, GrammarError>,
{
    (delimited('(', parser, ')'), component::marker)
}

/// A day that is either parenthesized with a marker or bare without one.
fn day_part(input: &mut &str) -> PResult<(Day, Quality)> {
    alt((
        parenthesized(component::day),
        component::day.map(|d| (d, Quality::NONE)),
    ))
    .parse_next(input)
}

fn build(
    year: Year,
    year_quality: Quality,
    month: (Month, Quality),
    day: Option<(Day, Quality)>,
) -> Date {
    let mut date = Date::from_year(year);
    date.year_quality = year_quality;
    date.month = Some(month.0);
    date.month_quality = month.1;
    if let Some((d, q)) = day {
        date.day = Some(d);
        date.day_quality = q;
    }
    date
}

/// `2004?-06` and `2004?-06-(11)~`.
fn marked_year_bare_month(input: &mut &str) -> PResult<Date> {
    let year = component::year.parse_next(input)?;
    let yq = component::marker.parse_next(input)?;
    let month = preceded('-', component::month).parse_next(input)?;
    let day = opt(preceded('-', parenthesized(component::day))).parse_next(input)?;
    Ok(build(year, yq, (month, Quality::NONE), day))
}

/// `2004?-06-11` and `2004?-06-11~`; the trailing marker covers the whole date.
fn marked_year_full_date(input: &mut &str) -> PResult<Date> {
    let year = component::year.parse_next(input)?;
    let yq = component::marker.parse_next(input)?;
    let month = preceded('-', component::month).parse_next(input)?;
    let day = preceded('-', component::day).parse_next(input)?;
    let whole = component::quality.parse_next(input)?;
    Ok(build(year, yq, (month, Quality::NONE), Some((day, Quality::NONE))).with_quality(whole))
}

/// `2004-(06)?`, `2004?-(06)~-(11)?`, `2004-(06)?-11`.
fn parenthesized_month(input: &mut &str) -> PResult<Date> {
    let year = component::year.parse_next(input)?;
    let yq = component::quality.parse_next(input)?;
    let month = preceded('-', parenthesized(component::month)).parse_next(input)?;
    let day = opt(preceded('-', day_part)).parse_next(input)?;
    Ok(build(year, yq, month, day))
}

/// `2004-06~-11` and `2004-06~-(11)?`; the month marker covers the year too.
fn marked_month_with_day(input: &mut &str) -> PResult<Date> {
    let year = component::year.parse_next(input)?;
    let month = preceded('-', component::month).parse_next(input)?;
    let mq = component::marker.parse_next(input)?;
    let day = preceded('-', day_part).parse_next(input)?;
    Ok(build(year, mq, (month, mq), Some(day)))
}

/// `2004-06-(11)~`.
fn parenthesized_day(input: &mut &str) -> PResult<Date> {
    let year = component::year.parse_next(input)?;
    let month = preceded('-', component::month).parse_next(input)?;
    let day = preceded('-', parenthesized(component::day)).parse_next(input)?;
    Ok(build(year, Quality::NONE, (month, Quality::NONE), Some(day)))
}

/// `2004-(06-11)?`: the marker covers the month and the day.
fn parenthesized_month_day(input: &mut &str) -> PResult<Date> {
    let year = component::year.parse_next(input)?;
    let ((month, day), q) = preceded(
        '-',
        parenthesized(separated_pair(component::month, '-', component::day)),
    )
    .parse_next(input)?;
    Ok(build(year, Quality::NONE, (month, q), Some((day, q))))
}

/// `2001-21~`
fn marked_season(input: &mut &str) -> PResult<Season> {
    let mut season = component::season.parse_next(input)?;
    season.quality = component::marker.parse_next(input)?;
    Ok(season)
}

/// One of the internally qualified shapes, without an outer group.
fn internally_qualified_base(input: &mut &str) -> PResult<DateOrSeason> {
    alt((
        bounded(marked_year_bare_month).map(DateOrSeason::Date),
        bounded(marked_year_full_date).map(DateOrSeason::Date),
        bounded(parenthesized_month).map(DateOrSeason::Date),
        bounded(marked_month_with_day).map(DateOrSeason::Date),
        bounded(parenthesized_day).map(DateOrSeason::Date),
        bounded(parenthesized_month_day).map(DateOrSeason::Date),
        bounded(marked_season).map(DateOrSeason::Season),
    ))
    .parse_next(input)
}

/// `(2004?-06-11)~`: a marker for the whole of an internally qualified date.
fn internally_qualified_group(input: &mut &str) -> PResult<DateOrSeason> {
    let (value, whole) = parenthesized(internally_qualified_base).parse_next(input)?;
    Ok(match value {
        DateOrSeason::Date(date) => {
            let quality = date.quality.merge(whole);
            DateOrSeason::Date(date.with_quality(quality))
        }
        DateOrSeason::Season(mut season) => {
            season.quality = season.quality.merge(whole);
            DateOrSeason::Season(season)
        }
    })
}

pub(crate) fn internally_qualified(input: &mut &str) -> PResult<DateOrSeason> {
    alt((bounded(internally_qualified_group), internally_qualified_base)).parse_next(input)
}

/// A date with at least one unspecified digit anywhere: `156u-12-2u`,
/// `2004-1u`, `uuuu`.
pub(crate) fn internal_unspecified(input: &mut &str) -> PResult<Date> {
    let year = alt((component::year_with_u, component::year)).parse_next(input)?;
    let mut date = Date::from_year(year);
    if let Some(month) = opt(preceded('-', component::month_with_u)).parse_next(input)? {
        date.month = Some(month);
        date.day = opt(preceded('-', component::day_with_u)).parse_next(input)?;
    }
    if !date.has_unspecified() {
        return Err(GrammarError::at(input));
    }
    Ok(date)
}

/// Any date a level 2 list or interval may hold: the level 2 shapes, the
/// level 1 marked and unspecified dates, and plain dates.
fn any_date(input: &mut &str) -> PResult<Date> {
    alt((
        internally_qualified.verify_map(|v| match v {
            DateOrSeason::Date(d) => Some(d),
            DateOrSeason::Season(_) => None,
        }),
        bounded(internal_unspecified),
        bounded(level1::marked_date),
    ))
    .parse_next(input)
}

fn any_date_or_season(input: &mut &str) -> PResult<DateOrSeason> {
    alt((
        any_date.map(DateOrSeason::Date),
        internally_qualified,
        bounded(level1::marked_season).map(DateOrSeason::Season),
    ))
    .parse_next(input)
}

pub(crate) fn interval(input: &mut &str) -> PResult<Interval> {
    level1::interval_of(
        alt((level1::start_keyword, any_date_or_season.map(Endpoint::Known))),
        alt((level1::end_keyword, any_date_or_season.map(Endpoint::Known))),
    )
    .parse_next(input)
}

/// `1670..1672`: two plain dates of the same precision.
fn consecutive_range(input: &mut &str) -> PResult<ConsecutiveRange> {
    separated_pair(level0::date, "..", level0::date)
        .verify(|(start, end): &(Date, Date)| start.precision() == end.precision())
        .map(|(start, end)| ConsecutiveRange { start, end })
        .parse_next(input)
}

fn list_element(input: &mut &str) -> PResult<ListElement> {
    alt((
        bounded(consecutive_range).map(ListElement::Range),
        any_date.map(ListElement::Date),
    ))
    .parse_next(input)
}

/// `,` optionally followed by one ASCII space or tab.
fn separator(input: &mut &str) -> PResult<()> {
    (',', opt(one_of([' ', '\t'])))
        .void()
        .parse_next(input)
}

/// `[...]` or `{...}`.
pub(crate) fn list(input: &mut &str) -> PResult<List> {
    let kind = alt((
        '['.value(ListKind::Choice),
        '{'.value(ListKind::Inclusive),
    ))
    .parse_next(input)?;
    let open_start = opt("..").parse_next(input)?.is_some();
    let first = if open_start {
        bounded(level0::date).map(ListElement::Date).parse_next(input)?
    } else {
        list_element.parse_next(input)?
    };
    let mut elements = vec![first];
    let mut open_end = false;
    loop {
        if opt("..").parse_next(input)?.is_some() {
            open_end = true;
            break;
        }
        if opt(separator).parse_next(input)?.is_none() {
            break;
        }
        elements.push(list_element.parse_next(input)?);
    }
    let mut close = match kind {
        ListKind::Choice => ']',
        ListKind::Inclusive => '}',
    };
    let _ = close.parse_next(input)?;

    let list = List {
        kind,
        open_start,
        open_end,
        elements,
    };
    if !list.is_well_formed() {
        return Err(GrammarError::at(input));
    }
    Ok(list)
}

/// `2001-21^southernHemisphere`
fn qualified_season(input: &mut &str) -> PResult<Season> {
    let mut season = component::season.parse_next(input)?;
    season.qualifier = Some(preceded('^', component::qualifying_string).parse_next(input)?);
    Ok(season)
}

pub(crate) fn expression(input: &mut &str) -> PResult<Edtf> {
    alt((
        terminated(list, eof).map(Edtf::List),
        terminated(interval, eof).map(Edtf::Interval),
        terminated(internally_qualified, eof).map(Edtf::from),
        terminated(internal_unspecified, eof).map(Edtf::Date),
        terminated(component::masked_year, eof).map(Edtf::MaskedYear),
        terminated(component::long_year_scientific, eof).map(Edtf::LongYear),
        terminated(qualified_season, eof).map(Edtf::Season),
    ))
    .parse_next(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MaskedPrecision, Unspecified};

    fn date(text: &str) -> Date {
        match expression.parse(text).unwrap() {
            Edtf::Date(d) => d,
            other => panic!("expected a date, got {:?}", other),
        }
    }

    #[test]
    fn test_marked_year() {
        let d = date("2004?-06");
        assert_eq!(d.year_quality, Quality::UNCERTAIN);
        assert!(d.month_quality.is_none());

        let d = date("2004?-06-(11)~");
        assert_eq!(d.year_quality, Quality::UNCERTAIN);
        assert_eq!(d.day_quality, Quality::APPROXIMATE);
    }

    #[test]
    fn test_trailing_marker_after_marked_year() {
        let d = date("2004?-06-11~");
        assert_eq!(d.year_quality, Quality::UNCERTAIN);
        assert_eq!(d.quality, Quality::APPROXIMATE);
        assert!(d.day_quality.is_none());
    }

    #[test]
    fn test_parenthesized_components() {
        let d = date("2004-(06)?-11");
        assert!(d.year_quality.is_none());
        assert_eq!(d.month_quality, Quality::UNCERTAIN);
        assert!(d.day_quality.is_none());

        let d = date("2004?-(06)~-(11)?~");
        assert_eq!(d.year_quality, Quality::UNCERTAIN);
        assert_eq!(d.month_quality, Quality::APPROXIMATE);
        assert_eq!(d.day_quality, Quality::UNCERTAIN_APPROXIMATE);

        let d = date("2004-(06-11)?");
        assert_eq!(d.month_quality, Quality::UNCERTAIN);
        assert_eq!(d.day_quality, Quality::UNCERTAIN);
    }

    #[test]
    fn test_bare_month_marker_covers_year() {
        let d = date("2004-06~-11");
        assert_eq!(d.year_quality, Quality::APPROXIMATE);
        assert_eq!(d.month_quality, Quality::APPROXIMATE);
        assert!(d.day_quality.is_none());
    }

    #[test]
    fn test_group_marker() {
        let d = date("(2004?-06-11)~");
        assert_eq!(d.year_quality, Quality::UNCERTAIN);
        assert_eq!(d.quality, Quality::APPROXIMATE);

        assert!(expression.parse("(2004-06-11)?").is_err());
    }

    #[test]
    fn test_marked_season() {
        let res = expression.parse("2001-21~").unwrap();
        assert!(matches!(res, Edtf::Season(s) if s.quality == Quality::APPROXIMATE));
    }

    #[test]
    fn test_internal_unspecified() {
        let d = date("156X-12-2X");
        assert_eq!(d.year.value, 1560);
        assert!(d.year.unspecified.is_digit(3));
        assert_eq!(d.day.unwrap().value, 20);
        assert!(d.day.unwrap().unspecified.is_digit(1));

        let d = date("1uu4-1u");
        assert_eq!(d.year.unspecified.count(), 2);
        assert_eq!(d.month.unwrap().unspecified, Unspecified::NONE.with_digit(1));

        let d = date("2013-02-3u");
        assert_eq!(d.day.unwrap().value, 30);

        assert!(expression.parse("2004-06-0u").is_err());
    }

    #[test]
    fn test_masked_precision() {
        let res = expression.parse("19xx").unwrap();
        assert!(matches!(res, Edtf::MaskedYear(y) if y.precision == MaskedPrecision::Century));
    }

    #[test]
    fn test_choice_list() {
        let res = expression.parse("[1667, 1668, 1670..1672]").unwrap();
        let list = res.as_list().unwrap();
        assert_eq!(list.kind, ListKind::Choice);
        assert_eq!(list.elements.len(), 3);
        assert_eq!(
            list.elements[2],
            ListElement::Range(ConsecutiveRange {
                start: Date::new(1670),
                end: Date::new(1672),
            })
        );
    }

    #[test]
    fn test_open_lists() {
        let res = expression.parse("[..1760-12-03]").unwrap();
        let list = res.as_list().unwrap();
        assert!(list.open_start);
        assert_eq!(list.elements.len(), 1);

        let res = expression.parse("{1667,1668, 1670..}").unwrap();
        let list = res.as_list().unwrap();
        assert_eq!(list.kind, ListKind::Inclusive);
        assert!(list.open_end);
        assert_eq!(list.elements.len(), 3);

        let res = expression.parse("[..1760-01, 1760-12-03..]").unwrap();
        let list = res.as_list().unwrap();
        assert!(list.open_start && list.open_end);
    }

    #[test]
    fn test_list_rejections() {
        assert!(expression.parse("[1667]").is_err());
        assert!(expression.parse("[1667, 1668}").is_err());
        assert!(expression.parse("[..1760..]").is_err());
        assert!(expression.parse("[1670..1672-01]").is_err());
        assert!(expression.parse("[1667,  1668]").is_err());
        assert!(expression.parse("[1667,\u{3000}1668]").is_err());
        assert!(expression.parse("[1667,\t1668]").is_ok());
    }

    #[test]
    fn test_list_mixed_elements() {
        let res = expression.parse("[2004?-06, 199u, 1984~]").unwrap();
        let list = res.as_list().unwrap();
        assert_eq!(list.elements.len(), 3);
    }

    #[test]
    fn test_cross_level_interval() {
        let res = expression.parse("2004-06-(01)~/2004-06-(20)~").unwrap();
        let interval = res.as_interval().unwrap();
        assert!(matches!(
            &interval.start,
            Endpoint::Known(DateOrSeason::Date(d)) if d.day_quality == Quality::APPROXIMATE
        ));

        assert!(expression.parse("199u/2004").is_ok());
        assert!(expression.parse("2004/2005-(06)?").is_ok());
    }

    #[test]
    fn test_scientific_year_and_qualified_season() {
        let res = expression.parse("y-17e7").unwrap();
        assert!(matches!(res, Edtf::LongYear(y) if y.negative && y.exponent == Some(7)));

        let res = expression.parse("2001-21^southernHemisphere").unwrap();
        assert!(matches!(
            res,
            Edtf::Season(s) if s.qualifier.as_deref() == Some("southernHemisphere")
        ));
    }
}
