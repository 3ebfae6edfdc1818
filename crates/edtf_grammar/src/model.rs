//! The structured EDTF value built by the parser.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Represents the top-level EDTF value.
#[derive(Debug, PartialEq, Eq, Clone, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Edtf {
    /// `2004`, `2004-06`, `1984?`, `199u`, `2004?-(06)~-11`, ...
    Date(Date),
    /// `2004-06-11T10:20:30Z`
    DateTime(DateTime),
    /// `2001-21`, `2001-21^southernHemisphere`
    Season(Season),
    /// `y170000002`, `y-17e7`, `y17e7p3`
    LongYear(LongYear),
    /// `196x`, `19xx`
    MaskedYear(MaskedYear),
    /// `2004-06/2006-08`, `unknown/2004`, `2004/open`
    Interval(Interval),
    /// `[1667, 1668, 1670..1672]`, `{..1984}`
    List(List),
}

impl Edtf {
    pub fn as_date(&self) -> Option<&Date> {
        match self {
            Self::Date(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_interval(&self) -> Option<&Interval> {
        match self {
            Self::Interval(i) => Some(i),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&List> {
        match self {
            Self::List(l) => Some(l),
            _ => None,
        }
    }
}

impl From<DateOrSeason> for Edtf {
    fn from(value: DateOrSeason) -> Self {
        match value {
            DateOrSeason::Date(d) => Self::Date(d),
            DateOrSeason::Season(s) => Self::Season(s),
        }
    }
}

/// Metadata about the certainty and precision of a date component
#[derive(Debug, PartialEq, Eq, Default, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Quality {
    pub uncertain: bool,   // '?'
    pub approximate: bool, // '~'
}

impl Quality {
    pub const NONE: Self = Self {
        uncertain: false,
        approximate: false,
    };
    pub const UNCERTAIN: Self = Self {
        uncertain: true,
        approximate: false,
    };
    pub const APPROXIMATE: Self = Self {
        uncertain: false,
        approximate: true,
    };
    pub const UNCERTAIN_APPROXIMATE: Self = Self {
        uncertain: true,
        approximate: true,
    };

    pub fn is_none(self) -> bool {
        !self.uncertain && !self.approximate
    }

    /// Combines two markers that qualify the same component.
    pub fn merge(self, other: Self) -> Self {
        Self {
            uncertain: self.uncertain || other.uncertain,
            approximate: self.approximate || other.approximate,
        }
    }
}

/// Positions of unspecified digits within a fixed-width component, counted
/// from the left (bit 0 is the leftmost digit).
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Unspecified(u8);

impl Unspecified {
    pub const NONE: Self = Self(0);

    /// Every digit of a component `width` digits wide.
    pub fn all(width: usize) -> Self {
        Self::trailing(width, width)
    }

    /// The last `count` digits of a component `width` digits wide.
    pub fn trailing(count: usize, width: usize) -> Self {
        (width - count.min(width)..width).fold(Self::NONE, Self::with_digit)
    }

    pub fn with_digit(self, index: usize) -> Self {
        Self(self.0 | (1 << index))
    }

    pub fn is_digit(self, index: usize) -> bool {
        self.0 & (1 << index) != 0
    }

    pub fn is_none(self) -> bool {
        self.0 == 0
    }

    pub fn count(self) -> u32 {
        self.0.count_ones()
    }
}

/// A four-digit year in an EDTF date, which may contain unspecified digits.
///
/// Unspecified digits are stored as `0` in `value`, so `19uu` has a value of
/// `1900`.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Year {
    pub value: i64,
    pub unspecified: Unspecified,
}

impl Year {
    pub fn new(value: i64) -> Self {
        Self {
            value,
            unspecified: Unspecified::NONE,
        }
    }
}

/// A month, `1..=12` unless some of its digits are unspecified.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Month {
    pub value: u8,
    pub unspecified: Unspecified,
}

impl Month {
    pub fn new(value: u8) -> Self {
        Self {
            value,
            unspecified: Unspecified::NONE,
        }
    }

    /// `uu`
    pub fn unspecified() -> Self {
        Self {
            value: 0,
            unspecified: Unspecified::all(2),
        }
    }
}

/// A day of the month, `1..=31` unless some of its digits are unspecified.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Day {
    pub value: u8,
    pub unspecified: Unspecified,
}

impl Day {
    pub fn new(value: u8) -> Self {
        Self {
            value,
            unspecified: Unspecified::NONE,
        }
    }

    /// `uu`
    pub fn unspecified() -> Self {
        Self {
            value: 0,
            unspecified: Unspecified::all(2),
        }
    }
}

/// How much of a [`Date`] is present.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Precision {
    Year,
    Month,
    Day,
}

/// The core EDTF Date structure.
///
/// `quality` is the whole-value marker (`2004-06-11?`); the per-component
/// markers hold the internal qualification of level 2 (`2004?-(06)~-11`).
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Date {
    pub year: Year,
    pub month: Option<Month>,
    pub day: Option<Day>,
    pub year_quality: Quality,
    pub month_quality: Quality,
    pub day_quality: Quality,
    pub quality: Quality,
}

impl Date {
    pub fn new(year: i64) -> Self {
        Self::from_year(Year::new(year))
    }

    pub fn from_year(year: Year) -> Self {
        Self {
            year,
            month: None,
            day: None,
            year_quality: Quality::NONE,
            month_quality: Quality::NONE,
            day_quality: Quality::NONE,
            quality: Quality::NONE,
        }
    }

    pub fn with_month(mut self, month: u8) -> Self {
        self.month = Some(Month::new(month));
        self
    }

    pub fn with_day(mut self, day: u8) -> Self {
        self.day = Some(Day::new(day));
        self
    }

    pub fn with_quality(mut self, quality: Quality) -> Self {
        self.quality = quality;
        self
    }

    pub fn precision(&self) -> Precision {
        match (self.month, self.day) {
            (_, Some(_)) => Precision::Day,
            (Some(_), None) => Precision::Month,
            (None, None) => Precision::Year,
        }
    }

    /// True if any digit of the year, month or day is unspecified.
    pub fn has_unspecified(&self) -> bool {
        !self.year.unspecified.is_none()
            || self.month.is_some_and(|m| !m.unspecified.is_none())
            || self.day.is_some_and(|d| !d.unspecified.is_none())
    }

    pub fn has_component_quality(&self) -> bool {
        !(self.year_quality.is_none() && self.month_quality.is_none() && self.day_quality.is_none())
    }

    /// A level 0 date: no markers and no unspecified digits.
    pub fn is_plain(&self) -> bool {
        !self.has_unspecified() && !self.has_component_quality() && self.quality.is_none()
    }
}

/// A calendar date with a time of day.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DateTime {
    pub date: Date,
    pub time: Time,
}

/// Basic ISO 8601-style time
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Time {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub zone: Option<Zone>,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Zone {
    /// `Z`
    Utc,
    /// `+05:30`, `-08`
    Offset(ZoneOffset),
}

/// A numeric zone offset as written: sign, hours and minutes.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ZoneOffset {
    pub negative: bool,
    pub hours: u8,
    pub minutes: u8,
}

impl ZoneOffset {
    /// The signed offset from UTC in minutes.
    pub fn total_minutes(&self) -> i32 {
        let magnitude = i32::from(self.hours) * 60 + i32::from(self.minutes);
        if self.negative {
            -magnitude
        } else {
            magnitude
        }
    }
}

/// The EDTF season codes.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SeasonKind {
    Spring = 21,
    Summer = 22,
    Autumn = 23,
    Winter = 24,
}

impl SeasonKind {
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            21 => Some(Self::Spring),
            22 => Some(Self::Summer),
            23 => Some(Self::Autumn),
            24 => Some(Self::Winter),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }
}

/// A season of a year, `2001-21`.
#[derive(Debug, PartialEq, Eq, Clone, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Season {
    pub year: Year,
    pub kind: SeasonKind,
    /// Free text after `^`, e.g. `southernHemisphere`.
    pub qualifier: Option<String>,
    pub quality: Quality,
}

impl Season {
    pub fn new(year: i64, kind: SeasonKind) -> Self {
        Self {
            year: Year::new(year),
            kind,
            qualifier: None,
            quality: Quality::NONE,
        }
    }
}

/// A year too long for four digits: `y170000002` or, in scientific
/// notation, `y-17e7p3` (mantissa 17, exponent 7, 3 significant digits).
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LongYear {
    pub negative: bool,
    pub mantissa: u64,
    pub exponent: Option<u32>,
    pub precision: Option<u32>,
}

impl LongYear {
    /// The year as an integer, or `None` if it does not fit in an `i128`.
    pub fn value(&self) -> Option<i128> {
        let scale = 10_i128.checked_pow(self.exponent.unwrap_or(0))?;
        let magnitude = i128::from(self.mantissa).checked_mul(scale)?;
        Some(if self.negative { -magnitude } else { magnitude })
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MaskedPrecision {
    /// `196x`
    Decade,
    /// `19xx`
    Century,
}

/// A year given only to decade or century precision. `value` is the first
/// year of the span (`1960` for `196x`).
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MaskedYear {
    pub value: u16,
    pub precision: MaskedPrecision,
}

#[derive(Debug, PartialEq, Eq, Clone, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DateOrSeason {
    Date(Date),
    Season(Season),
}

/// One side of an [`Interval`].
#[derive(Debug, PartialEq, Eq, Clone, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Endpoint {
    Known(DateOrSeason),
    /// `unknown`
    Unknown,
    /// `open`, only as the end of an interval.
    Open,
    /// `..`
    Unbounded,
}

impl From<Date> for Endpoint {
    fn from(date: Date) -> Self {
        Self::Known(DateOrSeason::Date(date))
    }
}

impl From<Season> for Endpoint {
    fn from(season: Season) -> Self {
        Self::Known(DateOrSeason::Season(season))
    }
}

/// A date interval.
#[derive(Debug, PartialEq, Eq, Clone, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Interval {
    pub start: Endpoint,
    pub end: Endpoint,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ListKind {
    /// `[...]`: exactly one of the members.
    Choice,
    /// `{...}`: all of the members.
    Inclusive,
}

/// `1670..1672` inside a list: every date from `start` to `end` at the
/// precision of both.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConsecutiveRange {
    pub start: Date,
    pub end: Date,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ListElement {
    Date(Date),
    Range(ConsecutiveRange),
}

/// A choice or inclusive list of dates.
///
/// `open_start` means the first element is preceded by `..` ("that date or
/// earlier"), `open_end` that the last is followed by `..`.
#[derive(Debug, PartialEq, Eq, Clone, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct List {
    pub kind: ListKind,
    pub open_start: bool,
    pub open_end: bool,
    pub elements: Vec<ListElement>,
}

impl List {
    /// Checks the shapes the list grammar allows: open ends attach to plain
    /// dates, and a lone element is only allowed when it is a range or an
    /// open end.
    pub fn is_well_formed(&self) -> bool {
        let plain =
            |e: Option<&ListElement>| matches!(e, Some(ListElement::Date(d)) if d.is_plain());
        if self.elements.is_empty() {
            return false;
        }
        if self.open_start && !plain(self.elements.first()) {
            return false;
        }
        if self.open_end && !plain(self.elements.last()) {
            return false;
        }
        match (self.open_start, self.open_end) {
            (true, true) => self.elements.len() >= 2,
            (false, false) => {
                self.elements.len() >= 2 || matches!(self.elements[0], ListElement::Range(_))
            }
            _ => true,
        }
    }
}
