//! Canonical EDTF rendering.
//!
//! Every type renders through [`fmt::Display`]; the output depends only on
//! the structure, never on how the value was written.

use std::fmt;

use crate::model::{
    ConsecutiveRange, Date, DateOrSeason, DateTime, Day, Edtf, Endpoint, Interval, List,
    ListElement, ListKind, LongYear, MaskedPrecision, MaskedYear, Month, Quality, Season, Time,
    Unspecified, Year, Zone, ZoneOffset,
};

/// Writes `value` zero-padded to `width` digits, with unspecified digits as `u`.
fn write_masked(
    f: &mut fmt::Formatter<'_>,
    value: u64,
    width: usize,
    mask: Unspecified,
) -> fmt::Result {
    let digits = format!("{:0width$}", value, width = width);
    for (i, c) in digits.chars().enumerate() {
        if mask.is_digit(i) {
            f.write_str("u")?;
        } else {
            write!(f, "{}", c)?;
        }
    }
    Ok(())
}

impl fmt::Display for Edtf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Edtf::Date(d) => write!(f, "{}", d),
            Edtf::DateTime(dt) => write!(f, "{}", dt),
            Edtf::Season(s) => write!(f, "{}", s),
            Edtf::LongYear(y) => write!(f, "{}", y),
            Edtf::MaskedYear(y) => write!(f, "{}", y),
            Edtf::Interval(i) => write!(f, "{}", i),
            Edtf::List(l) => write!(f, "{}", l),
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.uncertain, self.approximate) {
            (true, true) => write!(f, "?~"),
            (true, false) => write!(f, "?"),
            (false, true) => write!(f, "~"),
            (false, false) => Ok(()),
        }
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.value < 0 {
            f.write_str("-")?;
        }
        write_masked(f, self.value.unsigned_abs(), 4, self.unspecified)
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_masked(f, u64::from(self.value), 2, self.unspecified)
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_masked(f, u64::from(self.value), 2, self.unspecified)
    }
}

impl Date {
    fn write_plain(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.year)?;
        if let Some(m) = self.month {
            write!(f, "-{}", m)?;
            if let Some(d) = self.day {
                write!(f, "-{}", d)?;
            }
        }
        Ok(())
    }

    /// `YYYY?-(MM)~-(DD)?`: a qualified month or day is parenthesized so its
    /// marker applies to it alone.
    fn write_qualified(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.year, self.year_quality)?;
        if let Some(m) = self.month {
            write_component(f, m, self.month_quality)?;
            if let Some(d) = self.day {
                write_component(f, d, self.day_quality)?;
            }
        }
        Ok(())
    }
}

fn write_component(
    f: &mut fmt::Formatter<'_>,
    value: impl fmt::Display,
    quality: Quality,
) -> fmt::Result {
    if quality.is_none() {
        write!(f, "-{}", value)
    } else {
        write!(f, "-({}){}", value, quality)
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // A year on its own has nothing to distinguish its marker from a
        // whole-value marker.
        if self.month.is_none() {
            self.write_plain(f)?;
            return write!(f, "{}", self.quality.merge(self.year_quality));
        }
        if !self.has_component_quality() {
            self.write_plain(f)?;
            return write!(f, "{}", self.quality);
        }
        if self.quality.is_none() {
            self.write_qualified(f)
        } else {
            f.write_str("(")?;
            self.write_qualified(f)?;
            write!(f, "){}", self.quality)
        }
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}T{}", self.date, self.time)
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)?;
        match &self.zone {
            Some(zone) => write!(f, "{}", zone),
            None => Ok(()),
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Zone::Utc => f.write_str("Z"),
            Zone::Offset(offset) => write!(f, "{}", offset),
        }
    }
}

impl fmt::Display for ZoneOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.negative { '-' } else { '+' };
        write!(f, "{}{:02}:{:02}", sign, self.hours, self.minutes)
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}{}", self.year, self.kind.code(), self.quality)?;
        if let Some(q) = &self.qualifier {
            write!(f, "^{}", q)?;
        }
        Ok(())
    }
}

impl fmt::Display for LongYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.negative { "-" } else { "" };
        write!(f, "y{}{}", sign, self.mantissa)?;
        if let Some(e) = self.exponent {
            write!(f, "e{}", e)?;
        }
        if let Some(p) = self.precision {
            write!(f, "p{}", p)?;
        }
        Ok(())
    }
}

impl fmt::Display for MaskedYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.precision {
            MaskedPrecision::Decade => write!(f, "{:03}x", self.value / 10),
            MaskedPrecision::Century => write!(f, "{:02}xx", self.value / 100),
        }
    }
}

impl fmt::Display for DateOrSeason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateOrSeason::Date(d) => write!(f, "{}", d),
            DateOrSeason::Season(s) => write!(f, "{}", s),
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Known(v) => write!(f, "{}", v),
            Endpoint::Unknown => f.write_str("unknown"),
            Endpoint::Open => f.write_str("open"),
            Endpoint::Unbounded => f.write_str(".."),
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.start, self.end)
    }
}

impl fmt::Display for ConsecutiveRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

impl fmt::Display for ListElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListElement::Date(d) => write!(f, "{}", d),
            ListElement::Range(r) => write!(f, "{}", r),
        }
    }
}

impl fmt::Display for List {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (open, close) = match self.kind {
            ListKind::Choice => ('[', ']'),
            ListKind::Inclusive => ('{', '}'),
        };
        write!(f, "{}", open)?;
        if self.open_start {
            f.write_str("..")?;
        }
        for (i, element) in self.elements.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", element)?;
        }
        if self.open_end {
            f.write_str("..")?;
        }
        write!(f, "{}", close)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SeasonKind;

    #[test]
    fn test_masked_year_digits() {
        let year = Year {
            value: 1900,
            unspecified: Unspecified::trailing(2, 4),
        };
        assert_eq!(year.to_string(), "19uu");

        let negative = Year::new(-44);
        assert_eq!(negative.to_string(), "-0044");
    }

    #[test]
    fn test_component_quality_rendering() {
        let mut date = Date::new(2004).with_month(6).with_day(11);
        date.year_quality = Quality::UNCERTAIN;
        date.month_quality = Quality::APPROXIMATE;
        assert_eq!(date.to_string(), "2004?-(06)~-11");

        date.quality = Quality::UNCERTAIN;
        assert_eq!(date.to_string(), "(2004?-(06)~-11)?");
    }

    #[test]
    fn test_year_only_marker_folds_into_whole_value() {
        let mut date = Date::new(1984);
        date.year_quality = Quality::APPROXIMATE;
        assert_eq!(date.to_string(), "1984~");
    }

    #[test]
    fn test_zone_rendering() {
        let time = Time {
            hour: 10,
            minute: 5,
            second: 0,
            zone: Some(Zone::Offset(ZoneOffset {
                negative: true,
                hours: 5,
                minutes: 0,
            })),
        };
        assert_eq!(time.to_string(), "10:05:00-05:00");
    }

    #[test]
    fn test_season_and_masked_rendering() {
        let mut season = Season::new(2001, SeasonKind::Spring);
        season.qualifier = Some("southernHemisphere".to_string());
        assert_eq!(season.to_string(), "2001-21^southernHemisphere");

        let decade = MaskedYear {
            value: 1960,
            precision: MaskedPrecision::Decade,
        };
        assert_eq!(decade.to_string(), "196x");
        let century = MaskedYear {
            value: 1900,
            precision: MaskedPrecision::Century,
        };
        assert_eq!(century.to_string(), "19xx");
    }
}
