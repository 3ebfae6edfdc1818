//! The classifier: tries the level 0, 1 and 2 grammars in that order.

pub(crate) mod component;
pub(crate) mod level0;
pub(crate) mod level1;
pub(crate) mod level2;

use std::fmt;

use winnow::combinator::{alt, eof, peek, terminated};
use winnow::error::{FromExternalError, ParserError};
use winnow::prelude::*;
use winnow::token::one_of;

use crate::calendar;
use crate::error::{ParseError, Result};
use crate::model::Edtf;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub(crate) type PResult<T> = winnow::Result<T, GrammarError>;

/// A grammar mismatch, remembered by how much input was left where it
/// happened. Of two failed alternatives the one that got further is kept, so
/// the error that reaches the top is the furthest point any branch parsed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct GrammarError {
    remaining: usize,
}

impl GrammarError {
    pub(crate) fn at(input: &str) -> Self {
        Self {
            remaining: input.len(),
        }
    }

    fn offset_in(self, text: &str) -> usize {
        text.len().saturating_sub(self.remaining)
    }
}

impl<'i> ParserError<&'i str> for GrammarError {
    type Inner = Self;

    fn from_input(input: &&'i str) -> Self {
        Self::at(input)
    }

    fn or(self, other: Self) -> Self {
        if other.remaining < self.remaining {
            other
        } else {
            self
        }
    }

    fn into_inner(self) -> std::result::Result<Self::Inner, Self> {
        Ok(self)
    }
}

impl<'i, E> FromExternalError<&'i str, E> for GrammarError {
    fn from_external_error(input: &&'i str, _e: E) -> Self {
        Self::at(input)
    }
}

/// An EDTF conformance level.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Level {
    Zero,
    One,
    Two,
}

impl Level {
    /// In the order they are tried.
    pub const ALL: [Level; 3] = [Level::Zero, Level::One, Level::Two];

    pub fn number(self) -> u8 {
        self as u8
    }

    fn grammar(self, text: &str) -> std::result::Result<Edtf, usize> {
        let attempt = match self {
            Level::Zero => level0::expression.parse(text),
            Level::One => level1::expression.parse(text),
            Level::Two => level2::expression.parse(text),
        };
        attempt.map_err(|e| e.inner().offset_in(text))
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// Runs `parser`, then requires that the next character could end a date
/// inside a larger construct (or that the input is exhausted).
///
/// Several grammar alternatives share a prefix: without this check the first
/// one to match a prefix would win and the longer reading would never be
/// tried.
pub(crate) fn bounded<'i, O, P>(parser: P) -> impl Parser<&'i str, O, GrammarError>
where
    P: Parser<&'i str, O, GrammarError>,
{
    terminated(
        parser,
        peek(alt((
            eof.void(),
            one_of(['/', ',', ']', '}', '.', ')']).void(),
        ))),
    )
}

/// Parses `text` against each level grammar in turn.
///
/// The first level whose grammar matches decides the result: its value is
/// checked against the calendar rules and the levels above it are not tried.
pub fn parse_with_level(text: &str) -> Result<(Edtf, Level)> {
    let mut furthest = 0;
    for level in Level::ALL {
        match level.grammar(text) {
            Ok(value) => {
                tracing::debug!(input = text, %level, "matched EDTF grammar");
                calendar::validate_value(&value)?;
                return Ok((value, level));
            }
            Err(offset) => {
                tracing::trace!(input = text, %level, offset, "no match");
                furthest = furthest.max(offset);
            }
        }
    }
    tracing::debug!(input = text, offset = furthest, "not an EDTF string");
    Err(ParseError::Grammar { offset: furthest })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_precedence() {
        assert_eq!(parse_with_level("2004").unwrap().1, Level::Zero);
        assert_eq!(parse_with_level("2004?").unwrap().1, Level::One);
        assert_eq!(parse_with_level("2004?-06").unwrap().1, Level::Two);
    }

    fn offset(text: &str) -> Option<usize> {
        parse_with_level(text).unwrap_err().offset()
    }

    #[test]
    fn test_grammar_error_offset() {
        assert_eq!(offset("2004-06-11T"), Some(11));
        assert_eq!(offset("hello"), Some(0));
    }

    #[test]
    fn test_grammar_error_offset_is_furthest_branch() {
        // The failing branch is not the last alternative tried.
        assert_eq!(offset("[1667, 1668, 1670..1672"), Some(23));
        assert_eq!(offset("[1667,  1668]"), Some(7));
        assert_eq!(offset("1985-04-12T23:20:30Q"), Some(19));
        assert_eq!(offset("2004?-06-11X"), Some(11));
    }

    #[test]
    fn test_alternatives_keep_furthest_failure() {
        let near = GrammarError::at("-06");
        let far = GrammarError::at("6");
        assert_eq!(near.or(far), far);
        assert_eq!(far.or(near), far);
        assert_eq!(far.offset_in("2004-06"), 6);
    }

    #[test]
    fn test_calendar_check_stops_classification() {
        assert_eq!(
            parse_with_level("2004-02-30").unwrap_err(),
            ParseError::InvalidCalendarDate {
                year: 2004,
                month: 2,
                day: 30
            }
        );
    }

    #[test]
    fn test_level_display() {
        assert_eq!(Level::Two.to_string(), "2");
        assert!(Level::Zero < Level::Two);
    }
}
