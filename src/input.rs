//! Values accepted by `CodePointSet::add`, `remove` and `intersect`.
//!
//! Every accepted shape is resolved once, at the boundary, into an
//! `IntervalSet`; the set operations themselves only ever see spans.

use std::ops::RangeInclusive;

use crate::interval_set::IntervalSet;
use crate::surrogates::{combine_surrogates, HIGH_SURROGATE_MAX, HIGH_SURROGATE_MIN};
use crate::{CharClassError, CodePointSet};

/// Something that names one or more code points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodePointInput {
    /// A single code point value.
    CodePoint(u32),
    /// A single Unicode scalar value.
    Char(char),
    /// One 16-bit unit, or a high/low surrogate pair.
    Symbol(Vec<u16>),
    /// An inclusive range `[start, stop]`.
    Range(u32, u32),
    /// An explicit list of code points.
    List(Vec<u32>),
    /// Every member of another set.
    Set(IntervalSet),
}

/// Decode a symbol of one or two UTF-16 units into its code point.
///
/// A single unit stands for itself, even if it is a surrogate. Two units
/// must form a surrogate pair.
pub fn symbol_to_code_point(units: &[u16]) -> Result<u32, CharClassError> {
    match *units {
        [unit] => Ok(u32::from(unit)),
        [high, low] if (HIGH_SURROGATE_MIN..=HIGH_SURROGATE_MAX).contains(&u32::from(high)) => {
            combine_surrogates(high, low).ok_or_else(|| CharClassError::InvalidSymbol(units.to_vec()))
        }
        _ => Err(CharClassError::InvalidSymbol(units.to_vec())),
    }
}

impl CodePointInput {
    /// Validate and convert into span form.
    pub fn resolve(self) -> Result<IntervalSet, CharClassError> {
        match self {
            CodePointInput::CodePoint(cp) => IntervalSet::from_range(cp, cp),
            CodePointInput::Char(c) => IntervalSet::from_range(c as u32, c as u32),
            CodePointInput::Symbol(units) => {
                let cp = symbol_to_code_point(&units)?;
                IntervalSet::from_range(cp, cp)
            }
            CodePointInput::Range(start, stop) => IntervalSet::from_range(start, stop),
            CodePointInput::List(values) => IntervalSet::from_code_points(values),
            CodePointInput::Set(set) => Ok(set),
        }
    }
}

impl From<u32> for CodePointInput {
    fn from(cp: u32) -> Self {
        CodePointInput::CodePoint(cp)
    }
}

impl From<char> for CodePointInput {
    fn from(c: char) -> Self {
        CodePointInput::Char(c)
    }
}

/// Every character of the string becomes a member.
impl From<&str> for CodePointInput {
    fn from(s: &str) -> Self {
        CodePointInput::List(s.chars().map(u32::from).collect())
    }
}

impl From<&[u16]> for CodePointInput {
    fn from(units: &[u16]) -> Self {
        CodePointInput::Symbol(units.to_vec())
    }
}

impl From<RangeInclusive<u32>> for CodePointInput {
    fn from(range: RangeInclusive<u32>) -> Self {
        CodePointInput::Range(*range.start(), *range.end())
    }
}

impl From<RangeInclusive<char>> for CodePointInput {
    fn from(range: RangeInclusive<char>) -> Self {
        CodePointInput::Range(*range.start() as u32, *range.end() as u32)
    }
}

impl From<Vec<u32>> for CodePointInput {
    fn from(values: Vec<u32>) -> Self {
        CodePointInput::List(values)
    }
}

impl From<&[u32]> for CodePointInput {
    fn from(values: &[u32]) -> Self {
        CodePointInput::List(values.to_vec())
    }
}

impl From<IntervalSet> for CodePointInput {
    fn from(set: IntervalSet) -> Self {
        CodePointInput::Set(set)
    }
}

impl From<&IntervalSet> for CodePointInput {
    fn from(set: &IntervalSet) -> Self {
        CodePointInput::Set(set.clone())
    }
}

impl From<&CodePointSet> for CodePointInput {
    fn from(set: &CodePointSet) -> Self {
        CodePointInput::Set(set.as_interval_set().clone())
    }
}
