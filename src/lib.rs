//! unicode-charclass: Unicode code point sets compiled into regexp character classes
//!
//! A `CodePointSet` holds an arbitrary subset of U+0000..=U+10FFFF as sorted,
//! disjoint spans and renders it as regexp source for engines that work on
//! UTF-16 code units. Astral members are re-encoded as surrogate pair
//! alternations, and bare surrogate members are guarded so they never match
//! half of a real pair. A unicode mode renders code points directly instead.
//!
//! ```
//! use unicode_charclass::{CodePointSet, RenderOptions};
//!
//! let mut set = CodePointSet::new();
//! set.add('a'..='c').unwrap().add(0x1F600u32).unwrap();
//! assert_eq!(set.render(RenderOptions::default()), "[a-c]|\\uD83D\\uDE00");
//! assert_eq!(set.render(RenderOptions::from_flags("u")), "[a-c\\u{1F600}]");
//! ```

mod input;
mod interval_set;
mod partition;
mod render;
mod shared;
mod surrogates;

use std::fmt;

use interval_set::check_code_point;

pub use input::{symbol_to_code_point, CodePointInput};
pub use interval_set::{IntervalSet, Span, MAX_CODE_POINT};
pub use partition::{split_at_bmp, PartitionResult};
pub use render::{escape_code_point, render_full, render_ranges, RenderOptions, EMPTY_CLASS};
pub use shared::SharedCodePointSet;
pub use surrogates::{
    combine_surrogates, surrogate_mappings, surrogate_pair, SurrogateMapping, ASTRAL_MIN,
    HIGH_SURROGATE_MAX, HIGH_SURROGATE_MIN, LOW_SURROGATE_MAX, LOW_SURROGATE_MIN,
};

/// Errors raised by set operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CharClassError {
    /// A range whose `stop` lies before its `start`.
    RangeOrder { start: u32, stop: u32 },
    /// A code point above U+10FFFF.
    CodePointRange(u32),
    /// A symbol that is not one unit or one surrogate pair.
    InvalidSymbol(Vec<u16>),
}

impl fmt::Display for CharClassError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CharClassError::RangeOrder { start, stop } => write!(
                f,
                "range stop U+{:04X} must not be lower than start U+{:04X}",
                stop, start
            ),
            CharClassError::CodePointRange(cp) => write!(
                f,
                "invalid code point {:#X}: code points range from U+000000 to U+10FFFF",
                cp
            ),
            CharClassError::InvalidSymbol(units) => {
                write!(f, "invalid symbol: expected one unit or a surrogate pair, got [")?;
                for (i, unit) in units.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{:#06X}", unit)?;
                }
                write!(f, "]")
            }
        }
    }
}

impl std::error::Error for CharClassError {}

/// A regexp engine that can compile rendered patterns.
///
/// The crate does not ship an engine; implement this for whatever engine
/// consumes the generated source.
pub trait PatternCompiler {
    type Regex;
    type Error;

    fn compile(&self, pattern: &str, flags: &str) -> Result<Self::Regex, Self::Error>;
}

/// A set of Unicode code points that renders as a regexp character class.
///
/// `CodePointSet` owns its spans exclusively; `clone` is a deep copy. It is
/// `Send + Sync` but not internally synchronized. Use `SharedCodePointSet`
/// to mutate one set from several threads.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct CodePointSet {
    data: IntervalSet,
}

impl CodePointSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a set from a list of code points
    pub fn from_code_points<I>(code_points: I) -> Result<Self, CharClassError>
    where
        I: IntoIterator<Item = u32>,
    {
        Ok(Self {
            data: IntervalSet::from_code_points(code_points)?,
        })
    }

    /// The underlying spans.
    pub fn as_interval_set(&self) -> &IntervalSet {
        &self.data
    }

    /// Add a code point, char, symbol, range, list or set.
    pub fn add(&mut self, value: impl Into<CodePointInput>) -> Result<&mut Self, CharClassError> {
        let resolved = value.into().resolve()?;
        self.data.union_with(&resolved);
        Ok(self)
    }

    /// Remove a code point, char, symbol, range, list or set.
    pub fn remove(&mut self, value: impl Into<CodePointInput>) -> Result<&mut Self, CharClassError> {
        let resolved = value.into().resolve()?;
        self.data.subtract(&resolved);
        Ok(self)
    }

    /// Add the inclusive range `[start, stop]`.
    pub fn add_range(&mut self, start: u32, stop: u32) -> Result<&mut Self, CharClassError> {
        self.data.add_range(start, stop)?;
        Ok(self)
    }

    /// Remove the inclusive range `[start, stop]`.
    pub fn remove_range(&mut self, start: u32, stop: u32) -> Result<&mut Self, CharClassError> {
        self.data.remove_range(start, stop)?;
        Ok(self)
    }

    /// Add every member of `other`.
    pub fn union_with(&mut self, other: &CodePointSet) -> &mut Self {
        self.data.union_with(&other.data);
        self
    }

    /// Remove every member of `other`.
    pub fn subtract(&mut self, other: &CodePointSet) -> &mut Self {
        self.data.subtract(&other.data);
        self
    }

    /// Keep only the members that also appear in `values`.
    ///
    /// Every value is validated first, so a list holding a code point above
    /// U+10FFFF fails with `CodePointRange` and leaves the set unchanged.
    pub fn intersect(&mut self, values: impl Into<CodePointInput>) -> Result<&mut Self, CharClassError> {
        self.data = match values.into() {
            CodePointInput::List(list) => {
                for &cp in &list {
                    check_code_point(cp)?;
                }
                self.data.intersect(&list)
            }
            other => self.data.intersection(&other.resolve()?),
        };
        Ok(self)
    }

    pub fn contains(&self, cp: u32) -> bool {
        self.data.contains(cp)
    }

    pub fn contains_char(&self, c: char) -> bool {
        self.data.contains(c as u32)
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Number of code points in the set
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Iterate over the members in ascending order
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.data.iter()
    }

    /// All members, ascending, without duplicates
    pub fn to_sorted_vec(&self) -> Vec<u32> {
        self.data.to_sorted_vec()
    }

    /// Half-open spans, ascending and non-adjacent.
    pub fn ranges(&self) -> &[Span] {
        self.data.spans()
    }

    /// Flat `[start0, end0, start1, end1, ...]` with exclusive ends.
    pub fn boundaries(&self) -> Vec<u32> {
        self.data.boundaries()
    }

    /// Render the set as regexp source.
    pub fn render(&self, options: RenderOptions) -> String {
        render_full(&self.data, options)
    }

    /// Render for `flags` and hand the pattern to `compiler`.
    ///
    /// Unicode mode is used iff `flags` contains `u`.
    pub fn compile<C: PatternCompiler>(&self, compiler: &C, flags: &str) -> Result<C::Regex, C::Error> {
        let pattern = self.render(RenderOptions::from_flags(flags));
        compiler.compile(&pattern, flags)
    }
}

impl fmt::Debug for CodePointSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CodePointSet").field(&self.data).finish()
    }
}

/// Renders with default options.
impl fmt::Display for CodePointSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(RenderOptions::default()))
    }
}

impl FromIterator<char> for CodePointSet {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        Self {
            data: iter.into_iter().collect(),
        }
    }
}

impl Extend<char> for CodePointSet {
    fn extend<I: IntoIterator<Item = char>>(&mut self, iter: I) {
        let added: IntervalSet = iter.into_iter().collect();
        self.data.union_with(&added);
    }
}

impl From<IntervalSet> for CodePointSet {
    fn from(data: IntervalSet) -> Self {
        Self { data }
    }
}
