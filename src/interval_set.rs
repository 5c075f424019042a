//! Sorted, disjoint, half-open code point ranges.
//!
//! An `IntervalSet` stores its members as a list of `Span`s `[start, end)`.
//! Between operations the list always satisfies:
//! - spans are sorted and strictly increasing: `s0 < e0 < s1 < e1 < ...`
//! - no two spans touch or overlap (adjacent spans are merged)
//! - no span is empty
//!
//! All mutating operations work in place and hand back `&mut Self` so calls
//! can be chained.

use std::fmt;

use smallvec::SmallVec;

use crate::CharClassError;

/// Largest valid Unicode code point.
pub const MAX_CODE_POINT: u32 = 0x10FFFF;

/// A half-open range of code points `[start, end)`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    #[inline]
    pub fn new(start: u32, end: u32) -> Self {
        debug_assert!(start < end, "empty span {start:#X}..{end:#X}");
        Self { start, end }
    }

    /// Last member of the span (inclusive upper bound).
    #[inline]
    pub fn last(&self) -> u32 {
        self.end - 1
    }

    /// Number of code points covered.
    #[inline]
    pub fn len(&self) -> u32 {
        self.end - self.start
    }

    #[inline]
    pub fn contains(&self, cp: u32) -> bool {
        self.start <= cp && cp < self.end
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.len() == 1 {
            write!(f, "{:#X}", self.start)
        } else {
            write!(f, "{:#X}..={:#X}", self.start, self.last())
        }
    }
}

/// Check that a single code point lies in `[0, 0x10FFFF]`.
pub(crate) fn check_code_point(cp: u32) -> Result<(), CharClassError> {
    if cp > MAX_CODE_POINT {
        return Err(CharClassError::CodePointRange(cp));
    }
    Ok(())
}

/// Check an inclusive `[start, stop]` range: ordered first, then in bounds.
pub(crate) fn check_range(start: u32, stop: u32) -> Result<(), CharClassError> {
    if stop < start {
        return Err(CharClassError::RangeOrder { start, stop });
    }
    check_code_point(start)?;
    check_code_point(stop)
}

/// A set of code points stored as sorted, disjoint, half-open spans.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct IntervalSet {
    spans: SmallVec<[Span; 4]>,
}

impl IntervalSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a set holding the inclusive range `[start, stop]`.
    pub fn from_range(start: u32, stop: u32) -> Result<Self, CharClassError> {
        check_range(start, stop)?;
        let mut set = Self::new();
        set.spans.push(Span::new(start, stop + 1));
        Ok(set)
    }

    /// Build a set from an arbitrary list of code points.
    ///
    /// The input may be unsorted and contain duplicates; consecutive values
    /// collapse into a single span.
    pub fn from_code_points<I>(code_points: I) -> Result<Self, CharClassError>
    where
        I: IntoIterator<Item = u32>,
    {
        let mut values: Vec<u32> = code_points.into_iter().collect();
        for &cp in &values {
            check_code_point(cp)?;
        }
        values.sort_unstable();
        values.dedup();
        Ok(Self::from_sorted_unique(&values))
    }

    /// Collapse an ascending, duplicate-free list into spans.
    fn from_sorted_unique(values: &[u32]) -> Self {
        let mut set = Self::new();
        for &cp in values {
            match set.spans.last_mut() {
                Some(last) if last.end == cp => last.end = cp + 1,
                _ => set.spans.push(Span::new(cp, cp + 1)),
            }
        }
        set
    }

    /// The stored spans, ascending.
    #[inline]
    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    /// The flat boundary sequence `[s0, e0, s1, e1, ...]`.
    pub fn boundaries(&self) -> Vec<u32> {
        self.spans.iter().flat_map(|s| [s.start, s.end]).collect()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// True iff the set holds exactly one code point.
    #[inline]
    pub fn is_singleton(&self) -> bool {
        self.spans.len() == 1 && self.spans[0].len() == 1
    }

    /// Number of code points in the set.
    pub fn len(&self) -> usize {
        self.spans.iter().map(|s| s.len() as usize).sum()
    }

    /// Smallest member, if any.
    pub fn min(&self) -> Option<u32> {
        self.spans.first().map(|s| s.start)
    }

    /// Largest member, if any.
    pub fn max(&self) -> Option<u32> {
        self.spans.last().map(Span::last)
    }

    /// Iterate over every member in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.spans.iter().flat_map(|s| s.start..s.end)
    }

    /// Expand every span into individual values, ascending, no duplicates.
    pub fn to_sorted_vec(&self) -> Vec<u32> {
        self.iter().collect()
    }

    /// True iff `cp` falls in some stored span.
    pub fn contains(&self, cp: u32) -> bool {
        let (Some(first), Some(last)) = (self.spans.first(), self.spans.last()) else {
            return false;
        };
        // Outside the overall bounds: skip the search entirely.
        if cp < first.start || cp >= last.end {
            return false;
        }
        let idx = self.spans.partition_point(|s| s.end <= cp);
        idx < self.spans.len() && self.spans[idx].start <= cp
    }

    /// Insert a single code point. Adding a member already present is a no-op.
    pub fn add(&mut self, cp: u32) -> Result<&mut Self, CharClassError> {
        check_code_point(cp)?;
        self.insert_span(cp, cp + 1);
        Ok(self)
    }

    /// Union the inclusive range `[start, stop]` into the set.
    pub fn add_range(&mut self, start: u32, stop: u32) -> Result<&mut Self, CharClassError> {
        check_range(start, stop)?;
        self.insert_span(start, stop + 1);
        Ok(self)
    }

    /// Delete a single code point. Removing an absent point is a no-op.
    pub fn remove(&mut self, cp: u32) -> Result<&mut Self, CharClassError> {
        check_code_point(cp)?;
        self.delete_span(cp, cp + 1);
        Ok(self)
    }

    /// Remove the inclusive range `[start, stop]` from every overlapping span.
    pub fn remove_range(&mut self, start: u32, stop: u32) -> Result<&mut Self, CharClassError> {
        check_range(start, stop)?;
        self.delete_span(start, stop + 1);
        Ok(self)
    }

    /// Add every member of `other`.
    pub fn union_with(&mut self, other: &IntervalSet) -> &mut Self {
        for span in &other.spans {
            self.insert_span(span.start, span.end);
        }
        self
    }

    /// Remove every member of `other`.
    pub fn subtract(&mut self, other: &IntervalSet) -> &mut Self {
        for span in &other.spans {
            self.delete_span(span.start, span.end);
        }
        self
    }

    /// The members of `values` that are also in this set, in minimal span form.
    pub fn intersect(&self, values: &[u32]) -> IntervalSet {
        let mut members: Vec<u32> = values.iter().copied().filter(|&cp| self.contains(cp)).collect();
        members.sort_unstable();
        members.dedup();
        Self::from_sorted_unique(&members)
    }

    /// Code points present in both sets.
    pub fn intersection(&self, other: &IntervalSet) -> IntervalSet {
        let mut out = IntervalSet::new();
        let (mut i, mut j) = (0, 0);
        while i < self.spans.len() && j < other.spans.len() {
            let (a, b) = (self.spans[i], other.spans[j]);
            let start = a.start.max(b.start);
            let end = a.end.min(b.end);
            if start < end {
                out.push_span(start, end);
            }
            if a.end < b.end {
                i += 1;
            } else {
                j += 1;
            }
        }
        out
    }

    /// Append a span that lies after every stored span.
    ///
    /// Touching the current last span extends it instead.
    pub(crate) fn push_span(&mut self, start: u32, end: u32) {
        debug_assert!(start < end);
        match self.spans.last_mut() {
            Some(last) if last.end == start => last.end = end,
            Some(last) => {
                debug_assert!(last.end < start, "push_span out of order");
                self.spans.push(Span::new(start, end));
            }
            None => self.spans.push(Span::new(start, end)),
        }
    }

    /// Merge `[start, end)` into the span list.
    fn insert_span(&mut self, start: u32, end: u32) {
        // First span that touches or overlaps the new one from the left...
        let lo = self.spans.partition_point(|s| s.end < start);
        // ...and the first span lying strictly after it without touching.
        let hi = self.spans.partition_point(|s| s.start <= end);
        if lo == hi {
            self.spans.insert(lo, Span::new(start, end));
            return;
        }
        let merged = Span::new(
            start.min(self.spans[lo].start),
            end.max(self.spans[hi - 1].end),
        );
        self.spans.drain(lo..hi);
        self.spans.insert(lo, merged);
    }

    /// Cut `[start, end)` out of the span list, splitting where needed.
    fn delete_span(&mut self, start: u32, end: u32) {
        let lo = self.spans.partition_point(|s| s.end <= start);
        let hi = self.spans.partition_point(|s| s.start < end);
        if lo >= hi {
            return;
        }
        let first = self.spans[lo];
        let last = self.spans[hi - 1];
        let mut keep: SmallVec<[Span; 2]> = SmallVec::new();
        if first.start < start {
            keep.push(Span::new(first.start, start));
        }
        if last.end > end {
            keep.push(Span::new(end, last.end));
        }
        self.spans.drain(lo..hi);
        self.spans.insert_many(lo, keep);
    }
}

impl fmt::Debug for IntervalSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.spans.iter()).finish()
    }
}

impl FromIterator<char> for IntervalSet {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        let mut values: Vec<u32> = iter.into_iter().map(u32::from).collect();
        values.sort_unstable();
        values.dedup();
        Self::from_sorted_unique(&values)
    }
}
