//! Split a code point set by how each member is written in UTF-16.

use crate::interval_set::{IntervalSet, MAX_CODE_POINT};
use crate::surrogates::{ASTRAL_MIN, HIGH_SURROGATE_MIN, LOW_SURROGATE_MAX, LOW_SURROGATE_MIN};

/// The four disjoint parts of a set, by UTF-16 representability.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartitionResult {
    /// Members in U+D800..=U+DBFF.
    pub lone_high: IntervalSet,
    /// Members in U+DC00..=U+DFFF.
    pub lone_low: IntervalSet,
    /// Non-surrogate members up to U+FFFF.
    pub bmp: IntervalSet,
    /// Members above U+FFFF.
    pub astral: IntervalSet,
}

#[derive(Clone, Copy)]
enum Part {
    Bmp,
    LoneHigh,
    LoneLow,
    Astral,
}

/// Half-open regions in ascending order; together they cover the code space.
const REGIONS: [(u32, u32, Part); 5] = [
    (0, HIGH_SURROGATE_MIN, Part::Bmp),
    (HIGH_SURROGATE_MIN, LOW_SURROGATE_MIN, Part::LoneHigh),
    (LOW_SURROGATE_MIN, LOW_SURROGATE_MAX + 1, Part::LoneLow),
    (LOW_SURROGATE_MAX + 1, ASTRAL_MIN, Part::Bmp),
    (ASTRAL_MIN, MAX_CODE_POINT + 1, Part::Astral),
];

/// Classify every span of `set`, cutting spans that straddle region borders.
pub fn split_at_bmp(set: &IntervalSet) -> PartitionResult {
    let mut parts = PartitionResult::default();
    for span in set.spans() {
        for &(region_start, region_end, part) in &REGIONS {
            let start = span.start.max(region_start);
            let end = span.end.min(region_end);
            if start >= end {
                continue;
            }
            let target = match part {
                Part::Bmp => &mut parts.bmp,
                Part::LoneHigh => &mut parts.lone_high,
                Part::LoneLow => &mut parts.lone_low,
                Part::Astral => &mut parts.astral,
            };
            target.push_span(start, end);
        }
    }
    parts
}
