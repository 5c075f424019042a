//! UTF-16 surrogate pair decomposition of astral code point sets.
//!
//! An astral code point (above U+FFFF) is written in UTF-16 as a high
//! surrogate followed by a low surrogate. A contiguous astral range therefore
//! maps onto a small number of rectangles in (high, low) space:
//!
//! ```text
//!            low: DC00 .............. DFFF
//! startHigh        [startLow ........ DFFF]   head
//! ...              [DC00 ............ DFFF]   middle rows
//! stopHigh         [DC00 ..... stopLow]       tail
//! ```
//!
//! Each rectangle is a `SurrogateMapping`. After generation the mappings are
//! merged greedily, first by identical high ranges (consecutive entries only),
//! then by identical low ranges (any pair). The result is deterministic but
//! only locally optimal.

use tracing::trace;

use crate::interval_set::{IntervalSet, MAX_CODE_POINT};
use crate::CharClassError;

pub const HIGH_SURROGATE_MIN: u32 = 0xD800;
pub const HIGH_SURROGATE_MAX: u32 = 0xDBFF;
pub const LOW_SURROGATE_MIN: u32 = 0xDC00;
pub const LOW_SURROGATE_MAX: u32 = 0xDFFF;

/// First code point outside the Basic Multilingual Plane.
pub const ASTRAL_MIN: u32 = 0x10000;

#[inline]
fn high_surrogate(cp: u32) -> u32 {
    (cp - ASTRAL_MIN) / 0x400 + HIGH_SURROGATE_MIN
}

#[inline]
fn low_surrogate(cp: u32) -> u32 {
    (cp - ASTRAL_MIN) % 0x400 + LOW_SURROGATE_MIN
}

/// Split an astral code point into its `(high, low)` surrogate units.
pub fn surrogate_pair(cp: u32) -> Result<(u16, u16), CharClassError> {
    if !(ASTRAL_MIN..=MAX_CODE_POINT).contains(&cp) {
        return Err(CharClassError::CodePointRange(cp));
    }
    Ok((high_surrogate(cp) as u16, low_surrogate(cp) as u16))
}

/// Combine a high and a low surrogate unit into the code point they encode.
pub fn combine_surrogates(high: u16, low: u16) -> Option<u32> {
    let (high, low) = (u32::from(high), u32::from(low));
    if !(HIGH_SURROGATE_MIN..=HIGH_SURROGATE_MAX).contains(&high)
        || !(LOW_SURROGATE_MIN..=LOW_SURROGATE_MAX).contains(&low)
    {
        return None;
    }
    Some((high - HIGH_SURROGATE_MIN) * 0x400 + (low - LOW_SURROGATE_MIN) + ASTRAL_MIN)
}

/// Every high surrogate in `high` followed by every low surrogate in `low`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurrogateMapping {
    pub high: IntervalSet,
    pub low: IntervalSet,
}

impl SurrogateMapping {
    /// Rectangle over inclusive high and low bounds, already known to be valid.
    fn rect(high_start: u32, high_stop: u32, low_start: u32, low_stop: u32) -> Self {
        let mut high = IntervalSet::new();
        high.push_span(high_start, high_stop + 1);
        let mut low = IntervalSet::new();
        low.push_span(low_start, low_stop + 1);
        Self { high, low }
    }
}

/// Compute the optimized surrogate mappings covering an astral-only set.
///
/// Fails with `CodePointRange` if the set holds any code point below U+10000.
pub fn surrogate_mappings(astral: &IntervalSet) -> Result<Vec<SurrogateMapping>, CharClassError> {
    if let Some(min) = astral.min() {
        if min < ASTRAL_MIN {
            return Err(CharClassError::CodePointRange(min));
        }
    }
    Ok(optimized_mappings(astral))
}

/// Generate and merge mappings. The caller guarantees `astral` is astral-only.
pub(crate) fn optimized_mappings(astral: &IntervalSet) -> Vec<SurrogateMapping> {
    let raw = raw_mappings(astral);
    let raw_count = raw.len();
    let by_high = merge_by_high(raw);
    let by_high_count = by_high.len();
    let merged = merge_by_low(by_high);
    trace!(
        raw = raw_count,
        after_high_merge = by_high_count,
        after_low_merge = merged.len(),
        "optimized surrogate mappings"
    );
    merged
}

/// Up to three rectangles per astral span, in span order.
fn raw_mappings(astral: &IntervalSet) -> Vec<SurrogateMapping> {
    let mut out = Vec::new();
    for span in astral.spans() {
        let (start, stop) = (span.start, span.last());
        let start_high = high_surrogate(start);
        let start_low = low_surrogate(start);
        let stop_high = high_surrogate(stop);
        let stop_low = low_surrogate(stop);

        let starts_at_row_start = start_low == LOW_SURROGATE_MIN;
        let ends_at_row_end = stop_low == LOW_SURROGATE_MAX;
        let mut complete = false;

        // Head: a single row, or whole rows only, collapse into one rectangle.
        if start_high == stop_high || (starts_at_row_start && ends_at_row_end) {
            out.push(SurrogateMapping::rect(start_high, stop_high, start_low, stop_low));
            complete = true;
        } else {
            out.push(SurrogateMapping::rect(
                start_high,
                start_high,
                start_low,
                LOW_SURROGATE_MAX,
            ));
        }

        // Middle: full rows strictly between head and tail.
        if !complete && start_high + 1 < stop_high {
            if ends_at_row_end {
                // Tail row is full as well; fold it into the middle.
                out.push(SurrogateMapping::rect(
                    start_high + 1,
                    stop_high,
                    LOW_SURROGATE_MIN,
                    stop_low,
                ));
                complete = true;
            } else {
                out.push(SurrogateMapping::rect(
                    start_high + 1,
                    stop_high - 1,
                    LOW_SURROGATE_MIN,
                    LOW_SURROGATE_MAX,
                ));
            }
        }

        if !complete {
            out.push(SurrogateMapping::rect(stop_high, stop_high, LOW_SURROGATE_MIN, stop_low));
        }
    }
    out
}

/// Phase A: fold runs of consecutive mappings that share the same high range.
fn merge_by_high(mappings: Vec<SurrogateMapping>) -> Vec<SurrogateMapping> {
    let mut result: Vec<SurrogateMapping> = Vec::with_capacity(mappings.len());
    for mapping in mappings {
        match result.last_mut() {
            Some(prev) if prev.high == mapping.high => {
                prev.low.union_with(&mapping.low);
            }
            _ => result.push(mapping),
        }
    }
    result
}

/// Phase B: for each mapping in list order, absorb every later mapping with an
/// identical low range.
fn merge_by_low(mut mappings: Vec<SurrogateMapping>) -> Vec<SurrogateMapping> {
    let mut index = 0;
    while index < mappings.len() {
        let mut inner = index + 1;
        while inner < mappings.len() {
            if mappings[inner].low == mappings[index].low {
                let other = mappings.remove(inner);
                mappings[index].high.union_with(&other.high);
            } else {
                inner += 1;
            }
        }
        index += 1;
    }
    mappings
}
