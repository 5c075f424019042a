//! Character class generation.
//!
//! Turns an `IntervalSet` into regexp source that matches exactly one member
//! of the set. Two targets are supported:
//!
//! - UTF-16 engines (default): astral members become alternations of
//!   `<high-class><low-class>` pairs, and bare surrogate members are guarded
//!   so they do not match half of a real surrogate pair.
//! - Unicode mode: every member is escaped directly as a code point, using
//!   `\u{...}` above U+FFFF.
//!
//! The lone low surrogate guard is `(?:[^\uD800-\uDBFF]|^)`. Without
//! lookbehind this is an approximation: it consumes the preceding unit, and a
//! low surrogate that is the second half of a pair can still match when the
//! pattern is applied at an interior position.

mod escape;

#[cfg(test)]
pub(crate) mod testing;

use tracing::debug;

pub use escape::escape_code_point;
use escape::push_escaped;

use crate::interval_set::IntervalSet;
use crate::partition::{split_at_bmp, PartitionResult};
use crate::surrogates::{optimized_mappings, SurrogateMapping};

/// Pattern returned for an empty set: an empty class, which never matches.
pub const EMPTY_CLASS: &str = "[]";

/// Follows a lone high surrogate class: no low surrogate may come next.
const LONE_HIGH_GUARD: &str = r"(?![\uDC00-\uDFFF])";

/// Precedes a lone low surrogate class: start of input or a non-high unit.
const LONE_LOW_GUARD: &str = r"(?:[^\uD800-\uDBFF]|^)";

/// Options controlling pattern generation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RenderOptions {
    /// Treat surrogate members as ordinary BMP class members, with no guards.
    pub bmp_only: bool,
    /// Escape code points directly (`\u{...}`) instead of splitting into
    /// surrogate pairs.
    pub unicode_mode: bool,
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bmp_only(mut self, bmp_only: bool) -> Self {
        self.bmp_only = bmp_only;
        self
    }

    pub fn with_unicode_mode(mut self, unicode_mode: bool) -> Self {
        self.unicode_mode = unicode_mode;
        self
    }

    /// Options for a regexp compiled with `flags`: unicode mode iff `u` is
    /// among them.
    pub fn from_flags(flags: &str) -> Self {
        Self::default().with_unicode_mode(flags.contains('u'))
    }
}

/// Render the spans of `set` as one class, or a bare token for a singleton.
pub fn render_ranges(set: &IntervalSet, unicode_mode: bool) -> String {
    let mut out = String::new();
    if set.is_singleton() {
        push_escaped(&mut out, set.spans()[0].start, unicode_mode);
        return out;
    }
    out.push('[');
    for span in set.spans() {
        let (start, stop) = (span.start, span.last());
        push_escaped(&mut out, start, unicode_mode);
        if stop == start + 1 {
            push_escaped(&mut out, stop, unicode_mode);
        } else if stop > start {
            out.push('-');
            push_escaped(&mut out, stop, unicode_mode);
        }
    }
    out.push(']');
    out
}

/// Render surrogate mappings as `<high><low>|<high><low>|...`.
fn render_mappings(mappings: &[SurrogateMapping]) -> String {
    mappings
        .iter()
        .map(|m| {
            let mut term = render_ranges(&m.high, false);
            term.push_str(&render_ranges(&m.low, false));
            term
        })
        .collect::<Vec<_>>()
        .join("|")
}

/// Pattern pieces for a UTF-16 engine, in output order.
fn utf16_pieces(set: &IntervalSet, bmp_only: bool) -> Vec<String> {
    let PartitionResult {
        mut lone_high,
        mut lone_low,
        mut bmp,
        astral,
    } = split_at_bmp(set);
    let mappings = optimized_mappings(&astral);

    if bmp_only {
        bmp.union_with(&lone_high).union_with(&lone_low);
        lone_high = IntervalSet::new();
        lone_low = IntervalSet::new();
    }

    debug!(
        bmp_spans = bmp.spans().len(),
        surrogate_mappings = mappings.len(),
        lone_high_spans = lone_high.spans().len(),
        lone_low_spans = lone_low.spans().len(),
        bmp_only,
        "rendering utf-16 character class"
    );

    let mut pieces = Vec::with_capacity(4);
    if !bmp.is_empty() {
        pieces.push(render_ranges(&bmp, false));
    }
    if !mappings.is_empty() {
        pieces.push(render_mappings(&mappings));
    }
    if !lone_high.is_empty() {
        let mut piece = render_ranges(&lone_high, false);
        piece.push_str(LONE_HIGH_GUARD);
        pieces.push(piece);
    }
    if !lone_low.is_empty() {
        let mut piece = String::from(LONE_LOW_GUARD);
        piece.push_str(&render_ranges(&lone_low, false));
        pieces.push(piece);
    }
    pieces
}

/// Render `set` as a pattern matching exactly one of its members.
///
/// ```
/// use unicode_charclass::{render_full, IntervalSet, RenderOptions};
///
/// let mut set = IntervalSet::new();
/// set.add_range(0x61, 0x63).unwrap();
/// assert_eq!(render_full(&set, RenderOptions::default()), "[a-c]");
/// ```
pub fn render_full(set: &IntervalSet, options: RenderOptions) -> String {
    let rendered = if options.unicode_mode {
        debug!(spans = set.spans().len(), "rendering unicode character class");
        if set.is_empty() {
            String::new()
        } else {
            render_ranges(set, true)
        }
    } else {
        utf16_pieces(set, options.bmp_only).join("|")
    };
    if rendered.is_empty() {
        return EMPTY_CLASS.to_string();
    }
    shorten_nul_escapes(&rendered)
}

/// Replace `\x00` with `\0` wherever no decimal digit follows.
fn shorten_nul_escapes(pattern: &str) -> String {
    let bytes = pattern.as_bytes();
    let mut out = String::with_capacity(pattern.len());
    let mut copied = 0;
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'\\' {
            i += 1;
            continue;
        }
        if bytes[i + 1..].starts_with(b"x00") && !bytes.get(i + 4).is_some_and(u8::is_ascii_digit) {
            out.push_str(&pattern[copied..i]);
            out.push_str("\\0");
            i += 4;
            copied = i;
        } else {
            // Skip the escaped character so `\\x00` stays untouched.
            i += 2;
        }
    }
    out.push_str(&pattern[copied..]);
    out
}
