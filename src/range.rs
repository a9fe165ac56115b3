//! Conversion between character ranges and UTF-16 code-unit ranges.
//!
//! The application addresses text by character index (one index per Unicode scalar value),
//! while native text widgets address it by UTF-16 code unit. A character outside the Basic
//! Multilingual Plane takes two code units (a surrogate pair), everything else takes one.
//!
//! Both directions come in two forms:
//! - `checked_*` functions return a [`RangeError`] for anything that doesn't land on a boundary.
//! - The plain functions clamp to the nearest valid boundary and never fail.
//!
//! All functions are pure and scan from the start of the string, so they are O(N).

use std::{error, fmt, ops::Range};

/// A range of character (Unicode scalar value) indices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharRange {
    pub start: usize,
    pub end: usize,
}

/// A range of UTF-16 code-unit offsets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Utf16Range {
    pub start: usize,
    pub end: usize,
}

macro_rules! impl_range_type {
    ($name:ident) => {
        impl $name {
            pub const fn new(start: usize, end: usize) -> Self {
                Self { start, end }
            }

            /// An empty range at `at`.
            pub const fn caret(at: usize) -> Self {
                Self { start: at, end: at }
            }

            pub const fn is_empty(&self) -> bool {
                self.start >= self.end
            }

            pub const fn len(&self) -> usize {
                self.end.saturating_sub(self.start)
            }

            /// Returns the range with `start <= end`.
            pub fn ordered(self) -> Self {
                Self {
                    start: self.start.min(self.end),
                    end: self.start.max(self.end),
                }
            }

            pub fn to_range(self) -> Range<usize> {
                self.start..self.end
            }
        }

        impl From<Range<usize>> for $name {
            fn from(range: Range<usize>) -> Self {
                Self::new(range.start, range.end)
            }
        }

        impl From<$name> for Range<usize> {
            fn from(range: $name) -> Self {
                range.to_range()
            }
        }
    };
}

impl_range_type!(CharRange);
impl_range_type!(Utf16Range);

/// Returned by the checked conversions when a range doesn't map onto the string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeError {
    /// `start` is greater than `end`.
    Inverted { start: usize, end: usize },
    /// An endpoint lies past the end of the string. `len` is measured in the range's own units.
    OutOfBounds { index: usize, len: usize },
    /// A code-unit offset falls between the two halves of a surrogate pair.
    InsideSurrogatePair { offset: usize },
}

impl error::Error for RangeError {}
impl fmt::Display for RangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inverted { start, end } => write!(f, "Inverted range {start}..{end}"),
            Self::OutOfBounds { index, len } => write!(f, "Index {index} is out of bounds for length {len}"),
            Self::InsideSurrogatePair { offset } => write!(f, "UTF-16 offset {offset} splits a surrogate pair"),
        }
    }
}

/// Returns the number of characters in `text`.
pub fn char_count(text: &str) -> usize {
    text.chars().count()
}

/// Returns the number of UTF-16 code units in `text`.
pub fn utf16_len(text: &str) -> usize {
    text.chars().map(char::len_utf16).sum()
}

/// Clamps a character range to `0..=char_count(text)`, ordering it first.
pub fn clamp_char_range(text: &str, range: CharRange) -> CharRange {
    let count = char_count(text);
    let range = range.ordered();
    CharRange::new(range.start.min(count), range.end.min(count))
}

// Walks to the character boundaries of `range`. Returns the code-unit range reached and the
// number of characters walked; endpoints past the end of the string stop at the end.
fn walk_chars(text: &str, range: CharRange) -> (Utf16Range, usize) {
    let mut start = None;
    let mut units = 0usize;
    let mut chars = 0usize;

    for ch in text.chars() {
        if chars == range.start {
            start = Some(units);
        }
        if chars == range.end {
            break;
        }
        units += ch.len_utf16();
        chars += 1;
    }

    (Utf16Range::new(start.unwrap_or(units), units), chars)
}

/// Converts a character range into a UTF-16 code-unit range over the same string.
pub fn checked_to_code_unit_range(text: &str, range: CharRange) -> Result<Utf16Range, RangeError> {
    if range.start > range.end {
        return Err(RangeError::Inverted {
            start: range.start,
            end: range.end,
        });
    }

    let (units, chars) = walk_chars(text, range);
    if chars != range.end {
        return Err(RangeError::OutOfBounds { index: range.end, len: chars });
    }

    Ok(units)
}

/// Converts a character range into a UTF-16 code-unit range, clamping endpoints past the end.
pub fn to_code_unit_range(text: &str, range: CharRange) -> Utf16Range {
    walk_chars(text, range.ordered()).0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Boundary {
    Exact,
    Inside,
    PastEnd,
}

// Returns the index of the character containing (or starting at) `offset`, and how `offset` relates to it.
// For `PastEnd`, the index is the character count and the second value is the total code-unit length.
fn locate_offset(text: &str, offset: usize) -> (usize, usize, Boundary) {
    let mut units = 0usize;
    let mut chars = 0usize;

    for ch in text.chars() {
        let next = units + ch.len_utf16();
        if next > offset {
            let boundary = if units == offset { Boundary::Exact } else { Boundary::Inside };
            return (chars, units, boundary);
        }
        units = next;
        chars += 1;
    }

    let boundary = if units == offset { Boundary::Exact } else { Boundary::PastEnd };
    (chars, units, boundary)
}

/// Converts a UTF-16 code-unit range into a character range over the same string.
pub fn checked_to_char_range(text: &str, range: Utf16Range) -> Result<CharRange, RangeError> {
    if range.start > range.end {
        return Err(RangeError::Inverted {
            start: range.start,
            end: range.end,
        });
    }

    let resolve = |offset: usize| match locate_offset(text, offset) {
        (index, _, Boundary::Exact) => Ok(index),
        (_, _, Boundary::Inside) => Err(RangeError::InsideSurrogatePair { offset }),
        (_, len, Boundary::PastEnd) => Err(RangeError::OutOfBounds { index: offset, len }),
    };

    Ok(CharRange::new(resolve(range.start)?, resolve(range.end)?))
}

/// Converts a UTF-16 code-unit range into a character range, clamping to valid boundaries.
///
/// Offsets past the end clamp to the end. An offset inside a surrogate pair clamps outward:
/// the start moves to the beginning of the character and the end to the end of it.
/// An empty range inside a pair stays empty, at the beginning of the character.
pub fn to_char_range(text: &str, range: Utf16Range) -> CharRange {
    let range = range.ordered();

    let (start, _, _) = locate_offset(text, range.start);
    if range.is_empty() {
        return CharRange::caret(start);
    }

    let end = match locate_offset(text, range.end) {
        (index, _, Boundary::Inside) => index + 1,
        (index, _, _) => index,
    };

    CharRange::new(start, end)
}
