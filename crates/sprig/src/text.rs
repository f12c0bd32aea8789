//! Source location tracking for diagnostics.

use std::fmt;

/// A contiguous byte range in the input expression.
///
/// Every diagnostic carries one of these so hosts can underline the offending
/// text. [`TextSpan::ENTIRE`] is the sentinel for problems that cannot be
/// pinned to a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextSpan {
    /// Byte offset of the first character
    pub start: usize,
    /// Length in bytes
    pub len: usize,
}

impl TextSpan {
    /// Sentinel span covering the whole input.
    pub const ENTIRE: TextSpan = TextSpan {
        start: 0,
        len: usize::MAX,
    };

    /// Creates a span from a start offset and length.
    pub fn new(start: usize, len: usize) -> Self {
        Self { start, len }
    }

    /// Creates a span from inclusive start to exclusive end offsets.
    pub fn from_bounds(start: usize, end: usize) -> Self {
        debug_assert!(end >= start);
        Self {
            start,
            len: end - start,
        }
    }

    /// Byte offset one past the last character.
    pub fn end(&self) -> usize {
        self.start.saturating_add(self.len)
    }

    /// Whether this is the whole-input sentinel.
    pub fn is_entire(&self) -> bool {
        *self == Self::ENTIRE
    }
}

impl fmt::Display for TextSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_entire() {
            write!(f, "..")
        } else {
            write!(f, "{}..{}", self.start, self.end())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        let span = TextSpan::from_bounds(3, 8);
        assert_eq!(span.start, 3);
        assert_eq!(span.len, 5);
        assert_eq!(span.end(), 8);
    }

    #[test]
    fn test_entire_sentinel() {
        assert!(TextSpan::ENTIRE.is_entire());
        assert!(!TextSpan::new(0, 1).is_entire());
        assert_eq!(TextSpan::ENTIRE.to_string(), "..");
    }
}
