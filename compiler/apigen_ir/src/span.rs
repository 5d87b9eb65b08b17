//! Source location spans.
//!
//! Spans point back into whatever source the front-end elaborated; the
//! model builder only carries them through to diagnostics.

use std::fmt;

/// Byte range of a declaration in its source file.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct Span {
    pub start: u32,
    /// Exclusive.
    pub end: u32,
}

impl Span {
    /// Dummy span for synthesized declarations.
    pub const DUMMY: Span = Span { start: 0, end: 0 };

    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        debug_assert!(start <= end, "span ends before it starts");
        Span { start, end }
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_shows_the_byte_range() {
        assert_eq!(format!("{:?}", Span::new(10, 20)), "10..20");
        assert_eq!(Span::DUMMY, Span::default());
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "span ends before it starts")]
    fn inverted_spans_are_rejected() {
        let _ = Span::new(20, 10);
    }
}
