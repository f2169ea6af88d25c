//! Source locations.
//!
//! Every parse-tree node and every canonical AST node carries a [`Span`].
//! Synthesized nodes reuse the span of the construct they were lowered from.

use std::fmt;

/// Identifies the source file a span belongs to.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default)]
#[repr(transparent)]
pub struct FileId(u32);

impl FileId {
    #[inline]
    pub const fn new(raw: u32) -> Self {
        FileId(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// Byte range inside one source file.
///
/// Layout: 12 bytes (file, start, end). `end` is exclusive.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct Span {
    pub file: FileId,
    pub start: u32,
    pub end: u32,
}

impl Span {
    /// Span for nodes with no source counterpart.
    pub const DUMMY: Span = Span {
        file: FileId(0),
        start: 0,
        end: 0,
    };

    /// Create a span in the default file.
    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Span {
            file: FileId(0),
            start,
            end,
        }
    }

    /// Create a span in a specific file.
    #[inline]
    pub const fn in_file(file: FileId, start: u32, end: u32) -> Self {
        Span { file, start, end }
    }

    /// A zero-length span in `file`, used where a construct is absent.
    #[inline]
    pub const fn none(file: FileId) -> Self {
        Span {
            file,
            start: 0,
            end: 0,
        }
    }

    #[inline]
    pub const fn len(&self) -> u32 {
        self.end - self.start
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// True for spans that point at no source text.
    #[inline]
    pub const fn is_dummy(&self) -> bool {
        self.start == 0 && self.end == 0
    }

    /// Smallest span covering both. Both must be in the same file.
    #[inline]
    #[must_use]
    pub fn merge(self, other: Span) -> Span {
        debug_assert_eq!(self.file, other.file, "merging spans across files");
        Span {
            file: self.file,
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    #[inline]
    pub fn contains_span(&self, other: Span) -> bool {
        self.file == other.file && self.start <= other.start && other.end <= self.end
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}..{}", self.file.0, self.start, self.end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}
