//! Offset-tracked representation of a recognized marker.

use std::fmt;
use std::ops::Range;

/// Stable handle to an element registered in a [`Document`](crate::Document).
///
/// Ids are assigned in registration order and never change, even though the
/// element's offsets do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(pub(crate) usize);

/// Kind-specific payload of an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementKind {
    /// Markdown heading: `## Text`.
    Title {
        /// Number of leading `#` characters.
        level: usize,
        /// Heading text without the leading hashes.
        text: String,
    },
    /// `<!-- slide-column N -->` directive.
    Column {
        /// Column width in percent.
        width: u32,
    },
    /// `<!-- slide-container -->` directive.
    Container,
    /// `<!-- slide-front-matter ... -->` directive.
    FrontMatter {
        /// Raw front matter, moved in front of the enclosing slide's title.
        content: String,
    },
}

impl ElementKind {
    /// Short lowercase name used in diagnostics.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Title { .. } => "title",
            Self::Column { .. } => "column",
            Self::Container => "container",
            Self::FrontMatter { .. } => "front matter",
        }
    }

    #[must_use]
    pub fn is_title(&self) -> bool {
        matches!(self, Self::Title { .. })
    }

    /// Whether the element opens a layout block or implicitly closes one.
    #[must_use]
    pub fn affects_grid(&self) -> bool {
        matches!(
            self,
            Self::Title { .. } | Self::Column { .. } | Self::Container
        )
    }
}

/// A marker instance with live offsets into the document buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    kind: ElementKind,
    start: usize,
    end: usize,
    raw: String,
    line: usize,
}

impl Element {
    /// Create an element covering `start..end` of the buffer.
    ///
    /// `line` is the 1-indexed line of the match in the original text.
    #[must_use]
    pub fn new(
        kind: ElementKind,
        start: usize,
        end: usize,
        raw: impl Into<String>,
        line: usize,
    ) -> Self {
        Self {
            kind,
            start,
            end,
            raw: raw.into(),
            line,
        }
    }

    #[must_use]
    pub fn kind(&self) -> &ElementKind {
        &self.kind
    }

    /// Current start offset (inclusive).
    #[must_use]
    pub fn start(&self) -> usize {
        self.start
    }

    /// Current end offset (exclusive).
    #[must_use]
    pub fn end(&self) -> usize {
        self.end
    }

    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// The originally matched text. Never changes after parsing.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }

    /// Whether the two half-open ranges intersect.
    pub(crate) fn overlaps(&self, other: &Element) -> bool {
        (self.start >= other.start && self.start < other.end)
            || (self.end > other.start && self.end <= other.end)
            || (self.start < other.start && self.end > other.end)
    }

    /// Move both offsets after an edit that removed `removed` bytes and
    /// inserted `inserted` bytes in front of this element.
    pub(crate) fn shift(&mut self, removed: usize, inserted: usize) {
        self.start = (self.start + inserted).saturating_sub(removed);
        self.end = (self.end + inserted).saturating_sub(removed);
    }

    pub(crate) fn set_end(&mut self, end: usize) {
        self.end = end;
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} element {:?} at line {} (bytes {}..{})",
            self.kind.name(),
            self.raw,
            self.line,
            self.start,
            self.end
        )
    }
}
