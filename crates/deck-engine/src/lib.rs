//! Marker-driven Markdown to remark slide rewriting.
//!
//! Authors write plain Markdown with a handful of markers; this crate turns it
//! into remark presentation Markdown while leaving every other byte intact.
//!
//! | Marker | Output |
//! |--------|--------|
//! | `# Heading` (any level) | `---` slide separator before every heading but the first |
//! | `<!-- slide-column 40 -->` | `.grid-40[` ... `]` |
//! | `<!-- slide-container -->` | `.container[` ... `]` |
//! | `<!-- slide-front-matter class: center -->` | moved in front of the slide's heading |
//!
//! # Architecture
//!
//! Conversion has two phases:
//!
//! 1. **Build** ([`Document::parse`]): every marker pattern is searched in the
//!    pristine text and registered as an [`Element`]. Overlapping markers are
//!    rejected before anything is modified.
//!
//! 2. **Rewrite** ([`Document::transform`]): elements are rewritten once, in
//!    document order, directly in the buffer. Each edit shifts the offsets of
//!    the elements behind it, so lookups such as "next grid element" always
//!    see live positions.
//!
//! A block opened by a column or container is closed lazily, right before the
//! next column, container or heading, or at the end of the document.
//!
//! # Example
//!
//! ```
//! let markdown = "# Intro\n<!-- slide-column 50 -->\nLeft\n<!-- slide-column 50 -->\nRight\n";
//! let output = deck_engine::convert(markdown)?;
//! assert_eq!(output, "# Intro\n.grid-50[\nLeft\n]\n.grid-50[\nRight\n\n]\n");
//! # Ok::<(), deck_engine::EngineError>(())
//! ```

mod deck;
mod document;
mod element;
mod error;
mod rewrite;
mod scanner;
mod transform;

pub use deck::{DEFAULT_DECK_TITLE, DeckOptions, SlideDeck, deck_title, nest_relative_links};
pub use document::Document;
pub use element::{Element, ElementId, ElementKind};
pub use error::EngineError;
pub use scanner::scan;
pub use transform::{Conversion, convert};
