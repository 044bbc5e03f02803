//! Engine error types.

use crate::element::Element;

/// Error returned while building a [`Document`](crate::Document).
///
/// Every variant aborts the conversion of the whole document.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Element offsets fall outside the buffer or are inverted.
    #[error(
        "malformed {kind} element: range {start}..{end} is invalid for a buffer of {len} bytes"
    )]
    MalformedElement {
        /// Kind name of the rejected element.
        kind: &'static str,
        /// Rejected start offset.
        start: usize,
        /// Rejected end offset.
        end: usize,
        /// Buffer length at the time of registration.
        len: usize,
    },

    /// Two markers claim intersecting parts of the text.
    #[error("{candidate} covers the same markdown as existing {existing}")]
    OverlappingElements {
        /// Element that was being registered.
        candidate: Box<Element>,
        /// Element already in the registry.
        existing: Box<Element>,
    },

    /// A column directive whose width does not fit in a `u32`.
    #[error("line {line}: column width {width} is out of range")]
    InvalidColumnWidth {
        /// 1-indexed line of the directive.
        line: usize,
        /// Digits as written in the source.
        width: String,
    },
}
