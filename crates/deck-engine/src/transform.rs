//! Build phase and the single rewrite pass.

use crate::document::Document;
use crate::element::ElementId;
use crate::error::EngineError;
use crate::rewrite::rewrite;
use crate::scanner::scan;

/// Result of rewriting a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    /// Rewritten markdown.
    pub output: String,
    /// Non-fatal issues, prefixed with the source line.
    pub warnings: Vec<String>,
}

impl Document {
    /// Scan `markdown` and register every marker found.
    ///
    /// Fails without touching the text if two markers overlap.
    pub fn parse(markdown: &str) -> Result<Self, EngineError> {
        let mut document = Self::new(markdown);
        for element in scan(markdown)? {
            document.add_element(element)?;
        }
        Ok(document)
    }

    /// Rewrite every element once, in document order.
    ///
    /// The order is the one established by [`parse`](Self::parse); elements
    /// later in the document see the edits made by earlier ones.
    #[must_use]
    pub fn transform(mut self) -> Conversion {
        let ids: Vec<ElementId> = self.ids().collect();
        tracing::debug!(elements = ids.len(), "Rewriting document");

        let mut warnings = Vec::new();
        for id in ids {
            rewrite(&mut self, id, &mut warnings);
        }

        Conversion {
            output: self.into_text(),
            warnings,
        }
    }
}

/// Rewrite marker markdown into remark markdown.
///
/// # Example
///
/// ```
/// let output = deck_engine::convert("# A\ntext\n# B\nmore")?;
/// assert_eq!(output, "# A\ntext\n\n---\n# B\nmore");
/// # Ok::<(), deck_engine::EngineError>(())
/// ```
pub fn convert(markdown: &str) -> Result<String, EngineError> {
    Ok(Document::parse(markdown)?.transform().output)
}
