//! Marker scanning.
//!
//! Each marker kind has its own pattern, searched independently over the
//! original text. Matches are returned grouped by kind (titles, columns,
//! containers, then front matter) and within a kind in text order; the
//! registry sorts them and rejects overlaps between any two of them.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::element::{Element, ElementKind};
use crate::error::EngineError;

/// `# Heading`, any level. The heading text must not start with `#`.
static TITLE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^(#+)\s*([^#][^\n]+)").unwrap());

/// Widths are ASCII digits only; other scripts' digits leave the comment as text.
static COLUMN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<!--\s*slide-column\s+([0-9]+)\s*-->").unwrap());

static CONTAINER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<!--\s*slide-container\s*-->").unwrap());

/// Payload runs to the last `-->` on the line, so a column or container
/// marker later on the same line overlaps it.
static FRONT_MATTER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<!--\s*slide-front-matter\s+([^\n]+)\s*-->").unwrap());

/// Find every marker in `markdown`.
///
/// Offsets are byte offsets into `markdown`. Overlaps are not checked here.
pub fn scan(markdown: &str) -> Result<Vec<Element>, EngineError> {
    let lines = LineIndex::new(markdown);
    let mut elements = Vec::new();

    for caps in TITLE_PATTERN.captures_iter(markdown) {
        let kind = ElementKind::Title {
            level: caps[1].len(),
            text: caps[2].trim().to_owned(),
        };
        elements.push(to_element(kind, &caps, &lines));
    }

    for caps in COLUMN_PATTERN.captures_iter(markdown) {
        let digits = &caps[1];
        let width = digits
            .parse::<u32>()
            .map_err(|_| EngineError::InvalidColumnWidth {
                line: lines.line_of(match_start(&caps)),
                width: digits.to_owned(),
            })?;
        elements.push(to_element(ElementKind::Column { width }, &caps, &lines));
    }

    for caps in CONTAINER_PATTERN.captures_iter(markdown) {
        elements.push(to_element(ElementKind::Container, &caps, &lines));
    }

    for caps in FRONT_MATTER_PATTERN.captures_iter(markdown) {
        let kind = ElementKind::FrontMatter {
            content: caps[1].to_owned(),
        };
        elements.push(to_element(kind, &caps, &lines));
    }

    Ok(elements)
}

fn match_start(caps: &Captures<'_>) -> usize {
    caps.get(0).map_or(0, |whole| whole.start())
}

fn to_element(kind: ElementKind, caps: &Captures<'_>, lines: &LineIndex) -> Element {
    let whole = caps.get(0).map_or("", |m| m.as_str());
    let start = match_start(caps);
    Element::new(
        kind,
        start,
        start + whole.len(),
        whole,
        lines.line_of(start),
    )
}

/// Byte offsets where each line of the original text starts.
struct LineIndex {
    line_starts: Vec<usize>,
}

impl LineIndex {
    fn new(text: &str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            text.bytes()
                .enumerate()
                .filter(|&(_, b)| b == b'\n')
                .map(|(i, _)| i + 1),
        );
        Self { line_starts }
    }

    /// 1-indexed line containing `offset`.
    fn line_of(&self, offset: usize) -> usize {
        self.line_starts.partition_point(|&start| start <= offset)
    }
}
