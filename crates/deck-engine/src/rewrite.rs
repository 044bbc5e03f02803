//! Per-kind rewrite behavior.
//!
//! Each element is rewritten once, in document order. A rewrite may edit the
//! buffer away from its own span (a separator before a title, a closing
//! bracket before the next grid element, relocated front matter); such edits
//! only move the offsets of existing elements.

use crate::document::Document;
use crate::element::{ElementId, ElementKind};

/// Replaces the newline in front of every title but the first.
pub(crate) const SLIDE_SEPARATOR: &str = "\n\n---\n";

/// Inserted in front of the grid element that follows an opener.
pub(crate) const GRID_CLOSE: &str = "]\n";

/// Appended when an opener has no following grid element.
pub(crate) const GRID_CLOSE_AT_END: &str = "\n]\n";

const CONTAINER_OPEN: &str = ".container[";

/// Rewrite one element, pushing a message to `warnings` for anything that
/// had to be skipped.
pub(crate) fn rewrite(document: &mut Document, id: ElementId, warnings: &mut Vec<String>) {
    match document.element(id).kind().clone() {
        ElementKind::Title { .. } => rewrite_title(document, id),
        ElementKind::Column { width } => {
            replace_element(document, id, &format!(".grid-{width}["));
            close_grid(document, id);
        }
        ElementKind::Container => {
            replace_element(document, id, CONTAINER_OPEN);
            close_grid(document, id);
        }
        ElementKind::FrontMatter { content } => {
            relocate_front_matter(document, id, &content, warnings);
        }
    }
}

/// Every title after the first starts a new slide.
fn rewrite_title(document: &mut Document, id: ElementId) {
    let start = document.element(id).start();
    let has_previous = document
        .find(|e| e.kind().is_title() && e.start() < start)
        .is_some();
    if has_previous {
        replace_boundary(document, start, SLIDE_SEPARATOR);
    }
}

/// Close the block opened by `id` right before the next grid element, or at
/// the end of the document if there is none.
fn close_grid(document: &mut Document, id: ElementId) {
    let start = document.element(id).start();
    match document.find(|e| e.kind().affects_grid() && e.start() > start) {
        Some(next) => {
            let at = document.element(next).start();
            document.replace_range(at, at, GRID_CLOSE);
        }
        None => document.append(GRID_CLOSE_AT_END),
    }
}

fn relocate_front_matter(
    document: &mut Document,
    id: ElementId,
    content: &str,
    warnings: &mut Vec<String>,
) {
    replace_element(document, id, "");

    let start = document.element(id).start();
    let Some(title) = document.find_last(|e| e.kind().is_title() && e.start() < start) else {
        let line = document.element(id).line();
        tracing::warn!(line, "Front matter has no preceding title");
        warnings.push(format!(
            "line {line}: front matter has no preceding title, dropped"
        ));
        return;
    };

    let at = document.element(title).start();
    if at == 0 {
        document.replace_range(0, 0, &format!("{content}\n\n"));
    } else {
        replace_boundary(document, at, &format!("\n\n{content}\n\n"));
    }
}

/// Replace the element's own span and update its end to match.
fn replace_element(document: &mut Document, id: ElementId, new_text: &str) {
    let range = document.element(id).range();
    document.replace_range(range.start, range.end, new_text);
    document
        .element_mut(id)
        .set_end(range.start + new_text.len());
}

/// Put `text` in front of offset `at`, consuming the newline that ends the
/// previous line if there is one. `text` is expected to end with a newline.
fn replace_boundary(document: &mut Document, at: usize, text: &str) {
    if at > 0 && document.text().as_bytes()[at - 1] == b'\n' {
        document.replace_range(at - 1, at, text);
    } else {
        document.replace_range(at, at, text);
    }
}
