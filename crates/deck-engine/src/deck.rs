//! Deck envelope handed to the page template.
//!
//! A template receives `{ title, source }`: the deck title taken from the
//! first level-1 heading, and the converted markdown.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

use crate::document::Document;
use crate::error::EngineError;

/// Title used when a deck has no level-1 heading.
pub const DEFAULT_DECK_TITLE: &str = "Slides";

static DECK_TITLE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#[ \t]*([^#\s][^\n]*)").unwrap());

static INLINE_PARENT_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\[[^\]]+\]\(\.\./)").unwrap());

static REFERENCE_PARENT_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^(\[[^\]]+\]:[ \t]*\.\./)").unwrap());

/// Options for [`SlideDeck::build`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeckOptions {
    /// Title used when the markdown has no level-1 heading.
    pub default_title: String,
    /// Appended to the deck title as `Title (site)`.
    pub site_title: Option<String>,
    /// Push `../` links one directory deeper.
    pub nest_links: bool,
}

impl Default for DeckOptions {
    fn default() -> Self {
        Self {
            default_title: DEFAULT_DECK_TITLE.to_owned(),
            site_title: None,
            nest_links: false,
        }
    }
}

/// A converted deck, ready for templating.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SlideDeck {
    /// Page title.
    pub title: String,
    /// Remark markdown.
    pub source: String,
    /// Warnings from the conversion.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub warnings: Vec<String>,
}

impl SlideDeck {
    /// Convert `markdown` and derive the page title.
    pub fn build(markdown: &str, options: &DeckOptions) -> Result<Self, EngineError> {
        let markdown = if options.nest_links {
            nest_relative_links(markdown)
        } else {
            Cow::Borrowed(markdown)
        };

        let subject = deck_title(&markdown).unwrap_or(options.default_title.as_str());
        let title = match &options.site_title {
            Some(site) => format!("{subject} ({site})"),
            None => subject.to_owned(),
        };

        let conversion = Document::parse(&markdown)?.transform();
        Ok(Self {
            title,
            source: conversion.output,
            warnings: conversion.warnings,
        })
    }
}

/// Text of the first level-1 heading.
///
/// # Examples
///
/// ```
/// use deck_engine::deck_title;
///
/// assert_eq!(deck_title("intro\n# Git Basics\n## Details"), Some("Git Basics"));
/// assert_eq!(deck_title("## Only a subtitle"), None);
/// ```
#[must_use]
pub fn deck_title(markdown: &str) -> Option<&str> {
    DECK_TITLE_PATTERN
        .captures(markdown)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim_end())
}

/// Rewrite `../` links for a deck published one directory below its source.
///
/// Both inline links (`[text](../x)`) and reference definitions
/// (`[id]: ../x`) gain one more `../`.
#[must_use]
pub fn nest_relative_links(markdown: &str) -> Cow<'_, str> {
    match INLINE_PARENT_LINK.replace_all(markdown, "${1}../") {
        Cow::Borrowed(unchanged) => REFERENCE_PARENT_LINK.replace_all(unchanged, "${1}../"),
        Cow::Owned(changed) => Cow::Owned(
            REFERENCE_PARENT_LINK
                .replace_all(&changed, "${1}../")
                .into_owned(),
        ),
    }
}
