//! `deck convert` command implementation.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};
use deck_config::{CliSettings, Config, OutputFormat};
use deck_engine::{DeckOptions, SlideDeck};

use crate::error::CliError;
use crate::output::{Output, Tone};

/// Sources with this stem are published in their own directory; links in
/// every other source move one level down.
const INDEX_STEM: &str = "README";

/// Output format accepted on the command line.
#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// Converted markdown.
    Markdown,
    /// `{ "title", "source" }` JSON for a page template.
    Json,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Markdown => Self::Markdown,
            Format::Json => Self::Json,
        }
    }
}

/// Arguments for the convert command.
#[derive(Args)]
pub(crate) struct ConvertArgs {
    /// Markdown file to convert (default: read stdin).
    input: Option<PathBuf>,

    /// Write the result to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format (overrides config).
    #[arg(long, value_enum)]
    format: Option<Format>,

    /// Site title appended to the deck title (overrides config).
    #[arg(long, env = "DECK_SITE_TITLE")]
    site_title: Option<String>,

    /// Leave `../` links untouched.
    #[arg(long)]
    no_nest_links: bool,

    /// Path to configuration file (default: auto-discover deck.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl ConvertArgs {
    /// Execute the convert command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, the input cannot be read, or
    /// the markers are invalid.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            site_title: self.site_title,
            format: self.format.map(Into::into),
            nest_links: self.no_nest_links.then_some(false),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let (markdown, name) = match &self.input {
            Some(path) => (std::fs::read_to_string(path)?, path.display().to_string()),
            None => {
                let mut buffer = String::new();
                std::io::stdin().read_to_string(&mut buffer)?;
                (buffer, "<stdin>".to_owned())
            }
        };

        let options = DeckOptions {
            default_title: config.deck.default_title.clone(),
            site_title: config.deck.site_title.clone(),
            nest_links: config.output.nest_links
                && self.input.as_deref().is_some_and(is_published_nested),
        };

        tracing::info!(input = %name, nest_links = options.nest_links, "Converting deck");
        let deck = SlideDeck::build(&markdown, &options).map_err(|source| CliError::Convert {
            path: name.clone(),
            source,
        })?;

        for warning in &deck.warnings {
            output.about(Tone::Warning, &name, warning);
        }

        let rendered = render(&deck, config.output.format)?;
        match &self.output {
            Some(path) => {
                std::fs::write(path, rendered)?;
                output.success(&format!("Converted {name} to {}", path.display()));
            }
            None => std::io::stdout().write_all(rendered.as_bytes())?,
        }

        Ok(())
    }
}

/// Serialize a deck in the requested format.
fn render(deck: &SlideDeck, format: OutputFormat) -> Result<String, CliError> {
    Ok(match format {
        OutputFormat::Markdown => deck.source.clone(),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(deck)?;
            json.push('\n');
            json
        }
    })
}

/// Whether the deck built from `path` lands one directory below it
/// (`subjects/git/INSTALL.md` becomes `subjects/git/install/`).
fn is_published_nested(path: &Path) -> bool {
    path.file_stem().is_some_and(|stem| stem != INDEX_STEM)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn deck() -> SlideDeck {
        SlideDeck {
            title: "Git (Web Dev)".to_owned(),
            source: "# Git\n".to_owned(),
            warnings: vec!["line 2: ignored".to_owned()],
        }
    }

    #[test]
    fn test_is_published_nested() {
        assert!(!is_published_nested(Path::new("subjects/git/README.md")));
        assert!(is_published_nested(Path::new("subjects/git/INSTALL.md")));
        assert!(is_published_nested(Path::new("slides.md")));
    }

    #[test]
    fn test_render_markdown() {
        assert_eq!(render(&deck(), OutputFormat::Markdown).unwrap(), "# Git\n");
    }

    #[test]
    fn test_render_json_has_title_and_source_only() {
        let json = render(&deck(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "title": "Git (Web Dev)", "source": "# Git\n" })
        );
        assert!(json.ends_with('\n'));
    }
}
