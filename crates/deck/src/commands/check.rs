//! `deck check` command implementation.

use std::path::PathBuf;

use clap::Args;
use deck_engine::{Document, ElementKind};

use crate::error::CliError;
use crate::output::{Output, Tone};

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Markdown files to check.
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// Every file is checked; the command fails if any of them does.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let mut failed = 0usize;

        for path in &self.files {
            let name = path.display().to_string();
            let document = match std::fs::read_to_string(path)
                .map_err(|e| CliError::Validation(format!("{name}: {e}")))
                .and_then(|markdown| {
                    Document::parse(&markdown).map_err(|source| CliError::Convert {
                        path: name.clone(),
                        source,
                    })
                }) {
                Ok(document) => document,
                Err(err) => {
                    output.error(&err.to_string());
                    failed += 1;
                    continue;
                }
            };

            let counts = MarkerCounts::from_document(&document);
            // Rewritten output is discarded; only the warnings matter here.
            let conversion = document.transform();
            output.about(Tone::Plain, &name, &counts.to_string());
            for warning in &conversion.warnings {
                output.about(Tone::Warning, &name, warning);
            }
        }

        if failed > 0 {
            return Err(CliError::Validation(format!(
                "{failed} of {} files failed",
                self.files.len()
            )));
        }
        output.success(&format!("{} files ok", self.files.len()));
        Ok(())
    }
}

/// Number of markers of each kind in a document.
#[derive(Debug, Default, PartialEq, Eq)]
struct MarkerCounts {
    titles: usize,
    columns: usize,
    containers: usize,
    front_matter: usize,
}

impl MarkerCounts {
    fn from_document(document: &Document) -> Self {
        let mut counts = Self::default();
        for element in document.elements() {
            match element.kind() {
                ElementKind::Title { .. } => counts.titles += 1,
                ElementKind::Column { .. } => counts.columns += 1,
                ElementKind::Container => counts.containers += 1,
                ElementKind::FrontMatter { .. } => counts.front_matter += 1,
            }
        }
        counts
    }
}

impl std::fmt::Display for MarkerCounts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} titles, {} columns, {} containers, {} front matter",
            self.titles,
            self.columns,
            self.containers,
            self.front_matter
        )
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_marker_counts() {
        let document = Document::parse(
            "# A\n<!-- slide-column 50 -->\n<!-- slide-column 50 -->\n# B\n\
             <!-- slide-container -->\n<!-- slide-front-matter class: center -->\n",
        )
        .unwrap();
        assert_eq!(
            MarkerCounts::from_document(&document),
            MarkerCounts {
                titles: 2,
                columns: 2,
                containers: 1,
                front_matter: 1,
            }
        );
    }

    #[test]
    fn test_marker_counts_display() {
        let counts = MarkerCounts::default();
        assert_eq!(
            counts.to_string(),
            "0 titles, 0 columns, 0 containers, 0 front matter"
        );
    }

    #[test]
    fn test_execute_reports_failures() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.md");
        let bad = dir.path().join("bad.md");
        std::fs::write(&good, "# Fine\n").unwrap();
        std::fs::write(&bad, "# Bad <!-- slide-container -->\n").unwrap();

        let args = CheckArgs {
            files: vec![good, bad],
            verbose: false,
        };
        let err = args.execute().unwrap_err();
        assert_eq!(err.to_string(), "1 of 2 files failed");
    }

    #[test]
    fn test_execute_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let args = CheckArgs {
            files: vec![dir.path().join("missing.md")],
            verbose: false,
        };
        assert!(matches!(args.execute(), Err(CliError::Validation(_))));
    }
}
