//! CLI command implementations.

pub(crate) mod convert;
pub(crate) mod tokens;
pub(crate) mod trace;
pub(crate) mod tree;

use std::path::{Path, PathBuf};

use clap::Args;
use mdpdf_config::{CliSettings, Config};
use mdpdf_renderer::MarkdownConverter;

use crate::error::CliError;

pub(crate) use convert::ConvertArgs;
pub(crate) use tokens::TokensArgs;
pub(crate) use trace::TraceArgs;
pub(crate) use tree::TreeArgs;

/// Input file and parser options shared by every command.
#[derive(Args)]
pub(crate) struct SourceArgs {
    /// Markdown file to read (`-` for stdin).
    file: PathBuf,

    /// Path to configuration file (default: auto-discover mdpdf.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Disable GitHub Flavored Markdown extensions.
    #[arg(long)]
    no_gfm: bool,
}

impl SourceArgs {
    /// Load configuration, applying `settings` plus the shared flags.
    pub(crate) fn load_config(&self, settings: CliSettings) -> Result<Config, CliError> {
        let settings = CliSettings {
            gfm: self.no_gfm.then_some(false),
            ..settings
        };
        Ok(Config::load(self.config.as_deref(), Some(&settings))?)
    }

    /// Read the markdown source.
    pub(crate) fn read(&self) -> Result<String, CliError> {
        read_source(&self.file)
    }
}

fn read_source(path: &Path) -> Result<String, CliError> {
    let markdown = if path == Path::new("-") {
        std::io::read_to_string(std::io::stdin())?
    } else {
        std::fs::read_to_string(path)?
    };
    tracing::debug!(path = %path.display(), bytes = markdown.len(), "Read markdown source");
    Ok(markdown)
}

/// Build a converter from the markdown section of the configuration.
pub(crate) fn converter(config: &Config) -> MarkdownConverter {
    MarkdownConverter::new()
        .with_gfm(config.markdown.gfm)
        .with_smart_punctuation(config.markdown.smart_punctuation)
}
