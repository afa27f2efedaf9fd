//! `mdpdf tokens` command implementation.

use clap::Args;
use mdpdf_ast::dump_tokens;
use mdpdf_config::CliSettings;

use super::{SourceArgs, converter};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the tokens command.
#[derive(Args)]
pub(crate) struct TokensArgs {
    #[command(flatten)]
    source: SourceArgs,
}

impl TokensArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let config = self.source.load_config(CliSettings::default())?;
        let markdown = self.source.read()?;

        let tokens = converter(&config).tokens(&markdown)?;

        Output::new().document(&dump_tokens(&tokens))?;
        Ok(())
    }
}
