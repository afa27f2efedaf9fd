//! `mdpdf tree` command implementation.

use clap::Args;
use mdpdf_ast::dump_tree;
use mdpdf_config::CliSettings;

use super::{SourceArgs, converter};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the tree command.
#[derive(Args)]
pub(crate) struct TreeArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Print the tree as JSON instead of the indented dump.
    #[arg(long)]
    json: bool,
}

impl TreeArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let config = self.source.load_config(CliSettings::default())?;
        let markdown = self.source.read()?;

        let root = converter(&config).tree(&markdown)?;

        let rendered = if self.json {
            serde_json::to_string_pretty(&root)?
        } else {
            dump_tree(&root)
        };
        Output::new().document(&rendered)?;
        Ok(())
    }
}
