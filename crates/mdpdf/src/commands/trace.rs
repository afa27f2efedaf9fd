//! `mdpdf trace` command implementation.

use std::fmt::Write;

use clap::Args;
use mdpdf_config::CliSettings;
use mdpdf_renderer::RecordingTheme;

use super::{SourceArgs, converter};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the trace command.
#[derive(Args)]
pub(crate) struct TraceArgs {
    #[command(flatten)]
    source: SourceArgs,
}

impl TraceArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let config = self.source.load_config(CliSettings::default())?;
        let markdown = self.source.read()?;

        let mut theme = RecordingTheme::new();
        converter(&config).convert(&markdown, &mut theme)?;

        let mut lines = String::new();
        for call in theme.calls() {
            let _ = writeln!(lines, "{call}");
        }
        Output::new().document(&lines)?;
        Ok(())
    }
}
