//! `mdpdf convert` command implementation.

use std::path::PathBuf;

use clap::Args;
use mdpdf_config::{CliSettings, Config};
use mdpdf_renderer::{TextLayout, TextTheme};

use super::{SourceArgs, converter};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the convert command.
#[derive(Args)]
pub(crate) struct ConvertArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Output file (default: stdout).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Page width in columns (overrides config).
    #[arg(long)]
    width: Option<usize>,

    /// Page height in lines (overrides config).
    #[arg(long)]
    height: Option<usize>,
}

impl ConvertArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            width: self.width,
            height: self.height,
            ..CliSettings::default()
        };
        let config = self.source.load_config(cli_settings)?;
        let markdown = self.source.read()?;

        let mut theme = TextTheme::new(text_layout(&config));
        converter(&config).convert(&markdown, &mut theme)?;

        match &self.output {
            Some(path) => {
                std::fs::write(path, theme.render())?;
                output.success(&format!(
                    "Wrote {} page(s) to {}",
                    theme.pages().len(),
                    path.display()
                ));
            }
            None => output.document(&theme.render())?,
        }
        Ok(())
    }
}

/// Map page and list configuration onto the text layout.
fn text_layout(config: &Config) -> TextLayout {
    TextLayout {
        width: config.page.width,
        height: config.page.height,
        header: config.page.header.clone(),
        footer: config.page.footer.clone(),
        indent: config.list.indent,
        bullets: config.list.bullets.clone(),
        numbering: config.list.numbering.clone(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config_matches_default_layout() {
        assert_eq!(text_layout(&Config::default()), TextLayout::default());
    }

    #[test]
    fn test_layout_follows_config() {
        let config: Config = toml_config("[page]\nwidth = 30\nheader = \"H\"\n[list]\nindent = 2");
        let layout = text_layout(&config);
        assert_eq!(layout.width, 30);
        assert_eq!(layout.header, "H");
        assert_eq!(layout.indent, 2);
    }

    fn toml_config(content: &str) -> Config {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mdpdf.toml");
        std::fs::write(&path, content).unwrap();
        Config::load(Some(&path), None).unwrap()
    }
}
