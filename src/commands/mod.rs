pub mod init;
pub mod score;
pub mod stats;
pub mod warm;

use crate::cli::OutputFormat as CliFormat;
use crate::io::output::{create_writer, OutputFormat, OutputWriter};
use anyhow::{Context, Result};
use std::fs::File;
use std::path::Path;

// Pure function: CLI format flag to writer format
pub(crate) fn convert_format(format: CliFormat) -> OutputFormat {
    match format {
        CliFormat::Terminal => OutputFormat::Terminal,
        CliFormat::Json => OutputFormat::Json,
        CliFormat::Markdown => OutputFormat::Markdown,
    }
}

/// Render a report to stdout or a file with the requested writer.
pub(crate) fn write_report<F>(format: CliFormat, output: Option<&Path>, render: F) -> Result<()>
where
    F: FnOnce(&mut dyn OutputWriter) -> Result<()>,
{
    let format = convert_format(format);
    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create output file {}", path.display()))?;
            let mut writer = create_writer(format, file);
            render(writer.as_mut())
        }
        None => {
            let mut writer = create_writer(format, std::io::stdout());
            render(writer.as_mut())
        }
    }
}
