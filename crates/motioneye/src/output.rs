//! Output formatting: JSON, compact JSON, YAML.
//!
//! Server responses are free-form JSON, so every command renders a
//! `serde_json::Value` through the format selected by `--output`.

use std::io::{self, Write};

use serde_json::Value;

use crate::cli::OutputFormat;
use crate::error::CliError;

/// Render a response document in the chosen format.
pub fn render(format: OutputFormat, data: &Value) -> Result<String, CliError> {
    let out = match format {
        OutputFormat::Json => serde_json::to_string_pretty(data)?,
        OutputFormat::JsonCompact => serde_json::to_string(data)?,
        // serde_yaml ends documents with a newline; println adds our own.
        OutputFormat::Yaml => serde_yaml::to_string(data)?.trim_end().to_owned(),
    };
    Ok(out)
}

/// Print the rendered output to stdout.
pub fn print_output(output: &str) {
    if output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}
