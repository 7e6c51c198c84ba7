use crate::ui::style as ui;
use anyhow::{Context, Result};
use std::io::{IsTerminal, Read};
use std::path::Path;

/// Text from a flag, a file, or stdin, in that order.
pub fn read_text(inline: Option<String>, file: Option<&Path>, what: &str) -> Result<String> {
    if let Some(text) = inline {
        return Ok(text);
    }

    if let Some(path) = file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {what} from {}", path.display()));
    }

    let mut stdin = std::io::stdin();
    if stdin.is_terminal() {
        eprintln!(
            "{}",
            ui::dim(format!("Paste your {what}, then press Ctrl-D on an empty line."))
        );
    }
    let mut text = String::new();
    stdin
        .read_to_string(&mut text)
        .with_context(|| format!("Failed to read {what} from stdin"))?;
    Ok(text)
}
