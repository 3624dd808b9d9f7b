//! Command-line arguments for the `studyhub` binary.

use crate::error::{AppError, AppResult};
use std::path::PathBuf;

pub const USAGE: &str = "\
Usage: studyhub [OPTIONS]

Options:
  --config <FILE>    Load configuration from a JSON file
  --session <FILE>   Replay recorded input events from a JSON file
  --export [NAME]    Export the board as PNG (default name px-study-<millis>.png)
  --no-save          Do not write the board back to storage
  --shortcuts        Print keyboard shortcuts and exit
  -h, --help         Print this help";

/// Parsed command-line arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub config: Option<PathBuf>,
    pub session: Option<PathBuf>,
    /// `Some("")` requests an export under the default name.
    pub export: Option<String>,
    pub save: bool,
    pub shortcuts: bool,
    pub help: bool,
}

impl Default for CliArgs {
    fn default() -> Self {
        Self {
            config: None,
            session: None,
            export: None,
            save: true,
            shortcuts: false,
            help: false,
        }
    }
}

impl CliArgs {
    /// Parse arguments, excluding the program name.
    pub fn parse<I, T>(args: I) -> AppResult<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let mut parsed = Self::default();
        let mut args = args.into_iter().map(Into::into).peekable();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => parsed.config = Some(PathBuf::from(required(&arg, args.next())?)),
                "--session" => parsed.session = Some(PathBuf::from(required(&arg, args.next())?)),
                "--export" => {
                    let name = args.next_if(|next| !next.starts_with("--"));
                    parsed.export = Some(name.unwrap_or_default());
                }
                "--no-save" => parsed.save = false,
                "--shortcuts" => parsed.shortcuts = true,
                "-h" | "--help" => parsed.help = true,
                other => return Err(AppError::Usage(format!("unknown argument: {other}"))),
            }
        }
        Ok(parsed)
    }
}

fn required(flag: &str, value: Option<String>) -> AppResult<String> {
    value.ok_or_else(|| AppError::Usage(format!("{flag} requires a value")))
}
