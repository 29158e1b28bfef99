//! Command-line argument parsing for the guru-stream CLI.

use thiserror::Error;

use crate::error::ConfigError;
use crate::gurus::GuruKind;

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Print the guru catalogue
    List,
    /// Ask a question (the default)
    Ask(AskOptions),
}

/// Options for [`CliCommand::Ask`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AskOptions {
    /// Guru to ask; `None` uses the configured default
    pub guru: Option<GuruKind>,
    /// Backend base URL overriding the environment
    pub base_url: Option<String>,
    /// Use the buffered endpoint instead of streaming
    pub buffered: bool,
    /// Print the assembled guru prompt instead of sending anything
    pub show_prompt: bool,
    /// The question, words joined by single spaces
    pub question: String,
}

/// Invalid command line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgsError {
    #[error("missing value for {0}")]
    MissingValue(&'static str),

    #[error("unknown option '{0}'")]
    UnknownOption(String),

    #[error("no question given")]
    MissingQuestion,

    #[error(transparent)]
    Guru(#[from] ConfigError),
}

/// Parse command-line arguments and return the command to run.
///
/// `--version`, `--help` and `--list` win over everything else. Everything
/// after `--` is part of the question.
///
/// # Examples
///
/// ```
/// use guru_stream::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["guru-stream".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), Ok(CliCommand::Version));
/// ```
pub fn parse_args<I>(args: I) -> Result<CliCommand, ArgsError>
where
    I: Iterator<Item = String>,
{
    let mut options = AskOptions::default();
    let mut words: Vec<String> = Vec::new();
    // Skip the program name
    let mut args = args.skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-V" => return Ok(CliCommand::Version),
            "--help" | "-h" => return Ok(CliCommand::Help),
            "--list" => return Ok(CliCommand::List),
            "--guru" | "-g" => {
                let value = args.next().ok_or(ArgsError::MissingValue("--guru"))?;
                options.guru = Some(value.parse()?);
            }
            "--url" => {
                let value = args.next().ok_or(ArgsError::MissingValue("--url"))?;
                options.base_url = Some(value);
            }
            "--no-stream" => options.buffered = true,
            "--prompt" => options.show_prompt = true,
            "--" => {
                words.extend(args.by_ref());
            }
            flag if flag.starts_with('-') && flag.len() > 1 => {
                return Err(ArgsError::UnknownOption(flag.to_string()));
            }
            other => words.push(other.to_string()),
        }
    }

    options.question = words.join(" ").trim().to_string();
    if options.question.is_empty() {
        return Err(ArgsError::MissingQuestion);
    }
    Ok(CliCommand::Ask(options))
}
