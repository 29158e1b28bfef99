//! CLI module for guru-stream.
//!
//! - Argument parsing
//! - Version and catalogue display
//! - Streaming guidance to the terminal, with Ctrl-C cancelling the stream
//!
//! # Usage
//!
//! ```ignore
//! use guru_stream::cli::{parse_args, run_cli_command};
//! use guru_stream::config::GuidanceConfig;
//!
//! let command = parse_args(std::env::args())?;
//! run_cli_command(command, GuidanceConfig::from_env()?)?;
//! ```

pub mod args;
pub mod render;
pub mod version;

pub use args::{parse_args, ArgsError, AskOptions, CliCommand};
pub use render::{render_catalogue, render_event, usage};
pub use version::{version_line, VERSION};

use std::io::Write;

use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use futures::StreamExt;
use tracing::{info, warn};

use crate::config::GuidanceConfig;
use crate::guidance::{GuidanceClient, GuidanceStream};
use crate::gurus::{build_prompt, PromptParts};
use crate::models::GuidanceRequest;
use crate::session::GuidanceSession;
use crate::traits::HttpClient;

/// What a finished stream delivered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamSummary {
    /// Events rendered
    pub events: usize,
    /// Malformed updates skipped
    pub skipped: usize,
    /// Whether the stream ended because it was cancelled
    pub cancelled: bool,
}

/// Run a parsed CLI command to completion.
pub fn run_cli_command(command: CliCommand, config: GuidanceConfig) -> Result<()> {
    match command {
        CliCommand::Version => println!("{}", version_line()),
        CliCommand::Help => print!("{}", usage()),
        CliCommand::List => print!("{}", render_catalogue()),
        CliCommand::Ask(options) => run_ask(options, config)?,
    }
    Ok(())
}

fn run_ask(options: AskOptions, config: GuidanceConfig) -> Result<()> {
    let config = match options.base_url {
        Some(ref url) => config.with_base_url(url.clone()),
        None => config,
    };
    let guru = options.guru.unwrap_or(config.default_guru);

    if options.show_prompt {
        print!("{}", build_prompt(PromptParts::for_guru(guru, &options.question)));
        return Ok(());
    }

    let client = GuidanceClient::from_config(config).wrap_err("Invalid configuration")?;
    let request = GuidanceRequest::new(guru, options.question);
    let runtime = tokio::runtime::Runtime::new()?;

    if options.buffered {
        let response = runtime.block_on(client.ask(&request)).map_err(user_facing)?;
        match (response.success, response.response) {
            (true, Some(text)) => println!("{}", text),
            (_, _) => {
                let reason = response.error.unwrap_or_else(|| "no answer".to_string());
                return Err(color_eyre::eyre::eyre!("Guidance failed: {}", reason));
            }
        }
        return Ok(());
    }

    let mut session = GuidanceSession::new(client);
    runtime.block_on(async {
        let stream = session.start(&request).await.map_err(user_facing)?;

        let handle = stream.cancel_handle();
        // Install the handler - ignore errors if already set
        let _ = ctrlc::set_handler(move || handle.cancel());

        let mut stdout = std::io::stdout();
        let summary = stream_to(stream, &mut stdout).await?;
        writeln!(stdout)?;

        if summary.cancelled {
            eprintln!("Guidance cancelled.");
        }
        if summary.skipped > 0 {
            eprintln!("{} update(s) could not be read and were skipped.", summary.skipped);
        }
        info!(
            session = session.id(),
            events = summary.events,
            skipped = summary.skipped,
            "Guidance stream finished"
        );
        Ok::<(), color_eyre::Report>(())
    })?;
    session.dispose();
    Ok(())
}

/// Render every event of `stream` to `out` as it arrives.
///
/// Malformed updates are logged and skipped; a fatal stream error is
/// returned after everything before it has been written.
pub async fn stream_to<W: Write>(mut stream: GuidanceStream, out: &mut W) -> Result<StreamSummary> {
    let handle = stream.cancel_handle();
    let mut summary = StreamSummary::default();

    while let Some(item) = stream.next().await {
        match item {
            Ok(event) => {
                out.write_all(render_event(&event).as_bytes())?;
                out.flush()?;
                summary.events += 1;
            }
            Err(err) if !err.is_fatal() => {
                warn!("Skipping update: {}", err);
                summary.skipped += 1;
            }
            Err(err) => return Err(user_facing(err)),
        }
    }

    summary.cancelled = handle.is_cancelled();
    Ok(summary)
}

fn user_facing(err: crate::error::GuruError) -> color_eyre::Report {
    let message = err.user_message();
    color_eyre::Report::new(err).wrap_err(message)
}

/// Open a stream through `client` and render it to `out`.
///
/// Used by tests and embedders that already hold a client.
pub async fn stream_question<C, W>(
    client: &GuidanceClient<C>,
    request: &GuidanceRequest,
    out: &mut W,
) -> Result<StreamSummary>
where
    C: HttpClient,
    W: Write,
{
    let stream = client.stream_guidance(request).await.map_err(user_facing)?;
    stream_to(stream, out).await
}
