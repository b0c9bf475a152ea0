pub mod cli;
pub mod opts;
pub mod terminal;

use anyhow::{Context, Result};
use shiruk_core::render::{ResultView, render_html, render_text};
use shiruk_core::validate::validate_input;
use shiruk_core::{AnalysisController, AnalysisRequest, HttpPoetryClient, PoetryApi};
use tracing_subscriber::{EnvFilter, fmt};

use crate::cli::{Cli, Commands, Parser};
use crate::opts::{ClientOpts, OutputFormat, UiOpts};
use crate::terminal::TerminalView;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log.as_deref())?;

    let runtime = Cli::create_runtime()?;
    match cli.subcommand {
        Commands::Interactive { client, ui } => {
            runtime.block_on(async move { interactive(client, ui).await })
        }
        Commands::Analyze {
            client,
            ui,
            format,
            text,
        } => runtime.block_on(async move { analyze(client, ui, format, &text).await }),
        Commands::Health { client, verbose } => {
            runtime.block_on(async move { health(client, verbose).await })
        }
    }
}

const DEFAULT_LOG_FILTER: &str = "info";

/// `--log` (or `SHIRUK_LOG`) first, then `RUST_LOG`, then `info`.
fn choose_log_filter(flag: Option<&str>, rust_log: Option<String>) -> String {
    flag.map(str::to_owned)
        .or(rust_log)
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_owned())
}

fn init_tracing(flag: Option<&str>) -> Result<()> {
    let directives = choose_log_filter(flag, std::env::var(EnvFilter::DEFAULT_ENV).ok());
    let filter = EnvFilter::try_new(&directives)
        .with_context(|| format!("invalid log filter `{directives}`"))?;
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

async fn interactive(client: ClientOpts, ui: UiOpts) -> Result<()> {
    let api = HttpPoetryClient::new(client.client_config())?;
    tracing::info!("using backend at {}", api.api_base());
    let controller = AnalysisController::new(api, TerminalView::default(), ui.controller_config());
    terminal::run(controller).await
}

async fn analyze(client: ClientOpts, ui: UiOpts, format: OutputFormat, raw: &str) -> Result<()> {
    let catalog = ui.lang.catalog();
    let text = validate_input(raw).map_err(|e| anyhow::anyhow!(catalog.validation_message(e)))?;

    let api = HttpPoetryClient::new(client.client_config())?;
    let response = api
        .get_poetry(&AnalysisRequest {
            text: text.to_owned(),
        })
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "analysis request failed");
            anyhow::anyhow!(catalog.connectivity)
        })?;

    let output = match format {
        OutputFormat::Json => serde_json::to_string_pretty(&response)?,
        OutputFormat::Html => render_html(&ResultView::from_response(&response, ui.lang)),
        OutputFormat::Text => render_text(&ResultView::from_response(&response, ui.lang)),
    };
    println!("{output}");
    Ok(())
}

async fn health(client: ClientOpts, verbose: bool) -> Result<()> {
    let api = HttpPoetryClient::new(client.client_config())?;
    let status = api
        .health()
        .await
        .with_context(|| format!("backend at {} is not healthy", api.api_base()))?;
    println!("{}", serde_json::to_string_pretty(&status)?);

    if verbose {
        let info = api.service_info().await?;
        println!("{}", serde_json::to_string_pretty(&info)?);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_flag_wins_over_rust_log() {
        assert_eq!(
            choose_log_filter(Some("shiruk_core=debug"), Some("warn".into())),
            "shiruk_core=debug"
        );
    }

    #[test]
    fn test_rust_log_used_without_flag() {
        assert_eq!(choose_log_filter(None, Some("warn".into())), "warn");
    }

    #[test]
    fn test_log_defaults_to_info() {
        assert_eq!(choose_log_filter(None, None), "info");
    }
}
