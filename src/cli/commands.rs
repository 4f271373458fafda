//! Command handlers. I/O lives here; everything they call is library code.

use anyhow::Result;
use std::path::Path;
use std::sync::Arc;

use super::setup::build_runtime;
use super::{Cli, Commands};
use crate::analysis::analyze;
use crate::config::{load_config, AppConfig};
use crate::gateway::HttpGateway;
use crate::io::{create_writer, read_source, write_json, OutputFormat};
use crate::service::{serve, AssistantService, ModelChoice};

/// Dispatch a parsed command line
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Analyze { path, format } => handle_analyze(path.as_deref(), format),
        Commands::Explain { path, model } => {
            let config = load_config(cli.config.as_deref())?;
            handle_explain(config, path.as_deref(), model)
        }
        Commands::Infer { prompt, model } => {
            let config = load_config(cli.config.as_deref())?;
            handle_infer(config, &prompt, model)
        }
        Commands::Serve => {
            let config = load_config(cli.config.as_deref())?;
            handle_serve(config)
        }
        Commands::Health => write_json(&mut std::io::stdout(), &serde_json::json!({"ok": true})),
    }
}

pub fn handle_analyze(path: Option<&Path>, format: OutputFormat) -> Result<()> {
    let code = read_source(path)?;
    let result = analyze(&code);
    log::info!(
        "Analysis produced {} findings and {} refactor suggestions",
        result.findings.len(),
        result.refactors.len()
    );
    create_writer(format).write_analysis(&result)
}

pub fn handle_explain(config: AppConfig, path: Option<&Path>, model: ModelChoice) -> Result<()> {
    let code = read_source(path)?;
    let service = build_service(config)?;
    let runtime = build_runtime()?;
    let response = runtime.block_on(service.explain(&code, model))?;
    write_json(&mut std::io::stdout(), &response)
}

pub fn handle_infer(config: AppConfig, prompt: &str, model: ModelChoice) -> Result<()> {
    let service = build_service(config)?;
    let runtime = build_runtime()?;
    let response = runtime.block_on(service.infer(prompt, model))?;
    write_json(&mut std::io::stdout(), &response)
}

/// Answer stdin requests until end of input, sharing one cache across all of them
pub fn handle_serve(config: AppConfig) -> Result<()> {
    let service = Arc::new(build_service(config)?);
    let runtime = build_runtime()?;
    let served = runtime.block_on(serve(
        Arc::clone(&service),
        tokio::io::BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
    ))?;

    let stats = service.cache_stats();
    log::info!(
        "Served {} requests ({} cache hits, {} misses)",
        served,
        stats.hits,
        stats.misses
    );
    Ok(())
}

/// Wire the HTTP gateway and a process-lifetime cache into a service
pub fn build_service(config: AppConfig) -> Result<AssistantService<HttpGateway>> {
    if !config.has_api_token() {
        log::warn!("HF_API_TOKEN not set. explain and infer will fail until configured.");
    }
    let gateway = HttpGateway::from_config(&config)?;
    Ok(AssistantService::with_config(config, gateway))
}
