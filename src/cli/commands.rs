use std::path::Path;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use tracing::info;

use crate::cli::flags::{Cli, Command};
use crate::config::load_config;
use crate::core::brands::BrandRegistry;
use crate::core::engine::Engine;
use crate::core::output::{
    render_assessments, render_brands, render_content, render_domain, write_report,
};
use crate::core::types::OutputFormat;
use crate::detectors::content::analyze_html_with;
use crate::detectors::domain::{analyze_domain_with, normalize_url};

pub async fn run(cli: Cli) -> Result<()> {
    let cfg = load_config(cli.config.as_deref())?;
    let format: OutputFormat = cli.format.clone().into();
    let output = cli.output.as_deref();

    let text = match &cli.command {
        Command::Scan { urls, no_fetch } => {
            let fetch = cfg.fetch_content && !*no_fetch;
            let engine = Arc::new(Engine::new(cfg)?);
            info!("scanning {} url(s), fetch={}", urls.len(), fetch);
            let assessments = engine.assess_many(urls, fetch).await;
            render_assessments(&assessments, format)?
        }
        Command::Domain { url } => {
            let registry = cfg.registry()?;
            let finding = analyze_domain_with(url, &registry);
            render_domain(&normalize_url(url), &finding, format)?
        }
        Command::Html { file, url } => {
            let registry = cfg.registry()?;
            let html = read_markup(file)?;
            let indicators = analyze_html_with(&html, url, &registry);
            render_content(url, &indicators, format)?
        }
        Command::Brands { name } => {
            let registry = cfg.registry()?;
            match name {
                Some(name) => {
                    let record = registry
                        .find(name)
                        .ok_or_else(|| anyhow!("unknown brand: {}", name))?;
                    render_brands(&BrandRegistry::new(vec![record.clone()])?, format)?
                }
                None => render_brands(&registry, format)?,
            }
        }
    };

    write_report(&text, output)?;
    if let Some(path) = output {
        info!("report written to {}", path.display());
    }
    Ok(())
}

fn read_markup(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(anyhow!("markup file not found: {}", path.display()));
    }
    let bytes = std::fs::read(path)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
