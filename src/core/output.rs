use std::fs;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::core::brands::BrandRegistry;
use crate::core::error::SentryError;
use crate::core::types::{Assessment, ContentIndicators, DomainFinding, OutputFormat};

pub fn render_assessments(
    assessments: &[Assessment],
    format: OutputFormat,
) -> Result<String, SentryError> {
    match format {
        OutputFormat::Json | OutputFormat::Jsonl => render_json(assessments, format),
        OutputFormat::Markdown => Ok(markdown_assessments(assessments)),
    }
}

pub fn render_domain(
    url: &str,
    finding: &DomainFinding,
    format: OutputFormat,
) -> Result<String, SentryError> {
    match format {
        OutputFormat::Json | OutputFormat::Jsonl => {
            render_json(std::slice::from_ref(finding), format)
        }
        OutputFormat::Markdown => {
            let mut out = format!("# Domain analysis: {}\n\n", url);
            push_domain_section(&mut out, finding);
            Ok(out)
        }
    }
}

pub fn render_content(
    url: &str,
    indicators: &ContentIndicators,
    format: OutputFormat,
) -> Result<String, SentryError> {
    match format {
        OutputFormat::Json | OutputFormat::Jsonl => {
            render_json(std::slice::from_ref(indicators), format)
        }
        OutputFormat::Markdown => {
            let mut out = format!("# Content analysis: {}\n\n", url);
            push_indicator_table(&mut out, indicators);
            Ok(out)
        }
    }
}

pub fn render_brands(
    registry: &BrandRegistry,
    format: OutputFormat,
) -> Result<String, SentryError> {
    match format {
        OutputFormat::Json | OutputFormat::Jsonl => render_json(registry.records(), format),
        OutputFormat::Markdown => {
            let mut out = String::from("# Brand registry\n\n");
            out.push_str("| # | Brand | Domains | Keywords |\n|---|---|---|---|\n");
            for (i, rec) in registry.iter().enumerate() {
                out.push_str(&format!(
                    "| {} | {} | {} | {} |\n",
                    i + 1,
                    rec.name,
                    rec.domains.join(", "),
                    rec.keywords.join(", ")
                ));
            }
            Ok(out)
        }
    }
}

/// Write to `path` (creating parent directories) or to stdout.
pub fn write_report(text: &str, path: Option<&Path>) -> Result<(), SentryError> {
    match path {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }
            fs::write(path, text)?;
            Ok(())
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(text.as_bytes())?;
            if !text.ends_with('\n') {
                stdout.write_all(b"\n")?;
            }
            Ok(())
        }
    }
}

fn render_json<T: Serialize>(items: &[T], format: OutputFormat) -> Result<String, SentryError> {
    if format == OutputFormat::Jsonl {
        let mut lines = String::new();
        for item in items {
            let json = serde_json::to_string(item).map_err(|_| SentryError::Unknown)?;
            lines.push_str(&json);
            lines.push('\n');
        }
        return Ok(lines);
    }
    if items.len() == 1 {
        return serde_json::to_string_pretty(&items[0]).map_err(|_| SentryError::Unknown);
    }
    serde_json::to_string_pretty(items).map_err(|_| SentryError::Unknown)
}

fn markdown_assessments(assessments: &[Assessment]) -> String {
    let mut out = String::new();
    if assessments.is_empty() {
        out.push_str("_No URLs assessed._\n");
    }
    for a in assessments {
        out.push_str(&format!("# Security Report: {}\n\n", a.url));
        out.push_str(&format!("**Verdict:** {}\n", a.verdict.level));
        out.push_str(&format!("[CONFIDENCE: {}%]\n\n", a.verdict.score));
        out.push_str(&format!(
            "- Assessed: {}\n- Id: {}\n\n",
            a.assessed_at.to_rfc3339(),
            a.id
        ));

        out.push_str("## Domain analysis\n\n");
        push_domain_section(&mut out, &a.domain);

        out.push_str("## Content analysis\n\n");
        match (&a.content, &a.fetch_error) {
            (Some(ind), _) => push_indicator_table(&mut out, ind),
            (None, Some(err)) => {
                out.push_str(&format!("_Page content unavailable: {}_\n\n", err))
            }
            (None, None) => out.push_str("_Page content not fetched._\n\n"),
        }

        out.push_str("## Key findings\n\n");
        if a.verdict.reasons.is_empty() {
            out.push_str("- No phishing indicators detected\n");
        }
        for reason in &a.verdict.reasons {
            out.push_str(&format!("- {}\n", reason));
        }
        out.push('\n');
    }
    out
}

fn push_domain_section(out: &mut String, finding: &DomainFinding) {
    if finding.reasons.is_empty() {
        out.push_str("- No domain-level issues found\n");
    }
    for reason in &finding.reasons {
        out.push_str(&format!("- {}\n", reason));
    }
    if let Some(imp) = &finding.brand_impersonation {
        out.push_str(&format!(
            "- Brand impersonation: {} ({:.0}% confidence)\n",
            imp.brand, imp.confidence
        ));
    }
    out.push('\n');
}

fn push_indicator_table(out: &mut String, indicators: &ContentIndicators) {
    out.push_str("| Indicator | Detected | Details |\n|---|---|---|\n");
    for (label, ind) in indicators.slots() {
        out.push_str(&format!(
            "| {} | {} | {} |\n",
            label,
            if ind.detected { "yes" } else { "no" },
            ind.details.replace('|', "\\|")
        ));
    }
    out.push('\n');
}
