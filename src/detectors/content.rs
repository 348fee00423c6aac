use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use crate::core::brands::BrandRegistry;
use crate::core::types::ContentIndicators;
use crate::detectors::domain::normalize_url;

/// More cross-origin links than this is flagged.
pub const EXTERNAL_LINK_LIMIT: usize = 10;

const LOGIN_TERMS: &[&str] = &["login", "signin", "sign in"];
const PAYMENT_TERMS: &[&str] = &["credit", "card", "cvv"];
const OBFUSCATION_MARKERS: &[&str] = &["eval(", "fromcharcode", "unescape("];

static HREF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)href=["']([^"']+)["']"#).expect("static regex"));
static PASSWORD_INPUT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"type\s*=\s*["']password["']"#).expect("static regex"));
static IFRAME_WITH_SRC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<iframe\b[^>]*\bsrc\s*=").expect("static regex"));

/// Analyze page markup against the built-in brand registry.
pub fn analyze_html(html: &str, url: &str) -> ContentIndicators {
    analyze_html_with(html, url, BrandRegistry::builtin())
}

/// Content-level indicators for page markup fetched from `url`.
///
/// `domain_mimicking` is never set here; see the scorer's cross-reference.
pub fn analyze_html_with(html: &str, url: &str, registry: &BrandRegistry) -> ContentIndicators {
    let mut indicators = ContentIndicators::default();
    let lower = html.to_lowercase();

    if PASSWORD_INPUT.is_match(&lower) {
        let has_login = LOGIN_TERMS.iter().any(|t| lower.contains(t));
        let has_payment = PAYMENT_TERMS.iter().any(|t| lower.contains(t));
        if has_payment {
            indicators
                .suspicious_forms
                .flag("Contains credit card/payment form");
        } else if has_login {
            indicators
                .suspicious_forms
                .flag("Contains password/login form");
        }
    }

    if let Some(external) = count_external_links(html, url) {
        if external > EXTERNAL_LINK_LIMIT {
            indicators
                .suspicious_links
                .flag(format!("High number of external links ({})", external));
        }
    }

    if OBFUSCATION_MARKERS.iter().any(|m| lower.contains(m)) {
        indicators
            .suspicious_scripts
            .flag("Contains potentially obfuscated JavaScript");
    }

    // Shares the links slot and overrides the fan-out message.
    if IFRAME_WITH_SRC.is_match(&lower) {
        indicators
            .suspicious_links
            .flag("Contains hidden iframes (possible redirect)");
    }

    if !has_https_scheme(url) {
        indicators
            .ssl_issues
            .flag("Site does not use HTTPS encryption");
    }

    let url_lower = url.to_lowercase();
    for record in registry.iter() {
        let mentioned = record.keywords.iter().any(|k| lower.contains(k.as_str()));
        let on_official = record.domains.iter().any(|d| url_lower.contains(d.as_str()));
        if mentioned && !on_official {
            indicators.brand_impersonation.flag(format!(
                "Page mentions {} but domain doesn't match official domains",
                record.name
            ));
            break;
        }
    }

    indicators
}

/// Absolute links whose host differs from the page host. `None` when the page
/// URL itself has no host. Unparseable links are skipped.
pub fn count_external_links(html: &str, page_url: &str) -> Option<usize> {
    let page = Url::parse(&normalize_url(page_url)).ok()?;
    let page_host = page.host_str()?.to_string();

    let count = HREF
        .captures_iter(html)
        .filter_map(|cap| cap.get(1).map(|m| m.as_str().trim()))
        .filter(|link| {
            link.get(..4)
                .map_or(false, |p| p.eq_ignore_ascii_case("http"))
        })
        .filter_map(|link| match Url::parse(link) {
            Ok(parsed) => parsed.host_str().map(|h| h != page_host),
            Err(err) => {
                tracing::trace!("skipping malformed link {}: {}", link, err);
                None
            }
        })
        .filter(|external| *external)
        .count();
    Some(count)
}

fn has_https_scheme(url: &str) -> bool {
    url.trim()
        .get(..8)
        .map_or(false, |p| p.eq_ignore_ascii_case("https://"))
}
