use once_cell::sync::Lazy;
use regex::Regex;
use url::{ParseError, Url};

use crate::core::brands::BrandRegistry;
use crate::core::types::{DomainFinding, DomainReason};
use crate::detectors::brand::match_brand;
use crate::detectors::HOMOGLYPHS;

pub const SUSPICIOUS_TLDS: &[&str] = &[
    ".xyz", ".top", ".tk", ".ml", ".ga", ".cf", ".gq", ".zip", ".loan", ".work",
];

/// Hosts with more labels than this are flagged.
pub const MAX_HOST_LABELS: usize = 4;

// Octets are deliberately not range-checked.
static IPV4_LITERAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+\.[0-9]+\.[0-9]+\.[0-9]+$").expect("static regex"));
static LEADING_SCHEME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.-]*://").expect("static regex"));

/// Prepends `https://` when the input does not start with a scheme.
pub fn normalize_url(input: &str) -> String {
    let trimmed = input.trim();
    if LEADING_SCHEME.is_match(trimmed) {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    }
}

/// Analyze a URL against the built-in brand registry.
pub fn analyze_domain(url: &str) -> DomainFinding {
    analyze_domain_with(url, BrandRegistry::builtin())
}

/// Structural and lexical checks on the URL's host.
///
/// Rules are additive except brand impersonation, which returns as soon as it
/// fires. A URL that cannot be parsed yields a single "Invalid URL format"
/// reason.
pub fn analyze_domain_with(url: &str, registry: &BrandRegistry) -> DomainFinding {
    let Some(host) = extract_host(&normalize_url(url)) else {
        return DomainFinding::invalid_url();
    };

    let mut finding = DomainFinding::default();

    if let Some(tld) = SUSPICIOUS_TLDS.iter().find(|tld| host.ends_with(*tld)) {
        finding.flag(DomainReason::SuspiciousTld(tld.trim_start_matches('.').to_string()));
    }

    let labels = host.split('.').count();
    if labels > MAX_HOST_LABELS {
        finding.flag(DomainReason::ExcessiveSubdomains(labels));
    }

    if IPV4_LITERAL.is_match(&host) {
        finding.flag(DomainReason::IpAddressHost);
    }

    if host
        .chars()
        .any(|c| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.')))
    {
        finding.flag(DomainReason::SuspiciousCharacters);
    }

    if let Some(hit) = match_brand(&host, registry) {
        finding.flag(hit.reason(&host));
        finding.brand_impersonation = Some(hit.impersonation());
        return finding;
    }

    if HOMOGLYPHS
        .iter()
        .any(|(_, lookalikes)| host.chars().any(|c| lookalikes.contains(&c)))
    {
        finding.flag(DomainReason::Homograph);
    }

    finding
}

/// Lower-cased host with IDN labels shown in Unicode.
pub(crate) fn extract_host(normalized: &str) -> Option<String> {
    let host = match Url::parse(normalized) {
        Ok(url) => url.host_str()?.to_string(),
        // Dotted quads with out-of-range octets are still IP-looking hosts.
        Err(ParseError::InvalidIpv4Address) => {
            let raw = raw_authority_host(normalized)?;
            if !IPV4_LITERAL.is_match(&raw) {
                return None;
            }
            raw
        }
        Err(_) => return None,
    };
    if host.is_empty() {
        return None;
    }
    if host.starts_with('[') {
        return Some(host);
    }
    let (unicode, result) = idna::domain_to_unicode(&host);
    let host = if result.is_ok() { unicode } else { host };
    Some(host.to_lowercase())
}

fn raw_authority_host(normalized: &str) -> Option<String> {
    let (_, rest) = normalized.split_once("://")?;
    let authority = rest.split(['/', '?', '#']).next()?;
    let host_port = authority.rsplit_once('@').map_or(authority, |(_, h)| h);
    let host = host_port.split(':').next()?;
    if host.is_empty() {
        None
    } else {
        Some(host.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn official_domain_is_clean() {
        let finding = analyze_domain("amazon.com");
        assert!(!finding.is_suspicious);
        assert!(finding.reasons.is_empty());
        assert!(finding.brand_impersonation.is_none());
    }

    #[test]
    fn brand_match_keeps_earlier_reasons_and_stops() {
        let finding = analyze_domain("login.secure-amazon-update.tk");
        assert!(finding.is_suspicious);
        assert_eq!(
            finding.reason_messages(),
            vec![
                "Suspicious TLD: tk".to_string(),
                "Domain contains \"Amazon\" branding but is not an official Amazon domain"
                    .to_string(),
            ]
        );
        let imp = finding.brand_impersonation.unwrap();
        assert_eq!(imp.brand, "Amazon");
        assert_eq!(imp.confidence, 85.0);
        assert_eq!(imp.mimicked_domain, None);
    }

    #[test]
    fn out_of_range_dotted_quad_is_still_an_ip_host() {
        let finding = analyze_domain("999.999.999.999");
        assert!(finding.is_suspicious);
        assert_eq!(
            finding.reason_messages(),
            vec!["Using IP address instead of domain name".to_string()]
        );
    }

    #[test]
    fn malformed_url_is_reported_not_raised() {
        for input in ["https://", "http://exa mple.com", "https://[::1"] {
            let finding = analyze_domain(input);
            assert!(finding.is_suspicious, "{input}");
            assert_eq!(finding.reasons, vec![DomainReason::InvalidUrl], "{input}");
        }
    }

    #[test]
    fn counts_host_labels() {
        let finding = analyze_domain("https://a.b.c.d.example.net/path");
        assert_eq!(finding.reasons, vec![DomainReason::ExcessiveSubdomains(6)]);

        let finding = analyze_domain("https://www.example.co.uk");
        assert!(!finding.is_suspicious);
    }

    #[test]
    fn typosquat_reports_similarity_confidence() {
        let finding = analyze_domain("http://paypa1.com/signin");
        let imp = finding.brand_impersonation.clone().unwrap();
        assert_eq!(imp.brand, "PayPal");
        assert!((imp.confidence - 90.0).abs() < 1e-9);
        assert_eq!(imp.mimicked_domain.as_deref(), Some("paypal.com"));
        assert_eq!(
            finding.reason_messages(),
            vec!["Possible PayPal impersonation: \"paypa1.com\" mimics \"paypal.com\"".to_string()]
        );
    }

    #[test]
    fn idn_homograph_is_decoded_and_flagged() {
        // Cyrillic 'е' in "ex\u{0435}mple"; no brand keyword involved.
        let finding = analyze_domain("https://ex\u{0435}mple.org");
        assert_eq!(
            finding.reasons,
            vec![DomainReason::SuspiciousCharacters, DomainReason::Homograph]
        );
    }

    #[test]
    fn digit_lookalike_without_brand_is_homograph() {
        let finding = analyze_domain("g00dstuff.net");
        assert_eq!(finding.reasons, vec![DomainReason::Homograph]);
    }

    #[test]
    fn host_is_lower_cased() {
        let finding = analyze_domain("HTTPS://WWW.AMAZON.COM/deals");
        assert!(!finding.is_suspicious);
    }

    #[test]
    fn normalize_only_adds_missing_scheme() {
        assert_eq!(normalize_url(" example.com "), "https://example.com");
        assert_eq!(normalize_url("http://example.com"), "http://example.com");
        assert_eq!(normalize_url("HTTPS://Example.com"), "HTTPS://Example.com");
        assert_eq!(
            normalize_url("example.com/r?u=http://x"),
            "https://example.com/r?u=http://x"
        );
    }

    #[test]
    fn embedded_url_in_query_does_not_hide_missing_scheme() {
        let finding = analyze_domain("paypa1.com/login?next=https://paypal.com");
        let imp = finding.brand_impersonation.clone().unwrap();
        assert_eq!(imp.brand, "PayPal");
        assert!((imp.confidence - 90.0).abs() < 1e-9);
        assert!(!finding.reasons.contains(&DomainReason::InvalidUrl));

        let finding = analyze_domain("cheap-deals.top/redirect?to=http://example.com");
        assert_eq!(finding.reasons, vec![DomainReason::SuspiciousTld("top".into())]);
    }

    #[test]
    fn repeated_analysis_is_identical() {
        let a = analyze_domain("secure-paypal-login.xyz");
        let b = analyze_domain("secure-paypal-login.xyz");
        assert_eq!(a, b);
    }
}
