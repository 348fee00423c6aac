use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};

/// Why a domain was flagged. Serialized as its human-readable message.
#[derive(Debug, Clone, PartialEq)]
pub enum DomainReason {
    InvalidUrl,
    SuspiciousTld(String),
    ExcessiveSubdomains(usize),
    IpAddressHost,
    SuspiciousCharacters,
    BrandLookalike {
        brand: String,
        host: String,
        legit_domain: String,
    },
    BrandKeyword {
        brand: String,
    },
    Homograph,
}

impl fmt::Display for DomainReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainReason::InvalidUrl => write!(f, "Invalid URL format"),
            DomainReason::SuspiciousTld(tld) => write!(f, "Suspicious TLD: {}", tld),
            DomainReason::ExcessiveSubdomains(levels) => {
                write!(f, "Excessive subdomains ({} levels)", levels)
            }
            DomainReason::IpAddressHost => write!(f, "Using IP address instead of domain name"),
            DomainReason::SuspiciousCharacters => {
                write!(f, "Contains suspicious characters in domain")
            }
            DomainReason::BrandLookalike {
                brand,
                host,
                legit_domain,
            } => write!(
                f,
                "Possible {} impersonation: \"{}\" mimics \"{}\"",
                brand, host, legit_domain
            ),
            DomainReason::BrandKeyword { brand } => write!(
                f,
                "Domain contains \"{}\" branding but is not an official {} domain",
                brand, brand
            ),
            DomainReason::Homograph => {
                write!(f, "Contains lookalike characters (homograph attack)")
            }
        }
    }
}

impl Serialize for DomainReason {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A brand the domain appears to impersonate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrandImpersonation {
    pub brand: String,
    /// Always within `[0, 100]`.
    pub confidence: f64,
    /// Set when the match came from typosquatting similarity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mimicked_domain: Option<String>,
}

/// Result of structural and lexical analysis of a URL's host.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DomainFinding {
    pub is_suspicious: bool,
    pub reasons: Vec<DomainReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand_impersonation: Option<BrandImpersonation>,
}

impl DomainFinding {
    pub fn invalid_url() -> Self {
        Self {
            is_suspicious: true,
            reasons: vec![DomainReason::InvalidUrl],
            brand_impersonation: None,
        }
    }

    pub fn flag(&mut self, reason: DomainReason) {
        self.is_suspicious = true;
        self.reasons.push(reason);
    }

    pub fn reason_messages(&self) -> Vec<String> {
        self.reasons.iter().map(|r| r.to_string()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Indicator {
    pub detected: bool,
    pub details: String,
}

impl Indicator {
    pub fn flag(&mut self, details: impl Into<String>) {
        self.detected = true;
        self.details = details.into();
    }
}

/// Page-content indicators. Every slot is always present.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContentIndicators {
    pub domain_mimicking: Indicator,
    pub suspicious_forms: Indicator,
    pub suspicious_links: Indicator,
    pub ssl_issues: Indicator,
    pub brand_impersonation: Indicator,
    pub suspicious_scripts: Indicator,
}

impl ContentIndicators {
    pub fn slots(&self) -> [(&'static str, &Indicator); 6] {
        [
            ("Domain mimicking", &self.domain_mimicking),
            ("Suspicious forms", &self.suspicious_forms),
            ("Suspicious links", &self.suspicious_links),
            ("SSL issues", &self.ssl_issues),
            ("Brand impersonation", &self.brand_impersonation),
            ("Suspicious scripts", &self.suspicious_scripts),
        ]
    }

    pub fn any_detected(&self) -> bool {
        self.slots().iter().any(|(_, ind)| ind.detected)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchOutcome {
    Html(String),
    Error(String),
}

/// Page markup or the reason it could not be retrieved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebsiteFetchResult {
    pub url: String,
    #[serde(flatten)]
    pub outcome: FetchOutcome,
}

impl WebsiteFetchResult {
    pub fn fetched(url: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            outcome: FetchOutcome::Html(html.into()),
        }
    }

    pub fn failed(url: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            outcome: FetchOutcome::Error(error.into()),
        }
    }

    pub fn html(&self) -> Option<&str> {
        match &self.outcome {
            FetchOutcome::Html(html) => Some(html),
            FetchOutcome::Error(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.outcome {
            FetchOutcome::Error(err) => Some(err),
            FetchOutcome::Html(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Safe,
    Suspicious,
    Dangerous,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RiskLevel::Safe => "SAFE",
            RiskLevel::Suspicious => "SUSPICIOUS",
            RiskLevel::Dangerous => "DANGEROUS",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Verdict {
    pub level: RiskLevel,
    /// 0-100.
    pub score: u8,
    pub reasons: Vec<String>,
}

/// Combined outcome for one URL.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    pub id: String,
    pub url: String,
    pub assessed_at: DateTime<Utc>,
    pub domain: DomainFinding,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<ContentIndicators>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fetch_error: Option<String>,
    pub verdict: Verdict,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Jsonl,
    Markdown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_result_serializes_one_of_html_or_error() {
        let ok = WebsiteFetchResult::fetched("https://example.com", "<html></html>");
        let json = serde_json::to_value(&ok).unwrap();
        assert_eq!(json["html"], "<html></html>");
        assert!(json.get("error").is_none());

        let failed =
            WebsiteFetchResult::failed("https://example.com", "Failed to fetch: 404 Not Found");
        let json = serde_json::to_value(&failed).unwrap();
        assert_eq!(json["error"], "Failed to fetch: 404 Not Found");
        assert!(json.get("html").is_none());
        assert_eq!(failed.html(), None);
    }

    #[test]
    fn reasons_serialize_as_messages() {
        let mut finding = DomainFinding::default();
        finding.flag(DomainReason::SuspiciousTld("tk".into()));
        let json = serde_json::to_value(&finding).unwrap();
        assert_eq!(json["reasons"][0], "Suspicious TLD: tk");
        assert_eq!(json["is_suspicious"], true);
        assert!(json.get("brand_impersonation").is_none());
    }

    #[test]
    fn content_indicators_default_to_clear() {
        let indicators = ContentIndicators::default();
        assert!(!indicators.any_detected());
        assert!(indicators.slots().iter().all(|(_, i)| i.details.is_empty()));
    }
}
