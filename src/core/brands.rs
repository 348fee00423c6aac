//! Known brands, their official domains and the keywords that signal them.
//!
//! Order matters: matching walks the registry front to back and stops at the
//! first brand that fires, so earlier entries take precedence.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::core::error::SentryError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandRecord {
    pub name: String,
    pub domains: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl BrandRecord {
    /// Exact official domain or a proper subdomain of one.
    pub fn is_legit_host(&self, host: &str) -> bool {
        self.domains.iter().any(|d| {
            host == d
                || host
                    .strip_suffix(d.as_str())
                    .map_or(false, |prefix| prefix.ends_with('.'))
        })
    }

    /// Keywords with internal whitespace removed ("bank of america" -> "bankofamerica").
    pub fn compact_keywords(&self) -> impl Iterator<Item = String> + '_ {
        self.keywords
            .iter()
            .map(|k| k.split_whitespace().collect::<String>())
            .filter(|k| !k.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrandRegistry {
    records: Vec<BrandRecord>,
}

static BUILTIN: Lazy<BrandRegistry> = Lazy::new(|| BrandRegistry {
    records: builtin_records(),
});

impl BrandRegistry {
    pub fn builtin() -> &'static BrandRegistry {
        &BUILTIN
    }

    /// Validates and normalizes records; order is preserved.
    pub fn new(records: Vec<BrandRecord>) -> Result<Self, SentryError> {
        let mut normalized = Vec::with_capacity(records.len());
        for rec in records {
            let name = rec.name.trim().to_string();
            if name.is_empty() {
                return Err(SentryError::Config("brand with empty name".into()));
            }
            let domains: Vec<String> = rec
                .domains
                .iter()
                .map(|d| d.trim().trim_start_matches('.').to_lowercase())
                .filter(|d| !d.is_empty())
                .collect();
            if domains.is_empty() {
                return Err(SentryError::Config(format!(
                    "brand {} must list at least one domain",
                    name
                )));
            }
            let keywords = rec
                .keywords
                .iter()
                .map(|k| k.trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect();
            normalized.push(BrandRecord {
                name,
                domains,
                keywords,
            });
        }
        Ok(Self {
            records: normalized,
        })
    }

    /// Built-in brands followed by `extra`.
    pub fn extended(extra: Vec<BrandRecord>) -> Result<Self, SentryError> {
        let mut records = builtin_records();
        records.extend(extra);
        Self::new(records)
    }

    pub fn iter(&self) -> impl Iterator<Item = &BrandRecord> {
        self.records.iter()
    }

    pub fn records(&self) -> &[BrandRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn find(&self, name: &str) -> Option<&BrandRecord> {
        self.records
            .iter()
            .find(|r| r.name.eq_ignore_ascii_case(name.trim()))
    }
}

fn brand(name: &str, domains: &[&str], keywords: &[&str]) -> BrandRecord {
    BrandRecord {
        name: name.to_string(),
        domains: domains.iter().map(|d| d.to_string()).collect(),
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
    }
}

fn builtin_records() -> Vec<BrandRecord> {
    vec![
        brand("PayPal", &["paypal.com", "paypal.me"], &["paypal", "pay pal"]),
        brand(
            "Amazon",
            &["amazon.com", "amzn.to", "amazon.co.uk", "amazon.de", "amazon.in"],
            &["amazon", "amzn"],
        ),
        brand(
            "Microsoft",
            &["microsoft.com", "live.com", "outlook.com", "office.com", "windows.com"],
            &["microsoft", "msft", "windows", "office"],
        ),
        brand(
            "Google",
            &["google.com", "gmail.com", "youtube.com", "goo.gl"],
            &["google", "gmail"],
        ),
        brand(
            "Apple",
            &["apple.com", "icloud.com", "me.com"],
            &["apple", "icloud", "itunes"],
        ),
        brand(
            "Facebook",
            &["facebook.com", "fb.com", "messenger.com", "instagram.com"],
            &["facebook", "fb.com", "instagram"],
        ),
        brand("Netflix", &["netflix.com"], &["netflix", "netflex"]),
        brand(
            "Bank of America",
            &["bankofamerica.com", "bofa.com"],
            &["bank of america", "bofa"],
        ),
        brand("Chase", &["chase.com"], &["chase", "jpmorgan"]),
        brand("Wells Fargo", &["wellsfargo.com"], &["wells fargo", "wellsfargo"]),
        brand("DHL", &["dhl.com", "dhl.de"], &["dhl"]),
        brand("FedEx", &["fedex.com"], &["fedex", "fed ex"]),
        brand("WhatsApp", &["whatsapp.com", "wa.me"], &["whatsapp", "whats app"]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_order_is_stable() {
        let names: Vec<&str> = BrandRegistry::builtin()
            .iter()
            .map(|b| b.name.as_str())
            .collect();
        assert_eq!(names.first(), Some(&"PayPal"));
        assert_eq!(names.last(), Some(&"WhatsApp"));
        assert_eq!(names.len(), 13);
        assert!(BrandRegistry::builtin().iter().all(|b| !b.domains.is_empty()));
    }

    #[test]
    fn legit_host_requires_label_boundary() {
        let paypal = BrandRegistry::builtin().find("paypal").unwrap();
        assert!(paypal.is_legit_host("paypal.com"));
        assert!(paypal.is_legit_host("www.paypal.com"));
        assert!(!paypal.is_legit_host("evilpaypal.com"));
        assert!(!paypal.is_legit_host("paypal.com.evil.net"));
    }

    #[test]
    fn compact_keywords_strip_whitespace() {
        let boa = BrandRegistry::builtin().find("Bank of America").unwrap();
        let compact: Vec<String> = boa.compact_keywords().collect();
        assert_eq!(compact, vec!["bankofamerica", "bofa"]);
    }

    #[test]
    fn rejects_brand_without_domains() {
        let err = BrandRegistry::new(vec![BrandRecord {
            name: "Acme".into(),
            domains: vec![],
            keywords: vec!["acme".into()],
        }]);
        assert!(err.is_err());
    }

    #[test]
    fn extension_appends_after_builtin() {
        let reg = BrandRegistry::extended(vec![BrandRecord {
            name: "Acme Bank".into(),
            domains: vec!["AcmeBank.example".into()],
            keywords: vec!["Acme Bank".into()],
        }])
        .unwrap();
        assert_eq!(reg.len(), 14);
        let acme = reg.records().last().unwrap();
        assert_eq!(acme.domains, vec!["acmebank.example"]);
        assert_eq!(acme.keywords, vec!["acme bank"]);
    }
}
