use crate::core::brands::BrandRegistry;
use crate::core::similarity::similarity;
use crate::core::types::{BrandImpersonation, DomainReason};
use crate::detectors::HOMOGLYPHS;

/// Similarity above which a keyword-bearing host counts as a typosquat.
pub const SIMILARITY_THRESHOLD: f64 = 0.7;
/// Confidence reported when only a brand keyword matched.
pub const KEYWORD_CONFIDENCE: f64 = 85.0;

#[derive(Debug, Clone, PartialEq)]
pub enum MatchKind {
    Lookalike { legit_domain: String },
    Keyword,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BrandMatch {
    pub brand: String,
    pub confidence: f64,
    pub kind: MatchKind,
}

impl BrandMatch {
    pub fn reason(&self, host: &str) -> DomainReason {
        match &self.kind {
            MatchKind::Lookalike { legit_domain } => DomainReason::BrandLookalike {
                brand: self.brand.clone(),
                host: host.to_string(),
                legit_domain: legit_domain.clone(),
            },
            MatchKind::Keyword => DomainReason::BrandKeyword {
                brand: self.brand.clone(),
            },
        }
    }

    pub fn impersonation(&self) -> BrandImpersonation {
        BrandImpersonation {
            brand: self.brand.clone(),
            confidence: self.confidence,
            mimicked_domain: match &self.kind {
                MatchKind::Lookalike { legit_domain } => Some(legit_domain.clone()),
                MatchKind::Keyword => None,
            },
        }
    }
}

/// First brand in registry order that `host` (lower-cased) impersonates.
///
/// Official domains and their subdomains never match their own brand. A
/// brand keyword must appear in the host, or in the host with lookalike
/// characters folded back to Latin letters, before similarity is consulted.
pub fn match_brand(host: &str, registry: &BrandRegistry) -> Option<BrandMatch> {
    let skeletons = skeletons(host);
    for record in registry.iter() {
        if record.is_legit_host(host) {
            continue;
        }
        let has_keyword = record
            .compact_keywords()
            .any(|kw| skeletons.iter().any(|s| s.contains(&kw)));
        if !has_keyword {
            continue;
        }

        for legit in &record.domains {
            let score = similarity(host, legit);
            if score > SIMILARITY_THRESHOLD {
                return Some(BrandMatch {
                    brand: record.name.clone(),
                    confidence: score * 100.0,
                    kind: MatchKind::Lookalike {
                        legit_domain: legit.clone(),
                    },
                });
            }
        }

        return Some(BrandMatch {
            brand: record.name.clone(),
            confidence: KEYWORD_CONFIDENCE,
            kind: MatchKind::Keyword,
        });
    }
    None
}

/// The host itself plus confusable-folded variants ('1' read as 'l' and as 'i').
fn skeletons(host: &str) -> Vec<String> {
    let mut out = vec![host.to_string()];
    for one_as in ['l', 'i'] {
        let folded = fold_confusables(host, one_as);
        if !out.contains(&folded) {
            out.push(folded);
        }
    }
    out
}

fn fold_confusables(host: &str, one_as: char) -> String {
    host.chars()
        .map(|c| match c {
            '1' => one_as,
            '0' => 'o',
            '3' => 'e',
            '4' => 'a',
            '5' => 's',
            '7' => 't',
            _ => HOMOGLYPHS
                .iter()
                .find(|(_, lookalikes)| lookalikes.contains(&c))
                .map(|(latin, _)| *latin)
                .unwrap_or(c),
        })
        .collect()
}
