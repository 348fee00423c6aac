use sha2::{Digest, Sha256};

use crate::core::types::{ContentIndicators, DomainFinding};

pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Stable id for an assessment: same URL and findings, same id.
pub fn assessment_id(
    url: &str,
    domain: &DomainFinding,
    content: Option<&ContentIndicators>,
) -> String {
    let payload = serde_json::json!({
        "url": url,
        "domain": domain,
        "content": content,
    });
    format!("asm_{}", sha256_hex(payload.to_string().as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::DomainReason;

    #[test]
    fn assessment_id_is_deterministic() {
        let mut finding = DomainFinding::default();
        finding.flag(DomainReason::IpAddressHost);
        let a = assessment_id("https://10.0.0.1", &finding, None);
        let b = assessment_id("https://10.0.0.1", &finding, None);
        assert_eq!(a, b);
        assert!(a.starts_with("asm_"));
    }

    #[test]
    fn assessment_id_tracks_findings() {
        let clean = DomainFinding::default();
        let mut flagged = DomainFinding::default();
        flagged.flag(DomainReason::Homograph);
        assert_ne!(
            assessment_id("https://example.com", &clean, None),
            assessment_id("https://example.com", &flagged, None)
        );
    }
}
