use crate::core::types::{
    ContentIndicators, DomainFinding, DomainReason, Indicator, RiskLevel, Verdict,
};

pub const DANGEROUS_FLOOR: u8 = 80;
pub const SUSPICIOUS_FLOOR: u8 = 50;

/// Combine domain and (optional) content findings into a verdict.
pub fn score(domain: &DomainFinding, content: Option<&ContentIndicators>) -> Verdict {
    let mut total: u32 = 0;
    let mut floor: u8 = 0;
    let mut reasons = Vec::new();

    for reason in &domain.reasons {
        total += domain_weight(reason);
        reasons.push(reason.to_string());
    }

    if let Some(imp) = &domain.brand_impersonation {
        let confidence = imp.confidence.round().clamp(0.0, 100.0) as u8;
        floor = floor.max(DANGEROUS_FLOOR.max(confidence));
    }

    if let Some(ind) = content {
        for (label, indicator, weight) in content_weights(ind) {
            if indicator.detected {
                total += weight;
                reasons.push(format!("{}: {}", label, indicator.details));
            }
        }
        if ind.suspicious_forms.detected && ind.ssl_issues.detected {
            floor = floor.max(DANGEROUS_FLOOR);
        }
    }

    let score = (total.min(100) as u8).max(floor);
    Verdict {
        level: level_for(score),
        score,
        reasons,
    }
}

/// Fill the reserved `domain_mimicking` slot from the domain analysis.
pub fn cross_reference(domain: &DomainFinding, content: &mut ContentIndicators) {
    if let Some(imp) = &domain.brand_impersonation {
        let details = match &imp.mimicked_domain {
            Some(legit) => format!(
                "Domain imitates {} ({}) with {:.0}% confidence",
                imp.brand, legit, imp.confidence
            ),
            None => format!(
                "Domain uses {} branding with {:.0}% confidence",
                imp.brand, imp.confidence
            ),
        };
        content.domain_mimicking.flag(details);
    }
}

pub fn level_for(score: u8) -> RiskLevel {
    if score >= DANGEROUS_FLOOR {
        RiskLevel::Dangerous
    } else if score >= SUSPICIOUS_FLOOR {
        RiskLevel::Suspicious
    } else {
        RiskLevel::Safe
    }
}

fn domain_weight(reason: &DomainReason) -> u32 {
    match reason {
        DomainReason::InvalidUrl => 50,
        DomainReason::SuspiciousTld(_) => 50,
        DomainReason::ExcessiveSubdomains(_) => 30,
        DomainReason::IpAddressHost => 50,
        DomainReason::SuspiciousCharacters => 40,
        DomainReason::Homograph => 60,
        // Brand hits set a floor instead.
        DomainReason::BrandLookalike { .. } | DomainReason::BrandKeyword { .. } => 0,
    }
}

fn content_weights(ind: &ContentIndicators) -> [(&'static str, &Indicator, u32); 6] {
    [
        ("Domain mimicking", &ind.domain_mimicking, 30),
        ("Suspicious forms", &ind.suspicious_forms, 30),
        ("Suspicious links", &ind.suspicious_links, 20),
        ("SSL issues", &ind.ssl_issues, 20),
        ("Brand impersonation", &ind.brand_impersonation, 50),
        ("Suspicious scripts", &ind.suspicious_scripts, 50),
    ]
}
