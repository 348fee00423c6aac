pub mod cli;
pub mod config;
pub mod core;
pub mod detectors;
pub mod pipeline;
pub mod sources;

pub use crate::core::types::{
    Assessment, BrandImpersonation, ContentIndicators, DomainFinding, DomainReason, Indicator,
    RiskLevel, Verdict, WebsiteFetchResult,
};
pub use crate::detectors::content::analyze_html;
pub use crate::detectors::domain::analyze_domain;
