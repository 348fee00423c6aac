use std::{sync::Arc, time::Duration};

use tokio::{sync::Semaphore, task::JoinSet};
use tracing::{debug, info, warn};

use crate::{
    config::AppConfig,
    core::{
        brands::BrandRegistry,
        error::SentryError,
        hash::assessment_id,
        time::now_utc,
        types::{
            Assessment, ContentIndicators, DomainFinding, DomainReason, FetchOutcome,
            WebsiteFetchResult,
        },
    },
    detectors::{
        content::analyze_html_with,
        domain::{analyze_domain_with, normalize_url},
    },
    pipeline::scorer::{cross_reference, score},
    sources::fetch::{build_client, fetch_website_within},
};

/// Fetches pages and runs the heuristics with a fixed configuration and brand registry.
pub struct Engine {
    client: reqwest::Client,
    pub config: AppConfig,
    registry: BrandRegistry,
    semaphore: Arc<Semaphore>,
}

impl Engine {
    pub fn new(config: AppConfig) -> Result<Self, SentryError> {
        let timeout = Duration::from_millis(config.timeout_ms);
        let client = build_client(&config.user_agent, timeout, config.max_redirects)?;
        let registry = config.registry()?;
        info!(
            "engine ready: {} brands, {} concurrent fetches",
            registry.len(),
            config.max_concurrent_requests
        );

        Ok(Self {
            client,
            registry,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent_requests.max(1))),
            config,
        })
    }

    pub fn registry(&self) -> &BrandRegistry {
        &self.registry
    }

    pub fn analyze_domain(&self, url: &str) -> DomainFinding {
        analyze_domain_with(url, &self.registry)
    }

    pub fn analyze_html(&self, html: &str, url: &str) -> ContentIndicators {
        analyze_html_with(html, url, &self.registry)
    }

    pub async fn fetch(&self, url: &str) -> WebsiteFetchResult {
        let deadline = Duration::from_millis(self.config.timeout_ms);
        match self.semaphore.acquire().await {
            Ok(_permit) => fetch_website_within(&self.client, url, deadline).await,
            Err(_) => {
                WebsiteFetchResult::failed(normalize_url(url), SentryError::Unknown.to_string())
            }
        }
    }

    /// Domain analysis always; page fetch and content analysis when `fetch` is set.
    pub async fn assess(&self, url: &str, fetch: bool) -> Assessment {
        let normalized = normalize_url(url);
        let domain = self.analyze_domain(&normalized);

        let mut content = None;
        let mut fetch_error = None;
        if fetch && !domain.reasons.contains(&DomainReason::InvalidUrl) {
            let page = self.fetch(&normalized).await;
            match page.outcome {
                FetchOutcome::Html(html) => {
                    let mut indicators = self.analyze_html(&html, &page.url);
                    cross_reference(&domain, &mut indicators);
                    content = Some(indicators);
                }
                FetchOutcome::Error(err) => fetch_error = Some(err),
            }
        } else if fetch {
            debug!("skipping fetch for unparseable url {}", normalized);
        }

        let assessment = build_assessment(normalized, domain, content, fetch_error);
        info!(
            "assessed {}: {} ({})",
            assessment.url, assessment.verdict.level, assessment.verdict.score
        );
        assessment
    }

    /// Assess several URLs concurrently; results keep the input order.
    pub async fn assess_many(self: &Arc<Self>, urls: &[String], fetch: bool) -> Vec<Assessment> {
        let mut set = JoinSet::new();
        for (idx, url) in urls.iter().cloned().enumerate() {
            let engine = Arc::clone(self);
            set.spawn(async move { (idx, engine.assess(&url, fetch).await) });
        }

        let mut done = Vec::with_capacity(urls.len());
        while let Some(joined) = set.join_next().await {
            match joined {
                Ok(pair) => done.push(pair),
                Err(err) => warn!("assessment task failed: {}", err),
            }
        }
        done.sort_by_key(|(idx, _)| *idx);
        done.into_iter().map(|(_, a)| a).collect()
    }
}

pub fn build_assessment(
    url: String,
    domain: DomainFinding,
    content: Option<ContentIndicators>,
    fetch_error: Option<String>,
) -> Assessment {
    let verdict = score(&domain, content.as_ref());
    Assessment {
        id: assessment_id(&url, &domain, content.as_ref()),
        url,
        assessed_at: now_utc(),
        domain,
        content,
        fetch_error,
        verdict,
    }
}
