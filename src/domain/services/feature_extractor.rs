// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 特征聚合器
//!
//! 单次调用的流程固定为
//! `Init → LexicalDone → DomainResolved → ProbesDispatched → ContentFetched → Merged → Done`，
//! 任何探测失败都只影响对应特征的取值，不会中断流程。

use crate::config::settings::ProbeSettings;
use crate::domain::models::feature::{
    FeatureName, FeatureValue, FeatureVector, SCHEMA_VERSION, SENTINEL,
};
use crate::domain::models::fetched_document::{FetchedDocument, FetchedPage};
use crate::domain::models::probe::{ProbeResult, ProbeStatus, UnavailableReason};
use crate::domain::models::registrable_domain::RegistrableDomain;
use crate::domain::models::whois_record::WhoisRecord;
use crate::domain::services::content_features::ContentFeatures;
use crate::domain::services::domain_resolver;
use crate::domain::services::lexical_analyzer::{LexicalAnalyzer, LexicalFeatures};
use crate::engines::dns_probe::ResolverDnsProbe;
use crate::engines::reqwest_engine::ReqwestEngine;
use crate::engines::tls_probe::RustlsTlsProbe;
use crate::engines::traits::{ContentFetcher, DnsProbe, ProbeError, TlsProbe, WhoisProbe};
use crate::engines::whois_probe::TcpWhoisProbe;
use crate::infrastructure::metrics;
use crate::utils::errors::ExtractionError;
use crate::utils::url_utils;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::future::Future;
use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::Instant as Deadline;
use tracing::{debug, info, warn};

const SECONDS_PER_DAY: i64 = 86_400;

/// 提取流程阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionStage {
    Init,
    LexicalDone,
    DomainResolved,
    ProbesDispatched,
    ContentFetched,
    Merged,
    Done,
}

impl ExtractionStage {
    /// 下一阶段；`Done` 为终态
    pub fn next(self) -> Self {
        match self {
            ExtractionStage::Init => ExtractionStage::LexicalDone,
            ExtractionStage::LexicalDone => ExtractionStage::DomainResolved,
            ExtractionStage::DomainResolved => ExtractionStage::ProbesDispatched,
            ExtractionStage::ProbesDispatched => ExtractionStage::ContentFetched,
            ExtractionStage::ContentFetched => ExtractionStage::Merged,
            ExtractionStage::Merged | ExtractionStage::Done => ExtractionStage::Done,
        }
    }
}

/// 记录单次调用经过的阶段
#[derive(Debug)]
struct StageTracker {
    current: ExtractionStage,
    visited: Vec<ExtractionStage>,
}

impl StageTracker {
    fn new() -> Self {
        Self {
            current: ExtractionStage::Init,
            visited: vec![ExtractionStage::Init],
        }
    }

    fn advance(&mut self) {
        let next = self.current.next();
        debug!(from = ?self.current, to = ?next, "Extraction stage transition");
        self.current = next;
        self.visited.push(next);
    }

    fn into_visited(self) -> Vec<ExtractionStage> {
        self.visited
    }
}

/// 各探测的状态
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeSummary {
    pub tls: ProbeStatus,
    pub dns: ProbeStatus,
    pub whois: ProbeStatus,
    pub fetch: ProbeStatus,
}

/// 单次提取的完整结果
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionReport {
    /// 调用方传入的URL
    pub url: String,
    /// 可注册域名；IP主机或无法解析时为空
    pub registrable_domain: Option<String>,
    pub schema_version: &'static str,
    /// 按训练列顺序排列的特征
    pub features: FeatureVector,
    pub probes: ProbeSummary,
    pub stages: Vec<ExtractionStage>,
    pub elapsed_ms: u64,
}

/// 四个并发工作单元的结果
struct ProbeOutcomes {
    tls: ProbeResult<bool>,
    dns: ProbeResult<Vec<Ipv4Addr>>,
    whois: ProbeResult<WhoisRecord>,
    fetch: ProbeResult<FetchedPage>,
}

/// 特征提取器
///
/// 无跨调用的可变状态，可在多个任务间共享并发调用
pub struct FeatureExtractor {
    tls: Arc<dyn TlsProbe>,
    dns: Arc<dyn DnsProbe>,
    whois: Arc<dyn WhoisProbe>,
    fetcher: Arc<dyn ContentFetcher>,
    settings: ProbeSettings,
}

impl FeatureExtractor {
    /// 使用默认网络实现创建提取器
    pub fn new(settings: ProbeSettings) -> Result<Self, ExtractionError> {
        let tls = RustlsTlsProbe::new()
            .map_err(|e| ExtractionError::InitializationFailed(format!("TLS client: {}", e)))?;
        let fetcher = ReqwestEngine::new(&settings)
            .map_err(|e| ExtractionError::InitializationFailed(format!("HTTP client: {}", e)))?;
        let dns = ResolverDnsProbe::new(&settings)
            .map_err(|e| ExtractionError::InitializationFailed(format!("DNS resolver: {}", e)))?;
        let whois = TcpWhoisProbe::new(settings.whois_server.clone());

        Ok(Self::with_probes(
            settings,
            Arc::new(tls),
            Arc::new(dns),
            Arc::new(whois),
            Arc::new(fetcher),
        ))
    }

    /// 使用指定的探测实现创建提取器
    pub fn with_probes(
        settings: ProbeSettings,
        tls: Arc<dyn TlsProbe>,
        dns: Arc<dyn DnsProbe>,
        whois: Arc<dyn WhoisProbe>,
        fetcher: Arc<dyn ContentFetcher>,
    ) -> Self {
        Self {
            tls,
            dns,
            whois,
            fetcher,
            settings,
        }
    }

    /// 只返回特征向量
    pub async fn extract_all_features(&self, url: &str) -> Result<FeatureVector, ExtractionError> {
        self.extract(url).await.map(|report| report.features)
    }

    /// 提取全部特征
    ///
    /// 只有输入完全无法解析为URL时返回错误，其余失败都降级为哨兵值
    pub async fn extract(&self, url: &str) -> Result<ExtractionReport, ExtractionError> {
        let started = Instant::now();
        let deadline = Deadline::now() + self.settings.call_deadline();
        let mut stages = StageTracker::new();

        let parsed = match url_utils::parse_lenient(url) {
            Ok(parsed) => parsed,
            Err(e) => {
                metrics::record_extraction("invalid_url", started.elapsed());
                return Err(ExtractionError::InvalidUrl(format!("{}: {}", url, e)));
            }
        };

        let domain = domain_resolver::resolve_parsed(&parsed);
        let lexical = LexicalAnalyzer::analyze(url, domain.as_ref());
        stages.advance();

        debug!(url, domain = ?domain.as_ref().map(|d| d.as_str()), "Registrable domain resolved");
        stages.advance();

        let target = domain.as_ref().map(|d| d.as_str());
        stages.advance();
        let outcomes = self.run_probes(target, parsed.as_str(), deadline).await;

        let redirect_hops = outcomes.fetch.as_success().map(|page| page.redirect_count);
        let document = outcomes
            .fetch
            .as_success()
            .cloned()
            .and_then(FetchedDocument::parse);
        let content = ContentFeatures::analyze(document.as_ref(), domain.as_ref());
        stages.advance();

        let features = merge(
            &lexical,
            &content,
            &outcomes,
            domain.as_ref(),
            redirect_hops,
            Utc::now(),
        );
        stages.advance();

        let probes = ProbeSummary {
            tls: outcomes.tls.status(),
            dns: outcomes.dns.status(),
            whois: outcomes.whois.status(),
            fetch: outcomes.fetch.status(),
        };
        stages.advance();

        let elapsed = started.elapsed();
        metrics::record_extraction("ok", elapsed);
        info!(
            url,
            elapsed_ms = elapsed.as_millis() as u64,
            statistical_report = features.get(FeatureName::StatisticalReport).as_f64(),
            "Feature extraction completed"
        );

        Ok(ExtractionReport {
            url: url.to_string(),
            registrable_domain: domain.map(|d| d.as_str().to_string()),
            schema_version: SCHEMA_VERSION,
            features,
            probes,
            stages: stages.into_visited(),
            elapsed_ms: elapsed.as_millis() as u64,
        })
    }

    /// 并发运行四个工作单元并等待全部结束
    async fn run_probes(
        &self,
        domain: Option<&str>,
        url: &str,
        deadline: Deadline,
    ) -> ProbeOutcomes {
        let tls = async {
            match domain {
                Some(d) => {
                    run_probe(
                        self.tls.name(),
                        self.settings.tls_timeout(),
                        deadline,
                        self.tls.peer_certificate_present(d),
                    )
                    .await
                }
                None => skipped(self.tls.name()),
            }
        };
        let dns = async {
            match domain {
                Some(d) => {
                    run_probe(
                        self.dns.name(),
                        self.settings.dns_timeout(),
                        deadline,
                        self.dns.lookup_a(d),
                    )
                    .await
                }
                None => skipped(self.dns.name()),
            }
        };
        let whois = async {
            match domain {
                Some(d) => {
                    run_probe(
                        self.whois.name(),
                        self.settings.whois_timeout(),
                        deadline,
                        self.whois.query(d),
                    )
                    .await
                }
                None => skipped(self.whois.name()),
            }
        };
        let fetch = run_probe(
            self.fetcher.name(),
            self.settings.fetch_timeout(),
            deadline,
            self.fetcher.fetch(url),
        );

        let (tls, dns, whois, fetch) = tokio::join!(tls, dns, whois, fetch);
        ProbeOutcomes {
            tls,
            dns,
            whois,
            fetch,
        }
    }
}

/// 在自身超时与调用截止时间中较早者之前运行探测
async fn run_probe<T, F>(
    name: &'static str,
    timeout: Duration,
    deadline: Deadline,
    probe: F,
) -> ProbeResult<T>
where
    F: Future<Output = Result<T, ProbeError>>,
{
    let effective = (Deadline::now() + timeout).min(deadline);

    let (result, outcome) = match tokio::time::timeout_at(effective, probe).await {
        Ok(Ok(value)) => (ProbeResult::Success(value), "success"),
        Ok(Err(e)) if e.is_timeout() => {
            debug!(probe = name, error = %e, "Probe timed out");
            (ProbeResult::Unavailable(UnavailableReason::Timeout), "timeout")
        }
        Ok(Err(e)) => {
            debug!(probe = name, error = %e, "Probe failed");
            (
                ProbeResult::Unavailable(UnavailableReason::Failed(e.to_string())),
                "failed",
            )
        }
        Err(_) => {
            warn!(probe = name, "Probe abandoned at deadline");
            (ProbeResult::Unavailable(UnavailableReason::Timeout), "timeout")
        }
    };

    metrics::record_probe_outcome(name, outcome);
    result
}

fn skipped<T>(name: &'static str) -> ProbeResult<T> {
    debug!(probe = name, "Probe skipped: empty registrable domain");
    metrics::record_probe_outcome(name, "skipped");
    ProbeResult::Unavailable(UnavailableReason::EmptyDomain)
}

fn whole_days(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    (to - from).num_seconds().div_euclid(SECONDS_PER_DAY)
}

/// 合并各来源的结果为固定顺序的特征向量
///
/// `Statistical_report` 最后基于已合并的其余特征计算
fn merge(
    lexical: &LexicalFeatures,
    content: &ContentFeatures,
    outcomes: &ProbeOutcomes,
    domain: Option<&RegistrableDomain>,
    redirect_hops: Option<usize>,
    now: DateTime<Utc>,
) -> FeatureVector {
    let whois = outcomes.whois.as_success();

    let partial = FeatureVector::from_fn(|name| match name {
        FeatureName::HavingIpAddress => lexical.having_ip_address.into(),
        FeatureName::UrlLength => lexical.url_length.into(),
        FeatureName::ShortiningService => lexical.shortining_service.into(),
        FeatureName::HavingAtSymbol => lexical.having_at_symbol.into(),
        FeatureName::DoubleSlashRedirecting => lexical.double_slash_redirecting.into(),
        FeatureName::PrefixSuffix => lexical.prefix_suffix.into(),
        FeatureName::HavingSubDomain => lexical.having_sub_domain.into(),
        FeatureName::Port => lexical.port.into(),
        FeatureName::HttpsToken => lexical.https_token.into(),

        FeatureName::SslFinalState => {
            matches!(outcomes.tls, ProbeResult::Success(true)).into()
        }
        FeatureName::DnsRecord => outcomes
            .dns
            .as_success()
            .is_some_and(|records| !records.is_empty())
            .into(),
        FeatureName::DomainRegisterationLength => whois
            .and_then(WhoisRecord::expiration_date)
            .map_or(SENTINEL, |expires| whole_days(now, expires))
            .into(),
        FeatureName::AgeOfDomain => whois
            .and_then(WhoisRecord::creation_date)
            .map_or(SENTINEL, |created| whole_days(created, now))
            .into(),
        FeatureName::AbnormalUrl => {
            let registered = match (domain, whois) {
                (Some(d), Some(record)) => record.registers(d.as_str()),
                _ => false,
            };
            (!registered).into()
        }

        FeatureName::Favicon => content.favicon.into(),
        FeatureName::RequestUrl => content.request_url.into(),
        FeatureName::UrlOfAnchor => content.url_of_anchor.into(),
        FeatureName::LinksInTags => content.links_in_tags.into(),
        FeatureName::Sfh => content.sfh.into(),
        FeatureName::SubmittingToEmail => content.submitting_to_email.into(),
        FeatureName::OnMouseover => content.on_mouseover.into(),
        FeatureName::RightClick => content.right_click.into(),
        FeatureName::PopUpWidnow => content.pop_up_window.into(),
        FeatureName::Iframe => content.iframe.into(),
        FeatureName::Redirect => redirect_hops.map_or(SENTINEL, |hops| hops as i64).into(),

        // No free data source backs these columns
        FeatureName::WebTraffic
        | FeatureName::PageRank
        | FeatureName::GoogleIndex
        | FeatureName::LinksPointingToPage => FeatureValue::sentinel(),

        FeatureName::StatisticalReport => FeatureValue::Int(0),
    });

    let suspicious = partial
        .iter()
        .filter(|(name, value)| *name != FeatureName::StatisticalReport && value.is_suspicious())
        .count() as i64;

    FeatureVector::from_fn(|name| match name {
        FeatureName::StatisticalReport => suspicious.into(),
        other => partial.get(other),
    })
}

#[cfg(test)]
#[path = "feature_extractor_test.rs"]
mod tests;
