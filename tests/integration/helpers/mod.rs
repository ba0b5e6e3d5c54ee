// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use phishscan::config::settings::ProbeSettings;
use phishscan::domain::models::fetched_document::FetchedPage;
use phishscan::domain::models::whois_record::WhoisRecord;
use phishscan::domain::services::feature_extractor::FeatureExtractor;
use phishscan::engines::traits::{ContentFetcher, DnsProbe, ProbeError, TlsProbe, WhoisProbe};
use std::net::Ipv4Addr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// 固定返回值的TLS探测
pub struct StaticTls(pub Option<bool>);

#[async_trait]
impl TlsProbe for StaticTls {
    async fn peer_certificate_present(&self, _host: &str) -> Result<bool, ProbeError> {
        self.0
            .ok_or_else(|| ProbeError::Other("handshake refused".to_string()))
    }
}

/// 固定返回值的DNS探测
pub struct StaticDns(pub Option<Vec<Ipv4Addr>>);

#[async_trait]
impl DnsProbe for StaticDns {
    async fn lookup_a(&self, _host: &str) -> Result<Vec<Ipv4Addr>, ProbeError> {
        self.0
            .clone()
            .ok_or_else(|| ProbeError::Other("NXDOMAIN".to_string()))
    }
}

/// 记录调用次数的WHOIS探测
#[derive(Default)]
pub struct CountingWhois {
    pub record: Option<WhoisRecord>,
    pub calls: AtomicUsize,
}

impl CountingWhois {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WhoisProbe for CountingWhois {
    async fn query(&self, _domain: &str) -> Result<WhoisRecord, ProbeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.record
            .clone()
            .ok_or_else(|| ProbeError::Other("no whois server".to_string()))
    }
}

/// 固定页面的抓取器
pub struct StaticFetcher(pub Option<FetchedPage>);

#[async_trait]
impl ContentFetcher for StaticFetcher {
    async fn fetch(&self, _url: &str) -> Result<FetchedPage, ProbeError> {
        self.0
            .clone()
            .ok_or_else(|| ProbeError::Other("connection reset".to_string()))
    }
}

/// 所有探测都失败的提取器
pub fn offline_extractor() -> FeatureExtractor {
    FeatureExtractor::with_probes(
        ProbeSettings::default(),
        Arc::new(StaticTls(None)),
        Arc::new(StaticDns(None)),
        Arc::new(CountingWhois::default()),
        Arc::new(StaticFetcher(None)),
    )
}
