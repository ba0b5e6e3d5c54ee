// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 使用真实抓取引擎与本地WHOIS服务的端到端提取测试

use super::helpers::{CountingWhois, StaticDns, StaticFetcher, StaticTls};
use phishscan::config::settings::ProbeSettings;
use phishscan::domain::models::feature::{FeatureName, FeatureValue};
use phishscan::domain::services::feature_extractor::FeatureExtractor;
use phishscan::engines::reqwest_engine::ReqwestEngine;
use phishscan::engines::whois_probe::TcpWhoisProbe;
use std::net::Ipv4Addr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PHISHING_PAGE: &str = r#"<html>
<head><link rel="icon" href="https://cdn.elsewhere.net/favicon.ico"></head>
<body oncontextmenu="return false">
  <form action="mailto:collect@elsewhere.net"></form>
  <a href="mailto:help@elsewhere.net">help</a>
  <a href="https://elsewhere.net/real">real</a>
  <iframe src="https://elsewhere.net/frame"></iframe>
  <script>window.open('https://elsewhere.net/popup');</script>
</body>
</html>"#;

#[tokio::test]
async fn fetch_follows_redirects_and_issues_one_get_per_hop() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/start"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", "/login"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(PHISHING_PAGE, "text/html"))
        .expect(1)
        .mount(&server)
        .await;

    let settings = ProbeSettings::default();
    let fetcher = ReqwestEngine::new(&settings).unwrap();
    let extractor = FeatureExtractor::with_probes(
        settings,
        Arc::new(StaticTls(None)),
        Arc::new(StaticDns(None)),
        Arc::new(CountingWhois::default()),
        Arc::new(fetcher),
    );

    let url = format!("{}/start", server.uri());
    let features = extractor.extract_all_features(&url).await.unwrap();

    assert_eq!(features.get(FeatureName::Redirect), FeatureValue::Int(1));
    assert_eq!(features.get(FeatureName::RightClick), FeatureValue::Int(1));
    assert_eq!(features.get(FeatureName::Iframe), FeatureValue::Int(1));
    assert_eq!(features.get(FeatureName::PopUpWidnow), FeatureValue::Int(1));
    assert_eq!(features.get(FeatureName::SubmittingToEmail), FeatureValue::Int(1));
    assert_eq!(features.get(FeatureName::HavingIpAddress), FeatureValue::Int(1));
    // The page host is an IP literal, so every named host is foreign
    assert_eq!(features.get(FeatureName::Favicon), FeatureValue::Int(1));
    assert_eq!(features.get(FeatureName::UrlOfAnchor), FeatureValue::Float(0.5));
}

#[tokio::test]
async fn one_whois_query_feeds_three_features() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let connections = Arc::new(AtomicUsize::new(0));

    let counter = connections.clone();
    tokio::spawn(async move {
        loop {
            let (mut socket, _) = listener.accept().await.unwrap();
            counter.fetch_add(1, Ordering::SeqCst);
            let mut buf = [0u8; 256];
            let _ = socket.read(&mut buf).await;
            let response = "Domain Name: EXAMPLE.COM\r\n\
                            Creation Date: 2000-01-01T00:00:00Z\r\n\
                            Registry Expiry Date: 2999-01-01T00:00:00Z\r\n";
            let _ = socket.write_all(response.as_bytes()).await;
        }
    });

    let extractor = FeatureExtractor::with_probes(
        ProbeSettings::default(),
        Arc::new(StaticTls(Some(true))),
        Arc::new(StaticDns(Some(vec![Ipv4Addr::new(93, 184, 216, 34)]))),
        Arc::new(TcpWhoisProbe::new(Some(addr.to_string()))),
        Arc::new(StaticFetcher(None)),
    );

    let report = extractor.extract("https://example.com/").await.unwrap();
    let features = &report.features;

    assert_eq!(connections.load(Ordering::SeqCst), 1);
    assert_eq!(features.get(FeatureName::AbnormalUrl), FeatureValue::Int(0));
    assert!(matches!(
        features.get(FeatureName::AgeOfDomain),
        FeatureValue::Int(days) if days > 9_000
    ));
    assert!(matches!(
        features.get(FeatureName::DomainRegisterationLength),
        FeatureValue::Int(days) if days > 300_000
    ));
    assert_eq!(features.get(FeatureName::SslFinalState), FeatureValue::Int(1));
    assert_eq!(features.get(FeatureName::DnsRecord), FeatureValue::Int(1));
    assert!(features.get(FeatureName::Redirect).is_sentinel());
}

#[tokio::test]
async fn concurrent_calls_are_independent() {
    let extractor = Arc::new(super::helpers::offline_extractor());

    let handles: Vec<_> = ["https://a-b.example.com/", "https://bit.ly/xyz"]
        .into_iter()
        .map(|url| {
            let extractor = extractor.clone();
            tokio::spawn(async move { extractor.extract_all_features(url).await.unwrap() })
        })
        .collect();

    let mut results = Vec::new();
    for handle in handles {
        results.push(handle.await.unwrap());
    }

    assert_eq!(results[0].get(FeatureName::ShortiningService), FeatureValue::Int(0));
    assert_eq!(results[0].get(FeatureName::HavingSubDomain), FeatureValue::Int(1));
    assert_eq!(results[1].get(FeatureName::ShortiningService), FeatureValue::Int(1));
}
