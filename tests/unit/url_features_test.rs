// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use phishscan::domain::services::domain_resolver;
use phishscan::domain::services::lexical_analyzer::LexicalAnalyzer;
use phishscan::utils::errors::ExtractionError;

#[test]
fn lexical_features_for_a_typical_phishing_url() {
    let url = "http://paypal-secure.login.account-update.co.uk:8080/https//verify@user";
    let domain = domain_resolver::resolve(url);
    let features = LexicalAnalyzer::analyze(url, domain.as_ref());

    assert_eq!(domain.as_ref().map(|d| d.as_str()), Some("account-update.co.uk"));
    assert_eq!(features.having_ip_address, 0);
    assert_eq!(features.having_at_symbol, 1);
    assert_eq!(features.double_slash_redirecting, 1);
    assert_eq!(features.prefix_suffix, 1);
    assert_eq!(features.having_sub_domain, 2);
    assert_eq!(features.port, 8080);
    assert_eq!(features.https_token, 0);
    assert_eq!(features.url_length, url.chars().count() as i64);
}

#[test]
fn https_token_looks_at_the_host_only() {
    let url = "http://https-secure-bank.com/";
    let features = LexicalAnalyzer::analyze(url, domain_resolver::resolve(url).as_ref());
    assert_eq!(features.https_token, 1);
    assert_eq!(features.port, 80);
}

#[tokio::test]
async fn crate_entry_point_rejects_unparsable_input() {
    let result = phishscan::extract_all_features("http://").await;
    assert!(matches!(result, Err(ExtractionError::InvalidUrl(_))));
}
