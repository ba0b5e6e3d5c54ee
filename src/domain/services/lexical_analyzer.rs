// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

//! 词法特征
//!
//! 只依赖URL字符串本身，不做任何I/O，也不会失败。

use crate::domain::models::registrable_domain::RegistrableDomain;
use crate::domain::services::domain_resolver;
use crate::utils::url_utils;
use once_cell::sync::Lazy;
use regex::Regex;

/// 已知短链接服务域名
pub const SHORTENER_DOMAINS: &[&str] = &[
    "bit.ly",
    "tinyurl.com",
    "goo.gl",
    "ow.ly",
    "t.co",
    "is.gd",
    "buff.ly",
    "adf.ly",
];

static IP_HOST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://\d+\.\d+\.\d+\.\d+").expect("IP host pattern must compile")
});

/// 词法特征集合
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexicalFeatures {
    pub having_ip_address: i64,
    pub url_length: i64,
    pub shortining_service: i64,
    pub having_at_symbol: i64,
    pub double_slash_redirecting: i64,
    pub prefix_suffix: i64,
    pub having_sub_domain: i64,
    pub port: i64,
    pub https_token: i64,
}

/// 词法分析器
pub struct LexicalAnalyzer;

impl LexicalAnalyzer {
    /// 计算全部词法特征
    ///
    /// `domain` 为本次提取已经解析好的可注册域名，避免重复解析
    pub fn analyze(url: &str, domain: Option<&RegistrableDomain>) -> LexicalFeatures {
        LexicalFeatures {
            having_ip_address: having_ip_address(url),
            url_length: url_length(url),
            shortining_service: shortining_service(url),
            having_at_symbol: having_at_symbol(url),
            double_slash_redirecting: double_slash_redirecting(url),
            prefix_suffix: prefix_suffix_of(domain),
            having_sub_domain: sub_domain_count_of(domain),
            port: port(url),
            https_token: https_token(url),
        }
    }
}

/// `http(s)://` 后紧跟点分四段数字时为 1
pub fn having_ip_address(url: &str) -> i64 {
    i64::from(IP_HOST.is_match(url))
}

/// URL字符数
pub fn url_length(url: &str) -> i64 {
    url.chars().count() as i64
}

/// 主机为短链接服务（或其子域）时为 1
pub fn shortining_service(url: &str) -> i64 {
    let host = host_of(url);
    let hit = SHORTENER_DOMAINS
        .iter()
        .any(|s| host == *s || host.ends_with(&format!(".{}", s)));
    i64::from(hit)
}

pub fn having_at_symbol(url: &str) -> i64 {
    i64::from(url.contains('@'))
}

/// 协议分隔符之后仍出现 `//` 时为 1
pub fn double_slash_redirecting(url: &str) -> i64 {
    let after_protocol = match url.split_once("://") {
        Some((_, rest)) => rest,
        None => url,
    };
    i64::from(after_protocol.contains("//"))
}

pub fn prefix_suffix(url: &str) -> i64 {
    prefix_suffix_of(domain_resolver::resolve(url).as_ref())
}

pub fn having_sub_domain(url: &str) -> i64 {
    sub_domain_count_of(domain_resolver::resolve(url).as_ref())
}

/// 显式端口，否则按协议推断 80/443
pub fn port(url: &str) -> i64 {
    if let Some(explicit) = explicit_port(url) {
        return explicit;
    }
    if url.starts_with("http://") {
        80
    } else {
        443
    }
}

/// 主机片段中出现 "https" 时为 1（与实际协议无关）
pub fn https_token(url: &str) -> i64 {
    let host = url_utils::raw_authority(url).to_ascii_lowercase();
    i64::from(host.contains("https"))
}

fn prefix_suffix_of(domain: Option<&RegistrableDomain>) -> i64 {
    domain.map_or(0, |d| i64::from(d.label().contains('-')))
}

fn sub_domain_count_of(domain: Option<&RegistrableDomain>) -> i64 {
    domain.map_or(0, |d| d.subdomain_label_count() as i64)
}

fn explicit_port(url: &str) -> Option<i64> {
    let authority = url_utils::raw_authority(url);
    let host_port = authority.rsplit('@').next()?;
    // IPv6 literals carry colons inside brackets
    let tail = match host_port.rfind(']') {
        Some(idx) => &host_port[idx + 1..],
        None => host_port,
    };
    let (_, port) = tail.rsplit_once(':')?;
    if port.is_empty() || !port.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    port.parse::<i64>().ok()
}

fn host_of(url: &str) -> String {
    match url_utils::parse_lenient(url) {
        Ok(parsed) => parsed.host_str().unwrap_or("").to_ascii_lowercase(),
        Err(_) => {
            let authority = url_utils::raw_authority(url);
            let host_port = authority.rsplit('@').next().unwrap_or("");
            host_port
                .split(':')
                .next()
                .unwrap_or("")
                .to_ascii_lowercase()
        }
    }
}
