// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::domain::models::fetched_document::FetchedPage;
use crate::domain::models::whois_record::WhoisRecord;
use async_trait::async_trait;
use hickory_resolver::error::ResolveErrorKind;
use hickory_resolver::proto::error::ProtoErrorKind;
use std::net::Ipv4Addr;
use thiserror::Error;

/// 探测错误类型
#[derive(Error, Debug)]
pub enum ProbeError {
    /// HTTP请求失败
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    /// 网络I/O失败
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TLS握手失败
    #[error("TLS error: {0}")]
    Tls(#[from] rustls::Error),
    /// DNS解析失败
    #[error("DNS error: {0}")]
    Dns(#[from] hickory_resolver::error::ResolveError),
    /// 超时
    #[error("Timeout")]
    Timeout,
    /// 重定向次数过多
    #[error("Too many redirects (limit {0})")]
    TooManyRedirects(usize),
    /// 其他错误
    #[error("Other error: {0}")]
    Other(String),
}

impl ProbeError {
    /// 判断错误是否由超时引起
    pub fn is_timeout(&self) -> bool {
        match self {
            ProbeError::RequestFailed(e) => e.is_timeout(),
            ProbeError::Io(e) => e.kind() == std::io::ErrorKind::TimedOut,
            ProbeError::Dns(e) => match e.kind() {
                ResolveErrorKind::Timeout => true,
                ResolveErrorKind::Proto(p) => matches!(p.kind(), ProtoErrorKind::Timeout),
                _ => false,
            },
            ProbeError::Timeout => true,
            _ => false,
        }
    }
}

/// TLS探测：握手并读取对端证书
#[async_trait]
pub trait TlsProbe: Send + Sync {
    /// 对端在握手中出示了证书时返回 true
    async fn peer_certificate_present(&self, host: &str) -> Result<bool, ProbeError>;

    fn name(&self) -> &'static str {
        "tls"
    }
}

/// DNS探测：A记录查询
#[async_trait]
pub trait DnsProbe: Send + Sync {
    async fn lookup_a(&self, host: &str) -> Result<Vec<Ipv4Addr>, ProbeError>;

    fn name(&self) -> &'static str {
        "dns"
    }
}

/// WHOIS探测：单次注册信息查询
#[async_trait]
pub trait WhoisProbe: Send + Sync {
    async fn query(&self, domain: &str) -> Result<WhoisRecord, ProbeError>;

    fn name(&self) -> &'static str {
        "whois"
    }
}

/// 内容抓取：一次GET（跟随重定向）
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, ProbeError>;

    fn name(&self) -> &'static str {
        "fetch"
    }
}
