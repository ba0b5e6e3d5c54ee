// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::ProbeSettings;
use crate::engines::traits::{DnsProbe, ProbeError};
use async_trait::async_trait;
use hickory_resolver::config::{NameServerConfig, Protocol, ResolverConfig, ResolverOpts};
use hickory_resolver::system_conf::read_system_conf;
use hickory_resolver::TokioAsyncResolver;
use std::net::{Ipv4Addr, SocketAddr};
use tracing::warn;

/// 基于 hickory 的A记录探测
///
/// 直接向名称服务器发起A查询，不读取 hosts 文件
#[derive(Clone)]
pub struct ResolverDnsProbe {
    resolver: TokioAsyncResolver,
}

impl ResolverDnsProbe {
    /// 使用配置的DNS服务器创建探测；未配置时读取系统解析配置
    pub fn new(settings: &ProbeSettings) -> Result<Self, ProbeError> {
        let (config, mut opts) = match &settings.dns_server {
            Some(server) => {
                let addr: SocketAddr = server
                    .parse()
                    .map_err(|e| ProbeError::Other(format!("invalid DNS server {}: {}", server, e)))?;
                let mut config = ResolverConfig::new();
                config.add_name_server(NameServerConfig::new(addr, Protocol::Udp));
                (config, ResolverOpts::default())
            }
            None => read_system_conf().unwrap_or_else(|e| {
                warn!("Failed to read system resolver config, using defaults: {}", e);
                (ResolverConfig::default(), ResolverOpts::default())
            }),
        };

        opts.timeout = settings.dns_timeout();
        opts.attempts = 1;
        opts.use_hosts_file = false;

        Ok(Self {
            resolver: TokioAsyncResolver::tokio(config, opts),
        })
    }
}

#[async_trait]
impl DnsProbe for ResolverDnsProbe {
    async fn lookup_a(&self, host: &str) -> Result<Vec<Ipv4Addr>, ProbeError> {
        let lookup = self.resolver.ipv4_lookup(host).await?;

        let mut records: Vec<Ipv4Addr> = lookup.iter().map(|record| record.0).collect();
        records.dedup();

        Ok(records)
    }
}
