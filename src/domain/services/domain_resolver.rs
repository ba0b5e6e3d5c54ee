// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::registrable_domain::RegistrableDomain;
use crate::utils::url_utils;
use url::{Host, Url};

/// 从URL字符串解析可注册域名
///
/// 无法解析、没有主机或主机为IP字面量时返回 `None`
pub fn resolve(url: &str) -> Option<RegistrableDomain> {
    let parsed = url_utils::parse_lenient(url).ok()?;
    resolve_parsed(&parsed)
}

/// 从已解析的URL计算可注册域名
pub fn resolve_parsed(url: &Url) -> Option<RegistrableDomain> {
    match url.host()? {
        Host::Domain(host) => resolve_host(host),
        Host::Ipv4(_) | Host::Ipv6(_) => None,
    }
}

/// 按公共后缀列表拆分主机名
pub fn resolve_host(host: &str) -> Option<RegistrableDomain> {
    let host = host.trim_end_matches('.').to_ascii_lowercase();
    if host.is_empty() {
        return None;
    }

    let domain = psl::domain_str(&host)?;
    let suffix = psl::suffix_str(&host)?;

    let label = domain.strip_suffix(suffix)?.strip_suffix('.')?;
    if label.is_empty() {
        return None;
    }

    let subdomain = host
        .strip_suffix(domain)
        .map(|rest| rest.trim_end_matches('.'))
        .unwrap_or("");

    Some(RegistrableDomain::new(domain, label, suffix, subdomain))
}
