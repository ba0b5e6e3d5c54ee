// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::whois_record::WhoisRecord;
use crate::engines::traits::{ProbeError, WhoisProbe};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::debug;

const IANA_SERVER: &str = "whois.iana.org:43";
const MAX_RESPONSE_BYTES: u64 = 512 * 1024;

const CREATION_KEYS: &[&str] = &[
    "creation date",
    "created",
    "created on",
    "registered on",
    "registration time",
    "domain registration date",
];

const EXPIRATION_KEYS: &[&str] = &[
    "registry expiry date",
    "expiration date",
    "registrar registration expiration date",
    "expiry date",
    "expires",
    "expires on",
    "paid-till",
    "expire date",
];

const DOMAIN_KEYS: &[&str] = &["domain name", "domain"];

const NOT_FOUND_MARKERS: &[&str] = &["no match", "not found", "no entries found", "no data found"];

/// 直接通过TCP 43端口查询的WHOIS探测
///
/// 常见顶级域使用内置服务器表，其余经由IANA转介一次
#[derive(Debug, Clone, Default)]
pub struct TcpWhoisProbe {
    server_override: Option<String>,
}

impl TcpWhoisProbe {
    pub fn new(server_override: Option<String>) -> Self {
        Self { server_override }
    }

    async fn query_server(server: &str, domain: &str) -> Result<String, ProbeError> {
        let address = with_default_port(server);
        let mut stream = TcpStream::connect(address.as_str()).await?;
        stream.write_all(format!("{}\r\n", domain).as_bytes()).await?;

        let mut response = Vec::new();
        stream
            .take(MAX_RESPONSE_BYTES)
            .read_to_end(&mut response)
            .await?;

        debug!(server = %address, bytes = response.len(), "WHOIS response received");
        Ok(String::from_utf8_lossy(&response).into_owned())
    }
}

#[async_trait]
impl WhoisProbe for TcpWhoisProbe {
    async fn query(&self, domain: &str) -> Result<WhoisRecord, ProbeError> {
        if let Some(server) = &self.server_override {
            let response = Self::query_server(server, domain).await?;
            return Ok(parse_whois_response(&response));
        }

        let tld = domain.rsplit('.').next().unwrap_or(domain);
        let response = match server_for_tld(tld) {
            Some(server) => Self::query_server(server, domain).await?,
            None => {
                let iana = Self::query_server(IANA_SERVER, domain).await?;
                let server = referral_server(&iana, tld)?;
                Self::query_server(&server, domain).await?
            }
        };

        Ok(parse_whois_response(&response))
    }
}

fn with_default_port(server: &str) -> String {
    if server.contains(':') {
        server.to_string()
    } else {
        format!("{}:43", server)
    }
}

/// 常见顶级域的WHOIS服务器
pub fn server_for_tld(tld: &str) -> Option<&'static str> {
    let server = match tld.to_ascii_lowercase().as_str() {
        "com" | "net" => "whois.verisign-grs.com:43",
        "org" => "whois.pir.org:43",
        "info" => "whois.afilias.net:43",
        "biz" => "whois.nic.biz:43",
        "us" => "whois.nic.us:43",
        "co" => "whois.nic.co:43",
        "io" => "whois.nic.io:43",
        "me" => "whois.nic.me:43",
        "uk" => "whois.nic.uk:43",
        "ca" => "whois.cira.ca:43",
        "de" => "whois.denic.de:43",
        "fr" => "whois.nic.fr:43",
        "nl" => "whois.domain-registry.nl:43",
        "eu" => "whois.eu:43",
        "au" => "whois.auda.org.au:43",
        "ru" => "whois.tcinet.ru:43",
        "jp" => "whois.jprs.jp:43",
        "cn" => "whois.cnnic.cn:43",
        "in" => "whois.registry.in:43",
        "br" => "whois.registro.br:43",
        "xyz" => "whois.nic.xyz:43",
        "top" => "whois.nic.top:43",
        _ => return None,
    };
    Some(server)
}

/// 从IANA响应中提取转介的WHOIS服务器
pub fn find_referral(response: &str) -> Option<String> {
    response.lines().find_map(|line| {
        let (key, value) = split_field(line)?;
        match key.as_str() {
            "refer" | "whois" if !value.is_empty() => Some(value.to_string()),
            _ => None,
        }
    })
}

/// IANA 没有给出转介时不能把它对顶级域的记录当作域名记录
fn referral_server(iana_response: &str, tld: &str) -> Result<String, ProbeError> {
    find_referral(iana_response)
        .ok_or_else(|| ProbeError::Other(format!("no WHOIS server for .{}", tld)))
}

fn split_field(line: &str) -> Option<(String, &str)> {
    let (key, value) = line.trim().split_once(':')?;
    let key = key.trim().trim_start_matches('%').trim().to_ascii_lowercase();
    if key.is_empty() {
        return None;
    }
    Some((key, value.trim()))
}

/// 解析WHOIS文本响应
///
/// 没有解析出域名且带有“未找到”字样时视为未注册，返回空记录。
/// 已登记的记录里出现的法律声明不影响结果
pub fn parse_whois_response(response: &str) -> WhoisRecord {
    let mut record = WhoisRecord::default();

    for line in response.lines() {
        let Some((key, value)) = split_field(line) else {
            continue;
        };
        if value.is_empty() {
            continue;
        }

        if DOMAIN_KEYS.contains(&key.as_str()) {
            record.domain_names.push(value.to_ascii_lowercase());
        } else if CREATION_KEYS.contains(&key.as_str()) {
            if let Some(date) = parse_whois_date(value) {
                record.creation_dates.push(date);
            }
        } else if EXPIRATION_KEYS.contains(&key.as_str()) {
            if let Some(date) = parse_whois_date(value) {
                record.expiration_dates.push(date);
            }
        }
    }

    if record.domain_names.is_empty() {
        let lowered = response.to_lowercase();
        if NOT_FOUND_MARKERS.iter().any(|marker| lowered.contains(marker)) {
            return WhoisRecord::default();
        }
    }

    record
}

/// 解析注册商常见的日期格式
pub fn parse_whois_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    // Drop trailing zone names such as "UTC" or "(JST)"
    let head = value.split_whitespace().take(2).collect::<Vec<_>>().join(" ");

    const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%SZ", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];
    for candidate in [value, head.as_str()] {
        for fmt in DATETIME_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(candidate, fmt) {
                return Some(Utc.from_utc_datetime(&naive));
            }
        }
    }

    const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d-%b-%Y", "%Y.%m.%d", "%d.%m.%Y", "%Y/%m/%d"];
    let date_part = value.split_whitespace().next().unwrap_or(value);
    DATE_FORMATS.iter().find_map(|fmt| {
        NaiveDate::parse_from_str(date_part, fmt)
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| Utc.from_utc_datetime(&naive))
    })
}
