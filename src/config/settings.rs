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

use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use config::builder::DefaultState;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (compatible; phishscan/0.1; +https://github.com/Kirky-X/phishscan)";

/// 应用程序配置设置
///
/// 包含服务器、探测和指标导出等配置项
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 服务器配置
    pub server: ServerSettings,
    /// 网络探测配置
    pub probes: ProbeSettings,
    /// 指标导出配置
    pub metrics: MetricsSettings,
}

/// 服务器配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// 服务器监听主机地址
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
}

/// 探测配置设置
///
/// 各超时以毫秒为单位；每个探测的有效期限为自身超时与调用期限中较早者
#[derive(Debug, Clone, Deserialize)]
pub struct ProbeSettings {
    /// TLS握手超时
    pub tls_timeout_ms: u64,
    /// DNS查询超时
    pub dns_timeout_ms: u64,
    /// WHOIS查询超时
    pub whois_timeout_ms: u64,
    /// 页面抓取超时
    pub fetch_timeout_ms: u64,
    /// 单次提取的总期限
    pub call_deadline_ms: u64,
    /// 最大重定向次数
    pub max_redirects: usize,
    /// 抓取时使用的User-Agent
    pub user_agent: String,
    /// 固定WHOIS服务器（host:port），为空时按顶级域选择
    pub whois_server: Option<String>,
    /// 固定DNS服务器（ip:port），为空时读取系统解析配置
    pub dns_server: Option<String>,
}

/// 指标导出配置
#[derive(Debug, Clone, Deserialize)]
pub struct MetricsSettings {
    /// 是否启用Prometheus导出
    pub enabled: bool,
    /// 导出监听地址
    pub listen_addr: String,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            tls_timeout_ms: 3000,
            dns_timeout_ms: 3000,
            whois_timeout_ms: 6000,
            fetch_timeout_ms: 6000,
            call_deadline_ms: 15000,
            max_redirects: 10,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            whois_server: None,
            dns_server: None,
        }
    }
}

impl ProbeSettings {
    pub fn tls_timeout(&self) -> Duration {
        Duration::from_millis(self.tls_timeout_ms)
    }

    pub fn dns_timeout(&self) -> Duration {
        Duration::from_millis(self.dns_timeout_ms)
    }

    pub fn whois_timeout(&self) -> Duration {
        Duration::from_millis(self.whois_timeout_ms)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }

    pub fn call_deadline(&self) -> Duration {
        Duration::from_millis(self.call_deadline_ms)
    }
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 依次叠加默认值、`config/default`、`config/{APP_ENVIRONMENT}` 与
    /// `PHISHSCAN__*` 环境变量
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        Self::defaults()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("PHISHSCAN").separator("__"))
            .build()?
            .try_deserialize()
    }

    /// 从指定配置文件加载（文件必须存在）
    pub fn load_from(path: &str) -> Result<Self, ConfigError> {
        Self::defaults()?
            .add_source(File::with_name(path).required(true))
            .add_source(Environment::with_prefix("PHISHSCAN").separator("__"))
            .build()?
            .try_deserialize()
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let probes = ProbeSettings::default();
        Config::builder()
            // Server
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            // Probes
            .set_default("probes.tls_timeout_ms", probes.tls_timeout_ms)?
            .set_default("probes.dns_timeout_ms", probes.dns_timeout_ms)?
            .set_default("probes.whois_timeout_ms", probes.whois_timeout_ms)?
            .set_default("probes.fetch_timeout_ms", probes.fetch_timeout_ms)?
            .set_default("probes.call_deadline_ms", probes.call_deadline_ms)?
            .set_default("probes.max_redirects", probes.max_redirects as u64)?
            .set_default("probes.user_agent", probes.user_agent)?
            // Metrics
            .set_default("metrics.enabled", false)?
            .set_default("metrics.listen_addr", "0.0.0.0:9000")
    }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;
